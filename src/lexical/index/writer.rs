//! Index writer: document ingestion and commit.
//!
//! The writer analyzes every indexed field of a document, assigns the next
//! document id, appends the terms to the inverted index and keeps the stored
//! fields in the document store. All mutation happens under one lock, so
//! concurrent `add_document` calls on a shared writer are serialized and
//! ids stay gapless and in postings order.
//!
//! Keyword fields skip analysis: the raw value is indexed as one term.
//!
//! A call that fails leaves the index untouched: the lifecycle state is
//! checked and every field is analyzed before anything is written.

use std::sync::Arc;

use log::{debug, info};
use rayon::prelude::*;

use crate::document::document::{Document, Field};
use crate::error::{KopisError, Result};
use crate::lexical::index::index::{Index, Snapshot};
use crate::lexical::index::inverted::InvertedIndex;
use crate::lexical::index::posting::DocId;
use crate::lexical::index::store::DocumentStore;

/// Statistics about the writing process.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct WriterStats {
    /// Number of documents added.
    pub docs_added: u64,
    /// Number of field values analyzed into the inverted index.
    pub fields_indexed: u64,
    /// Number of terms produced by analysis (before deduplication).
    pub terms_indexed: u64,
}

/// Mutable state of an index that has not been committed yet.
#[derive(Debug, Default)]
pub(crate) struct BuildState {
    inverted: InvertedIndex,
    store: DocumentStore,
    next_doc_id: DocId,
    stats: WriterStats,
}

impl BuildState {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    fn apply(&mut self, doc: AnalyzedDocument) -> DocId {
        let doc_id = self.next_doc_id;

        self.inverted.register_document(doc_id);
        for (field, terms) in &doc.indexed {
            self.stats.terms_indexed += terms.len() as u64;
            self.stats.fields_indexed += 1;
            self.inverted.index_field(doc_id, field, terms);
        }
        self.store.put(doc_id, doc.stored);

        self.next_doc_id += 1;
        self.stats.docs_added += 1;
        doc_id
    }

    fn freeze(mut self) -> Snapshot {
        self.inverted.shrink_to_fit();
        self.store.shrink_to_fit();
        Snapshot::new(self.inverted, self.store)
    }
}

/// A document after analysis, ready to be applied.
#[derive(Debug)]
struct AnalyzedDocument {
    indexed: Vec<(String, Vec<String>)>,
    stored: Document,
}

/// The single writer of an [`Index`].
///
/// Obtained from [`Index::writer`]. Methods take `&self`, so the writer can
/// be shared between threads; mutations are serialized internally.
/// Dropping an uncommitted writer lets [`Index::writer`] hand out a new one
/// that continues the same index.
#[derive(Debug)]
pub struct IndexWriter {
    index: Index,
}

impl IndexWriter {
    pub(crate) fn new(index: Index) -> Self {
        IndexWriter { index }
    }

    /// Add a document and return its assigned id.
    ///
    /// Fails with `InvalidState` after [`commit`](Self::commit).
    pub fn add_document(&self, doc: Document) -> Result<DocId> {
        self.check_building()?;
        let analyzed = self.analyze_document(doc)?;

        let mut building = self.index.building().lock();
        let state = building.as_mut().ok_or_else(committed_error)?;
        Ok(state.apply(analyzed))
    }

    /// Add a batch of documents and return their ids, in input order.
    ///
    /// Documents are analyzed in parallel, then appended together, so the
    /// batch gets consecutive ids. If analysis of any document fails,
    /// nothing is added.
    pub fn add_documents(&self, docs: Vec<Document>) -> Result<Vec<DocId>> {
        self.check_building()?;
        let analyzed = docs
            .into_par_iter()
            .map(|doc| self.analyze_document(doc))
            .collect::<Result<Vec<_>>>()?;

        let mut building = self.index.building().lock();
        let state = building.as_mut().ok_or_else(committed_error)?;
        Ok(analyzed.into_iter().map(|doc| state.apply(doc)).collect())
    }

    /// Seal the index and make it searchable.
    ///
    /// Can be called once; a second call fails with `InvalidState`.
    pub fn commit(&self) -> Result<()> {
        let mut building = self.index.building().lock();
        let state = building.take().ok_or_else(committed_error)?;
        let stats = state.stats;

        let snapshot = state.freeze();
        info!(
            "committed index: {} documents, {} fields indexed, {} terms, {} postings",
            stats.docs_added,
            stats.fields_indexed,
            stats.terms_indexed,
            snapshot.inverted().posting_count()
        );
        self.index.publish(Arc::new(snapshot))
    }

    /// Number of documents added and not yet committed.
    pub fn pending_docs(&self) -> u64 {
        self.index
            .building()
            .lock()
            .as_ref()
            .map_or(0, |state| state.next_doc_id)
    }

    /// Statistics of the documents added so far (zero after commit).
    pub fn stats(&self) -> WriterStats {
        self.index
            .building()
            .lock()
            .as_ref()
            .map(|state| state.stats)
            .unwrap_or_default()
    }

    /// Whether [`commit`](Self::commit) has succeeded.
    pub fn is_committed(&self) -> bool {
        self.index.is_searchable()
    }

    /// Get the index this writer belongs to.
    pub fn index(&self) -> &Index {
        &self.index
    }

    fn check_building(&self) -> Result<()> {
        if self.is_committed() {
            Err(committed_error())
        } else {
            Ok(())
        }
    }

    fn analyze_document(&self, doc: Document) -> Result<AnalyzedDocument> {
        let config = self.index.config();
        let analyzer = self.index.analyzer();

        let mut indexed = Vec::new();
        let mut stored = Document::new();

        for field in doc.fields() {
            let option = config.field_option(&field.name);
            if option.is_ignored() {
                debug!("ignoring field '{}': neither stored nor indexed", field.name);
                continue;
            }
            if option.is_exact() {
                let terms = if field.value.is_empty() {
                    Vec::new()
                } else {
                    vec![field.value.clone()]
                };
                indexed.push((field.name.clone(), terms));
            } else if option.indexed {
                indexed.push((field.name.clone(), analyzer.terms(&field.value)?));
            }
            if option.stored {
                stored.add_field(Field::new(field.name.as_str(), field.value.as_str()));
            }
        }

        Ok(AnalyzedDocument { indexed, stored })
    }
}

impl Drop for IndexWriter {
    fn drop(&mut self) {
        self.index.release_writer();
    }
}

fn committed_error() -> KopisError {
    KopisError::invalid_state("writer is already committed")
}
