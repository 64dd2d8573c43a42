//! The owning index handle and its write-once lifecycle.
//!
//! An [`Index`] starts out *building*: its single [`IndexWriter`] appends
//! documents. [`IndexWriter::commit`] seals it into an immutable
//! [`Snapshot`] and the index becomes *searchable*. There is no way back,
//! and searchers can only be created once the snapshot exists, so a query
//! never observes a half-written index.
//!
//! ```text
//! Index::new ──► Building ──commit──► Searchable
//!                  │                     │
//!              IndexWriter        IndexSearcher (any number, lock-free)
//! ```
//!
//! # Examples
//!
//! ```
//! use kopis::document::document::Document;
//! use kopis::lexical::config::IndexConfig;
//! use kopis::lexical::index::index::Index;
//!
//! let config = IndexConfig::new()
//!     .stored_indexed_field("keyword")
//!     .stored_field("title");
//! let index = Index::new(config).unwrap();
//!
//! let writer = index.writer().unwrap();
//! writer
//!     .add_document(
//!         Document::builder()
//!             .add_text("keyword", "heavy item")
//!             .add_text("title", "Use small boxes for heavy items.")
//!             .build(),
//!     )
//!     .unwrap();
//! writer.commit().unwrap();
//!
//! let results = index.search("heavy", "keyword", 10).unwrap();
//! assert_eq!(results.hits.len(), 1);
//! assert_eq!(results.hits[0].fields.get("title"), Some("Use small boxes for heavy items."));
//! ```

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, OnceLock};

use parking_lot::Mutex;

use crate::analysis::analyzer::analyzer::Analyzer;
use crate::analysis::analyzer::standard::StandardAnalyzer;
use crate::error::{KopisError, Result};
use crate::lexical::config::IndexConfig;
use crate::lexical::index::inverted::InvertedIndex;
use crate::lexical::index::store::DocumentStore;
use crate::lexical::index::writer::{BuildState, IndexWriter};
use crate::lexical::query::parser::QueryParser;
use crate::lexical::search::materializer::ResultMaterializer;
use crate::lexical::search::searcher::IndexSearcher;
use crate::lexical::search::SearchResults;

/// The committed, read-only contents of an index.
#[derive(Debug)]
pub struct Snapshot {
    inverted: InvertedIndex,
    store: DocumentStore,
}

impl Snapshot {
    pub(crate) fn new(inverted: InvertedIndex, store: DocumentStore) -> Self {
        Snapshot { inverted, store }
    }

    /// Get the inverted index.
    pub fn inverted(&self) -> &InvertedIndex {
        &self.inverted
    }

    /// Get the document store.
    pub fn store(&self) -> &DocumentStore {
        &self.store
    }

    /// Number of documents in the index.
    pub fn total_documents(&self) -> u64 {
        self.inverted.total_documents()
    }
}

struct IndexInner {
    config: IndexConfig,
    analyzer: Arc<dyn Analyzer>,
    building: Mutex<Option<BuildState>>,
    committed: OnceLock<Arc<Snapshot>>,
    writer_claimed: AtomicBool,
}

/// Shared handle to one index. Cloning is cheap and yields the same index.
#[derive(Clone)]
pub struct Index {
    inner: Arc<IndexInner>,
}

impl Index {
    /// Create an index using a [`StandardAnalyzer`] built from the
    /// configured stopwords (lowercased, since the analyzer lowercases
    /// tokens before removing stopwords).
    pub fn new(config: IndexConfig) -> Result<Self> {
        let analyzer = StandardAnalyzer::with_stop_words(config.normalized_stopwords())?;
        Ok(Self::with_analyzer(config, Arc::new(analyzer)))
    }

    /// Create an index with a custom analyzer.
    ///
    /// The analyzer is used both for indexing and for parsing queries.
    /// `config.stopwords` is not consulted; stop word removal is up to the
    /// analyzer.
    pub fn with_analyzer(config: IndexConfig, analyzer: Arc<dyn Analyzer>) -> Self {
        Index {
            inner: Arc::new(IndexInner {
                config,
                analyzer,
                building: Mutex::new(Some(BuildState::new())),
                committed: OnceLock::new(),
                writer_claimed: AtomicBool::new(false),
            }),
        }
    }

    /// Get the index configuration.
    pub fn config(&self) -> &IndexConfig {
        &self.inner.config
    }

    /// Get the analyzer shared by indexing and query parsing.
    pub fn analyzer(&self) -> &Arc<dyn Analyzer> {
        &self.inner.analyzer
    }

    /// Obtain the writer of this index.
    ///
    /// Only one writer can exist at a time. Fails with `InvalidState` if a
    /// writer is alive or the index is already committed.
    pub fn writer(&self) -> Result<IndexWriter> {
        if self.is_searchable() {
            return Err(KopisError::invalid_state("index is already committed"));
        }
        if self.inner.writer_claimed.swap(true, Ordering::AcqRel) {
            return Err(KopisError::invalid_state(
                "index already has an active writer",
            ));
        }
        Ok(IndexWriter::new(self.clone()))
    }

    /// Whether the index has been committed.
    pub fn is_searchable(&self) -> bool {
        self.inner.committed.get().is_some()
    }

    /// Get the committed snapshot.
    ///
    /// Fails with `InvalidState` before commit.
    pub fn snapshot(&self) -> Result<Arc<Snapshot>> {
        self.inner
            .committed
            .get()
            .cloned()
            .ok_or_else(|| KopisError::invalid_state("index is not committed"))
    }

    /// Create a searcher over the committed index.
    pub fn searcher(&self) -> Result<IndexSearcher> {
        Ok(IndexSearcher::new(self.snapshot()?))
    }

    /// Create a query parser using this index's analyzer and configuration.
    pub fn query_parser(&self) -> QueryParser {
        QueryParser::new(
            Arc::clone(&self.inner.analyzer),
            self.inner.config.indexed_fields.clone(),
        )
        .with_keyword_fields(self.inner.config.keyword_fields.clone())
        .with_all_required(self.inner.config.all_required)
    }

    /// Parse `query_str` against `default_field`, return the top `k` hits
    /// with their stored fields.
    pub fn search(&self, query_str: &str, default_field: &str, k: usize) -> Result<SearchResults> {
        let searcher = self.searcher()?;
        let query = self.query_parser().parse(query_str, default_field)?;

        let (scored, total_hits) = searcher.search_with_total(&query, k)?;
        let hits = ResultMaterializer::new(searcher.snapshot().store()).materialize(&scored)?;

        Ok(SearchResults::new(hits, total_hits))
    }

    pub(crate) fn building(&self) -> &Mutex<Option<BuildState>> {
        &self.inner.building
    }

    pub(crate) fn publish(&self, snapshot: Arc<Snapshot>) -> Result<()> {
        self.inner
            .committed
            .set(snapshot)
            .map_err(|_| KopisError::invalid_state("index is already committed"))
    }

    pub(crate) fn release_writer(&self) {
        self.inner.writer_claimed.store(false, Ordering::Release);
    }
}

impl std::fmt::Debug for Index {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Index")
            .field("config", &self.inner.config)
            .field("analyzer", &self.inner.analyzer.name())
            .field("searchable", &self.is_searchable())
            .finish()
    }
}
