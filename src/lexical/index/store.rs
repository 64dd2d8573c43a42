//! Document store holding the stored fields of each document.

use crate::document::document::Document;
use crate::error::{KopisError, Result};
use crate::lexical::index::posting::DocId;

/// Append-only store of stored fields, keyed by document id.
///
/// Ids are dense, so the store is a vector indexed by id. Documents with
/// no stored field still occupy a (empty) slot.
#[derive(Clone, Debug, Default)]
pub struct DocumentStore {
    documents: Vec<Document>,
}

impl DocumentStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store the fields of a document.
    ///
    /// Ids must be put in order starting at 0, which the writer guarantees.
    pub fn put(&mut self, doc_id: DocId, fields: Document) {
        debug_assert_eq!(
            doc_id,
            self.documents.len() as DocId,
            "documents must be stored in id order without gaps"
        );
        self.documents.push(fields);
    }

    /// Get the stored fields of a document.
    pub fn get(&self, doc_id: DocId) -> Result<&Document> {
        usize::try_from(doc_id)
            .ok()
            .and_then(|idx| self.documents.get(idx))
            .ok_or_else(|| KopisError::not_found(format!("document {doc_id}")))
    }

    /// Number of documents in the store.
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    /// Check if the store is empty.
    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    pub(crate) fn shrink_to_fit(&mut self) {
        self.documents.shrink_to_fit();
    }
}
