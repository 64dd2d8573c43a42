//! Joins ranked hits with their stored fields.

use log::error;

use crate::error::Result;
use crate::lexical::index::store::DocumentStore;
use crate::lexical::search::{ScoredDoc, SearchHit};

/// Turns [`ScoredDoc`]s into [`SearchHit`]s carrying stored fields.
#[derive(Clone, Copy, Debug)]
pub struct ResultMaterializer<'a> {
    store: &'a DocumentStore,
}

impl<'a> ResultMaterializer<'a> {
    /// Create a materializer reading from a document store.
    pub fn new(store: &'a DocumentStore) -> Self {
        ResultMaterializer { store }
    }

    /// Attach stored fields to each hit, preserving order.
    ///
    /// A hit whose document is missing from the store means the index is
    /// corrupt; this fails with `NotFound`.
    pub fn materialize(&self, scored: &[ScoredDoc]) -> Result<Vec<SearchHit>> {
        scored
            .iter()
            .map(|hit| {
                let fields = self.store.get(hit.doc_id).inspect_err(|e| {
                    error!("hit {} has no stored document: {e}", hit.doc_id);
                })?;
                Ok(SearchHit {
                    doc_id: hit.doc_id,
                    score: hit.score,
                    fields: fields.clone(),
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::document::Document;
    use crate::error::KopisError;

    fn store() -> DocumentStore {
        let mut store = DocumentStore::new();
        store.put(0, Document::builder().add_text("title", "Clothes").build());
        store.put(1, Document::builder().add_text("title", "Map").build());
        store
    }

    #[test]
    fn test_preserves_order_and_scores() {
        let store = store();
        let hits = ResultMaterializer::new(&store)
            .materialize(&[ScoredDoc::new(1, 2.0), ScoredDoc::new(0, 1.0)])
            .unwrap();

        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].doc_id, 1);
        assert_eq!(hits[0].score, 2.0);
        assert_eq!(hits[0].fields.get("title"), Some("Map"));
        assert_eq!(hits[1].fields.get("title"), Some("Clothes"));
    }

    #[test]
    fn test_empty_input() {
        let store = store();
        assert!(ResultMaterializer::new(&store).materialize(&[]).unwrap().is_empty());
    }

    #[test]
    fn test_missing_document() {
        let store = store();
        let result = ResultMaterializer::new(&store).materialize(&[ScoredDoc::new(9, 1.0)]);
        assert!(matches!(result, Err(KopisError::NotFound(_))));
    }
}
