//! Query evaluation, scoring, top-K selection and result materialization.

pub mod collector;
pub mod materializer;
pub mod scoring;
pub mod searcher;

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::document::document::Document;
use crate::lexical::index::posting::DocId;

/// A matching document and its relevance score.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScoredDoc {
    /// The document ID.
    pub doc_id: DocId,
    /// The relevance score.
    pub score: f32,
}

impl ScoredDoc {
    /// Create a new scored document.
    pub fn new(doc_id: DocId, score: f32) -> Self {
        ScoredDoc { doc_id, score }
    }

    /// Result order: higher score first, then lower document id.
    ///
    /// `Ordering::Less` means `self` ranks before `other`.
    pub fn rank_cmp(&self, other: &Self) -> Ordering {
        other
            .score
            .total_cmp(&self.score)
            .then_with(|| self.doc_id.cmp(&other.doc_id))
    }
}

/// A search hit joined with the stored fields of its document.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SearchHit {
    /// The document ID.
    pub doc_id: DocId,
    /// The relevance score.
    pub score: f32,
    /// The stored fields of the document.
    pub fields: Document,
}

/// Search results.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SearchResults {
    /// The top hits, best first.
    pub hits: Vec<SearchHit>,
    /// Total number of matching documents, which may exceed `hits.len()`.
    pub total_hits: u64,
    /// Maximum score in the results (0 when there are none).
    pub max_score: f32,
}

impl SearchResults {
    /// Build results from ranked hits.
    pub fn new(hits: Vec<SearchHit>, total_hits: u64) -> Self {
        let max_score = hits.first().map_or(0.0, |hit| hit.score);
        SearchResults {
            hits,
            total_hits,
            max_score,
        }
    }

    /// Check if nothing matched.
    pub fn is_empty(&self) -> bool {
        self.hits.is_empty()
    }
}
