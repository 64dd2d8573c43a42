//! Relevance scoring.
//!
//! The searcher scores a document as the sum, over the query terms it
//! matches, of the per-term weight given by a [`Similarity`]. The default
//! [`TfIdf`] weight is
//!
//! ```text
//! tf(doc, term) * ln(1 + N / df(field, term))
//! ```
//!
//! where `N` is the number of documents in the index. Terms are only scored
//! for documents in their posting list, so `df >= 1` whenever a weight is
//! computed.

use std::fmt::Debug;

/// Per-term relevance weight.
pub trait Similarity: Send + Sync + Debug {
    /// Weight of a term that occurs `term_frequency` times in a document,
    /// given the term's document frequency and the corpus size.
    fn score(&self, term_frequency: u32, doc_frequency: u64, total_documents: u64) -> f32;
}

/// Classic TF-IDF with a smoothed logarithmic IDF.
#[derive(Clone, Copy, Debug, Default)]
pub struct TfIdf;

impl TfIdf {
    /// Inverse document frequency: `ln(1 + N / df)`.
    pub fn idf(doc_frequency: u64, total_documents: u64) -> f32 {
        let ratio = total_documents as f64 / doc_frequency.max(1) as f64;
        ratio.ln_1p() as f32
    }
}

impl Similarity for TfIdf {
    fn score(&self, term_frequency: u32, doc_frequency: u64, total_documents: u64) -> f32 {
        term_frequency as f32 * Self::idf(doc_frequency, total_documents)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_idf() {
        assert!((TfIdf::idf(1, 4) - 5.0f32.ln()).abs() < 1e-6);
        assert!((TfIdf::idf(4, 4) - 2.0f32.ln()).abs() < 1e-6);
    }

    #[test]
    fn test_rarer_terms_weigh_more() {
        let tf_idf = TfIdf;
        assert!(tf_idf.score(1, 1, 100) > tf_idf.score(1, 10, 100));
    }

    #[test]
    fn test_score_scales_with_tf() {
        let tf_idf = TfIdf;
        let one = tf_idf.score(1, 2, 10);
        assert!((tf_idf.score(3, 2, 10) - 3.0 * one).abs() < 1e-5);
        assert!(one > 0.0);
    }
}
