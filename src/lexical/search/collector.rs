//! Collector implementations for gathering search results.

use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::fmt::Debug;

use crate::error::{KopisError, Result};
use crate::lexical::search::ScoredDoc;

/// Trait for collecting search results.
pub trait Collector: Send + Debug {
    /// Collect a matching document.
    fn collect(&mut self, hit: ScoredDoc);

    /// Get the total number of hits collected.
    fn total_hits(&self) -> u64;
}

/// Heap entry ordered so that the worst-ranked hit is the heap maximum.
#[derive(Debug, Clone, Copy)]
struct Ranked(ScoredDoc);

impl PartialEq for Ranked {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Ranked {}

impl PartialOrd for Ranked {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Ranked {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.rank_cmp(&other.0)
    }
}

/// A collector that keeps the top K documents.
///
/// Holds at most K hits in a binary heap whose root is the worst retained
/// hit. A new hit that ranks better than the root replaces it, so
/// collecting N hits costs O(N log K).
#[derive(Debug)]
pub struct TopDocsCollector {
    max_docs: usize,
    hits: BinaryHeap<Ranked>,
    total_hits: u64,
}

impl TopDocsCollector {
    /// Create a collector keeping at most `max_docs` hits.
    ///
    /// Fails with `InvalidArgument` when `max_docs` is 0.
    pub fn new(max_docs: usize) -> Result<Self> {
        if max_docs == 0 {
            return Err(KopisError::invalid_argument("k must be positive"));
        }
        Ok(TopDocsCollector {
            max_docs,
            hits: BinaryHeap::with_capacity(max_docs),
            total_hits: 0,
        })
    }

    /// Get the maximum number of documents to collect.
    pub fn max_docs(&self) -> usize {
        self.max_docs
    }

    /// The worst hit currently retained, once the collector is full.
    pub fn threshold(&self) -> Option<ScoredDoc> {
        if self.hits.len() < self.max_docs {
            None
        } else {
            self.hits.peek().map(|ranked| ranked.0)
        }
    }

    /// Consume the collector and return the hits, best first.
    pub fn into_sorted_vec(self) -> Vec<ScoredDoc> {
        self.hits
            .into_sorted_vec()
            .into_iter()
            .map(|ranked| ranked.0)
            .collect()
    }
}

impl Collector for TopDocsCollector {
    fn collect(&mut self, hit: ScoredDoc) {
        self.total_hits += 1;

        if self.hits.len() < self.max_docs {
            self.hits.push(Ranked(hit));
        } else if let Some(mut worst) = self.hits.peek_mut() {
            if hit.rank_cmp(&worst.0) == Ordering::Less {
                *worst = Ranked(hit);
            }
        }
    }

    fn total_hits(&self) -> u64 {
        self.total_hits
    }
}

/// A collector that only counts matching documents.
#[derive(Debug, Default)]
pub struct CountCollector {
    count: u64,
}

impl CountCollector {
    /// Create a new count collector.
    pub fn new() -> Self {
        Self::default()
    }
}

impl Collector for CountCollector {
    fn collect(&mut self, _hit: ScoredDoc) {
        self.count += 1;
    }

    fn total_hits(&self) -> u64 {
        self.count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(hits: &[ScoredDoc]) -> Vec<u64> {
        hits.iter().map(|h| h.doc_id).collect()
    }

    #[test]
    fn test_keeps_top_k() {
        let mut collector = TopDocsCollector::new(3).unwrap();
        for (doc_id, score) in [(0, 0.5), (1, 2.0), (2, 1.0), (3, 3.0), (4, 0.1), (5, 1.5)] {
            collector.collect(ScoredDoc::new(doc_id, score));
        }

        assert_eq!(collector.total_hits(), 6);
        assert_eq!(collector.threshold(), Some(ScoredDoc::new(5, 1.5)));
        assert_eq!(ids(&collector.into_sorted_vec()), vec![3, 1, 5]);
    }

    #[test]
    fn test_ties_prefer_lower_doc_id() {
        let mut collector = TopDocsCollector::new(2).unwrap();
        for doc_id in [4, 2, 9, 1] {
            collector.collect(ScoredDoc::new(doc_id, 1.0));
        }

        assert_eq!(ids(&collector.into_sorted_vec()), vec![1, 2]);
    }

    #[test]
    fn test_fewer_hits_than_k() {
        let mut collector = TopDocsCollector::new(10).unwrap();
        collector.collect(ScoredDoc::new(7, 0.3));

        assert_eq!(collector.threshold(), None);
        assert_eq!(ids(&collector.into_sorted_vec()), vec![7]);
    }

    #[test]
    fn test_zero_k_is_rejected() {
        assert!(matches!(
            TopDocsCollector::new(0),
            Err(KopisError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_count_collector() {
        let mut collector = CountCollector::new();
        collector.collect(ScoredDoc::new(0, 1.0));
        collector.collect(ScoredDoc::new(1, 0.0));
        assert_eq!(collector.total_hits(), 2);
    }
}
