//! Index searcher: evaluates queries against a committed snapshot.
//!
//! Every query variant evaluates to a list of [`ScoredDoc`] sorted by
//! document id. Term queries read their posting list; OR and AND merge the
//! lists of their clauses (union and intersection) in one linear pass per
//! clause, adding up the scores of the terms a document matches. The
//! resulting candidates are fed to a [`Collector`].
//!
//! The searcher only reads the immutable snapshot, so it takes no locks and
//! any number of searchers can run at the same time.

use std::cmp::Ordering;
use std::sync::Arc;

use log::debug;

use crate::error::Result;
use crate::lexical::index::index::Snapshot;
use crate::lexical::query::{AndQuery, OrQuery, Query, TermQuery};
use crate::lexical::search::ScoredDoc;
use crate::lexical::search::collector::{Collector, CountCollector, TopDocsCollector};
use crate::lexical::search::scoring::{Similarity, TfIdf};

/// Searches a committed index.
#[derive(Clone, Debug)]
pub struct IndexSearcher {
    snapshot: Arc<Snapshot>,
    similarity: Arc<dyn Similarity>,
}

impl IndexSearcher {
    /// Create a searcher over a snapshot, scoring with [`TfIdf`].
    pub fn new(snapshot: Arc<Snapshot>) -> Self {
        Self::with_similarity(snapshot, Arc::new(TfIdf))
    }

    /// Create a searcher with a custom similarity.
    pub fn with_similarity(snapshot: Arc<Snapshot>, similarity: Arc<dyn Similarity>) -> Self {
        IndexSearcher {
            snapshot,
            similarity,
        }
    }

    /// Get the snapshot this searcher reads.
    pub fn snapshot(&self) -> &Arc<Snapshot> {
        &self.snapshot
    }

    /// Return the `k` best matches, best first (score descending, then
    /// document id ascending).
    ///
    /// Fails with `InvalidArgument` when `k` is 0.
    pub fn search(&self, query: &Query, k: usize) -> Result<Vec<ScoredDoc>> {
        Ok(self.search_with_total(query, k)?.0)
    }

    /// Like [`search`](Self::search), also returning the number of matching
    /// documents, which may exceed `k`. The query is evaluated once.
    pub fn search_with_total(&self, query: &Query, k: usize) -> Result<(Vec<ScoredDoc>, u64)> {
        let mut collector = TopDocsCollector::new(k)?;
        self.search_with_collector(query, &mut collector);

        let total_hits = collector.total_hits();
        debug!(
            "query {} matched {} documents, returning {}",
            query,
            total_hits,
            total_hits.min(k as u64)
        );
        Ok((collector.into_sorted_vec(), total_hits))
    }

    /// Count the documents matching a query.
    pub fn count(&self, query: &Query) -> u64 {
        let mut collector = CountCollector::new();
        self.search_with_collector(query, &mut collector);
        collector.total_hits()
    }

    /// Feed every matching document to a collector.
    pub fn search_with_collector(&self, query: &Query, collector: &mut dyn Collector) {
        for hit in self.evaluate(query) {
            collector.collect(hit);
        }
    }

    /// Evaluate a query into its matches, sorted by document id.
    fn evaluate(&self, query: &Query) -> Vec<ScoredDoc> {
        match query {
            Query::Term(term) => self.evaluate_term(term),
            Query::And(and) => self.evaluate_and(and),
            Query::Or(or) => self.evaluate_or(or),
        }
    }

    fn evaluate_term(&self, query: &TermQuery) -> Vec<ScoredDoc> {
        let inverted = self.snapshot.inverted();
        let Some(list) = inverted.posting_list(&query.field, &query.term) else {
            return Vec::new();
        };

        let doc_frequency = list.doc_frequency();
        let total_documents = inverted.total_documents();
        list.postings()
            .iter()
            .map(|posting| {
                let score =
                    self.similarity
                        .score(posting.frequency, doc_frequency, total_documents);
                ScoredDoc::new(posting.doc_id, score)
            })
            .collect()
    }

    fn evaluate_or(&self, query: &OrQuery) -> Vec<ScoredDoc> {
        query
            .clauses
            .iter()
            .map(|clause| self.evaluate(clause))
            .fold(Vec::new(), |acc, matches| union(&acc, &matches))
    }

    fn evaluate_and(&self, query: &AndQuery) -> Vec<ScoredDoc> {
        let mut clauses = Vec::with_capacity(query.clauses.len());
        for clause in &query.clauses {
            let matches = self.evaluate(clause);
            if matches.is_empty() {
                return Vec::new();
            }
            clauses.push(matches);
        }

        // Intersect the shortest lists first to shrink candidates quickly.
        clauses.sort_by_key(Vec::len);
        let mut clauses = clauses.into_iter();
        let Some(first) = clauses.next() else {
            return Vec::new();
        };
        clauses.fold(first, |acc, matches| intersect(&acc, &matches))
    }
}

/// Merge two id-sorted match lists, adding scores of common documents.
fn union(left: &[ScoredDoc], right: &[ScoredDoc]) -> Vec<ScoredDoc> {
    let mut merged = Vec::with_capacity(left.len() + right.len());
    let (mut i, mut j) = (0, 0);

    while i < left.len() && j < right.len() {
        match left[i].doc_id.cmp(&right[j].doc_id) {
            Ordering::Less => {
                merged.push(left[i]);
                i += 1;
            }
            Ordering::Greater => {
                merged.push(right[j]);
                j += 1;
            }
            Ordering::Equal => {
                merged.push(ScoredDoc::new(left[i].doc_id, left[i].score + right[j].score));
                i += 1;
                j += 1;
            }
        }
    }
    merged.extend_from_slice(&left[i..]);
    merged.extend_from_slice(&right[j..]);
    merged
}

/// Keep documents present in both id-sorted lists, adding their scores.
fn intersect(left: &[ScoredDoc], right: &[ScoredDoc]) -> Vec<ScoredDoc> {
    let mut merged = Vec::with_capacity(left.len().min(right.len()));
    let (mut i, mut j) = (0, 0);

    while i < left.len() && j < right.len() {
        match left[i].doc_id.cmp(&right[j].doc_id) {
            Ordering::Less => i += 1,
            Ordering::Greater => j += 1,
            Ordering::Equal => {
                merged.push(ScoredDoc::new(left[i].doc_id, left[i].score + right[j].score));
                i += 1;
                j += 1;
            }
        }
    }
    merged
}
