//! Posting lists.
//!
//! A posting list holds, for one term in one field, every document that
//! contains the term together with the number of occurrences. Lists are
//! sorted by document id. Because the writer hands out ids in increasing
//! order, building a list is a sequence of appends and never needs a sort.

use serde::{Deserialize, Serialize};

/// Identifier of an ingested document.
///
/// Assigned by the writer starting at 0, strictly increasing and gapless
/// within one index.
pub type DocId = u64;

/// A single posting in a posting list.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Posting {
    /// Document ID.
    pub doc_id: DocId,
    /// Term frequency in the document's field.
    pub frequency: u32,
}

impl Posting {
    /// Create a posting with frequency.
    pub fn new(doc_id: DocId, frequency: u32) -> Self {
        Posting { doc_id, frequency }
    }
}

/// The postings of one term in one field, sorted by document id.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PostingList {
    postings: Vec<Posting>,
    total_frequency: u64,
}

impl PostingList {
    /// Create a new empty posting list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append occurrences of the term in `doc_id`.
    ///
    /// `doc_id` must not be smaller than the last document in the list.
    /// Appending to the last document again (a multi-valued field) adds to
    /// its frequency instead of creating a second entry.
    pub fn append(&mut self, doc_id: DocId, frequency: u32) {
        self.total_frequency += u64::from(frequency);

        match self.postings.last_mut() {
            Some(last) if last.doc_id == doc_id => last.frequency += frequency,
            last => {
                debug_assert!(
                    last.is_none_or(|p| p.doc_id < doc_id),
                    "postings must be appended in increasing doc id order"
                );
                self.postings.push(Posting::new(doc_id, frequency));
            }
        }
    }

    /// Get the postings, sorted by document id.
    pub fn postings(&self) -> &[Posting] {
        &self.postings
    }

    /// Number of documents containing the term.
    pub fn doc_frequency(&self) -> u64 {
        self.postings.len() as u64
    }

    /// Total occurrences of the term across all documents.
    pub fn total_frequency(&self) -> u64 {
        self.total_frequency
    }

    /// Look up the posting of a document.
    pub fn get(&self, doc_id: DocId) -> Option<&Posting> {
        self.postings
            .binary_search_by_key(&doc_id, |p| p.doc_id)
            .ok()
            .map(|pos| &self.postings[pos])
    }

    /// Number of postings.
    pub fn len(&self) -> usize {
        self.postings.len()
    }

    /// Check if the list is empty.
    pub fn is_empty(&self) -> bool {
        self.postings.is_empty()
    }

    /// Release spare capacity once the list will no longer grow.
    pub(crate) fn shrink_to_fit(&mut self) {
        self.postings.shrink_to_fit();
    }
}
