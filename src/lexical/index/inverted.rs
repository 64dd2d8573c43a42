//! In-memory inverted index.
//!
//! Maps `(field, term)` to a [`PostingList`] and keeps the corpus size used
//! for scoring. Documents must be fed in increasing id order; the
//! [`IndexWriter`](super::writer::IndexWriter) guarantees this.

use ahash::AHashMap;

use crate::lexical::index::posting::{DocId, Posting, PostingList};

/// The term dictionary of one field.
#[derive(Clone, Debug, Default)]
struct FieldPostings {
    terms: AHashMap<String, PostingList>,
}

/// Inverted index over all indexed fields.
#[derive(Clone, Debug, Default)]
pub struct InvertedIndex {
    fields: AHashMap<String, FieldPostings>,
    total_documents: u64,
    last_doc: Option<DocId>,
}

impl InvertedIndex {
    /// Create an empty inverted index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Count a document towards the corpus size.
    ///
    /// Called by the writer for every ingested document, so documents
    /// without any indexed term are still part of the corpus. Registering
    /// the most recent document again has no effect.
    pub fn register_document(&mut self, doc_id: DocId) {
        if self.last_doc == Some(doc_id) {
            return;
        }
        debug_assert!(
            self.last_doc.is_none_or(|last| last < doc_id),
            "documents must be registered in increasing id order"
        );
        self.last_doc = Some(doc_id);
        self.total_documents += 1;
    }

    /// Index the analyzed terms of one field value of a document.
    ///
    /// Every distinct term gets one posting for `doc_id` whose frequency is
    /// the number of times the term occurs in `terms`. Calling this again
    /// for the same document and field adds to the existing postings.
    pub fn index_field<I, S>(&mut self, doc_id: DocId, field: &str, terms: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.register_document(doc_id);

        let mut frequencies: AHashMap<String, u32> = AHashMap::new();
        for term in terms {
            let term = term.as_ref();
            match frequencies.get_mut(term) {
                Some(count) => *count += 1,
                None => {
                    frequencies.insert(term.to_owned(), 1);
                }
            }
        }

        if frequencies.is_empty() {
            return;
        }

        let field_postings = self.fields.entry(field.to_owned()).or_default();
        for (term, frequency) in frequencies {
            field_postings
                .terms
                .entry(term)
                .or_default()
                .append(doc_id, frequency);
        }
    }

    /// Get the postings of a term in a field, sorted by document id.
    ///
    /// Returns an empty slice if the term never occurs in the field.
    pub fn postings(&self, field: &str, term: &str) -> &[Posting] {
        self.posting_list(field, term)
            .map(PostingList::postings)
            .unwrap_or(&[])
    }

    /// Get the full posting list of a term in a field.
    pub fn posting_list(&self, field: &str, term: &str) -> Option<&PostingList> {
        self.fields.get(field)?.terms.get(term)
    }

    /// Number of documents whose field contains the term (0 if absent).
    pub fn document_frequency(&self, field: &str, term: &str) -> u64 {
        self.posting_list(field, term)
            .map(PostingList::doc_frequency)
            .unwrap_or(0)
    }

    /// Number of distinct documents ever indexed.
    pub fn total_documents(&self) -> u64 {
        self.total_documents
    }

    /// Check if any term was indexed in a field.
    pub fn has_field(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    /// Names of fields with at least one indexed term, sorted.
    pub fn field_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.fields.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Number of distinct terms in a field.
    pub fn term_count(&self, field: &str) -> usize {
        self.fields.get(field).map_or(0, |f| f.terms.len())
    }

    /// Distinct terms of a field, sorted.
    pub fn terms(&self, field: &str) -> Vec<&str> {
        let mut terms: Vec<&str> = self
            .fields
            .get(field)
            .map(|f| f.terms.keys().map(String::as_str).collect())
            .unwrap_or_default();
        terms.sort_unstable();
        terms
    }

    /// Total number of postings across all fields and terms.
    pub fn posting_count(&self) -> usize {
        self.fields
            .values()
            .flat_map(|f| f.terms.values())
            .map(PostingList::len)
            .sum()
    }

    /// Release spare capacity once no more documents will be added.
    pub(crate) fn shrink_to_fit(&mut self) {
        for field in self.fields.values_mut() {
            field.terms.shrink_to_fit();
            for list in field.terms.values_mut() {
                list.shrink_to_fit();
            }
        }
        self.fields.shrink_to_fit();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_field_counts_frequencies() {
        let mut index = InvertedIndex::new();
        index.index_field(0, "title", ["to", "see", "if", "to"]);

        assert_eq!(index.postings("title", "to"), &[Posting::new(0, 2)]);
        assert_eq!(index.postings("title", "see"), &[Posting::new(0, 1)]);
        assert_eq!(index.document_frequency("title", "to"), 1);
        assert_eq!(index.total_documents(), 1);
    }

    #[test]
    fn test_postings_sorted_by_doc_id() {
        let mut index = InvertedIndex::new();
        index.index_field(0, "keyword", ["heavy"]);
        index.index_field(1, "keyword", ["light"]);
        index.index_field(2, "keyword", ["heavy", "heavy"]);

        let postings = index.postings("keyword", "heavy");
        assert_eq!(postings, &[Posting::new(0, 1), Posting::new(2, 2)]);
        assert_eq!(index.document_frequency("keyword", "heavy"), 2);
        assert_eq!(index.total_documents(), 3);
    }

    #[test]
    fn test_absent_term_and_field() {
        let mut index = InvertedIndex::new();
        index.index_field(0, "keyword", ["clothes"]);

        assert!(index.postings("keyword", "shoes").is_empty());
        assert!(index.postings("title", "clothes").is_empty());
        assert_eq!(index.document_frequency("title", "clothes"), 0);
        assert!(!index.has_field("title"));
    }

    #[test]
    fn test_fields_are_independent() {
        let mut index = InvertedIndex::new();
        index.index_field(0, "keyword", ["map"]);
        index.index_field(0, "title", ["map", "out"]);

        assert_eq!(index.field_names(), vec!["keyword", "title"]);
        assert_eq!(index.terms("title"), vec!["map", "out"]);
        assert_eq!(index.term_count("keyword"), 1);
        assert_eq!(index.posting_count(), 3);
        assert_eq!(index.total_documents(), 1);
    }

    #[test]
    fn test_multi_valued_field_merges_into_one_posting() {
        let mut index = InvertedIndex::new();
        index.index_field(4, "tag", ["red"]);
        index.index_field(4, "tag", ["red", "blue"]);

        assert_eq!(index.postings("tag", "red"), &[Posting::new(4, 2)]);
        assert_eq!(index.document_frequency("tag", "red"), 1);
    }

    #[test]
    fn test_registered_documents_without_terms_count() {
        let mut index = InvertedIndex::new();
        index.register_document(0);
        index.index_field(1, "keyword", Vec::<String>::new());
        index.register_document(1);

        assert_eq!(index.total_documents(), 2);
        assert!(!index.has_field("keyword"));
    }
}
