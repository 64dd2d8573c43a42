//! Suffix-stripping stemmer.

use crate::analysis::token_filter::stem::Stemmer;

const DEFAULT_SUFFIXES: &[&str] = &[
    "ing", "ed", "er", "est", "ly", "s", "es", "ies", "ied", "tion", "sion", "able", "ible",
    "ment", "ness", "ful",
];

/// Stems at least 3 characters must remain after stripping.
const MIN_STEM_LEN: usize = 3;

/// Stemmer that strips the longest matching suffix from a fixed list.
#[derive(Debug, Clone)]
pub struct SimpleStemmer {
    /// Sorted longest first.
    suffixes: Vec<String>,
}

impl SimpleStemmer {
    /// Create a stemmer with the default English suffix list.
    pub fn new() -> Self {
        Self::with_suffixes(DEFAULT_SUFFIXES.iter().map(|s| s.to_string()).collect())
    }

    /// Create a stemmer with custom suffixes.
    pub fn with_suffixes(mut suffixes: Vec<String>) -> Self {
        suffixes.sort_by_key(|s| std::cmp::Reverse(s.len()));
        SimpleStemmer { suffixes }
    }
}

impl Default for SimpleStemmer {
    fn default() -> Self {
        Self::new()
    }
}

impl Stemmer for SimpleStemmer {
    fn stem(&self, word: &str) -> String {
        self.suffixes
            .iter()
            .find(|suffix| {
                word.len() >= suffix.len() + MIN_STEM_LEN && word.ends_with(suffix.as_str())
            })
            .map(|suffix| word[..word.len() - suffix.len()].to_owned())
            .unwrap_or_else(|| word.to_owned())
    }

    fn name(&self) -> &'static str {
        "simple"
    }
}
