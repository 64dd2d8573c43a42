//! Index configuration.
//!
//! The configuration is fixed when an [`Index`](crate::lexical::index::index::Index)
//! is created. It can be built in code or loaded from JSON, where missing
//! keys take their defaults:
//!
//! ```
//! use kopis::lexical::config::IndexConfig;
//!
//! let config = IndexConfig::from_json_str(
//!     r#"{ "stored_fields": ["keyword", "title"], "indexed_fields": ["keyword"] }"#,
//! ).unwrap();
//!
//! assert!(!config.all_required);
//! assert!(config.stopwords.is_empty());
//! assert!(config.field_option("title").stored);
//! assert!(!config.field_option("title").indexed);
//! ```

use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::document::field::FieldOption;
use crate::error::Result;

/// Configuration of an index.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IndexConfig {
    /// Words dropped by the default analyzer, at index and query time.
    /// Matched case-insensitively.
    pub stopwords: BTreeSet<String>,

    /// Combine query words with AND instead of OR.
    pub all_required: bool,

    /// Fields whose raw values are kept and returned with results.
    pub stored_fields: BTreeSet<String>,

    /// Fields that are analyzed into the inverted index.
    pub indexed_fields: BTreeSet<String>,

    /// Fields indexed verbatim as one exact term (identifiers, tags, titles
    /// matched as a whole). A field listed here is indexed even when absent
    /// from `indexed_fields`.
    pub keyword_fields: BTreeSet<String>,
}

impl IndexConfig {
    /// Create an empty configuration: no stopwords, OR semantics, no fields.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add stopwords.
    pub fn with_stopwords<I, S>(mut self, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.stopwords.extend(words.into_iter().map(Into::into));
        self
    }

    /// Require every query word to match.
    pub fn with_all_required(mut self, all_required: bool) -> Self {
        self.all_required = all_required;
        self
    }

    /// Mark a field as stored.
    pub fn stored_field<S: Into<String>>(mut self, name: S) -> Self {
        self.stored_fields.insert(name.into());
        self
    }

    /// Mark a field as indexed.
    pub fn indexed_field<S: Into<String>>(mut self, name: S) -> Self {
        self.indexed_fields.insert(name.into());
        self
    }

    /// Mark a field as indexed without tokenization.
    pub fn keyword_field<S: Into<String>>(mut self, name: S) -> Self {
        self.keyword_fields.insert(name.into());
        self
    }

    /// Mark a field as both stored and indexed.
    pub fn stored_indexed_field<S: Into<String>>(self, name: S) -> Self {
        let name = name.into();
        self.stored_field(name.clone()).indexed_field(name)
    }

    /// Get the storage policy of a field.
    ///
    /// A field that is both in `indexed_fields` and `keyword_fields` is
    /// untokenized.
    pub fn field_option(&self, name: &str) -> FieldOption {
        let exact = self.keyword_fields.contains(name);
        FieldOption::new(
            self.stored_fields.contains(name),
            exact || self.indexed_fields.contains(name),
        )
        .with_tokenized(!exact)
    }

    /// Check if a field is indexed, tokenized or not.
    pub fn is_indexed(&self, name: &str) -> bool {
        self.indexed_fields.contains(name) || self.keyword_fields.contains(name)
    }

    /// Stopwords as the analyzer sees them, lowercased.
    pub fn normalized_stopwords(&self) -> BTreeSet<String> {
        self.stopwords.iter().map(|word| word.to_lowercase()).collect()
    }

    /// Parse a configuration from JSON.
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a configuration from a JSON file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }

    /// Serialize this configuration to pretty-printed JSON.
    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
