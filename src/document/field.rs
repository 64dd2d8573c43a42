//! Field storage policy.

use serde::{Deserialize, Serialize};

/// How a field is handled at ingestion.
///
/// A field may be both stored and indexed. A field that is neither is
/// dropped by the writer. An indexed field is either tokenized (run through
/// the analyzer) or indexed verbatim as a single exact term.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldOption {
    /// Keep the raw value so it can be returned with search results.
    pub stored: bool,
    /// Put the value into the inverted index so it can be searched.
    pub indexed: bool,
    /// Analyze the value into terms; when false the whole value is one term.
    pub tokenized: bool,
}

impl FieldOption {
    /// Stored, indexed and tokenized.
    pub const STORED_INDEXED: FieldOption = FieldOption {
        stored: true,
        indexed: true,
        tokenized: true,
    };

    /// Create a field option. Indexed values are tokenized.
    pub fn new(stored: bool, indexed: bool) -> Self {
        FieldOption {
            stored,
            indexed,
            tokenized: true,
        }
    }

    /// Set whether indexed values are tokenized.
    pub fn with_tokenized(mut self, tokenized: bool) -> Self {
        self.tokenized = tokenized;
        self
    }

    /// Whether the writer should do anything with this field.
    pub fn is_ignored(&self) -> bool {
        !self.stored && !self.indexed
    }

    /// Whether the field is indexed as one exact, untokenized term.
    pub fn is_exact(&self) -> bool {
        self.indexed && !self.tokenized
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_option() {
        assert!(FieldOption::default().is_ignored());
        assert!(!FieldOption::new(true, false).is_ignored());
        assert!(FieldOption::STORED_INDEXED.stored && FieldOption::STORED_INDEXED.indexed);
        assert!(!FieldOption::STORED_INDEXED.is_exact());
    }

    #[test]
    fn test_untokenized() {
        let option = FieldOption::new(false, true).with_tokenized(false);
        assert!(option.is_exact());
        assert!(!option.is_ignored());

        // Only indexed values can be exact.
        assert!(!FieldOption::new(true, false).with_tokenized(false).is_exact());
    }
}
