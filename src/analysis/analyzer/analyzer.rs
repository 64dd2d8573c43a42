//! Core analyzer trait definition.
//!
//! An [`Analyzer`] turns a field value into the sequence of terms that gets
//! indexed. The same analyzer must be used at query time, otherwise query
//! words normalized differently from indexed words can never match.
//!
//! ```text
//! Raw Text → Tokenizer → Filter 1 → ... → Filter N → Terms
//! ```
//!
//! # Examples
//!
//! ```
//! use kopis::analysis::analyzer::analyzer::Analyzer;
//! use kopis::analysis::analyzer::standard::StandardAnalyzer;
//!
//! let analyzer = StandardAnalyzer::new().unwrap();
//! let terms = analyzer.terms("Use small boxes for heavy items.").unwrap();
//!
//! assert_eq!(terms, vec!["use", "small", "boxes", "for", "heavy", "items"]);
//! ```

use crate::analysis::token::TokenStream;
use crate::error::Result;

/// Trait for analyzers that convert text into processed tokens.
///
/// Implementations must be deterministic: analyzing the same text twice
/// yields the same token sequence.
pub trait Analyzer: Send + Sync {
    /// Analyze the given text and return a lazy stream of tokens.
    ///
    /// Empty input yields an empty stream.
    fn analyze(&self, text: &str) -> Result<TokenStream>;

    /// Get the name of this analyzer (for debugging and configuration).
    fn name(&self) -> &'static str;

    /// Analyze the given text and collect the resulting term texts.
    fn terms(&self, text: &str) -> Result<Vec<String>> {
        Ok(self.analyze(text)?.map(|token| token.text).collect())
    }
}
