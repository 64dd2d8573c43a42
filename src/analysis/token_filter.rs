//! Token filter implementations for token transformation.
//!
//! Filters receive the token stream produced by a tokenizer (or by the
//! previous filter) and return a new stream. They are composed in order by
//! [`PipelineAnalyzer`](crate::analysis::analyzer::pipeline::PipelineAnalyzer):
//!
//! ```text
//! Tokenizer → Lowercase → Stop Words → (Stemmer) → Index
//! ```
//!
//! # Available Filters
//!
//! - [`lowercase::LowercaseFilter`] - Converts tokens to lowercase
//! - [`stop::StopFilter`] - Removes stop words
//! - [`stem::StemFilter`] - Reduces words to their stem form
//!
//! # Examples
//!
//! ```
//! use kopis::analysis::token::Token;
//! use kopis::analysis::token_filter::Filter;
//! use kopis::analysis::token_filter::lowercase::LowercaseFilter;
//!
//! let filter = LowercaseFilter::new();
//! let tokens = vec![Token::new("Hello", 0), Token::new("WORLD", 1)];
//! let filtered: Vec<_> = filter.filter(Box::new(tokens.into_iter()))
//!     .unwrap()
//!     .collect();
//!
//! assert_eq!(filtered[0].text, "hello");
//! assert_eq!(filtered[1].text, "world");
//! ```

use crate::analysis::token::TokenStream;
use crate::error::Result;

/// Trait for filters that transform token streams.
///
/// Implementations should stay lazy: wrap the incoming iterator rather than
/// collecting it, so long field values are never materialized twice.
pub trait Filter: Send + Sync {
    /// Apply this filter to a token stream.
    fn filter(&self, tokens: TokenStream) -> Result<TokenStream>;

    /// Get the name of this filter (for debugging and configuration).
    fn name(&self) -> &'static str;
}

pub mod lowercase;
pub mod stem;
pub mod stop;
