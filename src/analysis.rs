//! Text analysis module for Kopis.
//!
//! Turns raw field values into normalized terms: a tokenizer splits the
//! text, then token filters (lowercase, stop words, optional stemming)
//! rewrite the stream.

pub mod analyzer;
pub mod token;
pub mod token_filter;
pub mod tokenizer;
