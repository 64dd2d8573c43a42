//! Lexical search over an in-memory inverted index.
//!
//! - [`config`]: which fields are stored and indexed, stopwords, default operator.
//! - [`index`]: the index lifecycle, the inverted index and the document store.
//! - [`query`]: query trees and the query string parser.
//! - [`search`]: query evaluation, TF-IDF scoring, top-K collection.

pub mod config;
pub mod index;
pub mod query;
pub mod search;

pub use index::posting::DocId;
