//! # Kopis
//!
//! A small in-memory full-text search library.
//!
//! Documents are built once and then searched: an [`IndexWriter`] ingests
//! documents, analyzes their indexed fields into an inverted index and keeps
//! their stored fields, then `commit` seals the index. Queries are parsed
//! with the same analyzer, scored with TF-IDF and returned as the top `k`
//! hits joined with their stored fields.
//!
//! ## Features
//!
//! - Configurable analysis pipeline (tokenizer + filters)
//! - Per-field store / index policies
//! - OR / AND query parsing with explicit operators
//! - Bounded top-K ranking with deterministic tie-breaking
//! - Parallel batch ingestion
//!
//! ```
//! use kopis::prelude::*;
//!
//! let config = IndexConfig::new().stored_indexed_field("keyword");
//! let index = Index::new(config).unwrap();
//!
//! let writer = index.writer().unwrap();
//! writer
//!     .add_document(Document::builder().add_text("keyword", "Map out").build())
//!     .unwrap();
//! writer.commit().unwrap();
//!
//! let results = index.search("map", "keyword", 5).unwrap();
//! assert_eq!(results.total_hits, 1);
//! ```
//!
//! [`IndexWriter`]: lexical::index::writer::IndexWriter

pub mod analysis;
pub mod document;
pub mod error;
pub mod lexical;

pub mod prelude {
    pub use crate::analysis::analyzer::analyzer::Analyzer;
    pub use crate::analysis::analyzer::pipeline::PipelineAnalyzer;
    pub use crate::analysis::analyzer::standard::StandardAnalyzer;
    pub use crate::document::document::{Document, Field};
    pub use crate::error::{KopisError, Result};
    pub use crate::lexical::DocId;
    pub use crate::lexical::config::IndexConfig;
    pub use crate::lexical::index::index::Index;
    pub use crate::lexical::index::writer::IndexWriter;
    pub use crate::lexical::query::Query;
    pub use crate::lexical::search::searcher::IndexSearcher;
    pub use crate::lexical::search::{SearchHit, SearchResults};
}

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
