//! Analyzer implementations that combine tokenizers and filters.
//!
//! - [`analyzer::Analyzer`] - The trait every analyzer implements
//! - [`pipeline::PipelineAnalyzer`] - A tokenizer followed by a filter chain
//! - [`standard::StandardAnalyzer`] - Regex tokenizer, lowercase, stop words

#[allow(clippy::module_inception)]
pub mod analyzer;
pub mod pipeline;
pub mod standard;
