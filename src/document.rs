//! Documents and field policies.

#[allow(clippy::module_inception)]
pub mod document;
pub mod field;
