//! Index structures and the write-once index lifecycle.

#[allow(clippy::module_inception)]
pub mod index;
pub mod inverted;
pub mod posting;
pub mod store;
pub mod writer;
