//! Error types for the Kopis library.
//!
//! All fallible operations return [`Result`], whose error type is the
//! [`KopisError`] enum. None of these errors are transient: they report
//! usage mistakes (wrong lifecycle phase, bad arguments) or a broken internal
//! invariant, so callers should not retry them.
//!
//! # Examples
//!
//! ```
//! use kopis::error::{KopisError, Result};
//!
//! fn top_k(k: usize) -> Result<usize> {
//!     if k == 0 {
//!         return Err(KopisError::invalid_argument("k must be positive"));
//!     }
//!     Ok(k)
//! }
//!
//! assert!(matches!(top_k(0), Err(KopisError::InvalidArgument(_))));
//! ```

use std::io;

use thiserror::Error;

/// The main error type for Kopis operations.
#[derive(Error, Debug)]
pub enum KopisError {
    /// An operation was attempted in the wrong lifecycle phase
    /// (writing after commit, committing twice, searching before commit).
    #[error("Invalid state: {0}")]
    InvalidState(String),

    /// A caller supplied an argument the engine cannot act on.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// The query string was empty.
    #[error("Empty query")]
    EmptyQuery,

    /// A document store lookup missed.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Analysis-related errors raised by custom analyzers.
    #[error("Analysis error: {0}")]
    Analysis(String),

    /// I/O errors (reading configuration files).
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for operations that may fail with KopisError.
pub type Result<T> = std::result::Result<T, KopisError>;

impl KopisError {
    /// Create a new invalid state error.
    pub fn invalid_state<S: Into<String>>(msg: S) -> Self {
        KopisError::InvalidState(msg.into())
    }

    /// Create a new invalid argument error.
    pub fn invalid_argument<S: Into<String>>(msg: S) -> Self {
        KopisError::InvalidArgument(msg.into())
    }

    /// Create a new not found error.
    pub fn not_found<S: Into<String>>(msg: S) -> Self {
        KopisError::NotFound(msg.into())
    }

    /// Create a new analysis error.
    pub fn analysis<S: Into<String>>(msg: S) -> Self {
        KopisError::Analysis(msg.into())
    }
}
