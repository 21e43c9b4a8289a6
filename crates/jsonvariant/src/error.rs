//! Error types for building documents from JSON text and rendering them back.
//!
//! The accessor layer itself has no error path: unbound access and kind
//! mismatches degrade to default values.

use thiserror::Error;

/// Errors that can occur while building a document.
#[derive(Error, Debug)]
pub enum DocumentError {
    /// The input string was not valid JSON.
    #[error("JSON parse error: {0}")]
    JsonParse(#[from] serde_json::Error),

    /// The input nests arrays/objects deeper than the configured limit.
    #[error("nesting limit of {limit} exceeded")]
    NestingLimitExceeded { limit: usize },

    /// The value could not be rendered, e.g. it nests too deeply.
    #[error("JSON serialization error: {0}")]
    Serialize(serde_json::Error),
}

/// Convenience alias used throughout jsonvariant.
pub type Result<T> = std::result::Result<T, DocumentError>;
