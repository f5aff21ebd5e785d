//! Error types for JSON-LD processing

use serde_json::Value as JsonValue;
use thiserror::Error;

/// Error type for JSON-LD operations
#[derive(Error, Debug, Clone)]
pub enum JsonLdError {
    /// Input text is not well-formed JSON
    #[error("Invalid JSON: {message}")]
    InvalidJson { message: String },

    /// @context value is malformed
    #[error("Invalid @context: {message}")]
    InvalidContext { message: String },

    /// Term definitions reference each other in a cycle
    #[error("Circular IRI mapping for term '{term}'")]
    CircularIriMapping { term: String },

    /// A value object combines @type with @language
    #[error("@language cannot be combined with @type on the same value")]
    LanguageWithType,

    /// Arrays directly inside arrays have no JSON-LD meaning
    #[error("Nested array at {path:?}")]
    NestedArray { path: Vec<JsonValue> },

    /// Expanded document violates the expanded-form shape
    #[error("Invalid expanded document: {message}")]
    InvalidDocument { message: String },
}

/// Result type for JSON-LD operations
pub type Result<T> = std::result::Result<T, JsonLdError>;
