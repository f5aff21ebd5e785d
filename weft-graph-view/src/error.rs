//! Pipeline error boundary
//!
//! Every parser error is converted to one of these user-facing states
//! before it reaches the rendering layer. An empty result is not an error;
//! the viewer shows [`NO_GRAPH_DATA`] for a well-formed file with zero
//! statements.

use thiserror::Error;

/// User-facing copy for a well-formed file containing no statements
pub const NO_GRAPH_DATA: &str = "No graph data found";

/// Errors surfaced by the graph-loading pipeline
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ViewError {
    /// File extension and content match no known graph format. Not retried.
    #[error("Unsupported graph format: {extension}")]
    UnsupportedFormat { extension: String },

    /// A grammar violation aborted the parse. No partial graph is kept;
    /// the position is included when the grammar provides one.
    #[error("Failed to parse graph: {message}")]
    Syntax { message: String },
}

pub type Result<T> = std::result::Result<T, ViewError>;

impl From<weft_graph_turtle::TurtleError> for ViewError {
    fn from(err: weft_graph_turtle::TurtleError) -> Self {
        ViewError::Syntax {
            message: err.to_string(),
        }
    }
}

impl From<weft_graph_json_ld::JsonLdError> for ViewError {
    fn from(err: weft_graph_json_ld::JsonLdError) -> Self {
        ViewError::Syntax {
            message: err.to_string(),
        }
    }
}
