//! Turtle-family parser for Weft.
//!
//! This crate parses the whole Turtle grammar family with one parser:
//! Turtle, TriG, N-Triples and N-Quads. Parsed statements are emitted to a
//! `weft_graph_ir::StatementSink`, so the same parser feeds any downstream
//! consumer.
//!
//! # Example
//!
//! ```
//! use weft_graph_turtle::{parse, parse_to_dataset};
//! use weft_graph_ir::DatasetCollector;
//!
//! let turtle = r#"
//!     @prefix ex: <http://example.org/> .
//!     ex:alice ex:name "Alice" ;
//!              ex:age 30 .
//! "#;
//!
//! // Option 1: Parse to a StatementSink
//! let mut sink = DatasetCollector::new();
//! parse(turtle, &mut sink).unwrap();
//! assert_eq!(sink.finish().len(), 2);
//!
//! // Option 2: Parse directly to a Dataset
//! let dataset = parse_to_dataset(turtle).unwrap();
//! assert_eq!(dataset.len(), 2);
//! ```

pub mod error;
pub mod lex;
pub mod parser;

pub use error::{Result, TurtleError};
pub use lex::{tokenize, Lexer, Token, TokenKind};
pub use parser::parse;

use weft_graph_ir::{Dataset, DatasetCollector};

/// Parse a Turtle-family document directly to a Dataset.
///
/// Convenience wrapper that runs the parser with a `DatasetCollector` sink
/// and returns the collected statements.
pub fn parse_to_dataset(input: &str) -> Result<Dataset> {
    let mut sink = DatasetCollector::new();
    parse(input, &mut sink)?;
    Ok(sink.finish())
}
