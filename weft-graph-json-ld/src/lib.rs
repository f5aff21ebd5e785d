//! JSON-LD processing for Weft.
//!
//! Expansion, @context handling, RFC 8785 canonical JSON, and a statement
//! adapter that turns expanded documents into the same event stream the
//! Turtle-family parser produces. The usual entry point is
//! [`to_canonical_nquads`], which expands a document and serializes it as
//! sorted, blank-relabeled N-Quads.
//!
//! # Example
//!
//! ```
//! let doc = r#"{
//!     "@context": {"name": "http://example.org/name"},
//!     "@id": "http://example.org/alice",
//!     "name": "Alice"
//! }"#;
//!
//! let nquads = weft_graph_json_ld::to_canonical_nquads(doc).unwrap();
//! assert_eq!(
//!     nquads,
//!     "<http://example.org/alice> <http://example.org/name> \"Alice\" .\n"
//! );
//! ```

pub mod adapter;
pub mod context;
pub mod error;
pub mod expand;
pub mod iri;
pub mod normalize;

pub use context::{Container, ContextEntry, ParsedContext, TypeValue};
pub use error::{JsonLdError, Result};

use serde_json::Value as JsonValue;
use weft_graph_ir::{Dataset, DatasetCollector};

/// Parse a `@context` value into a reusable [`ParsedContext`]
pub fn parse_context(context: &JsonValue) -> Result<ParsedContext> {
    ParsedContext::parse(None, context)
}

/// Expand a term, compact IRI, or relative IRI against a parsed context
pub fn expand_iri(value: &str, context: &ParsedContext, vocab: bool) -> String {
    expand::iri(value, context, vocab)
}

/// Expand a JSON-LD document to expanded form
pub fn expand(document: &JsonValue) -> Result<JsonValue> {
    expand::node(document)
}

/// Serialize a JSON value in RFC 8785 canonical form
pub fn canonical_json(value: &JsonValue) -> String {
    normalize::normalize(value)
}

/// Structural sniff: does this parsed JSON look like JSON-LD?
///
/// Looks for `@context`, `@graph`, or `@id` at the top level (or on any
/// element of a top-level array). Plain JSON without those markers is not
/// worth feeding to the expander.
pub fn is_json_ld(value: &JsonValue) -> bool {
    match value {
        JsonValue::Object(map) => {
            map.contains_key("@context") || map.contains_key("@graph") || map.contains_key("@id")
        }
        JsonValue::Array(items) => items.iter().any(is_json_ld),
        _ => false,
    }
}

/// Parse a JSON-LD document into a canonicalized [`Dataset`].
///
/// The document is expanded, adapted to statements, and then canonicalized:
/// statements sorted, duplicates dropped, and blank nodes relabeled in
/// first-use order.
pub fn to_dataset(input: &str) -> Result<Dataset> {
    let document: JsonValue =
        serde_json::from_str(input).map_err(|e| JsonLdError::InvalidJson {
            message: e.to_string(),
        })?;
    let expanded = expand::node(&document)?;

    let mut sink = DatasetCollector::new();
    adapter::to_statements(&expanded, &mut sink)?;

    let mut dataset = sink.finish();
    dataset.canonicalize();
    Ok(dataset)
}

/// Parse a JSON-LD document and serialize it as canonical N-Quads
pub fn to_canonical_nquads(input: &str) -> Result<String> {
    Ok(to_dataset(input)?.to_nquads())
}
