//! Format-agnostic RDF dataset intermediate representation
//!
//! This crate provides canonical types for representing RDF statements that
//! can be produced by parsers and consumed by graph builders, regardless of
//! the serialization format (Turtle, TriG, N-Triples, N-Quads, JSON-LD).
//!
//! # Key Design Principles
//!
//! 1. **Expanded IRIs only** - All IRIs are stored in expanded form.
//!    Compaction is handled by presentation layers at output time.
//!
//! 2. **Explicit datatypes** - Literals always have an explicit datatype,
//!    never optional. Plain strings use `xsd:string`, language-tagged strings
//!    use `rdf:langString`.
//!
//! 3. **Bag semantics by default** - The `Dataset` type uses
//!    `Vec<Statement>` to preserve duplicates. Call `dedupe()` explicitly for
//!    set semantics.
//!
//! 4. **Deterministic output** - Call `sort()` before formatting for
//!    deterministic statement ordering (SPOG lexicographic), or
//!    `canonicalize()` for a stable form with renumbered blank nodes.
//!
//! # Example
//!
//! ```
//! use weft_graph_ir::{Dataset, Term, Statement, Datatype};
//!
//! let mut dataset = Dataset::new();
//!
//! // Add a statement with expanded IRIs
//! dataset.add_triple(
//!     Term::iri("http://example.org/alice"),
//!     Term::iri("http://xmlns.com/foaf/0.1/name"),
//!     Term::string("Alice"),
//! );
//!
//! // Sort for deterministic output
//! dataset.sort();
//! ```

pub mod datatype;
mod dataset;
mod sink;
mod statement;
mod term;

pub use dataset::Dataset;
pub use datatype::Datatype;
pub use sink::{DatasetCollector, StatementSink, TermId};
pub use statement::Statement;
pub use term::{escape_literal, BlankId, LiteralValue, Term};
