//! RDF statement: a triple with an optional named-graph label
//!
//! Quad serializations (N-Quads, TriG) attach a fourth graph term to each
//! statement; triple serializations leave it `None` (the default graph).

use crate::Term;
use serde::{Deserialize, Serialize};

/// A single RDF statement
///
/// # Invariants
///
/// - `p` is always `Term::Iri` (grammar-enforced by the parsers).
/// - `g`, when present, is `Term::Iri` or `Term::BlankNode`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Statement {
    /// Subject (IRI or blank node)
    pub s: Term,
    /// Predicate (IRI)
    pub p: Term,
    /// Object (any term)
    pub o: Term,
    /// Named graph label; `None` means the default graph
    pub g: Option<Term>,
}

impl Statement {
    /// Create a statement in the default graph
    pub fn new(s: Term, p: Term, o: Term) -> Self {
        Self { s, p, o, g: None }
    }

    /// Create a statement tagged with a named graph
    pub fn in_graph(s: Term, p: Term, o: Term, g: Term) -> Self {
        Self {
            s,
            p,
            o,
            g: Some(g),
        }
    }

    /// Check if this statement belongs to the default graph
    pub fn is_default_graph(&self) -> bool {
        self.g.is_none()
    }

    /// The named-graph label, if any
    pub fn graph(&self) -> Option<&Term> {
        self.g.as_ref()
    }
}

impl std::fmt::Display for Statement {
    /// N-Quads line form: `<s> <p> <o> [<g>] .`
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {} {}", self.s, self.p, self.o)?;
        if let Some(g) = &self.g {
            write!(f, " {}", g)?;
        }
        write!(f, " .")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_statement_construction() {
        let st = Statement::new(
            Term::iri("http://example.org/alice"),
            Term::iri("http://example.org/knows"),
            Term::iri("http://example.org/bob"),
        );
        assert!(st.is_default_graph());
        assert_eq!(st.graph(), None);

        let quad = Statement::in_graph(
            Term::iri("http://example.org/alice"),
            Term::iri("http://example.org/knows"),
            Term::iri("http://example.org/bob"),
            Term::iri("http://example.org/g1"),
        );
        assert!(!quad.is_default_graph());
        assert_eq!(
            quad.graph().and_then(|g| g.as_iri()),
            Some("http://example.org/g1")
        );
    }

    #[test]
    fn test_statement_display() {
        let st = Statement::new(
            Term::iri("http://example.org/a"),
            Term::iri("http://example.org/p"),
            Term::string("x"),
        );
        assert_eq!(
            st.to_string(),
            "<http://example.org/a> <http://example.org/p> \"x\" ."
        );

        let quad = Statement::in_graph(
            Term::iri("http://example.org/a"),
            Term::iri("http://example.org/p"),
            Term::blank("b0"),
            Term::iri("http://example.org/g"),
        );
        assert_eq!(
            quad.to_string(),
            "<http://example.org/a> <http://example.org/p> _:b0 <http://example.org/g> ."
        );
    }

    #[test]
    fn test_statement_ordering() {
        let a = Statement::new(
            Term::iri("http://example.org/a"),
            Term::iri("http://example.org/p"),
            Term::string("x"),
        );
        let b = Statement::new(
            Term::iri("http://example.org/b"),
            Term::iri("http://example.org/p"),
            Term::string("x"),
        );
        // Default graph sorts before named graphs for the same triple
        let a_named = Statement::in_graph(
            Term::iri("http://example.org/a"),
            Term::iri("http://example.org/p"),
            Term::string("x"),
            Term::iri("http://example.org/g"),
        );

        assert!(a < b);
        assert!(a < a_named);
    }
}
