//! StatementSink trait for event-driven dataset construction
//!
//! Parsers emit statement events without knowing the concrete sink type.
//! The standard sink is `DatasetCollector`, which gathers events into a
//! `Dataset`; a consumer that wants to fold statements directly into some
//! other structure can implement the trait itself.

use crate::{Dataset, Datatype, LiteralValue, Statement, Term};
use std::collections::HashMap;

/// Opaque term identifier for efficient statement emission
///
/// A `TermId` is only valid within a single sink session. It lets parsers
/// reference terms without repeated string allocations.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TermId(pub(crate) u32);

impl TermId {
    /// Create a new TermId from a raw index.
    ///
    /// Intended for `StatementSink` implementations outside this crate that
    /// need to allocate term IDs.
    pub fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw index value.
    pub fn index(self) -> u32 {
        self.0
    }
}

/// Event-driven interface for RDF statement production
///
/// # Example
///
/// ```
/// use weft_graph_ir::{Datatype, DatasetCollector, StatementSink};
///
/// let mut sink = DatasetCollector::new();
///
/// sink.on_prefix("foaf", "http://xmlns.com/foaf/0.1/");
///
/// let alice = sink.term_iri("http://example.org/alice");
/// let name = sink.term_iri("http://xmlns.com/foaf/0.1/name");
/// let alice_name = sink.term_literal("Alice", Datatype::xsd_string(), None);
///
/// sink.emit(alice, name, alice_name);
///
/// let dataset = sink.finish();
/// assert_eq!(dataset.len(), 1);
/// ```
pub trait StatementSink {
    /// Called when a base IRI is declared
    ///
    /// In Turtle: `@base <http://example.org/> .`
    /// In JSON-LD: `"@base": "http://example.org/"`
    fn on_base(&mut self, base_iri: &str);

    /// Called when a prefix is declared
    ///
    /// In Turtle: `@prefix foaf: <http://xmlns.com/foaf/0.1/> .`
    /// In JSON-LD: `"foaf": "http://xmlns.com/foaf/0.1/"` in @context
    fn on_prefix(&mut self, prefix: &str, namespace_iri: &str);

    /// Create an IRI term and return its ID
    ///
    /// The IRI should be fully expanded (not prefixed).
    fn term_iri(&mut self, iri: &str) -> TermId;

    /// Create a blank node term and return its ID
    ///
    /// If `label` is Some, the blank node has that label (for consistent
    /// identity across references). If None, generate a fresh blank node.
    fn term_blank(&mut self, label: Option<&str>) -> TermId;

    /// Create a literal term from a string value
    ///
    /// The value is the lexical form of the literal.
    fn term_literal(&mut self, value: &str, datatype: Datatype, language: Option<&str>) -> TermId;

    /// Create a literal term from a native value
    ///
    /// Use this for non-string values (boolean, integer, double, JSON).
    fn term_literal_value(&mut self, value: LiteralValue, datatype: Datatype) -> TermId;

    /// Emit a default-graph statement using previously created term IDs
    fn emit(&mut self, subject: TermId, predicate: TermId, object: TermId);

    /// Emit a statement tagged with a named graph
    ///
    /// Default implementation drops the graph label and falls back to
    /// `emit`. Sinks that track named graphs should override this.
    fn emit_in_graph(&mut self, subject: TermId, predicate: TermId, object: TermId, graph: TermId) {
        let _ = graph;
        self.emit(subject, predicate, object);
    }
}

/// A sink that collects statements into a Dataset
///
/// This is the standard sink for building an in-memory dataset from parser
/// events.
#[derive(Debug)]
pub struct DatasetCollector {
    /// The dataset being built
    dataset: Dataset,
    /// Terms indexed by TermId
    terms: Vec<Term>,
    /// Counter for generating anonymous blank node IDs
    blank_counter: u32,
    /// Cache mapping blank node labels to their TermId
    blank_labels: HashMap<String, TermId>,
}

impl DatasetCollector {
    /// Create a new collector
    pub fn new() -> Self {
        Self {
            dataset: Dataset::new(),
            terms: Vec::new(),
            blank_counter: 0,
            blank_labels: HashMap::new(),
        }
    }

    /// Finish building and return the dataset
    ///
    /// Consumes the collector.
    pub fn finish(self) -> Dataset {
        self.dataset
    }

    /// Get the current dataset (non-consuming)
    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    /// Get a term by its ID
    fn get_term(&self, id: TermId) -> &Term {
        &self.terms[id.0 as usize]
    }

    /// Add a term and return its ID
    fn add_term(&mut self, term: Term) -> TermId {
        let id = TermId(self.terms.len() as u32);
        self.terms.push(term);
        id
    }
}

impl Default for DatasetCollector {
    fn default() -> Self {
        Self::new()
    }
}

impl StatementSink for DatasetCollector {
    fn on_base(&mut self, base_iri: &str) {
        self.dataset.set_base(base_iri);
    }

    fn on_prefix(&mut self, prefix: &str, namespace_iri: &str) {
        self.dataset.add_prefix(prefix, namespace_iri);
    }

    fn term_iri(&mut self, iri: &str) -> TermId {
        self.add_term(Term::iri(iri))
    }

    fn term_blank(&mut self, label: Option<&str>) -> TermId {
        match label {
            Some(l) => {
                // Same label refers to the same node throughout the document
                if let Some(&id) = self.blank_labels.get(l) {
                    return id;
                }

                let id = self.add_term(Term::blank(l));
                self.blank_labels.insert(l.to_string(), id);
                id
            }
            None => loop {
                // Generated labels must not collide with document labels:
                // a `_:genid1` already seen in the input keeps its identity
                // and the generator moves past it
                self.blank_counter += 1;
                let label = format!("genid{}", self.blank_counter);
                if !self.blank_labels.contains_key(&label) {
                    let id = self.add_term(Term::blank(&label));
                    self.blank_labels.insert(label, id);
                    return id;
                }
            },
        }
    }

    fn term_literal(&mut self, value: &str, datatype: Datatype, language: Option<&str>) -> TermId {
        let term = match language {
            Some(lang) => Term::lang_string(value, lang),
            None if datatype.is_xsd_string() => Term::string(value),
            None => Term::typed(value, datatype),
        };
        self.add_term(term)
    }

    fn term_literal_value(&mut self, value: LiteralValue, datatype: Datatype) -> TermId {
        let term = Term::Literal {
            value,
            datatype,
            language: None,
        };
        self.add_term(term)
    }

    fn emit(&mut self, subject: TermId, predicate: TermId, object: TermId) {
        let s = self.get_term(subject).clone();
        let p = self.get_term(predicate).clone();
        let o = self.get_term(object).clone();
        self.dataset.add(Statement::new(s, p, o));
    }

    fn emit_in_graph(&mut self, subject: TermId, predicate: TermId, object: TermId, graph: TermId) {
        let s = self.get_term(subject).clone();
        let p = self.get_term(predicate).clone();
        let o = self.get_term(object).clone();
        let g = self.get_term(graph).clone();
        self.dataset.add(Statement::in_graph(s, p, o, g));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collector_basic() {
        let mut sink = DatasetCollector::new();

        let s = sink.term_iri("http://example.org/alice");
        let p = sink.term_iri("http://xmlns.com/foaf/0.1/name");
        let o = sink.term_literal("Alice", Datatype::xsd_string(), None);

        sink.emit(s, p, o);

        let dataset = sink.finish();
        assert_eq!(dataset.len(), 1);

        let st = dataset.iter().next().unwrap();
        assert_eq!(st.s.as_iri(), Some("http://example.org/alice"));
        assert_eq!(st.p.as_iri(), Some("http://xmlns.com/foaf/0.1/name"));
        assert!(st.is_default_graph());
    }

    #[test]
    fn test_collector_blank_nodes() {
        let mut sink = DatasetCollector::new();

        // Same label produces the same TermId
        let b1 = sink.term_blank(Some("b0"));
        let b2 = sink.term_blank(Some("b0"));
        assert_eq!(b1, b2);

        // Different labels produce different TermIds
        let b3 = sink.term_blank(Some("b1"));
        assert_ne!(b1, b3);

        // Anonymous blank nodes get sequential fresh labels
        let anon1 = sink.term_blank(None);
        let anon2 = sink.term_blank(None);
        assert_ne!(anon1, anon2);
    }

    #[test]
    fn test_generated_labels_avoid_document_labels() {
        let mut sink = DatasetCollector::new();

        // A document that already uses _:genid1 keeps it; the generator
        // hands out the next free label instead of merging the two nodes
        let explicit = sink.term_blank(Some("genid1"));
        let generated = sink.term_blank(None);
        assert_ne!(explicit, generated);
    }

    #[test]
    fn test_collector_directives() {
        let mut sink = DatasetCollector::new();

        sink.on_base("http://example.org/");
        sink.on_prefix("foaf", "http://xmlns.com/foaf/0.1/");

        let dataset = sink.finish();

        assert_eq!(dataset.base, Some("http://example.org/".to_string()));
        assert_eq!(
            dataset.prefixes.get("foaf"),
            Some(&"http://xmlns.com/foaf/0.1/".to_string())
        );
    }

    #[test]
    fn test_collector_language_literal() {
        let mut sink = DatasetCollector::new();

        let s = sink.term_iri("http://example.org/alice");
        let p = sink.term_iri("http://xmlns.com/foaf/0.1/name");
        let o = sink.term_literal("Alicia", Datatype::rdf_lang_string(), Some("es"));

        sink.emit(s, p, o);

        let dataset = sink.finish();
        let st = dataset.iter().next().unwrap();

        if let Term::Literal {
            language, datatype, ..
        } = &st.o
        {
            assert_eq!(language.as_deref(), Some("es"));
            assert!(datatype.is_lang_string());
        } else {
            panic!("Expected literal");
        }
    }

    #[test]
    fn test_collector_literal_values() {
        let mut sink = DatasetCollector::new();

        let s = sink.term_iri("http://example.org/test");
        let p = sink.term_iri("http://example.org/value");

        let bool_val = sink.term_literal_value(LiteralValue::Boolean(true), Datatype::xsd_boolean());
        sink.emit(s, p, bool_val);

        let int_val = sink.term_literal_value(LiteralValue::Integer(42), Datatype::xsd_integer());
        sink.emit(s, p, int_val);

        let double_val = sink.term_literal_value(LiteralValue::Double(3.14), Datatype::xsd_double());
        sink.emit(s, p, double_val);

        let dataset = sink.finish();
        assert_eq!(dataset.len(), 3);
    }

    #[test]
    fn test_collector_named_graph() {
        let mut sink = DatasetCollector::new();

        let s = sink.term_iri("http://example.org/alice");
        let p = sink.term_iri("http://example.org/knows");
        let o = sink.term_iri("http://example.org/bob");
        let g = sink.term_iri("http://example.org/people");

        sink.emit_in_graph(s, p, o, g);
        sink.emit(s, p, o);

        let dataset = sink.finish();
        assert_eq!(dataset.len(), 2);

        let graphs: Vec<_> = dataset.iter().map(|st| st.graph().is_some()).collect();
        assert_eq!(graphs, vec![true, false]);
    }
}
