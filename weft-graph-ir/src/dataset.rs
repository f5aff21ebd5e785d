//! RDF dataset - a collection of statements
//!
//! The `Dataset` type uses `Vec<Statement>` to preserve duplicates (bag
//! semantics). Call `dedupe()` explicitly if you want set semantics, or
//! `canonicalize()` for the full deterministic form.

use crate::{Statement, Term};
use std::collections::{BTreeMap, HashMap};

/// A collection of RDF statements (triples and quads)
///
/// # Design Decisions
///
/// - **Vec storage**: preserves insertion order and duplicates as parsed.
/// - **Explicit deduplication**: call `dedupe()` if you want set semantics.
/// - **Canonical form**: `canonicalize()` sorts, dedupes, and relabels blank
///   nodes deterministically so the same data always serializes the same way.
///
/// # Example
///
/// ```
/// use weft_graph_ir::{Dataset, Term};
///
/// let mut dataset = Dataset::new();
///
/// dataset.add_triple(
///     Term::iri("http://example.org/alice"),
///     Term::iri("http://xmlns.com/foaf/0.1/name"),
///     Term::string("Alice"),
/// );
///
/// dataset.canonicalize();
/// let nquads = dataset.to_nquads();
/// assert!(nquads.contains("\"Alice\""));
/// ```
#[derive(Clone, Debug, Default)]
pub struct Dataset {
    /// The statements in this dataset
    statements: Vec<Statement>,
    /// Base IRI from parsing (for reconstruction)
    pub base: Option<String>,
    /// Prefix mappings from parsing (deterministic order via BTreeMap)
    pub prefixes: BTreeMap<String, String>,
}

impl Dataset {
    /// Create an empty dataset
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the base IRI
    pub fn set_base(&mut self, base: impl Into<String>) {
        self.base = Some(base.into());
    }

    /// Add a prefix mapping
    pub fn add_prefix(&mut self, prefix: impl Into<String>, namespace: impl Into<String>) {
        self.prefixes.insert(prefix.into(), namespace.into());
    }

    /// Add a statement to the dataset
    pub fn add(&mut self, statement: Statement) {
        self.statements.push(statement);
    }

    /// Add a default-graph triple by components
    pub fn add_triple(&mut self, s: Term, p: Term, o: Term) {
        self.add(Statement::new(s, p, o));
    }

    /// Add a named-graph quad by components
    pub fn add_quad(&mut self, s: Term, p: Term, o: Term, g: Term) {
        self.add(Statement::in_graph(s, p, o, g));
    }

    /// Get the number of statements
    pub fn len(&self) -> usize {
        self.statements.len()
    }

    /// Check if the dataset is empty
    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }

    /// Iterate over statements
    pub fn iter(&self) -> impl Iterator<Item = &Statement> {
        self.statements.iter()
    }

    /// Sort statements by SPOG for deterministic output
    pub fn sort(&mut self) {
        self.statements.sort();
    }

    /// Remove duplicate statements (apply set semantics)
    ///
    /// Sorts first so duplicates group together.
    pub fn dedupe(&mut self) {
        self.statements.sort();
        self.statements.dedup();
    }

    /// Check if the dataset is sorted
    pub fn is_sorted(&self) -> bool {
        self.statements.windows(2).all(|w| w[0] <= w[1])
    }

    /// Produce the canonical form: sorted, deduplicated, blank nodes
    /// relabeled `c14n0`, `c14n1`, ... in order of first use.
    ///
    /// The relabeling is deterministic for a given input dataset. It does
    /// not compute cross-document isomorphism; two different labelings of
    /// the same structure may still canonicalize differently.
    pub fn canonicalize(&mut self) {
        self.statements.sort();
        self.statements.dedup();

        let mut labels: HashMap<String, String> = HashMap::new();
        for st in &mut self.statements {
            relabel_term(&mut st.s, &mut labels);
            relabel_term(&mut st.o, &mut labels);
            if let Some(g) = &mut st.g {
                relabel_term(g, &mut labels);
            }
        }

        // Relabeling can perturb ordering between multi-blank statements
        self.statements.sort();
    }

    /// Serialize as N-Quads text, one statement per line
    pub fn to_nquads(&self) -> String {
        let mut out = String::new();
        for st in &self.statements {
            out.push_str(&st.to_string());
            out.push('\n');
        }
        out
    }

    /// Get all statements (consuming the dataset)
    pub fn into_statements(self) -> Vec<Statement> {
        self.statements
    }

    /// Get a reference to the statements
    pub fn statements(&self) -> &[Statement] {
        &self.statements
    }
}

fn relabel_term(term: &mut Term, labels: &mut HashMap<String, String>) {
    if let Term::BlankNode(id) = term {
        let next = labels.len();
        let new = labels
            .entry(id.as_str().to_string())
            .or_insert_with(|| format!("c14n{}", next))
            .clone();
        *term = Term::blank(new);
    }
}

impl IntoIterator for Dataset {
    type Item = Statement;
    type IntoIter = std::vec::IntoIter<Statement>;

    fn into_iter(self) -> Self::IntoIter {
        self.statements.into_iter()
    }
}

impl<'a> IntoIterator for &'a Dataset {
    type Item = &'a Statement;
    type IntoIter = std::slice::Iter<'a, Statement>;

    fn into_iter(self) -> Self::IntoIter {
        self.statements.iter()
    }
}

impl FromIterator<Statement> for Dataset {
    fn from_iter<T: IntoIterator<Item = Statement>>(iter: T) -> Self {
        Dataset {
            statements: iter.into_iter().collect(),
            base: None,
            prefixes: BTreeMap::new(),
        }
    }
}

impl Extend<Statement> for Dataset {
    fn extend<T: IntoIterator<Item = Statement>>(&mut self, iter: T) {
        self.statements.extend(iter);
    }
}
