//! Graph builder
//!
//! Folds a statement stream into a deduplicated node/edge graph. Every
//! distinct subject or resource object becomes exactly one node, keyed by
//! its canonical term string; literal objects become leaf nodes scoped to
//! their subject and predicate so unrelated literals never collide. One
//! pass, O(1) amortized lookups.

use crate::normalize;
use rustc_hash::FxHashMap;
use serde::Serialize;
use weft_graph_ir::{Dataset, Statement};

/// How a term first entered the graph
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeRole {
    Subject,
    Object,
    Literal,
}

impl NodeRole {
    /// Render sizing: subjects heavier than objects, objects heavier than
    /// literal leaves
    pub fn visual_weight(self) -> u32 {
        match self {
            NodeRole::Subject => 5,
            NodeRole::Object => 3,
            NodeRole::Literal => 2,
        }
    }
}

/// One graph node
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GraphNode {
    /// Canonical term string; the dedup key
    pub id: String,
    /// Prefix-compacted or truncated display label
    pub label: String,
    pub role: NodeRole,
    /// Render sizing weight
    pub weight: u32,
    /// Untruncated literal value (literal nodes only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

/// One graph edge
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GraphEdge {
    pub source: String,
    pub target: String,
    /// Compacted predicate IRI
    pub label: String,
    /// Number of statements this edge stands for
    pub weight: u32,
}

/// The finished node/edge aggregate. Built once per file load, immutable
/// after [`GraphBuilder::finish`], discarded with the viewer session.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ParsedGraph {
    pub nodes: Vec<GraphNode>,
    pub edges: Vec<GraphEdge>,
}

impl ParsedGraph {
    /// A well-formed file with zero statements builds an empty graph;
    /// the viewer shows a soft "no graph data" state for it
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.edges.is_empty()
    }
}

/// Incremental graph construction
///
/// Nodes keep insertion order so the same input always renders the same
/// graph. The first occurrence of a term fixes its role, label, and weight;
/// later appearances in other positions do not rewrite it. Repeated
/// (source, target, label) edges increment the edge weight instead of
/// adding rows.
#[derive(Debug, Default)]
pub struct GraphBuilder {
    nodes: Vec<GraphNode>,
    edges: Vec<GraphEdge>,
    node_index: FxHashMap<String, usize>,
    edge_index: FxHashMap<(String, String, String), usize>,
}

impl GraphBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one statement into the graph. Graph labels on quads do not
    /// partition the result; the viewer flattens the whole dataset.
    pub fn add_statement(&mut self, statement: &Statement) {
        let subject_id = normalize::canonical_id(&statement.s);
        self.ensure_node(
            subject_id.clone(),
            normalize::display_label(&statement.s),
            NodeRole::Subject,
            None,
        );

        let predicate_label = normalize::display_label(&statement.p);

        if statement.o.is_literal() {
            // Scoped leaf id: the same value on another subject or
            // predicate stays a separate node
            let predicate_id = normalize::canonical_id(&statement.p);
            let target_id = format!("{}::{}::literal", subject_id, predicate_id);
            let lexical = statement.o.lexical_form().unwrap_or_default();
            let label = normalize::truncate(&lexical, normalize::MAX_LABEL_CHARS);
            self.ensure_node(target_id.clone(), label, NodeRole::Literal, Some(lexical));
            self.add_edge(subject_id, target_id, predicate_label);
        } else {
            let target_id = normalize::canonical_id(&statement.o);
            self.ensure_node(
                target_id.clone(),
                normalize::display_label(&statement.o),
                NodeRole::Object,
                None,
            );
            self.add_edge(subject_id, target_id, predicate_label);
        }
    }

    /// Fold every statement of a dataset, in statement order
    pub fn add_dataset(&mut self, dataset: &Dataset) {
        for statement in dataset.statements() {
            self.add_statement(statement);
        }
    }

    fn ensure_node(&mut self, id: String, label: String, role: NodeRole, detail: Option<String>) {
        if self.node_index.contains_key(&id) {
            return;
        }
        self.node_index.insert(id.clone(), self.nodes.len());
        self.nodes.push(GraphNode {
            id,
            label,
            role,
            weight: role.visual_weight(),
            detail,
        });
    }

    fn add_edge(&mut self, source: String, target: String, label: String) {
        let key = (source.clone(), target.clone(), label.clone());
        if let Some(&at) = self.edge_index.get(&key) {
            self.edges[at].weight += 1;
            return;
        }
        self.edge_index.insert(key, self.edges.len());
        self.edges.push(GraphEdge {
            source,
            target,
            label,
            weight: 1,
        });
    }

    pub fn finish(self) -> ParsedGraph {
        ParsedGraph {
            nodes: self.nodes,
            edges: self.edges,
        }
    }
}
