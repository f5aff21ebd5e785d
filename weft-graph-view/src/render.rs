//! Render-boundary shaping
//!
//! The force-layout collaborator takes plain node/edge arrays: per node an
//! `id`, a `label` for on-canvas text, a `color` for categorical styling,
//! and a numeric `size`; per edge `source`, `target`, `label`, `weight`.
//! Shaping is a field mapping over the parsed graph, nothing more. The
//! same structures serialize to the JSON and CSV export forms.

use crate::builder::{NodeRole, ParsedGraph};
use serde::Serialize;

/// Fixed role-to-color table
pub const SUBJECT_COLOR: &str = "#3b82f6";
pub const OBJECT_COLOR: &str = "#a855f7";
pub const LITERAL_COLOR: &str = "#22c55e";

impl NodeRole {
    /// Categorical styling: subjects blue, objects purple, literals green
    pub fn color(self) -> &'static str {
        match self {
            NodeRole::Subject => SUBJECT_COLOR,
            NodeRole::Object => OBJECT_COLOR,
            NodeRole::Literal => LITERAL_COLOR,
        }
    }
}

/// One node as the layout collaborator expects it
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderNode {
    pub id: String,
    pub label: String,
    pub color: &'static str,
    pub size: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

/// One edge as the layout collaborator expects it
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderEdge {
    pub source: String,
    pub target: String,
    pub label: String,
    pub weight: u32,
}

/// The full payload handed to the 2D/3D layout
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RenderGraph {
    pub nodes: Vec<RenderNode>,
    pub edges: Vec<RenderEdge>,
}

impl RenderGraph {
    /// Shape a parsed graph for the layout boundary: label stays label,
    /// role becomes color, visual weight becomes size
    pub fn from_parsed(graph: &ParsedGraph) -> RenderGraph {
        RenderGraph {
            nodes: graph
                .nodes
                .iter()
                .map(|node| RenderNode {
                    id: node.id.clone(),
                    label: node.label.clone(),
                    color: node.role.color(),
                    size: node.weight,
                    detail: node.detail.clone(),
                })
                .collect(),
            edges: graph
                .edges
                .iter()
                .map(|edge| RenderEdge {
                    source: edge.source.clone(),
                    target: edge.target.clone(),
                    label: edge.label.clone(),
                    weight: edge.weight,
                })
                .collect(),
        }
    }

    /// Render-graph JSON for export
    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_default()
    }

    /// Nodes as CSV: `id,label,color,size`
    pub fn nodes_csv(&self) -> String {
        let mut out = String::from("id,label,color,size\n");
        for node in &self.nodes {
            out.push_str(&format!(
                "{},{},{},{}\n",
                csv_field(&node.id),
                csv_field(&node.label),
                node.color,
                node.size
            ));
        }
        out
    }

    /// Edges as CSV: `source,target,label,weight`
    pub fn edges_csv(&self) -> String {
        let mut out = String::from("source,target,label,weight\n");
        for edge in &self.edges {
            out.push_str(&format!(
                "{},{},{},{}\n",
                csv_field(&edge.source),
                csv_field(&edge.target),
                csv_field(&edge.label),
                edge.weight
            ));
        }
        out
    }
}

/// Quote a field when it contains a delimiter, quote, or line break
fn csv_field(value: &str) -> String {
    if value
        .chars()
        .any(|c| matches!(c, ',' | '"' | '\n' | '\r'))
    {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::{GraphBuilder, GraphNode};
    use weft_graph_ir::{Statement, Term};

    fn sample_graph() -> ParsedGraph {
        let mut builder = GraphBuilder::new();
        builder.add_statement(&Statement::new(
            Term::iri("http://example.org/alice"),
            Term::iri("http://example.org/knows"),
            Term::iri("http://example.org/bob"),
        ));
        builder.add_statement(&Statement::new(
            Term::iri("http://example.org/alice"),
            Term::iri("http://example.org/name"),
            Term::string("Alice"),
        ));
        builder.finish()
    }

    #[test]
    fn test_field_mapping() {
        let render = RenderGraph::from_parsed(&sample_graph());

        assert_eq!(render.nodes.len(), 3);
        let alice = &render.nodes[0];
        assert_eq!(alice.id, "http://example.org/alice");
        assert_eq!(alice.label, "alice");
        assert_eq!(alice.color, SUBJECT_COLOR);
        assert_eq!(alice.size, 5);

        let bob = &render.nodes[1];
        assert_eq!(bob.color, OBJECT_COLOR);
        assert_eq!(bob.size, 3);

        let leaf = &render.nodes[2];
        assert_eq!(leaf.color, LITERAL_COLOR);
        assert_eq!(leaf.size, 2);
        assert_eq!(leaf.detail.as_deref(), Some("Alice"));

        assert_eq!(render.edges.len(), 2);
        assert_eq!(render.edges[0].label, "knows");
        assert_eq!(render.edges[1].label, "name");
    }

    #[test]
    fn test_json_export_shape() {
        let render = RenderGraph::from_parsed(&sample_graph());
        let json: serde_json::Value = serde_json::from_str(&render.to_json()).unwrap();

        assert_eq!(json["nodes"][0]["id"], "http://example.org/alice");
        assert_eq!(json["nodes"][0]["color"], "#3b82f6");
        assert_eq!(json["nodes"][0]["size"], 5);
        // resource nodes carry no detail field
        assert!(json["nodes"][0].get("detail").is_none());
        assert_eq!(json["edges"][0]["source"], "http://example.org/alice");
        assert_eq!(json["edges"][0]["target"], "http://example.org/bob");
    }

    #[test]
    fn test_csv_export() {
        let render = RenderGraph::from_parsed(&sample_graph());

        let nodes = render.nodes_csv();
        let mut lines = nodes.lines();
        assert_eq!(lines.next(), Some("id,label,color,size"));
        assert_eq!(
            lines.next(),
            Some("http://example.org/alice,alice,#3b82f6,5")
        );

        let edges = render.edges_csv();
        assert!(edges.starts_with("source,target,label,weight\n"));
        assert!(edges.contains(",knows,1\n"));
    }

    #[test]
    fn test_csv_quotes_awkward_fields() {
        let graph = ParsedGraph {
            nodes: vec![GraphNode {
                id: "n1".to_string(),
                label: "says \"hi\", loudly".to_string(),
                role: NodeRole::Literal,
                weight: 2,
                detail: None,
            }],
            edges: Vec::new(),
        };

        let csv = RenderGraph::from_parsed(&graph).nodes_csv();
        assert!(csv.contains("\"says \"\"hi\"\", loudly\""));
    }
}
