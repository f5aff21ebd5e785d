//! Graph loading pipeline
//!
//! `load_graph` is the single entry point: pick a format from the file
//! name, parse the text into statements, fold them into a graph, and hand
//! back a [`GraphView`] that owns the original file alongside the result.
//! Each call builds its own pipeline; nothing is shared or cached between
//! loads.

use crate::builder::{GraphBuilder, GraphEdge, GraphNode, ParsedGraph};
use crate::error::{Result, ViewError};
use crate::format::{self, GraphFormat};
use crate::render::RenderGraph;
use serde::Serialize;
use tracing::{debug, info};

/// Node/edge counts for the viewer's summary line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphStats {
    pub node_count: usize,
    pub edge_count: usize,
}

/// One loaded file: its name, its verbatim text, and the finished graph
#[derive(Debug, Clone)]
pub struct GraphView {
    file_name: String,
    source_text: String,
    graph: ParsedGraph,
}

/// Parse one file into a render-ready graph view.
///
/// The format is chosen from the file extension (sniffed for `.owl`).
/// JSON-LD goes through expansion and canonical N-Quads, then through the
/// same Turtle-family grammar as everything else. A grammar error aborts
/// the whole load; an empty result is a valid, empty view.
pub fn load_graph(file_name: &str, text: &str) -> Result<GraphView> {
    let format = match GraphFormat::detect(file_name, text) {
        Some(format) => format,
        None => {
            return Err(ViewError::UnsupportedFormat {
                extension: format::extension(file_name).unwrap_or(file_name).to_string(),
            })
        }
    };

    debug!(file = file_name, format = format.as_str(), "loading graph");
    if format.is_best_effort() {
        debug!(
            file = file_name,
            "no native RDF/XML grammar; attempting best-effort Turtle-family parse"
        );
    }

    let dataset = match format {
        GraphFormat::JsonLd => {
            let nquads = weft_graph_json_ld::to_canonical_nquads(text)?;
            weft_graph_turtle::parse_to_dataset(&nquads)?
        }
        GraphFormat::Turtle | GraphFormat::Quads | GraphFormat::RdfXml => {
            weft_graph_turtle::parse_to_dataset(text)?
        }
    };

    let mut builder = GraphBuilder::new();
    builder.add_dataset(&dataset);
    let graph = builder.finish();

    info!(
        file = file_name,
        statements = dataset.len(),
        nodes = graph.nodes.len(),
        edges = graph.edges.len(),
        "graph loaded"
    );

    Ok(GraphView {
        file_name: file_name.to_string(),
        source_text: text.to_string(),
        graph,
    })
}

impl GraphView {
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn graph(&self) -> &ParsedGraph {
        &self.graph
    }

    pub fn nodes(&self) -> &[GraphNode] {
        &self.graph.nodes
    }

    pub fn edges(&self) -> &[GraphEdge] {
        &self.graph.edges
    }

    /// Summary statistics for display
    pub fn stats(&self) -> GraphStats {
        GraphStats {
            node_count: self.graph.nodes.len(),
            edge_count: self.graph.edges.len(),
        }
    }

    /// True when the file was well-formed but held no statements; the
    /// viewer shows [`crate::error::NO_GRAPH_DATA`] instead of a graph
    pub fn is_empty(&self) -> bool {
        self.graph.is_empty()
    }

    /// The original file name and text, untouched. Download is a
    /// passthrough of the source, never a re-serialization of the graph.
    pub fn download(&self) -> (&str, &str) {
        (&self.file_name, &self.source_text)
    }

    /// Shape the graph for the force-layout collaborator
    pub fn render(&self) -> RenderGraph {
        RenderGraph::from_parsed(&self.graph)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_turtle() {
        let view = load_graph(
            "friends.ttl",
            "@prefix ex: <http://example.org/> . ex:alice ex:knows ex:bob .",
        )
        .unwrap();

        assert_eq!(view.stats().node_count, 2);
        assert_eq!(view.stats().edge_count, 1);
        assert!(!view.is_empty());
    }

    #[test]
    fn test_unsupported_extension() {
        let err = load_graph("spreadsheet.xlsx", "a,b,c").unwrap_err();
        assert_eq!(
            err,
            ViewError::UnsupportedFormat {
                extension: "xlsx".to_string()
            }
        );
    }

    #[test]
    fn test_missing_extension_reports_file_name() {
        let err = load_graph("README", "hello").unwrap_err();
        assert_eq!(err.to_string(), "Unsupported graph format: README");
    }

    #[test]
    fn test_syntax_error_aborts_load() {
        let err = load_graph("broken.ttl", "<http://a> <http://b> .").unwrap_err();
        assert!(matches!(err, ViewError::Syntax { .. }));
    }

    #[test]
    fn test_empty_document_is_soft_empty() {
        let view = load_graph("empty.ttl", "# just a comment\n").unwrap();
        assert!(view.is_empty());
        assert_eq!(view.stats().node_count, 0);
        assert_eq!(view.stats().edge_count, 0);
    }

    #[test]
    fn test_download_is_verbatim() {
        let source = "@prefix ex: <http://example.org/> .\nex:a ex:p ex:b .\n";
        let view = load_graph("data.ttl", source).unwrap();
        assert_eq!(view.download(), ("data.ttl", source));
    }
}
