//! Knowledge-graph viewer core for Weft.
//!
//! Turns one file (name plus text) into a deduplicated, render-ready
//! node/edge graph: format dispatch by extension, parsing via the
//! Turtle-family and JSON-LD parsers, a single fold into nodes and edges,
//! and shaping for the force-layout collaborator. No network, no
//! persistence, no shared state between loads.
//!
//! # Example
//!
//! ```
//! use weft_graph_view::load_graph;
//!
//! let turtle = r#"
//!     @prefix ex: <http://example.org/> .
//!     ex:alice ex:knows ex:bob .
//!     ex:alice ex:name "Alice" .
//! "#;
//!
//! let view = load_graph("friends.ttl", turtle).unwrap();
//! assert_eq!(view.stats().node_count, 3);
//! assert_eq!(view.stats().edge_count, 2);
//!
//! let render = view.render();
//! assert_eq!(render.nodes[0].label, "alice");
//! ```

pub mod builder;
pub mod error;
pub mod format;
pub mod normalize;
pub mod render;
pub mod session;
pub mod view;

pub use builder::{GraphBuilder, GraphEdge, GraphNode, NodeRole, ParsedGraph};
pub use error::{Result, ViewError, NO_GRAPH_DATA};
pub use format::GraphFormat;
pub use render::{RenderEdge, RenderGraph, RenderNode};
pub use session::{LoadTicket, ViewerSession};
pub use view::{load_graph, GraphStats, GraphView};
