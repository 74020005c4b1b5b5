//! Force-directed knowledge-graph viewer component.
//!
//! Renders a [`model::KnowledgeGraph`] on an HTML canvas through a named
//! [`model::View`]:
//! - View selection, type filtering and endpoint pruning ([`pipeline`])
//! - Physics-based node positioning via an external force simulation
//! - Per-type colors, sizes and line styles ([`style`])
//! - Pan, zoom, node dragging and click-to-inspect detail panels
//!
//! # Example
//!
//! ```ignore
//! use knowledge_graph_canvas::{GraphViewCanvas, KnowledgeGraph, Node, Relation};
//!
//! let graph = KnowledgeGraph::new("demo", "Demo")
//!     .add_node(Node::new("a", "THEORY", "Theory A"))
//!     .add_node(Node::new("b", "THEORY", "Theory B"))
//!     .add_relation(Relation::new("r", "PART_OF", "part of", "b", "a"));
//!
//! view! { <GraphViewCanvas graph=graph /> }
//! ```

mod component;
pub mod model;
mod panel;
pub mod pipeline;
mod render;
mod state;
pub mod style;

pub use component::{GraphViewCanvas, mount_graph_view};
pub use model::{
	FilterSpec, KnowledgeGraph, LayoutDirection, LayoutKind, LayoutSpec, LineStyle, Metadata,
	ModelError, Node, NodeShape, NodeStyle, Property, PropertyKind, PropertyValue, Relation,
	RelationStyle, SourceRef, StyleSpec, View,
};
pub use panel::{NodePanel, RelationPanel};
pub use pipeline::{ResolvedRelation, ResolvedScene, resolve_scene, resolve_view};
pub use state::{EdgeVisual, GraphViewState, NodeVisual, ViewerOptions};
