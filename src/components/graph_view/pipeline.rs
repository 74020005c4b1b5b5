//! View resolution and entity filtering ahead of layout.
//!
//! Produces a [`ResolvedScene`]: the active view, the surviving nodes, and
//! relations rewritten to positional indices into the surviving node list.
//! Everything here is pure; the simulation bridge consumes the output.

use std::collections::HashMap;

use super::model::{KnowledgeGraph, Node, Relation, View};

/// A relation that survived filtering, with endpoints resolved to indices
/// into [`ResolvedScene::nodes`] and endpoint labels resolved against the
/// full, unfiltered node list for the detail panel.
#[derive(Clone, Debug, PartialEq)]
pub struct ResolvedRelation {
	pub relation: Relation,
	pub source_index: usize,
	pub target_index: usize,
	pub source_label: String,
	pub target_label: String,
}

/// Output of [`resolve_scene`]: what the canvas will actually show.
#[derive(Clone, Debug, PartialEq)]
pub struct ResolvedScene {
	pub view: View,
	pub nodes: Vec<Node>,
	pub relations: Vec<ResolvedRelation>,
}

/// Pick the view to render: the requested id if it matches, else the
/// graph's first view, else a synthetic unfiltered default.
pub fn resolve_view(graph: &KnowledgeGraph, view_id: Option<&str>) -> View {
	if let Some(id) = view_id {
		if let Some(view) = graph.view(id) {
			return view.clone();
		}
	}
	match graph.views.first() {
		Some(view) => view.clone(),
		None => View::new("default", "Default View"),
	}
}

/// Filter the graph through the resolved view and rewrite relation
/// endpoints to node indices.
///
/// Filtering is two separate steps, both observable: relations are first
/// kept or dropped by their own type, then any relation whose endpoint id
/// does not resolve to a surviving node is silently dropped. A relation is
/// never dropped merely because an endpoint's node type was filtered out;
/// only the missing index removes it.
pub fn resolve_scene(graph: &KnowledgeGraph, view_id: Option<&str>) -> ResolvedScene {
	let view = resolve_view(graph, view_id);

	let nodes: Vec<Node> = match &view.filter.node_types {
		Some(allowed) => graph
			.nodes
			.iter()
			.filter(|node| allowed.iter().any(|kind| *kind == node.kind))
			.cloned()
			.collect(),
		None => graph.nodes.clone(),
	};

	let typed: Vec<&Relation> = match &view.filter.relation_types {
		Some(allowed) => graph
			.relations
			.iter()
			.filter(|relation| allowed.iter().any(|kind| *kind == relation.kind))
			.collect(),
		None => graph.relations.iter().collect(),
	};

	let index_of: HashMap<&str, usize> = nodes
		.iter()
		.enumerate()
		.map(|(i, node)| (node.id.as_str(), i))
		.collect();

	let relations = typed
		.into_iter()
		.filter_map(|relation| {
			let source_index = *index_of.get(relation.source.as_str())?;
			let target_index = *index_of.get(relation.target.as_str())?;
			Some(ResolvedRelation {
				source_label: endpoint_label(graph, &relation.source),
				target_label: endpoint_label(graph, &relation.target),
				relation: relation.clone(),
				source_index,
				target_index,
			})
		})
		.collect();

	ResolvedScene {
		view,
		nodes,
		relations,
	}
}

/// Human-readable endpoint name, falling back to the raw id when the node
/// is absent even from the unfiltered graph.
fn endpoint_label(graph: &KnowledgeGraph, id: &str) -> String {
	graph
		.node(id)
		.map(|node| node.label.clone())
		.unwrap_or_else(|| id.to_owned())
}
