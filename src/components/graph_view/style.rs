//! Visual mapping from model records to canvas attributes.
//!
//! Resolution is two-tier: the active view's per-type override wins, then
//! the built-in defaults. Unknown types never fail, they fall back.

use super::model::{LineStyle, Node, Relation, View};

/// Fill color used when no override and no built-in entry applies.
pub const DEFAULT_NODE_COLOR: &str = "#1f77b4";
/// Stroke color used when the view has no override for a relation type.
pub const DEFAULT_RELATION_COLOR: &str = "#999";

/// Dash patterns per [`LineStyle`], in canvas `setLineDash` units.
pub const SOLID: &[f64] = &[];
pub const DASHED: &[f64] = &[8.0, 4.0];
pub const DOTTED: &[f64] = &[2.0, 4.0];

fn builtin_node_color(kind: &str) -> &'static str {
	match kind {
		"CONCEPT" => "#1f77b4",
		"THEORY" => "#2ca02c",
		"FILE" => "#d62728",
		"DIRECTORY" => "#9467bd",
		"EXAMPLE" => "#8c564b",
		"TOOL" => "#e377c2",
		"TASK" => "#7f7f7f",
		_ => DEFAULT_NODE_COLOR,
	}
}

/// Fill color for a node under the given view.
///
/// A view override entry for the node's type short-circuits the built-in
/// table even when its `color` field is unset.
pub fn node_color(view: &View, node: &Node) -> String {
	if let Some(style) = view.style.node.get(&node.kind) {
		return style
			.color
			.clone()
			.unwrap_or_else(|| DEFAULT_NODE_COLOR.to_owned());
	}
	builtin_node_color(&node.kind).to_owned()
}

/// Radius for a node under the given view.
pub fn node_radius(view: &View, node: &Node, default_radius: f64) -> f64 {
	view.style
		.node
		.get(&node.kind)
		.and_then(|style| style.size)
		.unwrap_or(default_radius)
}

/// Stroke width for a relation: thickness grows sub-linearly with weight.
pub fn relation_width(relation: &Relation) -> f64 {
	relation.weight.sqrt()
}

/// Stroke color for a relation under the given view.
pub fn relation_color(view: &View, relation: &Relation) -> String {
	view.style
		.relation
		.get(&relation.kind)
		.and_then(|style| style.color.clone())
		.unwrap_or_else(|| DEFAULT_RELATION_COLOR.to_owned())
}

/// Dash pattern for a relation under the given view.
pub fn relation_dash(view: &View, relation: &Relation) -> &'static [f64] {
	match view
		.style
		.relation
		.get(&relation.kind)
		.and_then(|style| style.line)
	{
		Some(LineStyle::Dashed) => DASHED,
		Some(LineStyle::Dotted) => DOTTED,
		Some(LineStyle::Solid) | None => SOLID,
	}
}
