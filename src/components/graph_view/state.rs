//! Scene state: the bridge between resolved graph data and the external
//! force simulation, plus pan/zoom/drag/hover interaction state.
//!
//! Every render pass rebuilds this state from scratch; nothing survives
//! from the previous scene.

use std::f64::consts::PI;

use force_graph::{DefaultNodeIdx, EdgeData, ForceGraph, NodeData, SimulationParameters};

use super::model::{Node, Relation};
use super::pipeline::ResolvedScene;
use super::style;

/// Minimum pointer-hit radius for small nodes, in world units.
pub const MIN_HIT_RADIUS: f64 = 12.0;
const NODE_HIT_SLOP: f64 = 4.0;
const EDGE_HIT_RADIUS: f64 = 6.0;

const ALPHA_INITIAL: f64 = 1.0;
const ALPHA_MIN: f64 = 0.001;
const ALPHA_DECAY: f64 = 0.03;
const REHEAT_TARGET: f64 = 0.3;

/// Tunable rendering/simulation parameters.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewerOptions {
	/// Node radius used when the active view has no size override.
	pub node_radius: f64,
	/// Attraction target length per relation.
	pub link_distance: f64,
	/// Repulsion magnitude, negative for repulsion.
	pub charge: f64,
}

impl Default for ViewerOptions {
	fn default() -> Self {
		Self {
			node_radius: 10.0,
			link_distance: 150.0,
			charge: -300.0,
		}
	}
}

/// Per-node data carried through the simulation for drawing and panels.
#[derive(Clone, Debug)]
pub struct NodeVisual {
	pub node: Node,
	pub color: String,
	pub radius: f64,
}

/// Per-relation data carried through the simulation for drawing and panels.
#[derive(Clone, Debug)]
pub struct EdgeVisual {
	pub relation: Relation,
	pub width: f64,
	pub color: String,
	pub dash: &'static [f64],
	pub source_label: String,
	pub target_label: String,
}

#[derive(Clone, Debug, Default)]
pub struct ViewTransform {
	pub x: f64,
	pub y: f64,
	pub k: f64,
}

#[derive(Clone, Debug, Default)]
pub struct DragState {
	pub active: bool,
	pub node_idx: Option<DefaultNodeIdx>,
	pub start_x: f64,
	pub start_y: f64,
	pub node_start_x: f32,
	pub node_start_y: f32,
}

#[derive(Clone, Debug, Default)]
pub struct PanState {
	pub active: bool,
	pub start_x: f64,
	pub start_y: f64,
	pub transform_start_x: f64,
	pub transform_start_y: f64,
}

/// One rendered scene bound to the force simulation.
pub struct GraphViewState {
	pub graph: ForceGraph<NodeVisual, EdgeVisual>,
	pub transform: ViewTransform,
	pub drag: DragState,
	pub pan: PanState,
	pub hover: Option<DefaultNodeIdx>,
	pub width: f64,
	pub height: f64,
	alpha: f64,
	alpha_target: f64,
}

impl GraphViewState {
	/// Build a fresh scene from resolved graph data.
	///
	/// The simulation engine exposes charge/spring constants rather than the
	/// charge/link-distance pair the options speak in, so both are mapped:
	/// repulsion is half the charge magnitude, spring stiffness is inversely
	/// proportional to the link distance. Centering is realized by seeding
	/// nodes on a circle around the canvas center.
	pub fn new(scene: &ResolvedScene, options: &ViewerOptions, width: f64, height: f64) -> Self {
		let mut graph = ForceGraph::new(SimulationParameters {
			force_charge: (-options.charge / 2.0) as f32,
			force_spring: (7.5 / options.link_distance) as f32,
			force_max: 100.0,
			node_speed: 3000.0,
			damping_factor: 0.9,
		});

		let node_count = scene.nodes.len().max(1);
		let mut indices = Vec::with_capacity(scene.nodes.len());
		for (i, node) in scene.nodes.iter().enumerate() {
			let angle = (i as f64) * 2.0 * PI / node_count as f64;
			let (x, y) = (
				(width / 2.0 + 100.0 * angle.cos()) as f32,
				(height / 2.0 + 100.0 * angle.sin()) as f32,
			);
			let idx = graph.add_node(NodeData {
				x,
				y,
				mass: 10.0,
				is_anchor: false,
				user_data: NodeVisual {
					node: node.clone(),
					color: style::node_color(&scene.view, node),
					radius: style::node_radius(&scene.view, node, options.node_radius),
				},
			});
			indices.push(idx);
		}

		for resolved in &scene.relations {
			graph.add_edge(
				indices[resolved.source_index],
				indices[resolved.target_index],
				EdgeData {
					user_data: EdgeVisual {
						width: style::relation_width(&resolved.relation),
						color: style::relation_color(&scene.view, &resolved.relation),
						dash: style::relation_dash(&scene.view, &resolved.relation),
						relation: resolved.relation.clone(),
						source_label: resolved.source_label.clone(),
						target_label: resolved.target_label.clone(),
					},
				},
			);
		}

		Self {
			graph,
			transform: ViewTransform { x: 0.0, y: 0.0, k: 1.0 },
			drag: DragState::default(),
			pan: PanState::default(),
			hover: None,
			width,
			height,
			alpha: ALPHA_INITIAL,
			alpha_target: 0.0,
		}
	}

	pub fn screen_to_graph(&self, sx: f64, sy: f64) -> (f64, f64) {
		(
			(sx - self.transform.x) / self.transform.k,
			(sy - self.transform.y) / self.transform.k,
		)
	}

	/// Topmost node under the pointer, if any. Hit radius is in world-space
	/// and scales with zoom like the nodes themselves.
	pub fn node_at_position(&self, sx: f64, sy: f64) -> Option<DefaultNodeIdx> {
		let (gx, gy) = self.screen_to_graph(sx, sy);
		let mut found = None;
		self.graph.visit_nodes(|node| {
			let (dx, dy) = (node.x() as f64 - gx, node.y() as f64 - gy);
			let hit = (node.data.user_data.radius + NODE_HIT_SLOP).max(MIN_HIT_RADIUS);
			if (dx * dx + dy * dy).sqrt() < hit {
				found = Some(node.index());
			}
		});
		found
	}

	/// Relation whose line segment passes under the pointer, if any.
	pub fn edge_at_position(&self, sx: f64, sy: f64) -> Option<EdgeVisual> {
		let (gx, gy) = self.screen_to_graph(sx, sy);
		let mut found = None;
		self.graph.visit_edges(|n1, n2, edge| {
			let (x1, y1) = (n1.x() as f64, n1.y() as f64);
			let (x2, y2) = (n2.x() as f64, n2.y() as f64);
			if segment_distance(gx, gy, x1, y1, x2, y2) < EDGE_HIT_RADIUS {
				found = Some(edge.user_data.clone());
			}
		});
		found
	}

	pub fn node_visual(&self, idx: DefaultNodeIdx) -> Option<NodeVisual> {
		let mut found = None;
		self.graph.visit_nodes(|node| {
			if node.index() == idx {
				found = Some(node.data.user_data.clone());
			}
		});
		found
	}

	pub fn node_index_by_id(&self, id: &str) -> Option<DefaultNodeIdx> {
		let mut found = None;
		self.graph.visit_nodes(|node| {
			if node.data.user_data.node.id == id {
				found = Some(node.index());
			}
		});
		found
	}

	/// Pin the node at its current simulated coordinate and resume motion
	/// if the simulation had settled.
	pub fn begin_drag(&mut self, idx: DefaultNodeIdx, sx: f64, sy: f64) {
		self.drag.active = true;
		self.drag.node_idx = Some(idx);
		self.drag.start_x = sx;
		self.drag.start_y = sy;
		self.graph.visit_nodes_mut(|node| {
			if node.index() == idx {
				self.drag.node_start_x = node.x();
				self.drag.node_start_y = node.y();
				node.data.is_anchor = true;
			}
		});
		self.alpha_target = REHEAT_TARGET;
	}

	/// Move the pinned coordinate to follow the pointer.
	pub fn drag_to(&mut self, sx: f64, sy: f64) {
		let Some(idx) = self.drag.node_idx else {
			return;
		};
		let (dx, dy) = (
			(sx - self.drag.start_x) / self.transform.k,
			(sy - self.drag.start_y) / self.transform.k,
		);
		let (nx, ny) = (
			self.drag.node_start_x + dx as f32,
			self.drag.node_start_y + dy as f32,
		);
		self.graph.visit_nodes_mut(|node| {
			if node.index() == idx {
				node.data.x = nx;
				node.data.y = ny;
				node.data.is_anchor = true;
			}
		});
	}

	/// Release the pin and let the simulation cool back to rest.
	pub fn end_drag(&mut self) {
		if let Some(idx) = self.drag.node_idx {
			self.graph.visit_nodes_mut(|node| {
				if node.index() == idx {
					node.data.is_anchor = false;
				}
			});
		}
		self.drag.active = false;
		self.drag.node_idx = None;
		self.alpha_target = 0.0;
	}

	pub fn is_pinned(&self, idx: DefaultNodeIdx) -> bool {
		let mut pinned = false;
		self.graph.visit_nodes(|node| {
			if node.index() == idx {
				pinned = node.data.is_anchor;
			}
		});
		pinned
	}

	pub fn set_hover(&mut self, node: Option<DefaultNodeIdx>) {
		self.hover = node;
	}

	pub fn is_settled(&self) -> bool {
		self.alpha < ALPHA_MIN && self.alpha_target == 0.0
	}

	/// Advance the simulation one step. Positions update fully here, never
	/// interleaved with a partially-applied drag.
	pub fn tick(&mut self, dt: f32) {
		self.alpha += (self.alpha_target - self.alpha) * ALPHA_DECAY;
		if self.is_settled() {
			return;
		}
		self.graph.update(dt);
	}

	pub fn resize(&mut self, width: f64, height: f64) {
		self.width = width;
		self.height = height;
	}
}

fn segment_distance(px: f64, py: f64, x1: f64, y1: f64, x2: f64, y2: f64) -> f64 {
	let (dx, dy) = (x2 - x1, y2 - y1);
	let len_sq = dx * dx + dy * dy;
	let t = if len_sq < f64::EPSILON {
		0.0
	} else {
		(((px - x1) * dx + (py - y1) * dy) / len_sq).clamp(0.0, 1.0)
	};
	let (cx, cy) = (x1 + t * dx, y1 + t * dy);
	((px - cx) * (px - cx) + (py - cy) * (py - cy)).sqrt()
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::graph_view::model::{KnowledgeGraph, Node, Relation};
	use crate::components::graph_view::pipeline::resolve_scene;

	fn small_state() -> GraphViewState {
		let graph = KnowledgeGraph::new("g", "Graph")
			.add_node(Node::new("a", "THEORY", "A"))
			.add_node(Node::new("b", "THEORY", "B"))
			.add_relation(Relation::new("r", "PART_OF", "part of", "a", "b").set_weight(4.0));
		let scene = resolve_scene(&graph, None);
		GraphViewState::new(&scene, &ViewerOptions::default(), 800.0, 600.0)
	}

	#[test]
	fn scene_build_carries_resolved_visuals() {
		let state = small_state();
		let idx = state.node_index_by_id("a").unwrap();
		let visual = state.node_visual(idx).unwrap();
		assert_eq!(visual.color, "#2ca02c");
		assert_eq!(visual.radius, 10.0);

		let mut widths = Vec::new();
		state.graph.visit_edges(|_, _, edge| widths.push(edge.user_data.width));
		assert_eq!(widths, vec![2.0]);
	}

	#[test]
	fn drag_pins_only_the_dragged_node_and_releases_on_end() {
		let mut state = small_state();
		let a = state.node_index_by_id("a").unwrap();
		let b = state.node_index_by_id("b").unwrap();

		state.begin_drag(a, 10.0, 10.0);
		assert!(state.is_pinned(a));
		assert!(!state.is_pinned(b));

		state.drag_to(40.0, 25.0);
		assert!(state.is_pinned(a));

		state.end_drag();
		assert!(!state.is_pinned(a));
		assert!(state.drag.node_idx.is_none());
	}

	#[test]
	fn drag_moves_pin_by_pointer_delta_in_world_units() {
		let mut state = small_state();
		let a = state.node_index_by_id("a").unwrap();

		state.begin_drag(a, 100.0, 100.0);
		let (sx, sy) = (state.drag.node_start_x, state.drag.node_start_y);
		state.drag_to(130.0, 80.0);

		let mut moved = (0.0f32, 0.0f32);
		state.graph.visit_nodes(|node| {
			if node.index() == a {
				moved = (node.x(), node.y());
			}
		});
		assert_eq!(moved, (sx + 30.0, sy - 20.0));
	}

	#[test]
	fn settled_simulation_reheats_on_drag_and_cools_after() {
		let mut state = small_state();
		for _ in 0..1000 {
			state.tick(0.016);
		}
		assert!(state.is_settled());

		let a = state.node_index_by_id("a").unwrap();
		state.begin_drag(a, 0.0, 0.0);
		assert!(!state.is_settled());
		state.tick(0.016);
		assert!(!state.is_settled());

		state.end_drag();
		for _ in 0..1000 {
			state.tick(0.016);
		}
		assert!(state.is_settled());
	}

	#[test]
	fn node_hit_testing_respects_transform() {
		let mut state = small_state();
		let a = state.node_index_by_id("a").unwrap();
		let mut pos = (0.0f64, 0.0f64);
		state.graph.visit_nodes(|node| {
			if node.index() == a {
				pos = (node.x() as f64, node.y() as f64);
			}
		});

		assert_eq!(state.node_at_position(pos.0, pos.1), Some(a));
		assert_eq!(state.node_at_position(pos.0 + 500.0, pos.1), None);

		// Pan by 50px: the node now sits 50px later in screen space.
		state.transform.x = 50.0;
		assert_eq!(state.node_at_position(pos.0 + 50.0, pos.1), Some(a));
	}

	#[test]
	fn edge_hit_testing_finds_the_segment_midpoint() {
		let state = small_state();
		let a = state.node_index_by_id("a").unwrap();
		let b = state.node_index_by_id("b").unwrap();
		let (mut pa, mut pb) = ((0.0, 0.0), (0.0, 0.0));
		state.graph.visit_nodes(|node| {
			if node.index() == a {
				pa = (node.x() as f64, node.y() as f64);
			} else if node.index() == b {
				pb = (node.x() as f64, node.y() as f64);
			}
		});

		let mid = ((pa.0 + pb.0) / 2.0, (pa.1 + pb.1) / 2.0);
		let hit = state.edge_at_position(mid.0, mid.1).unwrap();
		assert_eq!(hit.relation.id, "r");
		assert_eq!(hit.source_label, "A");
		assert_eq!(hit.target_label, "B");
	}
}
