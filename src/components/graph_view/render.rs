//! Canvas drawing for one simulation step.
//!
//! Reads the current node/edge positions out of the scene state and redraws
//! the whole frame: edges first, then nodes, then labels.

use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

use super::state::GraphViewState;

const BACKGROUND: &str = "#f9f9f9";
const NODE_OUTLINE: &str = "#fff";
const HOVER_OUTLINE: &str = "#333";
const LABEL_COLOR: &str = "#333";
const LABEL_FONT: &str = "12px Arial, sans-serif";
const EDGE_OPACITY: f64 = 0.6;

pub fn render(state: &GraphViewState, ctx: &CanvasRenderingContext2d) {
	ctx.set_fill_style_str(BACKGROUND);
	ctx.fill_rect(0.0, 0.0, state.width, state.height);
	ctx.save();
	let _ = ctx.translate(state.transform.x, state.transform.y);
	let _ = ctx.scale(state.transform.k, state.transform.k);
	draw_edges(state, ctx);
	draw_nodes(state, ctx);
	ctx.restore();
}

fn dash_array(dash: &[f64]) -> js_sys::Array {
	dash.iter().map(|d| JsValue::from_f64(*d)).collect()
}

fn draw_edges(state: &GraphViewState, ctx: &CanvasRenderingContext2d) {
	ctx.set_global_alpha(EDGE_OPACITY);
	state.graph.visit_edges(|n1, n2, edge| {
		let visual = &edge.user_data;
		let (x1, y1, x2, y2) = (n1.x() as f64, n1.y() as f64, n2.x() as f64, n2.y() as f64);
		let (dx, dy) = (x2 - x1, y2 - y1);
		let dist = (dx * dx + dy * dy).sqrt();
		if dist < 0.001 {
			return;
		}
		let (ux, uy) = (dx / dist, dy / dist);
		let source_radius = n1.data.user_data.radius;
		let target_radius = n2.data.user_data.radius;
		let arrow_size = (visual.width * 3.0).max(6.0);

		ctx.set_stroke_style_str(&visual.color);
		ctx.set_line_width(visual.width);
		let _ = ctx.set_line_dash(&dash_array(visual.dash));
		ctx.begin_path();
		ctx.move_to(x1 + ux * source_radius, y1 + uy * source_radius);
		ctx.line_to(
			x2 - ux * (target_radius + arrow_size),
			y2 - uy * (target_radius + arrow_size),
		);
		ctx.stroke();
		let _ = ctx.set_line_dash(&js_sys::Array::new());

		// Arrowhead at the target end, the relation's direction marker.
		let (tip_x, tip_y) = (x2 - ux * target_radius, y2 - uy * target_radius);
		let (back_x, back_y) = (tip_x - ux * arrow_size, tip_y - uy * arrow_size);
		let (px, py) = (-uy * arrow_size * 0.5, ux * arrow_size * 0.5);
		ctx.set_fill_style_str(&visual.color);
		ctx.begin_path();
		ctx.move_to(tip_x, tip_y);
		ctx.line_to(back_x + px, back_y + py);
		ctx.line_to(back_x - px, back_y - py);
		ctx.close_path();
		ctx.fill();
	});
	ctx.set_global_alpha(1.0);
}

fn draw_nodes(state: &GraphViewState, ctx: &CanvasRenderingContext2d) {
	let k = state.transform.k;
	state.graph.visit_nodes(|node| {
		let visual = &node.data.user_data;
		let (x, y) = (node.x() as f64, node.y() as f64);
		let hovered = state.hover == Some(node.index());

		ctx.begin_path();
		let _ = ctx.arc(x, y, visual.radius, 0.0, 2.0 * std::f64::consts::PI);
		ctx.set_fill_style_str(&visual.color);
		ctx.fill();
		if hovered {
			ctx.set_stroke_style_str(HOVER_OUTLINE);
			ctx.set_line_width(2.0 / k);
		} else {
			ctx.set_stroke_style_str(NODE_OUTLINE);
			ctx.set_line_width(1.5 / k);
		}
		ctx.stroke();

		// Label sits just right of the glyph so it never overlaps it.
		ctx.set_fill_style_str(LABEL_COLOR);
		ctx.set_font(LABEL_FONT);
		let _ = ctx.fill_text(&visual.node.label, x + visual.radius + 4.0, y + 4.0);
	});
}
