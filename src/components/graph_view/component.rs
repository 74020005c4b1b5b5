use std::cell::{Cell, RefCell};
use std::rc::Rc;

use leptos::prelude::*;
use leptos_meta::{Style, provide_meta_context};
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent, WheelEvent, Window};

use super::model::KnowledgeGraph;
use super::panel::{NodeDetailsPanel, NodePanel, RelationDetailsPanel, RelationPanel};
use super::pipeline::resolve_scene;
use super::render;
use super::state::{GraphViewState, ViewerOptions};

/// Pointer travel below this many screen pixels counts as a click.
const CLICK_SLOP: f64 = 3.0;

const VIEWER_CSS: &str = "
.graph-view {
	position: relative;
}
.knowledge-graph-canvas {
	display: block;
	border: 1px solid #ddd;
	background-color: #f9f9f9;
	cursor: grab;
}
.details-panel {
	position: absolute;
	top: 20px;
	right: 20px;
	width: 300px;
	background-color: white;
	border: 1px solid #ddd;
	border-radius: 5px;
	box-shadow: 0 2px 4px rgba(0,0,0,0.1);
	z-index: 1000;
	font-family: Arial, sans-serif;
}
.details-header {
	background-color: #f5f5f5;
	padding: 10px;
	border-bottom: 1px solid #ddd;
	position: relative;
}
.details-header h3 {
	margin: 0;
	padding: 0;
	font-size: 16px;
}
.details-type {
	display: inline-block;
	background-color: #eee;
	padding: 2px 5px;
	border-radius: 3px;
	font-size: 12px;
	margin-left: 5px;
}
.details-close {
	position: absolute;
	top: 10px;
	right: 10px;
	background: none;
	border: none;
	font-size: 18px;
	cursor: pointer;
	color: #666;
}
.details-content {
	padding: 10px;
	font-size: 13px;
}
.details-content h4 {
	margin: 10px 0 5px 0;
	font-size: 14px;
}
.details-content ul {
	margin: 0;
	padding: 0 0 0 20px;
}
";

/// Interactive knowledge-graph canvas.
///
/// Re-renders from scratch whenever `graph` or `view_id` changes: the view
/// is resolved, entities are filtered, and a fresh simulation scene replaces
/// the previous one. One animation loop drives simulation steps and frame
/// drawing for the lifetime of the component; it always reads the current
/// scene, so a rebuild never leaves a stale tick subscription behind.
#[component]
pub fn GraphViewCanvas(
	#[prop(into)] graph: Signal<KnowledgeGraph>,
	#[prop(into, default = Signal::stored(None))] view_id: Signal<Option<String>>,
	#[prop(default = ViewerOptions::default())] options: ViewerOptions,
	#[prop(default = false)] fullscreen: bool,
	#[prop(default = None)] width: Option<f64>,
	#[prop(default = None)] height: Option<f64>,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let state: Rc<RefCell<Option<GraphViewState>>> = Rc::new(RefCell::new(None));
	let animate: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
	let resize_cb: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
	let loop_started: Rc<Cell<bool>> = Rc::new(Cell::new(false));
	let moved: Rc<Cell<bool>> = Rc::new(Cell::new(false));

	let node_panel = RwSignal::new(None::<NodePanel>);
	let relation_panel = RwSignal::new(None::<RelationPanel>);

	let (state_init, animate_init, resize_cb_init, loop_started_init) = (
		state.clone(),
		animate.clone(),
		resize_cb.clone(),
		loop_started.clone(),
	);

	Effect::new(move |_| {
		let graph = graph.get();
		let view_id = view_id.get();
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let window: Window = web_sys::window().unwrap();

		let (w, h) = if fullscreen {
			(
				window.inner_width().unwrap().as_f64().unwrap(),
				window.inner_height().unwrap().as_f64().unwrap(),
			)
		} else {
			(
				width.unwrap_or_else(|| {
					canvas
						.parent_element()
						.map(|p| p.client_width() as f64)
						.filter(|cw| *cw > 0.0)
						.unwrap_or(800.0)
				}),
				height.unwrap_or_else(|| {
					canvas
						.parent_element()
						.map(|p| p.client_height() as f64)
						.filter(|ch| *ch > 0.0)
						.unwrap_or(600.0)
				}),
			)
		};
		canvas.set_width(w as u32);
		canvas.set_height(h as u32);

		// Full scene rebuild: the previous simulation and its bindings are
		// discarded wholesale, never diffed.
		let scene = resolve_scene(&graph, view_id.as_deref());
		*state_init.borrow_mut() = Some(GraphViewState::new(&scene, &options, w, h));

		if loop_started_init.get() {
			return;
		}
		loop_started_init.set(true);

		let ctx: CanvasRenderingContext2d = canvas
			.get_context("2d")
			.unwrap()
			.unwrap()
			.dyn_into()
			.unwrap();

		if fullscreen {
			let (state_resize, canvas_resize) = (state_init.clone(), canvas.clone());
			*resize_cb_init.borrow_mut() = Some(Closure::new(move || {
				let win: Window = web_sys::window().unwrap();
				let (nw, nh) = (
					win.inner_width().unwrap().as_f64().unwrap(),
					win.inner_height().unwrap().as_f64().unwrap(),
				);
				canvas_resize.set_width(nw as u32);
				canvas_resize.set_height(nh as u32);
				if let Some(ref mut s) = *state_resize.borrow_mut() {
					s.resize(nw, nh);
				}
			}));
			if let Some(ref cb) = *resize_cb_init.borrow() {
				let _ = window.add_event_listener_with_callback("resize", cb.as_ref().unchecked_ref());
			}
		}

		let (state_anim, animate_inner) = (state_init.clone(), animate_init.clone());
		*animate_init.borrow_mut() = Some(Closure::new(move || {
			if let Some(ref mut s) = *state_anim.borrow_mut() {
				s.tick(0.016);
				render::render(s, &ctx);
			}
			if let Some(ref cb) = *animate_inner.borrow() {
				let _ = web_sys::window()
					.unwrap()
					.request_animation_frame(cb.as_ref().unchecked_ref());
			}
		}));
		if let Some(ref cb) = *animate_init.borrow() {
			let _ = window.request_animation_frame(cb.as_ref().unchecked_ref());
		}
	});

	let pointer_position = move |ev: &MouseEvent| {
		let canvas: HtmlCanvasElement = canvas_ref.get().unwrap().into();
		let rect = canvas.get_bounding_client_rect();
		(
			ev.client_x() as f64 - rect.left(),
			ev.client_y() as f64 - rect.top(),
		)
	};

	let (state_md, moved_md) = (state.clone(), moved.clone());
	let on_mousedown = move |ev: MouseEvent| {
		let (x, y) = pointer_position(&ev);
		moved_md.set(false);

		if let Some(ref mut s) = *state_md.borrow_mut() {
			if let Some(idx) = s.node_at_position(x, y) {
				s.begin_drag(idx, x, y);
			} else {
				s.pan.active = true;
				s.pan.start_x = x;
				s.pan.start_y = y;
				s.pan.transform_start_x = s.transform.x;
				s.pan.transform_start_y = s.transform.y;
			}
		}
	};

	let (state_mm, moved_mm) = (state.clone(), moved.clone());
	let on_mousemove = move |ev: MouseEvent| {
		let (x, y) = pointer_position(&ev);

		if let Some(ref mut s) = *state_mm.borrow_mut() {
			if s.drag.active {
				if (x - s.drag.start_x).hypot(y - s.drag.start_y) > CLICK_SLOP {
					moved_mm.set(true);
				}
				s.drag_to(x, y);
			} else if s.pan.active {
				if (x - s.pan.start_x).hypot(y - s.pan.start_y) > CLICK_SLOP {
					moved_mm.set(true);
				}
				s.transform.x = s.pan.transform_start_x + (x - s.pan.start_x);
				s.transform.y = s.pan.transform_start_y + (y - s.pan.start_y);
			} else {
				let hovered = s.node_at_position(x, y);
				s.set_hover(hovered);
			}
		}
	};

	let (state_mu, moved_mu) = (state.clone(), moved.clone());
	let on_mouseup = move |ev: MouseEvent| {
		let (x, y) = pointer_position(&ev);

		if let Some(ref mut s) = *state_mu.borrow_mut() {
			if s.drag.active {
				let idx = s.drag.node_idx;
				s.end_drag();
				if !moved_mu.get() {
					if let Some(visual) = idx.and_then(|i| s.node_visual(i)) {
						node_panel.set(Some(NodePanel::from_visual(&visual)));
					}
				}
			} else if s.pan.active {
				s.pan.active = false;
				if !moved_mu.get() {
					if let Some(edge) = s.edge_at_position(x, y) {
						relation_panel.set(Some(RelationPanel::from_visual(&edge)));
					}
				}
			}
		}
	};

	let state_ml = state.clone();
	let on_mouseleave = move |_: MouseEvent| {
		if let Some(ref mut s) = *state_ml.borrow_mut() {
			if s.drag.active {
				s.end_drag();
			}
			s.pan.active = false;
			s.set_hover(None);
		}
	};

	let state_wh = state.clone();
	let on_wheel = move |ev: WheelEvent| {
		ev.prevent_default();
		let (x, y) = pointer_position(&ev);

		if let Some(ref mut s) = *state_wh.borrow_mut() {
			let factor = if ev.delta_y() > 0.0 { 0.9 } else { 1.1 };
			let new_k = (s.transform.k * factor).clamp(0.1, 10.0);
			let ratio = new_k / s.transform.k;
			s.transform.x = x - (x - s.transform.x) * ratio;
			s.transform.y = y - (y - s.transform.y) * ratio;
			s.transform.k = new_k;
		}
	};

	view! {
		<Style>{VIEWER_CSS}</Style>
		<div class="graph-view">
			<canvas
				node_ref=canvas_ref
				class="knowledge-graph-canvas"
				on:mousedown=on_mousedown
				on:mousemove=on_mousemove
				on:mouseup=on_mouseup
				on:mouseleave=on_mouseleave
				on:wheel=on_wheel
			/>
			<NodeDetailsPanel panel=node_panel />
			<RelationDetailsPanel panel=relation_panel />
		</div>
	}
}

/// Mount a viewer for `graph` into the container element with the given id.
///
/// Logs and returns without mounting when the container cannot be found;
/// never panics on a missing element.
pub fn mount_graph_view(container_id: &str, graph: KnowledgeGraph, view_id: Option<String>) {
	let Some(document) = web_sys::window().and_then(|w| w.document()) else {
		log::error!("no document available to mount the graph view into");
		return;
	};
	let Some(element) = document.get_element_by_id(container_id) else {
		log::error!("container element with id '{container_id}' not found");
		return;
	};
	let Ok(parent) = element.dyn_into::<web_sys::HtmlElement>() else {
		log::error!("container element '{container_id}' is not an HTML element");
		return;
	};

	let graph = RwSignal::new(graph);
	let view_id = RwSignal::new(view_id);
	leptos::mount::mount_to(parent, move || {
		provide_meta_context();
		view! { <GraphViewCanvas graph=graph view_id=view_id /> }
	})
	.forget();
}
