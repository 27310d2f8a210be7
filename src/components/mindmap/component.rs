use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;
use log::debug;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent, WheelEvent};

use super::render::{self, Frame};
use super::state::MindmapState;
use super::types::{CanvasSize, NodeId, PanOffset};

const MIN_ZOOM: f64 = 0.1;
const MAX_ZOOM: f64 = 10.0;
/// Size change per wheel notch while shift is held.
const RESIZE_STEP: f64 = 10.0;

#[derive(Clone, Debug, Default)]
struct DragState {
	node: Option<NodeId>,
	start_x: f64,
	start_y: f64,
	node_start_x: f64,
	node_start_y: f64,
}

#[derive(Clone, Debug, Default)]
struct PanState {
	active: bool,
	start_x: f64,
	start_y: f64,
	offset_start: PanOffset,
}

#[derive(Default)]
struct Interaction {
	drag: DragState,
	pan: PanState,
	frame: Frame,
}

/// Inner size of the browser window, if there is one.
pub fn viewport_size() -> Option<CanvasSize> {
	let window = web_sys::window()?;
	Some(CanvasSize {
		width: window.inner_width().ok()?.as_f64()?,
		height: window.inner_height().ok()?.as_f64()?,
	})
}

fn pointer_position(
	canvas_ref: NodeRef<leptos::html::Canvas>,
	ev: &MouseEvent,
) -> Option<(f64, f64)> {
	let canvas: HtmlCanvasElement = canvas_ref.get()?.into();
	let rect = canvas.get_bounding_client_rect();
	Some((
		ev.client_x() as f64 - rect.left(),
		ev.client_y() as f64 - rect.top(),
	))
}

/// Canvas view of a [`MindmapState`]: drag nodes, pan, zoom, resize with
/// shift+wheel, double click to edit, and click pairs to connect while
/// `connect_mode` is on.
#[component]
pub fn MindmapCanvas(
	/// State shared with the toolbar.
	state: MindmapState,
	/// Whether clicks pair nodes into connections instead of dragging.
	#[prop(into)]
	connect_mode: Signal<bool>,
	/// Fill the window and follow its resizes.
	#[prop(default = false)]
	fullscreen: bool,
	/// Fixed width; defaults to the parent element's width.
	#[prop(default = None)]
	width: Option<f64>,
	/// Fixed height; defaults to the parent element's height.
	#[prop(default = None)]
	height: Option<f64>,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let interaction: Rc<RefCell<Interaction>> = Rc::default();
	let animate: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
	let resize_cb: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
	let (interaction_init, animate_init, resize_cb_init) =
		(interaction.clone(), animate.clone(), resize_cb.clone());

	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let Some(window) = web_sys::window() else {
			return;
		};

		let size = if fullscreen {
			viewport_size().unwrap_or_default()
		} else {
			let parent = canvas.parent_element();
			CanvasSize {
				width: width.unwrap_or_else(|| {
					parent.as_ref().map(|p| p.client_width() as f64).unwrap_or(800.0)
				}),
				height: height.unwrap_or_else(|| {
					parent.as_ref().map(|p| p.client_height() as f64).unwrap_or(600.0)
				}),
			}
		};
		canvas.set_width(size.width as u32);
		canvas.set_height(size.height as u32);

		let Some(ctx) = canvas
			.get_context("2d")
			.ok()
			.flatten()
			.and_then(|ctx| ctx.dyn_into::<CanvasRenderingContext2d>().ok())
		else {
			return;
		};
		{
			let mut i = interaction_init.borrow_mut();
			i.frame.width = size.width;
			i.frame.height = size.height;
		}

		if fullscreen {
			let (interaction_resize, canvas_resize) = (interaction_init.clone(), canvas.clone());
			*resize_cb_init.borrow_mut() = Some(Closure::new(move || {
				let Some(size) = viewport_size() else {
					return;
				};
				canvas_resize.set_width(size.width as u32);
				canvas_resize.set_height(size.height as u32);
				let mut i = interaction_resize.borrow_mut();
				i.frame.width = size.width;
				i.frame.height = size.height;
			}));
			if let Some(ref cb) = *resize_cb_init.borrow() {
				let _ =
					window.add_event_listener_with_callback("resize", cb.as_ref().unchecked_ref());
			}
		}

		let (interaction_anim, animate_inner) = (interaction_init.clone(), animate_init.clone());
		*animate_init.borrow_mut() = Some(Closure::new(move || {
			{
				let mut i = interaction_anim.borrow_mut();
				if state.animation_enabled.get_untracked() {
					i.frame.flow_time += 0.016;
				}
				if !connect_mode.get_untracked() {
					i.frame.connect_from = None;
				}
				render::render(&state, &ctx, &i.frame);
			}
			if let (Some(cb), Some(win)) = (animate_inner.borrow().as_ref(), web_sys::window()) {
				let _ = win.request_animation_frame(cb.as_ref().unchecked_ref());
			}
		}));
		if let Some(ref cb) = *animate_init.borrow() {
			let _ = window.request_animation_frame(cb.as_ref().unchecked_ref());
		}
	});

	let interaction_md = interaction.clone();
	let on_mousedown = move |ev: MouseEvent| {
		let Some((x, y)) = pointer_position(canvas_ref, &ev) else {
			return;
		};
		let hit = untrack(|| state.node_at_position(x, y));
		let mut i = interaction_md.borrow_mut();

		if connect_mode.get_untracked() {
			match (i.frame.connect_from, hit) {
				(None, Some(id)) => i.frame.connect_from = Some(id),
				(Some(from), Some(to)) if from != to => {
					state.toggle_connection(from, to);
					i.frame.connect_from = None;
				}
				_ => i.frame.connect_from = None,
			}
			return;
		}

		if let Some(node) = hit.and_then(|id| untrack(|| state.node(id))) {
			i.drag = DragState {
				node: Some(node.id),
				start_x: x,
				start_y: y,
				node_start_x: node.x,
				node_start_y: node.y,
			};
			state.dragged_node_id.set(Some(node.id));
		} else {
			i.pan = PanState {
				active: true,
				start_x: x,
				start_y: y,
				offset_start: state.pan_offset.get_untracked(),
			};
		}
	};

	let interaction_mm = interaction.clone();
	let on_mousemove = move |ev: MouseEvent| {
		let Some((x, y)) = pointer_position(canvas_ref, &ev) else {
			return;
		};
		let i = interaction_mm.borrow();
		if let Some(id) = i.drag.node {
			let k = state.zoom_level.get_untracked();
			let (dx, dy) = ((x - i.drag.start_x) / k, (y - i.drag.start_y) / k);
			state.update_node_position(id, i.drag.node_start_x + dx, i.drag.node_start_y + dy);
		} else if i.pan.active {
			state.pan_offset.set(PanOffset {
				x: i.pan.offset_start.x + (x - i.pan.start_x),
				y: i.pan.offset_start.y + (y - i.pan.start_y),
			});
		}
	};

	let interaction_mu = interaction.clone();
	let end_gesture = move || {
		let mut i = interaction_mu.borrow_mut();
		if i.drag.node.take().is_some() {
			state.dragged_node_id.set(None);
		}
		i.pan.active = false;
	};
	let end_on_leave = end_gesture.clone();

	let on_dblclick = move |ev: MouseEvent| {
		let Some((x, y)) = pointer_position(canvas_ref, &ev) else {
			return;
		};
		let hit = untrack(|| state.node_at_position(x, y));
		debug!("editing node {:?}", hit);
		state.editing_node_id.set(hit);
	};

	let on_wheel = move |ev: WheelEvent| {
		ev.prevent_default();
		let Some((x, y)) = pointer_position(canvas_ref, &ev) else {
			return;
		};
		let grow = ev.delta_y() < 0.0;

		if ev.shift_key() {
			let hit = untrack(|| state.node_at_position(x, y).and_then(|id| state.node(id)));
			if let Some(node) = hit {
				let step = if grow { RESIZE_STEP } else { -RESIZE_STEP };
				state.update_node_size(node.id, node.size + step);
			}
			return;
		}

		let (pan, k) = (state.pan_offset.get_untracked(), state.zoom_level.get_untracked());
		let new_k = (k * if grow { 1.1 } else { 0.9 }).clamp(MIN_ZOOM, MAX_ZOOM);
		let ratio = new_k / k;
		state.pan_offset.set(PanOffset {
			x: x - (x - pan.x) * ratio,
			y: y - (y - pan.y) * ratio,
		});
		state.zoom_level.set(new_k);
	};

	view! {
		<canvas
			node_ref=canvas_ref
			class="mindmap-canvas"
			on:mousedown=on_mousedown
			on:mousemove=on_mousemove
			on:mouseup=move |_: MouseEvent| end_gesture()
			on:mouseleave=move |_: MouseEvent| end_on_leave()
			on:dblclick=on_dblclick
			on:wheel=on_wheel
			style="display: block; cursor: grab;"
		/>
	}
}
