use std::collections::HashMap;
use std::f64::consts::PI;

use leptos::prelude::*;
use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

use super::state::MindmapState;
use super::types::{Background, DesignStyle, NodeId, ThemedNode};

/// Per-frame inputs that live outside the mindmap state.
#[derive(Clone, Debug, Default)]
pub struct Frame {
	pub width: f64,
	pub height: f64,
	/// Seconds of connection flow animation so far.
	pub flow_time: f64,
	/// First node picked in connect mode.
	pub connect_from: Option<NodeId>,
}

/// Stroke colors and widths for one design style.
struct Ink {
	edge: &'static str,
	outline: &'static str,
	outline_width: f64,
	label: &'static str,
}

fn ink(style: DesignStyle) -> Ink {
	match style {
		DesignStyle::Brutalist => Ink {
			edge: "rgba(0, 0, 0, 0.85)",
			outline: "#000000",
			outline_width: 4.0,
			label: "#000000",
		},
		DesignStyle::Modern => Ink {
			edge: "rgba(255, 255, 255, 0.7)",
			outline: "rgba(255, 255, 255, 0.9)",
			outline_width: 2.0,
			label: "#1a1a2e",
		},
		DesignStyle::Vintage => Ink {
			edge: "rgba(90, 74, 58, 0.7)",
			outline: "#5a4a3a",
			outline_width: 2.5,
			label: "#2e2419",
		},
	}
}

/// Paint one frame. Runs outside any reactive scope, so every read is untracked.
pub fn render(state: &MindmapState, ctx: &CanvasRenderingContext2d, frame: &Frame) {
	let (background, nodes) = untrack(|| (state.current_background(), state.themed_nodes()));
	paint_background(&background, ctx, frame.width, frame.height);

	let (pan, k) = (state.pan_offset.get_untracked(), state.zoom_level.get_untracked());
	let ink = ink(state.design_style.get_untracked());
	let animate = state.animation_enabled.get_untracked();

	ctx.save();
	let _ = ctx.translate(pan.x, pan.y);
	let _ = ctx.scale(k, k);
	draw_connections(&nodes, ctx, &ink, if animate { frame.flow_time } else { 0.0 });
	draw_nodes(state, &nodes, ctx, &ink, frame);
	ctx.restore();
}

fn paint_background(background: &Background, ctx: &CanvasRenderingContext2d, w: f64, h: f64) {
	match background {
		Background::Solid(color) => ctx.set_fill_style_str(color),
		Background::LinearGradient { angle_deg, from, to } => {
			// CSS angles start at "to top" and turn clockwise
			let angle = angle_deg.to_radians();
			let (dx, dy) = (angle.sin(), -angle.cos());
			let half = (w * dx.abs() + h * dy.abs()) / 2.0;
			let (cx, cy) = (w / 2.0, h / 2.0);
			let gradient = ctx.create_linear_gradient(
				cx - dx * half,
				cy - dy * half,
				cx + dx * half,
				cy + dy * half,
			);
			let _ = gradient.add_color_stop((from.offset / 100.0) as f32, from.color);
			let _ = gradient.add_color_stop((to.offset / 100.0) as f32, to.color);
			#[allow(deprecated)]
			ctx.set_fill_style(&gradient);
		}
	}
	ctx.fill_rect(0.0, 0.0, w, h);
}

fn draw_connections(nodes: &[ThemedNode], ctx: &CanvasRenderingContext2d, ink: &Ink, flow: f64) {
	let by_id: HashMap<NodeId, &ThemedNode> = nodes.iter().map(|t| (t.node.id, t)).collect();
	let (dash, gap, arrow_size) = (10.0, 6.0, 12.0);

	ctx.set_stroke_style_str(ink.edge);
	ctx.set_fill_style_str(ink.edge);
	ctx.set_line_width(ink.outline_width.max(2.0));

	for source in nodes.iter().map(|t| &t.node) {
		for target in source.connections.iter().filter_map(|id| by_id.get(id)) {
			let target = &target.node;
			let (dx, dy) = (target.x - source.x, target.y - source.y);
			let dist = (dx * dx + dy * dy).sqrt();
			let (r1, r2) = (source.size / 2.0, target.size / 2.0);
			if dist <= r1 + r2 {
				continue;
			}

			let (ux, uy) = (dx / dist, dy / dist);
			let _ = ctx.set_line_dash(&js_sys::Array::of2(
				&JsValue::from_f64(dash),
				&JsValue::from_f64(gap),
			));
			ctx.set_line_dash_offset(-(flow * 30.0) % (dash + gap));
			ctx.begin_path();
			ctx.move_to(source.x + ux * r1, source.y + uy * r1);
			ctx.line_to(
				target.x - ux * (r2 + arrow_size),
				target.y - uy * (r2 + arrow_size),
			);
			ctx.stroke();

			let _ = ctx.set_line_dash(&js_sys::Array::new());
			let (tip_x, tip_y) = (target.x - ux * r2, target.y - uy * r2);
			let (back_x, back_y) = (tip_x - ux * arrow_size, tip_y - uy * arrow_size);
			let (px, py) = (-uy * arrow_size * 0.5, ux * arrow_size * 0.5);
			ctx.begin_path();
			ctx.move_to(tip_x, tip_y);
			ctx.line_to(back_x + px, back_y + py);
			ctx.line_to(back_x - px, back_y - py);
			ctx.close_path();
			ctx.fill();
		}
	}
	let _ = ctx.set_line_dash(&js_sys::Array::new());
}

fn draw_nodes(
	state: &MindmapState,
	nodes: &[ThemedNode],
	ctx: &CanvasRenderingContext2d,
	ink: &Ink,
	frame: &Frame,
) {
	let (editing, dragged, show_ids) = (
		state.editing_node_id.get_untracked(),
		state.dragged_node_id.get_untracked(),
		state.show_ids.get_untracked(),
	);

	for ThemedNode { node, color } in nodes {
		let radius = node.size / 2.0;
		let picked = Some(node.id) == editing || Some(node.id) == frame.connect_from;

		if picked || Some(node.id) == dragged {
			ctx.begin_path();
			let _ = ctx.arc(node.x, node.y, radius + 8.0, 0.0, 2.0 * PI);
			ctx.set_fill_style_str("rgba(255, 255, 255, 0.35)");
			ctx.fill();
		}

		ctx.begin_path();
		let _ = ctx.arc(node.x, node.y, radius, 0.0, 2.0 * PI);
		ctx.set_fill_style_str(color);
		ctx.fill();
		ctx.set_stroke_style_str(ink.outline);
		ctx.set_line_width(if picked {
			ink.outline_width * 1.75
		} else {
			ink.outline_width
		});
		ctx.stroke();

		let font_px = (node.size / 7.0).clamp(10.0, 28.0);
		ctx.set_text_align("center");
		ctx.set_text_baseline("middle");
		ctx.set_fill_style_str(ink.label);
		ctx.set_font(&format!("bold {}px sans-serif", font_px));
		let _ = ctx.fill_text_with_max_width(&node.text, node.x, node.y, node.size * 0.85);

		if show_ids {
			ctx.set_font(&format!("{}px monospace", (font_px * 0.7).max(9.0)));
			let _ = ctx.fill_text(&format!("#{}", node.id), node.x, node.y - radius - 10.0);
		}
	}
}
