use leptos::prelude::*;
use log::info;
use web_sys::Event;

use super::state::MindmapState;
use super::theme::{self, PALETTE_LEN};
use super::types::{DesignStyle, NodeId, PanOffset};

/// Theme and style pickers, layout actions, and an editor for the node
/// selected with a double click.
#[component]
pub fn MindmapToolbar(
	/// State shared with the canvas.
	state: MindmapState,
	/// Whether canvas clicks pair nodes into connections.
	connect_mode: RwSignal<bool>,
) -> impl IntoView {
	let draft_text = RwSignal::new(String::new());
	let draft_color = RwSignal::new(0usize);

	// Load the drafts when a different node is opened, not on every edit
	Effect::new(move |previous: Option<Option<NodeId>>| {
		let editing = state.editing_node_id.get();
		if previous != Some(editing) {
			if let Some(node) = editing.and_then(|id| untrack(|| state.node(id))) {
				draft_text.set(node.text);
				draft_color.set(node.color_index);
			}
		}
		editing
	});

	let editing_node = Memo::new(move |_| {
		state
			.editing_node_id
			.get()
			.and_then(|id| state.node(id))
	});

	let on_theme = move |ev: Event| {
		state.set_theme(&event_target_value(&ev));
	};
	let on_style = move |ev: Event| {
		state.set_design_style_by_name(&event_target_value(&ev));
	};

	let on_add = move |_| {
		let (cx, cy) = state.config().canvas.center();
		let (x, y) = untrack(|| state.screen_to_canvas(cx, cy));
		if let Some(id) = state.add_node("New Idea", x, y) {
			state.editing_node_id.set(Some(id));
		}
	};

	let on_delete = move |_| {
		let Some(id) = state.editing_node_id.get_untracked() else {
			return;
		};
		state.delete_node(id);
		state.editing_node_id.set(None);
		if state.dragged_node_id.get_untracked() == Some(id) {
			state.dragged_node_id.set(None);
		}
	};

	let on_reset = move |_| {
		info!("resetting layout");
		state.reset_positions();
		state.zoom_level.set(1.0);
		state.pan_offset.set(PanOffset::default());
	};

	let on_toggle_ids = move |_| state.show_ids.update(|on| *on = !*on);
	let on_toggle_animation = move |_| state.animation_enabled.update(|on| *on = !*on);
	let on_toggle_connect = move |_| connect_mode.update(|on| *on = !*on);

	let on_save = move |_| {
		let Some(id) = state.editing_node_id.get_untracked() else {
			return;
		};
		state.update_node_text_and_color(
			id,
			&draft_text.get_untracked(),
			draft_color.get_untracked(),
		);
		state.editing_node_id.set(None);
	};
	let on_cancel = move |_| state.editing_node_id.set(None);

	let swatches = (0..PALETTE_LEN)
		.map(|index| {
			view! {
				<button
					class="swatch"
					class:selected=move || draft_color.get() == index
					style:background=move || {
						state.current_theme.get().color(state.design_style.get(), index)
					}
					on:click=move |_| draft_color.set(index)
				/>
			}
		})
		.collect_view();

	view! {
		<div class="mindmap-toolbar">
			<select on:change=on_theme prop:value=move || state.current_theme_key().to_string()>
				{theme::all()
					.iter()
					.map(|t| view! { <option value=t.key>{t.name}</option> })
					.collect_view()}
			</select>
			<select on:change=on_style prop:value=move || state.design_style.get().name().to_string()>
				{DesignStyle::ALL
					.into_iter()
					.map(|s| view! { <option value=s.name()>{s.name().to_uppercase()}</option> })
					.collect_view()}
			</select>
			<button on:click=on_add>"Add node"</button>
			<button on:click=on_reset>"Reset layout"</button>
			<button class:active=move || connect_mode.get() on:click=on_toggle_connect>
				"Connect"
			</button>
			<button class:active=move || state.show_ids.get() on:click=on_toggle_ids>
				"IDs"
			</button>
			<button class:active=move || state.animation_enabled.get() on:click=on_toggle_animation>
				"Animate"
			</button>
			<span class="node-count">{move || format!("{} nodes", state.len())}</span>
		</div>
		<div
			class="mindmap-editor"
			style:display=move || if editing_node.with(Option::is_some) { "flex" } else { "none" }
		>
			<span class="node-id">
				{move || editing_node.get().map(|n| format!("#{}", n.id)).unwrap_or_default()}
			</span>
			<input
				type="text"
				prop:value=move || draft_text.get()
				on:input=move |ev| draft_text.set(event_target_value(&ev))
			/>
			<div class="swatches">{swatches}</div>
			<button on:click=on_save>"Save"</button>
			<button on:click=on_delete>"Delete"</button>
			<button on:click=on_cancel>"Close"</button>
		</div>
	}
}
