use std::collections::HashSet;

use leptos::prelude::*;
use log::debug;

use super::theme::{self, Theme};
use super::types::{
	Background, CanvasSize, DEFAULT_NODE_SIZE, DesignStyle, Node, NodeId, PanOffset, ThemedNode,
	clamp_size,
};

/// Startup configuration for a [`MindmapState`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MindmapConfig {
	/// Canvas the seed layout is centered in.
	pub canvas: CanvasSize,
	/// Initial theme key; unknown keys fall back to the default theme.
	pub theme: &'static str,
	/// Initial design style.
	pub design_style: DesignStyle,
}

impl Default for MindmapConfig {
	fn default() -> Self {
		Self {
			canvas: CanvasSize::default(),
			theme: theme::DEFAULT_THEME,
			design_style: DesignStyle::default(),
		}
	}
}

/// The eight starter nodes, laid out around `center`.
pub fn seed_nodes(center: (f64, f64)) -> Vec<Node> {
	let (cx, cy) = center;
	let seed = |id: NodeId,
	            text: &str,
	            dx: f64,
	            dy: f64,
	            size: f64,
	            color_index: usize,
	            connections: &[NodeId]| Node {
		id,
		text: text.to_string(),
		x: cx + dx,
		y: cy + dy,
		size,
		color_index,
		connections: connections.to_vec(),
	};
	vec![
		seed(1, "Main Idea", 0.0, 0.0, 120.0, 0, &[2, 3, 4]),
		seed(2, "Concept A", -250.0, -150.0, 100.0, 1, &[5, 6]),
		seed(3, "Concept B", 250.0, -150.0, 100.0, 2, &[7]),
		seed(4, "Concept C", 0.0, 200.0, 100.0, 3, &[8]),
		seed(5, "Detail 1", -400.0, -250.0, 80.0, 4, &[]),
		seed(6, "Detail 2", -400.0, -50.0, 80.0, 5, &[]),
		seed(7, "Detail 3", 400.0, -250.0, 80.0, 6, &[]),
		seed(8, "Detail 4", 150.0, 350.0, 80.0, 7, &[]),
	]
}

/// Id for a new node: one past the largest id, or 1 on an empty list.
///
/// When the largest id is `NodeId::MAX` the smallest unused id is taken
/// instead. `None` only when every id is in use.
fn next_id(nodes: &[Node]) -> Option<NodeId> {
	let Some(max) = nodes.iter().map(|n| n.id).max() else {
		return Some(1);
	};
	max.checked_add(1).or_else(|| {
		let used: HashSet<NodeId> = nodes.iter().map(|n| n.id).collect();
		(1..=NodeId::MAX).find(|id| !used.contains(id))
	})
}

/// Editor state for one mindmap session.
///
/// `nodes` is the source of truth for the graph. The session signals hold
/// UI flags with no invariants tying them to `nodes`: an editing or dragged
/// id may point at a node that no longer exists, and callers clear them.
/// `themed_nodes` and `current_background` are memos and never written.
///
/// Every field is an arena handle, so the state is `Copy` and lives as long
/// as the reactive owner it was created under.
#[derive(Clone, Copy)]
pub struct MindmapState {
	config: MindmapConfig,
	nodes: RwSignal<Vec<Node>>,
	original_positions: StoredValue<Vec<(f64, f64)>>,

	/// Whether connection dashes flow.
	pub animation_enabled: RwSignal<bool>,
	/// Node open in the editor.
	pub editing_node_id: RwSignal<Option<NodeId>>,
	/// Node under an active drag.
	pub dragged_node_id: RwSignal<Option<NodeId>>,
	/// Active theme. Write it through [`MindmapState::set_theme`].
	pub current_theme: RwSignal<&'static Theme>,
	/// Whether `#id` labels are drawn.
	pub show_ids: RwSignal<bool>,
	/// Canvas scale factor.
	pub zoom_level: RwSignal<f64>,
	/// Canvas translation in screen pixels.
	pub pan_offset: RwSignal<PanOffset>,
	/// Active design style.
	pub design_style: RwSignal<DesignStyle>,

	themed_nodes: Memo<Vec<ThemedNode>>,
	current_background: Memo<Background>,
}

impl MindmapState {
	/// Seed the starter layout around the configured canvas center.
	pub fn new(config: MindmapConfig) -> Self {
		Self::from_nodes(config, seed_nodes(config.canvas.center()))
	}

	/// Start from an explicit node list instead of the starter layout.
	///
	/// Positions are snapshotted here for [`MindmapState::reset_positions`].
	pub fn from_nodes(config: MindmapConfig, nodes: Vec<Node>) -> Self {
		let original_positions = StoredValue::new(nodes.iter().map(|n| (n.x, n.y)).collect());
		let nodes = RwSignal::new(nodes);
		let current_theme =
			RwSignal::new(theme::lookup(config.theme).unwrap_or_else(theme::default_theme));
		let design_style = RwSignal::new(config.design_style);

		let themed_nodes = Memo::new(move |_| {
			let (theme, style) = (current_theme.get(), design_style.get());
			nodes.with(|list| theme::themed_nodes(list, theme, style))
		});
		let current_background =
			Memo::new(move |_| theme::current_background(current_theme.get(), design_style.get()));

		Self {
			config,
			nodes,
			original_positions,
			animation_enabled: RwSignal::new(true),
			editing_node_id: RwSignal::new(None),
			dragged_node_id: RwSignal::new(None),
			current_theme,
			show_ids: RwSignal::new(true),
			zoom_level: RwSignal::new(1.0),
			pan_offset: RwSignal::new(PanOffset::default()),
			design_style,
			themed_nodes,
			current_background,
		}
	}

	// Queries. All reads are tracked, so they subscribe the calling
	// effect or memo to the node list.

	/// Configuration the state was built from.
	pub fn config(&self) -> &MindmapConfig {
		&self.config
	}

	/// Snapshot of the node list.
	pub fn nodes(&self) -> Vec<Node> {
		self.nodes.get()
	}

	/// Copy of the node with `id`.
	pub fn node(&self, id: NodeId) -> Option<Node> {
		self.nodes
			.with(|nodes| nodes.iter().find(|n| n.id == id).cloned())
	}

	/// Number of nodes.
	pub fn len(&self) -> usize {
		self.nodes.with(Vec::len)
	}

	/// Whether the node list is empty.
	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}

	/// Nodes with their resolved display color, in store order.
	pub fn themed_nodes(&self) -> Vec<ThemedNode> {
		self.themed_nodes.get()
	}

	/// Background for the active theme and design style.
	pub fn current_background(&self) -> Background {
		self.current_background.get()
	}

	/// Key of the active theme.
	pub fn current_theme_key(&self) -> &'static str {
		self.current_theme.get().key
	}

	/// Convert a canvas-element point into mindmap coordinates.
	pub fn screen_to_canvas(&self, sx: f64, sy: f64) -> (f64, f64) {
		let (pan, zoom) = (self.pan_offset.get(), self.zoom_level.get());
		((sx - pan.x) / zoom, (sy - pan.y) / zoom)
	}

	/// Topmost node under a canvas-element point. Later nodes draw on top.
	pub fn node_at_position(&self, sx: f64, sy: f64) -> Option<NodeId> {
		let (x, y) = self.screen_to_canvas(sx, sy);
		self.nodes.with(|nodes| {
			nodes
				.iter()
				.rev()
				.find(|n| {
					let (dx, dy) = (n.x - x, n.y - y);
					(dx * dx + dy * dy).sqrt() <= n.size / 2.0
				})
				.map(|n| n.id)
		})
	}

	// Mutations. Each one is a single write to the node list.

	/// Apply `f` to the node with `id`, copying every other node through.
	fn update_node(&self, id: NodeId, f: impl Fn(&Node) -> Node) {
		self.nodes.update(|nodes| {
			*nodes = nodes
				.iter()
				.map(|n| if n.id == id { f(n) } else { n.clone() })
				.collect();
		});
	}

	/// Move every node back to its seeded position.
	///
	/// Positions are restored by index, not by id. Once nodes have been added
	/// or deleted the snapshot no longer lines up with the list. Nodes past
	/// the end of the snapshot keep their current position, so the reset is
	/// total for any list length; this deliberately departs from the first
	/// version of the editor, which failed on such nodes.
	pub fn reset_positions(&self) {
		let originals = self.original_positions.get_value();
		debug!("resetting {} node positions", originals.len());
		self.nodes.update(|nodes| {
			*nodes = nodes
				.iter()
				.enumerate()
				.map(|(index, n)| match originals.get(index) {
					Some(&(x, y)) => n.with_position(x, y),
					None => n.clone(),
				})
				.collect();
		});
	}

	/// Move a node.
	pub fn update_node_position(&self, id: NodeId, x: f64, y: f64) {
		self.update_node(id, |n| n.with_position(x, y));
	}

	/// Relabel a node.
	pub fn update_node_text(&self, id: NodeId, text: &str) {
		debug!("node {id}: text -> {text:?}");
		self.update_node(id, |n| n.with_text(text));
	}

	/// Set a node's size, clamped to `[MIN_NODE_SIZE, MAX_NODE_SIZE]`.
	pub fn update_node_size(&self, id: NodeId, size: f64) {
		self.update_node(id, |n| n.with_size(size));
	}

	/// Set a node's color index. Any index is accepted; lookup wraps.
	pub fn update_node_color(&self, id: NodeId, color_index: usize) {
		debug!("node {id}: color index -> {color_index}");
		self.update_node(id, |n| n.with_color(color_index));
	}

	/// Relabel and recolor a node in one write.
	pub fn update_node_text_and_color(&self, id: NodeId, text: &str, color_index: usize) {
		self.update_node(id, |n| n.with_text(text).with_color(color_index));
	}

	/// Replace text, color index and connections in one write.
	pub fn update_node_full(
		&self,
		id: NodeId,
		text: &str,
		color_index: usize,
		connections: Vec<NodeId>,
	) {
		self.update_node(id, |n| {
			n.with_text(text)
				.with_color(color_index)
				.with_connections(connections.clone())
		});
	}

	/// Append a node with the default size and no connections.
	pub fn add_node(&self, text: &str, x: f64, y: f64) -> Option<NodeId> {
		self.add_node_with(text, x, y, DEFAULT_NODE_SIZE, Vec::new())
	}

	/// Append a node and return its id: one past the largest id in the store,
	/// or 1 when the store is empty. Its color index is `id % 8`.
	///
	/// If the largest id is `NodeId::MAX` the smallest unused id is used
	/// instead. Returns `None` without touching the store only when every id
	/// is taken.
	pub fn add_node_with(
		&self,
		text: &str,
		x: f64,
		y: f64,
		size: f64,
		connections: Vec<NodeId>,
	) -> Option<NodeId> {
		let Some(id) = self.nodes.with_untracked(|nodes| next_id(nodes)) else {
			debug!("no free node id left, not adding {text:?}");
			return None;
		};
		let node = Node {
			id,
			text: text.to_string(),
			x,
			y,
			size: clamp_size(size),
			color_index: id as usize % theme::PALETTE_LEN,
			connections,
		};
		debug!("adding node {id} {text:?} at ({x}, {y})");
		self.nodes.update(|nodes| nodes.push(node));
		Some(id)
	}

	/// Remove the node with `id` and every edge pointing at it.
	///
	/// The pruning pass runs even when no node had that id.
	pub fn delete_node(&self, id: NodeId) {
		debug!("deleting node {id}");
		self.nodes.update(|nodes| {
			*nodes = nodes
				.iter()
				.filter(|n| n.id != id)
				.map(|n| n.without_connection(id))
				.collect();
		});
	}

	/// Add the edge `from -> to` if absent, remove it if present.
	/// `to` is not checked against the store.
	pub fn toggle_connection(&self, from: NodeId, to: NodeId) {
		debug!("toggling connection {from} -> {to}");
		self.update_node(from, |n| n.with_connection_toggled(to));
	}

	/// Switch to the theme with key `name`. Unknown keys are ignored.
	pub fn set_theme(&self, name: &str) -> bool {
		match theme::lookup(name) {
			Some(theme) => {
				self.current_theme.set(theme);
				true
			}
			None => {
				debug!("ignoring unknown theme {name:?}");
				false
			}
		}
	}

	/// Set the design style by name. Unknown names are ignored.
	pub fn set_design_style_by_name(&self, name: &str) -> bool {
		match DesignStyle::from_name(name) {
			Some(style) => {
				self.design_style.set(style);
				true
			}
			None => {
				debug!("ignoring unknown design style {name:?}");
				false
			}
		}
	}
}

#[cfg(test)]
mod tests {
	use std::sync::Arc;
	use std::sync::atomic::{AtomicUsize, Ordering};

	use super::*;
	use crate::components::mindmap::types::{MAX_NODE_SIZE, MIN_NODE_SIZE};

	fn owner() -> Owner {
		let owner = Owner::new();
		owner.set();
		owner
	}

	fn seeded() -> MindmapState {
		MindmapState::new(MindmapConfig::default())
	}

	fn ids(state: &MindmapState) -> Vec<NodeId> {
		untrack(|| state.nodes()).iter().map(|n| n.id).collect()
	}

	#[test]
	fn seeds_eight_nodes_around_the_canvas_center() {
		let _owner = owner();
		let state = MindmapState::new(MindmapConfig {
			canvas: CanvasSize {
				width: 1000.0,
				height: 600.0,
			},
			..Default::default()
		});

		assert_eq!(ids(&state), (1..=8).collect::<Vec<_>>());
		let main = state.node(1).unwrap();
		assert_eq!((main.x, main.y, main.size), (500.0, 300.0, 120.0));
		assert_eq!(main.connections, vec![2, 3, 4]);
		let detail = state.node(8).unwrap();
		assert_eq!((detail.x, detail.y), (650.0, 650.0));
	}

	#[test]
	fn session_defaults() {
		let _owner = owner();
		let state = seeded();
		assert!(state.animation_enabled.get_untracked());
		assert!(state.show_ids.get_untracked());
		assert_eq!(state.editing_node_id.get_untracked(), None);
		assert_eq!(state.dragged_node_id.get_untracked(), None);
		assert_eq!(state.zoom_level.get_untracked(), 1.0);
		assert_eq!(state.pan_offset.get_untracked(), PanOffset::default());
		assert_eq!(state.current_theme.get_untracked().key, "purple");
		assert_eq!(state.design_style.get_untracked(), DesignStyle::Brutalist);
	}

	#[test]
	fn unknown_configured_theme_falls_back_to_default() {
		let _owner = owner();
		let state = MindmapState::new(MindmapConfig {
			theme: "teal",
			..Default::default()
		});
		assert_eq!(untrack(|| state.current_theme_key()), theme::DEFAULT_THEME);
	}

	#[test]
	fn size_updates_are_clamped() {
		let _owner = owner();
		let state = seeded();
		for size in [-100.0, 0.0, 39.9, 40.0, 123.0, 300.0, 300.1, 1e12] {
			state.update_node_size(2, size);
			let got = state.node(2).unwrap().size;
			assert!((MIN_NODE_SIZE..=MAX_NODE_SIZE).contains(&got), "{size} -> {got}");
		}
		state.update_node_size(2, 123.0);
		assert_eq!(state.node(2).unwrap().size, 123.0);
	}

	#[test]
	fn updates_to_missing_ids_are_noops() {
		let _owner = owner();
		let state = seeded();
		let before = state.nodes();

		state.update_node_position(99, 1.0, 1.0);
		state.update_node_text(99, "x");
		state.update_node_size(99, 50.0);
		state.update_node_color(99, 3);
		state.update_node_text_and_color(99, "x", 3);
		state.update_node_full(99, "x", 3, vec![1]);
		state.toggle_connection(99, 1);

		assert_eq!(state.nodes(), before);
	}

	#[test]
	fn field_updates_touch_only_their_node() {
		let _owner = owner();
		let state = seeded();
		state.update_node_position(3, 10.0, 20.0);
		state.update_node_text_and_color(3, "Renamed", 12);
		state.update_node_full(5, "Full", 2, vec![1, 2]);

		let three = state.node(3).unwrap();
		assert_eq!((three.x, three.y), (10.0, 20.0));
		assert_eq!((three.text.as_str(), three.color_index), ("Renamed", 12));
		let five = state.node(5).unwrap();
		assert_eq!(five.text, "Full");
		assert_eq!(five.color_index, 2);
		assert_eq!(five.connections, vec![1, 2]);
		assert_eq!(state.node(4).unwrap().text, "Concept C");
	}

	#[test]
	fn add_node_uses_next_id_and_wrapping_color() {
		let _owner = owner();
		let state = seeded();
		let id = state.add_node("X", 10.0, 20.0).unwrap();

		let node = state.node(id).unwrap();
		assert_eq!(id, 9);
		assert_eq!(node.color_index, 1);
		assert_eq!((node.x, node.y, node.size), (10.0, 20.0, DEFAULT_NODE_SIZE));
		assert!(node.connections.is_empty());
		assert_eq!(state.nodes().last().map(|n| n.id), Some(9));
	}

	#[test]
	fn add_node_after_gap_uses_max_id() {
		let _owner = owner();
		let state = seeded();
		state.delete_node(8);
		assert_eq!(state.add_node("Y", 0.0, 0.0), Some(8));
		state.delete_node(2);
		assert_eq!(state.add_node("Z", 0.0, 0.0), Some(9));
	}

	#[test]
	fn add_node_on_empty_store_starts_at_one() {
		let _owner = owner();
		let state = MindmapState::from_nodes(MindmapConfig::default(), Vec::new());
		assert!(state.is_empty());
		assert_eq!(state.add_node("first", 0.0, 0.0), Some(1));
		assert_eq!(state.node(1).unwrap().color_index, 1);
	}

	#[test]
	fn add_node_past_max_id_reuses_smallest_free_id() {
		let _owner = owner();
		let state = MindmapState::from_nodes(
			MindmapConfig::default(),
			vec![Node::new(NodeId::MAX, "edge", 0.0, 0.0)],
		);

		assert_eq!(state.add_node("next", 0.0, 0.0), Some(1));
		assert_eq!(state.add_node("after", 0.0, 0.0), Some(2));
		assert_eq!(ids(&state), vec![NodeId::MAX, 1, 2]);
		assert_eq!(state.node(2).unwrap().color_index, 2);
	}

	#[test]
	fn next_id_skips_taken_ids_after_overflow() {
		let nodes = vec![
			Node::new(1, "a", 0.0, 0.0),
			Node::new(NodeId::MAX, "b", 0.0, 0.0),
			Node::new(2, "c", 0.0, 0.0),
		];
		assert_eq!(next_id(&nodes), Some(3));
		assert_eq!(next_id(&[]), Some(1));
		assert_eq!(next_id(&nodes[..1]), Some(2));
	}

	#[test]
	fn add_node_with_clamps_size() {
		let _owner = owner();
		let state = seeded();
		let id = state.add_node_with("big", 0.0, 0.0, 900.0, vec![1]).unwrap();
		let node = state.node(id).unwrap();
		assert_eq!(node.size, MAX_NODE_SIZE);
		assert_eq!(node.connections, vec![1]);
	}

	#[test]
	fn delete_prunes_dangling_connections() {
		let _owner = owner();
		let state = seeded();
		state.toggle_connection(6, 3);
		state.delete_node(3);

		assert!(state.node(3).is_none());
		assert_eq!(state.len(), 7);
		for node in state.nodes() {
			assert!(!node.connections.contains(&3), "node {} still points at 3", node.id);
		}
		assert_eq!(state.node(1).unwrap().connections, vec![2, 4]);
	}

	#[test]
	fn delete_of_missing_id_still_prunes() {
		let _owner = owner();
		let state = seeded();
		state.toggle_connection(1, 42);
		state.delete_node(42);

		assert_eq!(state.len(), 8);
		assert_eq!(state.node(1).unwrap().connections, vec![2, 3, 4]);
	}

	#[test]
	fn toggle_connection_is_an_involution() {
		let _owner = owner();
		let state = seeded();
		let before = state.node(2).unwrap().connections;

		state.toggle_connection(2, 8);
		assert_eq!(state.node(2).unwrap().connections, vec![5, 6, 8]);
		state.toggle_connection(2, 8);
		assert_eq!(state.node(2).unwrap().connections, before);

		state.toggle_connection(2, 5);
		state.toggle_connection(2, 5);
		assert_eq!(state.node(2).unwrap().connections.len(), before.len());
	}

	#[test]
	fn reset_restores_seeded_positions() {
		let _owner = owner();
		let state = seeded();
		let original: Vec<_> = state.nodes().iter().map(|n| (n.x, n.y)).collect();
		for id in 1..=8 {
			state.update_node_position(id, id as f64, -(id as f64));
		}

		state.reset_positions();

		let restored: Vec<_> = state.nodes().iter().map(|n| (n.x, n.y)).collect();
		assert_eq!(restored, original);
	}

	#[test]
	fn reset_is_index_based_after_deletes() {
		let _owner = owner();
		let state = seeded();
		let original: Vec<_> = state.nodes().iter().map(|n| (n.x, n.y)).collect();
		state.delete_node(1);
		let extra = state.add_node("extra", 1.0, 2.0).unwrap();

		state.reset_positions();

		// Node 2 now sits at index 0 and takes node 1's seeded spot
		let two = state.node(2).unwrap();
		assert_eq!((two.x, two.y), original[0]);
		let extra = state.node(extra).unwrap();
		assert_eq!((extra.x, extra.y), original[7]);
	}

	#[test]
	fn reset_leaves_nodes_past_the_snapshot_in_place() {
		let _owner = owner();
		let state = seeded();
		let first = state.add_node("ninth", 11.0, 12.0).unwrap();
		let second = state.add_node("tenth", 13.0, 14.0).unwrap();
		state.update_node_position(1, -1.0, -1.0);

		state.reset_positions();

		assert_eq!(state.len(), 10);
		let first = state.node(first).unwrap();
		assert_eq!((first.x, first.y), (11.0, 12.0));
		let second = state.node(second).unwrap();
		assert_eq!((second.x, second.y), (13.0, 14.0));
		assert_ne!(state.node(1).map(|n| n.x), Some(-1.0));
	}

	#[test]
	fn unknown_theme_is_ignored() {
		let _owner = owner();
		let state = seeded();
		assert!(!state.set_theme("blue"));
		assert_eq!(state.current_theme.get_untracked().key, "purple");
		assert!(state.set_theme("red"));
		assert_eq!(state.current_theme.get_untracked().key, "red");
	}

	#[test]
	fn themed_nodes_follow_color_theme_and_style() {
		let _owner = owner();
		let state = seeded();
		state.update_node_color(1, 10);

		let purple = theme::lookup("purple").unwrap();
		let first = &state.themed_nodes()[0];
		assert_eq!(first.node.id, 1);
		assert_eq!(first.color, purple.palette(DesignStyle::Brutalist)[2]);

		state.design_style.set(DesignStyle::Vintage);
		assert_eq!(state.themed_nodes()[0].color, "#8B7389");

		state.set_theme("green");
		assert_eq!(state.themed_nodes()[0].color, "#7A9C6E");
	}

	#[test]
	fn themed_nodes_match_store_length_and_order() {
		let _owner = owner();
		let state = seeded();
		state.add_node("late", 0.0, 0.0);
		state.delete_node(4);

		let themed: Vec<_> = state.themed_nodes().into_iter().map(|t| t.node.id).collect();
		assert_eq!(themed, ids(&state));
	}

	#[test]
	fn themed_nodes_are_copies() {
		let _owner = owner();
		let state = seeded();
		let mut themed = state.themed_nodes();
		themed[0].node.text.push_str(" (edited)");
		assert_eq!(state.node(1).unwrap().text, "Main Idea");
	}

	#[test]
	fn background_tracks_theme_and_style() {
		let _owner = owner();
		let state = seeded();
		assert_eq!(state.current_background(), Background::Solid("#6B46C1"));
		state.design_style.set(DesignStyle::Modern);
		assert_eq!(
			state.current_background().css(),
			"linear-gradient(135deg, #667eea 0%, #764ba2 100%)"
		);
		assert!(state.set_design_style_by_name("vintage"));
		assert!(!state.set_design_style_by_name("gothic"));
		assert_eq!(state.current_background(), Background::Solid("#EBE0F0"));
	}

	#[test]
	fn each_mutation_reruns_node_readers_once() {
		let _owner = owner();
		let state = seeded();
		let runs = Arc::new(AtomicUsize::new(0));
		let counter = Arc::clone(&runs);
		let count = Memo::new(move |_| {
			counter.fetch_add(1, Ordering::Relaxed);
			state.len()
		});

		assert_eq!(count.get_untracked(), 8);
		assert_eq!(count.get_untracked(), 8);
		assert_eq!(runs.load(Ordering::Relaxed), 1);

		state.update_node_position(1, 0.0, 0.0);
		assert_eq!(count.get_untracked(), 8);
		state.add_node("n", 0.0, 0.0);
		assert_eq!(count.get_untracked(), 9);
		state.delete_node(2);
		assert_eq!(count.get_untracked(), 8);
		state.toggle_connection(1, 5);
		assert_eq!(count.get_untracked(), 8);
		state.reset_positions();
		assert_eq!(count.get_untracked(), 8);

		assert_eq!(runs.load(Ordering::Relaxed), 6);
	}

	#[test]
	fn background_readers_ignore_node_changes() {
		let _owner = owner();
		let state = seeded();
		let runs = Arc::new(AtomicUsize::new(0));
		let counter = Arc::clone(&runs);
		let background = Memo::new(move |_| {
			counter.fetch_add(1, Ordering::Relaxed);
			state.current_background()
		});
		assert_eq!(background.get_untracked(), Background::Solid("#6B46C1"));

		state.update_node_text(1, "quiet");
		background.get_untracked();
		assert_eq!(runs.load(Ordering::Relaxed), 1);

		state.set_theme("green");
		background.get_untracked();
		state.design_style.set(DesignStyle::Modern);
		background.get_untracked();
		assert_eq!(runs.load(Ordering::Relaxed), 3);
	}

	#[test]
	fn hit_testing_respects_pan_and_zoom() {
		let _owner = owner();
		let state = MindmapState::from_nodes(
			MindmapConfig::default(),
			vec![Node::new(1, "a", 100.0, 100.0), Node::new(2, "b", 120.0, 100.0)],
		);
		// Overlapping nodes: the later one is on top
		assert_eq!(state.node_at_position(110.0, 100.0), Some(2));
		assert_eq!(state.node_at_position(61.0, 100.0), Some(1));
		assert_eq!(state.node_at_position(500.0, 500.0), None);

		state.zoom_level.set(2.0);
		state.pan_offset.set(PanOffset { x: 10.0, y: 10.0 });
		assert_eq!(state.screen_to_canvas(210.0, 210.0), (100.0, 100.0));
		assert_eq!(state.node_at_position(150.0, 210.0), Some(1));
	}

	#[test]
	fn add_delete_recolor_walkthrough() {
		let _owner = owner();
		let state = seeded();
		assert_eq!(ids(&state), (1..=8).collect::<Vec<_>>());

		let id = state.add_node("X", 10.0, 20.0).unwrap();
		assert_eq!((id, state.node(id).unwrap().color_index), (9, 1));

		state.delete_node(3);
		assert!(state.node(3).is_none());
		assert!(state.nodes().iter().all(|n| !n.connections.contains(&3)));

		state.set_theme("blue");
		assert_eq!(state.current_theme.get_untracked().key, "purple");

		state.update_node_color(1, 10);
		let color = state
			.themed_nodes()
			.into_iter()
			.find(|t| t.node.id == 1)
			.map(|t| t.color);
		assert_eq!(color, Some("#0000FF"));
	}
}
