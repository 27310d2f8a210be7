//! Value types shared by the state layer and the canvas.

/// Identifier of a node, unique within the node store.
pub type NodeId = u32;

/// Smallest diameter a node can be given.
pub const MIN_NODE_SIZE: f64 = 40.0;
/// Largest diameter a node can be given.
pub const MAX_NODE_SIZE: f64 = 300.0;
/// Size used by `add_node` when the caller does not pick one.
pub const DEFAULT_NODE_SIZE: f64 = 80.0;

/// Clamp a requested node size into `[MIN_NODE_SIZE, MAX_NODE_SIZE]`.
pub fn clamp_size(size: f64) -> f64 {
	// NaN falls back to the minimum so the range invariant always holds
	if size.is_nan() {
		return MIN_NODE_SIZE;
	}
	size.clamp(MIN_NODE_SIZE, MAX_NODE_SIZE)
}

/// A positioned, sized, colored, labeled vertex of the mindmap.
///
/// Records are treated as values: the `with_*` helpers return a new record
/// and leave `self` untouched.
#[derive(Clone, Debug, PartialEq)]
pub struct Node {
	/// Unique, stable for the node's lifetime.
	pub id: NodeId,
	/// Label drawn inside the node.
	pub text: String,
	/// Canvas x coordinate of the center.
	pub x: f64,
	/// Canvas y coordinate of the center.
	pub y: f64,
	/// Diameter, kept within `[MIN_NODE_SIZE, MAX_NODE_SIZE]`.
	pub size: f64,
	/// Index into the active palette; wraps modulo its length.
	pub color_index: usize,
	/// Outgoing edges, by target id.
	pub connections: Vec<NodeId>,
}

impl Node {
	/// A node with the default size, color index 0 and no connections.
	pub fn new(id: NodeId, text: impl Into<String>, x: f64, y: f64) -> Self {
		Self {
			id,
			text: text.into(),
			x,
			y,
			size: DEFAULT_NODE_SIZE,
			color_index: 0,
			connections: Vec::new(),
		}
	}

	/// Copy with a new position.
	pub fn with_position(&self, x: f64, y: f64) -> Self {
		Self { x, y, ..self.clone() }
	}

	/// Copy with a new label.
	pub fn with_text(&self, text: impl Into<String>) -> Self {
		Self {
			text: text.into(),
			..self.clone()
		}
	}

	/// Copy with a new size, clamped.
	pub fn with_size(&self, size: f64) -> Self {
		Self {
			size: clamp_size(size),
			..self.clone()
		}
	}

	/// Copy with a new color index.
	pub fn with_color(&self, color_index: usize) -> Self {
		Self {
			color_index,
			..self.clone()
		}
	}

	/// Copy with the outgoing edges replaced.
	pub fn with_connections(&self, connections: Vec<NodeId>) -> Self {
		Self {
			connections,
			..self.clone()
		}
	}

	/// Whether an edge to `target` exists.
	pub fn is_connected_to(&self, target: NodeId) -> bool {
		self.connections.contains(&target)
	}

	/// Drop `target` from the outgoing edges, keeping the order of the rest.
	pub fn without_connection(&self, target: NodeId) -> Self {
		self.with_connections(
			self.connections
				.iter()
				.copied()
				.filter(|&id| id != target)
				.collect(),
		)
	}

	/// Remove the edge to `target` if present, append it otherwise.
	pub fn with_connection_toggled(&self, target: NodeId) -> Self {
		if self.is_connected_to(target) {
			self.without_connection(target)
		} else {
			let mut connections = self.connections.clone();
			connections.push(target);
			self.with_connections(connections)
		}
	}
}

/// A node paired with the palette color it resolves to under the active
/// theme and design style.
#[derive(Clone, Debug, PartialEq)]
pub struct ThemedNode {
	/// Copy of the stored node.
	pub node: Node,
	/// Resolved palette color.
	pub color: &'static str,
}

/// Visual treatment; each theme carries one background and palette per style.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum DesignStyle {
	/// Flat saturated colors, heavy outlines.
	#[default]
	Brutalist,
	/// Gradient background, soft palette.
	Modern,
	/// Muted paper tones.
	Vintage,
}

impl DesignStyle {
	/// Every style, in picker order.
	pub const ALL: [DesignStyle; 3] = [Self::Brutalist, Self::Modern, Self::Vintage];

	/// Lowercase name used by pickers.
	pub fn name(self) -> &'static str {
		match self {
			Self::Brutalist => "brutalist",
			Self::Modern => "modern",
			Self::Vintage => "vintage",
		}
	}

	/// Parse a name produced by [`DesignStyle::name`].
	pub fn from_name(name: &str) -> Option<Self> {
		Self::ALL.into_iter().find(|style| style.name() == name)
	}

	/// Position of this style's preset inside a theme.
	pub(crate) fn index(self) -> usize {
		match self {
			Self::Brutalist => 0,
			Self::Modern => 1,
			Self::Vintage => 2,
		}
	}
}

/// One color stop of a gradient background, offset in percent.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GradientStop {
	/// CSS color.
	pub color: &'static str,
	/// Position along the gradient line, 0 to 100.
	pub offset: f64,
}

/// Canvas background: a flat color or a two-stop linear gradient.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Background {
	/// Flat CSS color.
	Solid(&'static str),
	/// CSS-style linear gradient.
	LinearGradient {
		/// CSS angle: 0 points up, increasing clockwise.
		angle_deg: f64,
		/// First stop.
		from: GradientStop,
		/// Last stop.
		to: GradientStop,
	},
}

impl Background {
	/// CSS value for this background, e.g. for a page or overlay element.
	pub fn css(&self) -> String {
		match self {
			Self::Solid(color) => (*color).to_string(),
			Self::LinearGradient { angle_deg, from, to } => format!(
				"linear-gradient({}deg, {} {}%, {} {}%)",
				angle_deg, from.color, from.offset, to.color, to.offset
			),
		}
	}
}

/// Canvas translation applied before zoom.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PanOffset {
	/// Horizontal shift in screen pixels.
	pub x: f64,
	/// Vertical shift in screen pixels.
	pub y: f64,
}

/// Canvas dimensions used to lay out the seed nodes.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CanvasSize {
	/// Width in pixels.
	pub width: f64,
	/// Height in pixels.
	pub height: f64,
}

impl CanvasSize {
	/// Center point of the canvas.
	pub fn center(&self) -> (f64, f64) {
		(self.width / 2.0, self.height / 2.0)
	}
}

impl Default for CanvasSize {
	fn default() -> Self {
		Self {
			width: 1280.0,
			height: 800.0,
		}
	}
}
