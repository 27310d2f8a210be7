//! Built-in theme presets.
//!
//! Each theme carries one background and one 8-color palette per
//! [`DesignStyle`]. The table is static; nothing mutates it at runtime.

use super::types::{Background, DesignStyle, GradientStop, Node, ThemedNode};

/// Number of colors in every palette.
pub const PALETTE_LEN: usize = 8;

/// Theme selected when nothing else is configured.
pub const DEFAULT_THEME: &str = "purple";

/// Background and palette for one design style.
#[derive(Debug)]
pub struct StylePreset {
	/// Canvas background.
	pub background: Background,
	/// Node colors, indexed by `color_index % PALETTE_LEN`.
	pub colors: [&'static str; PALETTE_LEN],
}

/// A named palette family.
#[derive(Debug)]
pub struct Theme {
	/// Lookup key, e.g. `"purple"`.
	pub key: &'static str,
	/// Display name, e.g. `"PURPLE"`.
	pub name: &'static str,
	presets: [StylePreset; 3],
}

impl Theme {
	/// Preset for `style`.
	pub fn preset(&self, style: DesignStyle) -> &StylePreset {
		&self.presets[style.index()]
	}

	/// Background for `style`.
	pub fn background(&self, style: DesignStyle) -> Background {
		self.preset(style).background
	}

	/// Palette for `style`.
	pub fn palette(&self, style: DesignStyle) -> &[&'static str; PALETTE_LEN] {
		&self.preset(style).colors
	}

	/// Resolve a node color index; any index wraps around the palette.
	pub fn color(&self, style: DesignStyle, color_index: usize) -> &'static str {
		let palette = self.palette(style);
		palette[color_index % palette.len()]
	}
}

impl PartialEq for Theme {
	fn eq(&self, other: &Self) -> bool {
		self.key == other.key
	}
}

const fn gradient(angle_deg: f64, from: &'static str, to: &'static str) -> Background {
	Background::LinearGradient {
		angle_deg,
		from: GradientStop {
			color: from,
			offset: 0.0,
		},
		to: GradientStop {
			color: to,
			offset: 100.0,
		},
	}
}

static THEMES: [Theme; 3] = [
	Theme {
		key: "purple",
		name: "PURPLE",
		presets: [
			StylePreset {
				background: Background::Solid("#6B46C1"),
				colors: [
					"#FF0000", "#00FF00", "#0000FF", "#FFFF00", "#FF00FF", "#00FFFF", "#FFA500",
					"#FF1493",
				],
			},
			StylePreset {
				background: gradient(135.0, "#667eea", "#764ba2"),
				colors: [
					"#FF6B6B", "#4ECDC4", "#45B7D1", "#F7DC6F", "#95E1D3", "#A8E6CF", "#FFD3B6",
					"#FFAAA5",
				],
			},
			StylePreset {
				background: Background::Solid("#EBE0F0"),
				colors: [
					"#9B7B9E", "#A78BA8", "#8B7389", "#B8A5C8", "#967B94", "#9D8B96", "#C5B5D5",
					"#8F7E9C",
				],
			},
		],
	},
	Theme {
		key: "green",
		name: "GREEN",
		presets: [
			StylePreset {
				background: Background::Solid("#059669"),
				colors: [
					"#10B981", "#059669", "#047857", "#065F46", "#34D399", "#6EE7B7", "#A7F3D0",
					"#D1FAE5",
				],
			},
			StylePreset {
				background: gradient(135.0, "#11998e", "#38ef7d"),
				colors: [
					"#2ECC71", "#27AE60", "#16A085", "#1ABC9C", "#52BE80", "#58D68D", "#7DCEA0",
					"#A9DFBF",
				],
			},
			StylePreset {
				background: Background::Solid("#D4E4D4"),
				colors: [
					"#5C7457", "#6B8E5F", "#7A9C6E", "#4A5D3F", "#698267", "#8FA688", "#A4B89A",
					"#5F7358",
				],
			},
		],
	},
	Theme {
		key: "red",
		name: "RED",
		presets: [
			StylePreset {
				background: Background::Solid("#DC2626"),
				colors: [
					"#FF0000", "#DC2626", "#B91C1C", "#991B1B", "#EF4444", "#F87171", "#FCA5A5",
					"#FEE2E2",
				],
			},
			StylePreset {
				background: gradient(135.0, "#eb3349", "#f45c43"),
				colors: [
					"#E74C3C", "#C0392B", "#EC7063", "#F1948A", "#E57373", "#EF5350", "#F44336",
					"#D32F2F",
				],
			},
			StylePreset {
				background: Background::Solid("#E8D4CC"),
				colors: [
					"#8B4C39", "#A65D4A", "#C17E6B", "#734133", "#925847", "#AB7360", "#C49481",
					"#7D4A3A",
				],
			},
		],
	},
];

/// All built-in themes, in picker order.
pub fn all() -> &'static [Theme] {
	&THEMES
}

/// Theme with the given key, if one is built in.
pub fn lookup(key: &str) -> Option<&'static Theme> {
	THEMES.iter().find(|theme| theme.key == key)
}

/// The built-in default theme.
pub fn default_theme() -> &'static Theme {
	&THEMES[0]
}

/// Pair each node with its palette color under `theme` and `style`,
/// keeping store order.
pub fn themed_nodes(nodes: &[Node], theme: &Theme, style: DesignStyle) -> Vec<ThemedNode> {
	nodes
		.iter()
		.map(|node| ThemedNode {
			color: theme.color(style, node.color_index),
			node: node.clone(),
		})
		.collect()
}

/// Background of `theme` under `style`.
pub fn current_background(theme: &Theme, style: DesignStyle) -> Background {
	theme.background(style)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn ships_three_themes() {
		let keys: Vec<_> = all().iter().map(|t| t.key).collect();
		assert_eq!(keys, ["purple", "green", "red"]);
		assert_eq!(default_theme().key, DEFAULT_THEME);
	}

	#[test]
	fn unknown_key_is_none() {
		assert!(lookup("blue").is_none());
		assert_eq!(lookup("green").map(|t| t.name), Some("GREEN"));
	}

	#[test]
	fn color_index_wraps_modulo_palette() {
		let purple = lookup("purple").unwrap();
		let palette = purple.palette(DesignStyle::Brutalist);
		assert_eq!(purple.color(DesignStyle::Brutalist, 10), palette[2]);
		assert_eq!(purple.color(DesignStyle::Brutalist, 10), "#0000FF");
		assert_eq!(purple.color(DesignStyle::Vintage, 7), "#8F7E9C");
	}

	#[test]
	fn themed_nodes_resolve_each_color_index() {
		let nodes = vec![
			Node::new(1, "a", 0.0, 0.0).with_color(10),
			Node::new(2, "b", 0.0, 0.0).with_color(3),
		];
		let green = lookup("green").unwrap();

		let themed = themed_nodes(&nodes, green, DesignStyle::Vintage);
		let colors: Vec<_> = themed.iter().map(|t| (t.node.id, t.color)).collect();
		assert_eq!(colors, [(1, "#7A9C6E"), (2, "#4A5D3F")]);
		assert!(themed_nodes(&[], green, DesignStyle::Modern).is_empty());
	}

	#[test]
	fn backgrounds_follow_style() {
		let red = lookup("red").unwrap();
		assert_eq!(red.background(DesignStyle::Brutalist), Background::Solid("#DC2626"));
		assert_eq!(red.background(DesignStyle::Vintage), Background::Solid("#E8D4CC"));
		assert_eq!(
			red.background(DesignStyle::Modern).css(),
			"linear-gradient(135deg, #eb3349 0%, #f45c43 100%)"
		);
		assert_eq!(
			current_background(red, DesignStyle::Vintage),
			red.background(DesignStyle::Vintage)
		);
	}
}
