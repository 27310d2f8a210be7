//! Mindmap editor: a signal-backed node store, theme presets, memoized
//! views and the canvas front end that drives them.

mod component;
mod render;
mod state;
pub mod theme;
mod toolbar;
pub mod types;

pub use component::{MindmapCanvas, viewport_size};
pub use state::{MindmapConfig, MindmapState, seed_nodes};
pub use toolbar::MindmapToolbar;
pub use types::{Background, CanvasSize, DesignStyle, Node, NodeId, PanOffset, ThemedNode};
