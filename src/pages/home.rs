use leptos::prelude::*;
use log::info;

use crate::components::mindmap::{
	MindmapCanvas, MindmapConfig, MindmapState, MindmapToolbar, viewport_size,
};

/// Default Home Page
#[component]
pub fn Home() -> impl IntoView {
	// The seed layout is centered on the window as it is at startup
	let config = MindmapConfig {
		canvas: viewport_size().unwrap_or_default(),
		..Default::default()
	};
	info!(
		"seeding mindmap on a {}x{} canvas",
		config.canvas.width, config.canvas.height
	);
	let state = MindmapState::new(config);
	let connect_mode = RwSignal::new(false);

	view! {
		<div class="fullscreen-mindmap">
			<MindmapCanvas state=state connect_mode=connect_mode fullscreen=true />
			<div class="mindmap-overlay">
				<h1>"Mindmap"</h1>
				<p class="subtitle">
					"Drag nodes to move them. Shift+scroll to resize. Double click to edit. Scroll to zoom."
				</p>
				<MindmapToolbar state=state connect_mode=connect_mode />
			</div>
		</div>
	}
}
