//! notes-mindmap: interactive mind map over a user's linked notes.
//!
//! This crate provides a WASM mind map component that lays notes out as cards,
//! draws their links as directed curves and lets the user pan, zoom, drag,
//! filter and create or delete links, persisting changes to a note store.

use leptos::prelude::*;
use leptos_meta::*;
use log::{Level, info, warn};

/// UI components.
pub mod components;
/// Page configuration.
pub mod config;
/// Note storage backends.
pub mod store;

pub use components::mind_map::{LayoutStrategy, MindMapCanvas, Note, NoteId};
pub use config::AppConfig;

/// Initialize logging and panic hooks for the WASM target.
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("mindmap: logging initialized");
}

/// Reads the page configuration, falling back to an offline setup.
fn load_config() -> AppConfig {
	match AppConfig::from_document() {
		Ok(config) => {
			info!(
				"mindmap: configured for user {} ({})",
				config.user_id,
				if config.store.is_some() {
					"hosted store"
				} else {
					"offline"
				}
			);
			config
		}
		Err(e) => {
			warn!("mindmap: {}; using offline defaults", e);
			AppConfig::default()
		}
	}
}

/// Main application component.
/// Loads the configuration from the DOM and renders the mind map full-screen.
#[component]
pub fn App() -> impl IntoView {
	provide_meta_context();

	let config = load_config();

	view! {
		<Html attr:lang="en" attr:dir="ltr" attr:data-theme="dark" />
		<Title text="Mind Map" />
		<Meta charset="UTF-8" />
		<Meta name="viewport" content="width=device-width, initial-scale=1.0" />

		<div class="fullscreen-mindmap">
			<MindMapCanvas config=config fullscreen=true />
		</div>
	}
}
