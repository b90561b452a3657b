//! Mind map view over a user's linked notes.
//!
//! Notes become rectangular cards placed by a deterministic layout, and each
//! entry in a note's `linked_notes` becomes a directed curve. The canvas
//! supports:
//! - Pan, zoom (clamped to 50–200%) and node dragging
//! - Search and tag filtering, each triggering a full rebuild
//! - Connect mode for creating links by picking source then target
//! - Removing links from the selected note's panel
//!
//! # Example
//!
//! ```ignore
//! use notes_mindmap::{AppConfig, MindMapCanvas};
//!
//! let config = AppConfig::from_document().unwrap_or_default();
//! view! { <MindMapCanvas config=config fullscreen=true /> }
//! ```

mod component;
/// Graph snapshot and filter.
pub mod graph;
/// Selection and connect mode.
pub mod interaction;
/// Node placement strategies.
pub mod layout;
/// Link creation and deletion.
pub mod links;
mod render;
/// View state.
pub mod state;
/// Colours and styles.
pub mod theme;
/// Note and graph records.
pub mod types;
/// Pan, zoom and drag.
pub mod viewport;

pub use component::MindMapCanvas;
pub use graph::{GraphQuery, GraphSnapshot};
pub use layout::LayoutStrategy;
pub use links::{LinkError, LinkService};
pub use state::MindMapState;
pub use theme::Theme;
pub use types::{Note, NoteId};
