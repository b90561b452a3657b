//! Selection and connect-mode state machine.
//!
//! A node click is routed either to selection or to connecting, never both.
//! In connect mode the first click picks the source and the second click on a
//! different node requests a link, after which connect mode is left.

use log::debug;

use super::types::NoteId;

/// Current interaction mode.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum Interaction {
	/// Nothing selected.
	#[default]
	Idle,
	/// One node is selected.
	NodeSelected(NoteId),
	/// Connect mode, with the source picked so far.
	Connecting(Option<NoteId>),
}

/// What a node click resolved to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ClickOutcome {
	/// The node became the selection.
	Selected(NoteId),
	/// The selected node was clicked again and deselected.
	Deselected(NoteId),
	/// First click in connect mode: the link source.
	SourcePicked(NoteId),
	/// Create an edge `source -> target`. Connect mode has already been left.
	LinkRequested {
		/// Connect source picked by the first click.
		source: NoteId,
		/// Node clicked second.
		target: NoteId,
	},
	/// The connect source was clicked again; self-links are never created.
	Ignored,
}

impl Interaction {
	/// The selected node, if any.
	pub fn selected(&self) -> Option<&NoteId> {
		match self {
			Interaction::NodeSelected(id) => Some(id),
			_ => None,
		}
	}

	/// Whether connect mode is active.
	pub fn is_connecting(&self) -> bool {
		matches!(self, Interaction::Connecting(_))
	}

	/// The connect source picked so far.
	pub fn connect_source(&self) -> Option<&NoteId> {
		match self {
			Interaction::Connecting(source) => source.as_ref(),
			_ => None,
		}
	}

	/// Routes a node click through the current mode.
	pub fn click(&mut self, node: &str) -> ClickOutcome {
		let outcome = match std::mem::take(self) {
			Interaction::Idle => {
				*self = Interaction::NodeSelected(node.to_string());
				ClickOutcome::Selected(node.to_string())
			}
			Interaction::NodeSelected(current) if current == node => {
				ClickOutcome::Deselected(current)
			}
			Interaction::NodeSelected(_) => {
				*self = Interaction::NodeSelected(node.to_string());
				ClickOutcome::Selected(node.to_string())
			}
			Interaction::Connecting(None) => {
				*self = Interaction::Connecting(Some(node.to_string()));
				ClickOutcome::SourcePicked(node.to_string())
			}
			Interaction::Connecting(Some(source)) if source == node => {
				*self = Interaction::Connecting(Some(source));
				ClickOutcome::Ignored
			}
			Interaction::Connecting(Some(source)) => ClickOutcome::LinkRequested {
				source,
				target: node.to_string(),
			},
		};
		debug!("mindmap: click on {node} -> {outcome:?}");
		outcome
	}

	/// Enters connect mode, dropping any selection.
	pub fn start_connect(&mut self) {
		*self = Interaction::Connecting(None);
	}

	/// Leaves connect mode with nothing picked. Does nothing outside connect mode.
	pub fn cancel_connect(&mut self) {
		if self.is_connecting() {
			*self = Interaction::Idle;
		}
	}

	/// Enters or leaves connect mode.
	pub fn toggle_connect(&mut self) {
		if self.is_connecting() {
			self.cancel_connect();
		} else {
			self.start_connect();
		}
	}

	/// Deselects the current node. Connect mode is left alone.
	pub fn clear_selection(&mut self) {
		if matches!(self, Interaction::NodeSelected(_)) {
			*self = Interaction::Idle;
		}
	}

	/// Drops references to nodes that no longer exist after a rebuild.
	pub fn forget(&mut self, missing: &[NoteId]) {
		let next = match &*self {
			Interaction::NodeSelected(id) if missing.contains(id) => Interaction::Idle,
			Interaction::Connecting(Some(id)) if missing.contains(id) => {
				Interaction::Connecting(None)
			}
			_ => return,
		};
		*self = next;
	}
}
