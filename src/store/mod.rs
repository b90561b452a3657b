//! Note store seam.
//!
//! The mind map never talks to storage directly; it goes through [`NoteStore`]
//! with an explicit [`Session`] naming the user. Two implementations ship: an
//! in-process [`MemoryNoteStore`] for offline use and tests, and a
//! [`RestNoteStore`] speaking the PostgREST dialect of the hosted notes table.

use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::components::mind_map::{Note, NoteId};

mod memory;
mod rest;

pub use memory::MemoryNoteStore;
pub use rest::RestNoteStore;

/// Identity every store call is scoped to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Session {
	/// Owner of every note read or written.
	pub user_id: String,
	/// Bearer token for the hosted store. `None` falls back to the API key.
	pub access_token: Option<String>,
}

impl Session {
	/// Session without a bearer token.
	pub fn new(user_id: impl Into<String>) -> Self {
		Self {
			user_id: user_id.into(),
			access_token: None,
		}
	}
}

/// Failures reported by a note store.
#[derive(Debug, Error)]
pub enum StoreError {
	/// The HTTP request did not complete.
	#[error("request failed: {0}")]
	Request(#[from] reqwest::Error),
	/// The store answered with a non-success status.
	#[error("store answered {status}: {body}")]
	Status {
		/// HTTP status code.
		status: u16,
		/// Response body, for the log.
		body: String,
	},
	/// The response body could not be decoded.
	#[error("could not decode store response: {0}")]
	Decode(#[from] serde_json::Error),
	/// No note with this id belongs to the user.
	#[error("note {0} not found")]
	NotFound(NoteId),
	/// The store refused or is switched off.
	#[error("store unavailable: {0}")]
	Unavailable(String),
}

/// Operations the mind map needs from the note store.
///
/// Futures are not required to be `Send`: everything runs on the single
/// browser thread.
#[allow(async_fn_in_trait, reason = "single-threaded WASM callers only")]
pub trait NoteStore {
	/// All notes of the session's user, newest first.
	async fn list_notes(&self, session: &Session) -> Result<Vec<Note>, StoreError>;

	/// Current outgoing links of one note.
	async fn linked_notes(&self, session: &Session, note: &str) -> Result<Vec<NoteId>, StoreError>;

	/// Replaces the outgoing links of one note and bumps its `updated_at`.
	async fn update_linked_notes(
		&self,
		session: &Session,
		note: &str,
		linked: &[NoteId],
		updated_at: DateTime<Utc>,
	) -> Result<(), StoreError>;
}

impl<S: NoteStore> NoteStore for std::rc::Rc<S> {
	async fn list_notes(&self, session: &Session) -> Result<Vec<Note>, StoreError> {
		(**self).list_notes(session).await
	}

	async fn linked_notes(&self, session: &Session, note: &str) -> Result<Vec<NoteId>, StoreError> {
		(**self).linked_notes(session, note).await
	}

	async fn update_linked_notes(
		&self,
		session: &Session,
		note: &str,
		linked: &[NoteId],
		updated_at: DateTime<Utc>,
	) -> Result<(), StoreError> {
		(**self)
			.update_linked_notes(session, note, linked, updated_at)
			.await
	}
}

/// Store chosen at startup from the page configuration.
pub enum AppStore {
	/// In-memory notes.
	Memory(MemoryNoteStore),
	/// Hosted PostgREST notes.
	Rest(RestNoteStore),
}

impl NoteStore for AppStore {
	async fn list_notes(&self, session: &Session) -> Result<Vec<Note>, StoreError> {
		match self {
			AppStore::Memory(s) => s.list_notes(session).await,
			AppStore::Rest(s) => s.list_notes(session).await,
		}
	}

	async fn linked_notes(&self, session: &Session, note: &str) -> Result<Vec<NoteId>, StoreError> {
		match self {
			AppStore::Memory(s) => s.linked_notes(session, note).await,
			AppStore::Rest(s) => s.linked_notes(session, note).await,
		}
	}

	async fn update_linked_notes(
		&self,
		session: &Session,
		note: &str,
		linked: &[NoteId],
		updated_at: DateTime<Utc>,
	) -> Result<(), StoreError> {
		match self {
			AppStore::Memory(s) => {
				s.update_linked_notes(session, note, linked, updated_at)
					.await
			}
			AppStore::Rest(s) => {
				s.update_linked_notes(session, note, linked, updated_at)
					.await
			}
		}
	}
}
