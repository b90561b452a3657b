//! In-process note store.
//!
//! Backs the offline mode (notes seeded from the page) and the test suite.
//! Reads and writes can be made to fail on demand, and writes are counted so
//! callers can check that no-op mutations stay off the store.

use std::cell::{Cell, RefCell};

use chrono::{DateTime, Utc};

use super::{NoteStore, Session, StoreError};
use crate::components::mind_map::{Note, NoteId};

/// Notes of a single user held in memory.
#[derive(Debug, Default)]
pub struct MemoryNoteStore {
	owner: String,
	notes: RefCell<Vec<Note>>,
	fail_reads: Cell<bool>,
	fail_writes: Cell<bool>,
	writes: Cell<usize>,
}

impl MemoryNoteStore {
	/// Store holding `notes` for `owner`.
	pub fn new(owner: impl Into<String>, notes: Vec<Note>) -> Self {
		Self {
			owner: owner.into(),
			notes: RefCell::new(notes),
			..Default::default()
		}
	}

	/// Makes every read fail.
	pub fn set_fail_reads(&self, fail: bool) {
		self.fail_reads.set(fail);
	}

	/// Makes every write fail.
	pub fn set_fail_writes(&self, fail: bool) {
		self.fail_writes.set(fail);
	}

	/// Number of successful `update_linked_notes` calls so far.
	pub fn writes(&self) -> usize {
		self.writes.get()
	}

	/// Copy of a stored note.
	pub fn note(&self, id: &str) -> Option<Note> {
		self.notes.borrow().iter().find(|n| n.id == id).cloned()
	}

	fn check_read(&self, session: &Session) -> Result<(), StoreError> {
		if self.fail_reads.get() {
			return Err(StoreError::Unavailable("reads disabled".into()));
		}
		if session.user_id != self.owner {
			return Err(StoreError::Unavailable(format!(
				"no notes for user {}",
				session.user_id
			)));
		}
		Ok(())
	}
}

impl NoteStore for MemoryNoteStore {
	async fn list_notes(&self, session: &Session) -> Result<Vec<Note>, StoreError> {
		self.check_read(session)?;
		let mut notes = self.notes.borrow().clone();
		notes.sort_by(|a, b| b.created_at.cmp(&a.created_at));
		Ok(notes)
	}

	async fn linked_notes(&self, session: &Session, note: &str) -> Result<Vec<NoteId>, StoreError> {
		self.check_read(session)?;
		self.note(note)
			.map(|n| n.linked_notes)
			.ok_or_else(|| StoreError::NotFound(note.to_string()))
	}

	async fn update_linked_notes(
		&self,
		session: &Session,
		note: &str,
		linked: &[NoteId],
		updated_at: DateTime<Utc>,
	) -> Result<(), StoreError> {
		if self.fail_writes.get() {
			return Err(StoreError::Unavailable("writes disabled".into()));
		}
		self.check_read(session)?;
		let mut notes = self.notes.borrow_mut();
		let stored = notes
			.iter_mut()
			.find(|n| n.id == note)
			.ok_or_else(|| StoreError::NotFound(note.to_string()))?;
		stored.linked_notes = linked.to_vec();
		stored.updated_at = updated_at;
		self.writes.set(self.writes.get() + 1);
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use chrono::TimeZone;
	use futures::executor::block_on;

	use super::*;
	use crate::components::mind_map::graph::tests::note;

	#[test]
	fn lists_newest_first_for_owner_only() {
		let mut old = note("old", "Old", &[]);
		old.created_at = Utc.with_ymd_and_hms(2023, 1, 1, 0, 0, 0).unwrap();
		let store = MemoryNoteStore::new("u1", vec![old, note("new", "New", &[])]);

		let notes = block_on(store.list_notes(&Session::new("u1"))).unwrap();
		let ids: Vec<_> = notes.iter().map(|n| n.id.as_str()).collect();
		assert_eq!(ids, ["new", "old"]);

		assert!(block_on(store.list_notes(&Session::new("u2"))).is_err());
	}

	#[test]
	fn update_replaces_links_and_counts_writes() {
		let store = MemoryNoteStore::new("u1", vec![note("a", "A", &[])]);
		let session = Session::new("u1");
		let at = Utc.with_ymd_and_hms(2025, 2, 2, 2, 2, 2).unwrap();

		block_on(store.update_linked_notes(&session, "a", &["b".to_string()], at)).unwrap();
		let stored = store.note("a").unwrap();
		assert_eq!(stored.linked_notes, ["b"]);
		assert_eq!(stored.updated_at, at);
		assert_eq!(store.writes(), 1);

		let missing = block_on(store.update_linked_notes(&session, "zz", &[], at));
		assert!(matches!(missing, Err(StoreError::NotFound(id)) if id == "zz"));
	}
}
