//! Link mutation service.
//!
//! A link lives in the source note's `linked_notes` list. Mutations run in
//! three steps so that no UI borrow is held across the store round trip:
//!
//! 1. [`LinkService::plan_create`] / [`LinkService::plan_delete`] validate the
//!    request against the current snapshot. Conflicts never reach the store.
//! 2. [`LinkService::commit`] reads the source note's links, edits the list and
//!    writes it back.
//! 3. [`LinkMutation::apply`] updates the in-memory edge set, only after a
//!    successful commit.

use chrono::Utc;
use log::info;
use thiserror::Error;

use super::graph::GraphSnapshot;
use super::types::{Edge, NoteId};
use crate::store::{NoteStore, Session, StoreError};

/// Why a link mutation was refused or failed.
#[derive(Debug, Error)]
pub enum LinkError {
	/// Source and target are the same note.
	#[error("a note cannot link to itself")]
	SelfLink,
	/// The edge exists already.
	#[error("{from} already links to {to}")]
	AlreadyLinked {
		/// Source note.
		from: NoteId,
		/// Target note.
		to: NoteId,
	},
	/// The store round trip failed.
	#[error("could not save link: {0}")]
	Store(#[from] StoreError),
}

/// Kind of link mutation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LinkOp {
	/// Add the edge.
	Create,
	/// Remove the edge.
	Delete,
}

/// A validated single-edge change waiting to be committed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LinkMutation {
	/// Create or delete.
	pub op: LinkOp,
	/// The edge being added or removed.
	pub edge: Edge,
}

impl LinkMutation {
	/// Reflects a committed mutation in the snapshot. Returns whether the
	/// edge set changed.
	pub fn apply(&self, graph: &mut GraphSnapshot) -> bool {
		match self.op {
			LinkOp::Create => graph.insert_edge(self.edge.clone()),
			LinkOp::Delete => graph.remove_edge(&self.edge.source, &self.edge.target),
		}
	}
}

/// Applies link changes to the note store on behalf of one session.
#[derive(Clone, Debug)]
pub struct LinkService<S> {
	store: S,
	session: Session,
}

impl<S: NoteStore> LinkService<S> {
	/// Service writing as `session` to `store`.
	pub fn new(store: S, session: Session) -> Self {
		Self { store, session }
	}

	/// The backing store.
	pub fn store(&self) -> &S {
		&self.store
	}

	/// The session every write runs as.
	pub fn session(&self) -> &Session {
		&self.session
	}

	/// Validates a new link against `graph` without touching the store.
	pub fn plan_create(
		&self,
		graph: &GraphSnapshot,
		source: &str,
		target: &str,
	) -> Result<LinkMutation, LinkError> {
		if source == target {
			return Err(LinkError::SelfLink);
		}
		if graph.has_edge(source, target) {
			return Err(LinkError::AlreadyLinked {
				from: source.to_string(),
				to: target.to_string(),
			});
		}
		Ok(LinkMutation {
			op: LinkOp::Create,
			edge: Edge::new(source, target),
		})
	}

	/// Deleting an edge that does not exist is allowed and succeeds.
	pub fn plan_delete(&self, source: &str, target: &str) -> LinkMutation {
		LinkMutation {
			op: LinkOp::Delete,
			edge: Edge::new(source, target),
		}
	}

	/// Persists the mutation. The store is only written when the source's
	/// link list actually changes.
	pub async fn commit(&self, mutation: &LinkMutation) -> Result<(), LinkError> {
		let Edge { source, target } = &mutation.edge;
		let mut linked = self.store.linked_notes(&self.session, source).await?;

		let changed = match mutation.op {
			LinkOp::Create if !linked.contains(target) => {
				linked.push(target.clone());
				true
			}
			LinkOp::Create => false,
			LinkOp::Delete => {
				let before = linked.len();
				linked.retain(|id| id != target);
				linked.len() != before
			}
		};

		if changed {
			self.store
				.update_linked_notes(&self.session, source, &linked, Utc::now())
				.await?;
		}
		info!(
			"mindmap: {:?} link {} -> {} ({})",
			mutation.op,
			source,
			target,
			if changed { "saved" } else { "already in store" }
		);
		Ok(())
	}

	/// Plans, commits and applies a new edge on an exclusively held snapshot.
	pub async fn create_link(
		&self,
		graph: &mut GraphSnapshot,
		source: &str,
		target: &str,
	) -> Result<bool, LinkError> {
		let mutation = self.plan_create(graph, source, target)?;
		self.commit(&mutation).await?;
		Ok(mutation.apply(graph))
	}

	/// Commits and applies an edge removal on an exclusively held snapshot.
	pub async fn delete_link(
		&self,
		graph: &mut GraphSnapshot,
		source: &str,
		target: &str,
	) -> Result<bool, LinkError> {
		let mutation = self.plan_delete(source, target);
		self.commit(&mutation).await?;
		Ok(mutation.apply(graph))
	}
}
