//! Mind map state: the current graph snapshot plus view and interaction
//! tracking.
//!
//! The snapshot is replaced wholesale on every refresh. The only in-place
//! edits are node moves from dragging and single-edge changes committed by the
//! link service. A node moved by hand keeps its position through resizes until
//! the next rebuild or layout switch. Refreshes are numbered; a fetch that completes after a newer
//! refresh was requested is discarded, so the view always reflects the most
//! recent search and filter.

use std::collections::HashSet;

use log::{debug, info, warn};

use super::graph::{GraphQuery, GraphSnapshot, build_graph, missing_ids, note_tags};
use super::interaction::{ClickOutcome, Interaction};
use super::layout::{LayoutStrategy, layout_all};
use super::links::{LinkError, LinkMutation, LinkOp, LinkService};
use super::theme::NodeStyle;
use super::types::{Bounds, Note, NoteId, Point};
use super::viewport::{DragState, Viewport};
use crate::store::{NoteStore, Session, StoreError};

/// Severity of a [`Notice`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoticeLevel {
	/// Neutral hint.
	Info,
	/// An operation went through.
	Success,
	/// An operation failed.
	Error,
}

/// A message for the user, shown by the component as a toast line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notice {
	/// How urgent the message is.
	pub level: NoticeLevel,
	/// Text shown to the user.
	pub message: String,
}

/// Identifies one requested refresh.
#[derive(Clone, Debug, PartialEq)]
pub struct RefreshTicket {
	generation: u64,
	query: GraphQuery,
}

/// What became of a completed refresh.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RefreshOutcome {
	/// The snapshot was rebuilt from the fetched notes.
	Applied {
		/// Nodes in the new snapshot.
		nodes: usize,
		/// Edges in the new snapshot.
		edges: usize,
	},
	/// The fetch failed; the graph is now empty.
	Failed,
	/// A newer refresh was requested meanwhile; the result was dropped.
	Stale,
}

/// Everything the mind map view owns between frames.
pub struct MindMapState {
	graph: GraphSnapshot,
	/// Pan and zoom.
	pub viewport: Viewport,
	/// Selection and connect mode.
	pub interaction: Interaction,
	/// Press on a node that may become a drag.
	pub drag: DragState,
	/// Nodes moved by hand since the last rebuild.
	pinned: HashSet<NoteId>,
	strategy: LayoutStrategy,
	bounds: Bounds,
	query: GraphQuery,
	known_tags: Vec<String>,
	palette_size: usize,
	generation: u64,
	/// A refresh is in flight.
	pub loading: bool,
	/// Seconds of animation so far; drives the pulses along links.
	pub flow_time: f64,
	notices: Vec<Notice>,
}

impl MindMapState {
	/// Empty state for a canvas of `bounds`; colours cycle through `palette_size` accents.
	pub fn new(bounds: Bounds, strategy: LayoutStrategy, palette_size: usize) -> Self {
		Self {
			graph: GraphSnapshot::default(),
			viewport: Viewport::default(),
			interaction: Interaction::default(),
			drag: DragState::default(),
			pinned: HashSet::new(),
			strategy,
			bounds,
			query: GraphQuery::default(),
			known_tags: Vec::new(),
			palette_size,
			generation: 0,
			loading: false,
			flow_time: 0.0,
			notices: Vec::new(),
		}
	}

	/// Current snapshot.
	pub fn graph(&self) -> &GraphSnapshot {
		&self.graph
	}

	/// Active layout.
	pub fn strategy(&self) -> LayoutStrategy {
		self.strategy
	}

	/// Current canvas size.
	pub fn bounds(&self) -> Bounds {
		self.bounds
	}

	/// Filter used for the next refresh.
	pub fn query(&self) -> &GraphQuery {
		&self.query
	}

	/// Tags seen in the last successful fetch, whether or not filtered out.
	pub fn known_tags(&self) -> &[String] {
		&self.known_tags
	}

	/// Queues a message for the overlay.
	pub fn notify(&mut self, level: NoticeLevel, message: impl Into<String>) {
		self.notices.push(Notice {
			level,
			message: message.into(),
		});
	}

	/// Drains queued messages, oldest first.
	pub fn take_notices(&mut self) -> Vec<Notice> {
		std::mem::take(&mut self.notices)
	}

	/// Starts a refresh with the current filters.
	pub fn request_refresh(&mut self) -> RefreshTicket {
		self.generation += 1;
		self.loading = true;
		debug!(
			"mindmap: refresh #{} for {:?}",
			self.generation, self.query
		);
		RefreshTicket {
			generation: self.generation,
			query: self.query.clone(),
		}
	}

	/// Changes the search term and starts a refresh.
	pub fn set_search(&mut self, term: impl Into<String>) -> RefreshTicket {
		self.query.search = term.into();
		self.request_refresh()
	}

	/// Replaces the tag filter and starts a refresh.
	pub fn set_tag_filter(&mut self, tags: Vec<String>) -> RefreshTicket {
		self.query.tags = tags;
		self.request_refresh()
	}

	/// Adds `tag` to the filter, or removes it if already present.
	pub fn toggle_tag(&mut self, tag: &str) -> RefreshTicket {
		let mut tags = self.query.tags.clone();
		if let Some(i) = tags.iter().position(|t| t == tag) {
			tags.remove(i);
		} else {
			tags.push(tag.to_string());
		}
		self.set_tag_filter(tags)
	}

	/// Switches layout, repositions the current nodes right away and
	/// recentres the view. The returned ticket refetches the notes.
	pub fn set_strategy(&mut self, strategy: LayoutStrategy) -> RefreshTicket {
		if strategy != self.strategy {
			self.strategy = strategy;
			self.viewport.recenter();
			self.unpin_released();
			self.relayout();
		}
		self.request_refresh()
	}

	/// Applies a completed fetch, unless a newer refresh has been requested.
	pub fn finish_refresh(
		&mut self,
		ticket: RefreshTicket,
		result: Result<Vec<Note>, StoreError>,
	) -> RefreshOutcome {
		if ticket.generation != self.generation {
			debug!(
				"mindmap: dropping stale refresh #{} (latest #{})",
				ticket.generation, self.generation
			);
			return RefreshOutcome::Stale;
		}
		self.loading = false;

		let (notes, failed) = match result {
			Ok(notes) => {
				self.known_tags = note_tags(&notes);
				(notes, false)
			}
			Err(e) => {
				warn!("mindmap: failed to fetch notes: {}", e);
				self.notify(NoticeLevel::Error, "Could not load notes");
				(Vec::new(), true)
			}
		};

		let next = build_graph(&notes, &ticket.query, self.palette_size);
		self.replace_graph(next);

		if failed {
			RefreshOutcome::Failed
		} else {
			RefreshOutcome::Applied {
				nodes: self.graph.nodes.len(),
				edges: self.graph.edges.len(),
			}
		}
	}

	/// Fetches and applies in one go, for callers holding the state exclusively.
	pub async fn refresh<S: NoteStore>(&mut self, store: &S, session: &Session) -> RefreshOutcome {
		let ticket = self.request_refresh();
		let result = store.list_notes(session).await;
		self.finish_refresh(ticket, result)
	}

	fn replace_graph(&mut self, mut next: GraphSnapshot) {
		let dragged = self
			.drag
			.dragging()
			.and_then(|id| self.graph.node(id))
			.map(|n| (n.id.clone(), n.position));

		layout_nodes(&mut next, self.strategy, self.bounds, &HashSet::new());
		self.unpin_released();
		if let Some((id, pos)) = dragged {
			if let Some(node) = next.node_mut(&id) {
				node.position = pos;
			}
		}

		let missing = missing_ids(&self.graph, &next);
		self.interaction.forget(&missing);
		self.graph = next;
	}

	/// Recomputes every node position, except nodes moved by hand.
	pub fn relayout(&mut self) {
		layout_nodes(&mut self.graph, self.strategy, self.bounds, &self.pinned);
	}

	/// Whether the node was moved by hand since the last rebuild.
	pub fn is_pinned(&self, id: &str) -> bool {
		self.pinned.contains(id)
	}

	/// Forgets manual positions, except for a node still under the pointer.
	fn unpin_released(&mut self) {
		let dragging = self.drag.dragging();
		self.pinned.retain(|id| Some(id) == dragging);
	}

	/// Advances the animation clock by `dt` seconds.
	pub fn tick(&mut self, dt: f64) {
		self.flow_time += dt;
	}

	/// Follows a canvas resize. Hand-placed nodes stay put.
	pub fn resize(&mut self, bounds: Bounds) {
		if bounds != self.bounds {
			self.bounds = bounds;
			self.relayout();
		}
	}

	/// Topmost node whose card contains the screen point.
	pub fn node_at(&self, screen: Point, style: &NodeStyle) -> Option<&NoteId> {
		let world = self.viewport.screen_to_world(screen);
		self.graph
			.nodes
			.iter()
			.rev()
			.find(|n| {
				(world.x - n.position.x).abs() <= style.width / 2.0
					&& (world.y - n.position.y).abs() <= style.height / 2.0
			})
			.map(|n| &n.id)
	}

	/// Pointer pressed on the canvas: grabs a node or starts panning.
	pub fn pointer_down(&mut self, screen: Point, style: &NodeStyle) {
		let hit = self
			.node_at(screen, style)
			.and_then(|id| self.graph.node(id))
			.map(|n| (n.id.clone(), n.position));
		match hit {
			Some((id, pos)) => self.drag.begin(id, screen, pos),
			None => {
				self.viewport.begin_pan(screen, true);
			}
		}
	}

	/// Moves the dragged node, or the view while panning.
	pub fn pointer_move(&mut self, screen: Point) {
		if let Some((id, pos)) = self.drag.update(screen, self.viewport.scale()) {
			if let Some(node) = self.graph.node_mut(id) {
				node.position = pos;
				self.pinned.insert(id.clone());
			}
		} else {
			self.viewport.update_pan(screen);
		}
	}

	/// Pointer released. Returns the node when the press was a click.
	pub fn pointer_up(&mut self) -> Option<NoteId> {
		self.viewport.end_pan();
		self.drag.end()
	}

	/// Pointer left the canvas: abandons any press without clicking.
	pub fn pointer_leave(&mut self) {
		self.viewport.end_pan();
		self.drag = DragState::default();
	}

	/// A click on `node`. Clicks on unknown ids are ignored.
	pub fn click_node(&mut self, node: &str) -> ClickOutcome {
		if !self.graph.contains(node) {
			return ClickOutcome::Ignored;
		}
		let outcome = self.interaction.click(node);
		if let ClickOutcome::SourcePicked(_) = outcome {
			self.notify(NoticeLevel::Info, "Pick the note to link to");
		}
		outcome
	}

	/// Validates a new link, reporting refusals to the user.
	pub fn plan_create<S: NoteStore>(
		&mut self,
		service: &LinkService<S>,
		source: &str,
		target: &str,
	) -> Option<LinkMutation> {
		match service.plan_create(&self.graph, source, target) {
			Ok(mutation) => Some(mutation),
			Err(e) => {
				info!("mindmap: link refused: {}", e);
				self.notify(NoticeLevel::Error, e.to_string());
				None
			}
		}
	}

	/// Records the result of a committed mutation. The edge set only changes
	/// when the commit succeeded.
	pub fn finish_link(&mut self, mutation: &LinkMutation, result: Result<(), LinkError>) -> bool {
		match result {
			Ok(()) => {
				let changed = mutation.apply(&mut self.graph);
				let message = match mutation.op {
					LinkOp::Create => "Connection created",
					LinkOp::Delete => "Connection deleted",
				};
				self.notify(NoticeLevel::Success, message);
				changed
			}
			Err(e) => {
				warn!(
					"mindmap: {:?} {} -> {} failed: {}",
					mutation.op, mutation.edge.source, mutation.edge.target, e
				);
				let message = match mutation.op {
					LinkOp::Create => "Failed to create connection",
					LinkOp::Delete => "Failed to delete connection",
				};
				self.notify(NoticeLevel::Error, message);
				false
			}
		}
	}

	/// Validates, commits and applies a new link.
	pub async fn create_link<S: NoteStore>(
		&mut self,
		service: &LinkService<S>,
		source: &str,
		target: &str,
	) -> bool {
		let Some(mutation) = self.plan_create(service, source, target) else {
			return false;
		};
		let result = service.commit(&mutation).await;
		self.finish_link(&mutation, result)
	}

	/// Commits and applies a link removal.
	pub async fn delete_link<S: NoteStore>(
		&mut self,
		service: &LinkService<S>,
		source: &str,
		target: &str,
	) -> bool {
		let mutation = service.plan_delete(source, target);
		let result = service.commit(&mutation).await;
		self.finish_link(&mutation, result)
	}

	/// Handles a node click end to end, creating the link a connect-mode
	/// click asks for.
	pub async fn click<S: NoteStore>(&mut self, service: &LinkService<S>, node: &str) -> ClickOutcome {
		let outcome = self.click_node(node);
		if let ClickOutcome::LinkRequested { source, target } = &outcome {
			self.create_link(service, source, target).await;
		}
		outcome
	}
}

fn layout_nodes(
	graph: &mut GraphSnapshot,
	strategy: LayoutStrategy,
	bounds: Bounds,
	skip: &HashSet<NoteId>,
) {
	let positions = layout_all(graph.nodes.len(), strategy, bounds);
	for (node, position) in graph.nodes.iter_mut().zip(positions) {
		if !skip.contains(&node.id) {
			node.position = position;
		}
	}
}

#[cfg(test)]
mod tests {
	use std::cell::RefCell;
	use std::collections::VecDeque;
	use std::rc::Rc;

	use chrono::{DateTime, Utc};
	use futures::channel::oneshot;
	use futures::executor::{LocalPool, block_on};
	use futures::task::LocalSpawnExt;

	use super::*;
	use crate::components::mind_map::graph::tests::note;
	use crate::components::mind_map::layout::position;
	use crate::components::mind_map::theme::Theme;
	use crate::components::mind_map::types::Edge;
	use crate::store::MemoryNoteStore;

	const BOUNDS: Bounds = Bounds::new(1000.0, 800.0);

	fn notes() -> Vec<Note> {
		vec![
			note("a", "alpha", &["b"]),
			note("b", "alphabet", &[]),
			note("c", "gamma", &["a"]),
		]
	}

	fn setup() -> (MindMapState, Rc<MemoryNoteStore>, LinkService<Rc<MemoryNoteStore>>) {
		let store = Rc::new(MemoryNoteStore::new("u1", notes()));
		let service = LinkService::new(store.clone(), Session::new("u1"));
		let mut state = MindMapState::new(BOUNDS, LayoutStrategy::Radial, 6);
		block_on(state.refresh(&store, service.session()));
		(state, store, service)
	}

	/// Store whose `list_notes` calls resolve only when the test releases them.
	struct GatedStore {
		gates: RefCell<VecDeque<oneshot::Receiver<Vec<Note>>>>,
	}

	impl NoteStore for GatedStore {
		async fn list_notes(&self, _: &Session) -> Result<Vec<Note>, StoreError> {
			let gate = self.gates.borrow_mut().pop_front();
			match gate {
				Some(rx) => rx
					.await
					.map_err(|_| StoreError::Unavailable("gate dropped".into())),
				None => Err(StoreError::Unavailable("no gate".into())),
			}
		}

		async fn linked_notes(&self, _: &Session, note: &str) -> Result<Vec<NoteId>, StoreError> {
			Err(StoreError::NotFound(note.to_string()))
		}

		async fn update_linked_notes(
			&self,
			_: &Session,
			note: &str,
			_: &[NoteId],
			_: DateTime<Utc>,
		) -> Result<(), StoreError> {
			Err(StoreError::NotFound(note.to_string()))
		}
	}

	#[test]
	fn refresh_lays_out_every_node() {
		let (state, _, _) = setup();
		assert_eq!(state.graph().nodes.len(), 3);
		assert_eq!(state.graph().edges.len(), 2);
		for (i, node) in state.graph().nodes.iter().enumerate() {
			assert_eq!(node.position, position(i, 3, LayoutStrategy::Radial, BOUNDS));
		}
		assert!(!state.loading);
	}

	#[test]
	fn stale_fetch_is_discarded() {
		let (mut state, store, service) = setup();
		let all = block_on(store.list_notes(service.session()));

		let older = state.set_search("a");
		let newer = state.set_search("alphab");

		let all_again = block_on(store.list_notes(service.session()));
		assert!(matches!(
			state.finish_refresh(newer, all_again),
			RefreshOutcome::Applied { nodes: 1, .. }
		));
		assert_eq!(state.finish_refresh(older, all), RefreshOutcome::Stale);

		let ids: Vec<_> = state.graph().nodes.iter().map(|n| n.id.as_str()).collect();
		assert_eq!(ids, ["b"]);
	}

	#[test]
	fn out_of_order_responses_keep_latest_search() {
		let (tx_a, rx_a) = oneshot::channel();
		let (tx_ab, rx_ab) = oneshot::channel();
		let store = Rc::new(GatedStore {
			gates: RefCell::new(VecDeque::from([rx_a, rx_ab])),
		});
		let state = Rc::new(RefCell::new(MindMapState::new(
			BOUNDS,
			LayoutStrategy::Grid,
			6,
		)));
		let session = Session::new("u1");

		// Each search is polled up to its fetch before the next one starts,
		// so "a" waits on the first gate and "ab" on the second.
		let mut pool = LocalPool::new();
		for term in ["a", "ab"] {
			let (state, store, session) = (state.clone(), store.clone(), session.clone());
			pool.spawner()
				.spawn_local(async move {
					let ticket = state.borrow_mut().set_search(term);
					let result = store.list_notes(&session).await;
					state.borrow_mut().finish_refresh(ticket, result);
				})
				.unwrap();
			pool.run_until_stalled();
		}

		let fetched = vec![note("x", "ab note", &[]), note("y", "a note", &[])];
		tx_ab.send(fetched.clone()).unwrap();
		pool.run_until_stalled();
		tx_a.send(fetched).unwrap();
		pool.run_until_stalled();

		let state = state.borrow();
		assert_eq!(state.query().search, "ab");
		let ids: Vec<_> = state.graph().nodes.iter().map(|n| n.id.as_str()).collect();
		assert_eq!(ids, ["x"]);
	}

	#[test]
	fn loading_tracks_latest_request() {
		let (mut state, store, service) = setup();
		let older = state.set_search("a");
		let newer = state.set_search("al");
		assert!(state.loading);

		let fetched = block_on(store.list_notes(service.session()));
		assert_eq!(state.finish_refresh(older, fetched), RefreshOutcome::Stale);
		assert!(state.loading);

		let fetched = block_on(store.list_notes(service.session()));
		state.finish_refresh(newer, fetched);
		assert!(!state.loading);
	}

	#[test]
	fn tick_advances_flow_clock() {
		let (mut state, _, _) = setup();
		assert_eq!(state.flow_time, 0.0);
		state.tick(0.5);
		state.tick(0.25);
		assert_eq!(state.flow_time, 0.75);
	}

	#[test]
	fn failed_fetch_empties_graph_and_notifies() {
		let (mut state, store, service) = setup();
		store.set_fail_reads(true);
		let outcome = block_on(state.refresh(&store, service.session()));
		assert_eq!(outcome, RefreshOutcome::Failed);
		assert!(state.graph().nodes.is_empty());
		let notices = state.take_notices();
		assert!(notices.iter().any(|n| n.level == NoticeLevel::Error));
	}

	#[test]
	fn rebuild_keeps_viewport_and_surviving_selection() {
		let (mut state, store, service) = setup();
		state.viewport.zoom_in();
		state.viewport.offset = Point::new(25.0, 30.0);
		state.click_node("b");

		block_on(state.refresh(&store, service.session()));
		assert_eq!(state.viewport.offset, Point::new(25.0, 30.0));
		assert_eq!(state.viewport.percent(), 110);
		assert_eq!(state.interaction.selected().map(String::as_str), Some("b"));

		state.set_search("gamma");
		block_on(state.refresh(&store, service.session()));
		assert_eq!(state.interaction, Interaction::Idle);
	}

	#[test]
	fn strategy_change_recenters_and_relayouts() {
		let (mut state, _, _) = setup();
		state.viewport.offset = Point::new(-40.0, 10.0);
		state.viewport.zoom_out();
		state.set_strategy(LayoutStrategy::Grid);
		assert_eq!(state.viewport.offset, Point::ORIGIN);
		assert_eq!(state.viewport.percent(), 90);
		assert_eq!(
			state.graph().nodes[0].position,
			position(0, 3, LayoutStrategy::Grid, BOUNDS)
		);
	}

	#[test]
	fn connect_mode_creates_edge_and_exits() {
		let (mut state, store, service) = setup();
		state.interaction.start_connect();

		block_on(state.click(&service, "b"));
		let outcome = block_on(state.click(&service, "c"));
		assert!(matches!(outcome, ClickOutcome::LinkRequested { .. }));
		assert!(state.graph().has_edge("b", "c"));
		assert!(!state.interaction.is_connecting());
		assert_eq!(store.note("b").unwrap().linked_notes, ["c"]);
	}

	#[test]
	fn connect_mode_same_node_twice_does_nothing() {
		let (mut state, store, service) = setup();
		state.interaction.start_connect();
		block_on(state.click(&service, "a"));
		let edges = state.graph().edges.clone();

		assert_eq!(block_on(state.click(&service, "a")), ClickOutcome::Ignored);
		assert_eq!(state.graph().edges, edges);
		assert_eq!(state.interaction.connect_source().map(String::as_str), Some("a"));
		assert_eq!(store.writes(), 0);
	}

	#[test]
	fn duplicate_link_surfaces_conflict_without_write() {
		let (mut state, store, service) = setup();
		assert!(!block_on(state.create_link(&service, "a", "b")));
		assert_eq!(store.writes(), 0);
		assert_eq!(
			state.graph().edges.iter().filter(|e| **e == Edge::new("a", "b")).count(),
			1
		);
		assert!(state.take_notices().iter().any(|n| n.level == NoticeLevel::Error));
	}

	#[test]
	fn mutation_failure_keeps_edges() {
		let (mut state, store, service) = setup();
		store.set_fail_writes(true);
		let before = state.graph().edges.clone();
		assert!(!block_on(state.delete_link(&service, "a", "b")));
		assert_eq!(state.graph().edges, before);
	}

	#[test]
	fn dragging_moves_node_and_survives_relayout() {
		let (mut state, _, _) = setup();
		let style = Theme::default().node;
		let start = state.viewport.world_to_screen(state.graph().nodes[0].position);

		state.pointer_down(start, &style);
		state.pointer_move(Point::new(start.x + 50.0, start.y + 20.0));
		let moved = state.graph().nodes[0].position;
		assert_ne!(moved, position(0, 3, LayoutStrategy::Radial, BOUNDS));

		state.resize(Bounds::new(1200.0, 900.0));
		assert_eq!(state.graph().nodes[0].position, moved);
		assert_eq!(state.pointer_up(), None);
		assert_eq!(
			state.graph().nodes[1].position,
			position(1, 3, LayoutStrategy::Radial, Bounds::new(1200.0, 900.0))
		);
	}

	#[test]
	fn released_node_keeps_position_until_rebuild() {
		let (mut state, store, service) = setup();
		let style = Theme::default().node;
		let start = state.viewport.world_to_screen(state.graph().nodes[0].position);

		state.pointer_down(start, &style);
		state.pointer_move(Point::new(start.x + 50.0, start.y + 20.0));
		assert_eq!(state.pointer_up(), None);
		let moved = state.graph().nodes[0].position;
		assert!(state.is_pinned("a"));

		state.resize(Bounds::new(1001.0, 800.0));
		state.relayout();
		assert_eq!(state.graph().nodes[0].position, moved);

		block_on(state.refresh(&store, service.session()));
		assert!(!state.is_pinned("a"));
		assert_eq!(
			state.graph().nodes[0].position,
			position(0, 3, LayoutStrategy::Radial, Bounds::new(1001.0, 800.0))
		);
	}

	#[test]
	fn strategy_switch_drops_manual_positions() {
		let (mut state, _, _) = setup();
		let style = Theme::default().node;
		let start = state.viewport.world_to_screen(state.graph().nodes[2].position);

		state.pointer_down(start, &style);
		state.pointer_move(Point::new(start.x - 40.0, start.y));
		state.pointer_up();
		assert!(state.is_pinned("c"));

		state.set_strategy(LayoutStrategy::Grid);
		assert!(!state.is_pinned("c"));
		assert_eq!(
			state.graph().nodes[2].position,
			position(2, 3, LayoutStrategy::Grid, BOUNDS)
		);
	}

	#[test]
	fn press_on_background_pans() {
		let (mut state, _, _) = setup();
		let style = Theme::default().node;
		state.pointer_down(Point::new(1.0, 1.0), &style);
		state.pointer_move(Point::new(11.0, 6.0));
		assert_eq!(state.pointer_up(), None);
		assert_eq!(state.viewport.offset, Point::new(10.0, 5.0));
	}

	#[test]
	fn press_and_release_on_node_is_a_click() {
		let (mut state, _, _) = setup();
		let style = Theme::default().node;
		let at = state.viewport.world_to_screen(state.graph().nodes[1].position);
		state.pointer_down(at, &style);
		assert_eq!(state.pointer_up().as_deref(), Some("b"));
	}
}
