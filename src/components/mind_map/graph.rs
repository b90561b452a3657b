//! Graph model builder.
//!
//! Turns the flat note list into a [`GraphSnapshot`]: one node per note that
//! survives the active search and tag filters, and one edge per link whose
//! both ends survived. Links pointing at filtered-out or deleted notes are
//! dropped here; they are normal steady-state data, not errors.

use std::collections::HashSet;

use log::debug;

use super::types::{Edge, Node, Note, NoteId, Point, UNTITLED_NOTE};

/// Filters applied when building a snapshot.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GraphQuery {
	/// Case-insensitive substring matched against title or content.
	pub search: String,
	/// A note passes when it carries at least one of these tags.
	/// Empty means no tag constraint.
	pub tags: Vec<String>,
}

impl GraphQuery {
	/// Whether `note` passes both the search term and the tag filter.
	pub fn matches(&self, note: &Note) -> bool {
		self.matches_search(note) && self.matches_tags(note)
	}

	/// The term is used verbatim: whitespace is part of the substring.
	fn matches_search(&self, note: &Note) -> bool {
		let term = self.search.to_lowercase();
		term.is_empty()
			|| note.title.to_lowercase().contains(&term)
			|| note.content.to_lowercase().contains(&term)
	}

	fn matches_tags(&self, note: &Note) -> bool {
		self.tags.is_empty() || note.tags.iter().any(|t| self.tags.contains(t))
	}
}

/// Immutable result of one build. Positions start at the origin and are
/// filled in by the layout pass.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GraphSnapshot {
	/// Nodes in build order.
	pub nodes: Vec<Node>,
	/// Directed links between nodes in `nodes`.
	pub edges: Vec<Edge>,
}

impl GraphSnapshot {
	/// Looks up a node by note id.
	pub fn node(&self, id: &str) -> Option<&Node> {
		self.nodes.iter().find(|n| n.id == id)
	}

	/// Mutable lookup, used while dragging.
	pub fn node_mut(&mut self, id: &str) -> Option<&mut Node> {
		self.nodes.iter_mut().find(|n| n.id == id)
	}

	/// Whether a node with this id is present.
	pub fn contains(&self, id: &str) -> bool {
		self.node(id).is_some()
	}

	/// Whether the edge `source -> target` exists.
	pub fn has_edge(&self, source: &str, target: &str) -> bool {
		self.edges
			.iter()
			.any(|e| e.source == source && e.target == target)
	}

	/// Outgoing edges of `source`, in insertion order.
	pub fn links_from<'a>(&'a self, source: &'a str) -> impl Iterator<Item = &'a Edge> + 'a {
		self.edges.iter().filter(move |e| e.source == source)
	}

	/// Adds an edge if both endpoints are present and it does not exist yet.
	/// Returns whether the edge set changed.
	pub fn insert_edge(&mut self, edge: Edge) -> bool {
		if edge.source == edge.target
			|| !self.contains(&edge.source)
			|| !self.contains(&edge.target)
			|| self.has_edge(&edge.source, &edge.target)
		{
			return false;
		}
		self.edges.push(edge);
		true
	}

	/// Removes the edge if present. Returns whether the edge set changed.
	pub fn remove_edge(&mut self, source: &str, target: &str) -> bool {
		let before = self.edges.len();
		self.edges
			.retain(|e| !(e.source == source && e.target == target));
		self.edges.len() != before
	}

	/// All distinct tags across the current nodes, sorted.
	pub fn tags(&self) -> Vec<String> {
		distinct_sorted(self.nodes.iter().flat_map(|n| &n.tags))
	}
}

/// All distinct tags across `notes`, sorted. Used for the filter chips, which
/// must not shrink as the filter narrows the graph.
pub fn note_tags(notes: &[Note]) -> Vec<String> {
	distinct_sorted(notes.iter().flat_map(|n| &n.tags))
}

fn distinct_sorted<'a>(tags: impl Iterator<Item = &'a String>) -> Vec<String> {
	let mut tags: Vec<String> = tags.cloned().collect::<HashSet<_>>().into_iter().collect();
	tags.sort();
	tags
}

/// Builds a fresh snapshot from `notes`, preserving their order.
pub fn build_graph(notes: &[Note], query: &GraphQuery, palette_size: usize) -> GraphSnapshot {
	let palette_size = palette_size.max(1);
	let surviving: Vec<&Note> = notes.iter().filter(|n| query.matches(n)).collect();
	let ids: HashSet<&str> = surviving.iter().map(|n| n.id.as_str()).collect();

	let nodes = surviving
		.iter()
		.enumerate()
		.map(|(i, note)| Node {
			id: note.id.clone(),
			title: display_title(&note.title),
			position: Point::ORIGIN,
			tags: note.tags.clone(),
			color_index: i % palette_size,
		})
		.collect();

	let mut seen: HashSet<(&str, &str)> = HashSet::new();
	let mut edges = Vec::new();
	let mut dropped = 0usize;
	for note in &surviving {
		for target in &note.linked_notes {
			if target == &note.id || !ids.contains(target.as_str()) {
				dropped += 1;
				continue;
			}
			if seen.insert((note.id.as_str(), target.as_str())) {
				edges.push(Edge::new(note.id.clone(), target.clone()));
			}
		}
	}

	debug!(
		"mindmap: built graph with {} of {} notes, {} edges ({} links dropped)",
		surviving.len(),
		notes.len(),
		edges.len(),
		dropped
	);

	GraphSnapshot { nodes, edges }
}

fn display_title(title: &str) -> String {
	if title.trim().is_empty() {
		UNTITLED_NOTE.to_string()
	} else {
		title.to_string()
	}
}

/// Ids of `previous` nodes that are absent from `next`.
pub fn missing_ids(previous: &GraphSnapshot, next: &GraphSnapshot) -> Vec<NoteId> {
	previous
		.nodes
		.iter()
		.filter(|n| !next.contains(&n.id))
		.map(|n| n.id.clone())
		.collect()
}

#[cfg(test)]
pub(crate) mod tests {
	use chrono::{TimeZone, Utc};

	use super::*;

	pub(crate) fn note(id: &str, title: &str, links: &[&str]) -> Note {
		let at = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
		Note {
			id: id.to_string(),
			title: title.to_string(),
			content: String::new(),
			tags: Vec::new(),
			linked_notes: links.iter().map(|s| s.to_string()).collect(),
			created_at: at,
			updated_at: at,
		}
	}

	fn search(term: &str) -> GraphQuery {
		GraphQuery {
			search: term.to_string(),
			tags: Vec::new(),
		}
	}

	#[test]
	fn link_to_filtered_out_note_is_dropped() {
		let notes = vec![note("a", "Apple", &["b"]), note("b", "Banana", &[])];

		let full = build_graph(&notes, &GraphQuery::default(), 6);
		assert_eq!(full.edges, vec![Edge::new("a", "b")]);

		let filtered = build_graph(&notes, &search("apple"), 6);
		assert_eq!(filtered.nodes.len(), 1);
		assert!(filtered.edges.is_empty());
	}

	#[test]
	fn dangling_duplicate_and_self_links_are_dropped() {
		let notes = vec![
			note("a", "A", &["b", "b", "gone", "a"]),
			note("b", "B", &["a"]),
		];
		let graph = build_graph(&notes, &GraphQuery::default(), 6);
		assert_eq!(graph.edges, vec![Edge::new("a", "b"), Edge::new("b", "a")]);
	}

	#[test]
	fn search_matches_content_case_insensitively() {
		let mut b = note("b", "Groceries", &[]);
		b.content = "Buy RUST-coloured paint".into();
		let notes = vec![note("a", "Ideas", &[]), b];

		let graph = build_graph(&notes, &search("rust"), 6);
		let ids: Vec<_> = graph.nodes.iter().map(|n| n.id.as_str()).collect();
		assert_eq!(ids, ["b"]);
	}

	#[test]
	fn whitespace_search_is_not_trimmed() {
		let notes = vec![note("a", "Two words", &[]), note("b", "Single", &[])];
		let graph = build_graph(&notes, &search(" "), 6);
		let ids: Vec<_> = graph.nodes.iter().map(|n| n.id.as_str()).collect();
		assert_eq!(ids, ["a"]);
	}

	#[test]
	fn tag_filter_requires_intersection() {
		let mut a = note("a", "A", &[]);
		a.tags = vec!["work".into(), "urgent".into()];
		let mut b = note("b", "B", &[]);
		b.tags = vec!["home".into()];
		let c = note("c", "C", &[]);

		let query = GraphQuery {
			search: String::new(),
			tags: vec!["urgent".into(), "misc".into()],
		};
		let graph = build_graph(&[a, b, c], &query, 6);
		assert_eq!(graph.nodes.len(), 1);
		assert_eq!(graph.nodes[0].id, "a");
	}

	#[test]
	fn note_tags_ignore_the_filter() {
		let mut a = note("a", "A", &[]);
		a.tags = vec!["work".into(), "urgent".into()];
		let mut b = note("b", "B", &[]);
		b.tags = vec!["home".into(), "work".into()];
		let notes = [a, b];

		assert_eq!(note_tags(&notes), ["home", "urgent", "work"]);
		let query = GraphQuery {
			search: String::new(),
			tags: vec!["home".into()],
		};
		assert_eq!(build_graph(&notes, &query, 6).tags(), ["home", "work"]);
	}

	#[test]
	fn color_index_follows_build_order() {
		let notes: Vec<Note> = (0..8).map(|i| note(&format!("n{i}"), "x", &[])).collect();
		let graph = build_graph(&notes, &GraphQuery::default(), 6);
		let colors: Vec<usize> = graph.nodes.iter().map(|n| n.color_index).collect();
		assert_eq!(colors, [0, 1, 2, 3, 4, 5, 0, 1]);
	}

	#[test]
	fn blank_title_gets_placeholder() {
		let graph = build_graph(&[note("a", "  ", &[])], &GraphQuery::default(), 6);
		assert_eq!(graph.nodes[0].title, UNTITLED_NOTE);
	}

	#[test]
	fn insert_edge_rejects_unknown_endpoints_and_duplicates() {
		let mut graph = build_graph(
			&[note("a", "A", &[]), note("b", "B", &[])],
			&GraphQuery::default(),
			6,
		);
		assert!(graph.insert_edge(Edge::new("a", "b")));
		assert!(!graph.insert_edge(Edge::new("a", "b")));
		assert!(!graph.insert_edge(Edge::new("a", "zzz")));
		assert!(!graph.insert_edge(Edge::new("a", "a")));
		assert!(graph.remove_edge("a", "b"));
		assert!(!graph.remove_edge("a", "b"));
		assert!(graph.edges.is_empty());
	}
}
