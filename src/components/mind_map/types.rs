//! Note records and the graph data structures derived from them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Identifier of a note. Nodes share the id of the note they mirror.
pub type NoteId = String;

/// Shown in place of a blank note title.
pub const UNTITLED_NOTE: &str = "Untitled note";

/// A note record as returned by the note store, scoped to one user.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Note {
	/// Unique id of the note.
	pub id: NoteId,
	/// Display title. Blank titles render as [`UNTITLED_NOTE`].
	#[serde(default, deserialize_with = "null_as_default")]
	pub title: String,
	/// Note body. Not drawn on the map.
	#[serde(default, deserialize_with = "null_as_default")]
	pub content: String,
	/// Missing or `null` in store payloads decodes as no tags.
	#[serde(default, deserialize_with = "null_as_default")]
	pub tags: Vec<String>,
	/// Outgoing links, by target note id.
	#[serde(default, deserialize_with = "null_as_default")]
	pub linked_notes: Vec<NoteId>,
	/// Creation time.
	pub created_at: DateTime<Utc>,
	/// Last write, bumped by every link change.
	pub updated_at: DateTime<Utc>,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
	D: Deserializer<'de>,
	T: Default + Deserialize<'de>,
{
	Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// A point in graph space (or screen space, depending on context).
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
	/// Horizontal coordinate.
	pub x: f64,
	/// Vertical coordinate.
	pub y: f64,
}

impl Point {
	/// The point (0, 0).
	pub const ORIGIN: Point = Point { x: 0.0, y: 0.0 };

	/// Point at (`x`, `y`).
	pub const fn new(x: f64, y: f64) -> Self {
		Self { x, y }
	}

	/// Euclidean distance.
	pub fn distance(self, other: Point) -> f64 {
		((self.x - other.x).powi(2) + (self.y - other.y).powi(2)).sqrt()
	}
}

impl std::ops::Sub for Point {
	type Output = Point;

	fn sub(self, rhs: Point) -> Point {
		Point::new(self.x - rhs.x, self.y - rhs.y)
	}
}

impl std::ops::Add for Point {
	type Output = Point;

	fn add(self, rhs: Point) -> Point {
		Point::new(self.x + rhs.x, self.y + rhs.y)
	}
}

/// Size of the drawing surface that layouts are fitted into.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
	/// Width in pixels.
	pub width: f64,
	/// Height in pixels.
	pub height: f64,
}

impl Bounds {
	/// Surface of `width` by `height` pixels.
	pub const fn new(width: f64, height: f64) -> Self {
		Self { width, height }
	}

	/// Middle of the surface.
	pub fn center(&self) -> Point {
		Point::new(self.width / 2.0, self.height / 2.0)
	}
}

impl Default for Bounds {
	fn default() -> Self {
		Self::new(800.0, 600.0)
	}
}

/// A note as placed on the mind map.
#[derive(Clone, Debug, PartialEq)]
pub struct Node {
	/// Id of the mirrored note.
	pub id: NoteId,
	/// Display title.
	pub title: String,
	/// Centre of the card in world space.
	pub position: Point,
	/// Tags drawn as pills.
	pub tags: Vec<String>,
	/// `build index mod palette size`; recomputed on every rebuild.
	pub color_index: usize,
}

/// A directed link from `source` to `target`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Edge {
	/// Note holding the link.
	pub source: NoteId,
	/// Linked note.
	pub target: NoteId,
}

impl Edge {
	/// Edge `source -> target`.
	pub fn new(source: impl Into<NoteId>, target: impl Into<NoteId>) -> Self {
		Self {
			source: source.into(),
			target: target.into(),
		}
	}
}
