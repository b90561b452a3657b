//! Pan/zoom viewport and node drag tracking.
//!
//! The render transform is `translate(offset)` followed by `scale(scale)`:
//! `screen = offset + world * scale`. Zoom steps are a plain scale change and
//! never move the offset, so zooming does not follow the pointer.

use super::types::{NoteId, Point};

/// Smallest zoom scale.
pub const MIN_SCALE: f64 = 0.5;
/// Largest zoom scale.
pub const MAX_SCALE: f64 = 2.0;
/// Scale change per zoom step.
pub const ZOOM_STEP: f64 = 0.1;

/// Pointer travel (screen pixels) below which a press on a node is a click.
pub const DRAG_THRESHOLD: f64 = 3.0;

/// Tracks an in-progress background pan.
#[derive(Clone, Debug, Default)]
pub struct PanState {
	/// Whether a pan is in progress.
	pub active: bool,
	/// `pointer - offset` captured when the pan began.
	pub anchor: Point,
}

/// Zoom scale and pan offset applied to the whole mind map.
#[derive(Clone, Debug)]
pub struct Viewport {
	scale: f64,
	/// Screen position of the world origin.
	pub offset: Point,
	/// Pan in progress.
	pub pan: PanState,
}

impl Default for Viewport {
	fn default() -> Self {
		Self {
			scale: 1.0,
			offset: Point::ORIGIN,
			pan: PanState::default(),
		}
	}
}

impl Viewport {
	/// Current zoom scale.
	pub fn scale(&self) -> f64 {
		self.scale
	}

	/// Scale rounded to a whole percentage, for display.
	pub fn percent(&self) -> u32 {
		(self.scale * 100.0).round() as u32
	}

	/// One step closer, up to [`MAX_SCALE`].
	pub fn zoom_in(&mut self) {
		self.scale = (self.scale + ZOOM_STEP).clamp(MIN_SCALE, MAX_SCALE);
	}

	/// One step out, down to [`MIN_SCALE`].
	pub fn zoom_out(&mut self) {
		self.scale = (self.scale - ZOOM_STEP).clamp(MIN_SCALE, MAX_SCALE);
	}

	/// Starts a pan. Presses that landed on a node are left to the node.
	pub fn begin_pan(&mut self, pointer: Point, on_background: bool) -> bool {
		if !on_background {
			return false;
		}
		self.pan = PanState {
			active: true,
			anchor: pointer - self.offset,
		};
		true
	}

	/// Follows the pointer while panning.
	pub fn update_pan(&mut self, pointer: Point) {
		if self.pan.active {
			self.offset = pointer - self.pan.anchor;
		}
	}

	/// Stops panning.
	pub fn end_pan(&mut self) {
		self.pan.active = false;
	}

	/// Whether a pan is in progress.
	pub fn is_panning(&self) -> bool {
		self.pan.active
	}

	/// Back to 100% zoom at the origin.
	pub fn reset_view(&mut self) {
		self.scale = 1.0;
		self.offset = Point::ORIGIN;
	}

	/// Moves the view back to the layout origin without touching zoom.
	pub fn recenter(&mut self) {
		self.offset = Point::ORIGIN;
	}

	/// Maps a world point to the canvas.
	pub fn world_to_screen(&self, world: Point) -> Point {
		Point::new(
			self.offset.x + world.x * self.scale,
			self.offset.y + world.y * self.scale,
		)
	}

	/// Maps a canvas point to world space.
	pub fn screen_to_world(&self, screen: Point) -> Point {
		Point::new(
			(screen.x - self.offset.x) / self.scale,
			(screen.y - self.offset.y) / self.scale,
		)
	}
}

/// Tracks a press on a node that may turn into a drag.
#[derive(Clone, Debug, Default)]
pub struct DragState {
	/// Node under the press.
	pub node: Option<NoteId>,
	/// Set once the pointer has moved past [`DRAG_THRESHOLD`].
	pub moved: bool,
	/// Pointer position at press time.
	pub start: Point,
	/// Node position at press time.
	pub node_start: Point,
}

impl DragState {
	/// Records a press on `node`.
	pub fn begin(&mut self, node: NoteId, pointer: Point, node_position: Point) {
		*self = DragState {
			node: Some(node),
			moved: false,
			start: pointer,
			node_start: node_position,
		};
	}

	/// New graph-space position for the pressed node, once the press has
	/// become a drag.
	pub fn update(&mut self, pointer: Point, scale: f64) -> Option<(&NoteId, Point)> {
		self.node.as_ref()?;
		if !self.moved && pointer.distance(self.start) < DRAG_THRESHOLD {
			return None;
		}
		self.moved = true;
		let node = self.node.as_ref()?;
		let delta = pointer - self.start;
		Some((
			node,
			Point::new(
				self.node_start.x + delta.x / scale,
				self.node_start.y + delta.y / scale,
			),
		))
	}

	/// Ends the press. Returns the node id when it was a click rather than a drag.
	pub fn end(&mut self) -> Option<NoteId> {
		let state = std::mem::take(self);
		match state.node {
			Some(id) if !state.moved => Some(id),
			_ => None,
		}
	}

	/// Node currently being dragged, if the press has moved.
	pub fn dragging(&self) -> Option<&NoteId> {
		self.node.as_ref().filter(|_| self.moved)
	}
}
