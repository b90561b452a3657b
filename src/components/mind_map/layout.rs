//! Closed-form layout strategies.
//!
//! Every strategy is a pure function of `(index, total, bounds)`: calling it
//! twice with the same inputs yields the same point. Coordinates are in graph
//! space, before the viewport's pan and zoom are applied.

use std::f64::consts::TAU;

use serde::{Deserialize, Serialize};

use super::types::{Bounds, Point};

/// Fraction of the shorter bounds side used as the radial layout radius.
const RADIAL_RADIUS_FACTOR: f64 = 0.35;

/// How nodes are arranged on the canvas.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayoutStrategy {
	/// Evenly spaced on a circle around the centre.
	#[default]
	Radial,
	/// Complete-binary-tree slots by build order; edges are not consulted.
	Tree,
	/// Row-major grid with `ceil(sqrt(total))` columns.
	Grid,
	/// Nominal force layout. No simulation runs: every node sits at the
	/// centre. Unrecognized strategy names decode to this variant.
	#[serde(other)]
	Force,
}

impl LayoutStrategy {
	/// Every strategy, in toolbar order.
	pub const ALL: [LayoutStrategy; 4] = [
		LayoutStrategy::Radial,
		LayoutStrategy::Tree,
		LayoutStrategy::Force,
		LayoutStrategy::Grid,
	];

	/// Toolbar caption.
	pub fn label(self) -> &'static str {
		match self {
			LayoutStrategy::Radial => "Radial",
			LayoutStrategy::Tree => "Tree",
			LayoutStrategy::Grid => "Grid",
			LayoutStrategy::Force => "Force",
		}
	}
}

/// Position of node `index` out of `total` for the given strategy.
pub fn position(index: usize, total: usize, strategy: LayoutStrategy, bounds: Bounds) -> Point {
	let total = total.max(1);
	match strategy {
		LayoutStrategy::Radial => radial(index, total, bounds),
		LayoutStrategy::Grid => grid(index, total, bounds),
		LayoutStrategy::Tree => tree(index, total, bounds),
		LayoutStrategy::Force => bounds.center(),
	}
}

/// Positions for all `total` nodes, in index order.
pub fn layout_all(total: usize, strategy: LayoutStrategy, bounds: Bounds) -> Vec<Point> {
	(0..total)
		.map(|i| position(i, total, strategy, bounds))
		.collect()
}

fn radial(index: usize, total: usize, bounds: Bounds) -> Point {
	let center = bounds.center();
	let radius = bounds.width.min(bounds.height) * RADIAL_RADIUS_FACTOR;
	let angle = TAU * index as f64 / total as f64;
	Point::new(
		center.x + radius * angle.cos(),
		center.y + radius * angle.sin(),
	)
}

fn grid(index: usize, total: usize, bounds: Bounds) -> Point {
	let cols = (total as f64).sqrt().ceil().max(1.0) as usize;
	let rows = total.div_ceil(cols);
	let (row, col) = (index / cols, index % cols);
	let cell_w = bounds.width / cols as f64;
	let cell_h = bounds.height / rows as f64;
	Point::new((col as f64 + 0.5) * cell_w, (row as f64 + 0.5) * cell_h)
}

fn tree(index: usize, total: usize, bounds: Bounds) -> Point {
	let level = (index + 1).ilog2();
	let first_in_level = (1usize << level) - 1;
	let slot = index - first_in_level;
	let slots = (1usize << level) as f64;
	let depth = ((total + 1) as f64).log2().ceil().max(1.0);
	Point::new(
		(slot as f64 + 0.5) * bounds.width / slots,
		(level as f64 + 1.0) * bounds.height / (depth + 1.0),
	)
}

#[cfg(test)]
mod tests {
	use std::f64::consts::PI;

	use super::*;

	const EPS: f64 = 1e-9;
	const BOUNDS: Bounds = Bounds::new(1000.0, 800.0);

	#[test]
	fn every_strategy_yields_total_finite_points() {
		for strategy in LayoutStrategy::ALL {
			for total in [1, 2, 3, 7, 9, 16, 31, 100] {
				let points = layout_all(total, strategy, BOUNDS);
				assert_eq!(points.len(), total, "{strategy:?} total={total}");
				for p in points {
					assert!(p.x.is_finite() && p.y.is_finite(), "{strategy:?} {p:?}");
				}
			}
		}
	}

	#[test]
	fn layout_is_deterministic() {
		for strategy in LayoutStrategy::ALL {
			assert_eq!(
				layout_all(13, strategy, BOUNDS),
				layout_all(13, strategy, BOUNDS)
			);
		}
	}

	#[test]
	fn radial_four_nodes_sit_on_quarter_turns() {
		let center = BOUNDS.center();
		let expected = [0.0, PI / 2.0, PI, 3.0 * PI / 2.0];
		for (i, p) in layout_all(4, LayoutStrategy::Radial, BOUNDS).iter().enumerate() {
			let angle = (p.y - center.y).atan2(p.x - center.x).rem_euclid(TAU);
			assert!((angle - expected[i]).abs() < EPS, "node {i}: {angle}");
			assert!((p.distance(center) - 800.0 * 0.35).abs() < EPS);
		}
	}

	#[test]
	fn radial_single_node_is_at_angle_zero() {
		let p = position(0, 1, LayoutStrategy::Radial, BOUNDS);
		assert!((p.x - (500.0 + 280.0)).abs() < EPS);
		assert!((p.y - 400.0).abs() < EPS);
	}

	#[test]
	fn grid_of_nine_is_three_by_three() {
		let points = layout_all(9, LayoutStrategy::Grid, BOUNDS);
		let mut xs: Vec<i64> = points.iter().map(|p| p.x.round() as i64).collect();
		let mut ys: Vec<i64> = points.iter().map(|p| p.y.round() as i64).collect();
		xs.sort();
		xs.dedup();
		ys.sort();
		ys.dedup();
		assert_eq!(xs.len(), 3);
		assert_eq!(ys.len(), 3);

		let first = points[0];
		assert!((first.x - 1000.0 / 6.0).abs() < EPS);
		assert!((first.y - 800.0 / 6.0).abs() < EPS);
	}

	#[test]
	fn tree_places_levels_by_index() {
		let points = layout_all(7, LayoutStrategy::Tree, BOUNDS);
		// depth = ceil(log2(8)) = 3, so level spacing is 800 / 4
		assert!((points[0].x - 500.0).abs() < EPS);
		assert!((points[0].y - 200.0).abs() < EPS);
		assert!((points[1].x - 250.0).abs() < EPS);
		assert!((points[2].x - 750.0).abs() < EPS);
		assert!((points[1].y - 400.0).abs() < EPS);
		assert!((points[3].x - 125.0).abs() < EPS);
		assert!((points[6].y - 600.0).abs() < EPS);
	}

	#[test]
	fn force_falls_back_to_center() {
		for p in layout_all(5, LayoutStrategy::Force, BOUNDS) {
			assert_eq!(p, BOUNDS.center());
		}
	}

	#[test]
	fn unknown_strategy_name_decodes_to_fallback() {
		let parsed: LayoutStrategy = serde_json::from_str("\"spiral\"").unwrap();
		assert_eq!(parsed, LayoutStrategy::Force);
		let parsed: LayoutStrategy = serde_json::from_str("\"grid\"").unwrap();
		assert_eq!(parsed, LayoutStrategy::Grid);
	}
}
