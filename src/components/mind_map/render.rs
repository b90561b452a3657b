//! Canvas rendering for the mind map.
//!
//! Rendering is a pure function of [`MindMapState`] and the theme. Passes, in
//! z-order:
//! 1. Background (screen space)
//! 2. Link curves, arrowheads and the pulses flowing along them (world space)
//! 3. Node glows, then node cards with title and tags

use std::f64::consts::PI;

use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

use super::graph::GraphSnapshot;
use super::state::MindMapState;
use super::theme::{Color, Theme};
use super::types::{Node, Point};

/// Tags shown on a card before collapsing the rest into `+N`.
const VISIBLE_TAGS: usize = 2;
/// Characters of title that fit on a card.
const TITLE_CHARS: usize = 18;

/// Renders the complete mind map to the canvas.
pub fn render(state: &MindMapState, ctx: &CanvasRenderingContext2d, theme: &Theme) {
	let bounds = state.bounds();
	ctx.set_fill_style_str(&theme.background.to_css());
	ctx.fill_rect(0.0, 0.0, bounds.width, bounds.height);

	ctx.save();
	let _ = ctx.translate(state.viewport.offset.x, state.viewport.offset.y);
	let _ = ctx.scale(state.viewport.scale(), state.viewport.scale());

	draw_edges(state.graph(), ctx, theme, state.flow_time);
	draw_nodes(state, ctx, theme);

	ctx.restore();
}

/// Control points of the S-shaped cubic used for a link.
pub fn link_curve(from: Point, to: Point, curvature: f64) -> [Point; 4] {
	let (dx, dy) = (to.x - from.x, to.y - from.y);
	let bend = (dx * dx + dy * dy).sqrt() * curvature;
	[
		from,
		Point::new(from.x + dx * 0.25, from.y + dy * 0.25 - bend),
		Point::new(from.x + dx * 0.75, from.y + dy * 0.75 + bend),
		to,
	]
}

/// Point at parameter `t` in `[0, 1]` on a cubic Bezier curve.
pub fn curve_point(curve: [Point; 4], t: f64) -> Point {
	let [p0, p1, p2, p3] = curve;
	let mt = 1.0 - t;
	let (a, b, c, d) = (mt * mt * mt, 3.0 * mt * mt * t, 3.0 * mt * t * t, t * t * t);
	Point::new(
		a * p0.x + b * p1.x + c * p2.x + d * p3.x,
		a * p0.y + b * p1.y + c * p2.y + d * p3.y,
	)
}

/// How far along its link a pulse is, wrapping every `1 / speed` seconds.
pub fn flow_progress(flow_time: f64, speed: f64) -> f64 {
	(flow_time * speed).rem_euclid(1.0)
}

/// Where a ray from `toward` to the centre of a card crosses its border.
pub fn card_boundary(center: Point, toward: Point, half_w: f64, half_h: f64) -> Point {
	let (dx, dy) = (toward.x - center.x, toward.y - center.y);
	if dx.abs() < f64::EPSILON && dy.abs() < f64::EPSILON {
		return center;
	}
	let tx = if dx.abs() > f64::EPSILON { half_w / dx.abs() } else { f64::INFINITY };
	let ty = if dy.abs() > f64::EPSILON { half_h / dy.abs() } else { f64::INFINITY };
	let t = tx.min(ty).min(1.0);
	Point::new(center.x + dx * t, center.y + dy * t)
}

/// Title cut to fit on a card, with an ellipsis when shortened.
pub fn truncate_title(title: &str) -> String {
	if title.chars().count() <= TITLE_CHARS {
		title.to_string()
	} else {
		let cut: String = title.chars().take(TITLE_CHARS - 1).collect();
		format!("{cut}…")
	}
}

fn draw_edges(graph: &GraphSnapshot, ctx: &CanvasRenderingContext2d, theme: &Theme, flow_time: f64) {
	let style = &theme.edge;
	let (half_w, half_h) = (theme.node.width / 2.0, theme.node.height / 2.0);
	let progress = flow_progress(flow_time, style.flow_speed);

	ctx.set_stroke_style_str(&style.color.to_css());
	ctx.set_fill_style_str(&style.color.to_css());
	ctx.set_line_width(style.width);

	for edge in &graph.edges {
		let (Some(source), Some(target)) = (graph.node(&edge.source), graph.node(&edge.target))
		else {
			continue;
		};
		if source.position.distance(target.position) < 0.001 {
			continue;
		}

		let [p0, p1, p2, p3] = link_curve(source.position, target.position, style.curvature);
		let tip = card_boundary(p3, p2, half_w, half_h);

		ctx.begin_path();
		ctx.move_to(p0.x, p0.y);
		ctx.bezier_curve_to(p1.x, p1.y, p2.x, p2.y, tip.x, tip.y);
		ctx.stroke();

		draw_arrowhead(ctx, p2, tip, style.arrow_size);

		if style.flow_speed > 0.0 {
			let pulse = curve_point([p0, p1, p2, tip], progress);
			ctx.set_fill_style_str(&style.pulse_color.to_css());
			ctx.begin_path();
			let _ = ctx.arc(pulse.x, pulse.y, style.pulse_radius, 0.0, 2.0 * PI);
			ctx.fill();
			ctx.set_fill_style_str(&style.color.to_css());
		}
	}
}

fn draw_arrowhead(ctx: &CanvasRenderingContext2d, from: Point, tip: Point, size: f64) {
	let dist = from.distance(tip);
	if dist < 0.001 {
		return;
	}
	let (ux, uy) = ((tip.x - from.x) / dist, (tip.y - from.y) / dist);
	let (back_x, back_y) = (tip.x - ux * size, tip.y - uy * size);
	let (px, py) = (-uy * size * 0.5, ux * size * 0.5);

	ctx.begin_path();
	ctx.move_to(tip.x, tip.y);
	ctx.line_to(back_x + px, back_y + py);
	ctx.line_to(back_x - px, back_y - py);
	ctx.close_path();
	ctx.fill();
}

fn draw_nodes(state: &MindMapState, ctx: &CanvasRenderingContext2d, theme: &Theme) {
	let selected = state.interaction.selected();
	let source = state.interaction.connect_source();

	if theme.node.glow_intensity > 0.0 {
		for node in &state.graph().nodes {
			draw_node_glow(ctx, node, theme);
		}
	}

	for node in &state.graph().nodes {
		let is_source = source == Some(&node.id);
		let border = if is_source {
			theme.node.source_border
		} else if selected == Some(&node.id) {
			theme.node.selected_border
		} else {
			theme.node.border
		};
		draw_card(ctx, node, theme, border, is_source);
	}
}

fn draw_node_glow(ctx: &CanvasRenderingContext2d, node: &Node, theme: &Theme) {
	let Point { x, y } = node.position;
	let accent = theme.palette.get(node.color_index);
	let radius = theme.node.height * 0.6;

	let Ok(gradient) = ctx.create_radial_gradient(x, y, radius * 0.3, x, y, radius * 1.6) else {
		return;
	};
	let _ = gradient.add_color_stop(
		0.0,
		&accent.from.with_alpha(theme.node.glow_intensity).to_css(),
	);
	let _ = gradient.add_color_stop(1.0, "rgba(0, 0, 0, 0)");

	ctx.begin_path();
	let _ = ctx.arc(x, y, radius * 1.6, 0.0, 2.0 * PI);
	#[allow(deprecated)]
	ctx.set_fill_style(&gradient);
	ctx.fill();
}

fn rounded_rect(ctx: &CanvasRenderingContext2d, x: f64, y: f64, w: f64, h: f64, r: f64) {
	let r = r.min(w / 2.0).min(h / 2.0);
	ctx.begin_path();
	ctx.move_to(x + r, y);
	let _ = ctx.arc_to(x + w, y, x + w, y + h, r);
	let _ = ctx.arc_to(x + w, y + h, x, y + h, r);
	let _ = ctx.arc_to(x, y + h, x, y, r);
	let _ = ctx.arc_to(x, y, x + w, y, r);
	ctx.close_path();
}

fn draw_card(
	ctx: &CanvasRenderingContext2d,
	node: &Node,
	theme: &Theme,
	border: Color,
	dashed: bool,
) {
	let style = &theme.node;
	let Point { x, y } = node.position;
	let (left, top) = (x - style.width / 2.0, y - style.height / 2.0);
	let accent = theme.palette.get(node.color_index);

	rounded_rect(ctx, left, top, style.width, style.height, style.corner_radius);
	ctx.set_fill_style_str(&style.fill.to_css());
	ctx.fill();
	ctx.set_stroke_style_str(&border.to_css());
	ctx.set_line_width(2.0);
	if dashed {
		let _ = ctx.set_line_dash(&js_sys::Array::of2(
			&JsValue::from_f64(6.0),
			&JsValue::from_f64(4.0),
		));
	}
	ctx.stroke();
	if dashed {
		let _ = ctx.set_line_dash(&js_sys::Array::new());
	}

	// Accent bar along the top edge.
	let gradient = ctx.create_linear_gradient(left, top, left + style.width, top);
	let _ = gradient.add_color_stop(0.0, &accent.from.to_css());
	let _ = gradient.add_color_stop(1.0, &accent.to.to_css());
	#[allow(deprecated)]
	ctx.set_fill_style(&gradient);
	ctx.fill_rect(
		left + style.corner_radius,
		top,
		style.width - 2.0 * style.corner_radius,
		3.0,
	);

	let has_tags = !node.tags.is_empty();
	let title_y = if has_tags { y - 10.0 } else { y };
	ctx.set_text_align("center");
	ctx.set_text_baseline("middle");
	ctx.set_font("500 14px sans-serif");
	ctx.set_fill_style_str(&style.title_color.to_css());
	let _ = ctx.fill_text(&truncate_title(&node.title), x, title_y);

	if has_tags {
		draw_tags(ctx, node, theme, y + 16.0);
	}
}

fn draw_tags(ctx: &CanvasRenderingContext2d, node: &Node, theme: &Theme, y: f64) {
	let style = &theme.node;
	ctx.set_font("10px sans-serif");

	let mut labels: Vec<String> = node.tags.iter().take(VISIBLE_TAGS).cloned().collect();
	if node.tags.len() > VISIBLE_TAGS {
		labels.push(format!("+{}", node.tags.len() - VISIBLE_TAGS));
	}

	let widths: Vec<f64> = labels
		.iter()
		.map(|l| {
			ctx.measure_text(l)
				.map(|m| m.width())
				.unwrap_or(l.len() as f64 * 6.0)
				+ 12.0
		})
		.collect();
	let gap = 4.0;
	let total: f64 = widths.iter().sum::<f64>() + gap * (widths.len() as f64 - 1.0);
	let mut left = node.position.x - total / 2.0;

	for (label, width) in labels.iter().zip(widths) {
		rounded_rect(ctx, left, y - 8.0, width, 16.0, 8.0);
		ctx.set_fill_style_str(&style.tag_fill.to_css());
		ctx.fill();
		ctx.set_fill_style_str(&style.tag_color.to_css());
		let _ = ctx.fill_text(label, left + width / 2.0, y);
		left += width + gap;
	}
}
