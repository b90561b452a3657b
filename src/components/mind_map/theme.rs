//! Visual theming for the mind map canvas.
//!
//! Nodes only carry a `color_index`; the palette here turns it into actual
//! colours, so switching themes never requires a graph rebuild.

/// RGBA color representation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
	/// Red channel.
	pub r: u8,
	/// Green channel.
	pub g: u8,
	/// Blue channel.
	pub b: u8,
	/// Opacity, 0.0 to 1.0.
	pub a: f64,
}

impl Color {
	/// Opaque colour.
	pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
		Self { r, g, b, a: 1.0 }
	}

	/// Colour with opacity `a`.
	pub const fn rgba(r: u8, g: u8, b: u8, a: f64) -> Self {
		Self { r, g, b, a }
	}

	/// Same colour with another opacity.
	pub fn with_alpha(self, a: f64) -> Self {
		Self { a, ..self }
	}

	/// CSS colour string.
	pub fn to_css(self) -> String {
		if (self.a - 1.0).abs() < 0.001 {
			format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
		} else {
			format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
		}
	}
}

/// Two-stop accent used for a node's glow and header bar.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Accent {
	/// Start colour of the gradient.
	pub from: Color,
	/// End colour of the gradient.
	pub to: Color,
}

impl Accent {
	const fn new(from: Color, to: Color) -> Self {
		Self { from, to }
	}
}

/// Accent colours indexed by a node's `color_index`.
#[derive(Clone, Debug)]
pub struct NodePalette {
	/// Accents in index order.
	pub accents: Vec<Accent>,
}

impl NodePalette {
	/// Saturated gradients on a dark background (default)
	pub fn vivid() -> Self {
		Self {
			accents: vec![
				Accent::new(Color::rgb(139, 92, 246), Color::rgb(217, 70, 239)), // Violet → fuchsia
				Accent::new(Color::rgb(6, 182, 212), Color::rgb(59, 130, 246)),  // Cyan → blue
				Accent::new(Color::rgb(16, 185, 129), Color::rgb(20, 184, 166)), // Emerald → teal
				Accent::new(Color::rgb(244, 63, 94), Color::rgb(236, 72, 153)),  // Rose → pink
				Accent::new(Color::rgb(245, 158, 11), Color::rgb(249, 115, 22)), // Amber → orange
				Accent::new(Color::rgb(99, 102, 241), Color::rgb(168, 85, 247)), // Indigo → purple
			],
		}
	}

	/// Muted slate blues and teals
	pub fn slate() -> Self {
		Self {
			accents: vec![
				Accent::new(Color::rgb(94, 129, 172), Color::rgb(129, 161, 193)),
				Accent::new(Color::rgb(100, 148, 160), Color::rgb(136, 160, 175)),
				Accent::new(Color::rgb(108, 142, 173), Color::rgb(119, 158, 165)),
				Accent::new(Color::rgb(143, 163, 180), Color::rgb(122, 153, 168)),
			],
		}
	}

	/// Number of accents.
	pub fn len(&self) -> usize {
		self.accents.len()
	}

	/// Whether there are no accents.
	pub fn is_empty(&self) -> bool {
		self.accents.is_empty()
	}

	/// Accent for `index`, wrapping around the palette.
	pub fn get(&self, index: usize) -> Accent {
		self.accents[index % self.accents.len()]
	}
}

/// Node card style.
#[derive(Clone, Debug)]
pub struct NodeStyle {
	/// Card width in world units.
	pub width: f64,
	/// Card height in world units.
	pub height: f64,
	/// Radius of the card corners.
	pub corner_radius: f64,
	/// Card background.
	pub fill: Color,
	/// Default card border.
	pub border: Color,
	/// Border of the selected node.
	pub selected_border: Color,
	/// Border of the node picked as connect source.
	pub source_border: Color,
	/// Title text colour.
	pub title_color: Color,
	/// Tag pill background.
	pub tag_fill: Color,
	/// Tag pill text.
	pub tag_color: Color,
	/// Accent glow alpha (0.0 = none).
	pub glow_intensity: f64,
}

/// Edge style.
#[derive(Clone, Debug)]
pub struct EdgeStyle {
	/// Link stroke colour.
	pub color: Color,
	/// Link stroke width.
	pub width: f64,
	/// Bend of the cubic link curve relative to its length.
	pub curvature: f64,
	/// Arrowhead length.
	pub arrow_size: f64,
	/// Trips per second of the pulse travelling along each link (0.0 = none).
	pub flow_speed: f64,
	/// Radius of the link pulse.
	pub pulse_radius: f64,
	/// Fill of the link pulse.
	pub pulse_color: Color,
}

/// Complete visual theme.
#[derive(Clone, Debug)]
pub struct Theme {
	/// Name accepted by [`Theme::by_name`].
	pub name: &'static str,
	/// Canvas background.
	pub background: Color,
	/// Link style.
	pub edge: EdgeStyle,
	/// Card style.
	pub node: NodeStyle,
	/// Accents for node glows and header bars.
	pub palette: NodePalette,
}

impl Theme {
	/// Dark canvas with vivid accents (default)
	pub fn default_theme() -> Self {
		Self {
			name: "default",
			background: Color::rgb(15, 17, 23),
			edge: EdgeStyle {
				color: Color::rgba(79, 70, 229, 0.55),
				width: 3.0,
				curvature: 0.3,
				arrow_size: 12.0,
				flow_speed: 1.0 / 3.0,
				pulse_radius: 3.0,
				pulse_color: Color::rgb(79, 70, 229),
			},
			node: NodeStyle {
				width: 160.0,
				height: 80.0,
				corner_radius: 16.0,
				fill: Color::rgba(17, 24, 39, 0.85),
				border: Color::rgb(55, 65, 81),
				selected_border: Color::rgb(99, 102, 241),
				source_border: Color::rgb(245, 158, 11),
				title_color: Color::rgb(255, 255, 255),
				tag_fill: Color::rgba(99, 102, 241, 0.2),
				tag_color: Color::rgb(165, 180, 252),
				glow_intensity: 0.25,
			},
			palette: NodePalette::vivid(),
		}
	}

	/// Flat, low-contrast theme
	pub fn minimal() -> Self {
		Self {
			name: "minimal",
			background: Color::rgb(25, 28, 35),
			edge: EdgeStyle {
				color: Color::rgba(130, 145, 165, 0.5),
				width: 1.5,
				curvature: 0.0,
				arrow_size: 9.0,
				flow_speed: 0.0,
				pulse_radius: 2.5,
				pulse_color: Color::rgb(170, 180, 195),
			},
			node: NodeStyle {
				width: 150.0,
				height: 64.0,
				corner_radius: 6.0,
				fill: Color::rgb(34, 38, 46),
				border: Color::rgb(60, 66, 78),
				selected_border: Color::rgb(180, 195, 205),
				source_border: Color::rgb(205, 195, 180),
				title_color: Color::rgb(225, 228, 232),
				tag_fill: Color::rgba(130, 145, 165, 0.2),
				tag_color: Color::rgb(170, 180, 195),
				glow_intensity: 0.0,
			},
			palette: NodePalette::slate(),
		}
	}

	/// Looks a theme up by name, falling back to the default.
	pub fn by_name(name: &str) -> Self {
		match name {
			"minimal" => Self::minimal(),
			_ => Self::default_theme(),
		}
	}
}

impl Default for Theme {
	fn default() -> Self {
		Self::default_theme()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn palette_wraps_around() {
		let palette = NodePalette::vivid();
		assert_eq!(palette.len(), 6);
		assert_eq!(palette.get(7), palette.get(1));
	}

	#[test]
	fn css_output() {
		assert_eq!(Color::rgb(15, 17, 23).to_css(), "#0f1117");
		assert_eq!(
			Color::rgba(1, 2, 3, 0.5).to_css(),
			"rgba(1, 2, 3, 0.5)"
		);
	}
}
