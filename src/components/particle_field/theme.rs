//! Visual theming for the particle field.
//!
//! Colors and stroke/glow settings for both backdrops. Motion tuning lives in
//! [`super::types`]; this module only decides how things look.

/// RGBA color representation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
	/// Red channel.
	pub r: u8,
	/// Green channel.
	pub g: u8,
	/// Blue channel.
	pub b: u8,
	/// Opacity in `[0, 1]`.
	pub a: f64,
}

impl Color {
	/// Opaque color.
	pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
		Self { r, g, b, a: 1.0 }
	}

	/// Same color at another opacity.
	pub fn with_alpha(self, a: f64) -> Self {
		Self { a, ..self }
	}

	/// Canvas style string: hex when opaque, `rgba(..)` otherwise.
	pub fn to_css(self) -> String {
		if (self.a - 1.0).abs() < 0.001 {
			format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
		} else {
			format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
		}
	}
}

/// Look of the neural network backdrop.
#[derive(Clone, Debug)]
pub struct NetworkStyle {
	/// Particle fill; alpha is replaced by the pulse each frame
	pub color: Color,
	/// Shadow color behind each particle
	pub glow_color: Color,
	/// Shadow blur in pixels (0 = no glow)
	pub glow_blur: f64,
	/// Connective line color; alpha is replaced by the link opacity
	pub line_color: Color,
	/// Stroke width of connective lines
	pub line_width: f64,
}

/// Look of the starfield backdrop.
#[derive(Clone, Debug)]
pub struct StarfieldStyle {
	/// Opaque clear color painted every frame
	pub background: Color,
	/// Fill of every star
	pub star_color: Color,
}

/// Complete visual theme.
#[derive(Clone, Debug)]
pub struct Theme {
	/// Network backdrop look
	pub network: NetworkStyle,
	/// Starfield backdrop look
	pub starfield: StarfieldStyle,
}

impl Theme {
	/// Light blue links over transparent, white stars over near-black (default)
	pub fn default_theme() -> Self {
		let light_blue = Color::rgb(173, 216, 230);
		Self {
			network: NetworkStyle {
				color: light_blue.with_alpha(0.8),
				glow_color: light_blue,
				glow_blur: 10.0,
				line_color: light_blue,
				line_width: 1.0,
			},
			starfield: StarfieldStyle {
				background: Color::rgb(10, 10, 10),
				star_color: Color::rgb(255, 255, 255),
			},
		}
	}
}

impl Default for Theme {
	fn default() -> Self {
		Self::default_theme()
	}
}
