//! Canvas rendering for the particle field.
//!
//! Replays a [`Frame`] onto a 2D context in command order. Glow is the canvas
//! shadow; it is switched off before any command that should not carry it.

use std::f64::consts::PI;

use web_sys::CanvasRenderingContext2d;

use super::draw::{DrawCommand, Frame};

/// Draws every command of `frame` onto `ctx`.
pub fn render(frame: &Frame, ctx: &CanvasRenderingContext2d) {
	let mut shadow_on = false;

	for command in frame.commands() {
		match command {
			DrawCommand::Clear { width, height } => {
				ctx.clear_rect(0.0, 0.0, *width, *height);
			}
			DrawCommand::Fill {
				width,
				height,
				color,
			} => {
				set_shadow(ctx, &mut shadow_on, None);
				ctx.set_fill_style_str(&color.to_css());
				ctx.fill_rect(0.0, 0.0, *width, *height);
			}
			DrawCommand::Circle {
				center,
				radius,
				color,
				glow,
			} => {
				set_shadow(ctx, &mut shadow_on, glow.map(|g| (g.color.to_css(), g.blur)));
				ctx.begin_path();
				let _ = ctx.arc(center.x, center.y, *radius, 0.0, PI * 2.0);
				ctx.set_fill_style_str(&color.to_css());
				ctx.fill();
			}
			DrawCommand::Line {
				from,
				to,
				color,
				width,
			} => {
				set_shadow(ctx, &mut shadow_on, None);
				ctx.set_stroke_style_str(&color.to_css());
				ctx.set_line_width(*width);
				ctx.begin_path();
				ctx.move_to(from.x, from.y);
				ctx.line_to(to.x, to.y);
				ctx.stroke();
			}
		}
	}

	set_shadow(ctx, &mut shadow_on, None);
}

fn set_shadow(ctx: &CanvasRenderingContext2d, shadow_on: &mut bool, glow: Option<(String, f64)>) {
	match glow {
		Some((color, blur)) => {
			ctx.set_shadow_color(&color);
			ctx.set_shadow_blur(blur);
			*shadow_on = true;
		}
		None if *shadow_on => {
			ctx.set_shadow_blur(0.0);
			*shadow_on = false;
		}
		None => {}
	}
}
