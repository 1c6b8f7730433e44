//! Replays a [`Scene`] onto a 2d canvas context.
//!
//! Immediate mode: the owner calls this on every state change.

use std::f64::consts::PI;

use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

use super::render::{DrawCommand, Scene};

pub fn draw(scene: &Scene, ctx: &CanvasRenderingContext2d) {
	ctx.set_fill_style_str(scene.background);
	ctx.fill_rect(0.0, 0.0, scene.width, scene.height);
	ctx.save();
	let _ = ctx.translate(scene.pan.x, scene.pan.y);
	let _ = ctx.scale(scene.zoom, scene.zoom);

	for command in &scene.commands {
		match command {
			DrawCommand::Line {
				from,
				to,
				color,
				width,
				dash,
			} => {
				match dash {
					Some((on, off)) => {
						let _ = ctx.set_line_dash(&js_sys::Array::of2(
							&JsValue::from_f64(*on),
							&JsValue::from_f64(*off),
						));
					}
					None => {
						let _ = ctx.set_line_dash(&js_sys::Array::new());
					}
				}
				ctx.set_stroke_style_str(color);
				ctx.set_line_width(*width);
				ctx.begin_path();
				ctx.move_to(from.x, from.y);
				ctx.line_to(to.x, to.y);
				ctx.stroke();
				let _ = ctx.set_line_dash(&js_sys::Array::new());
			}
			DrawCommand::Circle {
				center,
				radius,
				fill,
				stroke,
			} => {
				ctx.begin_path();
				let _ = ctx.arc(center.x, center.y, *radius, 0.0, 2.0 * PI);
				ctx.set_fill_style_str(fill);
				ctx.fill();
				if let Some((color, width)) = stroke {
					ctx.set_stroke_style_str(color);
					ctx.set_line_width(*width);
					ctx.stroke();
				}
			}
			DrawCommand::Polygon {
				points,
				fill,
				stroke,
			} => {
				let Some(first) = points.first() else {
					continue;
				};
				ctx.begin_path();
				ctx.move_to(first.x, first.y);
				for p in &points[1..] {
					ctx.line_to(p.x, p.y);
				}
				ctx.close_path();
				if let Some(fill) = fill {
					ctx.set_fill_style_str(fill);
					ctx.fill();
				}
				if let Some((color, width)) = stroke {
					ctx.set_stroke_style_str(color);
					ctx.set_line_width(*width);
					ctx.stroke();
				}
			}
			DrawCommand::Text {
				at,
				text,
				size,
				color,
			} => {
				ctx.set_fill_style_str(color);
				ctx.set_font(&format!("{size}px sans-serif"));
				ctx.set_text_align("center");
				let _ = ctx.fill_text(text, at.x, at.y);
			}
		}
	}

	ctx.restore();
}
