//! Serializes a [`Scene`] to standalone SVG markup.

use super::render::{DrawCommand, Scene};

pub fn scene_to_svg(scene: &Scene) -> String {
	let mut svg = String::new();
	svg.push_str(&format!(
		"<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{w}\" height=\"{h}\" viewBox=\"0 0 {w} {h}\">",
		w = scene.width,
		h = scene.height
	));
	svg.push_str(&format!(
		"<rect width=\"100%\" height=\"100%\" fill=\"{}\"/>",
		scene.background
	));
	svg.push_str(&format!(
		"<g transform=\"translate({:.2} {:.2}) scale({:.4})\">",
		scene.pan.x, scene.pan.y, scene.zoom
	));

	for command in &scene.commands {
		match command {
			DrawCommand::Line {
				from,
				to,
				color,
				width,
				dash,
			} => {
				let dash = dash
					.map(|(on, off)| format!(" stroke-dasharray=\"{on} {off}\""))
					.unwrap_or_default();
				svg.push_str(&format!(
					"<line x1=\"{:.2}\" y1=\"{:.2}\" x2=\"{:.2}\" y2=\"{:.2}\" stroke=\"{}\" stroke-width=\"{}\"{}/>",
					from.x, from.y, to.x, to.y, color, width, dash
				));
			}
			DrawCommand::Circle {
				center,
				radius,
				fill,
				stroke,
			} => {
				let stroke = stroke
					.map(|(color, width)| {
						format!(" stroke=\"{color}\" stroke-width=\"{width}\"")
					})
					.unwrap_or_default();
				svg.push_str(&format!(
					"<circle cx=\"{:.2}\" cy=\"{:.2}\" r=\"{:.2}\" fill=\"{}\"{}/>",
					center.x, center.y, radius, fill, stroke
				));
			}
			DrawCommand::Polygon {
				points,
				fill,
				stroke,
			} => {
				let points: Vec<String> = points
					.iter()
					.map(|p| format!("{:.2},{:.2}", p.x, p.y))
					.collect();
				let fill = fill.unwrap_or("none");
				let stroke = stroke
					.map(|(color, width)| {
						format!(" stroke=\"{color}\" stroke-width=\"{width}\"")
					})
					.unwrap_or_default();
				svg.push_str(&format!(
					"<polygon points=\"{}\" fill=\"{}\"{}/>",
					points.join(" "),
					fill,
					stroke
				));
			}
			DrawCommand::Text {
				at,
				text,
				size,
				color,
			} => {
				svg.push_str(&format!(
					"<text x=\"{:.2}\" y=\"{:.2}\" text-anchor=\"middle\" font-family=\"sans-serif\" font-size=\"{}\" fill=\"{}\">{}</text>",
					at.x,
					at.y,
					size,
					color,
					escape_xml(text)
				));
			}
		}
	}

	svg.push_str("</g></svg>");
	svg
}

fn escape_xml(text: &str) -> String {
	text.replace('&', "&amp;")
		.replace('<', "&lt;")
		.replace('>', "&gt;")
		.replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
	use super::super::render::DrawCommand;
	use super::super::types::Point;
	use super::*;

	fn scene_with(commands: Vec<DrawCommand>) -> Scene {
		Scene {
			width: 800.0,
			height: 600.0,
			background: "#1a1a2e",
			zoom: 1.5,
			pan: Point::new(24.0, -8.0),
			commands,
		}
	}

	#[test]
	fn wraps_commands_in_a_transformed_group() {
		let svg = scene_to_svg(&scene_with(vec![]));
		assert!(svg.starts_with("<svg xmlns=\"http://www.w3.org/2000/svg\""));
		assert!(svg.contains("translate(24.00 -8.00) scale(1.5000)"));
		assert!(svg.ends_with("</g></svg>"));
	}

	#[test]
	fn serializes_each_primitive() {
		let svg = scene_to_svg(&scene_with(vec![
			DrawCommand::Line {
				from: Point::new(0.0, 0.0),
				to: Point::new(10.0, 0.0),
				color: "#64b4ff",
				width: 1.5,
				dash: Some((6.0, 4.0)),
			},
			DrawCommand::Circle {
				center: Point::new(5.0, 5.0),
				radius: 20.0,
				fill: "#f28e2b",
				stroke: Some(("#ffd166", 3.0)),
			},
			DrawCommand::Polygon {
				points: vec![
					Point::new(0.0, 0.0),
					Point::new(4.0, 2.0),
					Point::new(0.0, 4.0),
				],
				fill: Some("#64b4ff"),
				stroke: None,
			},
		]));
		assert!(svg.contains("stroke-dasharray=\"6 4\""));
		assert!(svg.contains("<circle cx=\"5.00\" cy=\"5.00\" r=\"20.00\""));
		assert!(svg.contains("stroke=\"#ffd166\" stroke-width=\"3\""));
		assert!(svg.contains("<polygon points=\"0.00,0.00 4.00,2.00 0.00,4.00\""));
	}

	#[test]
	fn escapes_markup_in_labels() {
		let svg = scene_to_svg(&scene_with(vec![DrawCommand::Text {
			at: Point::new(1.0, 2.0),
			text: "List<Order> & \"friends\"".into(),
			size: 12.0,
			color: "#fff",
		}]));
		assert!(svg.contains("List&lt;Order&gt; &amp; &quot;friends&quot;"));
		assert!(!svg.contains("List<Order>"));
	}
}
