//! Pure renderer: a laid-out graph and view state in, draw commands out.
//!
//! Nothing here touches a real drawing surface; the command list is the
//! frame. `canvas::draw` replays it onto a 2d context and
//! `svg::scene_to_svg` serializes it to markup.

use std::collections::HashMap;

use super::layout::Layout;
use super::state::ViewState;
use super::types::{Arrowhead, GraphEdge, GraphNode, Point};

pub const BACKGROUND: &str = "#1a1a2e";
const LABEL_COLOR: &str = "rgba(255, 255, 255, 0.85)";
const SELECTED_STROKE: &str = "#ffd166";
const HOVERED_STROKE: &str = "rgba(255, 255, 255, 0.8)";
const PLACEHOLDER: &str = "No dependencies match the current filters";

const ARROW_SIZE: f64 = 10.0;
const LABEL_SIZE: f64 = 12.0;

/// One primitive on the drawing surface, in graph coordinates.
#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
	Line {
		from: Point,
		to: Point,
		color: &'static str,
		width: f64,
		dash: Option<(f64, f64)>,
	},
	Circle {
		center: Point,
		radius: f64,
		fill: &'static str,
		stroke: Option<(&'static str, f64)>,
	},
	Polygon {
		points: Vec<Point>,
		fill: Option<&'static str>,
		stroke: Option<(&'static str, f64)>,
	},
	Text {
		at: Point,
		text: String,
		size: f64,
		color: &'static str,
	},
}

/// Everything a drawing surface needs for one frame.
#[derive(Clone, Debug, PartialEq)]
pub struct Scene {
	pub width: f64,
	pub height: f64,
	pub background: &'static str,
	pub zoom: f64,
	pub pan: Point,
	pub commands: Vec<DrawCommand>,
}

pub fn render(layout: &Layout, view: &ViewState, width: f64, height: f64) -> Scene {
	let mut commands = Vec::new();

	if layout.nodes.is_empty() {
		// Explanatory placeholder, not an error. Untransformed frame.
		commands.push(DrawCommand::Text {
			at: Point::new(width / 2.0, height / 2.0),
			text: PLACEHOLDER.into(),
			size: 16.0,
			color: LABEL_COLOR,
		});
		return Scene {
			width,
			height,
			background: BACKGROUND,
			zoom: 1.0,
			pan: Point::default(),
			commands,
		};
	}

	let by_id: HashMap<&str, &GraphNode> =
		layout.nodes.iter().map(|n| (n.id.as_str(), n)).collect();

	for edge in &layout.edges {
		if let (Some(from), Some(to)) = (by_id.get(edge.from.as_str()), by_id.get(edge.to.as_str()))
		{
			draw_edge(&mut commands, edge, from, to);
		}
	}
	for node in &layout.nodes {
		draw_node(&mut commands, node, view);
	}

	Scene {
		width,
		height,
		background: BACKGROUND,
		zoom: view.zoom,
		pan: view.pan,
		commands,
	}
}

fn draw_edge(commands: &mut Vec<DrawCommand>, edge: &GraphEdge, from: &GraphNode, to: &GraphNode) {
	let (Some(a), Some(b)) = (from.position, to.position) else {
		return;
	};
	let dist = a.distance(b);
	if dist < 0.001 {
		return;
	}
	let (ux, uy) = ((b.x - a.x) / dist, (b.y - a.y) / dist);
	let color = edge.kind.color();
	let width = edge.weight.clamp(1.0, 4.0);

	// Shorten at both ends so the shaft meets the circle, not its center,
	// leaving room for the arrowhead at the target.
	let tail = Point::new(a.x + ux * from.radius(), a.y + uy * from.radius());
	let tip = Point::new(b.x - ux * to.radius(), b.y - uy * to.radius());
	let back = Point::new(tip.x - ux * ARROW_SIZE, tip.y - uy * ARROW_SIZE);
	let (px, py) = (-uy * ARROW_SIZE * 0.5, ux * ARROW_SIZE * 0.5);

	commands.push(DrawCommand::Line {
		from: tail,
		to: back,
		color,
		width,
		dash: edge.kind.dash(),
	});

	match edge.kind.arrowhead() {
		Arrowhead::Filled => commands.push(DrawCommand::Polygon {
			points: vec![
				tip,
				Point::new(back.x + px, back.y + py),
				Point::new(back.x - px, back.y - py),
			],
			fill: Some(color),
			stroke: None,
		}),
		Arrowhead::Open => {
			for sign in [1.0, -1.0] {
				commands.push(DrawCommand::Line {
					from: tip,
					to: Point::new(back.x + px * sign, back.y + py * sign),
					color,
					width,
					dash: None,
				});
			}
		}
		Arrowhead::Hollow => commands.push(DrawCommand::Polygon {
			points: vec![
				tip,
				Point::new(back.x + px, back.y + py),
				Point::new(back.x - px, back.y - py),
			],
			fill: Some(BACKGROUND),
			stroke: Some((color, 1.5)),
		}),
		Arrowhead::Diamond => {
			let mid = Point::new(tip.x - ux * ARROW_SIZE * 0.5, tip.y - uy * ARROW_SIZE * 0.5);
			commands.push(DrawCommand::Polygon {
				points: vec![
					tip,
					Point::new(mid.x + px, mid.y + py),
					back,
					Point::new(mid.x - px, mid.y - py),
				],
				fill: Some(color),
				stroke: None,
			});
		}
	}
}

fn draw_node(commands: &mut Vec<DrawCommand>, node: &GraphNode, view: &ViewState) {
	let Some(pos) = node.position else {
		return;
	};
	let radius = node.radius();
	let stroke = if view.selected.as_deref() == Some(node.id.as_str()) {
		Some((SELECTED_STROKE, 3.0))
	} else if view.hovered.as_deref() == Some(node.id.as_str()) {
		Some((HOVERED_STROKE, 2.0))
	} else {
		None
	};

	commands.push(DrawCommand::Circle {
		center: pos,
		radius,
		fill: node.kind.fill(),
		stroke,
	});
	commands.push(DrawCommand::Text {
		at: Point::new(pos.x, pos.y + radius + 14.0),
		text: node.name.clone(),
		size: LABEL_SIZE,
		color: LABEL_COLOR,
	});
}

#[cfg(test)]
mod tests {
	use std::collections::HashSet;

	use super::super::layout::layout;
	use super::super::types::{EdgeKind, GraphData};
	use super::*;

	fn abc() -> GraphData {
		serde_json::from_str(
			r#"{
				"nodes": [
					{"id": "A", "name": "A", "type": "class"},
					{"id": "B", "name": "B", "type": "class"},
					{"id": "C", "name": "C", "type": "class"}
				],
				"edges": [
					{"id": "e1", "from": "A", "to": "B", "type": "import"},
					{"id": "e2", "from": "B", "to": "C", "type": "method_call"}
				]
			}"#,
		)
		.unwrap()
	}

	fn circles(scene: &Scene) -> usize {
		scene
			.commands
			.iter()
			.filter(|c| matches!(c, DrawCommand::Circle { .. }))
			.count()
	}

	#[test]
	fn one_circle_and_one_label_per_node() {
		let view = ViewState::default();
		let laid = layout(&abc(), None, &view.filters, 800.0, 600.0);
		let scene = render(&laid, &view, 800.0, 600.0);
		assert_eq!(circles(&scene), 3);
		let labels = scene
			.commands
			.iter()
			.filter(|c| matches!(c, DrawCommand::Text { .. }))
			.count();
		assert_eq!(labels, 3);
	}

	#[test]
	fn import_filter_renders_two_nodes_and_one_edge() {
		let mut view = ViewState::default();
		view.filters = [EdgeKind::Import].into_iter().collect::<HashSet<_>>();
		let laid = layout(&abc(), None, &view.filters, 800.0, 600.0);
		let scene = render(&laid, &view, 800.0, 600.0);
		assert_eq!(circles(&scene), 2);
		// one shaft line plus a filled arrowhead polygon
		let shafts = scene
			.commands
			.iter()
			.filter(|c| matches!(c, DrawCommand::Line { .. }))
			.count();
		assert_eq!(shafts, 1);
	}

	#[test]
	fn empty_layout_renders_a_placeholder() {
		let view = ViewState::default();
		let scene = render(&Layout::default(), &view, 640.0, 480.0);
		assert_eq!(scene.commands.len(), 1);
		assert!(matches!(
			&scene.commands[0],
			DrawCommand::Text { at, .. } if *at == Point::new(320.0, 240.0)
		));
	}

	#[test]
	fn selected_and_hovered_nodes_get_strokes() {
		let mut view = ViewState::default();
		view.selected = Some("A".into());
		view.hovered = Some("B".into());
		let laid = layout(&abc(), None, &view.filters, 800.0, 600.0);
		let scene = render(&laid, &view, 800.0, 600.0);
		let stroked: Vec<f64> = scene
			.commands
			.iter()
			.filter_map(|c| match c {
				DrawCommand::Circle {
					stroke: Some((_, w)),
					..
				} => Some(*w),
				_ => None,
			})
			.collect();
		assert_eq!(stroked, [3.0, 2.0]);
	}

	#[test]
	fn scene_carries_the_view_transform() {
		let mut view = ViewState::default();
		view.zoom = 1.5;
		view.pan = Point::new(40.0, -12.0);
		let laid = layout(&abc(), None, &view.filters, 800.0, 600.0);
		let scene = render(&laid, &view, 800.0, 600.0);
		assert_eq!(scene.zoom, 1.5);
		assert_eq!(scene.pan, Point::new(40.0, -12.0));
	}
}
