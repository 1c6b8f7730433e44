//! View state and the pointer interaction machine.

use std::collections::HashSet;

use super::types::{EdgeKind, GraphNode, Point};

pub const MIN_ZOOM: f64 = 0.3;
pub const MAX_ZOOM: f64 = 3.0;
/// Wheel factors per tick, toward and away from the viewer.
pub const WHEEL_IN: f64 = 1.1;
pub const WHEEL_OUT: f64 = 0.9;
/// Toolbar zoom button step.
pub const BUTTON_STEP: f64 = 1.2;

/// Pointer machine: the view is idle, panning the canvas, or dragging
/// one node.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum Pointer {
	#[default]
	Idle,
	Panning {
		start: Point,
		origin: Point,
	},
	Dragging {
		node: String,
		start: Point,
		node_start: Point,
	},
}

/// A node position update produced while dragging, in graph space.
#[derive(Clone, Debug, PartialEq)]
pub struct NodeMove {
	pub node: String,
	pub to: Point,
}

/// Everything the user can change about how the graph is viewed.
/// Owned by the interaction layer; reset only by explicit user action.
#[derive(Clone, Debug, PartialEq)]
pub struct ViewState {
	pub zoom: f64,
	pub pan: Point,
	pub filters: HashSet<EdgeKind>,
	pub show_summary: bool,
	pub selected: Option<String>,
	pub hovered: Option<String>,
	pub pointer: Pointer,
}

impl Default for ViewState {
	fn default() -> Self {
		Self {
			zoom: 1.0,
			pan: Point::default(),
			filters: EdgeKind::ALL.into_iter().collect(),
			show_summary: false,
			selected: None,
			hovered: None,
			pointer: Pointer::Idle,
		}
	}
}

impl ViewState {
	pub fn screen_to_graph(&self, at: Point) -> Point {
		Point::new((at.x - self.pan.x) / self.zoom, (at.y - self.pan.y) / self.zoom)
	}

	fn set_zoom(&mut self, zoom: f64) {
		self.zoom = zoom.clamp(MIN_ZOOM, MAX_ZOOM);
	}

	pub fn zoom_in(&mut self) {
		self.set_zoom(self.zoom * BUTTON_STEP);
	}

	pub fn zoom_out(&mut self) {
		self.set_zoom(self.zoom / BUTTON_STEP);
	}

	/// Wheel zoom anchored at the cursor so the point under it stays put.
	pub fn wheel(&mut self, at: Point, delta_y: f64) {
		let factor = if delta_y > 0.0 { WHEEL_OUT } else { WHEEL_IN };
		let previous = self.zoom;
		self.set_zoom(self.zoom * factor);
		let ratio = self.zoom / previous;
		self.pan.x = at.x - (at.x - self.pan.x) * ratio;
		self.pan.y = at.y - (at.y - self.pan.y) * ratio;
	}

	pub fn reset_view(&mut self) {
		self.zoom = 1.0;
		self.pan = Point::default();
	}

	pub fn toggle_filter(&mut self, kind: EdgeKind) {
		if !self.filters.remove(&kind) {
			self.filters.insert(kind);
		}
	}

	pub fn show_all(&mut self) {
		self.filters = EdgeKind::ALL.into_iter().collect();
	}

	pub fn toggle_summary(&mut self) {
		self.show_summary = !self.show_summary;
	}

	/// A press on a node selects it and starts a drag; a press on empty
	/// canvas starts a pan.
	pub fn pointer_down(&mut self, at: Point, hit: Option<&GraphNode>) {
		match hit {
			Some(node) => {
				self.selected = Some(node.id.clone());
				self.pointer = Pointer::Dragging {
					node: node.id.clone(),
					start: at,
					node_start: node.position.unwrap_or_default(),
				};
			}
			None => {
				self.pointer = Pointer::Panning {
					start: at,
					origin: self.pan,
				};
			}
		}
	}

	/// Advances the machine for a pointer move. A drag yields the node's
	/// new graph-space position for the owner to apply; a pan is applied
	/// in place.
	pub fn pointer_move(&mut self, at: Point) -> Option<NodeMove> {
		match &self.pointer {
			Pointer::Idle => None,
			Pointer::Panning { start, origin } => {
				self.pan = Point::new(origin.x + (at.x - start.x), origin.y + (at.y - start.y));
				None
			}
			Pointer::Dragging {
				node,
				start,
				node_start,
			} => Some(NodeMove {
				node: node.clone(),
				to: Point::new(
					node_start.x + (at.x - start.x) / self.zoom,
					node_start.y + (at.y - start.y) / self.zoom,
				),
			}),
		}
	}

	pub fn pointer_up(&mut self) {
		self.pointer = Pointer::Idle;
	}

	pub fn pointer_leave(&mut self) {
		self.pointer = Pointer::Idle;
		self.hovered = None;
	}
}

/// Topmost node under a screen position. Hit radius equals the node's
/// draw radius, measured in graph space.
pub fn node_at<'a>(nodes: &'a [GraphNode], view: &ViewState, at: Point) -> Option<&'a GraphNode> {
	let p = view.screen_to_graph(at);
	let mut found = None;
	for node in nodes {
		if let Some(pos) = node.position {
			if pos.distance(p) <= node.radius() {
				found = Some(node);
			}
		}
	}
	found
}
