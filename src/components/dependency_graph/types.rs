use serde::Deserialize;

/// Smallest node radius in graph units.
pub const MIN_NODE_RADIUS: f64 = 20.0;
/// Largest node radius in graph units.
pub const MAX_NODE_RADIUS: f64 = 40.0;

/// Kind of program element a node stands for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
	File,
	Class,
	Method,
	Field,
	Interface,
	Package,
}

impl NodeKind {
	pub fn fill(self) -> &'static str {
		match self {
			NodeKind::File => "#4e79a7",
			NodeKind::Class => "#f28e2b",
			NodeKind::Method => "#59a14f",
			NodeKind::Field => "#edc949",
			NodeKind::Interface => "#b07aa1",
			NodeKind::Package => "#76b7b2",
		}
	}
}

/// Kind of dependency an edge stands for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EdgeKind {
	Import,
	MethodCall,
	Inheritance,
	Composition,
}

/// Arrowhead glyph drawn at the target end of an edge.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Arrowhead {
	Filled,
	Open,
	Hollow,
	Diamond,
}

impl EdgeKind {
	pub const ALL: [EdgeKind; 4] = [
		EdgeKind::Import,
		EdgeKind::MethodCall,
		EdgeKind::Inheritance,
		EdgeKind::Composition,
	];

	pub fn color(self) -> &'static str {
		match self {
			EdgeKind::Import => "#64b4ff",
			EdgeKind::MethodCall => "#6fcf6f",
			EdgeKind::Inheritance => "#ff7b72",
			EdgeKind::Composition => "#c79bf0",
		}
	}

	/// Dash/gap stroke pattern, `None` for a solid stroke.
	pub fn dash(self) -> Option<(f64, f64)> {
		match self {
			EdgeKind::MethodCall => Some((6.0, 4.0)),
			EdgeKind::Composition => Some((2.0, 3.0)),
			EdgeKind::Import | EdgeKind::Inheritance => None,
		}
	}

	pub fn arrowhead(self) -> Arrowhead {
		match self {
			EdgeKind::Import => Arrowhead::Filled,
			EdgeKind::MethodCall => Arrowhead::Open,
			EdgeKind::Inheritance => Arrowhead::Hollow,
			EdgeKind::Composition => Arrowhead::Diamond,
		}
	}

	pub fn label(self) -> &'static str {
		match self {
			EdgeKind::Import => "import",
			EdgeKind::MethodCall => "method call",
			EdgeKind::Inheritance => "inheritance",
			EdgeKind::Composition => "composition",
		}
	}
}

/// 2D point in canvas space.
#[derive(Clone, Copy, Debug, Default, PartialEq, Deserialize)]
pub struct Point {
	pub x: f64,
	pub y: f64,
}

impl Point {
	pub fn new(x: f64, y: f64) -> Self {
		Self { x, y }
	}

	pub fn distance(self, other: Point) -> f64 {
		let (dx, dy) = (other.x - self.x, other.y - self.y);
		(dx * dx + dy * dy).sqrt()
	}
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct GraphNode {
	pub id: String,
	pub name: String,
	#[serde(rename = "type")]
	pub kind: NodeKind,
	#[serde(default = "default_size")]
	pub size: f64,
	/// Assigned by the layout engine when absent; moved by dragging.
	#[serde(default)]
	pub position: Option<Point>,
}

impl GraphNode {
	/// Draw radius, scaled from the element's size metric.
	pub fn radius(&self) -> f64 {
		(self.size / 10.0).clamp(MIN_NODE_RADIUS, MAX_NODE_RADIUS)
	}
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct GraphEdge {
	pub id: String,
	pub from: String,
	pub to: String,
	#[serde(rename = "type")]
	pub kind: EdgeKind,
	#[serde(default = "default_weight")]
	pub weight: f64,
}

/// Graph payload as delivered by the analysis backend. Nodes and edges are
/// flat sibling collections, related only by id.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct GraphData {
	pub nodes: Vec<GraphNode>,
	pub edges: Vec<GraphEdge>,
}

fn default_size() -> f64 {
	200.0
}

fn default_weight() -> f64 {
	1.0
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn parses_backend_payload() {
		let payload = r#"{
			"nodes": [
				{"id": "a", "name": "OrderService.java", "type": "file", "size": 420},
				{"id": "b", "name": "Order", "type": "class"}
			],
			"edges": [
				{"id": "e1", "from": "a", "to": "b", "type": "method_call", "weight": 3}
			]
		}"#;
		let data: GraphData = serde_json::from_str(payload).unwrap();
		assert_eq!(data.nodes.len(), 2);
		assert_eq!(data.nodes[0].kind, NodeKind::File);
		assert_eq!(data.nodes[1].size, 200.0);
		assert!(data.nodes[1].position.is_none());
		assert_eq!(data.edges[0].kind, EdgeKind::MethodCall);
		assert_eq!(data.edges[0].weight, 3.0);
	}

	#[test]
	fn radius_clamps_to_bounds() {
		let mut node: GraphNode = serde_json::from_str(
			r#"{"id": "a", "name": "A", "type": "class", "size": 30}"#,
		)
		.unwrap();
		assert_eq!(node.radius(), MIN_NODE_RADIUS);
		node.size = 9000.0;
		assert_eq!(node.radius(), MAX_NODE_RADIUS);
		node.size = 250.0;
		assert_eq!(node.radius(), 25.0);
	}
}
