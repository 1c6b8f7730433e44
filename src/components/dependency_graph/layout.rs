//! Deterministic semicircular layout for dependency graphs.

use std::collections::{HashMap, HashSet};
use std::f64::consts::PI;

use log::warn;

use super::types::{EdgeKind, GraphData, GraphEdge, GraphNode, Point};

/// Minimum orbit radius around the center node.
pub const MIN_ORBIT: f64 = 150.0;
/// Orbit growth per surviving node.
pub const ORBIT_PER_NODE: f64 = 20.0;

/// A positioned snapshot of the graph, ready to render.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Layout {
	pub nodes: Vec<GraphNode>,
	pub edges: Vec<GraphEdge>,
	pub center_id: Option<String>,
	/// Edges discarded because an endpoint id did not resolve.
	pub dropped_edges: usize,
}

/// Positions every node that survives the edge filter.
///
/// Edges whose kind is filtered out are skipped, edges with unknown endpoint
/// ids are dropped (and counted), and nodes touched by no surviving edge are
/// not placed at all. The center is the explicit focus node when present,
/// otherwise the highest-degree survivor; everyone else sits on the upper
/// semicircle around it. Nodes that already carry a position keep it.
pub fn layout(
	data: &GraphData,
	focus: Option<&str>,
	filters: &HashSet<EdgeKind>,
	width: f64,
	height: f64,
) -> Layout {
	let ids: HashSet<&str> = data.nodes.iter().map(|n| n.id.as_str()).collect();

	let mut dropped = 0usize;
	let edges: Vec<GraphEdge> = data
		.edges
		.iter()
		.filter(|e| filters.contains(&e.kind))
		.filter(|e| {
			let resolved = ids.contains(e.from.as_str()) && ids.contains(e.to.as_str());
			if !resolved {
				dropped += 1;
			}
			resolved
		})
		.cloned()
		.collect();
	if dropped > 0 {
		warn!("dropped {dropped} edge(s) referencing unknown node ids");
	}

	let mut degree: HashMap<&str, usize> = HashMap::new();
	for edge in &edges {
		*degree.entry(edge.from.as_str()).or_default() += 1;
		*degree.entry(edge.to.as_str()).or_default() += 1;
	}

	// Isolated nodes are never drawn; input order is preserved.
	let mut nodes: Vec<GraphNode> = data
		.nodes
		.iter()
		.filter(|n| degree.contains_key(n.id.as_str()))
		.cloned()
		.collect();

	if nodes.is_empty() {
		return Layout {
			dropped_edges: dropped,
			..Layout::default()
		};
	}

	let center_id = focus
		.filter(|f| nodes.iter().any(|n| n.id == *f))
		.map(str::to_owned)
		.unwrap_or_else(|| {
			// Highest degree wins, ties go to the earliest input node.
			let mut best = &nodes[0];
			for node in &nodes[1..] {
				if degree[node.id.as_str()] > degree[best.id.as_str()] {
					best = node;
				}
			}
			best.id.clone()
		});

	let center = Point::new(width / 2.0, height / 2.0);
	let orbit = MIN_ORBIT.max(nodes.len() as f64 * ORBIT_PER_NODE);
	let satellites = nodes.iter().filter(|n| n.id != center_id).count();

	let mut slot = 0usize;
	for node in &mut nodes {
		if node.id == center_id {
			if node.position.is_none() {
				node.position = Some(center);
			}
			continue;
		}
		if node.position.is_none() {
			// Upper half-plane only; a lone satellite sits at angle zero.
			let angle = if satellites > 1 {
				slot as f64 / (satellites - 1) as f64 * PI
			} else {
				0.0
			};
			node.position = Some(Point::new(
				center.x + orbit * angle.cos(),
				center.y - orbit * angle.sin(),
			));
		}
		slot += 1;
	}

	Layout {
		nodes,
		edges,
		center_id: Some(center_id),
		dropped_edges: dropped,
	}
}

/// Aggregate counts for the summary view.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GraphSummary {
	pub node_count: usize,
	pub edge_count: usize,
	pub edges_by_kind: Vec<(EdgeKind, usize)>,
	/// Most entangled nodes: name and coupling (edges touching the node).
	pub top_coupled: Vec<(String, usize)>,
}

pub fn summarize(data: &GraphData) -> GraphSummary {
	let edges_by_kind = EdgeKind::ALL
		.into_iter()
		.map(|kind| (kind, data.edges.iter().filter(|e| e.kind == kind).count()))
		.collect();

	let mut coupling: Vec<(String, usize)> = data
		.nodes
		.iter()
		.map(|n| {
			let touching = data
				.edges
				.iter()
				.filter(|e| e.from == n.id || e.to == n.id)
				.count();
			(n.name.clone(), touching)
		})
		.collect();
	coupling.sort_by(|a, b| b.1.cmp(&a.1));
	coupling.truncate(5);

	GraphSummary {
		node_count: data.nodes.len(),
		edge_count: data.edges.len(),
		edges_by_kind,
		top_coupled: coupling,
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn node(id: &str) -> GraphNode {
		serde_json::from_str(&format!(
			r#"{{"id": "{id}", "name": "{id}", "type": "class"}}"#
		))
		.unwrap()
	}

	fn edge(id: &str, from: &str, to: &str, kind: &str) -> GraphEdge {
		serde_json::from_str(&format!(
			r#"{{"id": "{id}", "from": "{from}", "to": "{to}", "type": "{kind}"}}"#
		))
		.unwrap()
	}

	fn all_filters() -> HashSet<EdgeKind> {
		EdgeKind::ALL.into_iter().collect()
	}

	fn abc() -> GraphData {
		GraphData {
			nodes: vec![node("A"), node("B"), node("C")],
			edges: vec![
				edge("e1", "A", "B", "import"),
				edge("e2", "B", "C", "method_call"),
			],
		}
	}

	#[test]
	fn empty_graph_yields_empty_layout() {
		let out = layout(&GraphData::default(), None, &all_filters(), 800.0, 600.0);
		assert!(out.nodes.is_empty());
		assert!(out.edges.is_empty());
		assert_eq!(out.center_id, None);
	}

	#[test]
	fn filtering_to_import_keeps_exactly_touched_nodes() {
		let filters: HashSet<EdgeKind> = [EdgeKind::Import].into_iter().collect();
		let out = layout(&abc(), None, &filters, 800.0, 600.0);
		let ids: Vec<&str> = out.nodes.iter().map(|n| n.id.as_str()).collect();
		assert_eq!(ids, ["A", "B"]);
		assert_eq!(out.edges.len(), 1);
		assert_eq!(out.edges[0].id, "e1");
	}

	#[test]
	fn rendered_nodes_match_surviving_edges_for_all_subsets() {
		let data = abc();
		for subset in 0u8..4 {
			let mut filters = HashSet::new();
			if subset & 1 != 0 {
				filters.insert(EdgeKind::Import);
			}
			if subset & 2 != 0 {
				filters.insert(EdgeKind::MethodCall);
			}
			let out = layout(&data, None, &filters, 800.0, 600.0);
			let mut touched: HashSet<&str> = HashSet::new();
			for e in data.edges.iter().filter(|e| filters.contains(&e.kind)) {
				touched.insert(e.from.as_str());
				touched.insert(e.to.as_str());
			}
			let placed: HashSet<&str> = out.nodes.iter().map(|n| n.id.as_str()).collect();
			assert_eq!(placed, touched, "subset {subset}");
		}
	}

	#[test]
	fn dangling_edges_are_dropped_and_counted() {
		let mut data = abc();
		data.edges.push(edge("e3", "A", "ghost", "import"));
		let out = layout(&data, None, &all_filters(), 800.0, 600.0);
		assert_eq!(out.dropped_edges, 1);
		assert!(out.edges.iter().all(|e| e.id != "e3"));
	}

	#[test]
	fn center_is_highest_degree_with_input_order_ties() {
		// B touches both edges; A and C one each.
		let out = layout(&abc(), None, &all_filters(), 800.0, 600.0);
		assert_eq!(out.center_id.as_deref(), Some("B"));

		// All degrees equal in a triangle: first input node wins.
		let data = GraphData {
			nodes: vec![node("A"), node("B"), node("C")],
			edges: vec![
				edge("e1", "A", "B", "import"),
				edge("e2", "B", "C", "import"),
				edge("e3", "C", "A", "import"),
			],
		};
		let out = layout(&data, None, &all_filters(), 800.0, 600.0);
		assert_eq!(out.center_id.as_deref(), Some("A"));
	}

	#[test]
	fn explicit_focus_overrides_degree() {
		let out = layout(&abc(), Some("C"), &all_filters(), 800.0, 600.0);
		assert_eq!(out.center_id.as_deref(), Some("C"));

		// A focus id that is not among the survivors falls back to degree.
		let out = layout(&abc(), Some("ghost"), &all_filters(), 800.0, 600.0);
		assert_eq!(out.center_id.as_deref(), Some("B"));
	}

	#[test]
	fn single_surviving_node_sits_at_canvas_center() {
		let data = GraphData {
			nodes: vec![node("A")],
			edges: vec![edge("e1", "A", "A", "import")],
		};
		let out = layout(&data, None, &all_filters(), 800.0, 600.0);
		assert_eq!(out.nodes.len(), 1);
		assert_eq!(out.nodes[0].position, Some(Point::new(400.0, 300.0)));
	}

	#[test]
	fn satellites_sit_on_the_orbit_in_the_upper_half_plane() {
		let data = GraphData {
			nodes: vec![node("hub"), node("a"), node("b"), node("c"), node("d")],
			edges: vec![
				edge("e1", "hub", "a", "import"),
				edge("e2", "hub", "b", "import"),
				edge("e3", "hub", "c", "import"),
				edge("e4", "hub", "d", "import"),
			],
		};
		let out = layout(&data, None, &all_filters(), 800.0, 600.0);
		let orbit = MIN_ORBIT.max(out.nodes.len() as f64 * ORBIT_PER_NODE);
		let center = Point::new(400.0, 300.0);
		for n in out.nodes.iter().filter(|n| n.id != "hub") {
			let pos = n.position.unwrap();
			assert!((pos.distance(center) - orbit).abs() < 1e-9, "{}", n.id);
			assert!(pos.y <= center.y + 1e-9, "{} below center", n.id);
		}
	}

	#[test]
	fn preset_positions_survive_relayout() {
		let mut data = abc();
		data.nodes[0].position = Some(Point::new(13.0, 37.0));
		let out = layout(&data, None, &all_filters(), 800.0, 600.0);
		let a = out.nodes.iter().find(|n| n.id == "A").unwrap();
		assert_eq!(a.position, Some(Point::new(13.0, 37.0)));
	}

	#[test]
	fn summary_counts_and_coupling() {
		let summary = summarize(&abc());
		assert_eq!(summary.node_count, 3);
		assert_eq!(summary.edge_count, 2);
		assert_eq!(summary.edges_by_kind[0], (EdgeKind::Import, 1));
		assert_eq!(summary.top_coupled[0], ("B".to_string(), 2));
	}
}
