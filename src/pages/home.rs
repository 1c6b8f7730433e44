use leptos::prelude::*;
use log::error;

use crate::components::dependency_graph::{DependencyGraphCanvas, GraphData};

/// Demo payload in the backend's wire shape, exactly as a fetch of
/// `/api/workspaces/{id}/graph` would deliver it.
const SAMPLE_GRAPH: &str = r#"{
	"nodes": [
		{"id": "pkg-orders", "name": "com.acme.orders", "type": "package", "size": 500},
		{"id": "order-controller", "name": "OrderController", "type": "class", "size": 320},
		{"id": "abstract-controller", "name": "AbstractController", "type": "class", "size": 180},
		{"id": "order-service", "name": "OrderService", "type": "class", "size": 450},
		{"id": "order-repository", "name": "OrderRepository", "type": "interface", "size": 150},
		{"id": "jpa-order-repository", "name": "JpaOrderRepository", "type": "class", "size": 260},
		{"id": "order", "name": "Order", "type": "class", "size": 210},
		{"id": "payment-gateway", "name": "PaymentGateway", "type": "interface", "size": 140},
		{"id": "stripe-gateway", "name": "StripePaymentGateway", "type": "class", "size": 280},
		{"id": "audit-log", "name": "AuditLog.java", "type": "file", "size": 190}
	],
	"edges": [
		{"id": "e1", "from": "order-controller", "to": "order-service", "type": "composition", "weight": 3},
		{"id": "e2", "from": "order-controller", "to": "abstract-controller", "type": "inheritance"},
		{"id": "e3", "from": "order-service", "to": "order-repository", "type": "composition", "weight": 2},
		{"id": "e4", "from": "jpa-order-repository", "to": "order-repository", "type": "inheritance"},
		{"id": "e5", "from": "order-service", "to": "payment-gateway", "type": "method_call", "weight": 4},
		{"id": "e6", "from": "stripe-gateway", "to": "payment-gateway", "type": "inheritance"},
		{"id": "e7", "from": "order-service", "to": "order", "type": "method_call", "weight": 2},
		{"id": "e8", "from": "order-controller", "to": "order", "type": "import"},
		{"id": "e9", "from": "jpa-order-repository", "to": "order", "type": "import"},
		{"id": "e10", "from": "order-service", "to": "audit-log", "type": "method_call"},
		{"id": "e11", "from": "audit-log", "to": "pkg-orders", "type": "import"}
	]
}"#;

fn sample_graph() -> GraphData {
	serde_json::from_str(SAMPLE_GRAPH).unwrap_or_else(|err| {
		error!("sample graph payload failed to parse: {err}");
		GraphData::default()
	})
}

/// Default Home Page
#[component]
pub fn Home() -> impl IntoView {
	let graph_data = Signal::derive(sample_graph);

	view! {
		<ErrorBoundary fallback=|errors| {
			view! {
				<h1>"Uh oh! Something went wrong!"</h1>

				<p>"Errors: "</p>
				<ul>
					{move || {
						errors
							.get()
							.into_iter()
							.map(|(_, e)| view! { <li>{e.to_string()}</li> })
							.collect_view()
					}}
				</ul>
			}
		}>

			<div class="fullscreen-graph">
				<DependencyGraphCanvas data=graph_data fullscreen=true />
				<div class="graph-overlay">
					<h1>"Dependency Graph"</h1>
					<p class="subtitle">
						"Drag nodes to reposition. Scroll to zoom. Drag background to pan."
					</p>
				</div>
			</div>
		</ErrorBoundary>
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn sample_payload_parses() {
		let data = sample_graph();
		assert_eq!(data.nodes.len(), 10);
		assert_eq!(data.edges.len(), 11);
	}
}
