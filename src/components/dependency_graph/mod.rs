mod canvas;
mod component;
mod export;
mod layout;
mod render;
mod state;
mod svg;
mod types;

pub use component::DependencyGraphCanvas;
pub use types::{EdgeKind, GraphData, GraphEdge, GraphNode, NodeKind, Point};
