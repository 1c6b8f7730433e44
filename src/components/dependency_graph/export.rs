//! SVG and PNG export of the current frame.
//!
//! The SVG path serializes the scene's markup directly; the PNG path
//! rasterizes that markup onto an offscreen pixmap and encodes it.

use thiserror::Error;
use tiny_skia::{Pixmap, Transform};

use super::render::Scene;
use super::svg::scene_to_svg;

pub const SVG_FILENAME: &str = "dependency-graph.svg";
pub const PNG_FILENAME: &str = "dependency-graph.png";

/// Why an export could not be produced.
#[derive(Debug, Error)]
pub enum ExportError {
	#[error("scale must be positive, got {0}")]
	BadScale(f32),
	#[error("failed to parse generated SVG markup: {0}")]
	InvalidSvg(String),
	#[error("could not allocate a {width}x{height} raster surface")]
	Allocation { width: u32, height: u32 },
	#[error("failed to encode PNG data: {0}")]
	PngEncode(String),
}

pub fn export_svg(scene: &Scene) -> String {
	scene_to_svg(scene)
}

pub fn export_png(scene: &Scene, scale: f32) -> Result<Vec<u8>, ExportError> {
	if scale <= 0.0 || !scale.is_finite() {
		return Err(ExportError::BadScale(scale));
	}

	let markup = scene_to_svg(scene);
	let mut options = resvg::usvg::Options::default();
	options.fontdb_mut().load_system_fonts();
	let tree = resvg::usvg::Tree::from_str(&markup, &options)
		.map_err(|err| ExportError::InvalidSvg(err.to_string()))?;

	let size = tree.size().to_int_size();
	let width = ((size.width() as f32 * scale).ceil() as u32).max(1);
	let height = ((size.height() as f32 * scale).ceil() as u32).max(1);
	let mut pixmap =
		Pixmap::new(width, height).ok_or(ExportError::Allocation { width, height })?;
	resvg::render(&tree, Transform::from_scale(scale, scale), &mut pixmap.as_mut());

	pixmap
		.encode_png()
		.map_err(|err| ExportError::PngEncode(err.to_string()))
}

#[cfg(test)]
mod tests {
	use super::super::layout::layout;
	use super::super::render::render;
	use super::super::state::ViewState;
	use super::super::types::GraphData;
	use super::*;

	fn sample_scene() -> (Scene, ViewState) {
		let data: GraphData = serde_json::from_str(
			r#"{
				"nodes": [
					{"id": "A", "name": "OrderService", "type": "class", "size": 300},
					{"id": "B", "name": "OrderRepository", "type": "interface"}
				],
				"edges": [
					{"id": "e1", "from": "A", "to": "B", "type": "composition", "weight": 2}
				]
			}"#,
		)
		.unwrap();
		let view = ViewState::default();
		let laid = layout(&data, None, &view.filters, 640.0, 480.0);
		(render(&laid, &view, 640.0, 480.0), view)
	}

	#[test]
	fn png_export_produces_a_png_file() {
		let (scene, _) = sample_scene();
		let bytes = export_png(&scene, 2.0).unwrap();
		assert_eq!(&bytes[..8], b"\x89PNG\r\n\x1a\n");
	}

	#[test]
	fn exports_do_not_mutate_the_scene_or_view() {
		let (scene, view) = sample_scene();
		let scene_before = scene.clone();
		let view_before = view.clone();
		let _ = export_svg(&scene);
		let _ = export_png(&scene, 1.0).unwrap();
		assert_eq!(scene, scene_before);
		assert_eq!(view, view_before);
	}

	#[test]
	fn svg_export_is_stable_across_calls() {
		let (scene, _) = sample_scene();
		assert_eq!(export_svg(&scene), export_svg(&scene));
	}

	#[test]
	fn rejects_nonsense_scales() {
		let (scene, _) = sample_scene();
		assert!(matches!(
			export_png(&scene, 0.0),
			Err(ExportError::BadScale(_))
		));
		assert!(matches!(
			export_png(&scene, -1.0),
			Err(ExportError::BadScale(_))
		));
	}
}
