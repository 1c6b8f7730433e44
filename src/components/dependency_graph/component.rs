use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;
use log::error;
use wasm_bindgen::prelude::*;
use web_sys::{
	Blob, BlobPropertyBag, CanvasRenderingContext2d, HtmlAnchorElement, HtmlCanvasElement,
	MouseEvent, Url, WheelEvent, Window,
};

use super::canvas;
use super::export::{self, PNG_FILENAME, SVG_FILENAME};
use super::layout::{self, Layout};
use super::render::{self, Scene};
use super::state::{NodeMove, Pointer, ViewState, node_at};
use super::types::{EdgeKind, GraphData, Point};

const PNG_EXPORT_SCALE: f32 = 2.0;

/// Everything the widget mutates between frames. The graph payload is
/// treated as an immutable snapshot except for node positions, which the
/// layout engine assigns and dragging moves.
struct GraphView {
	data: GraphData,
	layout: Layout,
	view: ViewState,
	focus: Option<String>,
	width: f64,
	height: f64,
}

impl GraphView {
	fn relayout(&mut self) {
		self.layout = layout::layout(
			&self.data,
			self.focus.as_deref(),
			&self.view.filters,
			self.width,
			self.height,
		);
	}

	fn scene(&self) -> Scene {
		render::render(&self.layout, &self.view, self.width, self.height)
	}

	fn apply_move(&mut self, step: &NodeMove) {
		// Dragged positions go into the working payload too, so they
		// survive the next relayout.
		for node in self
			.layout
			.nodes
			.iter_mut()
			.chain(self.data.nodes.iter_mut())
		{
			if node.id == step.node {
				node.position = Some(step.to);
			}
		}
	}

	fn resize(&mut self, width: f64, height: f64) {
		self.width = width;
		self.height = height;
	}
}

fn draw_frame(canvas: &HtmlCanvasElement, state: &GraphView) {
	let ctx: CanvasRenderingContext2d = canvas
		.get_context("2d")
		.unwrap()
		.unwrap()
		.dyn_into()
		.unwrap();
	canvas::draw(&state.scene(), &ctx);
}

fn event_point(canvas: &HtmlCanvasElement, ev: &MouseEvent) -> Point {
	let rect = canvas.get_bounding_client_rect();
	Point::new(
		ev.client_x() as f64 - rect.left(),
		ev.client_y() as f64 - rect.top(),
	)
}

fn download_blob(filename: &str, blob: &Blob) -> Result<(), JsValue> {
	let document = web_sys::window()
		.ok_or_else(|| JsValue::from_str("no window"))?
		.document()
		.ok_or_else(|| JsValue::from_str("no document"))?;
	let url = Url::create_object_url_with_blob(blob)?;
	let anchor: HtmlAnchorElement = document.create_element("a")?.dyn_into()?;
	anchor.set_href(&url);
	anchor.set_download(filename);
	anchor.click();
	Url::revoke_object_url(&url)
}

fn download_text(filename: &str, mime: &str, text: &str) -> Result<(), JsValue> {
	let parts = js_sys::Array::of1(&JsValue::from_str(text));
	let options = BlobPropertyBag::new();
	options.set_type(mime);
	let blob = Blob::new_with_str_sequence_and_options(&parts, &options)?;
	download_blob(filename, &blob)
}

fn download_bytes(filename: &str, mime: &str, bytes: &[u8]) -> Result<(), JsValue> {
	let buffer = js_sys::Uint8Array::from(bytes);
	let parts = js_sys::Array::of1(&buffer);
	let options = BlobPropertyBag::new();
	options.set_type(mime);
	let blob = Blob::new_with_u8_array_sequence_and_options(&parts, &options)?;
	download_blob(filename, &blob)
}

#[component]
pub fn DependencyGraphCanvas(
	#[prop(into)] data: Signal<GraphData>,
	#[prop(optional)] focus: Option<String>,
	#[prop(default = false)] fullscreen: bool,
	#[prop(default = None)] width: Option<f64>,
	#[prop(default = None)] height: Option<f64>,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let state: Rc<RefCell<Option<GraphView>>> = Rc::new(RefCell::new(None));
	let resize_cb: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));

	// DOM-reactive mirrors of the canvas-side view state.
	let filters_sig = RwSignal::new(ViewState::default().filters);
	let show_summary_sig = RwSignal::new(false);
	let toast = RwSignal::new(None::<String>);
	let summary = Memo::new(move |_| layout::summarize(&data.get()));

	let (state_init, resize_cb_init) = (state.clone(), resize_cb.clone());
	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let window: Window = web_sys::window().unwrap();

		let (w, h) = if fullscreen {
			(
				window.inner_width().unwrap().as_f64().unwrap(),
				window.inner_height().unwrap().as_f64().unwrap(),
			)
		} else {
			(
				width.unwrap_or_else(|| {
					canvas
						.parent_element()
						.map(|p| p.client_width() as f64)
						.unwrap_or(800.0)
				}),
				height.unwrap_or_else(|| {
					canvas
						.parent_element()
						.map(|p| p.client_height() as f64)
						.unwrap_or(600.0)
				}),
			)
		};
		canvas.set_width(w as u32);
		canvas.set_height(h as u32);

		// A fresh payload replaces the graph snapshot; the view state
		// survives it and is only reset by explicit user action.
		let view = state_init
			.borrow()
			.as_ref()
			.map(|s| s.view.clone())
			.unwrap_or_default();
		let mut graph_view = GraphView {
			data: data.get(),
			layout: Layout::default(),
			view,
			focus: focus.clone(),
			width: w,
			height: h,
		};
		graph_view.relayout();
		filters_sig.set(graph_view.view.filters.clone());
		draw_frame(&canvas, &graph_view);
		*state_init.borrow_mut() = Some(graph_view);

		if fullscreen {
			let (state_resize, canvas_resize) = (state_init.clone(), canvas.clone());
			*resize_cb_init.borrow_mut() = Some(Closure::new(move || {
				let win: Window = web_sys::window().unwrap();
				let (nw, nh) = (
					win.inner_width().unwrap().as_f64().unwrap(),
					win.inner_height().unwrap().as_f64().unwrap(),
				);
				canvas_resize.set_width(nw as u32);
				canvas_resize.set_height(nh as u32);
				if let Some(ref mut s) = *state_resize.borrow_mut() {
					s.resize(nw, nh);
					draw_frame(&canvas_resize, s);
				}
			}));
			if let Some(ref cb) = *resize_cb_init.borrow() {
				let _ =
					window.add_event_listener_with_callback("resize", cb.as_ref().unchecked_ref());
			}
		}
	});

	let state_md = state.clone();
	let on_mousedown = move |ev: MouseEvent| {
		let canvas: HtmlCanvasElement = canvas_ref.get().unwrap().into();
		let p = event_point(&canvas, &ev);
		if let Some(ref mut s) = *state_md.borrow_mut() {
			let hit = node_at(&s.layout.nodes, &s.view, p).cloned();
			s.view.pointer_down(p, hit.as_ref());
			draw_frame(&canvas, s);
		}
	};

	let state_mm = state.clone();
	let on_mousemove = move |ev: MouseEvent| {
		let canvas: HtmlCanvasElement = canvas_ref.get().unwrap().into();
		let p = event_point(&canvas, &ev);
		if let Some(ref mut s) = *state_mm.borrow_mut() {
			if s.view.pointer == Pointer::Idle {
				s.view.hovered = node_at(&s.layout.nodes, &s.view, p).map(|n| n.id.clone());
			}
			if let Some(step) = s.view.pointer_move(p) {
				s.apply_move(&step);
			}
			draw_frame(&canvas, s);
		}
	};

	let state_mu = state.clone();
	let on_mouseup = move |_: MouseEvent| {
		if let Some(ref mut s) = *state_mu.borrow_mut() {
			s.view.pointer_up();
		}
	};

	let state_ml = state.clone();
	let on_mouseleave = move |_: MouseEvent| {
		let canvas: HtmlCanvasElement = canvas_ref.get().unwrap().into();
		if let Some(ref mut s) = *state_ml.borrow_mut() {
			s.view.pointer_leave();
			draw_frame(&canvas, s);
		}
	};

	let state_wh = state.clone();
	let on_wheel = move |ev: WheelEvent| {
		ev.prevent_default();
		let canvas: HtmlCanvasElement = canvas_ref.get().unwrap().into();
		let p = event_point(&canvas, &ev);
		if let Some(ref mut s) = *state_wh.borrow_mut() {
			s.view.wheel(p, ev.delta_y());
			draw_frame(&canvas, s);
		}
	};

	// Shared shape of every toolbar action: mutate the view, redraw.
	let with_view = {
		let state = state.clone();
		move |f: &dyn Fn(&mut GraphView)| {
			let canvas: HtmlCanvasElement = canvas_ref.get().unwrap().into();
			if let Some(ref mut s) = *state.borrow_mut() {
				f(s);
				draw_frame(&canvas, s);
			}
		}
	};

	let wv = with_view.clone();
	let on_zoom_in = move |_: MouseEvent| wv(&|s| s.view.zoom_in());
	let wv = with_view.clone();
	let on_zoom_out = move |_: MouseEvent| wv(&|s| s.view.zoom_out());
	let wv = with_view.clone();
	let on_reset = move |_: MouseEvent| wv(&|s| s.view.reset_view());
	let wv = with_view.clone();
	let on_show_all = move |_: MouseEvent| {
		wv(&|s| {
			s.view.show_all();
			s.relayout();
			filters_sig.set(s.view.filters.clone());
		})
	};
	let wv = with_view.clone();
	let on_toggle_summary = move |_: MouseEvent| {
		wv(&|s| {
			s.view.toggle_summary();
			show_summary_sig.set(s.view.show_summary);
		})
	};

	let state_svg = state.clone();
	let on_export_svg = move |_: MouseEvent| {
		if let Some(ref s) = *state_svg.borrow() {
			let markup = export::export_svg(&s.scene());
			if let Err(err) = download_text(SVG_FILENAME, "image/svg+xml", &markup) {
				error!("svg export failed: {err:?}");
				toast.set(Some("Could not export SVG".into()));
			}
		}
	};

	let state_png = state.clone();
	let on_export_png = move |_: MouseEvent| {
		if let Some(ref s) = *state_png.borrow() {
			match export::export_png(&s.scene(), PNG_EXPORT_SCALE) {
				Ok(bytes) => {
					if let Err(err) = download_bytes(PNG_FILENAME, "image/png", &bytes) {
						error!("png export failed: {err:?}");
						toast.set(Some("Could not export PNG".into()));
					}
				}
				Err(err) => {
					error!("png export failed: {err}");
					toast.set(Some(format!("Could not export PNG: {err}")));
				}
			}
		}
	};

	view! {
		<div class="dependency-graph">
			<div class="graph-toolbar">
				{EdgeKind::ALL
					.into_iter()
					.map(|kind| {
						let wv = with_view.clone();
						view! {
							<button
								class="filter-btn"
								class:active=move || filters_sig.get().contains(&kind)
								on:click=move |_| {
									wv(
										&|s| {
											s.view.toggle_filter(kind);
											s.relayout();
											filters_sig.set(s.view.filters.clone());
										},
									)
								}
							>
								{kind.label()}
							</button>
						}
					})
					.collect_view()}
				<button on:click=on_show_all>"Show all"</button>
				<span class="toolbar-gap"></span>
				<button on:click=on_zoom_in>"+"</button>
				<button on:click=on_zoom_out>"-"</button>
				<button on:click=on_reset>"Reset"</button>
				<span class="toolbar-gap"></span>
				<button on:click=on_toggle_summary>
					{move || if show_summary_sig.get() { "Graph" } else { "Summary" }}
				</button>
				<button on:click=on_export_svg>"SVG"</button>
				<button on:click=on_export_png>"PNG"</button>
			</div>

			<canvas
				node_ref=canvas_ref
				class="dependency-graph-canvas"
				on:mousedown=on_mousedown
				on:mousemove=on_mousemove
				on:mouseup=on_mouseup
				on:mouseleave=on_mouseleave
				on:wheel=on_wheel
				style:display=move || if show_summary_sig.get() { "none" } else { "block" }
			/>

			{move || {
				show_summary_sig
					.get()
					.then(|| {
						let s = summary.get();
						view! {
							<div class="graph-summary">
								<h2>"Graph summary"</h2>
								<p>{format!("{} nodes, {} edges", s.node_count, s.edge_count)}</p>
								<ul>
									{s.edges_by_kind
										.into_iter()
										.map(|(kind, count)| {
											view! { <li>{format!("{}: {}", kind.label(), count)}</li> }
										})
										.collect_view()}
								</ul>
								<h3>"Most coupled"</h3>
								<ol>
									{s.top_coupled
										.into_iter()
										.map(|(name, coupling)| {
											view! { <li>{format!("{name} ({coupling})")}</li> }
										})
										.collect_view()}
								</ol>
							</div>
						}
					})
			}}

			{move || {
				toast
					.get()
					.map(|message| {
						view! {
							<div class="graph-toast" on:click=move |_| toast.set(None)>
								{message}
							</div>
						}
					})
			}}
		</div>
	}
}
