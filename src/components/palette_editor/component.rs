use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;
use log::info;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, KeyboardEvent, MouseEvent, Window};

use super::config::EditorConfig;
use super::editor::{Editor, Key, ViewId};
use super::model::Axis;
use super::render::Surface;
use super::view::{Projection, View};

/// 2-D canvas implementation of the drawing surface contract.
pub struct CanvasSurface {
	ctx: CanvasRenderingContext2d,
}

impl CanvasSurface {
	pub fn new(ctx: CanvasRenderingContext2d) -> Self {
		Self { ctx }
	}
}

impl Surface for CanvasSurface {
	fn clear(&mut self, color: &str, width: f64, height: f64) {
		self.ctx.set_fill_style_str(color);
		self.ctx.fill_rect(0.0, 0.0, width, height);
	}

	fn fill_rect(&mut self, color: &str, x: f64, y: f64, w: f64, h: f64) {
		self.ctx.set_fill_style_str(color);
		self.ctx.fill_rect(x, y, w, h);
	}

	fn stroke_rect(&mut self, color: &str, line_width: f64, x: f64, y: f64, w: f64, h: f64) {
		self.ctx.set_stroke_style_str(color);
		self.ctx.set_line_width(line_width);
		self.ctx.stroke_rect(x, y, w, h);
	}

	fn line(&mut self, color: &str, line_width: f64, from: (f64, f64), to: (f64, f64)) {
		self.ctx.set_stroke_style_str(color);
		self.ctx.set_line_width(line_width);
		self.ctx.begin_path();
		self.ctx.move_to(from.0, from.1);
		self.ctx.line_to(to.0, to.1);
		self.ctx.stroke();
	}

	fn bezier(
		&mut self,
		color: &str,
		line_width: f64,
		from: (f64, f64),
		c1: (f64, f64),
		c2: (f64, f64),
		to: (f64, f64),
	) {
		self.ctx.set_stroke_style_str(color);
		self.ctx.set_line_width(line_width);
		self.ctx.begin_path();
		self.ctx.move_to(from.0, from.1);
		self.ctx.bezier_curve_to(c1.0, c1.1, c2.0, c2.1, to.0, to.1);
		self.ctx.stroke();
	}

	fn circle(&mut self, fill: &str, stroke: &str, center: (f64, f64), radius: f64) {
		self.ctx.begin_path();
		let _ = self
			.ctx
			.arc(center.0, center.1, radius.max(0.0), 0.0, 2.0 * std::f64::consts::PI);
		self.ctx.set_fill_style_str(fill);
		self.ctx.fill();
		self.ctx.set_stroke_style_str(stroke);
		self.ctx.set_line_width(1.0);
		self.ctx.stroke();
	}
}

type SharedEditor = Rc<RefCell<Option<Editor<CanvasSurface>>>>;

fn offset_position(canvas: &HtmlCanvasElement, ev: &MouseEvent) -> (f64, f64) {
	let rect = canvas.get_bounding_client_rect();
	(
		ev.client_x() as f64 - rect.left(),
		ev.client_y() as f64 - rect.top(),
	)
}

fn update_cursor(canvas: &HtmlCanvasElement, dragging: bool) {
	let cursor = if dragging { "all-scroll" } else { "default" };
	let html: &web_sys::HtmlElement = canvas;
	let _ = web_sys::HtmlElement::style(html).set_property("cursor", cursor);
}

fn map_key(ev: &KeyboardEvent) -> Option<Key> {
	let key = match ev.key().as_str() {
		"Enter" => Key::Enter,
		"Escape" => Key::Escape,
		"ArrowLeft" => Key::ArrowLeft,
		"ArrowRight" => Key::ArrowRight,
		"ArrowUp" => Key::ArrowUp,
		"ArrowDown" => Key::ArrowDown,
		"Backspace" => Key::Backspace,
		"Delete" => Key::Delete,
		"a" | "A" => Key::A,
		"g" | "G" => Key::G,
		"j" | "J" => Key::J,
		"x" | "X" => Key::X,
		"m" | "M" => Key::M,
		"l" | "L" => Key::L,
		_ => return None,
	};
	Some(key)
}

fn on_mouse_down(
	editor: SharedEditor,
	canvas_ref: NodeRef<leptos::html::Canvas>,
	id: ViewId,
) -> impl Fn(MouseEvent) {
	move |ev: MouseEvent| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let (x, y) = offset_position(&canvas, &ev);
		if let Some(ref mut editor) = *editor.borrow_mut() {
			editor.pointer_down(id, x, y, ev.shift_key());
			update_cursor(&canvas, editor.view(id).is_some_and(|v| v.dragging()));
		}
	}
}

fn on_mouse_move(
	editor: SharedEditor,
	canvas_ref: NodeRef<leptos::html::Canvas>,
	id: ViewId,
) -> impl Fn(MouseEvent) {
	move |ev: MouseEvent| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let (x, y) = offset_position(&canvas, &ev);
		if let Some(ref mut editor) = *editor.borrow_mut() {
			editor.pointer_move(id, x, y);
			update_cursor(&canvas, editor.view(id).is_some_and(|v| v.dragging()));
		}
	}
}

fn on_mouse_up(
	editor: SharedEditor,
	canvas_ref: NodeRef<leptos::html::Canvas>,
	id: ViewId,
) -> impl Fn(MouseEvent) {
	move |_ev: MouseEvent| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		if let Some(ref mut editor) = *editor.borrow_mut() {
			editor.pointer_up(id);
			update_cursor(&canvas, false);
		}
	}
}

/// Three canvas projections (xy, zy, xz) over one shared palette, with
/// window-level keyboard command routing.
#[component]
pub fn PaletteEditor() -> impl IntoView {
	let xy_ref = NodeRef::<leptos::html::Canvas>::new();
	let zy_ref = NodeRef::<leptos::html::Canvas>::new();
	let xz_ref = NodeRef::<leptos::html::Canvas>::new();

	let editor: SharedEditor = Rc::new(RefCell::new(None));
	let key_cb: Rc<RefCell<Option<Closure<dyn FnMut(KeyboardEvent)>>>> =
		Rc::new(RefCell::new(None));

	let (editor_init, key_cb_init) = (editor.clone(), key_cb.clone());
	Effect::new(move |_| {
		let (Some(xy), Some(zy), Some(xz)) = (xy_ref.get(), zy_ref.get(), xz_ref.get()) else {
			return;
		};
		if editor_init.borrow().is_some() {
			return;
		}

		let config = EditorConfig::default();
		let size = config.canvas_size as u32;
		let mut editor = Editor::new(config, Box::new(js_sys::Date::now));

		let projections = [
			Projection::new(Axis::X, Axis::Y),
			Projection::new(Axis::Z, Axis::Y).inverted(),
			Projection::new(Axis::X, Axis::Z),
		];
		for (canvas, projection) in [xy, zy, xz].into_iter().zip(projections) {
			let canvas: HtmlCanvasElement = canvas.into();
			canvas.set_width(size);
			canvas.set_height(size);
			let ctx: CanvasRenderingContext2d = canvas
				.get_context("2d")
				.unwrap()
				.unwrap()
				.dyn_into()
				.unwrap();
			editor.add_view(View::new(CanvasSurface::new(ctx), projection));
		}

		editor.palette_mut().add_node(0.25, 0.50, 0.75);
		editor.palette_mut().add_node(0.50, 0.25, 0.50);
		editor.render_all();
		info!("Palette editor ready");
		*editor_init.borrow_mut() = Some(editor);

		let editor_keys = editor_init.clone();
		*key_cb_init.borrow_mut() = Some(Closure::new(move |ev: KeyboardEvent| {
			let Some(key) = map_key(&ev) else {
				return;
			};
			ev.prevent_default();
			if let Some(ref mut editor) = *editor_keys.borrow_mut() {
				editor.key(key, ev.shift_key());
			}
		}));
		let window: Window = web_sys::window().unwrap();
		if let Some(ref cb) = *key_cb_init.borrow() {
			let _ = window.add_event_listener_with_callback("keydown", cb.as_ref().unchecked_ref());
		}
	});

	view! {
		<div class="palette-editor" style="display: flex; gap: 8px; flex-wrap: wrap;">
			<canvas
				node_ref=xy_ref
				class="palette-view"
				on:mousedown=on_mouse_down(editor.clone(), xy_ref, 0)
				on:mousemove=on_mouse_move(editor.clone(), xy_ref, 0)
				on:mouseup=on_mouse_up(editor.clone(), xy_ref, 0)
			/>
			<canvas
				node_ref=zy_ref
				class="palette-view"
				on:mousedown=on_mouse_down(editor.clone(), zy_ref, 1)
				on:mousemove=on_mouse_move(editor.clone(), zy_ref, 1)
				on:mouseup=on_mouse_up(editor.clone(), zy_ref, 1)
			/>
			<canvas
				node_ref=xz_ref
				class="palette-view"
				on:mousedown=on_mouse_down(editor.clone(), xz_ref, 2)
				on:mousemove=on_mouse_move(editor.clone(), xz_ref, 2)
				on:mouseup=on_mouse_up(editor.clone(), xz_ref, 2)
			/>
		</div>
	}
}
