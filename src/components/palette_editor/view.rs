use super::config::EditorConfig;
use super::model::{Axis, Node, NodeId};
use super::palette::Palette;
use super::render::{self, Surface};

/// Maps a 3-D position to a CSS color; injected per view.
pub type BackgroundFn = Box<dyn Fn(f64, f64, f64) -> String>;

/// Default background: x is hue, y saturation, z lightness.
pub fn hsl_background(x: f64, y: f64, z: f64) -> String {
	format!("hsl({:.1}, {:.1}%, {:.1}%)", x * 360.0, y * 100.0, z * 100.0)
}

/// Which two axes a view displays, and which remains as its depth.
#[derive(Clone, Copy, Debug)]
pub struct Projection {
	pub x_axis: Axis,
	pub y_axis: Axis,
	pub depth_axis: Axis,
	/// When set, low depth values read as near instead of far.
	pub invert_depth: bool,
}

impl Projection {
	pub fn new(x_axis: Axis, y_axis: Axis) -> Self {
		Self {
			x_axis,
			y_axis,
			depth_axis: Axis::remaining(x_axis, y_axis),
			invert_depth: false,
		}
	}

	pub fn inverted(mut self) -> Self {
		self.invert_depth = true;
		self
	}

	/// Normalized screen position of a node.
	pub fn project(&self, node: &Node) -> (f64, f64) {
		(node.get(self.x_axis), node.get(self.y_axis))
	}

	/// Normalized screen position of a raw coordinate triple.
	pub fn project_point(&self, p: [f64; 3]) -> (f64, f64) {
		(p[self.x_axis.index()], p[self.y_axis.index()])
	}

	/// Nearness along the depth axis, clamped to `[0, 1]`; larger is closer
	/// to the viewer.
	pub fn near(&self, node: &Node) -> f64 {
		let d = node.get(self.depth_axis).clamp(0.0, 1.0);
		if self.invert_depth { 1.0 - d } else { d }
	}

	/// Rebuild a 3-D position from view coordinates, filling the unmapped
	/// axis with `depth`.
	pub fn unproject(&self, u: f64, v: f64, depth: f64) -> (f64, f64, f64) {
		let mut p = [depth; 3];
		p[self.x_axis.index()] = u;
		p[self.y_axis.index()] = v;
		(p[0], p[1], p[2])
	}
}

/// Logical pointer state of a view.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerState {
	Up,
	Down,
}

/// One 2-D orthographic projection of the shared palette, plus the transient
/// pointer state driving direct manipulation. A view owns its drawing
/// surface but never the nodes; every mutation goes through the palette
/// handed in by the editor.
pub struct View<S> {
	pub projection: Projection,
	/// Per-view background color mapping.
	pub background: BackgroundFn,
	pub(crate) surface: S,
	pub(crate) state: PointerState,
	pub(crate) dragging: bool,
	pub(crate) last_pos: (f64, f64),
	drag_origin: (f64, f64),
	last_click: f64,
}

impl<S: Surface> View<S> {
	pub fn new(surface: S, projection: Projection) -> Self {
		Self {
			projection,
			background: Box::new(hsl_background),
			surface,
			state: PointerState::Up,
			dragging: false,
			last_pos: (0.0, 0.0),
			drag_origin: (0.0, 0.0),
			last_click: f64::NEG_INFINITY,
		}
	}

	/// Whether a drag is in progress; drives the grab cursor affordance.
	pub fn dragging(&self) -> bool {
		self.dragging
	}

	/// The topmost node whose projected box contains the pixel position.
	/// Walks back to front so nearer nodes win on overlap.
	pub fn hit_test(
		&self,
		palette: &Palette,
		config: &EditorConfig,
		px: f64,
		py: f64,
	) -> Option<NodeId> {
		let mut hit = None;
		palette.map_nodes_by(
			self.projection.depth_axis,
			!self.projection.invert_depth,
			|node| {
				let size = if node.control {
					config.control_point_size
				} else {
					config.swatch_size
				};
				let (u, v) = self.projection.project(node);
				let left = u * config.canvas_size - size / 2.0;
				let top = v * config.canvas_size - size / 2.0;
				if px >= left && py >= top && px <= left + size && py <= top + size {
					hit = Some(node.id);
				}
			},
		);
		hit
	}

	pub(crate) fn pointer_down(
		&mut self,
		palette: &mut Palette,
		config: &EditorConfig,
		px: f64,
		py: f64,
		additive: bool,
		now_ms: f64,
	) {
		self.state = PointerState::Down;
		if now_ms - self.last_click < config.double_click_ms {
			let (x, y, z) =
				self.projection
					.unproject(px / config.canvas_size, py / config.canvas_size, 0.5);
			palette.add_node(x, y, z);
		}
		self.last_click = now_ms;

		let hit = self.hit_test(palette, config, px, py);
		if additive {
			if let Some(id) = hit
				&& let Some(node) = palette.node_mut(id)
			{
				node.active = !node.active;
			}
		} else {
			palette.map_nodes_mut(|node| node.active = Some(node.id) == hit);
		}
	}

	/// Record cursor motion; while the pointer is down, advance the drag.
	/// Returns true when the palette may have changed and a redraw is due.
	pub(crate) fn pointer_move(
		&mut self,
		palette: &mut Palette,
		config: &EditorConfig,
		px: f64,
		py: f64,
	) -> bool {
		self.last_pos = (px, py);
		if self.state != PointerState::Down {
			return false;
		}
		self.begin_drag(palette, px, py);
		let dx = (px - self.drag_origin.0) / config.canvas_size;
		let dy = (py - self.drag_origin.1) / config.canvas_size;
		self.drag_origin = (px, py);
		palette.translate_active(self.projection.x_axis, self.projection.y_axis, dx, dy);
		true
	}

	pub(crate) fn pointer_up(&mut self) {
		self.end_drag();
		self.state = PointerState::Up;
	}

	/// Start a drag anchored at the given pixel position. No-op while a drag
	/// is already running or when nothing is selected.
	pub(crate) fn begin_drag(&mut self, palette: &Palette, px: f64, py: f64) {
		if self.dragging || palette.active_nodes().is_empty() {
			return;
		}
		self.dragging = true;
		self.drag_origin = (px, py);
	}

	pub(crate) fn end_drag(&mut self) {
		self.dragging = false;
	}

	/// Redraw this view from the current palette state.
	pub fn render(&mut self, palette: &Palette, config: &EditorConfig) {
		render::render(
			&mut self.surface,
			self.projection,
			self.background.as_ref(),
			palette,
			config,
		);
	}
}
