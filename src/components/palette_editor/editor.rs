use std::collections::HashSet;

use super::config::EditorConfig;
use super::model::NodeId;
use super::palette::{MIN_SUBDIVISIONS, Palette};
use super::render::Surface;
use super::view::{PointerState, View};

/// Index of a registered view, in registration order.
pub type ViewId = usize;

/// Millisecond wall clock injected by the host. The editor only compares
/// readings against the double-click window.
pub type Clock = Box<dyn Fn() -> f64>;

/// Keyboard codes understood by the editor; the host drops everything else.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Key {
	Enter,
	Escape,
	ArrowLeft,
	ArrowRight,
	ArrowUp,
	ArrowDown,
	Backspace,
	Delete,
	A,
	G,
	J,
	X,
	M,
	L,
}

/// Coordinates one palette and its views: routes pointer events into the
/// per-view state machines, dispatches keyboard commands, and remembers
/// which view last saw the pointer so keyboard-only commands have a target.
pub struct Editor<S> {
	config: EditorConfig,
	palette: Palette,
	views: Vec<View<S>>,
	active_view: Option<ViewId>,
	clock: Clock,
}

impl<S: Surface> Editor<S> {
	pub fn new(config: EditorConfig, clock: Clock) -> Self {
		Self {
			config,
			palette: Palette::new(),
			views: Vec::new(),
			active_view: None,
			clock,
		}
	}

	pub fn config(&self) -> &EditorConfig {
		&self.config
	}

	pub fn palette(&self) -> &Palette {
		&self.palette
	}

	pub fn palette_mut(&mut self) -> &mut Palette {
		&mut self.palette
	}

	/// Register a view; pointer events for it are addressed by the returned
	/// id.
	pub fn add_view(&mut self, view: View<S>) -> ViewId {
		self.views.push(view);
		self.views.len() - 1
	}

	pub fn view(&self, id: ViewId) -> Option<&View<S>> {
		self.views.get(id)
	}

	/// The view that most recently saw pointer motion.
	pub fn active_view(&self) -> Option<ViewId> {
		self.active_view
	}

	/// Redraw every view in registration order.
	pub fn render_all(&mut self) {
		for view in &mut self.views {
			view.render(&self.palette, &self.config);
		}
	}

	pub fn pointer_down(&mut self, id: ViewId, x: f64, y: f64, additive: bool) {
		let now = (self.clock)();
		let Some(view) = self.views.get_mut(id) else {
			return;
		};
		view.pointer_down(&mut self.palette, &self.config, x, y, additive, now);
		// additive clicks keep the previous frame on screen
		if !additive {
			self.render_all();
		}
	}

	pub fn pointer_move(&mut self, id: ViewId, x: f64, y: f64) {
		let Some(view) = self.views.get_mut(id) else {
			return;
		};
		self.active_view = Some(id);
		let changed = view.pointer_move(&mut self.palette, &self.config, x, y);
		if changed {
			self.render_all();
		}
	}

	pub fn pointer_up(&mut self, id: ViewId) {
		let Some(view) = self.views.get_mut(id) else {
			return;
		};
		view.pointer_up();
		self.render_all();
	}

	/// Dispatch one keyboard command, then redraw everything.
	pub fn key(&mut self, key: Key, modifier: bool) {
		match key {
			Key::Enter | Key::Escape => self.cancel(),
			Key::ArrowLeft => self.nudge(-1.0, 0.0),
			Key::ArrowRight => self.nudge(1.0, 0.0),
			Key::ArrowUp => self.nudge(0.0, -1.0),
			Key::ArrowDown => self.nudge(0.0, 1.0),
			Key::Backspace | Key::Delete => self.delete_selection(),
			Key::A => self.toggle_select_all(modifier),
			Key::G => self.grab(),
			Key::J => self.join_selection(),
			Key::X => self.disconnect_selection(),
			Key::M => self.adjust_subdivisions(1),
			Key::L => self.adjust_subdivisions(-1),
		}
		self.render_all();
	}

	fn cancel(&mut self) {
		let Some(view) = self.active_view.and_then(|id| self.views.get_mut(id)) else {
			return;
		};
		view.end_drag();
		view.state = PointerState::Up;
	}

	/// Pan every node along the active view's axes, selection ignored.
	fn nudge(&mut self, dx: f64, dy: f64) {
		let Some(view) = self.active_view.and_then(|id| self.views.get(id)) else {
			return;
		};
		let projection = view.projection;
		let step = self.config.nudge_step;
		self.palette
			.translate_all(projection.x_axis, projection.y_axis, dx * step, dy * step);
	}

	fn delete_selection(&mut self) {
		for id in self.palette.active_nodes() {
			self.palette.remove_node(id);
		}
	}

	fn toggle_select_all(&mut self, subtractive: bool) {
		if let Some(view) = self.active_view.and_then(|id| self.views.get(id))
			&& view.dragging()
		{
			return;
		}
		let value = if subtractive {
			false
		} else {
			self.palette.active_nodes().len() != self.palette.node_count()
		};
		self.palette.set_all_active(value);
	}

	/// Start a keyboard drag at the active view's last cursor position;
	/// subsequent pointer moves feed it like a held button would.
	fn grab(&mut self) {
		let Some(view) = self.active_view.and_then(|id| self.views.get_mut(id)) else {
			return;
		};
		let (px, py) = view.last_pos;
		view.begin_drag(&self.palette, px, py);
		if view.dragging() {
			view.state = PointerState::Down;
		}
	}

	/// Connect every pair of selected color nodes.
	fn join_selection(&mut self) {
		let mut selected: Vec<NodeId> = Vec::new();
		self.palette.map_nodes(|n| {
			if n.active && !n.control {
				selected.push(n.id);
			}
		});
		for (i, &a) in selected.iter().enumerate() {
			for &b in &selected[i + 1..] {
				self.palette.connect(a, b);
			}
		}
	}

	fn disconnect_selection(&mut self) {
		let selected = self.palette.active_nodes();
		self.palette.disconnect(&selected);
	}

	/// Grow or shrink the sampling of every edge whose endpoints are both
	/// selected, floored at the minimum subdivision count.
	fn adjust_subdivisions(&mut self, delta: i64) {
		let active: HashSet<NodeId> = self.palette.active_nodes().into_iter().collect();
		self.palette.map_edges_mut(|edge| {
			if active.contains(&edge.start) && active.contains(&edge.end) {
				let next = edge.subdivisions as i64 + delta;
				edge.subdivisions = next.max(MIN_SUBDIVISIONS as i64) as u32;
			}
		});
	}
}

#[cfg(test)]
mod tests {
	use std::cell::Cell;
	use std::rc::Rc;

	use super::super::model::Axis;
	use super::super::testing::{NullSurface, RecordingSurface};
	use super::super::view::Projection;
	use super::*;

	fn editor() -> Editor<NullSurface> {
		let mut editor = Editor::new(EditorConfig::default(), Box::new(|| 0.0));
		editor.add_view(View::new(NullSurface, Projection::new(Axis::X, Axis::Y)));
		editor.add_view(View::new(
			NullSurface,
			Projection::new(Axis::Z, Axis::Y).inverted(),
		));
		editor
	}

	fn seeded() -> (Editor<NullSurface>, NodeId, NodeId) {
		let mut editor = editor();
		let a = editor.palette_mut().add_node(0.0, 0.0, 0.0);
		let b = editor.palette_mut().add_node(1.0, 1.0, 1.0);
		(editor, a, b)
	}

	#[test]
	fn join_connects_the_selection_as_a_clique() {
		let (mut editor, a, b) = seeded();
		let c = editor.palette_mut().add_node(0.5, 0.5, 0.5);
		editor.palette_mut().set_all_active(true);
		editor.key(Key::J, false);
		assert_eq!(editor.palette().edges().len(), 3);
		assert!(editor.palette().connected(a, b));
		assert!(editor.palette().connected(a, c));
		assert!(editor.palette().connected(b, c));

		// pressing again adds nothing
		editor.key(Key::J, false);
		assert_eq!(editor.palette().edges().len(), 3);
	}

	#[test]
	fn join_places_controls_between_the_endpoints() {
		let (mut editor, _, _) = seeded();
		editor.palette_mut().set_all_active(true);
		editor.key(Key::J, false);
		let edge = &editor.palette().edges()[0];
		for axis in [Axis::X, Axis::Y, Axis::Z] {
			assert!((edge.control1.get(axis) - 1.0 / 3.0).abs() < 1e-12);
			assert!((edge.control2.get(axis) - 2.0 / 3.0).abs() < 1e-12);
		}
		assert_eq!(edge.subdivisions, 2);
	}

	#[test]
	fn subdivisions_adjust_and_floor_at_two() {
		let (mut editor, _, _) = seeded();
		editor.palette_mut().set_all_active(true);
		editor.key(Key::J, false);
		editor.key(Key::M, false);
		assert_eq!(editor.palette().edges()[0].subdivisions, 3);
		editor.key(Key::L, false);
		editor.key(Key::L, false);
		editor.key(Key::L, false);
		assert_eq!(editor.palette().edges()[0].subdivisions, 2);
	}

	#[test]
	fn subdivisions_require_both_endpoints_selected() {
		let (mut editor, a, _) = seeded();
		editor.palette_mut().set_all_active(true);
		editor.key(Key::J, false);
		editor.palette_mut().set_all_active(false);
		editor.palette_mut().node_mut(a).unwrap().active = true;
		editor.key(Key::M, false);
		assert_eq!(editor.palette().edges()[0].subdivisions, 2);
	}

	#[test]
	fn delete_removes_selection_and_cascades() {
		let (mut editor, a, b) = seeded();
		editor.palette_mut().set_all_active(true);
		editor.key(Key::J, false);
		editor.palette_mut().set_all_active(false);
		editor.palette_mut().node_mut(a).unwrap().active = true;
		editor.key(Key::Delete, false);
		assert!(editor.palette().node(a).is_none());
		assert_eq!(editor.palette().edges().len(), 0);
		assert!(editor.palette().node(b).is_some());
	}

	#[test]
	fn disconnect_removes_fully_selected_edges() {
		let (mut editor, a, b) = seeded();
		let c = editor.palette_mut().add_node(0.5, 0.5, 0.5);
		editor.palette_mut().set_all_active(true);
		editor.key(Key::J, false);
		editor.palette_mut().set_all_active(false);
		editor.palette_mut().node_mut(a).unwrap().active = true;
		editor.palette_mut().node_mut(b).unwrap().active = true;
		editor.key(Key::X, false);
		assert!(!editor.palette().connected(a, b));
		assert!(editor.palette().connected(a, c));
		assert!(editor.palette().connected(b, c));
	}

	#[test]
	fn select_all_toggles_and_clears() {
		let (mut editor, a, _) = seeded();
		editor.palette_mut().node_mut(a).unwrap().active = true;
		editor.key(Key::A, false);
		assert_eq!(
			editor.palette().active_nodes().len(),
			editor.palette().node_count()
		);
		editor.key(Key::A, false);
		assert!(editor.palette().active_nodes().is_empty());
	}

	#[test]
	fn subtractive_select_all_always_clears() {
		let (mut editor, a, _) = seeded();
		editor.palette_mut().node_mut(a).unwrap().active = true;
		editor.key(Key::A, true);
		assert!(editor.palette().active_nodes().is_empty());
	}

	#[test]
	fn select_all_is_ignored_mid_drag() {
		let (mut editor, _, _) = seeded();
		// click the node at the origin, then drag it
		editor.pointer_down(0, 0.0, 0.0, false);
		editor.pointer_move(0, 0.0, 0.0);
		assert!(editor.view(0).unwrap().dragging());
		editor.key(Key::A, false);
		assert_eq!(editor.palette().active_nodes().len(), 1);
	}

	#[test]
	fn nudge_pans_every_node_in_the_active_view() {
		let (mut editor, a, b) = seeded();
		assert_eq!(editor.active_view(), None);
		editor.pointer_move(0, 10.0, 10.0);
		assert_eq!(editor.active_view(), Some(0));
		editor.key(Key::ArrowRight, false);
		editor.key(Key::ArrowUp, false);
		let step = editor.config().nudge_step;
		let na = editor.palette().node(a).unwrap();
		assert!((na.x - step).abs() < 1e-12);
		assert!((na.y + step).abs() < 1e-12);
		assert_eq!(na.z, 0.0);
		assert!((editor.palette().node(b).unwrap().x - (1.0 + step)).abs() < 1e-12);
	}

	#[test]
	fn nudge_follows_the_active_view_axes() {
		let (mut editor, a, _) = seeded();
		// zy view: screen x is the z axis
		editor.pointer_move(1, 10.0, 10.0);
		editor.key(Key::ArrowRight, false);
		let step = editor.config().nudge_step;
		let na = editor.palette().node(a).unwrap();
		assert!((na.z - step).abs() < 1e-12);
		assert_eq!(na.x, 0.0);
	}

	#[test]
	fn nudge_without_an_active_view_is_a_noop() {
		let (mut editor, a, _) = seeded();
		editor.key(Key::ArrowDown, false);
		assert_eq!(editor.palette().node(a).unwrap().y, 0.0);
	}

	#[test]
	fn grab_starts_a_drag_continued_by_pointer_moves() {
		let (mut editor, a, _) = seeded();
		editor.palette_mut().node_mut(a).unwrap().active = true;
		editor.pointer_move(0, 150.0, 150.0);
		editor.key(Key::G, false);
		assert!(editor.view(0).unwrap().dragging());
		editor.pointer_move(0, 180.0, 150.0);
		let na = editor.palette().node(a).unwrap();
		assert!((na.x - 0.1).abs() < 1e-12);
		assert_eq!(na.y, 0.0);
	}

	#[test]
	fn grab_without_a_selection_does_nothing() {
		let (mut editor, _, _) = seeded();
		editor.pointer_move(0, 150.0, 150.0);
		editor.key(Key::G, false);
		assert!(!editor.view(0).unwrap().dragging());
	}

	#[test]
	fn cancel_ends_the_active_drag() {
		let (mut editor, a, _) = seeded();
		editor.palette_mut().node_mut(a).unwrap().active = true;
		editor.pointer_move(0, 150.0, 150.0);
		editor.key(Key::G, false);
		assert!(editor.view(0).unwrap().dragging());
		editor.key(Key::Escape, false);
		assert!(!editor.view(0).unwrap().dragging());
		// the pointer state machine is reset, so moves no longer drag
		editor.pointer_move(0, 200.0, 200.0);
		assert_eq!(editor.palette().node(a).unwrap().x, 0.0);
	}

	#[test]
	fn double_click_through_the_editor_clock() {
		let now = Rc::new(Cell::new(1000.0));
		let clock = now.clone();
		let mut editor: Editor<NullSurface> =
			Editor::new(EditorConfig::default(), Box::new(move || clock.get()));
		editor.add_view(View::new(NullSurface, Projection::new(Axis::X, Axis::Y)));

		editor.pointer_down(0, 150.0, 150.0, false);
		editor.pointer_up(0);
		now.set(1300.0);
		editor.pointer_down(0, 150.0, 150.0, false);
		assert_eq!(editor.palette().node_count(), 1);
	}

	#[test]
	fn additive_clicks_skip_the_redraw() {
		let mut editor: Editor<RecordingSurface> =
			Editor::new(EditorConfig::default(), Box::new(|| 0.0));
		editor.add_view(View::new(
			RecordingSurface::default(),
			Projection::new(Axis::X, Axis::Y),
		));
		editor.palette_mut().add_node(0.5, 0.5, 0.5);

		editor.pointer_down(0, 150.0, 150.0, true);
		assert!(editor.view(0).unwrap().surface.ops.is_empty());

		editor.pointer_down(0, 30.0, 30.0, false);
		assert!(!editor.view(0).unwrap().surface.ops.is_empty());
	}
}
