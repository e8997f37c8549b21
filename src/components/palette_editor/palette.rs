use std::cmp::Ordering;
use std::collections::HashSet;

use super::model::{Axis, Edge, Node, NodeId};

/// Lowest allowed edge subdivision count.
pub const MIN_SUBDIVISIONS: u32 = 2;

/// The shared graph of color nodes and Bézier edges.
///
/// All operations are total: stale ids, empty selections and degenerate
/// pairs fall through as no-ops rather than errors. Removal always goes
/// through [`remove_node`] or [`disconnect`] so no edge can outlive an
/// endpoint.
///
/// [`remove_node`]: Palette::remove_node
/// [`disconnect`]: Palette::disconnect
#[derive(Debug, Default)]
pub struct Palette {
	nodes: Vec<Node>,
	edges: Vec<Edge>,
	next_id: u32,
}

impl Palette {
	pub fn new() -> Self {
		Self::default()
	}

	fn alloc_id(&mut self) -> NodeId {
		let id = NodeId(self.next_id);
		self.next_id += 1;
		id
	}

	/// Append a color node and return its handle.
	pub fn add_node(&mut self, x: f64, y: f64, z: f64) -> NodeId {
		let id = self.alloc_id();
		self.nodes.push(Node::new(id, x, y, z, false));
		id
	}

	/// Look up any node, edge control points included.
	pub fn node(&self, id: NodeId) -> Option<&Node> {
		self.nodes.iter().find(|n| n.id == id).or_else(|| {
			self.edges
				.iter()
				.find_map(|e| [&e.control1, &e.control2].into_iter().find(|n| n.id == id))
		})
	}

	pub fn node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
		if let Some(i) = self.nodes.iter().position(|n| n.id == id) {
			return self.nodes.get_mut(i);
		}
		self.edges.iter_mut().find_map(|e| {
			[&mut e.control1, &mut e.control2]
				.into_iter()
				.find(|n| n.id == id)
		})
	}

	pub fn edges(&self) -> &[Edge] {
		&self.edges
	}

	/// True when the ids name the same node or an edge links them in either
	/// direction.
	pub fn connected(&self, a: NodeId, b: NodeId) -> bool {
		a == b
			|| self
				.edges
				.iter()
				.any(|e| (e.start == a && e.end == b) || (e.start == b && e.end == a))
	}

	/// Create an edge between two distinct color nodes, with control points
	/// seeded a third of the way in from each endpoint. No-op when the pair
	/// is already connected, when either id is stale, or when either node is
	/// a control point.
	pub fn connect(&mut self, a: NodeId, b: NodeId) {
		if self.connected(a, b) {
			return;
		}
		let (Some(na), Some(nb)) = (self.node(a), self.node(b)) else {
			return;
		};
		if na.control || nb.control {
			return;
		}
		let (ax, ay, az) = (na.x, na.y, na.z);
		let (bx, by, bz) = (nb.x, nb.y, nb.z);
		let lerp = |s: f64, e: f64, t: f64| s + (e - s) * t;
		let c1 = self.alloc_id();
		let c2 = self.alloc_id();
		self.edges.push(Edge {
			start: a,
			end: b,
			control1: Node::new(
				c1,
				lerp(ax, bx, 1.0 / 3.0),
				lerp(ay, by, 1.0 / 3.0),
				lerp(az, bz, 1.0 / 3.0),
				true,
			),
			control2: Node::new(
				c2,
				lerp(ax, bx, 2.0 / 3.0),
				lerp(ay, by, 2.0 / 3.0),
				lerp(az, bz, 2.0 / 3.0),
				true,
			),
			subdivisions: MIN_SUBDIVISIONS,
		});
	}

	/// Remove every edge with both endpoints in `set`. An edge with one
	/// endpoint outside the set survives.
	pub fn disconnect(&mut self, set: &[NodeId]) {
		self.edges
			.retain(|e| !(set.contains(&e.start) && set.contains(&e.end)));
	}

	/// Remove a node and every edge touching it.
	pub fn remove_node(&mut self, id: NodeId) {
		self.edges.retain(|e| e.start != id && e.end != id);
		self.nodes.retain(|n| n.id != id);
	}

	/// Ids of all selected nodes: color nodes in insertion order, then each
	/// edge's control pair in edge insertion order.
	pub fn active_nodes(&self) -> Vec<NodeId> {
		let mut out = Vec::new();
		self.map_nodes(|n| {
			if n.active {
				out.push(n.id);
			}
		});
		out
	}

	/// Total selectable entities: color nodes plus two control points per
	/// edge.
	pub fn node_count(&self) -> usize {
		self.nodes.len() + 2 * self.edges.len()
	}

	/// Visit every node, control points included, in insertion order.
	pub fn map_nodes(&self, mut f: impl FnMut(&Node)) {
		for n in &self.nodes {
			f(n);
		}
		for e in &self.edges {
			f(&e.control1);
			f(&e.control2);
		}
	}

	pub fn map_nodes_mut(&mut self, mut f: impl FnMut(&mut Node)) {
		for n in &mut self.nodes {
			f(n);
		}
		for e in &mut self.edges {
			f(&mut e.control1);
			f(&mut e.control2);
		}
	}

	pub fn map_edges(&self, mut f: impl FnMut(&Edge)) {
		for e in &self.edges {
			f(e);
		}
	}

	pub fn map_edges_mut(&mut self, mut f: impl FnMut(&mut Edge)) {
		for e in &mut self.edges {
			f(e);
		}
	}

	/// Visit every node sorted by one axis. The sort is stable, so insertion
	/// order breaks ties; used for depth-ordered rendering and hit testing.
	pub fn map_nodes_by(&self, axis: Axis, ascending: bool, mut f: impl FnMut(&Node)) {
		let mut all: Vec<&Node> = Vec::with_capacity(self.node_count());
		for n in &self.nodes {
			all.push(n);
		}
		for e in &self.edges {
			all.push(&e.control1);
			all.push(&e.control2);
		}
		all.sort_by(|a, b| {
			let ord = a
				.get(axis)
				.partial_cmp(&b.get(axis))
				.unwrap_or(Ordering::Equal);
			if ascending { ord } else { ord.reverse() }
		});
		for n in all {
			f(n);
		}
	}

	/// Set every node's selection flag.
	pub fn set_all_active(&mut self, active: bool) {
		self.map_nodes_mut(|n| n.active = active);
	}

	/// Translate the selection on two axes. A control point that is not
	/// itself selected follows its edge endpoint when that endpoint moved.
	pub fn translate_active(&mut self, x_axis: Axis, y_axis: Axis, dx: f64, dy: f64) {
		let moved: HashSet<NodeId> = self.active_nodes().into_iter().collect();
		self.map_nodes_mut(|n| {
			if n.active {
				n.offset(x_axis, dx);
				n.offset(y_axis, dy);
			}
		});
		self.map_edges_mut(|e| {
			if moved.contains(&e.start) && !e.control1.active {
				e.control1.offset(x_axis, dx);
				e.control1.offset(y_axis, dy);
			}
			if moved.contains(&e.end) && !e.control2.active {
				e.control2.offset(x_axis, dx);
				e.control2.offset(y_axis, dy);
			}
		});
	}

	/// Translate every node, selection ignored. Arrow-key nudges pan the
	/// whole palette along the view's two axes.
	pub fn translate_all(&mut self, x_axis: Axis, y_axis: Axis, dx: f64, dy: f64) {
		self.map_nodes_mut(|n| {
			n.offset(x_axis, dx);
			n.offset(y_axis, dy);
		});
	}
}
