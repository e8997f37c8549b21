//! Test doubles for the drawing surface contract.

use super::render::Surface;

/// Draw calls captured by [`RecordingSurface`], reduced to the fields the
/// tests assert on.
#[derive(Clone, Debug, PartialEq)]
pub enum Op {
	Clear { color: String },
	FillRect { color: String, x: f64, y: f64, w: f64, h: f64 },
	StrokeRect { color: String, w: f64, h: f64 },
	Line { color: String },
	Bezier { color: String },
	Circle { fill: String, center: (f64, f64), radius: f64 },
}

/// Records draw calls in order for render assertions.
#[derive(Default)]
pub struct RecordingSurface {
	pub ops: Vec<Op>,
}

impl Surface for RecordingSurface {
	fn clear(&mut self, color: &str, _width: f64, _height: f64) {
		self.ops.push(Op::Clear { color: color.into() });
	}

	fn fill_rect(&mut self, color: &str, x: f64, y: f64, w: f64, h: f64) {
		self.ops.push(Op::FillRect {
			color: color.into(),
			x,
			y,
			w,
			h,
		});
	}

	fn stroke_rect(&mut self, color: &str, _line_width: f64, _x: f64, _y: f64, w: f64, h: f64) {
		self.ops.push(Op::StrokeRect {
			color: color.into(),
			w,
			h,
		});
	}

	fn line(&mut self, color: &str, _line_width: f64, _from: (f64, f64), _to: (f64, f64)) {
		self.ops.push(Op::Line { color: color.into() });
	}

	fn bezier(
		&mut self,
		color: &str,
		_line_width: f64,
		_from: (f64, f64),
		_c1: (f64, f64),
		_c2: (f64, f64),
		_to: (f64, f64),
	) {
		self.ops.push(Op::Bezier { color: color.into() });
	}

	fn circle(&mut self, fill: &str, _stroke: &str, center: (f64, f64), radius: f64) {
		self.ops.push(Op::Circle {
			fill: fill.into(),
			center,
			radius,
		});
	}
}

/// Discards every draw call; for tests that only exercise state.
#[derive(Default)]
pub struct NullSurface;

impl Surface for NullSurface {
	fn clear(&mut self, _color: &str, _width: f64, _height: f64) {}

	fn fill_rect(&mut self, _color: &str, _x: f64, _y: f64, _w: f64, _h: f64) {}

	fn stroke_rect(&mut self, _color: &str, _line_width: f64, _x: f64, _y: f64, _w: f64, _h: f64) {}

	fn line(&mut self, _color: &str, _line_width: f64, _from: (f64, f64), _to: (f64, f64)) {}

	fn bezier(
		&mut self,
		_color: &str,
		_line_width: f64,
		_from: (f64, f64),
		_c1: (f64, f64),
		_c2: (f64, f64),
		_to: (f64, f64),
	) {}

	fn circle(&mut self, _fill: &str, _stroke: &str, _center: (f64, f64), _radius: f64) {}
}
