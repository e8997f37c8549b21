use super::config::EditorConfig;
use super::geometry::cubic_bezier;
use super::palette::Palette;
use super::view::Projection;

/// Abstract raster canvas a view draws into. Coordinates are device pixels,
/// colors CSS color strings, matching the 2-D canvas contract the web host
/// implements.
pub trait Surface {
	fn clear(&mut self, color: &str, width: f64, height: f64);
	fn fill_rect(&mut self, color: &str, x: f64, y: f64, w: f64, h: f64);
	fn stroke_rect(&mut self, color: &str, line_width: f64, x: f64, y: f64, w: f64, h: f64);
	fn line(&mut self, color: &str, line_width: f64, from: (f64, f64), to: (f64, f64));
	fn bezier(
		&mut self,
		color: &str,
		line_width: f64,
		from: (f64, f64),
		c1: (f64, f64),
		c2: (f64, f64),
		to: (f64, f64),
	);
	fn circle(&mut self, fill: &str, stroke: &str, center: (f64, f64), radius: f64);
}

type Background<'a> = &'a dyn Fn(f64, f64, f64) -> String;

/// Draw one view of the palette: background grid, edges with their tangent
/// guides and sample markers, then every node back to front along the depth
/// axis so nearer nodes occlude farther ones.
pub fn render(
	surface: &mut impl Surface,
	projection: Projection,
	background: Background<'_>,
	palette: &Palette,
	config: &EditorConfig,
) {
	surface.clear(&config.background_color, config.canvas_size, config.canvas_size);
	draw_grid(surface, projection, background, config);
	draw_edges(surface, projection, background, palette, config);
	draw_nodes(surface, projection, background, palette, config);
}

fn draw_grid(
	surface: &mut impl Surface,
	projection: Projection,
	background: Background<'_>,
	config: &EditorConfig,
) {
	let cells = config.grid_cells.max(1);
	let step = config.canvas_size / cells as f64;
	for row in 0..cells {
		for col in 0..cells {
			let u = (col as f64 + 0.5) / cells as f64;
			let v = (row as f64 + 0.5) / cells as f64;
			let (x, y, z) = projection.unproject(u, v, 0.5);
			let color = background(x, y, z);
			// inset leaves a hairline of background between cells
			surface.fill_rect(
				&color,
				col as f64 * step + 0.5,
				row as f64 * step + 0.5,
				step - 1.0,
				step - 1.0,
			);
		}
	}
}

fn draw_edges(
	surface: &mut impl Surface,
	projection: Projection,
	background: Background<'_>,
	palette: &Palette,
	config: &EditorConfig,
) {
	let size = config.canvas_size;
	for edge in palette.edges() {
		let (Some(start), Some(end)) = (palette.node(edge.start), palette.node(edge.end)) else {
			continue;
		};
		let p0 = scale(projection.project(start), size);
		let p1 = scale(projection.project(&edge.control1), size);
		let p2 = scale(projection.project(&edge.control2), size);
		let p3 = scale(projection.project(end), size);

		surface.line(&config.guide_color, 1.0, p0, p1);
		surface.line(&config.guide_color, 1.0, p2, p3);

		let stroke = if start.active && end.active {
			&config.edge_active_color
		} else {
			&config.edge_color
		};
		surface.bezier(stroke, 1.5, p0, p1, p2, p3);

		let any_active =
			start.active || end.active || edge.control1.active || edge.control2.active;
		if !any_active {
			continue;
		}
		for step in 1..edge.subdivisions {
			let t = step as f64 / edge.subdivisions as f64;
			let sample = [
				cubic_bezier(t, start.x, edge.control1.x, edge.control2.x, end.x),
				cubic_bezier(t, start.y, edge.control1.y, edge.control2.y, end.y),
				cubic_bezier(t, start.z, edge.control1.z, edge.control2.z, end.z),
			];
			let color = background(sample[0], sample[1], sample[2]);
			let center = scale(projection.project_point(sample), size);
			surface.circle(&color, &config.guide_color, center, config.sample_marker_radius);
		}
	}
}

fn draw_nodes(
	surface: &mut impl Surface,
	projection: Projection,
	background: Background<'_>,
	palette: &Palette,
	config: &EditorConfig,
) {
	palette.map_nodes_by(projection.depth_axis, !projection.invert_depth, |node| {
		let near = projection.near(node);
		let factor =
			config.depth_scale_far + (config.depth_scale_near - config.depth_scale_far) * near;
		let (u, v) = projection.project(node);
		let (cx, cy) = (u * config.canvas_size, v * config.canvas_size);

		if node.control {
			let fill = if node.active {
				&config.control_point_active_color
			} else {
				&config.control_point_color
			};
			surface.circle(
				fill,
				&config.guide_color,
				(cx, cy),
				config.control_point_size / 2.0 * factor,
			);
		} else {
			let side = config.swatch_size * factor;
			let fill = background(node.x, node.y, node.z);
			surface.fill_rect(&fill, cx - side / 2.0, cy - side / 2.0, side, side);
			let (outline, width) = if node.active {
				(&config.swatch_active_outline_color, 2.0)
			} else {
				(&config.swatch_outline_color, 1.0)
			};
			surface.stroke_rect(outline, width, cx - side / 2.0, cy - side / 2.0, side, side);
		}
	});
}

fn scale(p: (f64, f64), size: f64) -> (f64, f64) {
	(p.0 * size, p.1 * size)
}
