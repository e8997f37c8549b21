/// Layout and color tuning shared by rendering and hit testing. Built once
/// and passed by reference; nothing in here changes after startup.
#[derive(Clone, Debug)]
pub struct EditorConfig {
	/// Side length of each view's canvas in device pixels.
	pub canvas_size: f64,
	/// On-screen side length of a color node's swatch box.
	pub swatch_size: f64,
	/// On-screen diameter of an edge control point.
	pub control_point_size: f64,
	/// Radius of the interior curve sample markers.
	pub sample_marker_radius: f64,
	/// Cells per side of the background color grid.
	pub grid_cells: u32,
	/// Two pointer-downs closer together than this create a node.
	pub double_click_ms: f64,
	/// Normalized distance moved per arrow-key press.
	pub nudge_step: f64,
	/// Node size factor at the far end of the depth axis.
	pub depth_scale_far: f64,
	/// Node size factor at the near end of the depth axis.
	pub depth_scale_near: f64,
	pub background_color: String,
	pub edge_color: String,
	pub edge_active_color: String,
	pub guide_color: String,
	pub control_point_color: String,
	pub control_point_active_color: String,
	pub swatch_outline_color: String,
	pub swatch_active_outline_color: String,
}

impl Default for EditorConfig {
	fn default() -> Self {
		Self {
			canvas_size: 300.0,
			swatch_size: 14.0,
			control_point_size: 10.0,
			sample_marker_radius: 3.0,
			grid_cells: 10,
			double_click_ms: 400.0,
			nudge_step: 0.05,
			depth_scale_far: 0.65,
			depth_scale_near: 1.35,
			background_color: "rgb(40, 40, 50)".into(),
			edge_color: "rgba(170, 180, 200, 0.8)".into(),
			edge_active_color: "rgb(128, 192, 255)".into(),
			guide_color: "rgba(170, 180, 200, 0.25)".into(),
			control_point_color: "rgb(0, 128, 255)".into(),
			control_point_active_color: "rgb(128, 192, 255)".into(),
			swatch_outline_color: "rgba(255, 255, 255, 0.4)".into(),
			swatch_active_outline_color: "rgb(255, 255, 255)".into(),
		}
	}
}
