/// Figure geometry and style for the scatter renderer.
#[derive(Debug, Clone)]
pub struct PlotConfig {
    pub width: u32,
    pub height: u32,
    /// Blank border, in pixels, kept around the scatter area.
    pub margin: u32,
    pub marker_radius: i32,
    /// Opacity of neighbour markers; query markers are fully opaque.
    pub neighbour_alpha: f32,
    pub label_scale: f32,
    pub title_scale: f32,
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            // 10x8 inches at 160 dpi
            width: 1600,
            height: 1280,
            margin: 80,
            marker_radius: 5,
            neighbour_alpha: 0.2,
            label_scale: 28.0,
            title_scale: 36.0,
        }
    }
}
