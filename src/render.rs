use ab_glyph::PxScale;
use image::{Rgba, RgbaImage};
use imageproc::drawing::{draw_filled_circle_mut, draw_text_mut, text_size, Blend};
use tracing::debug;

use crate::collect::VizPoint;
use crate::config::PlotConfig;
use crate::error::VizError;
use crate::fonts::LabelFont;

/// Label palette, cycled once per query-word group.
pub const PALETTE: [Rgba<u8>; 8] = [
    Rgba([249, 115, 6, 255]),   // orange
    Rgba([255, 129, 192, 255]), // pink
    Rgba([3, 67, 223, 255]),    // blue
    Rgba([101, 55, 0, 255]),    // brown
    Rgba([229, 0, 0, 255]),     // red
    Rgba([146, 149, 145, 255]), // grey
    Rgba([255, 255, 20, 255]),  // yellow
    Rgba([21, 176, 26, 255]),   // green
];

const BACKGROUND: Rgba<u8> = Rgba([255, 255, 255, 255]);
const MARKER: Rgba<u8> = Rgba([0, 0, 0, 255]);
const TITLE_COLOR: Rgba<u8> = Rgba([0, 0, 0, 255]);

/// Label color for a query-word group; wraps around when there are more
/// query words than palette entries.
pub fn group_color(group: usize) -> Rgba<u8> {
    PALETTE[group % PALETTE.len()]
}

/// Render the scatter figure in memory. Points are drawn in input order:
/// markers are neutral black, fully opaque for query words and translucent
/// for neighbours (the primary visual cue), labels carry the group color
/// (the secondary cue). Zero points produce an empty titled plot.
///
/// No file I/O happens here; pass the result to [`save_figure`].
pub fn render(points: &[VizPoint], title: &str, font: &LabelFont, config: &PlotConfig) -> RgbaImage {
    let img = RgbaImage::from_pixel(config.width, config.height, BACKGROUND);
    let mut canvas = Blend(img);

    let (min_x, max_x) = axis_range(points.iter().map(|p| p.position.0));
    let (min_y, max_y) = axis_range(points.iter().map(|p| p.position.1));

    let margin = config.margin as f64;
    let plot_width = config.width as f64 - 2.0 * margin;
    let plot_height = config.height as f64 - 2.0 * margin;

    let label_scale = PxScale::from(config.label_scale);
    for (k, point) in points.iter().enumerate() {
        let (x, y) = point.position;
        let px = margin + (x - min_x) / (max_x - min_x) * plot_width;
        // image rows grow downward; flip the y axis
        let py = config.height as f64 - margin - (y - min_y) / (max_y - min_y) * plot_height;
        debug!(index = k, word = %point.word, is_query = point.is_query, x, y, "placing point");

        let alpha = if point.is_query {
            1.0
        } else {
            config.neighbour_alpha
        };
        draw_filled_circle_mut(
            &mut canvas,
            (px as i32, py as i32),
            config.marker_radius,
            with_alpha(MARKER, alpha),
        );

        // label sits just above its marker
        let (_, text_height) = text_size(label_scale, font.as_font(), &point.word);
        let label_y = py as i32 - text_height as i32 - config.marker_radius - 2;
        draw_text_mut(
            &mut canvas,
            group_color(point.group),
            px as i32,
            label_y,
            label_scale,
            font.as_font(),
            &point.word,
        );
    }

    draw_title(&mut canvas, title, font, config);
    canvas.0
}

/// Write a rendered figure to `path` as PNG, overwriting any existing
/// file, and return the path unchanged. Parent directories are never
/// created here; a missing one fails the write.
pub fn save_figure(figure: &RgbaImage, path: &str) -> Result<String, VizError> {
    figure.save(path).map_err(|source| VizError::Write {
        path: path.to_string(),
        source,
    })?;
    Ok(path.to_string())
}

fn draw_title(canvas: &mut Blend<RgbaImage>, title: &str, font: &LabelFont, config: &PlotConfig) {
    if title.is_empty() {
        return;
    }
    let scale = PxScale::from(config.title_scale);
    let (text_width, _) = text_size(scale, font.as_font(), title);
    let x = (config.width as i32 - text_width as i32) / 2;
    let y = (config.margin / 4) as i32;
    draw_text_mut(canvas, TITLE_COLOR, x.max(0), y, scale, font.as_font(), title);
}

/// Min/max of one axis, widened when degenerate so a single point (or a
/// single column of points) still lands inside the plot area.
fn axis_range(values: impl Iterator<Item = f64>) -> (f64, f64) {
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for value in values {
        min = min.min(value);
        max = max.max(value);
    }
    if !min.is_finite() || !max.is_finite() {
        return (0.0, 1.0);
    }
    if (max - min).abs() < f64::EPSILON {
        return (min - 0.5, max + 0.5);
    }
    (min, max)
}

fn with_alpha(color: Rgba<u8>, alpha: f32) -> Rgba<u8> {
    let Rgba([r, g, b, _]) = color;
    Rgba([r, g, b, (alpha.clamp(0.0, 1.0) * 255.0).round() as u8])
}
