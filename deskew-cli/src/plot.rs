//! Energy-versus-angle plot for a finished sweep.

use deskew::SkewEstimate;
use image::{Rgb, RgbImage};
use imageproc::drawing::draw_line_segment_mut;
use std::path::Path;

const WIDTH: u32 = 640;
const HEIGHT: u32 = 360;
const MARGIN: f32 = 24.0;

const BACKGROUND: Rgb<u8> = Rgb([255, 255, 255]);
const AXIS: Rgb<u8> = Rgb([160, 160, 160]);
const CURVE: Rgb<u8> = Rgb([20, 60, 160]);
const BEST: Rgb<u8> = Rgb([200, 30, 30]);

/// Draws the score table as a polyline and marks the chosen angle.
pub fn render_energy_plot<P: AsRef<Path>>(
    estimate: &SkewEstimate,
    path: P,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut img = RgbImage::from_pixel(WIDTH, HEIGHT, BACKGROUND);
    let left = MARGIN;
    let right = WIDTH as f32 - MARGIN;
    let top = MARGIN;
    let bottom = HEIGHT as f32 - MARGIN;

    draw_line_segment_mut(&mut img, (left, bottom), (right, bottom), AXIS);
    draw_line_segment_mut(&mut img, (left, top), (left, bottom), AXIS);

    let table = &estimate.table;
    let (Some(first), Some(last)) = (table.as_slice().first(), table.as_slice().last()) else {
        img.save(path)?;
        return Ok(());
    };
    let (lo, hi) = table.score_bounds().unwrap_or((0.0, 0.0));
    let angle_span = (last.angle_deg - first.angle_deg).max(f32::EPSILON);
    let score_span = (hi - lo).max(f64::EPSILON);

    let to_x = |angle: f32| left + (angle - first.angle_deg) / angle_span * (right - left);
    let to_y = |score: f64| bottom - ((score - lo) / score_span) as f32 * (bottom - top);

    let points: Vec<(f32, f32)> = table.iter().map(|c| (to_x(c.angle_deg), to_y(c.score))).collect();
    for pair in points.windows(2) {
        draw_line_segment_mut(&mut img, pair[0], pair[1], CURVE);
    }

    let best_x = to_x(estimate.angle_deg);
    draw_line_segment_mut(&mut img, (best_x, top), (best_x, bottom), BEST);

    img.save(path)?;
    tracing::info!(points = points.len(), "wrote energy plot");
    Ok(())
}
