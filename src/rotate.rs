//! Rotations used by the skew sweep and by the final correction.
//!
//! Both rotations work on the inverse mapping: each destination pixel center
//! is rotated back into the source and sampled there. Positive angles rotate
//! content counter-clockwise as displayed (y axis pointing down).
//!
//! * [`rotate_replicate`] keeps the input size, rotates about
//!   `cx = (w - 1) / 2`, `cy = (h - 1) / 2` and replicates edge pixels for
//!   samples that fall outside the frame. The sweep uses it so that every
//!   candidate is scored on the same number of rows.
//! * [`rotate_expand`] grows the canvas to the bounding box of the rotated
//!   frame and fills uncovered pixels with a constant.

use crate::image::{ImageView, OwnedImage, Raster};
use crate::util::math::sin_cos_deg;
use crate::util::DeskewResult;

/// Cubic convolution coefficient (same as the common bicubic resamplers).
const CUBIC_A: f32 = -0.75;

/// Snap tolerance when sizing the expanded canvas.
const EXPAND_EPS: f64 = 1e-6;

/// Resampling filter for rotations.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Interpolation {
    /// Nearest source pixel.
    Nearest,
    /// 2x2 bilinear.
    Bilinear,
    /// 4x4 cubic convolution.
    #[default]
    Bicubic,
}

#[inline]
fn cubic_weights(t: f32) -> [f32; 4] {
    let a = CUBIC_A;
    let w0 = ((a * (t + 1.0) - 5.0 * a) * (t + 1.0) + 8.0 * a) * (t + 1.0) - 4.0 * a;
    let w1 = ((a + 2.0) * t - (a + 3.0)) * t * t + 1.0;
    let u = 1.0 - t;
    let w2 = ((a + 2.0) * u - (a + 3.0)) * u * u + 1.0;
    [w0, w1, w2, 1.0 - w0 - w1 - w2]
}

/// Samples `fetch` at the continuous pixel-index position `(sx, sy)`.
///
/// Pixel centers sit on integer coordinates. `fetch` decides what happens
/// outside the frame.
#[inline]
fn sample<F>(fetch: F, sx: f32, sy: f32, interp: Interpolation) -> f32
where
    F: Fn(isize, isize) -> f32,
{
    match interp {
        Interpolation::Nearest => {
            fetch((sx + 0.5).floor() as isize, (sy + 0.5).floor() as isize)
        }
        Interpolation::Bilinear => {
            let x0 = sx.floor();
            let y0 = sy.floor();
            let fx = sx - x0;
            let fy = sy - y0;
            let (x0, y0) = (x0 as isize, y0 as isize);
            let a = fetch(x0, y0);
            let b = fetch(x0 + 1, y0);
            let c = fetch(x0, y0 + 1);
            let d = fetch(x0 + 1, y0 + 1);
            a * (1.0 - fx) * (1.0 - fy) + b * fx * (1.0 - fy) + c * (1.0 - fx) * fy + d * fx * fy
        }
        Interpolation::Bicubic => {
            let x0 = sx.floor();
            let y0 = sy.floor();
            let wx = cubic_weights(sx - x0);
            let wy = cubic_weights(sy - y0);
            let (x0, y0) = (x0 as isize, y0 as isize);
            let mut acc = 0.0f32;
            for (j, wyj) in wy.iter().enumerate() {
                let yy = y0 + j as isize - 1;
                let mut row = 0.0f32;
                for (i, wxi) in wx.iter().enumerate() {
                    row += wxi * fetch(x0 + i as isize - 1, yy);
                }
                acc += wyj * row;
            }
            acc
        }
    }
}

#[inline]
fn to_u8(value: f32) -> u8 {
    if value.is_finite() {
        value.round().clamp(0.0, 255.0) as u8
    } else {
        0
    }
}

/// Rotates a grayscale image about its center, keeping its size.
///
/// Samples outside the source take the value of the nearest edge pixel.
/// A zero angle reproduces the input exactly for every interpolation mode.
pub fn rotate_replicate(src: ImageView<'_, u8>, angle_deg: f32, interp: Interpolation) -> OwnedImage {
    let width = src.width();
    let height = src.height();
    let mut out = vec![0u8; width * height];

    let (sin_a, cos_a) = sin_cos_deg(angle_deg);
    let cx = (width as f32 - 1.0) * 0.5;
    let cy = (height as f32 - 1.0) * 0.5;
    let max_x = width as isize - 1;
    let max_y = height as isize - 1;
    let data = src.as_slice();
    let stride = src.stride();
    let fetch = |x: isize, y: isize| {
        let x = x.clamp(0, max_x) as usize;
        let y = y.clamp(0, max_y) as usize;
        f32::from(data[y * stride + x])
    };

    for (y, out_row) in out.chunks_exact_mut(width).enumerate() {
        let dy = y as f32 - cy;
        for (x, px) in out_row.iter_mut().enumerate() {
            let dx = x as f32 - cx;
            let src_x = cos_a * dx - sin_a * dy + cx;
            let src_y = sin_a * dx + cos_a * dy + cy;
            *px = to_u8(sample(fetch, src_x, src_y, interp));
        }
    }

    OwnedImage::from_parts(out, width, height)
}

/// Size of the canvas that contains a `width x height` frame rotated by
/// `angle_deg`.
///
/// The four frame corners are rotated about the frame center and the result
/// is `ceil(max) - floor(min)` on each axis; coordinates within a tiny
/// tolerance of an integer are snapped first. Multiples of 90 degrees keep or
/// swap the dimensions exactly.
pub fn expanded_size(width: usize, height: usize, angle_deg: f32) -> (usize, usize) {
    if let Some(turns) = quarter_turns(angle_deg) {
        return if turns % 2 == 0 {
            (width, height)
        } else {
            (height, width)
        };
    }
    let rad = f64::from(angle_deg).to_radians();
    let (sin_a, cos_a) = rad.sin_cos();
    let cx = width as f64 * 0.5;
    let cy = height as f64 * 0.5;
    let snap = |v: f64| {
        let r = v.round();
        if (v - r).abs() < EXPAND_EPS {
            r
        } else {
            v
        }
    };

    let mut min_x = f64::INFINITY;
    let mut max_x = f64::NEG_INFINITY;
    let mut min_y = f64::INFINITY;
    let mut max_y = f64::NEG_INFINITY;
    for (x, y) in [(0.0, 0.0), (width as f64, 0.0), (width as f64, height as f64), (0.0, height as f64)] {
        let dx = x - cx;
        let dy = y - cy;
        let rx = snap(cos_a * dx + sin_a * dy + cx);
        let ry = snap(-sin_a * dx + cos_a * dy + cy);
        min_x = min_x.min(rx);
        max_x = max_x.max(rx);
        min_y = min_y.min(ry);
        max_y = max_y.max(ry);
    }

    let new_w = (max_x.ceil() - min_x.floor()).max(1.0) as usize;
    let new_h = (max_y.ceil() - min_y.floor()).max(1.0) as usize;
    (new_w, new_h)
}

/// Number of counter-clockwise quarter turns (0 to 3) when `angle_deg` is an
/// exact multiple of 90.
fn quarter_turns(angle_deg: f32) -> Option<usize> {
    if !angle_deg.is_finite() || angle_deg.rem_euclid(90.0) != 0.0 {
        return None;
    }
    Some(((angle_deg / 90.0) as i64).rem_euclid(4) as usize)
}

/// Quarter-turn rotation by index permutation.
fn rotate_quarter(src: &Raster, turns: usize, fill: u8) -> DeskewResult<Raster> {
    let (width, height) = (src.width(), src.height());
    let (new_w, new_h) = expanded_size(width, height, turns as f32 * 90.0);
    let mut out = Raster::filled(new_w, new_h, src.format(), fill)?;
    for y in 0..new_h {
        for x in 0..new_w {
            let (sx, sy) = match turns {
                0 => (x, y),
                1 => (width - 1 - y, x),
                2 => (width - 1 - x, height - 1 - y),
                _ => (y, height - 1 - x),
            };
            if let (Some(dst), Some(px)) = (out.pixel_mut(x, y), src.pixel(sx, sy)) {
                dst.copy_from_slice(px);
            }
        }
    }
    Ok(out)
}

/// Rotates a raster about its center onto an expanded canvas.
///
/// The output is large enough to hold the whole rotated frame; pixels not
/// covered by the source take `fill` in every channel. Every channel,
/// including alpha, is resampled independently. Multiples of 90 degrees are
/// exact pixel permutations and ignore `interp`.
pub fn rotate_expand(
    src: &Raster,
    angle_deg: f32,
    interp: Interpolation,
    fill: u8,
) -> DeskewResult<Raster> {
    if let Some(turns) = quarter_turns(angle_deg) {
        return rotate_quarter(src, turns, fill);
    }
    let width = src.width();
    let height = src.height();
    let format = src.format();
    let channels = format.channels();
    let (new_w, new_h) = expanded_size(width, height, angle_deg);
    let mut out = Raster::filled(new_w, new_h, format, fill)?;

    let (sin_a, cos_a) = sin_cos_deg(angle_deg);
    let src_cx = width as f32 * 0.5;
    let src_cy = height as f32 * 0.5;
    let dst_cx = new_w as f32 * 0.5;
    let dst_cy = new_h as f32 * 0.5;
    let data = src.data();
    let fill_f = f32::from(fill);
    let (w, h) = (width as isize, height as isize);

    for y in 0..new_h {
        let dy = y as f32 + 0.5 - dst_cy;
        for x in 0..new_w {
            let dx = x as f32 + 0.5 - dst_cx;
            // Edge coordinates back to pixel-index coordinates.
            let src_x = cos_a * dx - sin_a * dy + src_cx - 0.5;
            let src_y = sin_a * dx + cos_a * dy + src_cy - 0.5;
            if src_x < -1.5 || src_y < -1.5 || src_x > width as f32 + 0.5 || src_y > height as f32 + 0.5 {
                continue;
            }
            let Some(px) = out.pixel_mut(x, y) else {
                continue;
            };
            for (c, value) in px.iter_mut().enumerate() {
                let fetch = |xi: isize, yi: isize| {
                    if xi < 0 || yi < 0 || xi >= w || yi >= h {
                        fill_f
                    } else {
                        f32::from(data[(yi as usize * width + xi as usize) * channels + c])
                    }
                };
                *value = to_u8(sample(fetch, src_x, src_y, interp));
            }
        }
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::image::PixelFormat;

    fn ramp(width: usize, height: usize) -> OwnedImage {
        let data = (0..width * height).map(|i| (i * 7 % 251) as u8).collect();
        OwnedImage::new(data, width, height).unwrap()
    }

    #[test]
    fn cubic_weights_sum_to_one() {
        for t in [0.0f32, 0.25, 0.5, 0.9] {
            let w = cubic_weights(t);
            assert!((w.iter().sum::<f32>() - 1.0).abs() < 1e-6);
        }
        assert_eq!(cubic_weights(0.0), [0.0, 1.0, 0.0, 0.0]);
    }

    #[test]
    fn zero_angle_is_identity_for_all_filters() {
        let img = ramp(9, 6);
        for interp in [Interpolation::Nearest, Interpolation::Bilinear, Interpolation::Bicubic] {
            let rotated = rotate_replicate(img.view(), 0.0, interp);
            assert_eq!(rotated.data(), img.data());
        }
    }

    #[test]
    fn quarter_turn_moves_right_edge_to_top() {
        // Bright right column; a counter-clockwise quarter turn puts it on top.
        let mut data = vec![0u8; 25];
        for y in 0..5 {
            data[y * 5 + 4] = 200;
        }
        let img = OwnedImage::new(data, 5, 5).unwrap();
        let rotated = rotate_replicate(img.view(), 90.0, Interpolation::Nearest);
        assert_eq!(rotated.view().row(0).unwrap(), &[200u8; 5]);
        assert!(rotated.view().row(4).unwrap().iter().all(|&v| v == 0));
    }

    #[test]
    fn expanded_size_matches_bounding_box() {
        assert_eq!(expanded_size(100, 50, 0.0), (100, 50));
        assert_eq!(expanded_size(100, 50, 90.0), (50, 100));
        assert_eq!(expanded_size(5, 3, 180.0), (5, 3));
        assert_eq!(expanded_size(100, 100, 7.0), (112, 112));
    }

    #[test]
    fn quarter_turns_swap_dimensions_for_mixed_parity() {
        assert_eq!(expanded_size(101, 100, 90.0), (100, 101));
        assert_eq!(expanded_size(5, 4, 90.0), (4, 5));
        assert_eq!(expanded_size(5, 4, -90.0), (4, 5));
        assert_eq!(expanded_size(5, 4, 270.0), (4, 5));
        assert_eq!(expanded_size(5, 4, 180.0), (5, 4));
    }

    #[test]
    fn quarter_turns_permute_pixels_exactly() {
        let data: Vec<u8> = (0u8..20).collect();
        let src = Raster::new(data, 5, 4, PixelFormat::Gray).unwrap();
        let cw = rotate_expand(&src, -90.0, Interpolation::Bicubic, 255).unwrap();
        let also_cw = rotate_expand(&src, 270.0, Interpolation::Nearest, 255).unwrap();
        assert_eq!(cw, also_cw);
        assert_eq!((cw.width(), cw.height()), (4, 5));
        // Clockwise: the bottom-left source pixel ends up top-left.
        assert_eq!(cw.pixel(0, 0).unwrap(), &[15]);
        assert_eq!(cw.pixel(3, 0).unwrap(), &[0]);

        let half = rotate_expand(&src, 180.0, Interpolation::Bilinear, 255).unwrap();
        let reversed: Vec<u8> = (0u8..20).rev().collect();
        assert_eq!(half.data(), &reversed[..]);
    }

    #[test]
    fn expand_fills_corners_with_white() {
        let src = Raster::filled(20, 10, PixelFormat::Rgb, 0).unwrap();
        let out = rotate_expand(&src, 30.0, Interpolation::Nearest, 255).unwrap();
        assert!(out.width() > 20 && out.height() > 10);
        assert_eq!(out.pixel(0, 0).unwrap(), &[255, 255, 255]);
        let (cx, cy) = (out.width() / 2, out.height() / 2);
        assert_eq!(out.pixel(cx, cy).unwrap(), &[0, 0, 0]);
    }
}
