use deskew::lowlevel::{expanded_size, rotate_expand, rotate_replicate};
use deskew::{ImageView, Interpolation, PixelFormat, Raster};

const FILTERS: [Interpolation; 3] = [
    Interpolation::Nearest,
    Interpolation::Bilinear,
    Interpolation::Bicubic,
];

#[test]
fn replicate_identity_and_180() {
    let width = 4;
    let height = 3;
    let data: Vec<u8> = (0u8..(width * height) as u8).map(|v| v * 20).collect();
    let view = ImageView::from_slice(&data, width, height).unwrap();

    for interp in FILTERS {
        let rotated = rotate_replicate(view, 0.0, interp);
        assert_eq!(rotated.data(), data.as_slice());

        let rotated_180 = rotate_replicate(view, 180.0, interp);
        let mut expected = vec![0u8; width * height];
        for y in 0..height {
            for x in 0..width {
                expected[y * width + x] = data[(height - 1 - y) * width + (width - 1 - x)];
            }
        }
        assert_eq!(rotated_180.data(), expected.as_slice(), "{interp:?}");
    }
}

#[test]
fn replicate_keeps_constant_images_constant() {
    let data = vec![7u8; 5 * 4];
    let view = ImageView::from_slice(&data, 5, 4).unwrap();

    for interp in FILTERS {
        let rotated = rotate_replicate(view, 33.0, interp);
        assert_eq!((rotated.width(), rotated.height()), (5, 4));
        assert!(rotated.data().iter().all(|&v| v == 7), "{interp:?}");
    }
}

#[test]
fn replicate_never_introduces_a_dark_border() {
    // White frame with a dark center: edge replication pulls white inward
    // instead of a constant fill color.
    let mut data = vec![255u8; 20 * 20];
    for y in 8..12 {
        for x in 8..12 {
            data[y * 20 + x] = 0;
        }
    }
    let view = ImageView::from_slice(&data, 20, 20).unwrap();
    let rotated = rotate_replicate(view, 45.0, Interpolation::Bicubic);
    for &(x, y) in &[(0usize, 0usize), (19, 0), (0, 19), (19, 19)] {
        assert_eq!(rotated.view().get(x, y).copied(), Some(255));
    }
}

#[test]
fn replicate_honors_stride() {
    let packed: Vec<u8> = (0u8..12).map(|v| v * 10).collect();
    let mut padded = Vec::new();
    for row in packed.chunks(4) {
        padded.extend_from_slice(row);
        padded.extend_from_slice(&[1, 2]);
    }
    let a = rotate_replicate(ImageView::from_slice(&packed, 4, 3).unwrap(), 12.0, Interpolation::Bilinear);
    let b = rotate_replicate(ImageView::new(&padded, 4, 3, 6).unwrap(), 12.0, Interpolation::Bilinear);
    assert_eq!(a, b);
}

#[test]
fn expand_grows_canvas_and_fills_white() {
    let src = Raster::filled(40, 20, PixelFormat::Gray, 0).unwrap();
    let out = rotate_expand(&src, 20.0, Interpolation::Nearest, 255).unwrap();
    assert_eq!((out.width(), out.height()), expanded_size(40, 20, 20.0));
    assert_eq!(out.pixel(0, 0).unwrap(), &[255]);
    assert_eq!(out.pixel(out.width() / 2, out.height() / 2).unwrap(), &[0]);

    // Every source pixel lands somewhere: the dark area is roughly preserved.
    let dark = out.data().iter().filter(|&&v| v == 0).count();
    assert!((dark as f32 - 800.0).abs() < 80.0, "dark pixels: {dark}");
}

#[test]
fn expand_quarter_turn_swaps_dimensions() {
    let data: Vec<u8> = (0u8..6).collect();
    let src = Raster::new(data, 3, 2, PixelFormat::Gray).unwrap();
    let out = rotate_expand(&src, 90.0, Interpolation::Nearest, 255).unwrap();
    assert_eq!((out.width(), out.height()), (2, 3));
    // Counter-clockwise: the top-right source pixel ends up top-left.
    assert_eq!(out.data(), &[2, 5, 1, 4, 0, 3]);
}

#[test]
fn expand_rotates_every_channel() {
    let src = Raster::new(vec![10, 20, 30, 40].repeat(16), 4, 4, PixelFormat::Rgba).unwrap();
    let out = rotate_expand(&src, 45.0, Interpolation::Bilinear, 255).unwrap();
    let (cx, cy) = (out.width() / 2, out.height() / 2);
    assert_eq!(out.pixel(cx, cy).unwrap(), &[10, 20, 30, 40]);
    assert_eq!(out.pixel(0, 0).unwrap(), &[255, 255, 255, 255]);
}
