//! Convenience helpers for loading and saving rasters via the `image` crate.
//!
//! Available when the `image-io` feature is enabled.

use crate::image::{ImageView, OwnedImage, PixelFormat, Raster};
use crate::util::{DeskewError, DeskewResult};
use image::{DynamicImage, GrayAlphaImage, GrayImage, RgbImage, RgbaImage};
use std::path::Path;

fn io_err(err: image::ImageError) -> DeskewError {
    DeskewError::ImageIo {
        reason: err.to_string(),
    }
}

/// Creates a borrowed view from a grayscale image buffer.
pub fn view_from_gray_image(img: &GrayImage) -> DeskewResult<ImageView<'_, u8>> {
    let width = img.width() as usize;
    let height = img.height() as usize;
    ImageView::from_slice(img.as_raw(), width, height)
}

/// Creates an owned grayscale image from a grayscale image buffer.
pub fn owned_from_gray_image(img: &GrayImage) -> DeskewResult<OwnedImage> {
    let width = img.width() as usize;
    let height = img.height() as usize;
    OwnedImage::new(img.as_raw().clone(), width, height)
}

/// Converts a dynamic image into an 8-bit raster, keeping its channel layout.
///
/// Higher bit depths are narrowed to 8 bits per channel.
pub fn raster_from_dynamic_image(img: DynamicImage) -> DeskewResult<Raster> {
    let width = img.width() as usize;
    let height = img.height() as usize;
    let (data, format) = match img {
        DynamicImage::ImageLuma8(buf) => (buf.into_raw(), PixelFormat::Gray),
        DynamicImage::ImageLumaA8(buf) => (buf.into_raw(), PixelFormat::GrayAlpha),
        DynamicImage::ImageRgb8(buf) => (buf.into_raw(), PixelFormat::Rgb),
        DynamicImage::ImageRgba8(buf) => (buf.into_raw(), PixelFormat::Rgba),
        DynamicImage::ImageLuma16(_) => (img.to_luma8().into_raw(), PixelFormat::Gray),
        DynamicImage::ImageLumaA16(_) => (img.to_luma_alpha8().into_raw(), PixelFormat::GrayAlpha),
        DynamicImage::ImageRgb16(_) | DynamicImage::ImageRgb32F(_) => {
            (img.to_rgb8().into_raw(), PixelFormat::Rgb)
        }
        _ => (img.to_rgba8().into_raw(), PixelFormat::Rgba),
    };
    Raster::new(data, width, height, format)
}

/// Converts a raster back into a dynamic image.
pub fn dynamic_image_from_raster(raster: Raster) -> DeskewResult<DynamicImage> {
    let width = u32::try_from(raster.width()).map_err(|_| DeskewError::InvalidDimensions {
        width: raster.width(),
        height: raster.height(),
    })?;
    let height = u32::try_from(raster.height()).map_err(|_| DeskewError::InvalidDimensions {
        width: raster.width(),
        height: raster.height(),
    })?;
    let format = raster.format();
    let data = raster.into_vec();
    let mismatch = DeskewError::InvalidInput {
        reason: "raster buffer does not fit the image dimensions",
    };
    let img = match format {
        PixelFormat::Gray => GrayImage::from_raw(width, height, data).map(DynamicImage::ImageLuma8),
        PixelFormat::GrayAlpha => {
            GrayAlphaImage::from_raw(width, height, data).map(DynamicImage::ImageLumaA8)
        }
        PixelFormat::Rgb => RgbImage::from_raw(width, height, data).map(DynamicImage::ImageRgb8),
        PixelFormat::Rgba => RgbaImage::from_raw(width, height, data).map(DynamicImage::ImageRgba8),
    };
    img.ok_or(mismatch)
}

/// Loads an image from disk as a raster in its native channel layout.
pub fn load_raster<P: AsRef<Path>>(path: P) -> DeskewResult<Raster> {
    let img = image::open(path).map_err(io_err)?;
    raster_from_dynamic_image(img)
}

/// Loads an image from disk and converts it to grayscale.
pub fn load_gray_image<P: AsRef<Path>>(path: P) -> DeskewResult<OwnedImage> {
    let img = image::open(path).map_err(io_err)?;
    owned_from_gray_image(&img.to_luma8())
}

/// Saves a raster; the format is inferred from the file extension.
pub fn save_raster<P: AsRef<Path>>(raster: &Raster, path: P) -> DeskewResult<()> {
    dynamic_image_from_raster(raster.clone())?
        .save(path)
        .map_err(io_err)
}
