//! Interleaved multi-channel rasters and their luma reduction.

use crate::image::{pixel_count, ImageView, OwnedImage};
use crate::util::{DeskewError, DeskewResult};

/// Interleaved 8-bit pixel layouts accepted by the estimator.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PixelFormat {
    /// Single intensity channel.
    Gray,
    /// Intensity followed by alpha.
    GrayAlpha,
    /// Red, green, blue.
    Rgb,
    /// Red, green, blue, alpha.
    Rgba,
}

impl PixelFormat {
    /// Maps a channel count to a pixel format.
    pub fn from_channels(channels: usize) -> DeskewResult<Self> {
        match channels {
            1 => Ok(Self::Gray),
            2 => Ok(Self::GrayAlpha),
            3 => Ok(Self::Rgb),
            4 => Ok(Self::Rgba),
            _ => Err(DeskewError::InvalidInput {
                reason: "unsupported channel count (expected 1 to 4)",
            }),
        }
    }

    /// Number of interleaved samples per pixel.
    pub fn channels(self) -> usize {
        match self {
            Self::Gray => 1,
            Self::GrayAlpha => 2,
            Self::Rgb => 3,
            Self::Rgba => 4,
        }
    }

    /// Reduces one pixel to its Rec. 601 luma; alpha is ignored.
    #[inline]
    pub(crate) fn luma(self, px: &[u8]) -> u8 {
        match self {
            Self::Gray | Self::GrayAlpha => px[0],
            Self::Rgb | Self::Rgba => {
                let r = u32::from(px[0]);
                let g = u32::from(px[1]);
                let b = u32::from(px[2]);
                ((299 * r + 587 * g + 114 * b + 500) / 1000) as u8
            }
        }
    }
}

/// Owned interleaved raster.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Raster {
    data: Vec<u8>,
    width: usize,
    height: usize,
    format: PixelFormat,
}

impl Raster {
    /// Wraps a buffer of exactly `width * height * format.channels()` samples.
    pub fn new(data: Vec<u8>, width: usize, height: usize, format: PixelFormat) -> DeskewResult<Self> {
        let needed = pixel_count(width, height)?
            .checked_mul(format.channels())
            .ok_or(DeskewError::InvalidDimensions { width, height })?;
        if data.len() != needed {
            return Err(DeskewError::InvalidInput {
                reason: "buffer length does not match width * height * channels",
            });
        }
        Ok(Self {
            data,
            width,
            height,
            format,
        })
    }

    /// Wraps a buffer whose layout is given by a raw channel count.
    pub fn from_channels(
        data: Vec<u8>,
        width: usize,
        height: usize,
        channels: usize,
    ) -> DeskewResult<Self> {
        let format = PixelFormat::from_channels(channels)?;
        Self::new(data, width, height, format)
    }

    /// Creates a raster where every sample of every channel is `value`.
    pub fn filled(width: usize, height: usize, format: PixelFormat, value: u8) -> DeskewResult<Self> {
        let len = pixel_count(width, height)?
            .checked_mul(format.channels())
            .ok_or(DeskewError::InvalidDimensions { width, height })?;
        Self::new(vec![value; len], width, height, format)
    }

    /// Returns the raster width in pixels.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Returns the raster height in pixels.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Returns the pixel layout.
    pub fn format(&self) -> PixelFormat {
        self.format
    }

    /// Returns the interleaved sample buffer.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Consumes the raster and returns its sample buffer.
    pub fn into_vec(self) -> Vec<u8> {
        self.data
    }

    /// Returns the samples of pixel `(x, y)`.
    #[inline]
    pub fn pixel(&self, x: usize, y: usize) -> Option<&[u8]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let ch = self.format.channels();
        let start = (y * self.width + x) * ch;
        self.data.get(start..start + ch)
    }

    #[inline]
    pub(crate) fn pixel_mut(&mut self, x: usize, y: usize) -> Option<&mut [u8]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let ch = self.format.channels();
        let start = (y * self.width + x) * ch;
        self.data.get_mut(start..start + ch)
    }

    /// Reduces the raster to a single intensity channel.
    ///
    /// Gray rasters are copied as-is; color rasters use the Rec. 601 weights
    /// `0.299 R + 0.587 G + 0.114 B` with rounding.
    pub fn to_luma(&self) -> OwnedImage {
        let ch = self.format.channels();
        let data = match self.format {
            PixelFormat::Gray => self.data.clone(),
            format => self.data.chunks_exact(ch).map(|px| format.luma(px)).collect(),
        };
        OwnedImage {
            data,
            width: self.width,
            height: self.height,
        }
    }

    /// Returns a grayscale view when the raster is single-channel.
    pub fn gray_view(&self) -> Option<ImageView<'_, u8>> {
        match self.format {
            PixelFormat::Gray => Some(ImageView {
                data: &self.data,
                width: self.width,
                height: self.height,
                stride: self.width,
            }),
            _ => None,
        }
    }
}

impl From<OwnedImage> for Raster {
    fn from(img: OwnedImage) -> Self {
        Self {
            width: img.width,
            height: img.height,
            data: img.data,
            format: PixelFormat::Gray,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_unknown_channel_counts() {
        for channels in [0usize, 5, 8] {
            let err = Raster::from_channels(vec![0u8; 4 * channels], 2, 2, channels).unwrap_err();
            assert!(matches!(err, DeskewError::InvalidInput { .. }));
        }
    }

    #[test]
    fn luma_uses_rec601_weights() {
        let data = vec![255, 0, 0, 0, 255, 0, 0, 0, 255, 255, 255, 255];
        let raster = Raster::new(data, 4, 1, PixelFormat::Rgb).unwrap();
        let gray = raster.to_luma();
        assert_eq!(gray.data(), &[76, 150, 29, 255]);
    }

    #[test]
    fn luma_ignores_alpha() {
        let raster = Raster::new(vec![10, 0, 200, 7], 2, 1, PixelFormat::GrayAlpha).unwrap();
        assert_eq!(raster.to_luma().data(), &[10, 200]);
    }

    #[test]
    fn gray_view_only_for_single_channel() {
        let gray = Raster::filled(3, 2, PixelFormat::Gray, 9).unwrap();
        assert_eq!(gray.gray_view().unwrap().row(1).unwrap(), &[9, 9, 9]);
        let rgb = Raster::filled(3, 2, PixelFormat::Rgb, 9).unwrap();
        assert!(rgb.gray_view().is_none());
    }
}
