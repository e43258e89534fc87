//! Raster buffers used by the estimator.
//!
//! `ImageView` is a borrowed single-channel view into a 1D buffer with an
//! explicit stride (elements between the starts of consecutive rows).
//! `OwnedImage` is a contiguous grayscale buffer produced by rotations and the
//! page composer. `Raster` carries interleaved multi-channel pixels and is the
//! input/output type of the correction step.

use crate::util::{DeskewError, DeskewResult};

#[cfg(feature = "image-io")]
pub mod io;
mod raster;

pub use raster::{PixelFormat, Raster};

/// Borrowed 2D image view with an explicit stride.
#[derive(Copy, Clone, Debug)]
pub struct ImageView<'a, T> {
    data: &'a [T],
    width: usize,
    height: usize,
    stride: usize,
}

impl<'a, T> ImageView<'a, T> {
    /// Creates a contiguous view with `stride == width`.
    pub fn from_slice(data: &'a [T], width: usize, height: usize) -> DeskewResult<Self> {
        Self::new(data, width, height, width)
    }

    /// Creates a view with an explicit stride.
    pub fn new(data: &'a [T], width: usize, height: usize, stride: usize) -> DeskewResult<Self> {
        let needed = required_len(width, height, stride)?;
        if data.len() < needed {
            return Err(DeskewError::BufferTooSmall {
                needed,
                got: data.len(),
            });
        }
        Ok(Self {
            data,
            width,
            height,
            stride,
        })
    }

    /// Returns the image width in pixels.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Returns the image height in pixels.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Returns the stride in elements between row starts.
    pub fn stride(&self) -> usize {
        self.stride
    }

    /// Returns the backing slice including any row padding.
    pub fn as_slice(&self) -> &'a [T] {
        self.data
    }

    /// Returns the element at `(x, y)` if it is within bounds.
    pub fn get(&self, x: usize, y: usize) -> Option<&'a T> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = y.checked_mul(self.stride)?.checked_add(x)?;
        self.data.get(idx)
    }

    /// Returns a contiguous slice for row `y` with length `width`.
    pub fn row(&self, y: usize) -> Option<&'a [T]> {
        if y >= self.height {
            return None;
        }
        let start = y.checked_mul(self.stride)?;
        let end = start.checked_add(self.width)?;
        self.data.get(start..end)
    }

    /// Iterates over the rows from top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &'a [T]> + '_ {
        // Construction guarantees every row index below `height` is in bounds.
        (0..self.height).filter_map(move |y| self.row(y))
    }
}

fn required_len(width: usize, height: usize, stride: usize) -> DeskewResult<usize> {
    if width == 0 || height == 0 {
        return Err(DeskewError::InvalidDimensions { width, height });
    }
    if stride < width {
        return Err(DeskewError::InvalidStride { width, stride });
    }
    let needed = (height - 1)
        .checked_mul(stride)
        .and_then(|v| v.checked_add(width))
        .ok_or(DeskewError::InvalidDimensions { width, height })?;
    Ok(needed)
}

/// Owned contiguous grayscale image buffer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OwnedImage {
    data: Vec<u8>,
    width: usize,
    height: usize,
}

impl OwnedImage {
    /// Wraps a contiguous buffer of exactly `width * height` samples.
    pub fn new(data: Vec<u8>, width: usize, height: usize) -> DeskewResult<Self> {
        let needed = pixel_count(width, height)?;
        if data.len() < needed {
            return Err(DeskewError::BufferTooSmall {
                needed,
                got: data.len(),
            });
        }
        if data.len() > needed {
            return Err(DeskewError::InvalidDimensions { width, height });
        }
        Ok(Self {
            data,
            width,
            height,
        })
    }

    /// Wraps a buffer whose length the caller already sized to `width * height`.
    pub(crate) fn from_parts(data: Vec<u8>, width: usize, height: usize) -> Self {
        debug_assert_eq!(data.len(), width * height);
        Self {
            data,
            width,
            height,
        }
    }

    /// Creates an image where every pixel has `value`.
    pub fn filled(width: usize, height: usize, value: u8) -> DeskewResult<Self> {
        let needed = pixel_count(width, height)?;
        Self::new(vec![value; needed], width, height)
    }

    /// Copies a (possibly strided) view into a contiguous buffer.
    pub fn from_view(view: ImageView<'_, u8>) -> DeskewResult<Self> {
        let width = view.width();
        let height = view.height();
        let mut data = Vec::with_capacity(pixel_count(width, height)?);
        for row in view.rows() {
            data.extend_from_slice(row);
        }
        Self::new(data, width, height)
    }

    /// Returns a borrowed view of the image.
    pub fn view(&self) -> ImageView<'_, u8> {
        ImageView {
            data: &self.data,
            width: self.width,
            height: self.height,
            stride: self.width,
        }
    }

    /// Returns the image width in pixels.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Returns the image height in pixels.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Returns the contiguous pixel data.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Returns a mutable slice for row `y`.
    pub(crate) fn row_mut(&mut self, y: usize) -> Option<&mut [u8]> {
        if y >= self.height {
            return None;
        }
        let start = y * self.width;
        self.data.get_mut(start..start + self.width)
    }

    /// Consumes the image and returns its pixel buffer.
    pub fn into_vec(self) -> Vec<u8> {
        self.data
    }
}

pub(crate) fn pixel_count(width: usize, height: usize) -> DeskewResult<usize> {
    if width == 0 || height == 0 {
        return Err(DeskewError::InvalidDimensions { width, height });
    }
    width
        .checked_mul(height)
        .ok_or(DeskewError::InvalidDimensions { width, height })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_view_drops_row_padding() {
        let data = [1u8, 2, 99, 3, 4, 99];
        let view = ImageView::new(&data, 2, 2, 3).unwrap();
        let owned = OwnedImage::from_view(view).unwrap();
        assert_eq!(owned.data(), &[1, 2, 3, 4]);
        assert_eq!(owned.view().stride(), 2);
    }

    #[test]
    fn owned_rejects_oversized_buffer() {
        let err = OwnedImage::new(vec![0u8; 5], 2, 2).unwrap_err();
        assert_eq!(
            err,
            DeskewError::InvalidDimensions {
                width: 2,
                height: 2
            }
        );
    }
}
