//! Pixel and mask buffers shared by the matching engine.
//!
//! `PixelView` is a borrowed 2D view into a 1D intensity buffer with an
//! explicit stride, so a sliding window over a background is a zero-copy
//! sub-view of the same backing slice. `PixelBuffer` owns a contiguous
//! grid; `MaskBuffer` pairs a `[0, 1]` weight with every pixel of an
//! associated buffer of identical dimensions.

use crate::util::{NccMatchError, NccMatchResult};

#[cfg(feature = "image-io")]
pub mod io;

/// Borrowed 2D intensity view with an explicit stride.
#[derive(Copy, Clone)]
pub struct PixelView<'a> {
    data: &'a [u8],
    width: usize,
    height: usize,
    stride: usize,
}

impl<'a> PixelView<'a> {
    /// Creates a contiguous view with `stride == width`.
    pub fn from_slice(data: &'a [u8], width: usize, height: usize) -> NccMatchResult<Self> {
        Self::new(data, width, height, width)
    }

    /// Creates a view with an explicit stride.
    pub fn new(
        data: &'a [u8],
        width: usize,
        height: usize,
        stride: usize,
    ) -> NccMatchResult<Self> {
        let needed = required_len(width, height, stride)?;
        if data.len() < needed {
            return Err(NccMatchError::BufferTooSmall {
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

    /// Returns the view width in pixels.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Returns the view height in pixels.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Returns the stride in elements between row starts.
    pub fn stride(&self) -> usize {
        self.stride
    }

    /// Returns the intensity at `(x, y)` if it is within bounds.
    pub fn get(&self, x: usize, y: usize) -> Option<u8> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.data.get(y * self.stride + x).copied()
    }

    /// Returns a contiguous slice for row `y` with length `width`.
    pub fn row(&self, y: usize) -> Option<&'a [u8]> {
        if y >= self.height {
            return None;
        }
        let start = y * self.stride;
        self.data.get(start..start + self.width)
    }

    /// Returns a zero-copy sub-window into the same backing buffer.
    pub fn window(
        &self,
        x: usize,
        y: usize,
        width: usize,
        height: usize,
    ) -> NccMatchResult<PixelView<'a>> {
        if width == 0 || height == 0 {
            return Err(NccMatchError::InvalidDimensions { width, height });
        }
        let oob = || NccMatchError::WindowOutOfBounds {
            x,
            y,
            width,
            height,
            img_width: self.width,
            img_height: self.height,
        };
        let end_x = x.checked_add(width).ok_or_else(oob)?;
        let end_y = y.checked_add(height).ok_or_else(oob)?;
        if end_x > self.width || end_y > self.height {
            return Err(oob());
        }
        let start = y * self.stride + x;
        PixelView::new(&self.data[start..], width, height, self.stride)
    }
}

/// Owned contiguous intensity buffer in row-major order.
#[derive(Clone)]
pub struct PixelBuffer {
    data: Vec<u8>,
    width: usize,
    height: usize,
}

impl PixelBuffer {
    /// Creates a buffer from exactly `width * height` intensities.
    pub fn new(data: Vec<u8>, width: usize, height: usize) -> NccMatchResult<Self> {
        let needed = checked_area(width, height)?;
        if data.len() < needed {
            return Err(NccMatchError::BufferTooSmall {
                needed,
                got: data.len(),
            });
        }
        if data.len() > needed {
            return Err(NccMatchError::InvalidDimensions { width, height });
        }
        Ok(Self {
            data,
            width,
            height,
        })
    }

    /// Returns the buffer width in pixels.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Returns the buffer height in pixels.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Returns the backing intensities in row-major order.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Returns a borrowed view of the whole buffer.
    pub fn view(&self) -> PixelView<'_> {
        PixelView {
            data: &self.data,
            width: self.width,
            height: self.height,
            stride: self.width,
        }
    }
}

/// Owned per-pixel weight grid with entries in `[0, 1]`.
///
/// A weight of `1.0` marks a fully trusted pixel, `0.0` a pixel excluded
/// from correlation. Dimensions must match the paired `PixelBuffer`; the
/// pairing is validated where the two meet (`Template::new`,
/// `DecodedImage::new`).
#[derive(Clone)]
pub struct MaskBuffer {
    weights: Vec<f32>,
    width: usize,
    height: usize,
}

impl MaskBuffer {
    /// Creates a mask from exactly `width * height` weights.
    pub fn new(weights: Vec<f32>, width: usize, height: usize) -> NccMatchResult<Self> {
        let needed = checked_area(width, height)?;
        if weights.len() < needed {
            return Err(NccMatchError::BufferTooSmall {
                needed,
                got: weights.len(),
            });
        }
        if weights.len() > needed {
            return Err(NccMatchError::InvalidDimensions { width, height });
        }
        Ok(Self {
            weights,
            width,
            height,
        })
    }

    /// Creates a fully-valid mask (every weight `1.0`).
    pub fn ones(width: usize, height: usize) -> NccMatchResult<Self> {
        let area = checked_area(width, height)?;
        Ok(Self {
            weights: vec![1.0; area],
            width,
            height,
        })
    }

    /// Returns the mask width in pixels.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Returns the mask height in pixels.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Returns the weights in row-major order.
    pub fn weights(&self) -> &[f32] {
        &self.weights
    }

    /// Returns the weight at `(x, y)` if it is within bounds.
    pub fn get(&self, x: usize, y: usize) -> Option<f32> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.weights.get(y * self.width + x).copied()
    }
}

/// Decoded image as handed over by the codec: single-channel intensities
/// plus an optional transparency mask with weights `alpha / 255`.
pub struct DecodedImage {
    gray: PixelBuffer,
    alpha: Option<MaskBuffer>,
}

impl DecodedImage {
    /// Pairs an intensity buffer with an optional alpha mask.
    ///
    /// The mask must match the intensity dimensions exactly.
    pub fn new(gray: PixelBuffer, alpha: Option<MaskBuffer>) -> NccMatchResult<Self> {
        if let Some(mask) = &alpha {
            if mask.width() != gray.width() || mask.height() != gray.height() {
                return Err(NccMatchError::DimensionMismatch {
                    expected_width: gray.width(),
                    expected_height: gray.height(),
                    width: mask.width(),
                    height: mask.height(),
                });
            }
        }
        Ok(Self { gray, alpha })
    }

    /// Returns the intensity buffer.
    pub fn gray(&self) -> &PixelBuffer {
        &self.gray
    }

    /// Returns the transparency mask, if the source image carried one.
    pub fn alpha(&self) -> Option<&MaskBuffer> {
        self.alpha.as_ref()
    }

    /// Returns the image width in pixels.
    pub fn width(&self) -> usize {
        self.gray.width()
    }

    /// Returns the image height in pixels.
    pub fn height(&self) -> usize {
        self.gray.height()
    }
}

fn checked_area(width: usize, height: usize) -> NccMatchResult<usize> {
    if width == 0 || height == 0 {
        return Err(NccMatchError::InvalidDimensions { width, height });
    }
    width
        .checked_mul(height)
        .ok_or(NccMatchError::InvalidDimensions { width, height })
}

fn required_len(width: usize, height: usize, stride: usize) -> NccMatchResult<usize> {
    if width == 0 || height == 0 {
        return Err(NccMatchError::InvalidDimensions { width, height });
    }
    if stride < width {
        return Err(NccMatchError::InvalidStride { width, stride });
    }
    (height - 1)
        .checked_mul(stride)
        .and_then(|v| v.checked_add(width))
        .ok_or(NccMatchError::InvalidDimensions { width, height })
}
