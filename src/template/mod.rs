//! Template storage and extraction.

use crate::image::{DecodedImage, MaskBuffer, PixelBuffer};
use crate::util::{NccMatchError, NccMatchResult};

mod plan;

pub use plan::CorrelationPlan;

/// Immutable template: intensity pixels, a paired weight mask, and the row
/// offset at which the template was cropped from its source image.
///
/// `origin_y` lets a caller restrict the search to rows at or below the
/// crop position in a source with the same vertical layout.
pub struct Template {
    pixels: PixelBuffer,
    mask: MaskBuffer,
    origin_y: usize,
}

impl Template {
    /// Pairs pixels with a mask of identical dimensions.
    pub fn new(pixels: PixelBuffer, mask: MaskBuffer, origin_y: usize) -> NccMatchResult<Self> {
        if mask.width() != pixels.width() || mask.height() != pixels.height() {
            return Err(NccMatchError::DimensionMismatch {
                expected_width: pixels.width(),
                expected_height: pixels.height(),
                width: mask.width(),
                height: mask.height(),
            });
        }
        Ok(Self {
            pixels,
            mask,
            origin_y,
        })
    }

    /// Crops the non-transparent region of `image` into a minimal template.
    ///
    /// Computes the tight bounding box of all pixels with transparency
    /// weight above zero, then crops both intensities and weights to it.
    /// Fails with `MissingAlphaChannel` when the image carries no
    /// transparency data and with `EmptyTemplate` when every pixel is fully
    /// transparent.
    pub fn extract(image: &DecodedImage) -> NccMatchResult<Self> {
        let alpha = image.alpha().ok_or(NccMatchError::MissingAlphaChannel)?;
        let width = image.width();
        let height = image.height();
        let weights = alpha.weights();

        let mut min_x = width;
        let mut max_x = 0usize;
        let mut min_y = height;
        let mut max_y = 0usize;
        for y in 0..height {
            let row = &weights[y * width..(y + 1) * width];
            for (x, &w) in row.iter().enumerate() {
                if w > 0.0 {
                    min_x = min_x.min(x);
                    max_x = max_x.max(x);
                    min_y = min_y.min(y);
                    max_y = max_y.max(y);
                }
            }
        }
        if min_x > max_x || min_y > max_y {
            return Err(NccMatchError::EmptyTemplate);
        }

        let crop_width = max_x - min_x + 1;
        let crop_height = max_y - min_y + 1;
        let gray = image.gray().data();
        let mut pixels = Vec::with_capacity(crop_width * crop_height);
        let mut mask = Vec::with_capacity(crop_width * crop_height);
        for y in min_y..=max_y {
            let start = y * width + min_x;
            pixels.extend_from_slice(&gray[start..start + crop_width]);
            mask.extend_from_slice(&weights[start..start + crop_width]);
        }

        Self::new(
            PixelBuffer::new(pixels, crop_width, crop_height)?,
            MaskBuffer::new(mask, crop_width, crop_height)?,
            min_y,
        )
    }

    /// Returns the template intensities.
    pub fn pixels(&self) -> &PixelBuffer {
        &self.pixels
    }

    /// Returns the template weight mask.
    pub fn mask(&self) -> &MaskBuffer {
        &self.mask
    }

    /// Returns the row at which the template was cropped from its source.
    pub fn origin_y(&self) -> usize {
        self.origin_y
    }

    /// Returns the template width in pixels.
    pub fn width(&self) -> usize {
        self.pixels.width()
    }

    /// Returns the template height in pixels.
    pub fn height(&self) -> usize {
        self.pixels.height()
    }
}
