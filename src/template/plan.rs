//! Precomputed template statistics for masked correlation.

use crate::image::{MaskBuffer, PixelView};
use crate::template::Template;
use crate::util::{NccMatchError, NccMatchResult};

/// Template-side quantities of the masked NCC score, computed once per
/// template and reused at every placement.
///
/// Only position-independent work is hoisted here; the per-window
/// arithmetic in [`CorrelationPlan::score_at`] follows the masked, weighted
/// formulation term for term: intensities are multiplied by their weight,
/// means are taken over pixels with weight above zero, and the
/// mean-centered differences run over all pixels, so excluded pixels
/// contribute `0 - mean`. All accumulation is in `f64`.
pub struct CorrelationPlan {
    width: usize,
    height: usize,
    weights: Vec<f64>,
    diff: Vec<f64>,
    std_t: f64,
    valid: usize,
}

impl CorrelationPlan {
    /// Builds a plan from a template and its paired mask.
    pub fn from_template(template: &Template) -> Self {
        Self::build(template.pixels().view(), template.mask())
    }

    /// Builds a plan from raw parts, validating the pairing.
    pub fn from_parts(template: PixelView<'_>, mask: &MaskBuffer) -> NccMatchResult<Self> {
        if mask.width() != template.width() || mask.height() != template.height() {
            return Err(NccMatchError::DimensionMismatch {
                expected_width: template.width(),
                expected_height: template.height(),
                width: mask.width(),
                height: mask.height(),
            });
        }
        Ok(Self::build(template, mask))
    }

    fn build(template: PixelView<'_>, mask: &MaskBuffer) -> Self {
        let width = template.width();
        let height = template.height();
        let area = width * height;

        let mut weights = Vec::with_capacity(area);
        let mut masked = Vec::with_capacity(area);
        let mut valid = 0usize;
        let mut sum = 0.0f64;
        for y in 0..height {
            let row = template.row(y).expect("row within bounds for plan");
            let mask_row = &mask.weights()[y * width..(y + 1) * width];
            for (&value, &w) in row.iter().zip(mask_row) {
                let w = w as f64;
                let mv = value as f64 * w;
                if w > 0.0 {
                    valid += 1;
                    sum += mv;
                }
                weights.push(w);
                masked.push(mv);
            }
        }

        let mean = if valid > 0 { sum / valid as f64 } else { 0.0 };
        let mut sq_sum = 0.0f64;
        let diff: Vec<f64> = masked
            .into_iter()
            .map(|mv| {
                let d = mv - mean;
                sq_sum += d * d;
                d
            })
            .collect();

        Self {
            width,
            height,
            weights,
            diff,
            std_t: sq_sum.sqrt(),
            valid,
        }
    }

    /// Returns the template width in pixels.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Returns the template height in pixels.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Scores the placement with its top-left corner at `(x, y)`.
    ///
    /// Returns `WindowOutOfBounds` when the template does not fit inside
    /// `image` at that position. Degenerate placements (empty mask, flat
    /// window, flat template) score a neutral `0.0`.
    pub fn score_at(&self, image: PixelView<'_>, x: usize, y: usize) -> NccMatchResult<f64> {
        let fits = x
            .checked_add(self.width)
            .is_some_and(|end| end <= image.width())
            && y.checked_add(self.height)
                .is_some_and(|end| end <= image.height());
        if !fits {
            return Err(NccMatchError::WindowOutOfBounds {
                x,
                y,
                width: self.width,
                height: self.height,
                img_width: image.width(),
                img_height: image.height(),
            });
        }
        Ok(self.score_at_unchecked(image, x, y))
    }

    pub(crate) fn score_at_unchecked(&self, image: PixelView<'_>, x: usize, y: usize) -> f64 {
        if self.valid == 0 {
            return 0.0;
        }

        let mut sum_w = 0.0f64;
        for ty in 0..self.height {
            let img_row = image.row(y + ty).expect("row within bounds for score");
            let base = ty * self.width;
            for tx in 0..self.width {
                let w = self.weights[base + tx];
                if w > 0.0 {
                    sum_w += img_row[x + tx] as f64 * w;
                }
            }
        }
        let mean_w = sum_w / self.valid as f64;

        let mut dot = 0.0f64;
        let mut sq_w = 0.0f64;
        for ty in 0..self.height {
            let img_row = image.row(y + ty).expect("row within bounds for score");
            let base = ty * self.width;
            for tx in 0..self.width {
                let idx = base + tx;
                let dw = img_row[x + tx] as f64 * self.weights[idx] - mean_w;
                dot += self.diff[idx] * dw;
                sq_w += dw * dw;
            }
        }

        let std_w = sq_w.sqrt();
        if std_w == 0.0 || self.std_t == 0.0 {
            return 0.0;
        }
        dot / (std_w * self.std_t)
    }
}

#[cfg(test)]
mod tests {
    use super::CorrelationPlan;
    use crate::image::{MaskBuffer, PixelView};

    #[test]
    fn plan_counts_valid_pixels_and_centers_on_their_mean() {
        let data = [10u8, 20, 30, 40];
        let tpl = PixelView::from_slice(&data, 2, 2).unwrap();
        let mask = MaskBuffer::new(vec![1.0, 1.0, 0.0, 1.0], 2, 2).unwrap();
        let plan = CorrelationPlan::from_parts(tpl, &mask).unwrap();

        // Mean over the three valid pixels is (10 + 20 + 40) / 3.
        let mean = 70.0 / 3.0;
        assert_eq!(plan.valid, 3);
        assert!((plan.diff[0] - (10.0 - mean)).abs() < 1e-12);
        assert!((plan.diff[2] - (0.0 - mean)).abs() < 1e-12);
    }

    #[test]
    fn plan_rejects_mismatched_mask() {
        let data = [0u8; 4];
        let tpl = PixelView::from_slice(&data, 2, 2).unwrap();
        let mask = MaskBuffer::ones(3, 2).unwrap();
        assert!(CorrelationPlan::from_parts(tpl, &mask).is_err());
    }
}
