//! Heuristic single-axis slider search.
//!
//! Legacy compatibility mode for slider-captcha layouts: the template is
//! derived from the background itself and only the horizontal coordinate of
//! the winner is reported, gated by a hard confidence floor.

use crate::image::{DecodedImage, MaskBuffer, PixelBuffer};
use crate::search::scan::search_best;
use crate::template::Template;
use crate::trace::trace_event;
use crate::util::{NccMatchError, NccMatchResult};

/// Confidence floor below which the slider search reports failure.
pub const SLIDER_SCORE_FLOOR: f64 = 0.3;

/// Outcome of the single-axis slider search.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SliderOffset {
    /// Horizontal offset of the best placement. `0` is a sentinel when
    /// `confident` is unset, not a true position.
    pub x: usize,
    /// Best masked NCC score found.
    pub score: f64,
    /// Whether the score cleared [`SLIDER_SCORE_FLOOR`].
    pub confident: bool,
}

/// Derives a search template from the background itself.
///
/// The layout assumption lives behind this seam; the engine only sees the
/// resulting template.
pub trait SliderTemplateStrategy {
    /// Produces the template for this layout.
    fn derive(&self, image: &DecodedImage) -> NccMatchResult<Template>;
}

/// Takes the rightmost quarter-width column band as the slider template.
///
/// Assumes the captcha layout parks the slider piece at the right edge of
/// the image. The mask is the binarized alpha of the band (weight `1.0`
/// where alpha > 0) or all-ones when the image carries no transparency.
pub struct RightQuarterBand;

impl SliderTemplateStrategy for RightQuarterBand {
    fn derive(&self, image: &DecodedImage) -> NccMatchResult<Template> {
        let width = image.width();
        let height = image.height();
        let band = width / 4;
        if band == 0 {
            return Err(NccMatchError::EmptyTemplate);
        }
        let x0 = width - band;

        let gray = image.gray().data();
        let mut pixels = Vec::with_capacity(band * height);
        for y in 0..height {
            let start = y * width + x0;
            pixels.extend_from_slice(&gray[start..start + band]);
        }

        let mask = match image.alpha() {
            Some(alpha) => {
                let mut weights = Vec::with_capacity(band * height);
                for y in 0..height {
                    let start = y * width + x0;
                    weights.extend(
                        alpha.weights()[start..start + band]
                            .iter()
                            .map(|&w| if w > 0.0 { 1.0 } else { 0.0 }),
                    );
                }
                MaskBuffer::new(weights, band, height)?
            }
            None => MaskBuffer::ones(band, height)?,
        };

        Template::new(PixelBuffer::new(pixels, band, height)?, mask, 0)
    }
}

/// Runs the slider search with the default right-quarter strategy.
pub fn find_slider_offset(image: &DecodedImage) -> NccMatchResult<SliderOffset> {
    find_slider_offset_with(image, &RightQuarterBand)
}

/// Runs the slider search with a caller-supplied template strategy.
///
/// The derived template is scanned over the full background with the same
/// engine as [`crate::search::search_best`]. Below [`SLIDER_SCORE_FLOOR`]
/// the result carries the sentinel offset `0` with `confident` unset, so a
/// failed search stays distinguishable from a genuine zero offset.
pub fn find_slider_offset_with(
    image: &DecodedImage,
    strategy: &dyn SliderTemplateStrategy,
) -> NccMatchResult<SliderOffset> {
    let template = strategy.derive(image)?;
    let best = search_best(image.gray().view(), &template)?;

    if best.score < SLIDER_SCORE_FLOOR {
        trace_event!("slider_low_confidence", x = best.x, score = best.score);
        return Ok(SliderOffset {
            x: 0,
            score: best.score,
            confident: false,
        });
    }
    Ok(SliderOffset {
        x: best.x,
        score: best.score,
        confident: true,
    })
}
