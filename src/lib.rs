//! Alpha-aware masked template matching via normalized cross-correlation.
//!
//! The engine locates a small template inside a larger background by scoring
//! every candidate placement with a masked NCC formulation that ignores
//! transparent pixels, and keeps the first best-scoring position in
//! row-major order. A slider-captcha compatibility mode derives its template
//! from the rightmost quarter of the background and reports a horizontal
//! offset gated by a confidence floor.
//!
//! Parallel scanning is available via the `rayon` feature, image decoding
//! via `image-io`, and diagnostics via `tracing`.

pub mod image;
pub mod search;
pub mod template;
pub mod util;

pub(crate) mod trace;

pub use image::{DecodedImage, MaskBuffer, PixelBuffer, PixelView};
pub use search::{
    find_slider_offset, find_slider_offset_with, masked_ncc, search_best, search_best_from_row,
    Match, RightQuarterBand, SliderOffset, SliderTemplateStrategy, SLIDER_SCORE_FLOOR,
};
pub use template::{CorrelationPlan, Template};
pub use util::{NccMatchError, NccMatchResult};

#[cfg(feature = "rayon")]
pub use search::{search_best_from_row_par, search_best_par};

#[cfg(feature = "image-io")]
pub use image::io;
