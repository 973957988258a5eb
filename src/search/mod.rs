//! Search strategies for locating template placements.
//!
//! The scan module is the exhaustive engine; the slider module layers the
//! legacy single-axis heuristic on top of it.

#[cfg(feature = "rayon")]
pub mod par;
pub mod scan;
pub mod slider;

pub use scan::{masked_ncc, search_best, search_best_from_row};
pub use slider::{
    find_slider_offset, find_slider_offset_with, RightQuarterBand, SliderOffset,
    SliderTemplateStrategy, SLIDER_SCORE_FLOOR,
};

#[cfg(feature = "rayon")]
pub use par::{search_best_from_row_par, search_best_par};

/// Best-scoring placement of a template inside a background.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Match {
    /// Column of the placement's top-left corner.
    pub x: usize,
    /// Row of the placement's top-left corner.
    pub y: usize,
    /// Masked NCC score at the placement, in `[-1, 1]`.
    pub score: f64,
}
