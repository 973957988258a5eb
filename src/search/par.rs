//! Rayon-parallel scan variants (feature-gated).
//!
//! Parallelizes over rows. Each row reduces to its leftmost strictly-best
//! candidate in parallel, then a sequential fold in ascending row order
//! applies the same strict `>` rule, so the result is bit-identical to the
//! sequential scan, ties included.

use crate::image::PixelView;
use crate::search::scan::placement_range;
use crate::search::Match;
use crate::template::{CorrelationPlan, Template};
use crate::util::NccMatchResult;
use rayon::prelude::*;

/// Row-parallel equivalent of [`crate::search::search_best`].
pub fn search_best_par(background: PixelView<'_>, template: &Template) -> NccMatchResult<Match> {
    search_best_from_row_par(background, template, 0)
}

/// Row-parallel equivalent of [`crate::search::search_best_from_row`].
pub fn search_best_from_row_par(
    background: PixelView<'_>,
    template: &Template,
    start_y: usize,
) -> NccMatchResult<Match> {
    let plan = CorrelationPlan::from_template(template);
    let (max_x, max_y) = placement_range(background, &plan, start_y)?;

    let row_best: Vec<Match> = (start_y..=max_y)
        .into_par_iter()
        .map(|y| {
            let mut best = Match {
                x: 0,
                y,
                score: -1.0,
            };
            for x in 0..=max_x {
                let score = plan.score_at_unchecked(background, x, y);
                if score > best.score {
                    best = Match { x, y, score };
                }
            }
            best
        })
        .collect();

    // Deterministic merge in row order preserves the row-major tie-break.
    let mut best = Match {
        x: 0,
        y: 0,
        score: -1.0,
    };
    for candidate in row_best {
        if candidate.score > best.score {
            best = candidate;
        }
    }
    Ok(best)
}
