//! Exhaustive scan over candidate placements.

use crate::image::{MaskBuffer, PixelView};
use crate::search::Match;
use crate::template::{CorrelationPlan, Template};
use crate::trace::{trace_event, trace_span};
use crate::util::{NccMatchError, NccMatchResult};

/// Computes the masked NCC score between one window and a template.
///
/// All three inputs must share identical dimensions; a mismatch is a caller
/// contract violation reported as `DimensionMismatch` before any arithmetic
/// runs. Degenerate inputs (empty mask, flat window or template) score a
/// neutral `0.0`.
pub fn masked_ncc(
    window: PixelView<'_>,
    template: PixelView<'_>,
    mask: &MaskBuffer,
) -> NccMatchResult<f64> {
    if window.width() != template.width() || window.height() != template.height() {
        return Err(NccMatchError::DimensionMismatch {
            expected_width: template.width(),
            expected_height: template.height(),
            width: window.width(),
            height: window.height(),
        });
    }
    let plan = CorrelationPlan::from_parts(template, mask)?;
    Ok(plan.score_at_unchecked(window, 0, 0))
}

/// Finds the best-scoring placement of `template` inside `background`.
///
/// Every valid top-left position is scored in row-major order and the
/// maximum is tracked with a strict `>` comparison, so the first position
/// encountered wins on equal scores. No score threshold is applied; the
/// caller decides what confidence is acceptable. Fails with `NoMatch` when
/// the template does not fit inside the background.
pub fn search_best(background: PixelView<'_>, template: &Template) -> NccMatchResult<Match> {
    search_best_from_row(background, template, 0)
}

/// Like [`search_best`], but only considers placements with `y >= start_y`.
///
/// Useful with [`Template::extract`], whose `origin_y` bounds where the
/// template can sit in a background with the same vertical layout.
pub fn search_best_from_row(
    background: PixelView<'_>,
    template: &Template,
    start_y: usize,
) -> NccMatchResult<Match> {
    let plan = CorrelationPlan::from_template(template);
    let (max_x, max_y) = placement_range(background, &plan, start_y)?;

    let _span = trace_span!(
        "exhaustive_scan",
        img_width = background.width(),
        img_height = background.height(),
        tpl_width = plan.width(),
        tpl_height = plan.height(),
    )
    .entered();

    let mut best = Match {
        x: 0,
        y: 0,
        score: -1.0,
    };
    for y in start_y..=max_y {
        for x in 0..=max_x {
            let score = plan.score_at_unchecked(background, x, y);
            if score > best.score {
                best = Match { x, y, score };
            }
        }
    }

    trace_event!("scan_best", x = best.x, y = best.y, score = best.score);
    Ok(best)
}

/// Validates that the template fits and returns the inclusive placement
/// maxima `(max_x, max_y)`.
pub(crate) fn placement_range(
    background: PixelView<'_>,
    plan: &CorrelationPlan,
    start_y: usize,
) -> NccMatchResult<(usize, usize)> {
    let no_match = NccMatchError::NoMatch {
        img_width: background.width(),
        img_height: background.height(),
        tpl_width: plan.width(),
        tpl_height: plan.height(),
    };
    if background.width() < plan.width() || background.height() < plan.height() {
        return Err(no_match);
    }
    let max_x = background.width() - plan.width();
    let max_y = background.height() - plan.height();
    if start_y > max_y {
        return Err(no_match);
    }
    Ok((max_x, max_y))
}
