//! Iterative font-size fitting.
#![allow(dead_code)]
//!
//! Starting from the initial `(title, list)` size pair, estimate the total
//! layout height (title block, subtitle, inter-block gap, taller column) and
//! shrink both sizes by 10% per failed attempt, clamped to fixed minimums at
//! 80% of the initial sizes. The loop is bounded: at most `MAX_FIT_ATTEMPTS`
//! shrinks, and it terminates early once both sizes sit at their minimums.
//! Sizes only ever decrease.
//!
//! Reaching the minimums while still overflowing is not an error: the result
//! carries an `overflowed` flag and the renderer proceeds best-effort,
//! clipping at the reserved rectangle.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::layout::columns::split_and_height;
use crate::layout::geometry::{
    LayoutFrame, ITEM_SPACING, LINE_PADDING, TITLE_TO_LIST_SPACING,
};
use crate::layout::measure::{Face, TextMeasurer};
use crate::layout::wrap::lines_needed;

// ────────────────────────────────────────────────────────────────────────────
// Types
// ────────────────────────────────────────────────────────────────────────────

/// Title size starts at 40pt (30 × 1.35), the list at 13pt (10 × 1.35 × 0.8
/// × 1.25) — both inherited from the poster's visual design.
pub const INITIAL_TITLE_SIZE: u32 = 40;
pub const INITIAL_LIST_SIZE: u32 = 13;

/// How many shrink attempts the engine may spend before giving up.
pub const MAX_FIT_ATTEMPTS: u8 = 3;

/// The title is estimated (and later rendered) at no more than two lines;
/// anything beyond is accepted as clipped. Deliberate truncation policy, kept
/// even when vertical space would allow a third line.
pub const TITLE_MAX_LINES: usize = 2;

/// The pair of font sizes the fit loop adjusts together.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FontSizePair {
    pub title: u32,
    pub list: u32,
}

impl FontSizePair {
    pub fn initial() -> Self {
        Self {
            title: INITIAL_TITLE_SIZE,
            list: INITIAL_LIST_SIZE,
        }
    }

    /// The immutable floor: 80% of the initial sizes, rounded down.
    pub fn minimum() -> Self {
        Self {
            title: INITIAL_TITLE_SIZE * 4 / 5,
            list: INITIAL_LIST_SIZE * 4 / 5,
        }
    }

    /// One shrink step: 10% off each size, rounded down, clamped to `floor`.
    fn shrunk(self, floor: FontSizePair) -> Self {
        Self {
            title: (self.title * 9 / 10).max(floor.title),
            list: (self.list * 9 / 10).max(floor.list),
        }
    }
}

/// Outcome of the fit loop. `overflowed == true` means the minimum sizes
/// still did not satisfy the available height and layout is best-effort.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FitResult {
    pub sizes: FontSizePair,
    pub overflowed: bool,
    pub attempts: u8,
}

// ────────────────────────────────────────────────────────────────────────────
// Fit loop
// ────────────────────────────────────────────────────────────────────────────

/// Finds the largest size pair (within the bounded shrink schedule) at which
/// title + subtitle + columns fit the frame's available height.
pub fn fit(
    title: &str,
    items: &[String],
    frame: &LayoutFrame,
    measurer: &dyn TextMeasurer,
) -> FitResult {
    let floor = FontSizePair::minimum();

    // A frame with no vertical span at all cannot fit anything.
    if frame.available_height <= 0.0 {
        warn!(
            available = frame.available_height,
            "no vertical space available, layout will be best-effort"
        );
        return FitResult {
            sizes: floor,
            overflowed: true,
            attempts: 0,
        };
    }

    let mut sizes = FontSizePair::initial();
    let mut attempts = 0u8;

    loop {
        let total = estimate_total_height(title, items, sizes, frame, measurer);
        debug!(
            attempt = attempts,
            title_size = sizes.title,
            list_size = sizes.list,
            total,
            available = frame.available_height,
            "fit attempt"
        );

        if total <= frame.available_height {
            return FitResult {
                sizes,
                overflowed: false,
                attempts,
            };
        }

        if sizes == floor {
            warn!(
                title_size = sizes.title,
                list_size = sizes.list,
                "reached minimum font sizes, some content may be clipped"
            );
            return FitResult {
                sizes,
                overflowed: true,
                attempts,
            };
        }

        if attempts >= MAX_FIT_ATTEMPTS {
            warn!(attempts, "fit attempts exhausted, some content may be clipped");
            return FitResult {
                sizes,
                overflowed: true,
                attempts,
            };
        }

        sizes = sizes.shrunk(floor);
        attempts += 1;
        debug!(
            attempt = attempts,
            title_size = sizes.title,
            list_size = sizes.list,
            "reduced font sizes"
        );
    }
}

/// Total layout height at the given sizes, computed without materializing any
/// line text: capped title block + subtitle line + fixed gap + taller column.
fn estimate_total_height(
    title: &str,
    items: &[String],
    sizes: FontSizePair,
    frame: &LayoutFrame,
    measurer: &dyn TextMeasurer,
) -> f32 {
    let title_lines = lines_needed(title, frame.title_max_width, Face::Bold, sizes.title, measurer)
        .min(TITLE_MAX_LINES);
    let title_height = title_lines as f32 * (sizes.title + LINE_PADDING) as f32;

    let subtitle_height = (sizes.list + LINE_PADDING) as f32;

    let list_line_height = (sizes.list + LINE_PADDING) as f32;
    let (_, list_height) = split_and_height(
        items,
        frame.col1_width,
        frame.col2_width,
        Face::Regular,
        sizes.list,
        list_line_height,
        ITEM_SPACING,
        measurer,
    );

    title_height + subtitle_height + TITLE_TO_LIST_SPACING + list_height
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
