//! Turns fitted sizes into a concrete draw plan.
#![allow(dead_code)]
//!
//! This is the only stage that materializes wrapped line text. It re-applies
//! the two-line title cap, hangs the subtitle off the title's last line, and
//! walks both columns top-down, dropping items whose cursor would cross into
//! the reserved rectangle's clearance. Dropped items are counted on the plan
//! rather than reported as errors.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::layout::columns::split_index;
use crate::layout::fit::{FitResult, FontSizePair, TITLE_MAX_LINES};
use crate::layout::geometry::{
    LayoutFrame, ITEM_SPACING, LINE_PADDING, SUBTITLE_GAP, TITLE_TO_LIST_SPACING,
};
use crate::layout::measure::{Face, TextMeasurer};
use crate::layout::wrap::wrap;

// ────────────────────────────────────────────────────────────────────────────
// Plan types
// ────────────────────────────────────────────────────────────────────────────

/// One positioned piece of text. `y` is the baseline in page points (y-up).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextRun {
    pub text: String,
    pub x: f32,
    pub y: f32,
    pub face: Face,
    pub size: u32,
}

/// The resolved poster plan, consumed exactly once by the drawing backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayoutPlan {
    pub sizes: FontSizePair,
    /// True when the minimum sizes still overflowed and layout is best-effort.
    pub overflowed: bool,
    pub attempts: u8,
    pub runs: Vec<TextRun>,
    /// Items silently dropped because their column reached the reserved
    /// rectangle's clearance.
    pub omitted_items: usize,
}

/// The text content of one poster.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PosterContent {
    pub title: String,
    pub subtitle: String,
    pub items: Vec<String>,
}

// ────────────────────────────────────────────────────────────────────────────
// Rendering
// ────────────────────────────────────────────────────────────────────────────

/// Lays out title, subtitle, and both columns at the fitted sizes.
pub fn render_plan(
    content: &PosterContent,
    frame: &LayoutFrame,
    fit: &FitResult,
    measurer: &dyn TextMeasurer,
) -> LayoutPlan {
    let sizes = fit.sizes;
    let mut runs: Vec<TextRun> = Vec::new();

    // Title: wrapped at the title width, hard-capped at two lines.
    let title_line_height = (sizes.title + LINE_PADDING) as f32;
    let mut title_wrap = wrap(
        &content.title,
        frame.title_max_width,
        Face::Bold,
        sizes.title,
        measurer,
    );
    title_wrap.lines.truncate(TITLE_MAX_LINES);

    let title_lines = title_wrap.lines.len();
    for (i, line) in title_wrap.lines.iter().enumerate() {
        runs.push(TextRun {
            text: line.clone(),
            x: frame.col1_x,
            y: frame.title_y - i as f32 * title_line_height,
            face: Face::Bold,
            size: sizes.title,
        });
    }

    // The subtitle hangs off the end of the title's last rendered line; its
    // width must be re-measured after the cap.
    let last_title_line = title_wrap.lines.last().map(String::as_str).unwrap_or("");
    let last_line_width = measurer.measure(last_title_line, Face::Bold, sizes.title);
    let subtitle_y = frame.title_y - title_lines.saturating_sub(1) as f32 * title_line_height;
    runs.push(TextRun {
        text: content.subtitle.clone(),
        x: frame.col1_x + last_line_width + SUBTITLE_GAP,
        y: subtitle_y,
        face: Face::Regular,
        size: sizes.list,
    });

    // Columns start a fixed gap below the title block.
    let after_title_y = frame.title_y - title_lines as f32 * title_line_height;
    let list_top_y = after_title_y - TITLE_TO_LIST_SPACING;
    let first_count = split_index(content.items.len());

    let mut omitted_items = 0usize;
    omitted_items += render_column(
        &content.items[..first_count],
        frame.col1_x,
        frame.col1_width,
        list_top_y,
        frame.lowest_allowed_y,
        sizes.list,
        measurer,
        &mut runs,
    );
    omitted_items += render_column(
        &content.items[first_count..],
        frame.col2_x,
        frame.col2_width,
        list_top_y,
        frame.lowest_allowed_y,
        sizes.list,
        measurer,
        &mut runs,
    );

    if omitted_items > 0 {
        debug!(omitted_items, "columns reached the reserved area, items dropped");
    }

    LayoutPlan {
        sizes,
        overflowed: fit.overflowed,
        attempts: fit.attempts,
        runs,
        omitted_items,
    }
}

/// Draws one column top-down. Returns how many items were dropped because the
/// cursor reached the reserved clearance line.
#[allow(clippy::too_many_arguments)]
fn render_column(
    items: &[String],
    x: f32,
    width: f32,
    top_y: f32,
    lowest_allowed_y: f32,
    size: u32,
    measurer: &dyn TextMeasurer,
    runs: &mut Vec<TextRun>,
) -> usize {
    let line_height = (size + LINE_PADDING) as f32;
    let mut cursor_y = top_y;
    let mut omitted = 0usize;

    for item in items {
        if cursor_y <= lowest_allowed_y {
            omitted += 1;
            continue;
        }
        let wrapped = wrap(item, width, Face::Regular, size, measurer);
        for (i, line) in wrapped.lines.iter().enumerate() {
            runs.push(TextRun {
                text: line.clone(),
                x,
                y: cursor_y - i as f32 * line_height,
                face: Face::Regular,
                size,
            });
        }
        cursor_y -= wrapped.lines.len() as f32 * line_height + ITEM_SPACING;
    }

    omitted
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::fit::FontSizePair;

    struct FixedMeasurer;

    impl TextMeasurer for FixedMeasurer {
        fn measure(&self, text: &str, _face: Face, size: u32) -> f32 {
            text.chars().count() as f32 * 0.5 * size as f32
        }
    }

    fn frame() -> LayoutFrame {
        LayoutFrame {
            title_y: 340.0,
            available_height: 240.0,
            title_max_width: 395.0,
            col1_x: 50.0,
            col1_width: 237.0,
            col2_x: 307.0,
            col2_width: 237.0,
            lowest_allowed_y: 100.0,
        }
    }

    fn fitted() -> FitResult {
        FitResult {
            sizes: FontSizePair::initial(),
            overflowed: false,
            attempts: 0,
        }
    }

    fn content(title: &str, items: &[&str]) -> PosterContent {
        PosterContent {
            title: title.to_string(),
            subtitle: "THE ARTIST".to_string(),
            items: items.iter().map(|s| s.to_string()).collect(),
        }
    }

    fn runs_of<'a>(plan: &'a LayoutPlan, face: Face) -> Vec<&'a TextRun> {
        plan.runs.iter().filter(|r| r.face == face).collect()
    }

    // ── title + subtitle placement ──────────────────────────────────────────

    #[test]
    fn test_one_line_title_puts_subtitle_on_same_baseline() {
        let plan = render_plan(&content("SHORT", &["A"]), &frame(), &fitted(), &FixedMeasurer);
        let title_runs = runs_of(&plan, Face::Bold);
        assert_eq!(title_runs.len(), 1);

        let subtitle = plan.runs.iter().find(|r| r.text == "THE ARTIST").unwrap();
        assert_eq!(subtitle.y, frame().title_y);
        // 5 chars × 0.5 × 40pt = 100, plus the 10pt gap.
        assert!((subtitle.x - (50.0 + 100.0 + 10.0)).abs() < 1e-3);
        assert_eq!(subtitle.size, plan.sizes.list);
    }

    #[test]
    fn test_two_line_title_puts_subtitle_on_second_baseline() {
        // 30 chars × 20pt/char = 600 > 395 → two lines.
        let title = "AN ALBUM TITLE THAT WRAPS OVER";
        let plan = render_plan(&content(title, &["A"]), &frame(), &fitted(), &FixedMeasurer);
        let title_runs = runs_of(&plan, Face::Bold);
        assert_eq!(title_runs.len(), 2);

        let second_line_y = frame().title_y - 45.0;
        assert_eq!(title_runs[1].y, second_line_y);

        let subtitle = plan.runs.iter().find(|r| r.text == "THE ARTIST").unwrap();
        assert_eq!(subtitle.y, second_line_y);
    }

    #[test]
    fn test_overlong_title_rendered_as_exactly_two_lines() {
        let title = "VERY LONG ALBUM TITLE THAT EXCEEDS THE AVAILABLE WIDTH BY A WIDE MARGIN";
        let narrow = LayoutFrame {
            title_max_width: 120.0,
            ..frame()
        };
        let plan = render_plan(&content(title, &[]), &narrow, &fitted(), &FixedMeasurer);
        assert_eq!(runs_of(&plan, Face::Bold).len(), TITLE_MAX_LINES);
    }

    // ── columns ─────────────────────────────────────────────────────────────

    #[test]
    fn test_columns_split_and_positions() {
        let plan = render_plan(
            &content("SHORT", &["ONE", "TWO", "THREE"]),
            &frame(),
            &fitted(),
            &FixedMeasurer,
        );
        let f = frame();
        let list_top = f.title_y - 45.0 - TITLE_TO_LIST_SPACING;

        let one = plan.runs.iter().find(|r| r.text == "ONE").unwrap();
        let two = plan.runs.iter().find(|r| r.text == "TWO").unwrap();
        let three = plan.runs.iter().find(|r| r.text == "THREE").unwrap();

        // Ceil split: ONE and TWO in column 1, THREE in column 2.
        assert_eq!(one.x, f.col1_x);
        assert_eq!(two.x, f.col1_x);
        assert_eq!(three.x, f.col2_x);

        assert_eq!(one.y, list_top);
        // One line at 13pt → 18pt line height + 2pt spacing.
        assert!((two.y - (list_top - 20.0)).abs() < 1e-3);
        assert_eq!(three.y, list_top);
    }

    #[test]
    fn test_column_stops_at_reserved_clearance() {
        // Raise the clearance line so only the first couple of items fit.
        let f = frame();
        let list_top = f.title_y - 45.0 - TITLE_TO_LIST_SPACING; // 265
        let tight = LayoutFrame {
            lowest_allowed_y: list_top - 30.0,
            ..f
        };
        let many: Vec<&str> = vec!["T1", "T2", "T3", "T4", "T5", "T6", "T7", "T8"];
        let plan = render_plan(&content("SHORT", &many), &tight, &fitted(), &FixedMeasurer);

        assert!(plan.omitted_items > 0, "tight clearance must drop items");
        for run in runs_of(&plan, Face::Regular) {
            if run.text == "THE ARTIST" {
                continue;
            }
            assert!(
                run.y > tight.lowest_allowed_y,
                "run {:?} sits at or below the clearance line",
                run.text
            );
        }
    }

    #[test]
    fn test_no_items_no_column_runs() {
        let plan = render_plan(&content("SHORT", &[]), &frame(), &fitted(), &FixedMeasurer);
        assert_eq!(plan.omitted_items, 0);
        // Only the subtitle renders in the regular face.
        assert_eq!(runs_of(&plan, Face::Regular).len(), 1);
    }

    #[test]
    fn test_plan_carries_fit_outcome() {
        let overflowed = FitResult {
            sizes: FontSizePair::minimum(),
            overflowed: true,
            attempts: 2,
        };
        let plan = render_plan(&content("SHORT", &["A"]), &frame(), &overflowed, &FixedMeasurer);
        assert!(plan.overflowed);
        assert_eq!(plan.attempts, 2);
        assert_eq!(plan.sizes, FontSizePair::minimum());
        for run in runs_of(&plan, Face::Regular) {
            assert_eq!(run.size, FontSizePair::minimum().list);
        }
    }
}
