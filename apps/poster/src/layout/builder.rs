//! Poster builder — wires geometry, content, and the measurement capability
//! into the fit engine and the renderer.

use tracing::info;

use crate::errors::PosterError;
use crate::layout::fit::fit;
use crate::layout::geometry::PosterGeometry;
use crate::layout::measure::TextMeasurer;
use crate::layout::renderer::{render_plan, LayoutPlan, PosterContent};

/// Produces the complete draw plan for one poster.
///
/// Pure and synchronous: geometry is validated up front, the fit loop picks
/// the font sizes, and the renderer assigns positions. The caller hands the
/// returned plan to a drawing backend exactly once.
pub fn build_poster_plan(
    content: &PosterContent,
    geometry: &PosterGeometry,
    measurer: &dyn TextMeasurer,
) -> Result<LayoutPlan, PosterError> {
    geometry.validate()?;
    let frame = geometry.frame();

    let fit_result = fit(&content.title, &content.items, &frame, measurer);
    info!(
        title_size = fit_result.sizes.title,
        list_size = fit_result.sizes.list,
        attempts = fit_result.attempts,
        overflowed = fit_result.overflowed,
        "font sizes resolved"
    );

    Ok(render_plan(content, &frame, &fit_result, measurer))
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::fit::FontSizePair;
    use crate::layout::geometry::{Rect, BORDER_WIDTH, PAGE_WIDTH};
    use crate::layout::measure::HelveticaMeasurer;

    fn code_rect() -> Rect {
        Rect {
            x: PAGE_WIDTH - BORDER_WIDTH - 15.0 - 250.0,
            y: BORDER_WIDTH + 15.0,
            w: 250.0,
            h: 62.0,
        }
    }

    fn album_content() -> PosterContent {
        PosterContent {
            title: "ABBEY ROAD".to_string(),
            subtitle: "THE BEATLES".to_string(),
            items: [
                "COME TOGETHER",
                "SOMETHING",
                "MAXWELL'S SILVER HAMMER",
                "OH! DARLING",
                "OCTOPUS'S GARDEN",
                "I WANT YOU (SHE'S SO HEAVY)",
                "HERE COMES THE SUN",
                "BECAUSE",
                "YOU NEVER GIVE ME YOUR MONEY",
                "SUN KING",
                "MEAN MR. MUSTARD",
                "POLYTHENE PAM",
                "SHE CAME IN THROUGH THE BATHROOM WINDOW",
                "GOLDEN SLUMBERS",
                "CARRY THAT WEIGHT",
                "THE END",
                "HER MAJESTY",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
        }
    }

    #[test]
    fn test_typical_album_builds_without_overflow() {
        let plan = build_poster_plan(
            &album_content(),
            &PosterGeometry::a4(code_rect()),
            &HelveticaMeasurer,
        )
        .unwrap();
        assert!(!plan.overflowed);
        assert_eq!(plan.omitted_items, 0);
        // Every track produced at least one run.
        for track in &album_content().items {
            assert!(
                plan.runs.iter().any(|r| track.starts_with(r.text.as_str())),
                "no run found for track {track:?}"
            );
        }
    }

    #[test]
    fn test_invalid_geometry_is_rejected_before_layout() {
        let mut geometry = PosterGeometry::a4(code_rect());
        geometry.page_width = 0.0;
        let result = build_poster_plan(&album_content(), &geometry, &HelveticaMeasurer);
        assert!(matches!(result, Err(PosterError::InvalidGeometry(_))));
    }

    #[test]
    fn test_all_runs_stay_inside_page_and_above_clearance() {
        let geometry = PosterGeometry::a4(code_rect());
        let frame = geometry.frame();
        let plan =
            build_poster_plan(&album_content(), &geometry, &HelveticaMeasurer).unwrap();
        for run in &plan.runs {
            assert!(run.x >= 0.0 && run.x < geometry.page_width);
            assert!(run.y > 0.0 && run.y < geometry.page_height);
        }
        // Column runs respect the reserved clearance.
        for run in plan.runs.iter().filter(|r| r.y < frame.title_y - 100.0) {
            assert!(run.y > frame.lowest_allowed_y);
        }
    }

    #[test]
    fn test_sizes_in_plan_never_exceed_initial() {
        let plan = build_poster_plan(
            &album_content(),
            &PosterGeometry::a4(code_rect()),
            &HelveticaMeasurer,
        )
        .unwrap();
        let initial = FontSizePair::initial();
        assert!(plan.sizes.title <= initial.title);
        assert!(plan.sizes.list <= initial.list);
    }
}
