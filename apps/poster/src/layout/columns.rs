//! Two-column balancing for the track list.
#![allow(dead_code)]
//!
//! The list is split roughly in half — the first column takes the extra item
//! when the count is odd — and the layout is sized to whichever column comes
//! out taller.

use crate::layout::measure::{Face, TextMeasurer};
use crate::layout::wrap::lines_needed;

/// Index of the first item belonging to column 2 (`ceil(n / 2)`).
pub fn split_index(item_count: usize) -> usize {
    item_count / 2 + item_count % 2
}

/// Splits `items` into two columns and returns `(first_column_count,
/// max_column_height)`. Each item contributes its wrapped line count times
/// `line_height` plus `item_spacing`.
pub fn split_and_height(
    items: &[String],
    col1_width: f32,
    col2_width: f32,
    face: Face,
    size: u32,
    line_height: f32,
    item_spacing: f32,
    measurer: &dyn TextMeasurer,
) -> (usize, f32) {
    let first_count = split_index(items.len());

    let column_height = |column: &[String], width: f32| -> f32 {
        column
            .iter()
            .map(|item| lines_needed(item, width, face, size, measurer) as f32 * line_height + item_spacing)
            .sum()
    };

    let first_height = column_height(&items[..first_count], col1_width);
    let second_height = column_height(&items[first_count..], col2_width);

    (first_count, first_height.max(second_height))
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedMeasurer;

    impl TextMeasurer for FixedMeasurer {
        fn measure(&self, text: &str, _face: Face, size: u32) -> f32 {
            text.chars().count() as f32 * size as f32
        }
    }

    fn items(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_split_index_even_and_odd() {
        assert_eq!(split_index(0), 0);
        assert_eq!(split_index(1), 1);
        assert_eq!(split_index(2), 1);
        assert_eq!(split_index(3), 2);
        assert_eq!(split_index(10), 5);
        assert_eq!(split_index(11), 6);
    }

    #[test]
    fn test_three_items_split_two_one() {
        // "A" and "B" go to column 1, "C" to column 2.
        let tracks = items(&["A", "B", "C"]);
        let (first, _) = split_and_height(
            &tracks, 100.0, 100.0, Face::Regular, 1, 6.0, 2.0, &FixedMeasurer,
        );
        assert_eq!(first, 2);
    }

    #[test]
    fn test_height_is_taller_column() {
        // Column 1: two 1-line items → 2·(6+2) = 16.
        // Column 2: one item wrapping to 3 lines → 3·6+2 = 20.
        let tracks = items(&["A", "B", "ABCDEFGHIJ ABCDEFGHIJ ABCDEFGHIJ"]);
        let (first, height) = split_and_height(
            &tracks, 100.0, 12.0, Face::Regular, 1, 6.0, 2.0, &FixedMeasurer,
        );
        assert_eq!(first, 2);
        assert!((height - 20.0).abs() < 1e-3, "expected 20.0, got {height}");
    }

    #[test]
    fn test_empty_list_zero_height() {
        let (first, height) = split_and_height(
            &[], 100.0, 100.0, Face::Regular, 1, 6.0, 2.0, &FixedMeasurer,
        );
        assert_eq!(first, 0);
        assert_eq!(height, 0.0);
    }

    #[test]
    fn test_narrower_second_column_can_dominate() {
        let tracks = items(&["AA", "AA", "SOMEWHAT LONGER TRACK TITLE"]);
        let (_, wide) = split_and_height(
            &tracks, 100.0, 100.0, Face::Regular, 1, 6.0, 2.0, &FixedMeasurer,
        );
        let (_, narrow) = split_and_height(
            &tracks, 100.0, 10.0, Face::Regular, 1, 6.0, 2.0, &FixedMeasurer,
        );
        assert!(narrow > wide, "narrow column must wrap more: {narrow} vs {wide}");
    }
}
