//! Page geometry: fixed poster dimensions, the reserved scannable-code
//! rectangle, and the frame values derived from them.
#![allow(dead_code)]
//!
//! Coordinates are PDF-style points with the origin at the bottom-left and
//! y increasing upward; the raster backend flips at blit time.

use serde::{Deserialize, Serialize};

use crate::errors::PosterError;

// ────────────────────────────────────────────────────────────────────────────
// Fixed layout constants
// ────────────────────────────────────────────────────────────────────────────

/// A4 portrait in points.
pub const PAGE_WIDTH: f32 = 595.2756;
pub const PAGE_HEIGHT: f32 = 841.8898;

pub const MARGIN: f32 = 50.0;
pub const BORDER_WIDTH: f32 = 10.0;

/// Cover art block: fixed square, centered, below the top margin.
pub const COVER_SIZE: f32 = 400.0;
pub const COVER_TOP_MARGIN: f32 = 50.0;
pub const COVER_SPACE_AFTER: f32 = 40.0;

/// Line height is `font size + LINE_PADDING`.
pub const LINE_PADDING: u32 = 5;
/// Extra vertical gap between consecutive list items.
pub const ITEM_SPACING: f32 = 2.0;
/// Gap between the title block and the top of the columns.
pub const TITLE_TO_LIST_SPACING: f32 = 30.0;
/// Horizontal gap between the title's last line and the subtitle.
pub const SUBTITLE_GAP: f32 = 10.0;
/// Column 2 starts at `page_width / 2 + COLUMN_GUTTER`.
pub const COLUMN_GUTTER: f32 = 10.0;
/// Vertical clearance above the reserved rectangle that text must keep.
pub const RESERVED_BUFFER: f32 = 15.0;
/// Horizontal clearance between column 2 and the reserved rectangle.
pub const RESERVED_SIDE_BUFFER: f32 = 20.0;

// ────────────────────────────────────────────────────────────────────────────
// Types
// ────────────────────────────────────────────────────────────────────────────

/// An axis-aligned rectangle, `(x, y)` at the bottom-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

/// Fixed geometry for one poster. The reserved rectangle is supplied by the
/// collaborator that produced the scannable code, so its size varies per run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PosterGeometry {
    pub page_width: f32,
    pub page_height: f32,
    pub margin: f32,
    pub border_width: f32,
    pub reserved: Rect,
}

/// Everything the fit engine and renderer need, precomputed from geometry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayoutFrame {
    /// Baseline anchor of the title's first line.
    pub title_y: f32,
    /// Vertical span available for title + subtitle + columns.
    pub available_height: f32,
    pub title_max_width: f32,
    pub col1_x: f32,
    pub col1_width: f32,
    pub col2_x: f32,
    pub col2_width: f32,
    /// Columns stop once a cursor would reach this y (reserved top + buffer).
    pub lowest_allowed_y: f32,
}

impl PosterGeometry {
    /// A4 poster with the standard margin and border around a caller-supplied
    /// reserved rectangle.
    pub fn a4(reserved: Rect) -> Self {
        Self {
            page_width: PAGE_WIDTH,
            page_height: PAGE_HEIGHT,
            margin: MARGIN,
            border_width: BORDER_WIDTH,
            reserved,
        }
    }

    /// Rejects structurally invalid geometry before any layout begins.
    /// Degenerate-but-valid inputs (an empty list, a tiny available height)
    /// are layout policy, not errors.
    pub fn validate(&self) -> Result<(), PosterError> {
        if self.page_width <= 0.0 || self.page_height <= 0.0 {
            return Err(PosterError::InvalidGeometry(format!(
                "page dimensions must be positive, got {}x{}",
                self.page_width, self.page_height
            )));
        }
        if self.margin < 0.0 || self.border_width < 0.0 {
            return Err(PosterError::InvalidGeometry(
                "margin and border width must be non-negative".to_string(),
            ));
        }
        let r = &self.reserved;
        if r.w < 0.0 || r.h < 0.0 {
            return Err(PosterError::InvalidGeometry(format!(
                "reserved rectangle has negative size: {}x{}",
                r.w, r.h
            )));
        }
        if r.x < 0.0 || r.y < 0.0 || r.x + r.w > self.page_width || r.y + r.h > self.page_height {
            return Err(PosterError::InvalidGeometry(format!(
                "reserved rectangle ({}, {}, {}, {}) lies outside the page",
                r.x, r.y, r.w, r.h
            )));
        }
        Ok(())
    }

    /// Derives the layout frame: title anchor below the cover block, the
    /// available vertical span above the reserved rectangle, and the two
    /// column strips (column 2 narrowed if it would overlap the reserved
    /// rectangle).
    pub fn frame(&self) -> LayoutFrame {
        let title_y =
            self.page_height - COVER_SIZE - COVER_TOP_MARGIN - COVER_SPACE_AFTER - 10.0;

        let lowest_allowed_y = self.reserved.y + self.reserved.h + RESERVED_BUFFER;
        let bottom_margin = lowest_allowed_y.max(30.0);
        let available_height = title_y - bottom_margin;

        let title_max_width = self.page_width - 2.0 * self.margin - 100.0;

        let full_col_width = (self.page_width - 2.0 * self.margin) / 2.0 - 10.0;
        let col2_x = self.page_width / 2.0 + COLUMN_GUTTER;

        // Keep column 2 clear of the reserved rectangle's left edge.
        let col2_max_right = self.reserved.x - RESERVED_SIDE_BUFFER;
        let col2_max_width = col2_max_right - col2_x;
        let col2_width = if col2_max_width > 0.0 {
            full_col_width.min(col2_max_width)
        } else {
            full_col_width
        };

        LayoutFrame {
            title_y,
            available_height,
            title_max_width,
            col1_x: self.margin,
            col1_width: full_col_width,
            col2_x,
            col2_width,
            lowest_allowed_y,
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
