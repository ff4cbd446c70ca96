//! Raster drawing backend.
//!
//! Consumes a finished `LayoutPlan` and composes the page: off-white
//! background, cover block, text runs, scannable code, and the page border.
//! Layout coordinates are page points with a y-up axis; this module is the
//! single place where they flip into pixel space (`SCALE` pixels per point).

pub mod fonts;

use image::{imageops, Rgba, RgbaImage};
use rusttype::{point, Scale};
use tracing::debug;

use crate::artwork::ScannableCode;
use crate::errors::PosterError;
use crate::layout::geometry::{COVER_SIZE, COVER_TOP_MARGIN};
use crate::layout::{LayoutPlan, PosterGeometry, TextRun};
use fonts::FontSet;

/// Pixels per page point.
const SCALE: f32 = 2.0;

const BACKGROUND: Rgba<u8> = Rgba([0xF8, 0xF8, 0xF5, 0xFF]);
const INK: Rgba<u8> = Rgba([0x00, 0x00, 0x00, 0xFF]);

/// A raster page buffer with point-space drawing primitives.
pub struct RasterPage {
    img: RgbaImage,
    page_height: f32,
}

impl RasterPage {
    pub fn new(geometry: &PosterGeometry) -> Self {
        let w = (geometry.page_width * SCALE).round() as u32;
        let h = (geometry.page_height * SCALE).round() as u32;
        Self {
            img: RgbaImage::from_pixel(w, h, BACKGROUND),
            page_height: geometry.page_height,
        }
    }

    pub fn into_image(self) -> RgbaImage {
        self.img
    }

    /// Copies `source` into the rectangle whose bottom-left corner sits at
    /// `(x, y)` in page points, resizing to fit.
    pub fn blit(&mut self, source: &RgbaImage, x: f32, y: f32, w: f32, h: f32) {
        let target_w = (w * SCALE).round().max(1.0) as u32;
        let target_h = (h * SCALE).round().max(1.0) as u32;
        let resized = if source.dimensions() == (target_w, target_h) {
            source.clone()
        } else {
            imageops::resize(source, target_w, target_h, imageops::FilterType::Lanczos3)
        };

        let left = (x * SCALE).round() as i64;
        let top = ((self.page_height - (y + h)) * SCALE).round() as i64;
        imageops::overlay(&mut self.img, &resized, left, top);
    }

    /// Draws one positioned text run; `run.y` is the baseline in page points.
    pub fn draw_text(&mut self, run: &TextRun, fonts: &FontSet) {
        let font = fonts.font(run.face);
        let scale = Scale::uniform(run.size as f32 * SCALE);
        let origin = point(run.x * SCALE, (self.page_height - run.y) * SCALE);

        for glyph in font.layout(&run.text, scale, origin) {
            if let Some(bb) = glyph.pixel_bounding_box() {
                glyph.draw(|gx, gy, coverage| {
                    let px = bb.min.x + gx as i32;
                    let py = bb.min.y + gy as i32;
                    if px >= 0
                        && py >= 0
                        && (px as u32) < self.img.width()
                        && (py as u32) < self.img.height()
                    {
                        blend_ink(self.img.get_pixel_mut(px as u32, py as u32), coverage);
                    }
                });
            }
        }
    }

    /// Strokes a rectangle outline centered on its edges, reportlab-style.
    pub fn stroke_rect(&mut self, x: f32, y: f32, w: f32, h: f32, thickness: f32) {
        let half = thickness / 2.0;
        // Two horizontal bands and two vertical bands.
        self.fill_rect(x - half, y - half, w + thickness, thickness); // bottom
        self.fill_rect(x - half, y + h - half, w + thickness, thickness); // top
        self.fill_rect(x - half, y - half, thickness, h + thickness); // left
        self.fill_rect(x + w - half, y - half, thickness, h + thickness); // right
    }

    /// Fills an axis-aligned rectangle (page points, bottom-left corner).
    fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32) {
        let left = ((x * SCALE).round().max(0.0)) as u32;
        let top = (((self.page_height - (y + h)) * SCALE).round().max(0.0)) as u32;
        let right = (((x + w) * SCALE).round() as u32).min(self.img.width());
        let bottom = (((self.page_height - y) * SCALE).round() as u32).min(self.img.height());
        for py in top..bottom {
            for px in left..right {
                *self.img.get_pixel_mut(px, py) = INK;
            }
        }
    }
}

/// Alpha-blends black ink at `coverage` over an existing pixel.
fn blend_ink(pixel: &mut Rgba<u8>, coverage: f32) {
    let keep = 1.0 - coverage.clamp(0.0, 1.0);
    for channel in 0..3 {
        pixel.0[channel] = (pixel.0[channel] as f32 * keep) as u8;
    }
    pixel.0[3] = 0xFF;
}

/// Composes the final poster image from the plan and the artwork.
pub fn render_poster(
    plan: &LayoutPlan,
    geometry: &PosterGeometry,
    cover: Option<&RgbaImage>,
    code: &ScannableCode,
    fonts: &FontSet,
) -> Result<RgbaImage, PosterError> {
    let mut page = RasterPage::new(geometry);

    if let Some(cover) = cover {
        let cover_x = (geometry.page_width - COVER_SIZE) / 2.0;
        let cover_y = geometry.page_height - COVER_SIZE - COVER_TOP_MARGIN;
        page.blit(cover, cover_x, cover_y, COVER_SIZE, COVER_SIZE);
    }

    for run in &plan.runs {
        page.draw_text(run, fonts);
    }

    let r = &geometry.reserved;
    page.blit(&code.image, r.x, r.y, r.w, r.h);

    let b = geometry.border_width;
    page.stroke_rect(
        b,
        b,
        geometry.page_width - 2.0 * b,
        geometry.page_height - 2.0 * b,
        b,
    );

    debug!(runs = plan.runs.len(), "poster rasterized");
    Ok(page.into_image())
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
