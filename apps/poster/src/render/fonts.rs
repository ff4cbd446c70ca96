//! Font resolution for the raster backend.
//!
//! Resolution is a pure path probe: the config override first, then
//! well-known system locations. Nothing global is registered or mutated —
//! the resolved TTF is read once and handed to the rasterizer.

use std::path::{Path, PathBuf};

use rusttype::Font;
use tracing::info;

use crate::config::Config;
use crate::errors::PosterError;
use crate::layout::Face;

/// Loaded glyph fonts for both poster faces.
pub struct FontSet {
    regular: Font<'static>,
    bold: Font<'static>,
}

impl FontSet {
    pub fn font(&self, face: Face) -> &Font<'static> {
        match face {
            Face::Regular => &self.regular,
            Face::Bold => &self.bold,
        }
    }
}

const REGULAR_CANDIDATES: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/System/Library/Fonts/Supplemental/Arial.ttf",
    "/Library/Fonts/Arial.ttf",
    "C:/Windows/Fonts/arial.ttf",
];

const BOLD_CANDIDATES: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSans-Bold.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Bold.ttf",
    "/usr/share/fonts/TTF/DejaVuSans-Bold.ttf",
    "/System/Library/Fonts/Supplemental/Arial Bold.ttf",
    "/Library/Fonts/Arial Bold.ttf",
    "C:/Windows/Fonts/arialbd.ttf",
];

/// Returns the first existing path from `override_path` followed by
/// `candidates`.
fn first_existing(override_path: Option<&str>, candidates: &[&str]) -> Option<PathBuf> {
    override_path
        .into_iter()
        .chain(candidates.iter().copied())
        .map(Path::new)
        .find(|p| p.exists())
        .map(Path::to_path_buf)
}

/// Resolves the TTF path for one face.
pub fn resolve_font_path(override_path: Option<&str>, face: Face) -> Result<PathBuf, PosterError> {
    let candidates = match face {
        Face::Regular => REGULAR_CANDIDATES,
        Face::Bold => BOLD_CANDIDATES,
    };
    first_existing(override_path, candidates).ok_or_else(|| {
        PosterError::Font(format!(
            "no usable {face:?} font found; set POSTER_FONT_PATH / POSTER_FONT_BOLD_PATH"
        ))
    })
}

/// Loads both faces from disk.
pub fn load_font_set(config: &Config) -> Result<FontSet, PosterError> {
    let regular_path = resolve_font_path(config.font_path.as_deref(), Face::Regular)?;
    let bold_path = resolve_font_path(config.font_bold_path.as_deref(), Face::Bold)?;
    info!(
        regular = %regular_path.display(),
        bold = %bold_path.display(),
        "fonts resolved"
    );

    let regular = load_font(&regular_path)?;
    let bold = load_font(&bold_path)?;
    Ok(FontSet { regular, bold })
}

fn load_font(path: &Path) -> Result<Font<'static>, PosterError> {
    let data = std::fs::read(path)?;
    Font::try_from_vec(data)
        .ok_or_else(|| PosterError::Font(format!("invalid TTF data in {}", path.display())))
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
