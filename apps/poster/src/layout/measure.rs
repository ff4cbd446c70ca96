//! Text measurement capability + static Helvetica metric tables.
#![allow(dead_code)]
//!
//! Layout decisions must be deterministic across hosts, so the planning path
//! never measures through a rasterizer. Instead it uses static per-face
//! character-width tables (standard Helvetica AFM widths, em units at 1pt).
//! The raster backend draws with whatever TTF is resolved at runtime; the
//! small mismatch is absorbed the same way wrapped lines absorb trailing
//! slack.
//!
//! All tables cover ASCII 0x20..=0x7E (95 printable characters).
//! Index = (char as usize) - 32. Non-ASCII falls back to `average_char_width`.

use serde::{Deserialize, Serialize};

// ────────────────────────────────────────────────────────────────────────────
// Face + measurement trait
// ────────────────────────────────────────────────────────────────────────────

/// The two poster faces: `Bold` for the album title, `Regular` for everything else.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Face {
    Regular,
    Bold,
}

/// Measurement capability consumed by the wrapper, the fit engine, and the
/// renderer. `size` is the font size in points; the returned width is in
/// page points.
///
/// Implementations must be pure: the same `(text, face, size)` always yields
/// the same width.
pub trait TextMeasurer {
    fn measure(&self, text: &str, face: Face, size: u32) -> f32;
}

// ────────────────────────────────────────────────────────────────────────────
// Metric tables
// ────────────────────────────────────────────────────────────────────────────

/// Static character-width table for one face.
///
/// Widths are em fractions (AFM width / 1000); multiply by the font size in
/// points to get a width in points.
pub struct FaceMetricTable {
    widths: [f32; 95],
    /// Fallback width for codepoints outside 0x20..=0x7E.
    pub average_char_width: f32,
}

impl FaceMetricTable {
    /// Measures a string in em units (at 1pt).
    pub fn measure_em(&self, s: &str) -> f32 {
        s.chars()
            .map(|c| {
                let code = c as usize;
                if (32..=126).contains(&code) {
                    self.widths[code - 32]
                } else {
                    self.average_char_width
                }
            })
            .sum()
    }
}

/// Helvetica (regular) widths, standard AFM values / 1000.
#[rustfmt::skip]
const HELVETICA_WIDTHS: [f32; 95] = [
        // sp     !      "      #      $      %      &      '      (      )      *      +      ,      -      .      /
        0.278, 0.278, 0.355, 0.556, 0.556, 0.889, 0.667, 0.191, 0.333, 0.333, 0.389, 0.584, 0.278, 0.333, 0.278, 0.278,
        // 0      1      2      3      4      5      6      7      8      9
        0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556,
        // :      ;      <      =      >      ?      @
        0.278, 0.278, 0.584, 0.584, 0.584, 0.556, 1.015,
        // A      B      C      D      E      F      G      H      I      J      K      L      M
        0.667, 0.667, 0.722, 0.722, 0.667, 0.611, 0.778, 0.722, 0.278, 0.500, 0.667, 0.556, 0.833,
        // N      O      P      Q      R      S      T      U      V      W      X      Y      Z
        0.722, 0.778, 0.667, 0.778, 0.722, 0.667, 0.611, 0.722, 0.667, 0.944, 0.667, 0.667, 0.611,
        // [      \      ]      ^      _      `
        0.278, 0.278, 0.278, 0.469, 0.556, 0.333,
        // a      b      c      d      e      f      g      h      i      j      k      l      m
        0.556, 0.556, 0.500, 0.556, 0.556, 0.278, 0.556, 0.556, 0.222, 0.222, 0.500, 0.222, 0.833,
        // n      o      p      q      r      s      t      u      v      w      x      y      z
        0.556, 0.556, 0.556, 0.556, 0.333, 0.500, 0.278, 0.556, 0.500, 0.722, 0.500, 0.500, 0.500,
        // {      |      }      ~
        0.334, 0.260, 0.334, 0.584,
];

/// Helvetica-Bold widths, standard AFM values / 1000.
#[rustfmt::skip]
const HELVETICA_BOLD_WIDTHS: [f32; 95] = [
        // sp     !      "      #      $      %      &      '      (      )      *      +      ,      -      .      /
        0.278, 0.333, 0.474, 0.556, 0.556, 0.889, 0.722, 0.238, 0.333, 0.333, 0.389, 0.584, 0.278, 0.333, 0.278, 0.278,
        // 0      1      2      3      4      5      6      7      8      9
        0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556,
        // :      ;      <      =      >      ?      @
        0.333, 0.333, 0.584, 0.584, 0.584, 0.611, 0.975,
        // A      B      C      D      E      F      G      H      I      J      K      L      M
        0.722, 0.722, 0.722, 0.722, 0.667, 0.611, 0.778, 0.722, 0.278, 0.556, 0.722, 0.611, 0.833,
        // N      O      P      Q      R      S      T      U      V      W      X      Y      Z
        0.722, 0.778, 0.667, 0.778, 0.722, 0.667, 0.611, 0.722, 0.667, 0.944, 0.667, 0.667, 0.611,
        // [      \      ]      ^      _      `
        0.333, 0.278, 0.333, 0.584, 0.556, 0.333,
        // a      b      c      d      e      f      g      h      i      j      k      l      m
        0.556, 0.611, 0.556, 0.611, 0.556, 0.333, 0.611, 0.611, 0.278, 0.278, 0.556, 0.278, 0.889,
        // n      o      p      q      r      s      t      u      v      w      x      y      z
        0.611, 0.611, 0.611, 0.611, 0.389, 0.556, 0.333, 0.611, 0.556, 0.778, 0.556, 0.556, 0.500,
        // {      |      }      ~
        0.389, 0.280, 0.389, 0.584,
];

static HELVETICA_TABLE: FaceMetricTable = FaceMetricTable {
    widths: HELVETICA_WIDTHS,
    average_char_width: 0.536,
};

static HELVETICA_BOLD_TABLE: FaceMetricTable = FaceMetricTable {
    widths: HELVETICA_BOLD_WIDTHS,
    average_char_width: 0.562,
};

/// Returns the static metric table for a face.
pub fn get_metrics(face: Face) -> &'static FaceMetricTable {
    match face {
        Face::Regular => &HELVETICA_TABLE,
        Face::Bold => &HELVETICA_BOLD_TABLE,
    }
}

/// The production measurer: Helvetica metric tables scaled by font size.
#[derive(Debug, Clone, Copy, Default)]
pub struct HelveticaMeasurer;

impl TextMeasurer for HelveticaMeasurer {
    fn measure(&self, text: &str, face: Face, size: u32) -> f32 {
        get_metrics(face).measure_em(text) * size as f32
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
