//! Greedy line wrapping with a character-level fallback.
#![allow(dead_code)]
//!
//! One break-scanning core (`scan_lines`) backs both entry points:
//! `wrap` materializes line strings for drawing; `lines_needed` only counts,
//! for the pre-draw sizing loop. Sharing the scanner makes the two agree on
//! line counts by construction, which the fit engine relies on.
//!
//! Break policy per line: start from a chars-per-line estimate, pull the cut
//! back to the last interior space if one exists, then shrink one character
//! at a time until the candidate fits. A single word wider than the line is
//! emitted as its own overflowing line rather than split below one character.

use crate::layout::measure::{Face, TextMeasurer};

// ────────────────────────────────────────────────────────────────────────────
// Output type
// ────────────────────────────────────────────────────────────────────────────

/// Wrapped text: lines in reading order plus the rendered width of the last
/// line (used to place the subtitle after the title).
#[derive(Debug, Clone)]
pub struct WrapResult {
    pub lines: Vec<String>,
    pub last_line_width: f32,
}

impl WrapResult {
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Public entry points
// ────────────────────────────────────────────────────────────────────────────

/// Wraps `text` into lines no wider than `max_width`, materializing the line
/// strings. A string that fits comes back as a single untouched line.
pub fn wrap(
    text: &str,
    max_width: f32,
    face: Face,
    size: u32,
    measurer: &dyn TextMeasurer,
) -> WrapResult {
    let mut lines: Vec<String> = Vec::new();
    scan_lines(text, max_width, face, size, measurer, |line| {
        lines.push(line.to_string());
    });

    let last_line_width = lines
        .last()
        .map(|l| measurer.measure(l, face, size))
        .unwrap_or(0.0);

    WrapResult {
        lines,
        last_line_width,
    }
}

/// Counts the lines `wrap` would produce for the same arguments, without
/// building any strings. Used by the fit engine on every sizing attempt.
pub fn lines_needed(
    text: &str,
    max_width: f32,
    face: Face,
    size: u32,
    measurer: &dyn TextMeasurer,
) -> usize {
    let mut count = 0usize;
    scan_lines(text, max_width, face, size, measurer, |_| count += 1);
    count
}

// ────────────────────────────────────────────────────────────────────────────
// Shared break scanner
// ────────────────────────────────────────────────────────────────────────────

/// Walks break points and invokes `emit` once per finished (trimmed) line.
fn scan_lines<F: FnMut(&str)>(
    text: &str,
    max_width: f32,
    face: Face,
    size: u32,
    measurer: &dyn TextMeasurer,
    mut emit: F,
) {
    // All-whitespace input collapses to a single empty line instead of
    // spilling empty trimmed fragments out of the break loop below.
    let text = text.trim();
    let total_width = measurer.measure(text, face, size);
    if total_width <= max_width {
        emit(text);
        return;
    }

    // Estimate how many characters fit on one line; never below 10 so the
    // scanner makes progress even on pathological measurements.
    let char_len = text.chars().count();
    let chars_per_line = ((char_len as f32 * (max_width / total_width)) as usize).max(10);

    let mut remainder = text;
    while !remainder.is_empty() {
        let mut take = byte_len_of_chars(remainder, chars_per_line);

        // Not at the end yet: prefer cutting at the last interior space,
        // keeping the space on this line.
        if take < remainder.len() {
            if let Some(last_space) = remainder[..take].rfind(' ') {
                if last_space > 0 {
                    take = last_space + 1;
                }
            }
        }

        // Character-level fallback: shrink until the candidate fits. Stops at
        // one character, so an unsplittable over-wide token still goes out as
        // a single overflowing line.
        while measurer.measure(&remainder[..take], face, size) > max_width
            && remainder[..take].chars().count() > 1
        {
            take = prev_char_boundary(remainder, take);
        }

        emit(remainder[..take].trim());
        remainder = remainder[take..].trim();
    }
}

/// Byte length of the first `n` characters of `s` (all of `s` if shorter).
fn byte_len_of_chars(s: &str, n: usize) -> usize {
    s.char_indices().nth(n).map(|(i, _)| i).unwrap_or(s.len())
}

/// Byte index of the character preceding byte index `idx` (which must sit on
/// a character boundary with at least one character before it).
fn prev_char_boundary(s: &str, idx: usize) -> usize {
    s[..idx]
        .char_indices()
        .last()
        .map(|(i, _)| i)
        .unwrap_or(0)
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
