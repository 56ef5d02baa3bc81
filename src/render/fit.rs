//! # Text Fitting
//!
//! Shrink-to-fit font sizing and greedy word wrap.
//!
//! Both algorithms only need to know how wide a string is, so they are
//! written against [`TextMeasurer`] instead of a concrete surface. Anything
//! that can measure text (a [`Surface`](super::Surface), a bare
//! [`Typeface`], a fixed-pitch stub in tests) can drive them.

use crate::font::{FontSpec, FontWeight, Typeface};

/// Smallest size [`fit_font_size`] will shrink to.
pub const MIN_FONT_SIZE: f32 = 10.0;

/// Decrement applied per shrink step.
pub const FONT_SIZE_STEP: f32 = 0.5;

/// Width of rendered text for a given font.
pub trait TextMeasurer {
    fn measure_text(&self, text: &str, font: FontSpec) -> f32;
}

impl<T: Typeface + ?Sized> TextMeasurer for T {
    fn measure_text(&self, text: &str, font: FontSpec) -> f32 {
        self.advance_width(text, font)
    }
}

/// Largest size at or below `base_size` at which `text` fits `max_width`.
///
/// Steps down by [`FONT_SIZE_STEP`] and stops at [`MIN_FONT_SIZE`]; text
/// that still overflows at the floor is returned at the floor and allowed
/// to overflow.
///
/// ```
/// use adcard::font::{BitmapTypeface, FontWeight};
/// use adcard::render::fit::fit_font_size;
///
/// let face = BitmapTypeface::new();
/// // 10 chars at half-size advance: fits 100px at size 20
/// assert_eq!(fit_font_size(&face, "0123456789", 100.0, 40.0, FontWeight::Bold), 20.0);
/// ```
pub fn fit_font_size<M: TextMeasurer + ?Sized>(
    measurer: &M,
    text: &str,
    max_width: f32,
    base_size: f32,
    weight: FontWeight,
) -> f32 {
    let mut size = base_size;
    let font = |size| FontSpec { size, weight };

    while size > MIN_FONT_SIZE && measurer.measure_text(text, font(size)) > max_width {
        size = (size - FONT_SIZE_STEP).max(MIN_FONT_SIZE);
    }

    size
}

/// Break `text` into lines no wider than `max_width`, splitting on spaces.
///
/// Words are never split: a word wider than `max_width` gets a line of its
/// own and overflows it. Runs of spaces collapse.
pub fn wrap_lines<M: TextMeasurer + ?Sized>(
    measurer: &M,
    text: &str,
    max_width: f32,
    font: FontSpec,
) -> Vec<String> {
    let mut lines = Vec::new();
    let mut line = String::new();

    for word in text.split(' ').filter(|w| !w.is_empty()) {
        if line.is_empty() {
            line.push_str(word);
            continue;
        }

        let candidate = format!("{} {}", line, word);
        if measurer.measure_text(&candidate, font) > max_width {
            lines.push(std::mem::take(&mut line));
            line.push_str(word);
        } else {
            line = candidate;
        }
    }

    if !line.is_empty() {
        lines.push(line);
    }

    lines
}
