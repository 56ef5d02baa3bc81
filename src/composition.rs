//! # Composition
//!
//! The editable state of one classified card: which template, what text, and
//! the style knobs. A composition has no identity; it is replaced wholesale
//! on every edit and re-rendered from scratch.
//!
//! Deserializes from JSON with every field optional:
//!
//! ```
//! use adcard::composition::{Composition, PhoneLayout};
//!
//! let c: Composition = serde_json::from_str(r#"{"template": 2, "title": "For sale"}"#).unwrap();
//! assert_eq!(c.template, Some(2));
//! assert_eq!(c.phone_layout, PhoneLayout::Vertical);
//! assert_eq!(c.style.title_size, 56.0);
//! ```

use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;

/// How multiple phone numbers are arranged below the body.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PhoneLayout {
    /// One number per line.
    #[default]
    Vertical,
    /// All numbers on one line, joined with `" / "`.
    Horizontal,
}

impl PhoneLayout {
    /// Parse a layout name as typed on the command line.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "vertical" | "v" => Some(Self::Vertical),
            "horizontal" | "h" => Some(Self::Horizontal),
            _ => None,
        }
    }
}

/// Font sizes and vertical spacing, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StyleParams {
    pub title_size: f32,
    pub body_size: f32,
    pub phone_size: f32,
    /// Gap between the title and the body. Only applied when a body exists.
    pub title_body_spacing: f32,
    /// Gap above the phone section. Only applied when phones exist.
    pub body_phone_spacing: f32,
}

impl StyleParams {
    pub const TITLE_SIZE_RANGE: RangeInclusive<f32> = 30.0..=80.0;
    pub const BODY_SIZE_RANGE: RangeInclusive<f32> = 16.0..=60.0;
    pub const PHONE_SIZE_RANGE: RangeInclusive<f32> = 20.0..=70.0;
    pub const SPACING_RANGE: RangeInclusive<f32> = 0.0..=80.0;

    /// Clamp every field into the range the editing controls allow.
    ///
    /// Applied where values enter the program (CLI flags, HTTP bodies).
    /// The layout itself trusts whatever it is given.
    pub fn clamped(self) -> Self {
        fn clamp(v: f32, range: RangeInclusive<f32>) -> f32 {
            if v.is_nan() {
                return *range.start();
            }
            v.clamp(*range.start(), *range.end())
        }

        Self {
            title_size: clamp(self.title_size, Self::TITLE_SIZE_RANGE),
            body_size: clamp(self.body_size, Self::BODY_SIZE_RANGE),
            phone_size: clamp(self.phone_size, Self::PHONE_SIZE_RANGE),
            title_body_spacing: clamp(self.title_body_spacing, Self::SPACING_RANGE),
            body_phone_spacing: clamp(self.body_phone_spacing, Self::SPACING_RANGE),
        }
    }
}

impl Default for StyleParams {
    fn default() -> Self {
        Self {
            title_size: 56.0,
            body_size: 36.0,
            phone_size: 40.0,
            title_body_spacing: 10.0,
            body_phone_spacing: 30.0,
        }
    }
}

/// Everything the card is rendered from.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Composition {
    /// Selected template id; nothing renders until one is chosen.
    pub template: Option<u8>,
    /// Required; a blank title renders nothing.
    pub title: String,
    pub body: String,
    /// Raw phone input, comma or newline separated.
    pub phones: String,
    pub phone_layout: PhoneLayout,
    /// Overlay a diagonal "PREVIEW" mark.
    pub watermark: bool,
    pub style: StyleParams,
}

impl Composition {
    /// Phone numbers parsed from the raw input.
    pub fn phone_numbers(&self) -> Vec<String> {
        parse_phone_numbers(&self.phones)
    }

    /// The same composition with style values clamped to their ranges.
    pub fn sanitized(mut self) -> Self {
        self.style = self.style.clamped();
        self
    }
}

/// Split raw phone input on commas and newlines.
///
/// Entries are trimmed and empty ones dropped; order is preserved.
///
/// ```
/// use adcard::composition::parse_phone_numbers;
///
/// assert_eq!(parse_phone_numbers("123,456\n789"), vec!["123", "456", "789"]);
/// assert!(parse_phone_numbers(" \n , ").is_empty());
/// ```
pub fn parse_phone_numbers(raw: &str) -> Vec<String> {
    raw.split(|c: char| c == ',' || c == '\n')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}
