//! TrueType rendering via ab_glyph.
//!
//! Fonts are loaded from disk at startup rather than embedded, so a
//! deployment can pick a face that covers its script (Kannada, Devanagari,
//! Latin...). Glyphs are placed by advance width plus pair kerning; there is
//! no complex-script shaping.

use ab_glyph::{Font, FontArc, GlyphId, OutlinedGlyph, ScaleFont, point};
use std::path::Path;

use super::{FontSpec, FontWeight, TextRaster, Typeface};
use crate::error::AdcardError;

/// A regular face plus an optional bold face.
pub struct TtfTypeface {
    name: String,
    regular: FontArc,
    bold: Option<FontArc>,
}

impl TtfTypeface {
    /// Load faces from font files.
    pub fn from_files(regular: &Path, bold: Option<&Path>) -> Result<Self, AdcardError> {
        let read = |path: &Path| {
            std::fs::read(path).map_err(|e| {
                AdcardError::Font(format!("Failed to read {}: {}", path.display(), e))
            })
        };

        let regular_bytes = read(regular)?;
        let bold_bytes = bold.map(read).transpose()?;
        let name = regular
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "ttf".to_string());

        Self::from_bytes(name, regular_bytes, bold_bytes)
    }

    /// Build from in-memory font data.
    pub fn from_bytes(
        name: impl Into<String>,
        regular: Vec<u8>,
        bold: Option<Vec<u8>>,
    ) -> Result<Self, AdcardError> {
        let parse = |bytes: Vec<u8>| {
            FontArc::try_from_vec(bytes)
                .map_err(|e| AdcardError::Font(format!("Invalid font data: {}", e)))
        };

        Ok(Self {
            name: name.into(),
            regular: parse(regular)?,
            bold: bold.map(parse).transpose()?,
        })
    }

    /// Pick the face for a weight. The flag is true when bold has to be
    /// synthesized by over-striking the regular face.
    fn face(&self, weight: FontWeight) -> (&FontArc, bool) {
        match (weight, &self.bold) {
            (FontWeight::Bold, Some(bold)) => (bold, false),
            (FontWeight::Bold, None) => (&self.regular, true),
            (FontWeight::Regular, _) => (&self.regular, false),
        }
    }

    /// Glyph ids with their pen x positions, plus the final pen position.
    fn layout(font: &FontArc, text: &str, px: f32) -> (Vec<(GlyphId, f32)>, f32) {
        let scaled = font.as_scaled(px);
        let mut glyphs = Vec::with_capacity(text.len());
        let mut caret_x = 0.0f32;
        let mut prev: Option<GlyphId> = None;

        for ch in text.chars() {
            let glyph_id = font.glyph_id(ch);
            if let Some(prev) = prev {
                caret_x += scaled.kern(prev, glyph_id);
            }
            glyphs.push((glyph_id, caret_x));
            caret_x += scaled.h_advance(glyph_id);
            prev = Some(glyph_id);
        }

        (glyphs, caret_x)
    }
}

/// Horizontal over-strike distance for synthetic bold.
fn embolden_offset(px: f32) -> f32 {
    (px / 28.0).max(1.0)
}

impl Typeface for TtfTypeface {
    fn name(&self) -> &str {
        &self.name
    }

    fn advance_width(&self, text: &str, font: FontSpec) -> f32 {
        if text.is_empty() {
            return 0.0;
        }
        let (face, synthetic) = self.face(font.weight);
        let (_, width) = Self::layout(face, text, font.size);
        if synthetic {
            width + embolden_offset(font.size)
        } else {
            width
        }
    }

    fn ascent(&self, font: FontSpec) -> f32 {
        let (face, _) = self.face(font.weight);
        face.as_scaled(font.size).ascent()
    }

    fn rasterize(&self, text: &str, font: FontSpec) -> TextRaster {
        let (face, synthetic) = self.face(font.weight);
        let (glyphs, _) = Self::layout(face, text, font.size);

        // Baseline sits at y = 0 in glyph space
        let outlined: Vec<OutlinedGlyph> = glyphs
            .iter()
            .filter_map(|&(id, x)| {
                face.outline_glyph(id.with_scale_and_position(font.size, point(x, 0.0)))
            })
            .collect();

        if outlined.is_empty() {
            return TextRaster::empty();
        }

        let strike = if synthetic {
            embolden_offset(font.size)
        } else {
            0.0
        };

        let mut min_x = f32::MAX;
        let mut min_y = f32::MAX;
        let mut max_x = f32::MIN;
        let mut max_y = f32::MIN;
        for g in &outlined {
            let b = g.px_bounds();
            min_x = min_x.min(b.min.x);
            min_y = min_y.min(b.min.y);
            max_x = max_x.max(b.max.x + strike);
            max_y = max_y.max(b.max.y);
        }
        let min_x = min_x.floor();
        let min_y = min_y.floor();
        let width = (max_x.ceil() - min_x).max(1.0) as usize;
        let height = (max_y.ceil() - min_y).max(1.0) as usize;

        let mut data = vec![0.0f32; width * height];
        let passes: &[f32] = if synthetic { &[0.0, strike] } else { &[0.0] };

        for g in &outlined {
            let bounds = g.px_bounds();
            for &dx in passes {
                let left = (bounds.min.x + dx - min_x).round() as i64;
                let top = (bounds.min.y - min_y) as i64;
                g.draw(|px, py, coverage| {
                    let x = left + px as i64;
                    let y = top + py as i64;
                    if x >= 0 && x < width as i64 && y >= 0 && y < height as i64 {
                        let idx = y as usize * width + x as usize;
                        // Accumulate coverage (clamped)
                        data[idx] = (data[idx] + coverage).min(1.0);
                    }
                });
            }
        }

        TextRaster {
            width,
            height,
            origin_x: -min_x,
            baseline: -min_y,
            data,
        }
    }
}
