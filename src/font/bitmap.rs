//! Built-in bitmap typeface using the Spleen 12x24 font.
//!
//! Every character occupies one 12x24 cell scaled to the requested pixel
//! size, which makes measurement exact and platform independent. Characters
//! Spleen does not cover are drawn as a hollow box.

use spleen_font::{FONT_12X24, PSF2Font};

use super::{FontSpec, FontWeight, TextRaster, Typeface};

const CELL_WIDTH: usize = 12;
const CELL_HEIGHT: usize = 24;
/// Baseline row within the 24-row Spleen cell.
const CELL_BASELINE: f32 = 19.0;

/// Fixed-pitch typeface compiled into the binary.
#[derive(Debug, Clone, Copy, Default)]
pub struct BitmapTypeface;

impl BitmapTypeface {
    pub fn new() -> Self {
        Self
    }

    /// Horizontal advance of one character at `px`.
    pub fn cell_advance(px: f32) -> f32 {
        px * CELL_WIDTH as f32 / CELL_HEIGHT as f32
    }
}

/// A 12x24 on/off cell for each character, in order.
fn cells(text: &str, bold: bool) -> Vec<Vec<bool>> {
    let mut spleen = PSF2Font::new(FONT_12X24).ok();

    text.chars()
        .map(|ch| {
            let mut cell = vec![false; CELL_WIDTH * CELL_HEIGHT];
            let utf8 = ch.to_string();
            let glyph = spleen
                .as_mut()
                .and_then(|font| font.glyph_for_utf8(utf8.as_bytes()));

            match glyph {
                Some(glyph) => {
                    for (row_y, row) in glyph.enumerate() {
                        for (col_x, on) in row.enumerate() {
                            let idx = row_y * CELL_WIDTH + col_x;
                            if on && row_y < CELL_HEIGHT && col_x < CELL_WIDTH {
                                cell[idx] = true;
                            }
                        }
                    }
                }
                None if ch.is_whitespace() => {}
                None => draw_box(&mut cell),
            }

            if bold {
                embolden(&mut cell);
            }
            cell
        })
        .collect()
}

/// Hollow box for characters without a glyph.
fn draw_box(cell: &mut [bool]) {
    let (top, bottom) = (5, CELL_BASELINE as usize);
    for x in 1..CELL_WIDTH - 1 {
        cell[top * CELL_WIDTH + x] = true;
        cell[bottom * CELL_WIDTH + x] = true;
    }
    for y in top..=bottom {
        cell[y * CELL_WIDTH + 1] = true;
        cell[y * CELL_WIDTH + CELL_WIDTH - 2] = true;
    }
}

/// Double-strike: every inked pixel also inks its right neighbor.
fn embolden(cell: &mut [bool]) {
    for y in 0..CELL_HEIGHT {
        for x in (1..CELL_WIDTH).rev() {
            if cell[y * CELL_WIDTH + x - 1] {
                cell[y * CELL_WIDTH + x] = true;
            }
        }
    }
}

impl Typeface for BitmapTypeface {
    fn name(&self) -> &str {
        "spleen-12x24"
    }

    fn advance_width(&self, text: &str, font: FontSpec) -> f32 {
        text.chars().count() as f32 * Self::cell_advance(font.size)
    }

    fn ascent(&self, font: FontSpec) -> f32 {
        font.size * CELL_BASELINE / CELL_HEIGHT as f32
    }

    fn rasterize(&self, text: &str, font: FontSpec) -> TextRaster {
        if text.is_empty() || font.size <= 0.0 {
            return TextRaster::empty();
        }

        let cells = cells(text, font.weight == FontWeight::Bold);
        let scale = font.size / CELL_HEIGHT as f32;
        let width = self.advance_width(text, font).ceil().max(1.0) as usize;
        let height = font.size.ceil().max(1.0) as usize;
        let mut data = vec![0.0f32; width * height];

        // Nearest-neighbour sample of the source cell under each pixel center
        for y in 0..height {
            let sy = ((y as f32 + 0.5) / scale) as usize;
            if sy >= CELL_HEIGHT {
                continue;
            }
            for x in 0..width {
                let src_x = ((x as f32 + 0.5) / scale) as usize;
                let (index, sx) = (src_x / CELL_WIDTH, src_x % CELL_WIDTH);
                if let Some(cell) = cells.get(index) {
                    if cell[sy * CELL_WIDTH + sx] {
                        data[y * width + x] = 1.0;
                    }
                }
            }
        }

        TextRaster {
            width,
            height,
            origin_x: 0.0,
            baseline: CELL_BASELINE * scale,
            data,
        }
    }
}
