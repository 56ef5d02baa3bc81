//! # Drawing Surface
//!
//! An off-screen RGBA pixel buffer with a small 2D-canvas style API:
//! fills, stroked rectangles, and text with a save/restore stack of
//! transform, opacity and fill color.
//!
//! ## Coordinate Model
//!
//! ```text
//! (0,0) ───────────── x ──────────────▶ (width,0)
//!   │
//!   y     text is positioned by the top of its em box ("top" baseline),
//!   │     horizontally by its left edge, center or right edge
//!   ▼
//! ```
//!
//! Text honours the current transform (translation and rotation). Fills and
//! rectangle strokes are always in device space.

use image::{ImageEncoder, Rgba, RgbaImage, codecs::png::PngEncoder};
use serde::{Serialize, Serializer};
use std::sync::Arc;

use super::fit::{TextMeasurer, wrap_lines};
use crate::error::AdcardError;
use crate::font::{FontSpec, Typeface};

/// Opaque sRGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Self = Self::rgb(0, 0, 0);
    pub const WHITE: Self = Self::rgb(0xFF, 0xFF, 0xFF);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// `#RRGGBB` form.
    pub fn to_hex(self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

impl Serialize for Color {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

/// Horizontal anchoring of text relative to its x coordinate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TextAlign {
    #[default]
    Left,
    Center,
    Right,
}

/// 2D affine transform in canvas order: `x' = a*x + c*y + e`, `y' = b*x + d*y + f`.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Transform {
    a: f32,
    b: f32,
    c: f32,
    d: f32,
    e: f32,
    f: f32,
}

impl Transform {
    const IDENTITY: Self = Self {
        a: 1.0,
        b: 0.0,
        c: 0.0,
        d: 1.0,
        e: 0.0,
        f: 0.0,
    };

    fn apply(&self, x: f32, y: f32) -> (f32, f32) {
        (
            self.a * x + self.c * y + self.e,
            self.b * x + self.d * y + self.f,
        )
    }

    fn translate(&mut self, dx: f32, dy: f32) {
        self.e += self.a * dx + self.c * dy;
        self.f += self.b * dx + self.d * dy;
    }

    fn rotate(&mut self, radians: f32) {
        let (sin, cos) = radians.sin_cos();
        let (a, b, c, d) = (self.a, self.b, self.c, self.d);
        self.a = a * cos + c * sin;
        self.b = b * cos + d * sin;
        self.c = c * cos - a * sin;
        self.d = d * cos - b * sin;
    }

    fn inverse(&self) -> Option<Self> {
        let det = self.a * self.d - self.b * self.c;
        if det.abs() < f32::EPSILON {
            return None;
        }
        let inv = 1.0 / det;
        Some(Self {
            a: self.d * inv,
            b: -self.b * inv,
            c: -self.c * inv,
            d: self.a * inv,
            e: (self.c * self.f - self.d * self.e) * inv,
            f: (self.b * self.e - self.a * self.f) * inv,
        })
    }
}

/// Mutable drawing state saved and restored as a unit.
#[derive(Debug, Clone, Copy)]
struct DrawState {
    transform: Transform,
    alpha: f32,
    fill: Color,
}

impl Default for DrawState {
    fn default() -> Self {
        Self {
            transform: Transform::IDENTITY,
            alpha: 1.0,
            fill: Color::BLACK,
        }
    }
}

/// Lines placed by [`Surface::fill_wrapped`].
#[derive(Debug, Clone, PartialEq)]
pub struct WrappedBlock {
    /// Each line with the y of its top edge.
    pub lines: Vec<(String, f32)>,
    /// First y below the block.
    pub end_y: f32,
}

/// Off-screen pixel buffer plus the typeface used to draw text onto it.
pub struct Surface {
    image: RgbaImage,
    typeface: Arc<dyn Typeface>,
    state: DrawState,
    stack: Vec<DrawState>,
}

impl Surface {
    pub fn new(width: u32, height: u32, typeface: Arc<dyn Typeface>) -> Self {
        Self {
            image: RgbaImage::from_pixel(width, height, Rgba([0xFF, 0xFF, 0xFF, 0xFF])),
            typeface,
            state: DrawState::default(),
            stack: Vec::new(),
        }
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    pub fn typeface(&self) -> &Arc<dyn Typeface> {
        &self.typeface
    }

    /// Color at a pixel, or `None` outside the buffer.
    pub fn pixel(&self, x: u32, y: u32) -> Option<Color> {
        if x >= self.width() || y >= self.height() {
            return None;
        }
        let Rgba([r, g, b, _]) = *self.image.get_pixel(x, y);
        Some(Color::rgb(r, g, b))
    }

    // ========================================================================
    // State
    // ========================================================================

    /// Push the current transform, opacity and fill color.
    pub fn save(&mut self) {
        self.stack.push(self.state);
    }

    /// Pop the most recently saved state. Unbalanced calls are ignored.
    pub fn restore(&mut self) {
        if let Some(state) = self.stack.pop() {
            self.state = state;
        }
    }

    pub fn translate(&mut self, dx: f32, dy: f32) {
        self.state.transform.translate(dx, dy);
    }

    /// Rotate subsequent text by `radians` (positive is clockwise on screen).
    pub fn rotate(&mut self, radians: f32) {
        self.state.transform.rotate(radians);
    }

    pub fn set_global_alpha(&mut self, alpha: f32) {
        self.state.alpha = alpha.clamp(0.0, 1.0);
    }

    pub fn set_fill(&mut self, color: Color) {
        self.state.fill = color;
    }

    /// Drop saved states and reset to identity, opaque, black.
    pub fn reset_state(&mut self) {
        self.state = DrawState::default();
        self.stack.clear();
    }

    // ========================================================================
    // Drawing
    // ========================================================================

    /// Paint every pixel with `color`, ignoring opacity.
    pub fn clear(&mut self, color: Color) {
        let px = Rgba([color.r, color.g, color.b, 0xFF]);
        for p in self.image.pixels_mut() {
            *p = px;
        }
    }

    /// Stroke the outline of a rectangle with a band `line_width` wide
    /// centered on its edges.
    pub fn stroke_rect(&mut self, x: f32, y: f32, w: f32, h: f32, line_width: f32, color: Color) {
        let half = line_width / 2.0;
        let (ox0, oy0, ox1, oy1) = (x - half, y - half, x + w + half, y + h + half);
        let (ix0, iy0, ix1, iy1) = (x + half, y + half, x + w - half, y + h - half);
        let alpha = self.state.alpha;

        let x_start = ox0.floor().max(0.0) as u32;
        let y_start = oy0.floor().max(0.0) as u32;
        let x_end = (ox1.ceil().max(0.0) as u32).min(self.width());
        let y_end = (oy1.ceil().max(0.0) as u32).min(self.height());

        for py in y_start..y_end {
            let cy = py as f32 + 0.5;
            if cy < oy0 || cy > oy1 {
                continue;
            }
            for px in x_start..x_end {
                let cx = px as f32 + 0.5;
                if cx < ox0 || cx > ox1 {
                    continue;
                }
                let inside_inner = cx > ix0 && cx < ix1 && cy > iy0 && cy < iy1;
                if !inside_inner {
                    self.blend(px, py, color, alpha);
                }
            }
        }
    }

    /// Draw one line of text with the current fill, opacity and transform.
    ///
    /// `y` is the top of the em box.
    pub fn fill_text(&mut self, text: &str, x: f32, y: f32, font: FontSpec, align: TextAlign) {
        let raster = self.typeface.rasterize(text, font);
        if raster.is_empty() {
            return;
        }

        let advance = self.typeface.advance_width(text, font);
        let pen_x = match align {
            TextAlign::Left => x,
            TextAlign::Center => x - advance / 2.0,
            TextAlign::Right => x - advance,
        };
        let baseline_y = y + self.typeface.ascent(font);

        // Raster top-left corner in user space
        let left = pen_x - raster.origin_x;
        let top = baseline_y - raster.baseline;

        let transform = self.state.transform;
        let Some(inverse) = transform.inverse() else {
            return;
        };

        // Device-space bounding box of the transformed raster
        let (rw, rh) = (raster.width as f32, raster.height as f32);
        let corners = [
            transform.apply(left, top),
            transform.apply(left + rw, top),
            transform.apply(left, top + rh),
            transform.apply(left + rw, top + rh),
        ];
        let min_x = corners.iter().map(|c| c.0).fold(f32::MAX, f32::min);
        let max_x = corners.iter().map(|c| c.0).fold(f32::MIN, f32::max);
        let min_y = corners.iter().map(|c| c.1).fold(f32::MAX, f32::min);
        let max_y = corners.iter().map(|c| c.1).fold(f32::MIN, f32::max);

        let x_start = min_x.floor().max(0.0) as u32;
        let y_start = min_y.floor().max(0.0) as u32;
        let x_end = (max_x.ceil().max(0.0) as u32).min(self.width());
        let y_end = (max_y.ceil().max(0.0) as u32).min(self.height());

        let color = self.state.fill;
        let alpha = self.state.alpha;

        for py in y_start..y_end {
            for px in x_start..x_end {
                let (ux, uy) = inverse.apply(px as f32 + 0.5, py as f32 + 0.5);
                let coverage = sample_bilinear(&raster, ux - left, uy - top);
                if coverage > 0.0 {
                    self.blend(px, py, color, coverage * alpha);
                }
            }
        }
    }

    /// Word-wrap `text` to `max_width` and draw each line centered on `x`,
    /// `line_height` apart starting at `y`.
    pub fn fill_wrapped(
        &mut self,
        text: &str,
        x: f32,
        y: f32,
        max_width: f32,
        line_height: f32,
        font: FontSpec,
    ) -> WrappedBlock {
        let mut placed = Vec::new();
        let mut cursor = y;

        for line in wrap_lines(&*self, text, max_width, font) {
            let line = line.trim_end().to_string();
            self.fill_text(&line, x, cursor, font, TextAlign::Center);
            placed.push((line, cursor));
            cursor += line_height;
        }

        WrappedBlock {
            lines: placed,
            end_y: cursor,
        }
    }

    // ========================================================================
    // Output
    // ========================================================================

    /// Encode the buffer as PNG.
    pub fn to_png(&self) -> Result<Vec<u8>, AdcardError> {
        let mut png = Vec::new();
        PngEncoder::new(&mut png)
            .write_image(
                self.image.as_raw(),
                self.width(),
                self.height(),
                image::ExtendedColorType::Rgba8,
            )
            .map_err(|e| AdcardError::Image(format!("Failed to encode PNG: {}", e)))?;
        Ok(png)
    }

    /// Packed 8-bit RGB bytes, row-major. Alpha is dropped (the surface is opaque).
    pub fn to_rgb_bytes(&self) -> Vec<u8> {
        self.image
            .pixels()
            .flat_map(|Rgba([r, g, b, _])| [*r, *g, *b])
            .collect()
    }

    /// Source-over blend of a solid color at `alpha` into one pixel.
    #[inline]
    fn blend(&mut self, x: u32, y: u32, color: Color, alpha: f32) {
        let alpha = alpha.clamp(0.0, 1.0);
        let p = self.image.get_pixel_mut(x, y);
        let mix = |dst: u8, src: u8| -> u8 {
            (dst as f32 * (1.0 - alpha) + src as f32 * alpha).round() as u8
        };
        p.0 = [mix(p.0[0], color.r), mix(p.0[1], color.g), mix(p.0[2], color.b), 0xFF];
    }
}

impl TextMeasurer for Surface {
    fn measure_text(&self, text: &str, font: FontSpec) -> f32 {
        self.typeface.advance_width(text, font)
    }
}

/// Bilinear coverage lookup at continuous raster coordinates.
fn sample_bilinear(raster: &crate::font::TextRaster, u: f32, v: f32) -> f32 {
    // Pixel centers sit at +0.5
    let fx = u - 0.5;
    let fy = v - 0.5;
    if fx < -1.0 || fy < -1.0 || fx > raster.width as f32 || fy > raster.height as f32 {
        return 0.0;
    }
    let x0 = fx.floor();
    let y0 = fy.floor();
    let tx = fx - x0;
    let ty = fy - y0;
    let (x0, y0) = (x0 as i64, y0 as i64);

    let c00 = raster.coverage(x0, y0);
    let c10 = raster.coverage(x0 + 1, y0);
    let c01 = raster.coverage(x0, y0 + 1);
    let c11 = raster.coverage(x0 + 1, y0 + 1);

    let top = c00 + (c10 - c00) * tx;
    let bottom = c01 + (c11 - c01) * tx;
    top + (bottom - top) * ty
}
