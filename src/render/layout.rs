//! # Card Layout
//!
//! Paints a [`Composition`] onto a [`Surface`] top to bottom:
//!
//! ```text
//! ┌──────────────────── 680 ────────────────────┐
//! │ 35 pad                                       │
//! │        50                                    │
//! │   ┌──────────── TITLE (bold, fit) ────────┐  │
//! │   └───────────────────────────────────────┘  │
//! │        title_body_spacing   (body only)      │ 565
//! │   ┌──────────── body (wrapped) ───────────┐  │
//! │   └───────────────────────────────────────┘  │
//! │        body_phone_spacing   (phones only)    │
//! │            98xxxxxxxx  (bold, fit)           │
//! └──────────────────────────────────────────────┘
//! ```
//!
//! Every call repaints the whole card; nothing is carried over from a
//! previous render.

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use serde::Serialize;
use std::f32::consts::PI;
use std::sync::Arc;

use super::fit::fit_font_size;
use super::surface::{Color, Surface, TextAlign};
use crate::composition::{Composition, PhoneLayout};
use crate::error::AdcardError;
use crate::font::{FontSpec, FontWeight, Typeface};
use crate::template;

/// Card width in pixels.
pub const CARD_WIDTH: u32 = 680;
/// Card height in pixels.
pub const CARD_HEIGHT: u32 = 565;
/// Horizontal and top padding inside the card.
pub const PADDING: f32 = 35.0;
/// Gap between the top padding and the first title line.
pub const TITLE_OFFSET: f32 = 50.0;
/// Extra leading added to the fitted title size.
pub const TITLE_LINE_GAP: f32 = 10.0;
/// Extra leading added to the body size.
pub const BODY_LINE_GAP: f32 = 10.0;
/// Gap after each phone line.
pub const PHONE_LINE_GAP: f32 = 15.0;
/// Separator for horizontally laid out phone numbers.
pub const PHONE_SEPARATOR: &str = " / ";
/// Border stroke is this many times the template's border width.
pub const BORDER_STROKE_FACTOR: f32 = 3.0;

pub const WATERMARK_TEXT: &str = "PREVIEW";
pub const WATERMARK_SIZE: f32 = 70.0;
pub const WATERMARK_ALPHA: f32 = 0.08;
pub const WATERMARK_ANGLE: f32 = -PI / 6.0;

/// Which part of the card a line belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LineKind {
    Title,
    Body,
    Phone,
    Watermark,
}

/// One line of text as drawn.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlacedLine {
    pub kind: LineKind,
    pub text: String,
    pub font_size: f32,
    /// Center x (watermark: rotation origin)
    pub x: f32,
    /// Top of the line (watermark: rotation origin)
    pub y: f32,
}

/// What the layout placed, in drawing order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LayoutReport {
    pub lines: Vec<PlacedLine>,
    /// Cursor position after the last content line.
    pub cursor_end: f32,
}

impl LayoutReport {
    pub fn lines_of(&self, kind: LineKind) -> impl Iterator<Item = &PlacedLine> {
        self.lines.iter().filter(move |l| l.kind == kind)
    }
}

/// A finished render.
#[derive(Debug, Clone, Serialize)]
pub struct Artifact {
    pub width: u32,
    pub height: u32,
    /// `data:image/png;base64,...`
    pub data_url: String,
    pub layout: LayoutReport,
    #[serde(skip)]
    pub png: Vec<u8>,
}

/// Render a composition on a fresh card-sized surface.
///
/// Returns `Ok(None)` when there is nothing to draw: no template selected,
/// an unknown template id, or a blank title.
pub fn recompute(
    composition: &Composition,
    typeface: Arc<dyn Typeface>,
) -> Result<Option<Artifact>, AdcardError> {
    let mut surface = Surface::new(CARD_WIDTH, CARD_HEIGHT, typeface);
    render_into(&mut surface, composition)
}

/// Repaint `surface` from `composition` and snapshot it.
pub fn render_into(
    surface: &mut Surface,
    composition: &Composition,
) -> Result<Option<Artifact>, AdcardError> {
    let Some(layout) = paint(surface, composition) else {
        return Ok(None);
    };

    let png = surface.to_png()?;
    let data_url = png_data_url(&png);
    tracing::debug!(
        lines = layout.lines.len(),
        bytes = png.len(),
        "rendered classified card"
    );

    Ok(Some(Artifact {
        width: surface.width(),
        height: surface.height(),
        data_url,
        layout,
        png,
    }))
}

/// `data:` URL for PNG bytes.
pub fn png_data_url(png: &[u8]) -> String {
    format!("data:image/png;base64,{}", BASE64.encode(png))
}

/// Draw the card. Leaves the surface untouched and returns `None` when
/// there is nothing to draw.
pub fn paint(surface: &mut Surface, composition: &Composition) -> Option<LayoutReport> {
    let template = composition.template.and_then(template::by_id)?;
    if composition.title.trim().is_empty() {
        return None;
    }

    let style = &composition.style;
    let width = surface.width() as f32;
    let height = surface.height() as f32;
    let center_x = width / 2.0;
    let content_width = width - 2.0 * PADDING;
    let mut report = LayoutReport::default();

    // Card
    surface.reset_state();
    surface.clear(template.background);
    let inset = template.border_width / 2.0;
    surface.stroke_rect(
        inset,
        inset,
        width - template.border_width,
        height - template.border_width,
        template.border_width * BORDER_STROKE_FACTOR,
        template.border,
    );
    surface.set_fill(Color::BLACK);

    // Title
    let title = composition.title.trim();
    let title_size = fit_font_size(&*surface, title, content_width, style.title_size, FontWeight::Bold);
    let block = surface.fill_wrapped(
        title,
        center_x,
        PADDING + TITLE_OFFSET,
        content_width,
        title_size + TITLE_LINE_GAP,
        FontSpec::bold(title_size),
    );
    push_lines(&mut report, LineKind::Title, title_size, center_x, block.lines);
    let mut cursor = block.end_y;

    // Body
    let body = composition.body.trim();
    if !body.is_empty() {
        cursor += style.title_body_spacing;
        let block = surface.fill_wrapped(
            body,
            center_x,
            cursor,
            content_width,
            style.body_size + BODY_LINE_GAP,
            FontSpec::regular(style.body_size),
        );
        push_lines(&mut report, LineKind::Body, style.body_size, center_x, block.lines);
        cursor = block.end_y;
    }

    // Phones
    let phones = composition.phone_numbers();
    if !phones.is_empty() {
        cursor += style.body_phone_spacing;
        let lines = match composition.phone_layout {
            PhoneLayout::Horizontal => vec![phones.join(PHONE_SEPARATOR)],
            PhoneLayout::Vertical => phones,
        };
        for line in lines {
            let size = fit_font_size(&*surface, &line, content_width, style.phone_size, FontWeight::Bold);
            surface.fill_text(&line, center_x, cursor, FontSpec::bold(size), TextAlign::Center);
            report.lines.push(PlacedLine {
                kind: LineKind::Phone,
                text: line,
                font_size: size,
                x: center_x,
                y: cursor,
            });
            cursor += size + PHONE_LINE_GAP;
        }
    }

    report.cursor_end = cursor;

    if composition.watermark {
        draw_watermark(surface, &mut report);
    }

    Some(report)
}

fn push_lines(
    report: &mut LayoutReport,
    kind: LineKind,
    font_size: f32,
    x: f32,
    lines: Vec<(String, f32)>,
) {
    report
        .lines
        .extend(lines.into_iter().map(|(text, y)| PlacedLine {
            kind,
            text,
            font_size,
            x,
            y,
        }));
}

/// Diagonal translucent "PREVIEW" across the card center.
fn draw_watermark(surface: &mut Surface, report: &mut LayoutReport) {
    let cx = surface.width() as f32 / 2.0;
    let cy = surface.height() as f32 / 2.0;

    surface.save();
    surface.translate(cx, cy);
    surface.rotate(WATERMARK_ANGLE);
    surface.set_global_alpha(WATERMARK_ALPHA);
    surface.set_fill(Color::BLACK);
    // Vertically centered on the rotation origin
    surface.fill_text(
        WATERMARK_TEXT,
        0.0,
        -WATERMARK_SIZE / 2.0,
        FontSpec::bold(WATERMARK_SIZE),
        TextAlign::Center,
    );
    surface.restore();

    report.lines.push(PlacedLine {
        kind: LineKind::Watermark,
        text: WATERMARK_TEXT.to_string(),
        font_size: WATERMARK_SIZE,
        x: cx,
        y: cy,
    });
}
