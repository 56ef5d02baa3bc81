//! # Render Tests
//!
//! End-to-end checks of the card pipeline using the built-in bitmap
//! typeface, whose metrics are exact on every platform:
//!
//! - determinism of PNG output and data URLs
//! - fit and wrap properties against real surfaces
//! - layout ordering between title, body and phones
//! - PDF export geometry
//!
//! The TrueType section runs the same pipeline against an installed system
//! font and skips itself when none is present.

use pretty_assertions::assert_eq;
use std::sync::Arc;

use adcard::composition::{Composition, PhoneLayout, StyleParams};
use adcard::editor::Editor;
use adcard::export::{self, Orientation, PdfGeometry};
use adcard::font::{
    BitmapTypeface, FontSpec, FontWeight, SYSTEM_FONT_CANDIDATES, TtfTypeface, Typeface,
};
use adcard::render::fit::{MIN_FONT_SIZE, fit_font_size, wrap_lines};
use adcard::render::layout::{
    self, BODY_LINE_GAP, CARD_HEIGHT, CARD_WIDTH, PADDING, PHONE_LINE_GAP, TITLE_LINE_GAP,
    TITLE_OFFSET,
};
use adcard::render::{Color, LineKind, Surface, TextAlign, recompute};
use std::path::Path;

// ============================================================================
// HELPER FUNCTIONS
// ============================================================================

fn face() -> Arc<dyn Typeface> {
    Arc::new(BitmapTypeface::new())
}

fn full_composition() -> Composition {
    Composition {
        template: Some(2),
        title: "Independent house for sale in Mysuru".to_string(),
        body: "Two floors, four bedrooms, borewell and covered parking. Close to the ring road."
            .to_string(),
        phones: "9876543210\n9123456780, 0821-2345678".to_string(),
        phone_layout: PhoneLayout::Vertical,
        watermark: true,
        style: StyleParams::default(),
    }
}

fn texts(layout: &layout::LayoutReport, kind: LineKind) -> Vec<String> {
    layout.lines_of(kind).map(|l| l.text.clone()).collect()
}

// ============================================================================
// DETERMINISM
// ============================================================================

#[test]
fn test_repeated_renders_are_identical() {
    let c = full_composition();
    let a = recompute(&c, face()).unwrap().unwrap();
    let b = recompute(&c, face()).unwrap().unwrap();
    assert_eq!(a.png, b.png);
    assert_eq!(a.data_url, b.data_url);
    assert_eq!(a.layout, b.layout);
}

#[test]
fn test_png_has_card_dimensions() {
    let artifact = recompute(&full_composition(), face()).unwrap().unwrap();
    // IHDR width and height, big-endian, right after the 8-byte signature and chunk header
    let width = u32::from_be_bytes(artifact.png[16..20].try_into().unwrap());
    let height = u32::from_be_bytes(artifact.png[20..24].try_into().unwrap());
    assert_eq!((width, height), (680, 565));
}

#[test]
fn test_every_template_renders_differently() {
    let mut pngs = Vec::new();
    for id in 1..=4 {
        let c = Composition {
            template: Some(id),
            ..full_composition()
        };
        pngs.push(recompute(&c, face()).unwrap().unwrap().png);
    }
    for i in 0..pngs.len() {
        for j in i + 1..pngs.len() {
            assert_ne!(pngs[i], pngs[j], "templates {} and {} match", i + 1, j + 1);
        }
    }
}

// ============================================================================
// FIT AND WRAP
// ============================================================================

#[test]
fn test_fit_convergence_against_typeface() {
    let face = BitmapTypeface::new();
    let content_width = CARD_WIDTH as f32 - 2.0 * PADDING;

    let texts = [
        "Sale".to_string(),
        "Land for lease near highway".to_string(),
        "9".repeat(60),
        "W".repeat(200),
    ];
    for text in &texts {
        let size = fit_font_size(&face, text, content_width, 56.0, FontWeight::Bold);
        assert!(size <= 56.0);
        let floor_width = face.advance_width(text, FontSpec::bold(MIN_FONT_SIZE));
        if floor_width <= content_width {
            assert!(face.advance_width(text, FontSpec::bold(size)) <= content_width);
        } else {
            assert_eq!(size, MIN_FONT_SIZE);
        }
    }
}

#[test]
fn test_wrap_reconstructs_words() {
    let face = BitmapTypeface::new();
    let body = full_composition().body;
    let lines = wrap_lines(&face, &body, 300.0, FontSpec::regular(36.0));
    assert!(lines.len() > 1);
    let words: Vec<&str> = body.split(' ').filter(|w| !w.is_empty()).collect();
    assert_eq!(lines.join(" "), words.join(" "));
}

#[test]
fn test_wrapped_body_lines_are_evenly_spaced() {
    let artifact = recompute(&full_composition(), face()).unwrap().unwrap();
    let ys: Vec<f32> = artifact.layout.lines_of(LineKind::Body).map(|l| l.y).collect();
    assert!(ys.len() > 1);
    for pair in ys.windows(2) {
        assert_eq!(pair[1] - pair[0], 36.0 + BODY_LINE_GAP);
    }
}

// ============================================================================
// LAYOUT ORDERING
// ============================================================================

#[test]
fn test_sections_appear_in_order() {
    let artifact = recompute(&full_composition(), face()).unwrap().unwrap();
    let kinds: Vec<LineKind> = artifact.layout.lines.iter().map(|l| l.kind).collect();

    let last_title = kinds.iter().rposition(|k| *k == LineKind::Title).unwrap();
    let first_body = kinds.iter().position(|k| *k == LineKind::Body).unwrap();
    let last_body = kinds.iter().rposition(|k| *k == LineKind::Body).unwrap();
    let first_phone = kinds.iter().position(|k| *k == LineKind::Phone).unwrap();

    assert!(last_title < first_body);
    assert!(last_body < first_phone);
    assert_eq!(kinds.last(), Some(&LineKind::Watermark));

    let ys: Vec<f32> = artifact
        .layout
        .lines
        .iter()
        .filter(|l| l.kind != LineKind::Watermark)
        .map(|l| l.y)
        .collect();
    assert!(ys.windows(2).all(|w| w[0] < w[1]));
}

#[test]
fn test_title_body_spacing_skipped_without_body() {
    let with_body = Composition {
        watermark: false,
        ..full_composition()
    };
    let without_body = Composition {
        body: String::new(),
        ..with_body.clone()
    };
    let spaced = Composition {
        style: StyleParams {
            title_body_spacing: 80.0,
            ..StyleParams::default()
        },
        ..without_body.clone()
    };

    let a = recompute(&without_body, face()).unwrap().unwrap().layout;
    let b = recompute(&spaced, face()).unwrap().unwrap().layout;
    // title->body spacing has no effect when the body is empty
    assert_eq!(a, b);

    let title_end = a.lines_of(LineKind::Title).last().unwrap().y
        + a.lines_of(LineKind::Title).last().unwrap().font_size
        + TITLE_LINE_GAP;
    let first_phone = a.lines_of(LineKind::Phone).next().unwrap();
    assert_eq!(first_phone.y, title_end + 30.0);

    let c = recompute(&with_body, face()).unwrap().unwrap().layout;
    let first_body = c.lines_of(LineKind::Body).next().unwrap();
    assert_eq!(first_body.y, title_end + 10.0);
}

#[test]
fn test_vertical_phone_cursor_advance() {
    let c = Composition {
        watermark: false,
        ..full_composition()
    };
    let layout = recompute(&c, face()).unwrap().unwrap().layout;
    let phones: Vec<_> = layout.lines_of(LineKind::Phone).collect();
    assert_eq!(
        phones.iter().map(|l| l.text.as_str()).collect::<Vec<_>>(),
        vec!["9876543210", "9123456780", "0821-2345678"]
    );
    for pair in phones.windows(2) {
        assert_eq!(pair[1].y - pair[0].y, pair[0].font_size + PHONE_LINE_GAP);
    }
    let last = phones.last().unwrap();
    assert_eq!(layout.cursor_end, last.y + last.font_size + PHONE_LINE_GAP);
}

#[test]
fn test_horizontal_phones_shrink_as_one_line() {
    let c = Composition {
        phones: "9876543210, 9123456780, 9988776655".to_string(),
        phone_layout: PhoneLayout::Horizontal,
        ..full_composition()
    };
    let layout = recompute(&c, face()).unwrap().unwrap().layout;
    let phones: Vec<_> = layout.lines_of(LineKind::Phone).collect();
    assert_eq!(phones.len(), 1);
    assert_eq!(phones[0].text, "9876543210 / 9123456780 / 9988776655");
    // 36 chars at size/2 must fit 610px
    assert_eq!(phones[0].font_size, 33.5);
}

// ============================================================================
// SCENARIO
// ============================================================================

#[test]
fn test_kannada_title_with_single_phone() {
    let c = Composition {
        template: Some(1),
        title: "ಮನೆ ಮಾರಾಟಕ್ಕಿದೆ".to_string(),
        body: String::new(),
        phones: "9876543210".to_string(),
        phone_layout: PhoneLayout::Vertical,
        watermark: false,
        style: StyleParams::default(),
    };
    let artifact = recompute(&c, face()).unwrap().unwrap();
    let layout = &artifact.layout;

    assert!(!texts(layout, LineKind::Title).is_empty());
    assert!(texts(layout, LineKind::Body).is_empty());
    assert_eq!(texts(layout, LineKind::Phone), vec!["9876543210".to_string()]);
    assert_eq!(layout.lines_of(LineKind::Watermark).count(), 0);

    let title = layout.lines_of(LineKind::Title).last().unwrap();
    let phone = layout.lines_of(LineKind::Phone).next().unwrap();
    assert_eq!(layout.lines[0].y, PADDING + TITLE_OFFSET);
    assert_eq!(phone.y, title.y + title.font_size + TITLE_LINE_GAP + 30.0);
}

// ============================================================================
// TRUETYPE
// ============================================================================

/// First installed system font with bold left to synthesis.
fn system_face() -> Option<Arc<dyn Typeface>> {
    let path = SYSTEM_FONT_CANDIDATES
        .iter()
        .map(|(regular, _)| Path::new(regular))
        .find(|path| path.exists())?;
    let face = TtfTypeface::from_files(path, None).ok()?;
    Some(Arc::new(face))
}

fn long_title_composition() -> Composition {
    Composition {
        title: "Spacious corner plot with clear title deeds for sale".to_string(),
        phone_layout: PhoneLayout::Horizontal,
        ..full_composition()
    }
}

#[test]
fn test_truetype_renders_are_identical() {
    let Some(face) = system_face() else {
        eprintln!("no system TrueType font installed, skipping");
        return;
    };
    let c = long_title_composition();
    let a = recompute(&c, face.clone()).unwrap().unwrap();
    let b = recompute(&c, face).unwrap().unwrap();
    assert_eq!(a.png, b.png);
    assert_eq!(a.layout, b.layout);
}

#[test]
fn test_truetype_title_fits_content_width() {
    let Some(face) = system_face() else {
        eprintln!("no system TrueType font installed, skipping");
        return;
    };
    let content_width = CARD_WIDTH as f32 - 2.0 * PADDING;
    let c = long_title_composition();
    let layout = recompute(&c, face.clone()).unwrap().unwrap().layout;

    let title = layout.lines_of(LineKind::Title).next().unwrap();
    assert!(title.font_size < 56.0);
    assert_eq!(layout.lines_of(LineKind::Title).count(), 1);
    assert!(face.advance_width(&title.text, FontSpec::bold(title.font_size)) <= content_width);

    let phone = layout.lines_of(LineKind::Phone).next().unwrap();
    assert!(face.advance_width(&phone.text, FontSpec::bold(phone.font_size)) <= content_width);

    assert_eq!(fit_font_size(&*face, "", 0.0, 56.0, FontWeight::Bold), 56.0);
}

#[test]
fn test_truetype_wrap_keeps_every_word() {
    let Some(face) = system_face() else {
        eprintln!("no system TrueType font installed, skipping");
        return;
    };
    let body = full_composition().body;
    let font = FontSpec::regular(36.0);
    let lines = wrap_lines(&*face, &body, 300.0, font);
    assert!(lines.len() > 1);
    assert_eq!(lines.join(" "), body);
    for line in &lines {
        // Only single words may overflow
        if line.contains(' ') {
            assert!(face.advance_width(line, font) <= 300.0);
        }
    }
}

#[test]
fn test_truetype_text_lands_in_its_em_box() {
    let Some(face) = system_face() else {
        eprintln!("no system TrueType font installed, skipping");
        return;
    };
    let mut surface = Surface::new(400, 200, face.clone());
    surface.clear(Color::WHITE);
    surface.fill_text("Sale", 200.0, 50.0, FontSpec::bold(60.0), TextAlign::Center);

    let mut ink = Vec::new();
    for y in 0..surface.height() {
        for x in 0..surface.width() {
            if surface.pixel(x, y) != Some(Color::WHITE) {
                ink.push((x, y));
            }
        }
    }
    assert!(!ink.is_empty());

    let min_y = ink.iter().map(|p| p.1).min().unwrap();
    let max_y = ink.iter().map(|p| p.1).max().unwrap();
    let min_x = ink.iter().map(|p| p.0).min().unwrap() as f32;
    let max_x = ink.iter().map(|p| p.0).max().unwrap() as f32;
    assert!(min_y >= 48 && max_y <= 112, "ink rows {}..={}", min_y, max_y);

    // Centered on x = 200 within the advance width
    let half = face.advance_width("Sale", FontSpec::bold(60.0)) / 2.0;
    assert!(min_x >= 200.0 - half - 2.0 && max_x <= 200.0 + half + 2.0);
    assert!(((min_x + max_x) / 2.0 - 200.0).abs() < 10.0);
}

// ============================================================================
// EXPORT
// ============================================================================

#[test]
fn test_pdf_geometry_for_card() {
    let g = PdfGeometry::for_pixels(CARD_WIDTH, CARD_HEIGHT);
    assert_eq!(g.width_mm, 180.0);
    assert!((g.height_mm - 565.0 / 680.0 * 180.0).abs() < 1e-4);
    assert_eq!(g.orientation, Orientation::Landscape);
}

#[test]
fn test_editor_exports_follow_render_state() {
    let mut editor = Editor::new(face());
    assert!(editor.export_png(1).is_none());
    assert!(editor.export_pdf(1).is_none());

    editor.set(full_composition()).unwrap();
    let png = editor.export_png(1700000000000).unwrap();
    assert_eq!(png.filename, "classified-1700000000000.png");

    let pdf = editor.export_pdf(1700000000000).unwrap().unwrap();
    assert_eq!(pdf.filename, "classified-1700000000000.pdf");
    assert_eq!(pdf.content_type, "application/pdf");
    assert!(pdf.bytes.starts_with(b"%PDF-"));

    editor.update(|c| c.template = None).unwrap();
    assert!(editor.export_png(1).is_none());
}

#[test]
fn test_export_filename_uses_timestamp() {
    let name = export::export_filename(export::timestamp_ms(), "pdf");
    assert!(name.starts_with("classified-"));
    assert!(name.ends_with(".pdf"));
}
