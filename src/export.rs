//! # Export
//!
//! Download files for a rendered card.
//!
//! - **PNG**: the artifact's cached bytes, unchanged.
//! - **PDF**: one page holding the surface image at a fixed print width of
//!   180mm, height scaled to keep the pixel aspect ratio.
//!
//! ## PDF Page Geometry
//!
//! ```text
//! width_mm  = 180
//! height_mm = 180 * height_px / width_px
//!
//! For the 680x565 card:
//!   height_mm = 180 * 565 / 680 ≈ 149.56  → landscape
//! ```
//!
//! Orientation is landscape when the page is wider than tall, portrait
//! otherwise, and the page size is arranged to match.

use printpdf::{
    ColorBits, ColorSpace, Image, ImageTransform, ImageXObject, Mm, PdfDocument, Px,
};
use serde::Serialize;
use std::io::BufWriter;

use crate::error::AdcardError;
use crate::render::{Artifact, Surface};

/// Printed width of the card in millimeters.
pub const PDF_WIDTH_MM: f32 = 180.0;

const MM_PER_INCH: f32 = 25.4;

/// Page orientation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Orientation {
    Portrait,
    Landscape,
}

/// Image size on the page plus the page orientation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PdfGeometry {
    pub width_mm: f32,
    pub height_mm: f32,
    pub orientation: Orientation,
}

impl PdfGeometry {
    /// Geometry for an image of `width_px` x `height_px`.
    pub fn for_pixels(width_px: u32, height_px: u32) -> Self {
        let width_mm = PDF_WIDTH_MM;
        let height_mm = if width_px == 0 {
            0.0
        } else {
            PDF_WIDTH_MM * height_px as f32 / width_px as f32
        };
        let orientation = if width_mm > height_mm {
            Orientation::Landscape
        } else {
            Orientation::Portrait
        };

        Self {
            width_mm,
            height_mm,
            orientation,
        }
    }

    /// Page (width, height) in millimeters, arranged for the orientation.
    pub fn page_size_mm(&self) -> (f32, f32) {
        let long = self.width_mm.max(self.height_mm);
        let short = self.width_mm.min(self.height_mm);
        match self.orientation {
            Orientation::Landscape => (long, short),
            Orientation::Portrait => (short, long),
        }
    }
}

/// A file ready to hand to the user.
#[derive(Debug, Clone)]
pub struct ExportFile {
    pub filename: String,
    pub content_type: &'static str,
    pub bytes: Vec<u8>,
}

/// `classified-<timestamp>.<ext>`
pub fn export_filename(timestamp_ms: i64, extension: &str) -> String {
    format!("classified-{}.{}", timestamp_ms, extension)
}

/// Current time in epoch milliseconds, for export filenames.
pub fn timestamp_ms() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// PNG download from an existing artifact.
pub fn png_file(artifact: &Artifact, timestamp_ms: i64) -> ExportFile {
    ExportFile {
        filename: export_filename(timestamp_ms, "png"),
        content_type: "image/png",
        bytes: artifact.png.clone(),
    }
}

/// PDF download built from the live surface pixels.
pub fn pdf_file(surface: &Surface, timestamp_ms: i64) -> Result<ExportFile, AdcardError> {
    Ok(ExportFile {
        filename: export_filename(timestamp_ms, "pdf"),
        content_type: "application/pdf",
        bytes: pdf_bytes(surface)?,
    })
}

/// Single-page PDF containing the surface as a full-page image.
pub fn pdf_bytes(surface: &Surface) -> Result<Vec<u8>, AdcardError> {
    let (width_px, height_px) = (surface.width(), surface.height());
    if width_px == 0 || height_px == 0 {
        return Err(AdcardError::Pdf("Surface has no pixels".to_string()));
    }

    let geometry = PdfGeometry::for_pixels(width_px, height_px);
    let (page_w, page_h) = geometry.page_size_mm();

    let (doc, page, layer) = PdfDocument::new("Classified", Mm(page_w), Mm(page_h), "Card");
    let layer = doc.get_page(page).get_layer(layer);

    let image = Image::from(ImageXObject {
        width: Px(width_px as usize),
        height: Px(height_px as usize),
        color_space: ColorSpace::Rgb,
        bits_per_component: ColorBits::Bit8,
        interpolate: true,
        image_data: surface.to_rgb_bytes(),
        image_filter: None,
        clipping_bbox: None,
        smask: None,
    });

    // DPI that maps the pixel width onto the print width
    let dpi = width_px as f32 / (geometry.width_mm / MM_PER_INCH);

    image.add_to_layer(
        layer,
        ImageTransform {
            translate_x: Some(Mm(0.0)),
            translate_y: Some(Mm(0.0)),
            dpi: Some(dpi),
            ..Default::default()
        },
    );

    let mut writer = BufWriter::new(Vec::new());
    doc.save(&mut writer)
        .map_err(|e| AdcardError::Pdf(format!("Failed to write PDF: {}", e)))?;
    writer
        .into_inner()
        .map_err(|e| AdcardError::Pdf(format!("Failed to flush PDF: {}", e)))
}
