//! # Typefaces
//!
//! Text measurement and rasterization behind one trait, so the layout code
//! never cares which font backend is in use.
//!
//! | Backend | Source | Use |
//! |---------|--------|-----|
//! | [`TtfTypeface`] | TrueType/OpenType file loaded at runtime (`ab_glyph`) | production rendering |
//! | [`BitmapTypeface`] | Spleen 12x24 bitmap font compiled in (`spleen-font`) | fallback, deterministic tests |
//!
//! Rasterized text is an anti-aliased coverage buffer (0.0 = empty,
//! 1.0 = fully inked); [`crate::render::Surface`] composites it with a fill
//! color.

mod bitmap;
mod ttf;

pub use bitmap::BitmapTypeface;
pub use ttf::TtfTypeface;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::error::AdcardError;

/// Stroke weight of a font face.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum FontWeight {
    #[default]
    Regular,
    Bold,
}

/// A font size paired with a weight. The family is fixed by the typeface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FontSpec {
    /// Pixel size (em height)
    pub size: f32,
    pub weight: FontWeight,
}

impl FontSpec {
    pub fn regular(size: f32) -> Self {
        Self {
            size,
            weight: FontWeight::Regular,
        }
    }

    pub fn bold(size: f32) -> Self {
        Self {
            size,
            weight: FontWeight::Bold,
        }
    }
}

/// Rasterized run of text.
pub struct TextRaster {
    pub width: usize,
    pub height: usize,
    /// Pen start position measured from the raster's left edge.
    pub origin_x: f32,
    /// Baseline position measured from the raster's top edge.
    pub baseline: f32,
    /// Coverage values, row-major: 0.0 = empty, 1.0 = inked.
    pub data: Vec<f32>,
}

impl TextRaster {
    pub fn empty() -> Self {
        Self {
            width: 0,
            height: 0,
            origin_x: 0.0,
            baseline: 0.0,
            data: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Coverage at integer raster coordinates; zero outside the buffer.
    #[inline]
    pub fn coverage(&self, x: i64, y: i64) -> f32 {
        if x < 0 || y < 0 || x >= self.width as i64 || y >= self.height as i64 {
            return 0.0;
        }
        self.data[y as usize * self.width + x as usize]
    }
}

/// A font family that can measure and draw text at any pixel size.
pub trait Typeface: Send + Sync {
    /// Short human-readable name for logs.
    fn name(&self) -> &str;

    /// Advance width of `text` in pixels.
    fn advance_width(&self, text: &str, font: FontSpec) -> f32;

    /// Distance from the top of the em box to the baseline, in pixels.
    fn ascent(&self, font: FontSpec) -> f32;

    /// Render `text` to a coverage buffer.
    fn rasterize(&self, text: &str, font: FontSpec) -> TextRaster;
}

/// Font files tried, in order, when no font is configured.
///
/// Noto Sans Kannada comes first so Kannada classifieds render with real
/// glyphs on systems that have it.
pub const SYSTEM_FONT_CANDIDATES: &[(&str, &str)] = &[
    (
        "/usr/share/fonts/truetype/noto/NotoSansKannada-Regular.ttf",
        "/usr/share/fonts/truetype/noto/NotoSansKannada-Bold.ttf",
    ),
    (
        "/usr/share/fonts/noto/NotoSansKannada-Regular.ttf",
        "/usr/share/fonts/noto/NotoSansKannada-Bold.ttf",
    ),
    (
        "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
        "/usr/share/fonts/truetype/dejavu/DejaVuSans-Bold.ttf",
    ),
    (
        "/usr/share/fonts/TTF/DejaVuSans.ttf",
        "/usr/share/fonts/TTF/DejaVuSans-Bold.ttf",
    ),
    (
        "/System/Library/Fonts/Supplemental/Arial.ttf",
        "/System/Library/Fonts/Supplemental/Arial Bold.ttf",
    ),
];

/// Where the typeface comes from.
#[derive(Debug, Clone, Default)]
pub struct FontConfig {
    /// Regular-weight font file. `None` searches [`SYSTEM_FONT_CANDIDATES`].
    pub regular: Option<PathBuf>,
    /// Bold font file. Without one, bold is synthesized from the regular face.
    pub bold: Option<PathBuf>,
}

/// Resolve a [`FontConfig`] to a shared typeface.
///
/// An explicitly configured file that fails to load is an error. When
/// nothing is configured and no system candidate exists, the built-in bitmap
/// face is used.
pub fn load(config: &FontConfig) -> Result<Arc<dyn Typeface>, AdcardError> {
    if let Some(regular) = &config.regular {
        let face = TtfTypeface::from_files(regular, config.bold.as_deref())?;
        tracing::info!(font = %regular.display(), "loaded configured font");
        return Ok(Arc::new(face));
    }

    for (regular, bold) in SYSTEM_FONT_CANDIDATES {
        let regular = Path::new(regular);
        if !regular.exists() {
            continue;
        }
        let bold = Path::new(bold);
        let bold = bold.exists().then_some(bold);
        match TtfTypeface::from_files(regular, bold) {
            Ok(face) => {
                tracing::info!(font = %regular.display(), "loaded system font");
                return Ok(Arc::new(face));
            }
            Err(e) => tracing::warn!(font = %regular.display(), error = %e, "skipping system font"),
        }
    }

    tracing::warn!("no TrueType font found, using built-in bitmap font");
    Ok(Arc::new(BitmapTypeface::new()))
}
