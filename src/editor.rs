//! # Editor Session
//!
//! Holds one card being edited: the current composition, the live surface
//! it is painted on, and the last successful render. Every edit repaints
//! the whole card. Exports stay unavailable until a render exists.
//!
//! ```
//! use std::sync::Arc;
//! use adcard::editor::Editor;
//! use adcard::font::BitmapTypeface;
//!
//! let mut editor = Editor::new(Arc::new(BitmapTypeface::new()));
//! assert!(editor.export_png(0).is_none());
//!
//! editor.update(|c| {
//!     c.template = Some(2);
//!     c.title = "Bike for sale".to_string();
//! }).unwrap();
//! assert!(editor.export_png(0).is_some());
//! ```

use std::sync::Arc;

use crate::composition::Composition;
use crate::error::AdcardError;
use crate::export::{self, ExportFile};
use crate::font::Typeface;
use crate::render::{Artifact, Surface, layout};

pub struct Editor {
    composition: Composition,
    surface: Surface,
    artifact: Option<Artifact>,
}

impl Editor {
    pub fn new(typeface: Arc<dyn Typeface>) -> Self {
        Self {
            composition: Composition::default(),
            surface: Surface::new(layout::CARD_WIDTH, layout::CARD_HEIGHT, typeface),
            artifact: None,
        }
    }

    pub fn composition(&self) -> &Composition {
        &self.composition
    }

    /// Last successful render, if the current composition draws anything.
    pub fn artifact(&self) -> Option<&Artifact> {
        self.artifact.as_ref()
    }

    pub fn surface(&self) -> &Surface {
        &self.surface
    }

    /// Apply an edit and repaint.
    pub fn update<F>(&mut self, edit: F) -> Result<Option<&Artifact>, AdcardError>
    where
        F: FnOnce(&mut Composition),
    {
        edit(&mut self.composition);
        self.repaint()
    }

    /// Replace the whole composition and repaint.
    pub fn set(&mut self, composition: Composition) -> Result<Option<&Artifact>, AdcardError> {
        self.composition = composition;
        self.repaint()
    }

    /// Back to an empty composition with nothing rendered.
    pub fn reset(&mut self) {
        self.composition = Composition::default();
        self.artifact = None;
    }

    fn repaint(&mut self) -> Result<Option<&Artifact>, AdcardError> {
        // The surface may already hold new pixels when encoding fails
        self.artifact = None;
        self.artifact = layout::render_into(&mut self.surface, &self.composition)?;
        Ok(self.artifact.as_ref())
    }

    /// PNG download of the current render.
    pub fn export_png(&self, timestamp_ms: i64) -> Option<ExportFile> {
        self.artifact
            .as_ref()
            .map(|artifact| export::png_file(artifact, timestamp_ms))
    }

    /// PDF download of the current render, read back from the live surface.
    pub fn export_pdf(&self, timestamp_ms: i64) -> Option<Result<ExportFile, AdcardError>> {
        self.artifact
            .as_ref()
            .map(|_| export::pdf_file(&self.surface, timestamp_ms))
    }
}
