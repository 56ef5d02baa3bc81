//! # Adcard - Classified Card Renderer
//!
//! Adcard renders classified advertisements as bordered cards ready for
//! print or sharing. It provides:
//!
//! - **Templates**: a fixed catalog of card styles
//! - **Text fitting**: shrink-to-fit titles and phone numbers, greedy word wrap
//! - **Layout**: title, body, phone numbers and an optional "PREVIEW" watermark
//! - **Export**: PNG (bytes or `data:` URL) and single-page PDF
//! - **Server**: a web editor and JSON API
//!
//! ## Quick Start
//!
//! ```
//! use std::sync::Arc;
//! use adcard::{
//!     composition::Composition,
//!     export,
//!     font::BitmapTypeface,
//!     render,
//! };
//!
//! let composition = Composition {
//!     template: Some(1),
//!     title: "Tractor for sale".to_string(),
//!     body: "2019 model, single owner".to_string(),
//!     phones: "9876543210, 9123456780".to_string(),
//!     ..Default::default()
//! };
//!
//! // Render the card
//! let artifact = render::recompute(&composition, Arc::new(BitmapTypeface::new()))?
//!     .expect("template and title are set");
//!
//! // Hand the PNG to the user
//! let file = export::png_file(&artifact, export::timestamp_ms());
//! assert!(file.filename.ends_with(".png"));
//!
//! # Ok::<(), adcard::error::AdcardError>(())
//! ```
//!
//! ## Module Overview
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`template`] | Card template catalog |
//! | [`composition`] | Editable card state and phone parsing |
//! | [`font`] | Typefaces: TrueType and built-in bitmap |
//! | [`render`] | Surface, text fitting and layout |
//! | [`export`] | PNG and PDF downloads |
//! | [`editor`] | Editing session with export gating |
//! | [`server`] | HTTP editor and API |
//! | [`error`] | Error types |

pub mod composition;
pub mod editor;
pub mod error;
pub mod export;
pub mod font;
pub mod render;
pub mod server;
pub mod template;

// Re-exports for convenience
pub use composition::Composition;
pub use error::AdcardError;
pub use render::{Artifact, recompute};
