//! # Rendering Module
//!
//! Turns a [`Composition`](crate::composition::Composition) into pixels.
//!
//! ## Modules
//!
//! - [`surface`]: off-screen RGBA buffer with canvas-style drawing
//! - [`fit`]: shrink-to-fit font sizing and word wrap
//! - [`layout`]: card layout and the `recompute` entry point
//!
//! ## Usage Example
//!
//! ```
//! use std::sync::Arc;
//! use adcard::composition::Composition;
//! use adcard::font::BitmapTypeface;
//! use adcard::render;
//!
//! let composition = Composition {
//!     template: Some(1),
//!     title: "Flat for rent".to_string(),
//!     phones: "9876543210".to_string(),
//!     ..Default::default()
//! };
//!
//! let artifact = render::recompute(&composition, Arc::new(BitmapTypeface::new()))
//!     .unwrap()
//!     .expect("template and title are set");
//! assert_eq!((artifact.width, artifact.height), (680, 565));
//! ```

pub mod fit;
pub mod layout;
pub mod surface;

pub use layout::{Artifact, LayoutReport, LineKind, PlacedLine, recompute, render_into};
pub use surface::{Color, Surface, TextAlign};
