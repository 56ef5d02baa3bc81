//! # Error Types
//!
//! This module defines error types used throughout the adcard library.
//!
//! Layout itself never fails: a composition that cannot be drawn (no template,
//! blank title) simply yields no artifact. Errors only come from the edges:
//! loading fonts, encoding images, writing PDFs and running the server.

use thiserror::Error;

/// Main error type for adcard operations
#[derive(Debug, Error)]
pub enum AdcardError {
    /// Font file could not be read or parsed
    #[error("Font error: {0}")]
    Font(String),

    /// PNG encoding error
    #[error("Image error: {0}")]
    Image(String),

    /// PDF generation error
    #[error("PDF error: {0}")]
    Pdf(String),

    /// Invalid command-line or request configuration
    #[error("Config error: {0}")]
    Config(String),

    /// Server-level errors (bind, serve)
    #[error("Transport error: {0}")]
    Transport(String),

    /// I/O error wrapper
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
