//! HTTP handlers for the server.

pub mod classified;
pub mod page;
pub mod templates;
