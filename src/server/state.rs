//! Server state and configuration.

use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::font::Typeface;

/// Server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to listen on (e.g., "0.0.0.0:8080")
    pub listen_addr: String,
}

/// Application state shared across handlers.
pub struct AppState {
    /// Typeface every request renders with.
    pub typeface: Arc<dyn Typeface>,
    /// Unix timestamp of server boot.
    pub boot_time: u64,
}

impl AppState {
    pub fn new(typeface: Arc<dyn Typeface>) -> Self {
        let boot_time = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or_default();
        Self {
            typeface,
            boot_time,
        }
    }
}
