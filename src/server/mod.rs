//! # HTTP Server for Classified Cards
//!
//! Provides a small web editor and a JSON API for rendering and exporting
//! classified cards.
//!
//! ## Usage
//!
//! ```bash
//! adcard serve --listen 0.0.0.0:8080
//! ```
//!
//! Then open http://localhost:8080 in a browser to access the editor.
//!
//! ## Routes
//!
//! | Method | Path | Response |
//! |--------|------|----------|
//! | GET | `/` | editor page |
//! | GET | `/api/templates` | template catalog |
//! | POST | `/api/classified/preview` | `image/png`, or 204 when nothing draws |
//! | POST | `/api/classified/render` | `{success, artifact: {data_url, layout, ..} \| null}` |
//! | POST | `/api/classified/export/png` | PNG attachment, 409 when nothing draws |
//! | POST | `/api/classified/export/pdf` | PDF attachment, 409 when nothing draws |

mod handlers;
mod state;

pub use state::{AppState, ServerConfig};

use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::error::AdcardError;
use crate::font::Typeface;

/// Build the application router.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        // Frontend
        .route("/", get(handlers::page::index))
        // Catalog
        .route("/api/templates", get(handlers::templates::list))
        // Classified API
        .route("/api/classified/preview", post(handlers::classified::preview))
        .route("/api/classified/render", post(handlers::classified::render))
        .route(
            "/api/classified/export/png",
            post(handlers::classified::export_png),
        )
        .route(
            "/api/classified/export/pdf",
            post(handlers::classified::export_pdf),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Start the HTTP server.
///
/// ## Example
///
/// ```no_run
/// use std::sync::Arc;
/// use adcard::font::BitmapTypeface;
/// use adcard::server::{serve, ServerConfig};
///
/// # async fn example() -> Result<(), adcard::error::AdcardError> {
/// let config = ServerConfig {
///     listen_addr: "0.0.0.0:8080".to_string(),
/// };
///
/// serve(config, Arc::new(BitmapTypeface::new())).await?;
/// # Ok(())
/// # }
/// ```
pub async fn serve(config: ServerConfig, typeface: Arc<dyn Typeface>) -> Result<(), AdcardError> {
    let app_state = Arc::new(AppState::new(typeface));
    let app = router(app_state.clone());

    tracing::info!(
        listen = %config.listen_addr,
        font = app_state.typeface.name(),
        boot_time = app_state.boot_time,
        "adcard HTTP server starting"
    );
    println!(
        "Open http://{}/ in your browser to edit classifieds",
        config.listen_addr
    );

    let listener = tokio::net::TcpListener::bind(&config.listen_addr)
        .await
        .map_err(|e| {
            AdcardError::Transport(format!("Failed to bind to {}: {}", config.listen_addr, e))
        })?;

    axum::serve(listener, app)
        .await
        .map_err(|e| AdcardError::Transport(format!("Server error: {}", e)))?;

    Ok(())
}
