//! Classified card handlers: preview, render and export.
//!
//! Every request carries a full [`Composition`] and is rendered from scratch
//! on its own surface in a blocking task.

use axum::{
    Json,
    extract::State,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::{Value, json};
use std::sync::Arc;

use crate::{
    composition::Composition,
    error::AdcardError,
    export::{self, ExportFile},
    render::{LayoutReport, Surface, layout},
};

use super::super::state::AppState;

type ApiError = (StatusCode, Json<Value>);

fn error_json(status: StatusCode, message: impl Into<String>) -> ApiError {
    (
        status,
        Json(json!({"success": false, "error": message.into()})),
    )
}

fn nothing_to_export() -> ApiError {
    error_json(
        StatusCode::CONFLICT,
        "Nothing to export: choose a template and enter a title",
    )
}

/// Response body for POST /api/classified/render.
#[derive(Debug, Serialize)]
pub struct RenderResponse {
    pub data_url: String,
    pub width: u32,
    pub height: u32,
    pub layout: LayoutReport,
}

/// Which file an export request produces.
#[derive(Debug, Clone, Copy)]
enum ExportKind {
    Png,
    Pdf,
}

/// Render on a blocking thread, then run `finish` with the surface and
/// artifact while still off the async runtime.
async fn render_blocking<T, F>(
    state: &AppState,
    composition: Composition,
    finish: F,
) -> Result<Option<T>, ApiError>
where
    T: Send + 'static,
    F: FnOnce(&Surface, layout::Artifact) -> Result<T, AdcardError> + Send + 'static,
{
    let typeface = state.typeface.clone();
    let composition = composition.sanitized();

    tokio::task::spawn_blocking(move || -> Result<Option<T>, AdcardError> {
        let mut surface = Surface::new(layout::CARD_WIDTH, layout::CARD_HEIGHT, typeface);
        match layout::render_into(&mut surface, &composition)? {
            Some(artifact) => finish(&surface, artifact).map(Some),
            None => Ok(None),
        }
    })
    .await
    .map_err(|e| error_json(StatusCode::INTERNAL_SERVER_ERROR, format!("Task error: {}", e)))?
    .map_err(|e| error_json(StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))
}

/// POST /api/classified/preview - PNG of the card, or 204 when nothing draws.
pub async fn preview(
    State(state): State<Arc<AppState>>,
    Json(composition): Json<Composition>,
) -> Result<Response, ApiError> {
    let png = render_blocking(&state, composition, |_, artifact| Ok(artifact.png)).await?;

    Ok(match png {
        Some(png) => ([(header::CONTENT_TYPE, "image/png")], png).into_response(),
        None => StatusCode::NO_CONTENT.into_response(),
    })
}

/// POST /api/classified/render - data URL plus the layout report.
pub async fn render(
    State(state): State<Arc<AppState>>,
    Json(composition): Json<Composition>,
) -> Result<Json<Value>, ApiError> {
    let rendered = render_blocking(&state, composition, |_, artifact| {
        Ok(RenderResponse {
            data_url: artifact.data_url,
            width: artifact.width,
            height: artifact.height,
            layout: artifact.layout,
        })
    })
    .await?;

    Ok(Json(match rendered {
        Some(r) => json!({"success": true, "artifact": r}),
        None => json!({"success": true, "artifact": null}),
    }))
}

/// POST /api/classified/export/png - download `classified-<ms>.png`.
pub async fn export_png(
    State(state): State<Arc<AppState>>,
    Json(composition): Json<Composition>,
) -> Result<Response, ApiError> {
    export(&state, composition, ExportKind::Png).await
}

/// POST /api/classified/export/pdf - download `classified-<ms>.pdf`.
pub async fn export_pdf(
    State(state): State<Arc<AppState>>,
    Json(composition): Json<Composition>,
) -> Result<Response, ApiError> {
    export(&state, composition, ExportKind::Pdf).await
}

async fn export(
    state: &AppState,
    composition: Composition,
    kind: ExportKind,
) -> Result<Response, ApiError> {
    let timestamp = export::timestamp_ms();
    let file = render_blocking(state, composition, move |surface, artifact| match kind {
        ExportKind::Png => Ok(export::png_file(&artifact, timestamp)),
        ExportKind::Pdf => export::pdf_file(surface, timestamp),
    })
    .await?
    .ok_or_else(nothing_to_export)?;

    tracing::info!(filename = %file.filename, bytes = file.bytes.len(), "exported classified");
    Ok(attachment(file))
}

fn attachment(file: ExportFile) -> Response {
    let disposition = format!("attachment; filename=\"{}\"", file.filename);
    (
        [
            (header::CONTENT_TYPE, file.content_type.to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        file.bytes,
    )
        .into_response()
}
