//! Template catalog handler.

use axum::Json;

use crate::template::{TEMPLATES, Template};

/// GET /api/templates - List the card templates.
pub async fn list() -> Json<Vec<Template>> {
    Json(TEMPLATES.to_vec())
}
