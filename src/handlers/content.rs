// src/handlers/content.rs

use axum::{Json, extract::State, response::IntoResponse};
use validator::Validate;

use crate::{
    config::Config,
    error::AppError,
    handlers::sanitize::ensure_within_limit,
    models::content::{RenderRequest, RenderedDocument},
};

/// Render a CMS document for preview or final display.
///
/// The body goes through the sanitization boundary; the title and excerpt
/// are reduced to plain text.
pub async fn render_document(
    State(config): State<Config>,
    Json(payload): Json<RenderRequest>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;
    ensure_within_limit(&payload.body, &config)?;

    let document = RenderedDocument::render(&payload);

    if document.body.as_str() != payload.body {
        tracing::debug!(kind = ?document.kind, "Sanitizer stripped document body");
    }

    Ok(Json(document))
}
