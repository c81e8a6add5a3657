// src/handlers/sanitize.rs

use axum::{Json, extract::State, response::IntoResponse};

use crate::{
    config::Config,
    error::AppError,
    models::content::{
        BatchSanitizeRequest, BatchSanitizeResponse, SanitizeRequest, SanitizeResponse,
    },
};

/// Rejects fragments longer than the configured limit.
pub(crate) fn ensure_within_limit(content: &str, config: &Config) -> Result<(), AppError> {
    if content.chars().count() > config.max_content_length {
        return Err(AppError::PayloadTooLarge(format!(
            "Content exceeds {} characters",
            config.max_content_length
        )));
    }
    Ok(())
}

/// Sanitize a single rich-text fragment.
///
/// Always succeeds for content within the size limit; `modified` tells the
/// caller whether anything was stripped.
pub async fn sanitize_content(
    State(config): State<Config>,
    Json(payload): Json<SanitizeRequest>,
) -> Result<impl IntoResponse, AppError> {
    ensure_within_limit(&payload.content, &config)?;

    let response = SanitizeResponse::from_raw(&payload.content);

    if response.modified {
        tracing::debug!(
            input_len = payload.content.len(),
            output_len = response.content.as_str().len(),
            "Sanitizer stripped content"
        );
    }

    Ok(Json(response))
}

/// Sanitize several fragments at once. Output order matches input order.
pub async fn sanitize_batch(
    State(config): State<Config>,
    Json(payload): Json<BatchSanitizeRequest>,
) -> Result<impl IntoResponse, AppError> {
    if payload.items.is_empty() {
        return Err(AppError::BadRequest("Batch must not be empty".to_string()));
    }
    if payload.items.len() > config.max_batch_size {
        return Err(AppError::BadRequest(format!(
            "Batch size must be at most {}",
            config.max_batch_size
        )));
    }

    for item in &payload.items {
        ensure_within_limit(item, &config)?;
    }

    let items: Vec<SanitizeResponse> = payload
        .items
        .iter()
        .map(|item| SanitizeResponse::from_raw(item))
        .collect();

    let modified = items.iter().filter(|item| item.modified).count();
    if modified > 0 {
        tracing::debug!(total = items.len(), modified, "Sanitizer stripped batch content");
    }

    Ok(Json(BatchSanitizeResponse { items }))
}
