// src/handlers/policy.rs

use axum::{Json, response::IntoResponse};

use crate::models::policy::POLICY;

/// Publish the allow-lists enforced by the sanitizer.
pub async fn get_policy() -> impl IntoResponse {
    Json(&POLICY)
}
