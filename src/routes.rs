// src/routes.rs

use axum::{
    Router,
    extract::DefaultBodyLimit,
    http::{HeaderValue, Method, header},
    routing::{get, post},
};
use tower::ServiceBuilder;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

use crate::{
    error::AppError,
    handlers::{content, health, policy, sanitize},
    state::AppState,
};

/// Assembles the main application router.
///
/// * Merges all sub-routers (sanitize, content, policy, health).
/// * Applies global middleware (Trace, CORS, body limit).
/// * Injects global state (Config).
pub fn create_router(state: AppState) -> Router {
    let origins: Vec<HeaderValue> = state
        .config
        .cors_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE]);

    let sanitize_routes = Router::new()
        .route("/", post(sanitize::sanitize_content))
        .route("/batch", post(sanitize::sanitize_batch));

    let content_routes = Router::new().route("/render", post(content::render_document));

    Router::new()
        .route("/api/health", get(health::health_check))
        .route("/api/policy", get(policy::get_policy))
        .nest("/api/sanitize", sanitize_routes)
        .nest("/api/content", content_routes)
        .fallback(not_found)
        // Global Middleware (applied from outside in)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors)
                .layer(DefaultBodyLimit::max(state.config.max_body_bytes)),
        )
        .with_state(state)
}

async fn not_found() -> AppError {
    AppError::NotFound("Route not found".to_string())
}
