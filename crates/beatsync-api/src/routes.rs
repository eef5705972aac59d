//! API routes.

use std::sync::Arc;

use axum::middleware;
use axum::routing::{get, post};
use axum::Router;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::services::ServeDir;

use crate::handlers::{generate_script, generate_video, health, video_status};
use crate::middleware::{
    cors_layer, rate_limit_middleware, request_id, request_logging, security_headers,
    RateLimiterCache,
};
use crate::state::AppState;

/// Create the API router.
pub fn create_router(state: AppState) -> Router {
    let rate_limiter = Arc::new(RateLimiterCache::new(
        state.config.rate_limit_rps,
        state.config.rate_limit_burst,
    ));

    let api_routes = Router::new()
        .route("/video/generate-script", post(generate_script))
        .route("/video/generate-video", post(generate_video))
        .route("/video/status", get(video_status))
        .layer(middleware::from_fn_with_state(
            rate_limiter,
            rate_limit_middleware,
        ));

    Router::new()
        .nest("/api", api_routes)
        .route("/health", get(health))
        // Finished artifacts, served read-only.
        .nest_service(
            "/processed_videos",
            ServeDir::new(state.store.processed_dir()),
        )
        .layer(RequestBodyLimitLayer::new(state.config.max_body_size))
        .layer(middleware::from_fn(security_headers))
        .layer(middleware::from_fn(request_id))
        .layer(middleware::from_fn(request_logging))
        .layer(cors_layer(&state.config.cors_origins))
        .with_state(state)
}
