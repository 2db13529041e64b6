//! HTTP route handlers for Gatehouse.

use std::time::Duration;

use axum::{
    Router,
    routing::{get, post},
};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, timeout::TimeoutLayer, trace::TraceLayer};

use crate::state::AppState;

mod captcha;
mod health;

/// Create the main application router
pub fn create_router(state: AppState) -> Router {
    let timeout = Duration::from_secs(state.config.request_timeout_secs);

    Router::new()
        // Health & Status
        .route("/health", get(health::health_check))

        // CAPTCHA endpoints
        .route("/challenge", post(captcha::issue_challenge))
        .route("/verify", post(captcha::verify_challenge))

        // Middleware
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(TimeoutLayer::new(timeout))
                .layer(CorsLayer::permissive()),
        )

        // Add shared state
        .with_state(state)
}
