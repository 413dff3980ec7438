//! API handlers for eHoldings REST endpoints

pub mod coverage;
pub mod edits;
pub mod health;
pub mod openapi;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::AppState;

/// Create the application router with all routes
pub fn router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // API v1 routes
    let api_v1 = Router::new()
        // Health check
        .route("/health", get(health::health_check))
        .route("/ready", get(health::readiness_check))
        // Coverage sets
        .route("/coverage/validate", post(coverage::validate_coverage))
        .route("/coverage/sort", post(coverage::sort_coverage))
        .route("/coverage/prepare", post(coverage::prepare_coverage))
        .route("/coverage/describe", post(coverage::describe_coverage))
        // Edit forms
        .route("/resources/validate", post(edits::validate_resource))
        .route("/packages/validate", post(edits::validate_package))
        .route("/titles/validate", post(edits::validate_title))
        .with_state(state);

    Router::new()
        .nest("/api/v1", api_v1)
        .merge(openapi::create_openapi_router())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}
