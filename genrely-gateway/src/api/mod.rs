//! REST API for the prediction gateway
//!
//! Routes: prediction under `/api`, health at the root. CORS is
//! permissive; request logging via tower-http TraceLayer.

pub mod handlers;

use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::config::GatewayConfig;
use crate::health::HealthProber;
use crate::orchestrator::PredictionOrchestrator;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<GatewayConfig>,
    pub orchestrator: Arc<PredictionOrchestrator>,
    pub prober: Arc<HealthProber>,
}

/// Create the API router.
///
/// The framework body limit sits slightly above the configured upload
/// limit so the handler can reject oversized payloads with the 400-class
/// validation error instead of a bare 413.
pub fn create_router(state: AppState) -> Router {
    let body_limit = state.config.max_upload_bytes + 64 * 1024;

    Router::new()
        .route("/health", get(handlers::health))
        .route("/health/detailed", get(handlers::health_detailed))
        .route("/api/predict", post(handlers::predict))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
