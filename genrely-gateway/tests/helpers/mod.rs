//! Shared test helpers: stub collaborator services and gateway startup

// Not every test binary uses every helper.
#![allow(dead_code)]

use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use axum::{
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};

use genrely_gateway::api::{create_router, AppState};
use genrely_gateway::health::HealthProber;
use genrely_gateway::orchestrator::PredictionOrchestrator;
use genrely_gateway::GatewayConfig;

/// Serve a router on an ephemeral local port
pub async fn serve(router: Router) -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    addr
}

/// A base URL where nothing is listening (connection refused)
pub async fn unreachable_url() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}")
}

/// Stub audio preprocessing service answering /process and /health
pub fn stub_audio_service() -> Router {
    Router::new()
        .route(
            "/health",
            get(|| async { Json(json!({"status": "healthy", "service": "audio-service"})) }),
        )
        .route(
            "/process",
            post(|| async {
                Json(json!({
                    "preprocessedData": [[0.1, 0.2], [0.3, 0.4]],
                    "message": "Audio processed successfully"
                }))
            }),
        )
}

/// Stub audio service that always fails processing
pub fn failing_audio_service() -> Router {
    Router::new()
        .route(
            "/health",
            get(|| async { Json(json!({"status": "healthy"})) }),
        )
        .route(
            "/process",
            post(|| async {
                (
                    axum::http::StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({"detail": "separation model crashed"})),
                )
            }),
        )
}

/// Stub ML service returning the given probability array
pub fn stub_ml_service(probabilities: Value) -> Router {
    Router::new()
        .route(
            "/health",
            get(|| async { Json(json!({"status": "healthy", "service": "ml-service"})) }),
        )
        .route(
            "/predict",
            post(move |_body: Json<Value>| {
                let probabilities = probabilities.clone();
                async move {
                    Json(json!({
                        "probabilities": probabilities,
                        "message": "Prediction successful"
                    }))
                }
            }),
        )
}

pub fn test_config(audio_url: String, ml_url: String, upload_dir: PathBuf) -> GatewayConfig {
    GatewayConfig {
        audio_service_url: audio_url,
        ml_service_url: ml_url,
        upload_dir,
        ..Default::default()
    }
}

pub fn build_state(config: GatewayConfig) -> AppState {
    let config = Arc::new(config);
    AppState {
        orchestrator: Arc::new(PredictionOrchestrator::new(Arc::clone(&config)).unwrap()),
        prober: Arc::new(HealthProber::new(&config).unwrap()),
        config,
    }
}

/// Start a gateway wired to the given collaborator URLs
pub async fn start_gateway(config: GatewayConfig) -> SocketAddr {
    serve(create_router(build_state(config))).await
}

/// Multipart form carrying one encoded segment
pub fn segment_form(bytes: Vec<u8>, mime: &str) -> reqwest::multipart::Form {
    let part = reqwest::multipart::Part::bytes(bytes)
        .file_name("segment.wav")
        .mime_str(mime)
        .unwrap();
    reqwest::multipart::Form::new()
        .part("audio", part)
        .text("fileName", "track.mp3")
        .text("segmentStart", "20")
        .text("segmentEnd", "30")
}

pub async fn post_segment(
    addr: SocketAddr,
    form: reqwest::multipart::Form,
) -> reqwest::Response {
    reqwest::Client::new()
        .post(format!("http://{addr}/api/predict"))
        .multipart(form)
        .send()
        .await
        .unwrap()
}

/// Number of files currently in the upload directory
pub fn artifact_count(dir: &Path) -> usize {
    std::fs::read_dir(dir).unwrap().count()
}

pub fn nine_probabilities() -> Value {
    json!([0.1, 0.05, 0.3, 0.05, 0.2, 0.1, 0.05, 0.15, 0.0])
}
