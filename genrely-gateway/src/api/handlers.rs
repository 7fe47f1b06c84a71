//! HTTP request handlers

use axum::{
    extract::{Multipart, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::json;
use tracing::warn;

use genrely_common::ProbabilityVector;

use crate::api::AppState;
use crate::orchestrator::SegmentUpload;
use crate::{GatewayError, Result};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PredictResponse {
    probabilities: ProbabilityVector,
    processing_time: u64,
}

// ============================================================================
// Health Endpoints
// ============================================================================

/// GET /health - liveness check, static
pub async fn health() -> Json<serde_json::Value> {
    Json(json!({
        "status": "healthy",
        "service": "genrely-gateway",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

/// GET /health/detailed - probes both collaborators
pub async fn health_detailed(State(state): State<AppState>) -> Response {
    let microservices = state.prober.probe().await;
    let all_healthy = microservices.all_healthy();
    let status = if all_healthy {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (
        status,
        Json(json!({
            "status": if all_healthy { "healthy" } else { "degraded" },
            "service": "genrely-gateway",
            "timestamp": chrono::Utc::now().to_rfc3339(),
            "microservices": microservices,
        })),
    )
        .into_response()
}

// ============================================================================
// Prediction Endpoint
// ============================================================================

/// POST /api/predict - multipart upload of one encoded segment
pub async fn predict(State(state): State<AppState>, multipart: Multipart) -> Response {
    let upload = match read_upload(multipart).await {
        Ok(upload) => upload,
        Err(e) => return error_response(&state, e),
    };

    match state.orchestrator.predict(upload).await {
        Ok(outcome) => Json(PredictResponse {
            probabilities: outcome.probabilities,
            processing_time: outcome.processing_time_ms,
        })
        .into_response(),
        Err(e) => error_response(&state, e),
    }
}

/// Collect the multipart fields. Missing or malformed fields fail
/// validation before the orchestrator (and any disk artifact) is
/// involved.
async fn read_upload(mut multipart: Multipart) -> Result<SegmentUpload> {
    let mut audio: Option<(Vec<u8>, Option<String>, Option<String>)> = None;
    let mut file_name: Option<String> = None;
    let mut segment_start: Option<f64> = None;
    let mut segment_end: Option<f64> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| GatewayError::Validation(format!("Malformed multipart body: {e}")))?
    {
        match field.name().unwrap_or_default() {
            "audio" => {
                let content_type = field.content_type().map(|s| s.to_string());
                let part_file_name = field.file_name().map(|s| s.to_string());
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| GatewayError::Validation(format!("Failed to read upload: {e}")))?;
                audio = Some((bytes.to_vec(), content_type, part_file_name));
            }
            "fileName" => {
                file_name = Some(text_field(field, "fileName").await?);
            }
            "segmentStart" => {
                segment_start = Some(numeric_field(field, "segmentStart").await?);
            }
            "segmentEnd" => {
                segment_end = Some(numeric_field(field, "segmentEnd").await?);
            }
            other => {
                warn!(field = %other, "ignoring unexpected multipart field");
            }
        }
    }

    let (bytes, content_type, part_file_name) = audio
        .ok_or_else(|| GatewayError::Validation("No audio file provided".into()))?;

    Ok(SegmentUpload {
        bytes,
        content_type,
        file_name: file_name
            .or(part_file_name)
            .unwrap_or_else(|| "segment.wav".to_string()),
        segment_start: segment_start.unwrap_or(0.0),
        segment_end: segment_end.unwrap_or(0.0),
    })
}

async fn text_field(field: axum::extract::multipart::Field<'_>, name: &str) -> Result<String> {
    field
        .text()
        .await
        .map_err(|e| GatewayError::Validation(format!("Invalid {name} field: {e}")))
}

async fn numeric_field(field: axum::extract::multipart::Field<'_>, name: &str) -> Result<f64> {
    let text = text_field(field, name).await?;
    text.parse()
        .map_err(|_| GatewayError::Validation(format!("Invalid {name} value: {text:?}")))
}

fn error_response(state: &AppState, err: GatewayError) -> Response {
    let status = err.status();
    if status.is_server_error() {
        tracing::error!(status = %status, error = %err, "request failed");
    } else {
        warn!(status = %status, error = %err, "request rejected");
    }

    (
        status,
        Json(json!({ "error": err.public_message(state.config.production) })),
    )
        .into_response()
}
