//! Prediction gateway client
//!
//! Submits an encoded segment to the prediction gateway as a multipart
//! upload and returns the genre-probability vector. The gateway performs
//! the actual two-stage preprocessing/inference orchestration; this
//! client only carries the committed segment across the wire.

use std::time::Duration;

use genrely_common::ProbabilityVector;
use serde::Deserialize;
use thiserror::Error;

const PREDICT_TIMEOUT: Duration = Duration::from_secs(60);
const HEALTH_TIMEOUT: Duration = Duration::from_secs(5);

/// Prediction client errors
#[derive(Debug, Error)]
pub enum ClientError {
    /// Gateway could not be reached at all
    #[error("Could not connect to prediction gateway: {0}")]
    Unreachable(String),

    /// Gateway responded with an error status
    #[error("Server error {0}: {1}")]
    Api(u16, String),

    /// Request failed in transit (timeout, broken connection, ...)
    #[error("Network error: {0}")]
    Network(String),

    /// Gateway response did not match the expected shape
    #[error("Unexpected response: {0}")]
    Parse(String),
}

/// Successful prediction for one committed segment
#[derive(Debug, Clone)]
pub struct Prediction {
    /// Genre probabilities, index-aligned to the fixed genre table
    pub probabilities: ProbabilityVector,
    /// Gateway-side processing time in milliseconds
    pub processing_time_ms: Option<u64>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PredictResponse {
    probabilities: Vec<f64>,
    processing_time: Option<u64>,
}

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error: Option<String>,
}

/// HTTP client for the prediction gateway
pub struct PredictionClient {
    http_client: reqwest::Client,
    base_url: String,
}

impl PredictionClient {
    /// Create a new client for the gateway at `base_url`
    pub fn new(base_url: impl Into<String>) -> Result<Self, ClientError> {
        let http_client = reqwest::Client::builder()
            .timeout(PREDICT_TIMEOUT)
            .build()
            .map_err(|e| ClientError::Network(e.to_string()))?;

        Ok(Self {
            http_client,
            base_url: base_url.into(),
        })
    }

    /// Submit an encoded WAV segment for genre prediction.
    ///
    /// `file_name` and the segment bounds are bookkeeping only; the
    /// upload already contains exactly the selected window.
    pub async fn predict(
        &self,
        segment_wav: Vec<u8>,
        file_name: &str,
        segment_start: f64,
        segment_end: f64,
    ) -> Result<Prediction, ClientError> {
        let audio_part = reqwest::multipart::Part::bytes(segment_wav)
            .file_name("segment.wav")
            .mime_str("audio/wav")
            .map_err(|e| ClientError::Network(e.to_string()))?;

        let form = reqwest::multipart::Form::new()
            .part("audio", audio_part)
            .text("fileName", file_name.to_string())
            .text("segmentStart", segment_start.to_string())
            .text("segmentEnd", segment_end.to_string());

        let url = format!("{}/api/predict", self.base_url);
        tracing::debug!(url = %url, file_name = %file_name, "submitting segment for prediction");

        let response = self
            .http_client
            .post(&url)
            .multipart(form)
            .send()
            .await
            .map_err(|e| {
                if e.is_connect() {
                    ClientError::Unreachable(e.to_string())
                } else {
                    ClientError::Network(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .json::<ErrorResponse>()
                .await
                .ok()
                .and_then(|body| body.error)
                .unwrap_or_else(|| "Unknown error".to_string());
            return Err(ClientError::Api(status.as_u16(), message));
        }

        let body: PredictResponse = response
            .json()
            .await
            .map_err(|e| ClientError::Parse(e.to_string()))?;

        let probabilities = ProbabilityVector::from_vec(body.probabilities)
            .map_err(|e| ClientError::Parse(e.to_string()))?;

        tracing::info!(
            file_name = %file_name,
            processing_time_ms = ?body.processing_time,
            "prediction received"
        );

        Ok(Prediction {
            probabilities,
            processing_time_ms: body.processing_time,
        })
    }

    /// Liveness probe of the gateway. Returns false on any failure.
    pub async fn check_health(&self) -> bool {
        let url = format!("{}/health", self.base_url);
        match self
            .http_client
            .get(&url)
            .timeout(HEALTH_TIMEOUT)
            .send()
            .await
        {
            Ok(response) => response.status().is_success(),
            Err(e) => {
                tracing::warn!(error = %e, "gateway health check failed");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn predict_maps_connection_refused_to_unreachable() {
        // Nothing listens on this port
        let client = PredictionClient::new("http://127.0.0.1:9").unwrap();
        let err = client
            .predict(vec![0u8; 44], "song.mp3", 0.0, 10.0)
            .await
            .unwrap_err();
        assert!(matches!(err, ClientError::Unreachable(_)));
    }

    #[tokio::test]
    async fn health_check_is_false_when_gateway_down() {
        let client = PredictionClient::new("http://127.0.0.1:9").unwrap();
        assert!(!client.check_health().await);
    }
}
