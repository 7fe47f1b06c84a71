//! Audio preprocessing collaborator client
//!
//! Stage A of the prediction pipeline: sends the stored upload to the
//! preprocessing service and returns its opaque preprocessed payload.
//! The timeout is long because preprocessing may run heavy signal
//! separation before computing spectrograms.

use std::time::Duration;

use serde::Deserialize;
use tracing::debug;

use crate::services::{map_transport_error, upstream_error_detail};
use crate::upload::UploadArtifact;
use crate::{Collaborator, GatewayError, Result};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ProcessResponse {
    /// Opaque payload forwarded verbatim to the inference collaborator
    preprocessed_data: serde_json::Value,
}

/// Client for the audio preprocessing service
pub struct AudioServiceClient {
    http_client: reqwest::Client,
    base_url: String,
}

impl AudioServiceClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| GatewayError::Internal(e.to_string()))?;
        Ok(Self {
            http_client,
            base_url: base_url.into(),
        })
    }

    /// POST the artifact to `{base}/process` and return the opaque
    /// preprocessed payload.
    pub async fn process(&self, artifact: &UploadArtifact) -> Result<serde_json::Value> {
        let bytes = tokio::fs::read(artifact.path()).await.map_err(|e| {
            GatewayError::Internal(format!(
                "failed to read upload artifact {}: {}",
                artifact.path().display(),
                e
            ))
        })?;

        let part = reqwest::multipart::Part::bytes(bytes)
            .file_name(artifact.file_name())
            .mime_str("audio/wav")
            .map_err(|e| GatewayError::Internal(e.to_string()))?;
        let form = reqwest::multipart::Form::new().part("audio", part);

        let url = format!("{}/process", self.base_url);
        debug!(url = %url, artifact = %artifact.file_name(), "sending segment to audio service");

        let response = self
            .http_client
            .post(&url)
            .multipart(form)
            .send()
            .await
            .map_err(|e| map_transport_error(Collaborator::Audio, e))?;

        if !response.status().is_success() {
            let detail = upstream_error_detail(response).await;
            return Err(GatewayError::UpstreamProcessing {
                collaborator: Collaborator::Audio,
                detail,
            });
        }

        let body: ProcessResponse = response.json().await.map_err(|e| {
            GatewayError::UpstreamProcessing {
                collaborator: Collaborator::Audio,
                detail: format!("malformed response: {e}"),
            }
        })?;

        Ok(body.preprocessed_data)
    }
}
