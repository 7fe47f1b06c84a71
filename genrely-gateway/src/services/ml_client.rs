//! ML inference collaborator client
//!
//! Stage B of the prediction pipeline: forwards the preprocessed payload
//! and validates that the response is a probability vector of exactly
//! the expected genre count. Any other length is an upstream failure and
//! never reaches the caller as a success.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use genrely_common::ProbabilityVector;

use crate::services::{map_transport_error, upstream_error_detail};
use crate::{Collaborator, GatewayError, Result};

#[derive(Debug, Serialize)]
struct PredictRequest<'a> {
    data: &'a Value,
}

#[derive(Debug, Deserialize)]
struct PredictResponse {
    probabilities: Vec<f64>,
}

/// Client for the ML inference service
pub struct MlServiceClient {
    http_client: reqwest::Client,
    base_url: String,
}

impl MlServiceClient {
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

    /// POST the preprocessed payload to `{base}/predict` and return the
    /// validated probability vector.
    pub async fn predict(&self, preprocessed: &Value) -> Result<ProbabilityVector> {
        let url = format!("{}/predict", self.base_url);
        debug!(url = %url, "requesting genre prediction");

        let response = self
            .http_client
            .post(&url)
            .json(&PredictRequest { data: preprocessed })
            .send()
            .await
            .map_err(|e| map_transport_error(Collaborator::Ml, e))?;

        if !response.status().is_success() {
            let detail = upstream_error_detail(response).await;
            return Err(GatewayError::UpstreamProcessing {
                collaborator: Collaborator::Ml,
                detail,
            });
        }

        let body: PredictResponse = response.json().await.map_err(|e| {
            GatewayError::UpstreamProcessing {
                collaborator: Collaborator::Ml,
                detail: format!("malformed response: {e}"),
            }
        })?;

        let actual = body.probabilities.len();
        ProbabilityVector::from_vec(body.probabilities)
            .map_err(|_| GatewayError::InvalidUpstreamResponse { actual })
    }
}
