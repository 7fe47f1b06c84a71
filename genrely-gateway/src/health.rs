//! Collaborator health probing
//!
//! Purely observational: probes both collaborators' `/health` endpoints
//! with a short timeout and reports per-service status and latency.
//! Never part of the prediction contract.

use std::time::Instant;

use serde::Serialize;

use crate::config::GatewayConfig;
use crate::{GatewayError, Result};

/// Health of a single collaborator
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceHealth {
    pub status: HealthStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_time_ms: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    Unhealthy,
}

/// Aggregated collaborator health
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MicroservicesHealth {
    pub audio_service: ServiceHealth,
    pub ml_service: ServiceHealth,
}

impl MicroservicesHealth {
    pub fn all_healthy(&self) -> bool {
        self.audio_service.status == HealthStatus::Healthy
            && self.ml_service.status == HealthStatus::Healthy
    }
}

/// Probes both collaborators concurrently with a short timeout
pub struct HealthProber {
    http_client: reqwest::Client,
    audio_health_url: String,
    ml_health_url: String,
}

impl HealthProber {
    pub fn new(config: &GatewayConfig) -> Result<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(config.health_timeout)
            .build()
            .map_err(|e| GatewayError::Internal(e.to_string()))?;
        Ok(Self {
            http_client,
            audio_health_url: format!("{}/health", config.audio_service_url),
            ml_health_url: format!("{}/health", config.ml_service_url),
        })
    }

    pub async fn probe(&self) -> MicroservicesHealth {
        let (audio_service, ml_service) = tokio::join!(
            self.probe_one(&self.audio_health_url),
            self.probe_one(&self.ml_health_url),
        );
        MicroservicesHealth {
            audio_service,
            ml_service,
        }
    }

    async fn probe_one(&self, url: &str) -> ServiceHealth {
        let started = Instant::now();
        match self.http_client.get(url).send().await {
            Ok(response) if response.status().is_success() => ServiceHealth {
                status: HealthStatus::Healthy,
                response_time_ms: Some(started.elapsed().as_millis() as u64),
                error: None,
            },
            Ok(response) => ServiceHealth {
                status: HealthStatus::Unhealthy,
                response_time_ms: None,
                error: Some(format!("Unexpected status: {}", response.status().as_u16())),
            },
            Err(e) => ServiceHealth {
                status: HealthStatus::Unhealthy,
                response_time_ms: None,
                error: Some(e.to_string()),
            },
        }
    }
}
