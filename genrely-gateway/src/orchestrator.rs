//! Prediction orchestration
//!
//! Drives the strict two-stage pipeline for one request: validate the
//! upload, persist it as a transient artifact, run preprocessing, run
//! inference, and remove the artifact on every exit path. Stage A always
//! precedes Stage B and the stages never run concurrently within one
//! request; concurrent requests are fully independent.

use std::sync::Arc;
use std::time::Instant;

use tracing::{error, info};

use genrely_common::ProbabilityVector;

use crate::config::GatewayConfig;
use crate::services::{AudioServiceClient, MlServiceClient};
use crate::upload::{is_allowed_mime, UploadArtifact};
use crate::{GatewayError, Result};

/// One uploaded segment plus its bookkeeping fields. The segment bounds
/// are carried through for logging only; extraction already happened on
/// the client.
#[derive(Debug)]
pub struct SegmentUpload {
    pub bytes: Vec<u8>,
    pub content_type: Option<String>,
    pub file_name: String,
    pub segment_start: f64,
    pub segment_end: f64,
}

/// Successful prediction outcome
#[derive(Debug)]
pub struct PredictionOutcome {
    pub probabilities: ProbabilityVector,
    /// Wall-clock time spent on this request, in milliseconds
    pub processing_time_ms: u64,
}

/// Server-side coordinator of the two-stage prediction pipeline
pub struct PredictionOrchestrator {
    config: Arc<GatewayConfig>,
    audio_client: AudioServiceClient,
    ml_client: MlServiceClient,
}

impl PredictionOrchestrator {
    /// Build an orchestrator from an explicit configuration. Collaborator
    /// endpoints and timeouts are fixed at construction.
    pub fn new(config: Arc<GatewayConfig>) -> Result<Self> {
        let audio_client =
            AudioServiceClient::new(config.audio_service_url.clone(), config.audio_timeout)?;
        let ml_client = MlServiceClient::new(config.ml_service_url.clone(), config.ml_timeout)?;
        Ok(Self {
            config,
            audio_client,
            ml_client,
        })
    }

    /// Run the full pipeline for one upload.
    ///
    /// Validation happens before any resource is touched; the upload
    /// artifact is removed whether the stages succeed or fail.
    pub async fn predict(&self, upload: SegmentUpload) -> Result<PredictionOutcome> {
        let started = Instant::now();

        self.validate(&upload)?;

        info!(
            file_name = %upload.file_name,
            segment_start = upload.segment_start,
            segment_end = upload.segment_end,
            size = upload.bytes.len(),
            "processing prediction request"
        );

        let artifact = UploadArtifact::store(
            &self.config.upload_dir,
            &upload.file_name,
            &upload.bytes,
        )
        .await?;

        let result = self.run_stages(&artifact).await;

        // Unconditional cleanup; failures inside remove() are swallowed
        // so they cannot mask the stage outcome.
        artifact.remove().await;

        match result {
            Ok(probabilities) => {
                let processing_time_ms = started.elapsed().as_millis() as u64;
                info!(
                    file_name = %upload.file_name,
                    processing_time_ms,
                    "prediction completed"
                );
                Ok(PredictionOutcome {
                    probabilities,
                    processing_time_ms,
                })
            }
            Err(e) => {
                error!(file_name = %upload.file_name, error = %e, "prediction failed");
                Err(e)
            }
        }
    }

    fn validate(&self, upload: &SegmentUpload) -> Result<()> {
        if upload.bytes.is_empty() {
            return Err(GatewayError::Validation("No audio file provided".into()));
        }
        if upload.bytes.len() > self.config.max_upload_bytes {
            return Err(GatewayError::Validation(
                "File too large. Maximum size is 10MB.".into(),
            ));
        }
        match &upload.content_type {
            Some(content_type) if is_allowed_mime(content_type) => Ok(()),
            Some(content_type) => Err(GatewayError::Validation(format!(
                "Invalid file type {content_type:?}. Only WAV and MP3 files are allowed."
            ))),
            None => Err(GatewayError::Validation(
                "Invalid file type. Only WAV and MP3 files are allowed.".into(),
            )),
        }
    }

    /// Stage A then Stage B, never concurrently, no retries.
    async fn run_stages(&self, artifact: &UploadArtifact) -> Result<ProbabilityVector> {
        info!("stage A: audio preprocessing");
        let preprocessed = self.audio_client.process(artifact).await?;

        info!("stage B: genre inference");
        self.ml_client.predict(&preprocessed).await
    }
}
