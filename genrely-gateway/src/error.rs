//! Error types for genrely-gateway
//!
//! One taxonomy covers every failure the prediction flow can produce;
//! each variant carries a fixed HTTP status. Collaborator detail is
//! surfaced verbatim in development and replaced with a generic message
//! in production.

use axum::http::StatusCode;
use std::fmt;
use thiserror::Error;

use genrely_common::GENRE_COUNT;

/// The external service a failure originated from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collaborator {
    /// Audio preprocessing service (signal separation, spectrograms)
    Audio,
    /// ML inference service
    Ml,
}

impl fmt::Display for Collaborator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Collaborator::Audio => write!(f, "Audio Processing Service"),
            Collaborator::Ml => write!(f, "ML Prediction Service"),
        }
    }
}

/// Main error type for genrely-gateway
#[derive(Error, Debug)]
pub enum GatewayError {
    /// Missing, oversized, or wrong-type upload; rejected before any
    /// collaborator or resource is touched
    #[error("{0}")]
    Validation(String),

    /// Connection to a collaborator was refused
    #[error("{0} is not available")]
    UpstreamUnavailable(Collaborator),

    /// Collaborator was reachable but the stage failed
    #[error("{collaborator} request failed: {detail}")]
    UpstreamProcessing {
        collaborator: Collaborator,
        detail: String,
    },

    /// Inference response was not a vector of exactly [`GENRE_COUNT`]
    /// numbers; treated as an upstream processing failure
    #[error("Invalid prediction format: expected {} probabilities, got {actual}", GENRE_COUNT)]
    InvalidUpstreamResponse { actual: usize },

    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Anything unanticipated
    #[error("Internal error: {0}")]
    Internal(String),
}

impl GatewayError {
    /// HTTP status for this failure
    pub fn status(&self) -> StatusCode {
        match self {
            GatewayError::Validation(_) => StatusCode::BAD_REQUEST,
            GatewayError::UpstreamUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            GatewayError::UpstreamProcessing { .. } => StatusCode::BAD_GATEWAY,
            GatewayError::InvalidUpstreamResponse { .. } => StatusCode::BAD_GATEWAY,
            GatewayError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
            GatewayError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message exposed to the caller. Validation and availability
    /// messages are always surfaced; processing and internal detail is
    /// redacted in production.
    pub fn public_message(&self, production: bool) -> String {
        match self {
            GatewayError::Validation(_) | GatewayError::UpstreamUnavailable(_) => self.to_string(),
            GatewayError::UpstreamProcessing { collaborator, .. } => {
                if production {
                    format!("{collaborator} failed to process the request")
                } else {
                    self.to_string()
                }
            }
            GatewayError::InvalidUpstreamResponse { .. } => {
                if production {
                    format!("{} failed to process the request", Collaborator::Ml)
                } else {
                    self.to_string()
                }
            }
            GatewayError::Config(_) | GatewayError::Internal(_) => {
                if production {
                    "Internal server error".to_string()
                } else {
                    self.to_string()
                }
            }
        }
    }
}

/// Convenience Result type using genrely-gateway Error
pub type Result<T> = std::result::Result<T, GatewayError>;
