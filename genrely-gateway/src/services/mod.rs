//! Collaborator service clients
//!
//! One client per external service, each with its own timeout. Both map
//! transport failures the same way: connection refused means the
//! collaborator is unavailable, anything else is a processing failure.

pub mod audio_client;
pub mod ml_client;

pub use audio_client::AudioServiceClient;
pub use ml_client::MlServiceClient;

use serde::Deserialize;

use crate::{Collaborator, GatewayError};

/// Error body shapes collaborators are known to produce
#[derive(Debug, Deserialize)]
struct UpstreamErrorBody {
    error: Option<String>,
    detail: Option<String>,
}

/// Map a reqwest transport error onto the gateway taxonomy
pub(crate) fn map_transport_error(collaborator: Collaborator, err: reqwest::Error) -> GatewayError {
    if err.is_connect() {
        GatewayError::UpstreamUnavailable(collaborator)
    } else {
        GatewayError::UpstreamProcessing {
            collaborator,
            detail: err.to_string(),
        }
    }
}

/// Extract the most specific error message from a collaborator's error
/// response body, falling back to the raw status line.
pub(crate) async fn upstream_error_detail(
    response: reqwest::Response,
) -> String {
    let status = response.status();
    let fallback = format!("status {status}");
    match response.json::<UpstreamErrorBody>().await {
        Ok(body) => body.error.or(body.detail).unwrap_or(fallback),
        Err(_) => fallback,
    }
}
