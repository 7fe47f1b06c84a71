//! # Genrely Prediction Gateway (genrely-gateway)
//!
//! HTTP gateway between the segment-selection client and the two
//! collaborator services that produce a genre prediction.
//!
//! **Purpose:** Accept an uploaded audio segment, drive the strict
//! two-stage pipeline (audio preprocessing, then ML inference), guarantee
//! cleanup of the transient upload on every exit path, and map all
//! failures onto a stable error taxonomy.

pub mod api;
pub mod config;
pub mod error;
pub mod health;
pub mod orchestrator;
pub mod services;
pub mod upload;

pub use config::GatewayConfig;
pub use error::{Collaborator, GatewayError, Result};
