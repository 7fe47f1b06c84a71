//! Error types for genrely-segment
//!
//! Defines module-specific error types using thiserror for clear error
//! propagation.

use thiserror::Error;

/// Main error type for genrely-segment
#[derive(Error, Debug)]
pub enum Error {
    /// Malformed decoded-audio buffer (ragged channels, zero rate, ...)
    #[error("Invalid audio: {0}")]
    InvalidAudio(String),

    /// Requested segment window contains no samples
    #[error("Empty segment window: [{start}s, {end}s) yields {length} samples")]
    EmptySegment { start: f64, end: f64, length: i64 },

    /// Requested segment window runs past the end of the source buffer
    #[error("Segment out of range: end sample {end_sample} exceeds source length {source_len}")]
    SegmentOutOfRange { end_sample: u64, source_len: u64 },

    /// Operation not valid in the controller's current state
    #[error("Invalid state: {0}")]
    InvalidState(String),
}

/// Convenience Result type using genrely-segment Error
pub type Result<T> = std::result::Result<T, Error>;
