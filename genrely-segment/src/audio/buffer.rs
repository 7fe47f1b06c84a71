//! Decoded audio buffer type
//!
//! **Format:**
//! - Samples are f32 (floating point -1.0 to 1.0)
//! - Channel-planar: one sample vector per channel, all of equal length
//! - Sample rate preserved from the source decode, never resampled here

use crate::{Error, Result};

/// DecodedAudio holds planar float samples for one track or segment.
///
/// Invariants (enforced at construction):
/// - `sample_rate > 0`
/// - at least one channel
/// - every channel vector has identical length
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedAudio {
    sample_rate: u32,
    channels: Vec<Vec<f32>>,
}

impl DecodedAudio {
    /// Create a new DecodedAudio, validating the buffer invariants
    pub fn new(sample_rate: u32, channels: Vec<Vec<f32>>) -> Result<Self> {
        if sample_rate == 0 {
            return Err(Error::InvalidAudio("sample rate must be positive".into()));
        }
        if channels.is_empty() {
            return Err(Error::InvalidAudio("at least one channel required".into()));
        }
        let frames = channels[0].len();
        if channels.iter().any(|ch| ch.len() != frames) {
            return Err(Error::InvalidAudio(
                "all channels must have the same length".into(),
            ));
        }
        Ok(Self {
            sample_rate,
            channels,
        })
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Number of channels
    pub fn channel_count(&self) -> usize {
        self.channels.len()
    }

    /// Number of frames (samples per channel)
    pub fn frames(&self) -> usize {
        self.channels[0].len()
    }

    /// Get duration in seconds
    pub fn duration_seconds(&self) -> f64 {
        self.frames() as f64 / self.sample_rate as f64
    }

    /// Samples of one channel
    pub fn channel(&self, index: usize) -> &[f32] {
        &self.channels[index]
    }

    /// All channels, planar
    pub fn channels(&self) -> &[Vec<f32>] {
        &self.channels
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_buffer() {
        let audio = DecodedAudio::new(44100, vec![vec![0.0; 44100], vec![0.0; 44100]]).unwrap();
        assert_eq!(audio.channel_count(), 2);
        assert_eq!(audio.frames(), 44100);
        assert!((audio.duration_seconds() - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn rejects_zero_sample_rate() {
        assert!(DecodedAudio::new(0, vec![vec![0.0; 10]]).is_err());
    }

    #[test]
    fn rejects_no_channels() {
        assert!(DecodedAudio::new(44100, vec![]).is_err());
    }

    #[test]
    fn rejects_ragged_channels() {
        assert!(DecodedAudio::new(44100, vec![vec![0.0; 10], vec![0.0; 9]]).is_err());
    }
}
