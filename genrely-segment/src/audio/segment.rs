//! Segment extraction
//!
//! Cuts a `[start, end)` time window out of a decoded buffer into a new,
//! independently owned buffer. No resampling, no channel mixing.

use super::buffer::DecodedAudio;
use crate::{Error, Result};

/// Extract the `[start_s, end_s)` window from `source`.
///
/// Sample positions are derived by flooring:
/// `start_sample = floor(start_s * rate)`, `end_sample = floor(end_s * rate)`,
/// giving `end_sample - start_sample` frames per channel.
///
/// Fails if the window contains no samples or runs past the end of the
/// source. The result shares nothing with `source`.
pub fn extract(source: &DecodedAudio, start_s: f64, end_s: f64) -> Result<DecodedAudio> {
    let rate = source.sample_rate() as f64;
    let start_sample = (start_s * rate).floor() as i64;
    let end_sample = (end_s * rate).floor() as i64;
    let length = end_sample - start_sample;

    if length <= 0 {
        return Err(Error::EmptySegment {
            start: start_s,
            end: end_s,
            length,
        });
    }
    if start_sample < 0 || end_sample as usize > source.frames() {
        return Err(Error::SegmentOutOfRange {
            end_sample: end_sample.max(0) as u64,
            source_len: source.frames() as u64,
        });
    }

    let (start_sample, end_sample) = (start_sample as usize, end_sample as usize);
    let channels: Vec<Vec<f32>> = source
        .channels()
        .iter()
        .map(|ch| ch[start_sample..end_sample].to_vec())
        .collect();

    DecodedAudio::new(source.sample_rate(), channels)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ramp_audio(rate: u32, frames: usize, channels: usize) -> DecodedAudio {
        let data: Vec<Vec<f32>> = (0..channels)
            .map(|ch| (0..frames).map(|i| (i + ch) as f32).collect())
            .collect();
        DecodedAudio::new(rate, data).unwrap()
    }

    #[test]
    fn length_follows_floor_contract() {
        let audio = ramp_audio(1000, 10_000, 2);
        let segment = extract(&audio, 1.25, 3.75).unwrap();
        // floor(3.75 * 1000) - floor(1.25 * 1000)
        assert_eq!(segment.frames(), 3750 - 1250);
        assert_eq!(segment.channel_count(), 2);
        assert_eq!(segment.sample_rate(), 1000);
    }

    #[test]
    fn fractional_boundaries_floor_independently() {
        let audio = ramp_audio(44100, 44100, 1);
        let segment = extract(&audio, 0.1, 0.9).unwrap();
        let expected = (0.9f64 * 44100.0).floor() as usize - (0.1f64 * 44100.0).floor() as usize;
        assert_eq!(segment.frames(), expected);
    }

    #[test]
    fn copies_samples_per_channel() {
        let audio = ramp_audio(100, 1000, 2);
        let segment = extract(&audio, 1.0, 2.0).unwrap();
        assert_eq!(segment.channel(0)[0], 100.0);
        assert_eq!(segment.channel(1)[0], 101.0);
        assert_eq!(segment.channel(0)[99], 199.0);
    }

    #[test]
    fn rejects_empty_window() {
        let audio = ramp_audio(100, 1000, 1);
        assert!(matches!(
            extract(&audio, 2.0, 2.0),
            Err(Error::EmptySegment { .. })
        ));
        assert!(matches!(
            extract(&audio, 3.0, 2.0),
            Err(Error::EmptySegment { .. })
        ));
    }

    #[test]
    fn rejects_window_past_source_end() {
        let audio = ramp_audio(100, 1000, 1);
        assert!(matches!(
            extract(&audio, 5.0, 10.5),
            Err(Error::SegmentOutOfRange { .. })
        ));
    }

    #[test]
    fn output_is_independent_of_source() {
        let audio = ramp_audio(100, 1000, 1);
        let segment = extract(&audio, 0.0, 1.0).unwrap();
        drop(audio);
        assert_eq!(segment.frames(), 100);
        assert_eq!(segment.channel(0)[50], 50.0);
    }
}
