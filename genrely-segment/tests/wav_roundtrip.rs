//! WAV encoder round-trip verification
//!
//! Encodes decoded audio with the crate encoder and reads it back with
//! hound, checking that every sample survives within one quantization
//! step and that the container metadata is preserved.

use genrely_segment::audio::{buffer::DecodedAudio, encode_pcm16, extract};
use genrely_segment::region::{RegionController, SEGMENT_DURATION};
use std::io::Cursor;

/// One quantization step of 16-bit PCM scaled by 32767
const QUANT_STEP: f32 = 1.0 / 32767.0;

fn sine_audio(sample_rate: u32, seconds: f64, channels: usize) -> DecodedAudio {
    let frames = (sample_rate as f64 * seconds) as usize;
    let data: Vec<Vec<f32>> = (0..channels)
        .map(|ch| {
            (0..frames)
                .map(|i| {
                    let t = i as f32 / sample_rate as f32;
                    let freq = 220.0 * (ch + 1) as f32;
                    0.8 * (2.0 * std::f32::consts::PI * freq * t).sin()
                })
                .collect()
        })
        .collect();
    DecodedAudio::new(sample_rate, data).unwrap()
}

#[test]
fn roundtrip_preserves_samples_within_quantization_error() {
    let audio = sine_audio(44100, 0.25, 2);
    let bytes = encode_pcm16(&audio);

    let mut reader = hound::WavReader::new(Cursor::new(bytes)).unwrap();
    let spec = reader.spec();
    assert_eq!(spec.channels, 2);
    assert_eq!(spec.sample_rate, 44100);
    assert_eq!(spec.bits_per_sample, 16);
    assert_eq!(spec.sample_format, hound::SampleFormat::Int);

    let decoded: Vec<i16> = reader.samples::<i16>().map(|s| s.unwrap()).collect();
    assert_eq!(decoded.len(), audio.frames() * 2);

    for (frame, pair) in decoded.chunks(2).enumerate() {
        for (ch, &sample) in pair.iter().enumerate() {
            let original = audio.channel(ch)[frame];
            let restored = sample as f32 / 32767.0;
            assert!(
                (original - restored).abs() <= QUANT_STEP,
                "frame {frame} channel {ch}: {original} vs {restored}"
            );
        }
    }
}

#[test]
fn roundtrip_of_full_scale_extremes() {
    let audio = DecodedAudio::new(8000, vec![vec![1.0, -1.0, 0.0, 1.5, -1.5]]).unwrap();
    let bytes = encode_pcm16(&audio);

    let mut reader = hound::WavReader::new(Cursor::new(bytes)).unwrap();
    let decoded: Vec<i16> = reader.samples::<i16>().map(|s| s.unwrap()).collect();
    assert_eq!(decoded, vec![32767, -32767, 0, 32767, -32767]);
}

/// Full client-side pipeline: settle a region, extract it, encode it,
/// and verify the payload matches the committed window.
#[test]
fn committed_region_encodes_to_expected_payload() {
    let sample_rate = 8000;
    let audio = sine_audio(sample_rate, 30.0, 2);

    let mut controller = RegionController::new(Box::new(|_| {}));
    controller.waveform_ready(audio.duration_seconds()).unwrap();
    let region = controller.update(12.0, 14.5).unwrap();
    assert!((region.duration() - SEGMENT_DURATION).abs() <= 0.1);

    let segment = extract(&audio, region.start, region.end).unwrap();
    let expected_frames = (region.end * sample_rate as f64).floor() as usize
        - (region.start * sample_rate as f64).floor() as usize;
    assert_eq!(segment.frames(), expected_frames);

    let bytes = encode_pcm16(&segment);
    let mut reader = hound::WavReader::new(Cursor::new(bytes)).unwrap();
    assert_eq!(reader.spec().sample_rate, sample_rate);
    assert_eq!(reader.duration() as usize, expected_frames);
    assert_eq!(
        reader.samples::<i16>().count(),
        expected_frames * 2
    );
}
