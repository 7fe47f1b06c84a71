//! 16-bit PCM WAV encoding
//!
//! Serializes a [`DecodedAudio`] into the canonical 44-byte
//! RIFF/WAVE/fmt/data container, frames interleaved channel-major.
//! Quantization truncates toward zero (not rounds); downstream listeners
//! of this format depend on bit-exact output.

use super::buffer::DecodedAudio;

/// Canonical WAV header length: RIFF(12) + fmt(24) + data header(8)
const HEADER_LEN: usize = 44;

/// PCM format tag in the fmt chunk
const FORMAT_PCM: u16 = 1;

const BITS_PER_SAMPLE: u16 = 16;

/// Encode `audio` as a 16-bit PCM WAV byte stream.
///
/// Each sample is clamped to [-1, 1], scaled by 32767 and truncated to
/// i16. One frame carries all channels for sample i, then all channels
/// for sample i+1. No optional or extension chunks are written.
pub fn encode_pcm16(audio: &DecodedAudio) -> Vec<u8> {
    let channels = audio.channel_count() as u16;
    let sample_rate = audio.sample_rate();
    let frames = audio.frames();

    let block_align = channels * (BITS_PER_SAMPLE / 8);
    let byte_rate = sample_rate * block_align as u32;
    let data_len = frames * block_align as usize;

    let mut out = Vec::with_capacity(HEADER_LEN + data_len);

    // RIFF chunk
    out.extend_from_slice(b"RIFF");
    out.extend_from_slice(&((36 + data_len) as u32).to_le_bytes());
    out.extend_from_slice(b"WAVE");

    // fmt chunk
    out.extend_from_slice(b"fmt ");
    out.extend_from_slice(&16u32.to_le_bytes());
    out.extend_from_slice(&FORMAT_PCM.to_le_bytes());
    out.extend_from_slice(&channels.to_le_bytes());
    out.extend_from_slice(&sample_rate.to_le_bytes());
    out.extend_from_slice(&byte_rate.to_le_bytes());
    out.extend_from_slice(&block_align.to_le_bytes());
    out.extend_from_slice(&BITS_PER_SAMPLE.to_le_bytes());

    // data chunk
    out.extend_from_slice(b"data");
    out.extend_from_slice(&(data_len as u32).to_le_bytes());
    for frame in 0..frames {
        for ch in audio.channels() {
            let scaled = ch[frame].clamp(-1.0, 1.0) * 32767.0;
            // `as` truncates toward zero, matching the historical encoder
            out.extend_from_slice(&(scaled as i16).to_le_bytes());
        }
    }

    out
}
