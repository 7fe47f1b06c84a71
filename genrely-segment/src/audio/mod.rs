//! Audio buffer handling: decoded buffers, segment extraction, WAV encoding

pub mod buffer;
pub mod segment;
pub mod wav;

pub use buffer::DecodedAudio;
pub use segment::extract;
pub use wav::encode_pcm16;
