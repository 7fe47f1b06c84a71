//! # Genrely Segment Library (genrely-segment)
//!
//! Client-side core of the genre prediction pipeline.
//!
//! **Purpose:** Maintain a fixed-duration selection window over a decoded
//! track, extract the selected window as an independent buffer, encode it
//! as 16-bit PCM WAV, and submit it to the prediction gateway.
//!
//! **Pipeline:** [`region::RegionController`] → (commit) →
//! [`audio::segment::extract`] → [`audio::wav::encode_pcm16`] →
//! [`client::PredictionClient`].

pub mod audio;
pub mod client;
pub mod error;
pub mod playback;
pub mod region;

pub use error::{Error, Result};
