//! # Genrely shared types (genrely-common)
//!
//! Leaf crate shared by the segment-selection library and the prediction
//! gateway: the fixed genre table, the validated probability vector, and
//! common error types. No I/O lives here.

pub mod error;
pub mod genre;

pub use error::{Error, Result};
pub use genre::{Genre, ProbabilityVector, GENRES, GENRE_COUNT};
