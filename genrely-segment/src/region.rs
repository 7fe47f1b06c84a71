//! Fixed-duration region selection
//!
//! Maintains exactly one active selection window of [`SEGMENT_DURATION`]
//! seconds over a track, correcting every drag/resize gesture back to the
//! fixed duration and notifying a single handler after each settled
//! update.
//!
//! **Short-track policy:** when the track is shorter than the nominal
//! segment duration, the whole track is the window (`[0, T]`) and the
//! fixed-duration invariant is relaxed. Corrections then clamp to the
//! track bounds instead of enforcing the duration.

use crate::{Error, Result};

/// Fixed segment duration in seconds
pub const SEGMENT_DURATION: f64 = 10.0;

/// Tolerance before a gesture triggers duration correction, in seconds
pub const DURATION_TOLERANCE: f64 = 0.1;

/// A selection window over the track, in seconds
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Region {
    pub start: f64,
    pub end: f64,
}

impl Region {
    pub fn duration(&self) -> f64 {
        self.end - self.start
    }
}

/// Observer invoked with every settled region. Exactly one handler is
/// registered at a time; only the latest emission reflects current state.
pub type RegionHandler = Box<dyn FnMut(Region) + Send>;

/// Controller state: Uninitialized until the waveform reports its
/// duration, Active with exactly one region afterwards.
#[derive(Debug, Clone, Copy, PartialEq)]
enum ControllerState {
    Uninitialized,
    Active,
}

/// Stateful controller enforcing the fixed-duration selection window.
///
/// The handler is injected at construction and replaced with
/// [`set_handler`](RegionController::set_handler); there is no implicit
/// rebinding.
pub struct RegionController {
    state: ControllerState,
    track_duration: f64,
    region: Option<Region>,
    handler: RegionHandler,
}

impl RegionController {
    pub fn new(handler: RegionHandler) -> Self {
        Self {
            state: ControllerState::Uninitialized,
            track_duration: 0.0,
            region: None,
            handler,
        }
    }

    /// Replace the observer. The next settled update emits to the new
    /// handler; no buffered history is replayed.
    pub fn set_handler(&mut self, handler: RegionHandler) {
        self.handler = handler;
    }

    /// Transition Uninitialized -> Active once the waveform has loaded
    /// and its total duration is known. The initial region is
    /// `[0, min(SEGMENT_DURATION, track_duration)]`.
    pub fn waveform_ready(&mut self, track_duration: f64) -> Result<Region> {
        if !(track_duration > 0.0) {
            return Err(Error::InvalidAudio(format!(
                "track duration must be positive, got {track_duration}"
            )));
        }
        self.state = ControllerState::Active;
        self.track_duration = track_duration;
        let region = Region {
            start: 0.0,
            end: SEGMENT_DURATION.min(track_duration),
        };
        self.emit(region);
        Ok(region)
    }

    /// Apply a drag/resize gesture. The requested window is corrected to
    /// the fixed duration (track-boundary clamping takes precedence over
    /// the requested edge), stored, and emitted.
    pub fn update(&mut self, start: f64, end: f64) -> Result<Region> {
        if self.state == ControllerState::Uninitialized {
            return Err(Error::InvalidState(
                "region update before waveform ready".into(),
            ));
        }
        let region = settle(self.track_duration, start, end);
        self.emit(region);
        Ok(region)
    }

    /// The current settled region, if Active
    pub fn region(&self) -> Option<Region> {
        self.region
    }

    pub fn is_active(&self) -> bool {
        self.state == ControllerState::Active
    }

    fn emit(&mut self, region: Region) {
        self.region = Some(region);
        tracing::debug!(start = region.start, end = region.end, "region settled");
        (self.handler)(region);
    }
}

/// Duration-correction rule, applied on every update.
fn settle(track_duration: f64, start: f64, end: f64) -> Region {
    // Short-track policy: the whole track is the window.
    if track_duration < SEGMENT_DURATION {
        return Region {
            start: 0.0,
            end: track_duration,
        };
    }

    let start = start.max(0.0);
    let duration = end - start;

    if (duration - SEGMENT_DURATION).abs() > DURATION_TOLERANCE {
        if start + SEGMENT_DURATION <= track_duration {
            // Anchor the left edge
            return Region {
                start,
                end: start + SEGMENT_DURATION,
            };
        }
        // Anchor to the track tail
        return Region {
            start: track_duration - SEGMENT_DURATION,
            end: track_duration,
        };
    }

    // Duration already correct; still clamp a window that slid past the
    // end of the track back to its tail.
    if start + SEGMENT_DURATION > track_duration {
        return Region {
            start: track_duration - SEGMENT_DURATION,
            end: track_duration,
        };
    }

    Region { start, end }
}
