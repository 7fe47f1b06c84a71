//! Segment playback boundary watcher
//!
//! Stops playback when the cursor reaches the end of the selected
//! segment. Instead of re-checking on every frame, a single check is
//! scheduled for the remaining duration and re-armed only if playback
//! has not yet reached the boundary when it fires. The watcher
//! self-terminates when playback stops and can be cancelled when
//! playback state changes.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;

/// Playback surface the watcher drives. Implemented by whatever owns the
/// actual audio output.
pub trait PlaybackTransport: Send + 'static {
    /// Current playback position in seconds
    fn position(&self) -> f64;

    /// Whether playback is currently running
    fn is_playing(&self) -> bool;

    /// Pause playback
    fn pause(&mut self);
}

/// Handle to a spawned boundary watcher
pub struct StopWatcher {
    handle: tokio::task::JoinHandle<()>,
}

impl StopWatcher {
    /// Watch `transport` and pause it once its position reaches
    /// `boundary_s` seconds. Terminates on its own if playback stops
    /// first.
    pub fn spawn<T: PlaybackTransport>(transport: Arc<Mutex<T>>, boundary_s: f64) -> Self {
        let handle = tokio::spawn(async move {
            loop {
                let remaining = {
                    let t = transport.lock().await;
                    if !t.is_playing() {
                        return;
                    }
                    boundary_s - t.position()
                };

                if remaining <= 0.0 {
                    let mut t = transport.lock().await;
                    if t.is_playing() {
                        t.pause();
                    }
                    return;
                }

                tokio::time::sleep(Duration::from_secs_f64(remaining)).await;
            }
        });
        Self { handle }
    }

    /// Cancel the watcher without touching playback
    pub fn cancel(&self) {
        self.handle.abort();
    }

    /// Whether the watcher task has completed or been cancelled
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}

impl Drop for StopWatcher {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
