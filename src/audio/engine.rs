use std::time::Duration;

use tracing::{debug, warn};

use crate::library::Track;

use super::types::{AudioError, MediaHandle, Output};

/// Owns the single live media handle for a controller.
///
/// The handle is created by `load` and released by `stop`, `release`, or
/// dropping the engine. Transport calls made while nothing is loaded are
/// no-ops.
pub struct PlaybackEngine<O: Output> {
    handle: Option<O::Handle>,
    output: O,
}

impl<O: Output> PlaybackEngine<O> {
    pub fn new(output: O) -> Self {
        Self {
            handle: None,
            output,
        }
    }

    /// Release whatever is loaded and open `track`, paused at its start.
    ///
    /// On error the engine is left empty.
    pub fn load(&mut self, track: &Track) -> Result<(), AudioError> {
        self.release();
        let handle = self.output.open(track)?;
        debug!(
            path = %track.path.display(),
            duration_ms = handle.duration().as_millis() as u64,
            "track loaded"
        );
        self.handle = Some(handle);
        Ok(())
    }

    pub fn is_loaded(&self) -> bool {
        self.handle.is_some()
    }

    pub fn play(&mut self) {
        if let Some(h) = self.handle.as_mut() {
            h.play();
        }
    }

    pub fn pause(&mut self) {
        if let Some(h) = self.handle.as_mut() {
            h.pause();
        }
    }

    /// Halt playback and drop the handle; the next `load` starts from 0.
    pub fn stop(&mut self) {
        if let Some(h) = self.handle.as_mut() {
            h.pause();
        }
        self.release();
    }

    /// Seek to `fraction` of the track. `fraction >= 1` lands on 0.
    pub fn seek(&mut self, fraction: f32) {
        let Some(h) = self.handle.as_mut() else {
            return;
        };
        let target = target_position(fraction, h.duration());
        if let Err(err) = h.seek(target) {
            warn!(%err, "seek failed");
        }
    }

    pub fn rewind(&mut self) {
        self.seek(0.0);
    }

    pub fn position(&self) -> Duration {
        self.handle
            .as_ref()
            .map_or(Duration::ZERO, MediaHandle::position)
    }

    pub fn duration(&self) -> Duration {
        self.handle
            .as_ref()
            .map_or(Duration::ZERO, MediaHandle::duration)
    }

    /// `position / duration`, 0 while nothing with a known length is loaded.
    pub fn position_fraction(&self) -> f32 {
        fraction_of(self.position(), self.duration())
    }

    pub fn is_finished(&self) -> bool {
        self.handle.as_ref().is_some_and(MediaHandle::is_finished)
    }

    pub fn release(&mut self) {
        if self.handle.take().is_some() {
            debug!("media handle released");
        }
    }
}

impl<O: Output> Drop for PlaybackEngine<O> {
    fn drop(&mut self) {
        self.release();
    }
}

/// Absolute position for a slider `fraction`. Anything outside `(0, 1)`,
/// NaN included, maps to the start.
pub(super) fn target_position(fraction: f32, duration: Duration) -> Duration {
    if fraction > 0.0 && fraction < 1.0 {
        duration.mul_f32(fraction)
    } else {
        Duration::ZERO
    }
}

/// `position / duration` clamped to `[0, 1]`; 0 when `duration` is zero.
pub(crate) fn fraction_of(position: Duration, duration: Duration) -> f32 {
    if duration.is_zero() {
        return 0.0;
    }
    (position.as_secs_f64() / duration.as_secs_f64()).clamp(0.0, 1.0) as f32
}
