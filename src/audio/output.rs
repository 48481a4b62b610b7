use std::path::PathBuf;
use std::time::Duration;

use rodio::mixer::Mixer;
use rodio::{OutputStream, OutputStreamBuilder, Sink};
use tracing::debug;

use crate::library::Track;

use super::sink::create_sink_at;
use super::types::{AudioError, MediaHandle, Output};

/// The default audio device.
pub struct RodioOutput {
    stream: OutputStream,
}

impl RodioOutput {
    pub fn open_default() -> Result<Self, AudioError> {
        let mut stream = OutputStreamBuilder::open_default_stream()?;
        // rodio logs to stderr when OutputStream is dropped. That's useful in debugging,
        // but noisy for a TUI app.
        stream.log_on_drop(false);
        Ok(Self { stream })
    }
}

impl Output for RodioOutput {
    type Handle = RodioHandle;

    fn open(&self, track: &Track) -> Result<RodioHandle, AudioError> {
        RodioHandle::open(self.stream.mixer(), track)
    }
}

/// A single track on its own `Sink`.
pub struct RodioHandle {
    mixer: Mixer,
    path: PathBuf,
    sink: Sink,
    duration: Duration,
    /// Where the current sink started inside the file, when it had to be
    /// rebuilt with `skip_duration`.
    offset: Duration,
}

impl RodioHandle {
    fn open(mixer: &Mixer, track: &Track) -> Result<Self, AudioError> {
        let (sink, total) = create_sink_at(mixer, &track.path, Duration::ZERO)?;
        Ok(Self {
            mixer: mixer.clone(),
            path: track.path.clone(),
            sink,
            duration: total.or(track.duration).unwrap_or_default(),
            offset: Duration::ZERO,
        })
    }

    /// Swap in a fresh sink starting at `position`. The current sink keeps
    /// playing if the file can no longer be opened.
    fn rebuild_at(&mut self, position: Duration) -> Result<(), AudioError> {
        let (sink, _) = create_sink_at(&self.mixer, &self.path, position)?;
        if !self.sink.is_paused() {
            sink.play();
        }
        self.sink.stop();
        self.sink = sink;
        self.offset = position;
        Ok(())
    }
}

impl MediaHandle for RodioHandle {
    fn play(&mut self) {
        self.sink.play();
    }

    fn pause(&mut self) {
        self.sink.pause();
    }

    fn seek(&mut self, position: Duration) -> Result<(), AudioError> {
        let position = if self.duration.is_zero() {
            position
        } else {
            position.min(self.duration)
        };

        // A drained sink has nothing left to seek in, and a sink built with an
        // offset would seek relative to the skipped start.
        if self.offset.is_zero() && !self.sink.empty() {
            match self.sink.try_seek(position) {
                Ok(()) => return Ok(()),
                Err(err) => debug!(path = %self.path.display(), %err, "seek unsupported, rebuilding sink"),
            }
        }
        self.rebuild_at(position)
    }

    fn position(&self) -> Duration {
        let pos = self.offset + self.sink.get_pos();
        if self.duration.is_zero() {
            pos
        } else {
            pos.min(self.duration)
        }
    }

    fn duration(&self) -> Duration {
        self.duration
    }

    fn is_finished(&self) -> bool {
        self.sink.empty()
    }
}
