//! Audio-related small types: the backend seams and their error type.

use std::io;
use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

use crate::library::Track;

#[derive(Debug, Error)]
pub enum AudioError {
    #[error("failed to open {path:?}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to decode {path:?}: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: rodio::decoder::DecoderError,
    },
    #[error("no audio output device: {0}")]
    Output(#[from] rodio::StreamError),
}

/// One opened, ready-to-play track.
pub trait MediaHandle {
    fn play(&mut self);
    fn pause(&mut self);
    /// Move to an absolute position from the start of the track.
    fn seek(&mut self, position: Duration) -> Result<(), AudioError>;
    fn position(&self) -> Duration;
    /// Zero when the length could not be determined.
    fn duration(&self) -> Duration;
    /// The handle has played everything it had.
    fn is_finished(&self) -> bool;
}

/// Something that can open tracks for playback.
pub trait Output {
    type Handle: MediaHandle;

    /// Open `track`, paused at its start.
    fn open(&self, track: &Track) -> Result<Self::Handle, AudioError>;
}
