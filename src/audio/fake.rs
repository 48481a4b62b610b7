//! In-memory `Output` used to drive the engine and controller in tests.

use std::cell::{Cell, RefCell};
use std::io;
use std::path::PathBuf;
use std::rc::Rc;
use std::time::Duration;

use crate::library::Track;

use super::types::{AudioError, MediaHandle, Output};

#[derive(Default)]
struct Shared {
    position: Cell<Duration>,
    playing: Cell<bool>,
    finished: Cell<bool>,
    live: Cell<usize>,
    opened: RefCell<Vec<PathBuf>>,
    broken: RefCell<Vec<PathBuf>>,
}

/// Cloning shares state, so a test can keep one copy and hand the other to
/// the engine.
#[derive(Clone, Default)]
pub(crate) struct FakeOutput {
    shared: Rc<Shared>,
}

impl FakeOutput {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Pretend the playhead moved.
    pub(crate) fn set_position(&self, position: Duration) {
        self.shared.position.set(position);
    }

    pub(crate) fn position(&self) -> Duration {
        self.shared.position.get()
    }

    pub(crate) fn set_finished(&self, finished: bool) {
        self.shared.finished.set(finished);
    }

    pub(crate) fn is_playing(&self) -> bool {
        self.shared.playing.get()
    }

    pub(crate) fn live_handles(&self) -> usize {
        self.shared.live.get()
    }

    pub(crate) fn opened(&self) -> Vec<PathBuf> {
        self.shared.opened.borrow().clone()
    }

    /// Make every later `open` of `path` fail.
    pub(crate) fn break_path(&self, path: impl Into<PathBuf>) {
        self.shared.broken.borrow_mut().push(path.into());
    }
}

pub(crate) struct FakeHandle {
    shared: Rc<Shared>,
    duration: Duration,
}

impl Output for FakeOutput {
    type Handle = FakeHandle;

    fn open(&self, track: &Track) -> Result<FakeHandle, AudioError> {
        if self.shared.broken.borrow().contains(&track.path) {
            return Err(AudioError::Open {
                path: track.path.clone(),
                source: io::Error::new(io::ErrorKind::NotFound, "gone"),
            });
        }
        self.shared.opened.borrow_mut().push(track.path.clone());
        self.shared.live.set(self.shared.live.get() + 1);
        self.shared.position.set(Duration::ZERO);
        self.shared.playing.set(false);
        self.shared.finished.set(false);
        Ok(FakeHandle {
            shared: self.shared.clone(),
            duration: track.duration.unwrap_or_default(),
        })
    }
}

impl MediaHandle for FakeHandle {
    fn play(&mut self) {
        self.shared.playing.set(true);
    }

    fn pause(&mut self) {
        self.shared.playing.set(false);
    }

    fn seek(&mut self, position: Duration) -> Result<(), AudioError> {
        self.shared.position.set(position);
        self.shared.finished.set(false);
        Ok(())
    }

    fn position(&self) -> Duration {
        self.shared.position.get()
    }

    fn duration(&self) -> Duration {
        self.duration
    }

    fn is_finished(&self) -> bool {
        self.shared.finished.get()
    }
}

impl Drop for FakeHandle {
    fn drop(&mut self) {
        self.shared.live.set(self.shared.live.get() - 1);
        self.shared.playing.set(false);
    }
}

pub(crate) fn track(name: &str, secs: u64) -> Track {
    Track {
        path: PathBuf::from("/music").join(name),
        display_name: name.to_string(),
        title: name.trim_end_matches(".mp3").to_string(),
        artist: None,
        duration: Some(Duration::from_secs(secs)),
    }
}
