//! Application model types: `PlayerState` and `PlaybackState`.

use std::rc::Rc;
use std::time::Duration;

use crate::library::Track;

/// Where the player is in its lifecycle.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum PlaybackState {
    /// Nothing loaded; slider at 0.
    #[default]
    Stopped,
    Playing,
    Paused,
    /// The track ran out: slider at 0, handle rewound, not playing.
    Ended,
}

impl PlaybackState {
    pub fn label(self) -> &'static str {
        match self {
            Self::Stopped => "Stopped",
            Self::Playing => "Playing",
            Self::Paused => "Paused",
            Self::Ended => "Ended",
        }
    }
}

/// Immutable snapshot of everything the screen shows.
///
/// The controller replaces it wholesale on every change; nothing mutates a
/// published snapshot.
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerState {
    /// Playback progress in `[0, 1]`.
    pub slider_position: f32,
    /// Length of the loaded track, zero when unknown or nothing is loaded.
    pub duration: Duration,
    pub playback: PlaybackState,
    pub current_track: Option<Track>,
    /// `playlist[current_index + 1]`, if any.
    pub next_track: Option<Track>,
    pub current_index: usize,
    pub playlist: Rc<[Track]>,
}

impl Default for PlayerState {
    fn default() -> Self {
        Self {
            slider_position: 0.0,
            duration: Duration::ZERO,
            playback: PlaybackState::Stopped,
            current_track: None,
            next_track: None,
            current_index: 0,
            playlist: Rc::from(Vec::new()),
        }
    }
}

impl PlayerState {
    pub fn is_playing(&self) -> bool {
        self.playback == PlaybackState::Playing
    }

    pub fn has_ended(&self) -> bool {
        self.playback == PlaybackState::Ended
    }

    pub fn duration_ms(&self) -> f32 {
        self.duration.as_secs_f32() * 1000.0
    }
}
