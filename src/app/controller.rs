use std::rc::Rc;
use std::time::{Duration, Instant};

use tracing::{debug, info, warn};

use crate::audio::{Output, PlaybackEngine, fraction_of};
use crate::config::{OnTrackEnd, PlaybackSettings, SeekPastEnd};
use crate::library::Track;

use super::state::{PlaybackState, PlayerState};
use super::ticker::PollTicker;

/// Something the user asked the player to do.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Intent {
    TogglePlayPause,
    Stop,
    Next,
    Previous,
    /// Slider dragged to this fraction of the track.
    Seek(f32),
}

/// Mediates between the screen and the playback engine.
///
/// Every mutation publishes a fresh `PlayerState`. While playing, a
/// `PollTicker` drives `tick`, which moves the slider and notices when the
/// track has run out.
pub struct Controller<O: Output> {
    engine: PlaybackEngine<O>,
    settings: PlaybackSettings,
    ticker: PollTicker,
    state: PlayerState,
    revision: u64,
}

impl<O: Output> Controller<O> {
    pub fn new(engine: PlaybackEngine<O>, settings: PlaybackSettings) -> Self {
        let ticker = PollTicker::new(settings.poll_interval());
        Self {
            engine,
            settings,
            ticker,
            state: PlayerState::default(),
            revision: 0,
        }
    }

    /// The latest published snapshot.
    pub fn state(&self) -> &PlayerState {
        &self.state
    }

    /// Bumped on every publish.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Replace the playlist and point at its first entry.
    pub fn load_playlist(&mut self, tracks: Vec<Track>) {
        self.ticker.cancel();
        self.engine.release();

        let playlist: Rc<[Track]> = Rc::from(tracks);
        info!(tracks = playlist.len(), "playlist loaded");
        self.publish(PlayerState {
            current_track: playlist.first().cloned(),
            next_track: playlist.get(1).cloned(),
            current_index: 0,
            playlist,
            ..PlayerState::default()
        });

        if self.settings.autoplay && !self.state.playlist.is_empty() {
            self.play_track_at(0);
        }
    }

    pub fn apply(&mut self, intent: Intent) {
        debug!(?intent, "intent");
        match intent {
            Intent::TogglePlayPause => self.toggle_play_pause(),
            Intent::Stop => self.stop(),
            Intent::Next => self.next_track(),
            Intent::Previous => self.previous_track(),
            Intent::Seek(value) => self.seek(value),
        }
    }

    pub fn play(&mut self) {
        match self.state.playback {
            PlaybackState::Playing => return,
            PlaybackState::Ended => self.engine.rewind(),
            PlaybackState::Stopped | PlaybackState::Paused => {}
        }

        if !self.engine.is_loaded() {
            let Some(track) = self.state.current_track.clone() else {
                debug!("nothing to play");
                return;
            };
            if let Err(err) = self.engine.load(&track) {
                warn!(%err, "could not load track");
                return;
            }
        }

        self.engine.play();
        self.ticker.start(Instant::now());
        self.publish(PlayerState {
            playback: PlaybackState::Playing,
            duration: self.engine.duration(),
            slider_position: self.engine.position_fraction(),
            ..self.state.clone()
        });
    }

    pub fn pause(&mut self) {
        if self.state.playback != PlaybackState::Playing {
            return;
        }
        self.engine.pause();
        self.ticker.cancel();
        self.publish(PlayerState {
            playback: PlaybackState::Paused,
            slider_position: self.engine.position_fraction(),
            ..self.state.clone()
        });
    }

    pub fn toggle_play_pause(&mut self) {
        if self.state.is_playing() {
            self.pause();
        } else {
            self.play();
        }
    }

    /// Release the engine and return to the start.
    pub fn stop(&mut self) {
        self.engine.stop();
        self.ticker.cancel();
        self.publish(PlayerState {
            playback: PlaybackState::Stopped,
            slider_position: 0.0,
            ..self.state.clone()
        });
    }

    /// Slider drag to `value` (a fraction of the track).
    pub fn seek(&mut self, value: f32) {
        if !self.engine.is_loaded() {
            return;
        }
        if value >= 1.0 {
            self.seek_past_end();
            return;
        }

        self.engine.seek(value);
        let playback = match self.state.playback {
            PlaybackState::Ended => PlaybackState::Paused,
            other => other,
        };
        self.publish(PlayerState {
            playback,
            slider_position: self.engine.position_fraction(),
            ..self.state.clone()
        });
    }

    fn seek_past_end(&mut self) {
        match self.settings.seek_past_end {
            SeekPastEnd::Finish => self.finish_track(),
            SeekPastEnd::Rewind => {
                self.engine.rewind();
                let playback = match self.state.playback {
                    PlaybackState::Ended => {
                        self.engine.play();
                        self.ticker.start(Instant::now());
                        PlaybackState::Playing
                    }
                    other => other,
                };
                self.publish(PlayerState {
                    playback,
                    slider_position: 0.0,
                    ..self.state.clone()
                });
            }
        }
    }

    pub fn next_track(&mut self) {
        let next = self.state.current_index + 1;
        if next < self.state.playlist.len() {
            self.play_track_at(next);
        } else {
            debug!("already at the last track");
        }
    }

    pub fn previous_track(&mut self) {
        match self.state.current_index.checked_sub(1) {
            Some(prev) if prev < self.state.playlist.len() => self.play_track_at(prev),
            _ => debug!("already at the first track"),
        }
    }

    /// One polling tick. Only does anything while playing.
    pub fn tick(&mut self) {
        if self.state.playback != PlaybackState::Playing {
            return;
        }

        let position = self.engine.position();
        let duration = self.engine.duration();
        if self.engine.is_finished() || (!duration.is_zero() && position >= duration) {
            self.finish_track();
            return;
        }

        self.publish(PlayerState {
            slider_position: fraction_of(position, duration),
            duration,
            ..self.state.clone()
        });
    }

    /// Run `tick` if the polling period has elapsed at `now`.
    pub fn poll(&mut self, now: Instant) {
        if self.ticker.due(now) {
            self.tick();
        }
    }

    /// How long the caller may sleep before the next `poll` matters.
    pub fn next_poll_in(&self, now: Instant) -> Option<Duration> {
        self.ticker.time_until(now)
    }

    /// Stop polling and let go of the engine.
    pub fn shutdown(&mut self) {
        self.ticker.cancel();
        self.engine.release();
    }

    fn play_track_at(&mut self, index: usize) {
        let Some(track) = self.state.playlist.get(index).cloned() else {
            return;
        };
        let loaded = self.engine.load(&track);

        let mut next = PlayerState {
            current_track: Some(track),
            next_track: self.state.playlist.get(index + 1).cloned(),
            current_index: index,
            slider_position: 0.0,
            ..self.state.clone()
        };
        match loaded {
            Ok(()) => {
                self.engine.play();
                self.ticker.start(Instant::now());
                next.playback = PlaybackState::Playing;
                next.duration = self.engine.duration();
            }
            Err(err) => {
                warn!(%err, index, "could not load track");
                self.ticker.cancel();
                next.playback = PlaybackState::Stopped;
                next.duration = Duration::ZERO;
            }
        }
        self.publish(next);
    }

    fn finish_track(&mut self) {
        let next = self.state.current_index + 1;
        if self.settings.on_track_end == OnTrackEnd::Advance && next < self.state.playlist.len() {
            debug!(next, "track ended, advancing");
            self.play_track_at(next);
            return;
        }

        debug!("track ended");
        self.ticker.cancel();
        self.engine.pause();
        self.engine.rewind();
        self.publish(PlayerState {
            playback: PlaybackState::Ended,
            slider_position: 0.0,
            ..self.state.clone()
        });
    }

    fn publish(&mut self, next: PlayerState) {
        // Polling runs exactly while playing.
        debug_assert_eq!(
            self.ticker.is_active(),
            next.playback == PlaybackState::Playing,
            "ticker out of step with {:?}",
            next.playback
        );
        if next.playback != self.state.playback {
            debug!(
                from = self.state.playback.label(),
                to = next.playback.label(),
                "playback state changed"
            );
        }
        self.state = next;
        self.revision += 1;
    }
}

impl<O: Output> Drop for Controller<O> {
    fn drop(&mut self) {
        self.shutdown();
    }
}
