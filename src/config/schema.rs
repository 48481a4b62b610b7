use std::env;
use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Top-level application settings loaded from `config.toml`.
///
/// File format: TOML
/// Default path (Linux/XDG): `$XDG_CONFIG_HOME/chill/config.toml` or `~/.config/chill/config.toml`
///
/// Precedence (highest wins):
/// 1) Environment variables (prefix `CHILL__`, `__` as nested separator)
/// 2) Config file (if present)
/// 3) Struct defaults
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Settings {
    pub library: LibrarySettings,
    pub playback: PlaybackSettings,
    pub ui: UiSettings,
    pub log: LogSettings,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LibrarySettings {
    /// Directory rescanned before every library query.
    pub music_dir: PathBuf,
    /// File extensions to treat as audio (case-insensitive, without dot).
    pub extensions: Vec<String>,
    /// Whether to follow symlinks during scanning.
    pub follow_links: bool,
    /// Whether to include hidden files/directories (dotfiles).
    pub include_hidden: bool,
    /// Whether to recurse into subdirectories.
    pub recursive: bool,
    /// Optional cap on directory recursion depth.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_depth: Option<usize>,
}

impl Default for LibrarySettings {
    fn default() -> Self {
        Self {
            music_dir: default_music_dir(),
            extensions: vec!["mp3".into(), "flac".into(), "wav".into(), "ogg".into()],
            follow_links: true,
            include_hidden: false,
            recursive: true,
            max_depth: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct PlaybackSettings {
    /// How often the slider is refreshed while playing (milliseconds).
    pub poll_interval_ms: u64,
    /// Start the first track as soon as the playlist is loaded.
    pub autoplay: bool,
    /// What happens when the current track runs out.
    pub on_track_end: OnTrackEnd,
    /// What happens when the slider is dragged all the way to the end.
    pub seek_past_end: SeekPastEnd,
    /// Fraction of the track moved by a single relative seek (`H` / `L`).
    pub seek_step: f32,
}

impl PlaybackSettings {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }
}

impl Default for PlaybackSettings {
    fn default() -> Self {
        Self {
            poll_interval_ms: 1000,
            autoplay: false,
            on_track_end: OnTrackEnd::Stop,
            seek_past_end: SeekPastEnd::Rewind,
            seek_step: 0.05,
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum OnTrackEnd {
    /// Rewind to the start and park in the "ended" state.
    #[serde(alias = "end", alias = "rewind")]
    Stop,
    /// Move on to the next track in the playlist.
    #[serde(alias = "next", alias = "continue", alias = "auto-advance")]
    Advance,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum SeekPastEnd {
    /// Jump back to 0 and keep going (restarts an ended track).
    #[serde(alias = "restart")]
    Rewind,
    /// Behave exactly like the track ran out.
    #[serde(alias = "end", alias = "stop")]
    Finish,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct UiSettings {
    /// The text rendered inside the top header box.
    pub header_text: String,
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            header_text: " ~ chill, it's just music ~ ".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LogSettings {
    /// Directory receiving the daily `chill.log` files.
    pub directory: PathBuf,
    /// `tracing` filter directive; `RUST_LOG` wins when set.
    pub filter: String,
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            directory: default_log_dir(),
            filter: "info".to_string(),
        }
    }
}

/// `$HOME/Music`, or a relative `Music` when `HOME` is unset.
pub fn default_music_dir() -> PathBuf {
    env::var_os("HOME")
        .map(|home| PathBuf::from(home).join("Music"))
        .unwrap_or_else(|| PathBuf::from("Music"))
}

/// `$XDG_STATE_HOME/chill` or `~/.local/state/chill`, falling back to `./logs`.
pub fn default_log_dir() -> PathBuf {
    if let Some(state) = env::var_os("XDG_STATE_HOME") {
        return PathBuf::from(state).join("chill");
    }
    env::var_os("HOME")
        .map(|home| PathBuf::from(home).join(".local").join("state").join("chill"))
        .unwrap_or_else(|| PathBuf::from("logs"))
}
