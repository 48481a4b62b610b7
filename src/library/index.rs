use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::config::LibrarySettings;

use super::model::Track;
use super::scan::{audio_files, display_name_of, probe};

/// In-memory media index: path -> display name.
///
/// Entries are only ever added; files deleted after indexing linger until a
/// query notices they are gone.
#[derive(Debug, Default)]
pub struct MediaIndex {
    entries: BTreeMap<PathBuf, String>,
}

impl MediaIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Index a single file. Returns `false` if it was already known.
    pub fn insert(&mut self, path: impl Into<PathBuf>) -> bool {
        let path = path.into();
        if self.entries.contains_key(&path) {
            return false;
        }
        let name = display_name_of(&path);
        self.entries.insert(path, name);
        true
    }

    /// Walk `dir` and index every audio file found. Returns how many were new.
    pub fn rescan(&mut self, dir: &Path, settings: &LibrarySettings) -> usize {
        debug!(dir = %dir.display(), "rescanning music directory");
        let mut added = 0;
        for path in audio_files(dir, settings) {
            if self.insert(path) {
                added += 1;
            }
        }
        debug!(added, total = self.len(), "rescan finished");
        added
    }

    /// Indexed tracks whose file still exists, sorted by display name.
    pub fn query(&self) -> Vec<Track> {
        let mut tracks: Vec<Track> = self
            .entries
            .iter()
            .filter_map(|(path, name)| {
                if path.is_file() {
                    Some(probe(path, name))
                } else {
                    warn!(path = %path.display(), "indexed file does not exist");
                    None
                }
            })
            .collect();

        tracks.sort_by(|a, b| {
            a.display_name
                .to_lowercase()
                .cmp(&b.display_name.to_lowercase())
                .then_with(|| a.path.cmp(&b.path))
        });
        tracks
    }
}

/// Rescan `dir` so fresh files show up, then return every existing track.
///
/// Never fails: an empty result is a valid outcome.
pub fn list_tracks(index: &mut MediaIndex, dir: &Path, settings: &LibrarySettings) -> Vec<Track> {
    index.rescan(dir, settings);
    let tracks = index.query();
    if index.is_empty() {
        warn!(dir = %dir.display(), "no audio files found");
    } else if tracks.is_empty() {
        warn!(indexed = index.len(), "every indexed audio file is missing");
    } else {
        info!(count = tracks.len(), "found audio files");
    }
    tracks
}
