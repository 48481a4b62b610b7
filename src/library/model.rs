use std::path::PathBuf;
use std::time::Duration;

/// A playable audio file as the media index knows it.
#[derive(Debug, Clone, PartialEq)]
pub struct Track {
    pub path: PathBuf,
    /// File name including extension; the index sorts on this.
    pub display_name: String,
    pub title: String,
    pub artist: Option<String>,
    pub duration: Option<Duration>,
}

impl Track {
    /// "Artist - Title" when an artist tag is present, else the title.
    pub fn label(&self) -> String {
        match self.artist.as_deref().map(str::trim) {
            Some(a) if !a.is_empty() => format!("{} - {}", a, self.title),
            _ => self.title.clone(),
        }
    }
}
