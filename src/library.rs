//! Music library: the media index and the track listing built from it.
//!
//! `MediaIndex` remembers every audio file it has been shown; `list_tracks`
//! forces a rescan of the music directory and returns the entries that still
//! exist on disk, sorted by display name.

mod index;
mod model;
mod scan;

pub use index::{MediaIndex, list_tracks};
pub use model::Track;
