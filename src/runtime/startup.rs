use tracing::info;

use crate::app::Controller;
use crate::audio::{PlaybackEngine, RodioOutput};
use crate::config;
use crate::library::{MediaIndex, list_tracks};

use super::RunError;

/// Discover the playlist and hand it to a controller bound to the default
/// audio device.
pub fn build_controller(settings: &config::Settings) -> Result<Controller<RodioOutput>, RunError> {
    let music_dir = &settings.library.music_dir;
    info!(music_dir = %music_dir.display(), "scanning library");

    let mut index = MediaIndex::new();
    let tracks = list_tracks(&mut index, music_dir, &settings.library);

    let output = RodioOutput::open_default()?;
    let mut controller = Controller::new(PlaybackEngine::new(output), settings.playback.clone());
    controller.load_playlist(tracks);
    Ok(controller)
}
