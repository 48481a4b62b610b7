//! Application module: the player state snapshot and the controller that
//! publishes it.
//!
//! The `Controller` in `app::controller` is the only thing that touches the
//! playback engine; the screen reads `PlayerState` and sends `Intent`s back.

mod controller;
mod state;
mod ticker;

pub use controller::{Controller, Intent};
pub use state::{PlaybackState, PlayerState};
