//! Playback engine wrapper and the rodio backend behind it.
//!
//! `PlaybackEngine` owns at most one live `MediaHandle` and turns the
//! controller's transport calls into calls on it. Calls that arrive with no
//! handle loaded are ignored.

mod engine;
mod output;
mod sink;
mod types;

pub use engine::PlaybackEngine;
pub use output::RodioOutput;
pub use types::{AudioError, MediaHandle, Output};

pub(crate) use engine::fraction_of;

#[cfg(test)]
pub(crate) mod fake;
#[cfg(test)]
mod tests;
