use std::io::Stdout;
use std::time::{Duration, Instant};

use crossterm::event::{self, Event};
use ratatui::{Terminal, backend::CrosstermBackend};
use tracing::info;

use crate::app::Controller;
use crate::audio::Output;
use crate::config;
use crate::ui::{self, ScreenLayout};

use super::RunError;
use super::input::{Command, command_for_key, command_for_mouse};

/// Longest wait for input when no poll tick is pending.
const IDLE_WAIT: Duration = Duration::from_millis(250);

/// Main terminal event loop: drives the controller's polling task, draws the
/// current state and forwards input. Returns `Ok(())` when the user quits.
pub fn run<O: Output>(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    settings: &config::Settings,
    controller: &mut Controller<O>,
) -> Result<(), RunError> {
    let seek_step = settings.playback.seek_step;
    let mut layout = ScreenLayout::default();
    let mut drawn_revision = None;

    loop {
        controller.poll(Instant::now());

        if drawn_revision != Some(controller.revision()) {
            terminal.draw(|frame| {
                layout = ui::draw(frame, controller.state(), &settings.ui, seek_step);
            })?;
            drawn_revision = Some(controller.revision());
        }

        let timeout = controller
            .next_poll_in(Instant::now())
            .map_or(IDLE_WAIT, |d| d.min(IDLE_WAIT));
        if !event::poll(timeout)? {
            continue;
        }

        let command = match event::read()? {
            Event::Key(key) => command_for_key(key, controller.state(), seek_step),
            Event::Mouse(mouse) => command_for_mouse(mouse, &layout),
            Event::Resize(..) => {
                drawn_revision = None;
                None
            }
            _ => None,
        };

        match command {
            Some(Command::Quit) => {
                info!("quit requested");
                return Ok(());
            }
            Some(Command::Intent(intent)) => controller.apply(intent),
            None => {}
        }
    }
}
