use std::io;

use clap::Parser;
use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use crossterm::execute;
use crossterm::terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode};
use ratatui::{Terminal, backend::CrosstermBackend};
use thiserror::Error;
use tracing::{info, warn};

use crate::audio::AudioError;

mod cli;
mod event_loop;
mod input;
mod logging;
mod settings;
mod startup;

#[derive(Debug, Error)]
pub enum RunError {
    #[error("terminal I/O failed: {0}")]
    Io(#[from] io::Error),
    #[error(transparent)]
    Audio(#[from] AudioError),
    #[error("could not render settings: {0}")]
    PrintConfig(#[from] toml::ser::Error),
    #[error("could not install logger: {0}")]
    Logging(#[from] tracing::subscriber::SetGlobalDefaultError),
}

pub fn run() -> Result<(), RunError> {
    let cli = cli::Cli::parse();
    let (mut settings, config_warning) = settings::load_settings();

    if let Some(dir) = cli.music_dir {
        settings.library.music_dir = dir;
    }
    if let Some(dir) = cli.log_dir {
        settings.log.directory = dir;
    }

    if cli.print_config {
        print!("{}", toml::to_string_pretty(&settings)?);
        return Ok(());
    }

    let _log_guard = logging::init(&settings.log)?;
    if let Some(msg) = config_warning {
        warn!("{msg}");
    }
    info!(version = env!("CARGO_PKG_VERSION"), "starting chill");

    let mut controller = startup::build_controller(&settings)?;

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let run_result = event_loop::run(&mut terminal, &settings, &mut controller);
    controller.shutdown();

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    run_result
}
