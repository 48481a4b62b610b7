use std::path::PathBuf;

use clap::Parser;

#[derive(Debug, Parser)]
#[command(name = "chill")]
#[command(about = "A small terminal music player")]
pub struct Cli {
    /// Music directory to scan (overrides `library.music_dir`)
    pub music_dir: Option<PathBuf>,

    /// Where to write log files (overrides `log.directory`)
    #[arg(long)]
    pub log_dir: Option<PathBuf>,

    /// Print the effective settings as TOML and exit
    #[arg(long)]
    pub print_config: bool,
}
