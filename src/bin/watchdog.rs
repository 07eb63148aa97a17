//! watchdog: runs the player TUI and cleans up stray playback processes.

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use hexdeck::cli::{help_styles, parse_args};
use hexdeck::config::resolve_config;
use hexdeck::logging::init_logging;
use hexdeck::runner::{LaunchSettings, Pkill, Supervisor};

/// Command-line interface definition.
#[derive(Debug, Parser)]
#[command(
    name = "watchdog",
    version,
    about = "Run the player TUI, then sweep leftover visualizer and player processes",
    styles = help_styles()
)]
struct Cli {
    /// Path to hexdeck.toml configuration file.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Ignore any hexdeck.toml in the current directory.
    #[arg(long)]
    no_config: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli: Cli = parse_args();
    init_logging();

    let config = resolve_config(cli.config.as_deref(), cli.no_config)?;
    let settings = LaunchSettings::from_config(config.launcher.as_ref());
    let supervisor = Supervisor::new(settings, Pkill);
    // The UI's own exit status never changes ours.
    supervisor.run().await?;
    Ok(())
}
