//! fake_hex: animates a hex dump of the playing track above a status line.
//!
//! Runs until the dump is exhausted or SIGINT/SIGTERM arrives, redrawing the
//! status line in place after every dump line.

use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::builder::NonEmptyStringValueParser;
use clap::Parser;

use hexdeck::cli::{help_styles, parse_args};
use hexdeck::config::{resolve_config, ProducerKind};
use hexdeck::dump::{DumpSource, HexDump, ProducerDump};
use hexdeck::logging::init_logging;
use hexdeck::render::{RenderSettings, Renderer};
use hexdeck::signal::{install_stop_handler, StopFlag};
use hexdeck::term::terminal_width;

/// Command-line interface definition.
#[derive(Debug, Parser)]
#[command(
    name = "fake_hex",
    version,
    about = "Animated hex dump status bar for the playing track",
    styles = help_styles()
)]
struct Cli {
    /// Audio file being played.
    #[arg(allow_hyphen_values = true)]
    audio_file: PathBuf,
    /// Track name shown on the status line.
    #[arg(allow_hyphen_values = true, value_parser = NonEmptyStringValueParser::new())]
    tab_name: String,
    /// Path to hexdeck.toml configuration file.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Ignore any hexdeck.toml in the current directory.
    #[arg(long)]
    no_config: bool,
    /// Format the dump in-process instead of running the dump tool.
    #[arg(long)]
    builtin: bool,
    /// Delay between frames (ms).
    #[arg(long)]
    frame_ms: Option<u64>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli: Cli = parse_args();
    init_logging();

    let stop = StopFlag::new();
    install_stop_handler(stop.clone())?;

    std::fs::metadata(&cli.audio_file)
        .with_context(|| format!("stat {}", cli.audio_file.display()))?;

    let config = resolve_config(cli.config.as_deref(), cli.no_config)?;
    let settings = RenderSettings::resolve(config.renderer.as_ref(), cli.builtin, cli.frame_ms);
    tracing::info!(
        file = %cli.audio_file.display(),
        producer = ?settings.producer,
        "starting hex display"
    );

    match settings.producer {
        ProducerKind::External => {
            let source = ProducerDump::spawn(&settings.dump_cmd, &cli.audio_file)?;
            render(source, &cli.tab_name, &settings, stop).await
        }
        ProducerKind::Builtin => {
            let source = HexDump::open(&cli.audio_file).await?;
            render(source, &cli.tab_name, &settings, stop).await
        }
    }
}

async fn render<S: DumpSource>(
    mut source: S,
    track: &str,
    settings: &RenderSettings,
    stop: StopFlag,
) -> Result<()> {
    let fallback = settings.fallback_width;
    let stdout = io::stdout().lock();
    let mut renderer = Renderer::new(stdout, track, settings, || terminal_width(fallback), stop);
    let result = renderer.run(&mut source).await;
    source.close().await;
    let frames = result.context("failed to write to stdout")?;
    tracing::info!(frames, "hex display finished");
    Ok(())
}
