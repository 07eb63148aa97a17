//! Configuration management for Hexdeck.
//!
//! This module defines the structure of the optional `hexdeck.toml` file and
//! provides functionality to locate, load and parse it. Every field is
//! optional; the renderer and launcher fill gaps with their built-in defaults.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

/// File looked up in the working directory when no `--config` is given.
pub const DEFAULT_CONFIG_FILE: &str = "hexdeck.toml";

/// Top-level configuration structure corresponding to `hexdeck.toml`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// Settings for the `fake_hex` renderer.
    pub renderer: Option<RendererConfig>,
    /// Settings for the `watchdog` launcher.
    pub launcher: Option<LauncherConfig>,
}

/// Renderer settings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RendererConfig {
    /// Where dump lines come from ("external" or "builtin").
    pub producer: Option<ProducerKind>,
    /// External dump command; the file path is appended as the last argument.
    pub dump_cmd: Option<String>,
    /// Delay between frames in milliseconds.
    pub frame_ms: Option<u64>,
    /// Width used when the terminal size cannot be queried.
    pub fallback_width: Option<u16>,
    /// Status line template; `{name}` is replaced by the track name.
    pub status: Option<String>,
}

/// Source of the hex dump text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProducerKind {
    /// Run an external dump tool and read its stdout.
    External,
    /// Format the file in-process.
    Builtin,
}

/// Launcher settings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LauncherConfig {
    /// Path of the terminal UI executable.
    pub tui: Option<String>,
    /// Program name passed to the terminal UI as argv[0].
    pub tui_name: Option<String>,
    /// Exact process names terminated after the terminal UI exits, in order.
    pub sweep: Option<Vec<String>>,
    /// Delay in milliseconds between consecutive sweep requests.
    pub grace_ms: Option<u64>,
}

/// Loads and parses the configuration from a file path.
pub fn load_config(path: &Path) -> Result<Config> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config file {}", path.display()))?;
    let config: Config = toml::from_str(&raw)
        .with_context(|| format!("failed to parse config file {}", path.display()))?;
    Ok(config)
}

/// Resolves and loads the effective configuration.
///
/// An explicit path must exist; the default file is only used when present.
pub fn resolve_config(explicit: Option<&Path>, no_config: bool) -> Result<Config> {
    if no_config {
        return Ok(Config::default());
    }
    let path = explicit.map(Path::to_path_buf).or_else(default_config_path);
    match path {
        Some(path) => load_config(&path),
        None => Ok(Config::default()),
    }
}

fn default_config_path() -> Option<PathBuf> {
    let path = Path::new(DEFAULT_CONFIG_FILE);
    if path.exists() {
        Some(path.to_path_buf())
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_optional_fields() {
        let raw = r#"
[renderer]
producer = "builtin"
dump_cmd = "xxd -c 8"
frame_ms = 50
fallback_width = 100
status = "> {name}"

[launcher]
tui = "bin/player-ui"
tui_name = "player-ui"
sweep = ["fake_hex", "ffplay", "mpv"]
grace_ms = 350
"#;
        let config: Config = toml::from_str(raw).unwrap();
        let renderer = config.renderer.unwrap();
        assert_eq!(renderer.producer, Some(ProducerKind::Builtin));
        assert_eq!(renderer.dump_cmd.as_deref(), Some("xxd -c 8"));
        assert_eq!(renderer.frame_ms, Some(50));
        assert_eq!(renderer.fallback_width, Some(100));
        assert_eq!(renderer.status.as_deref(), Some("> {name}"));
        let launcher = config.launcher.unwrap();
        assert_eq!(launcher.tui.as_deref(), Some("bin/player-ui"));
        assert_eq!(launcher.tui_name.as_deref(), Some("player-ui"));
        assert_eq!(launcher.sweep.unwrap(), vec!["fake_hex", "ffplay", "mpv"]);
        assert_eq!(launcher.grace_ms, Some(350));
    }

    #[test]
    fn empty_file_is_all_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert!(config.renderer.is_none());
        assert!(config.launcher.is_none());
    }

    #[test]
    fn rejects_unknown_producer() {
        let raw = "[renderer]\nproducer = \"od\"\n";
        assert!(toml::from_str::<Config>(raw).is_err());
    }

    #[test]
    fn explicit_missing_file_is_an_error() {
        let path = Path::new("/nonexistent/hexdeck-test.toml");
        let err = resolve_config(Some(path), false).unwrap_err();
        assert!(err.to_string().contains("failed to read config file"));
    }

    #[test]
    fn no_config_ignores_explicit_path() {
        let path = Path::new("/nonexistent/hexdeck-test.toml");
        let config = resolve_config(Some(path), true).unwrap();
        assert!(config.renderer.is_none());
    }
}
