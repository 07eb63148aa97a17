//! Launching the terminal UI and sweeping up after it.
//!
//! The `Supervisor` starts the player TUI, waits for it to exit, and then asks
//! the OS to terminate any visualizer or player processes it left behind.
//! Sweeping is best-effort: nothing about it can fail the launcher.

use std::future::Future;
use std::path::PathBuf;
use std::process::Stdio;
use std::time::Duration;

use anyhow::{Context, Result};
use tokio::process::{Child, Command};

use crate::config::LauncherConfig;

const DEFAULT_TUI: &str = "cmd/tui/mytui";
const DEFAULT_TUI_NAME: &str = "mytui";
const DEFAULT_SWEEP: [&str; 2] = ["fake_hex", "ffplay"];
const DEFAULT_GRACE_MS: u64 = 200;

/// Runtime configuration for the launcher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchSettings {
    /// Executable started as the terminal UI.
    pub tui: PathBuf,
    /// argv[0] for the terminal UI.
    pub tui_name: String,
    /// Process names terminated after the UI exits, in order.
    pub sweep: Vec<String>,
    /// Delay between consecutive sweep requests.
    pub grace: Duration,
}

impl Default for LaunchSettings {
    fn default() -> Self {
        Self {
            tui: PathBuf::from(DEFAULT_TUI),
            tui_name: DEFAULT_TUI_NAME.to_string(),
            sweep: DEFAULT_SWEEP.iter().map(|s| s.to_string()).collect(),
            grace: Duration::from_millis(DEFAULT_GRACE_MS),
        }
    }
}

impl LaunchSettings {
    pub fn from_config(config: Option<&LauncherConfig>) -> Self {
        let defaults = Self::default();
        let Some(config) = config else {
            return defaults;
        };
        Self {
            tui: config.tui.as_ref().map(PathBuf::from).unwrap_or(defaults.tui),
            tui_name: config.tui_name.clone().unwrap_or(defaults.tui_name),
            sweep: config.sweep.clone().unwrap_or(defaults.sweep),
            grace: config
                .grace_ms
                .map(Duration::from_millis)
                .unwrap_or(defaults.grace),
        }
    }
}

/// Requests termination of every running process with an exact name.
pub trait Sweeper {
    /// Best-effort: no matching process, or a failed request, is not an error.
    fn terminate(&self, name: &str) -> impl Future<Output = ()> + Send;
}

/// Sweeps with the platform's kill-by-name tool.
#[derive(Debug, Clone, Copy, Default)]
pub struct Pkill;

impl Sweeper for Pkill {
    async fn terminate(&self, name: &str) {
        let mut command = kill_by_name_command(name);
        command
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null());
        match command.status().await {
            Ok(status) => tracing::debug!(name, code = ?status.code(), "sweep request sent"),
            Err(err) => tracing::debug!(name, error = %err, "sweep request failed"),
        }
    }
}

#[cfg(unix)]
fn kill_by_name_command(name: &str) -> Command {
    let mut command = Command::new("pkill");
    command.arg("-x").arg(name);
    command
}

#[cfg(not(unix))]
fn kill_by_name_command(name: &str) -> Command {
    let mut command = Command::new("taskkill");
    command.arg("/F").arg("/IM").arg(format!("{}.exe", name));
    command
}

/// Runs the terminal UI once and sweeps afterwards.
pub struct Supervisor<S> {
    settings: LaunchSettings,
    sweeper: S,
}

impl<S: Sweeper> Supervisor<S> {
    pub fn new(settings: LaunchSettings, sweeper: S) -> Self {
        Self { settings, sweeper }
    }

    /// Starts the UI, waits for it, then sweeps.
    ///
    /// Only a failed spawn is an error, in which case nothing is swept. The
    /// UI's exit code is returned for diagnostics; `None` means it was killed
    /// by a signal or could not be waited on.
    pub async fn run(&self) -> Result<Option<i32>> {
        let mut child = self.spawn_tui()?;
        let code = match child.wait().await {
            Ok(status) => status.code(),
            Err(err) => {
                tracing::debug!(error = %err, "failed to wait for terminal UI");
                None
            }
        };
        tracing::info!(code = ?code, "terminal UI exited");
        self.sweep().await;
        Ok(code)
    }

    /// Issues one termination request per configured name, `grace` apart.
    pub async fn sweep(&self) {
        for (idx, name) in self.settings.sweep.iter().enumerate() {
            if idx > 0 {
                tokio::time::sleep(self.settings.grace).await;
            }
            self.sweeper.terminate(name).await;
        }
    }

    fn spawn_tui(&self) -> Result<Child> {
        let mut command = Command::new(&self.settings.tui);
        #[cfg(unix)]
        command.arg0(&self.settings.tui_name);
        let child = command
            .spawn()
            .with_context(|| format!("failed to spawn {}", self.settings.tui.display()))?;
        tracing::info!(pid = ?child.id(), tui = %self.settings.tui.display(), "terminal UI started");
        Ok(child)
    }
}
