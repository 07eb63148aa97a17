//! Cooperative shutdown driven by termination signals.
//!
//! Signal delivery only flips a shared flag; the render loop polls it once per
//! frame and does all cleanup on its normal exit path.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::task::JoinHandle;

/// Shared stop request, set at most once.
#[derive(Debug, Clone, Default)]
pub struct StopFlag(Arc<AtomicBool>);

impl StopFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn request_stop(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_stopped(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Installs SIGINT and SIGTERM handlers that set `flag` on first delivery.
///
/// Handlers are registered before this returns, so a signal arriving while the
/// caller is still starting up is not lost.
#[cfg(unix)]
pub fn install_stop_handler(flag: StopFlag) -> Result<JoinHandle<()>> {
    use tokio::signal::unix::{signal, SignalKind};

    let mut sigint =
        signal(SignalKind::interrupt()).context("failed to install SIGINT handler")?;
    let mut sigterm =
        signal(SignalKind::terminate()).context("failed to install SIGTERM handler")?;
    Ok(tokio::spawn(async move {
        let name = tokio::select! {
            _ = sigint.recv() => "SIGINT",
            _ = sigterm.recv() => "SIGTERM",
        };
        tracing::debug!(signal = name, "stop requested");
        flag.request_stop();
    }))
}

#[cfg(not(unix))]
pub fn install_stop_handler(flag: StopFlag) -> Result<JoinHandle<()>> {
    let mut ctrl_c = tokio::signal::windows::ctrl_c().context("failed to install ctrl-c handler")?;
    Ok(tokio::spawn(async move {
        let _ = ctrl_c.recv().await;
        tracing::debug!(signal = "ctrl-c", "stop requested");
        flag.request_stop();
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn clones_share_the_flag() {
        let flag = StopFlag::new();
        let other = flag.clone();
        assert!(!other.is_stopped());
        flag.request_stop();
        assert!(other.is_stopped());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn sigterm_sets_the_flag() {
        let flag = StopFlag::new();
        let handle = install_stop_handler(flag.clone()).unwrap();
        unsafe {
            libc::kill(libc::getpid(), libc::SIGTERM);
        }
        tokio::time::timeout(Duration::from_secs(5), handle)
            .await
            .expect("handler did not observe SIGTERM")
            .unwrap();
        assert!(flag.is_stopped());
    }
}
