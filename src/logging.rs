//! Diagnostic logging setup.
//!
//! Stdout belongs to the display, so logs are written to stderr only when
//! `HEXDECK_LOG` is enabled and are discarded otherwise.

use std::io;

use tracing_subscriber::EnvFilter;

pub const LOG_ENV: &str = "HEXDECK_LOG";

pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    if log_enabled(std::env::var(LOG_ENV).ok().as_deref()) {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(io::stderr)
            .try_init();
    } else {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(io::sink)
            .try_init();
    }
}

fn log_enabled(value: Option<&str>) -> bool {
    matches!(
        value.map(|v| v.trim().to_ascii_lowercase()).as_deref(),
        Some("1") | Some("true") | Some("yes") | Some("on")
    )
}
