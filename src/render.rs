//! The fake hex dump display.
//!
//! Each frame prints one dump line (scrolling) and then redraws a status line
//! in place underneath it, sized to the current terminal width.

use std::io::{self, Write};
use std::time::Duration;

use crate::config::{ProducerKind, RendererConfig};
use crate::dump::{DumpSource, DEFAULT_DUMP_CMD};
use crate::output::{fit_dump_line, fit_status, pad_columns, render_status, DEFAULT_STATUS_TEMPLATE};
use crate::signal::StopFlag;
use crate::term::FALLBACK_WIDTH;

const DEFAULT_FRAME_MS: u64 = 30;

/// Runtime configuration derived from CLI arguments and the config file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderSettings {
    pub producer: ProducerKind,
    pub dump_cmd: String,
    pub frame_delay: Duration,
    pub fallback_width: u16,
    pub status_template: String,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            producer: ProducerKind::External,
            dump_cmd: DEFAULT_DUMP_CMD.to_string(),
            frame_delay: Duration::from_millis(DEFAULT_FRAME_MS),
            fallback_width: FALLBACK_WIDTH,
            status_template: DEFAULT_STATUS_TEMPLATE.to_string(),
        }
    }
}

impl RenderSettings {
    /// Merges config values over the defaults; CLI overrides win over both.
    pub fn resolve(config: Option<&RendererConfig>, builtin: bool, frame_ms: Option<u64>) -> Self {
        let defaults = Self::default();
        let config = config.cloned().unwrap_or_default();
        let producer = if builtin {
            ProducerKind::Builtin
        } else {
            config.producer.unwrap_or(defaults.producer)
        };
        let frame_delay = frame_ms
            .or(config.frame_ms)
            .map(Duration::from_millis)
            .unwrap_or(defaults.frame_delay);
        Self {
            producer,
            dump_cmd: config.dump_cmd.unwrap_or(defaults.dump_cmd),
            frame_delay,
            fallback_width: config.fallback_width.unwrap_or(defaults.fallback_width),
            status_template: config.status.unwrap_or(defaults.status_template),
        }
    }
}

/// Draws dump lines and the status line onto `out`.
pub struct Renderer<W, F> {
    out: W,
    status: String,
    width: F,
    frame_delay: Duration,
    stop: StopFlag,
}

impl<W, F> Renderer<W, F>
where
    W: Write,
    F: FnMut() -> usize,
{
    pub fn new(out: W, track: &str, settings: &RenderSettings, width: F, stop: StopFlag) -> Self {
        Self {
            out,
            status: render_status(&settings.status_template, track),
            width,
            frame_delay: settings.frame_delay,
            stop,
        }
    }

    /// Renders until the source is exhausted or a stop is requested.
    ///
    /// Returns the number of frames drawn. Only write failures are errors;
    /// read failures end the loop like end of input.
    pub async fn run<S: DumpSource>(&mut self, source: &mut S) -> io::Result<usize> {
        let mut frames = 0;
        loop {
            if self.stop.is_stopped() {
                tracing::debug!(frames, "render loop stopped by signal");
                break;
            }
            let width = (self.width)();
            let Some(line) = source.next_line().await else {
                tracing::debug!(frames, "dump stream ended");
                break;
            };
            self.draw_frame(&line, width)?;
            frames += 1;
            tokio::time::sleep(self.frame_delay).await;
        }
        Ok(frames)
    }

    fn draw_frame(&mut self, line: &str, width: usize) -> io::Result<()> {
        let line = fit_dump_line(line, width);
        let status = fit_status(&self.status, width);
        write!(self.out, "\r{}\n", line)?;
        write!(self.out, "\r{}", pad_columns(status, width))?;
        self.out.flush()
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}
