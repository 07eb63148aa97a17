//! Sources of hex dump lines.
//!
//! The render loop only sees [`DumpSource`]: a lazy sequence of preformatted
//! lines for one file. Lines come either from an external dump tool
//! ([`ProducerDump`]) or from the in-process formatter ([`HexDump`]).

use std::fmt::Write as _;
use std::future::Future;
use std::path::Path;
use std::process::Stdio;

use anyhow::{anyhow, Context, Result};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncRead, AsyncReadExt, BufReader, Lines};
use tokio::process::{Child, ChildStdout, Command};

/// Bytes per dump row.
pub const DUMP_COLUMNS: usize = 16;

/// Default external dump command; the file path is appended as the last argument.
pub const DEFAULT_DUMP_CMD: &str = "xxd -c 16";

/// A lazy sequence of dump lines for a single file.
pub trait DumpSource {
    /// Returns the next line without its terminator.
    ///
    /// `None` means the source is finished, whether it ran out of input or
    /// failed to read.
    fn next_line(&mut self) -> impl Future<Output = Option<String>> + Send;

    /// Releases whatever backs the source.
    fn close(&mut self) -> impl Future<Output = ()> + Send {
        async {}
    }
}

/// Lines read from any buffered async reader.
pub struct LineDump<R> {
    lines: Lines<R>,
}

impl<R> LineDump<R>
where
    R: AsyncBufRead + Unpin + Send,
{
    pub fn new(reader: R) -> Self {
        Self {
            lines: reader.lines(),
        }
    }
}

impl<R> DumpSource for LineDump<R>
where
    R: AsyncBufRead + Unpin + Send,
{
    async fn next_line(&mut self) -> Option<String> {
        self.lines.next_line().await.ok().flatten()
    }
}

/// Dump lines produced by an external tool running as a child process.
pub struct ProducerDump {
    child: Child,
    lines: LineDump<BufReader<ChildStdout>>,
}

impl ProducerDump {
    /// Spawns `command` (split shell-style) with `path` as its final argument.
    pub fn spawn(command: &str, path: &Path) -> Result<Self> {
        let mut parts = shell_words::split(command)
            .with_context(|| format!("failed to parse dump command `{}`", command))?;
        if parts.is_empty() {
            return Err(anyhow!("empty dump command"));
        }
        let program = parts.remove(0);
        let mut cmd = Command::new(&program);
        cmd.args(&parts)
            .arg(path)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit());
        cmd.kill_on_drop(true);

        let mut child = cmd
            .spawn()
            .with_context(|| format!("failed to spawn dump producer {}", program))?;
        let stdout = child
            .stdout
            .take()
            .ok_or_else(|| anyhow!("dump producer {} has no stdout", program))?;
        tracing::debug!(program = %program, pid = ?child.id(), "dump producer started");
        Ok(Self {
            child,
            lines: LineDump::new(BufReader::new(stdout)),
        })
    }
}

impl DumpSource for ProducerDump {
    async fn next_line(&mut self) -> Option<String> {
        self.lines.next_line().await
    }

    async fn close(&mut self) {
        // A producer stopped early is still blocked writing to our pipe.
        if let Ok(None) = self.child.try_wait() {
            let _ = self.child.start_kill();
        }
        match self.child.wait().await {
            Ok(status) => tracing::debug!(code = ?status.code(), "dump producer exited"),
            Err(err) => tracing::debug!(error = %err, "failed to reap dump producer"),
        }
    }
}

/// xxd-style dump formatted in-process from any async reader.
pub struct HexDump<R> {
    reader: R,
    offset: u64,
    done: bool,
}

impl<R> HexDump<R>
where
    R: AsyncRead + Unpin + Send,
{
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            offset: 0,
            done: false,
        }
    }

    // Fills one row, stopping short only at end of input or on a read error.
    async fn read_row(&mut self, row: &mut [u8]) -> usize {
        let mut filled = 0;
        while filled < row.len() {
            match self.reader.read(&mut row[filled..]).await {
                Ok(0) | Err(_) => {
                    self.done = true;
                    break;
                }
                Ok(n) => filled += n,
            }
        }
        filled
    }
}

impl HexDump<BufReader<tokio::fs::File>> {
    /// Opens `path` for in-process dumping.
    pub async fn open(path: &Path) -> Result<Self> {
        let file = tokio::fs::File::open(path)
            .await
            .with_context(|| format!("failed to open {}", path.display()))?;
        Ok(Self::new(BufReader::new(file)))
    }
}

impl<R> DumpSource for HexDump<R>
where
    R: AsyncRead + Unpin + Send,
{
    async fn next_line(&mut self) -> Option<String> {
        if self.done {
            return None;
        }
        let mut row = [0u8; DUMP_COLUMNS];
        let filled = self.read_row(&mut row).await;
        if filled == 0 {
            return None;
        }
        let line = format_row(self.offset, &row[..filled], DUMP_COLUMNS);
        self.offset += filled as u64;
        Some(line)
    }
}

/// Formats one row the way `xxd -c <columns>` does: offset, 2-byte hex groups, text.
pub fn format_row(offset: u64, bytes: &[u8], columns: usize) -> String {
    let hex_width = columns * 2 + columns.saturating_sub(1) / 2;
    let mut hex = String::with_capacity(hex_width);
    for (idx, byte) in bytes.iter().enumerate() {
        if idx > 0 && idx % 2 == 0 {
            hex.push(' ');
        }
        let _ = write!(hex, "{:02x}", byte);
    }
    let text: String = bytes
        .iter()
        .map(|&b| {
            if b.is_ascii_graphic() || b == b' ' {
                b as char
            } else {
                '.'
            }
        })
        .collect();
    format!("{:08x}: {:<hex_width$}  {}", offset, hex, text)
}
