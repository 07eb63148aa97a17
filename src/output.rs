//! Fitting dump and status lines to the terminal width.
//!
//! Widths are measured in terminal display columns, so wide characters in a
//! track name count twice and are never split. The hex line may fill the
//! whole row while the status line keeps its last cell free for the cursor.

use strip_ansi_escapes::strip;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Default status line; `{name}` is replaced by the track name.
pub const DEFAULT_STATUS_TEMPLATE: &str =
    "▶正在播放 {name}       按q退出  p暂停/播放  x跳过此曲";

/// Returns the display width of `text` in terminal columns.
pub fn columns(text: &str) -> usize {
    UnicodeWidthStr::width(text)
}

/// Returns the longest prefix of `text` that fits in `max` columns.
pub fn truncate_columns(text: &str, max: usize) -> &str {
    let mut used = 0;
    for (idx, ch) in text.char_indices() {
        let w = UnicodeWidthChar::width(ch).unwrap_or(0);
        if used + w > max {
            return &text[..idx];
        }
        used += w;
    }
    text
}

/// Fits a dump line to a row of `width` columns.
pub fn fit_dump_line(line: &str, width: usize) -> &str {
    if columns(line) >= width {
        truncate_columns(line, width)
    } else {
        line
    }
}

/// Fits the status text to a row of `width` columns, leaving the last cell free.
///
/// Empty when `width <= 1`.
pub fn fit_status(status: &str, width: usize) -> &str {
    if columns(status) < width {
        return status;
    }
    if width > 1 {
        truncate_columns(status, width - 1)
    } else {
        ""
    }
}

/// Left-justifies `text` and pads it with spaces to exactly `width` columns.
pub fn pad_columns(text: &str, width: usize) -> String {
    let used = columns(text);
    let mut out = String::with_capacity(text.len() + width.saturating_sub(used));
    out.push_str(text);
    for _ in used..width {
        out.push(' ');
    }
    out
}

/// Removes ANSI escape sequences and control characters from `text`.
pub fn sanitize_text(text: &str) -> String {
    let stripped = strip(text.as_bytes());
    String::from_utf8_lossy(&stripped)
        .chars()
        .filter(|ch| !ch.is_control())
        .collect()
}

/// Builds a status line from a template and a track name.
pub fn render_status(template: &str, name: &str) -> String {
    template.replace("{name}", &sanitize_text(name))
}
