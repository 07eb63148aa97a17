//! Terminal size queries.

/// Width used when the terminal size cannot be determined.
pub const FALLBACK_WIDTH: u16 = 80;

/// Returns the current width of the terminal attached to stdout.
///
/// Queried fresh on every call since the terminal may be resized at any time.
pub fn terminal_width(fallback: u16) -> usize {
    resolve_width(query_columns(), fallback)
}

/// Resolves a raw column query, substituting `fallback` for failures and zero.
pub fn resolve_width(columns: Option<u16>, fallback: u16) -> usize {
    match columns {
        Some(cols) if cols > 0 => cols as usize,
        _ => fallback as usize,
    }
}

#[cfg(unix)]
fn query_columns() -> Option<u16> {
    // SAFETY: TIOCGWINSZ only writes into the winsize struct we pass.
    unsafe {
        let mut size: libc::winsize = std::mem::zeroed();
        if libc::ioctl(libc::STDOUT_FILENO, libc::TIOCGWINSZ, &mut size) == 0 {
            Some(size.ws_col)
        } else {
            None
        }
    }
}

#[cfg(not(unix))]
fn query_columns() -> Option<u16> {
    crossterm::terminal::size().ok().map(|(cols, _)| cols)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failed_query_uses_fallback() {
        assert_eq!(resolve_width(None, FALLBACK_WIDTH), 80);
        assert_eq!(resolve_width(Some(0), FALLBACK_WIDTH), 80);
        assert_eq!(resolve_width(Some(132), FALLBACK_WIDTH), 132);
    }

    #[test]
    fn repeated_queries_agree() {
        assert_eq!(terminal_width(FALLBACK_WIDTH), terminal_width(FALLBACK_WIDTH));
    }
}
