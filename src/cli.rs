//! Argument parsing helpers shared by both binaries.

use clap::builder::styling::{AnsiColor, Effects, Style};
use clap::builder::Styles;
use clap::error::ErrorKind;
use clap::Parser;

/// Exit status for usage errors and fatal startup errors.
pub const EXIT_FAILURE: i32 = 1;

pub fn help_styles() -> Styles {
    Styles::styled()
        .header(
            Style::new()
                .fg_color(Some(AnsiColor::Cyan.into()))
                .effects(Effects::BOLD),
        )
        .usage(
            Style::new()
                .fg_color(Some(AnsiColor::Green.into()))
                .effects(Effects::BOLD),
        )
        .literal(Style::new().fg_color(Some(AnsiColor::Yellow.into())))
        .placeholder(Style::new().fg_color(Some(AnsiColor::Magenta.into())))
        .valid(Style::new().fg_color(Some(AnsiColor::Green.into())))
        .invalid(
            Style::new()
                .fg_color(Some(AnsiColor::Red.into()))
                .effects(Effects::BOLD),
        )
}

/// Parses the process arguments, exiting with status 1 on any usage error.
///
/// `--help` and `--version` keep clap's own behavior and exit 0.
pub fn parse_args<T: Parser>() -> T {
    match T::try_parse() {
        Ok(cli) => cli,
        Err(err) => exit_on_usage_error(err),
    }
}

fn exit_on_usage_error(err: clap::Error) -> ! {
    if matches!(err.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) {
        err.exit();
    }
    let _ = err.print();
    std::process::exit(EXIT_FAILURE);
}
