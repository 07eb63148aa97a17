//! Hexdeck: a fake hex dump visualizer and a launcher for a terminal music player.
//!
//! The `fake_hex` binary animates a hex dump of the playing track under a
//! one-line status bar. The `watchdog` binary starts the player TUI, waits for
//! it, and then sweeps any visualizer or player processes left behind.

pub mod cli;
pub mod config;
pub mod dump;
pub mod logging;
pub mod output;
pub mod render;
pub mod runner;
pub mod signal;
pub mod term;
