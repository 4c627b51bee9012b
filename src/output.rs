//! User-facing status output and diagnostic logging
//!
//! Progress lines for the user are printed to stdout with a colored marker,
//! the same way for every command. Diagnostics (HTTP calls, subprocess
//! invocations, soft failures) go through `tracing` and end up on stderr,
//! filtered by `RUST_LOG` or the `-v` flag.

use std::fmt::Display;

use colored::Colorize;
use tracing_subscriber::EnvFilter;

/// Initialize the global `tracing` subscriber
///
/// `RUST_LOG` wins when set. Otherwise the verbosity count picks the level:
/// 0 = warn, 1 = info, 2 = debug, 3+ = trace.
pub fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("orz_cli={level}")));

    // A second init (e.g. from tests) is not an error worth reporting
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

/// A step that is about to happen
pub fn step(message: impl Display) {
    println!("{} {}", ">".bright_green(), message);
}

/// A step that completed
pub fn success(message: impl Display) {
    println!("{} {}", "+".bright_green(), message);
}

/// Neutral information, e.g. a value the user should look at
pub fn info(message: impl Display) {
    println!("{} {}", "i".bright_cyan(), message);
}

pub fn warn(message: impl Display) {
    eprintln!("{} {}", "!".yellow(), message.to_string().yellow());
}

pub fn fail(message: impl Display) {
    eprintln!("{} {}", "x".red(), message.to_string().red());
}

/// Print a labelled value, `> Label: value`
pub fn field(label: &str, value: impl Display) {
    println!(
        "{} {}: {}",
        ">".bright_green(),
        label,
        value.to_string().bright_cyan()
    );
}
