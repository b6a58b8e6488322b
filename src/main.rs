//! Application entry point.
//!
//! Parses command-line arguments and delegates execution to [`runner::run`].

use clap::Parser;
use ninjaconf::{cli::Cli, runner};
use std::io;
use std::process::ExitCode;
use tracing::Level;
use tracing_subscriber::fmt;

fn main() -> ExitCode {
    let cli = Cli::parse();
    let max_level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::ERROR
    };
    // Logs go to stderr so `-o -` output stays clean.
    fmt()
        .with_max_level(max_level)
        .with_writer(io::stderr)
        .init();
    match runner::run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            let chain = format!("{err:#}");
            tracing::error!(error = %chain, "generation failed");
            ExitCode::FAILURE
        }
    }
}
