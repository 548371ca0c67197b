//! Binary crate for the `ir-weather` command-line tool.
//!
//! This crate focuses on:
//! - Parsing CLI arguments
//! - Interactive configuration and the location permission prompt
//! - Drawing the weather screen in the terminal

use std::process::ExitCode;

use clap::Parser;

mod cli;
mod logging;
mod prompt;
mod ui;

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cmd = cli::Cli::parse();
    cmd.run().await
}
