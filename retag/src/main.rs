// retag/src/main.rs
//! retag entry point.
//!
//! Parses the CLI, initializes logging, and dispatches to the command
//! implementations.

use anyhow::Result;
use clap::Parser;

use retag::cli::{Cli, Commands};
use retag::commands;
use retag::logger;

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.quiet {
        Some(log::LevelFilter::Off)
    } else if cli.debug {
        Some(log::LevelFilter::Debug)
    } else {
        None
    };
    logger::init_logger(level);

    match cli.command {
        Commands::Process(cmd) => commands::process::run(cmd),
        Commands::Check(cmd) => commands::check::run(cmd),
    }
}
