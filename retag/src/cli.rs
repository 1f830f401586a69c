// retag/src/cli.rs
//! This file defines the command-line interface (CLI) for the retag
//! binary, including all available commands and their arguments.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Top-level CLI definition.
#[derive(Parser, Debug)]
#[command(
    name = "retag",
    version = env!("CARGO_PKG_VERSION"),
    about = "Rewrite routing tags and records in log pipelines",
    long_about = "Retag applies an ordered list of declarative rules to structured records: \
match a field against a pattern, optionally replace the field, extend the routing tag, \
suppress the record, or stop further evaluation. Records whose tag did not change are \
suppressed to prevent routing cycles.",
    arg_required_else_help = true,
)]
pub struct Cli {
    /// Disable informational messages
    #[arg(long, short = 'q', help = "Suppress all informational and debug messages.")]
    pub quiet: bool,

    /// Enable debug logging (overrides RUST_LOG for the 'retag' crates to DEBUG)
    #[arg(long, short = 'd', help = "Enable debug logging.")]
    pub debug: bool,

    /// The subcommand to run
    #[command(subcommand)]
    pub command: Commands,
}

/// All available commands for the `retag` CLI.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Rewrites a batch of JSON-line records arriving under a routing tag.
    #[command(about = "Rewrites a batch of JSON-line records arriving under a routing tag.")]
    Process(ProcessCommand),

    /// Validates a rewrite configuration without processing any records.
    #[command(about = "Validates a rewrite configuration without processing any records.")]
    Check(CheckCommand),
}

/// Arguments for the `process` command.
#[derive(Parser, Debug)]
pub struct ProcessCommand {
    /// Path to the rewrite configuration file (YAML).
    #[arg(long = "config", short = 'c', value_name = "FILE", help = "Path to the rewrite configuration file (YAML).")]
    pub config: PathBuf,

    /// The routing tag the batch arrives with.
    #[arg(long, short = 't', value_name = "TAG", help = "The routing tag the batch arrives with.")]
    pub tag: String,

    /// Path to an input file of JSON-line records (reads from stdin if not provided).
    #[arg(long = "input", short = 'i', value_name = "FILE", help = "Read records from a specified file instead of stdin.")]
    pub input_file: Option<PathBuf>,

    /// Write emitted records to this file instead of stdout.
    #[arg(long = "output", short = 'o', value_name = "FILE", help = "Write output to a specified file instead of stdout.")]
    pub output: Option<PathBuf>,
}

/// Arguments for the `check` command.
#[derive(Parser, Debug)]
pub struct CheckCommand {
    /// Path to the rewrite configuration file (YAML).
    #[arg(long = "config", short = 'c', value_name = "FILE", help = "Path to the rewrite configuration file (YAML).")]
    pub config: PathBuf,
}
