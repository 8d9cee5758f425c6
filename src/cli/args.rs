//! Defines the command-line arguments and subcommands for the Verdict CLI.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::render::DEFAULT_WRAP_WIDTH;

/// The main CLI argument structure.
#[derive(Debug, Parser)]
#[command(
    name = "verdict",
    version,
    about = "Turns declarative test scenario results into JUnit XML reports."
)]
pub struct VerdictArgs {
    /// Log filter used when RUST_LOG is unset.
    #[arg(long, global = true, default_value = "warn")]
    pub log_level: String,

    /// Disable coloured terminal output.
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// An enumeration of all available CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Render a result tree as JUnit XML.
    Render {
        /// Test results as JSON (.json) or YAML (.yaml, .yml).
        #[arg(required = true)]
        results: PathBuf,
        /// Directory holding the scenario files, for diagnostic context.
        #[arg(long)]
        sources: Option<PathBuf>,
        /// Where to write the report. Defaults to stdout.
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Column width for diagnostic text.
        #[arg(long, default_value_t = DEFAULT_WRAP_WIDTH)]
        width: usize,
    },
    /// Print a per-run pass/fail summary.
    Summary {
        /// Test results as JSON (.json) or YAML (.yaml, .yml).
        #[arg(required = true)]
        results: PathBuf,
    },
}
