//! # eventdex CLI Module
//!
//! This module implements the CLI interface for eventdex.
//!
//! ## Available Commands
//!
//! - `build` - Scan the data directory and write `index.json` (default)
//! - `check` - Scan without writing; fail if the existing index is stale
//!
//! With no arguments the data directory is the `data` folder next to the
//! executable and the index is written into it.

mod commands;

use clap::{Parser, Subcommand};
use eventdex_core::EventdexError;
use std::path::PathBuf;

pub use commands::*;

// =============================================================================
// CLI STRUCTURE
// =============================================================================

/// eventdex - event index builder
///
/// Scans every event folder under the data directory and writes a single
/// index.json listing each event's topic, game and cover availability.
#[derive(Parser, Debug)]
#[command(name = "eventdex")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// List skipped folders with their reasons in the summary
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress banner and per-event progress lines
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Data directory containing one folder per event [default: <exe dir>/data]
    #[arg(short = 'd', long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Output file [default: <data dir>/index.json]
    #[arg(short, long, global = true)]
    pub output: Option<PathBuf>,

    /// Print the summary as JSON (for programmatic access)
    #[arg(long, global = true)]
    pub json_mode: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available CLI commands.
#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Commands {
    /// Scan the data directory and write the index
    Build,

    /// Scan and compare with the existing index without writing
    Check,
}

// =============================================================================
// COMMAND EXECUTION
// =============================================================================

/// Execute the CLI with parsed arguments.
pub fn execute(cli: Cli) -> Result<(), EventdexError> {
    let paths = resolve_paths(cli.data_dir, cli.output)?;
    let opts = OutputOptions {
        verbose: cli.verbose,
        quiet: cli.quiet,
        json_mode: cli.json_mode,
    };

    match cli.command {
        Some(Commands::Check) => cmd_check(&paths, opts),
        Some(Commands::Build) | None => {
            // No subcommand - build by default
            cmd_build(&paths, opts)
        }
    }
}
