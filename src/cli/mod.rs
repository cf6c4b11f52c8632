//! # CLI Module
//!
//! Command-line interface for Prodlens using `clap`.
//!
//! ## Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `scan` | Scan a repository and evaluate production readiness |
//!
//! ## Global Options
//!
//! - `-v, --verbose` - Increase verbosity level (use multiple times: -v, -vv, -vvv)
//!
//! ## Examples
//!
//! ```bash
//! # Scan the current directory, Markdown report
//! prodlens scan
//!
//! # Scan a path with a custom rule set, JSON report
//! prodlens scan ../service --rules ./rules --format json
//!
//! # Trace every per-file decision the scanner makes
//! prodlens scan --debug -vv
//! ```

pub mod commands;
pub mod output;

use clap::{Parser, Subcommand};

use commands::ScanArgs;

/// Prodlens - scan repositories and score their production readiness
#[derive(Parser, Debug)]
#[command(name = "prodlens")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Scan a repository and evaluate production readiness
    Scan(ScanArgs),
}
