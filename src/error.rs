//! Error types for Prodlens
//!
//! This module defines custom error types using `thiserror`. Only
//! traversal-fatal scan conditions and rule-loading failures surface as
//! errors; per-file problems during a scan are skipped at the point of
//! failure.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for Prodlens
#[derive(Error, Debug)]
pub enum ProdlensError {
    /// Scan-related errors
    #[error("Scan error: {0}")]
    Scan(#[from] ScanError),

    /// Rule-loading errors
    #[error("Rule error: {0}")]
    Rule(#[from] RuleError),
}

/// Errors that abort a repository scan
#[derive(Error, Debug)]
pub enum ScanError {
    /// The scan root does not exist or is not a directory
    #[error("scan root '{}' is not an accessible directory", path.display())]
    RootNotFound {
        /// The root path that was requested
        path: PathBuf,
    },

    /// The walk over the scan root failed before any entries were produced
    #[error("failed to walk '{}': {source}", path.display())]
    Walk {
        /// The root path being walked
        path: PathBuf,
        /// The underlying walk error
        source: walkdir::Error,
    },
}

/// Errors that occur while loading rule definitions
#[derive(Error, Debug)]
pub enum RuleError {
    /// A rule file could not be read
    #[error("failed to read rule file '{}': {source}", path.display())]
    Read {
        /// Path to the rule file
        path: PathBuf,
        /// The underlying I/O error
        source: std::io::Error,
    },

    /// A rule file contained invalid YAML
    #[error("failed to parse rule file '{}': {source}", path.display())]
    Parse {
        /// Path to the rule file
        path: PathBuf,
        /// The underlying YAML error
        source: serde_yaml::Error,
    },

    /// The rules directory could not be walked
    #[error("failed to walk rules directory '{}': {source}", path.display())]
    Walk {
        /// The rules directory
        path: PathBuf,
        /// The underlying walk error
        source: walkdir::Error,
    },
}
