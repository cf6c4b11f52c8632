//! Configuration module
//!
//! Prodlens reads an optional `.prodlens.toml` from the scanned root.
//! It only supplies defaults; command-line flags always win.
//!
//! ```toml
//! [scan]
//! rules_dir = "rules"
//! format = "md"
//! ignore = ["docs/**", "*.snap"]
//! ```

use serde::Deserialize;
use std::path::Path;

/// Name of the optional configuration file.
pub const CONFIG_FILE: &str = ".prodlens.toml";

/// Scan defaults from `.prodlens.toml`.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct ScanConfig {
    /// Directory containing rule YAML files.
    pub rules_dir: Option<String>,
    /// Default output format, `md` or `json`.
    pub format: Option<String>,
    /// Extra ignore patterns, appended after the `.plignore` ones.
    #[serde(default)]
    pub ignore: Vec<String>,
}

/// Top-level configuration.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct Config {
    /// Scan defaults.
    #[serde(default)]
    pub scan: ScanConfig,
}

impl Config {
    /// Load `.prodlens.toml` from `root`. A missing file yields the
    /// default configuration; a present-but-invalid file is an error
    /// so typos do not silently disable settings.
    pub fn load(root: &Path) -> anyhow::Result<Self> {
        let path = root.join(CONFIG_FILE);
        if !path.exists() {
            return Ok(Self::default());
        }
        let data = std::fs::read_to_string(&path)?;
        let config = toml::from_str(&data)?;
        Ok(config)
    }
}
