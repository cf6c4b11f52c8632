//! Ignore-pattern matching for repository scans.
//!
//! Patterns come from a `.plignore` file at the repository root, one
//! glob per line. A path is ignored when a pattern matches the full
//! slash-normalized relative path, the basename alone (so a bare
//! `*.yaml` also matches nested files), or when the path lies under a
//! trailing-`/` directory pattern. Malformed globs never match and are
//! never fatal.

use globset::{GlobBuilder, GlobMatcher};
use std::path::Path;

/// Name of the ignore file read from the repository root.
pub const IGNORE_FILE: &str = ".plignore";

/// Directories pruned unconditionally, before any pattern check runs.
/// Version-control metadata and dependency caches are never worth
/// scanning and walking them dominates runtime on real repositories.
const DEFAULT_IGNORED_DIRS: &[&str] = &[".git", ".svn", ".hg", "node_modules"];

/// Whether a directory name is on the unconditional deny-list.
pub(crate) fn is_default_ignored_dir(name: &str) -> bool {
    DEFAULT_IGNORED_DIRS.contains(&name)
}

struct IgnorePattern {
    raw: String,
    /// Compiled glob; `None` when the pattern was malformed.
    glob: Option<GlobMatcher>,
    /// For trailing-`/` patterns, the directory prefix to match under.
    dir_prefix: Option<String>,
}

/// Compiled, ordered ignore-pattern list.
pub struct IgnoreMatcher {
    patterns: Vec<IgnorePattern>,
}

impl IgnoreMatcher {
    /// Compile an ordered list of glob patterns. Invalid globs are kept
    /// (for the directory-prefix check) but never glob-match.
    pub fn new(patterns: &[String]) -> Self {
        let compiled = patterns
            .iter()
            .map(|raw| {
                // `literal_separator` keeps `*` from crossing `/`, so a
                // bare `*.yaml` only matches nested files through the
                // basename check below.
                let glob = GlobBuilder::new(raw)
                    .literal_separator(true)
                    .build()
                    .ok()
                    .map(|g| g.compile_matcher());
                let dir_prefix = raw
                    .strip_suffix('/')
                    .filter(|p| !p.is_empty())
                    .map(|p| p.to_string());
                IgnorePattern {
                    raw: raw.clone(),
                    glob,
                    dir_prefix,
                }
            })
            .collect();
        Self { patterns: compiled }
    }

    /// Number of compiled patterns.
    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    /// Whether the matcher holds no patterns at all.
    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// The raw pattern strings, in order.
    pub fn raw_patterns(&self) -> impl Iterator<Item = &str> {
        self.patterns.iter().map(|p| p.raw.as_str())
    }

    /// Whether the given relative path matches any ignore pattern.
    pub fn is_ignored(&self, rel_path: &str) -> bool {
        let rel = rel_path.replace('\\', "/");
        let basename = rel.rsplit('/').next().unwrap_or(rel.as_str());

        for pattern in &self.patterns {
            if let Some(glob) = &pattern.glob {
                if glob.is_match(&rel) || glob.is_match(basename) {
                    return true;
                }
            }

            if let Some(prefix) = &pattern.dir_prefix {
                if rel == *prefix || rel.starts_with(&format!("{prefix}/")) {
                    return true;
                }
            }
        }
        false
    }
}

/// Read ignore patterns from the `.plignore` file under `root`.
///
/// Blank lines and `#` comments are skipped; everything else is taken
/// verbatim as a glob pattern. A missing or unreadable file yields an
/// empty list, which is a valid configuration.
pub fn load_ignore_file(root: &Path) -> Vec<String> {
    let path = root.join(IGNORE_FILE);
    let Ok(data) = std::fs::read_to_string(&path) else {
        return Vec::new();
    };

    data.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(|line| line.replace('\\', "/"))
        .collect()
}
