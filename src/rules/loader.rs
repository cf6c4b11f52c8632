//! Loading rule definitions from a directory of YAML files.

use std::path::Path;

use walkdir::WalkDir;

use crate::error::RuleError;

use super::Rule;

/// Load every rule under `rules_dir`, one rule per `.yaml`/`.yml`
/// file, in walk order. Files with other extensions are skipped;
/// unreadable or invalid rule files are fatal so a broken rule set
/// never silently shrinks.
pub fn load_rules(rules_dir: &Path) -> Result<Vec<Rule>, RuleError> {
    let mut rules = Vec::new();

    for entry in WalkDir::new(rules_dir).sort_by_file_name() {
        let entry = entry.map_err(|source| RuleError::Walk {
            path: rules_dir.to_path_buf(),
            source,
        })?;

        if entry.file_type().is_dir() {
            continue;
        }
        let path = entry.path();
        let is_yaml = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("yaml") || e.eq_ignore_ascii_case("yml"));
        if !is_yaml {
            continue;
        }

        let data = std::fs::read_to_string(path).map_err(|source| RuleError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let rule: Rule = serde_yaml::from_str(&data).map_err(|source| RuleError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        rules.push(rule);
    }

    Ok(rules)
}
