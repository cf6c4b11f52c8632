//! Process detectors: deployment documentation, database migrations,
//! graceful shutdown.

use crate::patterns;
use crate::scanner::signals::SignalStore;

/// Whether the path looks like documentation.
fn is_doc_file(rel_path: &str) -> bool {
    let file_name = rel_path.to_lowercase();

    patterns::DOC_FILE_KEYWORDS
        .iter()
        .any(|keyword| file_name.contains(keyword))
        || patterns::DOC_FILE_EXTENSIONS
            .iter()
            .any(|ext| file_name.ends_with(ext))
}

/// Checks if documentation describes manual deployment steps. Needs at
/// least three indicators in one file to avoid flagging ordinary
/// numbered lists.
pub fn detect_manual_steps(content: &str, rel_path: &str, store: &SignalStore) {
    if store.get_bool("manual_steps_documented") {
        return;
    }
    if !is_doc_file(rel_path) {
        return;
    }

    let content_lower = content.to_lowercase();

    let mut matches = 0;
    for pattern in patterns::MANUAL_STEP_PATTERNS {
        if content_lower.contains(pattern) {
            matches += 1;
            if matches >= 3 {
                store.set_bool("manual_steps_documented", true);
                return;
            }
        }
    }
}

/// Checks for database migration tooling.
pub fn detect_migration_tool(content: &str, _rel_path: &str, store: &SignalStore) {
    if store.get_bool("migration_tool_detected") {
        return;
    }

    let content_lower = content.to_lowercase();
    for pattern in patterns::MIGRATION_TOOL_PATTERNS {
        if content_lower.contains(pattern) {
            store.set_bool("migration_tool_detected", true);
            return;
        }
    }
}

/// Checks for backward-compatible migration hints. Strong wording
/// matches alone; weaker hints (nullable columns, defaults) need to
/// appear in combination.
pub fn detect_backward_compatible_migration(content: &str, _rel_path: &str, store: &SignalStore) {
    if store.get_bool("backward_compatible_migration_hint") {
        return;
    }

    let content_lower = content.to_lowercase();

    let mut match_count = 0;
    for pattern in patterns::BACKWARD_COMPAT_PATTERNS {
        if content_lower.contains(pattern) {
            match_count += 1;
            if pattern.contains("backward")
                || pattern.contains("zero-downtime")
                || pattern.contains("expand-contract")
            {
                store.set_bool("backward_compatible_migration_hint", true);
                return;
            }
            if match_count >= 2 {
                store.set_bool("backward_compatible_migration_hint", true);
                return;
            }
        }
    }
}

/// Checks for migration validation steps.
pub fn detect_migration_validation(content: &str, _rel_path: &str, store: &SignalStore) {
    if store.get_bool("migration_validation_step") {
        return;
    }

    let content_lower = content.to_lowercase();

    let mut match_count = 0;
    for pattern in patterns::MIGRATION_VALIDATION_PATTERNS {
        if content_lower.contains(pattern) {
            match_count += 1;
            if pattern.contains("validate")
                || pattern.contains("test")
                || pattern.contains("dry-run")
                || pattern.contains("rollback")
            {
                store.set_bool("migration_validation_step", true);
                return;
            }
            if match_count >= 2 {
                store.set_bool("migration_validation_step", true);
                return;
            }
        }
    }
}

/// Checks for graceful shutdown handling.
pub fn detect_graceful_shutdown(content: &str, _rel_path: &str, store: &SignalStore) {
    if store.get_bool("graceful_shutdown_detected") {
        return;
    }

    let content_lower = content.to_lowercase();
    for pattern in patterns::GRACEFUL_SHUTDOWN_PATTERNS {
        if content_lower.contains(pattern) {
            store.set_bool("graceful_shutdown_detected", true);
            return;
        }
    }
}
