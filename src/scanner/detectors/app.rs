//! Application-level detectors: health endpoints, correlation IDs,
//! structured logging, artifact versioning.

use crate::patterns;
use crate::scanner::signals::SignalStore;

/// Checks for versioned artifact references. Files carrying a mutable
/// tag (`:latest` and friends) are disqualified outright.
pub fn detect_artifact_versioning(content: &str, _rel_path: &str, store: &SignalStore) {
    if store.get_bool("versioned_artifacts") {
        return;
    }

    let content_lower = content.to_lowercase();

    for tag in patterns::MUTABLE_TAGS {
        if content_lower.contains(tag) {
            return;
        }
    }

    for pattern in patterns::VERSIONING_PATTERNS {
        if content_lower.contains(pattern) {
            store.set_bool("versioned_artifacts", true);
            return;
        }
    }
}

/// Records which health-check HTTP endpoint the code exposes, if any.
/// `/health` takes precedence over `/ready` when both appear.
pub fn detect_health_endpoints(content: &str, _rel_path: &str, store: &SignalStore) {
    let content_lower = content.to_lowercase();

    if store.get_string("http_endpoint").is_empty() {
        for pattern in patterns::HEALTH_PATTERNS {
            if content_lower.contains(pattern) {
                store.set_string("http_endpoint", "/health");
                break;
            }
        }
    }

    if store.get_string("http_endpoint").is_empty() {
        for pattern in patterns::READY_PATTERNS {
            if content_lower.contains(pattern) {
                store.set_string("http_endpoint", "/ready");
                break;
            }
        }
    }
}

/// Checks for correlation/trace ID propagation.
pub fn detect_correlation_id(content: &str, _rel_path: &str, store: &SignalStore) {
    if store.get_bool("correlation_id_detected") {
        return;
    }

    let content_lower = content.to_lowercase();
    for pattern in patterns::CORRELATION_PATTERNS {
        if content_lower.contains(pattern) {
            store.set_bool("correlation_id_detected", true);
            return;
        }
    }
}

/// Checks for structured logging. A single strong library indicator is
/// enough; weak call-shape indicators need two distinct matches to
/// avoid counting a lone `log.info` as structured logging.
pub fn detect_structured_logging(content: &str, _rel_path: &str, store: &SignalStore) {
    if store.get_bool("structured_logging_detected") {
        return;
    }

    let content_lower = content.to_lowercase();

    let mut match_count = 0;
    for pattern in patterns::STRUCTURED_LOGGING_PATTERNS {
        if content_lower.contains(pattern) {
            match_count += 1;
            if match_count >= 2 {
                store.set_bool("structured_logging_detected", true);
                return;
            }
        }
    }

    for pattern in patterns::STRONG_STRUCTURED_LOGGING_INDICATORS {
        if content_lower.contains(pattern) {
            store.set_bool("structured_logging_detected", true);
            return;
        }
    }
}
