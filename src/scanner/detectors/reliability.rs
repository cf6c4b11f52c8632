//! Reliability detectors: rate limiting, SLOs, error budgets,
//! timeouts, retries, circuit breakers.

use crate::patterns;
use crate::scanner::signals::SignalStore;

use super::{is_yaml, parse_yaml, yaml_has_key};

/// Checks for rate limiting in API gateway configurations.
pub fn detect_api_gateway_rate_limit(content: &str, rel_path: &str, store: &SignalStore) {
    if store.get_bool("api_gateway_rate_limit") {
        return;
    }

    let content_lower = content.to_lowercase();
    for pattern in patterns::API_GATEWAY_RATE_LIMIT_PATTERNS {
        if content_lower.contains(pattern) {
            store.set_bool("api_gateway_rate_limit", true);
            return;
        }
    }

    if is_yaml(rel_path) {
        let Some(doc) = parse_yaml(content) else {
            return;
        };
        if yaml_has_key(&doc, &|key| {
            patterns::RATE_LIMIT_YAML_KEYS.contains(&key)
        }) {
            store.set_bool("api_gateway_rate_limit", true);
        }
    }
}

/// Checks for Service Level Objective configurations.
pub fn detect_slo_config(content: &str, rel_path: &str, store: &SignalStore) {
    if store.get_bool("slo_config_detected") {
        return;
    }

    let content_lower = content.to_lowercase();

    let mut match_count = 0;
    for pattern in patterns::SLO_PATTERNS {
        if content_lower.contains(pattern) {
            match_count += 1;
            // Strong indicators match alone; weak ones need company.
            if pattern.contains("slo") || pattern.contains("objective") {
                store.set_bool("slo_config_detected", true);
                return;
            }
            if match_count >= 2 {
                store.set_bool("slo_config_detected", true);
                return;
            }
        }
    }

    if is_yaml(rel_path) {
        let Some(doc) = parse_yaml(content) else {
            return;
        };

        if let Some(kind) = doc.get("kind").and_then(serde_yaml::Value::as_str) {
            let kind = kind.to_lowercase();
            if kind == "slo" || kind == "servicelevelobjective" {
                store.set_bool("slo_config_detected", true);
                return;
            }
        }

        if yaml_has_key(&doc, &|key| {
            let key = key.to_lowercase();
            patterns::SLO_YAML_KEYS.iter().any(|slo| key.contains(slo))
        }) {
            store.set_bool("slo_config_detected", true);
        }
    }
}

/// Checks for error budget configurations.
pub fn detect_error_budget(content: &str, rel_path: &str, store: &SignalStore) {
    if store.get_bool("error_budget_detected") {
        return;
    }

    let content_lower = content.to_lowercase();
    for pattern in patterns::ERROR_BUDGET_PATTERNS {
        if content_lower.contains(pattern) {
            store.set_bool("error_budget_detected", true);
            return;
        }
    }

    if is_yaml(rel_path) {
        let Some(doc) = parse_yaml(content) else {
            return;
        };
        if yaml_has_key(&doc, &|key| {
            let key = key.to_lowercase();
            patterns::ERROR_BUDGET_YAML_KEYS
                .iter()
                .any(|budget| key.contains(budget))
        }) {
            store.set_bool("error_budget_detected", true);
        }
    }
}

/// Checks for timeout configuration in code and config files.
pub fn detect_timeout_configuration(content: &str, rel_path: &str, store: &SignalStore) {
    if store.get_bool("timeout_configured") {
        return;
    }

    let content_lower = content.to_lowercase();
    for pattern in patterns::TIMEOUT_PATTERNS {
        if content_lower.contains(pattern) {
            store.set_bool("timeout_configured", true);
            return;
        }
    }

    let ext = super::extension(rel_path);
    if is_yaml(rel_path) || ext.as_deref() == Some("json") {
        let Some(doc) = parse_yaml(content) else {
            return;
        };
        if yaml_has_key(&doc, &|key| {
            let key = key.to_lowercase();
            patterns::TIMEOUT_CONFIG_KEYS
                .iter()
                .any(|timeout| key.contains(timeout))
        }) {
            store.set_bool("timeout_configured", true);
        }
    }
}

/// Checks for retry/backoff logic.
pub fn detect_retry(content: &str, _rel_path: &str, store: &SignalStore) {
    if store.get_bool("retry_logic_detected") {
        return;
    }

    let content_lower = content.to_lowercase();
    for pattern in patterns::RETRY_PATTERNS {
        if content_lower.contains(pattern) {
            store.set_bool("retry_logic_detected", true);
            return;
        }
    }
}

/// Checks for circuit breaker usage.
pub fn detect_circuit_breaker(content: &str, _rel_path: &str, store: &SignalStore) {
    if store.get_bool("circuit_breaker_detected") {
        return;
    }

    let content_lower = content.to_lowercase();
    for pattern in patterns::CIRCUIT_BREAKER_PATTERNS {
        if content_lower.contains(pattern) {
            store.set_bool("circuit_breaker_detected", true);
            return;
        }
    }
}
