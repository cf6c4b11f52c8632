//! Infrastructure detectors: secrets providers, infrastructure-as-code,
//! cloud regions, container users.

use crate::patterns;
use crate::scanner::signals::SignalStore;

/// Checks if code uses a managed secrets provider.
pub fn detect_secrets_provider(content: &str, _rel_path: &str, store: &SignalStore) {
    if store.get_bool("secrets_provider_detected") {
        return;
    }

    let content_lower = content.to_lowercase();
    for pattern in patterns::SECRETS_PROVIDER_PATTERNS {
        if content_lower.contains(pattern) {
            store.set_bool("secrets_provider_detected", true);
            return;
        }
    }
}

/// Checks if infrastructure-as-code is present.
pub fn detect_infrastructure(content: &str, _rel_path: &str, store: &SignalStore) {
    if store.get_bool("infra_as_code_detected") {
        return;
    }

    let content_lower = content.to_lowercase();
    for pattern in patterns::INFRA_PATTERNS {
        if content_lower.contains(pattern) {
            store.set_bool("infra_as_code_detected", true);
            return;
        }
    }
}

/// Accumulates the set of cloud regions referenced anywhere in the
/// tree. Unlike the boolean detectors this never short-circuits: more
/// evidence across files must strictly grow the `region_count` signal.
pub fn detect_regions(content: &str, _rel_path: &str, store: &SignalStore) {
    let content_lower = content.to_lowercase();

    let all_regions = patterns::AWS_REGIONS
        .iter()
        .chain(patterns::GCP_REGIONS)
        .chain(patterns::AZURE_REGIONS);

    for region in all_regions {
        if content_lower.contains(region) {
            store.record_region(region);
        }
    }
}

/// Checks whether containers are configured to run as a non-root user.
pub fn detect_non_root_user(content: &str, rel_path: &str, store: &SignalStore) {
    if store.get_bool("non_root_user_detected") {
        return;
    }

    let file_name = rel_path.to_lowercase();
    let is_container_file = file_name.contains("dockerfile")
        || file_name.contains("containerfile")
        || file_name.ends_with("docker-compose.yml")
        || file_name.ends_with("docker-compose.yaml")
        || super::is_yaml(rel_path);
    if !is_container_file {
        return;
    }

    let content_lower = content.to_lowercase();

    // "USER root" re-asserts the default and proves nothing.
    if content_lower.contains("user root") {
        return;
    }

    for pattern in patterns::NON_ROOT_USER_PATTERNS {
        if content_lower.contains(pattern) {
            store.set_bool("non_root_user_detected", true);
            return;
        }
    }
}
