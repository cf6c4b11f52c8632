//! Detector registry.
//!
//! A detector is a pure function over one file's content and relative
//! path; it communicates only by writing signals into the shared store.
//! Files arrive in no particular order under the worker pool, so every
//! detector is idempotent: boolean detectors check before setting, and
//! the one accumulating family (regions) grows a global set instead of
//! short-circuiting.

mod app;
mod infra;
mod k8s;
mod process;
mod reliability;

use super::signals::SignalStore;

/// Signature shared by all detector functions.
pub type Detector = fn(content: &str, rel_path: &str, store: &SignalStore);

/// Ordered list of detector functions, built explicitly so the set is
/// swappable in tests and carries no hidden registration order.
pub struct DetectorRegistry {
    detectors: Vec<Detector>,
}

impl DetectorRegistry {
    /// Registry with no detectors.
    pub fn empty() -> Self {
        Self {
            detectors: Vec::new(),
        }
    }

    /// The full built-in detector set.
    pub fn default_set() -> Self {
        let mut registry = Self::empty();

        registry.register(infra::detect_secrets_provider);
        registry.register(infra::detect_infrastructure);
        registry.register(infra::detect_regions);
        registry.register(infra::detect_non_root_user);

        registry.register(k8s::detect_deployment_strategy);
        registry.register(k8s::detect_probes);
        registry.register(k8s::detect_ingress_rate_limit);
        registry.register(k8s::detect_resource_limits);

        registry.register(app::detect_health_endpoints);
        registry.register(app::detect_correlation_id);
        registry.register(app::detect_structured_logging);
        registry.register(app::detect_artifact_versioning);

        registry.register(reliability::detect_api_gateway_rate_limit);
        registry.register(reliability::detect_slo_config);
        registry.register(reliability::detect_error_budget);
        registry.register(reliability::detect_timeout_configuration);
        registry.register(reliability::detect_retry);
        registry.register(reliability::detect_circuit_breaker);

        registry.register(process::detect_manual_steps);
        registry.register(process::detect_migration_tool);
        registry.register(process::detect_backward_compatible_migration);
        registry.register(process::detect_migration_validation);
        registry.register(process::detect_graceful_shutdown);

        registry
    }

    /// Append a detector to the registry.
    pub fn register(&mut self, detector: Detector) {
        self.detectors.push(detector);
    }

    /// Number of registered detectors.
    pub fn len(&self) -> usize {
        self.detectors.len()
    }

    /// Whether the registry holds no detectors.
    pub fn is_empty(&self) -> bool {
        self.detectors.is_empty()
    }

    /// Run every registered detector against one file.
    pub fn run_all(&self, content: &str, rel_path: &str, store: &SignalStore) {
        for detector in &self.detectors {
            detector(content, rel_path, store);
        }
    }
}

impl Default for DetectorRegistry {
    fn default() -> Self {
        Self::default_set()
    }
}

/// Lowercased file extension (without the dot), if any.
pub(crate) fn extension(rel_path: &str) -> Option<String> {
    std::path::Path::new(rel_path)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
}

/// Whether the path names a YAML document.
pub(crate) fn is_yaml(rel_path: &str) -> bool {
    matches!(extension(rel_path).as_deref(), Some("yaml") | Some("yml"))
}

/// Parse a YAML document, returning `None` on any failure. Detectors
/// treat unparseable manifests as "no opinion", never as an error.
pub(crate) fn parse_yaml(content: &str) -> Option<serde_yaml::Value> {
    serde_yaml::from_str(content).ok()
}

/// Recursively search a YAML value for a mapping key accepted by the
/// predicate.
pub(crate) fn yaml_has_key(value: &serde_yaml::Value, pred: &dyn Fn(&str) -> bool) -> bool {
    match value {
        serde_yaml::Value::Mapping(map) => map.iter().any(|(key, nested)| {
            key.as_str().is_some_and(pred) || yaml_has_key(nested, pred)
        }),
        serde_yaml::Value::Sequence(items) => items.iter().any(|item| yaml_has_key(item, pred)),
        _ => false,
    }
}
