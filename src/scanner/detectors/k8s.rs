//! Kubernetes manifest detectors. All of these only look at YAML files
//! and treat parse failures as "no opinion".

use serde_yaml::Value;

use crate::patterns;
use crate::scanner::signals::SignalStore;

use super::{is_yaml, parse_yaml};

/// Kind of a manifest, if it declares one.
fn manifest_kind(doc: &Value) -> Option<&str> {
    doc.get("kind").and_then(Value::as_str)
}

/// Containers of a workload manifest. Deployments, StatefulSets and
/// friends nest them under `spec.template.spec.containers`; bare Pods
/// keep them at `spec.containers`.
fn containers(doc: &Value) -> Option<&Vec<Value>> {
    let spec = doc.get("spec")?;
    if let Some(template_spec) = spec.get("template").and_then(|t| t.get("spec")) {
        return template_spec.get("containers").and_then(Value::as_sequence);
    }
    spec.get("containers").and_then(Value::as_sequence)
}

/// Records the rollout strategy declared by a Deployment manifest.
pub fn detect_deployment_strategy(content: &str, rel_path: &str, store: &SignalStore) {
    if !store.get_string("k8s_deployment_strategy").is_empty() {
        return;
    }
    if !is_yaml(rel_path) {
        return;
    }
    let Some(doc) = parse_yaml(content) else {
        return;
    };
    if manifest_kind(&doc) != Some("Deployment") {
        return;
    }

    if let Some(strategy_type) = doc
        .get("spec")
        .and_then(|s| s.get("strategy"))
        .and_then(|s| s.get("type"))
        .and_then(Value::as_str)
    {
        store.set_string("k8s_deployment_strategy", strategy_type);
    }
}

/// Checks for liveness/readiness probes on any container of a workload.
pub fn detect_probes(content: &str, rel_path: &str, store: &SignalStore) {
    if store.get_bool("k8s_probe_defined") {
        return;
    }
    if !is_yaml(rel_path) {
        return;
    }
    let Some(doc) = parse_yaml(content) else {
        return;
    };
    let Some(kind) = manifest_kind(&doc) else {
        return;
    };
    if !patterns::K8S_WORKLOAD_KINDS.contains(&kind) {
        return;
    }

    let Some(containers) = containers(&doc) else {
        return;
    };
    for container in containers {
        if container.get("livenessProbe").is_some() || container.get("readinessProbe").is_some() {
            store.set_bool("k8s_probe_defined", true);
            return;
        }
    }
}

/// Checks Ingress annotations for rate limiting.
pub fn detect_ingress_rate_limit(content: &str, rel_path: &str, store: &SignalStore) {
    if store.get_bool("ingress_rate_limit") {
        return;
    }
    if !is_yaml(rel_path) {
        return;
    }
    let Some(doc) = parse_yaml(content) else {
        return;
    };
    if manifest_kind(&doc) != Some("Ingress") {
        return;
    }

    let Some(annotations) = doc.get("metadata").and_then(|m| m.get("annotations")) else {
        return;
    };

    for annotation in patterns::INGRESS_RATE_LIMIT_ANNOTATIONS {
        if annotations.get(*annotation).is_some() {
            store.set_bool("ingress_rate_limit", true);
            return;
        }
    }

    // Kong wires rate limiting through its plugins annotation.
    if let Some(plugins) = annotations.get("konghq.com/plugins").and_then(Value::as_str) {
        if plugins.to_lowercase().contains("rate-limit") {
            store.set_bool("ingress_rate_limit", true);
        }
    }
}

/// Checks for CPU/memory limits on any container of a workload.
pub fn detect_resource_limits(content: &str, rel_path: &str, store: &SignalStore) {
    if store.get_bool("k8s_resource_limits_detected") {
        return;
    }
    if !is_yaml(rel_path) {
        return;
    }
    let Some(doc) = parse_yaml(content) else {
        return;
    };
    let Some(kind) = manifest_kind(&doc) else {
        return;
    };
    if !patterns::K8S_WORKLOAD_KINDS.contains(&kind) {
        return;
    }

    let Some(containers) = containers(&doc) else {
        return;
    };
    for container in containers {
        let Some(limits) = container.get("resources").and_then(|r| r.get("limits")) else {
            continue;
        };
        if limits.get("cpu").is_some() || limits.get("memory").is_some() {
            store.set_bool("k8s_resource_limits_detected", true);
            return;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DEPLOYMENT_WITH_PROBES: &str = "\
apiVersion: apps/v1
kind: Deployment
metadata:
  name: myapp
spec:
  strategy:
    type: RollingUpdate
  template:
    spec:
      containers:
      - name: app
        image: myapp:v1.2.3
        livenessProbe:
          httpGet:
            path: /health
";

    const DEPLOYMENT_WITHOUT_PROBES: &str = "\
apiVersion: apps/v1
kind: Deployment
metadata:
  name: myapp
spec:
  template:
    spec:
      containers:
      - name: app
        image: myapp:v1.2.3
";

    #[test]
    fn test_deployment_strategy_recorded() {
        let store = SignalStore::new();
        detect_deployment_strategy(DEPLOYMENT_WITH_PROBES, "deploy.yaml", &store);
        assert_eq!(store.get_string("k8s_deployment_strategy"), "RollingUpdate");
    }

    #[test]
    fn test_strategy_first_value_wins() {
        let store = SignalStore::new();
        detect_deployment_strategy(DEPLOYMENT_WITH_PROBES, "a.yaml", &store);
        let recreate = DEPLOYMENT_WITH_PROBES.replace("RollingUpdate", "Recreate");
        detect_deployment_strategy(&recreate, "b.yaml", &store);
        assert_eq!(store.get_string("k8s_deployment_strategy"), "RollingUpdate");
    }

    #[test]
    fn test_probe_nested_under_template() {
        let store = SignalStore::new();
        detect_probes(DEPLOYMENT_WITH_PROBES, "deploy.yaml", &store);
        assert!(store.get_bool("k8s_probe_defined"));
    }

    #[test]
    fn test_no_probe_stays_false() {
        let store = SignalStore::new();
        detect_probes(DEPLOYMENT_WITHOUT_PROBES, "deploy.yaml", &store);
        assert!(!store.get_bool("k8s_probe_defined"));
    }

    #[test]
    fn test_probe_on_bare_pod() {
        let store = SignalStore::new();
        let pod = "\
kind: Pod
spec:
  containers:
  - name: app
    readinessProbe:
      httpGet:
        path: /ready
";
        detect_probes(pod, "pod.yml", &store);
        assert!(store.get_bool("k8s_probe_defined"));
    }

    #[test]
    fn test_probes_ignore_non_yaml_and_invalid_yaml() {
        let store = SignalStore::new();
        detect_probes(DEPLOYMENT_WITH_PROBES, "deploy.json", &store);
        assert!(!store.get_bool("k8s_probe_defined"));

        detect_probes("kind: [unclosed", "broken.yaml", &store);
        assert!(!store.get_bool("k8s_probe_defined"));
    }

    #[test]
    fn test_probes_ignore_non_workload_kinds() {
        let store = SignalStore::new();
        let svc = "\
kind: Service
spec:
  containers:
  - name: app
    livenessProbe: {}
";
        detect_probes(svc, "svc.yaml", &store);
        assert!(!store.get_bool("k8s_probe_defined"));
    }

    #[test]
    fn test_ingress_rate_limit_annotation() {
        let store = SignalStore::new();
        let ingress = "\
apiVersion: networking.k8s.io/v1
kind: Ingress
metadata:
  annotations:
    nginx.ingress.kubernetes.io/limit-rps: \"100\"
";
        detect_ingress_rate_limit(ingress, "ingress.yaml", &store);
        assert!(store.get_bool("ingress_rate_limit"));
    }

    #[test]
    fn test_ingress_kong_plugins() {
        let store = SignalStore::new();
        let ingress = "\
kind: Ingress
metadata:
  annotations:
    konghq.com/plugins: Rate-Limiting-per-consumer
";
        detect_ingress_rate_limit(ingress, "ingress.yaml", &store);
        assert!(store.get_bool("ingress_rate_limit"));
    }

    #[test]
    fn test_ingress_without_rate_limit() {
        let store = SignalStore::new();
        let ingress = "\
kind: Ingress
metadata:
  annotations:
    cert-manager.io/cluster-issuer: letsencrypt
";
        detect_ingress_rate_limit(ingress, "ingress.yaml", &store);
        assert!(!store.get_bool("ingress_rate_limit"));
    }

    #[test]
    fn test_resource_limits_detected() {
        let store = SignalStore::new();
        let deploy = "\
kind: Deployment
spec:
  template:
    spec:
      containers:
      - name: app
        resources:
          limits:
            memory: 256Mi
";
        detect_resource_limits(deploy, "deploy.yaml", &store);
        assert!(store.get_bool("k8s_resource_limits_detected"));
    }

    #[test]
    fn test_requests_only_is_not_a_limit() {
        let store = SignalStore::new();
        let deploy = "\
kind: Deployment
spec:
  template:
    spec:
      containers:
      - name: app
        resources:
          requests:
            memory: 128Mi
";
        detect_resource_limits(deploy, "deploy.yaml", &store);
        assert!(!store.get_bool("k8s_resource_limits_detected"));
    }
}
