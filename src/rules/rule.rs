//! Rule model deserialized from YAML rule files.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Severity levels for rule findings.
///
/// - **High** / **Medium** / **Low** - risk findings that lower the
///   readiness score when triggered.
/// - **Positive** - informational good-practice findings, tracked but
///   never scored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Must be addressed before production.
    High,
    /// Should be addressed.
    Medium,
    /// Worth addressing.
    Low,
    /// A good practice worth surfacing.
    Positive,
}

impl Severity {
    /// Stable lowercase name, matching the YAML spelling.
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::High => "high",
            Severity::Medium => "medium",
            Severity::Low => "low",
            Severity::Positive => "positive",
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A raw condition as written in YAML: a single-key map from predicate
/// name to argument. Decoding into a typed form happens once, in the
/// engine, before evaluation.
pub type Condition = BTreeMap<String, serde_yaml::Value>;

/// The three condition groups of a rule. Each group is evaluated
/// independently and the results are ANDed; an empty group is
/// vacuously true.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Detect {
    /// At least one listed condition must hold.
    #[serde(default)]
    pub any_of: Vec<Condition>,
    /// Every listed condition must hold.
    #[serde(default)]
    pub all_of: Vec<Condition>,
    /// No listed condition may hold.
    #[serde(default)]
    pub none_of: Vec<Condition>,
}

/// A production-readiness rule as loaded from a YAML document.
#[derive(Debug, Clone, Deserialize)]
pub struct Rule {
    /// Stable rule identifier.
    pub id: String,
    /// Impact class driving the score.
    pub severity: Severity,
    /// Free-form grouping label.
    #[serde(default)]
    pub category: String,
    /// Short human-readable title.
    #[serde(default)]
    pub title: String,
    /// Longer description of the finding.
    #[serde(default)]
    pub description: String,
    /// Bullet points explaining the impact.
    #[serde(default, rename = "why_it_matters")]
    pub why: Vec<String>,
    /// How confident the detection is.
    #[serde(default)]
    pub confidence: String,
    /// The condition groups deciding whether the rule triggers.
    #[serde(default)]
    pub detect: Detect,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_roundtrip() {
        let severity: Severity = serde_yaml::from_str("high").unwrap();
        assert_eq!(severity, Severity::High);
        assert_eq!(severity.as_str(), "high");
        assert_eq!(severity.to_string(), "high");
    }

    #[test]
    fn test_unknown_severity_is_rejected() {
        assert!(serde_yaml::from_str::<Severity>("catastrophic").is_err());
    }

    #[test]
    fn test_rule_deserializes_from_yaml() {
        let yaml = "\
id: hardcoded-secrets
severity: high
category: security
title: Hardcoded secrets detected
why_it_matters:
  - Secrets in the repo leak through clones and forks.
detect:
  any_of:
    - file_exists: \".env\"
    - code_contains: \"API_KEY\"
  none_of:
    - signal_equals:
        secrets_provider_detected: true
";
        let rule: Rule = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(rule.id, "hardcoded-secrets");
        assert_eq!(rule.severity, Severity::High);
        assert_eq!(rule.detect.any_of.len(), 2);
        assert_eq!(rule.detect.all_of.len(), 0);
        assert_eq!(rule.detect.none_of.len(), 1);

        let first = &rule.detect.any_of[0];
        assert_eq!(
            first.get("file_exists").and_then(|v| v.as_str()),
            Some(".env")
        );
    }

    #[test]
    fn test_missing_detect_defaults_to_empty() {
        let rule: Rule = serde_yaml::from_str("id: bare\nseverity: low\n").unwrap();
        assert!(rule.detect.any_of.is_empty());
        assert!(rule.detect.all_of.is_empty());
        assert!(rule.detect.none_of.is_empty());
    }
}
