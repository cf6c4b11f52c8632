//! Rule evaluation engine.
//!
//! Rules are compiled once against the condition registry, then each
//! compiled rule is folded over the finished signal store: the three
//! condition groups are evaluated independently and ANDed. Evaluation
//! is single-threaded by design - rules must only ever observe a fully
//! populated store.

pub mod conditions;
mod summary;

use crate::rules::Rule;
use crate::scanner::SignalStore;

pub use conditions::{CompiledCondition, ConditionRegistry, CustomCondition, SignalValue};
pub use summary::{summarize, Summary};

/// The result of evaluating one rule against the signal store.
#[derive(Debug, Clone)]
pub struct Finding {
    /// The rule that was evaluated.
    pub rule: Rule,
    /// Whether the rule's detect block matched.
    pub triggered: bool,
    /// Whether every predicate the rule references is registered. An
    /// unsupported rule never triggers and is never scored, so a
    /// missing predicate cannot masquerade as "checked and clean".
    pub supported: bool,
}

/// A rule's conditions decoded into typed form.
struct CompiledRule {
    any_of: Vec<CompiledCondition>,
    all_of: Vec<CompiledCondition>,
    none_of: Vec<CompiledCondition>,
}

impl CompiledRule {
    fn is_supported(&self) -> bool {
        self.any_of
            .iter()
            .chain(&self.all_of)
            .chain(&self.none_of)
            .all(|cond| !matches!(cond, CompiledCondition::Unsupported { .. }))
    }
}

/// Evaluates rules against a signal store using a condition registry.
pub struct Evaluator {
    registry: ConditionRegistry,
}

impl Evaluator {
    /// Evaluator over the built-in predicates.
    pub fn new() -> Self {
        Self {
            registry: ConditionRegistry::builtin(),
        }
    }

    /// Evaluator over a custom registry.
    pub fn with_registry(registry: ConditionRegistry) -> Self {
        Self { registry }
    }

    /// Evaluate every rule and return one finding per rule, in order.
    pub fn evaluate(&self, rules: &[Rule], signals: &SignalStore) -> Vec<Finding> {
        rules
            .iter()
            .map(|rule| {
                let compiled = self.compile_rule(rule);
                let supported = compiled.is_supported();
                let triggered = supported && self.rule_triggers(&compiled, signals);
                Finding {
                    rule: rule.clone(),
                    triggered,
                    supported,
                }
            })
            .collect()
    }

    fn compile_rule(&self, rule: &Rule) -> CompiledRule {
        let compile_group = |group: &[crate::rules::Condition]| {
            group.iter().map(|raw| self.registry.compile(raw)).collect()
        };
        CompiledRule {
            any_of: compile_group(&rule.detect.any_of),
            all_of: compile_group(&rule.detect.all_of),
            none_of: compile_group(&rule.detect.none_of),
        }
    }

    /// Combinator semantics: every group passes vacuously when empty;
    /// `none_of` fails on any match, `all_of` fails on any miss,
    /// `any_of` needs one match. The rule triggers when all three pass.
    fn rule_triggers(&self, rule: &CompiledRule, signals: &SignalStore) -> bool {
        let none_of_passed = !rule
            .none_of
            .iter()
            .any(|cond| self.registry.evaluate(cond, signals));

        let all_of_passed = rule
            .all_of
            .iter()
            .all(|cond| self.registry.evaluate(cond, signals));

        let any_of_passed = rule.any_of.is_empty()
            || rule
                .any_of
                .iter()
                .any(|cond| self.registry.evaluate(cond, signals));

        none_of_passed && all_of_passed && any_of_passed
    }
}

impl Default for Evaluator {
    fn default() -> Self {
        Self::new()
    }
}

/// Evaluate rules with the built-in predicates.
pub fn evaluate(rules: &[Rule], signals: &SignalStore) -> Vec<Finding> {
    Evaluator::new().evaluate(rules, signals)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::{Detect, Severity};

    fn rule_with_detect(id: &str, detect_yaml: &str) -> Rule {
        Rule {
            id: id.to_string(),
            severity: Severity::Medium,
            category: String::new(),
            title: String::new(),
            description: String::new(),
            why: Vec::new(),
            confidence: String::new(),
            detect: serde_yaml::from_str::<Detect>(detect_yaml).unwrap(),
        }
    }

    #[test]
    fn test_empty_groups_are_vacuously_true() {
        let rule = rule_with_detect("always", "{}");
        let findings = evaluate(&[rule], &SignalStore::new());
        assert!(findings[0].triggered);
        assert!(findings[0].supported);
    }

    #[test]
    fn test_none_of_vetoes_regardless_of_other_groups() {
        let store = SignalStore::new();
        store.record_file(".env");
        store.set_bool("secrets_provider_detected", true);

        let rule = rule_with_detect(
            "veto",
            "\
any_of:
  - file_exists: \".env\"
none_of:
  - signal_equals:
      secrets_provider_detected: true
",
        );
        let findings = evaluate(&[rule], &store);
        assert!(!findings[0].triggered);
    }

    #[test]
    fn test_all_of_fails_on_any_miss() {
        let store = SignalStore::new();
        store.set_bool("a", true);

        let rule = rule_with_detect(
            "all",
            "\
all_of:
  - signal_equals:
      a: true
  - signal_equals:
      b: true
",
        );
        assert!(!evaluate(&[rule], &store)[0].triggered);

        store.set_bool("b", true);
        let rule = rule_with_detect(
            "all",
            "\
all_of:
  - signal_equals:
      a: true
  - signal_equals:
      b: true
",
        );
        assert!(evaluate(&[rule], &store)[0].triggered);
    }

    #[test]
    fn test_any_of_needs_one_match() {
        let store = SignalStore::new();
        store.record_file("docker-compose.yml");

        let rule = rule_with_detect(
            "any",
            "\
any_of:
  - file_exists: \"Dockerfile\"
  - file_exists: \"docker-compose.yml\"
",
        );
        assert!(evaluate(&[rule], &store)[0].triggered);

        let rule = rule_with_detect(
            "any",
            "\
any_of:
  - file_exists: \"Dockerfile\"
  - file_exists: \"Containerfile\"
",
        );
        assert!(!evaluate(&[rule], &store)[0].triggered);
    }

    #[test]
    fn test_unsupported_predicate_marks_finding() {
        let rule = rule_with_detect(
            "unsupported",
            "\
any_of:
  - nonexistent_predicate: whatever
",
        );
        let findings = evaluate(&[rule], &SignalStore::new());
        assert!(!findings[0].supported);
        assert!(!findings[0].triggered);
    }

    #[test]
    fn test_unsupported_rule_does_not_disturb_others() {
        let store = SignalStore::new();
        store.record_file(".env");

        let rules = vec![
            rule_with_detect("broken", "any_of:\n  - no_such_thing: 1\n"),
            rule_with_detect("fine", "any_of:\n  - file_exists: \".env\"\n"),
        ];
        let findings = evaluate(&rules, &store);
        assert!(!findings[0].supported);
        assert!(findings[1].supported);
        assert!(findings[1].triggered);
    }

    #[test]
    fn test_malformed_argument_only_fails_its_condition() {
        let store = SignalStore::new();
        store.record_file(".env");

        // The malformed condition evaluates false inside any_of, but
        // the valid alternative still matches.
        let rule = rule_with_detect(
            "mixed",
            "\
any_of:
  - file_exists: [not, a, string]
  - file_exists: \".env\"
",
        );
        let findings = evaluate(&[rule], &store);
        assert!(findings[0].supported);
        assert!(findings[0].triggered);
    }

    #[test]
    fn test_secret_scenario_end_to_end() {
        let store = SignalStore::new();
        store.record_file(".env");
        store.set_content(".env", "API_KEY=x".to_string());

        let rule = rule_with_detect(
            "hardcoded-secrets",
            "\
any_of:
  - file_exists: \".env\"
none_of:
  - signal_equals:
      secrets_provider_detected: true
",
        );
        let findings = evaluate(&[rule], &store);
        assert!(findings[0].triggered, "no provider and .env present must trigger");
    }

    #[test]
    fn test_custom_registry_through_evaluator() {
        fn always(_: &serde_yaml::Value, _: &SignalStore) -> bool {
            true
        }

        let mut registry = ConditionRegistry::builtin();
        registry.register("always_true", always);
        let evaluator = Evaluator::with_registry(registry);

        let rule = rule_with_detect("custom", "all_of:\n  - always_true: ~\n");
        let findings = evaluator.evaluate(&[rule], &SignalStore::new());
        assert!(findings[0].supported);
        assert!(findings[0].triggered);
    }
}
