//! Aggregation of findings into per-severity counts and a score.

use serde::Serialize;

use crate::rules::Severity;

use super::Finding;

/// Aggregated counts and readiness score for one evaluation run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Summary {
    /// Triggered high-severity findings.
    pub high: usize,
    /// Triggered medium-severity findings.
    pub medium: usize,
    /// Triggered low-severity findings.
    pub low: usize,
    /// Triggered positive findings. Tracked, never scored.
    pub positive: usize,
    /// Supported rules that did not trigger.
    pub passed: usize,
    /// Supported rules that triggered.
    pub triggered: usize,
    /// Rules referencing unregistered predicates.
    pub unsupported: usize,
    /// Total rules evaluated.
    pub total: usize,
    /// Readiness score, 0-100.
    pub score: i64,
}

/// Aggregate findings by severity and compute the readiness score:
/// `100 - (high*20 + medium*10 + low*5)`, clamped to `[0, 100]`.
/// Only triggered, supported findings count; positives are reported
/// but never move the score.
pub fn summarize(findings: &[Finding]) -> Summary {
    let mut summary = Summary {
        total: findings.len(),
        ..Summary::default()
    };

    for finding in findings {
        if !finding.supported {
            summary.unsupported += 1;
            continue;
        }
        if !finding.triggered {
            summary.passed += 1;
            continue;
        }

        summary.triggered += 1;
        match finding.rule.severity {
            Severity::High => summary.high += 1,
            Severity::Medium => summary.medium += 1,
            Severity::Low => summary.low += 1,
            Severity::Positive => summary.positive += 1,
        }
    }

    let penalty = (summary.high * 20 + summary.medium * 10 + summary.low * 5) as i64;
    summary.score = (100 - penalty).clamp(0, 100);

    summary
}
