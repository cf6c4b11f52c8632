//! JSON report formatting.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::engine::{Finding, Summary};
use crate::rules::Severity;
use crate::scanner::SignalStore;

/// The structure of the JSON report.
#[derive(Serialize)]
struct JsonReport<'f> {
    summary: Summary,
    findings: FindingsGroup<'f>,
    signals: SignalsInfo,
}

/// Findings grouped by outcome and severity.
#[derive(Serialize, Default)]
struct FindingsGroup<'f> {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    high: Vec<FindingDetail<'f>>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    medium: Vec<FindingDetail<'f>>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    low: Vec<FindingDetail<'f>>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    positive: Vec<FindingDetail<'f>>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    passed: Vec<FindingDetail<'f>>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    unsupported: Vec<FindingDetail<'f>>,
}

fn empty_str(s: &&str) -> bool {
    s.is_empty()
}

fn empty_list(list: &&Vec<String>) -> bool {
    list.is_empty()
}

/// One finding in the JSON report.
#[derive(Serialize)]
struct FindingDetail<'f> {
    id: &'f str,
    #[serde(skip_serializing_if = "empty_str")]
    title: &'f str,
    #[serde(skip_serializing_if = "empty_str")]
    description: &'f str,
    #[serde(skip_serializing_if = "empty_str")]
    category: &'f str,
    severity: Severity,
    #[serde(rename = "why_it_matters", skip_serializing_if = "empty_list")]
    why: &'f Vec<String>,
    #[serde(skip_serializing_if = "empty_str")]
    confidence: &'f str,
}

impl<'f> FindingDetail<'f> {
    fn from_finding(finding: &'f Finding) -> Self {
        let rule = &finding.rule;
        Self {
            id: &rule.id,
            title: &rule.title,
            description: &rule.description,
            category: &rule.category,
            severity: rule.severity,
            why: &rule.why,
            confidence: &rule.confidence,
        }
    }
}

/// Detected signals included in the report. BTreeMaps keep the output
/// deterministic.
#[derive(Serialize)]
struct SignalsInfo {
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    bool_signals: BTreeMap<String, bool>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    string_signals: BTreeMap<String, String>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    int_signals: BTreeMap<String, i64>,
    files_scanned: usize,
    files_with_content: usize,
}

/// Render a pretty-printed JSON report.
pub fn json(summary: Summary, findings: &[Finding], signals: &SignalStore) -> String {
    let mut groups = FindingsGroup::default();
    for finding in findings {
        let detail = FindingDetail::from_finding(finding);
        if !finding.supported {
            groups.unsupported.push(detail);
        } else if !finding.triggered {
            groups.passed.push(detail);
        } else {
            match finding.rule.severity {
                Severity::High => groups.high.push(detail),
                Severity::Medium => groups.medium.push(detail),
                Severity::Low => groups.low.push(detail),
                Severity::Positive => groups.positive.push(detail),
            }
        }
    }

    let report = JsonReport {
        summary,
        findings: groups,
        signals: SignalsInfo {
            bool_signals: signals.bool_signals().into_iter().collect(),
            string_signals: signals.string_signals().into_iter().collect(),
            int_signals: signals.int_signals().into_iter().collect(),
            files_scanned: signals.file_count(),
            files_with_content: signals.content_count(),
        },
    };

    // The report type serializes infallibly; fall back to an empty
    // object rather than crashing the run over a formatter bug.
    serde_json::to_string_pretty(&report).unwrap_or_else(|_| String::from("{}"))
}
