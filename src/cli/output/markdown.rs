//! Markdown report formatting.

use std::fmt::Write as _;

use crate::engine::{Finding, Summary};
use crate::rules::Severity;
use crate::scanner::SignalStore;

/// Render a human-readable Markdown report.
pub fn markdown(summary: Summary, findings: &[Finding], signals: &SignalStore) -> String {
    let mut out = String::new();

    out.push_str("# Production Readiness Report\n\n");
    let _ = writeln!(out, "**Overall Score: {} / 100**\n", summary.score);
    let _ = writeln!(out, "- ✅ Passed: {} rules", summary.passed);
    let _ = writeln!(out, "- ❌ Triggered: {} rules", summary.triggered);
    if summary.unsupported > 0 {
        let _ = writeln!(out, "- ⚠️ Unsupported: {} rules", summary.unsupported);
    }
    let _ = writeln!(out, "- 📊 Total: {} rules\n", summary.total);

    write_severity_section(&mut out, "High Risk", "🔴", Severity::High, findings);
    write_severity_section(&mut out, "Medium Risk", "🟠", Severity::Medium, findings);
    write_severity_section(&mut out, "Low Risk", "🟡", Severity::Low, findings);
    write_severity_section(&mut out, "Good Practices", "🟢", Severity::Positive, findings);

    out.push_str("---\n\n");
    out.push_str("## 📊 Detected Signals\n\n");
    out.push_str("These signals were detected during the repository scan:\n\n");

    let bools = sorted(signals.bool_signals());
    if !bools.is_empty() {
        out.push_str("### Boolean Signals\n\n");
        out.push_str("| Signal | Status |\n");
        out.push_str("|--------|--------|\n");
        for (key, value) in bools {
            let status = if value { "✅" } else { "❌" };
            let _ = writeln!(out, "| `{key}` | {status} |");
        }
        out.push('\n');
    }

    let strings = sorted(signals.string_signals());
    if !strings.is_empty() {
        out.push_str("### String Signals\n\n");
        out.push_str("| Signal | Value |\n");
        out.push_str("|--------|-------|\n");
        for (key, value) in strings {
            let _ = writeln!(out, "| `{key}` | `{value}` |");
        }
        out.push('\n');
    }

    let ints = sorted(signals.int_signals());
    if !ints.is_empty() {
        out.push_str("### Integer Signals\n\n");
        out.push_str("| Signal | Value |\n");
        out.push_str("|--------|-------|\n");
        for (key, value) in ints {
            let _ = writeln!(out, "| `{key}` | {value} |");
        }
        out.push('\n');
    }

    out.push_str("### Repository Statistics\n\n");
    let _ = writeln!(out, "- **Files scanned:** {}", signals.file_count());
    let _ = writeln!(out, "- **Files with content:** {}\n", signals.content_count());

    out
}

fn write_severity_section(
    out: &mut String,
    title: &str,
    emoji: &str,
    severity: Severity,
    findings: &[Finding],
) {
    let matching: Vec<&Finding> = findings
        .iter()
        .filter(|f| f.triggered && f.supported && f.rule.severity == severity)
        .collect();
    if matching.is_empty() {
        return;
    }

    let _ = writeln!(out, "## {emoji} {title}\n");
    for finding in matching {
        let rule = &finding.rule;
        let heading = if rule.title.is_empty() {
            &rule.id
        } else {
            &rule.title
        };
        let _ = writeln!(out, "### {heading}\n");
        if !rule.description.is_empty() {
            let _ = writeln!(out, "{}\n", rule.description.trim_end());
        }
        if !rule.why.is_empty() {
            out.push_str("**Why it matters:**\n");
            for why in &rule.why {
                let _ = writeln!(out, "- {why}");
            }
            out.push('\n');
        }
    }
}

fn sorted<V>(map: std::collections::HashMap<String, V>) -> Vec<(String, V)> {
    let mut entries: Vec<(String, V)> = map.into_iter().collect();
    entries.sort_by(|a, b| a.0.cmp(&b.0));
    entries
}
