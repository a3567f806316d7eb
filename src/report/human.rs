// Mon Aug 17 2026 - Alex

use crate::report::aggregate::Verdict;
use crate::report::finding::Severity;
use indexmap::IndexMap;
use std::fmt::Write;

/// Plain-text report grouped by file. Severity labels are plain tags; any
/// coloring is the caller's concern.
pub fn emit_human(verdict: &Verdict) -> String {
    let mut output = String::new();

    output.push_str("=== Validation Report ===\n");

    if verdict.findings.is_empty() {
        output.push_str("No findings.\n");
    } else {
        let mut by_file: IndexMap<&str, Vec<&crate::report::Finding>> = IndexMap::new();
        for finding in &verdict.findings {
            by_file
                .entry(finding.location.file.as_str())
                .or_default()
                .push(finding);
        }

        for (file, findings) in &by_file {
            let _ = writeln!(output, "\n{}", file);
            for finding in findings {
                let position = if finding.location.path.is_empty() {
                    format!("line {}", finding.location.line)
                } else {
                    format!("line {} ({})", finding.location.line, finding.location.path)
                };
                let _ = writeln!(
                    output,
                    "  [{}] {} {}: {}",
                    finding.severity.label(),
                    finding.rule,
                    position,
                    finding.message
                );
                if let Some(remediation) = &finding.remediation {
                    let _ = writeln!(output, "      hint: {}", remediation);
                }
            }
        }
    }

    output.push_str("\nSummary:\n");
    for severity in Severity::all().iter().rev() {
        let _ = writeln!(
            output,
            "  {:<9} {}",
            format!("{}:", severity.label().to_lowercase()),
            verdict.counts.get(*severity)
        );
    }

    let _ = writeln!(
        output,
        "\nResult: {}",
        if verdict.pass { "PASS" } else { "FAIL" }
    );

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Policy;
    use crate::report::aggregate::aggregate;
    use crate::report::{Finding, Location};

    #[test]
    fn test_empty_verdict() {
        let text = emit_human(&Verdict::empty());
        assert!(text.contains("No findings."));
        assert!(text.contains("Result: PASS"));
    }

    #[test]
    fn test_grouped_by_file() {
        let findings = vec![
            Finding::error("R1", "broken", Location::new("a.yaml", 2, "spec")),
            Finding::warning("R2", "iffy", Location::new("b.yaml", 1, ""))
                .with_remediation("fix it"),
            Finding::warning("R3", "also iffy", Location::new("a.yaml", 7, "spec.x")),
        ];
        let verdict = aggregate(findings, &Policy::default());
        let text = emit_human(&verdict);

        assert!(text.contains("a.yaml"));
        assert!(text.contains("[ERROR] R1 line 2 (spec): broken"));
        assert!(text.contains("hint: fix it"));
        assert!(text.contains("Result: FAIL"));

        // One section per file, not one per finding.
        assert_eq!(text.matches("a.yaml\n").count(), 1);
    }
}
