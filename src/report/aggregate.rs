// Mon Aug 17 2026 - Alex

use crate::config::Policy;
use crate::report::finding::{Finding, Severity};
use serde::{Deserialize, Serialize};
use std::cmp::Reverse;
use std::collections::HashSet;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeverityCounts {
    pub info: usize,
    pub warning: usize,
    pub error: usize,
    pub critical: usize,
}

impl SeverityCounts {
    pub fn record(&mut self, severity: Severity) {
        match severity {
            Severity::Info => self.info += 1,
            Severity::Warning => self.warning += 1,
            Severity::Error => self.error += 1,
            Severity::Critical => self.critical += 1,
        }
    }

    pub fn get(&self, severity: Severity) -> usize {
        match severity {
            Severity::Info => self.info,
            Severity::Warning => self.warning,
            Severity::Error => self.error,
            Severity::Critical => self.critical,
        }
    }

    pub fn total(&self) -> usize {
        self.info + self.warning + self.error + self.critical
    }

    pub fn is_clean(&self) -> bool {
        self.total() == 0
    }
}

/// Aggregate result of a run. Derived once from the raw findings and a
/// policy, never mutated afterwards.
#[derive(Debug, Clone)]
pub struct Verdict {
    pub pass: bool,
    pub counts: SeverityCounts,
    pub findings: Vec<Finding>,
}

impl Verdict {
    pub fn empty() -> Self {
        Self {
            pass: true,
            counts: SeverityCounts::default(),
            findings: Vec::new(),
        }
    }
}

/// Deduplicates, filters by policy, sorts, and computes the pass flag.
///
/// Ordering: severity descending, then file, line, rule id, message. The
/// sort is stable and the key is total, so reruns over the same findings
/// reproduce byte-identical output regardless of evaluation concurrency.
pub fn aggregate(findings: Vec<Finding>, policy: &Policy) -> Verdict {
    let mut seen = HashSet::new();
    let mut kept: Vec<Finding> = findings
        .into_iter()
        .filter(|f| !policy.ignores(&f.rule))
        .filter(|f| f.severity >= policy.min_severity)
        .filter(|f| seen.insert(f.dedup_key()))
        .collect();

    kept.sort_by(|a, b| {
        (
            Reverse(a.severity),
            &a.location.file,
            a.location.line,
            &a.rule,
            &a.message,
        )
            .cmp(&(
                Reverse(b.severity),
                &b.location.file,
                b.location.line,
                &b.rule,
                &b.message,
            ))
    });

    let mut counts = SeverityCounts::default();
    for finding in &kept {
        counts.record(finding.severity);
    }

    let pass = !kept.iter().any(|f| f.severity >= policy.fail_threshold);

    Verdict {
        pass,
        counts,
        findings: kept,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::Location;

    fn finding(rule: &str, severity: Severity, file: &str, line: usize, message: &str) -> Finding {
        Finding::new(rule, severity, message, Location::new(file, line, ""))
    }

    #[test]
    fn test_empty_input_passes() {
        let verdict = aggregate(Vec::new(), &Policy::default());
        assert!(verdict.pass);
        assert!(verdict.counts.is_clean());
        assert!(verdict.findings.is_empty());
    }

    #[test]
    fn test_ordering() {
        let findings = vec![
            finding("B001", Severity::Warning, "b.yaml", 2, "w"),
            finding("A001", Severity::Critical, "z.yaml", 9, "c"),
            finding("C001", Severity::Warning, "a.yaml", 5, "w"),
            finding("A002", Severity::Warning, "a.yaml", 5, "w"),
            finding("D001", Severity::Error, "a.yaml", 1, "e"),
        ];
        let verdict = aggregate(findings, &Policy::default());
        let order: Vec<_> = verdict.findings.iter().map(|f| f.rule.as_str()).collect();
        assert_eq!(order, vec!["A001", "D001", "A002", "C001", "B001"]);
    }

    #[test]
    fn test_sort_is_idempotent() {
        let findings = vec![
            finding("R1", Severity::Error, "a.yaml", 3, "x"),
            finding("R2", Severity::Warning, "a.yaml", 1, "y"),
            finding("R3", Severity::Error, "b.yaml", 2, "z"),
        ];
        let first = aggregate(findings, &Policy::default());
        let second = aggregate(first.findings.clone(), &Policy::default());
        assert_eq!(first.findings, second.findings);
    }

    #[test]
    fn test_dedupe_identical_triples() {
        let findings = vec![
            finding("R1", Severity::Warning, "a.yaml", 3, "dup"),
            finding("R1", Severity::Warning, "a.yaml", 3, "dup"),
            finding("R1", Severity::Warning, "a.yaml", 3, "other message"),
        ];
        let verdict = aggregate(findings, &Policy::default());
        assert_eq!(verdict.findings.len(), 2);
        assert_eq!(verdict.counts.warning, 2);
    }

    #[test]
    fn test_counts_match_findings() {
        let findings = vec![
            finding("R1", Severity::Info, "a", 1, "i"),
            finding("R2", Severity::Error, "a", 2, "e"),
            finding("R3", Severity::Error, "a", 3, "e2"),
            finding("R4", Severity::Critical, "a", 4, "c"),
        ];
        let verdict = aggregate(findings, &Policy::default());
        assert_eq!(verdict.counts.info, 1);
        assert_eq!(verdict.counts.error, 2);
        assert_eq!(verdict.counts.critical, 1);
        assert_eq!(verdict.counts.total(), verdict.findings.len());
    }

    #[test]
    fn test_fail_threshold() {
        let findings = vec![finding("R1", Severity::Error, "a", 1, "e")];
        let failing = aggregate(findings.clone(), &Policy::default());
        assert!(!failing.pass);
        assert_eq!(failing.counts.error, 1);
        assert_eq!(failing.findings.len(), 1);

        let lenient = Policy::new().with_fail_threshold(Severity::Critical);
        let passing = aggregate(findings, &lenient);
        assert!(passing.pass);
    }

    #[test]
    fn test_ignored_rule_excluded_before_threshold() {
        let findings = vec![finding("DC003", Severity::Error, "a", 1, "privileged")];
        let policy = Policy::new().with_ignored_rule("DC003");
        let verdict = aggregate(findings, &policy);
        assert!(verdict.pass);
        assert!(verdict.findings.is_empty());
        assert!(verdict.counts.is_clean());
    }

    // min_severity above fail_threshold still fails the run: a critical
    // finding survives the filter and clears the error threshold.
    #[test]
    fn test_min_severity_above_threshold_still_fails() {
        let findings = vec![finding("R1", Severity::Critical, "a", 1, "c")];
        let policy = Policy::new()
            .with_min_severity(Severity::Critical)
            .with_fail_threshold(Severity::Error);
        let verdict = aggregate(findings, &policy);
        assert!(!verdict.pass);
        assert_eq!(verdict.findings.len(), 1);
        assert_eq!(verdict.counts.critical, 1);
    }

    #[test]
    fn test_min_severity_filter() {
        let findings = vec![
            finding("R1", Severity::Info, "a", 1, "i"),
            finding("R2", Severity::Warning, "a", 2, "w"),
        ];
        let policy = Policy::new().with_min_severity(Severity::Warning);
        let verdict = aggregate(findings, &policy);
        assert_eq!(verdict.findings.len(), 1);
        assert_eq!(verdict.counts.info, 0);
    }
}
