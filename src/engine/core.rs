// Tue Aug 18 2026 - Alex

use crate::artifact::Artifact;
use crate::report::Finding;
use crate::rules::Rule;
use log::{debug, warn};
use rayon::prelude::*;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

/// Evaluates a rule set against one artifact. A misbehaving rule never
/// takes the run down: errors and panics are converted into critical
/// findings attributed to the offending rule id.
#[derive(Debug, Clone)]
pub struct Engine {
    parallel: bool,
}

impl Engine {
    pub fn new(parallel: bool) -> Self {
        Self { parallel }
    }

    pub fn evaluate(&self, artifact: &Artifact, rules: &[Arc<dyn Rule>]) -> Vec<Finding> {
        let applicable: Vec<&Arc<dyn Rule>> = rules
            .iter()
            .filter(|rule| rule.applies_to(artifact.kind))
            .collect();

        debug!(
            "Evaluating {} rule(s) against {} ({})",
            applicable.len(),
            artifact.file,
            artifact.kind.as_str()
        );

        if self.parallel {
            applicable
                .par_iter()
                .flat_map_iter(|rule| evaluate_one(rule.as_ref(), artifact))
                .collect()
        } else {
            applicable
                .iter()
                .flat_map(|rule| evaluate_one(rule.as_ref(), artifact))
                .collect()
        }
    }
}

fn evaluate_one(rule: &dyn Rule, artifact: &Artifact) -> Vec<Finding> {
    let outcome = panic::catch_unwind(AssertUnwindSafe(|| rule.evaluate(artifact)));

    match outcome {
        Ok(Ok(findings)) => findings,
        Ok(Err(e)) => {
            warn!("Rule {} failed on {}: {}", rule.id(), artifact.file, e);
            vec![Finding::critical(
                rule.id(),
                &format!("Rule evaluation failed: {}", e),
                artifact.file_location(),
            )]
        }
        Err(payload) => {
            let message = payload
                .downcast_ref::<&str>()
                .map(|s| s.to_string())
                .or_else(|| payload.downcast_ref::<String>().cloned())
                .unwrap_or_else(|| "unknown panic".to_string());
            warn!("Rule {} panicked on {}: {}", rule.id(), artifact.file, message);
            vec![Finding::critical(
                rule.id(),
                &format!("Rule evaluation panicked: {}", message),
                artifact.file_location(),
            )]
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::artifact::{load_str, ArtifactKind};
    use crate::report::{Location, Severity};
    use crate::rules::RuleError;

    struct NoisyRule;

    impl Rule for NoisyRule {
        fn id(&self) -> &str {
            "T001"
        }
        fn severity(&self) -> Severity {
            Severity::Warning
        }
        fn description(&self) -> &str {
            "always reports"
        }
        fn applies_to(&self, _kind: ArtifactKind) -> bool {
            true
        }
        fn evaluate(&self, artifact: &Artifact) -> Result<Vec<Finding>, RuleError> {
            Ok(vec![Finding::warning(
                self.id(),
                "noise",
                Location::new(&artifact.file, 1, ""),
            )])
        }
    }

    struct PanickyRule;

    impl Rule for PanickyRule {
        fn id(&self) -> &str {
            "T002"
        }
        fn severity(&self) -> Severity {
            Severity::Error
        }
        fn description(&self) -> &str {
            "always panics"
        }
        fn applies_to(&self, _kind: ArtifactKind) -> bool {
            true
        }
        fn evaluate(&self, _artifact: &Artifact) -> Result<Vec<Finding>, RuleError> {
            panic!("boom");
        }
    }

    struct FailingRule;

    impl Rule for FailingRule {
        fn id(&self) -> &str {
            "T003"
        }
        fn severity(&self) -> Severity {
            Severity::Error
        }
        fn description(&self) -> &str {
            "always errors"
        }
        fn applies_to(&self, _kind: ArtifactKind) -> bool {
            false
        }
        fn evaluate(&self, _artifact: &Artifact) -> Result<Vec<Finding>, RuleError> {
            Err(RuleError::Evaluation("unreachable".to_string()))
        }
    }

    fn sample() -> Artifact {
        load_str("key: value\n", "sample.yaml").unwrap()
    }

    #[test]
    fn test_evaluate_collects_findings() {
        let rules: Vec<Arc<dyn Rule>> = vec![Arc::new(NoisyRule)];
        let findings = Engine::new(false).evaluate(&sample(), &rules);
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].rule, "T001");
    }

    #[test]
    fn test_panicking_rule_is_isolated() {
        let rules: Vec<Arc<dyn Rule>> = vec![Arc::new(PanickyRule), Arc::new(NoisyRule)];
        let findings = Engine::new(false).evaluate(&sample(), &rules);

        assert_eq!(findings.len(), 2);
        let synthetic = findings.iter().find(|f| f.rule == "T002").unwrap();
        assert_eq!(synthetic.severity, Severity::Critical);
        assert!(synthetic.message.contains("panicked"));
        assert!(synthetic.message.contains("boom"));

        // The other rule still ran.
        assert!(findings.iter().any(|f| f.rule == "T001"));
    }

    #[test]
    fn test_inapplicable_rule_skipped() {
        let rules: Vec<Arc<dyn Rule>> = vec![Arc::new(FailingRule)];
        let findings = Engine::new(false).evaluate(&sample(), &rules);
        assert!(findings.is_empty());
    }

    #[test]
    fn test_parallel_matches_serial() {
        let rules: Vec<Arc<dyn Rule>> = vec![Arc::new(NoisyRule), Arc::new(PanickyRule)];
        let artifact = sample();
        let serial = Engine::new(false).evaluate(&artifact, &rules);
        let parallel = Engine::new(true).evaluate(&artifact, &rules);
        assert_eq!(serial.len(), parallel.len());
    }
}
