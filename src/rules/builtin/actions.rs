// Tue Aug 18 2026 - Alex

use crate::artifact::{Artifact, ArtifactKind, Node};
use crate::report::{Finding, Severity};
use crate::rules::error::RuleError;
use crate::rules::rule::Rule;

fn jobs(artifact: &Artifact) -> impl Iterator<Item = (&String, &Node)> {
    artifact
        .root
        .get("jobs")
        .and_then(|j| j.as_mapping())
        .into_iter()
        .flatten()
}

/// GHA001: workflow jobs without a runner.
pub struct ActionsRunsOnRule;

impl Rule for ActionsRunsOnRule {
    fn id(&self) -> &str {
        "GHA001"
    }

    fn severity(&self) -> Severity {
        Severity::Error
    }

    fn description(&self) -> &str {
        "Workflow job has no runs-on"
    }

    fn applies_to(&self, kind: ArtifactKind) -> bool {
        kind == ArtifactKind::GithubActions
    }

    fn evaluate(&self, artifact: &Artifact) -> Result<Vec<Finding>, RuleError> {
        let mut findings = Vec::new();

        for (name, job) in jobs(artifact) {
            // Reusable-workflow jobs declare `uses` instead of a runner.
            if job.get("runs-on").is_none() && job.get("uses").is_none() {
                findings.push(Finding::error(
                    self.id(),
                    &format!("job '{}' declares no runs-on", name),
                    job.location.clone(),
                ));
            }
        }

        Ok(findings)
    }
}

/// GHA002: third-party actions pinned to mutable refs.
pub struct ActionsMutableRefRule;

impl Rule for ActionsMutableRefRule {
    fn id(&self) -> &str {
        "GHA002"
    }

    fn severity(&self) -> Severity {
        Severity::Warning
    }

    fn description(&self) -> &str {
        "Action pinned to a mutable ref"
    }

    fn applies_to(&self, kind: ArtifactKind) -> bool {
        kind == ArtifactKind::GithubActions
    }

    fn evaluate(&self, artifact: &Artifact) -> Result<Vec<Finding>, RuleError> {
        let mut findings = Vec::new();

        for (_, job) in jobs(artifact) {
            let Some(steps) = job.get("steps").and_then(|s| s.as_sequence()) else {
                continue;
            };
            for step in steps {
                let Some(uses_node) = step.get("uses") else {
                    continue;
                };
                let Some(uses) = uses_node.as_str() else {
                    continue;
                };
                // Local and docker references are out of scope here.
                if uses.starts_with("./") || uses.starts_with("docker://") {
                    continue;
                }
                let mutable = match uses.rsplit_once('@') {
                    Some((_, git_ref)) => git_ref == "main" || git_ref == "master",
                    None => true,
                };
                if mutable {
                    findings.push(
                        Finding::warning(
                            self.id(),
                            &format!("action '{}' is pinned to a mutable ref", uses),
                            uses_node.location.clone(),
                        )
                        .with_remediation("pin the action to a release tag or commit SHA"),
                    );
                }
            }
        }

        Ok(findings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::artifact::load_str;

    const WORKFLOW: &str = "on: push\njobs:\n  build:\n    runs-on: ubuntu-latest\n    steps:\n      - uses: actions/checkout@main\n      - uses: actions/cache@v4\n  deploy:\n    steps:\n      - run: make deploy\n";

    #[test]
    fn test_missing_runs_on() {
        let artifact = load_str(WORKFLOW, ".github/workflows/ci.yml").unwrap();
        let findings = ActionsRunsOnRule.evaluate(&artifact).unwrap();
        assert_eq!(findings.len(), 1);
        assert!(findings[0].message.contains("deploy"));
    }

    #[test]
    fn test_reusable_workflow_job_ok() {
        let yaml = "on: push\njobs:\n  call:\n    uses: org/repo/.github/workflows/x.yml@v1\n";
        let artifact = load_str(yaml, ".github/workflows/ci.yml").unwrap();
        assert!(ActionsRunsOnRule.evaluate(&artifact).unwrap().is_empty());
    }

    #[test]
    fn test_mutable_ref() {
        let artifact = load_str(WORKFLOW, ".github/workflows/ci.yml").unwrap();
        let findings = ActionsMutableRefRule.evaluate(&artifact).unwrap();
        assert_eq!(findings.len(), 1);
        assert!(findings[0].message.contains("actions/checkout@main"));
        assert_eq!(findings[0].location.line, 6);
    }
}
