// Tue Aug 18 2026 - Alex

use crate::artifact::{Artifact, ArtifactKind, Node};
use crate::report::{Finding, Severity};
use crate::rules::error::RuleError;
use crate::rules::rule::Rule;

fn instructions(artifact: &Artifact) -> Vec<(&str, &str, &Node)> {
    artifact
        .root
        .as_sequence()
        .unwrap_or(&[])
        .iter()
        .filter_map(|item| {
            let word = item.get("instruction")?.as_str()?;
            let args = item.get("arguments")?.as_str()?;
            Some((word, args, item))
        })
        .collect()
}

/// DF001: every Dockerfile must start from a base image.
pub struct DockerfileFromRule;

impl Rule for DockerfileFromRule {
    fn id(&self) -> &str {
        "DF001"
    }

    fn severity(&self) -> Severity {
        Severity::Error
    }

    fn description(&self) -> &str {
        "Dockerfile has no FROM instruction"
    }

    fn applies_to(&self, kind: ArtifactKind) -> bool {
        kind == ArtifactKind::Dockerfile
    }

    fn evaluate(&self, artifact: &Artifact) -> Result<Vec<Finding>, RuleError> {
        let has_from = instructions(artifact)
            .iter()
            .any(|(word, _, _)| *word == "FROM");
        if !has_from {
            return Ok(vec![Finding::error(
                self.id(),
                "Dockerfile contains no FROM instruction",
                artifact.file_location(),
            )]);
        }
        Ok(Vec::new())
    }
}

/// DF002: unpinned base images. ARG-parameterized references are skipped,
/// and so is `scratch`.
pub struct DockerfileBasePinRule;

impl Rule for DockerfileBasePinRule {
    fn id(&self) -> &str {
        "DF002"
    }

    fn severity(&self) -> Severity {
        Severity::Warning
    }

    fn description(&self) -> &str {
        "Base image tag is not pinned"
    }

    fn applies_to(&self, kind: ArtifactKind) -> bool {
        kind == ArtifactKind::Dockerfile
    }

    fn evaluate(&self, artifact: &Artifact) -> Result<Vec<Finding>, RuleError> {
        let mut findings = Vec::new();
        let mut stages: Vec<String> = Vec::new();

        for (word, args, node) in instructions(artifact) {
            if word != "FROM" {
                continue;
            }

            let mut parts = args.split_whitespace();
            let Some(image) = parts.next() else {
                continue;
            };

            // Remember stage aliases; later FROM lines may reference them.
            if let Some(alias) = stage_alias(args) {
                stages.push(alias.to_lowercase());
            }

            let reference = image.to_lowercase();
            if reference == "scratch" || stages.contains(&reference) {
                continue;
            }

            if super::compose::is_unpinned(image) {
                findings.push(
                    Finding::warning(
                        self.id(),
                        &format!("base image '{}' is not pinned", image),
                        node.location.clone(),
                    )
                    .with_remediation("pin the base image to an explicit version tag or digest"),
                );
            }
        }

        Ok(findings)
    }
}

fn stage_alias(args: &str) -> Option<&str> {
    let mut parts = args.split_whitespace();
    let _image = parts.next()?;
    let keyword = parts.next()?;
    if keyword.eq_ignore_ascii_case("as") {
        parts.next()
    } else {
        None
    }
}

/// DF003: no USER instruction means the final image runs as root.
pub struct DockerfileUserRule;

impl Rule for DockerfileUserRule {
    fn id(&self) -> &str {
        "DF003"
    }

    fn severity(&self) -> Severity {
        Severity::Info
    }

    fn description(&self) -> &str {
        "Image runs as root"
    }

    fn applies_to(&self, kind: ArtifactKind) -> bool {
        kind == ArtifactKind::Dockerfile
    }

    fn evaluate(&self, artifact: &Artifact) -> Result<Vec<Finding>, RuleError> {
        let instrs = instructions(artifact);
        if instrs.is_empty() {
            return Ok(Vec::new());
        }
        let has_user = instrs.iter().any(|(word, _, _)| *word == "USER");
        if !has_user {
            return Ok(vec![Finding::info(
                self.id(),
                "no USER instruction; container will run as root",
                artifact.file_location(),
            )
            .with_remediation("add a USER instruction after installing dependencies")]);
        }
        Ok(Vec::new())
    }
}
