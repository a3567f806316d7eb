// Tue Aug 18 2026 - Alex

use crate::artifact::{Artifact, ArtifactKind, Node};
use crate::report::{Finding, Severity};
use crate::rules::error::RuleError;
use crate::rules::rule::Rule;

fn services(artifact: &Artifact) -> impl Iterator<Item = (&String, &Node)> {
    artifact
        .root
        .get("services")
        .and_then(|s| s.as_mapping())
        .into_iter()
        .flatten()
}

/// DC001: Compose files without a top-level version field.
pub struct ComposeVersionRule;

impl Rule for ComposeVersionRule {
    fn id(&self) -> &str {
        "DC001"
    }

    fn severity(&self) -> Severity {
        Severity::Warning
    }

    fn description(&self) -> &str {
        "Docker Compose version field missing"
    }

    fn applies_to(&self, kind: ArtifactKind) -> bool {
        kind == ArtifactKind::DockerCompose
    }

    fn evaluate(&self, artifact: &Artifact) -> Result<Vec<Finding>, RuleError> {
        if artifact.root.get("version").is_none() {
            return Ok(vec![Finding::warning(
                self.id(),
                "Docker Compose 'version' field missing",
                artifact.file_location(),
            )
            .with_remediation("declare a compose file format version, e.g. version: \"3.8\"")]);
        }
        Ok(Vec::new())
    }
}

/// DC002: services running unpinned images.
pub struct ComposeImagePinRule;

impl Rule for ComposeImagePinRule {
    fn id(&self) -> &str {
        "DC002"
    }

    fn severity(&self) -> Severity {
        Severity::Warning
    }

    fn description(&self) -> &str {
        "Service image tag is not pinned"
    }

    fn applies_to(&self, kind: ArtifactKind) -> bool {
        kind == ArtifactKind::DockerCompose
    }

    fn evaluate(&self, artifact: &Artifact) -> Result<Vec<Finding>, RuleError> {
        let mut findings = Vec::new();

        for (name, service) in services(artifact) {
            let Some(image_node) = service.get("image") else {
                continue;
            };
            let Some(image) = image_node.as_str() else {
                continue;
            };

            if is_unpinned(image) {
                findings.push(
                    Finding::warning(
                        self.id(),
                        &format!("service '{}' uses unpinned image '{}'", name, image),
                        image_node.location.clone(),
                    )
                    .with_remediation("pin the image to an explicit version tag or digest"),
                );
            }
        }

        Ok(findings)
    }
}

/// DC003: privileged services.
pub struct ComposePrivilegedRule;

impl Rule for ComposePrivilegedRule {
    fn id(&self) -> &str {
        "DC003"
    }

    fn severity(&self) -> Severity {
        Severity::Error
    }

    fn description(&self) -> &str {
        "Service runs in privileged mode"
    }

    fn applies_to(&self, kind: ArtifactKind) -> bool {
        kind == ArtifactKind::DockerCompose
    }

    fn evaluate(&self, artifact: &Artifact) -> Result<Vec<Finding>, RuleError> {
        let mut findings = Vec::new();

        for (name, service) in services(artifact) {
            if let Some(node) = service.get("privileged") {
                if node.as_bool() == Some(true) {
                    findings.push(
                        Finding::error(
                            self.id(),
                            &format!("service '{}' runs privileged", name),
                            node.location.clone(),
                        )
                        .with_remediation("drop privileged mode and grant specific capabilities instead"),
                    );
                }
            }
        }

        Ok(findings)
    }
}

pub(crate) fn is_unpinned(image: &str) -> bool {
    if image.contains('@') || image.starts_with('$') {
        return false;
    }
    // Strip a registry host carrying a port before looking for the tag.
    let after_host = match image.split_once('/') {
        Some((host, rest)) if host.contains(':') || host.contains('.') => rest,
        _ => image,
    };
    match after_host.rsplit_once(':') {
        Some((_, tag)) => tag == "latest" || tag.is_empty(),
        None => true,
    }
}
