// Tue Aug 18 2026 - Alex

use crate::artifact::{Artifact, ArtifactKind, Node};
use crate::report::{Finding, Severity};
use crate::rules::error::RuleError;
use crate::rules::rule::Rule;

// Container lists show up either directly under spec (Pod) or under the
// workload template (Deployment, StatefulSet, Job, ...).
fn containers(artifact: &Artifact) -> Vec<&Node> {
    let mut out = Vec::new();
    for path in ["spec.containers", "spec.template.spec.containers"] {
        if let Some(seq) = artifact.root.get_path(path).and_then(|n| n.as_sequence()) {
            out.extend(seq.iter());
        }
    }
    out
}

fn container_name(container: &Node) -> String {
    container
        .get("name")
        .and_then(|n| n.as_str())
        .unwrap_or("<unnamed>")
        .to_string()
}

/// K8S001: manifests missing the mandatory apiVersion/kind pair.
pub struct K8sRequiredFieldsRule;

impl Rule for K8sRequiredFieldsRule {
    fn id(&self) -> &str {
        "K8S001"
    }

    fn severity(&self) -> Severity {
        Severity::Error
    }

    fn description(&self) -> &str {
        "Manifest missing apiVersion or kind"
    }

    fn applies_to(&self, kind: ArtifactKind) -> bool {
        kind == ArtifactKind::Kubernetes
    }

    fn evaluate(&self, artifact: &Artifact) -> Result<Vec<Finding>, RuleError> {
        let mut findings = Vec::new();
        for field in ["apiVersion", "kind", "metadata"] {
            if artifact.root.get(field).is_none() {
                findings.push(Finding::error(
                    self.id(),
                    &format!("manifest missing required field '{}'", field),
                    artifact.file_location(),
                ));
            }
        }
        Ok(findings)
    }
}

/// K8S002: containers without CPU/memory limits.
pub struct K8sResourceLimitsRule;

impl Rule for K8sResourceLimitsRule {
    fn id(&self) -> &str {
        "K8S002"
    }

    fn severity(&self) -> Severity {
        Severity::Warning
    }

    fn description(&self) -> &str {
        "Container has no resource limits"
    }

    fn applies_to(&self, kind: ArtifactKind) -> bool {
        kind == ArtifactKind::Kubernetes
    }

    fn evaluate(&self, artifact: &Artifact) -> Result<Vec<Finding>, RuleError> {
        let mut findings = Vec::new();

        for container in containers(artifact) {
            if container.get_path("resources.limits").is_none() {
                findings.push(
                    Finding::warning(
                        self.id(),
                        &format!(
                            "container '{}' has no resource limits",
                            container_name(container)
                        ),
                        container.location.clone(),
                    )
                    .with_remediation("set resources.limits.cpu and resources.limits.memory"),
                );
            }
        }

        Ok(findings)
    }
}

/// K8S003: privileged security contexts.
pub struct K8sPrivilegedRule;

impl Rule for K8sPrivilegedRule {
    fn id(&self) -> &str {
        "K8S003"
    }

    fn severity(&self) -> Severity {
        Severity::Critical
    }

    fn description(&self) -> &str {
        "Container requests privileged mode"
    }

    fn applies_to(&self, kind: ArtifactKind) -> bool {
        kind == ArtifactKind::Kubernetes
    }

    fn evaluate(&self, artifact: &Artifact) -> Result<Vec<Finding>, RuleError> {
        let mut findings = Vec::new();

        for container in containers(artifact) {
            if let Some(node) = container.get_path("securityContext.privileged") {
                if node.as_bool() == Some(true) {
                    findings.push(
                        Finding::critical(
                            self.id(),
                            &format!(
                                "container '{}' runs privileged",
                                container_name(container)
                            ),
                            node.location.clone(),
                        )
                        .with_remediation("remove securityContext.privileged or scope down capabilities"),
                    );
                }
            }
        }

        Ok(findings)
    }
}

/// K8S004: unpinned container images.
pub struct K8sImagePinRule;

impl Rule for K8sImagePinRule {
    fn id(&self) -> &str {
        "K8S004"
    }

    fn severity(&self) -> Severity {
        Severity::Warning
    }

    fn description(&self) -> &str {
        "Container image tag is not pinned"
    }

    fn applies_to(&self, kind: ArtifactKind) -> bool {
        kind == ArtifactKind::Kubernetes
    }

    fn evaluate(&self, artifact: &Artifact) -> Result<Vec<Finding>, RuleError> {
        let mut findings = Vec::new();

        for container in containers(artifact) {
            let Some(image_node) = container.get("image") else {
                continue;
            };
            let Some(image) = image_node.as_str() else {
                continue;
            };
            if super::compose::is_unpinned(image) {
                findings.push(
                    Finding::warning(
                        self.id(),
                        &format!(
                            "container '{}' uses unpinned image '{}'",
                            container_name(container),
                            image
                        ),
                        image_node.location.clone(),
                    )
                    .with_remediation("pin the image to an explicit version tag or digest"),
                );
            }
        }

        Ok(findings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::artifact::load_str;

    const POD: &str = "apiVersion: v1\nkind: Pod\nmetadata:\n  name: demo\nspec:\n  containers:\n    - name: app\n      image: app:latest\n      securityContext:\n        privileged: true\n";

    #[test]
    fn test_required_fields_ok() {
        let artifact = load_str(POD, "pod.yaml").unwrap();
        assert!(K8sRequiredFieldsRule.evaluate(&artifact).unwrap().is_empty());
    }

    #[test]
    fn test_missing_metadata() {
        let artifact = load_str("apiVersion: v1\nkind: Pod\nspec: {}\n", "pod.yaml").unwrap();
        let findings = K8sRequiredFieldsRule.evaluate(&artifact).unwrap();
        assert_eq!(findings.len(), 1);
        assert!(findings[0].message.contains("metadata"));
    }

    #[test]
    fn test_missing_limits() {
        let artifact = load_str(POD, "pod.yaml").unwrap();
        let findings = K8sResourceLimitsRule.evaluate(&artifact).unwrap();
        assert_eq!(findings.len(), 1);
        assert!(findings[0].message.contains("app"));
    }

    #[test]
    fn test_privileged_container_is_critical() {
        let artifact = load_str(POD, "pod.yaml").unwrap();
        let findings = K8sPrivilegedRule.evaluate(&artifact).unwrap();
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].severity, Severity::Critical);
        assert_eq!(findings[0].location.line, 10);
    }

    #[test]
    fn test_deployment_template_containers() {
        let deployment = "apiVersion: apps/v1\nkind: Deployment\nmetadata:\n  name: d\nspec:\n  template:\n    spec:\n      containers:\n        - name: app\n          image: app:1.2.3\n          resources:\n            limits:\n              cpu: 500m\n";
        let artifact = load_str(deployment, "deploy.yaml").unwrap();
        assert!(K8sResourceLimitsRule.evaluate(&artifact).unwrap().is_empty());
        assert!(K8sImagePinRule.evaluate(&artifact).unwrap().is_empty());
    }

    #[test]
    fn test_unpinned_image() {
        let artifact = load_str(POD, "pod.yaml").unwrap();
        let findings = K8sImagePinRule.evaluate(&artifact).unwrap();
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].location.path, "spec.containers[0].image");
    }
}
