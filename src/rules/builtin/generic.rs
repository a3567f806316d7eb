// Tue Aug 18 2026 - Alex

use crate::artifact::{Artifact, ArtifactKind};
use crate::report::{Finding, Severity};
use crate::rules::error::RuleError;
use crate::rules::rule::Rule;

/// GEN001: the document parsed but holds nothing worth validating.
pub struct EmptyDocumentRule;

impl Rule for EmptyDocumentRule {
    fn id(&self) -> &str {
        "GEN001"
    }

    fn severity(&self) -> Severity {
        Severity::Warning
    }

    fn description(&self) -> &str {
        "Document is empty"
    }

    fn applies_to(&self, _kind: ArtifactKind) -> bool {
        true
    }

    fn evaluate(&self, artifact: &Artifact) -> Result<Vec<Finding>, RuleError> {
        if artifact.root.is_empty() {
            return Ok(vec![Finding::warning(
                self.id(),
                &format!("{} document is empty", artifact.kind),
                artifact.file_location(),
            )]);
        }
        Ok(Vec::new())
    }
}

/// GEN002: surface a top-level version field as an informational note.
pub struct VersionNoteRule;

impl Rule for VersionNoteRule {
    fn id(&self) -> &str {
        "GEN002"
    }

    fn severity(&self) -> Severity {
        Severity::Info
    }

    fn description(&self) -> &str {
        "Top-level version field present"
    }

    fn applies_to(&self, kind: ArtifactKind) -> bool {
        kind.is_generic()
    }

    fn evaluate(&self, artifact: &Artifact) -> Result<Vec<Finding>, RuleError> {
        let Some(version) = artifact.root.get("version") else {
            return Ok(Vec::new());
        };
        let Some(scalar) = version.as_scalar() else {
            return Ok(Vec::new());
        };
        Ok(vec![Finding::info(
            self.id(),
            &format!("version: {}", scalar),
            version.location.clone(),
        )])
    }
}
