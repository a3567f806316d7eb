// Tue Aug 18 2026 - Alex

use crate::artifact::{Artifact, ArtifactKind};
use crate::report::{Finding, Severity};
use crate::rules::error::RuleError;

/// A single stateless validation check. Implementations must not mutate the
/// artifact and must not share state between evaluations; the engine may run
/// them concurrently over the same tree.
pub trait Rule: Send + Sync {
    /// Unique identifier, e.g. "DC001". Uniqueness is enforced by the registry.
    fn id(&self) -> &str;

    fn severity(&self) -> Severity;

    fn description(&self) -> &str;

    fn applies_to(&self, kind: ArtifactKind) -> bool;

    fn evaluate(&self, artifact: &Artifact) -> Result<Vec<Finding>, RuleError>;
}
