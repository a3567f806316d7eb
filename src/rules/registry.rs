// Tue Aug 18 2026 - Alex

use crate::artifact::ArtifactKind;
use crate::rules::builtin;
use crate::rules::error::RegistryError;
use crate::rules::rule::Rule;
use std::collections::HashSet;
use std::sync::Arc;

/// Process-wide rule set. Populated once at startup, read-only afterwards;
/// `rules_for` returns rules in registration order, which fixes the
/// deterministic evaluation order for a run.
pub struct RuleRegistry {
    rules: Vec<Arc<dyn Rule>>,
    ids: HashSet<String>,
}

impl RuleRegistry {
    pub fn new() -> Self {
        Self {
            rules: Vec::new(),
            ids: HashSet::new(),
        }
    }

    /// Registry with every built-in rule, in a fixed order.
    pub fn builtin() -> Result<Self, RegistryError> {
        let mut registry = Self::new();
        for rule in builtin::all_rules() {
            registry.register(rule)?;
        }
        Ok(registry)
    }

    pub fn register(&mut self, rule: Arc<dyn Rule>) -> Result<(), RegistryError> {
        let id = rule.id().to_string();
        if !self.ids.insert(id.clone()) {
            return Err(RegistryError::DuplicateRule(id));
        }
        self.rules.push(rule);
        Ok(())
    }

    pub fn rules_for(&self, kind: ArtifactKind) -> Vec<Arc<dyn Rule>> {
        self.rules
            .iter()
            .filter(|r| r.applies_to(kind))
            .cloned()
            .collect()
    }

    pub fn all(&self) -> &[Arc<dyn Rule>] {
        &self.rules
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.contains(id)
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl Default for RuleRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::artifact::Artifact;
    use crate::report::{Finding, Severity};
    use crate::rules::error::RuleError;

    struct StubRule {
        id: &'static str,
        kind: ArtifactKind,
    }

    impl Rule for StubRule {
        fn id(&self) -> &str {
            self.id
        }
        fn severity(&self) -> Severity {
            Severity::Warning
        }
        fn description(&self) -> &str {
            "stub"
        }
        fn applies_to(&self, kind: ArtifactKind) -> bool {
            kind == self.kind
        }
        fn evaluate(&self, _artifact: &Artifact) -> Result<Vec<Finding>, RuleError> {
            Ok(Vec::new())
        }
    }

    #[test]
    fn test_duplicate_id_rejected() {
        let mut registry = RuleRegistry::new();
        registry
            .register(Arc::new(StubRule { id: "X001", kind: ArtifactKind::Yaml }))
            .unwrap();
        let err = registry
            .register(Arc::new(StubRule { id: "X001", kind: ArtifactKind::Json }))
            .unwrap_err();
        assert!(matches!(err, RegistryError::DuplicateRule(id) if id == "X001"));
    }

    #[test]
    fn test_rules_for_preserves_registration_order() {
        let mut registry = RuleRegistry::new();
        for id in ["B001", "A001", "C001"] {
            registry
                .register(Arc::new(StubRule { id, kind: ArtifactKind::Yaml }))
                .unwrap();
        }
        let ids: Vec<_> = registry
            .rules_for(ArtifactKind::Yaml)
            .iter()
            .map(|r| r.id().to_string())
            .collect();
        assert_eq!(ids, vec!["B001", "A001", "C001"]);
    }

    #[test]
    fn test_rules_for_filters_kind() {
        let mut registry = RuleRegistry::new();
        registry
            .register(Arc::new(StubRule { id: "Y001", kind: ArtifactKind::Yaml }))
            .unwrap();
        registry
            .register(Arc::new(StubRule { id: "J001", kind: ArtifactKind::Json }))
            .unwrap();
        assert_eq!(registry.rules_for(ArtifactKind::Json).len(), 1);
        assert_eq!(registry.rules_for(ArtifactKind::Toml).len(), 0);
    }

    #[test]
    fn test_builtin_registry_is_consistent() {
        let registry = RuleRegistry::builtin().unwrap();
        assert!(!registry.is_empty());
        assert!(registry.contains("DC001"));
    }
}
