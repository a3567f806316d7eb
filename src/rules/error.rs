// Tue Aug 18 2026 - Alex

use thiserror::Error;

#[derive(Error, Debug)]
pub enum RuleError {
    #[error("evaluation failed: {0}")]
    Evaluation(String),
    #[error("expected node missing: {0}")]
    MissingNode(String),
    #[error("unsupported artifact kind: {0}")]
    UnsupportedKind(String),
}

#[derive(Error, Debug)]
pub enum RegistryError {
    #[error("duplicate rule id: {0}")]
    DuplicateRule(String),
}
