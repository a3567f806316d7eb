// Mon Aug 17 2026 - Alex

#![allow(dead_code)]
#![allow(ambiguous_glob_reexports)]

pub mod artifact;
pub mod config;
pub mod engine;
pub mod health;
pub mod report;
pub mod rules;
pub mod utils;

pub use artifact::{load, Artifact, ArtifactKind, LoaderError};
pub use config::{Policy, ValidatorConfig};
pub use engine::{RunOutcome, ValidationRunner};
pub use report::{emit_human, emit_json, Finding, Location, Severity, Verdict};
pub use rules::{Rule, RuleRegistry};
