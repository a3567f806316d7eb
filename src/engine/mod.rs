// Tue Aug 18 2026 - Alex

pub mod core;
pub mod runner;

pub use self::core::Engine;
pub use runner::{expand_paths, FileFailure, RunOutcome, ValidationRunner, TIMEOUT_RULE_ID};
