// Tue Aug 18 2026 - Alex

pub mod builtin;
pub mod error;
pub mod registry;
pub mod rule;

pub use error::{RegistryError, RuleError};
pub use registry::RuleRegistry;
pub use rule::Rule;
