// Mon Aug 17 2026 - Alex

pub mod aggregate;
pub mod finding;
pub mod human;
pub mod json;

pub use aggregate::{aggregate, SeverityCounts, Verdict};
pub use finding::{Finding, Location, Severity};
pub use human::emit_human;
pub use json::emit_json;

use std::fmt;
use std::str::FromStr;

/// Output format selector for `emit`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Human,
    Json,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "human" => Ok(OutputFormat::Human),
            "json" => Ok(OutputFormat::Json),
            other => Err(format!("unknown format '{}', expected human or json", other)),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Human => write!(f, "human"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

pub fn emit(verdict: &Verdict, format: OutputFormat) -> String {
    match format {
        OutputFormat::Human => emit_human(verdict),
        OutputFormat::Json => emit_json(verdict),
    }
}
