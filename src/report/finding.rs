// Mon Aug 17 2026 - Alex

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Warning,
    Error,
    Critical,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Info => "info",
            Severity::Warning => "warning",
            Severity::Error => "error",
            Severity::Critical => "critical",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Severity::Info => "INFO",
            Severity::Warning => "WARNING",
            Severity::Error => "ERROR",
            Severity::Critical => "CRITICAL",
        }
    }

    pub fn all() -> [Severity; 4] {
        [
            Severity::Info,
            Severity::Warning,
            Severity::Error,
            Severity::Critical,
        ]
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Severity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "info" => Ok(Severity::Info),
            "warn" | "warning" => Ok(Severity::Warning),
            "error" => Ok(Severity::Error),
            "critical" => Ok(Severity::Critical),
            other => Err(format!(
                "unknown severity '{}', expected one of: info, warning, error, critical",
                other
            )),
        }
    }
}

/// Points into a loaded artifact: source file, 1-based line, dotted node path.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Location {
    pub file: String,
    pub line: usize,
    pub path: String,
}

impl Location {
    pub fn new(file: &str, line: usize, path: &str) -> Self {
        Self {
            file: file.to_string(),
            line,
            path: path.to_string(),
        }
    }

    pub fn file_level(file: &str) -> Self {
        Self::new(file, 1, "")
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.path.is_empty() {
            write!(f, "{}:{}", self.file, self.line)
        } else {
            write!(f, "{}:{} ({})", self.file, self.line, self.path)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Finding {
    pub rule: String,
    pub severity: Severity,
    pub message: String,
    pub location: Location,
    pub remediation: Option<String>,
}

impl Finding {
    pub fn new(rule: &str, severity: Severity, message: &str, location: Location) -> Self {
        Self {
            rule: rule.to_string(),
            severity,
            message: message.to_string(),
            location,
            remediation: None,
        }
    }

    pub fn info(rule: &str, message: &str, location: Location) -> Self {
        Self::new(rule, Severity::Info, message, location)
    }

    pub fn warning(rule: &str, message: &str, location: Location) -> Self {
        Self::new(rule, Severity::Warning, message, location)
    }

    pub fn error(rule: &str, message: &str, location: Location) -> Self {
        Self::new(rule, Severity::Error, message, location)
    }

    pub fn critical(rule: &str, message: &str, location: Location) -> Self {
        Self::new(rule, Severity::Critical, message, location)
    }

    pub fn with_remediation(mut self, remediation: &str) -> Self {
        self.remediation = Some(remediation.to_string());
        self
    }

    // Dedup key: identical (rule, location, message) triples collapse.
    pub fn dedup_key(&self) -> (String, Location, String) {
        (self.rule.clone(), self.location.clone(), self.message.clone())
    }
}
