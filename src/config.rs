// Mon Aug 17 2026 - Alex

use crate::report::Severity;
use serde::{Deserialize, Serialize};

/// Threshold policy applied by the aggregator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Policy {
    pub fail_threshold: Severity,
    pub min_severity: Severity,
    pub ignore_rules: Vec<String>,
}

impl Default for Policy {
    fn default() -> Self {
        Self {
            fail_threshold: Severity::Error,
            min_severity: Severity::Info,
            ignore_rules: Vec::new(),
        }
    }
}

impl Policy {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_fail_threshold(mut self, severity: Severity) -> Self {
        self.fail_threshold = severity;
        self
    }

    pub fn with_min_severity(mut self, severity: Severity) -> Self {
        self.min_severity = severity;
        self
    }

    pub fn with_ignored_rule(mut self, rule_id: &str) -> Self {
        self.ignore_rules.push(rule_id.to_string());
        self
    }

    pub fn ignores(&self, rule_id: &str) -> bool {
        self.ignore_rules.iter().any(|r| r == rule_id)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidatorConfig {
    pub policy: Policy,
    pub parallel: bool,
    pub max_threads: usize,
    pub timeout_seconds: Option<u64>,
    pub enable_progress: bool,
    pub enable_verbose_output: bool,
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            policy: Policy::default(),
            parallel: true,
            max_threads: num_cpus::get(),
            timeout_seconds: None,
            enable_progress: true,
            enable_verbose_output: false,
        }
    }
}

impl ValidatorConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_policy(mut self, policy: Policy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn with_timeout_seconds(mut self, seconds: u64) -> Self {
        self.timeout_seconds = Some(seconds);
        self
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.max_threads == 0 {
            return Err("max_threads must be greater than 0".to_string());
        }
        if self.timeout_seconds == Some(0) {
            return Err("timeout must be greater than 0 seconds".to_string());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(ValidatorConfig::default().validate().is_ok());
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let config = ValidatorConfig {
            timeout_seconds: Some(0),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    // min_severity above fail_threshold is a legal combination: findings at
    // or above min_severity still clear the lower threshold and fail the run.
    #[test]
    fn test_min_severity_above_threshold_accepted() {
        let policy = Policy::new()
            .with_min_severity(Severity::Critical)
            .with_fail_threshold(Severity::Error);
        let config = ValidatorConfig::default().with_policy(policy);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_ignores() {
        let policy = Policy::new().with_ignored_rule("DC001");
        assert!(policy.ignores("DC001"));
        assert!(!policy.ignores("DC002"));
    }
}
