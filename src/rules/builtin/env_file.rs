// Tue Aug 18 2026 - Alex

use crate::artifact::{Artifact, ArtifactKind};
use crate::report::{Finding, Location, Severity};
use crate::rules::error::RuleError;
use crate::rules::rule::Rule;
use once_cell::sync::Lazy;
use regex::Regex;

static ENV_LINE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*=").expect("static regex"));

static SECRET_KEY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)(password|passwd|secret|token|api_?key|private_?key)").expect("static regex"));

// Env rules read the raw lines: normalization strips quoting, and the
// malformed lines these checks exist for never make it into the tree.
fn raw_entries(artifact: &Artifact) -> impl Iterator<Item = (usize, &str)> {
    artifact
        .raw
        .lines()
        .enumerate()
        .map(|(index, line)| (index + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty() && !line.starts_with('#'))
}

/// ENV001: lines that are not KEY=VALUE assignments.
pub struct EnvSyntaxRule;

impl Rule for EnvSyntaxRule {
    fn id(&self) -> &str {
        "ENV001"
    }

    fn severity(&self) -> Severity {
        Severity::Warning
    }

    fn description(&self) -> &str {
        "Line does not match KEY=VALUE syntax"
    }

    fn applies_to(&self, kind: ArtifactKind) -> bool {
        kind == ArtifactKind::EnvFile
    }

    fn evaluate(&self, artifact: &Artifact) -> Result<Vec<Finding>, RuleError> {
        let mut findings = Vec::new();

        for (line_number, line) in raw_entries(artifact) {
            if !ENV_LINE.is_match(line) {
                findings.push(Finding::warning(
                    self.id(),
                    &format!("line doesn't match ENV syntax: {}", line),
                    Location::new(&artifact.file, line_number, ""),
                ));
            }
        }

        Ok(findings)
    }
}

/// ENV002: unquoted values containing spaces, which most shells truncate.
pub struct EnvUnquotedSpacesRule;

impl Rule for EnvUnquotedSpacesRule {
    fn id(&self) -> &str {
        "ENV002"
    }

    fn severity(&self) -> Severity {
        Severity::Warning
    }

    fn description(&self) -> &str {
        "Unquoted value contains spaces"
    }

    fn applies_to(&self, kind: ArtifactKind) -> bool {
        kind == ArtifactKind::EnvFile
    }

    fn evaluate(&self, artifact: &Artifact) -> Result<Vec<Finding>, RuleError> {
        let mut findings = Vec::new();

        for (line_number, line) in raw_entries(artifact) {
            let Some((key, value)) = line.split_once('=') else {
                continue;
            };
            if !ENV_LINE.is_match(line) {
                continue;
            }
            let value = value.trim();
            if value.contains(' ') && !value.starts_with('"') && !value.starts_with('\'') {
                findings.push(Finding::warning(
                    self.id(),
                    &format!("unquoted value with spaces for '{}'", key),
                    Location::new(&artifact.file, line_number, key),
                ));
            }
        }

        Ok(findings)
    }
}

/// ENV003: secret-looking keys with literal values committed in the file.
pub struct EnvPlaintextSecretRule;

impl Rule for EnvPlaintextSecretRule {
    fn id(&self) -> &str {
        "ENV003"
    }

    fn severity(&self) -> Severity {
        Severity::Error
    }

    fn description(&self) -> &str {
        "Plaintext secret in env file"
    }

    fn applies_to(&self, kind: ArtifactKind) -> bool {
        kind == ArtifactKind::EnvFile
    }

    fn evaluate(&self, artifact: &Artifact) -> Result<Vec<Finding>, RuleError> {
        let mut findings = Vec::new();

        let Some(map) = artifact.root.as_mapping() else {
            return Ok(findings);
        };

        for (key, node) in map {
            if !SECRET_KEY.is_match(key) {
                continue;
            }
            let Some(value) = node.as_str() else {
                continue;
            };
            // References like ${VAULT_TOKEN} are fine; literals are not.
            if value.is_empty() || value.starts_with("${") {
                continue;
            }
            findings.push(
                Finding::error(
                    self.id(),
                    &format!("'{}' looks like a plaintext secret", key),
                    node.location.clone(),
                )
                .with_remediation("move the value to a secret manager and reference it instead"),
            );
        }

        Ok(findings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::artifact::load_str;

    const ENV: &str = "APP_NAME=demo\nGREETING=hello world\nDB_PASSWORD=hunter2\nVAULT_TOKEN=${VAULT_TOKEN}\nnot a var\n";

    #[test]
    fn test_syntax_rule() {
        let artifact = load_str(ENV, ".env").unwrap();
        let findings = EnvSyntaxRule.evaluate(&artifact).unwrap();
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].location.line, 5);
    }

    #[test]
    fn test_unquoted_spaces() {
        let artifact = load_str(ENV, ".env").unwrap();
        let findings = EnvUnquotedSpacesRule.evaluate(&artifact).unwrap();
        assert_eq!(findings.len(), 1);
        assert!(findings[0].message.contains("GREETING"));
        assert_eq!(findings[0].location.line, 2);
    }

    #[test]
    fn test_quoted_spaces_ok() {
        let artifact = load_str("GREETING=\"hello world\"\n", ".env").unwrap();
        assert!(EnvUnquotedSpacesRule.evaluate(&artifact).unwrap().is_empty());
    }

    #[test]
    fn test_plaintext_secret() {
        let artifact = load_str(ENV, ".env").unwrap();
        let findings = EnvPlaintextSecretRule.evaluate(&artifact).unwrap();
        assert_eq!(findings.len(), 1);
        assert!(findings[0].message.contains("DB_PASSWORD"));
        assert_eq!(findings[0].severity, Severity::Error);
    }

    #[test]
    fn test_secret_reference_ok() {
        let artifact = load_str("API_KEY=${SSM_API_KEY}\n", ".env").unwrap();
        assert!(EnvPlaintextSecretRule.evaluate(&artifact).unwrap().is_empty());
    }
}
