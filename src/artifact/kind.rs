// Mon Aug 17 2026 - Alex

use crate::artifact::node::Node;
use std::fmt;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArtifactKind {
    DockerCompose,
    Kubernetes,
    AnsiblePlaybook,
    GithubActions,
    Dockerfile,
    EnvFile,
    Json,
    Yaml,
    Toml,
    Unknown,
}

impl ArtifactKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ArtifactKind::DockerCompose => "docker-compose",
            ArtifactKind::Kubernetes => "kubernetes",
            ArtifactKind::AnsiblePlaybook => "ansible-playbook",
            ArtifactKind::GithubActions => "github-actions",
            ArtifactKind::Dockerfile => "dockerfile",
            ArtifactKind::EnvFile => "env",
            ArtifactKind::Json => "json",
            ArtifactKind::Yaml => "yaml",
            ArtifactKind::Toml => "toml",
            ArtifactKind::Unknown => "unknown",
        }
    }

    /// Generic tree kinds that are not a recognized DevOps document.
    pub fn is_generic(&self) -> bool {
        matches!(
            self,
            ArtifactKind::Json | ArtifactKind::Yaml | ArtifactKind::Toml | ArtifactKind::Unknown
        )
    }
}

impl fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Text format of an input file, decided before parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatHint {
    Json,
    Yaml,
    Toml,
    Env,
    Dockerfile,
}

pub fn format_hint(file_name: &str) -> FormatHint {
    let name = Path::new(file_name)
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| file_name.to_string());

    if name.contains("Dockerfile") {
        return FormatHint::Dockerfile;
    }
    if name == ".env" || name.starts_with(".env.") || name.ends_with(".env") {
        return FormatHint::Env;
    }

    match Path::new(&name).extension().and_then(|e| e.to_str()) {
        Some("json") => FormatHint::Json,
        Some("yaml") | Some("yml") => FormatHint::Yaml,
        Some("toml") => FormatHint::Toml,
        Some("env") => FormatHint::Env,
        // Unknown extension: YAML is a superset of JSON, so try YAML.
        _ => FormatHint::Yaml,
    }
}

/// True when the file name looks like a configuration artifact worth
/// validating during a directory walk.
pub fn is_recognized(file_name: &str) -> bool {
    let name = Path::new(file_name)
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| file_name.to_string());

    if name.contains("Dockerfile") || name == ".env" || name.starts_with(".env.") {
        return true;
    }

    matches!(
        Path::new(&name).extension().and_then(|e| e.to_str()),
        Some("json") | Some("yaml") | Some("yml") | Some("toml") | Some("env")
    )
}

/// Content sniffing over the canonical tree, refining the format-level kind.
pub fn infer_kind(file_name: &str, hint: FormatHint, root: &Node) -> ArtifactKind {
    match hint {
        FormatHint::Dockerfile => return ArtifactKind::Dockerfile,
        FormatHint::Env => return ArtifactKind::EnvFile,
        _ => {}
    }

    if file_name.contains(".github") && hint == FormatHint::Yaml {
        if root.get("jobs").is_some() {
            return ArtifactKind::GithubActions;
        }
    }

    if root.get("services").is_some()
        && root
            .get("services")
            .map(|s| s.as_mapping().is_some())
            .unwrap_or(false)
    {
        return ArtifactKind::DockerCompose;
    }

    if root.get("apiVersion").is_some() && root.get("kind").is_some() {
        return ArtifactKind::Kubernetes;
    }

    if root.get("on").is_some() && root.get("jobs").is_some() {
        return ArtifactKind::GithubActions;
    }

    if let Some(seq) = root.as_sequence() {
        if seq
            .first()
            .map(|play| play.get("hosts").is_some())
            .unwrap_or(false)
        {
            return ArtifactKind::AnsiblePlaybook;
        }
    }

    match hint {
        FormatHint::Json => ArtifactKind::Json,
        FormatHint::Yaml => ArtifactKind::Yaml,
        FormatHint::Toml => ArtifactKind::Toml,
        _ => ArtifactKind::Unknown,
    }
}
