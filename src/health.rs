// Wed Aug 19 2026 - Alex

use std::process::Command;

/// Tools a DevOps workstation is expected to carry. Missing ones are
/// warnings, not errors; plenty of setups only use a subset.
pub const TOOLS: &[&str] = &[
    "git",
    "docker",
    "kubectl",
    "ansible",
    "terraform",
    "make",
    "python3",
    "node",
    "npm",
];

pub const REQUIRED_ENV_VARS: &[&str] = &["PATH", "HOME", "USER", "SHELL"];
pub const OPTIONAL_ENV_VARS: &[&str] = &["CI", "GITHUB_ACTIONS", "DOCKER_HOST"];

#[derive(Debug, Clone)]
pub struct ToolStatus {
    pub name: &'static str,
    /// First line of the tool's version output, or None if the tool is
    /// not on PATH.
    pub version: Option<String>,
}

#[derive(Debug, Clone)]
pub struct EnvStatus {
    pub name: &'static str,
    pub value: Option<String>,
    pub required: bool,
}

/// Snapshot of the local environment: system facts, tool availability,
/// and the environment variables the toolchain cares about.
#[derive(Debug, Clone)]
pub struct HealthReport {
    pub system: Vec<(String, String)>,
    pub tools: Vec<ToolStatus>,
    pub env: Vec<EnvStatus>,
}

impl HealthReport {
    pub fn warnings(&self) -> usize {
        let missing_tools = self.tools.iter().filter(|t| t.version.is_none()).count();
        let missing_env = self
            .env
            .iter()
            .filter(|e| e.required && e.value.is_none())
            .count();
        missing_tools + missing_env
    }

    pub fn healthy(&self) -> bool {
        self.warnings() == 0
    }
}

pub fn collect() -> HealthReport {
    HealthReport {
        system: system_info(),
        tools: TOOLS.iter().map(|t| check_tool(t)).collect(),
        env: env_statuses(),
    }
}

fn system_info() -> Vec<(String, String)> {
    vec![
        (
            "OS".to_string(),
            format!("{} {}", std::env::consts::OS, std::env::consts::ARCH),
        ),
        ("CPU".to_string(), format!("{} cores", num_cpus::get())),
    ]
}

fn check_tool(name: &'static str) -> ToolStatus {
    ToolStatus {
        name,
        version: tool_version(name),
    }
}

fn version_args(tool: &str) -> &'static [&'static str] {
    match tool {
        "kubectl" => &["version", "--client"],
        _ => &["--version"],
    }
}

/// Runs the tool's version command. A spawn failure means the tool is not
/// installed; some tools print their version to stderr instead of stdout.
fn tool_version(tool: &str) -> Option<String> {
    let output = Command::new(tool).args(version_args(tool)).output().ok()?;

    let stdout = String::from_utf8_lossy(&output.stdout);
    let line = first_line(&stdout);
    if !line.is_empty() {
        return Some(line);
    }

    let stderr = String::from_utf8_lossy(&output.stderr);
    let line = first_line(&stderr);
    if !line.is_empty() {
        return Some(line);
    }

    Some("installed".to_string())
}

fn first_line(text: &str) -> String {
    text.lines().next().unwrap_or("").trim().to_string()
}

fn env_statuses() -> Vec<EnvStatus> {
    REQUIRED_ENV_VARS
        .iter()
        .map(|name| env_status(name, true))
        .chain(OPTIONAL_ENV_VARS.iter().map(|name| env_status(name, false)))
        .collect()
}

fn env_status(name: &'static str, required: bool) -> EnvStatus {
    EnvStatus {
        name,
        value: std::env::var(name).ok().filter(|v| !v.is_empty()),
        required,
    }
}
