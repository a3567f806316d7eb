// Mon Aug 17 2026 - Alex

use crate::artifact::error::LoaderError;
use crate::artifact::kind::{format_hint, infer_kind, ArtifactKind, FormatHint};
use crate::artifact::locate::{offset_to_line_col, LineResolver};
use crate::artifact::node::{child_path, index_path, Node, NodeValue, Scalar};
use crate::report::Location;
use indexmap::IndexMap;
use std::fs;
use std::path::Path;

/// A single loaded input file: canonical tree plus the raw text it came
/// from. Immutable after load; shared read-only with every rule.
#[derive(Debug, Clone)]
pub struct Artifact {
    pub file: String,
    pub kind: ArtifactKind,
    pub root: Node,
    pub raw: String,
}

impl Artifact {
    pub fn file_location(&self) -> Location {
        self.root.location.clone()
    }
}

pub fn load(path: &Path) -> Result<Artifact, LoaderError> {
    let file = path.display().to_string();
    let content = fs::read_to_string(path).map_err(|source| LoaderError::Io {
        file: file.clone(),
        source,
    })?;
    load_str(&content, &file)
}

pub fn load_str(content: &str, file: &str) -> Result<Artifact, LoaderError> {
    let hint = format_hint(file);

    let root = match hint {
        FormatHint::Json => parse_json(content, file)?,
        FormatHint::Yaml => parse_yaml(content, file)?,
        FormatHint::Toml => parse_toml(content, file)?,
        FormatHint::Env => parse_env(content, file),
        FormatHint::Dockerfile => parse_dockerfile(content, file),
    };

    let kind = infer_kind(file, hint, &root);

    Ok(Artifact {
        file: file.to_string(),
        kind,
        root,
        raw: content.to_string(),
    })
}

// Parser-independent value, so the tree builder is written once. Quoted and
// unquoted scalar spellings collapse here: every parser hands over the
// resolved value, not the surface syntax.
enum RawValue {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    Seq(Vec<RawValue>),
    Map(Vec<(String, RawValue)>),
}

fn parse_json(content: &str, file: &str) -> Result<Node, LoaderError> {
    if content.trim().is_empty() {
        return Ok(Node::new(NodeValue::Null, Location::file_level(file)));
    }

    let value: serde_json::Value = serde_json::from_str(content)
        .map_err(|e| LoaderError::parse(file, e.line(), e.column(), e.to_string()))?;

    Ok(build_tree(from_json(value), content, file))
}

fn parse_yaml(content: &str, file: &str) -> Result<Node, LoaderError> {
    if content.trim().is_empty() {
        return Ok(Node::new(NodeValue::Null, Location::file_level(file)));
    }

    let value: serde_yaml::Value = serde_yaml::from_str(content).map_err(|e| {
        let (line, column) = e
            .location()
            .map(|l| (l.line(), l.column()))
            .unwrap_or((1, 1));
        LoaderError::parse(file, line, column, e.to_string())
    })?;

    Ok(build_tree(from_yaml(value), content, file))
}

fn parse_toml(content: &str, file: &str) -> Result<Node, LoaderError> {
    let value: toml::Value = toml::from_str(content).map_err(|e| {
        let (line, column) = e
            .span()
            .map(|span| offset_to_line_col(content, span.start))
            .unwrap_or((1, 1));
        LoaderError::parse(file, line, column, e.message().to_string())
    })?;

    Ok(build_tree(from_toml(value), content, file))
}

fn from_json(value: serde_json::Value) -> RawValue {
    match value {
        serde_json::Value::Null => RawValue::Null,
        serde_json::Value::Bool(b) => RawValue::Bool(b),
        serde_json::Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                RawValue::Int(i)
            } else {
                RawValue::Float(n.as_f64().unwrap_or(0.0))
            }
        }
        serde_json::Value::String(s) => RawValue::Str(s),
        serde_json::Value::Array(items) => {
            RawValue::Seq(items.into_iter().map(from_json).collect())
        }
        serde_json::Value::Object(map) => RawValue::Map(
            map.into_iter().map(|(k, v)| (k, from_json(v))).collect(),
        ),
    }
}

fn from_yaml(value: serde_yaml::Value) -> RawValue {
    match value {
        serde_yaml::Value::Null => RawValue::Null,
        serde_yaml::Value::Bool(b) => RawValue::Bool(b),
        serde_yaml::Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                RawValue::Int(i)
            } else {
                RawValue::Float(n.as_f64().unwrap_or(0.0))
            }
        }
        serde_yaml::Value::String(s) => RawValue::Str(s),
        serde_yaml::Value::Sequence(items) => {
            RawValue::Seq(items.into_iter().map(from_yaml).collect())
        }
        serde_yaml::Value::Mapping(map) => RawValue::Map(
            map.into_iter()
                .map(|(k, v)| (yaml_key(&k), from_yaml(v)))
                .collect(),
        ),
        serde_yaml::Value::Tagged(tagged) => from_yaml(tagged.value),
    }
}

fn yaml_key(key: &serde_yaml::Value) -> String {
    match key {
        serde_yaml::Value::String(s) => s.clone(),
        serde_yaml::Value::Bool(b) => b.to_string(),
        serde_yaml::Value::Number(n) => n.to_string(),
        serde_yaml::Value::Null => "null".to_string(),
        other => serde_yaml::to_string(other)
            .unwrap_or_default()
            .trim()
            .to_string(),
    }
}

fn from_toml(value: toml::Value) -> RawValue {
    match value {
        toml::Value::String(s) => RawValue::Str(s),
        toml::Value::Integer(i) => RawValue::Int(i),
        toml::Value::Float(f) => RawValue::Float(f),
        toml::Value::Boolean(b) => RawValue::Bool(b),
        toml::Value::Datetime(dt) => RawValue::Str(dt.to_string()),
        toml::Value::Array(items) => RawValue::Seq(items.into_iter().map(from_toml).collect()),
        toml::Value::Table(map) => RawValue::Map(
            map.into_iter().map(|(k, v)| (k, from_toml(v))).collect(),
        ),
    }
}

fn build_tree(raw: RawValue, content: &str, file: &str) -> Node {
    let mut resolver = LineResolver::new(content);
    build_node(raw, "", 1, &mut resolver, file)
}

fn build_node(
    raw: RawValue,
    path: &str,
    parent_line: usize,
    resolver: &mut LineResolver<'_>,
    file: &str,
) -> Node {
    match raw {
        RawValue::Null => Node::new(NodeValue::Null, Location::new(file, parent_line, path)),
        RawValue::Bool(b) => Node::new(
            NodeValue::Scalar(Scalar::Bool(b)),
            Location::new(file, parent_line, path),
        ),
        RawValue::Int(i) => Node::new(
            NodeValue::Scalar(Scalar::Integer(i)),
            Location::new(file, parent_line, path),
        ),
        RawValue::Float(f) => Node::new(
            NodeValue::Scalar(Scalar::Float(f)),
            Location::new(file, parent_line, path),
        ),
        RawValue::Str(s) => Node::new(
            NodeValue::Scalar(Scalar::String(s)),
            Location::new(file, parent_line, path),
        ),
        RawValue::Seq(items) => {
            let mut children = Vec::with_capacity(items.len());
            for (index, item) in items.into_iter().enumerate() {
                let item_path = index_path(path, index);
                let line = match &item {
                    RawValue::Str(s) => resolver.resolve_value(s, parent_line),
                    _ => resolver.current_line().max(parent_line),
                };
                children.push(build_node(item, &item_path, line, resolver, file));
            }
            let line = children
                .first()
                .map(|c| c.location.line)
                .unwrap_or(parent_line);
            Node::new(NodeValue::Sequence(children), Location::new(file, line, path))
        }
        RawValue::Map(entries) => {
            let mut map = IndexMap::with_capacity(entries.len());
            for (key, value) in entries {
                let line = resolver.resolve_key(&key, parent_line);
                let key_path = child_path(path, &key);
                map.insert(key.clone(), build_node(value, &key_path, line, resolver, file));
            }
            let line = if path.is_empty() { 1 } else { parent_line };
            Node::new(NodeValue::Mapping(map), Location::new(file, line, path))
        }
    }
}

// .env files normalize to a flat mapping. Surrounding quotes are stripped so
// KEY="x" and KEY=x produce the same canonical scalar; line-level syntax
// checks read the raw text instead.
fn parse_env(content: &str, file: &str) -> Node {
    let mut map = IndexMap::new();

    for (index, line) in content.lines().enumerate() {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let Some(eq) = trimmed.find('=') else {
            continue;
        };

        let key = trimmed[..eq].trim().to_string();
        if key.is_empty() || !key.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
            continue;
        }

        let value = strip_quotes(trimmed[eq + 1..].trim());
        let location = Location::new(file, index + 1, &key);
        map.insert(
            key,
            Node::new(NodeValue::Scalar(Scalar::String(value.to_string())), location),
        );
    }

    Node::new(NodeValue::Mapping(map), Location::file_level(file))
}

fn strip_quotes(value: &str) -> &str {
    if value.len() >= 2 {
        let bytes = value.as_bytes();
        if (bytes[0] == b'"' && bytes[value.len() - 1] == b'"')
            || (bytes[0] == b'\'' && bytes[value.len() - 1] == b'\'')
        {
            return &value[1..value.len() - 1];
        }
    }
    value
}

// Dockerfiles normalize to a sequence of { instruction, arguments } nodes,
// one per logical instruction. Continuation lines fold into the line the
// instruction started on.
fn parse_dockerfile(content: &str, file: &str) -> Node {
    let mut instructions = Vec::new();
    let mut pending: Option<(usize, String)> = None;

    for (index, line) in content.lines().enumerate() {
        let trimmed = line.trim();

        if let Some((start, mut buffer)) = pending.take() {
            buffer.push(' ');
            buffer.push_str(trimmed.trim_end_matches('\\').trim());
            if trimmed.ends_with('\\') {
                pending = Some((start, buffer));
            } else {
                instructions.push((start, buffer));
            }
            continue;
        }

        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        if trimmed.ends_with('\\') {
            pending = Some((index + 1, trimmed.trim_end_matches('\\').trim().to_string()));
        } else {
            instructions.push((index + 1, trimmed.to_string()));
        }
    }

    if let Some((start, buffer)) = pending {
        instructions.push((start, buffer));
    }

    let mut items = Vec::with_capacity(instructions.len());
    for (position, (line, text)) in instructions.into_iter().enumerate() {
        let item_path = index_path("", position);
        let (word, rest) = match text.split_once(char::is_whitespace) {
            Some((w, r)) => (w.to_string(), r.trim().to_string()),
            None => (text.clone(), String::new()),
        };

        let mut map = IndexMap::new();
        map.insert(
            "instruction".to_string(),
            Node::new(
                NodeValue::Scalar(Scalar::String(word.to_uppercase())),
                Location::new(file, line, &child_path(&item_path, "instruction")),
            ),
        );
        map.insert(
            "arguments".to_string(),
            Node::new(
                NodeValue::Scalar(Scalar::String(rest)),
                Location::new(file, line, &child_path(&item_path, "arguments")),
            ),
        );
        items.push(Node::new(
            NodeValue::Mapping(map),
            Location::new(file, line, &item_path),
        ));
    }

    Node::new(NodeValue::Sequence(items), Location::file_level(file))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_yaml_with_lines() {
        let yaml = "version: '3'\nservices:\n  web:\n    image: nginx:latest\n";
        let artifact = load_str(yaml, "docker-compose.yml").unwrap();

        let image = artifact.root.get_path("services.web.image").unwrap();
        assert_eq!(image.as_str(), Some("nginx:latest"));
        assert_eq!(image.location.line, 4);
        assert_eq!(image.location.path, "services.web.image");

        let version = artifact.root.get("version").unwrap();
        assert_eq!(version.location.line, 1);
    }

    #[test]
    fn test_quoted_and_unquoted_scalars_normalize() {
        let a = load_str("name: demo\n", "a.yaml").unwrap();
        let b = load_str("name: \"demo\"\n", "b.yaml").unwrap();
        assert_eq!(
            a.root.get("name").unwrap().as_str(),
            b.root.get("name").unwrap().as_str()
        );
    }

    #[test]
    fn test_malformed_yaml_reports_line() {
        let err = load_str("services:\n  web: [unclosed\n", "bad.yaml").unwrap_err();
        match err {
            LoaderError::Parse { file, line, .. } => {
                assert_eq!(file, "bad.yaml");
                assert!(line >= 2);
            }
            other => panic!("expected parse error, got {:?}", other),
        }
    }

    #[test]
    fn test_load_json() {
        let json = "{\n  \"version\": \"1.0\",\n  \"debug\": true\n}";
        let artifact = load_str(json, "config.json").unwrap();
        assert_eq!(artifact.root.get("debug").unwrap().as_bool(), Some(true));
        assert_eq!(artifact.root.get("version").unwrap().location.line, 2);
    }

    #[test]
    fn test_malformed_json_reports_position() {
        let err = load_str("{\"a\": }", "bad.json").unwrap_err();
        match err {
            LoaderError::Parse { line, column, .. } => {
                assert_eq!(line, 1);
                assert!(column > 1);
            }
            other => panic!("expected parse error, got {:?}", other),
        }
    }

    #[test]
    fn test_load_toml() {
        let toml = "[server]\nhost = \"0.0.0.0\"\nport = 8080\n";
        let artifact = load_str(toml, "app.toml").unwrap();
        let port = artifact.root.get_path("server.port").unwrap();
        assert_eq!(port.as_scalar().and_then(|s| s.as_i64()), Some(8080));
        assert_eq!(port.location.line, 3);
    }

    #[test]
    fn test_load_env() {
        let env = "# comment\nAPP_NAME=demo\nDB_URL=\"postgres://localhost\"\nbroken line\n";
        let artifact = load_str(env, ".env").unwrap();
        let map = artifact.root.as_mapping().unwrap();
        assert_eq!(map.len(), 2);
        assert_eq!(
            artifact.root.get("DB_URL").unwrap().as_str(),
            Some("postgres://localhost")
        );
        assert_eq!(artifact.root.get("APP_NAME").unwrap().location.line, 2);
    }

    #[test]
    fn test_load_dockerfile() {
        let dockerfile = "FROM ubuntu:22.04\n\nRUN apt-get update \\\n  && apt-get install -y curl\nUSER app\n";
        let artifact = load_str(dockerfile, "Dockerfile").unwrap();
        let items = artifact.root.as_sequence().unwrap();
        assert_eq!(items.len(), 3);
        assert_eq!(items[0].get("instruction").unwrap().as_str(), Some("FROM"));
        assert_eq!(items[1].location.line, 3);
        assert!(items[1]
            .get("arguments")
            .unwrap()
            .as_str()
            .unwrap()
            .contains("apt-get install"));
    }

    #[test]
    fn test_empty_document() {
        let artifact = load_str("", "empty.yaml").unwrap();
        assert!(artifact.root.is_null());
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = load(Path::new("/nonexistent/definitely-missing.yaml")).unwrap_err();
        assert!(matches!(err, LoaderError::Io { .. }));
    }
}
