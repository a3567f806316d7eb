// Mon Aug 17 2026 - Alex

use crate::report::Location;
use indexmap::IndexMap;
use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    String(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
}

impl Scalar {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Scalar::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Scalar::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Scalar::Integer(i) => Some(*i),
            _ => None,
        }
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::String(s) => write!(f, "{}", s),
            Scalar::Integer(i) => write!(f, "{}", i),
            Scalar::Float(v) => write!(f, "{}", v),
            Scalar::Bool(b) => write!(f, "{}", b),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum NodeValue {
    Mapping(IndexMap<String, Node>),
    Sequence(Vec<Node>),
    Scalar(Scalar),
    Null,
}

/// One node of the canonical artifact tree. The tree is never mutated after
/// loading; rules hold shared references only.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub value: NodeValue,
    pub location: Location,
}

impl Node {
    pub fn new(value: NodeValue, location: Location) -> Self {
        Self { value, location }
    }

    pub fn get(&self, key: &str) -> Option<&Node> {
        match &self.value {
            NodeValue::Mapping(map) => map.get(key),
            _ => None,
        }
    }

    /// Dotted-path lookup, e.g. `spec.template.spec`.
    pub fn get_path(&self, path: &str) -> Option<&Node> {
        let mut current = self;
        for part in path.split('.') {
            current = current.get(part)?;
        }
        Some(current)
    }

    pub fn as_mapping(&self) -> Option<&IndexMap<String, Node>> {
        match &self.value {
            NodeValue::Mapping(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_sequence(&self) -> Option<&[Node]> {
        match &self.value {
            NodeValue::Sequence(seq) => Some(seq),
            _ => None,
        }
    }

    pub fn as_scalar(&self) -> Option<&Scalar> {
        match &self.value {
            NodeValue::Scalar(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        self.as_scalar().and_then(|s| s.as_str())
    }

    pub fn as_bool(&self) -> Option<bool> {
        self.as_scalar().and_then(|s| s.as_bool())
    }

    pub fn is_null(&self) -> bool {
        matches!(self.value, NodeValue::Null)
    }

    pub fn is_empty(&self) -> bool {
        match &self.value {
            NodeValue::Mapping(map) => map.is_empty(),
            NodeValue::Sequence(seq) => seq.is_empty(),
            NodeValue::Null => true,
            NodeValue::Scalar(_) => false,
        }
    }
}

pub fn child_path(parent: &str, key: &str) -> String {
    if parent.is_empty() {
        key.to_string()
    } else {
        format!("{}.{}", parent, key)
    }
}

pub fn index_path(parent: &str, index: usize) -> String {
    format!("{}[{}]", parent, index)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scalar(text: &str) -> Node {
        Node::new(
            NodeValue::Scalar(Scalar::String(text.to_string())),
            Location::new("test.yaml", 1, ""),
        )
    }

    #[test]
    fn test_get_path() {
        let mut inner = IndexMap::new();
        inner.insert("image".to_string(), scalar("nginx:latest"));
        let mut services = IndexMap::new();
        services.insert(
            "web".to_string(),
            Node::new(NodeValue::Mapping(inner), Location::new("test.yaml", 2, "services.web")),
        );
        let mut root_map = IndexMap::new();
        root_map.insert(
            "services".to_string(),
            Node::new(NodeValue::Mapping(services), Location::new("test.yaml", 1, "services")),
        );
        let root = Node::new(NodeValue::Mapping(root_map), Location::file_level("test.yaml"));

        let image = root.get_path("services.web.image").unwrap();
        assert_eq!(image.as_str(), Some("nginx:latest"));
        assert!(root.get_path("services.db").is_none());
    }

    #[test]
    fn test_paths() {
        assert_eq!(child_path("", "services"), "services");
        assert_eq!(child_path("services", "web"), "services.web");
        assert_eq!(index_path("jobs.build.steps", 0), "jobs.build.steps[0]");
    }

    #[test]
    fn test_is_empty() {
        let node = Node::new(NodeValue::Mapping(IndexMap::new()), Location::file_level("a"));
        assert!(node.is_empty());
        assert!(!scalar("x").is_empty());
    }
}
