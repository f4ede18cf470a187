//! Value types used by project descriptors.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// What a project produces and where it is installed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectKind {
  /// Executable installed in the package store.
  Application,
  /// Library installed in the package store.
  #[default]
  Package,
  /// Executable installed to the global bin directory.
  Tool,
}

impl ProjectKind {
  pub fn as_str(&self) -> &'static str {
    match self {
      Self::Application => "application",
      Self::Package => "package",
      Self::Tool => "tool",
    }
  }

  /// Whether the artefact is an executable rather than a library.
  pub fn is_executable(&self) -> bool {
    matches!(self, Self::Application | Self::Tool)
  }
}

impl fmt::Display for ProjectKind {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

/// Handle to a project inside a [`super::ProjectGraph`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ProjectRef(pub(crate) usize);

impl ProjectRef {
  pub fn index(self) -> usize {
    self.0
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttrKind {
  Boolean,
  String,
  Number,
  Array,
}

/// A build-extension attribute as written in a project manifest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttrValue {
  Boolean(bool),
  Number(f64),
  String(String),
  Array(Vec<AttrValue>),
}

impl AttrValue {
  pub fn kind(&self) -> AttrKind {
    match self {
      Self::Boolean(_) => AttrKind::Boolean,
      Self::Number(_) => AttrKind::Number,
      Self::String(_) => AttrKind::String,
      Self::Array(_) => AttrKind::Array,
    }
  }

  pub fn as_str(&self) -> Option<&str> {
    match self {
      Self::String(s) => Some(s),
      _ => None,
    }
  }

  pub fn as_bool(&self) -> Option<bool> {
    match self {
      Self::Boolean(b) => Some(*b),
      _ => None,
    }
  }
}

pub type AttrTable = BTreeMap<String, AttrValue>;

/// Project-wide attributes plus per-driver overrides.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Attributes {
  pub project: AttrTable,
  pub drivers: BTreeMap<String, AttrTable>,
}

impl Attributes {
  /// Look up `name` for `driver`, falling back to the project-wide table.
  pub fn lookup(&self, driver: &str, name: &str) -> Option<&AttrValue> {
    self
      .drivers
      .get(driver)
      .and_then(|table| table.get(name))
      .or_else(|| self.project.get(name))
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn attr_values_parse_untagged() {
    let table: AttrTable =
      serde_json::from_str(r#"{"a": true, "b": 1.5, "c": "x", "d": ["y", false]}"#).unwrap();

    assert_eq!(table["a"].kind(), AttrKind::Boolean);
    assert_eq!(table["b"].kind(), AttrKind::Number);
    assert_eq!(table["c"].as_str(), Some("x"));
    assert_eq!(table["d"].kind(), AttrKind::Array);
  }

  #[test]
  fn driver_attributes_shadow_project_attributes() {
    let mut attrs = Attributes::default();
    attrs.project.insert("std".into(), AttrValue::String("c99".into()));
    attrs.project.insert("static".into(), AttrValue::Boolean(true));
    attrs
      .drivers
      .entry("lang.c".into())
      .or_default()
      .insert("std".into(), AttrValue::String("c11".into()));

    assert_eq!(attrs.lookup("lang.c", "std").and_then(AttrValue::as_str), Some("c11"));
    assert_eq!(attrs.lookup("lang.cpp", "std").and_then(AttrValue::as_str), Some("c99"));
    assert_eq!(attrs.lookup("lang.c", "static").and_then(AttrValue::as_bool), Some(true));
    assert!(attrs.lookup("lang.c", "missing").is_none());
  }

  #[test]
  fn kind_serializes_lowercase() {
    assert_eq!(serde_json::to_string(&ProjectKind::Tool).unwrap(), "\"tool\"");
    assert!(ProjectKind::Application.is_executable());
    assert!(!ProjectKind::Package.is_executable());
  }
}
