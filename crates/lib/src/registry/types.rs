use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::project::ProjectKind;

/// Current version of the `registry.json` format.
pub const REGISTRY_VERSION: u32 = 1;

/// What to register with the install environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallRequest {
  /// Project directory the registration comes from.
  pub path: PathBuf,
  pub id: String,
  pub kind: ProjectKind,
  /// Include directories, relative to `path`.
  pub includes: Vec<PathBuf>,
  /// Artefact base name to install from `path/bin/<platform>-<config>`.
  pub artefact: Option<String>,
}

impl InstallRequest {
  pub fn new(path: impl Into<PathBuf>, id: impl Into<String>, kind: ProjectKind) -> Self {
    Self {
      path: path.into(),
      id: id.into(),
      kind,
      includes: Vec::new(),
      artefact: None,
    }
  }
}

/// A registered package.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistryEntry {
  pub id: String,
  /// Canonical project directory.
  pub path: PathBuf,
  pub kind: ProjectKind,
  /// Installed include directory, if headers were registered.
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub includes: Option<PathBuf>,
  /// Installed artefact file names.
  #[serde(default, skip_serializing_if = "Vec::is_empty")]
  pub artefacts: Vec<String>,
}

/// Contents of `registry.json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistryIndex {
  pub version: u32,
  #[serde(default)]
  pub entries: BTreeMap<String, RegistryEntry>,
}

impl RegistryIndex {
  pub fn new() -> Self {
    Self {
      version: REGISTRY_VERSION,
      entries: BTreeMap::new(),
    }
  }
}

impl Default for RegistryIndex {
  fn default() -> Self {
    Self::new()
  }
}

#[derive(Debug, Error)]
pub enum RegistryError {
  #[error("failed to {op} '{}': {source}", path.display())]
  Io {
    op: &'static str,
    path: PathBuf,
    source: std::io::Error,
  },

  #[error("failed to parse registry '{}': {source}", path.display())]
  Parse { path: PathBuf, source: serde_json::Error },

  #[error("failed to serialize registry: {0}")]
  Serialize(#[source] serde_json::Error),

  #[error("unsupported registry version {found} (expected {expected})")]
  UnsupportedVersion { found: u32, expected: u32 },

  #[error("'{id}' is already installed from '{}', refusing to install it from '{}'", existing.display(), requested.display())]
  Conflict {
    id: String,
    existing: PathBuf,
    requested: PathBuf,
  },

  #[error("include directory '{}' of '{id}' does not exist", path.display())]
  MissingIncludes { id: String, path: PathBuf },

  #[error("artefact '{}' of '{id}' does not exist", path.display())]
  MissingArtefact { id: String, path: PathBuf },
}
