//! Loading project descriptors from `project.json`.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::consts::PROJECT_MANIFEST;

use super::ProjectError;
use super::descriptor::{DeclaredDependencies, Project};
use super::types::{AttrTable, Attributes, ProjectKind};

fn default_public() -> bool {
  true
}

/// On-disk shape of `project.json`.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ManifestFile {
  id: String,
  #[serde(rename = "type", default)]
  kind: ProjectKind,
  #[serde(default = "default_public")]
  public: bool,
  version: Option<String>,
  repository: Option<String>,
  artefact: Option<String>,
  #[serde(default)]
  keep_binary: bool,
  #[serde(rename = "use", default)]
  uses: Vec<String>,
  #[serde(rename = "use_private", default)]
  uses_private: Vec<String>,
  #[serde(rename = "use_build", default)]
  uses_build: Vec<String>,
  #[serde(default)]
  drivers: Vec<String>,
  #[serde(default)]
  sources: Vec<PathBuf>,
  #[serde(default)]
  includes: Vec<PathBuf>,
  #[serde(default)]
  value: AttrTable,
  /// Driver-scoped attribute tables, keyed by driver id.
  #[serde(default)]
  driver: BTreeMap<String, AttrTable>,
  dependee: Option<serde_json::Value>,
}

/// Load the descriptor of the project in `dir`.
///
/// # Errors
///
/// Fails if the manifest is missing, malformed, has an empty id, or
/// configures a driver the project does not use.
pub fn load_project(dir: &Path) -> Result<Project, ProjectError> {
  let path = dir.join(PROJECT_MANIFEST);
  let content = fs::read_to_string(&path).map_err(|source| ProjectError::Read {
    path: path.clone(),
    source,
  })?;
  parse_project(dir, &path, &content)
}

pub(crate) fn parse_project(dir: &Path, manifest: &Path, content: &str) -> Result<Project, ProjectError> {
  let file: ManifestFile = serde_json::from_str(content).map_err(|source| ProjectError::Parse {
    path: manifest.to_path_buf(),
    source,
  })?;

  if file.id.trim().is_empty() {
    return Err(ProjectError::Invalid {
      path: manifest.to_path_buf(),
      reason: "project id is empty".to_string(),
    });
  }

  if let Some(unused) = file.driver.keys().find(|d| !file.drivers.contains(d)) {
    return Err(ProjectError::Invalid {
      path: manifest.to_path_buf(),
      reason: format!("attributes given for driver '{}' which is not in 'drivers'", unused),
    });
  }

  let mut project = Project::new(file.id, dir, file.kind);
  project.public = file.public;
  project.version = file.version;
  project.repository = file.repository;
  project.artefact = file.artefact;
  project.keep_binary = file.keep_binary;
  project.declared = DeclaredDependencies {
    uses: file.uses,
    uses_private: file.uses_private,
    uses_build: file.uses_build,
  };
  project.drivers = file.drivers;
  project.sources = file.sources;
  project.includes = file.includes;
  project.attributes = Attributes {
    project: file.value,
    drivers: file.driver,
  };
  project.dependee = file.dependee;
  project.build_dependencies.push(manifest.to_path_buf());

  Ok(project)
}
