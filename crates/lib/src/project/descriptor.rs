//! The project descriptor: one buildable unit and its dependency edges.

use std::path::PathBuf;

use super::types::{Attributes, ProjectKind, ProjectRef};

/// Dependency ids exactly as declared in the manifest.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeclaredDependencies {
  /// Visible to dependees.
  pub uses: Vec<String>,
  /// Local to this project.
  pub uses_private: Vec<String>,
  /// Needed while building, never linked.
  pub uses_build: Vec<String>,
}

impl DeclaredDependencies {
  pub fn all(&self) -> impl Iterator<Item = &String> {
    self.uses.iter().chain(&self.uses_private).chain(&self.uses_build)
  }
}

/// One buildable unit.
///
/// Relation collections and readiness counters are owned by the
/// [`super::ProjectGraph`] the project lives in and only change through it.
#[derive(Debug, Clone)]
pub struct Project {
  pub path: PathBuf,
  pub id: String,
  pub kind: ProjectKind,
  pub public: bool,
  pub declared: DeclaredDependencies,
  pub drivers: Vec<String>,
  pub sources: Vec<PathBuf>,
  pub includes: Vec<PathBuf>,
  pub version: Option<String>,
  pub repository: Option<String>,
  /// Artefact base name; defaults to the id with `.` replaced by `_`.
  pub artefact: Option<String>,
  /// Keep the artefact when the project is cleaned.
  pub keep_binary: bool,
  pub attributes: Attributes,
  /// Build instructions applied to projects that use this one, kept as
  /// written in the manifest.
  pub dependee: Option<serde_json::Value>,

  pub changed: bool,
  pub artefact_outdated: bool,
  pub sources_outdated: bool,

  /// Auxiliary files a build extension wants removed on clean.
  pub files_to_clean: Vec<PathBuf>,
  /// Files that trigger a rebuild when they change.
  pub build_dependencies: Vec<PathBuf>,

  pub(crate) uses: Vec<ProjectRef>,
  pub(crate) uses_private: Vec<ProjectRef>,
  pub(crate) uses_build: Vec<ProjectRef>,
  pub(crate) link: Vec<ProjectRef>,
  /// Declared dependencies satisfied by already installed packages.
  pub(crate) external: Vec<String>,
  pub(crate) dependents: Vec<ProjectRef>,
  pub(crate) unresolved_dependencies: u32,
  pub(crate) error: bool,
  pub(crate) built: bool,
  pub(crate) freshly_baked: bool,
}

impl Project {
  pub fn new(id: impl Into<String>, path: impl Into<PathBuf>, kind: ProjectKind) -> Self {
    Self {
      path: path.into(),
      id: id.into(),
      kind,
      public: true,
      declared: DeclaredDependencies::default(),
      drivers: Vec::new(),
      sources: Vec::new(),
      includes: Vec::new(),
      version: None,
      repository: None,
      artefact: None,
      keep_binary: false,
      attributes: Attributes::default(),
      dependee: None,
      changed: false,
      artefact_outdated: false,
      sources_outdated: false,
      files_to_clean: Vec::new(),
      build_dependencies: Vec::new(),
      uses: Vec::new(),
      uses_private: Vec::new(),
      uses_build: Vec::new(),
      link: Vec::new(),
      external: Vec::new(),
      dependents: Vec::new(),
      unresolved_dependencies: 0,
      error: false,
      built: false,
      freshly_baked: false,
    }
  }

  pub fn with_uses<I, S>(mut self, ids: I) -> Self
  where
    I: IntoIterator<Item = S>,
    S: Into<String>,
  {
    self.declared.uses = ids.into_iter().map(Into::into).collect();
    self
  }

  pub fn with_private_uses<I, S>(mut self, ids: I) -> Self
  where
    I: IntoIterator<Item = S>,
    S: Into<String>,
  {
    self.declared.uses_private = ids.into_iter().map(Into::into).collect();
    self
  }

  pub fn with_build_uses<I, S>(mut self, ids: I) -> Self
  where
    I: IntoIterator<Item = S>,
    S: Into<String>,
  {
    self.declared.uses_build = ids.into_iter().map(Into::into).collect();
    self
  }

  /// Artefact base name used for built files.
  pub fn artefact_name(&self) -> String {
    self.artefact.clone().unwrap_or_else(|| self.id.replace('.', "_"))
  }

  pub fn uses(&self) -> &[ProjectRef] {
    &self.uses
  }

  pub fn uses_private(&self) -> &[ProjectRef] {
    &self.uses_private
  }

  pub fn uses_build(&self) -> &[ProjectRef] {
    &self.uses_build
  }

  /// Fully resolved set of projects this one links against.
  pub fn link(&self) -> &[ProjectRef] {
    &self.link
  }

  pub fn external_dependencies(&self) -> &[String] {
    &self.external
  }

  /// Projects that depend on this one. Non-owning back references.
  pub fn dependents(&self) -> &[ProjectRef] {
    &self.dependents
  }

  pub fn unresolved_dependencies(&self) -> u32 {
    self.unresolved_dependencies
  }

  pub fn error(&self) -> bool {
    self.error
  }

  pub fn built(&self) -> bool {
    self.built
  }

  /// Built during the current pass.
  pub fn freshly_baked(&self) -> bool {
    self.freshly_baked
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn new_project_is_public_and_unbuilt() {
    let project = Project::new("a.b", "/src/a", ProjectKind::Package);
    assert!(project.public);
    assert!(!project.built());
    assert!(!project.error());
    assert_eq!(project.unresolved_dependencies(), 0);
  }

  #[test]
  fn artefact_name_defaults_to_id() {
    let mut project = Project::new("kiln.lang.c", "/src", ProjectKind::Package);
    assert_eq!(project.artefact_name(), "kiln_lang_c");

    project.artefact = Some("c_driver".into());
    assert_eq!(project.artefact_name(), "c_driver");
  }

  #[test]
  fn declared_dependencies_chain_all_relations() {
    let project = Project::new("a", "/a", ProjectKind::Package)
      .with_uses(["b"])
      .with_private_uses(["c"])
      .with_build_uses(["d"]);
    let all: Vec<_> = project.declared.all().cloned().collect();
    assert_eq!(all, vec!["b", "c", "d"]);
  }
}
