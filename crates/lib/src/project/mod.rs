//! Project descriptors and the dependency graph built over them.
//!
//! A [`Project`] describes one buildable unit. Projects live in a
//! [`ProjectGraph`] arena and refer to each other through [`ProjectRef`]
//! handles; the `dependents` list of a project is a set of non-owning back
//! references used to release dependents once the project is built.

mod descriptor;
mod graph;
mod host;
mod manifest;
mod types;

use std::path::PathBuf;

use thiserror::Error;

pub use descriptor::{DeclaredDependencies, Project};
pub use graph::{GraphError, ProjectGraph};
pub use host::{DriverHost, ProjectHost};
pub use manifest::load_project;
pub use types::{AttrKind, AttrTable, AttrValue, Attributes, ProjectKind, ProjectRef};

#[derive(Debug, Error)]
pub enum ProjectError {
  #[error("cannot read '{}': {source}", path.display())]
  Read { path: PathBuf, source: std::io::Error },

  #[error("invalid JSON in '{}': {source}", path.display())]
  Parse { path: PathBuf, source: serde_json::Error },

  #[error("invalid project '{}': {reason}", path.display())]
  Invalid { path: PathBuf, reason: String },
}
