//! Building a tree of projects.
//!
//! [`build_tree`] crawls a directory for `project.json` manifests, wires the
//! descriptors into a [`ProjectGraph`] and hands every ready project to a
//! [`ProjectBuilder`]. A project that fails is marked as such and everything
//! depending on it is skipped; independent projects still build.

mod builder;
mod crawl;

pub use builder::RegistryBuilder;
pub use crawl::crawl;

use std::collections::VecDeque;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{error, info};

use crate::project::{GraphError, Project, ProjectError, ProjectGraph};
use crate::registry::RegistryError;

#[derive(Debug, Error)]
pub enum BuildError {
  #[error("failed to walk '{}': {source}", path.display())]
  Walk { path: PathBuf, source: walkdir::Error },

  #[error("no projects found in '{}'", path.display())]
  NoProjects { path: PathBuf },

  #[error(transparent)]
  Project(#[from] ProjectError),

  #[error(transparent)]
  Graph(#[from] GraphError),

  #[error(transparent)]
  Registry(#[from] RegistryError),
}

/// Builds a single project whose dependencies are all built.
pub trait ProjectBuilder {
  fn build(&mut self, project: &mut Project) -> Result<(), BuildError>;
}

/// Outcome of a [`build_tree`] pass, by project id.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct BuildReport {
  pub built: Vec<String>,
  /// Failed projects and their error messages.
  pub failed: Vec<(String, String)>,
  /// Projects never attempted because a dependency failed.
  pub skipped: Vec<String>,
}

impl BuildReport {
  pub fn is_success(&self) -> bool {
    self.failed.is_empty() && self.skipped.is_empty()
  }
}

/// Build every project below `root` in dependency order.
///
/// `installed` tells whether a dependency that is not part of the tree is
/// already available in the install environment.
///
/// # Errors
///
/// Fails before building anything when no manifest is found, a manifest is
/// invalid, or the dependency graph is inconsistent. Failures of individual
/// projects are collected in the report instead.
pub fn build_tree<F>(root: &Path, builder: &mut dyn ProjectBuilder, installed: F) -> Result<BuildReport, BuildError>
where
  F: Fn(&str) -> bool,
{
  let projects = crawl(root)?;
  if projects.is_empty() {
    return Err(BuildError::NoProjects {
      path: root.to_path_buf(),
    });
  }

  let mut graph = ProjectGraph::new();
  for project in projects {
    graph.add(project)?;
  }
  graph.connect(installed)?;

  let mut report = BuildReport::default();
  let mut queue: VecDeque<_> = graph.ready().into();

  while let Some(r) = queue.pop_front() {
    let id = graph.get(r).id.clone();
    info!(id = %id, "building project");

    match builder.build(graph.get_mut(r)) {
      Ok(()) => {
        queue.extend(graph.mark_built(r)?);
        report.built.push(id);
      }
      Err(e) => {
        error!(id = %id, error = %e, "project failed");
        graph.mark_error(r);
        report.failed.push((id, e.to_string()));
      }
    }
  }

  report.skipped = graph.pending().into_iter().map(|r| graph.get(r).id.clone()).collect();
  Ok(report)
}
