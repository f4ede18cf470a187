//! Dependency graph over project descriptors.
//!
//! The graph owns every [`Project`] of a build pass. [`ProjectGraph::connect`]
//! turns declared dependency ids into edges, rejects self references and
//! cycles, and initialises the readiness bookkeeping:
//!
//! - `unresolved_dependencies` counts the distinct in-graph dependencies
//!   that are not built yet; a project is ready when it reaches zero.
//! - `dependents` lists the projects to release when a project is built.
//! - `link` is the set a project links against: its direct `use` and
//!   `use_private` dependencies plus everything those export through `use`.
//!   Build-only dependencies are never linked.

use std::collections::HashMap;
use std::path::PathBuf;

use petgraph::algo::toposort;
use petgraph::graph::{DiGraph, NodeIndex};
use thiserror::Error;
use tracing::debug;

use super::descriptor::Project;
use super::types::ProjectRef;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GraphError {
  #[error("duplicate project id '{id}' in '{}' and '{}'", first.display(), second.display())]
  DuplicateId { id: String, first: PathBuf, second: PathBuf },

  #[error("project '{id}' depends on itself")]
  SelfDependency { id: String },

  #[error("project '{id}' depends on '{dependency}', which is neither in the build nor installed")]
  UnknownDependency { id: String, dependency: String },

  #[error("dependency cycle detected at project '{id}'")]
  Cycle { id: String },

  #[error("project '{id}' still has {unresolved} unresolved dependencies")]
  NotReady { id: String, unresolved: u32 },

  #[error("project '{id}' links with '{dependency}', which is not built")]
  LinkNotBuilt { id: String, dependency: String },

  #[error("project '{id}' failed earlier in this pass")]
  Failed { id: String },

  #[error("project '{id}' is already built")]
  AlreadyBuilt { id: String },

  #[error("unresolved dependency counter of '{id}' would drop below zero")]
  CounterUnderflow { id: String },
}

#[derive(Debug, Default)]
pub struct ProjectGraph {
  projects: Vec<Project>,
  by_id: HashMap<String, ProjectRef>,
}

fn push_unique<T: PartialEq>(list: &mut Vec<T>, item: T) {
  if !list.contains(&item) {
    list.push(item);
  }
}

impl ProjectGraph {
  pub fn new() -> Self {
    Self::default()
  }

  /// Add a project. Ids must be unique within the graph.
  pub fn add(&mut self, project: Project) -> Result<ProjectRef, GraphError> {
    if let Some(&existing) = self.by_id.get(&project.id) {
      return Err(GraphError::DuplicateId {
        id: project.id.clone(),
        first: self.projects[existing.0].path.clone(),
        second: project.path,
      });
    }

    let r = ProjectRef(self.projects.len());
    self.by_id.insert(project.id.clone(), r);
    self.projects.push(project);
    Ok(r)
  }

  pub fn get(&self, r: ProjectRef) -> &Project {
    &self.projects[r.0]
  }

  pub fn get_mut(&mut self, r: ProjectRef) -> &mut Project {
    &mut self.projects[r.0]
  }

  pub fn find(&self, id: &str) -> Option<ProjectRef> {
    self.by_id.get(id).copied()
  }

  pub fn len(&self) -> usize {
    self.projects.len()
  }

  pub fn is_empty(&self) -> bool {
    self.projects.is_empty()
  }

  pub fn iter(&self) -> impl Iterator<Item = (ProjectRef, &Project)> {
    self.projects.iter().enumerate().map(|(i, p)| (ProjectRef(i), p))
  }

  /// Resolve declared dependencies into edges.
  ///
  /// `installed` answers whether an id outside the graph is already
  /// available in the install environment. Calling `connect` again
  /// recomputes all derived state from the declarations.
  pub fn connect<F>(&mut self, installed: F) -> Result<(), GraphError>
  where
    F: Fn(&str) -> bool,
  {
    for project in &mut self.projects {
      project.uses.clear();
      project.uses_private.clear();
      project.uses_build.clear();
      project.link.clear();
      project.external.clear();
      project.dependents.clear();
    }

    for i in 0..self.projects.len() {
      let declared = self.projects[i].declared.clone();
      let id = self.projects[i].id.clone();

      let relations = [
        (&declared.uses, 0usize),
        (&declared.uses_private, 1),
        (&declared.uses_build, 2),
      ];
      for (ids, relation) in relations {
        for dep in ids {
          if *dep == id {
            return Err(GraphError::SelfDependency { id });
          }

          let project = &mut self.projects[i];
          match self.by_id.get(dep) {
            Some(&r) => match relation {
              0 => push_unique(&mut project.uses, r),
              1 => push_unique(&mut project.uses_private, r),
              _ => push_unique(&mut project.uses_build, r),
            },
            None if installed(dep) => push_unique(&mut project.external, dep.clone()),
            None => {
              return Err(GraphError::UnknownDependency {
                id,
                dependency: dep.clone(),
              });
            }
          }
        }
      }
    }

    let order = self.build_order()?;

    for &r in &order {
      let deps = self.dependencies_of(r);
      let unresolved = deps.iter().filter(|d| !self.projects[d.0].built).count();
      for d in &deps {
        push_unique(&mut self.projects[d.0].dependents, r);
      }
      self.projects[r.0].unresolved_dependencies = unresolved as u32;
    }

    // Dependencies precede dependents in `order`, so exported sets are
    // complete by the time a dependent reads them.
    let mut exported: Vec<Vec<ProjectRef>> = vec![Vec::new(); self.projects.len()];
    for &r in &order {
      let project = &self.projects[r.0];

      let mut link = Vec::new();
      for &d in project.uses.iter().chain(&project.uses_private) {
        push_unique(&mut link, d);
        for &e in &exported[d.0] {
          push_unique(&mut link, e);
        }
      }

      let mut exports = Vec::new();
      for &d in &project.uses {
        push_unique(&mut exports, d);
        for &e in &exported[d.0] {
          push_unique(&mut exports, e);
        }
      }

      exported[r.0] = exports;
      self.projects[r.0].link = link;
    }

    debug!(projects = self.projects.len(), "dependency graph connected");
    Ok(())
  }

  /// Distinct in-graph dependencies across all relations.
  fn dependencies_of(&self, r: ProjectRef) -> Vec<ProjectRef> {
    let project = &self.projects[r.0];
    let mut deps = Vec::new();
    for &d in project.uses.iter().chain(&project.uses_private).chain(&project.uses_build) {
      push_unique(&mut deps, d);
    }
    deps
  }

  /// Projects in an order where dependencies come before dependents.
  pub fn build_order(&self) -> Result<Vec<ProjectRef>, GraphError> {
    let mut graph: DiGraph<ProjectRef, ()> = DiGraph::new();
    let nodes: Vec<NodeIndex> = (0..self.projects.len()).map(|i| graph.add_node(ProjectRef(i))).collect();

    for i in 0..self.projects.len() {
      for d in self.dependencies_of(ProjectRef(i)) {
        graph.add_edge(nodes[d.0], nodes[i], ());
      }
    }

    toposort(&graph, None)
      .map(|sorted| sorted.into_iter().map(|idx| graph[idx]).collect())
      .map_err(|cycle| GraphError::Cycle {
        id: self.projects[graph[cycle.node_id()].0].id.clone(),
      })
  }

  /// Projects that may start building now.
  pub fn ready(&self) -> Vec<ProjectRef> {
    self
      .iter()
      .filter(|(_, p)| !p.built && !p.error && p.unresolved_dependencies == 0)
      .map(|(r, _)| r)
      .collect()
  }

  /// Record that `r` finished building and release its dependents.
  ///
  /// Returns the dependents that became ready.
  pub fn mark_built(&mut self, r: ProjectRef) -> Result<Vec<ProjectRef>, GraphError> {
    let project = &self.projects[r.0];
    if project.error {
      return Err(GraphError::Failed { id: project.id.clone() });
    }
    if project.built {
      return Err(GraphError::AlreadyBuilt { id: project.id.clone() });
    }
    if project.unresolved_dependencies > 0 {
      return Err(GraphError::NotReady {
        id: project.id.clone(),
        unresolved: project.unresolved_dependencies,
      });
    }
    if let Some(&missing) = project.link.iter().find(|l| !self.projects[l.0].built) {
      return Err(GraphError::LinkNotBuilt {
        id: project.id.clone(),
        dependency: self.projects[missing.0].id.clone(),
      });
    }
    if let Some(&stuck) = project
      .dependents
      .iter()
      .find(|d| self.projects[d.0].unresolved_dependencies == 0)
    {
      return Err(GraphError::CounterUnderflow {
        id: self.projects[stuck.0].id.clone(),
      });
    }

    let dependents = project.dependents.clone();
    let project = &mut self.projects[r.0];
    project.built = true;
    project.freshly_baked = true;

    let mut released = Vec::new();
    for d in dependents {
      let dependent = &mut self.projects[d.0];
      dependent.unresolved_dependencies -= 1;
      if dependent.unresolved_dependencies == 0 && !dependent.error {
        released.push(d);
      }
    }

    Ok(released)
  }

  /// Mark `r` as failed. Failure is terminal for the rest of the pass.
  pub fn mark_error(&mut self, r: ProjectRef) {
    self.projects[r.0].error = true;
  }

  /// Projects neither built nor failed, i.e. blocked behind a failure.
  pub fn pending(&self) -> Vec<ProjectRef> {
    self
      .iter()
      .filter(|(_, p)| !p.built && !p.error)
      .map(|(r, _)| r)
      .collect()
  }
}
