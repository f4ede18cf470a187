use std::path::Path;

use tracing::debug;
use walkdir::{DirEntry, WalkDir};

use crate::consts::PROJECT_MANIFEST;
use crate::project::{Project, load_project};

use super::BuildError;

fn is_hidden(entry: &DirEntry) -> bool {
  entry.depth() > 0 && entry.file_name().to_string_lossy().starts_with('.')
}

/// Load every project below `root`, in file name order.
///
/// Hidden directories are not searched.
pub fn crawl(root: &Path) -> Result<Vec<Project>, BuildError> {
  let mut projects = Vec::new();

  let walker = WalkDir::new(root).sort_by_file_name().into_iter();
  for entry in walker.filter_entry(|e| !is_hidden(e)) {
    let entry = entry.map_err(|source| BuildError::Walk {
      path: root.to_path_buf(),
      source,
    })?;

    if entry.file_type().is_file() && entry.file_name() == PROJECT_MANIFEST {
      let Some(dir) = entry.path().parent() else {
        continue;
      };
      let project = load_project(dir)?;
      debug!(id = %project.id, path = %dir.display(), "found project");
      projects.push(project);
    }
  }

  Ok(projects)
}
