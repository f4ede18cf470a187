//! The install environment.
//!
//! Packages register their public headers and built artefacts here. The
//! registry copies them into the install root and records each package in
//! an index file.
//!
//! # Layout
//!
//! ```text
//! {install_root}/
//! ├── registry.json     # RegistryIndex
//! ├── include/<id>/     # registered headers
//! ├── lib/              # shared and import libraries
//! └── bin/              # executables of applications and tools
//! ```

mod types;

pub use types::{InstallRequest, REGISTRY_VERSION, RegistryEntry, RegistryError, RegistryIndex};

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::toolchain::Toolchain;
use crate::util::fs::copy_dir_all;

const INDEX_FILENAME: &str = "registry.json";

fn io_error(op: &'static str, path: &Path) -> impl FnOnce(io::Error) -> RegistryError {
  let path = path.to_path_buf();
  move |source| RegistryError::Io { op, path, source }
}

pub struct Registry<'a> {
  root: PathBuf,
  toolchain: &'a dyn Toolchain,
  config: String,
  replace_conflicts: bool,
}

impl<'a> Registry<'a> {
  pub fn new(root: impl Into<PathBuf>, toolchain: &'a dyn Toolchain, config: impl Into<String>) -> Self {
    Self {
      root: root.into(),
      toolchain,
      config: config.into(),
      replace_conflicts: false,
    }
  }

  /// Replace entries registered from another path instead of failing.
  ///
  /// Set while a bootstrap runs, as the tool re-registers itself from its
  /// relocated source tree.
  pub fn replace_conflicts(mut self, replace: bool) -> Self {
    self.replace_conflicts = replace;
    self
  }

  pub fn include_dir(&self, id: &str) -> PathBuf {
    self.root.join("include").join(id)
  }

  pub fn lib_dir(&self) -> PathBuf {
    self.root.join("lib")
  }

  pub fn bin_dir(&self) -> PathBuf {
    self.root.join("bin")
  }

  fn index_path(&self) -> PathBuf {
    self.root.join(INDEX_FILENAME)
  }

  /// Directory a project's build leaves its artefacts in.
  pub fn artefact_dir(&self, project_dir: &Path) -> PathBuf {
    project_dir
      .join("bin")
      .join(self.toolchain.platform().bin_dir_name(&self.config))
  }

  /// Load the index. A missing file is an empty registry.
  pub fn load_index(&self) -> Result<RegistryIndex, RegistryError> {
    let path = self.index_path();

    let content = match fs::read_to_string(&path) {
      Ok(content) => content,
      Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(RegistryIndex::new()),
      Err(e) => return Err(io_error("read", &path)(e)),
    };

    let index: RegistryIndex =
      serde_json::from_str(&content).map_err(|source| RegistryError::Parse { path, source })?;

    if index.version != REGISTRY_VERSION {
      return Err(RegistryError::UnsupportedVersion {
        found: index.version,
        expected: REGISTRY_VERSION,
      });
    }

    Ok(index)
  }

  /// Write the index through a temporary file and a rename.
  fn save_index(&self, index: &RegistryIndex) -> Result<(), RegistryError> {
    fs::create_dir_all(&self.root).map_err(io_error("create directory", &self.root))?;

    let path = self.index_path();
    let temp_path = self.root.join("registry.json.tmp");

    let content = serde_json::to_string_pretty(index).map_err(RegistryError::Serialize)?;
    fs::write(&temp_path, &content).map_err(io_error("write", &temp_path))?;
    fs::rename(&temp_path, &path).map_err(io_error("write", &path))?;

    Ok(())
  }

  pub fn entries(&self) -> Result<Vec<RegistryEntry>, RegistryError> {
    Ok(self.load_index()?.entries.into_values().collect())
  }

  pub fn is_installed(&self, id: &str) -> Result<bool, RegistryError> {
    Ok(self.load_index()?.entries.contains_key(id))
  }

  /// Register headers and/or an artefact of a package.
  ///
  /// Installing the same id from the same directory again refreshes the
  /// installed files and merges the entry.
  ///
  /// # Errors
  ///
  /// Fails on any I/O error, on missing include directories or artefact
  /// files, and when the id is registered from a different directory.
  pub fn install(&self, request: &InstallRequest) -> Result<RegistryEntry, RegistryError> {
    let path = dunce::canonicalize(&request.path).map_err(io_error("resolve", &request.path))?;
    let mut index = self.load_index()?;

    let fresh = || RegistryEntry {
      id: request.id.clone(),
      path: path.clone(),
      kind: request.kind,
      includes: None,
      artefacts: Vec::new(),
    };

    let mut entry = match index.entries.remove(&request.id) {
      Some(existing) if existing.path == path => existing,
      Some(existing) if self.replace_conflicts => {
        warn!(id = %request.id, previous = %existing.path.display(), "replacing registered package");
        fresh()
      }
      Some(existing) => {
        return Err(RegistryError::Conflict {
          id: request.id.clone(),
          existing: existing.path,
          requested: path.clone(),
        });
      }
      None => fresh(),
    };
    entry.kind = request.kind;

    for dir in &request.includes {
      let source = path.join(dir);
      if !source.is_dir() {
        return Err(RegistryError::MissingIncludes {
          id: request.id.clone(),
          path: source,
        });
      }

      let target = self.include_dir(&request.id);
      let copied = copy_dir_all(&source, &target).map_err(io_error("copy include files to", &target))?;
      debug!(id = %request.id, files = copied, "include files installed");
      entry.includes = Some(target);
    }

    if let Some(artefact) = &request.artefact {
      for file in self.install_artefact(request, &path, artefact)? {
        if !entry.artefacts.contains(&file) {
          entry.artefacts.push(file);
        }
      }
    }

    index.entries.insert(request.id.clone(), entry.clone());
    self.save_index(&index)?;

    info!(id = %request.id, kind = %request.kind, "package installed");
    Ok(entry)
  }

  fn install_artefact(
    &self,
    request: &InstallRequest,
    project_dir: &Path,
    artefact: &str,
  ) -> Result<Vec<String>, RegistryError> {
    let (files, target_dir) = if request.kind.is_executable() {
      (vec![self.toolchain.executable_name(artefact)], self.bin_dir())
    } else {
      (self.toolchain.artefact_files(artefact), self.lib_dir())
    };

    let source_dir = self.artefact_dir(project_dir);
    for file in &files {
      let source = source_dir.join(file);
      if !source.is_file() {
        return Err(RegistryError::MissingArtefact {
          id: request.id.clone(),
          path: source,
        });
      }
    }

    fs::create_dir_all(&target_dir).map_err(io_error("create directory", &target_dir))?;
    for file in &files {
      let target = target_dir.join(file);
      fs::copy(source_dir.join(file), &target).map_err(io_error("copy artefact to", &target))?;
    }

    Ok(files)
  }
}
