//! Moving a self-hosted source tree out of the way.
//!
//! When setup runs from inside the install root itself, the later stages
//! would overwrite the files that are executing. The tree is moved to
//! `<root>/src/<app>` first, using renames so a crash never leaves a
//! half-copied tree behind.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::consts::APP_NAME;
use crate::util::fs::remove_dir_if_exists;

use super::BootstrapError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Relocation {
  NotSelfHosted,
  Moved { from: PathBuf, to: PathBuf },
}

impl Relocation {
  /// Directory the pipeline continues in.
  pub fn work_dir<'a>(&'a self, original: &'a Path) -> &'a Path {
    match self {
      Self::NotSelfHosted => original,
      Self::Moved { to, .. } => to,
    }
  }
}

fn same_dir(a: &Path, b: &Path) -> bool {
  match (dunce::canonicalize(a), dunce::canonicalize(b)) {
    (Ok(a), Ok(b)) => a == b,
    _ => false,
  }
}

fn io_error(op: &'static str, path: &Path) -> impl FnOnce(std::io::Error) -> BootstrapError {
  let path = path.to_path_buf();
  move |source| BootstrapError::Io { op, path, source }
}

/// Relocate `work_dir` to `<install_root>/src/<app>` if it is the install root.
///
/// Running this again from the relocated directory does nothing.
pub fn relocate_if_self_hosted(install_root: &Path, work_dir: &Path) -> Result<Relocation, BootstrapError> {
  if !same_dir(install_root, work_dir) {
    return Ok(Relocation::NotSelfHosted);
  }

  let root = dunce::canonicalize(install_root).map_err(io_error("resolve", install_root))?;
  let name = root
    .file_name()
    .ok_or_else(|| BootstrapError::InvalidInstallRoot { path: root.clone() })?;
  let mut tmp_name = name.to_os_string();
  tmp_name.push("_tmp");
  let tmp = root.with_file_name(tmp_name);
  let src = root.join("src");
  let target = src.join(APP_NAME);

  info!(from = %root.display(), to = %target.display(), "relocating self-hosted source tree");

  remove_dir_if_exists(&tmp).map_err(io_error("remove", &tmp))?;
  fs::rename(&root, &tmp).map_err(io_error("move", &root))?;
  fs::create_dir_all(&src).map_err(io_error("create directory", &src))?;
  fs::rename(&tmp, &target).map_err(io_error("move", &tmp))?;

  Ok(Relocation::Moved { from: root, to: target })
}

#[cfg(test)]
mod tests {
  use super::*;
  use tempfile::TempDir;

  #[test]
  fn other_directory_is_left_alone() {
    let temp = TempDir::new().unwrap();
    let root = temp.path().join("kiln");
    let source = temp.path().join("checkout");
    fs::create_dir_all(&root).unwrap();
    fs::create_dir_all(&source).unwrap();

    assert_eq!(relocate_if_self_hosted(&root, &source).unwrap(), Relocation::NotSelfHosted);
    assert!(source.is_dir());
  }

  #[test]
  fn missing_install_root_is_not_self_hosted() {
    let temp = TempDir::new().unwrap();
    let relocation = relocate_if_self_hosted(&temp.path().join("kiln"), temp.path()).unwrap();
    assert_eq!(relocation, Relocation::NotSelfHosted);
  }

  #[test]
  fn self_hosted_tree_moves_under_src() {
    let temp = TempDir::new().unwrap();
    let root = temp.path().join("kiln");
    fs::create_dir_all(root.join("util")).unwrap();
    fs::write(root.join("kiln"), "binary").unwrap();
    // Leftover from an interrupted run.
    fs::create_dir_all(temp.path().join("kiln_tmp").join("stale")).unwrap();

    let relocation = relocate_if_self_hosted(&root, &root).unwrap();
    let target = dunce::canonicalize(&root).unwrap().join("src").join("kiln");
    assert_eq!(
      relocation,
      Relocation::Moved {
        from: dunce::canonicalize(&root).unwrap(),
        to: target.clone(),
      }
    );

    assert!(target.join("kiln").is_file());
    assert!(target.join("util").is_dir());
    assert!(!root.join("util").exists());
    assert!(!temp.path().join("kiln_tmp").exists());
    assert_eq!(relocation.work_dir(&root), target.as_path());
  }

  #[test]
  fn relocation_is_idempotent() {
    let temp = TempDir::new().unwrap();
    let root = temp.path().join("kiln");
    fs::create_dir_all(&root).unwrap();
    fs::write(root.join("kiln"), "binary").unwrap();

    let first = relocate_if_self_hosted(&root, &root).unwrap();
    let work_dir = first.work_dir(&root).to_path_buf();

    let second = relocate_if_self_hosted(&root, &work_dir).unwrap();
    assert_eq!(second, Relocation::NotSelfHosted);
    assert!(work_dir.join("kiln").is_file());
  }
}
