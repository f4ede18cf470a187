//! Launcher script generation.
//!
//! The launcher is the user-facing entry point of an installed kiln. It
//! forwards its arguments to the installed binary, except for `upgrade`,
//! which clones (or hard-resets) the kiln sources under `<root>/src`,
//! rebuilds them and reruns `kiln setup --local`.
//!
//! After writing the script to the install root, kiln tries to copy it to a
//! system-wide binary directory. That step usually needs elevated rights and
//! its failure only produces a warning.

pub mod templates;

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{info, warn};

use crate::consts::{APP_NAME, INSTALLED_BINARY, REPOSITORY_URL, UPSTREAM_BRANCH};
use crate::execute::{CommandRunner, RunOptions};
use crate::toolchain::Toolchain;

#[derive(Debug, Error)]
pub enum LauncherError {
  #[error("cannot write launcher '{}': {source}", path.display())]
  Write { path: PathBuf, source: std::io::Error },

  #[error("failed to set permissions of launcher '{}': {source}", path.display())]
  Permissions { path: PathBuf, source: std::io::Error },
}

/// Values substituted into the launcher template.
#[derive(Debug, Clone)]
pub struct LauncherParams {
  pub install_root: PathBuf,
  pub repository: String,
  pub branch: String,
}

impl LauncherParams {
  pub fn new(install_root: impl Into<PathBuf>) -> Self {
    Self {
      install_root: install_root.into(),
      repository: REPOSITORY_URL.to_string(),
      branch: UPSTREAM_BRANCH.to_string(),
    }
  }
}

/// Where the launcher is copied after it is written.
#[derive(Debug, Clone)]
pub struct GlobalInstallOptions {
  pub global_dir: PathBuf,
  /// Prefix the copy with `sudo` on POSIX hosts.
  pub elevate: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GlobalInstall {
  Installed(PathBuf),
  /// The copy failed; kiln is still usable from the install root.
  Skipped { reason: String },
}

#[derive(Debug, Clone)]
pub struct LauncherOutcome {
  pub script: PathBuf,
  pub global: GlobalInstall,
}

/// Render the launcher for `toolchain`.
pub fn render(toolchain: &dyn Toolchain, params: &LauncherParams) -> String {
  toolchain
    .launcher_template()
    .replace("{root}", &toolchain.quote(&params.install_root.to_string_lossy()))
    .replace("{repository}", &params.repository)
    .replace("{branch}", &params.branch)
    .replace("{vc_arch}", toolchain.platform().arch.msvc_target())
    .replace("{binary}", &toolchain.executable_name(INSTALLED_BINARY))
    .replace("{app}", APP_NAME)
}

/// Instructions shown when the system-wide copy was skipped.
pub fn remediation(toolchain: &dyn Toolchain, install_root: &Path) -> String {
  if toolchain.is_posix() {
    format!(
      "setup will continue, but before you can use {app} you need to run:\n  export PATH=$PATH:{root}",
      app = APP_NAME,
      root = install_root.display()
    )
  } else {
    format!(
      "setup will continue, but you need to add {root} to the %PATH% environment variable, \
       or retry the setup with administrator privileges",
      root = install_root.display()
    )
  }
}

/// Write the launcher into the install root and try to publish it globally.
///
/// # Errors
///
/// Fails if the script cannot be written or made executable. A failed
/// global copy is reported through [`GlobalInstall::Skipped`] instead.
pub fn install_launcher(
  toolchain: &dyn Toolchain,
  runner: &dyn CommandRunner,
  params: &LauncherParams,
  global: &GlobalInstallOptions,
  run_options: &RunOptions,
) -> Result<LauncherOutcome, LauncherError> {
  let script = params.install_root.join(toolchain.launcher_file_name());

  fs::write(&script, render(toolchain, params)).map_err(|source| LauncherError::Write {
    path: script.clone(),
    source,
  })?;

  if toolchain.is_posix() {
    make_executable(&script)?;
  }

  info!(path = %script.display(), "launcher written");

  let cmd = toolchain.global_install_command(&script, &global.global_dir, global.elevate);
  let global = match runner.run(&cmd, &params.install_root, run_options) {
    Ok(()) => GlobalInstall::Installed(global.global_dir.clone()),
    Err(e) => {
      warn!(dir = %global.global_dir.display(), error = %e, "failed to install launcher globally");
      GlobalInstall::Skipped { reason: e.to_string() }
    }
  };

  Ok(LauncherOutcome { script, global })
}

#[cfg(unix)]
fn make_executable(path: &Path) -> Result<(), LauncherError> {
  use std::os::unix::fs::PermissionsExt;

  fs::set_permissions(path, fs::Permissions::from_mode(0o755)).map_err(|source| LauncherError::Permissions {
    path: path.to_path_buf(),
    source,
  })
}

#[cfg(not(unix))]
fn make_executable(_path: &Path) -> Result<(), LauncherError> {
  Ok(())
}
