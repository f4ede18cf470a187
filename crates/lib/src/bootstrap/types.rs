use std::fmt;
use std::path::{Path, PathBuf};

use crate::consts::{APP_NAME, CORE_PACKAGES, CorePackage, DEFAULT_CONFIG, PACKAGE_GROUPS, PackageGroup};
use crate::execute::{CommandError, CommandRunner, RunOptions, Verbosity};
use crate::launcher::LauncherOutcome;
use crate::toolchain::Toolchain;

use super::relocate::Relocation;

/// User-facing settings of a bootstrap run.
#[derive(Debug, Clone)]
pub struct BootstrapOptions {
  pub install_root: PathBuf,
  /// Source tree holding the freshly built executable.
  pub source_dir: PathBuf,
  /// Skip writing and publishing the launcher script.
  pub local: bool,
  pub verbosity: Verbosity,
  /// Build configuration tag, e.g. `debug`.
  pub config: String,
  pub global_dir: PathBuf,
  /// Use `sudo` for the global launcher copy on POSIX hosts.
  pub elevate: bool,
  pub core_packages: Vec<CorePackage>,
  pub package_groups: Vec<PackageGroup>,
}

impl BootstrapOptions {
  pub fn new(install_root: impl Into<PathBuf>, source_dir: impl Into<PathBuf>, global_dir: impl Into<PathBuf>) -> Self {
    Self {
      install_root: install_root.into(),
      source_dir: source_dir.into(),
      local: false,
      verbosity: Verbosity::default(),
      config: DEFAULT_CONFIG.to_string(),
      global_dir: global_dir.into(),
      elevate: true,
      core_packages: CORE_PACKAGES.to_vec(),
      package_groups: PACKAGE_GROUPS.to_vec(),
    }
  }
}

/// State shared by all pipeline stages.
///
/// The setup flag lives here rather than in the process environment; the
/// runner exports it to every child it starts.
pub struct BootstrapContext<'a> {
  pub install_root: PathBuf,
  /// Source tree the pipeline operates on, after relocation.
  pub work_dir: PathBuf,
  pub config: String,
  pub toolchain: &'a dyn Toolchain,
  pub runner: &'a dyn CommandRunner,
  pub run_options: RunOptions,
}

impl<'a> BootstrapContext<'a> {
  pub fn new(
    options: &BootstrapOptions,
    work_dir: PathBuf,
    toolchain: &'a dyn Toolchain,
    runner: &'a dyn CommandRunner,
  ) -> Self {
    Self {
      install_root: options.install_root.clone(),
      work_dir,
      config: options.config.clone(),
      toolchain,
      runner,
      run_options: RunOptions {
        verbosity: options.verbosity,
        setup_in_progress: true,
      },
    }
  }

  /// The freshly built executable inside the work directory.
  pub fn executable(&self) -> PathBuf {
    self.work_dir.join(self.toolchain.executable_name(APP_NAME))
  }

  /// Command line invoking the freshly built executable with `args`.
  pub fn kiln_command(&self, args: &str) -> String {
    format!("{} {}", self.toolchain.quote(&self.executable().to_string_lossy()), args)
  }

  pub fn quote_path(&self, path: &Path) -> String {
    self.toolchain.quote(&path.to_string_lossy())
  }

  /// Run `cmd` in the work directory.
  pub fn run(&self, cmd: &str) -> Result<(), CommandError> {
    self.run_in(cmd, &self.work_dir)
  }

  pub fn run_in(&self, cmd: &str, cwd: &Path) -> Result<(), CommandError> {
    self.runner.run(cmd, cwd, &self.run_options)
  }
}

/// A completed pipeline step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Stage {
  LauncherWritten(PathBuf),
  LauncherPublished(PathBuf),
  BinaryCopied,
  IncludesInstalled,
  PackageIncludes(String),
  PackageBuilt(String),
  PackageInstalled(String),
  GroupInstalled(String),
  Complete,
}

impl fmt::Display for Stage {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::LauncherWritten(path) => write!(f, "write {} script to {}", APP_NAME, path.display()),
      Self::LauncherPublished(dir) => write!(f, "install {} script to {}", APP_NAME, dir.display()),
      Self::BinaryCopied => write!(f, "copy {} executable", APP_NAME),
      Self::IncludesInstalled => write!(f, "install {} include files", APP_NAME),
      Self::PackageIncludes(id) => write!(f, "install include files for '{}'", id),
      Self::PackageBuilt(id) => write!(f, "build '{}'", id),
      Self::PackageInstalled(id) => write!(f, "install '{}' to {} environment", id, APP_NAME),
      Self::GroupInstalled(description) => write!(f, "install {}", description),
      Self::Complete => write!(f, "installation complete"),
    }
  }
}

/// Receives progress of a bootstrap run.
pub trait Reporter {
  fn done(&mut self, stage: &Stage);

  fn warn(&mut self, message: &str);

  fn info(&mut self, message: &str);
}

/// Summary of a successful run.
#[derive(Debug, Clone)]
pub struct BootstrapReport {
  pub install_root: PathBuf,
  pub work_dir: PathBuf,
  pub relocation: Relocation,
  /// `None` when the launcher was skipped.
  pub launcher: Option<LauncherOutcome>,
}
