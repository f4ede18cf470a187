//! The bootstrap pipeline behind `kiln setup`.
//!
//! Starting from a freshly built source tree, the pipeline installs kiln
//! into its install root and then uses the new binary to build its own core
//! packages. Stages run strictly in order and the first failure aborts the
//! run; nothing is rolled back, and every stage can be repeated safely:
//!
//! 1. relocate the source tree if it is the install root itself
//! 2. create the install root
//! 3. write the launcher and publish it globally (unless `local`)
//! 4. copy the built executable into the install root
//! 5. register kiln's own headers
//! 6. build each core package through [`build_core_package`]
//! 7. run `kiln build` for each package group
//! 8. report completion

mod relocate;
mod self_build;
mod types;

pub use relocate::{Relocation, relocate_if_self_hosted};
pub use self_build::{SelfBuildError, SelfBuildStep, StepError, build_core_package};
pub use types::{BootstrapContext, BootstrapOptions, BootstrapReport, Reporter, Stage};

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::info;

use crate::consts::{APP_NAME, INSTALLED_BINARY, SELF_ID};
use crate::execute::{CommandError, CommandRunner};
use crate::launcher::{self, GlobalInstall, GlobalInstallOptions, LauncherError, LauncherOutcome, LauncherParams};
use crate::toolchain::Toolchain;

#[derive(Debug, Error)]
pub enum BootstrapError {
  #[error("install root '{}' has no directory name", path.display())]
  InvalidInstallRoot { path: PathBuf },

  #[error("failed to {op} '{}': {source}", path.display())]
  Io {
    op: &'static str,
    path: PathBuf,
    source: std::io::Error,
  },

  #[error(transparent)]
  Launcher(#[from] LauncherError),

  #[error("{context}: {source}")]
  Command { context: String, source: CommandError },

  #[error(transparent)]
  SelfBuild(#[from] SelfBuildError),
}

fn io_error(op: &'static str, path: &Path) -> impl FnOnce(std::io::Error) -> BootstrapError {
  let path = path.to_path_buf();
  move |source| BootstrapError::Io { op, path, source }
}

/// Run the whole pipeline.
///
/// # Errors
///
/// Returns the first failing stage. A failed global launcher copy is not an
/// error; it is reported through [`Reporter::warn`].
pub fn run(
  options: &BootstrapOptions,
  toolchain: &dyn Toolchain,
  runner: &dyn CommandRunner,
  reporter: &mut dyn Reporter,
) -> Result<BootstrapReport, BootstrapError> {
  let relocation = relocate_if_self_hosted(&options.install_root, &options.source_dir)?;
  let work_dir = relocation.work_dir(&options.source_dir).to_path_buf();
  if let Relocation::Moved { to, .. } = &relocation {
    reporter.info(&format!("moved source tree to {}", to.display()));
  }

  fs::create_dir_all(&options.install_root).map_err(io_error("create install directory", &options.install_root))?;
  reporter.info(&format!(
    "{} setup, installing to {}",
    APP_NAME,
    options.install_root.display()
  ));

  let ctx = BootstrapContext::new(options, work_dir, toolchain, runner);

  let launcher = if options.local {
    info!("local setup, launcher left untouched");
    None
  } else {
    Some(install_launcher(&ctx, options, reporter)?)
  };

  let from = ctx.executable();
  let to = options.install_root.join(toolchain.executable_name(INSTALLED_BINARY));
  fs::copy(&from, &to).map_err(io_error("copy executable", &from))?;
  reporter.done(&Stage::BinaryCopied);

  let cmd = ctx.kiln_command(&format!(
    "install --id {} --includes include --config {}",
    SELF_ID, ctx.config
  ));
  ctx.run(&cmd).map_err(|source| BootstrapError::Command {
    context: format!("failed to install {} include files", APP_NAME),
    source,
  })?;
  reporter.done(&Stage::IncludesInstalled);

  for package in &options.core_packages {
    build_core_package(&ctx, package, reporter)?;
  }

  for group in &options.package_groups {
    let cmd = ctx.kiln_command(&format!(
      "build {} --config {}",
      ctx.quote_path(Path::new(group.target)),
      ctx.config
    ));
    ctx.run(&cmd).map_err(|source| BootstrapError::Command {
      context: format!("failed to install {}", group.description),
      source,
    })?;
    reporter.done(&Stage::GroupInstalled(group.description.to_string()));
  }

  reporter.done(&Stage::Complete);
  info!(root = %options.install_root.display(), "bootstrap finished");

  Ok(BootstrapReport {
    install_root: options.install_root.clone(),
    work_dir: ctx.work_dir,
    relocation,
    launcher,
  })
}

fn install_launcher(
  ctx: &BootstrapContext<'_>,
  options: &BootstrapOptions,
  reporter: &mut dyn Reporter,
) -> Result<LauncherOutcome, BootstrapError> {
  let params = LauncherParams::new(&options.install_root);
  let global = GlobalInstallOptions {
    global_dir: options.global_dir.clone(),
    elevate: options.elevate,
  };

  if options.elevate && ctx.toolchain.is_posix() {
    reporter.warn(&format!(
      "copying {} script to {} requires administrator privileges, sudo may ask for your password \
       (press Enter to skip and use {} from its install root)",
      APP_NAME,
      options.global_dir.display(),
      APP_NAME
    ));
  }

  let outcome = launcher::install_launcher(ctx.toolchain, ctx.runner, &params, &global, &ctx.run_options)?;
  reporter.done(&Stage::LauncherWritten(outcome.script.clone()));

  match &outcome.global {
    GlobalInstall::Installed(dir) => reporter.done(&Stage::LauncherPublished(dir.clone())),
    GlobalInstall::Skipped { reason } => {
      reporter.warn(&format!("failed to install {} script globally: {}", APP_NAME, reason));
      reporter.warn(&launcher::remediation(ctx.toolchain, &options.install_root));
    }
  }

  Ok(outcome)
}
