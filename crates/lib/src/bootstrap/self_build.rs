//! Building one core package with the native toolchain.
//!
//! The core libraries and language drivers cannot be built by kiln itself
//! during a bootstrap, so each one goes through a fixed sequence: register
//! its headers, run a clean native build, move the produced libraries into
//! `bin/<platform>-<config>` and register them as the package's artefact.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, info};

use crate::consts::CorePackage;
use crate::execute::CommandError;

use super::types::{BootstrapContext, Reporter, Stage};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelfBuildStep {
  InstallIncludes,
  Compile,
  CreateBinDir,
  MoveArtefact,
  InstallArtefact,
}

impl fmt::Display for SelfBuildStep {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(match self {
      Self::InstallIncludes => "install include files",
      Self::Compile => "build",
      Self::CreateBinDir => "create bin path",
      Self::MoveArtefact => "move artefact to project bin path",
      Self::InstallArtefact => "install artefact",
    })
  }
}

#[derive(Debug, Error)]
pub enum StepError {
  #[error(transparent)]
  Command(#[from] CommandError),

  #[error("'{}': {source}", path.display())]
  Io { path: PathBuf, source: std::io::Error },
}

#[derive(Debug, Error)]
#[error("failed to {step} for '{id}': {source}")]
pub struct SelfBuildError {
  pub id: String,
  pub step: SelfBuildStep,
  #[source]
  pub source: StepError,
}

fn step<T>(id: &str, step: SelfBuildStep, result: Result<T, impl Into<StepError>>) -> Result<T, SelfBuildError> {
  result.map_err(|e| SelfBuildError {
    id: id.to_string(),
    step,
    source: e.into(),
  })
}

fn io_step(path: &Path) -> impl FnOnce(std::io::Error) -> StepError {
  let path = path.to_path_buf();
  move |source| StepError::Io { path, source }
}

/// Build and register `package`. Every failing step aborts the package.
pub fn build_core_package(
  ctx: &BootstrapContext<'_>,
  package: &CorePackage,
  reporter: &mut dyn Reporter,
) -> Result<(), SelfBuildError> {
  let id = package.id;
  let source_dir = Path::new(package.source_dir);
  let package_dir = ctx.work_dir.join(source_dir);
  let quoted = ctx.quote_path(source_dir);

  info!(id, path = %package_dir.display(), "building core package");

  let cmd = ctx.kiln_command(&format!(
    "install {} --id {} --package --includes include --config {}",
    quoted, id, ctx.config
  ));
  step(id, SelfBuildStep::InstallIncludes, ctx.run(&cmd))?;
  reporter.done(&Stage::PackageIncludes(id.to_string()));

  let make = ctx.toolchain.make_invocation(&ctx.work_dir, source_dir);
  step(id, SelfBuildStep::Compile, ctx.run_in(&make.cmd, &make.cwd))?;
  reporter.done(&Stage::PackageBuilt(id.to_string()));

  let bin_dir = package_dir
    .join("bin")
    .join(ctx.toolchain.platform().bin_dir_name(&ctx.config));
  step(
    id,
    SelfBuildStep::CreateBinDir,
    fs::create_dir_all(&bin_dir).map_err(io_step(&bin_dir)),
  )?;

  for file in ctx.toolchain.artefact_files(package.artefact) {
    let from = package_dir.join(&file);
    let to = bin_dir.join(&file);
    debug!(from = %from.display(), to = %to.display(), "moving artefact");
    step(id, SelfBuildStep::MoveArtefact, fs::rename(&from, &to).map_err(io_step(&from)))?;
  }

  let cmd = ctx.kiln_command(&format!(
    "install {} --id {} --artefact {} --package --config {}",
    quoted, id, package.artefact, ctx.config
  ));
  step(id, SelfBuildStep::InstallArtefact, ctx.run(&cmd))?;
  reporter.done(&Stage::PackageInstalled(id.to_string()));

  Ok(())
}
