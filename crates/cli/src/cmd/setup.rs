//! Implementation of the `kiln setup` command.

use std::path::PathBuf;

use anyhow::{Context, Result, anyhow};
use tracing::debug;

use kiln_lib::bootstrap::{self, BootstrapOptions};
use kiln_lib::execute::{ShellRunner, Verbosity};
use kiln_lib::platform::paths;

use crate::output::ConsoleReporter;

use super::host_toolchain;

pub struct SetupArgs {
  pub local: bool,
  pub source_dir: Option<PathBuf>,
  pub config: String,
  pub elevate: bool,
  pub verbosity: Verbosity,
}

/// Directory of the running executable; a fresh build runs from its source tree.
fn executable_dir() -> Result<PathBuf> {
  let exe = std::env::current_exe().context("cannot locate the running executable")?;
  exe
    .parent()
    .map(PathBuf::from)
    .ok_or_else(|| anyhow!("executable '{}' has no parent directory", exe.display()))
}

/// Run the bootstrap pipeline.
///
/// The install root comes from `KILN_HOME` or the home directory, the global
/// launcher directory from `KILN_GLOBAL_BIN` or the platform default.
pub fn cmd_setup(args: SetupArgs) -> Result<()> {
  let toolchain = host_toolchain()?;
  let install_root = paths::install_root()?;

  let source_dir = match args.source_dir {
    Some(dir) => dir,
    None => executable_dir()?,
  };
  let source_dir = dunce::canonicalize(&source_dir)
    .with_context(|| format!("source directory '{}' does not exist", source_dir.display()))?;

  let mut options = BootstrapOptions::new(install_root, source_dir, paths::global_bin_dir());
  options.local = args.local;
  options.config = args.config;
  options.elevate = args.elevate;
  options.verbosity = args.verbosity;

  debug!(
    root = %options.install_root.display(),
    source = %options.source_dir.display(),
    local = options.local,
    "starting setup"
  );

  let runner = ShellRunner::for_toolchain(toolchain.as_ref());
  let mut reporter = ConsoleReporter;

  bootstrap::run(&options, toolchain.as_ref(), &runner, &mut reporter).context("setup failed")?;

  Ok(())
}
