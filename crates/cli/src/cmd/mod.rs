mod build;
mod info;
mod install;
mod setup;

pub use build::cmd_build;
pub use info::cmd_info;
pub use install::{InstallArgs, cmd_install};
pub use setup::{SetupArgs, cmd_setup};

use anyhow::{Context, Result};

use kiln_lib::consts::SETUP_ENV;
use kiln_lib::toolchain::{self, Toolchain};

/// Toolchain for the host, as an `anyhow` error on unsupported platforms.
fn host_toolchain() -> Result<Box<dyn Toolchain>> {
  toolchain::detect().context("cannot select a toolchain")
}

/// Whether this process was started by a running `kiln setup`.
fn setup_in_progress() -> bool {
  std::env::var(SETUP_ENV).is_ok_and(|v| v == "true")
}
