//! Platform strategy.
//!
//! Everything that differs between a POSIX host and a Windows host is
//! expressed through the [`Toolchain`] trait: the shell used to run command
//! lines, the launcher script template, the native build invocation and the
//! file names of built artefacts. A toolchain is selected once at startup
//! with [`detect`], and both implementations can be constructed on any host
//! through [`for_platform`].

mod posix;
mod windows;

use std::path::{Path, PathBuf};

use thiserror::Error;

pub use posix::PosixToolchain;
pub use windows::WindowsToolchain;

use crate::platform::Platform;
use crate::platform::os::Os;

#[derive(Debug, Error)]
pub enum ToolchainError {
  #[error("unsupported platform: {os}/{arch}")]
  Unsupported { os: &'static str, arch: &'static str },
}

/// A native build command and the directory it must run in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MakeInvocation {
  pub cmd: String,
  pub cwd: PathBuf,
}

pub trait Toolchain {
  /// The platform this toolchain targets.
  fn platform(&self) -> Platform;

  /// Whether scripts need the executable bit.
  fn is_posix(&self) -> bool;

  /// Shell binary and the arguments that precede a command line.
  fn shell(&self) -> (&'static str, &'static [&'static str]);

  /// Wrap `value` in double quotes, escaping what the shell would expand.
  fn quote(&self, value: &str) -> String;

  /// File name of an executable, e.g. `kiln` or `kiln.exe`.
  fn executable_name(&self, base: &str) -> String;

  /// File name of the launcher script in the install root.
  fn launcher_file_name(&self) -> String;

  /// Template the launcher is rendered from. See [`crate::launcher::render`].
  fn launcher_template(&self) -> &'static str;

  /// Command that copies the launcher into the system-wide binary directory.
  fn global_install_command(&self, script: &Path, global_dir: &Path, elevate: bool) -> String;

  /// Clean rebuild of `source_dir` (relative to `work_dir`) with the native make tool.
  fn make_invocation(&self, work_dir: &Path, source_dir: &Path) -> MakeInvocation;

  /// Shared library file produced for `artefact`.
  fn shared_library_name(&self, artefact: &str) -> String;

  /// Import library that accompanies the shared library, if the platform has one.
  fn import_library_name(&self, artefact: &str) -> Option<String>;

  /// Files a native build leaves for `artefact`, shared library first.
  fn artefact_files(&self, artefact: &str) -> Vec<String> {
    let mut files = vec![self.shared_library_name(artefact)];
    files.extend(self.import_library_name(artefact));
    files
  }
}

/// Toolchain for an explicit platform.
pub fn for_platform(platform: Platform) -> Box<dyn Toolchain> {
  match platform.os {
    Os::Windows => Box::new(WindowsToolchain::new(platform.arch)),
    Os::Linux | Os::MacOs => Box::new(PosixToolchain::new(platform)),
  }
}

/// Toolchain for the host kiln is running on.
pub fn detect() -> Result<Box<dyn Toolchain>, ToolchainError> {
  let platform = Platform::current().ok_or(ToolchainError::Unsupported {
    os: std::env::consts::OS,
    arch: std::env::consts::ARCH,
  })?;
  Ok(for_platform(platform))
}
