//! Shell-backed command runner.

use std::path::Path;
use std::process::{Command, Stdio};

use tracing::{debug, error, info};

use crate::consts::SETUP_ENV;
use crate::toolchain::Toolchain;

use super::CommandRunner;
use super::types::{CommandError, RunOptions, Termination};

/// Runs command lines through the platform shell (`/bin/sh -c`, `cmd.exe /C`).
///
/// At trace verbosity the child inherits stdout and stderr. Otherwise stdout
/// is discarded and only stderr reaches the terminal.
#[derive(Debug, Clone)]
pub struct ShellRunner {
  shell: &'static str,
  shell_args: &'static [&'static str],
}

impl ShellRunner {
  pub fn new(shell: &'static str, shell_args: &'static [&'static str]) -> Self {
    Self { shell, shell_args }
  }

  /// Runner using the shell of `toolchain`.
  pub fn for_toolchain(toolchain: &dyn Toolchain) -> Self {
    let (shell, shell_args) = toolchain.shell();
    Self::new(shell, shell_args)
  }

  fn command(&self, cmd: &str) -> Command {
    let mut command = Command::new(self.shell);
    command.args(self.shell_args);

    #[cfg(windows)]
    {
      // cmd.exe parses its own command line; Rust's argument quoting would
      // mangle embedded quotes.
      use std::os::windows::process::CommandExt;
      command.raw_arg(cmd);
    }

    #[cfg(not(windows))]
    command.arg(cmd);

    command
  }
}

impl CommandRunner for ShellRunner {
  fn run(&self, cmd: &str, cwd: &Path, options: &RunOptions) -> Result<(), CommandError> {
    info!(cmd = %cmd, "running command");

    let mut command = self.command(cmd);
    command.current_dir(cwd).stdin(Stdio::null()).stderr(Stdio::inherit());

    if options.verbosity.is_traced() {
      command.stdout(Stdio::inherit());
    } else {
      command.stdout(Stdio::null());
    }

    if options.setup_in_progress {
      command.env(SETUP_ENV, "true");
    }

    debug!(shell = %self.shell, cwd = %cwd.display(), "spawning process");

    let status = command.status().map_err(|source| CommandError::Spawn {
      cmd: cmd.to_string(),
      source,
    })?;

    let termination = Termination::from(status);
    if termination.is_success() {
      return Ok(());
    }

    error!(cmd = %cmd, %termination, "command failed");
    Err(CommandError::Failed {
      cmd: cmd.to_string(),
      termination,
    })
  }
}
