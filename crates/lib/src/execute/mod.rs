//! Command execution.
//!
//! Every external tool kiln drives (the native make tool, `git`, its own
//! freshly built binary) is started through a [`CommandRunner`]. The runner
//! blocks until the child exits and classifies the outcome; a non-zero exit
//! or a terminating signal is always an error, there are no retries.

mod cmd;
mod types;

pub use cmd::ShellRunner;
pub use types::{CommandError, RunOptions, Termination, Verbosity};

use std::path::Path;

/// Runs one command line to completion.
pub trait CommandRunner {
  /// Run `cmd` in `cwd`, returning an error unless it exited with status zero.
  fn run(&self, cmd: &str, cwd: &Path, options: &RunOptions) -> Result<(), CommandError>;
}
