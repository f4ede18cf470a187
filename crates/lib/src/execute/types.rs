//! Types shared by command runners.

use std::fmt;
use std::process::ExitStatus;

use thiserror::Error;

/// Log verbosity, most verbose first.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
pub enum Verbosity {
  Trace,
  Debug,
  #[default]
  Info,
  Warn,
  Error,
}

impl Verbosity {
  /// Map `-v`/`-q` flag counts to a verbosity.
  pub fn from_flags(verbose: u8, quiet: bool) -> Self {
    if quiet {
      return Self::Warn;
    }
    match verbose {
      0 => Self::Info,
      1 => Self::Debug,
      _ => Self::Trace,
    }
  }

  /// Whether child output is shown in full.
  pub fn is_traced(self) -> bool {
    self <= Self::Trace
  }

  /// Directive for `tracing_subscriber::EnvFilter`.
  pub fn as_filter(self) -> &'static str {
    match self {
      Self::Trace => "trace",
      Self::Debug => "debug",
      Self::Info => "info",
      Self::Warn => "warn",
      Self::Error => "error",
    }
  }
}

/// Per-invocation settings handed down from the bootstrap context.
#[derive(Debug, Clone, Copy, Default)]
pub struct RunOptions {
  pub verbosity: Verbosity,
  /// Export the setup flag to the child so nested kiln invocations know
  /// they run as part of a bootstrap.
  pub setup_in_progress: bool,
}

/// How a child process ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Termination {
  Success,
  Exited(i32),
  Signaled(i32),
}

impl Termination {
  pub fn is_success(self) -> bool {
    matches!(self, Self::Success)
  }
}

impl From<ExitStatus> for Termination {
  fn from(status: ExitStatus) -> Self {
    #[cfg(unix)]
    {
      use std::os::unix::process::ExitStatusExt;
      if let Some(signal) = status.signal() {
        return Self::Signaled(signal);
      }
    }

    match status.code() {
      Some(0) => Self::Success,
      Some(code) => Self::Exited(code),
      None => Self::Exited(-1),
    }
  }
}

impl fmt::Display for Termination {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::Success => write!(f, "result 0"),
      Self::Exited(code) => write!(f, "result {}", code),
      Self::Signaled(signal) => write!(f, "sig {}", signal),
    }
  }
}

#[derive(Debug, Error)]
pub enum CommandError {
  #[error("'{cmd}' could not be started: {source}")]
  Spawn { cmd: String, source: std::io::Error },

  #[error("'{cmd}' ({termination})")]
  Failed { cmd: String, termination: Termination },
}

impl CommandError {
  /// The literal command line that failed.
  pub fn cmd(&self) -> &str {
    match self {
      Self::Spawn { cmd, .. } | Self::Failed { cmd, .. } => cmd,
    }
  }
}
