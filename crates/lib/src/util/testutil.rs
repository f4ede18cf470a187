//! Test doubles for kiln-lib.
//!
//! [`ScriptedRunner`] records every command instead of spawning it and can be
//! told to fail or to produce files for matching command lines.
//! [`RecordingReporter`] keeps bootstrap progress messages in order.

use std::cell::RefCell;
use std::path::{Path, PathBuf};

use crate::bootstrap::{Reporter, Stage};
use crate::execute::{CommandError, CommandRunner, RunOptions, Termination};

/// One recorded [`CommandRunner::run`] call.
#[derive(Debug, Clone)]
pub struct Call {
  pub cmd: String,
  pub cwd: PathBuf,
  pub options: RunOptions,
}

type Matcher = Box<dyn Fn(&str) -> bool>;
type Effect = Box<dyn Fn(&str, &Path)>;

#[derive(Default)]
pub struct ScriptedRunner {
  calls: RefCell<Vec<Call>>,
  failures: Vec<(Matcher, Termination)>,
  effects: Vec<(String, Effect)>,
}

impl ScriptedRunner {
  pub fn new() -> Self {
    Self::default()
  }

  /// Fail every command containing `pattern`.
  pub fn fail_on(self, pattern: &str, termination: Termination) -> Self {
    let pattern = pattern.to_string();
    self.fail_if(move |cmd| cmd.contains(&pattern), termination)
  }

  pub fn fail_if(mut self, matcher: impl Fn(&str) -> bool + 'static, termination: Termination) -> Self {
    self.failures.push((Box::new(matcher), termination));
    self
  }

  /// Run `effect` with the command line and working directory of every
  /// successful command containing `pattern`.
  pub fn on(mut self, pattern: &str, effect: impl Fn(&str, &Path) + 'static) -> Self {
    self.effects.push((pattern.to_string(), Box::new(effect)));
    self
  }

  pub fn calls(&self) -> Vec<Call> {
    self.calls.borrow().clone()
  }

  pub fn commands(&self) -> Vec<String> {
    self.calls.borrow().iter().map(|c| c.cmd.clone()).collect()
  }
}

impl CommandRunner for ScriptedRunner {
  fn run(&self, cmd: &str, cwd: &Path, options: &RunOptions) -> Result<(), CommandError> {
    self.calls.borrow_mut().push(Call {
      cmd: cmd.to_string(),
      cwd: cwd.to_path_buf(),
      options: *options,
    });

    if let Some((_, termination)) = self.failures.iter().find(|(matches, _)| matches(cmd)) {
      return Err(CommandError::Failed {
        cmd: cmd.to_string(),
        termination: *termination,
      });
    }

    for (pattern, effect) in &self.effects {
      if cmd.contains(pattern.as_str()) {
        effect(cmd, cwd);
      }
    }

    Ok(())
  }
}

/// Collects reporter events as `done: ...`, `warn: ...` and `info: ...` lines.
#[derive(Debug, Default)]
pub struct RecordingReporter {
  pub events: Vec<String>,
}

impl RecordingReporter {
  pub fn done_markers(&self) -> Vec<&str> {
    self.events.iter().filter_map(|e| e.strip_prefix("done: ")).collect()
  }

  pub fn warnings(&self) -> Vec<&str> {
    self.events.iter().filter_map(|e| e.strip_prefix("warn: ")).collect()
  }
}

impl Reporter for RecordingReporter {
  fn done(&mut self, stage: &Stage) {
    self.events.push(format!("done: {}", stage));
  }

  fn warn(&mut self, message: &str) {
    self.events.push(format!("warn: {}", message));
  }

  fn info(&mut self, message: &str) {
    self.events.push(format!("info: {}", message));
  }
}
