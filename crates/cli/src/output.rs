//! Terminal output for the kiln CLI.
//!
//! Status lines share one set of symbols and colors. Warnings and errors go
//! to stderr, everything else to stdout. [`ConsoleReporter`] turns bootstrap
//! progress into `done` lines.

use anyhow::Context;
use clap::ValueEnum;
use owo_colors::{OwoColorize, Stream};

use kiln_lib::bootstrap::{Reporter, Stage};

#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum OutputFormat {
  #[default]
  Text,
  Json,
}

impl OutputFormat {
  pub fn is_json(self) -> bool {
    matches!(self, OutputFormat::Json)
  }
}

pub mod symbols {
  pub const SUCCESS: &str = "✓";
  pub const ERROR: &str = "✗";
  pub const WARNING: &str = "⚠";
  pub const INFO: &str = "•";
}

pub fn print_success(message: &str) {
  println!(
    "{} {}",
    symbols::SUCCESS.if_supports_color(Stream::Stdout, |s| s.green()),
    message
  );
}

pub fn print_error(message: &str) {
  eprintln!(
    "{} {}",
    symbols::ERROR.if_supports_color(Stream::Stderr, |s| s.red()),
    message.if_supports_color(Stream::Stderr, |s| s.red())
  );
}

pub fn print_warning(message: &str) {
  eprintln!(
    "{} {}",
    symbols::WARNING.if_supports_color(Stream::Stderr, |s| s.yellow()),
    message.if_supports_color(Stream::Stderr, |s| s.yellow())
  );
}

pub fn print_info(message: &str) {
  println!(
    "{} {}",
    symbols::INFO.if_supports_color(Stream::Stdout, |s| s.blue()),
    message
  );
}

/// Text of the audit line for a finished stage.
pub fn done_line(stage: &Stage) -> String {
  format!("done {}", stage)
}

pub fn print_done(stage: &Stage) {
  println!(
    "{} {}",
    symbols::SUCCESS.if_supports_color(Stream::Stdout, |s| s.green()),
    done_line(stage)
  );
}

pub fn print_stat(label: &str, value: &str) {
  println!(
    "  {}: {}",
    label.if_supports_color(Stream::Stdout, |s| s.dimmed()),
    value
  );
}

pub fn print_json<T: serde::Serialize>(value: &T) -> anyhow::Result<()> {
  let json = serde_json::to_string_pretty(value).context("Failed to serialize to JSON")?;
  println!("{}", json);
  Ok(())
}

/// Prints bootstrap progress to the terminal.
pub struct ConsoleReporter;

impl Reporter for ConsoleReporter {
  fn done(&mut self, stage: &Stage) {
    print_done(stage);
    if *stage == Stage::Complete {
      println!();
      print_success(&format!(
        "{}",
        "Installation complete".if_supports_color(Stream::Stdout, |s| s.bold())
      ));
    }
  }

  fn warn(&mut self, message: &str) {
    print_warning(message);
  }

  fn info(&mut self, message: &str) {
    print_info(message);
  }
}
