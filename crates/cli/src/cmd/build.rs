//! Implementation of the `kiln build` command.

use std::path::Path;

use anyhow::{Context, Result, bail};
use tracing::debug;

use kiln_lib::build::{RegistryBuilder, build_tree};
use kiln_lib::platform::paths;
use kiln_lib::registry::Registry;

use crate::output::{print_error, print_stat, print_success, print_warning};

use super::{host_toolchain, setup_in_progress};

/// Build all projects below `path` and register them with the install root.
pub fn cmd_build(path: &Path, config: &str) -> Result<()> {
  let toolchain = host_toolchain()?;
  let registry = Registry::new(paths::install_root()?, toolchain.as_ref(), config).replace_conflicts(setup_in_progress());
  let index = registry.load_index()?;
  debug!(path = %path.display(), installed = index.entries.len(), "building tree");

  let mut builder = RegistryBuilder::new(&registry);
  let report = build_tree(path, &mut builder, |id| index.entries.contains_key(id))
    .with_context(|| format!("failed to build '{}'", path.display()))?;

  for id in &report.built {
    print_success(&format!("Built '{}'", id));
  }
  for (id, error) in &report.failed {
    print_error(&format!("'{}': {}", id, error));
  }
  for id in &report.skipped {
    print_warning(&format!("Skipped '{}': a dependency failed", id));
  }

  if !report.is_success() {
    bail!(
      "{} project(s) failed, {} skipped",
      report.failed.len(),
      report.skipped.len()
    );
  }

  println!();
  print_stat("Projects built", &report.built.len().to_string());
  Ok(())
}
