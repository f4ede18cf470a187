use std::path::PathBuf;

use anyhow::{Context, Result};

use kiln_lib::platform::paths;
use kiln_lib::project::ProjectKind;
use kiln_lib::registry::{InstallRequest, Registry};

use crate::output::{print_stat, print_success};

use super::{host_toolchain, setup_in_progress};

pub struct InstallArgs {
  pub path: PathBuf,
  pub id: String,
  pub package: bool,
  pub includes: Vec<PathBuf>,
  pub artefact: Option<String>,
  pub config: String,
}

pub fn cmd_install(args: InstallArgs) -> Result<()> {
  let toolchain = host_toolchain()?;
  let registry = Registry::new(paths::install_root()?, toolchain.as_ref(), args.config).replace_conflicts(setup_in_progress());

  let kind = if args.package {
    ProjectKind::Package
  } else {
    ProjectKind::Application
  };
  let mut request = InstallRequest::new(args.path, args.id, kind);
  request.includes = args.includes;
  request.artefact = args.artefact;

  let entry = registry
    .install(&request)
    .with_context(|| format!("failed to install '{}'", request.id))?;

  print_success(&format!("Installed '{}'", entry.id));
  if let Some(includes) = &entry.includes {
    print_stat("Includes", &includes.display().to_string());
  }
  for artefact in &entry.artefacts {
    print_stat("Artefact", artefact);
  }

  Ok(())
}
