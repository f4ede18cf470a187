use tracing::debug;

use crate::project::{DriverHost, Project, ProjectHost};
use crate::registry::{InstallRequest, Registry};

use super::{BuildError, ProjectBuilder};

/// Installs what a project provides into the registry.
///
/// Public include directories are registered for every project. A project
/// with sources must have its artefact already built into
/// `bin/<platform>-<config>`; its base name can be overridden with the
/// `artefact` attribute of the project's primary driver.
pub struct RegistryBuilder<'r, 'a> {
  registry: &'r Registry<'a>,
}

impl<'r, 'a> RegistryBuilder<'r, 'a> {
  pub fn new(registry: &'r Registry<'a>) -> Self {
    Self { registry }
  }
}

impl ProjectBuilder for RegistryBuilder<'_, '_> {
  fn build(&mut self, project: &mut Project) -> Result<(), BuildError> {
    let mut host = DriverHost::primary(project);

    let request = {
      let project = host.project();
      let mut request = InstallRequest::new(&project.path, &project.id, project.kind);
      if project.public {
        request.includes = project.includes.clone();
      }
      if !project.sources.is_empty() {
        let artefact = host
          .get_string_attribute("artefact")
          .map(str::to_string)
          .unwrap_or_else(|| project.artefact_name());
        request.artefact = Some(artefact);
      }
      request
    };

    let entry = self.registry.install(&request)?;
    debug!(id = %entry.id, driver = %host.driver(), "registered project");

    if !host.project().keep_binary {
      let bin_dir = self.registry.artefact_dir(&request.path);
      for file in &entry.artefacts {
        host.register_clean_file(&bin_dir.join(file));
      }
    }

    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::platform::Platform;
  use crate::platform::arch::Arch;
  use crate::platform::os::Os;
  use crate::project::{AttrValue, ProjectKind};
  use crate::toolchain::PosixToolchain;
  use std::fs;
  use std::path::PathBuf;
  use tempfile::TempDir;

  fn linux() -> PosixToolchain {
    PosixToolchain::new(Platform::new(Arch::X86_64, Os::Linux))
  }

  #[test]
  fn registers_includes_and_prebuilt_artefact() {
    let temp = TempDir::new().unwrap();
    let dir = temp.path().join("json");
    fs::create_dir_all(dir.join("include")).unwrap();
    fs::write(dir.join("include").join("json.h"), "").unwrap();
    fs::create_dir_all(dir.join("bin/x86_64-linux-debug")).unwrap();
    fs::write(dir.join("bin/x86_64-linux-debug/libjson_c.so"), "").unwrap();

    let mut project = Project::new("json", &dir, ProjectKind::Package);
    project.includes = vec![PathBuf::from("include")];
    project.sources = vec![PathBuf::from("src")];
    project.drivers = vec!["lang.c".into()];
    project
      .attributes
      .drivers
      .entry("lang.c".into())
      .or_default()
      .insert("artefact".into(), AttrValue::String("json_c".into()));

    let toolchain = linux();
    let registry = Registry::new(temp.path().join("root"), &toolchain, "debug");
    RegistryBuilder::new(&registry).build(&mut project).unwrap();

    assert!(temp.path().join("root/include/json/json.h").is_file());
    assert!(temp.path().join("root/lib/libjson_c.so").is_file());
    assert_eq!(project.files_to_clean.len(), 1);
  }

  #[test]
  fn private_project_keeps_headers_to_itself() {
    let temp = TempDir::new().unwrap();
    fs::create_dir_all(temp.path().join("include")).unwrap();

    let mut project = Project::new("internal", temp.path(), ProjectKind::Package);
    project.public = false;
    project.includes = vec![PathBuf::from("include")];

    let toolchain = linux();
    let registry = Registry::new(temp.path().join("root"), &toolchain, "debug");
    RegistryBuilder::new(&registry).build(&mut project).unwrap();

    assert!(!registry.include_dir("internal").exists());
    assert!(registry.is_installed("internal").unwrap());
  }

  #[test]
  fn sources_without_artefact_fail() {
    let temp = TempDir::new().unwrap();
    let mut project = Project::new("app", temp.path(), ProjectKind::Application);
    project.sources = vec![PathBuf::from("src")];

    let toolchain = linux();
    let registry = Registry::new(temp.path().join("root"), &toolchain, "debug");
    let err = RegistryBuilder::new(&registry).build(&mut project).unwrap_err();
    assert!(err.to_string().contains("does not exist"));
  }
}
