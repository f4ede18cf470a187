//! Capability surface handed to build extensions.

use std::path::{Path, PathBuf};

use super::descriptor::Project;
use super::types::AttrValue;

/// What a build extension may ask of, or register with, the project it builds.
pub trait ProjectHost {
  fn get_attribute(&self, name: &str) -> Option<&AttrValue>;

  fn get_string_attribute(&self, name: &str) -> Option<&str> {
    self.get_attribute(name).and_then(AttrValue::as_str)
  }

  /// Missing or non-boolean attributes read as `false`.
  fn get_bool_attribute(&self, name: &str) -> bool {
    self.get_attribute(name).and_then(AttrValue::as_bool).unwrap_or(false)
  }

  fn add_build_dependency(&mut self, file: &Path);

  fn register_clean_file(&mut self, file: &Path);
}

/// [`ProjectHost`] for one project as seen by one driver.
///
/// Attributes scoped to the driver shadow project-wide ones.
pub struct DriverHost<'a> {
  project: &'a mut Project,
  driver: String,
}

impl<'a> DriverHost<'a> {
  pub fn new(project: &'a mut Project, driver: impl Into<String>) -> Self {
    Self {
      project,
      driver: driver.into(),
    }
  }

  /// Host for the project's first driver, or project-wide attributes only.
  pub fn primary(project: &'a mut Project) -> Self {
    let driver = project.drivers.first().cloned().unwrap_or_default();
    Self::new(project, driver)
  }

  pub fn driver(&self) -> &str {
    &self.driver
  }

  pub fn project(&self) -> &Project {
    self.project
  }
}

fn push_unique(list: &mut Vec<PathBuf>, file: &Path) {
  if !list.iter().any(|p| p == file) {
    list.push(file.to_path_buf());
  }
}

impl ProjectHost for DriverHost<'_> {
  fn get_attribute(&self, name: &str) -> Option<&AttrValue> {
    self.project.attributes.lookup(&self.driver, name)
  }

  fn add_build_dependency(&mut self, file: &Path) {
    push_unique(&mut self.project.build_dependencies, file);
  }

  fn register_clean_file(&mut self, file: &Path) {
    push_unique(&mut self.project.files_to_clean, file);
  }
}
