//! Install-root and system directory resolution.

use std::path::PathBuf;

use thiserror::Error;

use crate::consts::{APP_NAME, GLOBAL_BIN_ENV, HOME_ENV};

#[derive(Debug, Error)]
pub enum PathError {
  #[error("missing ${0} environment variable")]
  MissingEnv(&'static str),
}

#[cfg(windows)]
const HOME_VAR: &str = "USERPROFILE";

#[cfg(not(windows))]
const HOME_VAR: &str = "HOME";

/// Returns the user's home directory
pub fn home_dir() -> Result<PathBuf, PathError> {
  std::env::var_os(HOME_VAR)
    .filter(|v| !v.is_empty())
    .map(PathBuf::from)
    .ok_or(PathError::MissingEnv(HOME_VAR))
}

/// Returns the per-user install root (`~/kiln`).
///
/// `KILN_HOME` takes precedence over the home directory.
pub fn install_root() -> Result<PathBuf, PathError> {
  if let Some(path) = std::env::var_os(HOME_ENV).filter(|v| !v.is_empty()) {
    return Ok(PathBuf::from(path));
  }
  Ok(home_dir()?.join(APP_NAME))
}

/// Returns the system-wide directory the launcher script is copied to.
pub fn global_bin_dir() -> PathBuf {
  if let Some(path) = std::env::var_os(GLOBAL_BIN_ENV).filter(|v| !v.is_empty()) {
    return PathBuf::from(path);
  }
  default_global_bin_dir()
}

#[cfg(windows)]
pub fn default_global_bin_dir() -> PathBuf {
  PathBuf::from(r"C:\Windows\system32")
}

#[cfg(not(windows))]
pub fn default_global_bin_dir() -> PathBuf {
  PathBuf::from("/usr/local/bin")
}

#[cfg(test)]
mod tests {
  use super::*;
  use serial_test::serial;

  #[test]
  #[serial]
  fn kiln_home_takes_precedence() {
    temp_env::with_vars([(HOME_ENV, Some("/custom/kiln")), (HOME_VAR, Some("/home/user"))], || {
      assert_eq!(install_root().unwrap(), PathBuf::from("/custom/kiln"));
    });
  }

  #[test]
  #[serial]
  fn install_root_falls_back_to_home() {
    temp_env::with_vars([(HOME_ENV, None::<&str>), (HOME_VAR, Some("/home/user"))], || {
      assert_eq!(install_root().unwrap(), PathBuf::from("/home/user").join(APP_NAME));
    });
  }

  #[test]
  #[serial]
  fn missing_home_is_an_error() {
    temp_env::with_vars([(HOME_ENV, None::<&str>), (HOME_VAR, None::<&str>)], || {
      let err = install_root().unwrap_err();
      assert!(err.to_string().contains(HOME_VAR));
    });
  }

  #[test]
  #[serial]
  fn global_bin_override() {
    temp_env::with_var(GLOBAL_BIN_ENV, Some("/opt/bin"), || {
      assert_eq!(global_bin_dir(), PathBuf::from("/opt/bin"));
    });
    temp_env::with_var(GLOBAL_BIN_ENV, None::<&str>, || {
      assert_eq!(global_bin_dir(), default_global_bin_dir());
    });
  }
}
