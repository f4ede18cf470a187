//! Shared test helpers for CLI integration tests.

use std::path::PathBuf;

use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;
use tempfile::TempDir;

/// Isolated test environment.
///
/// Each test gets its own temporary directory with an isolated home,
/// install root and global bin directory.
pub struct TestEnv {
  pub temp: TempDir,
}

impl TestEnv {
  pub fn new() -> Self {
    Self {
      temp: TempDir::new().unwrap(),
    }
  }

  /// Absolute path of `relative` inside the temp directory.
  pub fn path(&self, relative: &str) -> PathBuf {
    self.temp.path().join(relative)
  }

  /// Write a file relative to the temp directory.
  pub fn write_file(&self, relative_path: &str, content: &str) {
    let path = self.path(relative_path);
    if let Some(parent) = path.parent() {
      std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(&path, content).unwrap();
  }

  /// Write an executable script relative to the temp directory.
  #[cfg(unix)]
  pub fn write_script(&self, relative_path: &str, content: &str) {
    use std::os::unix::fs::PermissionsExt;

    self.write_file(relative_path, content);
    let path = self.path(relative_path);
    std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
  }

  /// Home directory (isolated per test).
  pub fn home(&self) -> PathBuf {
    let p = self.path("home");
    std::fs::create_dir_all(&p).unwrap();
    dunce::canonicalize(&p).unwrap_or(p)
  }

  pub fn install_root(&self) -> PathBuf {
    self.home().join("kiln")
  }

  pub fn global_bin(&self) -> PathBuf {
    let p = self.path("global-bin");
    std::fs::create_dir_all(&p).unwrap();
    dunce::canonicalize(&p).unwrap_or(p)
  }

  /// Get a pre-configured Command for the kiln binary.
  ///
  /// Sets environment variables for isolated testing:
  /// - `HOME` / `USERPROFILE`: Isolated home directory
  /// - `KILN_HOME`: Isolated install root
  /// - `KILN_GLOBAL_BIN`: Isolated global bin directory
  pub fn kiln_cmd(&self) -> Command {
    let mut cmd: Command = cargo_bin_cmd!("kiln");
    cmd.env("HOME", self.home());
    cmd.env("USERPROFILE", self.home());
    cmd.env("KILN_HOME", self.install_root());
    cmd.env("KILN_GLOBAL_BIN", self.global_bin());
    cmd.env_remove("KILN_SETUP");
    cmd.env_remove("RUST_LOG");
    cmd
  }
}
