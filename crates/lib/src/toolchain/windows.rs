use std::path::Path;

use crate::consts::APP_NAME;
use crate::launcher::templates::WINDOWS_LAUNCHER;
use crate::platform::Platform;
use crate::platform::arch::Arch;
use crate::platform::os::Os;

use super::{MakeInvocation, Toolchain};

/// Windows: `cmd.exe`, `nmake`, `*.dll` plus `*.lib` import libraries.
#[derive(Debug, Clone, Copy)]
pub struct WindowsToolchain {
  arch: Arch,
}

impl WindowsToolchain {
  pub fn new(arch: Arch) -> Self {
    Self { arch }
  }
}

impl Toolchain for WindowsToolchain {
  fn platform(&self) -> Platform {
    Platform::new(self.arch, Os::Windows)
  }

  fn is_posix(&self) -> bool {
    false
  }

  fn shell(&self) -> (&'static str, &'static [&'static str]) {
    ("cmd.exe", &["/C"])
  }

  // cmd.exe has no escape for a double quote inside a quoted argument
  fn quote(&self, value: &str) -> String {
    format!("\"{}\"", value.replace('"', ""))
  }

  fn executable_name(&self, base: &str) -> String {
    format!("{}.exe", base)
  }

  fn launcher_file_name(&self) -> String {
    format!("{}.bat", APP_NAME)
  }

  fn launcher_template(&self) -> &'static str {
    WINDOWS_LAUNCHER
  }

  // Elevation cannot be requested from a batch command line; the copy
  // simply fails without administrator rights.
  fn global_install_command(&self, script: &Path, global_dir: &Path, _elevate: bool) -> String {
    format!(
      "copy /Y {} {}",
      self.quote(&script.to_string_lossy()),
      self.quote(&global_dir.to_string_lossy())
    )
  }

  fn make_invocation(&self, work_dir: &Path, source_dir: &Path) -> MakeInvocation {
    MakeInvocation {
      cmd: "nmake /NOLOGO /F Makefile clean all".to_string(),
      cwd: work_dir.join(source_dir).join(format!("build-{}", Os::Windows.build_tag())),
    }
  }

  fn shared_library_name(&self, artefact: &str) -> String {
    format!("{}.dll", artefact)
  }

  fn import_library_name(&self, artefact: &str) -> Option<String> {
    Some(format!("{}.lib", artefact))
  }
}
