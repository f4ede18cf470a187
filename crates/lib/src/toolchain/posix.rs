use std::path::Path;

use crate::consts::APP_NAME;
use crate::launcher::templates::POSIX_LAUNCHER;
use crate::platform::Platform;
use crate::platform::os::Os;

use super::{MakeInvocation, Toolchain};

/// Linux and macOS: `/bin/sh`, GNU/BSD make, `lib*.so` / `lib*.dylib`.
#[derive(Debug, Clone, Copy)]
pub struct PosixToolchain {
  platform: Platform,
}

impl PosixToolchain {
  pub fn new(platform: Platform) -> Self {
    Self { platform }
  }
}

impl Toolchain for PosixToolchain {
  fn platform(&self) -> Platform {
    self.platform
  }

  fn is_posix(&self) -> bool {
    true
  }

  fn shell(&self) -> (&'static str, &'static [&'static str]) {
    ("/bin/sh", &["-c"])
  }

  fn quote(&self, value: &str) -> String {
    let mut quoted = String::with_capacity(value.len() + 2);
    quoted.push('"');
    for c in value.chars() {
      if matches!(c, '"' | '\\' | '$' | '`') {
        quoted.push('\\');
      }
      quoted.push(c);
    }
    quoted.push('"');
    quoted
  }

  fn executable_name(&self, base: &str) -> String {
    base.to_string()
  }

  fn launcher_file_name(&self) -> String {
    format!("{}.sh", APP_NAME)
  }

  fn launcher_template(&self) -> &'static str {
    POSIX_LAUNCHER
  }

  fn global_install_command(&self, script: &Path, global_dir: &Path, elevate: bool) -> String {
    let target = global_dir.join(APP_NAME);
    format!(
      "{}cp {} {}",
      if elevate { "sudo " } else { "" },
      self.quote(&script.to_string_lossy()),
      self.quote(&target.to_string_lossy())
    )
  }

  fn make_invocation(&self, work_dir: &Path, source_dir: &Path) -> MakeInvocation {
    let build_dir = source_dir.join(format!("build-{}", self.platform.os.build_tag()));
    MakeInvocation {
      cmd: format!("make -C {} clean all", self.quote(&build_dir.to_string_lossy())),
      cwd: work_dir.to_path_buf(),
    }
  }

  fn shared_library_name(&self, artefact: &str) -> String {
    match self.platform.os {
      Os::MacOs => format!("lib{}.dylib", artefact),
      _ => format!("lib{}.so", artefact),
    }
  }

  fn import_library_name(&self, _artefact: &str) -> Option<String> {
    None
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::platform::arch::Arch;
  use std::path::PathBuf;

  fn linux() -> PosixToolchain {
    PosixToolchain::new(Platform::new(Arch::X86_64, Os::Linux))
  }

  #[test]
  fn quote_escapes_shell_expansion() {
    assert_eq!(linux().quote("/home/a b"), "\"/home/a b\"");
    assert_eq!(linux().quote("$HOME/`x`"), "\"\\$HOME/\\`x\\`\"");
  }

  #[test]
  #[cfg(unix)]
  fn make_runs_from_work_dir_against_os_build_dir() {
    let make = linux().make_invocation(Path::new("/src/kiln"), Path::new("util"));
    assert_eq!(make.cmd, "make -C \"util/build-Linux\" clean all");
    assert_eq!(make.cwd, PathBuf::from("/src/kiln"));

    let mac = PosixToolchain::new(Platform::new(Arch::Aarch64, Os::MacOs));
    let make = mac.make_invocation(Path::new("/src"), Path::new("util"));
    assert!(make.cmd.contains("util/build-Darwin"));
  }

  #[test]
  #[cfg(unix)]
  fn global_install_uses_sudo_only_when_elevating() {
    let cmd = linux().global_install_command(Path::new("/h/kiln/kiln.sh"), Path::new("/usr/local/bin"), true);
    assert_eq!(cmd, "sudo cp \"/h/kiln/kiln.sh\" \"/usr/local/bin/kiln\"");

    let cmd = linux().global_install_command(Path::new("/h/kiln/kiln.sh"), Path::new("/opt/bin"), false);
    assert_eq!(cmd, "cp \"/h/kiln/kiln.sh\" \"/opt/bin/kiln\"");
  }

  #[test]
  fn shared_library_extension_follows_os() {
    assert_eq!(linux().shared_library_name("kiln_util"), "libkiln_util.so");
    let mac = PosixToolchain::new(Platform::new(Arch::Aarch64, Os::MacOs));
    assert_eq!(mac.shared_library_name("kiln_util"), "libkiln_util.dylib");
  }
}
