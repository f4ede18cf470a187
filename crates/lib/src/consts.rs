//! Names and fixed lists shared across kiln.

/// Name of the tool, its install directory and its executable.
pub const APP_NAME: &str = "kiln";

/// Name under which the built executable is copied into the install root.
///
/// Differs from [`APP_NAME`] so a running `kiln` is never overwritten.
pub const INSTALLED_BINARY: &str = "kiln-bin";

/// Repository the launcher clones on `upgrade`.
pub const REPOSITORY_URL: &str = "https://github.com/kiln-build/kiln.git";

/// Upstream branch the launcher resets to on `upgrade`.
pub const UPSTREAM_BRANCH: &str = "master";

/// Environment variable handed to child processes while setup runs.
pub const SETUP_ENV: &str = "KILN_SETUP";

/// Overrides the install root.
pub const HOME_ENV: &str = "KILN_HOME";

/// Overrides the system-wide binary directory the launcher is copied to.
pub const GLOBAL_BIN_ENV: &str = "KILN_GLOBAL_BIN";

/// Default build configuration tag used in `bin/<platform>-<config>`.
pub const DEFAULT_CONFIG: &str = "debug";

/// Manifest file that marks a buildable project directory.
pub const PROJECT_MANIFEST: &str = "project.json";

/// Id under which the tool registers its own include files.
pub const SELF_ID: &str = "kiln";

/// A core library or driver the bootstrap builds with the native toolchain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CorePackage {
  /// Source directory relative to the tool's source tree.
  pub source_dir: &'static str,
  pub id: &'static str,
  /// Artefact base name, without platform prefix or extension.
  pub artefact: &'static str,
}

/// Core packages in build order: runtime library first, then language drivers.
pub const CORE_PACKAGES: &[CorePackage] = &[
  CorePackage {
    source_dir: "util",
    id: "kiln.util",
    artefact: "kiln_util",
  },
  CorePackage {
    source_dir: "drivers/lang/c",
    id: "kiln.lang.c",
    artefact: "kiln_lang_c",
  },
  CorePackage {
    source_dir: "drivers/lang/cpp",
    id: "kiln.lang.cpp",
    artefact: "kiln_lang_cpp",
  },
];

/// A package group the bootstrap builds by invoking the tool on itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PackageGroup {
  /// Path handed to `kiln build`, relative to the source tree.
  pub target: &'static str,
  /// Human readable name used in progress messages.
  pub description: &'static str,
}

pub const PACKAGE_GROUPS: &[PackageGroup] = &[
  PackageGroup {
    target: "drivers/test",
    description: "test framework",
  },
  PackageGroup {
    target: "libraries",
    description: "library configuration packages",
  },
  PackageGroup {
    target: "templates",
    description: "template packages",
  },
];
