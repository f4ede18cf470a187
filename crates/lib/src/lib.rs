//! kiln-lib: bootstrap and build orchestration for kiln.
//!
//! - `project`: project descriptors and the dependency graph over them
//! - `execute`: running external commands
//! - `launcher`: the user-facing launcher script
//! - `registry`: the install environment packages register with
//! - `build`: building a tree of projects in dependency order
//! - `bootstrap`: installing kiln and building its own core packages

pub mod bootstrap;
pub mod build;
pub mod consts;
pub mod execute;
pub mod launcher;
pub mod platform;
pub mod project;
pub mod registry;
pub mod toolchain;
pub mod util;
