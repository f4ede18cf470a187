use anyhow::Result;

use kiln_lib::platform::{paths, platform_triple};
use kiln_lib::registry::Registry;

use crate::output::{OutputFormat, print_json, print_stat};

use super::host_toolchain;

pub fn cmd_info(output: OutputFormat) -> Result<()> {
  let toolchain = host_toolchain()?;
  let install_root = paths::install_root()?;
  let global_bin = paths::global_bin_dir();
  let platform = platform_triple().unwrap_or_else(|| "unknown".to_string());
  let packages = Registry::new(&install_root, toolchain.as_ref(), "").entries()?;

  if output.is_json() {
    let packages: Vec<_> = packages
      .iter()
      .map(|p| serde_json::json!({ "id": p.id, "kind": p.kind, "path": p.path }))
      .collect();
    print_json(&serde_json::json!({
      "version": env!("CARGO_PKG_VERSION"),
      "platform": platform,
      "install_root": install_root,
      "global_bin": global_bin,
      "packages": packages,
    }))?;
    return Ok(());
  }

  println!("kiln v{}", env!("CARGO_PKG_VERSION"));
  print_stat("Platform", &platform);
  print_stat("Install root", &install_root.display().to_string());
  print_stat("Global bin", &global_bin.display().to_string());
  print_stat("Packages", &packages.len().to_string());
  for package in &packages {
    println!("    {} ({})", package.id, package.kind);
  }

  Ok(())
}
