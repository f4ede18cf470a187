use predicates::prelude::*;

use super::common::TestEnv;

#[test]
fn install_includes_copies_headers() {
  let env = TestEnv::new();
  env.write_file("json/include/json.h", "#pragma once");

  env
    .kiln_cmd()
    .arg("install")
    .arg(env.path("json"))
    .args(["--id", "json", "--package", "--includes", "include"])
    .assert()
    .success()
    .stdout(predicate::str::contains("Installed 'json'"));

  assert!(env.install_root().join("include/json/json.h").is_file());
  assert!(env.install_root().join("registry.json").is_file());
}

#[test]
fn installed_package_shows_in_info() {
  let env = TestEnv::new();
  env.write_file("json/include/json.h", "");

  env
    .kiln_cmd()
    .arg("install")
    .arg(env.path("json"))
    .args(["--id", "json", "--package", "--includes", "include"])
    .assert()
    .success();

  let output = env.kiln_cmd().args(["info", "--output", "json"]).output().unwrap();
  let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
  let packages = json["packages"].as_array().unwrap();
  assert_eq!(packages.len(), 1);
  assert_eq!(packages[0]["id"], "json");
  assert_eq!(packages[0]["kind"], "package");
}

#[test]
fn missing_artefact_fails() {
  let env = TestEnv::new();
  env.write_file("json/project.json", "{}");

  env
    .kiln_cmd()
    .arg("install")
    .arg(env.path("json"))
    .args(["--id", "json", "--package", "--artefact", "json"])
    .assert()
    .code(255)
    .stderr(predicate::str::contains("failed to install 'json'"))
    .stderr(predicate::str::contains("does not exist"));
}

#[test]
fn conflicting_path_is_replaced_only_during_setup() {
  let env = TestEnv::new();
  env.write_file("old/include/a.h", "");
  env.write_file("new/include/a.h", "");

  let install = |dir: &str| {
    let mut cmd = env.kiln_cmd();
    cmd
      .arg("install")
      .arg(env.path(dir))
      .args(["--id", "kiln", "--includes", "include"]);
    cmd
  };

  install("old").assert().success();
  install("new")
    .assert()
    .code(255)
    .stderr(predicate::str::contains("already installed"));
  install("new").env("KILN_SETUP", "true").assert().success();
}
