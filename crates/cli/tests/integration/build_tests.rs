use predicates::prelude::*;

use super::common::TestEnv;

#[test]
fn builds_header_only_tree_in_order() {
  let env = TestEnv::new();
  env.write_file("tree/base/project.json", r#"{"id": "base", "includes": ["include"]}"#);
  env.write_file("tree/base/include/base.h", "");
  env.write_file(
    "tree/app/project.json",
    r#"{"id": "app", "type": "package", "use": ["base"], "includes": ["include"]}"#,
  );
  env.write_file("tree/app/include/app.h", "");

  env
    .kiln_cmd()
    .arg("build")
    .arg(env.path("tree"))
    .assert()
    .success()
    .stdout(predicate::str::contains("Built 'base'"))
    .stdout(predicate::str::contains("Built 'app'"))
    .stdout(predicate::str::contains("Projects built: 2"));

  assert!(env.install_root().join("include/base/base.h").is_file());
  assert!(env.install_root().join("include/app/app.h").is_file());
}

#[test]
fn dependency_on_installed_package_is_accepted() {
  let env = TestEnv::new();
  env.write_file("util/include/util.h", "");
  env
    .kiln_cmd()
    .arg("install")
    .arg(env.path("util"))
    .args(["--id", "kiln.util", "--package", "--includes", "include"])
    .assert()
    .success();

  env.write_file("tree/app/project.json", r#"{"id": "app", "use": ["kiln.util"]}"#);
  env.kiln_cmd().arg("build").arg(env.path("tree")).assert().success();
}

#[test]
fn failed_project_skips_dependents() {
  let env = TestEnv::new();
  env.write_file("tree/lib/project.json", r#"{"id": "lib", "sources": ["src"]}"#);
  env.write_file("tree/app/project.json", r#"{"id": "app", "use": ["lib"]}"#);
  env.write_file("tree/other/project.json", r#"{"id": "other"}"#);

  env
    .kiln_cmd()
    .arg("build")
    .arg(env.path("tree"))
    .assert()
    .code(255)
    .stdout(predicate::str::contains("Built 'other'"))
    .stderr(predicate::str::contains("Skipped 'app'"))
    .stderr(predicate::str::contains("1 project(s) failed, 1 skipped"));
}

#[test]
fn unknown_dependency_fails_early() {
  let env = TestEnv::new();
  env.write_file("tree/app/project.json", r#"{"id": "app", "use": ["nowhere"]}"#);

  env
    .kiln_cmd()
    .arg("build")
    .arg(env.path("tree"))
    .assert()
    .code(255)
    .stderr(predicate::str::contains("'nowhere'"));
}
