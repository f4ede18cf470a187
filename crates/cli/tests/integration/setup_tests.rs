//! End-to-end `kiln setup` runs against stub tools.
//!
//! The source tree holds a stub `kiln` that logs its arguments and a stub
//! `make` on `PATH` that leaves the expected shared library behind.

#![cfg(target_os = "linux")]

use std::fs;

use predicates::prelude::*;

use super::common::TestEnv;

const STUB_KILN: &str = r#"#!/bin/sh
[ "$KILN_SETUP" = "true" ] || exit 7
echo "kiln $*" >> "$LOG"
"#;

const STUB_MAKE: &str = r#"#!/bin/sh
echo "make $*" >> "$LOG"
[ -n "$FAIL_MAKE" ] && case "$2" in "$FAIL_MAKE"/*) exit 1 ;; esac
case "$2" in
  util/*) touch util/libkiln_util.so ;;
  drivers/lang/c/*) touch drivers/lang/c/libkiln_lang_c.so ;;
  drivers/lang/cpp/*) touch drivers/lang/cpp/libkiln_lang_cpp.so ;;
esac
"#;

fn source_tree(env: &TestEnv) {
  env.write_script("checkout/kiln", STUB_KILN);
  env.write_script("stubs/make", STUB_MAKE);
  for dir in ["util", "drivers/lang/c", "drivers/lang/cpp"] {
    fs::create_dir_all(env.path("checkout").join(dir)).unwrap();
  }
}

fn setup_cmd(env: &TestEnv) -> assert_cmd::Command {
  let mut cmd = env.kiln_cmd();
  cmd.env("PATH", format!("{}:/usr/bin:/bin", env.path("stubs").display()));
  cmd.env("LOG", env.path("calls.log"));
  cmd.args(["setup", "--no-elevate", "--source-dir"]).arg(env.path("checkout"));
  cmd
}

#[test]
fn setup_installs_and_builds_core_packages() {
  let env = TestEnv::new();
  source_tree(&env);

  setup_cmd(&env)
    .assert()
    .success()
    .stdout(predicate::str::contains("done copy kiln executable"))
    .stdout(predicate::str::contains("done build 'kiln.lang.cpp'"))
    .stdout(predicate::str::contains("done install template packages"))
    .stdout(predicate::str::contains("Installation complete"));

  let root = env.install_root();
  assert!(root.join("kiln-bin").is_file());
  assert!(root.join("kiln.sh").is_file());
  assert!(env.global_bin().join("kiln").is_file());
  assert!(
    env
      .path("checkout/util/bin/x86_64-linux-debug/libkiln_util.so")
      .is_file()
      || env
        .path("checkout/util/bin/aarch64-linux-debug/libkiln_util.so")
        .is_file()
  );

  let log = fs::read_to_string(env.path("calls.log")).unwrap();
  assert!(log.contains("kiln install --id kiln --includes include"));
  assert!(log.contains("kiln install util --id kiln.util --artefact kiln_util --package"));
  assert!(log.contains("make -C drivers/lang/c/build-Linux clean all"));
  assert!(log.contains("kiln build drivers/test --config debug"));
  assert!(log.contains("kiln build templates"));
}

#[test]
fn local_setup_skips_launcher() {
  let env = TestEnv::new();
  source_tree(&env);

  setup_cmd(&env).arg("--local").assert().success();

  assert!(!env.install_root().join("kiln.sh").exists());
  assert!(!env.global_bin().join("kiln").exists());
  assert!(env.install_root().join("kiln-bin").is_file());
}

#[test]
fn failed_native_build_aborts_with_minus_one() {
  let env = TestEnv::new();
  source_tree(&env);

  setup_cmd(&env)
    .env("FAIL_MAKE", "util")
    .assert()
    .code(255)
    .stdout(predicate::str::contains("done install include files for 'kiln.util'"))
    .stdout(predicate::str::contains("done build 'kiln.util'").not())
    .stderr(predicate::str::contains("failed to build for 'kiln.util'"))
    .stderr(predicate::str::contains("(result 1)"));

  let log = fs::read_to_string(env.path("calls.log")).unwrap();
  assert!(!log.contains("drivers/lang/c"));
}

#[test]
fn unwritable_global_bin_only_warns() {
  let env = TestEnv::new();
  source_tree(&env);

  setup_cmd(&env)
    .env("KILN_GLOBAL_BIN", env.path("missing/dir"))
    .assert()
    .success()
    .stderr(predicate::str::contains("failed to install kiln script globally"))
    .stderr(predicate::str::contains("export PATH=$PATH:"))
    .stdout(predicate::str::contains("Installation complete"));
}
