//! End-to-end tests for the `check` and `compile` commands.
//!
//! These tests invoke the actual CLI binary and validate the behavior from a
//! user's perspective.

use assert_cmd::Command;
use assert_fs::prelude::*;
use predicates::prelude::*;

#[test]
#[cfg_attr(not(feature = "integration-tests"), ignore)]
fn test_check_reports_declared_jobs() {
    let temp = assert_fs::TempDir::new().unwrap();
    temp.child(".jobforge.yaml")
        .write_str(
            r#"
build_shell_commands:
- make test

matrix:
  planet:
  - earth
  - mars
"#,
        )
        .unwrap();

    let mut cmd = Command::cargo_bin("jobforge").unwrap();
    cmd.arg("check")
        .arg(temp.path())
        .arg("--url")
        .arg("http://server/space.git")
        .arg("--branch")
        .arg("main")
        .assert()
        .success()
        .stdout(predicate::str::contains("space-main-earth"))
        .stdout(predicate::str::contains("space-main-mars"));
}

#[test]
#[cfg_attr(not(feature = "integration-tests"), ignore)]
fn test_check_fails_on_unrecognized_description() {
    let temp = assert_fs::TempDir::new().unwrap();
    temp.child(".jobforge.yaml")
        .write_str("nothing_recognized_here: true\n")
        .unwrap();

    let mut cmd = Command::cargo_bin("jobforge").unwrap();
    cmd.arg("check")
        .arg(temp.path())
        .arg("--url")
        .arg("http://server/space.git")
        .arg("--branch")
        .arg("main")
        .assert()
        .failure();
}

#[test]
#[cfg_attr(not(feature = "integration-tests"), ignore)]
fn test_compile_writes_job_documents() {
    let temp = assert_fs::TempDir::new().unwrap();
    temp.child(".jobforge.yaml")
        .write_str("junit_patterns:\n- \"junit*.xml\"\n")
        .unwrap();

    let mut cmd = Command::cargo_bin("jobforge").unwrap();
    cmd.arg("compile")
        .arg(temp.path())
        .arg("--output")
        .arg(temp.path().join("jobs").to_str().unwrap())
        .arg("--url")
        .arg("http://server/space.git")
        .arg("--branch")
        .arg("main")
        .assert()
        .success();

    temp.child("jobs/space-main")
        .assert(predicate::str::contains("<JUnitType>"));
}
