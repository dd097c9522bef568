//! Integration tests for the stepfs binary.
// The cargo_bin function is marked deprecated in favor of cargo_bin! macro,
// but both work correctly. Suppressing until assert_cmd stabilizes the new API.
#![allow(deprecated)]

use assert_cmd::cargo::cargo_bin;
use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn stepfs(temp: &TempDir) -> Command {
    let mut cmd = Command::new(cargo_bin("stepfs"));
    cmd.arg("--project").arg(temp.path()).env("NO_COLOR", "1");
    cmd
}

const PLAN: &str = r#"
steps:
  - { name: write, action: write, path: hello.txt, content: Hello }
  - { name: append, action: append, path: hello.txt, content: ", world" }
  - { name: read, action: read, path: hello.txt }
"#;

#[test]
fn cli_shows_help() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::new(cargo_bin("stepfs"));
    cmd.arg("--help");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Run filesystem steps"));
    Ok(())
}

#[test]
fn cli_requires_subcommand() {
    let mut cmd = Command::new(cargo_bin("stepfs"));
    cmd.assert().failure();
}

#[test]
fn run_executes_plan() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    fs::write(temp.path().join("stepfs.yml"), PLAN)?;

    stepfs(&temp)
        .arg("run")
        .assert()
        .success()
        .stdout(predicate::str::contains("3 completed, 0 failed, 0 skipped"));

    assert_eq!(
        fs::read_to_string(temp.path().join("hello.txt"))?,
        "Hello, world"
    );
    Ok(())
}

#[test]
fn run_without_plan_fails() {
    let temp = TempDir::new().unwrap();
    stepfs(&temp)
        .arg("run")
        .assert()
        .failure()
        .stdout(predicate::str::contains("Plan not found"));
}

#[test]
fn run_json_prints_report() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    let plan = temp.path().join("custom.yml");
    fs::write(&plan, PLAN)?;

    let output = stepfs(&temp)
        .arg("run")
        .arg("--plan")
        .arg(&plan)
        .arg("--json")
        .output()?;
    assert!(output.status.success());

    let report: serde_json::Value = serde_json::from_slice(&output.stdout)?;
    assert_eq!(report["results"][2]["output"]["value"], "Hello, world");
    Ok(())
}

#[test]
fn exec_failure_skips_next_and_exits_nonzero() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;

    stepfs(&temp)
        .args(["exec", "read:missing.txt", "write:out.txt=x", "!write:after.txt=y"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("read:missing.txt not found"))
        .stdout(predicate::str::contains("previous step failed"))
        .stdout(predicate::str::contains("1 completed, 1 failed, 1 skipped"));

    assert!(!temp.path().join("out.txt").exists());
    assert!(temp.path().join("after.txt").exists());
    Ok(())
}

#[test]
fn exec_rejects_duplicate_steps() {
    let temp = TempDir::new().unwrap();
    stepfs(&temp)
        .args(["exec", "mkdir:d", "mkdir:d"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("Duplicate step name"));
}

#[test]
fn write_creates_file() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;

    stepfs(&temp)
        .args(["write", "note.txt", "remember this"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "File note.txt created with content: remember this",
        ));

    assert_eq!(
        fs::read_to_string(temp.path().join("note.txt"))?,
        "remember this"
    );
    Ok(())
}

#[test]
fn write_requires_content() {
    let temp = TempDir::new().unwrap();
    stepfs(&temp).args(["write", "note.txt"]).assert().failure();
}

#[test]
fn demo_runs_in_scratch_dir() {
    let temp = TempDir::new().unwrap();

    stepfs(&temp)
        .args(["demo", "--dir", "scratch"])
        .assert()
        .success()
        .stdout(predicate::str::contains("read-missing"))
        .stdout(predicate::str::contains("delete-directory"));

    assert!(temp.path().join("scratch/user.json").exists());
    assert!(!temp.path().join("scratch/myFolder").exists());
}

#[test]
fn completions_generate_script() {
    let mut cmd = Command::new(cargo_bin("stepfs"));
    cmd.args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("stepfs"));
}

#[test]
fn exec_json_with_watch_prints_only_the_report() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    fs::write(temp.path().join("n.txt"), "note")?;

    let output = stepfs(&temp)
        .args(["exec", "watch:n.txt", "--json"])
        .output()?;
    assert!(output.status.success());

    let report: serde_json::Value = serde_json::from_slice(&output.stdout)?;
    assert_eq!(report["results"][0]["status"], "completed");
    assert_eq!(report["results"][0]["output"]["kind"], "watching");
    Ok(())
}

#[test]
fn quiet_prints_failures_and_summary_only() {
    let temp = TempDir::new().unwrap();

    stepfs(&temp)
        .args(["--quiet", "exec", "write:a.txt=x", "read:missing.txt"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("read:missing.txt"))
        .stdout(predicate::str::contains("write:a.txt").not())
        .stdout(predicate::str::contains("1 completed, 1 failed, 0 skipped"));
}
