//! Integration tests for `envstrap install`
#![cfg(unix)]

mod common;

use common::TestWorkspace;
use predicates::prelude::*;

#[test]
fn test_install_isolated_installs_every_tier_into_venv() {
    let workspace = TestWorkspace::with_simple_manifest();

    workspace
        .cmd()
        .args(["install", "--mode", "isolated", "--no-launcher"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Bootstrap complete"))
        .stdout(predicate::str::contains("3 installed, 0 failed"));

    assert!(workspace.file_exists("venv/bin/python"));
    let pip = workspace.pip_calls();
    assert_eq!(pip.len(), 3, "calls: {pip:?}");
    let venv_python = workspace.path.join("venv/bin/python");
    for call in &pip {
        assert!(
            call.contains(&venv_python.display().to_string()),
            "pip should run inside the venv: {call}"
        );
    }
    assert!(pip[0].contains("--upgrade"));
    assert!(pip[0].ends_with("pip wheel"));
    assert!(pip[1].ends_with("requests pandas"));
    assert!(pip[2].ends_with("folium"));
}

#[test]
fn test_install_defaults_to_isolated_without_terminal() {
    let workspace = TestWorkspace::with_simple_manifest();

    workspace.cmd().args(["install", "--no-launcher"]).assert().success();

    assert!(workspace.file_exists("venv/bin/python"));
}

#[test]
fn test_install_reuses_existing_venv() {
    let workspace = TestWorkspace::with_simple_manifest();

    workspace.cmd().args(["install", "--mode", "isolated"]).assert().success();
    workspace.cmd().args(["install", "--mode", "isolated"]).assert().success();

    let venvs = workspace
        .calls()
        .into_iter()
        .filter(|line| line.starts_with("venv "))
        .count();
    assert_eq!(venvs, 1);
}

#[test]
fn test_install_creates_working_directories() {
    let workspace = TestWorkspace::with_simple_manifest();

    workspace.cmd().args(["install", "--mode", "skip"]).assert().success();
    workspace.cmd().args(["install", "--mode", "skip"]).assert().success();

    for dir in ["data", "exports", "config", "logs", "maps", "cache"] {
        assert!(workspace.path.join(dir).is_dir(), "{dir} should exist");
    }
}

#[test]
fn test_install_optional_failure_warns_and_succeeds() {
    let workspace = TestWorkspace::with_simple_manifest();

    workspace
        .cmd()
        .args(["install", "--mode", "global", "--no-launcher"])
        .env("FAKE_FAIL", "folium")
        .assert()
        .success()
        .stderr(predicate::str::contains("warning:"))
        .stderr(predicate::str::contains("optional tier 'mapping'"))
        .stdout(predicate::str::contains("2 installed, 1 failed"))
        .stdout(predicate::str::contains("1 warning(s)"));
}

#[test]
fn test_install_required_failure_stops_and_exits_nonzero() {
    let workspace = TestWorkspace::with_simple_manifest();

    workspace
        .cmd()
        .args(["install", "--mode", "global"])
        .env("FAKE_FAIL", "pandas")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Required tier 'core' failed"))
        .stderr(predicate::str::contains(
            "No matching distribution found for pandas",
        ));

    let pip = workspace.pip_calls();
    assert_eq!(pip.len(), 2, "mapping must not be attempted: {pip:?}");
    assert!(!workspace.file_exists("launch.sh"));
}

#[test]
fn test_install_first_tier_failure_attempts_nothing_else() {
    let workspace = TestWorkspace::with_simple_manifest();

    workspace
        .cmd()
        .args(["install", "--mode", "global"])
        .env("FAKE_FAIL", "wheel")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Required tier 'tooling' failed"));

    assert_eq!(workspace.pip_calls().len(), 1);
}

#[test]
fn test_install_skip_mode_never_calls_pip() {
    let workspace = TestWorkspace::with_simple_manifest();

    workspace
        .cmd()
        .args(["install", "--mode", "skip"])
        .assert()
        .success()
        .stdout(predicate::str::contains("3 not attempted"));

    assert!(workspace.pip_calls().is_empty());
    assert!(!workspace.file_exists("venv"));
}

#[test]
fn test_install_global_mode_uses_base_interpreter() {
    let workspace = TestWorkspace::with_simple_manifest();

    workspace
        .cmd()
        .args(["install", "--mode", "global", "--no-launcher"])
        .assert()
        .success();

    assert!(!workspace.file_exists("venv"));
    let base = workspace.python.display().to_string();
    assert!(workspace.pip_calls().iter().all(|call| call.contains(&base)));
}

#[test]
fn test_install_venv_failure_falls_back_with_one_warning() {
    let workspace = TestWorkspace::with_simple_manifest();

    let output = workspace
        .cmd()
        .args(["install", "--mode", "isolated", "--no-launcher"])
        .env("FAKE_VENV_FAIL", "1")
        .output()
        .unwrap();

    assert!(output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert_eq!(stderr.matches("warning:").count(), 1, "stderr: {stderr}");
    assert!(stderr.contains("falling back to the global interpreter"));

    let base = workspace.python.display().to_string();
    let pip = workspace.pip_calls();
    assert_eq!(pip.len(), 3);
    assert!(pip.iter().all(|call| call.contains(&base)));
}

#[test]
fn test_install_writes_launcher() {
    let workspace = TestWorkspace::with_simple_manifest();

    workspace
        .cmd()
        .args(["install", "--mode", "skip"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Launcher written to"));

    let script = workspace.read_file("launch.sh");
    assert!(script.starts_with("#!/bin/sh"));
    assert!(script.contains("run --"));
    assert!(script.contains(&workspace.path.display().to_string()));

    use std::os::unix::fs::PermissionsExt;
    let mode = std::fs::metadata(workspace.path.join("launch.sh"))
        .unwrap()
        .permissions()
        .mode();
    assert_eq!(mode & 0o111, 0o111);
}

#[test]
fn test_install_no_launcher_flag() {
    let workspace = TestWorkspace::with_simple_manifest();

    workspace
        .cmd()
        .args(["install", "--mode", "skip", "--no-launcher"])
        .assert()
        .success();

    assert!(!workspace.file_exists("launch.sh"));
}

#[test]
fn test_install_json_report() {
    let workspace = TestWorkspace::with_simple_manifest();

    let output = workspace
        .cmd()
        .args(["install", "--mode", "global", "--json", "--no-launcher"])
        .env("FAKE_FAIL", "folium")
        .output()
        .unwrap();

    assert!(output.status.success());
    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["environment"]["mode"], "global");
    let results = report["results"].as_array().unwrap();
    assert_eq!(results.len(), 3);
    assert_eq!(results[0]["status"], "succeeded");
    assert_eq!(results[2]["status"], "failed");
    assert_eq!(results[2]["tier"]["name"], "mapping");
    assert_eq!(report["warnings"][0]["kind"], "optional_tier_failed");
}

#[test]
fn test_install_alternatives_first_success_wins() {
    let workspace = TestWorkspace::new();
    workspace.write_file(
        "envstrap.yaml",
        r"tiers:
  - name: database
    packages:
      - any: [psycopg2-binary, psycopg2]
",
    );

    workspace
        .cmd()
        .args(["install", "--mode", "global", "--no-launcher"])
        .env("FAKE_FAIL", "psycopg2-binary")
        .assert()
        .success()
        .stderr(predicate::str::contains("warning:").not());

    let pip = workspace.pip_calls();
    assert_eq!(pip.len(), 2);
    assert!(pip[0].ends_with("psycopg2-binary"));
    assert!(pip[1].ends_with("psycopg2"));
}

#[test]
fn test_install_alternatives_all_failing_warns() {
    let workspace = TestWorkspace::new();
    workspace.write_file(
        "envstrap.yaml",
        r"tiers:
  - name: database
    required: true
    packages:
      - any: [psycopg2-binary, psycopg2]
",
    );

    workspace
        .cmd()
        .args(["install", "--mode", "global", "--no-launcher"])
        .env("FAKE_FAIL", "psycopg2-binary psycopg2")
        .assert()
        .success()
        .stderr(predicate::str::contains(
            "none of psycopg2-binary | psycopg2 could be installed",
        ));
}

#[test]
fn test_install_retries_failed_optional_tier() {
    let workspace = TestWorkspace::new();
    workspace.write_file(
        "envstrap.yaml",
        r"retry_backoff_ms: 1
tiers:
  - name: mapping
    packages: [folium]
",
    );

    workspace
        .cmd()
        .args(["install", "--mode", "global", "--no-launcher", "--retries", "2"])
        .env("FAKE_FAIL", "folium")
        .assert()
        .success()
        .stdout(predicate::str::contains("(optional, 3 attempts)"));

    assert_eq!(workspace.pip_calls().len(), 3);
}

#[test]
fn test_install_appends_install_log() {
    let workspace = TestWorkspace::with_simple_manifest();

    workspace
        .cmd()
        .args(["install", "--mode", "global", "--no-launcher"])
        .assert()
        .success();

    let log = workspace.read_file("logs/install.log");
    assert!(log.contains("$ pip install requests pandas"));
    assert!(log.contains("Successfully installed"));
}

#[test]
fn test_install_quiet_prints_no_summary() {
    let workspace = TestWorkspace::with_simple_manifest();

    workspace
        .cmd()
        .args(["--quiet", "install", "--mode", "skip"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
}
