//! Common test utilities for envstrap integration tests
//!
//! Tests drive the real binary against a stand-in interpreter: a POSIX sh
//! script that understands `-m venv`, `-m pip install`, `-c "import x"` and
//! otherwise runs its first argument as a shell script. Its behaviour is
//! steered by environment variables:
//!
//! - `FAKE_LOG`: file receiving one line per venv/pip invocation
//! - `FAKE_FAIL`: space-separated requirements pip fails to install
//! - `FAKE_MISSING`: space-separated modules that fail to import
//! - `FAKE_VENV_FAIL`: when set, `-m venv` fails

#![allow(dead_code)]

use std::path::PathBuf;

use assert_cmd::Command;
use tempfile::TempDir;

const FAKE_PYTHON: &str = r#"#!/bin/sh
log() {
    if [ -n "$FAKE_LOG" ]; then
        echo "$*" >> "$FAKE_LOG"
    fi
}

case "$1" in
    -m)
        case "$2" in
            venv)
                if [ -n "$FAKE_VENV_FAIL" ]; then
                    echo "Error: ensurepip is not available" >&2
                    exit 1
                fi
                mkdir -p "$3/bin" && cp "$0" "$3/bin/python" && chmod +x "$3/bin/python"
                log "venv $3"
                exit 0
                ;;
            pip)
                shift 3
                log "pip $0 $*"
                for arg in "$@"; do
                    case "$arg" in
                        --*) continue ;;
                    esac
                    for bad in $FAKE_FAIL; do
                        if [ "$arg" = "$bad" ]; then
                            echo "ERROR: No matching distribution found for $arg" >&2
                            exit 1
                        fi
                    done
                done
                echo "Successfully installed $*"
                exit 0
                ;;
        esac
        ;;
    -c)
        module=$(echo "$2" | sed 's/^import //')
        for missing in $FAKE_MISSING; do
            if [ "$module" = "$missing" ]; then
                exit 1
            fi
        done
        exit 0
        ;;
esac

log "exec $0 $*"
exec sh "$@"
"#;

/// Two required and one optional tier, no pre-flight script
pub const SIMPLE_MANIFEST: &str = r"preflight: null
tiers:
  - name: tooling
    required: true
    upgrade: true
    packages: [pip, wheel]
  - name: core
    required: true
    packages: [requests, pandas]
  - name: mapping
    packages: [folium]
";

/// A test workspace for integration tests
pub struct TestWorkspace {
    /// Temporary directory
    pub temp: TempDir,
    /// Path to workspace root
    pub path: PathBuf,
    /// Stand-in interpreter, outside the workspace
    pub python: PathBuf,
    /// Invocation log written by the stand-in interpreter
    pub log: PathBuf,
    tools: TempDir,
}

impl TestWorkspace {
    /// Create a new test workspace with a stand-in interpreter
    pub fn new() -> Self {
        let temp = TempDir::new().expect("Failed to create temp directory");
        let path = temp.path().to_path_buf();
        let tools = TempDir::new().expect("Failed to create tools directory");
        let python = tools.path().join("python3");
        std::fs::write(&python, FAKE_PYTHON).expect("Failed to write fake interpreter");
        make_executable(&python);
        let log = tools.path().join("calls.log");
        Self {
            temp,
            path,
            python,
            log,
            tools,
        }
    }

    /// Create a workspace with [`SIMPLE_MANIFEST`]
    pub fn with_simple_manifest() -> Self {
        let workspace = Self::new();
        workspace.write_file("envstrap.yaml", SIMPLE_MANIFEST);
        workspace
    }

    /// Write a file in workspace
    pub fn write_file(&self, path: &str, content: &str) {
        let file_path = self.path.join(path);
        if let Some(parent) = file_path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent directory");
        }
        std::fs::write(&file_path, content).expect("Failed to write file");
    }

    /// Read a file from workspace
    pub fn read_file(&self, path: &str) -> String {
        let file_path = self.path.join(path);
        std::fs::read_to_string(&file_path).expect("Failed to read file")
    }

    /// Check if a file exists in workspace
    pub fn file_exists(&self, path: &str) -> bool {
        self.path.join(path).exists()
    }

    /// Lines logged by the stand-in interpreter so far
    pub fn calls(&self) -> Vec<String> {
        std::fs::read_to_string(&self.log)
            .map(|content| content.lines().map(str::to_string).collect())
            .unwrap_or_default()
    }

    /// pip invocations only
    pub fn pip_calls(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter(|line| line.starts_with("pip "))
            .collect()
    }

    /// envstrap command bound to this workspace and its stand-in interpreter
    pub fn cmd(&self) -> Command {
        let mut cmd = envstrap_cmd();
        cmd.arg("--workspace")
            .arg(&self.path)
            .arg("--python")
            .arg(&self.python)
            .env("FAKE_LOG", &self.log);
        cmd
    }
}

impl Default for TestWorkspace {
    fn default() -> Self {
        Self::new()
    }
}

/// envstrap binary with a clean environment
#[allow(deprecated)]
pub fn envstrap_cmd() -> Command {
    let mut cmd = Command::cargo_bin("envstrap").expect("envstrap binary");
    cmd.env_remove("ENVSTRAP_WORKSPACE")
        .env_remove("ENVSTRAP_PYTHON")
        .env_remove("ENVSTRAP_LOG")
        .env_remove("FAKE_FAIL")
        .env_remove("FAKE_MISSING")
        .env_remove("FAKE_VENV_FAIL");
    cmd
}

#[cfg(unix)]
fn make_executable(path: &std::path::Path) {
    use std::os::unix::fs::PermissionsExt;
    std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o755))
        .expect("Failed to make file executable");
}

#[cfg(not(unix))]
fn make_executable(_path: &std::path::Path) {}
