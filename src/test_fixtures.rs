//! Test fixtures and doubles shared by unit tests.
//!
//! The bootstrapper talks to the outside world through three seams:
//! [`Toolchain`], [`PackageInstaller`] and [`ModuleProbe`]. The doubles here
//! record every call so tests can assert on ordering and attempt counts
//! without spawning a real interpreter.
//!
//! # Usage
//!
//! ```ignore
//! use crate::test_fixtures::{FakeToolchain, RecordingInstaller};
//!
//! let toolchain = FakeToolchain::new();
//! let installer = RecordingInstaller::failing(&["scikit-learn"]);
//! let report = Bootstrapper::new(&toolchain, &installer, venv).bootstrap(&tiers, mode)?;
//! assert_eq!(installer.calls().len(), 2);
//! ```

#![allow(clippy::expect_used)]

use std::cell::{Cell, RefCell};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

use crate::environment::{EnvironmentHandle, Toolchain, venv_interpreter};
use crate::error::{Result, environment};
use crate::installer::{InstallFailure, PackageInstaller};
use crate::probe::ModuleProbe;

pub const FAKE_PYTHON: &str = "/opt/fake/bin/python3";

/// Create a temp directory in the system temp location.
///
/// # Panics
///
/// Panics if the temp directory cannot be created.
#[must_use]
pub fn create_temp_dir() -> TempDir {
    TempDir::new().expect("Failed to create temp directory")
}

/// Create files under `root`; paths are relative to it.
///
/// # Panics
///
/// Panics if any file cannot be created.
pub fn create_test_files(root: &Path, files: &[(&str, &str)]) {
    for (path, content) in files {
        let full_path = root.join(path);
        if let Some(parent) = full_path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent directory");
        }
        std::fs::write(&full_path, content).expect("Failed to write test file");
    }
}

/// Toolchain double: configurable interpreter presence and venv outcome
pub struct FakeToolchain {
    interpreter: Option<PathBuf>,
    venv_error: Option<String>,
    existing: Option<PathBuf>,
    created: Cell<u32>,
}

impl FakeToolchain {
    pub fn new() -> Self {
        Self {
            interpreter: Some(PathBuf::from(FAKE_PYTHON)),
            venv_error: None,
            existing: None,
            created: Cell::new(0),
        }
    }

    pub fn without_interpreter() -> Self {
        Self {
            interpreter: None,
            ..Self::new()
        }
    }

    pub fn failing_venv(reason: &str) -> Self {
        Self {
            venv_error: Some(reason.to_string()),
            ..Self::new()
        }
    }

    pub fn with_existing_venv(interpreter: &Path) -> Self {
        Self {
            existing: Some(interpreter.to_path_buf()),
            ..Self::new()
        }
    }

    /// Number of `create_isolated` calls
    pub fn created(&self) -> u32 {
        self.created.get()
    }
}

impl Toolchain for FakeToolchain {
    fn locate_interpreter(&self) -> Result<PathBuf> {
        self.interpreter
            .clone()
            .ok_or_else(|| environment::interpreter_not_found("python3, python"))
    }

    fn create_isolated(&self, _base: &Path, root: &Path) -> std::result::Result<PathBuf, String> {
        self.created.set(self.created.get() + 1);
        match &self.venv_error {
            Some(reason) => Err(reason.clone()),
            None => Ok(venv_interpreter(root)),
        }
    }

    fn existing_isolated(&self, _root: &Path) -> Option<PathBuf> {
        self.existing.clone()
    }
}

/// Installer double recording every invocation
///
/// A call fails when any of its packages is in the failing set. Calls can
/// also be made to fail a fixed number of times before succeeding.
pub struct RecordingInstaller {
    failing: HashSet<String>,
    transient_failures: Cell<u32>,
    calls: RefCell<Vec<Vec<String>>>,
}

impl RecordingInstaller {
    pub fn new() -> Self {
        Self::failing(&[])
    }

    pub fn failing(packages: &[&str]) -> Self {
        Self {
            failing: packages.iter().map(ToString::to_string).collect(),
            transient_failures: Cell::new(0),
            calls: RefCell::new(Vec::new()),
        }
    }

    pub fn flaky(failures: u32) -> Self {
        let installer = Self::new();
        installer.transient_failures.set(failures);
        installer
    }

    pub fn calls(&self) -> Vec<Vec<String>> {
        self.calls.borrow().clone()
    }
}

impl PackageInstaller for RecordingInstaller {
    fn install(
        &self,
        _env: &EnvironmentHandle,
        packages: &[String],
        _upgrade: bool,
    ) -> std::result::Result<(), InstallFailure> {
        self.calls.borrow_mut().push(packages.to_vec());

        let remaining = self.transient_failures.get();
        if remaining > 0 {
            self.transient_failures.set(remaining - 1);
            return Err(InstallFailure::new("Connection reset by peer"));
        }

        match packages.iter().find(|p| self.failing.contains(*p)) {
            Some(package) => Err(InstallFailure::new(format!(
                "ERROR: No matching distribution found for {package}"
            ))),
            None => Ok(()),
        }
    }
}

/// Module probe double: everything imports except the listed modules
pub struct FakeProbe {
    missing: HashSet<String>,
}

impl FakeProbe {
    pub fn with_missing(modules: &[&str]) -> Self {
        Self {
            missing: modules.iter().map(ToString::to_string).collect(),
        }
    }
}

impl ModuleProbe for FakeProbe {
    fn is_importable(&self, _interpreter: &Path, module: &str) -> bool {
        !self.missing.contains(module)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_test_files() {
        let temp = create_temp_dir();
        create_test_files(temp.path(), &[("logs/a.log", "x"), ("main.py", "print()")]);
        assert!(temp.path().join("logs/a.log").exists());
        assert!(temp.path().join("main.py").exists());
    }

    #[test]
    fn test_recording_installer_fails_listed_packages() {
        let installer = RecordingInstaller::failing(&["bad"]);
        let env = EnvironmentHandle::global(FAKE_PYTHON);

        assert!(installer.install(&env, &["good".to_string()], false).is_ok());
        assert!(
            installer
                .install(&env, &["good".to_string(), "bad".to_string()], false)
                .is_err()
        );
        assert_eq!(installer.calls().len(), 2);
    }

    #[test]
    fn test_flaky_installer_recovers() {
        let installer = RecordingInstaller::flaky(1);
        let env = EnvironmentHandle::global(FAKE_PYTHON);

        assert!(installer.install(&env, &["x".to_string()], false).is_err());
        assert!(installer.install(&env, &["x".to_string()], false).is_ok());
    }
}
