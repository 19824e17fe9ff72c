//! Base interpreter lookup and virtual environment creation

use std::path::{Path, PathBuf};
use std::process::Command;

use crate::error::{Result, environment};

/// Access to the interpreter installation on this machine
pub trait Toolchain {
    /// Locate the base interpreter; failure is fatal for every command
    fn locate_interpreter(&self) -> Result<PathBuf>;

    /// Create an isolated environment at `root` using `base`, returning the
    /// environment's interpreter or the reason creation failed
    fn create_isolated(&self, base: &Path, root: &Path) -> std::result::Result<PathBuf, String>;

    /// Interpreter of an already provisioned environment at `root`
    fn existing_isolated(&self, root: &Path) -> Option<PathBuf> {
        let interpreter = venv_interpreter(root);
        interpreter.is_file().then_some(interpreter)
    }
}

/// Path of the interpreter inside a virtual environment
pub fn venv_interpreter(root: &Path) -> PathBuf {
    if cfg!(windows) {
        root.join("Scripts").join("python.exe")
    } else {
        root.join("bin").join("python")
    }
}

/// Toolchain backed by the real PATH and `python -m venv`
#[derive(Debug, Clone)]
pub struct SystemToolchain {
    explicit: Option<PathBuf>,
    candidates: Vec<String>,
}

impl SystemToolchain {
    pub fn new(explicit: Option<PathBuf>, candidates: Vec<String>) -> Self {
        Self {
            explicit,
            candidates,
        }
    }
}

impl Toolchain for SystemToolchain {
    fn locate_interpreter(&self) -> Result<PathBuf> {
        if let Some(explicit) = &self.explicit {
            return which::which(explicit)
                .map_err(|_| environment::interpreter_not_found(explicit.display().to_string()));
        }

        for candidate in &self.candidates {
            if let Ok(path) = which::which(candidate) {
                tracing::debug!("found interpreter {} for '{}'", path.display(), candidate);
                return Ok(path);
            }
        }

        Err(environment::interpreter_not_found(self.candidates.join(", ")))
    }

    fn create_isolated(&self, base: &Path, root: &Path) -> std::result::Result<PathBuf, String> {
        tracing::info!("creating virtual environment at {}", root.display());
        let output = Command::new(base)
            .args(["-m", "venv"])
            .arg(root)
            .output()
            .map_err(|e| format!("failed to run {}: {e}", base.display()))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            return Err(if stderr.is_empty() {
                format!("venv exited with {}", output.status)
            } else {
                stderr
            });
        }

        self.existing_isolated(root).ok_or_else(|| {
            format!(
                "no interpreter found in the new environment (expected {})",
                venv_interpreter(root).display()
            )
        })
    }
}
