//! Interpreter and environment selection
//!
//! An [`EnvironmentHandle`] names the interpreter used for every package
//! installation and for the launch step. It is created once and passed
//! explicitly to everything that needs it.

pub mod interpreter;


use std::path::{Path, PathBuf};

use serde::Serialize;

pub use interpreter::{SystemToolchain, Toolchain, venv_interpreter};

use crate::error::Result;

/// How the environment for installation is provisioned
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum EnvironmentMode {
    /// Create (or reuse) a virtual environment inside the workspace
    Isolated,
    /// Install into the base interpreter's site packages
    Global,
    /// Install nothing
    Skip,
}

impl EnvironmentMode {
    pub const ALL: [EnvironmentMode; 3] = [
        EnvironmentMode::Isolated,
        EnvironmentMode::Global,
        EnvironmentMode::Skip,
    ];

    pub fn description(self) -> &'static str {
        match self {
            EnvironmentMode::Isolated => "Isolated virtual environment (recommended)",
            EnvironmentMode::Global => "Global interpreter",
            EnvironmentMode::Skip => "Skip package installation",
        }
    }
}

impl std::fmt::Display for EnvironmentMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            EnvironmentMode::Isolated => "isolated",
            EnvironmentMode::Global => "global",
            EnvironmentMode::Skip => "skip",
        };
        f.pad(name)
    }
}

/// The interpreter/environment chosen for this run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EnvironmentHandle {
    mode: EnvironmentMode,
    interpreter: PathBuf,
    #[serde(skip_serializing_if = "Option::is_none")]
    root: Option<PathBuf>,
}

impl EnvironmentHandle {
    pub fn isolated(root: impl Into<PathBuf>, interpreter: impl Into<PathBuf>) -> Self {
        Self {
            mode: EnvironmentMode::Isolated,
            interpreter: interpreter.into(),
            root: Some(root.into()),
        }
    }

    pub fn global(interpreter: impl Into<PathBuf>) -> Self {
        Self {
            mode: EnvironmentMode::Global,
            interpreter: interpreter.into(),
            root: None,
        }
    }

    pub fn skip(interpreter: impl Into<PathBuf>) -> Self {
        Self {
            mode: EnvironmentMode::Skip,
            interpreter: interpreter.into(),
            root: None,
        }
    }

    pub fn mode(&self) -> EnvironmentMode {
        self.mode
    }

    pub fn interpreter(&self) -> &Path {
        &self.interpreter
    }

    pub fn root(&self) -> Option<&Path> {
        self.root.as_deref()
    }

    /// Skip handles never invoke the package installer
    pub fn installs_packages(&self) -> bool {
        self.mode != EnvironmentMode::Skip
    }
}

impl std::fmt::Display for EnvironmentHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.root {
            Some(root) => write!(
                f,
                "{} environment at {} ({})",
                self.mode,
                root.display(),
                self.interpreter.display()
            ),
            None => write!(f, "{} interpreter {}", self.mode, self.interpreter.display()),
        }
    }
}

/// Pick the interpreter for launching: the workspace's isolated environment
/// when one exists, the base interpreter otherwise
pub fn select_for_launch(toolchain: &dyn Toolchain, venv_root: &Path) -> Result<EnvironmentHandle> {
    if let Some(interpreter) = toolchain.existing_isolated(venv_root) {
        tracing::debug!("launching with isolated environment {}", venv_root.display());
        return Ok(EnvironmentHandle::isolated(venv_root, interpreter));
    }
    let base = toolchain.locate_interpreter()?;
    tracing::debug!("launching with base interpreter {}", base.display());
    Ok(EnvironmentHandle::global(base))
}
