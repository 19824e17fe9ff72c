//! Command implementations for the envstrap CLI

pub mod check;
pub mod completions;
pub mod init;
pub mod install;
pub mod menu;
pub mod run;
pub mod version;

use std::path::PathBuf;

use crate::cli::Cli;
use crate::environment::SystemToolchain;
use crate::error::Result;
use crate::workspace::Workspace;

/// Options shared by every workspace command
#[derive(Debug, Clone, Default)]
pub struct GlobalOptions {
    pub workspace: Option<PathBuf>,
    pub config: Option<PathBuf>,
    pub python: Option<PathBuf>,
    pub quiet: bool,
}

impl GlobalOptions {
    pub fn from_cli(cli: &Cli) -> Self {
        Self {
            workspace: cli.workspace.clone(),
            config: cli.config.clone(),
            python: cli.python.clone(),
            quiet: cli.quiet,
        }
    }

    pub fn open_workspace(&self) -> Result<Workspace> {
        Workspace::open(self.workspace.clone(), self.config.as_deref())
    }

    /// Toolchain honouring `--python`, falling back to the manifest's
    /// interpreter names
    pub fn toolchain(&self, workspace: &Workspace) -> SystemToolchain {
        SystemToolchain::new(
            self.python.clone(),
            workspace.manifest.interpreters.clone(),
        )
    }
}
