//! Launch supervisor
//!
//! Runs the pre-flight check and then the application as one blocking child
//! process. The child's stderr goes to the error log, which is shown to the
//! operator when the child exits non-zero. No retries, no timeout.

use std::ffi::OsString;
use std::fs::{self, File};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use crate::bootstrap::{Warning, WarningKind};
use crate::environment::{EnvironmentHandle, EnvironmentMode};
use crate::error::{Result, fs as fs_error, launch};
use crate::probe::{self, ModuleProbe};
use crate::ui::display;
use crate::workspace::Workspace;

/// What runs before the application
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Preflight {
    /// A script executed with the selected interpreter
    Script(PathBuf),
    /// The capability probe over the manifest's tiers
    Builtin,
}

/// Exit code of a child that reported none (e.g. killed by a signal)
const SIGNALLED_EXIT_CODE: i32 = 1;

pub struct LaunchSupervisor<'a> {
    env: &'a EnvironmentHandle,
    workspace: &'a Workspace,
    prober: &'a dyn ModuleProbe,
    show_status: bool,
}

impl<'a> LaunchSupervisor<'a> {
    pub fn new(
        env: &'a EnvironmentHandle,
        workspace: &'a Workspace,
        prober: &'a dyn ModuleProbe,
    ) -> Self {
        Self {
            env,
            workspace,
            prober,
            show_status: true,
        }
    }

    /// Suppress the capability table of the built-in pre-flight
    #[must_use]
    pub fn quiet(mut self, quiet: bool) -> Self {
        self.show_status = !quiet;
        self
    }

    /// Decide which pre-flight runs; a configured but missing script is
    /// replaced by the built-in probe with a warning
    pub fn preflight_plan(&self) -> Preflight {
        match self.workspace.preflight() {
            Some(script) if script.is_file() => Preflight::Script(script),
            Some(script) => {
                let warning = Warning::new(
                    WarningKind::PreflightMissing,
                    format!(
                        "pre-flight script {} not found; running built-in capability check",
                        script.display()
                    ),
                );
                tracing::warn!("{}", warning.message);
                display::print_warning(&warning);
                Preflight::Builtin
            }
            None => Preflight::Builtin,
        }
    }

    /// Run the pre-flight check; any failure aborts the launch
    pub fn run_preflight(&self) -> Result<()> {
        match self.preflight_plan() {
            Preflight::Script(script) => {
                tracing::info!("running pre-flight {}", script.display());
                let status = self
                    .command()
                    .arg(&script)
                    .status()
                    .map_err(|e| {
                        launch::launch_failed(script.display().to_string(), e.to_string())
                    })?;
                if status.success() {
                    Ok(())
                } else {
                    Err(launch::preflight_failed(format!(
                        "{} exited with code {}",
                        script.display(),
                        status.code().unwrap_or(SIGNALLED_EXIT_CODE)
                    )))
                }
            }
            Preflight::Builtin => {
                let rows = probe::probe(self.prober, self.env, &self.workspace.manifest.tiers);
                if self.show_status {
                    display::print_capabilities(&rows);
                }
                let missing = probe::missing_required(&rows);
                if missing.is_empty() {
                    Ok(())
                } else {
                    let names: Vec<&str> = missing.iter().map(|r| r.package.as_str()).collect();
                    Err(launch::preflight_failed(format!(
                        "required packages are not importable: {}",
                        names.join(", ")
                    )))
                }
            }
        }
    }

    /// Run the application with `args`, returning its exit code
    ///
    /// stderr is written to the error log (truncated per run); on a non-zero
    /// exit the whole log is printed.
    pub fn run_app(&self, args: &[OsString]) -> Result<i32> {
        let app = self.workspace.app();
        if !app.is_file() {
            return Err(launch::app_not_found(app.display().to_string()));
        }

        let log_path = self.workspace.error_log();
        let log = open_log(&log_path)?;

        tracing::info!("launching {} with {}", app.display(), self.env.interpreter().display());
        let status = self
            .command()
            .arg(&app)
            .args(args)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::from(log))
            .status()
            .map_err(|e| launch::launch_failed(app.display().to_string(), e.to_string()))?;

        let code = status.code().unwrap_or(SIGNALLED_EXIT_CODE);
        if code != 0 {
            tracing::warn!("{} exited with code {}", app.display(), code);
            show_error_log(&log_path);
        }
        Ok(code)
    }

    /// Child command for the selected interpreter; isolated environments
    /// get `VIRTUAL_ENV` set
    fn command(&self) -> Command {
        let mut command = Command::new(self.env.interpreter());
        command.current_dir(&self.workspace.root);
        if self.env.mode() == EnvironmentMode::Isolated {
            if let Some(root) = self.env.root() {
                command.env("VIRTUAL_ENV", root);
            }
        }
        command
    }

    /// Pre-flight, then the application
    pub fn launch(&self, args: &[OsString]) -> Result<i32> {
        self.run_preflight()?;
        self.run_app(args)
    }
}

/// Print the error log; an unreadable log is warned about and never masks
/// the child's exit code
fn show_error_log(log_path: &Path) {
    match fs::read(log_path) {
        Ok(bytes) => display::print_error_log(log_path, &String::from_utf8_lossy(&bytes)),
        Err(e) => {
            let warning = Warning::new(
                WarningKind::ErrorLogUnreadable,
                format!("could not read error log {}: {}", log_path.display(), e),
            );
            tracing::warn!("{}", warning.message);
            display::print_warning(&warning);
        }
    }
}

fn open_log(path: &Path) -> Result<File> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| {
            fs_error::create_dir_failed(parent.display().to_string(), e.to_string())
        })?;
    }
    File::create(path).map_err(|e| fs_error::write_failed(path.display().to_string(), e.to_string()))
}
