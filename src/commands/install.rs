//! Install command: working directories, tier bootstrap, launcher

use std::time::Duration;

use crate::bootstrap::{Bootstrapper, RetryPolicy};
use crate::cli::InstallArgs;
use crate::commands::{GlobalOptions, menu};
use crate::environment::EnvironmentMode;
use crate::error::{Result, fs as fs_error};
use crate::installer::PipInstaller;
use crate::ui::display;
use crate::ui::{InteractiveProgressReporter, ProgressReporter, QuietProgressReporter};
use crate::workspace::{INSTALL_LOG, Workspace, write_launcher};

/// Run install command
pub fn run(globals: &GlobalOptions, args: InstallArgs) -> Result<()> {
    let workspace = globals.open_workspace()?;
    let interactive = !args.json && !globals.quiet && console::user_attended();

    for dir in workspace.ensure_directories()? {
        tracing::info!("created {}", dir.display());
    }

    let mode = select_mode(args.mode, interactive)?;
    tracing::info!("environment mode: {}", mode);

    let toolchain = globals.toolchain(&workspace);
    let installer = PipInstaller::new().with_log(workspace.logs_dir().join(INSTALL_LOG));
    let reporter: Box<dyn ProgressReporter> = if interactive {
        Box::new(InteractiveProgressReporter::new(
            workspace.manifest.tiers.len() as u64,
        ))
    } else {
        Box::new(QuietProgressReporter)
    };

    let report = Bootstrapper::new(&toolchain, &installer, workspace.venv_root())
        .with_retry(retry_policy(&workspace, args.retries))
        .with_reporter(reporter)
        .bootstrap(&workspace.manifest.tiers, mode)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else if !globals.quiet {
        display::print_summary(&report);
    }

    if let Some(failed) = report.failed_required() {
        display::print_failure_output(&failed.tier().name, failed.error_output().unwrap_or_default());
        return report.ensure_success();
    }

    if !args.no_launcher {
        let exe = std::env::current_exe()
            .map_err(|e| fs_error::io_error(format!("Failed to locate envstrap executable: {e}")))?;
        let launcher = write_launcher(&workspace.root, &exe)?;
        if !args.json && !globals.quiet {
            println!("Launcher written to {}", launcher.display());
        }
    }

    Ok(())
}

/// `--mode` wins; otherwise prompt on a terminal, else isolated
fn select_mode(flag: Option<EnvironmentMode>, interactive: bool) -> Result<EnvironmentMode> {
    match flag {
        Some(mode) => Ok(mode),
        None if interactive => menu::select_mode(),
        None => Ok(EnvironmentMode::Isolated),
    }
}

fn retry_policy(workspace: &Workspace, flag: Option<u32>) -> RetryPolicy {
    RetryPolicy::new(
        flag.unwrap_or(workspace.manifest.retries),
        Duration::from_millis(workspace.manifest.retry_backoff_ms),
    )
}
