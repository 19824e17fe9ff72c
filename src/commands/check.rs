//! Check command: which declared packages can be imported

use serde::Serialize;

use crate::cli::CheckArgs;
use crate::commands::GlobalOptions;
use crate::environment::{EnvironmentHandle, select_for_launch};
use crate::error::{Result, probe as probe_error};
use crate::probe::{self, CapabilityStatus, InterpreterProbe};
use crate::ui::display;

#[derive(Serialize)]
struct CheckReport<'a> {
    environment: &'a EnvironmentHandle,
    packages: &'a [CapabilityStatus],
}

/// Run check command; fails when a required package is missing
pub fn run(globals: &GlobalOptions, args: CheckArgs) -> Result<()> {
    let workspace = globals.open_workspace()?;
    let toolchain = globals.toolchain(&workspace);
    let env = select_for_launch(&toolchain, &workspace.venv_root())?;

    let rows = probe::probe(&InterpreterProbe, &env, &workspace.manifest.tiers);

    if args.json {
        let report = CheckReport {
            environment: &env,
            packages: &rows,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("Environment: {env}");
        display::print_capabilities(&rows);
    }

    let missing = probe::missing_required(&rows);
    if missing.is_empty() {
        return Ok(());
    }
    let names: Vec<&str> = missing.iter().map(|r| r.package.as_str()).collect();
    Err(probe_error::required_missing(names.join(", ")))
}
