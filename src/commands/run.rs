//! Run command: pre-flight, then the application

use crate::cli::RunArgs;
use crate::commands::GlobalOptions;
use crate::environment::select_for_launch;
use crate::error::Result;
use crate::launcher::LaunchSupervisor;
use crate::probe::InterpreterProbe;

/// Run the application and return its exit code
pub fn run(globals: &GlobalOptions, args: RunArgs) -> Result<i32> {
    let workspace = globals.open_workspace()?;
    let toolchain = globals.toolchain(&workspace);
    let env = select_for_launch(&toolchain, &workspace.venv_root())?;
    tracing::info!("launching with {}", env);

    let supervisor = LaunchSupervisor::new(&env, &workspace, &InterpreterProbe).quiet(globals.quiet);
    if args.no_preflight {
        supervisor.run_app(&args.args)
    } else {
        supervisor.launch(&args.args)
    }
}
