use std::ffi::OsString;

use clap::Parser;

/// Arguments for the run command
#[derive(Parser, Debug)]
#[command(after_help = "NOTE:\n  \
                  Options envstrap knows (-v, -q, -w, -c, --python) are taken by envstrap\n  \
                  unless they follow `--`. Always separate application arguments with `--`.\n\n\
                  EXAMPLES:\n  \
                  Launch the application:\n    envstrap run\n\n\
                  Forward arguments to the application:\n    envstrap run -- --export csv --verbose\n\n\
                  Launch without the pre-flight check:\n    envstrap run --no-preflight")]
pub struct RunArgs {
    /// Skip the pre-flight check
    #[arg(long)]
    pub no_preflight: bool,

    /// Arguments forwarded unchanged to the application (place them after `--`)
    #[arg(trailing_var_arg = true, allow_hyphen_values = true, value_name = "ARGS")]
    pub args: Vec<OsString>,
}
