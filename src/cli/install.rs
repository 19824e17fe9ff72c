use clap::Parser;

use crate::environment::EnvironmentMode;

/// Arguments for the install command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                   Choose the environment interactively:\n    envstrap install\n\n\
                   Install into a virtual environment:\n    envstrap install --mode isolated\n\n\
                   Install into the global interpreter:\n    envstrap install --mode global\n\n\
                   Only create directories and the launcher:\n    envstrap install --mode skip\n\n\
                   Machine-readable report:\n    envstrap install --mode isolated --json")]
pub struct InstallArgs {
    /// Environment mode; prompts when omitted on a terminal, isolated otherwise
    #[arg(long, short = 'm', value_enum)]
    pub mode: Option<EnvironmentMode>,

    /// Print the bootstrap report as JSON
    #[arg(long)]
    pub json: bool,

    /// Do not write the launch script
    #[arg(long)]
    pub no_launcher: bool,

    /// Extra attempts per failed install (overrides the manifest)
    #[arg(long, value_name = "N")]
    pub retries: Option<u32>,
}
