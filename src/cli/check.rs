use clap::Parser;

/// Arguments for the check command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Show package availability:\n    envstrap check\n\n\
                  Machine-readable output:\n    envstrap check --json")]
pub struct CheckArgs {
    /// Print the status rows as JSON
    #[arg(long)]
    pub json: bool,
}
