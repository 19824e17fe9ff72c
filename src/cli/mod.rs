//! CLI definitions using clap derive API
//!
//! This module is organized into submodules for each command's argument types:
//! - install: Install command arguments
//! - run: Run command arguments
//! - check: Check command arguments
//! - completions: Completions command arguments

use clap::builder::{Styles, styling::AnsiColor};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

pub mod check;
pub mod completions;
pub mod install;
pub mod run;

pub use check::CheckArgs;
pub use completions::CompletionsArgs;
pub use install::InstallArgs;
pub use run::RunArgs;

/// envstrap - tiered environment bootstrapper
///
/// Provision an interpreter environment tier by tier, then launch the application.
#[derive(Parser, Debug)]
#[command(
    name = "envstrap",
    author,
    version,
    color = clap::ColorChoice::Auto,
    styles = Styles::styled()
        .header(AnsiColor::Green.on_default().bold())
        .usage(AnsiColor::Green.on_default().bold())
        .literal(AnsiColor::Cyan.on_default().bold())
        .placeholder(AnsiColor::Cyan.on_default()),
    about = "Tiered environment bootstrapper and launcher for interpreter-hosted applications",
    long_about = "envstrap provisions an application's runtime environment from declared dependency \
                  tiers (required tiers must install, optional tiers may fail with a warning) and \
                  launches the application with its error stream captured to a log file.",
    after_help = "\x1b[1m\x1b[32mExamples:\x1b[0m\n   \
                  envstrap install                  \x1b[90m# Prompt for environment mode and install tiers\x1b[0m\n   \
                  envstrap install --mode isolated  \x1b[90m# Use a virtual environment in ./venv\x1b[0m\n   \
                  envstrap run -- --city Paris      \x1b[90m# Launch main.py with arguments\x1b[0m\n   \
                  envstrap check                    \x1b[90m# Show which packages are available\x1b[0m\n\n\
                  "
)]
pub struct Cli {
    /// Workspace directory (defaults to current directory)
    #[arg(long, short = 'w', global = true, env = "ENVSTRAP_WORKSPACE")]
    pub workspace: Option<PathBuf>,

    /// Manifest file (defaults to <workspace>/envstrap.yaml, built-in tiers if absent)
    #[arg(long, short = 'c', global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Base interpreter to use instead of searching PATH
    #[arg(long, global = true, env = "ENVSTRAP_PYTHON", value_name = "PATH")]
    pub python: Option<PathBuf>,

    /// Enable verbose output
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    /// Only print warnings and errors
    #[arg(long, short = 'q', global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create working directories, install dependency tiers and write the launcher
    Install(InstallArgs),

    /// Run the pre-flight check, then the application (`envstrap run -- ARGS`)
    Run(RunArgs),

    /// Show which declared packages the interpreter can import
    Check(CheckArgs),

    /// Create working directories and a default envstrap.yaml
    Init,

    /// Show version information
    #[command(hide = true)]
    Version,

    /// Generate shell completions
    Completions(CompletionsArgs),
}
