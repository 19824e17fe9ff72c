//! envstrap - tiered environment bootstrapper
//!
//! Provisions an interpreter environment for an application from declared
//! dependency tiers, then launches the application with its error stream
//! captured to a log file.

use clap::Parser;
use miette::Diagnostic;

mod bootstrap;
mod cli;
mod commands;
mod config;
mod environment;
mod error;
mod installer;
mod launcher;
mod logging;
mod probe;
mod ui;
mod workspace;

#[cfg(test)]
mod test_fixtures;

use cli::{Cli, Commands};
use commands::GlobalOptions;
use error::Result;

fn dispatch(cli: Cli) -> Result<i32> {
    let globals = GlobalOptions::from_cli(&cli);
    match cli.command {
        Commands::Install(args) => commands::install::run(&globals, args).map(|()| 0),
        Commands::Run(args) => commands::run::run(&globals, args),
        Commands::Check(args) => commands::check::run(&globals, args).map(|()| 0),
        Commands::Init => commands::init::run(&globals).map(|()| 0),
        Commands::Version => commands::version::run().map(|()| 0),
        Commands::Completions(args) => commands::completions::run(args).map(|()| 0),
    }
}

fn main() {
    let cli = Cli::parse();

    let logs_dir = cli
        .workspace
        .clone()
        .or_else(|| std::env::current_dir().ok())
        .map(|root| root.join("logs"));
    logging::init_tracing(cli.verbose, logs_dir.as_deref());

    match dispatch(cli) {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            eprintln!("Error: {}", e);
            if let Some(help) = e.help() {
                eprintln!("  help: {}", help);
            }
            std::process::exit(1);
        }
    }
}
