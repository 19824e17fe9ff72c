//! Tracing initialisation
//!
//! Operator-facing output is printed by the UI layer, so the stderr layer
//! stays at `error` unless `--verbose` or `ENVSTRAP_LOG` asks for more. When
//! the workspace has a `logs/` directory, `info` and above is also appended
//! to `logs/envstrap.log`.

use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, fmt};

/// Environment variable overriding the stderr filter
pub const LOG_ENV: &str = "ENVSTRAP_LOG";

/// Log file name inside the workspace `logs/` directory
pub const LOG_FILE: &str = "envstrap.log";

fn stderr_filter(verbose: bool) -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new(if verbose { "debug" } else { "error" }))
}

/// Initialise the global subscriber; later calls are ignored
pub fn init_tracing(verbose: bool, logs_dir: Option<&Path>) {
    let stderr_layer = fmt::layer()
        .with_target(false)
        .with_writer(std::io::stderr)
        .with_filter(stderr_filter(verbose));

    let file_layer = logs_dir
        .filter(|dir| dir.is_dir())
        .and_then(|dir| {
            OpenOptions::new()
                .create(true)
                .append(true)
                .open(dir.join(LOG_FILE))
                .ok()
        })
        .map(|file| {
            fmt::layer()
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .with_filter(EnvFilter::new("info"))
        });

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(file_layer)
        .try_init()
        .ok();
}
