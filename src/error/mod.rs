//! Error types and handling for envstrap
//!
//! Uses `thiserror` for error definitions and `miette` for pretty diagnostics.
//!
//! This module is organized into sub-modules by error domain:
//! - [`config`]: Manifest errors
//! - [`environment`]: Interpreter and environment errors
//! - [`install`]: Tier installation errors
//! - [`launch`]: Pre-flight and launch errors
//! - [`probe`]: Capability check errors
//! - [`fs`]: File system errors

pub mod config;
pub mod environment;
pub mod fs;
pub mod install;
pub mod launch;
pub mod probe;


use miette::Diagnostic;
use thiserror::Error;

/// Generates one constructor function per error variant so call sites can
/// write `config::invalid("...")` instead of spelling out the struct.
macro_rules! impl_error_constructors {
    ($($variant:ident as $fn_name:ident($($field:ident),* $(,)?)),+ $(,)?) => {
        $(
            pub fn $fn_name($($field: impl Into<String>),*) -> $crate::error::EnvstrapError {
                $crate::error::EnvstrapError::$variant {
                    $($field: $field.into()),*
                }
            }
        )+
    };
}

pub(crate) use impl_error_constructors;

/// Main error type for envstrap operations
#[derive(Error, Diagnostic, Debug)]
pub enum EnvstrapError {
    // Environment errors
    #[error("No usable interpreter found (tried: {candidates})")]
    #[diagnostic(
        code(envstrap::environment::interpreter_not_found),
        help("Install Python and make sure it is on PATH, or point ENVSTRAP_PYTHON / --python at it")
    )]
    InterpreterNotFound { candidates: String },

    // Install errors
    #[error("Required tier '{tier}' failed to install")]
    #[diagnostic(
        code(envstrap::install::required_tier_failed),
        help("Fix the error above and re-run 'envstrap install'; the application was not launched")
    )]
    RequiredTierFailed { tier: String, output: String },

    // Probe errors
    #[error("Required packages are not importable: {packages}")]
    #[diagnostic(
        code(envstrap::probe::required_missing),
        help("Run 'envstrap install' to install the required tiers")
    )]
    RequiredPackagesMissing { packages: String },

    // Launch errors
    #[error("Pre-flight check failed: {reason}")]
    #[diagnostic(
        code(envstrap::launch::preflight_failed),
        help("Run 'envstrap install' to provision missing dependencies")
    )]
    PreflightFailed { reason: String },

    #[error("Application entry point not found: {path}")]
    #[diagnostic(
        code(envstrap::launch::app_not_found),
        help("Set 'app' in envstrap.yaml to the main script of your application")
    )]
    AppNotFound { path: String },

    #[error("Failed to launch {program}: {reason}")]
    #[diagnostic(code(envstrap::launch::spawn_failed))]
    LaunchFailed { program: String, reason: String },

    // Configuration errors
    #[error("Configuration file not found: {path}")]
    #[diagnostic(code(envstrap::config::not_found))]
    ConfigNotFound { path: String },

    #[error("Failed to parse configuration file: {path}: {reason}")]
    #[diagnostic(code(envstrap::config::parse_failed))]
    ConfigParseFailed { path: String, reason: String },

    #[error("Invalid configuration: {message}")]
    #[diagnostic(code(envstrap::config::invalid))]
    ConfigInvalid { message: String },

    // File system errors
    #[error("Failed to read file: {path}: {reason}")]
    #[diagnostic(code(envstrap::fs::read_failed))]
    FileReadFailed { path: String, reason: String },

    #[error("Failed to write file: {path}: {reason}")]
    #[diagnostic(code(envstrap::fs::write_failed))]
    FileWriteFailed { path: String, reason: String },

    #[error("Failed to create directory: {path}: {reason}")]
    #[diagnostic(code(envstrap::fs::create_dir_failed))]
    CreateDirFailed { path: String, reason: String },

    #[error("IO error: {message}")]
    #[diagnostic(code(envstrap::fs::io_error))]
    IoError { message: String },

    // Prompt errors
    #[error("Prompt failed: {message}")]
    #[diagnostic(
        code(envstrap::prompt::failed),
        help("Pass --mode explicitly when running without a terminal")
    )]
    PromptFailed { message: String },
}

impl From<std::io::Error> for EnvstrapError {
    fn from(err: std::io::Error) -> Self {
        EnvstrapError::IoError {
            message: err.to_string(),
        }
    }
}

impl From<serde_yaml::Error> for EnvstrapError {
    fn from(err: serde_yaml::Error) -> Self {
        EnvstrapError::ConfigParseFailed {
            path: "unknown".to_string(),
            reason: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for EnvstrapError {
    fn from(err: serde_json::Error) -> Self {
        EnvstrapError::IoError {
            message: format!("Failed to serialize report: {err}"),
        }
    }
}

impl From<inquire::InquireError> for EnvstrapError {
    fn from(err: inquire::InquireError) -> Self {
        EnvstrapError::PromptFailed {
            message: err.to_string(),
        }
    }
}

/// Result type alias using miette for error handling
pub type Result<T> = miette::Result<T, EnvstrapError>;
