//! Bootstrap report and operator warnings

use serde::Serialize;

use crate::environment::EnvironmentHandle;
use crate::error::{Result, install};
use crate::installer::InstallResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WarningKind {
    /// Isolated environment could not be created; global interpreter used
    EnvironmentFallback,
    /// An optional tier failed to install
    OptionalTierFailed,
    /// Every alternative of a package group failed
    AlternativesUnsatisfied,
    /// Configured pre-flight script is missing; built-in probe used
    PreflightMissing,
    /// The application's error log could not be read back
    ErrorLogUnreadable,
}

/// A tolerated failure surfaced to the operator
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Warning {
    pub kind: WarningKind,
    pub message: String,
}

impl Warning {
    pub fn new(kind: WarningKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Everything a bootstrap run produced, in tier order
#[derive(Debug, Clone, Serialize)]
pub struct BootstrapReport {
    environment: EnvironmentHandle,
    results: Vec<InstallResult>,
    warnings: Vec<Warning>,
}

impl BootstrapReport {
    pub(crate) fn new(
        environment: EnvironmentHandle,
        results: Vec<InstallResult>,
        warnings: Vec<Warning>,
    ) -> Self {
        Self {
            environment,
            results,
            warnings,
        }
    }

    pub fn environment(&self) -> &EnvironmentHandle {
        &self.environment
    }

    pub fn results(&self) -> &[InstallResult] {
        &self.results
    }

    pub fn warnings(&self) -> &[Warning] {
        &self.warnings
    }

    /// The required tier that stopped the run, if any
    pub fn failed_required(&self) -> Option<&InstallResult> {
        self.results
            .iter()
            .find(|r| r.is_failed() && r.tier().required)
    }

    /// False iff a required tier failed
    pub fn is_success(&self) -> bool {
        self.failed_required().is_none()
    }

    /// Turn a failed run into the fatal error carrying the captured output
    pub fn ensure_success(&self) -> Result<()> {
        match self.failed_required() {
            Some(result) => Err(install::required_tier_failed(
                result.tier().name.clone(),
                result.error_output().unwrap_or_default(),
            )),
            None => Ok(()),
        }
    }
}
