//! Tiered environment bootstrap
//!
//! The bootstrap process:
//! 1. Resolve the interpreter and environment (isolated, global or skip)
//! 2. Install each tier in declaration order
//! 3. Stop at the first failed required tier; warn and continue past failed
//!    optional tiers
//! 4. Hand back a [`BootstrapReport`] so the caller can proceed or abort
//!
//! Tiers are installed strictly one after another because later tiers may
//! need what earlier ones installed (e.g. upgraded build tooling).

mod report;


use std::path::PathBuf;
use std::thread;
use std::time::Duration;

pub use report::{BootstrapReport, Warning, WarningKind};

use crate::config::DependencyTier;
use crate::environment::{EnvironmentHandle, EnvironmentMode, Toolchain};
use crate::error::Result;
use crate::installer::{InstallFailure, InstallResult, PackageInstaller};
use crate::ui::{ProgressReporter, QuietProgressReporter};

/// Extra attempts per installer invocation, with linear backoff
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RetryPolicy {
    pub retries: u32,
    pub backoff: Duration,
}

impl RetryPolicy {
    pub fn new(retries: u32, backoff: Duration) -> Self {
        Self { retries, backoff }
    }
}

/// Orchestrates environment resolution and tier installation
pub struct Bootstrapper<'a> {
    toolchain: &'a dyn Toolchain,
    installer: &'a dyn PackageInstaller,
    venv_root: PathBuf,
    retry: RetryPolicy,
    reporter: Box<dyn ProgressReporter + 'a>,
    warnings: Vec<Warning>,
}

impl<'a> Bootstrapper<'a> {
    pub fn new(
        toolchain: &'a dyn Toolchain,
        installer: &'a dyn PackageInstaller,
        venv_root: impl Into<PathBuf>,
    ) -> Self {
        Self {
            toolchain,
            installer,
            venv_root: venv_root.into(),
            retry: RetryPolicy::default(),
            reporter: Box::new(QuietProgressReporter),
            warnings: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    #[must_use]
    pub fn with_reporter(mut self, reporter: Box<dyn ProgressReporter + 'a>) -> Self {
        self.reporter = reporter;
        self
    }

    /// Warnings emitted so far
    #[cfg(test)]
    pub fn warnings(&self) -> &[Warning] {
        &self.warnings
    }

    fn warn(&mut self, kind: WarningKind, message: String) {
        tracing::warn!("{}", message);
        let warning = Warning::new(kind, message);
        self.reporter.warn(&warning);
        self.warnings.push(warning);
    }

    /// Locate the interpreter and provision the environment for `mode`
    ///
    /// A missing base interpreter is the only error. When an isolated
    /// environment cannot be created, one warning is emitted and the handle
    /// `global` would have produced is returned.
    pub fn resolve_environment(&mut self, mode: EnvironmentMode) -> Result<EnvironmentHandle> {
        let base = self.toolchain.locate_interpreter()?;
        tracing::info!("base interpreter: {}", base.display());

        match mode {
            EnvironmentMode::Global => Ok(EnvironmentHandle::global(base)),
            EnvironmentMode::Skip => Ok(EnvironmentHandle::skip(base)),
            EnvironmentMode::Isolated => {
                if let Some(interpreter) = self.toolchain.existing_isolated(&self.venv_root) {
                    tracing::info!("reusing environment at {}", self.venv_root.display());
                    return Ok(EnvironmentHandle::isolated(&self.venv_root, interpreter));
                }
                match self.toolchain.create_isolated(&base, &self.venv_root) {
                    Ok(interpreter) => Ok(EnvironmentHandle::isolated(&self.venv_root, interpreter)),
                    Err(reason) => {
                        self.warn(
                            WarningKind::EnvironmentFallback,
                            format!(
                                "could not create isolated environment at {} ({}); falling back to the global interpreter",
                                self.venv_root.display(),
                                reason
                            ),
                        );
                        Ok(EnvironmentHandle::global(base))
                    }
                }
            }
        }
    }

    /// Run the installer, retrying per policy; returns the attempt count
    fn attempt(
        &self,
        env: &EnvironmentHandle,
        packages: &[String],
        upgrade: bool,
    ) -> (std::result::Result<(), InstallFailure>, u32) {
        let mut attempts = 0;
        loop {
            attempts += 1;
            match self.installer.install(env, packages, upgrade) {
                Ok(()) => return (Ok(()), attempts),
                Err(failure) if attempts > self.retry.retries => return (Err(failure), attempts),
                Err(failure) => {
                    let delay = self.retry.backoff * attempts;
                    tracing::info!(
                        "install of {} failed (attempt {}), retrying in {:?}: {}",
                        packages.join(" "),
                        attempts,
                        delay,
                        failure.output.lines().last().unwrap_or_default()
                    );
                    thread::sleep(delay);
                }
            }
        }
    }

    /// Install one tier into `env`
    ///
    /// Plain requirements go to the installer in a single invocation;
    /// alternative groups follow, first success wins. A group whose
    /// alternatives all fail is warned about but does not fail the tier.
    /// Failure of an optional tier is warned about here; stopping on a
    /// required tier is up to the caller.
    pub fn install_tier(&mut self, env: &EnvironmentHandle, tier: &DependencyTier) -> InstallResult {
        if !env.installs_packages() {
            tracing::debug!("skipping tier '{}'", tier.name);
            return InstallResult::not_attempted(tier);
        }

        tracing::info!("installing tier '{}'", tier.name);
        let mut attempts = 0;

        let requirements = tier.requirements();
        if !requirements.is_empty() {
            let (outcome, made) = self.attempt(env, &requirements, tier.upgrade);
            attempts += made;
            if let Err(failure) = outcome {
                if tier.required {
                    tracing::warn!("required tier '{}' failed", tier.name);
                } else {
                    self.warn(
                        WarningKind::OptionalTierFailed,
                        format!(
                            "optional tier '{}' failed to install; its features will be unavailable",
                            tier.name
                        ),
                    );
                }
                return InstallResult::failed(tier, attempts, failure.output);
            }
        }

        let mut unsatisfied = Vec::new();
        let groups: Vec<Vec<String>> = tier.alternative_groups().map(<[String]>::to_vec).collect();
        for group in groups {
            let mut satisfied = false;
            for alternative in &group {
                let (outcome, made) =
                    self.attempt(env, std::slice::from_ref(alternative), tier.upgrade);
                attempts += made;
                if outcome.is_ok() {
                    tracing::info!("installed '{}' for tier '{}'", alternative, tier.name);
                    satisfied = true;
                    break;
                }
                tracing::debug!("alternative '{}' failed", alternative);
            }
            if !satisfied {
                let label = group.join(" | ");
                self.warn(
                    WarningKind::AlternativesUnsatisfied,
                    format!(
                        "none of {} could be installed for tier '{}'",
                        label, tier.name
                    ),
                );
                unsatisfied.push(label);
            }
        }

        InstallResult::succeeded(tier, attempts, unsatisfied)
    }

    /// Resolve the environment, then install every tier in order
    ///
    /// The first failed required tier ends the run; the report then lists
    /// only the tiers up to and including it.
    pub fn bootstrap(
        mut self,
        tiers: &[DependencyTier],
        mode: EnvironmentMode,
    ) -> Result<BootstrapReport> {
        let environment = self.resolve_environment(mode)?;
        tracing::info!("bootstrapping {} tier(s) into {}", tiers.len(), environment);

        let mut results = Vec::with_capacity(tiers.len());
        for (index, tier) in tiers.iter().enumerate() {
            self.reporter.start_tier(&tier.name, index + 1, tiers.len());
            let result = self.install_tier(&environment, tier);
            self.reporter.finish_tier(&result);

            let stop = result.is_failed() && tier.required;
            results.push(result);
            if stop {
                break;
            }
        }
        self.reporter.finish();

        Ok(BootstrapReport::new(environment, results, self.warnings))
    }
}
