//! Package installation
//!
//! [`PackageInstaller`] is the seam between tier orchestration and the
//! package manager of the selected environment. [`PipInstaller`] drives
//! `<interpreter> -m pip install`; tests substitute in-memory doubles.

pub mod pip;
pub mod result;

pub use pip::PipInstaller;
pub use result::{InstallResult, TierStatus};

use crate::environment::EnvironmentHandle;

/// A failed installer invocation and whatever it printed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallFailure {
    pub output: String,
}

impl InstallFailure {
    pub fn new(output: impl Into<String>) -> Self {
        Self {
            output: output.into(),
        }
    }
}

/// Installs a set of requirements into an environment
pub trait PackageInstaller {
    /// Install `packages` in one invocation; success or failure is the only
    /// signal consumed
    fn install(
        &self,
        env: &EnvironmentHandle,
        packages: &[String],
        upgrade: bool,
    ) -> Result<(), InstallFailure>;
}
