//! Per-tier installation outcome

use serde::Serialize;

use crate::config::DependencyTier;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TierStatus {
    Succeeded,
    Failed,
    NotAttempted,
}

/// Outcome of one tier in one bootstrap run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InstallResult {
    tier: DependencyTier,
    status: TierStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    error_output: Option<String>,
    attempts: u32,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    unsatisfied_alternatives: Vec<String>,
}

impl InstallResult {
    pub fn succeeded(
        tier: &DependencyTier,
        attempts: u32,
        unsatisfied_alternatives: Vec<String>,
    ) -> Self {
        Self {
            tier: tier.clone(),
            status: TierStatus::Succeeded,
            error_output: None,
            attempts,
            unsatisfied_alternatives,
        }
    }

    pub fn failed(tier: &DependencyTier, attempts: u32, error_output: String) -> Self {
        Self {
            tier: tier.clone(),
            status: TierStatus::Failed,
            error_output: Some(error_output),
            attempts,
            unsatisfied_alternatives: Vec::new(),
        }
    }

    pub fn not_attempted(tier: &DependencyTier) -> Self {
        Self {
            tier: tier.clone(),
            status: TierStatus::NotAttempted,
            error_output: None,
            attempts: 0,
            unsatisfied_alternatives: Vec::new(),
        }
    }

    pub fn tier(&self) -> &DependencyTier {
        &self.tier
    }

    pub fn status(&self) -> TierStatus {
        self.status
    }

    pub fn is_failed(&self) -> bool {
        self.status == TierStatus::Failed
    }

    pub fn error_output(&self) -> Option<&str> {
        self.error_output.as_deref()
    }

    /// Installer invocations made for this tier, retries included
    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    pub fn unsatisfied_alternatives(&self) -> &[String] {
        &self.unsatisfied_alternatives
    }
}
