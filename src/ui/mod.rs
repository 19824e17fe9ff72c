//! UI/Progress presentation layer
//!
//! This module handles:
//! - Progress reporting while tiers are installed
//! - Interactive progress bars using indicatif
//! - Quiet progress for `--quiet`, `--json` and non-terminal output
//!
//! Warnings always reach the operator, whichever reporter is in use.

pub mod display;

use indicatif::{ProgressBar, ProgressStyle};

use crate::bootstrap::Warning;
use crate::installer::InstallResult;

/// Progress reporter for the tier installation loop
pub trait ProgressReporter {
    /// A tier is about to be installed
    fn start_tier(&mut self, tier: &str, current: usize, total: usize);

    /// A tier finished, successfully or not
    fn finish_tier(&mut self, result: &InstallResult);

    /// A tolerated failure that the operator must see
    fn warn(&mut self, warning: &Warning);

    /// The run is over
    fn finish(&mut self);
}

/// Interactive progress reporter with a visual progress bar
pub struct InteractiveProgressReporter {
    tier_pb: ProgressBar,
}

impl InteractiveProgressReporter {
    /// Create a new interactive progress reporter with total tier count
    pub fn new(total_tiers: u64) -> Self {
        let style = ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("#>-");

        let tier_pb = ProgressBar::new(total_tiers);
        tier_pb.set_style(style);

        Self { tier_pb }
    }
}

impl ProgressReporter for InteractiveProgressReporter {
    fn start_tier(&mut self, tier: &str, current: usize, total: usize) {
        self.tier_pb
            .set_message(format!("({current}/{total}) installing {tier}"));
        self.tier_pb
            .enable_steady_tick(std::time::Duration::from_millis(120));
    }

    fn finish_tier(&mut self, result: &InstallResult) {
        tracing::debug!("tier '{}' finished: {:?}", result.tier().name, result.status());
        self.tier_pb.inc(1);
    }

    fn warn(&mut self, warning: &Warning) {
        self.tier_pb.suspend(|| display::print_warning(warning));
    }

    fn finish(&mut self) {
        self.tier_pb.finish_and_clear();
    }
}

/// Quiet reporter: no progress output, warnings only
#[derive(Default)]
pub struct QuietProgressReporter;

impl ProgressReporter for QuietProgressReporter {
    fn start_tier(&mut self, _tier: &str, _current: usize, _total: usize) {}

    fn finish_tier(&mut self, _result: &InstallResult) {}

    fn warn(&mut self, warning: &Warning) {
        display::print_warning(warning);
    }

    fn finish(&mut self) {}
}
