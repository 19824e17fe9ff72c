//! Display functions for bootstrap reports, warnings and capability tables

use console::Style;

use crate::bootstrap::{BootstrapReport, Warning};
use crate::installer::{InstallResult, TierStatus};
use crate::probe::CapabilityStatus;

fn policy_label(required: bool) -> &'static str {
    if required { "required" } else { "optional" }
}

/// One line per finished tier
pub fn print_tier_line(result: &InstallResult) {
    let tier = result.tier();
    let (marker, status) = match result.status() {
        TierStatus::Succeeded => (
            Style::new().green().apply_to("✔"),
            Style::new().green().apply_to("installed"),
        ),
        TierStatus::Failed => (
            Style::new().red().apply_to("✘"),
            Style::new().red().apply_to("failed"),
        ),
        TierStatus::NotAttempted => (
            Style::new().dim().apply_to("-"),
            Style::new().dim().apply_to("not attempted"),
        ),
    };
    let retried = if result.attempts() > 1 {
        format!(", {} attempts", result.attempts())
    } else {
        String::new()
    };
    println!(
        "  {} {:<12} {} ({}{})",
        marker,
        tier.name,
        status,
        policy_label(tier.required),
        retried
    );
    for group in result.unsatisfied_alternatives() {
        println!(
            "      {} {}",
            Style::new().yellow().apply_to("unavailable:"),
            group
        );
    }
}

/// Warnings go to stderr so they survive `--json` and redirected stdout
pub fn print_warning(warning: &Warning) {
    eprintln!(
        "{} {}",
        Style::new().yellow().bold().apply_to("warning:"),
        warning.message
    );
}

/// Summary printed after the tier loop
pub fn print_summary(report: &BootstrapReport) {
    println!(
        "{} {}",
        Style::new().bold().apply_to("Environment:"),
        report.environment()
    );
    for result in report.results() {
        print_tier_line(result);
    }

    let count = |status: TierStatus| {
        report
            .results()
            .iter()
            .filter(|r| r.status() == status)
            .count()
    };
    let headline = if report.is_success() {
        Style::new().green().bold().apply_to("Bootstrap complete:")
    } else {
        Style::new().red().bold().apply_to("Bootstrap failed:")
    };
    println!(
        "{} {} installed, {} failed, {} not attempted, {} warning(s)",
        headline,
        count(TierStatus::Succeeded),
        count(TierStatus::Failed),
        count(TierStatus::NotAttempted),
        report.warnings().len()
    );
}

/// Captured installer output of a failed required tier
pub fn print_failure_output(tier: &str, output: &str) {
    eprintln!(
        "{} output of tier '{}':",
        Style::new().red().bold().apply_to("error:"),
        tier
    );
    for line in output.lines() {
        eprintln!("  {line}");
    }
}

/// Capability table: Available / Limited per declared package
pub fn print_capabilities(rows: &[CapabilityStatus]) {
    println!("{}", Style::new().bold().apply_to("System status"));
    println!(
        "  {:<12} {:<24} {:<10} {}",
        "Tier", "Package", "Policy", "Status"
    );
    for row in rows {
        let status = if row.available {
            Style::new().green().apply_to("Available")
        } else if row.required {
            Style::new().red().apply_to("Missing")
        } else {
            Style::new().yellow().apply_to("Limited")
        };
        println!(
            "  {:<12} {:<24} {:<10} {}",
            row.tier,
            row.package,
            policy_label(row.required),
            status
        );
    }
}

/// Contents of the application's error log after a failed run
pub fn print_error_log(path: &std::path::Path, content: &str) {
    eprintln!(
        "{} application exited with an error, log at {}:",
        Style::new().red().bold().apply_to("error:"),
        path.display()
    );
    if content.trim().is_empty() {
        eprintln!("  (log is empty)");
        return;
    }
    eprintln!("{}", Style::new().dim().apply_to("-".repeat(60)));
    eprint!("{content}");
    if !content.ends_with('\n') {
        eprintln!();
    }
    eprintln!("{}", Style::new().dim().apply_to("-".repeat(60)));
}
