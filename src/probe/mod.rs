//! Capability probe
//!
//! Checks which declared packages the selected interpreter can actually
//! import, so the operator sees which features are available and which are
//! limited. Used by `envstrap check` and as the built-in pre-flight check.

use std::path::Path;
use std::process::{Command, Stdio};

use serde::Serialize;

use crate::config::{DependencyTier, PackageSpec};
use crate::environment::EnvironmentHandle;

/// Distribution names whose import name differs from the normalised name
const KNOWN_MODULES: &[(&str, &str)] = &[
    ("beautifulsoup4", "bs4"),
    ("opencv-python", "cv2"),
    ("pillow", "PIL"),
    ("psycopg2-binary", "psycopg2"),
    ("python-dateutil", "dateutil"),
    ("pyyaml", "yaml"),
    ("scikit-learn", "sklearn"),
    ("setuptools", "setuptools"),
];

/// Answers whether an interpreter can import a module
pub trait ModuleProbe {
    fn is_importable(&self, interpreter: &Path, module: &str) -> bool;
}

/// Probe that runs `<interpreter> -c "import <module>"`
#[derive(Debug, Clone, Copy, Default)]
pub struct InterpreterProbe;

impl ModuleProbe for InterpreterProbe {
    fn is_importable(&self, interpreter: &Path, module: &str) -> bool {
        if !is_valid_module(module) {
            return false;
        }
        Command::new(interpreter)
            .arg("-c")
            .arg(format!("import {module}"))
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .is_ok_and(|status| status.success())
    }
}

/// One row of the status table
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CapabilityStatus {
    pub tier: String,
    pub package: String,
    pub module: String,
    pub required: bool,
    pub available: bool,
}

fn is_valid_module(module: &str) -> bool {
    !module.is_empty()
        && module
            .split('.')
            .all(|part| !part.is_empty() && part.chars().all(|c| c.is_ascii_alphanumeric() || c == '_'))
}

/// Import name for a requirement string such as `pandas>=2` or
/// `requests[socks]`
pub fn module_name(requirement: &str) -> String {
    let distribution = requirement
        .split(|c: char| matches!(c, '<' | '>' | '=' | '!' | '~' | ';' | '@' | '[' | ' '))
        .next()
        .unwrap_or(requirement)
        .trim()
        .to_ascii_lowercase();

    KNOWN_MODULES
        .iter()
        .find(|(name, _)| *name == distribution)
        .map_or_else(|| distribution.replace('-', "_"), |(_, module)| (*module).to_string())
}

fn spec_module(spec: &PackageSpec, requirement: &str) -> String {
    spec.import_override()
        .map_or_else(|| module_name(requirement), str::to_string)
}

/// Probe every package of every tier against `env`'s interpreter
///
/// An alternative group is available when any member imports; it never
/// counts as required.
pub fn probe(
    prober: &dyn ModuleProbe,
    env: &EnvironmentHandle,
    tiers: &[DependencyTier],
) -> Vec<CapabilityStatus> {
    let mut rows = Vec::new();
    for tier in tiers {
        for spec in &tier.packages {
            let row = if let Some(alternatives) = spec.alternatives() {
                let modules: Vec<String> = alternatives.iter().map(|a| module_name(a)).collect();
                let found = modules
                    .iter()
                    .find(|m| prober.is_importable(env.interpreter(), m));
                CapabilityStatus {
                    tier: tier.name.clone(),
                    package: spec.label(),
                    module: found.or(modules.first()).cloned().unwrap_or_default(),
                    required: false,
                    available: found.is_some(),
                }
            } else {
                let requirement = spec.requirement().unwrap_or_default();
                let module = spec_module(spec, requirement);
                let available = prober.is_importable(env.interpreter(), &module);
                CapabilityStatus {
                    tier: tier.name.clone(),
                    package: spec.label(),
                    module,
                    required: tier.required,
                    available,
                }
            };
            tracing::debug!(
                "probe {} ({}): {}",
                row.package,
                row.module,
                if row.available { "available" } else { "missing" }
            );
            rows.push(row);
        }
    }
    rows
}

/// Rows of required packages that could not be imported
pub fn missing_required(rows: &[CapabilityStatus]) -> Vec<&CapabilityStatus> {
    rows.iter().filter(|r| r.required && !r.available).collect()
}
