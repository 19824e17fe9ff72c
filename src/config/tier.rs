//! Dependency tier declarations
//!
//! A tier is a named, ordered group of packages installed together under a
//! single required/optional policy.

use serde::{Deserialize, Serialize};

use crate::error::{Result, config};

/// One entry of a tier's `packages` list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PackageSpec {
    /// Plain requirement string, e.g. `requests` or `pandas>=2`
    Name(String),

    /// Ordered alternatives; the first one that installs wins
    Alternatives { any: Vec<String> },

    /// Requirement with an explicit module name for the capability probe
    Detailed {
        name: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        import: Option<String>,
    },
}

impl PackageSpec {
    /// The requirement passed to the package installer, if this is not an
    /// alternative group
    pub fn requirement(&self) -> Option<&str> {
        match self {
            PackageSpec::Name(name) | PackageSpec::Detailed { name, .. } => Some(name),
            PackageSpec::Alternatives { .. } => None,
        }
    }

    /// The alternative requirements, in the order they are attempted
    pub fn alternatives(&self) -> Option<&[String]> {
        match self {
            PackageSpec::Alternatives { any } => Some(any),
            _ => None,
        }
    }

    /// Explicit module name override
    pub fn import_override(&self) -> Option<&str> {
        match self {
            PackageSpec::Detailed { import, .. } => import.as_deref(),
            _ => None,
        }
    }

    /// Human readable label used in summaries
    pub fn label(&self) -> String {
        match self {
            PackageSpec::Name(name) | PackageSpec::Detailed { name, .. } => name.clone(),
            PackageSpec::Alternatives { any } => any.join(" | "),
        }
    }

    fn validate(&self, tier: &str) -> Result<()> {
        match self {
            PackageSpec::Name(name) | PackageSpec::Detailed { name, .. } => {
                if name.trim().is_empty() {
                    return Err(config::invalid(format!(
                        "tier '{tier}' contains an empty package name"
                    )));
                }
            }
            PackageSpec::Alternatives { any } => {
                if any.is_empty() || any.iter().any(|alt| alt.trim().is_empty()) {
                    return Err(config::invalid(format!(
                        "tier '{tier}' has an alternative group with no usable entries"
                    )));
                }
            }
        }
        Ok(())
    }
}

impl From<&str> for PackageSpec {
    fn from(name: &str) -> Self {
        PackageSpec::Name(name.to_string())
    }
}

/// A named group of dependencies with one required/optional policy
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DependencyTier {
    pub name: String,

    /// Failure of a required tier stops the bootstrap
    #[serde(default)]
    pub required: bool,

    /// Pass `--upgrade` to the installer (used for build tooling)
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub upgrade: bool,

    pub packages: Vec<PackageSpec>,
}

impl DependencyTier {
    pub fn required<S: Into<PackageSpec>>(name: &str, packages: impl IntoIterator<Item = S>) -> Self {
        Self::new(name, true, packages)
    }

    pub fn optional<S: Into<PackageSpec>>(name: &str, packages: impl IntoIterator<Item = S>) -> Self {
        Self::new(name, false, packages)
    }

    fn new<S: Into<PackageSpec>>(
        name: &str,
        required: bool,
        packages: impl IntoIterator<Item = S>,
    ) -> Self {
        Self {
            name: name.to_string(),
            required,
            upgrade: false,
            packages: packages.into_iter().map(Into::into).collect(),
        }
    }

    #[must_use]
    pub fn with_upgrade(mut self) -> Self {
        self.upgrade = true;
        self
    }

    /// Plain requirements, installed together in one installer invocation
    pub fn requirements(&self) -> Vec<String> {
        self.packages
            .iter()
            .filter_map(PackageSpec::requirement)
            .map(str::to_string)
            .collect()
    }

    /// Alternative groups, attempted after the plain requirements
    pub fn alternative_groups(&self) -> impl Iterator<Item = &[String]> {
        self.packages.iter().filter_map(PackageSpec::alternatives)
    }

    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(config::invalid("tier name cannot be empty"));
        }
        if self.packages.is_empty() {
            return Err(config::invalid(format!(
                "tier '{}' has no packages",
                self.name
            )));
        }
        for package in &self.packages {
            package.validate(&self.name)?;
        }
        Ok(())
    }
}
