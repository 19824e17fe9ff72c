//! Manifest (envstrap.yaml) loading and defaults

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::tier::{DependencyTier, PackageSpec};
use crate::error::{Result, config, fs as fs_error};

/// Manifest filename looked up in the workspace root
pub const MANIFEST_FILE: &str = "envstrap.yaml";

/// Working directories created by `install` and `init`
pub const DEFAULT_DIRECTORIES: [&str; 6] = ["data", "exports", "config", "logs", "maps", "cache"];

/// Workspace manifest: dependency tiers plus launch settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Manifest {
    /// Main script handed to the interpreter by `run`
    #[serde(default = "default_app")]
    pub app: PathBuf,

    /// Pre-flight script run before the main script
    #[serde(default = "default_preflight")]
    pub preflight: Option<PathBuf>,

    /// Location of the isolated environment, relative to the workspace
    #[serde(default = "default_venv")]
    pub venv: PathBuf,

    /// Where stderr of the main script is captured
    #[serde(default = "default_error_log")]
    pub error_log: PathBuf,

    #[serde(default = "default_directories")]
    pub directories: Vec<String>,

    /// Interpreter names looked up on PATH, in order
    #[serde(default = "default_interpreters")]
    pub interpreters: Vec<String>,

    /// Extra attempts per installer invocation
    #[serde(default)]
    pub retries: u32,

    #[serde(default = "default_retry_backoff_ms")]
    pub retry_backoff_ms: u64,

    #[serde(default = "default_tiers")]
    pub tiers: Vec<DependencyTier>,
}

fn default_app() -> PathBuf {
    PathBuf::from("main.py")
}

#[allow(clippy::unnecessary_wraps)]
fn default_preflight() -> Option<PathBuf> {
    Some(PathBuf::from("bootstrap.py"))
}

fn default_venv() -> PathBuf {
    PathBuf::from("venv")
}

fn default_error_log() -> PathBuf {
    PathBuf::from("logs").join("error.log")
}

fn default_directories() -> Vec<String> {
    DEFAULT_DIRECTORIES.iter().map(ToString::to_string).collect()
}

fn default_interpreters() -> Vec<String> {
    let names: &[&str] = if cfg!(windows) {
        &["python", "py", "python3"]
    } else {
        &["python3", "python"]
    };
    names.iter().map(ToString::to_string).collect()
}

fn default_retry_backoff_ms() -> u64 {
    2000
}

fn default_tiers() -> Vec<DependencyTier> {
    vec![
        DependencyTier::required("tooling", ["pip", "setuptools", "wheel"]).with_upgrade(),
        DependencyTier::required(
            "core",
            ["requests", "pandas", "colorama", "tabulate", "rich"],
        ),
        DependencyTier::optional("mapping", ["folium"]),
        DependencyTier::optional(
            "database",
            [PackageSpec::Alternatives {
                any: vec!["psycopg2-binary".to_string(), "psycopg2".to_string()],
            }],
        ),
        DependencyTier::optional("ml", ["numpy", "scikit-learn"]),
    ]
}

impl Default for Manifest {
    fn default() -> Self {
        Self {
            app: default_app(),
            preflight: default_preflight(),
            venv: default_venv(),
            error_log: default_error_log(),
            directories: default_directories(),
            interpreters: default_interpreters(),
            retries: 0,
            retry_backoff_ms: default_retry_backoff_ms(),
            tiers: default_tiers(),
        }
    }
}

impl Manifest {
    /// Parse manifest from YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let manifest: Self = serde_yaml::from_str(yaml)?;
        manifest.validate()?;
        Ok(manifest)
    }

    /// Serialize manifest to YAML string
    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Load the manifest for a workspace
    ///
    /// An explicit path must exist. Without one, `envstrap.yaml` in the
    /// workspace root is used when present and the built-in default otherwise.
    pub fn load(workspace_root: &Path, explicit: Option<&Path>) -> Result<Self> {
        let path = match explicit {
            Some(path) => {
                if !path.exists() {
                    return Err(config::not_found(path.display().to_string()));
                }
                path.to_path_buf()
            }
            None => {
                let path = workspace_root.join(MANIFEST_FILE);
                if !path.exists() {
                    tracing::debug!("no {} in {}, using defaults", MANIFEST_FILE, workspace_root.display());
                    return Ok(Self::default());
                }
                path
            }
        };

        let content = fs::read_to_string(&path)
            .map_err(|e| fs_error::read_failed(path.display().to_string(), e.to_string()))?;

        Self::from_yaml(&content).map_err(|err| match err {
            crate::error::EnvstrapError::ConfigParseFailed { reason, .. } => {
                config::parse_failed(path.display().to_string(), reason)
            }
            other => other,
        })
    }

    /// Write the manifest to the workspace root unless one already exists
    ///
    /// Returns whether a file was written.
    pub fn write_if_absent(&self, workspace_root: &Path) -> Result<bool> {
        let path = workspace_root.join(MANIFEST_FILE);
        if path.exists() {
            return Ok(false);
        }
        let content = self.to_yaml()?;
        fs::write(&path, content)
            .map_err(|e| fs_error::write_failed(path.display().to_string(), e.to_string()))?;
        Ok(true)
    }

    pub fn validate(&self) -> Result<()> {
        if self.tiers.is_empty() {
            return Err(config::invalid("at least one tier must be declared"));
        }
        if self.interpreters.is_empty() {
            return Err(config::invalid("'interpreters' cannot be empty"));
        }

        let mut seen = HashSet::new();
        for tier in &self.tiers {
            tier.validate()?;
            if !seen.insert(tier.name.as_str()) {
                return Err(config::invalid(format!(
                    "tier '{}' is declared more than once",
                    tier.name
                )));
            }
        }
        Ok(())
    }

    /// Resolve a manifest-relative path against the workspace root
    pub fn resolve(workspace_root: &Path, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            workspace_root.join(path)
        }
    }
}
