//! Workspace management
//!
//! A workspace is the application directory: it holds the manifest, the
//! working directories, the isolated environment and the generated launcher.

pub mod launcher_script;

use std::fs;
use std::path::{Path, PathBuf};

use normpath::PathExt;

use crate::config::Manifest;
use crate::error::{Result, fs as fs_error};

pub use launcher_script::write_launcher;

/// Install log written next to the application logs
pub const INSTALL_LOG: &str = "install.log";

/// An opened workspace: root directory plus its manifest
#[derive(Debug, Clone)]
pub struct Workspace {
    pub root: PathBuf,
    pub manifest: Manifest,
}

impl Workspace {
    /// Open the workspace at `root` (current directory when `None`)
    pub fn open(root: Option<PathBuf>, config: Option<&Path>) -> Result<Self> {
        let root = match root {
            Some(root) => root,
            None => std::env::current_dir().map_err(|e| {
                fs_error::io_error(format!("Failed to get current directory: {e}"))
            })?,
        };
        if !root.is_dir() {
            return Err(fs_error::io_error(format!(
                "Workspace directory does not exist: {}",
                root.display()
            )));
        }
        let root = root
            .normalize()
            .map(normpath::BasePathBuf::into_path_buf)
            .unwrap_or(root);

        let manifest = Manifest::load(&root, config)?;
        Ok(Self { root, manifest })
    }

    pub fn resolve(&self, path: &Path) -> PathBuf {
        Manifest::resolve(&self.root, path)
    }

    pub fn venv_root(&self) -> PathBuf {
        self.resolve(&self.manifest.venv)
    }

    pub fn error_log(&self) -> PathBuf {
        self.resolve(&self.manifest.error_log)
    }

    pub fn app(&self) -> PathBuf {
        self.resolve(&self.manifest.app)
    }

    pub fn preflight(&self) -> Option<PathBuf> {
        self.manifest.preflight.as_deref().map(|p| self.resolve(p))
    }

    pub fn logs_dir(&self) -> PathBuf {
        self.root.join("logs")
    }

    /// Create the manifest's working directories
    pub fn ensure_directories(&self) -> Result<Vec<PathBuf>> {
        ensure_directories(&self.root, &self.manifest.directories)
    }
}

/// Create every directory in `dirs` under `root` if absent
///
/// Idempotent: running it again yields the same directory set and no error.
/// Returns the directories that were newly created.
pub fn ensure_directories(root: &Path, dirs: &[String]) -> Result<Vec<PathBuf>> {
    let mut created = Vec::new();
    for dir in dirs {
        let path = root.join(dir);
        if path.is_dir() {
            continue;
        }
        fs::create_dir_all(&path).map_err(|e| {
            fs_error::create_dir_failed(path.display().to_string(), e.to_string())
        })?;
        tracing::debug!("created directory {}", path.display());
        created.push(path);
    }
    Ok(created)
}
