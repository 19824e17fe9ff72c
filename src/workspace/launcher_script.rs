//! Generated launcher artifact
//!
//! `install` leaves a small script in the workspace that re-enters
//! `envstrap run` for that workspace and forwards all arguments.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Result, fs as fs_error};

#[cfg(windows)]
pub const LAUNCHER_FILE: &str = "launch.cmd";
#[cfg(not(windows))]
pub const LAUNCHER_FILE: &str = "launch.sh";

/// Single-quote a value for POSIX sh
fn sh_quote(value: &str) -> String {
    format!("'{}'", value.replace('\'', r"'\''"))
}

/// Script body for `exe` and `root`
pub fn render(exe: &Path, root: &Path) -> String {
    if cfg!(windows) {
        format!(
            "@echo off\r\nrem Generated by envstrap install\r\n\"{}\" --workspace \"{}\" run -- %*\r\nexit /b %ERRORLEVEL%\r\n",
            exe.display(),
            root.display()
        )
    } else {
        format!(
            "#!/bin/sh\n# Generated by envstrap install\nexec {} --workspace {} run -- \"$@\"\n",
            sh_quote(&exe.display().to_string()),
            sh_quote(&root.display().to_string())
        )
    }
}

/// Write the launcher into `root`, overwriting a previous one
pub fn write_launcher(root: &Path, exe: &Path) -> Result<PathBuf> {
    let path = root.join(LAUNCHER_FILE);
    fs::write(&path, render(exe, root))
        .map_err(|e| fs_error::write_failed(path.display().to_string(), e.to_string()))?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755))
            .map_err(|e| fs_error::write_failed(path.display().to_string(), e.to_string()))?;
    }

    tracing::info!("wrote launcher {}", path.display());
    Ok(path)
}
