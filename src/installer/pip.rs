//! pip-backed package installer

use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;
use std::process::Command;

use super::{InstallFailure, PackageInstaller};
use crate::environment::EnvironmentHandle;

/// Runs `<interpreter> -m pip install` and optionally appends its output to a
/// log file
#[derive(Debug, Clone, Default)]
pub struct PipInstaller {
    log: Option<PathBuf>,
}

impl PipInstaller {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_log(mut self, log: PathBuf) -> Self {
        self.log = Some(log);
        self
    }

    fn append_log(&self, packages: &[String], output: &str) {
        let Some(log) = &self.log else {
            return;
        };
        let written = OpenOptions::new()
            .create(true)
            .append(true)
            .open(log)
            .and_then(|mut file| {
                writeln!(file, "$ pip install {}", packages.join(" "))?;
                file.write_all(output.as_bytes())
            });
        if let Err(e) = written {
            tracing::debug!("could not write install log {}: {}", log.display(), e);
        }
    }
}

impl PackageInstaller for PipInstaller {
    fn install(
        &self,
        env: &EnvironmentHandle,
        packages: &[String],
        upgrade: bool,
    ) -> Result<(), InstallFailure> {
        let mut command = Command::new(env.interpreter());
        command.args(["-m", "pip", "install", "--disable-pip-version-check"]);
        if upgrade {
            command.arg("--upgrade");
        }
        command.args(packages);

        tracing::debug!("running {:?}", command);
        let output = command.output().map_err(|e| {
            InstallFailure::new(format!(
                "failed to run {}: {e}",
                env.interpreter().display()
            ))
        })?;

        let mut combined = String::from_utf8_lossy(&output.stdout).into_owned();
        combined.push_str(&String::from_utf8_lossy(&output.stderr));
        self.append_log(packages, &combined);

        if output.status.success() {
            Ok(())
        } else {
            Err(InstallFailure::new(combined.trim().to_string()))
        }
    }
}
