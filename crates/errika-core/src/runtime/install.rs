//! Dependency installation through the selected package manager

use crate::error::{Result, ScaffoldError};
use crate::options::PackageManager;
use std::future::Future;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::sync::Mutex;
use tokio::process::Command as TokioCommand;

/// Outcome of an install subprocess
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InstallStatus {
    /// Exit code, `None` when the process was killed by a signal
    pub code: Option<i32>,
}

impl InstallStatus {
    pub fn success() -> Self {
        Self { code: Some(0) }
    }

    pub fn failed(code: i32) -> Self {
        Self { code: Some(code) }
    }

    pub fn is_success(&self) -> bool {
        self.code == Some(0)
    }
}

/// Capability that runs `<pm> install` in a directory
pub trait InstallRunner {
    fn run_install(
        &self,
        package_manager: PackageManager,
        working_dir: &Path,
    ) -> impl Future<Output = Result<InstallStatus>> + Send;
}

/// Runs the install command through the platform shell with inherited stdio
#[derive(Debug, Clone, Copy, Default)]
pub struct ShellInstallRunner;

impl ShellInstallRunner {
    fn shell_command(command_line: &str) -> TokioCommand {
        if cfg!(windows) {
            let mut cmd = TokioCommand::new("cmd.exe");
            cmd.arg("/C").arg(command_line);
            cmd
        } else {
            let mut cmd = TokioCommand::new("/bin/sh");
            cmd.arg("-c").arg(command_line);
            cmd
        }
    }
}

impl InstallRunner for ShellInstallRunner {
    async fn run_install(
        &self,
        package_manager: PackageManager,
        working_dir: &Path,
    ) -> Result<InstallStatus> {
        let command_line = format!("{} install", package_manager.command());

        // No timeout: the install runs until the child exits
        let status = Self::shell_command(&command_line)
            .current_dir(working_dir)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .await
            .map_err(|source| ScaffoldError::InstallSpawn {
                package_manager: package_manager.command().to_string(),
                source,
            })?;

        Ok(InstallStatus {
            code: status.code(),
        })
    }
}

/// Runner that records each invocation and answers with a canned status
#[derive(Debug)]
pub struct RecordingRunner {
    status: InstallStatus,
    calls: Mutex<Vec<(PackageManager, PathBuf)>>,
}

impl RecordingRunner {
    pub fn new(status: InstallStatus) -> Self {
        Self {
            status,
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Invocations seen so far, in order
    pub fn calls(&self) -> Vec<(PackageManager, PathBuf)> {
        self.calls
            .lock()
            .map(|calls| calls.clone())
            .unwrap_or_default()
    }
}

impl InstallRunner for RecordingRunner {
    async fn run_install(
        &self,
        package_manager: PackageManager,
        working_dir: &Path,
    ) -> Result<InstallStatus> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push((package_manager, working_dir.to_path_buf()));
        }
        Ok(self.status)
    }
}

/// Installs dependencies and turns an unsuccessful exit into an error
pub struct Installer<R> {
    runner: R,
}

impl<R: InstallRunner> Installer<R> {
    pub fn new(runner: R) -> Self {
        Self { runner }
    }

    pub fn runner(&self) -> &R {
        &self.runner
    }

    /// Run the install to completion. No retry on failure.
    pub async fn install(&self, package_manager: PackageManager, working_dir: &Path) -> Result<()> {
        let status = self.runner.run_install(package_manager, working_dir).await?;

        if status.is_success() {
            Ok(())
        } else {
            Err(ScaffoldError::InstallError {
                package_manager: package_manager.command().to_string(),
                code: status.code,
            })
        }
    }
}
