//! Package manager discovery
//!
//! Wraps the PATH probe, version lookup and install guidance for each
//! supported package manager.

use crate::error::{Result, ScaffoldError};
use crate::options::PackageManager;
use colored::Colorize;
use std::path::PathBuf;

/// Configuration for a CLI tool
#[derive(Debug, Clone)]
pub struct ToolConfig {
    /// Name of the tool binary (e.g., "pnpm")
    pub name: &'static str,
    /// Display name for user-facing messages
    pub display_name: &'static str,
    /// Command that installs the tool, if there is a one-liner
    pub install_command: Option<&'static str>,
    /// URL to the installation documentation
    pub docs_url: &'static str,
}

/// Manager for locating CLI tools
pub struct ToolManager {
    config: ToolConfig,
}

impl ToolManager {
    /// Create a new tool manager with the given configuration
    pub fn new(config: ToolConfig) -> Self {
        Self { config }
    }

    /// Get the tool configuration
    pub fn config(&self) -> &ToolConfig {
        &self.config
    }

    /// Remediation hint shown when the tool is missing
    pub fn install_hint(&self) -> String {
        match self.config.install_command {
            Some(cmd) => format!(
                "Install it with `{}` or see {}",
                cmd, self.config.docs_url
            ),
            None => format!("See {} for installation instructions", self.config.docs_url),
        }
    }

    /// Resolve the tool's executable on PATH
    pub fn locate(&self) -> Result<PathBuf> {
        which::which(self.config.name).map_err(|_| ScaffoldError::ToolNotFound {
            tool: self.config.display_name.to_string(),
            hint: self.install_hint(),
        })
    }

    /// Get the installed tool version (if available)
    pub fn get_version(&self) -> Option<String> {
        // Resolve first so Windows picks up `.cmd` shims
        let program = self.locate().ok()?;
        std::process::Command::new(program)
            .arg("--version")
            .output()
            .ok()
            .filter(|output| output.status.success())
            .and_then(|output| version_from_stdout(&output.stdout))
    }

    /// Open the tool's documentation in the default browser
    pub fn open_docs(&self) -> anyhow::Result<()> {
        println!(
            "{}",
            format!(
                "Opening {} installation docs in your browser...",
                self.config.display_name
            )
            .cyan()
        );
        open::that(self.config.docs_url)?;
        Ok(())
    }
}

/// First non-blank line of `--version` output
fn version_from_stdout(stdout: &[u8]) -> Option<String> {
    String::from_utf8_lossy(stdout)
        .lines()
        .map(str::trim)
        .find(|line| !line.is_empty())
        .map(str::to_string)
}

/// Pre-configured tool manager for a package manager
pub fn for_package_manager(pm: PackageManager) -> ToolManager {
    let config = match pm {
        PackageManager::Pnpm => ToolConfig {
            name: "pnpm",
            display_name: "pnpm",
            install_command: Some("npm install -g pnpm"),
            docs_url: "https://pnpm.io/installation",
        },
        PackageManager::Npm => ToolConfig {
            name: "npm",
            display_name: "npm",
            install_command: None,
            docs_url: "https://nodejs.org/en/download",
        },
    };
    ToolManager::new(config)
}
