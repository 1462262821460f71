//! Package manager discovery and dependency installation
//!
//! This module provides:
//! - PATH discovery and install guidance for package managers
//! - The `InstallRunner` capability and the shell-backed installer

pub mod install;
pub mod tool;

pub use install::{InstallRunner, InstallStatus, Installer, RecordingRunner, ShellInstallRunner};
pub use tool::ToolManager;
