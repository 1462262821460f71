//! Error taxonomy for the scaffolding pipeline
//!
//! Validation errors raised while collecting answers interactively are
//! recovered by re-asking the question. Every other variant is terminal and
//! is rendered once by the binary before exiting with status 1.

use std::path::PathBuf;
use thiserror::Error;

/// Errors produced by the scaffolding engine
#[derive(Debug, Error)]
pub enum ScaffoldError {
    /// Project name failed one of the naming rules
    #[error("Invalid project name: {0}")]
    InvalidName(String),

    /// Unknown or missing package manager / project type
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Target resolves outside the directory it must live in
    #[error("Path '{}' escapes base directory '{}'", .target.display(), .base.display())]
    PathTraversal { target: PathBuf, base: PathBuf },

    /// Target directory already has entries
    #[error("Directory \"{}\" is not empty", .0.display())]
    DirectoryNotEmpty(PathBuf),

    /// Package manager executable is not on PATH
    #[error("{tool} was not found on your PATH")]
    ToolNotFound { tool: String, hint: String },

    /// A filesystem step failed while materializing the template
    #[error("Failed to copy {}: {source}", .path.display())]
    CopyError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The install subprocess exited unsuccessfully
    #[error("`{package_manager} install` failed{}", describe_code(.code))]
    InstallError {
        package_manager: String,
        code: Option<i32>,
    },

    /// The install subprocess could not be started
    #[error("Could not run `{package_manager} install`: {source}")]
    InstallSpawn {
        package_manager: String,
        #[source]
        source: std::io::Error,
    },

    /// template.yaml exists but could not be read or parsed
    #[error("Invalid template manifest {}: {message}", .path.display())]
    Manifest { path: PathBuf, message: String },

    /// Terminal I/O failed while prompting
    #[error("Prompt failed: {0}")]
    Prompt(#[from] std::io::Error),
}

fn describe_code(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!(" with exit code {}", code),
        None => " without an exit code".to_string(),
    }
}

impl ScaffoldError {
    /// Remediation hint shown under the error message, if any
    pub fn hint(&self) -> Option<&str> {
        match self {
            ScaffoldError::ToolNotFound { hint, .. } => Some(hint),
            _ => None,
        }
    }

    /// Whether the error came from a validation rule (recoverable while prompting)
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            ScaffoldError::InvalidName(_)
                | ScaffoldError::InvalidConfig(_)
                | ScaffoldError::PathTraversal { .. }
        )
    }

    pub(crate) fn copy(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ScaffoldError::CopyError {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T, E = ScaffoldError> = std::result::Result<T, E>;
