//! Validation rules for project names, target paths and package managers
//!
//! Everything here is a pure predicate except [`check_package_manager_exists`],
//! which probes PATH once.

use std::ffi::OsString;
use std::io;
use std::path::{Component, Path, PathBuf};

use crate::error::{Result, ScaffoldError};
use crate::options::{PackageManager, ProjectType, CURRENT_DIR};
use crate::runtime::tool;

/// Names that would clash with tooling directories
pub const RESERVED_NAMES: &[&str] = &["node_modules", ".git", ".."];

/// Validate a raw project name.
///
/// Rules are checked in order and the first failure is returned.
pub fn validate_name(raw: &str) -> Result<()> {
    if raw.trim().is_empty() {
        return Err(invalid_name("Project name cannot be empty"));
    }

    if raw == CURRENT_DIR {
        return Ok(());
    }

    if RESERVED_NAMES.contains(&raw) {
        return Err(invalid_name(format!("\"{}\" is a reserved name", raw)));
    }

    if raw.starts_with('.') {
        return Err(invalid_name("Project name cannot start with a dot"));
    }

    if let Some(c) = raw.chars().find(|c| !is_allowed_char(*c)) {
        return Err(invalid_name(format!(
            "Invalid character '{}': only letters, numbers, '-', '_' and '.' are allowed",
            c
        )));
    }

    if raw.contains("..") {
        return Err(invalid_name("Project name cannot contain \"..\""));
    }

    Ok(())
}

fn is_allowed_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.')
}

fn invalid_name(message: impl Into<String>) -> ScaffoldError {
    ScaffoldError::InvalidName(message.into())
}

/// Check a package manager value against the supported set
pub fn validate_package_manager(value: &str) -> Result<PackageManager> {
    value.parse()
}

/// Check a project type value against the supported set
pub fn validate_project_type(value: &str) -> Result<ProjectType> {
    value.parse()
}

/// Ensure `target` resolves to `base` or somewhere beneath it.
///
/// Both paths are made absolute, `.`/`..` components are folded, and the
/// longest existing prefix is canonicalized so symlinks are followed.
/// Returns the resolved target.
pub fn validate_path(target: &Path, base: &Path) -> Result<PathBuf> {
    let traversal = || ScaffoldError::PathTraversal {
        target: target.to_path_buf(),
        base: base.to_path_buf(),
    };

    let resolved_base = resolve(base).map_err(|_| traversal())?;
    let resolved_target = resolve(target).map_err(|_| traversal())?;

    if resolved_target.starts_with(&resolved_base) {
        Ok(resolved_target)
    } else {
        Err(ScaffoldError::PathTraversal {
            target: resolved_target,
            base: resolved_base,
        })
    }
}

fn resolve(path: &Path) -> io::Result<PathBuf> {
    let absolute = std::path::absolute(path)?;
    canonicalize_existing(&normalize(&absolute))
}

/// Fold `.` and `..` without touching the filesystem
fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                out.pop();
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}

/// Canonicalize the deepest existing ancestor and re-append the rest
fn canonicalize_existing(path: &Path) -> io::Result<PathBuf> {
    let mut existing = path;
    let mut missing: Vec<OsString> = Vec::new();

    loop {
        if let Ok(canonical) = existing.canonicalize() {
            let mut out = canonical;
            for name in missing.iter().rev() {
                out.push(name);
            }
            return Ok(out);
        }

        match (existing.parent(), existing.file_name()) {
            (Some(parent), Some(name)) => {
                missing.push(name.to_os_string());
                existing = parent;
            }
            _ => return Ok(path.to_path_buf()),
        }
    }
}

/// Probe PATH for the package manager executable
pub fn check_package_manager_exists(pm: PackageManager) -> Result<PathBuf> {
    tool::for_package_manager(pm).locate()
}
