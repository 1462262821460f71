//! Template selection, manifest parsing and copying
//!
//! This module provides:
//! - The template manifest (project type -> app subtree mapping)
//! - Variant selection with fallback to the default variant
//! - Materialization of the template tree into the target directory
//! - Version compatibility checking

pub mod copier;
pub mod manifest;
pub mod selector;
pub mod version;

use crate::error::{Result, ScaffoldError};
use std::path::{Path, PathBuf};

pub use copier::{copy_template, prepare_target_dir, resolve_target_dir, Materialized};
pub use manifest::{TemplateManifest, VariantMapping, MANIFEST_FILE};
pub use selector::{select_sources, Selection};
pub use version::check_compatibility;

/// Template root shipped with the repository
const BUNDLED_TEMPLATE_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/../../template");

/// Find the template root.
///
/// An explicit directory wins and must exist. Otherwise the first existing
/// candidate among `template/` next to the executable, `../template`,
/// `../share/create-errika/template` and the bundled repository copy is used.
pub fn locate_template_root(explicit: Option<&Path>) -> Result<PathBuf> {
    if let Some(dir) = explicit {
        if dir.is_dir() {
            return Ok(dir.to_path_buf());
        }
        return Err(ScaffoldError::InvalidConfig(format!(
            "Template directory not found: {}",
            dir.display()
        )));
    }

    let exe_dir = std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf));

    let mut candidates = Vec::new();
    if let Some(dir) = &exe_dir {
        candidates.push(dir.join("template"));
        candidates.push(dir.join("../template"));
        candidates.push(dir.join("../share/create-errika/template"));
    }
    candidates.push(PathBuf::from(BUNDLED_TEMPLATE_DIR));

    candidates
        .into_iter()
        .find(|dir| dir.is_dir())
        .ok_or_else(|| {
            ScaffoldError::InvalidConfig(
                "Template directory not found; pass --template-dir".to_string(),
            )
        })
}
