//! Maps a project type onto the app subtrees to copy

use crate::error::{Result, ScaffoldError};
use crate::options::ProjectType;
use crate::templates::manifest::{TemplateManifest, VariantMapping};
use std::path::Path;

/// Resolved set of app subtrees for one run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    /// Container under both the template root and the target
    pub apps_dir: String,

    /// Subtrees copied verbatim
    pub fixed: Vec<String>,

    /// The one variant subtree and its canonical landing name
    pub variant: VariantMapping,

    /// Warning text when the default variant was substituted
    pub fallback: Option<String>,
}

/// Pick the fixed subtrees and the variant mapping for `project_type`.
///
/// A variant whose source subtree is missing from the template (or that the
/// manifest does not map) is replaced by the manifest's default variant. That
/// is reported through [`Selection::fallback`], never as an error.
pub fn select_sources(
    manifest: &TemplateManifest,
    template_root: &Path,
    project_type: ProjectType,
) -> Result<Selection> {
    let apps_root = template_root.join(&manifest.apps_dir);

    let default = manifest.default_mapping().ok_or_else(|| ScaffoldError::Manifest {
        path: template_root.join(super::MANIFEST_FILE),
        message: format!("no mapping for default variant '{}'", manifest.default_variant),
    })?;

    let (variant, fallback) = match manifest.variant(project_type) {
        Some(mapping) if apps_root.join(&mapping.source).is_dir() => (mapping.clone(), None),
        Some(mapping) => (
            default.clone(),
            Some(format!(
                "Template for {} ({}/{}) not found, using {} instead",
                project_type.display_name(),
                manifest.apps_dir,
                mapping.source,
                default.source
            )),
        ),
        None => (
            default.clone(),
            Some(format!(
                "No template mapped for {}, using {} instead",
                project_type.display_name(),
                default.source
            )),
        ),
    };

    Ok(Selection {
        apps_dir: manifest.apps_dir.clone(),
        fixed: manifest.fixed.clone(),
        variant,
        fallback,
    })
}
