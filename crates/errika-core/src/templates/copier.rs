//! Materializes the template tree into the target directory

use crate::error::{Result, ScaffoldError};
use crate::options::CURRENT_DIR;
use crate::templates::manifest::MANIFEST_FILE;
use crate::templates::selector::Selection;
use crate::validate::validate_path;
use std::path::{Path, PathBuf};
use tokio::fs;
use walkdir::WalkDir;

/// Result of a successful copy pass
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Materialized {
    pub target_dir: PathBuf,

    /// Files written, relative to the target directory
    pub files: Vec<PathBuf>,
}

/// Compute the target directory for a project name.
///
/// `.` maps to `cwd` itself; anything else must resolve inside `cwd`.
pub fn resolve_target_dir(cwd: &Path, name: &str) -> Result<PathBuf> {
    if name == CURRENT_DIR {
        return Ok(cwd.to_path_buf());
    }
    validate_path(&cwd.join(name), cwd)
}

/// Create the target if needed and make sure it has no entries.
///
/// The check is shallow: any top-level entry, even an empty directory,
/// makes the target non-empty.
pub async fn prepare_target_dir(target_dir: &Path, create: bool) -> Result<()> {
    if create && !fs::try_exists(target_dir).await.unwrap_or(false) {
        fs::create_dir_all(target_dir)
            .await
            .map_err(|e| ScaffoldError::copy(target_dir, e))?;
    }

    let mut entries = fs::read_dir(target_dir)
        .await
        .map_err(|e| ScaffoldError::copy(target_dir, e))?;
    let first = entries
        .next_entry()
        .await
        .map_err(|e| ScaffoldError::copy(target_dir, e))?;

    if first.is_some() {
        return Err(ScaffoldError::DirectoryNotEmpty(target_dir.to_path_buf()));
    }
    Ok(())
}

/// Copy the template root into `target_dir`.
///
/// Every top-level entry except the apps container and the manifest is
/// mirrored as is. The apps container receives the fixed subtrees plus the
/// selected variant under its canonical name. There is no rollback: a failed
/// copy leaves already written files in place.
pub async fn copy_template(
    template_root: &Path,
    selection: &Selection,
    target_dir: &Path,
) -> Result<Materialized> {
    let mut files = Vec::new();

    let mut top_level = Vec::new();
    let mut entries = fs::read_dir(template_root)
        .await
        .map_err(|e| ScaffoldError::copy(template_root, e))?;
    while let Some(entry) = entries
        .next_entry()
        .await
        .map_err(|e| ScaffoldError::copy(template_root, e))?
    {
        top_level.push(entry.file_name());
    }
    top_level.sort();

    for name in top_level {
        if name == selection.apps_dir.as_str() || name == MANIFEST_FILE {
            continue;
        }
        let rel = PathBuf::from(&name);
        copy_tree(&template_root.join(&rel), target_dir, &rel, &mut files).await?;
    }

    let apps_src = template_root.join(&selection.apps_dir);
    let apps_rel = PathBuf::from(&selection.apps_dir);

    for fixed in &selection.fixed {
        copy_tree(
            &apps_src.join(fixed),
            target_dir,
            &apps_rel.join(fixed),
            &mut files,
        )
        .await?;
    }

    copy_tree(
        &apps_src.join(&selection.variant.source),
        target_dir,
        &apps_rel.join(&selection.variant.target),
        &mut files,
    )
    .await?;

    Ok(Materialized {
        target_dir: target_dir.to_path_buf(),
        files,
    })
}

/// Recursively copy `src` (file or directory) to `target_dir/dest_rel`,
/// overwriting whatever is already there.
async fn copy_tree(
    src: &Path,
    target_dir: &Path,
    dest_rel: &Path,
    files: &mut Vec<PathBuf>,
) -> Result<()> {
    for entry in WalkDir::new(src).follow_links(true).sort_by_file_name() {
        let entry = entry.map_err(|e| {
            let path = e.path().unwrap_or(src).to_path_buf();
            ScaffoldError::copy(path, e.into())
        })?;

        let relative = entry.path().strip_prefix(src).unwrap_or(Path::new(""));
        let rel_path = if relative.as_os_str().is_empty() {
            dest_rel.to_path_buf()
        } else {
            dest_rel.join(relative)
        };
        let dest = target_dir.join(&rel_path);

        if entry.file_type().is_dir() {
            fs::create_dir_all(&dest)
                .await
                .map_err(|e| ScaffoldError::copy(&dest, e))?;
            continue;
        }

        if let Some(parent) = dest.parent() {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| ScaffoldError::copy(parent, e))?;
        }
        fs::copy(entry.path(), &dest)
            .await
            .map_err(|e| ScaffoldError::copy(entry.path(), e))?;
        files.push(rel_path);
    }

    Ok(())
}
