//! CLI / template version compatibility

use semver::Version;

use super::manifest::TemplateManifest;

/// Warn when the running CLI is older than the template's `min_cli_version`.
///
/// Unparseable versions never produce a warning.
pub fn check_compatibility(cli_version: &str, manifest: &TemplateManifest) -> Option<String> {
    let required = manifest.min_cli_version.as_deref()?;
    let cli_ver = parse_version(cli_version)?;
    let required_ver = parse_version(required)?;

    (cli_ver < required_ver).then(|| {
        format!(
            "This template expects create-errika {} or newer (running {}). \
             Consider updating: cargo install create-errika --force",
            required_ver, cli_ver
        )
    })
}

/// Parse a version string, tolerating a leading `v`
fn parse_version(version_str: &str) -> Option<Version> {
    let cleaned = version_str.trim();
    let cleaned = cleaned.strip_prefix('v').unwrap_or(cleaned);
    Version::parse(cleaned).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn manifest_requiring(version: Option<&str>) -> TemplateManifest {
        TemplateManifest {
            min_cli_version: version.map(str::to_string),
            ..TemplateManifest::default()
        }
    }

    #[test]
    fn test_cli_older_than_template() {
        let warning = check_compatibility("0.1.0", &manifest_requiring(Some("0.2.0")));
        assert!(warning.unwrap().contains("0.2.0"));
    }

    #[test]
    fn test_cli_same_or_newer() {
        assert!(check_compatibility("0.2.0", &manifest_requiring(Some("0.2.0"))).is_none());
        assert!(check_compatibility("1.0.0", &manifest_requiring(Some("v0.2.0"))).is_none());
    }

    #[test]
    fn test_no_requirement() {
        assert!(check_compatibility("0.1.0", &manifest_requiring(None)).is_none());
    }

    #[test]
    fn test_invalid_versions() {
        assert!(check_compatibility("invalid", &manifest_requiring(Some("0.1.0"))).is_none());
        assert!(check_compatibility("0.1.0", &manifest_requiring(Some("latest"))).is_none());
    }
}
