//! Template manifest types and parsing

use crate::error::{Result, ScaffoldError};
use crate::options::ProjectType;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Component, Path};

/// Manifest file name at the template root
pub const MANIFEST_FILE: &str = "template.yaml";

/// Where a variant's app comes from and where it lands under the apps container
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariantMapping {
    /// Directory name under the template's apps container
    pub source: String,

    /// Canonical directory name in the generated project (e.g. `web`, `mobile`)
    pub target: String,
}

impl VariantMapping {
    fn new(source: &str, target: &str) -> Self {
        Self {
            source: source.to_string(),
            target: target.to_string(),
        }
    }
}

/// Template manifest (template/template.yaml)
///
/// Maps each project type onto an app subtree. When the template root has
/// no manifest file the built-in mapping is used.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateManifest {
    /// Oldest CLI version able to materialize this template
    #[serde(default)]
    pub min_cli_version: Option<String>,

    /// Name of the container that holds the apps
    #[serde(default = "default_apps_dir")]
    pub apps_dir: String,

    /// App subtrees copied for every project type
    #[serde(default)]
    pub fixed: Vec<String>,

    /// Project type key used when the requested variant is unavailable
    #[serde(default = "default_variant_key")]
    pub default_variant: String,

    /// Project type key -> app subtree mapping
    pub variants: BTreeMap<String, VariantMapping>,
}

fn default_apps_dir() -> String {
    "apps".to_string()
}

fn default_variant_key() -> String {
    ProjectType::default().key().to_string()
}

impl Default for TemplateManifest {
    fn default() -> Self {
        let variants = BTreeMap::from([
            (
                ProjectType::NextWeb.key().to_string(),
                VariantMapping::new("web-next", "web"),
            ),
            (
                ProjectType::ReactWeb.key().to_string(),
                VariantMapping::new("web-react", "web"),
            ),
            (
                ProjectType::ReactNative.key().to_string(),
                VariantMapping::new("web-rn", "mobile"),
            ),
        ]);

        Self {
            min_cli_version: None,
            apps_dir: default_apps_dir(),
            fixed: vec!["http-backend".to_string(), "ws-backend".to_string()],
            default_variant: default_variant_key(),
            variants,
        }
    }
}

impl TemplateManifest {
    /// Load `template.yaml` from the template root, or fall back to the built-in mapping
    pub fn load(template_root: &Path) -> Result<Self> {
        let path = template_root.join(MANIFEST_FILE);
        if !path.exists() {
            return Ok(Self::default());
        }

        let manifest_error = |message: String| ScaffoldError::Manifest {
            path: path.clone(),
            message,
        };

        let content = std::fs::read_to_string(&path).map_err(|e| manifest_error(e.to_string()))?;
        Self::parse(&content).map_err(|e| match e {
            ScaffoldError::Manifest { message, .. } => manifest_error(message),
            other => other,
        })
    }

    /// Parse and check a manifest document
    pub fn parse(content: &str) -> Result<Self> {
        let manifest: TemplateManifest =
            serde_yaml::from_str(content).map_err(|e| ScaffoldError::Manifest {
                path: MANIFEST_FILE.into(),
                message: e.to_string(),
            })?;
        manifest.check()?;
        Ok(manifest)
    }

    /// Mapping for a project type, if the manifest declares one
    pub fn variant(&self, project_type: ProjectType) -> Option<&VariantMapping> {
        self.variants.get(project_type.key())
    }

    /// Mapping used when the requested variant cannot be served
    pub fn default_mapping(&self) -> Option<&VariantMapping> {
        self.variants.get(&self.default_variant)
    }

    fn check(&self) -> Result<()> {
        let invalid = |message: String| ScaffoldError::Manifest {
            path: MANIFEST_FILE.into(),
            message,
        };

        for key in self.variants.keys() {
            key.parse::<ProjectType>()
                .map_err(|_| invalid(format!("unknown project type '{}'", key)))?;
        }

        if self.default_mapping().is_none() {
            return Err(invalid(format!(
                "default_variant '{}' has no entry under variants",
                self.default_variant
            )));
        }

        if let Some(clash) = self
            .variants
            .values()
            .find(|v| self.fixed.contains(&v.target))
        {
            return Err(invalid(format!(
                "variant target '{}' collides with a fixed app",
                clash.target
            )));
        }

        let entries = std::iter::once(&self.apps_dir)
            .chain(self.fixed.iter())
            .chain(
                self.variants
                    .values()
                    .flat_map(|v| [&v.source, &v.target]),
            );
        for entry in entries {
            if !is_single_component(entry) {
                return Err(invalid(format!(
                    "'{}' must be a plain directory name",
                    entry
                )));
            }
        }

        Ok(())
    }
}

/// True for names like `web` but not `a/b`, `..`, `/abs` or ``
fn is_single_component(name: &str) -> bool {
    let mut components = Path::new(name).components();
    matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    )
}
