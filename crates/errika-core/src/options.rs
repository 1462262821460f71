//! Project options collected once per run

use std::fmt;
use std::str::FromStr;

use crate::error::ScaffoldError;

/// Name that means "scaffold into the current working directory"
pub const CURRENT_DIR: &str = ".";

/// Supported package managers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PackageManager {
    #[default]
    Pnpm,
    Npm,
}

impl PackageManager {
    pub const ALL: [PackageManager; 2] = [PackageManager::Pnpm, PackageManager::Npm];

    /// Executable name, also used as the parse key
    pub fn command(&self) -> &'static str {
        match self {
            PackageManager::Pnpm => "pnpm",
            PackageManager::Npm => "npm",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            PackageManager::Pnpm => "pnpm",
            PackageManager::Npm => "npm",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            PackageManager::Pnpm => "Fast, disk space efficient (recommended)",
            PackageManager::Npm => "Bundled with Node.js",
        }
    }
}

impl fmt::Display for PackageManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.command())
    }
}

impl FromStr for PackageManager {
    type Err = ScaffoldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PackageManager::ALL
            .into_iter()
            .find(|pm| pm.command() == s)
            .ok_or_else(|| {
                ScaffoldError::InvalidConfig(format!(
                    "Unsupported package manager '{}' (expected one of: {})",
                    s,
                    PackageManager::ALL.map(|pm| pm.command()).join(", ")
                ))
            })
    }
}

/// Frontend flavor that decides which app lands in `apps/`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ProjectType {
    /// Server-rendered web app (Next.js)
    NextWeb,
    /// Client-only web app (Vite + React)
    #[default]
    ReactWeb,
    /// Mobile app (React Native)
    ReactNative,
}

impl ProjectType {
    pub const ALL: [ProjectType; 3] = [
        ProjectType::NextWeb,
        ProjectType::ReactWeb,
        ProjectType::ReactNative,
    ];

    /// Key used in template.yaml and as the parse key
    pub fn key(&self) -> &'static str {
        match self {
            ProjectType::NextWeb => "next",
            ProjectType::ReactWeb => "react",
            ProjectType::ReactNative => "react-native",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            ProjectType::NextWeb => "Next.js",
            ProjectType::ReactWeb => "React (Vite)",
            ProjectType::ReactNative => "React Native",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            ProjectType::NextWeb => "Server-rendered web app",
            ProjectType::ReactWeb => "Client-only web app",
            ProjectType::ReactNative => "Mobile app",
        }
    }
}

impl fmt::Display for ProjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

impl FromStr for ProjectType {
    type Err = ScaffoldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ProjectType::ALL
            .into_iter()
            .find(|pt| pt.key() == s)
            .ok_or_else(|| {
                ScaffoldError::InvalidConfig(format!(
                    "Unsupported project type '{}' (expected one of: {})",
                    s,
                    ProjectType::ALL.map(|pt| pt.key()).join(", ")
                ))
            })
    }
}

/// Fully validated options for one run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectOptions {
    pub name: String,
    pub package_manager: PackageManager,
    pub project_type: ProjectType,
}

impl ProjectOptions {
    /// Whether the project is scaffolded into the working directory itself
    pub fn is_current_dir(&self) -> bool {
        self.name == CURRENT_DIR
    }
}
