//! Project configuration resolution
//!
//! Options come from one of two strategies behind [`OptionsStrategy`]:
//!
//! - [`DirectOptions`]: a single name argument, everything else defaulted
//! - [`InteractiveOptions`]: three questions asked through a [`ConfigProvider`]
//!
//! Providers answer one field at a time and signal cancellation separately
//! from values, so a terminal UI and a scripted source are interchangeable.

use crate::error::{Result, ScaffoldError};
use crate::options::{PackageManager, ProjectOptions, ProjectType, CURRENT_DIR};
use crate::validate::{validate_name, validate_package_manager, validate_project_type};
use std::collections::VecDeque;

/// One answer from a provider
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Answer<T> {
    Value(T),
    Cancelled,
}

/// Outcome of configuration resolution
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Options(ProjectOptions),
    /// The user backed out; exit cleanly without side effects
    Cancelled,
}

/// Source of the three project settings
pub trait ConfigProvider {
    fn ask_name(&mut self) -> Result<Answer<String>>;

    /// Package manager command name (e.g. `pnpm`)
    fn ask_package_manager(&mut self) -> Result<Answer<String>>;

    /// Project type key (e.g. `react-native`)
    fn ask_project_type(&mut self) -> Result<Answer<String>>;

    /// Called with the validation error before a question is asked again
    fn reject(&mut self, _error: &ScaffoldError) -> Result<()> {
        Ok(())
    }
}

/// Strategy that produces validated [`ProjectOptions`]
pub trait OptionsStrategy {
    fn resolve(&mut self) -> Result<Resolution>;
}

/// Single positional name; package manager and project type use defaults
#[derive(Debug, Clone)]
pub struct DirectOptions {
    name: String,
}

impl DirectOptions {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl OptionsStrategy for DirectOptions {
    fn resolve(&mut self) -> Result<Resolution> {
        let name = if self.name == "./" {
            CURRENT_DIR.to_string()
        } else {
            self.name.clone()
        };
        validate_name(&name)?;

        Ok(Resolution::Options(ProjectOptions {
            name,
            package_manager: PackageManager::default(),
            project_type: ProjectType::default(),
        }))
    }
}

/// Asks for each field in turn, re-asking on validation errors
pub struct InteractiveOptions<P> {
    provider: P,
}

impl<P: ConfigProvider> InteractiveOptions<P> {
    pub fn new(provider: P) -> Self {
        Self { provider }
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Ask until `accept` succeeds. An empty answer is a missing field
    /// (fatal) unless `allow_empty` hands it to `accept` instead.
    fn ask_until_valid<T>(
        &mut self,
        field: &str,
        ask: fn(&mut P) -> Result<Answer<String>>,
        allow_empty: bool,
        accept: fn(&str) -> Result<T>,
    ) -> Result<Option<T>> {
        loop {
            let raw = match ask(&mut self.provider)? {
                Answer::Value(raw) => raw,
                Answer::Cancelled => return Ok(None),
            };

            if !allow_empty && raw.trim().is_empty() {
                return Err(ScaffoldError::InvalidConfig(format!("No {} selected", field)));
            }

            match accept(&raw) {
                Ok(value) => return Ok(Some(value)),
                Err(e) if e.is_validation() => self.provider.reject(&e)?,
                Err(e) => return Err(e),
            }
        }
    }
}

fn accept_name(raw: &str) -> Result<String> {
    validate_name(raw)?;
    Ok(raw.to_string())
}

impl<P: ConfigProvider> OptionsStrategy for InteractiveOptions<P> {
    fn resolve(&mut self) -> Result<Resolution> {
        let Some(name) = self.ask_until_valid("name", P::ask_name, true, accept_name)? else {
            return Ok(Resolution::Cancelled);
        };

        let Some(package_manager) = self.ask_until_valid(
            "package manager",
            P::ask_package_manager,
            false,
            validate_package_manager,
        )?
        else {
            return Ok(Resolution::Cancelled);
        };

        let Some(project_type) = self.ask_until_valid(
            "project type",
            P::ask_project_type,
            false,
            validate_project_type,
        )?
        else {
            return Ok(Resolution::Cancelled);
        };

        Ok(Resolution::Options(ProjectOptions {
            name,
            package_manager,
            project_type,
        }))
    }
}

/// Non-interactive provider answering from pre-recorded queues
#[derive(Debug, Default)]
pub struct ScriptedProvider {
    names: VecDeque<Answer<String>>,
    package_managers: VecDeque<Answer<String>>,
    project_types: VecDeque<Answer<String>>,
    rejections: Vec<String>,
}

impl ScriptedProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn name(mut self, value: &str) -> Self {
        self.names.push_back(Answer::Value(value.to_string()));
        self
    }

    pub fn package_manager(mut self, value: &str) -> Self {
        self.package_managers
            .push_back(Answer::Value(value.to_string()));
        self
    }

    pub fn project_type(mut self, value: &str) -> Self {
        self.project_types.push_back(Answer::Value(value.to_string()));
        self
    }

    pub fn cancel_name(mut self) -> Self {
        self.names.push_back(Answer::Cancelled);
        self
    }

    pub fn cancel_package_manager(mut self) -> Self {
        self.package_managers.push_back(Answer::Cancelled);
        self
    }

    pub fn cancel_project_type(mut self) -> Self {
        self.project_types.push_back(Answer::Cancelled);
        self
    }

    /// Messages of every rejected answer, in order
    pub fn rejections(&self) -> &[String] {
        &self.rejections
    }

    fn next(queue: &mut VecDeque<Answer<String>>, field: &str) -> Result<Answer<String>> {
        queue.pop_front().ok_or_else(|| {
            ScaffoldError::InvalidConfig(format!("No answer provided for {}", field))
        })
    }
}

impl ConfigProvider for ScriptedProvider {
    fn ask_name(&mut self) -> Result<Answer<String>> {
        Self::next(&mut self.names, "project name")
    }

    fn ask_package_manager(&mut self) -> Result<Answer<String>> {
        Self::next(&mut self.package_managers, "package manager")
    }

    fn ask_project_type(&mut self) -> Result<Answer<String>> {
        Self::next(&mut self.project_types, "project type")
    }

    fn reject(&mut self, error: &ScaffoldError) -> Result<()> {
        self.rejections.push(error.to_string());
        Ok(())
    }
}
