//! Errika Core - scaffolding engine behind `create-errika`
//!
//! Given a project name, a package manager and a frontend variant, this
//! library materializes an Errika monorepo skeleton from a template tree and
//! installs its dependencies.
//!
//! # Architecture
//!
//! The library is organized into layers:
//!
//! - **Layer 1: Core Operations** - Validation, template selection, copying, installer
//! - **Layer 2: Workflow Orchestration** - Option strategies and the `Scaffolder` pipeline
//! - **Layer 3: CLI/TUI Interface** - Optional cliclack-based prompts (feature-gated)
//!
//! # Feature Flags
//!
//! - `tui` (default): Enables the cliclack-based TUI prompts module
//!
//! # Example Usage (without TUI)
//!
//! ```ignore
//! use errika_core::config::{DirectOptions, OptionsStrategy, Resolution};
//! use errika_core::report::PlainReporter;
//! use errika_core::runtime::ShellInstallRunner;
//! use errika_core::Scaffolder;
//!
//! let Resolution::Options(options) = DirectOptions::new("my-app").resolve()? else {
//!     return Ok(());
//! };
//! let scaffolder = Scaffolder::new("template", std::env::current_dir()?, ShellInstallRunner);
//! scaffolder.run(&options, &mut PlainReporter).await?;
//! ```

pub mod config;
pub mod error;
pub mod options;
pub mod pipeline;
pub mod report;
pub mod runtime;
pub mod templates;
pub mod validate;

#[cfg(feature = "tui")]
pub mod tui;

// Re-export main types for convenience
pub use error::{Result, ScaffoldError};
pub use options::{PackageManager, ProjectOptions, ProjectType};
pub use pipeline::{Outcome, Scaffolder};
pub use templates::{copy_template, select_sources, TemplateManifest};

#[cfg(feature = "tui")]
pub use tui::run;
