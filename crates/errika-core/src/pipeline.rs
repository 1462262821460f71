//! End-to-end scaffolding run
//!
//! Validate -> select -> materialize -> install, each step finishing before
//! the next starts. The first failure aborts the run.

use crate::error::Result;
use crate::options::{PackageManager, ProjectOptions};
use crate::report::{Event, Reporter};
use crate::runtime::install::{InstallRunner, Installer};
use crate::runtime::tool;
use crate::templates::{self, TemplateManifest};
use crate::validate;
use std::path::PathBuf;

/// Summary of a finished run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    pub target_dir: PathBuf,
    pub files_copied: usize,
    /// Whether the default variant replaced the requested one
    pub used_fallback: bool,
    pub installed: bool,
}

/// Drives one scaffolding run
pub struct Scaffolder<R> {
    template_root: PathBuf,
    working_dir: PathBuf,
    installer: Installer<R>,
    check_tool: bool,
    skip_install: bool,
    cli_version: String,
}

impl<R: InstallRunner> Scaffolder<R> {
    pub fn new(template_root: impl Into<PathBuf>, working_dir: impl Into<PathBuf>, runner: R) -> Self {
        Self {
            template_root: template_root.into(),
            working_dir: working_dir.into(),
            installer: Installer::new(runner),
            check_tool: true,
            skip_install: false,
            cli_version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }

    /// Skip the install step (and with it the PATH probe)
    pub fn skip_install(mut self, skip: bool) -> Self {
        self.skip_install = skip;
        self
    }

    /// Toggle the PATH probe for the package manager
    pub fn check_tool(mut self, check: bool) -> Self {
        self.check_tool = check;
        self
    }

    /// Version compared against the template's `min_cli_version`
    pub fn cli_version(mut self, version: impl Into<String>) -> Self {
        self.cli_version = version.into();
        self
    }

    pub fn installer(&self) -> &Installer<R> {
        &self.installer
    }

    pub async fn run(
        &self,
        options: &ProjectOptions,
        reporter: &mut impl Reporter,
    ) -> Result<Outcome> {
        // Options may be built by hand, so check them again here
        validate::validate_name(&options.name)?;
        validate::validate_package_manager(options.package_manager.command())?;
        validate::validate_project_type(options.project_type.key())?;

        if self.check_tool && !self.skip_install {
            validate::check_package_manager_exists(options.package_manager)?;
            reporter.report(Event::ToolFound {
                package_manager: options.package_manager,
                version: tool::for_package_manager(options.package_manager).get_version(),
            });
        }

        let target_dir = templates::resolve_target_dir(&self.working_dir, &options.name)?;

        let manifest = TemplateManifest::load(&self.template_root)?;
        if let Some(warning) = templates::check_compatibility(&self.cli_version, &manifest) {
            reporter.report(Event::Warning(warning));
        }

        let selection =
            templates::select_sources(&manifest, &self.template_root, options.project_type)?;
        if let Some(warning) = &selection.fallback {
            reporter.report(Event::Warning(warning.clone()));
        }

        reporter.report(Event::Creating {
            display_name: options.name.clone(),
            target: target_dir.clone(),
        });

        templates::prepare_target_dir(&target_dir, !options.is_current_dir()).await?;

        reporter.report(Event::CopyStarted);
        let materialized =
            templates::copy_template(&self.template_root, &selection, &target_dir).await?;
        reporter.report(Event::CopyFinished {
            files: materialized.files.len(),
            target: target_dir.clone(),
        });

        if self.skip_install {
            reporter.report(Event::InstallSkipped);
        } else {
            reporter.report(Event::InstallStarted {
                package_manager: options.package_manager,
            });
            self.installer
                .install(options.package_manager, &target_dir)
                .await?;
            reporter.report(Event::InstallFinished);
        }

        reporter.report(Event::Finished {
            next_steps: next_steps(options, !self.skip_install),
        });

        Ok(Outcome {
            target_dir,
            files_copied: materialized.files.len(),
            used_fallback: selection.fallback.is_some(),
            installed: !self.skip_install,
        })
    }
}

/// Instructions shown after a successful run
pub fn next_steps(options: &ProjectOptions, installed: bool) -> Vec<String> {
    let pm = options.package_manager;
    let mut steps = Vec::new();

    if !options.is_current_dir() {
        steps.push(format!("cd {}", options.name));
    }
    if !installed {
        steps.push(format!("{} install", pm.command()));
    }
    steps.push(match pm {
        PackageManager::Pnpm => "pnpm dev".to_string(),
        PackageManager::Npm => "npm run dev".to_string(),
    });

    steps
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ScaffoldError;
    use crate::options::ProjectType;
    use crate::runtime::install::{InstallStatus, RecordingRunner};
    use std::fs;
    use std::path::Path;
    use tempfile::TempDir;

    fn write(root: &Path, rel: &str, content: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    fn template(with_variants: &[&str]) -> TempDir {
        let temp = TempDir::new().unwrap();
        let root = temp.path();
        write(root, "package.json", "{}");
        write(root, "apps/http-backend/index.ts", "http");
        write(root, "apps/ws-backend/index.ts", "ws");
        for variant in with_variants {
            write(root, &format!("apps/{}/index.ts", variant), variant);
        }
        temp
    }

    fn options(name: &str, package_manager: PackageManager, project_type: ProjectType) -> ProjectOptions {
        ProjectOptions {
            name: name.to_string(),
            package_manager,
            project_type,
        }
    }

    /// Scaffolder that never touches PATH or a real package manager
    fn scaffolder(template: &Path, cwd: &Path, status: InstallStatus) -> Scaffolder<RecordingRunner> {
        Scaffolder::new(template, cwd, RecordingRunner::new(status)).check_tool(false)
    }

    #[tokio::test]
    async fn test_web_project_scenario() {
        let template = template(&["web-next", "web-react", "web-rn"]);
        let cwd = TempDir::new().unwrap();
        let scaffolder = scaffolder(template.path(), cwd.path(), InstallStatus::success());
        let opts = options("my-app", PackageManager::Pnpm, ProjectType::NextWeb);
        let mut events: Vec<Event> = Vec::new();

        let outcome = scaffolder.run(&opts, &mut events).await.unwrap();

        let app = cwd.path().join("my-app");
        assert!(app.join("apps/http-backend").is_dir());
        assert!(app.join("apps/ws-backend").is_dir());
        assert_eq!(fs::read_to_string(app.join("apps/web/index.ts")).unwrap(), "web-next");
        assert!(!app.join("apps/mobile").exists());
        assert!(!outcome.used_fallback);
        assert!(outcome.installed);
        assert!(events.contains(&Event::InstallFinished));

        let calls = scaffolder.installer().runner().calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].0, PackageManager::Pnpm);
        assert_eq!(calls[0].1, app.canonicalize().unwrap());
    }

    #[tokio::test]
    async fn test_current_dir_scenario() {
        let template = template(&["web-react"]);
        let cwd = TempDir::new().unwrap();
        let scaffolder = scaffolder(template.path(), cwd.path(), InstallStatus::success())
            .skip_install(true);
        let opts = options(".", PackageManager::Npm, ProjectType::ReactWeb);
        let mut events: Vec<Event> = Vec::new();

        let outcome = scaffolder.run(&opts, &mut events).await.unwrap();

        assert_eq!(outcome.target_dir, cwd.path());
        assert!(cwd.path().join("package.json").is_file());
        assert!(cwd.path().join("apps/web/index.ts").is_file());
        assert!(!outcome.installed);
        assert!(events.contains(&Event::InstallSkipped));
        assert!(scaffolder.installer().runner().calls().is_empty());
    }

    #[tokio::test]
    async fn test_current_dir_must_be_empty() {
        let template = template(&["web-react"]);
        let cwd = TempDir::new().unwrap();
        write(cwd.path(), "notes.txt", "keep me");
        let scaffolder = scaffolder(template.path(), cwd.path(), InstallStatus::success())
            .skip_install(true);

        let err = scaffolder
            .run(&options(".", PackageManager::Pnpm, ProjectType::ReactWeb), &mut Vec::<Event>::new())
            .await
            .unwrap_err();

        assert!(matches!(err, ScaffoldError::DirectoryNotEmpty(_)));
        // Nothing was copied before the check failed
        assert!(!cwd.path().join("package.json").exists());
        assert!(!cwd.path().join("apps").exists());
    }

    #[tokio::test]
    async fn test_non_empty_subdirectory_fails_before_copy() {
        let template = template(&["web-react"]);
        let cwd = TempDir::new().unwrap();
        fs::create_dir_all(cwd.path().join("my-app/empty")).unwrap();
        let scaffolder = scaffolder(template.path(), cwd.path(), InstallStatus::success())
            .skip_install(true);

        let err = scaffolder
            .run(&options("my-app", PackageManager::Pnpm, ProjectType::ReactWeb), &mut Vec::<Event>::new())
            .await
            .unwrap_err();

        assert!(matches!(err, ScaffoldError::DirectoryNotEmpty(_)));
        assert!(!cwd.path().join("my-app/package.json").exists());
    }

    #[tokio::test]
    async fn test_traversal_rejected_before_mutation() {
        let template = template(&["web-react"]);
        let root = TempDir::new().unwrap();
        let cwd = root.path().join("work");
        fs::create_dir(&cwd).unwrap();
        let scaffolder = scaffolder(template.path(), &cwd, InstallStatus::success());

        let err = scaffolder
            .run(&options("../evil", PackageManager::Pnpm, ProjectType::ReactWeb), &mut Vec::<Event>::new())
            .await
            .unwrap_err();

        assert!(matches!(err, ScaffoldError::InvalidName(_)));
        assert!(!root.path().join("evil").exists());
        assert!(scaffolder.installer().runner().calls().is_empty());
    }

    #[tokio::test]
    async fn test_missing_variant_falls_back_with_warning() {
        let template = template(&["web-react"]);
        let cwd = TempDir::new().unwrap();
        let scaffolder = scaffolder(template.path(), cwd.path(), InstallStatus::success())
            .skip_install(true);
        let mut events: Vec<Event> = Vec::new();

        let outcome = scaffolder
            .run(&options("app", PackageManager::Pnpm, ProjectType::ReactNative), &mut events)
            .await
            .unwrap();

        assert!(outcome.used_fallback);
        let app = cwd.path().join("app");
        assert_eq!(fs::read_to_string(app.join("apps/web/index.ts")).unwrap(), "web-react");
        assert!(!app.join("apps/mobile").exists());
        assert!(events.iter().any(|e| matches!(e, Event::Warning(w) if w.contains("web-rn"))));
    }

    #[tokio::test]
    async fn test_install_failure_keeps_files() {
        let template = template(&["web-react"]);
        let cwd = TempDir::new().unwrap();
        let scaffolder = scaffolder(template.path(), cwd.path(), InstallStatus::failed(1));
        let opts = options("app", PackageManager::Npm, ProjectType::ReactWeb);

        let mut events: Vec<Event> = Vec::new();

        let err = scaffolder.run(&opts, &mut events).await.unwrap_err();

        assert!(matches!(err, ScaffoldError::InstallError { code: Some(1), .. }));
        // No rollback of materialized files
        assert!(cwd.path().join("app/package.json").is_file());
        assert!(!events.iter().any(|e| matches!(e, Event::Finished { .. })));
    }

    #[tokio::test]
    async fn test_version_warning_reported() {
        let template = template(&["web-react"]);
        write(
            template.path(),
            "template.yaml",
            "min_cli_version: \"9.0.0\"\nfixed: [http-backend, ws-backend]\nvariants:\n  react:\n    source: web-react\n    target: web\n",
        );
        let cwd = TempDir::new().unwrap();
        let scaffolder = scaffolder(template.path(), cwd.path(), InstallStatus::success())
            .skip_install(true)
            .cli_version("0.1.0");
        let mut events: Vec<Event> = Vec::new();

        scaffolder
            .run(&options("app", PackageManager::Pnpm, ProjectType::ReactWeb), &mut events)
            .await
            .unwrap();

        assert!(events.iter().any(|e| matches!(e, Event::Warning(w) if w.contains("9.0.0"))));
    }

    #[tokio::test]
    async fn test_events_in_pipeline_order() {
        let template = template(&["web-react"]);
        let cwd = TempDir::new().unwrap();
        let scaffolder = scaffolder(template.path(), cwd.path(), InstallStatus::success())
            .skip_install(true);
        let mut events: Vec<Event> = Vec::new();

        scaffolder
            .run(&options("app", PackageManager::Pnpm, ProjectType::ReactWeb), &mut events)
            .await
            .unwrap();

        let kinds: Vec<&str> = events
            .iter()
            .map(|e| match e {
                Event::Creating { .. } => "creating",
                Event::CopyStarted => "copy-start",
                Event::CopyFinished { .. } => "copy-done",
                Event::InstallSkipped => "install-skipped",
                Event::Finished { .. } => "finished",
                _ => "other",
            })
            .collect();
        assert_eq!(
            kinds,
            vec!["creating", "copy-start", "copy-done", "install-skipped", "finished"]
        );
    }

    #[test]
    fn test_next_steps() {
        let opts = options("my-app", PackageManager::Pnpm, ProjectType::ReactWeb);
        assert_eq!(next_steps(&opts, true), vec!["cd my-app", "pnpm dev"]);

        let opts = options(".", PackageManager::Npm, ProjectType::ReactWeb);
        assert_eq!(next_steps(&opts, false), vec!["npm install", "npm run dev"]);
    }
}
