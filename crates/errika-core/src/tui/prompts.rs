//! Charm-style CLI prompts using cliclack

use crate::config::{
    Answer, ConfigProvider, DirectOptions, InteractiveOptions, OptionsStrategy, Resolution,
};
use crate::error::{Result, ScaffoldError};
use crate::options::{PackageManager, ProjectType};
use crate::report::{Event, PlainReporter, Reporter};
use crate::runtime::install::ShellInstallRunner;
use crate::runtime::tool;
use crate::templates;
use crate::validate::validate_name;
use crate::Scaffolder;
use std::io;
use std::path::PathBuf;

/// CLI arguments for the create command
#[derive(Debug, Clone, Default)]
pub struct CreateArgs {
    /// Project name; `None` selects the interactive questions
    pub name: Option<String>,

    /// Local directory to use for templates instead of the bundled one
    pub template_dir: Option<PathBuf>,

    /// Skip the package manager check and dependency install
    pub skip_install: bool,
}

/// Map a prompt result, treating Esc / Ctrl+C as cancellation
fn answer<T>(result: io::Result<T>) -> Result<Answer<T>> {
    match result {
        Ok(value) => Ok(Answer::Value(value)),
        Err(e) if e.kind() == io::ErrorKind::Interrupted => Ok(Answer::Cancelled),
        Err(e) => Err(e.into()),
    }
}

/// Asks the three project questions in the terminal
#[derive(Debug, Default)]
pub struct ClackProvider;

impl ConfigProvider for ClackProvider {
    fn ask_name(&mut self) -> Result<Answer<String>> {
        answer(
            cliclack::input("Project name")
                .placeholder("my-app")
                .validate(|input: &String| validate_name(input).map_err(|e| e.to_string()))
                .interact(),
        )
    }

    fn ask_package_manager(&mut self) -> Result<Answer<String>> {
        let mut select = cliclack::select("Package manager");
        for pm in PackageManager::ALL {
            select = select.item(pm.command(), pm.display_name(), pm.description());
        }
        answer(select.interact()).map(|a| match a {
            Answer::Value(command) => Answer::Value(command.to_string()),
            Answer::Cancelled => Answer::Cancelled,
        })
    }

    fn ask_project_type(&mut self) -> Result<Answer<String>> {
        let mut select = cliclack::select("Project type");
        for project_type in ProjectType::ALL {
            select = select.item(
                project_type.key(),
                project_type.display_name(),
                project_type.description(),
            );
        }
        answer(
            select
                .initial_value(ProjectType::default().key())
                .interact(),
        )
        .map(|a| match a {
            Answer::Value(key) => Answer::Value(key.to_string()),
            Answer::Cancelled => Answer::Cancelled,
        })
    }

    fn reject(&mut self, error: &ScaffoldError) -> Result<()> {
        cliclack::log::error(error.to_string())?;
        Ok(())
    }
}

/// Renders pipeline events as cliclack log lines and spinners
#[derive(Default)]
pub struct ClackReporter {
    spinner: Option<cliclack::ProgressBar>,
}

impl ClackReporter {
    /// Stop a running spinner after a failure
    pub fn abort(&mut self) {
        if let Some(spinner) = self.spinner.take() {
            spinner.error("Failed");
        }
    }

    fn render(&mut self, event: Event) -> io::Result<()> {
        match event {
            Event::Creating {
                display_name,
                target,
            } => cliclack::log::step(format!(
                "Creating project in \"{}\" ({})",
                display_name,
                target.display()
            )),
            Event::ToolFound {
                package_manager,
                version,
            } => cliclack::log::success(format!(
                "{} installed ({})",
                package_manager,
                version.as_deref().unwrap_or("unknown")
            )),
            Event::Warning(message) => cliclack::log::warning(message),
            Event::CopyStarted => {
                let spinner = cliclack::spinner();
                spinner.start("Copying template...");
                self.spinner = Some(spinner);
                Ok(())
            }
            Event::CopyFinished { files, target } => {
                let message = format!("Copied {} files into {}", files, target.display());
                match self.spinner.take() {
                    Some(spinner) => {
                        spinner.stop(message);
                        Ok(())
                    }
                    None => cliclack::log::success(message),
                }
            }
            Event::InstallStarted { package_manager } => cliclack::log::step(format!(
                "Installing dependencies using {}...",
                package_manager
            )),
            Event::InstallFinished => cliclack::log::success("Dependencies installed"),
            Event::InstallSkipped => cliclack::log::info("Skipping dependency install"),
            Event::Finished { next_steps } => {
                println!();
                println!("  Next steps");
                println!();

                for (i, step) in next_steps.iter().enumerate() {
                    println!("  {}.  {}", i + 1, step);
                }

                cliclack::outro("Project setup complete! Happy hacking!")
            }
        }
    }
}

impl Reporter for ClackReporter {
    fn report(&mut self, event: Event) {
        // Output failures must not change the outcome of the run
        let _ = self.render(event);
    }
}

/// Run the create flow. Cancellation returns `Ok(())`.
pub async fn run(args: CreateArgs, cli_version: &str) -> Result<()> {
    cliclack::intro("create-errika")?;

    let interactive = args.name.is_none();
    let mut strategy: Box<dyn OptionsStrategy> = match args.name {
        Some(name) => Box::new(DirectOptions::new(name)),
        None => Box::new(InteractiveOptions::new(ClackProvider)),
    };

    let options = match strategy.resolve()? {
        Resolution::Options(options) => options,
        Resolution::Cancelled => {
            cliclack::outro_cancel("Setup cancelled.")?;
            return Ok(());
        }
    };

    let template_root = templates::locate_template_root(args.template_dir.as_deref())?;
    if args.template_dir.is_some() {
        cliclack::log::info(format!("Using local templates from {}", template_root.display()))?;
    }

    let cwd = std::env::current_dir().map_err(|e| ScaffoldError::CopyError {
        path: PathBuf::from("."),
        source: e,
    })?;

    let scaffolder = Scaffolder::new(template_root, cwd, ShellInstallRunner)
        .skip_install(args.skip_install)
        .cli_version(cli_version);

    // Spinners only make sense on a terminal; piped direct runs get plain lines
    let result = if interactive || console::Term::stdout().is_term() {
        let mut reporter = ClackReporter::default();
        let result = scaffolder.run(&options, &mut reporter).await;
        if result.is_err() {
            reporter.abort();
        }
        result
    } else {
        scaffolder.run(&options, &mut PlainReporter).await
    };

    match result {
        Ok(_) => Ok(()),
        Err(e) => {
            if interactive && matches!(e, ScaffoldError::ToolNotFound { .. }) {
                offer_install_docs(options.package_manager)?;
            }
            Err(e)
        }
    }
}

/// Let the user open the package manager's install docs before exiting
fn offer_install_docs(package_manager: PackageManager) -> Result<()> {
    let tool = tool::for_package_manager(package_manager);

    let open_docs = answer(
        cliclack::confirm(format!(
            "{} is not installed. Open the installation docs?",
            tool.config().display_name
        ))
        .initial_value(true)
        .interact(),
    )?;

    if open_docs == Answer::Value(true) {
        if let Err(e) = tool.open_docs() {
            cliclack::log::warning(format!("Could not open browser: {}", e))?;
        }
    }
    Ok(())
}

/// Print a terminal error with its remediation hint
pub fn render_error(error: &ScaffoldError) {
    let _ = cliclack::log::error(error.to_string());
    if let Some(hint) = error.hint() {
        let _ = cliclack::log::remark(hint);
    }
    let _ = cliclack::outro_cancel("Setup failed.");
}
