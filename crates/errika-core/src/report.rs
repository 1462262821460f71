//! Progress reporting
//!
//! The pipeline emits [`Event`]s; reporters only render them.

use crate::options::PackageManager;
use colored::Colorize;
use std::path::PathBuf;

/// Something worth telling the user about
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Scaffolding is about to start
    Creating { display_name: String, target: PathBuf },
    /// The package manager was found on PATH
    ToolFound {
        package_manager: PackageManager,
        version: Option<String>,
    },
    /// Non-fatal problem (variant fallback, version mismatch)
    Warning(String),
    CopyStarted,
    CopyFinished { files: usize, target: PathBuf },
    InstallStarted { package_manager: PackageManager },
    InstallFinished,
    InstallSkipped,
    /// Run completed; steps the user should take next
    Finished { next_steps: Vec<String> },
}

/// Renders pipeline events
pub trait Reporter {
    fn report(&mut self, event: Event);
}

/// Collects events, for inspection after a run
impl Reporter for Vec<Event> {
    fn report(&mut self, event: Event) {
        self.push(event);
    }
}

/// Plain colored line output
#[derive(Debug, Default)]
pub struct PlainReporter;

impl Reporter for PlainReporter {
    fn report(&mut self, event: Event) {
        match event {
            Event::Creating {
                display_name,
                target,
            } => {
                println!(
                    "{}",
                    format!("Creating project in \"{}\"...", display_name).bold()
                );
                println!("  {} {}", "->".blue(), target.display().to_string().dimmed());
            }
            Event::ToolFound {
                package_manager,
                version,
            } => println!(
                "{} {} ({})",
                "Found".green(),
                package_manager,
                version.as_deref().unwrap_or("unknown version")
            ),
            Event::Warning(message) => eprintln!("{} {}", "Warning:".yellow(), message),
            Event::CopyStarted => println!("{}", "Copying template...".cyan()),
            Event::CopyFinished { files, target } => println!(
                "{} {} files into {}",
                "Copied".green(),
                files,
                target.display()
            ),
            Event::InstallStarted { package_manager } => println!(
                "{}",
                format!("Installing dependencies using {}...", package_manager).blue()
            ),
            Event::InstallFinished => println!("{}", "Dependencies installed".green()),
            Event::InstallSkipped => println!("{}", "Skipping dependency install".dimmed()),
            Event::Finished { next_steps } => {
                println!();
                println!("  Next steps");
                println!();
                for (i, step) in next_steps.iter().enumerate() {
                    println!("  {}.  {}", i + 1, step);
                }
                println!();
                println!("{}", "Project setup complete! Happy hacking!".green().bold());
            }
        }
    }
}
