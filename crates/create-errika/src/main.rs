//! create-errika - Project scaffolding for Errika monorepos

use clap::Parser;
use errika_core::tui::{self, CreateArgs};
use std::path::PathBuf;
use std::process::ExitCode;

/// CLI version
pub const CLI_VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Parser, Debug)]
#[command(name = "create-errika")]
#[command(about = "CLI for scaffolding Errika monorepo projects")]
#[command(version)]
pub struct Args {
    /// Project name, or "." for the current directory. Omit to answer questions interactively
    pub name: Option<String>,

    /// Local directory to use for templates instead of the bundled one (for development use)
    #[arg(long = "template-dir")]
    pub template_dir: Option<PathBuf>,

    /// Skip the package manager check and `install` step
    #[arg(long = "skip-install")]
    pub skip_install: bool,
}

impl From<Args> for CreateArgs {
    fn from(args: Args) -> Self {
        CreateArgs {
            name: args.name,
            template_dir: args.template_dir,
            skip_install: args.skip_install,
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    // Ensure terminal cursor is restored on panic
    let default_panic = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = console::Term::stderr().show_cursor();
        default_panic(info);
    }));

    // Ctrl+C outside a prompt (e.g. during install) ends the whole process
    ctrlc::set_handler(move || {
        let _ = console::Term::stderr().show_cursor();
        std::process::exit(130);
    })
    .ok();

    let args = Args::parse();
    let result = errika_core::run(args.into(), CLI_VERSION).await;

    // Ensure cursor is visible on normal exit
    let _ = console::Term::stderr().show_cursor();

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tui::render_error(&e);
            ExitCode::FAILURE
        }
    }
}
