//! CLI arguments and top-level wiring.
//!
//! This module contains the clap definition, settings resolution, and the
//! mapping from run results to process exit codes.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::anyhow;
use clap::Parser;

use crate::bootstrap::{BootstrapError, Bootstrapper, Outcome};
use crate::browser::{Browser, NoBrowser, SystemBrowser};
use crate::config::Settings;
use crate::feedback;
use crate::forge::GhCli;
use crate::git::GitCli;
use crate::prompt::LinePrompter;

/// Result type for a CLI run.
pub type CliResult = anyhow::Result<Outcome>;

/// Turn the current directory into a new GitHub repository.
///
/// Initialises git if needed, creates the repository with the GitHub CLI,
/// makes an initial commit when there is no history, and pushes.
#[derive(Parser, Debug)]
#[command(name = "gh-bootstrap")]
#[command(author, version = crate::VERSION, about, long_about = None)]
pub struct Cli {
    /// Directory to publish instead of the current one.
    #[arg(short = 'C', long, value_name = "DIR")]
    pub dir: Option<PathBuf>,

    /// git program to run.
    #[arg(long, value_name = "PROGRAM", env = "GH_BOOTSTRAP_GIT")]
    pub git: Option<String>,

    /// GitHub CLI program to run.
    #[arg(long, value_name = "PROGRAM", env = "GH_BOOTSTRAP_GH")]
    pub gh: Option<String>,

    /// Program used to open the repository page.
    #[arg(long, value_name = "PROGRAM", env = "GH_BOOTSTRAP_BROWSER")]
    pub browser: Option<String>,

    /// Print the repository URL without opening a browser.
    #[arg(long)]
    pub no_browser: bool,

    /// Settings file (default: <config dir>/gh-bootstrap/config.toml).
    #[arg(long, value_name = "FILE", env = "GH_BOOTSTRAP_CONFIG")]
    pub config: Option<PathBuf>,

    /// Log every external command that is run.
    #[arg(short, long)]
    pub verbose: bool,
}

/// Programs and switches after merging flags, env, and settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunOptions {
    /// git program.
    pub git: String,
    /// gh program.
    pub gh: String,
    /// Whether to open the browser at the end.
    pub open_browser: bool,
    /// Opener program, platform default when `None`.
    pub browser: Option<String>,
}

impl Cli {
    /// Merge command-line values over the settings file.
    pub fn resolve(&self, settings: &Settings) -> RunOptions {
        RunOptions {
            git: self
                .git
                .clone()
                .unwrap_or_else(|| settings.tools.git.clone()),
            gh: self.gh.clone().unwrap_or_else(|| settings.tools.gh.clone()),
            open_browser: settings.browser.open && !self.no_browser,
            browser: self
                .browser
                .clone()
                .or_else(|| settings.browser.command.clone()),
        }
    }
}

/// Set up `log` output; `RUST_LOG` wins over `--verbose`.
pub fn init_logging(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .format_timestamp(None)
        .init();
}

/// Resolve the directory to publish to an absolute path.
pub fn resolve_workdir(dir: Option<&Path>) -> anyhow::Result<PathBuf> {
    let dir = match dir {
        Some(d) => d.to_path_buf(),
        None => std::env::current_dir()
            .map_err(|e| anyhow!("Cannot determine the current directory: {e}"))?,
    };
    let canonical = dir
        .canonicalize()
        .map_err(|e| anyhow!("Cannot use directory {}: {e}", dir.display()))?;
    if !canonical.is_dir() {
        return Err(anyhow!("{} is not a directory", canonical.display()));
    }
    Ok(canonical)
}

/// Run the bootstrap flow with real tools and the terminal.
pub fn run(cli: &Cli) -> CliResult {
    let settings = Settings::load(cli.config.as_deref())?;
    let options = cli.resolve(&settings);
    let workdir = resolve_workdir(cli.dir.as_deref())?;
    log::debug!("publishing {} with {:?}", workdir.display(), options);

    let git = GitCli::new(options.git, workdir.clone());
    let gh = GhCli::new(options.gh, workdir.clone());
    let browser: Box<dyn Browser> = if options.open_browser {
        Box::new(SystemBrowser::new(options.browser, workdir.clone()))
    } else {
        Box::new(NoBrowser)
    };

    let mut bootstrapper = Bootstrapper::new(git, gh, browser, LinePrompter::stdio(), workdir);
    Ok(bootstrapper.run()?)
}

/// Exit status for a failed run.
pub fn exit_status(err: &anyhow::Error) -> u8 {
    err.downcast_ref::<BootstrapError>()
        .and_then(|e| u8::try_from(e.exit_code()).ok())
        .filter(|code| *code != 0)
        .unwrap_or(1)
}

/// Report the run result and convert it to an exit code.
pub fn handle_result(result: CliResult) -> ExitCode {
    match result {
        Ok(Outcome::Declined) => ExitCode::SUCCESS,
        Ok(Outcome::Published { name, branch, .. }) => {
            feedback::success(&format!("Published {name} ({branch})"));
            ExitCode::SUCCESS
        }
        Err(err) => {
            feedback::error(&err.to_string());
            ExitCode::from(exit_status(&err))
        }
    }
}
