//! Turning a directory into a published GitHub repository.
//!
//! The run is strictly linear:
//!
//! ```text
//! check tools -> check or init repo -> collect params -> create remote
//!   -> commit if needed -> push main -[fail]-> push master -> report
//! ```
//!
//! The first failing step ends the run. Nothing already done is rolled
//! back; a remote that was created but never pushed to stays as it is.

use std::fmt;
use std::io;
use std::path::{Path, PathBuf};

use log::debug;

use crate::browser::Browser;
use crate::feedback;
use crate::forge::{github_url, CreateRepo, HostingTool, Visibility};
use crate::git::VersionControl;
use crate::prompt::{
    self, resolve_confirmation, resolve_description, resolve_name, resolve_visibility, Prompter,
};
use crate::tool::ToolError;

/// Name of the remote the new repository is registered under.
pub const REMOTE_NAME: &str = "origin";
/// Message of the commit created in a repository without history.
pub const INITIAL_COMMIT_MESSAGE: &str = "Initial commit";
/// Branch pushed first, and the one tried when that push fails.
pub const PUSH_BRANCHES: [&str; 2] = ["main", "master"];

/// Install instructions shown when gh is missing.
pub const GH_INSTALL_HINT: &str =
    "Install it from https://cli.github.com/ and sign in with `gh auth login`.";
/// Install instructions shown when git is missing.
pub const GIT_INSTALL_HINT: &str = "Install it from https://git-scm.com/downloads.";

/// Everything needed to create and publish the repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoParams {
    /// Repository name on GitHub.
    pub name: String,
    /// Optional description; `None` is not the same as an empty string.
    pub description: Option<String>,
    /// Public or private.
    pub visibility: Visibility,
    /// Local directory being published.
    pub workdir: PathBuf,
}

impl RepoParams {
    /// The hosting-tool request for these parameters.
    pub fn create_request(&self) -> CreateRepo<'_> {
        CreateRepo {
            name: &self.name,
            description: self.description.as_deref(),
            visibility: self.visibility,
            remote: REMOTE_NAME,
        }
    }
}

/// How a run ended, when it did not fail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The operator chose not to continue in an existing repository.
    Declined,
    /// The repository was created and pushed.
    Published {
        /// Repository name.
        name: String,
        /// Branch that was pushed.
        branch: &'static str,
        /// Web URL, when it could be determined.
        url: Option<String>,
    },
}

/// A step of the run that can fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Checking whether the directory is already a repository.
    DetectRepository,
    /// `git init`.
    Initialise,
    /// Creating the GitHub repository.
    CreateRemote,
    /// Checking whether HEAD resolves.
    CheckHead,
    /// Staging files for the initial commit.
    Stage,
    /// Creating the initial commit.
    Commit,
    /// Pushing (after the fallback branch was tried too).
    Push,
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Step::DetectRepository => "check for an existing git repository",
            Step::Initialise => "initialise the git repository",
            Step::CreateRemote => "create the GitHub repository",
            Step::CheckHead => "check for existing commits",
            Step::Stage => "stage files",
            Step::Commit => "create the initial commit",
            Step::Push => "push to GitHub",
        };
        f.write_str(text)
    }
}

/// Error type for a bootstrap run.
#[derive(Debug, thiserror::Error)]
pub enum BootstrapError {
    /// A required program is not installed.
    #[error("{program} is not installed. {hint}")]
    MissingTool {
        /// Program that could not be found.
        program: String,
        /// How to install it.
        hint: &'static str,
    },
    /// Neither the prompt nor the directory supplied a repository name.
    #[error("No repository name given and the directory has no name to default to")]
    NoRepoName,
    /// Reading an answer from the operator failed.
    #[error("Failed to read input: {0}")]
    Prompt(#[from] io::Error),
    /// An external tool failed during a step.
    #[error("Could not {step}: {source}")]
    Step {
        /// Step that failed.
        step: Step,
        /// The tool failure.
        #[source]
        source: ToolError,
    },
}

impl BootstrapError {
    /// Process exit status for this error.
    ///
    /// Tool failures pass the tool's own exit status through; everything
    /// else is 1.
    pub fn exit_code(&self) -> i32 {
        match self {
            BootstrapError::Step { source, .. } => {
                source.exit_code().filter(|code| *code != 0).unwrap_or(1)
            }
            _ => 1,
        }
    }

    fn step(step: Step) -> impl FnOnce(ToolError) -> Self {
        move |source| BootstrapError::Step { step, source }
    }
}

/// Default repository name: the directory's own name.
pub fn default_repo_name(workdir: &Path) -> Option<String> {
    workdir
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .filter(|name| !name.is_empty())
}

/// Drives one bootstrap run against its collaborators.
pub struct Bootstrapper<G, H, B, P> {
    git: G,
    forge: H,
    browser: B,
    prompter: P,
    workdir: PathBuf,
}

impl<G, H, B, P> Bootstrapper<G, H, B, P>
where
    G: VersionControl,
    H: HostingTool,
    B: Browser,
    P: Prompter,
{
    /// Create a bootstrapper for `workdir`.
    pub fn new(git: G, forge: H, browser: B, prompter: P, workdir: impl Into<PathBuf>) -> Self {
        Self {
            git,
            forge,
            browser,
            prompter,
            workdir: workdir.into(),
        }
    }

    /// Run the whole flow front to back.
    pub fn run(&mut self) -> Result<Outcome, BootstrapError> {
        self.check_tools()?;
        if !self.prepare_repository()? {
            return Ok(Outcome::Declined);
        }
        let params = self.collect_params()?;
        self.publish(&params)
    }

    /// Fail unless gh and git are both available.
    pub fn check_tools(&self) -> Result<(), BootstrapError> {
        feedback::step("Checking for gh and git");
        if !self.forge.is_installed() {
            return Err(BootstrapError::MissingTool {
                program: "gh (GitHub CLI)".to_string(),
                hint: GH_INSTALL_HINT,
            });
        }
        if !self.git.is_installed() {
            return Err(BootstrapError::MissingTool {
                program: "git".to_string(),
                hint: GIT_INSTALL_HINT,
            });
        }
        Ok(())
    }

    /// Initialise a repository, or confirm reuse of an existing one.
    ///
    /// Returns false when the operator declines to continue.
    pub fn prepare_repository(&mut self) -> Result<bool, BootstrapError> {
        let exists = self
            .git
            .is_work_tree()
            .map_err(BootstrapError::step(Step::DetectRepository))?;

        if exists {
            let answer = self.prompter.ask(prompt::CONFIRM_EXISTING)?;
            if !resolve_confirmation(&answer) {
                feedback::step("Cancelled, nothing was changed");
                return Ok(false);
            }
            debug!("continuing in existing repository at {}", self.workdir.display());
            return Ok(true);
        }

        feedback::step("Initialising git repository");
        self.git
            .init()
            .map_err(BootstrapError::step(Step::Initialise))?;
        Ok(true)
    }

    /// Ask for name, description, and visibility.
    pub fn collect_params(&mut self) -> Result<RepoParams, BootstrapError> {
        let default_name = default_repo_name(&self.workdir);

        let answer = self
            .prompter
            .ask(&prompt::name_question(default_name.as_deref()))?;
        let name =
            resolve_name(&answer, default_name.as_deref()).ok_or(BootstrapError::NoRepoName)?;

        let answer = self.prompter.ask(prompt::DESCRIPTION_QUESTION)?;
        let description = resolve_description(&answer);

        let answer = self.prompter.ask(prompt::VISIBILITY_MENU)?;
        let visibility = resolve_visibility(&answer);

        Ok(RepoParams {
            name,
            description,
            visibility,
            workdir: self.workdir.clone(),
        })
    }

    /// Create the remote, commit if needed, push, and report.
    pub fn publish(&self, params: &RepoParams) -> Result<Outcome, BootstrapError> {
        feedback::step(&format!(
            "Creating {} GitHub repository {}",
            params.visibility, params.name
        ));
        self.forge
            .create_repo(&params.create_request())
            .map_err(BootstrapError::step(Step::CreateRemote))?;

        self.commit_if_needed()?;
        let branch = self.push_with_fallback()?;
        let url = self.report(&params.name);

        Ok(Outcome::Published {
            name: params.name.clone(),
            branch,
            url,
        })
    }

    /// Create the initial commit unless HEAD already resolves.
    ///
    /// Returns whether a commit was made.
    pub fn commit_if_needed(&self) -> Result<bool, BootstrapError> {
        let has_head = self
            .git
            .has_head()
            .map_err(BootstrapError::step(Step::CheckHead))?;
        if has_head {
            feedback::success("Existing commits found, leaving history untouched");
            return Ok(false);
        }

        feedback::step("Creating initial commit");
        self.git
            .stage_all()
            .map_err(BootstrapError::step(Step::Stage))?;
        self.git
            .commit(INITIAL_COMMIT_MESSAGE)
            .map_err(BootstrapError::step(Step::Commit))?;
        Ok(true)
    }

    /// Push to `origin/main`, falling back to `origin/master`.
    ///
    /// Returns the branch that was pushed.
    pub fn push_with_fallback(&self) -> Result<&'static str, BootstrapError> {
        let [primary, fallback] = PUSH_BRANCHES;

        feedback::step(&format!("Pushing to {REMOTE_NAME}/{primary}"));
        match self.git.push_upstream(REMOTE_NAME, primary) {
            Ok(()) => Ok(primary),
            Err(e) => {
                debug!("push to {REMOTE_NAME}/{primary} failed: {e}");
                feedback::step(&format!(
                    "Push to {primary} failed, trying {REMOTE_NAME}/{fallback}"
                ));
                self.git
                    .push_upstream(REMOTE_NAME, fallback)
                    .map_err(BootstrapError::step(Step::Push))?;
                Ok(fallback)
            }
        }
    }

    /// Print the repository URL and try to open it. Never fails the run.
    pub fn report(&self, name: &str) -> Option<String> {
        let url = self.resolve_url(name)?;
        feedback::success(&format!("Repository ready: {url}"));

        if let Err(e) = self.browser.open(&url) {
            debug!("could not open browser: {e}");
        }
        Some(url)
    }

    fn resolve_url(&self, name: &str) -> Option<String> {
        let login = match self.forge.current_login() {
            Ok(login) => login,
            Err(e) => {
                debug!("could not read GitHub login: {e}");
                feedback::warning("Could not determine your GitHub login; no link to show.");
                return None;
            }
        };

        match self.forge.repo_url(&format!("{login}/{name}")) {
            Ok(url) => Some(url),
            Err(e) => {
                debug!("gh repo view failed, building URL by hand: {e}");
                Some(github_url(&login, name))
            }
        }
    }
}
