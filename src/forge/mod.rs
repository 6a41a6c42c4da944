//! GitHub access through the `gh` CLI.
//!
//! Authentication is whatever `gh auth login` left behind; nothing here
//! touches credentials.

use std::fmt;
use std::path::PathBuf;

use serde::Deserialize;

use crate::tool::{Tool, ToolError};

/// Repository visibility on the hosting provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Visibility {
    /// Only visible to the owner and collaborators.
    #[default]
    Private,
    /// Visible to everyone.
    Public,
}

impl Visibility {
    /// The `gh repo create` flag for this visibility.
    pub fn flag(self) -> &'static str {
        match self {
            Visibility::Private => "--private",
            Visibility::Public => "--public",
        }
    }
}

impl fmt::Display for Visibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Visibility::Private => write!(f, "private"),
            Visibility::Public => write!(f, "public"),
        }
    }
}

/// Parameters of a `create repository` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateRepo<'a> {
    /// Repository name.
    pub name: &'a str,
    /// Description; `None` omits the flag entirely.
    pub description: Option<&'a str>,
    /// Public or private.
    pub visibility: Visibility,
    /// Name to give the new remote in the local repository.
    pub remote: &'a str,
}

impl CreateRepo<'_> {
    /// Build the `gh` argument list for this request.
    pub fn to_args(&self) -> Vec<&str> {
        let mut args = vec!["repo", "create", self.name];
        if let Some(description) = self.description {
            args.push("--description");
            args.push(description);
        }
        args.push(self.visibility.flag());
        args.push("--source=.");
        args.push("--remote");
        args.push(self.remote);
        args.push("--confirm");
        args
    }
}

/// Hosting-provider operations the bootstrapper needs.
pub trait HostingTool {
    /// Whether the hosting CLI can be found.
    fn is_installed(&self) -> bool;

    /// Create the remote repository and register it as a local remote.
    fn create_repo(&self, request: &CreateRepo<'_>) -> Result<(), ToolError>;

    /// Login of the authenticated user.
    fn current_login(&self) -> Result<String, ToolError>;

    /// Canonical web URL of `owner/name`.
    fn repo_url(&self, full_name: &str) -> Result<String, ToolError>;
}

/// The authenticated user as returned by `gh api user`.
#[derive(Debug, Clone, Deserialize)]
pub struct GhUser {
    /// Account login.
    pub login: String,
}

/// A repository as returned by `gh repo view --json url`.
#[derive(Debug, Clone, Deserialize)]
pub struct GhRepoView {
    /// Web URL of the repository.
    pub url: String,
}

/// [`HostingTool`] backed by the `gh` command line.
#[derive(Debug, Clone)]
pub struct GhCli {
    tool: Tool,
}

impl GhCli {
    /// Create a gh wrapper for `program` operating in `workdir`.
    pub fn new(program: impl Into<String>, workdir: impl Into<PathBuf>) -> Self {
        Self {
            tool: Tool::new(program, workdir),
        }
    }

    fn fetch_json<T: for<'de> Deserialize<'de>>(&self, args: &[&str]) -> Result<T, ToolError> {
        let out = self.tool.capture(args)?;
        serde_json::from_str(&out).map_err(|source| ToolError::InvalidOutput {
            program: self.tool.program().to_string(),
            source,
        })
    }
}

impl HostingTool for GhCli {
    fn is_installed(&self) -> bool {
        self.tool.is_installed()
    }

    fn create_repo(&self, request: &CreateRepo<'_>) -> Result<(), ToolError> {
        self.tool.run(&request.to_args())
    }

    fn current_login(&self) -> Result<String, ToolError> {
        let user: GhUser = self.fetch_json(&["api", "user"])?;
        Ok(user.login)
    }

    fn repo_url(&self, full_name: &str) -> Result<String, ToolError> {
        let view: GhRepoView = self.fetch_json(&["repo", "view", full_name, "--json", "url"])?;
        Ok(view.url)
    }
}

/// Fallback web URL when `gh` cannot report one.
pub fn github_url(login: &str, name: &str) -> String {
    format!("https://github.com/{login}/{name}")
}
