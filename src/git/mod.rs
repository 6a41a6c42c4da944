//! Git operations.
//!
//! This module handles repository detection, initialisation, the initial
//! commit, and pushing with upstream tracking.

use std::path::PathBuf;

use crate::tool::{Tool, ToolError};

/// Version-control operations the bootstrapper needs.
pub trait VersionControl {
    /// Whether the version-control program can be found.
    fn is_installed(&self) -> bool;

    /// Whether the target directory is inside a working tree.
    fn is_work_tree(&self) -> Result<bool, ToolError>;

    /// Initialise an empty repository in place.
    fn init(&self) -> Result<(), ToolError>;

    /// Whether HEAD resolves to a commit.
    fn has_head(&self) -> Result<bool, ToolError>;

    /// Stage everything in the working tree.
    fn stage_all(&self) -> Result<(), ToolError>;

    /// Commit staged changes with a message.
    fn commit(&self, message: &str) -> Result<(), ToolError>;

    /// Push `branch` to `remote` and set it as upstream.
    fn push_upstream(&self, remote: &str, branch: &str) -> Result<(), ToolError>;
}

/// [`VersionControl`] backed by the `git` command line.
#[derive(Debug, Clone)]
pub struct GitCli {
    tool: Tool,
}

impl GitCli {
    /// Create a git wrapper for `program` operating in `workdir`.
    pub fn new(program: impl Into<String>, workdir: impl Into<PathBuf>) -> Self {
        Self {
            tool: Tool::new(program, workdir),
        }
    }
}

impl VersionControl for GitCli {
    fn is_installed(&self) -> bool {
        self.tool.is_installed()
    }

    fn is_work_tree(&self) -> Result<bool, ToolError> {
        match self.tool.capture(&["rev-parse", "--is-inside-work-tree"]) {
            Ok(out) => Ok(out == "true"),
            Err(ToolError::Failed { .. }) => Ok(false),
            Err(e) => Err(e),
        }
    }

    fn init(&self) -> Result<(), ToolError> {
        self.tool.run(&["init"])
    }

    fn has_head(&self) -> Result<bool, ToolError> {
        self.tool
            .succeeds(&["rev-parse", "--verify", "--quiet", "HEAD"])
    }

    fn stage_all(&self) -> Result<(), ToolError> {
        self.tool.run(&["add", "-A"])
    }

    fn commit(&self, message: &str) -> Result<(), ToolError> {
        self.tool.run(&["commit", "-m", message])
    }

    fn push_upstream(&self, remote: &str, branch: &str) -> Result<(), ToolError> {
        self.tool.run(&["push", "-u", remote, branch])
    }
}
