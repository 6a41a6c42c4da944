//! External command-line tools.
//!
//! Every collaborator (git, gh, the browser opener) is a plain program on
//! `PATH`. This module locates them and runs them in the target directory.

use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};

use log::debug;

/// Error type for external tool invocations.
#[derive(Debug, thiserror::Error)]
pub enum ToolError {
    /// The program could not be started at all.
    #[error("Failed to run {program}: {source}")]
    Spawn {
        /// Program that failed to start.
        program: String,
        /// Underlying OS error.
        #[source]
        source: std::io::Error,
    },
    /// The program ran and reported failure.
    #[error("`{command}` failed ({})", describe_code(.code))]
    Failed {
        /// Full command line, for display.
        command: String,
        /// Exit code, or None when killed by a signal.
        code: Option<i32>,
    },
    /// The program succeeded but printed something we could not parse.
    #[error("Unexpected output from {program}: {source}")]
    InvalidOutput {
        /// Program whose output was rejected.
        program: String,
        /// Parse error.
        #[source]
        source: serde_json::Error,
    },
}

impl ToolError {
    /// Exit code reported by the tool, if it exited normally.
    pub fn exit_code(&self) -> Option<i32> {
        match self {
            ToolError::Failed { code, .. } => *code,
            ToolError::Spawn { .. } | ToolError::InvalidOutput { .. } => None,
        }
    }
}

fn describe_code(code: &Option<i32>) -> String {
    match code {
        Some(c) => format!("exit code {c}"),
        None => "terminated by signal".to_string(),
    }
}

/// A program invoked with a fixed working directory.
#[derive(Debug, Clone)]
pub struct Tool {
    program: String,
    workdir: PathBuf,
}

impl Tool {
    /// Create a tool that runs `program` inside `workdir`.
    pub fn new(program: impl Into<String>, workdir: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            workdir: workdir.into(),
        }
    }

    /// Program name or path as configured.
    pub fn program(&self) -> &str {
        &self.program
    }

    /// Directory the program runs in.
    pub fn workdir(&self) -> &Path {
        &self.workdir
    }

    /// Check whether the program can be found (via `PATH` for bare names).
    pub fn is_installed(&self) -> bool {
        match self.locate() {
            Ok(path) => {
                debug!("found {} at {}", self.program, path.display());
                true
            }
            Err(e) => {
                debug!("{} not found: {e}", self.program);
                false
            }
        }
    }

    /// Absolute path of the program.
    ///
    /// Relative paths are resolved against our own working directory, not
    /// `workdir`, so the check and the spawn agree on what they run.
    pub fn locate(&self) -> Result<PathBuf, which::Error> {
        which::which(&self.program)
    }

    /// Run with the operator's terminal attached to stdout and stderr.
    ///
    /// Used for mutating commands whose output the operator should see.
    pub fn run(&self, args: &[&str]) -> Result<(), ToolError> {
        let status = self
            .command(args)
            .status()
            .map_err(|source| self.spawn_error(source))?;

        if status.success() {
            Ok(())
        } else {
            Err(self.failed(args, status.code()))
        }
    }

    /// Run quietly and report only whether the program succeeded.
    pub fn succeeds(&self, args: &[&str]) -> Result<bool, ToolError> {
        Ok(self.output(args)?.status.success())
    }

    /// Run quietly and return trimmed stdout, failing on non-zero exit.
    pub fn capture(&self, args: &[&str]) -> Result<String, ToolError> {
        let output = self.output(args)?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            if !stderr.trim().is_empty() {
                debug!("{} stderr: {}", self.program, stderr.trim());
            }
            return Err(self.failed(args, output.status.code()));
        }
        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }

    fn output(&self, args: &[&str]) -> Result<Output, ToolError> {
        self.command(args)
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .map_err(|source| self.spawn_error(source))
    }

    fn command(&self, args: &[&str]) -> Command {
        debug!("running {} in {}", self.render(args), self.workdir.display());
        let program = self
            .locate()
            .unwrap_or_else(|_| PathBuf::from(&self.program));
        let mut cmd = Command::new(program);
        // Prompt answers are read from our stdin; children must not eat them.
        cmd.args(args)
            .current_dir(&self.workdir)
            .stdin(Stdio::null());
        cmd
    }

    fn render(&self, args: &[&str]) -> String {
        if args.is_empty() {
            self.program.clone()
        } else {
            format!("{} {}", self.program, args.join(" "))
        }
    }

    fn spawn_error(&self, source: std::io::Error) -> ToolError {
        ToolError::Spawn {
            program: self.program.clone(),
            source,
        }
    }

    fn failed(&self, args: &[&str], code: Option<i32>) -> ToolError {
        ToolError::Failed {
            command: self.render(args),
            code,
        }
    }
}
