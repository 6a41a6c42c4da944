//! Opening URLs in the operator's browser.

use std::path::PathBuf;

use crate::tool::{Tool, ToolError};

/// Something that can show a URL to the operator.
pub trait Browser {
    /// Try to open `url`. Callers treat failure as non-fatal.
    fn open(&self, url: &str) -> Result<(), ToolError>;
}

impl<T: Browser + ?Sized> Browser for Box<T> {
    fn open(&self, url: &str) -> Result<(), ToolError> {
        (**self).open(url)
    }
}

/// Platform URL opener used when none is configured.
pub fn default_opener() -> &'static str {
    #[cfg(target_os = "macos")]
    {
        "open"
    }
    #[cfg(windows)]
    {
        "explorer"
    }
    #[cfg(not(any(target_os = "macos", windows)))]
    {
        "xdg-open"
    }
}

/// [`Browser`] that runs an opener program with the URL as its argument.
#[derive(Debug, Clone)]
pub struct SystemBrowser {
    tool: Tool,
}

impl SystemBrowser {
    /// Use `program` (or the platform default) to open URLs.
    pub fn new(program: Option<String>, workdir: impl Into<PathBuf>) -> Self {
        let program = program.unwrap_or_else(|| default_opener().to_string());
        Self {
            tool: Tool::new(program, workdir),
        }
    }
}

impl Browser for SystemBrowser {
    fn open(&self, url: &str) -> Result<(), ToolError> {
        self.tool.run(&[url])
    }
}

/// [`Browser`] that never opens anything, for `--no-browser`.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoBrowser;

impl Browser for NoBrowser {
    fn open(&self, _url: &str) -> Result<(), ToolError> {
        Ok(())
    }
}
