//! gh-bootstrap - turn a directory into a new GitHub repository.
//!
//! The library holds the whole flow so it can be driven by fakes in tests;
//! the binary only parses arguments and maps the result to an exit code.
//!
//! External programs sit behind one trait each: [`git::VersionControl`],
//! [`forge::HostingTool`], [`browser::Browser`], and [`prompt::Prompter`].

#![deny(missing_docs)]

/// Version string from Cargo.toml.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod bootstrap;
pub mod browser;
pub mod cli;
pub mod config;
pub mod feedback;
pub mod forge;
pub mod git;
pub mod prompt;
pub mod tool;

pub use bootstrap::{BootstrapError, Bootstrapper, Outcome, RepoParams};
