//! gh-bootstrap - turn a directory into a new GitHub repository.
//!
//! This is the main entry point for the gh-bootstrap CLI tool.

use clap::Parser;
use gh_bootstrap::cli::{handle_result, init_logging, run, Cli};

fn main() -> std::process::ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    handle_result(run(&cli))
}
