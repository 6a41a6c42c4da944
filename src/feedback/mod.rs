//! Status lines printed at each phase of the run.
//!
//! Every line carries a fixed prefix so the operator can tell our output
//! apart from what git and gh print in between.

/// Prefix for a phase starting.
pub const STEP_PREFIX: &str = "==>";
/// Prefix for a phase that finished.
pub const SUCCESS_PREFIX: &str = "✓";
/// Prefix for a non-fatal problem.
pub const WARN_PREFIX: &str = "!";

/// Format a phase line.
pub fn format_step(message: &str) -> String {
    format!("\x1b[1;34m{STEP_PREFIX}\x1b[0m \x1b[1m{message}\x1b[0m")
}

/// Format a success line.
pub fn format_success(message: &str) -> String {
    format!("\x1b[32m{SUCCESS_PREFIX}\x1b[0m {message}")
}

/// Format a warning line.
pub fn format_warning(message: &str) -> String {
    format!("\x1b[33m{WARN_PREFIX}\x1b[0m {message}")
}

/// Announce a phase.
pub fn step(message: &str) {
    println!("{}", format_step(message));
}

/// Report a finished phase.
pub fn success(message: &str) {
    println!("{}", format_success(message));
}

/// Report a problem that does not stop the run.
pub fn warning(message: &str) {
    eprintln!("{}", format_warning(message));
}

/// Report the error that ended the run.
pub fn error(message: &str) {
    eprintln!("\x1b[31mError:\x1b[0m {message}");
}
