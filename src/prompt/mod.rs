//! Interactive prompts.
//!
//! Reading a line and deciding what it means are kept apart: a [`Prompter`]
//! only returns raw text, and the `resolve_*` functions turn that text into
//! typed values with their defaults applied.

use std::io::{self, BufRead, Write};

use crate::forge::Visibility;

/// Source of answers to interactive questions.
pub trait Prompter {
    /// Show `question` and return the operator's answer without the newline.
    ///
    /// End of input yields an empty answer.
    fn ask(&mut self, question: &str) -> io::Result<String>;
}

/// [`Prompter`] over any line reader and writer.
pub struct LinePrompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> LinePrompter<R, W> {
    /// Read answers from `input`, writing questions to `output`.
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Consume the prompter and return its output sink.
    pub fn into_output(self) -> W {
        self.output
    }
}

impl LinePrompter<io::StdinLock<'static>, io::Stdout> {
    /// Prompter on the process's stdin and stdout.
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> Prompter for LinePrompter<R, W> {
    fn ask(&mut self, question: &str) -> io::Result<String> {
        write!(self.output, "{question}")?;
        self.output.flush()?;

        let mut line = String::new();
        let read = self.input.read_line(&mut line)?;
        if read == 0 {
            // Keep later output off the prompt line
            writeln!(self.output)?;
        }
        Ok(line.trim_end_matches(['\n', '\r']).to_string())
    }
}

/// Question asked when the target is already a repository.
pub const CONFIRM_EXISTING: &str =
    "\x1b[33mThis directory is already a git repository.\x1b[0m Create a GitHub remote for it anyway? [y/N]: ";

/// Question for the visibility menu.
pub const VISIBILITY_MENU: &str = "Visibility:\n  1) private\n  2) public\nChoose [1]: ";

/// Question for the repository name.
pub fn name_question(default: Option<&str>) -> String {
    match default {
        Some(name) => format!("Repository name [{name}]: "),
        None => "Repository name: ".to_string(),
    }
}

/// Question for the optional description.
pub const DESCRIPTION_QUESTION: &str = "Description (optional): ";

/// Interpret a yes/no answer where anything but yes means no.
pub fn resolve_confirmation(input: &str) -> bool {
    matches!(input.trim().to_lowercase().as_str(), "y" | "yes")
}

/// Interpret the repository name answer, falling back to `default`.
///
/// Returns `None` only when both the answer and the default are empty.
pub fn resolve_name(input: &str, default: Option<&str>) -> Option<String> {
    let input = input.trim();
    if !input.is_empty() {
        return Some(input.to_string());
    }
    default
        .map(str::trim)
        .filter(|d| !d.is_empty())
        .map(str::to_string)
}

/// Interpret the description answer; blank means no description at all.
pub fn resolve_description(input: &str) -> Option<String> {
    let input = input.trim();
    if input.is_empty() {
        None
    } else {
        Some(input.to_string())
    }
}

/// Interpret the visibility menu answer. Only `2` selects public.
pub fn resolve_visibility(input: &str) -> Visibility {
    if input.trim() == "2" {
        Visibility::Public
    } else {
        Visibility::Private
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_line_prompter_reads_lines_in_order() {
        let mut prompter = LinePrompter::new(Cursor::new("first\r\nsecond\n"), Vec::new());
        assert_eq!(prompter.ask("A? ").unwrap(), "first");
        assert_eq!(prompter.ask("B? ").unwrap(), "second");

        let output = String::from_utf8(prompter.into_output()).unwrap();
        assert_eq!(output, "A? B? ");
    }

    #[test]
    fn test_line_prompter_eof_is_empty() {
        let mut prompter = LinePrompter::new(Cursor::new(""), Vec::new());
        assert_eq!(prompter.ask("Name: ").unwrap(), "");
        assert_eq!(prompter.ask("Again: ").unwrap(), "");
    }

    #[test]
    fn test_resolve_confirmation() {
        assert!(resolve_confirmation("y"));
        assert!(resolve_confirmation("Y"));
        assert!(resolve_confirmation(" yes "));
        assert!(!resolve_confirmation(""));
        assert!(!resolve_confirmation("n"));
        assert!(!resolve_confirmation("sure"));
    }

    #[test]
    fn test_resolve_name_uses_default_on_empty() {
        assert_eq!(resolve_name("", Some("my-dir")), Some("my-dir".to_string()));
        assert_eq!(resolve_name("   ", Some("my-dir")), Some("my-dir".to_string()));
        assert_eq!(resolve_name("demo", Some("my-dir")), Some("demo".to_string()));
        assert_eq!(resolve_name(" demo ", None), Some("demo".to_string()));
    }

    #[test]
    fn test_resolve_name_without_any_name() {
        assert_eq!(resolve_name("", None), None);
        assert_eq!(resolve_name("", Some("")), None);
    }

    #[test]
    fn test_resolve_description() {
        assert_eq!(resolve_description(""), None);
        assert_eq!(resolve_description("  "), None);
        assert_eq!(
            resolve_description("A small tool"),
            Some("A small tool".to_string())
        );
    }

    #[test]
    fn test_resolve_visibility_only_two_is_public() {
        assert_eq!(resolve_visibility("2"), Visibility::Public);
        assert_eq!(resolve_visibility(" 2 "), Visibility::Public);
        for input in ["", "1", "3", "public", "22", "two"] {
            assert_eq!(resolve_visibility(input), Visibility::Private, "input {input:?}");
        }
    }

    #[test]
    fn test_name_question_shows_default() {
        assert_eq!(name_question(Some("demo")), "Repository name [demo]: ");
        assert_eq!(name_question(None), "Repository name: ");
    }
}
