use std::borrow::Cow::{self, Borrowed, Owned};

use colored::Colorize;
use rustyline::completion::{Completer, Pair};
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::validate::Validator;
use rustyline::{Context, Helper};

use crate::commands::COMMANDS;

const SECTIONS: &[&str] = &["records", "iep", "messages", "questions"];

/// Completion, highlighting and hints for the portal REPL.
#[derive(Clone, Default)]
pub struct PortalHelper;

impl PortalHelper {
    fn candidates(line: &str) -> (usize, Vec<&'static str>) {
        if let Some(arg) = line.strip_prefix("/go ") {
            let start = line.len() - arg.len();
            let matches = SECTIONS.iter().copied().filter(|s| s.starts_with(arg)).collect();
            return (start, matches);
        }
        if line.starts_with('/') && !line.contains(' ') {
            let matches = COMMANDS.iter().copied().filter(|c| c.starts_with(line)).collect();
            return (0, matches);
        }
        (0, Vec::new())
    }
}

impl Helper for PortalHelper {}

impl Completer for PortalHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let (start, matches) = Self::candidates(&line[..pos]);
        let pairs = matches
            .into_iter()
            .map(|m| Pair {
                display: m.to_string(),
                replacement: m.to_string(),
            })
            .collect();
        Ok((start, pairs))
    }
}

impl Highlighter for PortalHelper {
    fn highlight<'l>(&self, line: &'l str, _pos: usize) -> Cow<'l, str> {
        if line.starts_with('/') {
            Owned(line.bright_cyan().to_string())
        } else {
            Borrowed(line)
        }
    }

    fn highlight_char(&self, _line: &str, _pos: usize, _forced: bool) -> bool {
        true
    }
}

impl Hinter for PortalHelper {
    type Hint = String;

    fn hint(&self, line: &str, pos: usize, _ctx: &Context<'_>) -> Option<String> {
        let line = &line[..pos];
        let (start, matches) = Self::candidates(line);
        let typed = &line[start..];
        matches
            .into_iter()
            .find(|m| m.len() > typed.len())
            .map(|m| m[typed.len()..].to_string())
    }
}

impl Validator for PortalHelper {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_candidates() {
        let (start, matches) = PortalHelper::candidates("/re");
        assert_eq!(start, 0);
        assert_eq!(matches, vec!["/record", "/reply"]);
    }

    #[test]
    fn test_section_candidates() {
        let (start, matches) = PortalHelper::candidates("/go me");
        assert_eq!(start, 4);
        assert_eq!(matches, vec!["messages"]);
    }

    #[test]
    fn test_plain_text_has_no_candidates() {
        assert!(PortalHelper::candidates("hello").1.is_empty());
    }
}
