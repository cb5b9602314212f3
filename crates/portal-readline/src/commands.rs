//! REPL command parsing.

use portal_core::dashboard::Section;
use portal_core::message::EntityId;
use std::str::FromStr;

/// Slash commands offered for completion and hints.
pub const COMMANDS: &[&str] = &[
    "/login", "/logout", "/go", "/say", "/summary", "/record", "/reply", "/help", "/quit",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Login { username: String, password: String },
    Logout,
    Go(Section),
    Say(String),
    Summary,
    Record(String),
    Reply { id: EntityId, text: String },
    Help,
    Quit,
}

/// Parses one input line. Blank lines yield `Ok(None)`; plain text is a chat
/// message.
pub fn parse(line: &str) -> Result<Option<Command>, String> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }
    if !line.starts_with('/') {
        return Ok(Some(Command::Say(line.to_string())));
    }

    let (name, rest) = match line.split_once(char::is_whitespace) {
        Some((name, rest)) => (name, rest.trim()),
        None => (line, ""),
    };

    let command = match name {
        "/login" => {
            let mut parts = rest.split_whitespace();
            // Missing parts are passed through empty so the login flow shows
            // its own validation dialog.
            Command::Login {
                username: parts.next().unwrap_or_default().to_string(),
                password: parts.next().unwrap_or_default().to_string(),
            }
        }
        "/logout" => Command::Logout,
        "/go" => {
            let section = Section::from_str(rest)
                .map_err(|_| format!("Unknown section '{rest}' (records, iep, messages, questions)"))?;
            Command::Go(section)
        }
        "/say" => Command::Say(rest.to_string()),
        "/summary" => Command::Summary,
        "/record" => Command::Record(rest.to_string()),
        "/reply" => {
            let (id, text) = rest
                .split_once(char::is_whitespace)
                .unwrap_or((rest, ""));
            if id.is_empty() {
                return Err("Usage: /reply <record id> <text>".to_string());
            }
            Command::Reply {
                id: EntityId::from(id),
                text: text.trim().to_string(),
            }
        }
        "/help" => Command::Help,
        "/quit" | "/exit" => Command::Quit,
        other => return Err(format!("Unknown command '{other}', try /help")),
    };
    Ok(Some(command))
}

/// Lines that must not end up in the history file.
pub fn is_sensitive(line: &str) -> bool {
    line.trim_start().starts_with("/login")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text_is_a_message() {
        assert_eq!(
            parse("  今天很好  ").unwrap(),
            Some(Command::Say("今天很好".to_string()))
        );
        assert_eq!(parse("   ").unwrap(), None);
    }

    #[test]
    fn test_login_with_missing_password() {
        assert_eq!(
            parse("/login amy").unwrap(),
            Some(Command::Login {
                username: "amy".to_string(),
                password: String::new(),
            })
        );
        assert!(is_sensitive("/login amy secret"));
        assert!(!is_sensitive("/logout"));
    }

    #[test]
    fn test_go_parses_sections() {
        assert_eq!(
            parse("/go messages").unwrap(),
            Some(Command::Go(Section::Messages))
        );
        assert!(parse("/go admin").is_err());
    }

    #[test]
    fn test_reply_takes_id_and_text() {
        assert_eq!(
            parse("/reply 12 收到 謝謝").unwrap(),
            Some(Command::Reply {
                id: EntityId::Number(12),
                text: "收到 謝謝".to_string(),
            })
        );
        assert_eq!(
            parse("/reply r-7").unwrap(),
            Some(Command::Reply {
                id: EntityId::Text("r-7".to_string()),
                text: String::new(),
            })
        );
        assert!(parse("/reply").is_err());
    }

    #[test]
    fn test_unknown_command() {
        assert!(parse("/delete 3").is_err());
    }
}
