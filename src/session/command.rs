use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::catalog::UserId;

pub const HELP: &str = "\
commands:
  user <id|name|all>   show products owned by one user, or by everyone
  search <text>        filter products by name (case-insensitive)
  clear                clear the search text
  reset                reset all filters
  show                 render the current view again
  help                 show this help
  quit                 leave the session";

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum UserSelector {
    All,
    Id(UserId),
    Name(String),
}

impl FromStr for UserSelector {
    type Err = CommandError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(CommandError::MissingArgument { command: "user" });
        }
        if s.eq_ignore_ascii_case("all") {
            return Ok(Self::All);
        }
        Ok(match s.parse::<UserId>() {
            Ok(id) => Self::Id(id),
            Err(_) => Self::Name(s.to_string()),
        })
    }
}

impl fmt::Display for UserSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str("all"),
            Self::Id(id) => write!(f, "{id}"),
            Self::Name(name) => f.write_str(name),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    SelectUser(UserSelector),
    Search(String),
    Clear,
    Reset,
    Show,
    Help,
    Quit,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("unknown command: {0} (try 'help')")]
    Unknown(String),

    #[error("'{command}' needs an argument")]
    MissingArgument { command: &'static str },
}

/// Parses one input line. Blank lines yield `Ok(None)`.
///
/// The command word ends at the first whitespace character. The search text
/// is everything after it verbatim, so it may hold inner and trailing spaces;
/// a bare `search` sets it to empty.
pub fn parse_line(line: &str) -> Result<Option<Command>, CommandError> {
    let line = line.trim_end_matches(['\r', '\n']);
    let trimmed = line.trim_start();
    if trimmed.trim().is_empty() {
        return Ok(None);
    }
    let (word, rest) = match trimmed.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest),
        None => (trimmed, ""),
    };
    let command = match word.to_lowercase().as_str() {
        "user" | "u" => Command::SelectUser(rest.parse()?),
        "search" | "s" => Command::Search(rest.to_string()),
        "clear" => Command::Clear,
        "reset" => Command::Reset,
        "show" => Command::Show,
        "help" | "?" => Command::Help,
        "quit" | "exit" | "q" => Command::Quit,
        other => return Err(CommandError::Unknown(other.to_string())),
    };
    Ok(Some(command))
}
