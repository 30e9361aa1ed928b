//! Script commands and their replies

use std::fmt;
use lrukv::Cache;

use crate::error::{Error, Result};

/// One parsed script line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Add { key: String, value: String },
    Get { key: String },
    Del { key: String },
    Len,
    Keys,
    Clear,
}

impl Command {
    /// Parse a line such as `ADD k1 some value`
    ///
    /// The verb is case-insensitive. For `ADD` everything after the key,
    /// inner whitespace included, is the value.
    ///
    /// Tokens are whitespace-delimited with no quoting, so a script cannot
    /// name an empty key, a key containing whitespace, or an empty value.
    /// The library accepts all of these; use it directly for such keys.
    pub fn parse(line: &str) -> Result<Self> {
        let (verb, rest) = next_token(line).ok_or(Error::Empty)?;
        let verb = verb.to_ascii_uppercase();
        let argc = rest.split_whitespace().count();

        match verb.as_str() {
            "ADD" => {
                check_arity("ADD", 2, argc, argc >= 2)?;
                let (key, value) = next_token(rest).ok_or(Error::Empty)?;
                Ok(Command::Add {
                    key: key.to_string(),
                    value: value.trim_end().to_string(),
                })
            }
            "GET" => {
                check_arity("GET", 1, argc, argc == 1)?;
                Ok(Command::Get { key: rest.trim().to_string() })
            }
            "DEL" => {
                check_arity("DEL", 1, argc, argc == 1)?;
                Ok(Command::Del { key: rest.trim().to_string() })
            }
            "LEN" => {
                check_arity("LEN", 0, argc, argc == 0)?;
                Ok(Command::Len)
            }
            "KEYS" => {
                check_arity("KEYS", 0, argc, argc == 0)?;
                Ok(Command::Keys)
            }
            "CLEAR" => {
                check_arity("CLEAR", 0, argc, argc == 0)?;
                Ok(Command::Clear)
            }
            _ => Err(Error::UnknownCommand(verb)),
        }
    }

    /// Run the command against `cache`
    pub fn execute(self, cache: &Cache) -> Reply {
        match self {
            Command::Add { key, value } => Reply::Bool(cache.add(&key, &value)),
            Command::Get { key } => Reply::Value(cache.get(&key)),
            Command::Del { key } => Reply::Bool(cache.delete(&key)),
            Command::Len => Reply::Count(cache.len()),
            Command::Keys => Reply::Keys(cache.keys()),
            Command::Clear => {
                cache.clear();
                Reply::Ok
            }
        }
    }
}

/// Printable result of a command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    Bool(bool),
    Value(Option<String>),
    Count(usize),
    Keys(Vec<String>),
    Ok,
}

impl fmt::Display for Reply {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reply::Bool(b) => write!(f, "{}", b),
            Reply::Value(Some(v)) => write!(f, "{}", v),
            Reply::Value(None) => write!(f, "(nil)"),
            Reply::Count(n) => write!(f, "{}", n),
            Reply::Keys(keys) => {
                // Quoted so empty keys and embedded spaces stay visible
                let quoted: Vec<String> = keys.iter().map(|k| format!("{:?}", k)).collect();
                write!(f, "{}", quoted.join(" "))
            }
            Reply::Ok => write!(f, "OK"),
        }
    }
}

/// Split off the first whitespace-delimited token
fn next_token(s: &str) -> Option<(&str, &str)> {
    let s = s.trim_start();
    if s.is_empty() {
        return None;
    }
    match s.split_once(char::is_whitespace) {
        Some((token, rest)) => Some((token, rest.trim_start())),
        None => Some((s, "")),
    }
}

fn check_arity(command: &'static str, expected: usize, got: usize, ok: bool) -> Result<()> {
    if ok {
        Ok(())
    } else {
        Err(Error::WrongArity { command, expected, got })
    }
}
