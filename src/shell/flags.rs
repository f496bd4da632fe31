//! Flag and positional argument extraction.

use crate::error::ShellError;
use std::collections::HashMap;
use std::str::FromStr;

/// Flags and positionals pulled out of a token list.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Extracted {
    pub flags: HashMap<String, String>,
    pub positional: Vec<String>,
}

/// Separate `--key=value` / `--key` / `-k=value` / `-k` flags from positionals.
///
/// Bare flags get the value `"true"`. A lone `-` is positional. Later flags
/// overwrite earlier ones with the same key.
pub fn extract(tokens: &[String]) -> Extracted {
    let mut out = Extracted::default();
    for token in tokens {
        let body = if let Some(rest) = token.strip_prefix("--") {
            Some(rest)
        } else if token.len() > 1 {
            token.strip_prefix('-')
        } else {
            None
        };

        match body {
            Some(body) if !body.is_empty() => {
                let (key, value) = match body.split_once('=') {
                    Some((k, v)) => (k, v),
                    None => (body, "true"),
                };
                out.flags.insert(key.to_string(), value.to_string());
            }
            _ => out.positional.push(token.clone()),
        }
    }
    out
}

impl Extracted {
    pub fn flag(&self, name: &str) -> Option<&str> {
        self.flags.get(name).map(String::as_str)
    }

    pub fn flag_or<'a>(&'a self, name: &str, default: &'a str) -> &'a str {
        self.flag(name).unwrap_or(default)
    }

    /// True when the flag is present with a truthy value (`--force`, `--force=yes`).
    pub fn bool_flag(&self, name: &str) -> bool {
        matches!(
            self.flag(name).map(str::to_ascii_lowercase).as_deref(),
            Some("true" | "1" | "yes" | "on")
        )
    }

    /// Parse a flag value, failing with [`ShellError::Parse`] on bad input.
    pub fn parse_flag<T: FromStr>(&self, name: &str) -> Result<Option<T>, ShellError> {
        match self.flag(name) {
            None => Ok(None),
            Some(raw) => raw.parse::<T>().map(Some).map_err(|_| {
                ShellError::Parse(format!("invalid value '{}' for --{}", raw, name))
            }),
        }
    }

    pub fn positional(&self, index: usize) -> Option<&str> {
        self.positional.get(index).map(String::as_str)
    }
}
