//! Tab completion for the interactive line editor.

use super::registry::CommandRegistry;
use rustyline::completion::{Completer, Pair};
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::validate::Validator;
use rustyline::{Context, Helper};
use std::borrow::Cow;
use std::collections::BTreeMap;

/// Completes command names in the first word and subcommand names in the second.
pub struct ShellCompletion {
    commands: Vec<String>,
    subcommands: BTreeMap<String, Vec<String>>,
}

impl ShellCompletion {
    pub fn from_registry(registry: &CommandRegistry) -> Self {
        let mut commands: Vec<String> = registry.names().into_iter().map(str::to_string).collect();
        commands.extend(["exit", "quit"].iter().map(|s| s.to_string()));
        commands.sort();
        commands.dedup();

        let subcommands = registry
            .iter()
            .filter_map(|cmd| {
                let subs = cmd.subcommands()?;
                let mut names: Vec<String> =
                    subs.subcommand_names().iter().map(|s| s.to_string()).collect();
                names.sort();
                Some((cmd.name().to_string(), names))
            })
            .collect();

        Self {
            commands,
            subcommands,
        }
    }

    /// Candidates for the word under the cursor, with the byte offset it starts at.
    pub fn candidates(&self, line: &str) -> (usize, Vec<String>) {
        let start = line
            .char_indices()
            .rev()
            .find(|(_, c)| c.is_whitespace())
            .map(|(i, c)| i + c.len_utf8())
            .unwrap_or(0);
        let prefix = &line[start..];
        let preceding: Vec<&str> = line[..start].split_whitespace().collect();

        let pool: &[String] = match preceding.as_slice() {
            [] => &self.commands,
            [command] => match self.subcommands.get(*command) {
                Some(names) => names,
                None => return (start, Vec::new()),
            },
            _ => return (start, Vec::new()),
        };

        let matches = pool
            .iter()
            .filter(|name| name.starts_with(prefix))
            .cloned()
            .collect();
        (start, matches)
    }
}

impl Helper for ShellCompletion {}

impl Completer for ShellCompletion {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let (start, names) = self.candidates(&line[..pos]);
        let pairs = names
            .into_iter()
            .map(|name| Pair {
                display: name.clone(),
                replacement: name,
            })
            .collect();
        Ok((start, pairs))
    }
}

impl Hinter for ShellCompletion {
    type Hint = String;

    fn hint(&self, _line: &str, _pos: usize, _ctx: &Context<'_>) -> Option<String> {
        None
    }
}

impl Highlighter for ShellCompletion {
    fn highlight<'l>(&self, line: &'l str, _pos: usize) -> Cow<'l, str> {
        Cow::Borrowed(line)
    }

    fn highlight_char(&self, _line: &str, _pos: usize, _forced: bool) -> bool {
        false
    }
}

impl Validator for ShellCompletion {}
