// File: ./src/repl.rs
//! Line-editor front end: reads a line, hands it to the session, prints the
//! reply. Works the same when stdin is a pipe.
use crate::controller::Session;
use crate::model::CommandKind;
use anyhow::Result;
use rustyline::completion::{Completer, Pair};
use rustyline::error::ReadlineError;
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::history::DefaultHistory;
use rustyline::validate::Validator;
use rustyline::{Context, Editor, Helper};
use strum::IntoEnumIterator;

const PROMPT: &str = "> ";

/// Completes and hints command keywords at the start of the line.
#[derive(Clone)]
pub struct CommandHelper {
    keywords: Vec<String>,
}

impl CommandHelper {
    pub fn new() -> Self {
        Self {
            keywords: CommandKind::iter().map(|k| k.to_string()).collect(),
        }
    }

    /// Keywords starting with `prefix`, ignoring case.
    fn matching(&self, prefix: &str) -> impl Iterator<Item = &String> {
        let prefix = prefix.to_lowercase();
        self.keywords
            .iter()
            .filter(move |k| k.starts_with(&prefix))
    }
}

impl Default for CommandHelper {
    fn default() -> Self {
        Self::new()
    }
}

impl Helper for CommandHelper {}

impl Completer for CommandHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let line = &line[..pos];
        if line.contains(char::is_whitespace) {
            return Ok((0, vec![]));
        }
        let candidates = self
            .matching(line)
            .map(|k| Pair {
                display: k.clone(),
                replacement: format!("{k} "),
            })
            .collect();
        Ok((0, candidates))
    }
}

impl Hinter for CommandHelper {
    type Hint = String;

    fn hint(&self, line: &str, pos: usize, _ctx: &Context<'_>) -> Option<String> {
        let line = &line[..pos];
        if line.is_empty() || line.contains(char::is_whitespace) {
            return None;
        }
        self.matching(line)
            .find(|k| k.len() > line.len())
            .map(|k| k[line.len()..].to_string())
    }
}

impl Highlighter for CommandHelper {}

impl Validator for CommandHelper {}

fn print_reply(text: &str) {
    if !text.is_empty() {
        println!("{text}");
    }
}

/// Runs the conversation until `bye`, end of input, or Ctrl-C.
pub fn run(session: &mut Session) -> Result<()> {
    let mut rl: Editor<CommandHelper, DefaultHistory> = Editor::new()?;
    rl.set_helper(Some(CommandHelper::new()));

    println!("{}", session.greeting());
    if let Some(warning) = session.load_warning() {
        println!("{warning}");
    }

    loop {
        match rl.readline(PROMPT) {
            Ok(line) => {
                if !line.trim().is_empty() {
                    let _ = rl.add_history_entry(line.as_str());
                }
                let reply = session.handle(&line);
                print_reply(&reply.text);
                if reply.exit {
                    break;
                }
            }
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => {
                log::info!("Input closed without bye");
                print_reply(&session.handle("bye").text);
                break;
            }
            Err(e) => return Err(e.into()),
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matching_is_case_insensitive() {
        let helper = CommandHelper::new();
        let found: Vec<&String> = helper.matching("UN").collect();
        assert_eq!(found, vec!["unmark"]);

        let found: Vec<&String> = helper.matching("d").collect();
        assert_eq!(found, vec!["deadline", "delete"]);
    }
}
