// File: src/model/parser.rs
use crate::error::ParseError;
use crate::model::item::TaskDraft;
use std::str::FromStr;
use strum::{Display, EnumIter, EnumString};

pub const BY_MARKER: &str = "/by";
pub const FROM_MARKER: &str = "/from";
pub const TO_MARKER: &str = "/to";

/// The closed set of command keywords. Matching is case-insensitive.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Display, EnumString, EnumIter)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum CommandKind {
    Todo,
    Deadline,
    Event,
    List,
    Bye,
    Mark,
    Unmark,
    Delete,
    Find,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Add(TaskDraft),
    List,
    Bye,
    Mark(i64),
    Unmark(i64),
    Delete(i64),
    Find(String),
}

impl Command {
    pub fn kind(&self) -> CommandKind {
        match self {
            Command::Add(TaskDraft::Todo { .. }) => CommandKind::Todo,
            Command::Add(TaskDraft::Deadline { .. }) => CommandKind::Deadline,
            Command::Add(TaskDraft::Event { .. }) => CommandKind::Event,
            Command::List => CommandKind::List,
            Command::Bye => CommandKind::Bye,
            Command::Mark(_) => CommandKind::Mark,
            Command::Unmark(_) => CommandKind::Unmark,
            Command::Delete(_) => CommandKind::Delete,
            Command::Find(_) => CommandKind::Find,
        }
    }

    /// Whether running this command changes the task list.
    pub fn is_mutating(&self) -> bool {
        matches!(
            self,
            Command::Add(_) | Command::Mark(_) | Command::Unmark(_) | Command::Delete(_)
        )
    }
}

/// Splits a trimmed line on its first run of whitespace.
/// The remainder is trimmed and dropped when empty.
fn split_keyword(line: &str) -> (&str, Option<&str>) {
    let line = line.trim();
    match line.split_once(char::is_whitespace) {
        Some((keyword, rest)) => {
            let rest = rest.trim();
            (keyword, (!rest.is_empty()).then_some(rest))
        }
        None => (line, None),
    }
}

/// Turns one line of user input into a command.
///
/// Only syntax is checked here. Dates and the start/end ordering are left to
/// task construction, which reports its own errors.
pub fn parse_command(line: &str) -> Result<Command, ParseError> {
    let (keyword, rest) = split_keyword(line);
    let kind = CommandKind::from_str(keyword).map_err(|_| ParseError::UnknownCommand {
        keyword: keyword.to_string(),
    })?;

    match kind {
        CommandKind::Todo => {
            let description = rest.ok_or(ParseError::EmptyTodo)?;
            Ok(Command::Add(TaskDraft::Todo {
                description: description.to_string(),
            }))
        }
        CommandKind::Deadline => parse_deadline(rest).map(Command::Add),
        CommandKind::Event => parse_event(rest).map(Command::Add),
        CommandKind::List => Ok(Command::List),
        CommandKind::Bye => Ok(Command::Bye),
        CommandKind::Mark => parse_task_number(kind, rest).map(Command::Mark),
        CommandKind::Unmark => parse_task_number(kind, rest).map(Command::Unmark),
        CommandKind::Delete => parse_task_number(kind, rest).map(Command::Delete),
        CommandKind::Find => {
            let keyword = rest.ok_or(ParseError::MissingKeyword)?;
            Ok(Command::Find(keyword.to_string()))
        }
    }
}

fn parse_deadline(rest: Option<&str>) -> Result<TaskDraft, ParseError> {
    let rest = rest.ok_or(ParseError::DeadlineMissingDetails)?;
    let (description, by) = rest
        .split_once(BY_MARKER)
        .ok_or(ParseError::DeadlineMissingBy)?;

    let description = description.trim();
    if description.is_empty() {
        return Err(ParseError::EmptyDeadlineDescription);
    }
    if by.contains(BY_MARKER) {
        return Err(ParseError::MultipleBy);
    }

    Ok(TaskDraft::Deadline {
        description: description.to_string(),
        by: by.trim().to_string(),
    })
}

fn parse_event(rest: Option<&str>) -> Result<TaskDraft, ParseError> {
    let rest = rest.ok_or(ParseError::EventMissingDetails)?;
    let Some((description, times)) = rest.split_once(FROM_MARKER) else {
        return Err(ParseError::EventMissingFrom);
    };
    let Some((start, end)) = times.split_once(TO_MARKER) else {
        if description.contains(TO_MARKER) {
            return Err(ParseError::EventMarkersOutOfOrder);
        }
        return Err(ParseError::EventMissingTo);
    };

    let description = description.trim();
    if description.is_empty() {
        return Err(ParseError::EmptyEventDescription);
    }

    Ok(TaskDraft::Event {
        description: description.to_string(),
        start: start.trim().to_string(),
        end: end.trim().to_string(),
    })
}

/// Presence and well-formedness are separate failures with separate messages.
fn parse_task_number(kind: CommandKind, rest: Option<&str>) -> Result<i64, ParseError> {
    let raw = rest.ok_or_else(|| ParseError::MissingTaskNumber {
        command: kind.to_string(),
    })?;
    raw.parse::<i64>()
        .map_err(|_| ParseError::InvalidTaskNumber {
            command: kind.to_string(),
        })
}
