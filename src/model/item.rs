// File: ./src/model/item.rs
use crate::error::TaskError;
use chrono::NaiveDateTime;

/// Pattern used both for reading user input and for the task file.
pub const INPUT_FORMAT: &str = "%Y-%m-%d %H%M";
/// Pattern used only for showing dates to the user, e.g. `23 Jan 2026 1800`.
pub const DISPLAY_FORMAT: &str = "%-d %b %Y %H%M";

/// Separator between fields in the task file. Descriptions may not contain it.
pub const FIELD_SEPARATOR: &str = " | ";

// --- DATE TYPES ---

/// Parses `yyyy-MM-dd HHmm` strictly.
///
/// chrono alone accepts single-digit months and signed years, so the shape is
/// checked byte by byte before the calendar check.
pub fn parse_timestamp(raw: &str) -> Result<NaiveDateTime, TaskError> {
    let bytes = raw.as_bytes();
    if bytes.len() != 15 {
        return Err(TaskError::WrongDateFormat);
    }
    let shape_ok = bytes.iter().enumerate().all(|(i, b)| match i {
        4 | 7 => *b == b'-',
        10 => *b == b' ',
        _ => b.is_ascii_digit(),
    });
    if !shape_ok {
        return Err(TaskError::WrongDateFormat);
    }
    NaiveDateTime::parse_from_str(raw, INPUT_FORMAT).map_err(|_| TaskError::WrongDateFormat)
}

pub fn format_input(dt: &NaiveDateTime) -> String {
    dt.format(INPUT_FORMAT).to_string()
}

pub fn format_display(dt: &NaiveDateTime) -> String {
    dt.format(DISPLAY_FORMAT).to_string()
}

// --- TASK ---

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum TaskKind {
    Todo,
    Deadline {
        by: NaiveDateTime,
    },
    Event {
        start: NaiveDateTime,
        end: NaiveDateTime,
    },
}

impl TaskKind {
    /// One-letter marker shared by the display form and the task file.
    pub fn marker(&self) -> &'static str {
        match self {
            TaskKind::Todo => "T",
            TaskKind::Deadline { .. } => "D",
            TaskKind::Event { .. } => "E",
        }
    }
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Task {
    pub description: String,
    pub done: bool,
    pub kind: TaskKind,
}

/// Unvalidated task data as it comes out of a command or a stored line.
/// Timestamps are still raw strings here.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum TaskDraft {
    Todo {
        description: String,
    },
    Deadline {
        description: String,
        by: String,
    },
    Event {
        description: String,
        start: String,
        end: String,
    },
}

impl TaskDraft {
    pub fn description(&self) -> &str {
        match self {
            TaskDraft::Todo { description }
            | TaskDraft::Deadline { description, .. }
            | TaskDraft::Event { description, .. } => description,
        }
    }
}

fn check_description(description: &str) -> Result<(), TaskError> {
    if description.trim().is_empty() {
        return Err(TaskError::EmptyDescription);
    }
    if description.contains(['\n', '\r']) {
        return Err(TaskError::LineBreak);
    }
    // A trailing " |" would merge with the next separator on disk.
    if description.contains(FIELD_SEPARATOR) || description.ends_with(" |") {
        return Err(TaskError::ReservedSeparator);
    }
    Ok(())
}

impl Task {
    fn with_kind(description: &str, kind: TaskKind) -> Self {
        Self {
            description: description.to_string(),
            done: false,
            kind,
        }
    }

    pub fn todo(description: &str) -> Result<Self, TaskError> {
        check_description(description)?;
        Ok(Self::with_kind(description, TaskKind::Todo))
    }

    pub fn deadline(description: &str, by: &str) -> Result<Self, TaskError> {
        check_description(description)?;
        let by = parse_timestamp(by)?;
        Ok(Self::with_kind(description, TaskKind::Deadline { by }))
    }

    /// Both dates are parsed before the ordering check runs.
    pub fn event(description: &str, start: &str, end: &str) -> Result<Self, TaskError> {
        check_description(description)?;
        let start = parse_timestamp(start)?;
        let end = parse_timestamp(end)?;
        if start > end {
            return Err(TaskError::StartAfterEnd);
        }
        Ok(Self::with_kind(description, TaskKind::Event { start, end }))
    }

    pub fn from_draft(draft: &TaskDraft) -> Result<Self, TaskError> {
        match draft {
            TaskDraft::Todo { description } => Self::todo(description),
            TaskDraft::Deadline { description, by } => Self::deadline(description, by),
            TaskDraft::Event {
                description,
                start,
                end,
            } => Self::event(description, start, end),
        }
    }

    pub fn mark_done(&mut self) {
        self.done = true;
    }

    pub fn mark_undone(&mut self) {
        self.done = false;
    }

    pub fn description_contains(&self, keyword: &str) -> bool {
        self.description.contains(keyword)
    }

    /// Whether the two tasks occupy overlapping or coinciding time.
    ///
    /// Deadlines are instants, events are closed intervals, todos have no
    /// extent and never conflict.
    pub fn conflicts_with(&self, other: &Task) -> bool {
        use TaskKind::*;
        match (&self.kind, &other.kind) {
            (Todo, _) | (_, Todo) => false,
            (Deadline { by: a }, Deadline { by: b }) => a == b,
            (Deadline { by }, Event { start, end }) | (Event { start, end }, Deadline { by }) => {
                start <= by && by <= end
            }
            (
                Event {
                    start: s1,
                    end: e1,
                },
                Event {
                    start: s2,
                    end: e2,
                },
            ) => s1 <= e2 && s2 <= e1,
        }
    }
}
