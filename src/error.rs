// File: ./src/error.rs
//! Error types for every layer that can reject user input or stored data.
//!
//! Each variant's `Display` text is shown to the user verbatim, so every
//! failure reason gets its own sentence.
use thiserror::Error;

/// Malformed command text, caught before any task is built.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("Sorry, I don't know what '{keyword}' means.")]
    UnknownCommand { keyword: String },

    #[error("The description of a todo cannot be empty.")]
    EmptyTodo,

    #[error("A deadline needs a description and a /by time.")]
    DeadlineMissingDetails,
    #[error("Please say when the deadline is due with /by.")]
    DeadlineMissingBy,
    #[error("The description of a deadline cannot be empty.")]
    EmptyDeadlineDescription,
    #[error("A deadline takes exactly one /by, but I found more.")]
    MultipleBy,

    #[error("An event needs a description, a /from time and a /to time.")]
    EventMissingDetails,
    #[error("Please say when the event starts with /from.")]
    EventMissingFrom,
    #[error("Please say when the event ends with /to.")]
    EventMissingTo,
    #[error("An event must give /from before /to.")]
    EventMarkersOutOfOrder,
    #[error("The description of an event cannot be empty.")]
    EmptyEventDescription,

    #[error("{command} requires a task number.")]
    MissingTaskNumber { command: String },
    #[error("{command} needs a valid task number.")]
    InvalidTaskNumber { command: String },

    #[error("find requires a keyword to look for.")]
    MissingKeyword,
}

/// A syntactically valid command carried task data that cannot exist.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TaskError {
    #[error("Task description cannot be empty.")]
    EmptyDescription,
    #[error("Task description cannot contain ' | '.")]
    ReservedSeparator,
    #[error("Task description must fit on one line.")]
    LineBreak,
    #[error("Date is in the wrong format! It must look like yyyy-mm-dd HHmm.")]
    WrongDateFormat,
    #[error("Start date cannot be later than end date.")]
    StartAfterEnd,
}

/// Task number outside `[1, len]`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("There is no such thing as task {0}.")]
    NoSuchTask(i64),
    #[error("You do not have {0} tasks yet.")]
    NotEnoughTasks(i64),
}

/// Problems reading or writing the task file.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Line {line}: unknown task type '{marker}'.")]
    UnknownMarker { line: usize, marker: String },
    #[error("Line {line}: expected {expected} fields for this task type, found {found}.")]
    FieldCount {
        line: usize,
        expected: usize,
        found: usize,
    },
    #[error("Line {line}: done flag must be 0 or 1, found '{flag}'.")]
    DoneFlag { line: usize, flag: String },
    #[error("Line {line}: {source}")]
    InvalidTask {
        line: usize,
        #[source]
        source: TaskError,
    },
    #[error("Could not access the task file: {0}")]
    Io(#[from] std::io::Error),
}

/// Everything a single command can fail with.
#[derive(Debug, Error)]
pub enum EchoError {
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Task(#[from] TaskError),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}
