// File: ./src/model/display.rs
use crate::model::item::{Task, TaskKind, format_display};
use std::fmt;

pub trait TaskDisplay {
    fn checkbox_symbol(&self) -> &'static str;
    fn time_suffix(&self) -> String;
}

impl TaskDisplay for Task {
    fn checkbox_symbol(&self) -> &'static str {
        if self.done { "[X]" } else { "[ ]" }
    }

    fn time_suffix(&self) -> String {
        match &self.kind {
            TaskKind::Todo => String::new(),
            TaskKind::Deadline { by } => format!(" (by: {})", format_display(by)),
            TaskKind::Event { start, end } => format!(
                " (from: {} to: {})",
                format_display(start),
                format_display(end)
            ),
        }
    }
}

/// `[D][X] return book (by: 6 Jun 2026 1400)`
impl fmt::Display for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}]{} {}{}",
            self.kind.marker(),
            self.checkbox_symbol(),
            self.description,
            self.time_suffix()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_per_variant() {
        let mut todo = Task::todo("read book").unwrap();
        assert_eq!(todo.to_string(), "[T][ ] read book");
        todo.mark_done();
        assert_eq!(todo.to_string(), "[T][X] read book");

        let dl = Task::deadline("sweep floor", "2026-01-23 1800").unwrap();
        assert_eq!(dl.to_string(), "[D][ ] sweep floor (by: 23 Jan 2026 1800)");

        let ev = Task::event("Attend Conference", "2026-02-23 1800", "2026-02-24 1800").unwrap();
        assert_eq!(
            ev.to_string(),
            "[E][ ] Attend Conference (from: 23 Feb 2026 1800 to: 24 Feb 2026 1800)"
        );
    }

    #[test]
    fn test_single_digit_day_has_no_padding() {
        let dl = Task::deadline("pay rent", "2026-03-05 0930").unwrap();
        assert_eq!(dl.time_suffix(), " (by: 5 Mar 2026 0930)");
    }
}
