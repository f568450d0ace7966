// File: ./src/messages.rs
//! Every sentence the tracker says back to the user.
use crate::model::Task;
use crate::store::AddOutcome;

pub const DIVIDER: &str = "____________________________________________________________";

fn framed(body: &str) -> String {
    format!("{DIVIDER}\n{body}\n{DIVIDER}")
}

fn numbered(tasks: &[&Task]) -> String {
    tasks
        .iter()
        .enumerate()
        .map(|(i, t)| format!("{}. {}", i + 1, t))
        .collect::<Vec<_>>()
        .join("\n")
}

fn count_phrase(count: usize) -> String {
    if count == 1 {
        "Now you have 1 task in the list.".to_string()
    } else {
        format!("Now you have {count} tasks in the list.")
    }
}

pub fn greeting() -> String {
    framed("Hello! I'm Echo\nWhat can I do for you?")
}

pub fn farewell() -> String {
    framed("Bye. Hope to see you again soon!")
}

pub fn task_added(outcome: &AddOutcome, total: usize, show_conflicts: bool) -> String {
    let mut body = format!(
        "Got it. I've added this task:\n  {}\n{}",
        outcome.task,
        count_phrase(total)
    );
    if outcome.has_conflict() {
        body.push_str("\nHeads up: this clashes with your schedule.");
        if show_conflicts {
            for other in &outcome.conflicts {
                body.push_str(&format!("\n  {other}"));
            }
        }
    }
    framed(&body)
}

pub fn task_list(tasks: &[Task]) -> String {
    if tasks.is_empty() {
        return framed("Your list is empty.");
    }
    let refs: Vec<&Task> = tasks.iter().collect();
    framed(&format!("Here are the tasks in your list:\n{}", numbered(&refs)))
}

pub fn task_marked(task: &Task) -> String {
    framed(&format!("Nice! I've marked this task as done:\n  {task}"))
}

pub fn task_unmarked(task: &Task) -> String {
    framed(&format!(
        "OK, I've marked this task as not done yet:\n  {task}"
    ))
}

pub fn task_removed(task: &Task, remaining: usize) -> String {
    framed(&format!(
        "Noted. I've removed this task:\n  {task}\n{}",
        count_phrase(remaining)
    ))
}

pub fn search_results(keyword: &str, found: &[&Task]) -> String {
    if found.is_empty() {
        return framed(&format!("No tasks in your list contain '{keyword}'."));
    }
    framed(&format!(
        "Here are the matching tasks in your list:\n{}",
        numbered(found)
    ))
}

pub fn error(message: &str) -> String {
    framed(message)
}

pub fn load_failed(reason: &str, backup: Option<&std::path::Path>) -> String {
    let mut body = format!(
        "I could not read your saved tasks ({reason}).\nStarting with an empty list."
    );
    if let Some(backup) = backup {
        body.push_str(&format!("\nThe old file was kept at {}.", backup.display()));
    }
    framed(&body)
}

pub fn save_failed(reason: &str) -> String {
    format!("Warning: saving failed: {reason}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_numbering() {
        let tasks = vec![
            Task::todo("read book").unwrap(),
            Task::deadline("return book", "2026-06-06 1400").unwrap(),
        ];
        assert_eq!(
            task_list(&tasks),
            format!(
                "{DIVIDER}\nHere are the tasks in your list:\n1. [T][ ] read book\n2. [D][ ] return book (by: 6 Jun 2026 1400)\n{DIVIDER}"
            )
        );
    }

    #[test]
    fn test_added_with_conflict_lists_clashes() {
        let existing = Task::deadline("sweep floor", "2026-01-23 1800").unwrap();
        let outcome = AddOutcome {
            task: Task::event("meeting", "2026-01-23 1800", "2026-01-23 1900").unwrap(),
            conflicts: vec![existing.clone()],
        };

        let shown = task_added(&outcome, 2, true);
        assert!(shown.contains("Now you have 2 tasks in the list."));
        assert!(shown.contains("clashes"));
        assert!(shown.contains(&existing.to_string()));

        let quiet = task_added(&outcome, 2, false);
        assert!(quiet.contains("clashes"));
        assert!(!quiet.contains(&existing.to_string()));
    }

    #[test]
    fn test_singular_count() {
        assert_eq!(count_phrase(1), "Now you have 1 task in the list.");
        assert_eq!(count_phrase(0), "Now you have 0 tasks in the list.");
    }
}
