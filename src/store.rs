// File: src/store.rs
use crate::error::{StoreError, TaskError};
use crate::model::{Task, TaskDraft};

/// Result of a successful insert. Conflicts are informational only: the task
/// has already been appended when this is returned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddOutcome {
    pub task: Task,
    pub conflicts: Vec<Task>,
}

impl AddOutcome {
    pub fn has_conflict(&self) -> bool {
        !self.conflicts.is_empty()
    }
}

/// The ordered task list for the current session.
///
/// Task numbers seen by the user are 1-based positions in this list and are
/// never stored on the tasks themselves.
#[derive(Debug, Clone, Default)]
pub struct TaskStore {
    tasks: Vec<Task>,
}

impl TaskStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_tasks(tasks: Vec<Task>) -> Self {
        Self { tasks }
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Builds the task, collects existing tasks it clashes with, then appends it.
    pub fn add_task(&mut self, draft: &TaskDraft) -> Result<AddOutcome, TaskError> {
        let task = Task::from_draft(draft)?;
        let conflicts: Vec<Task> = self
            .tasks
            .iter()
            .filter(|existing| existing.conflicts_with(&task))
            .cloned()
            .collect();

        self.tasks.push(task.clone());
        log::debug!(
            "Added task #{} {:?} ({} conflicts)",
            self.tasks.len(),
            draft.description(),
            conflicts.len()
        );
        Ok(AddOutcome { task, conflicts })
    }

    // --- Core Logic Helpers ---

    /// Maps a 1-based task number to an index.
    fn index_of(&self, number: i64) -> Result<usize, StoreError> {
        if number <= 0 {
            return Err(StoreError::NoSuchTask(number));
        }
        match usize::try_from(number) {
            Ok(n) if n <= self.tasks.len() => Ok(n - 1),
            _ => Err(StoreError::NotEnoughTasks(number)),
        }
    }

    pub fn get(&self, number: i64) -> Result<&Task, StoreError> {
        let idx = self.index_of(number)?;
        Ok(&self.tasks[idx])
    }

    fn get_mut(&mut self, number: i64) -> Result<&mut Task, StoreError> {
        let idx = self.index_of(number)?;
        Ok(&mut self.tasks[idx])
    }

    pub fn remove_task(&mut self, number: i64) -> Result<Task, StoreError> {
        let idx = self.index_of(number)?;
        log::debug!("Removing task #{}", number);
        Ok(self.tasks.remove(idx))
    }

    pub fn mark_done(&mut self, number: i64) -> Result<&Task, StoreError> {
        let task = self.get_mut(number)?;
        task.mark_done();
        log::debug!("Marked task #{} done", number);
        Ok(task)
    }

    pub fn mark_undone(&mut self, number: i64) -> Result<&Task, StoreError> {
        let task = self.get_mut(number)?;
        task.mark_undone();
        log::debug!("Marked task #{} not done", number);
        Ok(task)
    }

    /// Case-sensitive substring match on descriptions, in list order.
    pub fn find_by_keyword(&self, keyword: &str) -> Vec<&Task> {
        self.tasks
            .iter()
            .filter(|t| t.description_contains(keyword))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn todo(description: &str) -> TaskDraft {
        TaskDraft::Todo {
            description: description.to_string(),
        }
    }

    #[test]
    fn test_index_of_bounds() {
        let mut store = TaskStore::new();
        store.add_task(&todo("a")).unwrap();
        store.add_task(&todo("b")).unwrap();

        assert_eq!(store.index_of(1), Ok(0));
        assert_eq!(store.index_of(2), Ok(1));
        assert_eq!(store.index_of(0), Err(StoreError::NoSuchTask(0)));
        assert_eq!(store.index_of(-3), Err(StoreError::NoSuchTask(-3)));
        assert_eq!(store.index_of(3), Err(StoreError::NotEnoughTasks(3)));
        assert_eq!(
            store.index_of(i64::MAX),
            Err(StoreError::NotEnoughTasks(i64::MAX))
        );
    }

    #[test]
    fn test_failed_add_leaves_store_untouched() {
        let mut store = TaskStore::new();
        let bad = TaskDraft::Deadline {
            description: "essay".to_string(),
            by: "friday".to_string(),
        };
        assert_eq!(store.add_task(&bad), Err(TaskError::WrongDateFormat));
        assert!(store.is_empty());
    }

    #[test]
    fn test_new_task_does_not_conflict_with_itself() {
        let mut store = TaskStore::new();
        let dl = TaskDraft::Deadline {
            description: "essay".to_string(),
            by: "2026-05-01 2359".to_string(),
        };
        let first = store.add_task(&dl).unwrap();
        assert!(!first.has_conflict());

        let second = store.add_task(&dl).unwrap();
        assert!(second.has_conflict());
        assert_eq!(second.conflicts.len(), 1);
        assert_eq!(store.len(), 2);
    }
}
