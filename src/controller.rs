// File: src/controller.rs
//! Central logic controller for a tracker session.
//! Every line of input goes through `Session::handle`: parse, apply to the
//! store, persist if anything changed, and format the reply. Front ends only
//! read lines and print replies.
use crate::config::Config;
use crate::context::AppContext;
use crate::error::EchoError;
use crate::messages;
use crate::model::{Command, parse_command};
use crate::storage::LocalStorage;
use crate::store::TaskStore;
use anyhow::Result;
use std::path::{Path, PathBuf};

/// What the front end should do with a handled line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub text: String,
    pub exit: bool,
}

impl Reply {
    fn say(text: String) -> Self {
        Self { text, exit: false }
    }
}

pub struct Session {
    store: TaskStore,
    path: PathBuf,
    show_conflicts: bool,
    load_warning: Option<String>,
}

impl Session {
    /// Opens the task file named by `config` inside the context's data dir.
    pub fn open(ctx: &dyn AppContext, config: &Config) -> Result<Self> {
        let path = ctx.get_task_file_path(&config.data_file)?;
        Ok(Self::open_at(path, config.show_conflicts))
    }

    /// Loads `path` into a new session.
    ///
    /// An unreadable file never stops the session: it starts empty, the file
    /// is moved aside, and the problem is reported once by `load_warning`.
    pub fn open_at(path: PathBuf, show_conflicts: bool) -> Self {
        let (store, load_warning) = match LocalStorage::load(&path) {
            Ok(tasks) => (TaskStore::from_tasks(tasks), None),
            Err(e) => {
                log::warn!("Failed to load {}: {}", path.display(), e);
                let backup = LocalStorage::move_aside(&path)
                    .inspect_err(|err| {
                        log::error!("Could not move {} aside: {}", path.display(), err)
                    })
                    .ok();
                let warning = messages::load_failed(&e.to_string(), backup.as_deref());
                (TaskStore::new(), Some(warning))
            }
        };
        Self {
            store,
            path,
            show_conflicts,
            load_warning,
        }
    }

    pub fn store(&self) -> &TaskStore {
        &self.store
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load_warning(&self) -> Option<&str> {
        self.load_warning.as_deref()
    }

    pub fn greeting(&self) -> String {
        messages::greeting()
    }

    /// Handles one line of input. Errors never escape: they become replies
    /// and leave the store as it was.
    pub fn handle(&mut self, line: &str) -> Reply {
        if line.trim().is_empty() {
            return Reply::say(String::new());
        }
        match self.execute(line) {
            Ok(reply) => reply,
            Err(e) => {
                log::debug!("Rejected {:?}: {}", line, e);
                Reply::say(messages::error(&e.to_string()))
            }
        }
    }

    fn execute(&mut self, line: &str) -> Result<Reply, EchoError> {
        let command = parse_command(line)?;
        let mutating = command.is_mutating();
        log::debug!("Handling {} command", command.kind());

        let mut reply = match command {
            Command::Bye => {
                return Ok(Reply {
                    text: messages::farewell(),
                    exit: true,
                });
            }
            Command::List => Reply::say(messages::task_list(self.store.tasks())),
            Command::Find(keyword) => {
                let found = self.store.find_by_keyword(&keyword);
                Reply::say(messages::search_results(&keyword, &found))
            }
            Command::Add(draft) => {
                let outcome = self.store.add_task(&draft)?;
                Reply::say(messages::task_added(
                    &outcome,
                    self.store.len(),
                    self.show_conflicts,
                ))
            }
            Command::Mark(n) => Reply::say(messages::task_marked(self.store.mark_done(n)?)),
            Command::Unmark(n) => Reply::say(messages::task_unmarked(self.store.mark_undone(n)?)),
            Command::Delete(n) => {
                let removed = self.store.remove_task(n)?;
                Reply::say(messages::task_removed(&removed, self.store.len()))
            }
        };

        if mutating && let Err(e) = self.persist() {
            log::error!("Saving to {} failed: {}", self.path.display(), e);
            reply.text.push('\n');
            reply.text.push_str(&messages::save_failed(&e.to_string()));
        }
        Ok(reply)
    }

    fn persist(&self) -> Result<(), EchoError> {
        LocalStorage::save(&self.path, self.store.tasks())?;
        Ok(())
    }
}
