// Manages the flat task file: one pipe-delimited line per task.
//
// Line formats:
//   T | <0|1> | <description>
//   D | <0|1> | <description> | <by>
//   E | <0|1> | <description> | <start> | <end>
// Dates use the same `yyyy-MM-dd HHmm` pattern as user input.
use crate::error::StorageError;
use crate::model::item::{FIELD_SEPARATOR, TaskDraft, TaskKind, format_input};
use crate::model::Task;
use fs2::FileExt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

pub const DONE_FLAG: &str = "1";
pub const NOT_DONE_FLAG: &str = "0";

/// Suffix given to a task file that could not be loaded.
pub const BACKUP_EXTENSION: &str = "bak";

pub struct LocalStorage;

impl LocalStorage {
    // --- Codec ---

    pub fn encode_task(task: &Task) -> String {
        let done = if task.done { DONE_FLAG } else { NOT_DONE_FLAG };
        let mut fields = vec![task.kind.marker().to_string(), done.to_string()];
        fields.push(task.description.clone());
        match &task.kind {
            TaskKind::Todo => {}
            TaskKind::Deadline { by } => fields.push(format_input(by)),
            TaskKind::Event { start, end } => {
                fields.push(format_input(start));
                fields.push(format_input(end));
            }
        }
        fields.join(FIELD_SEPARATOR)
    }

    /// Decodes a single stored line. `line_no` is 1-based and only used for
    /// error messages.
    ///
    /// The task is rebuilt through the same constructors as live input, so a
    /// stored line is held to the same rules as a typed command.
    pub fn decode_line(line_no: usize, line: &str) -> Result<Task, StorageError> {
        let fields: Vec<&str> = line.split(FIELD_SEPARATOR).collect();
        let marker = fields[0];

        let expected = match marker {
            "T" => 3,
            "D" => 4,
            "E" => 5,
            _ => {
                return Err(StorageError::UnknownMarker {
                    line: line_no,
                    marker: marker.to_string(),
                });
            }
        };
        if fields.len() != expected {
            return Err(StorageError::FieldCount {
                line: line_no,
                expected,
                found: fields.len(),
            });
        }

        let done = match fields[1] {
            DONE_FLAG => true,
            NOT_DONE_FLAG => false,
            other => {
                return Err(StorageError::DoneFlag {
                    line: line_no,
                    flag: other.to_string(),
                });
            }
        };

        let description = fields[2].to_string();
        let draft = match marker {
            "T" => TaskDraft::Todo { description },
            "D" => TaskDraft::Deadline {
                description,
                by: fields[3].to_string(),
            },
            _ => TaskDraft::Event {
                description,
                start: fields[3].to_string(),
                end: fields[4].to_string(),
            },
        };

        let mut task = Task::from_draft(&draft).map_err(|source| StorageError::InvalidTask {
            line: line_no,
            source,
        })?;
        task.done = done;
        Ok(task)
    }

    pub fn encode_tasks(tasks: &[Task]) -> Vec<String> {
        tasks.iter().map(Self::encode_task).collect()
    }

    /// Decodes every line. The first bad line fails the whole batch.
    /// Blank lines are skipped.
    pub fn decode_lines<'a, I>(lines: I) -> Result<Vec<Task>, StorageError>
    where
        I: IntoIterator<Item = &'a str>,
    {
        lines
            .into_iter()
            .enumerate()
            .filter(|(_, line)| !line.trim().is_empty())
            .map(|(idx, line)| Self::decode_line(idx + 1, line))
            .collect()
    }

    // --- File access ---

    /// Helper to get a sidecar lock file path
    fn get_lock_path(file_path: &Path) -> PathBuf {
        let mut lock_path = file_path.to_path_buf();
        if let Some(ext) = lock_path.extension() {
            let mut new_ext = ext.to_os_string();
            new_ext.push(".lock");
            lock_path.set_extension(new_ext);
        } else {
            lock_path.set_extension("lock");
        }
        lock_path
    }

    /// Runs `f` while holding an exclusive lock on the sidecar lock file.
    pub fn with_lock<F, T, E>(file_path: &Path, f: F) -> Result<T, E>
    where
        F: FnOnce() -> Result<T, E>,
        E: From<io::Error>,
    {
        if let Some(parent) = file_path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }
        let lock_path = Self::get_lock_path(file_path);
        let file = fs::OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(&lock_path)?;

        file.lock_exclusive()?;
        let result = f();
        FileExt::unlock(&file)?;
        result
    }

    /// Atomic write: Write to .tmp file then rename
    pub fn atomic_write<P: AsRef<Path>, C: AsRef<[u8]>>(path: P, contents: C) -> io::Result<()> {
        let path = path.as_ref();
        let tmp_path = path.with_extension("tmp");
        fs::write(&tmp_path, contents)?;
        fs::rename(tmp_path, path)?;
        Ok(())
    }

    /// Reads the task file. A missing file is an empty list, not an error.
    pub fn load(path: &Path) -> Result<Vec<Task>, StorageError> {
        if !path.exists() {
            log::info!("No task file at {}, starting empty", path.display());
            return Ok(vec![]);
        }
        let tasks = Self::with_lock(path, || {
            let content = fs::read_to_string(path)?;
            Self::decode_lines(content.lines())
        })?;
        log::info!("Loaded {} tasks from {}", tasks.len(), path.display());
        Ok(tasks)
    }

    /// Replaces the whole file with the current list, in list order.
    pub fn save(path: &Path, tasks: &[Task]) -> Result<(), StorageError> {
        Self::with_lock(path, || {
            let mut content = Self::encode_tasks(tasks).join("\n");
            if !content.is_empty() {
                content.push('\n');
            }
            Self::atomic_write(path, content)?;
            Ok::<(), StorageError>(())
        })?;
        log::debug!("Saved {} tasks to {}", tasks.len(), path.display());
        Ok(())
    }

    /// First of `<name>.bak`, `<name>.1.bak`, `<name>.2.bak`, ... not yet taken.
    fn free_backup_path(path: &Path) -> PathBuf {
        let candidate = |n: u32| {
            let mut name = path.as_os_str().to_os_string();
            if n > 0 {
                name.push(format!(".{n}"));
            }
            name.push(".");
            name.push(BACKUP_EXTENSION);
            PathBuf::from(name)
        };
        (0..)
            .map(candidate)
            .find(|p| !p.exists())
            .unwrap_or_else(|| candidate(u32::MAX))
    }

    /// Renames an unreadable task file to a backup name that no earlier
    /// backup uses, so that neither the next save nor a later failed load
    /// can overwrite it. Returns the new path.
    pub fn move_aside(path: &Path) -> io::Result<PathBuf> {
        let backup = Self::with_lock(path, || {
            let backup = Self::free_backup_path(path);
            fs::rename(path, &backup)?;
            Ok::<PathBuf, io::Error>(backup)
        })?;
        log::warn!(
            "Moved unreadable task file {} to {}",
            path.display(),
            backup.display()
        );
        Ok(backup)
    }
}
