// File: ./src/context.rs
//! Where Echo keeps its files.
//!
//! Everything that touches the filesystem takes a `&dyn AppContext`, so tests
//! can point the whole app at a throwaway directory.
use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use std::fs;
use std::path::{Path, PathBuf};
use strum::Display;

pub const CONFIG_FILENAME: &str = "config.toml";
pub const LOG_FILENAME: &str = "echo.log";

/// The two directories Echo writes to. Under a custom root each one is a
/// subdirectory named after the variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "lowercase")]
pub enum DirKind {
    Data,
    Config,
}

pub trait AppContext: std::fmt::Debug {
    /// Location of `kind`. The directory may not exist yet.
    fn locate(&self, kind: DirKind) -> Result<PathBuf>;

    /// Like `locate`, creating the directory when it is missing.
    fn dir(&self, kind: DirKind) -> Result<PathBuf> {
        let path = self.locate(kind)?;
        fs::create_dir_all(&path)
            .with_context(|| format!("Failed to create {} directory {}", kind, path.display()))?;
        Ok(path)
    }

    fn get_data_dir(&self) -> Result<PathBuf> {
        self.dir(DirKind::Data)
    }

    fn get_config_dir(&self) -> Result<PathBuf> {
        self.dir(DirKind::Config)
    }

    fn get_config_file_path(&self) -> Result<PathBuf> {
        Ok(self.get_config_dir()?.join(CONFIG_FILENAME))
    }

    /// Path of the task file named by the configuration.
    fn get_task_file_path(&self, file_name: &str) -> Result<PathBuf> {
        Ok(self.get_data_dir()?.join(file_name))
    }

    fn get_log_path(&self) -> Result<PathBuf> {
        Ok(self.get_data_dir()?.join(LOG_FILENAME))
    }
}

fn under_root(root: &Path, kind: DirKind) -> PathBuf {
    root.join(kind.to_string())
}

/// Platform directories, or `<root>/data` and `<root>/config` when a root is
/// given with `--root`.
#[derive(Clone, Debug, Default)]
pub struct StandardContext {
    root: Option<PathBuf>,
}

impl StandardContext {
    pub fn new(root: Option<PathBuf>) -> Self {
        Self { root }
    }
}

impl AppContext for StandardContext {
    fn locate(&self, kind: DirKind) -> Result<PathBuf> {
        if let Some(root) = &self.root {
            return Ok(under_root(root, kind));
        }
        let dirs = ProjectDirs::from("com", "echo", "echo-tasks")
            .ok_or_else(|| anyhow!("Could not determine a home directory"))?;
        let path = match kind {
            DirKind::Data => dirs.data_dir(),
            DirKind::Config => dirs.config_dir(),
        };
        Ok(path.to_path_buf())
    }
}

/// A fresh directory under the system temp dir, deleted on drop.
#[derive(Debug)]
pub struct TestContext {
    pub root: PathBuf,
}

impl TestContext {
    pub fn new() -> Self {
        let root = std::env::temp_dir().join(format!("echo_test_{}", uuid::Uuid::new_v4()));
        fs::create_dir_all(&root).expect("failed to create test directory");
        Self { root }
    }
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new()
    }
}

impl AppContext for TestContext {
    fn locate(&self, kind: DirKind) -> Result<PathBuf> {
        Ok(under_root(&self.root, kind))
    }
}

impl Drop for TestContext {
    fn drop(&mut self) {
        let _ = fs::remove_dir_all(&self.root);
    }
}
