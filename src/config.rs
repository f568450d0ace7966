// File: ./src/config.rs
// Handles configuration loading, saving, and defaults.
use crate::context::{AppContext, LOG_FILENAME};
use crate::storage::LocalStorage;
use anyhow::{Context, Error, Result};
use log::LevelFilter;
use serde::{Deserialize, Serialize};
use std::fs;
use std::str::FromStr;

fn default_data_file() -> String {
    "tasks.txt".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_true() -> bool {
    true
}

#[derive(Deserialize, Serialize, Clone, Debug, PartialEq, Eq)]
pub struct Config {
    /// Name of the task file inside the data directory.
    #[serde(default = "default_data_file")]
    pub data_file: String,
    /// One of off, error, warn, info, debug, trace.
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// List the clashing tasks when an added task conflicts with them.
    #[serde(default = "default_true")]
    pub show_conflicts: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_file: default_data_file(),
            log_level: default_log_level(),
            show_conflicts: true,
        }
    }
}

impl Config {
    /// Load the configuration from disk using an explicit context.
    /// Returns a contextualized error if reading or parsing fails.
    pub fn load(ctx: &dyn AppContext) -> Result<Self> {
        let path = ctx.get_config_file_path()?;

        if !path.exists() {
            return Err(anyhow::anyhow!("Config file not found"));
        }

        // Keeps the io::Error in the chain for is_missing_config_error.
        let contents = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file '{}'", path.display()))?;

        let config: Config = toml::from_str(&contents).map_err(|e| {
            anyhow::anyhow!("Failed to parse config file '{}': {}", path.display(), e)
        })?;
        config.validate()?;

        Ok(config)
    }

    /// Like `load`, but a missing file yields the defaults.
    pub fn load_or_default(ctx: &dyn AppContext) -> Result<Self> {
        match Self::load(ctx) {
            Ok(config) => Ok(config),
            Err(e) if Self::is_missing_config_error(&e) => Ok(Self::default()),
            Err(e) => Err(e),
        }
    }

    pub fn is_missing_config_error(err: &Error) -> bool {
        if err.to_string().contains("Config file not found") {
            return true;
        }
        err.chain().any(|cause| {
            cause
                .downcast_ref::<std::io::Error>()
                .is_some_and(|io_err| io_err.kind() == std::io::ErrorKind::NotFound)
        })
    }

    fn validate(&self) -> Result<()> {
        if self.data_file.trim().is_empty()
            || self.data_file.contains(['/', '\\'])
            || self.data_file == "."
            || self.data_file == ".."
        {
            anyhow::bail!(
                "data_file must be a plain file name, got '{}'",
                self.data_file
            );
        }
        if self.data_file == LOG_FILENAME {
            anyhow::bail!(
                "data_file cannot be '{}', the log file uses that name",
                LOG_FILENAME
            );
        }
        self.level_filter()?;
        Ok(())
    }

    pub fn level_filter(&self) -> Result<LevelFilter> {
        LevelFilter::from_str(&self.log_level)
            .map_err(|_| anyhow::anyhow!("Unknown log_level '{}'", self.log_level))
    }

    /// Save configuration using an explicit context.
    pub fn save(&self, ctx: &dyn AppContext) -> Result<()> {
        let path = ctx.get_config_file_path()?;
        LocalStorage::with_lock(&path, || -> Result<()> {
            let toml_str = toml::to_string_pretty(self)?;
            LocalStorage::atomic_write(&path, toml_str)?;
            Ok(())
        })?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::TestContext;

    #[test]
    fn test_missing_file_gives_defaults() {
        let ctx = TestContext::new();
        let err = Config::load(&ctx).unwrap_err();
        assert!(Config::is_missing_config_error(&err));
        assert_eq!(Config::load_or_default(&ctx).unwrap(), Config::default());
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let ctx = TestContext::new();
        let path = ctx.get_config_file_path().unwrap();
        fs::write(&path, "log_level = \"debug\"\n").unwrap();

        let config = Config::load(&ctx).unwrap();
        assert_eq!(config.log_level, "debug");
        assert_eq!(config.data_file, "tasks.txt");
        assert!(config.show_conflicts);
        assert_eq!(config.level_filter().unwrap(), LevelFilter::Debug);
    }

    #[test]
    fn test_invalid_values_are_reported() {
        let ctx = TestContext::new();
        let path = ctx.get_config_file_path().unwrap();

        fs::write(&path, "data_file = \"../escape.txt\"\n").unwrap();
        let err = Config::load_or_default(&ctx).unwrap_err();
        assert!(err.to_string().contains("plain file name"));

        fs::write(&path, "log_level = \"loud\"\n").unwrap();
        assert!(Config::load(&ctx).is_err());

        fs::write(&path, "this is not toml").unwrap();
        let err = Config::load(&ctx).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config file"));
        assert!(!Config::is_missing_config_error(&err));
    }

    #[test]
    fn test_data_file_cannot_be_the_log_file() {
        let ctx = TestContext::new();
        let path = ctx.get_config_file_path().unwrap();
        fs::write(&path, format!("data_file = \"{LOG_FILENAME}\"\n")).unwrap();

        let err = Config::load(&ctx).unwrap_err();
        assert!(err.to_string().contains("log file"));
        assert!(!Config::is_missing_config_error(&err));
    }

    #[test]
    fn test_not_found_read_error_counts_as_missing() {
        let err = Error::from(std::io::Error::from(std::io::ErrorKind::NotFound))
            .context("Failed to read config file 'config.toml'");
        assert!(Config::is_missing_config_error(&err));

        let err = Error::from(std::io::Error::from(std::io::ErrorKind::PermissionDenied))
            .context("Failed to read config file 'config.toml'");
        assert!(!Config::is_missing_config_error(&err));
    }

    #[test]
    fn test_save_then_load() {
        let ctx = TestContext::new();
        let config = Config {
            data_file: "work.txt".to_string(),
            log_level: "warn".to_string(),
            show_conflicts: false,
        };
        config.save(&ctx).unwrap();
        assert_eq!(Config::load(&ctx).unwrap(), config);
    }
}
