// File: ./src/logging.rs
//! File logging for the interactive binary.
//!
//! Stdout carries the conversation, so diagnostics go to `echo.log` in the
//! data directory instead.
use crate::context::AppContext;
use anyhow::{Context, Result};
use log::LevelFilter;
use simplelog::{ConfigBuilder, WriteLogger};
use std::fs::OpenOptions;

/// Installs a global logger appending to the context's log file.
///
/// Fails if a global logger is already set.
pub fn init(ctx: &dyn AppContext, level: LevelFilter) -> Result<()> {
    if level == LevelFilter::Off {
        return Ok(());
    }
    let path = ctx.get_log_path()?;
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("Failed to open log file {:?}", path))?;

    let config = ConfigBuilder::new()
        .set_target_level(LevelFilter::Error)
        .set_thread_level(LevelFilter::Off)
        .build();

    WriteLogger::init(level, config, file)
        .with_context(|| format!("Failed to install logger writing to {:?}", path))?;
    log::info!("Logging to {} at level {}", path.display(), level);
    Ok(())
}
