use anyhow::{Context, Result};
use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

use crate::config::Config;

fn env_filter(config: &Config) -> EnvFilter {
    EnvFilter::try_new(&config.log_filter).unwrap_or_else(|_| EnvFilter::new("info"))
}

/// The dashboard owns the terminal, so its logs go to a file.
pub fn init_file(config: &Config) -> Result<()> {
    let path = config.log_path();
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create log directory: {}", parent.display()))?;
    }
    let file = open_append(&path)?;

    tracing_subscriber::fmt()
        .with_env_filter(env_filter(config))
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .init();
    Ok(())
}

pub fn init_stderr(config: &Config) {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter(config))
        .with_writer(std::io::stderr)
        .init();
}

fn open_append(path: &Path) -> Result<std::fs::File> {
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Failed to open log file: {}", path.display()))
}
