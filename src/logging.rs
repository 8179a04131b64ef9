//! Tracing setup for the `modver` binary
//!
//! Logs go to a file so that stdout stays reserved for selected versions.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use anyhow::Context;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, fmt};

use crate::config::LoggingConfig;

/// Environment variable holding a filter directive, e.g. `MODVER_LOG=modver=debug`
pub const LOG_ENV: &str = "MODVER_LOG";

/// Installs the global subscriber writing to `log_path`.
///
/// The returned guard flushes buffered lines on drop and must be kept alive
/// for as long as the process logs.
pub fn init(config: &LoggingConfig, log_path: &Path) -> anyhow::Result<WorkerGuard> {
    let (dir, file_name) = split_log_path(log_path);
    std::fs::create_dir_all(&dir)
        .with_context(|| format!("cannot create log directory {:?}", dir))?;

    let appender = tracing_appender::rolling::never(&dir, file_name);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(&config.level));
    let layer = fmt::layer().with_writer(writer).with_ansi(false);

    if config.json {
        tracing_subscriber::registry()
            .with(filter)
            .with(layer.json())
            .try_init()
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(layer)
            .try_init()
    }
    .context("cannot install tracing subscriber")?;

    Ok(guard)
}

fn split_log_path(log_path: &Path) -> (PathBuf, OsString) {
    let dir = log_path
        .parent()
        .filter(|dir| !dir.as_os_str().is_empty())
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."));
    let file_name = log_path
        .file_name()
        .map(|name| name.to_os_string())
        .unwrap_or_else(|| OsString::from("modver.log"));
    (dir, file_name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_log_path_separates_directory_and_file() {
        let (dir, file) = split_log_path(Path::new("/home/user/.local/share/modver/modver.log"));
        assert_eq!(dir, PathBuf::from("/home/user/.local/share/modver"));
        assert_eq!(file, OsString::from("modver.log"));
    }

    #[test]
    fn split_log_path_uses_current_dir_for_bare_file_name() {
        let (dir, file) = split_log_path(Path::new("custom.log"));
        assert_eq!(dir, PathBuf::from("."));
        assert_eq!(file, OsString::from("custom.log"));
    }
}
