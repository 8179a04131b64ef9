use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;

use crate::version::source::VersionSource;
use crate::version::sources::go_list::DEFAULT_GO_BINARY;
use crate::version::sources::go_proxy::DEFAULT_PROXY_URL;
use crate::version::sources::{GoListSource, GoProxySource};

/// Default number of minor lines selected by `latest`
pub const DEFAULT_LATEST_MAX: usize = 3;

/// Default log filter when `MODVER_LOG` is unset
pub const DEFAULT_LOG_LEVEL: &str = "info";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot parse config {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// modver configuration structure
#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct ModverConfig {
    pub source: SourceConfig,
    pub logging: LoggingConfig,
}

/// Which backend lists module versions
#[derive(Debug, Clone, Copy, Deserialize, Default, PartialEq, Eq, clap::ValueEnum)]
#[serde(rename_all = "camelCase")]
pub enum SourceKind {
    /// `go list -m -versions` through the local toolchain
    #[default]
    GoList,
    /// The module proxy's `/@v/list` endpoint
    GoProxy,
}

/// Version source configuration
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct SourceConfig {
    pub kind: SourceKind,
    /// Go binary used by the `goList` source
    pub go_binary: String,
    /// GOPROXY value handed to the toolchain; inherited when unset
    pub go_proxy: Option<String>,
    /// Base URL of the `goProxy` source
    pub proxy_url: String,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            kind: SourceKind::default(),
            go_binary: DEFAULT_GO_BINARY.to_string(),
            go_proxy: None,
            proxy_url: DEFAULT_PROXY_URL.to_string(),
        }
    }
}

impl SourceConfig {
    /// Builds the configured source
    pub fn build(&self) -> Arc<dyn VersionSource> {
        match self.kind {
            SourceKind::GoList => {
                let source = GoListSource::new(&self.go_binary);
                match &self.go_proxy {
                    Some(goproxy) => Arc::new(source.with_goproxy(goproxy)),
                    None => Arc::new(source),
                }
            }
            SourceKind::GoProxy => Arc::new(GoProxySource::new(&self.proxy_url)),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct LoggingConfig {
    /// Filter directive used when `MODVER_LOG` is unset
    pub level: String,
    /// Write JSON lines instead of plain text
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: DEFAULT_LOG_LEVEL.to_string(),
            json: false,
        }
    }
}

impl ModverConfig {
    /// Loads the config at `path`, falling back to defaults when the file does not exist
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(source) => {
                return Err(ConfigError::Read {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };

        serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Returns the path to the config file.
/// Uses $XDG_CONFIG_HOME/modver/config.json if XDG_CONFIG_HOME is set,
/// otherwise falls back to ~/.config/modver/config.json,
/// or ./modver/config.json if neither is available.
pub fn config_path() -> PathBuf {
    config_dir_with_env(std::env::var("XDG_CONFIG_HOME").ok(), dirs::home_dir())
        .join("config.json")
}

/// Returns the path to the data directory for modver.
/// Uses $XDG_DATA_HOME/modver if XDG_DATA_HOME is set,
/// otherwise falls back to ~/.local/share/modver,
/// or ./modver if neither is available.
pub fn data_dir() -> PathBuf {
    data_dir_with_env(std::env::var("XDG_DATA_HOME").ok(), dirs::home_dir())
}

/// Returns the path to the log file.
pub fn log_path() -> PathBuf {
    data_dir().join("modver.log")
}

fn config_dir_with_env(xdg_config_home: Option<String>, home_dir: Option<PathBuf>) -> PathBuf {
    xdg_config_home
        .map(PathBuf::from)
        .or_else(|| home_dir.map(|home| home.join(".config")))
        .unwrap_or_else(|| PathBuf::from("."))
        .join("modver")
}

fn data_dir_with_env(xdg_data_home: Option<String>, home_dir: Option<PathBuf>) -> PathBuf {
    let data_dir = xdg_data_home
        .map(PathBuf::from)
        .or_else(|| home_dir.map(|home| home.join(".local/share")))
        .unwrap_or_else(|| PathBuf::from("."));

    data_dir.join("modver")
}
