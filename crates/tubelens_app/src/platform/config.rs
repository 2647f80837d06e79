use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tubelens_core::{BackendNotices, ReconcilerOptions, ReplyCorrelation};
use tubelens_engine::{ConnectionSettings, DEFAULT_ENDPOINT};

use super::logging::LogDestination;

pub const DEFAULT_CONFIG_FILENAME: &str = "tubelens.ron";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path:?}: {source}")]
    Read { path: PathBuf, source: io::Error },
    #[error("failed to parse {path:?}: {source}")]
    Parse {
        path: PathBuf,
        source: ron::error::SpannedError,
    },
}

/// How video result lists are matched to pending searches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Correlation {
    /// Match against the text currently in the input box.
    #[default]
    InputText,
    /// Match against the oldest search still waiting for results.
    OldestPending,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    pub endpoint: String,
    pub connect_timeout_secs: u64,
    pub log_destination: LogDestination,
    pub reply_correlation: Correlation,
    /// Render the backend's "no results" and channel error replies.
    pub render_backend_notices: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            connect_timeout_secs: 10,
            log_destination: LogDestination::default(),
            reply_correlation: Correlation::default(),
            render_backend_notices: false,
        }
    }
}

impl ClientConfig {
    pub fn connection_settings(&self) -> ConnectionSettings {
        ConnectionSettings {
            endpoint: self.endpoint.clone(),
            connect_timeout: Duration::from_secs(self.connect_timeout_secs.max(1)),
        }
    }

    pub fn reconciler_options(&self) -> ReconcilerOptions {
        ReconcilerOptions {
            reply_correlation: map_correlation(self.reply_correlation),
            backend_notices: if self.render_backend_notices {
                BackendNotices::Render
            } else {
                BackendNotices::Ignore
            },
        }
    }
}

/// Config file named on the command line, or `tubelens.ron` in the working directory.
pub fn config_path(arg: Option<String>) -> PathBuf {
    arg.map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILENAME))
}

/// Loads the config at `path`. A missing file yields `Ok(None)`.
pub fn load_config(path: &Path) -> Result<Option<ClientConfig>, ConfigError> {
    let content = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(source) => {
            return Err(ConfigError::Read {
                path: path.to_path_buf(),
                source,
            })
        }
    };
    ron::from_str(&content)
        .map(Some)
        .map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
}

fn map_correlation(correlation: Correlation) -> ReplyCorrelation {
    match correlation {
        Correlation::InputText => ReplyCorrelation::InputText,
        Correlation::OldestPending => ReplyCorrelation::OldestPending,
    }
}
