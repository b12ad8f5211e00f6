use thiserror::Error;
use tix_config::ConfigError;
use tix_core::{CoreError, SourceError};
use tix_source_json::SnapshotError;

/// Error type surfaced by the command-line shell.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("Snapshot error: {0}")]
    Snapshot(#[from] SnapshotError),
    #[error(transparent)]
    Core(#[from] CoreError),
    #[error("Scan incomplete: {0}")]
    Incomplete(SourceError),
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}
