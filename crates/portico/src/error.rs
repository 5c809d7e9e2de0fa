//! CLI error types.

use portico_config::ConfigError;
use portico_site::{DirectoryAccessError, FilterError};

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    DirectoryAccess(#[from] DirectoryAccessError),

    #[error("Invalid sidebar extensions: {0}")]
    Filter(#[from] FilterError),

    #[error("Failed to serialize site configuration: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("{0}")]
    Io(#[from] std::io::Error),
}
