//! Structured error types.
//!
//! These are designed to be displayable in both CLI and TUI contexts: the
//! `Display` text is what the user sees in the alert.

use std::path::PathBuf;

use thiserror::Error;

/// Form input rejected before any network call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please enter a stock symbol")]
    EmptySymbol,
}

/// Anything that goes wrong between sending the request and holding a parsed response.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RequestError {
    #[error("network error: {0}")]
    Network(String),

    #[error("Analysis failed (HTTP {status})")]
    Status { status: u16 },

    #[error("malformed response: {0}")]
    Decode(String),
}

/// Either kind of failure for one analysis trigger.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnalyzeError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Request(#[from] RequestError),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid api_url '{0}': must start with http:// or https://")]
    InvalidApiUrl(String),
}

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("storage serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}
