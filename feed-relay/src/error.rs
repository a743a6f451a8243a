//! Error taxonomy for the relay workspace.

use thiserror::Error;

/// Follow-directory fetch failures.
///
/// Both variants indicate a configuration or infrastructure problem that a
/// retry at the next refresh tick cannot heal, so the relay treats them as
/// fatal. A non-success HTTP status is not an error: the directory client
/// maps it to an empty follow list.
#[derive(Debug, Error)]
pub enum DirectoryError {
    #[error("directory fetch failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("directory response is not a JSON id array: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Configuration assembly failures at startup.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot build an endpoint under the notify base URL: {0}")]
    Endpoint(#[from] url::ParseError),
}

/// Event-source failures. The relay loop logs these and keeps running; the
/// next refresh reconfigure re-establishes coverage.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("stream connect failed: {0}")]
    Connect(String),

    #[error("stream read failed: {0}")]
    Read(String),
}

/// Failures that terminate the relay.
#[derive(Debug, Error)]
pub enum RelayError {
    #[error(transparent)]
    Directory(#[from] DirectoryError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}
