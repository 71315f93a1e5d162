//! Error types for the command-line tool.

use thiserror::Error;

/// Errors that can occur while configuring or running a command.
#[derive(Debug, Error)]
pub enum CliError {
    /// File I/O failure.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// YAML parsing or serialization failure.
    #[error("YAML error: {0}")]
    YamlError(#[from] serde_yaml::Error),

    /// Neither `TCS_CONFIG` nor a home directory is available.
    #[error("cannot determine home directory")]
    NoHomeDirectory,

    /// No API key has been configured yet.
    #[error("missing credentials: run `configure <api_key>` first")]
    MissingCredentials,

    /// A paging flag is not a positive integer.
    #[error("invalid value '{value}' for -{flag}: expected a positive integer")]
    InvalidPaging { flag: String, value: String },

    /// The remote service rejected or failed a request.
    #[error("service error: {0}")]
    ServiceError(String),
}

/// Convenience alias for results with [`CliError`].
pub type Result<T> = std::result::Result<T, CliError>;
