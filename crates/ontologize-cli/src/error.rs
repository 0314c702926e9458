//! Error types for the ontologize CLI
//!
//! Messages are meant for the person running the command: each says what went
//! wrong and what to try next.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;

#[derive(Error, Debug)]
pub enum CliError {
    /// Lookup building or report processing failed
    #[error(transparent)]
    Go(#[from] ontologize_go::GoError),

    /// Unknown organism
    #[error(transparent)]
    Common(#[from] ontologize_common::CommonError),

    /// Server answered with a non-success status
    #[error("Request to '{url}' failed with HTTP {status}. Check the URL or set it via the environment.")]
    HttpStatus { url: String, status: u16 },

    /// HTTP request failed
    #[error("Network request failed: {0}. Check your internet connection.")]
    Http(#[from] reqwest::Error),

    /// File system operation failed
    #[error("File operation failed on '{path}': {source}. Check file permissions and disk space.")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// External program could not be started
    #[error("Failed to start '{program}': {source}. Make sure it is installed and on PATH.")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// External program exited with a failure status
    #[error("'{program}' exited with {status}. See the log at '{log}'.")]
    ProcessFailed {
        program: String,
        status: String,
        log: PathBuf,
    },

    /// Required input file does not exist
    #[error("File not found: '{0}'. Run 'ontologize download' or pass the path explicitly.")]
    FileNotFound(PathBuf),

    /// Conflicting or missing arguments
    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),

    /// Configuration is missing or invalid
    #[error("Configuration error: {0}. Check your environment variables or .env file.")]
    Config(String),
}

impl CliError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub fn invalid_arguments(msg: impl Into<String>) -> Self {
        Self::InvalidArguments(msg.into())
    }
}
