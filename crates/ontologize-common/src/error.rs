//! Error types shared across ontologize crates

use thiserror::Error;

/// Result type alias for common operations
pub type Result<T> = std::result::Result<T, CommonError>;

#[derive(Error, Debug)]
pub enum CommonError {
    #[error("Unsupported organism: {0}. Supported organisms: {1}")]
    UnsupportedOrganism(String, String),
}
