//! Error types for h5sh

use h5sh_sdk::StoreError;
use thiserror::Error;

/// Result type alias for h5sh operations
pub type H5shResult<T> = Result<T, H5shError>;

/// Error types for h5sh shell operations
#[derive(Error, Debug)]
pub enum H5shError {
    /// Resolved path does not name an existing group
    #[error("Path '{0}' is not a group")]
    InvalidGroupPath(String),

    /// Wildcard pattern could not be compiled
    #[error("Invalid pattern '{0}'")]
    InvalidPattern(String),

    /// Command not found
    #[error("Invalid command '{0}'. Type 'help' for a list of valid commands")]
    CommandNotFound(String),

    /// Invalid argument
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Store query failed
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// IO error (writing output, etc.)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Exit requested (not really an error)
    #[error("Exit with code {0}")]
    Exit(i32),
}
