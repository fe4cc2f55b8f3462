//! Error types for the CLI

/// Result type for CLI operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced to the operator
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Sync(#[from] tsref_sync::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
