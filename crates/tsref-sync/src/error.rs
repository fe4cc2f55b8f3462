//! Error types for tsref-sync

/// Result type for tsref-sync operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while running the synchronizer.
///
/// Per-project write failures during the mutation phase are collected in
/// the report instead, so one project's failure cannot block the others.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Graph(#[from] tsref_graph::Error),

    #[error(transparent)]
    Fs(#[from] tsref_fs::Error),
}
