//! Error types for tsref-graph

use std::path::PathBuf;

/// Result type for tsref-graph operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while building the project graph.
///
/// Every variant is fatal to the whole run: a graph built from partially
/// readable inputs cannot be trusted.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Fs(#[from] tsref_fs::Error),

    #[error("Failed to parse manifest at {path}: {source}")]
    Manifest {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to parse configuration at {path}: {source}")]
    Config {
        path: PathBuf,
        #[source]
        source: tsref_locate::Error,
    },

    #[error("Root configuration at {path} has no usable \"references\" list")]
    RootReferences { path: PathBuf },
}

impl Error {
    pub fn manifest(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        Self::Manifest {
            path: path.into(),
            source,
        }
    }

    pub fn config(path: impl Into<PathBuf>, source: tsref_locate::Error) -> Self {
        Self::Config {
            path: path.into(),
            source,
        }
    }
}
