//! Error types for tsref-locate

/// Result type for tsref-locate operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while parsing configuration text
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Parse error at byte {offset}: {message}")]
    Parse { offset: usize, message: String },
}

impl Error {
    pub fn parse(offset: usize, message: impl Into<String>) -> Self {
        Self::Parse {
            offset,
            message: message.into(),
        }
    }
}
