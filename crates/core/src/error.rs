use thiserror::Error;

/// Errors generated by the core library.
#[derive(Debug, Error)]
pub enum Error {
    /// Error generated when a backend type identifier is not recognized.
    #[error("'{0}' is not a known backend type")]
    UnknownBackendType(String),

    /// Error generated parsing identifiers.
    #[error(transparent)]
    Uuid(#[from] uuid::Error),
}
