use thiserror::Error;

/// Errors generated by the storage implementations.
#[derive(Debug, Error)]
pub enum Error {
    /// Error generated by input/output.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Error generated converting to or from JSON.
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}
