use thiserror::Error;

/// Errors generated by the software development kit.
#[derive(Debug, Error)]
pub enum Error {
    /// Error generated by the provider library.
    #[error(transparent)]
    Provider(#[from] cloudsafe_provider::Error),

    /// Error generated by the task library.
    #[error(transparent)]
    Task(#[from] cloudsafe_task::Error),

    /// Error generated by the event hub.
    #[error(transparent)]
    Events(#[from] cloudsafe_events::Error),

    /// Error generated by the account storage.
    #[error("account storage error")]
    Store(#[source] Box<dyn std::error::Error + Send + Sync + 'static>),
}

impl Error {
    pub(crate) fn store<E>(error: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Store(Box::new(error))
    }
}
