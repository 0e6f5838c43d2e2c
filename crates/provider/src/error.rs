use cloudsafe_core::BackendType;
use thiserror::Error;

/// Errors generated by the provider library.
#[derive(Debug, Error)]
pub enum Error {
    /// Error generated starting an account link.
    ///
    /// The caller must reset partial state by calling
    /// `unlink_account()` on the provider.
    #[error("failed to start account link for backend '{backend}'")]
    LinkStart {
        /// Backend the link was started for.
        backend: BackendType,
        /// Underlying client error.
        #[source]
        source: Box<Error>,
    },

    /// Error generated by a backend client.
    #[error("backend client error: {0}")]
    Client(String),

    /// Error generated using a provider registry after it
    /// was finalized.
    #[error("provider registry is closed")]
    RegistryClosed,

    /// Error generated updating settings on a backend that
    /// has no configurable settings.
    #[error("backend '{0}' does not support settings")]
    SettingsUnsupported(BackendType),

    /// Error generated by the durable link state storage.
    #[error("link state storage error")]
    LinkState(#[source] Box<dyn std::error::Error + Send + Sync + 'static>),

    /// Error generated reporting events.
    #[error(transparent)]
    Events(#[from] cloudsafe_events::Error),
}

impl Error {
    pub(crate) fn link_state<E>(error: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::LinkState(Box::new(error))
    }
}
