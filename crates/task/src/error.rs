use thiserror::Error;

/// Errors generated by the task library.
#[derive(Debug, Error)]
pub enum Error {
    /// Error generated notifying the observer of task
    /// lifecycle events.
    #[error(transparent)]
    Events(#[from] cloudsafe_events::Error),
}
