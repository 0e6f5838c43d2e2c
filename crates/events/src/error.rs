use thiserror::Error;

/// Errors generated by the event hub.
#[derive(Debug, Error)]
pub enum Error {
    /// Error generated reporting an event after the hub
    /// consumer has stopped.
    #[error("status hub is closed")]
    HubClosed,
}
