use crate::Result;
use async_trait::async_trait;
use cloudsafe_core::{LinkOutcome, LinkPayload, RequestToken};
use std::sync::Arc;

/// Shared handle to a backend client.
pub type ClientHandle = Arc<dyn BackendClient>;

/// How a backend answered a request to begin authorization.
#[derive(Debug, Clone)]
pub enum AuthFlow {
    /// The flow completed within the same control-flow turn.
    Completed {
        /// Result code of the flow.
        outcome: LinkOutcome,
        /// Authorization payload on success.
        payload: Option<LinkPayload>,
    },
    /// The flow handed off to an external account chooser;
    /// the result arrives later out-of-band.
    External,
}

/// Network client for one backend.
///
/// Clients encapsulate the backend SDK; signatures are adapted
/// into the uniform provider contract and are the only surface
/// the orchestration core depends on.
#[async_trait]
pub trait BackendClient: Send + Sync {
    /// Begin the backend's authorization flow.
    async fn begin_auth(&self, token: &RequestToken) -> Result<AuthFlow>;

    /// Complete authorization for a previously issued token.
    ///
    /// Used when a resumed linking attempt carries no payload;
    /// the client returns the material cached by the external
    /// flow.
    async fn complete_auth(
        &self,
        token: &RequestToken,
    ) -> Result<LinkPayload>;

    /// Enqueue a sync pass with the backend.
    async fn trigger_sync(&self, manual: bool) -> Result<()>;
}
