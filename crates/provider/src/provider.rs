use crate::Result;
use async_trait::async_trait;
use cloudsafe_core::{
    AccountId, BackendType, LinkOutcome, LinkPayload, RequestToken,
};
use cloudsafe_task::AccountTask;
use url::Url;

/// How a provider answered a request to start an account link.
#[derive(Debug, Clone)]
pub enum LinkStart {
    /// The backend completed the linking protocol in-turn;
    /// the result must be passed to `finish_account_link`
    /// immediately.
    Completed {
        /// Correlation token of the attempt.
        token: RequestToken,
        /// Result code of the flow.
        outcome: LinkOutcome,
        /// Authorization payload on success.
        payload: Option<LinkPayload>,
    },
    /// The backend handed off to an external flow; the attempt
    /// must be recorded as pending so it survives the
    /// orchestrating context being torn down.
    External {
        /// Correlation token of the attempt.
        token: RequestToken,
    },
}

/// Backend-specific provider settings.
#[derive(Debug, Clone)]
pub struct ProviderSettings {
    /// Server endpoint for self-hosted backends.
    pub server_url: Url,
}

/// Uniform capability contract for one backend.
#[async_trait]
pub trait Provider<E>: Send + Sync
where
    E: std::error::Error + std::fmt::Debug + Send + Sync + 'static,
{
    /// Backend this provider integrates.
    fn backend(&self) -> BackendType;

    /// Initialize the provider.
    ///
    /// Called exactly once at process start by the registry.
    async fn init(&self) -> Result<()>;

    /// Tear the provider down.
    ///
    /// Called exactly once at process end by the registry.
    async fn fini(&self);

    /// Whether the backend has authorized an account.
    ///
    /// Non-blocking; reflects cached authorization state.
    fn is_account_authorized(&self) -> bool;

    /// Begin the backend's account linking protocol.
    ///
    /// On an error the caller must reset partial state with
    /// [Provider::unlink_account].
    async fn start_account_link(
        &self,
        token: RequestToken,
    ) -> Result<LinkStart>;

    /// Resolve an account linking attempt.
    ///
    /// On success returns the task that writes the new or
    /// updated account record. On failure or cancellation the
    /// authorization state is reset and no task is returned.
    /// Resolving a token twice, or a token superseded by a
    /// newer attempt, is a no-op returning no task.
    async fn finish_account_link(
        &self,
        token: RequestToken,
        outcome: LinkOutcome,
        payload: Option<LinkPayload>,
        account_id: Option<AccountId>,
    ) -> Result<Option<AccountTask<E>>>;

    /// Resolve a linking attempt restored from durable state.
    ///
    /// The token comes from a persisted pending record and is
    /// adopted as the current attempt, so a pending link
    /// survives the provider being reconstructed. Resolves
    /// with a synthesized success outcome; an abandoned
    /// external flow only becomes visible through the next
    /// authorization check.
    async fn resume_account_link(
        &self,
        token: RequestToken,
        account_id: Option<AccountId>,
    ) -> Result<Option<AccountTask<E>>>;

    /// Clear the local authorization state.
    ///
    /// Remote token revocation is best-effort.
    async fn unlink_account(&self);

    /// Enqueue a sync pass with the backend.
    ///
    /// Manual requests are user-initiated and bypass the
    /// scheduled interval.
    async fn request_sync(&self, manual: bool) -> Result<()>;

    /// Server endpoint for display and editing.
    ///
    /// Only self-hosted backends expose an endpoint.
    fn url(&self) -> Option<Url> {
        None
    }

    /// Update backend-specific settings.
    ///
    /// Takes effect on the next sync pass.
    async fn set_settings(&self, settings: ProviderSettings) -> Result<()> {
        let _ = settings;
        Err(crate::Error::SettingsUnsupported(self.backend()))
    }
}
