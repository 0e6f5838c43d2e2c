use super::ProviderCore;
use crate::{ClientHandle, LinkStart, Provider, ProviderSettings, Result};
use async_trait::async_trait;
use cloudsafe_core::{
    AccountId, BackendType, LinkOutcome, LinkPayload, RequestToken,
};
use cloudsafe_events::StatusHub;
use cloudsafe_task::AccountTask;
use parking_lot::RwLock;
use url::Url;

/// Provider for a self-hosted owncloud backend.
///
/// The only backend with configurable settings; the server
/// endpoint can be displayed and edited and takes effect on
/// the next sync pass.
pub struct OwncloudProvider {
    core: ProviderCore,
    server_url: RwLock<Option<Url>>,
}

impl OwncloudProvider {
    /// Create an owncloud provider.
    pub fn new(client: ClientHandle, hub: StatusHub) -> Self {
        Self {
            core: ProviderCore::new(BackendType::Owncloud, client, hub),
            server_url: RwLock::new(None),
        }
    }
}

#[async_trait]
impl<E> Provider<E> for OwncloudProvider
where
    E: std::error::Error + std::fmt::Debug + Send + Sync + 'static,
{
    fn backend(&self) -> BackendType {
        self.core.backend()
    }

    async fn init(&self) -> Result<()> {
        tracing::debug!("owncloud::init");
        Ok(())
    }

    async fn fini(&self) {
        tracing::debug!("owncloud::fini");
    }

    fn is_account_authorized(&self) -> bool {
        self.core.is_authorized()
    }

    async fn start_account_link(
        &self,
        token: RequestToken,
    ) -> Result<LinkStart> {
        self.core.start_link(token).await
    }

    async fn finish_account_link(
        &self,
        token: RequestToken,
        outcome: LinkOutcome,
        payload: Option<LinkPayload>,
        account_id: Option<AccountId>,
    ) -> Result<Option<AccountTask<E>>> {
        let server_url = self.server_url.read().clone();
        self.core
            .finish_link(token, outcome, payload, account_id, server_url)
            .await
    }

    async fn resume_account_link(
        &self,
        token: RequestToken,
        account_id: Option<AccountId>,
    ) -> Result<Option<AccountTask<E>>> {
        let server_url = self.server_url.read().clone();
        self.core.resume_link(token, account_id, server_url).await
    }

    async fn unlink_account(&self) {
        self.core.unlink();
    }

    async fn request_sync(&self, manual: bool) -> Result<()> {
        self.core.request_sync(manual).await
    }

    fn url(&self) -> Option<Url> {
        self.server_url.read().clone()
    }

    async fn set_settings(&self, settings: ProviderSettings) -> Result<()> {
        tracing::debug!(
            url = %settings.server_url,
            "owncloud::set_settings",
        );
        *self.server_url.write() = Some(settings.server_url);
        Ok(())
    }
}
