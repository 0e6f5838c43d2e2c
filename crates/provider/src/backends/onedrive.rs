use super::ProviderCore;
use crate::{ClientHandle, LinkStart, Provider, Result};
use async_trait::async_trait;
use cloudsafe_core::{
    AccountId, BackendType, LinkOutcome, LinkPayload, RequestToken,
};
use cloudsafe_events::StatusHub;
use cloudsafe_task::AccountTask;

/// Provider for the onedrive backend.
///
/// Like dropbox the linking flow leaves the orchestrating
/// context and resolves on the next resume.
pub struct OnedriveProvider {
    core: ProviderCore,
}

impl OnedriveProvider {
    /// Create an onedrive provider.
    pub fn new(client: ClientHandle, hub: StatusHub) -> Self {
        Self {
            core: ProviderCore::new(BackendType::Onedrive, client, hub),
        }
    }
}

#[async_trait]
impl<E> Provider<E> for OnedriveProvider
where
    E: std::error::Error + std::fmt::Debug + Send + Sync + 'static,
{
    fn backend(&self) -> BackendType {
        self.core.backend()
    }

    async fn init(&self) -> Result<()> {
        tracing::debug!("onedrive::init");
        Ok(())
    }

    async fn fini(&self) {
        tracing::debug!("onedrive::fini");
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
        self.core
            .finish_link(token, outcome, payload, account_id, None)
            .await
    }

    async fn resume_account_link(
        &self,
        token: RequestToken,
        account_id: Option<AccountId>,
    ) -> Result<Option<AccountTask<E>>> {
        self.core.resume_link(token, account_id, None).await
    }

    async fn unlink_account(&self) {
        self.core.unlink();
    }

    async fn request_sync(&self, manual: bool) -> Result<()> {
        self.core.request_sync(manual).await
    }
}
