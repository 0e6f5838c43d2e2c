//! Provider implementations for the supported backends.
mod boxsync;
mod drive;
mod dropbox;
mod onedrive;
mod owncloud;

pub use boxsync::BoxProvider;
pub use drive::DriveProvider;
pub use dropbox::DropboxProvider;
pub use onedrive::OnedriveProvider;
pub use owncloud::OwncloudProvider;

use crate::{
    AuthFlow, ClientHandle, Error, LinkStart, Provider, ProviderFactory,
    Result,
};
use cloudsafe_core::{
    AccountId, AccountRecord, BackendType, LinkOutcome, LinkPayload,
    RequestToken, SyncStatus,
};
use cloudsafe_events::StatusHub;
use cloudsafe_task::{AccountTask, NewAccountTask};
use parking_lot::Mutex;
use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};
use url::Url;

/// State shared by every provider implementation.
///
/// Tracks the cached authorization state and the correlation
/// token of the current linking attempt. Only the current token
/// may be resolved; a token that was already resolved or was
/// superseded by a newer attempt resolves to nothing.
pub(crate) struct ProviderCore {
    backend: BackendType,
    client: ClientHandle,
    hub: StatusHub,
    authorized: AtomicBool,
    current_link: Mutex<Option<RequestToken>>,
}

impl ProviderCore {
    pub(crate) fn new(
        backend: BackendType,
        client: ClientHandle,
        hub: StatusHub,
    ) -> Self {
        Self {
            backend,
            client,
            hub,
            authorized: AtomicBool::new(false),
            current_link: Mutex::new(None),
        }
    }

    pub(crate) fn backend(&self) -> BackendType {
        self.backend
    }

    pub(crate) fn is_authorized(&self) -> bool {
        self.authorized.load(Ordering::SeqCst)
    }

    /// Begin the linking protocol with the backend client.
    pub(crate) async fn start_link(
        &self,
        token: RequestToken,
    ) -> Result<LinkStart> {
        let flow = match self.client.begin_auth(&token).await {
            Ok(flow) => flow,
            Err(e) => {
                self.hub.report(SyncStatus::AuthRequired)?;
                return Err(Error::LinkStart {
                    backend: self.backend,
                    source: Box::new(e),
                });
            }
        };

        // A new attempt supersedes any earlier one
        *self.current_link.lock() = Some(token);

        match flow {
            AuthFlow::Completed { outcome, payload } => {
                Ok(LinkStart::Completed {
                    token,
                    outcome,
                    payload,
                })
            }
            AuthFlow::External => {
                tracing::debug!(
                    backend = %self.backend,
                    token = %token,
                    "provider::link_external",
                );
                self.hub.report(SyncStatus::PendingAuth)?;
                Ok(LinkStart::External { token })
            }
        }
    }

    /// Resolve a linking attempt.
    pub(crate) async fn finish_link<E>(
        &self,
        token: RequestToken,
        outcome: LinkOutcome,
        payload: Option<LinkPayload>,
        account_id: Option<AccountId>,
        server_url: Option<Url>,
    ) -> Result<Option<AccountTask<E>>>
    where
        E: std::error::Error + std::fmt::Debug + Send + Sync + 'static,
    {
        {
            let mut current = self.current_link.lock();
            if current.as_ref() != Some(&token) {
                tracing::debug!(
                    backend = %self.backend,
                    token = %token,
                    "provider::finish_link::stale_token",
                );
                return Ok(None);
            }
            *current = None;
        }

        match outcome {
            LinkOutcome::Success => {
                let payload = match payload {
                    Some(payload) => payload,
                    None => self.client.complete_auth(&token).await?,
                };
                self.authorized.store(true, Ordering::SeqCst);
                self.hub.report(SyncStatus::Ok)?;

                let record = AccountRecord {
                    account_id: account_id
                        .unwrap_or_else(AccountId::random),
                    backend: self.backend,
                    display_name: payload.account_name,
                    authorized: true,
                    sync_frequency: Default::default(),
                    server_url,
                };
                Ok(Some(NewAccountTask::new(record)))
            }
            LinkOutcome::Cancelled | LinkOutcome::Failure => {
                tracing::info!(
                    backend = %self.backend,
                    result = ?outcome,
                    "provider::finish_link::rejected",
                );
                self.authorized.store(false, Ordering::SeqCst);
                self.hub.report(SyncStatus::AuthRequired)?;
                Ok(None)
            }
        }
    }

    /// Resolve a linking attempt restored from durable state.
    ///
    /// The token comes from a persisted pending record, not
    /// from this provider instance, which may have been
    /// constructed after the attempt started. The token is
    /// adopted as the current attempt before resolving so a
    /// restart of the orchestrating context cannot strand the
    /// attempt behind the stale-token check.
    pub(crate) async fn resume_link<E>(
        &self,
        token: RequestToken,
        account_id: Option<AccountId>,
        server_url: Option<Url>,
    ) -> Result<Option<AccountTask<E>>>
    where
        E: std::error::Error + std::fmt::Debug + Send + Sync + 'static,
    {
        tracing::debug!(
            backend = %self.backend,
            token = %token,
            "provider::resume_link",
        );
        *self.current_link.lock() = Some(token);
        self.finish_link(
            token,
            LinkOutcome::Success,
            None,
            account_id,
            server_url,
        )
        .await
    }

    /// Clear the cached authorization state.
    pub(crate) fn unlink(&self) {
        tracing::debug!(backend = %self.backend, "provider::unlink");
        self.authorized.store(false, Ordering::SeqCst);
        *self.current_link.lock() = None;
    }

    /// Enqueue a sync pass with the backend client.
    pub(crate) async fn request_sync(&self, manual: bool) -> Result<()> {
        if !self.is_authorized() {
            tracing::warn!(
                backend = %self.backend,
                "provider::request_sync::not_authorized",
            );
            self.hub.report(SyncStatus::AuthRequired)?;
            return Ok(());
        }
        self.client.trigger_sync(manual).await?;
        self.hub.report(SyncStatus::Ok)?;
        Ok(())
    }
}

/// Backend clients used to construct the standard providers.
pub struct BackendClients {
    /// Client for the drive backend.
    pub drive: ClientHandle,
    /// Client for the dropbox backend.
    pub dropbox: ClientHandle,
    /// Client for the box backend.
    pub boxsync: ClientHandle,
    /// Client for the onedrive backend.
    pub onedrive: ClientHandle,
    /// Client for the owncloud backend.
    pub owncloud: ClientHandle,
}

/// Factory constructing the standard provider for each backend.
pub struct StandardProviderFactory {
    clients: BackendClients,
    hub: StatusHub,
}

impl StandardProviderFactory {
    /// Create a factory from a set of backend clients.
    pub fn new(clients: BackendClients, hub: StatusHub) -> Self {
        Self { clients, hub }
    }
}

impl<E> ProviderFactory<E> for StandardProviderFactory
where
    E: std::error::Error + std::fmt::Debug + Send + Sync + 'static,
{
    fn create(&self, backend: BackendType) -> Arc<dyn Provider<E>> {
        let hub = self.hub.clone();
        match backend {
            BackendType::Drive => Arc::new(DriveProvider::new(
                Arc::clone(&self.clients.drive),
                hub,
            )),
            BackendType::Dropbox => Arc::new(DropboxProvider::new(
                Arc::clone(&self.clients.dropbox),
                hub,
            )),
            BackendType::Box => Arc::new(BoxProvider::new(
                Arc::clone(&self.clients.boxsync),
                hub,
            )),
            BackendType::Onedrive => Arc::new(OnedriveProvider::new(
                Arc::clone(&self.clients.onedrive),
                hub,
            )),
            BackendType::Owncloud => Arc::new(OwncloudProvider::new(
                Arc::clone(&self.clients.owncloud),
                hub,
            )),
        }
    }
}
