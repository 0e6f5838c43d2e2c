use crate::{Error, Result};
use cloudsafe_core::{
    AccountId, AccountRecord, BackendType, LinkOutcome, LinkPayload,
    RequestToken, SyncFrequency, SyncStatus,
};
use cloudsafe_events::{StatusHub, SyncObserver};
use cloudsafe_provider::{
    LinkCoordinator, LinkFlow, ProviderFactory, ProviderRegistry,
    ProviderSettings,
};
use cloudsafe_store::{AccountStoreHandle, LinkStateStorage};
use cloudsafe_task::{
    RemoveAccountTask, TaskTracker, UpdateSyncFrequencyTask,
};
use std::sync::Arc;
use url::Url;

/// Result of requesting an account link.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum LinkActivity {
    /// The link resolved in-turn and the account mutation
    /// task was started.
    TaskStarted(u64),
    /// The link handed off to an external flow and will
    /// resolve on the next resume.
    Pending(RequestToken),
    /// The link resolved in-turn without producing a task.
    NoChange,
}

/// Process root owning the registry, hub, tracker and link
/// coordinator.
pub struct SyncApp<S, E>
where
    S: LinkStateStorage + Send + Sync + 'static,
    E: std::error::Error + std::fmt::Debug + Send + Sync + 'static,
{
    store: AccountStoreHandle<E>,
    registry: Arc<ProviderRegistry<E>>,
    hub: StatusHub,
    tracker: TaskTracker<E>,
    coordinator: LinkCoordinator<S, E>,
}

impl<S, E> SyncApp<S, E>
where
    S: LinkStateStorage + Send + Sync + 'static,
    E: std::error::Error + std::fmt::Debug + Send + Sync + 'static,
{
    /// Create the application root.
    pub fn new(
        store: AccountStoreHandle<E>,
        link_state: S,
        factory: Box<dyn ProviderFactory<E>>,
        hub: StatusHub,
    ) -> Self {
        let registry = Arc::new(ProviderRegistry::new(factory));
        let coordinator = LinkCoordinator::new(
            Arc::clone(&registry),
            Arc::new(link_state),
        );
        let tracker = TaskTracker::new(Arc::clone(&store), hub.clone());
        Self {
            store,
            registry,
            hub,
            tracker,
            coordinator,
        }
    }

    /// Process start hook; initializes every provider.
    pub async fn start(&self) -> Result<()> {
        tracing::info!("app::start");
        Ok(self.registry.init_all().await?)
    }

    /// Process end hook.
    ///
    /// Cancels in-flight account tasks and tears the providers
    /// down; the registry refuses access afterwards.
    pub async fn shutdown(&self) {
        tracing::info!("app::shutdown");
        self.tracker.teardown().await;
        self.registry.fini_all().await;
    }

    /// Account store.
    pub fn store(&self) -> &AccountStoreHandle<E> {
        &self.store
    }

    /// Provider registry.
    pub fn registry(&self) -> &Arc<ProviderRegistry<E>> {
        &self.registry
    }

    /// Status hub.
    pub fn hub(&self) -> &StatusHub {
        &self.hub
    }

    /// Task tracker.
    pub fn tracker(&self) -> &TaskTracker<E> {
        &self.tracker
    }

    /// Link coordinator.
    pub fn coordinator(&self) -> &LinkCoordinator<S, E> {
        &self.coordinator
    }

    /// Replace the current observer.
    pub fn set_observer(
        &self,
        observer: Option<Arc<dyn SyncObserver>>,
    ) -> Result<()> {
        Ok(self.hub.set_observer(observer)?)
    }

    /// Latest reported sync status.
    pub fn latest_status(&self) -> SyncStatus {
        self.hub.latest()
    }

    /// Snapshot of the linked accounts.
    pub async fn accounts(&self) -> Result<Vec<AccountRecord>> {
        self.store.list_accounts().await.map_err(Error::store)
    }

    /// Link an account for a backend.
    pub async fn link_account(
        &self,
        backend: BackendType,
    ) -> Result<LinkActivity> {
        let existing = self
            .store
            .find_account_by_backend(backend)
            .await
            .map_err(Error::store)?
            .map(|record| record.account_id);
        match self.coordinator.start_link(backend, existing).await? {
            LinkFlow::Resolved(Some(task)) => {
                let task_id = self.tracker.start(task).await?;
                Ok(LinkActivity::TaskStarted(task_id))
            }
            LinkFlow::Resolved(None) => Ok(LinkActivity::NoChange),
            LinkFlow::Pending(token) => Ok(LinkActivity::Pending(token)),
        }
    }

    /// Resolve pending linking attempts on context resume.
    ///
    /// Returns the identifiers of the started account tasks.
    pub async fn resume(&self) -> Result<Vec<u64>> {
        let accounts = self.accounts().await?;
        let tasks = self.coordinator.resume(&accounts).await?;
        let mut task_ids = Vec::new();
        for task in tasks {
            task_ids.push(self.tracker.start(task).await?);
        }
        Ok(task_ids)
    }

    /// Resolve a linking result delivered by a direct callback.
    pub async fn complete_link(
        &self,
        backend: BackendType,
        token: RequestToken,
        outcome: LinkOutcome,
        payload: Option<LinkPayload>,
    ) -> Result<Option<u64>> {
        let existing = self
            .store
            .find_account_by_backend(backend)
            .await
            .map_err(Error::store)?
            .map(|record| record.account_id);
        let task = self
            .coordinator
            .handle_link_result(backend, token, outcome, payload, existing)
            .await?;
        match task {
            Some(task) => Ok(Some(self.tracker.start(task).await?)),
            None => Ok(None),
        }
    }

    /// Request a sync pass for a backend.
    pub async fn sync_account(
        &self,
        backend: BackendType,
        manual: bool,
    ) -> Result<()> {
        let provider = self.registry.get(backend)?;
        Ok(provider.request_sync(manual).await?)
    }

    /// Remove a linked account.
    pub async fn remove_account(
        &self,
        account_id: AccountId,
    ) -> Result<u64> {
        let task = RemoveAccountTask::new(account_id);
        Ok(self.tracker.start(task).await?)
    }

    /// Update the sync frequency setting of an account.
    pub async fn set_sync_frequency(
        &self,
        account_id: AccountId,
        frequency: SyncFrequency,
    ) -> Result<u64> {
        let task = UpdateSyncFrequencyTask::new(account_id, frequency);
        Ok(self.tracker.start(task).await?)
    }

    /// Server endpoint of a backend, when it exposes one.
    pub fn server_url(&self, backend: BackendType) -> Result<Option<Url>> {
        Ok(self.registry.get(backend)?.url())
    }

    /// Update the server endpoint of a backend.
    pub async fn set_server_url(
        &self,
        backend: BackendType,
        server_url: Url,
    ) -> Result<()> {
        let provider = self.registry.get(backend)?;
        Ok(provider
            .set_settings(ProviderSettings { server_url })
            .await?)
    }
}
