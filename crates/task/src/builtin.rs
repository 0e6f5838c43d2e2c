use crate::{AccountMutation, AccountTask, CancelFlag};
use async_trait::async_trait;
use cloudsafe_core::{AccountId, AccountRecord, SyncFrequency};
use cloudsafe_store::AccountStoreHandle;

/// Task that deletes the record for an account.
///
/// A stale account reference is a successful no-op; the
/// desired end state already holds.
pub struct RemoveAccountTask;

impl RemoveAccountTask {
    /// Create a task removing an account.
    pub fn new<E>(account_id: AccountId) -> AccountTask<E>
    where
        E: std::error::Error + std::fmt::Debug + Send + Sync + 'static,
    {
        AccountTask::new(
            Some(account_id),
            "removing account",
            Box::new(RemoveMutation { account_id }),
        )
    }
}

struct RemoveMutation {
    account_id: AccountId,
}

#[async_trait]
impl<E> AccountMutation<E> for RemoveMutation
where
    E: std::error::Error + std::fmt::Debug + Send + Sync + 'static,
{
    async fn run(
        &self,
        store: &AccountStoreHandle<E>,
        cancel: &CancelFlag,
    ) -> std::result::Result<(), E> {
        if store.find_account(&self.account_id).await?.is_none() {
            return Ok(());
        }
        if !cancel.try_commit() {
            return Ok(());
        }
        store.delete_account(&self.account_id).await
    }
}

/// Task that writes a new sync frequency setting for an account.
pub struct UpdateSyncFrequencyTask;

impl UpdateSyncFrequencyTask {
    /// Create a task updating the sync frequency of an account.
    pub fn new<E>(
        account_id: AccountId,
        frequency: SyncFrequency,
    ) -> AccountTask<E>
    where
        E: std::error::Error + std::fmt::Debug + Send + Sync + 'static,
    {
        AccountTask::new(
            Some(account_id),
            "updating account",
            Box::new(UpdateFrequencyMutation {
                account_id,
                frequency,
            }),
        )
    }
}

struct UpdateFrequencyMutation {
    account_id: AccountId,
    frequency: SyncFrequency,
}

#[async_trait]
impl<E> AccountMutation<E> for UpdateFrequencyMutation
where
    E: std::error::Error + std::fmt::Debug + Send + Sync + 'static,
{
    async fn run(
        &self,
        store: &AccountStoreHandle<E>,
        cancel: &CancelFlag,
    ) -> std::result::Result<(), E> {
        let Some(mut record) = store.find_account(&self.account_id).await?
        else {
            // Already removed
            return Ok(());
        };
        record.sync_frequency = self.frequency;
        if !cancel.try_commit() {
            return Ok(());
        }
        store.upsert_account(record).await
    }
}

/// Task produced by a successful account link.
///
/// Writes the new or updated account record; when the target
/// account still exists its frequency and server settings are
/// preserved and only identity fields are rewritten.
pub struct NewAccountTask;

impl NewAccountTask {
    /// Create a task writing a linked account record.
    pub fn new<E>(record: AccountRecord) -> AccountTask<E>
    where
        E: std::error::Error + std::fmt::Debug + Send + Sync + 'static,
    {
        AccountTask::new(
            Some(record.account_id),
            "adding account",
            Box::new(NewAccountMutation { record }),
        )
    }
}

struct NewAccountMutation {
    record: AccountRecord,
}

#[async_trait]
impl<E> AccountMutation<E> for NewAccountMutation
where
    E: std::error::Error + std::fmt::Debug + Send + Sync + 'static,
{
    async fn run(
        &self,
        store: &AccountStoreHandle<E>,
        cancel: &CancelFlag,
    ) -> std::result::Result<(), E> {
        let mut record = self.record.clone();
        if let Some(existing) =
            store.find_account(&record.account_id).await?
        {
            record.sync_frequency = existing.sync_frequency;
            if record.server_url.is_none() {
                record.server_url = existing.server_url;
            }
        }
        if !cancel.try_commit() {
            return Ok(());
        }
        store.upsert_account(record).await
    }
}
