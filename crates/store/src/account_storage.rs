use async_trait::async_trait;
use cloudsafe_core::{AccountId, AccountRecord, BackendType};
use std::{collections::HashMap, sync::Arc};
use tokio::sync::RwLock;

/// Shared handle to an account storage provider.
pub type AccountStoreHandle<E> =
    Arc<dyn AccountStorage<Error = E> + Send + Sync + 'static>;

/// Queryable, mutable table of linked accounts.
///
/// Implementations may be backed by a database table or a
/// document on disc; the orchestration core only depends on
/// this boundary.
#[async_trait]
pub trait AccountStorage {
    /// Error type.
    type Error: std::error::Error + std::fmt::Debug + Send + Sync + 'static;

    /// List all linked accounts.
    async fn list_accounts(
        &self,
    ) -> std::result::Result<Vec<AccountRecord>, Self::Error>;

    /// Find an account by identifier.
    async fn find_account(
        &self,
        account_id: &AccountId,
    ) -> std::result::Result<Option<AccountRecord>, Self::Error>;

    /// Find the account linked for a backend.
    async fn find_account_by_backend(
        &self,
        backend: BackendType,
    ) -> std::result::Result<Option<AccountRecord>, Self::Error>;

    /// Insert or update an account record.
    async fn upsert_account(
        &self,
        record: AccountRecord,
    ) -> std::result::Result<(), Self::Error>;

    /// Delete an account record.
    ///
    /// Deleting an account that does not exist is a no-op.
    async fn delete_account(
        &self,
        account_id: &AccountId,
    ) -> std::result::Result<(), Self::Error>;
}

/// In-memory account storage.
#[derive(Default)]
pub struct MemoryAccountStore {
    accounts: RwLock<HashMap<AccountId, AccountRecord>>,
}

impl MemoryAccountStore {
    /// Create an empty in-memory account store.
    pub fn new() -> Self {
        Default::default()
    }
}

#[async_trait]
impl AccountStorage for MemoryAccountStore {
    type Error = crate::Error;

    async fn list_accounts(&self) -> crate::Result<Vec<AccountRecord>> {
        let accounts = self.accounts.read().await;
        let mut records: Vec<_> = accounts.values().cloned().collect();
        records.sort_by(|a, b| a.backend.cmp(&b.backend));
        Ok(records)
    }

    async fn find_account(
        &self,
        account_id: &AccountId,
    ) -> crate::Result<Option<AccountRecord>> {
        let accounts = self.accounts.read().await;
        Ok(accounts.get(account_id).cloned())
    }

    async fn find_account_by_backend(
        &self,
        backend: BackendType,
    ) -> crate::Result<Option<AccountRecord>> {
        let accounts = self.accounts.read().await;
        Ok(accounts
            .values()
            .find(|record| record.backend == backend)
            .cloned())
    }

    async fn upsert_account(
        &self,
        record: AccountRecord,
    ) -> crate::Result<()> {
        let mut accounts = self.accounts.write().await;
        accounts.insert(record.account_id, record);
        Ok(())
    }

    async fn delete_account(
        &self,
        account_id: &AccountId,
    ) -> crate::Result<()> {
        let mut accounts = self.accounts.write().await;
        accounts.remove(account_id);
        Ok(())
    }
}
