use async_trait::async_trait;
use cloudsafe_core::{BackendType, RequestToken};
use serde::{Deserialize, Serialize};
use std::{
    collections::HashMap,
    io::ErrorKind,
    path::{Path, PathBuf},
};
use time::OffsetDateTime;
use tokio::sync::Mutex;

/// Linking attempt whose completion was deferred past the
/// current control-flow turn.
///
/// At most one pending link exists per backend; saving a new
/// record for a backend supersedes the previous one.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PendingLink {
    /// Backend the linking attempt belongs to.
    pub backend: BackendType,
    /// Correlation token for the attempt.
    pub token: RequestToken,
    /// When the attempt was started.
    pub created: OffsetDateTime,
}

impl PendingLink {
    /// Create a pending link record.
    pub fn new(backend: BackendType, token: RequestToken) -> Self {
        Self {
            backend,
            token,
            created: OffsetDateTime::now_utc(),
        }
    }
}

/// Durable records for linking attempts that must survive the
/// orchestrating context being destroyed.
///
/// Resuming is a deliberate load-and-clear operation via
/// [LinkStateStorage::take_pending] so a pending record is
/// consumed exactly once.
#[async_trait]
pub trait LinkStateStorage {
    /// Error type.
    type Error: std::error::Error + std::fmt::Debug + Send + Sync + 'static;

    /// Load the pending link for a backend.
    async fn load_pending(
        &self,
        backend: BackendType,
    ) -> std::result::Result<Option<PendingLink>, Self::Error>;

    /// Save a pending link, replacing any existing record
    /// for the backend.
    async fn save_pending(
        &self,
        pending: PendingLink,
    ) -> std::result::Result<(), Self::Error>;

    /// Load and clear the pending link for a backend.
    async fn take_pending(
        &self,
        backend: BackendType,
    ) -> std::result::Result<Option<PendingLink>, Self::Error>;

    /// Remove the pending link for a backend.
    async fn clear_pending(
        &self,
        backend: BackendType,
    ) -> std::result::Result<(), Self::Error>;
}

/// In-memory link state storage.
#[derive(Default)]
pub struct MemoryLinkState {
    pending: Mutex<HashMap<BackendType, PendingLink>>,
}

impl MemoryLinkState {
    /// Create empty in-memory link state.
    pub fn new() -> Self {
        Default::default()
    }
}

#[async_trait]
impl LinkStateStorage for MemoryLinkState {
    type Error = crate::Error;

    async fn load_pending(
        &self,
        backend: BackendType,
    ) -> crate::Result<Option<PendingLink>> {
        let pending = self.pending.lock().await;
        Ok(pending.get(&backend).cloned())
    }

    async fn save_pending(&self, pending: PendingLink) -> crate::Result<()> {
        let mut records = self.pending.lock().await;
        records.insert(pending.backend, pending);
        Ok(())
    }

    async fn take_pending(
        &self,
        backend: BackendType,
    ) -> crate::Result<Option<PendingLink>> {
        let mut pending = self.pending.lock().await;
        Ok(pending.remove(&backend))
    }

    async fn clear_pending(&self, backend: BackendType) -> crate::Result<()> {
        let mut pending = self.pending.lock().await;
        pending.remove(&backend);
        Ok(())
    }
}

/// Link state persisted as a JSON document on disc.
///
/// A missing file is treated as empty state.
pub struct FileLinkState {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileLinkState {
    /// Create link state backed by a file.
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_owned(),
            lock: Mutex::new(()),
        }
    }

    async fn read_records(
        &self,
    ) -> crate::Result<HashMap<BackendType, PendingLink>> {
        let content = match tokio::fs::read(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Ok(Default::default())
            }
            Err(e) => return Err(e.into()),
        };
        Ok(serde_json::from_slice(&content)?)
    }

    async fn write_records(
        &self,
        records: &HashMap<BackendType, PendingLink>,
    ) -> crate::Result<()> {
        let buf = serde_json::to_vec_pretty(records)?;
        tokio::fs::write(&self.path, buf).await?;
        Ok(())
    }
}

#[async_trait]
impl LinkStateStorage for FileLinkState {
    type Error = crate::Error;

    async fn load_pending(
        &self,
        backend: BackendType,
    ) -> crate::Result<Option<PendingLink>> {
        let _guard = self.lock.lock().await;
        let records = self.read_records().await?;
        Ok(records.get(&backend).cloned())
    }

    async fn save_pending(&self, pending: PendingLink) -> crate::Result<()> {
        let _guard = self.lock.lock().await;
        let mut records = self.read_records().await?;
        tracing::debug!(
            backend = %pending.backend,
            token = %pending.token,
            "link_state::save_pending",
        );
        records.insert(pending.backend, pending);
        self.write_records(&records).await
    }

    async fn take_pending(
        &self,
        backend: BackendType,
    ) -> crate::Result<Option<PendingLink>> {
        let _guard = self.lock.lock().await;
        let mut records = self.read_records().await?;
        let pending = records.remove(&backend);
        if pending.is_some() {
            self.write_records(&records).await?;
        }
        Ok(pending)
    }

    async fn clear_pending(&self, backend: BackendType) -> crate::Result<()> {
        let _guard = self.lock.lock().await;
        let mut records = self.read_records().await?;
        if records.remove(&backend).is_some() {
            self.write_records(&records).await?;
        }
        Ok(())
    }
}
