use async_trait::async_trait;
use cloudsafe_core::AccountId;
use cloudsafe_store::AccountStoreHandle;
use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

/// Cooperative cancellation flag shared between a task and
/// its tracker.
///
/// A task finishes as cancelled only when cancellation was
/// observed before its mutation committed; a task that already
/// passed the commit gate finishes normally even if cancelled
/// afterwards.
#[derive(Debug, Default, Clone)]
pub struct CancelFlag {
    cancelled: Arc<AtomicBool>,
    committed: Arc<AtomicBool>,
}

impl CancelFlag {
    /// Request cancellation.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    /// Whether cancellation was requested.
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }

    /// Final gate before a mutation commits.
    ///
    /// Returns `false` when cancellation was observed and the
    /// mutation must not commit; otherwise marks the task as
    /// committed.
    pub fn try_commit(&self) -> bool {
        if self.is_cancelled() {
            return false;
        }
        self.committed.store(true, Ordering::SeqCst);
        true
    }

    /// Whether the mutation passed the commit gate.
    pub fn committed(&self) -> bool {
        self.committed.load(Ordering::SeqCst)
    }
}

/// Single read-modify-write mutation against the account store.
///
/// Implementations must check the cancellation flag again
/// between reading and committing; a mutation that observes
/// cancellation before the write must not commit.
#[async_trait]
pub trait AccountMutation<E>: Send + Sync
where
    E: std::error::Error + std::fmt::Debug + Send + Sync + 'static,
{
    /// Run the mutation.
    async fn run(
        &self,
        store: &AccountStoreHandle<E>,
        cancel: &CancelFlag,
    ) -> std::result::Result<(), E>;
}

/// Unit of asynchronous work that mutates the account store.
///
/// Tasks are started through a
/// [TaskTracker](crate::TaskTracker) which supervises their
/// lifetime and reports start and finish notifications.
pub struct AccountTask<E>
where
    E: std::error::Error + std::fmt::Debug + Send + Sync + 'static,
{
    pub(crate) target: Option<AccountId>,
    pub(crate) description: String,
    pub(crate) cancel: CancelFlag,
    pub(crate) mutation: Box<dyn AccountMutation<E>>,
}

impl<E> AccountTask<E>
where
    E: std::error::Error + std::fmt::Debug + Send + Sync + 'static,
{
    /// Create a new account task.
    ///
    /// A task without a target account creates a new record
    /// when it runs.
    pub fn new(
        target: Option<AccountId>,
        description: impl Into<String>,
        mutation: Box<dyn AccountMutation<E>>,
    ) -> Self {
        Self {
            target,
            description: description.into(),
            cancel: Default::default(),
            mutation,
        }
    }

    /// Target account of the task.
    pub fn target(&self) -> Option<&AccountId> {
        self.target.as_ref()
    }

    /// Human-readable description for progress reporting.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Cancellation flag for the task.
    pub fn cancel_flag(&self) -> CancelFlag {
        self.cancel.clone()
    }
}
