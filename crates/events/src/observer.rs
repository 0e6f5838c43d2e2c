use cloudsafe_core::{AccountId, SyncStatus};

/// Progress information for an account mutation task.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct TaskProgress {
    /// Identifier assigned by the task tracker.
    pub task_id: u64,
    /// Target account, when the task mutates an existing record.
    pub target: Option<AccountId>,
    /// Human-readable description of the task.
    pub description: String,
    /// Whether the task was cancelled.
    pub cancelled: bool,
}

/// Consumer of status and task lifecycle notifications.
///
/// Observers are attached and detached as the interactive
/// context's lifecycle dictates; events that arrive while no
/// observer is attached only update the cached status.
pub trait SyncObserver: Send + Sync {
    /// Called when the sync status changes.
    fn status_changed(&self, status: SyncStatus);

    /// Called when an account task starts.
    fn task_started(&self, task: &TaskProgress);

    /// Called when an account task finishes.
    fn task_finished(&self, task: &TaskProgress);
}
