use crate::{Error, Result, SyncObserver, TaskProgress};
use cloudsafe_core::SyncStatus;
use parking_lot::RwLock;
use std::sync::Arc;
use tokio::sync::mpsc;

/// Commands processed by the hub consumer task.
enum HubCommand {
    Report(SyncStatus),
    TaskStarted(TaskProgress),
    TaskFinished(TaskProgress),
    SetObserver(Option<Arc<dyn SyncObserver>>),
}

/// Single-slot latest-status cache with a replaceable observer.
///
/// Events may be reported from any execution context; an
/// unbounded channel with a single consumer serializes delivery
/// so reports reach the observer in the order they were sent.
/// The cached status is updated before delivery which keeps it
/// correct even if an observer misbehaves.
#[derive(Clone)]
pub struct StatusHub {
    sender: mpsc::UnboundedSender<HubCommand>,
    latest: Arc<RwLock<SyncStatus>>,
}

impl StatusHub {
    /// Create a status hub.
    ///
    /// Spawns the consumer task on the current runtime.
    pub fn new() -> Self {
        let (sender, mut receiver) = mpsc::unbounded_channel();
        let latest = Arc::new(RwLock::new(SyncStatus::default()));

        let cache = Arc::clone(&latest);
        tokio::spawn(async move {
            let mut observer: Option<Arc<dyn SyncObserver>> = None;
            while let Some(command) = receiver.recv().await {
                match command {
                    HubCommand::Report(status) => {
                        *cache.write() = status;
                        if let Some(observer) = &observer {
                            observer.status_changed(status);
                        }
                    }
                    HubCommand::TaskStarted(task) => {
                        if let Some(observer) = &observer {
                            observer.task_started(&task);
                        }
                    }
                    HubCommand::TaskFinished(task) => {
                        if let Some(observer) = &observer {
                            observer.task_finished(&task);
                        }
                    }
                    HubCommand::SetObserver(slot) => {
                        observer = slot;
                        if let Some(observer) = &observer {
                            let status = *cache.read();
                            observer.status_changed(status);
                        }
                    }
                }
            }
            tracing::debug!("status_hub::closed");
        });

        Self { sender, latest }
    }

    /// Latest reported status.
    pub fn latest(&self) -> SyncStatus {
        *self.latest.read()
    }

    /// Report a new sync status.
    ///
    /// Callable from any execution context; the status is
    /// cached and delivered to the observer if one is attached.
    pub fn report(&self, status: SyncStatus) -> Result<()> {
        self.sender
            .send(HubCommand::Report(status))
            .map_err(|_| Error::HubClosed)
    }

    /// Replace the current observer.
    ///
    /// A newly attached observer is immediately replayed the
    /// cached status, before any subsequent report.
    pub fn set_observer(
        &self,
        observer: Option<Arc<dyn SyncObserver>>,
    ) -> Result<()> {
        self.sender
            .send(HubCommand::SetObserver(observer))
            .map_err(|_| Error::HubClosed)
    }

    /// Notify the observer that a task started.
    pub fn task_started(&self, task: TaskProgress) -> Result<()> {
        self.sender
            .send(HubCommand::TaskStarted(task))
            .map_err(|_| Error::HubClosed)
    }

    /// Notify the observer that a task finished.
    pub fn task_finished(&self, task: TaskProgress) -> Result<()> {
        self.sender
            .send(HubCommand::TaskFinished(task))
            .map_err(|_| Error::HubClosed)
    }
}

impl Default for StatusHub {
    fn default() -> Self {
        Self::new()
    }
}
