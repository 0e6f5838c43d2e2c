use crate::{AccountTask, CancelFlag, Result};
use cloudsafe_events::{StatusHub, TaskProgress};
use cloudsafe_store::AccountStoreHandle;
use std::{
    collections::HashMap,
    sync::{
        atomic::{AtomicU64, Ordering},
        Arc,
    },
};
use tokio::sync::{Notify, RwLock};

/// Tracked in-flight task state.
struct InflightTask {
    cancel: CancelFlag,
    progress: TaskProgress,
}

/// Supervises the in-flight account tasks of an observing context.
///
/// Execution is fire-and-forget: [TaskTracker::start] returns
/// immediately and completion is observed through the start and
/// finish notifications sent to the status hub. Tearing the
/// tracker down cancels every tracked task.
pub struct TaskTracker<E>
where
    E: std::error::Error + std::fmt::Debug + Send + Sync + 'static,
{
    store: AccountStoreHandle<E>,
    hub: StatusHub,
    tasks: Arc<RwLock<HashMap<u64, InflightTask>>>,
    ids: AtomicU64,
    idle: Arc<Notify>,
}

impl<E> TaskTracker<E>
where
    E: std::error::Error + std::fmt::Debug + Send + Sync + 'static,
{
    /// Create a task tracker for a store.
    pub fn new(store: AccountStoreHandle<E>, hub: StatusHub) -> Self {
        Self {
            store,
            hub,
            tasks: Arc::new(RwLock::new(Default::default())),
            ids: AtomicU64::new(1),
            idle: Arc::new(Notify::new()),
        }
    }

    /// Start a task on a background execution context.
    ///
    /// Registers the task, notifies the observer it started and
    /// returns the task identifier without waiting for the
    /// mutation to complete.
    pub async fn start(&self, task: AccountTask<E>) -> Result<u64> {
        let task_id = self.ids.fetch_add(1, Ordering::SeqCst);
        let progress = TaskProgress {
            task_id,
            target: task.target().copied(),
            description: task.description().to_owned(),
            cancelled: false,
        };

        {
            let mut tasks = self.tasks.write().await;
            tasks.insert(
                task_id,
                InflightTask {
                    cancel: task.cancel_flag(),
                    progress: progress.clone(),
                },
            );
        }
        if let Err(error) = self.hub.task_started(progress.clone()) {
            let mut tasks = self.tasks.write().await;
            tasks.remove(&task_id);
            if tasks.is_empty() {
                self.idle.notify_waiters();
            }
            return Err(error.into());
        }

        let store = Arc::clone(&self.store);
        let hub = self.hub.clone();
        let tasks = Arc::clone(&self.tasks);
        let idle = Arc::clone(&self.idle);
        tokio::spawn(async move {
            let cancel = task.cancel_flag();
            if !cancel.is_cancelled() {
                if let Err(error) =
                    task.mutation.run(&store, &cancel).await
                {
                    tracing::warn!(
                        task_id = %task_id,
                        error = ?error,
                        "task::failed",
                    );
                }
            }

            let mut finished = progress;
            finished.cancelled =
                cancel.is_cancelled() && !cancel.committed();

            let empty = {
                let mut tasks = tasks.write().await;
                tasks.remove(&task_id);
                tasks.is_empty()
            };
            if let Err(error) = hub.task_finished(finished) {
                tracing::warn!(
                    task_id = %task_id,
                    error = ?error,
                    "task::notify_finished",
                );
            }
            if empty {
                idle.notify_waiters();
            }
        });

        Ok(task_id)
    }

    /// Snapshot of the in-flight task descriptions.
    pub async fn all(&self) -> Vec<TaskProgress> {
        let tasks = self.tasks.read().await;
        tasks.values().map(|task| task.progress.clone()).collect()
    }

    /// Cancel every tracked task and clear the set.
    ///
    /// Cancellation is cooperative; a task that has not yet
    /// committed its mutation will observe the flag and skip
    /// the write. Every task still signals finished.
    pub async fn teardown(&self) {
        let mut tasks = self.tasks.write().await;
        for (task_id, task) in tasks.drain() {
            tracing::debug!(task_id = %task_id, "task::cancel");
            task.cancel.cancel();
        }
    }

    /// Wait until no tasks are in flight.
    pub async fn wait_idle(&self) {
        loop {
            let notified = self.idle.notified();
            tokio::pin!(notified);
            notified.as_mut().enable();
            {
                let tasks = self.tasks.read().await;
                if tasks.is_empty() {
                    return;
                }
            }
            notified.await;
        }
    }
}
