use crate::{Error, LinkStart, ProviderRegistry, Result};
use cloudsafe_core::{
    AccountId, AccountRecord, BackendType, LinkOutcome, LinkPayload,
    RequestToken,
};
use cloudsafe_store::{LinkStateStorage, PendingLink};
use cloudsafe_task::AccountTask;
use enum_iterator::all;
use std::sync::Arc;

/// Result of driving an account linking attempt.
pub enum LinkFlow<E>
where
    E: std::error::Error + std::fmt::Debug + Send + Sync + 'static,
{
    /// The attempt resolved in-turn.
    ///
    /// On success carries the task that writes the account
    /// record; a rejected flow resolves with no task.
    Resolved(Option<AccountTask<E>>),
    /// The attempt handed off to an external flow and was
    /// recorded as pending; it resolves on the next resume.
    Pending(RequestToken),
}

/// Drives account linking attempts across interruption
/// boundaries.
///
/// An attempt either completes within the same control-flow
/// turn or leaves the orchestrating context; in the latter case
/// a durable pending record survives the context being torn
/// down and the attempt is resolved, exactly once, the next
/// time the context resumes.
pub struct LinkCoordinator<S, E>
where
    S: LinkStateStorage + Send + Sync + 'static,
    E: std::error::Error + std::fmt::Debug + Send + Sync + 'static,
{
    registry: Arc<ProviderRegistry<E>>,
    link_state: Arc<S>,
}

impl<S, E> LinkCoordinator<S, E>
where
    S: LinkStateStorage + Send + Sync + 'static,
    E: std::error::Error + std::fmt::Debug + Send + Sync + 'static,
{
    /// Create a link coordinator.
    pub fn new(
        registry: Arc<ProviderRegistry<E>>,
        link_state: Arc<S>,
    ) -> Self {
        Self {
            registry,
            link_state,
        }
    }

    /// Durable link state storage.
    pub fn link_state(&self) -> &Arc<S> {
        &self.link_state
    }

    /// Start a linking attempt for a backend.
    ///
    /// `existing` is the account currently linked for the
    /// backend, if any, so an in-turn completion relinks it
    /// instead of creating a second record. When starting
    /// fails the provider state is reset before the error is
    /// returned.
    pub async fn start_link(
        &self,
        backend: BackendType,
        existing: Option<AccountId>,
    ) -> Result<LinkFlow<E>> {
        let provider = self.registry.get(backend)?;
        let token = RequestToken::random();
        tracing::debug!(
            backend = %backend,
            token = %token,
            "link::start",
        );

        match provider.start_account_link(token).await {
            Ok(LinkStart::Completed {
                token,
                outcome,
                payload,
            }) => {
                let task = provider
                    .finish_account_link(token, outcome, payload, existing)
                    .await?;
                Ok(LinkFlow::Resolved(task))
            }
            Ok(LinkStart::External { token }) => {
                // Supersedes any pending attempt for this backend
                self.link_state
                    .save_pending(PendingLink::new(backend, token))
                    .await
                    .map_err(Error::link_state)?;
                Ok(LinkFlow::Pending(token))
            }
            Err(error) => {
                provider.unlink_account().await;
                Err(error)
            }
        }
    }

    /// Resolve pending linking attempts on context resume.
    ///
    /// Each pending record is consumed exactly once and the
    /// attempt is finished with a synthesized success outcome;
    /// an abandoned external flow only becomes visible through
    /// the provider's subsequent authorization check.
    pub async fn resume(
        &self,
        accounts: &[AccountRecord],
    ) -> Result<Vec<AccountTask<E>>> {
        let mut tasks = Vec::new();
        for backend in all::<BackendType>() {
            let pending = self
                .link_state
                .take_pending(backend)
                .await
                .map_err(Error::link_state)?;
            let Some(pending) = pending else {
                continue;
            };
            tracing::debug!(
                backend = %backend,
                token = %pending.token,
                "link::resume",
            );

            let provider = self.registry.get(backend)?;
            let existing = accounts
                .iter()
                .find(|record| record.backend == backend)
                .map(|record| record.account_id);
            if let Some(task) = provider
                .resume_account_link(pending.token, existing)
                .await?
            {
                tasks.push(task);
            }
        }
        Ok(tasks)
    }

    /// Resolve a linking result delivered by a direct callback.
    pub async fn handle_link_result(
        &self,
        backend: BackendType,
        token: RequestToken,
        outcome: LinkOutcome,
        payload: Option<LinkPayload>,
        existing: Option<AccountId>,
    ) -> Result<Option<AccountTask<E>>> {
        if let Some(pending) = self
            .link_state
            .load_pending(backend)
            .await
            .map_err(Error::link_state)?
        {
            if pending.token == token {
                self.link_state
                    .clear_pending(backend)
                    .await
                    .map_err(Error::link_state)?;
            }
        }
        let provider = self.registry.get(backend)?;
        provider
            .finish_account_link(token, outcome, payload, existing)
            .await
    }
}
