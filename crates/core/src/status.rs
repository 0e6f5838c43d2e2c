use serde::{Deserialize, Serialize};

/// Cumulative last-known state of background synchronization.
///
/// A single slot is overwritten by each new report; statuses
/// are never queued.
#[derive(
    Default,
    Debug,
    Clone,
    Copy,
    Eq,
    PartialEq,
    Serialize,
    Deserialize,
)]
#[serde(rename_all = "camelCase")]
pub enum SyncStatus {
    /// Synchronization is healthy.
    #[default]
    Ok,
    /// A backend requires the account to be re-authorized.
    AuthRequired,
    /// An authorization flow is in progress.
    PendingAuth,
}
