use crate::{BackendType, Error};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr, time::Duration};
use url::Url;
use uuid::Uuid;

/// Identifier for a linked account.
#[derive(
    Debug, Clone, Copy, Hash, Eq, PartialEq, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct AccountId(Uuid);

impl AccountId {
    /// Create a random account identifier.
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for AccountId {
    type Err = Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(Self(s.parse()?))
    }
}

impl From<Uuid> for AccountId {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

/// Interval setting for scheduled synchronization of an account.
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
pub enum SyncFrequency {
    /// Only synchronize when requested by the user.
    Manual,
    /// Synchronize every fifteen minutes.
    Every15Minutes,
    /// Synchronize every hour.
    Hourly,
    /// Synchronize once a day.
    #[default]
    Daily,
    /// Synchronize once a week.
    Weekly,
}

impl SyncFrequency {
    /// Interval between scheduled sync passes.
    ///
    /// Manual synchronization has no interval.
    pub fn interval(&self) -> Option<Duration> {
        const HOUR: u64 = 60 * 60;
        match self {
            Self::Manual => None,
            Self::Every15Minutes => Some(Duration::from_secs(15 * 60)),
            Self::Hourly => Some(Duration::from_secs(HOUR)),
            Self::Daily => Some(Duration::from_secs(24 * HOUR)),
            Self::Weekly => Some(Duration::from_secs(7 * 24 * HOUR)),
        }
    }
}

/// Linked account for a backend.
///
/// Records are owned by the account store; the orchestration
/// core only ever sees read-only snapshots.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountRecord {
    /// Account identifier.
    pub account_id: AccountId,
    /// Backend the account belongs to.
    pub backend: BackendType,
    /// Account name for display.
    pub display_name: String,
    /// Whether the backend has authorized the account.
    pub authorized: bool,
    /// Scheduled sync interval setting.
    pub sync_frequency: SyncFrequency,
    /// Server endpoint for self-hosted backends.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub server_url: Option<Url>,
}

impl AccountRecord {
    /// Create a new account record for a backend.
    pub fn new(backend: BackendType, display_name: String) -> Self {
        Self {
            account_id: AccountId::random(),
            backend,
            display_name,
            authorized: false,
            sync_frequency: Default::default(),
            server_url: None,
        }
    }
}
