use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Correlation token for an account linking attempt.
///
/// Tokens tie an out-of-band linking result back to the
/// attempt that produced it; resolving the same token twice
/// must be a no-op.
#[derive(
    Debug, Clone, Copy, Hash, Eq, PartialEq, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct RequestToken(Uuid);

impl RequestToken {
    /// Create a random request token.
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for RequestToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Result code of an account linking flow.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum LinkOutcome {
    /// The backend authorized the account.
    Success,
    /// The user cancelled the flow.
    Cancelled,
    /// The backend rejected the flow.
    Failure,
}

/// Payload of a successful authorization handed back
/// by a backend client.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct LinkPayload {
    /// Display name of the authorized account.
    pub account_name: String,
    /// Opaque token material cached by the backend client.
    pub token: String,
}

impl LinkPayload {
    /// Create a new link payload.
    pub fn new(account_name: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            account_name: account_name.into(),
            token: token.into(),
        }
    }
}
