use crate::Error;
use enum_iterator::Sequence;
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// Supported cloud storage backends.
///
/// The set is fixed at compile time and is used as the key
/// for the provider registry and the account store.
#[derive(
    Debug,
    Clone,
    Copy,
    Hash,
    Eq,
    PartialEq,
    Ord,
    PartialOrd,
    Sequence,
    Serialize,
    Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum BackendType {
    /// Google Drive style backend.
    Drive,
    /// Dropbox style backend.
    Dropbox,
    /// Box style backend.
    Box,
    /// OneDrive style backend.
    Onedrive,
    /// Self-hosted WebDAV (ownCloud) style backend.
    Owncloud,
}

impl BackendType {
    /// Whether the backend is configured with a
    /// user-supplied server URL.
    pub fn has_server_url(&self) -> bool {
        matches!(self, Self::Owncloud)
    }
}

impl fmt::Display for BackendType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Drive => write!(f, "drive"),
            Self::Dropbox => write!(f, "dropbox"),
            Self::Box => write!(f, "box"),
            Self::Onedrive => write!(f, "onedrive"),
            Self::Owncloud => write!(f, "owncloud"),
        }
    }
}

impl FromStr for BackendType {
    type Err = Error;

    fn from_str(s: &str) -> crate::Result<Self> {
        match s {
            "drive" => Ok(Self::Drive),
            "dropbox" => Ok(Self::Dropbox),
            "box" => Ok(Self::Box),
            "onedrive" => Ok(Self::Onedrive),
            "owncloud" => Ok(Self::Owncloud),
            _ => Err(Error::UnknownBackendType(s.to_owned())),
        }
    }
}
