//! Core types for the cloudsafe sync orchestration workspace.
#![deny(missing_docs)]
#![forbid(unsafe_code)]
#![cfg_attr(all(doc, CHANNEL_NIGHTLY), feature(doc_auto_cfg))]

mod account;
mod backend;
mod error;
mod link;
mod status;

pub use account::{AccountId, AccountRecord, SyncFrequency};
pub use backend::BackendType;
pub use error::Error;
pub use link::{LinkOutcome, LinkPayload, RequestToken};
pub use status::SyncStatus;

/// Result type for the library.
pub(crate) type Result<T> = std::result::Result<T, Error>;
