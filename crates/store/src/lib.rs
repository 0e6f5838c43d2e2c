//! Storage boundaries for the cloudsafe sync orchestration workspace.
//!
//! The account store is consumed as a CRUD-capable table of
//! [AccountRecord](cloudsafe_core::AccountRecord) snapshots; the
//! link-state store holds the small durable records that allow an
//! interrupted account linking flow to survive the orchestrating
//! context being torn down and later reconstructed.
#![deny(missing_docs)]
#![forbid(unsafe_code)]
#![cfg_attr(all(doc, CHANNEL_NIGHTLY), feature(doc_auto_cfg))]

mod account_storage;
mod error;
mod link_state;

pub use account_storage::{
    AccountStorage, AccountStoreHandle, MemoryAccountStore,
};
pub use error::Error;
pub use link_state::{
    FileLinkState, LinkStateStorage, MemoryLinkState, PendingLink,
};

/// Result type for the library.
pub(crate) type Result<T> = std::result::Result<T, Error>;
