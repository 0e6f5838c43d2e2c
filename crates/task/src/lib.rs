//! Trackable, cancellable account mutation tasks.
//!
//! An [AccountTask] carries exactly one mutation to run against
//! the account store off the interactive execution context. The
//! [TaskTracker] owns the set of in-flight tasks for an observing
//! context and cancels all of them on teardown so a mutation does
//! not commit against a store reference that is no longer valid.
#![deny(missing_docs)]
#![forbid(unsafe_code)]
#![cfg_attr(all(doc, CHANNEL_NIGHTLY), feature(doc_auto_cfg))]

mod account_task;
mod builtin;
mod error;
mod tracker;

pub use account_task::{AccountMutation, AccountTask, CancelFlag};
pub use builtin::{
    NewAccountTask, RemoveAccountTask, UpdateSyncFrequencyTask,
};
pub use error::Error;
pub use tracker::TaskTracker;

/// Result type for the library.
pub(crate) type Result<T> = std::result::Result<T, Error>;
