//! Observer boundary and status event marshalling.
//!
//! Background execution contexts report sync status and task
//! lifecycle events through a [StatusHub]; a single-consumer
//! queue serializes delivery to whichever observer is currently
//! attached. The latest status is cached so an observer that
//! attaches later is immediately replayed the last report.
#![deny(missing_docs)]
#![forbid(unsafe_code)]
#![cfg_attr(all(doc, CHANNEL_NIGHTLY), feature(doc_auto_cfg))]

mod error;
mod hub;
mod observer;

pub use error::Error;
pub use hub::StatusHub;
pub use observer::{SyncObserver, TaskProgress};

/// Result type for the library.
pub(crate) type Result<T> = std::result::Result<T, Error>;
