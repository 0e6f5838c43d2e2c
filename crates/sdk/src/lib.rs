//! High level software development kit for orchestrating
//! synchronization of a local password safe against multiple
//! cloud storage backends.
//!
//! The [SyncApp] process root wires the provider registry,
//! status hub, task tracker and link coordinator together and
//! exposes the process lifecycle hooks.
#![deny(missing_docs)]
#![forbid(unsafe_code)]
#![cfg_attr(all(doc, CHANNEL_NIGHTLY), feature(doc_auto_cfg))]

mod app;
mod error;

pub use app::{LinkActivity, SyncApp};
pub use error::Error;

pub use cloudsafe_core as core;
pub use cloudsafe_events as events;
pub use cloudsafe_provider as provider;
pub use cloudsafe_store as store;
pub use cloudsafe_task as task;

/// Result type for the library.
pub(crate) type Result<T> = std::result::Result<T, Error>;
