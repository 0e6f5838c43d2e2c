//! Backend providers, provider registry and the account-linking
//! state machine.
//!
//! Each supported cloud storage backend is integrated as a
//! [Provider] adapting a backend-specific [BackendClient] into a
//! uniform contract: link an account, trigger synchronization,
//! report status and unlink. The [ProviderRegistry] owns one
//! provider instance per backend for the lifetime of the process
//! and the [LinkCoordinator] drives linking attempts, including
//! attempts that are suspended by the hosting environment and
//! resumed arbitrarily later.
#![deny(missing_docs)]
#![forbid(unsafe_code)]
#![cfg_attr(all(doc, CHANNEL_NIGHTLY), feature(doc_auto_cfg))]

mod backends;
mod client;
mod coordinator;
mod error;
mod provider;
mod registry;

pub use backends::{
    BackendClients, BoxProvider, DriveProvider, DropboxProvider,
    OnedriveProvider, OwncloudProvider, StandardProviderFactory,
};
pub use client::{AuthFlow, BackendClient, ClientHandle};
pub use coordinator::{LinkCoordinator, LinkFlow};
pub use error::Error;
pub use provider::{LinkStart, Provider, ProviderSettings};
pub use registry::{ProviderFactory, ProviderRegistry};

/// Result type for the library.
pub(crate) type Result<T> = std::result::Result<T, Error>;
