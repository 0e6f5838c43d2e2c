//! Shared helpers for the workspace tests.


pub use mock_client::{MockAuth, MockClient};
pub use observer::{ObservedEvent, RecordingObserver};

use cloudsafe_events::StatusHub;
use cloudsafe_provider::{BackendClients, StandardProviderFactory};
use cloudsafe_sdk::SyncApp;
use cloudsafe_store::{
    LinkStateStorage, MemoryAccountStore, MemoryLinkState,
};
use std::sync::Arc;

/// Application wired with memory stores and mock clients.
pub type TestApp = SyncApp<MemoryLinkState, cloudsafe_store::Error>;

/// Mock clients for every backend.
pub struct MockClients {
    /// Client for the drive backend.
    pub drive: Arc<MockClient>,
    /// Client for the dropbox backend.
    pub dropbox: Arc<MockClient>,
    /// Client for the box backend.
    pub boxsync: Arc<MockClient>,
    /// Client for the onedrive backend.
    pub onedrive: Arc<MockClient>,
    /// Client for the owncloud backend.
    pub owncloud: Arc<MockClient>,
}

/// Create the default set of mock clients.
///
/// Drive, box and owncloud complete linking in-turn; dropbox
/// and onedrive hand off to an external flow.
pub fn mock_clients() -> MockClients {
    MockClients {
        drive: MockClient::completed("drive user"),
        dropbox: MockClient::external("dropbox user"),
        boxsync: MockClient::completed("box user"),
        onedrive: MockClient::external("onedrive user"),
        owncloud: MockClient::completed("owncloud user"),
    }
}

/// Create an application from a set of mock clients.
pub fn new_app(clients: &MockClients) -> TestApp {
    new_app_with_link_state(clients, MemoryLinkState::new())
}

/// Create an application over a caller-supplied link state
/// store, for tests that restart the application.
pub fn new_app_with_link_state<S>(
    clients: &MockClients,
    link_state: S,
) -> SyncApp<S, cloudsafe_store::Error>
where
    S: LinkStateStorage + Send + Sync + 'static,
{
    let hub = StatusHub::new();
    let factory = StandardProviderFactory::new(
        BackendClients {
            drive: clients.drive.clone(),
            dropbox: clients.dropbox.clone(),
            boxsync: clients.boxsync.clone(),
            onedrive: clients.onedrive.clone(),
            owncloud: clients.owncloud.clone(),
        },
        hub.clone(),
    );
    SyncApp::new(
        Arc::new(MemoryAccountStore::new()),
        link_state,
        Box::new(factory),
        hub,
    )
}
