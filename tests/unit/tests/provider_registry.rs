use anyhow::Result;
use cloudsafe_core::BackendType;
use cloudsafe_events::StatusHub;
use cloudsafe_provider::{
    BackendClients, Error, Provider, ProviderFactory, ProviderRegistry,
    ProviderSettings, StandardProviderFactory,
};
use cloudsafe_test_utils::{mock_clients, MockClients};
use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc,
};
use url::Url;

type StoreError = cloudsafe_store::Error;

/// Factory counting how many provider instances it constructs.
struct CountingFactory {
    inner: StandardProviderFactory,
    created: Arc<AtomicUsize>,
}

impl ProviderFactory<StoreError> for CountingFactory {
    fn create(&self, backend: BackendType) -> Arc<dyn Provider<StoreError>> {
        self.created.fetch_add(1, Ordering::SeqCst);
        self.inner.create(backend)
    }
}

fn counting_registry(
    clients: &MockClients,
) -> (Arc<ProviderRegistry<StoreError>>, Arc<AtomicUsize>) {
    let created = Arc::new(AtomicUsize::new(0));
    let factory = CountingFactory {
        inner: StandardProviderFactory::new(
            BackendClients {
                drive: clients.drive.clone(),
                dropbox: clients.dropbox.clone(),
                boxsync: clients.boxsync.clone(),
                onedrive: clients.onedrive.clone(),
                owncloud: clients.owncloud.clone(),
            },
            StatusHub::new(),
        ),
        created: Arc::clone(&created),
    };
    (
        Arc::new(ProviderRegistry::new(Box::new(factory))),
        created,
    )
}

#[tokio::test]
async fn concurrent_access_constructs_one_instance() -> Result<()> {
    let clients = mock_clients();
    let (registry, created) = counting_registry(&clients);

    let mut handles = Vec::new();
    for _ in 0..8 {
        let registry = Arc::clone(&registry);
        handles.push(tokio::spawn(async move {
            registry.get(BackendType::Dropbox)
        }));
    }
    let mut providers = Vec::new();
    for handle in handles {
        providers.push(handle.await??);
    }

    assert_eq!(1, created.load(Ordering::SeqCst));
    for provider in &providers[1..] {
        assert!(Arc::ptr_eq(&providers[0], provider));
    }

    Ok(())
}

#[tokio::test]
async fn init_all_is_one_shot() -> Result<()> {
    let clients = mock_clients();
    let (registry, created) = counting_registry(&clients);

    registry.init_all().await?;
    assert_eq!(5, created.load(Ordering::SeqCst));

    registry.init_all().await?;
    assert_eq!(5, created.load(Ordering::SeqCst));

    Ok(())
}

#[tokio::test]
async fn access_after_fini_is_an_error() -> Result<()> {
    let clients = mock_clients();
    let (registry, _) = counting_registry(&clients);

    registry.init_all().await?;
    registry.fini_all().await;

    let Err(error) = registry.get(BackendType::Drive) else {
        panic!("registry must be closed");
    };
    assert!(matches!(error, Error::RegistryClosed));

    Ok(())
}

#[tokio::test]
async fn owncloud_server_endpoint_is_configurable() -> Result<()> {
    let clients = mock_clients();
    let (registry, _) = counting_registry(&clients);

    let owncloud = registry.get(BackendType::Owncloud)?;
    assert!(owncloud.url().is_none());

    let server_url: Url = "https://cloud.example.com/remote.php".parse()?;
    owncloud
        .set_settings(ProviderSettings {
            server_url: server_url.clone(),
        })
        .await?;
    assert_eq!(Some(server_url), owncloud.url());

    // The other backends have fixed endpoints
    let drive = registry.get(BackendType::Drive)?;
    let error = drive
        .set_settings(ProviderSettings {
            server_url: "https://example.com/".parse()?,
        })
        .await
        .expect_err("drive has no settings");
    assert!(matches!(
        error,
        Error::SettingsUnsupported(BackendType::Drive)
    ));

    Ok(())
}
