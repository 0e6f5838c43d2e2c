use crate::{Error, Provider, Result};
use cloudsafe_core::BackendType;
use enum_iterator::all;
use parking_lot::Mutex;
use std::{
    collections::HashMap,
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    },
};

/// Constructs the provider instance for a backend.
pub trait ProviderFactory<E>: Send + Sync
where
    E: std::error::Error + std::fmt::Debug + Send + Sync + 'static,
{
    /// Create the provider for a backend.
    fn create(&self, backend: BackendType) -> Arc<dyn Provider<E>>;
}

/// Registry owning one provider instance per backend.
///
/// Providers cache backend SDK state so exactly one instance is
/// ever constructed per type, even under concurrent first
/// access. The registry is constructed by the process root and
/// passed by reference to all consumers; init and fini happen
/// once at process start and end.
pub struct ProviderRegistry<E>
where
    E: std::error::Error + std::fmt::Debug + Send + Sync + 'static,
{
    factory: Box<dyn ProviderFactory<E>>,
    providers: Mutex<HashMap<BackendType, Arc<dyn Provider<E>>>>,
    initialized: AtomicBool,
    closed: AtomicBool,
}

impl<E> ProviderRegistry<E>
where
    E: std::error::Error + std::fmt::Debug + Send + Sync + 'static,
{
    /// Create a provider registry.
    pub fn new(factory: Box<dyn ProviderFactory<E>>) -> Self {
        Self {
            factory,
            providers: Mutex::new(Default::default()),
            initialized: AtomicBool::new(false),
            closed: AtomicBool::new(false),
        }
    }

    /// Provider instance for a backend.
    ///
    /// Constructs the instance lazily on first access; after
    /// [ProviderRegistry::fini_all] access is an error.
    pub fn get(&self, backend: BackendType) -> Result<Arc<dyn Provider<E>>> {
        if self.closed.load(Ordering::SeqCst) {
            return Err(Error::RegistryClosed);
        }
        let mut providers = self.providers.lock();
        let provider = providers
            .entry(backend)
            .or_insert_with(|| {
                tracing::debug!(
                    backend = %backend,
                    "registry::create_provider",
                );
                self.factory.create(backend)
            })
            .clone();
        Ok(provider)
    }

    /// Initialize every provider.
    ///
    /// Guarded so a second call is a no-op.
    pub async fn init_all(&self) -> Result<()> {
        if self.initialized.swap(true, Ordering::SeqCst) {
            return Ok(());
        }
        for backend in all::<BackendType>() {
            self.get(backend)?.init().await?;
        }
        Ok(())
    }

    /// Tear down every constructed provider.
    ///
    /// No further access is permitted afterwards.
    pub async fn fini_all(&self) {
        if self.closed.swap(true, Ordering::SeqCst) {
            return;
        }
        let providers: Vec<_> = {
            let mut providers = self.providers.lock();
            providers.drain().collect()
        };
        for (backend, provider) in providers {
            tracing::debug!(backend = %backend, "registry::fini");
            provider.fini().await;
        }
    }
}
