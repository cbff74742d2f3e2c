use async_trait::async_trait;
use parking_lot::RwLock;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::info;

use appguide_core::error::Result;
use appguide_core::traits::{ModuleFetcher, ModuleSource};
use appguide_core::types::Module;

/// Module list shared between the aggregator and whoever owns the modules view.
///
/// The first `ensure_loaded` fetches; callers arriving while that fetch is in
/// flight wait on it instead of issuing their own. A failed fetch leaves the
/// store unloaded so the next call retries.
pub struct ModuleStore<F> {
    fetcher: F,
    modules: RwLock<Vec<Arc<Module>>>,
    loaded: AtomicBool,
    load_lock: Mutex<()>,
}

impl<F: ModuleFetcher> ModuleStore<F> {
    pub fn new(fetcher: F) -> Self {
        Self { fetcher, modules: RwLock::new(Vec::new()), loaded: AtomicBool::new(false), load_lock: Mutex::new(()) }
    }

    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    /// Swap in a new module set. Readers see it on their next `snapshot`.
    pub fn replace(&self, modules: Vec<Module>) {
        *self.modules.write() = modules.into_iter().map(Arc::new).collect();
        self.loaded.store(true, Ordering::Release);
    }

    /// Fetch unconditionally and replace the current set.
    pub async fn reload(&self) -> Result<usize> {
        let _guard = self.load_lock.lock().await;
        let fetched = self.fetcher.fetch_modules().await?;
        let count = fetched.len();
        self.replace(fetched);
        info!(count, "modules reloaded");
        Ok(count)
    }
}

#[async_trait]
impl<F: ModuleFetcher> ModuleSource for ModuleStore<F> {
    fn snapshot(&self) -> Vec<Arc<Module>> {
        self.modules.read().clone()
    }

    fn is_loaded(&self) -> bool {
        self.loaded.load(Ordering::Acquire)
    }

    async fn ensure_loaded(&self) -> Result<()> {
        if self.is_loaded() {
            return Ok(());
        }
        let _guard = self.load_lock.lock().await;
        if self.is_loaded() {
            return Ok(());
        }
        let fetched = self.fetcher.fetch_modules().await?;
        let count = fetched.len();
        self.replace(fetched);
        info!(count, "modules loaded");
        Ok(())
    }
}
