use async_trait::async_trait;
use std::sync::Arc;

use crate::error::Result;
use crate::types::{Category, ContentId, ContentSearchResponse, Module};

/// Externally owned module set that the aggregator reads at evaluation time.
#[async_trait]
pub trait ModuleSource: Send + Sync {
    /// The modules as they are right now, not as they were when a query was scheduled.
    fn snapshot(&self) -> Vec<Arc<Module>>;

    fn is_loaded(&self) -> bool;

    /// Idempotent; concurrent callers must be safe.
    async fn ensure_loaded(&self) -> Result<()>;
}

#[async_trait]
pub trait ModuleFetcher: Send + Sync {
    async fn fetch_modules(&self) -> Result<Vec<Module>>;
}

#[async_trait]
pub trait ContentSearcher: Send + Sync {
    async fn search_contents(&self, query: &str) -> Result<ContentSearchResponse>;
}

/// Callbacks the aggregator invokes on its owner. Every method is optional.
pub trait SelectionHandler: Send + Sync {
    fn on_select_category(&self, _category: &Category, _module: &Arc<Module>) {}

    fn on_select_content(&self, _category: Option<&Category>, _module: Option<&Arc<Module>>, _content_id: ContentId) {}

    /// Fired on every raw keystroke and once more with `""` when the query is cleared.
    fn on_query_change(&self, _text: &str) {}
}

#[async_trait]
impl<T: ModuleSource + ?Sized> ModuleSource for Arc<T> {
    fn snapshot(&self) -> Vec<Arc<Module>> { (**self).snapshot() }
    fn is_loaded(&self) -> bool { (**self).is_loaded() }
    async fn ensure_loaded(&self) -> Result<()> { (**self).ensure_loaded().await }
}

#[async_trait]
impl<T: ContentSearcher + ?Sized> ContentSearcher for Arc<T> {
    async fn search_contents(&self, query: &str) -> Result<ContentSearchResponse> { (**self).search_contents(query).await }
}
