use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use appguide_core::config::SearchSettings;
use appguide_core::traits::{ContentSearcher, ModuleSource, SelectionHandler};
use appguide_core::types::{Category, CategoryMatch, ContentItem, ContentMatch, Module, SearchResult};
use appguide_text::local_matches;

use crate::merge::map_contents;
use crate::snapshot::SearchSnapshot;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AggregatorOptions {
    pub debounce: Duration,
    pub request_timeout: Duration,
}

impl Default for AggregatorOptions {
    fn default() -> Self {
        Self { debounce: Duration::from_millis(250), request_timeout: Duration::from_secs(10) }
    }
}

impl From<&SearchSettings> for AggregatorOptions {
    fn from(s: &SearchSettings) -> Self {
        Self { debounce: s.debounce(), request_timeout: s.request_timeout() }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DismissSignal {
    Escape,
    OutsideInteraction,
}

/// A handler that ignores every callback.
pub struct NoopHandler;

impl SelectionHandler for NoopHandler {}

#[derive(Default)]
struct State {
    query: String,
    categories: Vec<CategoryMatch>,
    contents: Vec<ContentMatch>,
    /// Bumped by every keystroke and every selection. Work started under an
    /// older generation may finish but never writes.
    generation: u64,
    pending: Option<JoinHandle<()>>,
    searching: bool,
    module_loads: usize,
    open: bool,
}

impl State {
    fn snapshot(&self) -> SearchSnapshot {
        SearchSnapshot {
            query: self.query.clone(),
            categories: self.categories.clone(),
            contents: self.contents.clone(),
            loading: self.searching || self.module_loads > 0,
            debouncing: self.pending.is_some(),
            open: self.open,
        }
    }

    /// Start a new generation: cancel the timer and forget in-flight work.
    fn invalidate(&mut self) -> u64 {
        self.generation += 1;
        if let Some(timer) = self.pending.take() {
            timer.abort();
        }
        self.searching = false;
        self.generation
    }
}

struct Shared<S, C> {
    modules: S,
    searcher: C,
    handler: Arc<dyn SelectionHandler>,
    options: AggregatorOptions,
    state: Mutex<State>,
    updates: watch::Sender<SearchSnapshot>,
}

impl<S, C> Shared<S, C> {
    fn with_state<R>(&self, f: impl FnOnce(&mut State) -> R) -> R {
        let mut st = self.state.lock();
        let out = f(&mut st);
        self.updates.send_replace(st.snapshot());
        out
    }

    /// Apply `f` only while `generation` is still the latest.
    fn update(&self, generation: u64, f: impl FnOnce(&mut State)) -> bool {
        let mut st = self.state.lock();
        if st.generation != generation {
            return false;
        }
        f(&mut st);
        self.updates.send_replace(st.snapshot());
        true
    }
}

impl<S: ModuleSource, C> Shared<S, C> {
    async fn load_modules(&self) {
        self.with_state(|st| st.module_loads += 1);
        if let Err(e) = self.modules.ensure_loaded().await {
            warn!(error = %e, "module load failed; searching what is loaded");
        }
        self.with_state(|st| st.module_loads = st.module_loads.saturating_sub(1));
    }
}

/// Incremental search over loaded modules plus server-side contents.
///
/// Keystrokes go through [`on_query_change`](Self::on_query_change), which
/// debounces; results are published as [`SearchSnapshot`]s on a watch channel.
/// Must be used from within a Tokio runtime.
pub struct SearchAggregator<S, C> {
    shared: Arc<Shared<S, C>>,
}

impl<S, C> SearchAggregator<S, C>
where
    S: ModuleSource + 'static,
    C: ContentSearcher + 'static,
{
    pub fn new(modules: S, searcher: C, handler: Arc<dyn SelectionHandler>, options: AggregatorOptions) -> Self {
        let (updates, _) = watch::channel(SearchSnapshot::default());
        Self {
            shared: Arc::new(Shared { modules, searcher, handler, options, state: Mutex::new(State::default()), updates }),
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<SearchSnapshot> {
        self.shared.updates.subscribe()
    }

    pub fn snapshot(&self) -> SearchSnapshot {
        self.shared.state.lock().snapshot()
    }

    /// Wait until no timer is pending and the current query has finished evaluating.
    pub async fn settled(&self) -> SearchSnapshot {
        let mut rx = self.subscribe();
        let settled = rx.wait_for(SearchSnapshot::is_settled).await.map(|s| SearchSnapshot::clone(&s));
        settled.unwrap_or_else(|_| self.snapshot())
    }

    /// Record a keystroke and (re)schedule the debounced evaluation.
    ///
    /// Blank input clears both result sets immediately and schedules nothing.
    pub fn on_query_change(&self, text: impl Into<String>) {
        let text = text.into();
        self.shared.handler.on_query_change(&text);
        let trimmed = text.trim().to_string();
        let cleared = self.shared.with_state(|st| {
            let generation = st.invalidate();
            st.query = text;
            if trimmed.is_empty() {
                st.categories.clear();
                st.contents.clear();
                return true;
            }
            let shared = Arc::clone(&self.shared);
            st.pending = Some(tokio::spawn(async move {
                tokio::time::sleep(shared.options.debounce).await;
                let fired = shared.update(generation, |st| {
                    st.pending = None;
                    st.searching = true;
                });
                if fired {
                    evaluate(&shared, &trimmed, generation).await;
                }
            }));
            false
        });
        if cleared {
            self.shared.handler.on_query_change("");
        }
    }

    /// Open the dropdown and start loading modules if none are loaded.
    pub async fn on_focus(&self) {
        self.shared.with_state(|st| st.open = true);
        if !self.shared.modules.is_loaded() {
            self.shared.load_modules().await;
        }
    }

    /// Close the dropdown. The query is kept.
    pub fn dismiss(&self, signal: DismissSignal) {
        debug!(?signal, "search dropdown dismissed");
        self.shared.with_state(|st| st.open = false);
    }

    pub fn on_select_category(&self, category: &Category, module: &Arc<Module>) {
        self.reset();
        debug!(category_id = category.id, module_id = module.id, "category selected");
        self.shared.handler.on_select_category(category, module);
    }

    /// The category handed to the handler is looked up in `module` by the
    /// content's category id, and is `None` when that fails.
    pub fn on_select_content(&self, content: &ContentItem, module: Option<&Arc<Module>>) {
        self.reset();
        let category = module.zip(content.category_id).and_then(|(m, id)| m.category(id));
        debug!(content_id = content.id, category_id = ?category.map(|c| c.id), "content selected");
        self.shared.handler.on_select_content(category, module, content.id);
    }

    pub fn select(&self, result: &SearchResult) {
        match result {
            SearchResult::Category(m) => self.on_select_category(&m.category, &m.module),
            SearchResult::Content(m) => self.on_select_content(&m.content, m.module.as_ref()),
        }
    }

    fn reset(&self) {
        self.shared.with_state(|st| {
            st.invalidate();
            st.query.clear();
            st.categories.clear();
            st.contents.clear();
            st.open = false;
        });
        self.shared.handler.on_query_change("");
    }
}

impl<S, C> Drop for SearchAggregator<S, C> {
    fn drop(&mut self) {
        if let Some(timer) = self.shared.state.lock().pending.take() {
            timer.abort();
        }
    }
}

async fn evaluate<S: ModuleSource, C: ContentSearcher>(shared: &Shared<S, C>, query: &str, generation: u64) {
    if !shared.modules.is_loaded() {
        shared.load_modules().await;
    }

    let categories = local_matches(&shared.modules.snapshot(), query);
    debug!(query, generation, count = categories.len(), "local matches");
    if !shared.update(generation, |st| st.categories = categories) {
        return;
    }

    let items = match tokio::time::timeout(shared.options.request_timeout, shared.searcher.search_contents(query)).await {
        Ok(Ok(resp)) => resp.into_items(),
        Ok(Err(e)) => {
            warn!(query, error = %e, "content search failed");
            Vec::new()
        }
        Err(_) => {
            warn!(query, timeout_ms = shared.options.request_timeout.as_millis() as u64, "content search timed out");
            Vec::new()
        }
    };
    let contents = map_contents(&shared.modules.snapshot(), items);
    debug!(query, generation, count = contents.len(), "remote matches");
    let applied = shared.update(generation, |st| {
        st.contents = contents;
        st.searching = false;
    });
    if !applied {
        debug!(query, generation, "dropped stale search response");
    }
}
