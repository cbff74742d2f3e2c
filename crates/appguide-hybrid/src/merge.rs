use std::sync::Arc;

use appguide_core::types::{ContentItem, ContentMatch, Module};
use appguide_text::{breadcrumb_for_id, owning_module};

/// Attach a server-side hit to the module tree that is loaded right now.
///
/// The owner is the first module containing the item's category. Without an
/// owner the path falls back to `category_title`, then to `""`.
pub fn map_content(modules: &[Arc<Module>], item: ContentItem) -> ContentMatch {
    let category_id = item.category_id;
    let module = category_id.and_then(|id| owning_module(modules, id)).cloned();
    let path = module
        .as_ref()
        .zip(category_id)
        .and_then(|(m, id)| breadcrumb_for_id(&m.categories, id))
        .or_else(|| item.category_title.clone())
        .unwrap_or_default();
    ContentMatch { content: item, module, path, category_id }
}

pub fn map_contents(modules: &[Arc<Module>], items: Vec<ContentItem>) -> Vec<ContentMatch> {
    items.into_iter().map(|item| map_content(modules, item)).collect()
}
