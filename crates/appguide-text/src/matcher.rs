use std::sync::Arc;

use appguide_core::tree::index_by_id;
use appguide_core::types::{CategoryId, CategoryMatch, Module};

use crate::fold::fold_case;
use crate::path::walk;

/// Categories whose display title contains `query`, ignoring case.
///
/// Results follow module order, then category order within each module.
/// No ranking is applied.
pub fn local_matches(modules: &[Arc<Module>], query: &str) -> Vec<CategoryMatch> {
    if query.is_empty() {
        return Vec::new();
    }
    let needle = fold_case(query);
    let mut out = Vec::new();
    for module in modules {
        let by_id = index_by_id(&module.categories);
        for category in &module.categories {
            if fold_case(category.display_title()).contains(&needle) {
                out.push(CategoryMatch {
                    module: Arc::clone(module),
                    category: category.clone(),
                    path: walk(&by_id, category),
                });
            }
        }
    }
    out
}

/// First module whose categories include `category_id`.
pub fn owning_module(modules: &[Arc<Module>], category_id: CategoryId) -> Option<&Arc<Module>> {
    modules.iter().find(|m| m.contains_category(category_id))
}
