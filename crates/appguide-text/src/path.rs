use std::collections::{HashMap, HashSet};

use appguide_core::tree::index_by_id;
use appguide_core::types::{Category, CategoryId};

pub const PATH_SEPARATOR: &str = " > ";

/// Root-first titles joined by `" > "`.
///
/// Walks parent links until one fails to resolve. A category seen twice ends
/// the walk, so parent cycles terminate.
pub fn breadcrumb(categories: &[Category], category: &Category) -> String {
    walk(&index_by_id(categories), category)
}

/// Same as [`breadcrumb`] but looks the category up by id first.
pub fn breadcrumb_for_id(categories: &[Category], id: CategoryId) -> Option<String> {
    let by_id = index_by_id(categories);
    by_id.get(&id).map(|c| walk(&by_id, c))
}

pub(crate) fn walk(by_id: &HashMap<CategoryId, &Category>, category: &Category) -> String {
    let mut titles = Vec::new();
    let mut seen = HashSet::new();
    let mut cur = Some(category);
    while let Some(c) = cur {
        if !seen.insert(c.id) {
            break;
        }
        titles.push(c.display_title());
        cur = c.parent_id.and_then(|pid| by_id.get(&pid).copied());
    }
    titles.reverse();
    titles.join(PATH_SEPARATOR)
}
