//! Grouping of a module's flat category list into a forest.

use std::collections::{HashMap, HashSet};

use crate::types::{Category, CategoryId};

#[derive(Debug, Clone, PartialEq)]
pub struct CategoryNode {
    pub category: Category,
    pub children: Vec<CategoryNode>,
}

impl CategoryNode {
    /// Number of nodes in this subtree, including `self`.
    pub fn subtree_size(&self) -> usize {
        1 + self.children.iter().map(CategoryNode::subtree_size).sum::<usize>()
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}

/// Index categories by id. The first category wins when ids repeat.
pub fn index_by_id(categories: &[Category]) -> HashMap<CategoryId, &Category> {
    let mut by_id = HashMap::with_capacity(categories.len());
    for c in categories {
        by_id.entry(c.id).or_insert(c);
    }
    by_id
}

/// Build the forest for one module.
///
/// Roots are categories whose parent does not resolve within `categories`.
/// Children keep their input order. Categories caught in a parent cycle
/// never hang off a root and are left out.
pub fn build_category_tree(categories: &[Category]) -> Vec<CategoryNode> {
    let by_id = index_by_id(categories);
    let mut children: HashMap<CategoryId, Vec<&Category>> = HashMap::new();
    let mut roots = Vec::new();
    for c in categories {
        match c.parent_id.filter(|pid| by_id.contains_key(pid)) {
            Some(pid) => children.entry(pid).or_default().push(c),
            None => roots.push(c),
        }
    }
    let mut seen = HashSet::new();
    roots.into_iter().filter_map(|r| attach(r, &children, &mut seen)).collect()
}

fn attach(
    category: &Category,
    children: &HashMap<CategoryId, Vec<&Category>>,
    seen: &mut HashSet<CategoryId>,
) -> Option<CategoryNode> {
    if !seen.insert(category.id) {
        return None;
    }
    let kids = children
        .get(&category.id)
        .map(|list| list.iter().filter_map(|c| attach(c, children, seen)).collect())
        .unwrap_or_default();
    Some(CategoryNode { category: category.clone(), children: kids })
}
