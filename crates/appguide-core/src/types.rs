//! Domain types shared by the local matcher, the REST client and the aggregator.

use serde::{Deserialize, Deserializer, Serialize};
use std::sync::Arc;

pub type ModuleId = i64;
pub type CategoryId = i64;
pub type ContentId = i64;

/// A top-level grouping that owns a flat, ordered list of categories.
///
/// `categories` forms a forest through `Category::parent_id`. A payload whose
/// `categories` field is missing or is not an array decodes as empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Module {
    pub id: ModuleId,
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(default, deserialize_with = "lenient_categories")]
    pub categories: Vec<Category>,
}

impl Module {
    pub fn category(&self, id: CategoryId) -> Option<&Category> {
        self.categories.iter().find(|c| c.id == id)
    }

    pub fn contains_category(&self, id: CategoryId) -> bool {
        self.categories.iter().any(|c| c.id == id)
    }
}

fn lenient_categories<'de, D>(deserializer: D) -> Result<Vec<Category>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    match value {
        serde_json::Value::Array(_) => serde_json::from_value(value).map_err(serde::de::Error::custom),
        _ => Ok(Vec::new()),
    }
}

/// A node of a module's category tree.
///
/// The backend is inconsistent about naming: the display title may arrive as
/// `title`, `name` or `label`, and the parent link as `parent_id` or `parentId`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "CategoryWire")]
pub struct Category {
    pub id: CategoryId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    pub parent_id: Option<CategoryId>,
}

/// Both spellings may be present at once; the snake_case one wins unless null.
#[derive(Deserialize)]
struct CategoryWire {
    id: CategoryId,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    label: Option<String>,
    #[serde(default)]
    parent_id: Option<CategoryId>,
    #[serde(default, rename = "parentId")]
    parent_id_camel: Option<CategoryId>,
}

impl From<CategoryWire> for Category {
    fn from(w: CategoryWire) -> Self {
        Self { id: w.id, title: w.title, name: w.name, label: w.label, parent_id: w.parent_id.or(w.parent_id_camel) }
    }
}

impl Category {
    /// First non-empty of `title`, `name`, `label`; empty string otherwise.
    pub fn display_title(&self) -> &str {
        [&self.title, &self.name, &self.label]
            .into_iter()
            .filter_map(|s| s.as_deref())
            .find(|s| !s.is_empty())
            .unwrap_or("")
    }
}

/// A document returned by the server-side content search.
///
/// `category_id` and `plain_content` are also accepted in camelCase.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "ContentItemWire")]
pub struct ContentItem {
    pub id: ContentId,
    pub title: String,
    pub category_id: Option<CategoryId>,
    pub plain_content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_title: Option<String>,
}

#[derive(Deserialize)]
struct ContentItemWire {
    id: ContentId,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    category_id: Option<CategoryId>,
    #[serde(default, rename = "categoryId")]
    category_id_camel: Option<CategoryId>,
    #[serde(default)]
    plain_content: Option<String>,
    #[serde(default, rename = "plainContent")]
    plain_content_camel: Option<String>,
    #[serde(default)]
    category_title: Option<String>,
}

impl From<ContentItemWire> for ContentItem {
    fn from(w: ContentItemWire) -> Self {
        Self {
            id: w.id,
            title: w.title.unwrap_or_default(),
            category_id: w.category_id.or(w.category_id_camel),
            plain_content: w.plain_content.or(w.plain_content_camel).unwrap_or_default(),
            category_title: w.category_title,
        }
    }
}

/// Body of the content search endpoint: `{ "data": [ContentItem, ...] }`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ContentSearchResponse {
    #[serde(default)]
    pub data: Option<Vec<ContentItem>>,
}

impl ContentSearchResponse {
    pub fn new(items: Vec<ContentItem>) -> Self {
        Self { data: Some(items) }
    }

    /// Absent `data` is an empty result, not an error.
    pub fn into_items(self) -> Vec<ContentItem> {
        self.data.unwrap_or_default()
    }
}

/// Body of the modules endpoint: `{ "data": [Module, ...] }`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ModuleListResponse {
    #[serde(default)]
    pub data: Option<Vec<Module>>,
}

impl ModuleListResponse {
    pub fn into_modules(self) -> Vec<Module> {
        self.data.unwrap_or_default()
    }
}

/// A category whose title matched the query, with its breadcrumb.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryMatch {
    pub module: Arc<Module>,
    pub category: Category,
    pub path: String,
}

/// A content item from the server mapped back onto the loaded module tree.
///
/// `module` is `None` when no loaded module owns `category_id`; `path` then
/// falls back to the server-provided `category_title`.
#[derive(Debug, Clone, PartialEq)]
pub struct ContentMatch {
    pub content: ContentItem,
    pub module: Option<Arc<Module>>,
    pub path: String,
    pub category_id: Option<CategoryId>,
}

/// Either kind of search result, in presentation order.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchResult {
    Category(CategoryMatch),
    Content(ContentMatch),
}
