use appguide_core::types::{CategoryMatch, ContentMatch, SearchResult};

/// What a renderer needs to draw the search box and its dropdown.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchSnapshot {
    /// Raw input, updated on every keystroke.
    pub query: String,
    pub categories: Vec<CategoryMatch>,
    pub contents: Vec<ContentMatch>,
    /// Modules are loading or a search is being evaluated.
    pub loading: bool,
    /// A debounce timer is pending.
    pub debouncing: bool,
    pub open: bool,
}

impl SearchSnapshot {
    /// Open, and there is something to show: input, results, or a spinner.
    pub fn is_dropdown_visible(&self) -> bool {
        self.open && (!self.query.is_empty() || !self.categories.is_empty() || !self.contents.is_empty() || self.loading)
    }

    /// No timer pending and nothing in flight for the current query.
    pub fn is_settled(&self) -> bool {
        !self.debouncing && !self.loading
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty() && self.contents.is_empty()
    }

    /// Local categories first, then remote contents.
    pub fn results(&self) -> Vec<SearchResult> {
        self.categories
            .iter()
            .cloned()
            .map(SearchResult::Category)
            .chain(self.contents.iter().cloned().map(SearchResult::Content))
            .collect()
    }
}
