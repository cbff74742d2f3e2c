//! appguide-text
//!
//! Synchronous, in-memory side of the search: category title matching over
//! loaded modules, breadcrumb paths, and snippet highlighting for content hits.

pub mod fold;
pub mod matcher;
pub mod path;
pub mod snippet;

pub use fold::fold_case;
pub use matcher::{local_matches, owning_module};
pub use path::{breadcrumb, breadcrumb_for_id};
pub use snippet::{escape_html, snippet, Snippet};
