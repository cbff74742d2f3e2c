//! appguide-hybrid
//!
//! Incremental search that merges category matches computed over the loaded
//! module tree with content matches returned by the server.

pub mod aggregator;
pub mod merge;
pub mod snapshot;

pub use aggregator::{AggregatorOptions, DismissSignal, NoopHandler, SearchAggregator};
pub use merge::{map_content, map_contents};
pub use snapshot::SearchSnapshot;
