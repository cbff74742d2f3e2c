//! appguide-remote
//!
//! REST side of the App Guide search: a `reqwest` client for the modules and
//! content-search endpoints, and a lazily loaded module store.

pub mod client;
pub mod store;

pub use client::ApiClient;
pub use store::ModuleStore;
