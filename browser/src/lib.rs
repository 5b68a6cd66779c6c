//! Interaction layer of the script catalog browser.
//!
//! Bridges high-frequency UI input (keystrokes, filter changes, arrow keys) to
//! the pure ranking engine in `catalog_common`: debounces input, discards
//! stale evaluations by version, reduces keyboard navigation, and keeps a
//! bounded recent-search log in an injected key-value store.

pub mod api;
pub mod history;
pub mod search;
pub mod state;
