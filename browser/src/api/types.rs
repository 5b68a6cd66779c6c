use std::time::Duration;

use catalog_common::types::SortMode;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Upstream catalog failure, shown to the user with a retry affordance.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ProviderError {
    #[error("catalog unavailable: {0}")]
    Unavailable(String),

    #[error("catalog request timed out")]
    TimedOut,
}

/// Failure writing to the persisted key-value store.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// Emitted once per user selection.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SelectionEvent {
    pub record_id: String,
}

/// Per-surface options. Fixed for the lifetime of a surface.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SurfaceConfig {
    pub placeholder: String,
    pub result_cap: usize,
    pub debounce_ms: u64,
    pub sort_modes: Vec<SortMode>,
    pub show_history: bool,
    pub show_filters: bool,
}

impl SurfaceConfig {
    /// Dropdown suggestions under the header search box.
    pub fn live_suggestions() -> Self {
        Self {
            placeholder: "Search scripts...".into(),
            result_cap: 8,
            debounce_ms: 150,
            sort_modes: vec![SortMode::Relevance],
            show_history: true,
            show_filters: false,
        }
    }

    /// Full results page with filters and every sort mode.
    pub fn full_page() -> Self {
        Self {
            placeholder: "Search the script catalog...".into(),
            result_cap: 15,
            debounce_ms: 300,
            sort_modes: SortMode::ALL.to_vec(),
            show_history: true,
            show_filters: true,
        }
    }

    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    pub fn allows_sort(&self, mode: SortMode) -> bool {
        self.sort_modes.contains(&mode)
    }
}

impl Default for SurfaceConfig {
    fn default() -> Self {
        Self::live_suggestions()
    }
}
