use serde::{Deserialize, Serialize};

use crate::api::store::KeyValueStore;
use crate::api::types::StoreError;

/// Key the recent-search log lives under in the persisted store.
pub const STORAGE_KEY: &str = "script_catalog_recent_searches";

pub const CAPACITY: usize = 5;

/// Bump this when the persisted layout changes to auto-clear stale logs.
const HISTORY_VERSION: u32 = 1;

#[derive(Serialize, Deserialize)]
struct HistoryData {
    #[serde(default)]
    version: u32,
    terms: Vec<String>,
}

/// Distinct query strings, most recent first, at most [`CAPACITY`] of them.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RecentSearchLog {
    terms: Vec<String>,
}

impl RecentSearchLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn terms(&self) -> &[String] {
        &self.terms
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Move `term` to the front, dropping the oldest entry past capacity.
    /// Blank terms are ignored; returns whether the log changed.
    pub fn record(&mut self, term: &str) -> bool {
        let term = term.trim();
        if term.is_empty() {
            return false;
        }
        if self.terms.first().map(String::as_str) == Some(term) {
            return false;
        }
        self.terms.retain(|t| t != term);
        self.terms.insert(0, term.to_string());
        self.terms.truncate(CAPACITY);
        true
    }

    pub fn clear(&mut self) {
        self.terms.clear();
    }

    /// Read the log from `store`. Missing, unparsable or outdated state yields
    /// an empty log; this never fails.
    pub fn load<S: KeyValueStore + ?Sized>(store: &S) -> Self {
        let Some(json) = store.get(STORAGE_KEY) else {
            return Self::new();
        };
        let data: HistoryData = match serde_json::from_str(&json) {
            Ok(d) => d,
            Err(e) => {
                tracing::warn!("Discarding corrupt recent-search log: {}", e);
                return Self::new();
            }
        };
        if data.version != HISTORY_VERSION {
            tracing::info!(
                "Recent-search log version mismatch ({} != {}), clearing",
                data.version,
                HISTORY_VERSION
            );
            return Self::new();
        }

        // Re-apply the invariants: a hand-edited file may hold duplicates or
        // too many entries.
        let mut log = Self::new();
        for term in data.terms.iter().rev() {
            log.record(term);
        }
        log
    }

    /// Write the log through to `store`.
    pub fn persist<S: KeyValueStore + ?Sized>(&self, store: &mut S) -> Result<(), StoreError> {
        let data = HistoryData {
            version: HISTORY_VERSION,
            terms: self.terms.clone(),
        };
        store.set(STORAGE_KEY, &serde_json::to_string(&data)?)
    }
}
