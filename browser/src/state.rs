use catalog_common::filtering::filter_by_category;
use catalog_common::ranking;
use catalog_common::types::{
    CategoryFilter, OsFilter, ScriptRecord, SearchQuery, SearchResult, SortMode,
};

use crate::api::store::KeyValueStore;
use crate::api::types::{ProviderError, SelectionEvent, SurfaceConfig};
use crate::history::RecentSearchLog;
use crate::search::navigation::{reduce, NavKey, NavOutcome, NavigationState};

// --- Data types ---

/// Lifecycle of one search surface.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SurfacePhase {
    #[default]
    Idle,
    Debouncing,
    Evaluating,
    Presenting,
}

/// Outcome of the most recent applied evaluation.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum SurfaceStatus {
    #[default]
    Ready,
    /// The catalog could not be loaded; earlier results are still shown.
    Failed(ProviderError),
}

/// Work order for one debounce cycle.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Evaluation {
    pub version: u64,
    pub query: SearchQuery,
    /// Browse path the catalog is narrowed to before text matching.
    pub scope: Option<String>,
}

impl Evaluation {
    /// Run the query against `records`, narrowed to the browse scope first.
    pub fn run(&self, records: &[ScriptRecord]) -> Vec<SearchResult> {
        match self.scope.as_deref() {
            Some(path) => ranking::search(filter_by_category(records, path), &self.query),
            None => ranking::search(records, &self.query),
        }
    }
}

// --- Surface ---

/// All mutable state of one search surface.
///
/// Every change that should trigger a new evaluation bumps `version`;
/// results are only applied when they carry the current version, so a slow
/// superseded evaluation can never overwrite a newer one.
pub struct SearchSurface<S> {
    config: SurfaceConfig,
    phase: SurfacePhase,
    status: SurfaceStatus,
    text: String,
    os: OsFilter,
    category: CategoryFilter,
    sort: SortMode,
    scope: Option<String>,
    version: u64,
    results: Vec<SearchResult>,
    nav: NavigationState,
    recent: RecentSearchLog,
    store: S,
}

impl<S: KeyValueStore> SearchSurface<S> {
    pub fn new(config: SurfaceConfig, store: S) -> Self {
        assert!(config.result_cap > 0, "result cap must be positive");
        let recent = RecentSearchLog::load(&store);
        let sort = config
            .sort_modes
            .first()
            .copied()
            .unwrap_or(SortMode::Relevance);
        Self {
            config,
            phase: SurfacePhase::Idle,
            status: SurfaceStatus::Ready,
            text: String::new(),
            os: OsFilter::All,
            category: CategoryFilter::All,
            sort,
            scope: None,
            version: 0,
            results: Vec::new(),
            nav: NavigationState::closed(),
            recent,
            store,
        }
    }

    pub fn config(&self) -> &SurfaceConfig {
        &self.config
    }

    pub fn phase(&self) -> SurfacePhase {
        self.phase
    }

    pub fn status(&self) -> &SurfaceStatus {
        &self.status
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn results(&self) -> &[SearchResult] {
        &self.results
    }

    pub fn navigation(&self) -> NavigationState {
        self.nav
    }

    pub fn highlighted(&self) -> Option<&SearchResult> {
        self.nav.highlighted.and_then(|i| self.results.get(i))
    }

    pub fn recent(&self) -> &RecentSearchLog {
        &self.recent
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// The query the current input and filters describe.
    pub fn query(&self) -> SearchQuery {
        SearchQuery::new(self.text.clone())
            .with_os(self.os)
            .with_category(self.category)
            .with_sort(self.sort)
            .with_limit(self.config.result_cap)
    }

    fn restart(&mut self) -> u64 {
        self.version += 1;
        self.phase = SurfacePhase::Debouncing;
        self.version
    }

    /// New input text. Starts a fresh debounce cycle and returns its version.
    pub fn input(&mut self, text: &str) -> u64 {
        self.text = text.to_string();
        self.restart()
    }

    pub fn set_os_filter(&mut self, os: OsFilter) -> u64 {
        self.os = os;
        self.restart()
    }

    pub fn set_category_filter(&mut self, category: CategoryFilter) -> u64 {
        self.category = category;
        self.restart()
    }

    /// Panics if `sort` is not enabled for this surface.
    pub fn set_sort(&mut self, sort: SortMode) -> u64 {
        assert!(
            self.config.allows_sort(sort),
            "sort mode {} is not enabled on this surface",
            sort.slug()
        );
        self.sort = sort;
        self.restart()
    }

    /// Narrow the catalog to a taxonomy path, or lift the restriction.
    pub fn set_scope(&mut self, path: Option<&str>) -> u64 {
        self.scope = path.map(str::to_string);
        self.restart()
    }

    /// Re-run the current input after a failure.
    pub fn retry(&mut self) -> u64 {
        self.restart()
    }

    /// Called when a debounce window elapses. Returns the work to run, or
    /// `None` if the cycle was superseded or cancelled meanwhile.
    pub fn begin_evaluation(&mut self, version: u64) -> Option<Evaluation> {
        if version != self.version || self.phase != SurfacePhase::Debouncing {
            return None;
        }
        self.phase = SurfacePhase::Evaluating;
        Some(Evaluation {
            version,
            query: self.query(),
            scope: self.scope.clone(),
        })
    }

    /// Apply an evaluation outcome. Returns `false` when it is stale.
    pub fn apply(
        &mut self,
        version: u64,
        outcome: Result<Vec<SearchResult>, ProviderError>,
    ) -> bool {
        if version != self.version || self.phase != SurfacePhase::Evaluating {
            tracing::debug!(version, current = self.version, "discarding stale evaluation");
            return false;
        }
        match outcome {
            Ok(results) => {
                self.nav = NavigationState::presenting(results.len());
                self.results = results;
                self.status = SurfaceStatus::Ready;
            }
            Err(e) => {
                tracing::warn!(version, error = %e, "catalog evaluation failed");
                self.status = SurfaceStatus::Failed(e);
            }
        }
        self.phase = SurfacePhase::Presenting;
        true
    }

    /// Feed a key to the navigation reducer. The open panel gates the keys,
    /// not the phase: results stay navigable while a newer cycle is pending.
    ///
    /// Escape closes in every non-idle phase, and both Escape and a selection
    /// invalidate any pending or running cycle so the panel cannot reopen on
    /// its own. A selection is returned for the caller to route.
    pub fn key(&mut self, key: NavKey) -> Option<SelectionEvent> {
        if key == NavKey::Escape && self.phase != SurfacePhase::Idle {
            self.close();
            return None;
        }
        let (nav, outcome) = reduce(self.nav, key);
        self.nav = nav;
        match outcome {
            NavOutcome::None => None,
            NavOutcome::Closed => {
                self.close();
                None
            }
            NavOutcome::Selected(i) => {
                let selection = self.results.get(i).map(|r| SelectionEvent {
                    record_id: r.record.id.clone(),
                });
                self.close();
                selection
            }
        }
    }

    /// Explicit submission: record the current text in the recent log and
    /// write it through. Store failures are logged, not surfaced.
    pub fn submit(&mut self) -> bool {
        if !self.recent.record(&self.text) {
            return false;
        }
        if let Err(e) = self.recent.persist(&mut self.store) {
            tracing::warn!("Failed to persist recent searches: {}", e);
        }
        true
    }

    pub fn clear_recent(&mut self) {
        self.recent.clear();
        if let Err(e) = self.recent.persist(&mut self.store) {
            tracing::warn!("Failed to persist recent searches: {}", e);
        }
    }

    /// Close the panel, keeping the text. Any pending or running cycle is
    /// invalidated.
    pub fn close(&mut self) {
        self.version += 1;
        self.phase = SurfacePhase::Idle;
        self.nav = NavigationState::closed();
    }

    /// Close the panel and forget the text and results.
    pub fn clear(&mut self) {
        self.close();
        self.text.clear();
        self.results.clear();
        self.status = SurfaceStatus::Ready;
    }
}
