use std::cell::{Ref, RefCell};
use std::rc::Rc;

use catalog_common::types::{CategoryFilter, OsFilter, SortMode};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::api::provider::CatalogProvider;
use crate::api::store::KeyValueStore;
use crate::api::types::{SelectionEvent, SurfaceConfig};
use crate::search::navigation::NavKey;
use crate::state::{Evaluation, SearchSurface, SurfacePhase};

/// Drives one [`SearchSurface`] on a single-threaded runtime.
///
/// Must run inside a [`tokio::task::LocalSet`]: the debounce timer and the
/// evaluations are `spawn_local`ed and share the surface through `Rc<RefCell>`.
/// The surface is never borrowed across an `.await`.
pub struct SearchController<P, S> {
    surface: Rc<RefCell<SearchSurface<S>>>,
    provider: Rc<P>,
    /// Debounce timer of the current cycle. Aborting it only cancels the wait;
    /// an evaluation that already started runs on and is discarded by version.
    pending: Option<JoinHandle<()>>,
    selections: mpsc::UnboundedSender<SelectionEvent>,
}

impl<P, S> SearchController<P, S>
where
    P: CatalogProvider + 'static,
    S: KeyValueStore + 'static,
{
    /// Build a controller and the receiving end of its selection sink.
    pub fn new(
        config: SurfaceConfig,
        provider: P,
        store: S,
    ) -> (Self, mpsc::UnboundedReceiver<SelectionEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let controller = Self {
            surface: Rc::new(RefCell::new(SearchSurface::new(config, store))),
            provider: Rc::new(provider),
            pending: None,
            selections: tx,
        };
        (controller, rx)
    }

    /// Read-only view of the surface. Drop it before awaiting.
    pub fn surface(&self) -> Ref<'_, SearchSurface<S>> {
        self.surface.borrow()
    }

    pub fn input(&mut self, text: &str) {
        let version = self.surface.borrow_mut().input(text);
        self.schedule(version);
    }

    pub fn set_os_filter(&mut self, os: OsFilter) {
        let version = self.surface.borrow_mut().set_os_filter(os);
        self.schedule(version);
    }

    pub fn set_category_filter(&mut self, category: CategoryFilter) {
        let version = self.surface.borrow_mut().set_category_filter(category);
        self.schedule(version);
    }

    pub fn set_sort(&mut self, sort: SortMode) {
        let version = self.surface.borrow_mut().set_sort(sort);
        self.schedule(version);
    }

    pub fn set_scope(&mut self, path: Option<&str>) {
        let version = self.surface.borrow_mut().set_scope(path);
        self.schedule(version);
    }

    pub fn retry(&mut self) {
        let version = self.surface.borrow_mut().retry();
        self.schedule(version);
    }

    /// Explicit submission of the current text to the recent-search log.
    pub fn submit(&mut self) -> bool {
        self.surface.borrow_mut().submit()
    }

    pub fn key(&mut self, key: NavKey) {
        let (selection, closed) = {
            let mut surface = self.surface.borrow_mut();
            let selection = surface.key(key);
            (selection, surface.phase() == SurfacePhase::Idle)
        };
        if closed {
            self.cancel_timer();
        }
        if let Some(event) = selection {
            tracing::debug!(record_id = %event.record_id, "result selected");
            if self.selections.send(event).is_err() {
                tracing::debug!("selection sink closed");
            }
        }
    }

    pub fn close(&mut self) {
        self.cancel_timer();
        self.surface.borrow_mut().close();
    }

    pub fn clear(&mut self) {
        self.cancel_timer();
        self.surface.borrow_mut().clear();
    }

    fn cancel_timer(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }

    /// Cancel-and-reschedule the single debounce timer for `version`.
    fn schedule(&mut self, version: u64) {
        self.cancel_timer();
        let delay = self.surface.borrow().config().debounce();
        let surface = Rc::clone(&self.surface);
        let provider = Rc::clone(&self.provider);

        tracing::debug!(version, ?delay, "debounce cycle started");
        self.pending = Some(tokio::task::spawn_local(async move {
            tokio::time::sleep(delay).await;
            let Some(evaluation) = surface.borrow_mut().begin_evaluation(version) else {
                return;
            };
            tokio::task::spawn_local(evaluate(surface, provider, evaluation));
        }));
    }
}

impl<P, S> Drop for SearchController<P, S> {
    fn drop(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }
}

async fn evaluate<P, S>(
    surface: Rc<RefCell<SearchSurface<S>>>,
    provider: Rc<P>,
    evaluation: Evaluation,
) where
    P: CatalogProvider,
    S: KeyValueStore,
{
    let outcome = provider
        .load()
        .await
        .map(|records| evaluation.run(&records));
    surface.borrow_mut().apply(evaluation.version, outcome);
}
