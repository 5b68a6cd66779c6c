#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::Rc;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use catalog_common::types::{Category, OsTag, Priority, ScriptRecord};
use script_browser::api::provider::{CatalogProvider, StaticCatalog};
use script_browser::api::types::ProviderError;

pub fn record(id: &str, title: &str, tags: &[&str], downloads: u64) -> ScriptRecord {
    ScriptRecord {
        id: id.to_string(),
        title: title.to_string(),
        description: String::new(),
        os: OsTag::Linux,
        category: Category::Automation,
        tags: tags.iter().map(|t| t.to_string()).collect(),
        rating: 4.0,
        downloads,
        author: "ops".to_string(),
        created_at: 1_700_000_000,
        updated_at: 1_700_000_000,
        content: String::new(),
        priority: None,
    }
}

pub fn corpus() -> Vec<ScriptRecord> {
    let mut disk = record("disk", "Disk cleanup", &["disk-full"], 40);
    disk.category = Category::SystemAdministration;
    disk.priority = Some(Priority::Critical);
    vec![
        record("r1", "Cron Jobs", &[], 10),
        record("r2", "Backup Tool", &["cron"], 500),
        record("r3", "Other", &[], 1000),
        record("r4", "Nightly backup", &["rsync"], 70),
        disk,
    ]
}

/// Static catalog that counts how often it was loaded.
pub struct CountingCatalog {
    inner: StaticCatalog,
    loads: Rc<Cell<usize>>,
}

impl CountingCatalog {
    pub fn new(records: Vec<ScriptRecord>) -> (Self, Rc<Cell<usize>>) {
        let loads = Rc::new(Cell::new(0));
        let catalog = Self {
            inner: StaticCatalog::new(records),
            loads: Rc::clone(&loads),
        };
        (catalog, loads)
    }
}

#[async_trait(?Send)]
impl CatalogProvider for CountingCatalog {
    async fn load(&self) -> Result<Arc<[ScriptRecord]>, ProviderError> {
        self.loads.set(self.loads.get() + 1);
        self.inner.load().await
    }
}

/// Catalog whose n-th load takes the n-th scripted delay.
pub struct DelayedCatalog {
    inner: StaticCatalog,
    delays: RefCell<VecDeque<u64>>,
}

impl DelayedCatalog {
    pub fn new(records: Vec<ScriptRecord>, delays_ms: &[u64]) -> Self {
        Self {
            inner: StaticCatalog::new(records),
            delays: RefCell::new(delays_ms.iter().copied().collect()),
        }
    }
}

#[async_trait(?Send)]
impl CatalogProvider for DelayedCatalog {
    async fn load(&self) -> Result<Arc<[ScriptRecord]>, ProviderError> {
        let delay = self.delays.borrow_mut().pop_front().unwrap_or(0);
        tokio::time::sleep(Duration::from_millis(delay)).await;
        self.inner.load().await
    }
}

/// Catalog that fails its first `failures` loads.
pub struct FlakyCatalog {
    inner: StaticCatalog,
    failures: Cell<usize>,
}

impl FlakyCatalog {
    pub fn new(records: Vec<ScriptRecord>, failures: usize) -> Self {
        Self {
            inner: StaticCatalog::new(records),
            failures: Cell::new(failures),
        }
    }
}

#[async_trait(?Send)]
impl CatalogProvider for FlakyCatalog {
    async fn load(&self) -> Result<Arc<[ScriptRecord]>, ProviderError> {
        let left = self.failures.get();
        if left > 0 {
            self.failures.set(left - 1);
            return Err(ProviderError::Unavailable("catalog service down".into()));
        }
        self.inner.load().await
    }
}
