use std::sync::Arc;

use async_trait::async_trait;
use catalog_common::types::ScriptRecord;

use super::types::ProviderError;

/// Supplies the full, current catalog on demand.
///
/// The core imposes no caching or refresh policy. A remote implementation
/// applies its own timeout and reports it as [`ProviderError::TimedOut`].
#[async_trait(?Send)]
pub trait CatalogProvider {
    async fn load(&self) -> Result<Arc<[ScriptRecord]>, ProviderError>;
}

/// Catalog already resident in memory.
#[derive(Clone, Debug)]
pub struct StaticCatalog {
    records: Arc<[ScriptRecord]>,
}

impl StaticCatalog {
    pub fn new(records: Vec<ScriptRecord>) -> Self {
        Self {
            records: records.into(),
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[async_trait(?Send)]
impl CatalogProvider for StaticCatalog {
    async fn load(&self) -> Result<Arc<[ScriptRecord]>, ProviderError> {
        Ok(Arc::clone(&self.records))
    }
}
