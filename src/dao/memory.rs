use async_trait::async_trait;
use serde_json::Value;
use std::path::Path;

use super::ProductDao;
use super::product::{Product, seed_catalog};
use crate::datasource::{self, DataSourceRequest, DataSourceResult};
use crate::error::{GridError, Result};

/// Read-only product catalog held in memory.
///
/// Products are serialized to JSON records once, at construction, so each
/// query only filters and sorts.
pub struct InMemoryProductDao {
    records: Vec<Value>,
}

impl InMemoryProductDao {
    pub fn new(products: Vec<Product>) -> Result<Self> {
        let records = products
            .iter()
            .map(serde_json::to_value)
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(|e| GridError::Dao(format!("failed to encode product: {}", e)))?;
        Ok(Self { records })
    }

    pub fn seeded() -> Result<Self> {
        Self::new(seed_catalog())
    }

    /// Loads a catalog from a JSON array of products.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read(path)
            .map_err(|e| GridError::Dao(format!("failed to read catalog {}: {}", path.display(), e)))?;
        let products: Vec<Product> = serde_json::from_slice(&raw)
            .map_err(|e| GridError::Dao(format!("invalid catalog {}: {}", path.display(), e)))?;

        tracing::info!(path = %path.display(), products = products.len(), "loaded product catalog");
        Self::new(products)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[async_trait]
impl ProductDao for InMemoryProductDao {
    async fn get_list(&self, request: &DataSourceRequest) -> Result<DataSourceResult> {
        Ok(datasource::process(&self.records, request))
    }
}
