use async_trait::async_trait;

use crate::datasource::{DataSourceRequest, DataSourceResult};
use crate::error::Result;

mod memory;
mod product;

pub use memory::InMemoryProductDao;
pub use product::{Product, seed_catalog};

/// Answers grid queries over the product catalog.
#[async_trait]
pub trait ProductDao: Send + Sync {
    async fn get_list(&self, request: &DataSourceRequest) -> Result<DataSourceResult>;
}
