use std::sync::Arc;

use crate::config::ServerConfig;
use crate::dao::{InMemoryProductDao, ProductDao};
use crate::di::Container;
use crate::error::{GridError, Result};

/// A unit of registration: providers plus the trait bindings they satisfy.
pub trait Module {
    fn register(container: &mut Container) -> Result<()>;
}

/// Registers the product catalog DAO and binds it as `dyn ProductDao`.
///
/// Uses the catalog file from a registered [`ServerConfig`] when one is
/// configured, and the built-in catalog otherwise.
pub struct ProductModule;

impl Module for ProductModule {
    fn register(container: &mut Container) -> Result<()> {
        let data_path = container
            .resolve::<ServerConfig>()
            .ok()
            .and_then(|config| config.data_path.clone());

        let dao = match data_path {
            Some(path) => InMemoryProductDao::from_json_file(&path),
            None => InMemoryProductDao::seeded(),
        }
        .map_err(|e| GridError::ModuleRegistrationFailed {
            message: format!("ProductModule: {}", e),
        })?;

        tracing::debug!(products = dao.len(), "registering product catalog");
        container
            .register(dao)
            .bind::<dyn ProductDao, InMemoryProductDao, _>(|dao| dao as Arc<dyn ProductDao>);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::di::ContainerBuilder;
    use std::path::PathBuf;

    #[test]
    fn registers_seeded_catalog_by_default() {
        let mut container = Container::new();
        ProductModule::register(&mut container).unwrap();
        assert!(container.contains::<dyn ProductDao>());
        assert_eq!(container.resolve::<InMemoryProductDao>().unwrap().len(), 20);
    }

    #[test]
    fn unreadable_catalog_fails_registration() {
        let config = ServerConfig {
            data_path: Some(PathBuf::from("/nonexistent/products.json")),
            ..ServerConfig::default()
        };
        let mut container = ContainerBuilder::new().register(config).build();
        assert!(matches!(
            ProductModule::register(&mut container),
            Err(GridError::ModuleRegistrationFailed { .. })
        ));
    }
}
