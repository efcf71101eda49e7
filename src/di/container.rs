use crate::error::{GridError, Result};
use dashmap::DashMap;
use std::any::{Any, TypeId};
use std::sync::Arc;

type AnyArc = Arc<dyn Any + Send + Sync>;

/// Turns the registered concrete instance into an `Arc<dyn Trait>` boxed as
/// `Any`. Returns `None` if the instance is not the bound implementation.
type CasterFn = Arc<dyn Fn(AnyArc) -> Option<AnyArc> + Send + Sync>;

#[derive(Clone)]
struct Binding {
    implementation: TypeId,
    cast: CasterFn,
}

/// Thread-safe service registry keyed by type.
///
/// Concrete services are registered by value; trait objects are resolved
/// through a binding from the trait to a registered implementation.
#[derive(Clone, Default)]
pub struct Container {
    services: DashMap<TypeId, AnyArc>,
    bindings: DashMap<TypeId, Binding>,
}

impl Container {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register<T: 'static + Send + Sync>(&mut self, instance: T) -> &mut Self {
        self.register_arc(Arc::new(instance))
    }

    /// Register an instance that is already shared elsewhere.
    pub fn register_arc<T: 'static + Send + Sync>(&mut self, instance: Arc<T>) -> &mut Self {
        self.services.insert(TypeId::of::<T>(), instance);
        self
    }

    /// Bind `Trait` so that `resolve_trait::<Trait>()` yields the registered `Impl`.
    pub fn bind<Trait, Impl, F>(&mut self, caster: F) -> &mut Self
    where
        Trait: ?Sized + 'static + Send + Sync,
        Impl: 'static + Send + Sync,
        F: Fn(Arc<Impl>) -> Arc<Trait> + 'static + Send + Sync,
    {
        let cast: CasterFn = Arc::new(move |instance: AnyArc| {
            let concrete = instance.downcast::<Impl>().ok()?;
            let trait_obj: Arc<Trait> = caster(concrete);
            Some(Arc::new(trait_obj) as AnyArc)
        });

        self.bindings.insert(
            TypeId::of::<Trait>(),
            Binding {
                implementation: TypeId::of::<Impl>(),
                cast,
            },
        );
        self
    }

    pub fn resolve<T: 'static + Send + Sync>(&self) -> Result<Arc<T>> {
        let type_name = std::any::type_name::<T>();
        let instance = self
            .services
            .get(&TypeId::of::<T>())
            .map(|entry| entry.value().clone())
            .ok_or_else(|| GridError::DependencyNotFound {
                type_name: type_name.to_string(),
            })?;

        instance
            .downcast::<T>()
            .map_err(|_| GridError::DowncastFailed {
                type_name: type_name.to_string(),
            })
    }

    pub fn resolve_trait<T: ?Sized + 'static + Send + Sync>(&self) -> Result<Arc<T>> {
        let type_name = std::any::type_name::<T>();
        let binding = self
            .bindings
            .get(&TypeId::of::<T>())
            .map(|entry| entry.value().clone())
            .ok_or_else(|| GridError::DependencyNotFound {
                type_name: format!("no binding for trait '{}'", type_name),
            })?;

        let instance = self
            .services
            .get(&binding.implementation)
            .map(|entry| entry.value().clone())
            .ok_or_else(|| GridError::DependencyNotFound {
                type_name: format!("implementation for trait '{}' not registered", type_name),
            })?;

        let wrapper = (binding.cast)(instance)
            .and_then(|cast| cast.downcast::<Arc<T>>().ok())
            .ok_or_else(|| GridError::DowncastFailed {
                type_name: type_name.to_string(),
            })?;
        Ok(wrapper.as_ref().clone())
    }

    pub fn contains<T: ?Sized + 'static>(&self) -> bool {
        let type_id = TypeId::of::<T>();
        self.services.contains_key(&type_id) || self.bindings.contains_key(&type_id)
    }

    pub fn len(&self) -> usize {
        self.services.len()
    }

    pub fn is_empty(&self) -> bool {
        self.services.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Settings {
        value: i32,
    }

    trait Catalog: Send + Sync {
        fn size(&self) -> usize;
    }

    struct FixedCatalog {
        size: usize,
    }

    impl Catalog for FixedCatalog {
        fn size(&self) -> usize {
            self.size
        }
    }

    #[test]
    fn register_and_resolve() {
        let mut container = Container::new();
        container.register(Settings { value: 42 });
        let settings = container.resolve::<Settings>().unwrap();
        assert_eq!(settings.value, 42);
        assert_eq!(container.len(), 1);
    }

    #[test]
    fn resolve_trait_through_binding() {
        let mut container = Container::new();
        container
            .register(FixedCatalog { size: 77 })
            .bind::<dyn Catalog, FixedCatalog, _>(|c| c as Arc<dyn Catalog>);

        assert!(container.contains::<dyn Catalog>());
        let catalog = container.resolve_trait::<dyn Catalog>().unwrap();
        assert_eq!(catalog.size(), 77);
    }

    #[test]
    fn missing_dependencies_are_errors() {
        let mut container = Container::new();
        assert!(matches!(
            container.resolve::<Settings>(),
            Err(GridError::DependencyNotFound { .. })
        ));

        container.bind::<dyn Catalog, FixedCatalog, _>(|c| c as Arc<dyn Catalog>);
        assert!(matches!(
            container.resolve_trait::<dyn Catalog>(),
            Err(GridError::DependencyNotFound { .. })
        ));
    }

    #[test]
    fn shared_instances_are_not_copied() {
        let shared = Arc::new(Settings { value: 1 });
        let mut container = Container::new();
        container.register_arc(Arc::clone(&shared));
        let resolved = container.resolve::<Settings>().unwrap();
        assert!(Arc::ptr_eq(&shared, &resolved));
    }
}
