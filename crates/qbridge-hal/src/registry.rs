//! Backend registry.
//!
//! The [`BackendRegistry`] is the single discovery point for adapters.
//! Backends must be registered explicitly; nothing is wired up by global
//! state or import side effects.

use std::sync::Arc;

use rustc_hash::FxHashMap;
use tracing::debug;

use crate::adapter::Adapter;
use crate::error::{HalError, HalResult};
use crate::result::BackendDescriptor;

/// Central registry mapping backend names to adapters.
#[derive(Default)]
pub struct BackendRegistry {
    adapters: FxHashMap<String, Arc<dyn Adapter>>,
}

impl BackendRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self {
            adapters: FxHashMap::default(),
        }
    }

    /// Register an adapter under its own name.
    ///
    /// Re-registering a name replaces the previous adapter.
    pub fn register(&mut self, adapter: Arc<dyn Adapter>) {
        debug!(backend = adapter.name(), "registering backend");
        self.adapters.insert(adapter.name().to_string(), adapter);
    }

    /// Look up an adapter by name.
    pub fn get(&self, name: &str) -> HalResult<Arc<dyn Adapter>> {
        self.adapters
            .get(name)
            .cloned()
            .ok_or_else(|| HalError::UnknownBackend(name.to_string()))
    }

    /// Whether a backend is registered under this name.
    pub fn contains(&self, name: &str) -> bool {
        self.adapters.contains_key(name)
    }

    /// Sorted names of all registered backends.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<_> = self.adapters.keys().cloned().collect();
        names.sort();
        names
    }

    /// Sorted names of the backends currently reporting available.
    pub fn available_names(&self) -> Vec<String> {
        let mut names: Vec<_> = self
            .adapters
            .values()
            .filter(|a| a.is_available())
            .map(|a| a.name().to_string())
            .collect();
        names.sort();
        names
    }

    /// Descriptors for all registered backends, sorted by name.
    pub fn descriptors(&self) -> Vec<BackendDescriptor> {
        let mut descriptors: Vec<_> = self.adapters.values().map(|a| a.descriptor()).collect();
        descriptors.sort_by(|a, b| a.name.cmp(&b.name));
        descriptors
    }

    /// Number of registered backends.
    pub fn len(&self) -> usize {
        self.adapters.len()
    }

    /// Whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.adapters.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::result::Counts;
    use async_trait::async_trait;
    use qbridge_ir::Circuit;

    struct NamedAdapter(&'static str);

    #[async_trait]
    impl Adapter for NamedAdapter {
        fn name(&self) -> &str {
            self.0
        }

        fn description(&self) -> &str {
            "test adapter"
        }

        fn max_qubits(&self) -> u32 {
            8
        }

        fn is_available(&self) -> bool {
            true
        }

        async fn run(&self, _circuit: &Circuit, _shots: u64) -> HalResult<Counts> {
            Ok(Counts::new())
        }
    }

    #[test]
    fn test_empty_registry() {
        let registry = BackendRegistry::new();
        assert!(registry.is_empty());
        assert!(!registry.contains("statevector"));
        assert!(matches!(
            registry.get("statevector"),
            Err(HalError::UnknownBackend(_))
        ));
    }

    #[test]
    fn test_register_and_get() {
        let mut registry = BackendRegistry::new();
        registry.register(Arc::new(NamedAdapter("statevector")));

        assert!(registry.contains("statevector"));
        assert_eq!(registry.get("statevector").unwrap().name(), "statevector");
    }

    struct OfflineAdapter;

    #[async_trait]
    impl Adapter for OfflineAdapter {
        fn name(&self) -> &str {
            "offline"
        }

        fn description(&self) -> &str {
            "never available"
        }

        fn max_qubits(&self) -> u32 {
            8
        }

        fn is_available(&self) -> bool {
            false
        }

        async fn run(&self, _circuit: &Circuit, _shots: u64) -> HalResult<Counts> {
            Ok(Counts::new())
        }
    }

    #[test]
    fn test_available_names_filters_offline() {
        let mut registry = BackendRegistry::new();
        registry.register(Arc::new(NamedAdapter("statevector")));
        registry.register(Arc::new(OfflineAdapter));

        assert_eq!(registry.names(), vec!["offline", "statevector"]);
        assert_eq!(registry.available_names(), vec!["statevector"]);
    }

    #[test]
    fn test_names_sorted() {
        let mut registry = BackendRegistry::new();
        registry.register(Arc::new(NamedAdapter("zeta")));
        registry.register(Arc::new(NamedAdapter("alpha")));

        assert_eq!(registry.names(), vec!["alpha", "zeta"]);
        let descriptors = registry.descriptors();
        assert_eq!(descriptors[0].name, "alpha");
        assert_eq!(descriptors[1].name, "zeta");
    }
}
