//! Default backend wiring.

use std::sync::Arc;

use qbridge_adapter_cloud::CloudAdapter;
use qbridge_adapter_statevec::StatevectorAdapter;
use qbridge_adapter_tableau::TableauAdapter;
use qbridge_adapter_unitary::UnitaryAdapter;
use qbridge_hal::BackendRegistry;

/// Build a registry with every built-in backend registered.
///
/// The cloud adapter reads its endpoint and credentials from the
/// environment and registers as unavailable when no token is set; it still
/// appears in discovery so callers can see it exists.
pub fn default_registry() -> BackendRegistry {
    let mut registry = BackendRegistry::new();
    registry.register(Arc::new(StatevectorAdapter::new()));
    registry.register(Arc::new(TableauAdapter::new()));
    registry.register(Arc::new(UnitaryAdapter::new()));
    registry.register(Arc::new(CloudAdapter::from_env()));
    registry
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_registry_contents() {
        let registry = default_registry();
        assert_eq!(
            registry.names(),
            vec!["cloud", "statevector", "tableau", "unitary"]
        );
    }

    #[test]
    fn test_simulators_available() {
        let registry = default_registry();
        for name in ["statevector", "tableau", "unitary"] {
            assert!(registry.get(name).unwrap().is_available(), "{name}");
        }
    }
}
