//! Insertion-ordered store of live plugin instances.
//!
//! Registration order is semantically meaningful: it is the dispatch
//! order for hooks, hotkeys, and menu aggregation, so the store is a
//! vector with linear lookup rather than a hash map.

use std::sync::Arc;

use crate::descriptor::PluginDescriptor;
use crate::plugin::Plugin;

pub(crate) struct RegisteredPlugin {
    pub descriptor: PluginDescriptor,
    pub instance: Arc<dyn Plugin>,
}

#[derive(Default)]
pub(crate) struct PluginRegistry {
    plugins: Vec<RegisteredPlugin>,
}

impl PluginRegistry {
    /// Append a plugin. The caller has already reserved the name.
    pub fn insert(&mut self, descriptor: PluginDescriptor, instance: Arc<dyn Plugin>) {
        self.plugins.push(RegisteredPlugin { descriptor, instance });
    }

    /// Look up a plugin instance. Absence is not an error.
    pub fn get(&self, name: &str) -> Option<Arc<dyn Plugin>> {
        self.plugins
            .iter()
            .find(|p| p.descriptor.name == name)
            .map(|p| Arc::clone(&p.instance))
    }

    /// Plugin names in registration order.
    pub fn names(&self) -> Vec<String> {
        self.plugins.iter().map(|p| p.descriptor.name.clone()).collect()
    }

    /// `(name, instance)` pairs in registration order.
    pub fn instances(&self) -> Vec<(String, Arc<dyn Plugin>)> {
        self.plugins
            .iter()
            .map(|p| (p.descriptor.name.clone(), Arc::clone(&p.instance)))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.plugins.len()
    }

    pub fn clear(&mut self) {
        self.plugins.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::any::Any;

    struct Stub;

    #[async_trait]
    impl Plugin for Stub {
        fn as_any(&self) -> &dyn Any {
            self
        }
    }

    fn insert(registry: &mut PluginRegistry, name: &str) {
        registry.insert(PluginDescriptor::new(name), Arc::new(Stub));
    }

    #[test]
    fn test_insert_and_get() {
        let mut registry = PluginRegistry::default();
        insert(&mut registry, "history");

        assert!(registry.get("history").is_some());
        assert!(registry.get("rulers").is_none());
    }

    #[test]
    fn test_order_is_preserved() {
        let mut registry = PluginRegistry::default();
        insert(&mut registry, "p1");
        insert(&mut registry, "p2");
        insert(&mut registry, "p3");

        assert_eq!(registry.names(), vec!["p1", "p2", "p3"]);
        assert_eq!(registry.len(), 3);
    }

    #[test]
    fn test_clear() {
        let mut registry = PluginRegistry::default();
        insert(&mut registry, "p1");
        registry.clear();

        assert_eq!(registry.len(), 0);
        assert!(registry.get("p1").is_none());
    }
}
