//! Hotkey routing from key-combination strings to plugin callbacks.
//!
//! Unlike capabilities and events, key combinations are not namespaced:
//! several plugins may bind the same combination and every bound callback
//! fires, independently, in registration order. The engine does not
//! capture keys itself; the embedding application decodes raw input into
//! combination strings and calls
//! [`Editor::dispatch_hotkey`](crate::Editor::dispatch_hotkey).

use std::collections::HashMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::plugin::Plugin;

/// Whether the key event is a press or a release.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyTransition {
    /// Key pressed down.
    Down,
    /// Key released.
    Up,
}

/// A low-level key event as reported by the embedding key-capture layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyEvent {
    /// Press or release.
    pub transition: KeyTransition,
    /// Whether this is an auto-repeat of a held key.
    pub repeat: bool,
}

impl KeyEvent {
    /// A key-down event.
    pub fn down() -> Self {
        Self { transition: KeyTransition::Down, repeat: false }
    }

    /// A key-up event.
    pub fn up() -> Self {
        Self { transition: KeyTransition::Up, repeat: false }
    }

    /// Whether this event is a key press.
    pub fn is_down(&self) -> bool {
        self.transition == KeyTransition::Down
    }
}

#[derive(Clone)]
pub(crate) struct HotkeyBinding {
    pub plugin: String,
    pub instance: Arc<dyn Plugin>,
}

/// Table from key-combination string to the callbacks bound to it.
#[derive(Default)]
pub(crate) struct HotkeyTable {
    bindings: HashMap<String, Vec<HotkeyBinding>>,
}

impl HotkeyTable {
    /// Append a binding for a combination. Many plugins may share one.
    pub fn bind(&mut self, combination: &str, plugin: &str, instance: Arc<dyn Plugin>) {
        self.bindings
            .entry(combination.to_string())
            .or_default()
            .push(HotkeyBinding { plugin: plugin.to_string(), instance });
    }

    /// Clone the binding list for a combination, dispatch order preserved.
    pub fn snapshot(&self, combination: &str) -> Vec<HotkeyBinding> {
        self.bindings.get(combination).cloned().unwrap_or_default()
    }

    /// Number of callbacks bound to a combination.
    pub fn binding_count(&self, combination: &str) -> usize {
        self.bindings.get(combination).map_or(0, Vec::len)
    }

    pub fn clear(&mut self) {
        self.bindings.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EditorResult;
    use async_trait::async_trait;
    use serde_json::Value;
    use std::any::Any;

    struct Silent;

    #[async_trait]
    impl Plugin for Silent {
        fn as_any(&self) -> &dyn Any {
            self
        }
    }

    #[test]
    fn test_shared_combination_keeps_order() {
        let mut table = HotkeyTable::default();
        table.bind("ctrl+z", "history", Arc::new(Silent));
        table.bind("ctrl+z", "layers", Arc::new(Silent));

        let bindings = table.snapshot("ctrl+z");
        assert_eq!(bindings.len(), 2);
        assert_eq!(bindings[0].plugin, "history");
        assert_eq!(bindings[1].plugin, "layers");
    }

    #[test]
    fn test_unbound_combination_is_empty() {
        let table = HotkeyTable::default();
        assert!(table.snapshot("ctrl+q").is_empty());
        assert_eq!(table.binding_count("ctrl+q"), 0);
    }

    #[test]
    fn test_default_on_hotkey_is_noop() {
        // Exercised for coverage of the trait default.
        let plugin = Silent;
        plugin.on_hotkey("space", &KeyEvent::down());
        let _: EditorResult<Value> = plugin.call("nothing", Vec::new());
    }
}
