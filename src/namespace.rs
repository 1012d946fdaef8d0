//! Global name reservation for plugins, capabilities, and events.
//!
//! Plugin names form one namespace; capability names and event names each
//! live in their own. Reservation is all-or-nothing: a conflict anywhere
//! leaves every table untouched. Reserving the plugin name here, under the
//! same lock acquisition as the api and event names, is what makes the
//! uniqueness check atomic with the claim - the registry insert happens
//! later, after the factory has run. Tables shrink only at engine destroy.

use std::collections::{HashMap, HashSet};

use crate::descriptor::PluginDescriptor;
use crate::error::{EditorError, EditorResult};

/// Reserved plugin, capability, and event names; capability and event
/// entries map to the holding plugin.
#[derive(Default)]
pub(crate) struct NamespaceTables {
    names: HashSet<String>,
    apis: HashMap<String, String>,
    events: HashMap<String, String>,
}

impl NamespaceTables {
    /// Reserve the plugin name and every api and event name the
    /// descriptor declares.
    ///
    /// Checks run before any mutation, in order: duplicate plugin name,
    /// api collisions, event collisions. The first collision aborts with
    /// the offending name and its current holder.
    pub fn reserve(&mut self, descriptor: &PluginDescriptor) -> EditorResult<()> {
        if self.names.contains(&descriptor.name) {
            return Err(EditorError::DuplicatePlugin { name: descriptor.name.clone() });
        }

        for api in &descriptor.apis {
            if let Some(held_by) = self.apis.get(api) {
                return Err(EditorError::ApiCollision {
                    plugin: descriptor.name.clone(),
                    api: api.clone(),
                    held_by: held_by.clone(),
                });
            }
        }

        for event in &descriptor.events {
            if let Some(held_by) = self.events.get(event) {
                return Err(EditorError::EventCollision {
                    plugin: descriptor.name.clone(),
                    event: event.clone(),
                    held_by: held_by.clone(),
                });
            }
        }

        self.names.insert(descriptor.name.clone());
        for api in &descriptor.apis {
            self.apis.insert(api.clone(), descriptor.name.clone());
        }
        for event in &descriptor.events {
            self.events.insert(event.clone(), descriptor.name.clone());
        }

        Ok(())
    }

    /// The plugin currently holding a capability name, if any.
    pub fn api_holder(&self, api: &str) -> Option<&str> {
        self.apis.get(api).map(String::as_str)
    }

    /// The plugin currently holding an event name, if any.
    pub fn event_holder(&self, event: &str) -> Option<&str> {
        self.events.get(event).map(String::as_str)
    }

    pub fn clear(&mut self) {
        self.names.clear();
        self.apis.clear();
        self.events.clear();
    }
}
