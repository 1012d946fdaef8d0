//! Plugin descriptors and the fixed set of lifecycle hook kinds.
//!
//! A descriptor is the explicit, immutable contract a plugin hands to
//! [`Editor::use_plugin`](crate::Editor::use_plugin). The engine never
//! inspects the plugin instance for metadata; everything it needs to
//! allocate namespaces and bind dispatch tables is declared here.

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{EditorError, EditorResult};

/// The lifecycle extension points plugins can hook into.
///
/// The set is fixed at engine init and is not extensible at runtime.
/// `Transform` is applied by the import collaborator to every node of an
/// imported document tree; the pipeline itself is agnostic about payload
/// shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HookKind {
    /// Before a document import begins.
    BeforeImport,
    /// After a document import completes.
    AfterImport,
    /// Before the surface is serialized for saving.
    BeforeSave,
    /// After the surface has been serialized.
    AfterSave,
    /// Per-node transform during import.
    Transform,
}

impl HookKind {
    /// All recognized kinds, in skeleton-creation order.
    pub const ALL: [Self; 5] = [
        Self::BeforeImport,
        Self::AfterImport,
        Self::BeforeSave,
        Self::AfterSave,
        Self::Transform,
    ];

    /// Stable snake_case name, matching the serde representation.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::BeforeImport => "before_import",
            Self::AfterImport => "after_import",
            Self::BeforeSave => "before_save",
            Self::AfterSave => "after_save",
            Self::Transform => "transform",
        }
    }
}

impl fmt::Display for HookKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The contract a plugin presents at registration.
///
/// `apis` and `events` are reserved globally (each in its own namespace);
/// `hotkeys` are deliberately not namespaced and may be shared across
/// plugins. `hooks` declares which lifecycle kinds the instance handles.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PluginDescriptor {
    /// Globally unique plugin name.
    pub name: String,

    /// Capability names exposed through the host facade.
    #[serde(default)]
    pub apis: Vec<String>,

    /// Event names this plugin may emit on the event bus.
    #[serde(default)]
    pub events: Vec<String>,

    /// Key-combination strings routed to the plugin's hotkey callback.
    #[serde(default)]
    pub hotkeys: Vec<String>,

    /// Lifecycle hook kinds the plugin handles.
    #[serde(default)]
    pub hooks: Vec<HookKind>,
}

impl PluginDescriptor {
    /// Create a descriptor with the given plugin name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            apis: Vec::new(),
            events: Vec::new(),
            hotkeys: Vec::new(),
            hooks: Vec::new(),
        }
    }

    /// Declare a capability name.
    pub fn with_api(mut self, api: impl Into<String>) -> Self {
        self.apis.push(api.into());
        self
    }

    /// Declare an event name.
    pub fn with_event(mut self, event: impl Into<String>) -> Self {
        self.events.push(event.into());
        self
    }

    /// Declare a hotkey combination.
    pub fn with_hotkey(mut self, combination: impl Into<String>) -> Self {
        self.hotkeys.push(combination.into());
        self
    }

    /// Declare a handled lifecycle hook kind.
    pub fn with_hook(mut self, kind: HookKind) -> Self {
        self.hooks.push(kind);
        self
    }

    /// Check the descriptor for self-consistency: non-empty name, no
    /// duplicate api or event names within this descriptor.
    pub(crate) fn validate(&self) -> EditorResult<()> {
        if self.name.trim().is_empty() {
            return Err(EditorError::EmptyPluginName);
        }

        let mut seen = HashSet::new();
        for api in &self.apis {
            if !seen.insert(api.as_str()) {
                return Err(EditorError::DuplicateInDescriptor {
                    plugin: self.name.clone(),
                    name: api.clone(),
                });
            }
        }

        seen.clear();
        for event in &self.events {
            if !seen.insert(event.as_str()) {
                return Err(EditorError::DuplicateInDescriptor {
                    plugin: self.name.clone(),
                    name: event.clone(),
                });
            }
        }

        Ok(())
    }

    /// Declared hook kinds with duplicates removed, declaration order
    /// preserved. A plugin contributes at most one handler per kind.
    pub(crate) fn unique_hooks(&self) -> Vec<HookKind> {
        let mut seen = HashSet::new();
        self.hooks.iter().copied().filter(|kind| seen.insert(*kind)).collect()
    }
}
