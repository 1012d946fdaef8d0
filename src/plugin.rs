//! The contract every plugin implements, and the context it is built with.
//!
//! Plugins are independently authored feature modules that attach
//! behavior to the shared surface without knowing about each other. All
//! trait methods except [`Plugin::as_any`] have no-op defaults; a plugin
//! implements the subset it declared in its
//! [`PluginDescriptor`](crate::PluginDescriptor).

use std::any::Any;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use crate::editor::Editor;
use crate::error::{EditorError, EditorResult};
use crate::hotkeys::KeyEvent;
use crate::menu::MenuEntry;
use crate::surface::Surface;

/// What the engine hands a plugin factory at registration: the shared
/// surface, the host facade, and the embedder-supplied options.
pub struct PluginContext {
    surface: Arc<dyn Surface>,
    editor: Editor,
    options: Value,
}

impl PluginContext {
    pub(crate) fn new(surface: Arc<dyn Surface>, editor: Editor, options: Value) -> Self {
        Self { surface, editor, options }
    }

    /// The shared drawing surface.
    pub fn surface(&self) -> &Arc<dyn Surface> {
        &self.surface
    }

    /// The host facade: `get`, capability calls, the event bus, and
    /// per-kind hook handles.
    pub fn editor(&self) -> &Editor {
        &self.editor
    }

    /// All options supplied to `use_plugin`.
    pub fn options(&self) -> &Value {
        &self.options
    }

    /// A single option by key, if the options are an object.
    pub fn option(&self, key: &str) -> Option<&Value> {
        self.options.get(key)
    }
}

/// A live plugin instance.
///
/// Lifecycle hook methods run through the engine's sequential pipeline
/// for the kinds the descriptor declares; returning an error aborts the
/// remaining handlers of that invocation and surfaces to the `fire`
/// caller.
#[async_trait]
pub trait Plugin: Send + Sync {
    /// Runs before a document import begins.
    async fn before_import(&self, _payload: &Value) -> EditorResult<()> {
        Ok(())
    }

    /// Runs after a document import completes.
    async fn after_import(&self, _payload: &Value) -> EditorResult<()> {
        Ok(())
    }

    /// Runs before the surface is serialized for saving.
    async fn before_save(&self, _payload: &Value) -> EditorResult<()> {
        Ok(())
    }

    /// Runs after the surface has been serialized.
    async fn after_save(&self, _payload: &Value) -> EditorResult<()> {
        Ok(())
    }

    /// Runs for every node of an imported document tree.
    async fn transform(&self, _payload: &Value) -> EditorResult<()> {
        Ok(())
    }

    /// Capability dispatch. The engine forwards facade calls for each api
    /// name declared in the descriptor; the instance is the receiver, so
    /// private state stays reachable. Arity is whatever `args` carries.
    fn call(&self, api: &str, _args: Vec<Value>) -> EditorResult<Value> {
        Err(EditorError::UnknownApi { api: api.to_string() })
    }

    /// Hotkey callback, invoked with the combination string and the
    /// originating key event for every declared combination.
    fn on_hotkey(&self, _combination: &str, _event: &KeyEvent) {}

    /// Context-menu contribution. `None` means no contribution.
    fn context_menu(&self) -> Option<Vec<MenuEntry>> {
        None
    }

    /// Optional teardown. The engine does not call this itself; the
    /// collaborator that manages the surface lifecycle may, before
    /// `Editor::destroy`.
    fn destroy(&self) {}

    /// Downcasting access for embedders that know the concrete type.
    fn as_any(&self) -> &dyn Any;
}
