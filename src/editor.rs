//! The engine: composition root and host facade.
//!
//! `Editor` owns the shared surface handle, drives registration, routes
//! hotkeys, aggregates context menus, and exposes the capability and
//! event surface plugins program against. It is cheap to clone; clones
//! share state.
//!
//! Execution is cooperative and single-writer: only `use_plugin` and
//! `destroy` mutate engine state, and both run to completion without
//! suspension. `fire` is the only suspending operation and iterates a
//! snapshot of the handler list, never holding the engine lock across an
//! await.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::descriptor::{HookKind, PluginDescriptor};
use crate::error::{EditorError, EditorResult};
use crate::events::{EventBus, Subscription};
use crate::hooks::{HookHandle, HookPipeline};
use crate::hotkeys::{HotkeyTable, KeyEvent};
use crate::menu::{self, MenuPresenter, Point};
use crate::namespace::NamespaceTables;
use crate::plugin::{Plugin, PluginContext};
use crate::registry::PluginRegistry;
use crate::surface::Surface;

#[derive(Default)]
struct EngineState {
    surface: Option<Arc<dyn Surface>>,
    presenter: Option<Arc<dyn MenuPresenter>>,
    registry: PluginRegistry,
    namespaces: NamespaceTables,
    hooks: Option<HookPipeline>,
    hotkeys: HotkeyTable,
    apis: HashMap<String, Arc<dyn Plugin>>,
}

struct EditorInner {
    state: RwLock<EngineState>,
    bus: EventBus,
}

/// The plugin engine and host facade.
#[derive(Clone)]
pub struct Editor {
    inner: Arc<EditorInner>,
}

impl std::fmt::Debug for Editor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.inner.state.read();
        f.debug_struct("Editor")
            .field("initialized", &state.surface.is_some())
            .field("plugins", &state.registry.len())
            .finish()
    }
}

impl Default for Editor {
    fn default() -> Self {
        Self::new()
    }
}

impl Editor {
    /// Create an engine with no surface attached.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(EditorInner {
                state: RwLock::new(EngineState::default()),
                bus: EventBus::new(),
            }),
        }
    }

    /// Attach the shared surface and create the empty hook-pipeline
    /// skeleton for all recognized kinds.
    ///
    /// Must run before any [`use_plugin`](Self::use_plugin) call; hooks
    /// only append to pre-existing per-kind lists.
    pub fn init(&self, surface: Arc<dyn Surface>) -> EditorResult<()> {
        let mut state = self.inner.state.write();
        if state.surface.is_some() {
            return Err(EditorError::AlreadyInitialized);
        }
        state.surface = Some(surface);
        state.hooks = Some(HookPipeline::skeleton());
        info!("engine initialized");
        Ok(())
    }

    /// Install the external collaborator that renders aggregated menus.
    pub fn install_menu_presenter(&self, presenter: Arc<dyn MenuPresenter>) {
        self.inner.state.write().presenter = Some(presenter);
    }

    /// Whether a surface is currently attached.
    pub fn is_initialized(&self) -> bool {
        self.inner.state.read().surface.is_some()
    }

    /// The attached surface, if any.
    pub fn surface(&self) -> Option<Arc<dyn Surface>> {
        self.inner.state.read().surface.clone()
    }

    /// Register a plugin: reserve names, construct the instance, then
    /// bind hooks, capabilities, and hotkeys.
    ///
    /// On any conflict the call aborts with the registration state
    /// unchanged and the factory never runs. Registration order is the
    /// dispatch order for every per-plugin operation.
    pub fn use_plugin<F>(
        &self,
        descriptor: PluginDescriptor,
        options: Value,
        factory: F,
    ) -> EditorResult<()>
    where
        F: FnOnce(PluginContext) -> Arc<dyn Plugin>,
    {
        descriptor.validate()?;

        let surface = {
            let mut state = self.inner.state.write();
            let surface = state.surface.clone().ok_or(EditorError::ResourceNotAttached)?;
            // The plugin name is claimed here along with its apis and
            // events, so a concurrent or factory-re-entrant registration
            // of the same name fails before its factory runs.
            if let Err(err) = state.namespaces.reserve(&descriptor) {
                warn!(plugin = %descriptor.name, %err, "rejected registration");
                return Err(err);
            }
            surface
        };

        // Construct outside the lock so the factory can use the facade.
        let context = PluginContext::new(surface, self.clone(), options);
        let instance = factory(context);

        let name = descriptor.name.clone();
        let mut state = self.inner.state.write();
        for kind in descriptor.unique_hooks() {
            if let Some(hooks) = state.hooks.as_mut() {
                hooks.bind(kind, &name, Arc::clone(&instance));
            }
        }
        for api in &descriptor.apis {
            state.apis.insert(api.clone(), Arc::clone(&instance));
        }
        for combination in &descriptor.hotkeys {
            state.hotkeys.bind(combination, &name, Arc::clone(&instance));
        }
        state.registry.insert(descriptor, instance);
        info!(plugin = %name, "registered plugin");
        Ok(())
    }

    /// Look up a registered plugin. Absence is not an error.
    pub fn get(&self, name: &str) -> Option<Arc<dyn Plugin>> {
        self.inner.state.read().registry.get(name)
    }

    /// Registered plugin names, in registration order.
    pub fn plugins(&self) -> Vec<String> {
        self.inner.state.read().registry.names()
    }

    /// Number of registered plugins.
    pub fn plugin_count(&self) -> usize {
        self.inner.state.read().registry.len()
    }

    /// Invoke a capability through the facade. Forwarding is transparent:
    /// the owning instance is the receiver and `args` pass through as-is.
    pub fn call(&self, api: &str, args: Vec<Value>) -> EditorResult<Value> {
        let instance = self
            .inner
            .state
            .read()
            .apis
            .get(api)
            .cloned()
            .ok_or_else(|| EditorError::UnknownApi { api: api.to_string() })?;
        instance.call(api, args)
    }

    /// Run the pipeline for a hook kind.
    ///
    /// Handlers run strictly sequentially in registration order, each
    /// awaited before the next starts. A failing handler aborts the
    /// remaining handlers of this invocation only; completed handlers
    /// keep their side effects. With zero handlers the payload resolves
    /// immediately. Resolves with the original payload.
    pub async fn fire(&self, kind: HookKind, payload: Value) -> EditorResult<Value> {
        let bindings = {
            let state = self.inner.state.read();
            if state.surface.is_none() {
                return Err(EditorError::ResourceNotAttached);
            }
            state.hooks.as_ref().map(|h| h.snapshot(kind)).unwrap_or_default()
        };

        debug!(kind = %kind, handlers = bindings.len(), "firing hook");
        for binding in &bindings {
            binding.invoke(kind, &payload).await?;
        }
        Ok(payload)
    }

    /// A driving handle for one hook kind, usable by any collaborator.
    pub fn hook(&self, kind: HookKind) -> HookHandle {
        HookHandle::new(kind, self.clone())
    }

    /// Handlers currently bound to a kind.
    pub fn hook_handler_count(&self, kind: HookKind) -> usize {
        self.inner
            .state
            .read()
            .hooks
            .as_ref()
            .map_or(0, |h| h.handler_count(kind))
    }

    /// Route a decoded key combination to every plugin bound to it, in
    /// registration order. Returns how many callbacks were invoked.
    pub fn dispatch_hotkey(&self, combination: &str, event: &KeyEvent) -> usize {
        let bindings = self.inner.state.read().hotkeys.snapshot(combination);
        for binding in &bindings {
            debug!(combination, plugin = %binding.plugin, "dispatching hotkey");
            binding.instance.on_hotkey(combination, event);
        }
        bindings.len()
    }

    /// Callbacks currently bound to a key combination.
    pub fn hotkey_binding_count(&self, combination: &str) -> usize {
        self.inner.state.read().hotkeys.binding_count(combination)
    }

    /// Handle a secondary-button trigger: poll plugins in registration
    /// order, merge contributions, and hand a non-empty result to the
    /// installed presenter with the trigger coordinates. Returns the
    /// merged entry count.
    pub fn open_context_menu(&self, at: Point) -> EditorResult<usize> {
        let (contributors, presenter) = {
            let state = self.inner.state.read();
            if state.surface.is_none() {
                return Err(EditorError::ResourceNotAttached);
            }
            (state.registry.instances(), state.presenter.clone())
        };

        let entries = menu::aggregate(&contributors);
        if entries.is_empty() {
            return Ok(0);
        }

        let count = entries.len();
        match presenter {
            Some(presenter) => presenter.present(entries, at),
            None => debug!(entries = count, "no menu presenter installed"),
        }
        Ok(count)
    }

    /// Subscribe to an event on the shared bus.
    pub fn on(
        &self,
        event: impl Into<String>,
        callback: impl Fn(&Value) + Send + Sync + 'static,
    ) -> Subscription {
        self.inner.bus.on(event, callback)
    }

    /// Remove an event subscription.
    pub fn off(&self, subscription: &Subscription) {
        self.inner.bus.off(subscription);
    }

    /// Emit an event to all subscribers.
    pub fn emit(&self, event: &str, payload: &Value) {
        self.inner.bus.emit(event, payload);
    }

    /// Tear the engine down: clear the registry, both namespace tables,
    /// every per-kind handler list, the hotkey and capability tables, and
    /// release the surface and presenter.
    ///
    /// Teardown is atomic and unordered; plugins are not asked to release
    /// resources in reverse-registration order. A previously used name
    /// registers successfully afterwards.
    pub fn destroy(&self) {
        {
            let mut state = self.inner.state.write();
            state.registry.clear();
            state.namespaces.clear();
            state.hooks = None;
            state.hotkeys.clear();
            state.apis.clear();
            state.surface = None;
            state.presenter = None;
        }
        self.inner.bus.clear();
        info!("engine destroyed");
    }
}
