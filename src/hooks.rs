//! The sequential async lifecycle-hook pipeline.
//!
//! Each recognized [`HookKind`] owns an ordered handler list, created
//! empty at `init` and appended to at registration. `fire` invokes the
//! handlers strictly one at a time in registration order, awaiting each
//! before the next starts; a failing handler short-circuits the rest of
//! that invocation and the failure propagates to the caller. Handlers
//! that already completed keep their side effects.
//!
//! Registering a plugin from inside an active `fire` of the same kind is
//! unsupported; the pipeline iterates a snapshot taken when `fire`
//! starts, so the visible order in that case is undefined.

use std::collections::HashMap;
use std::sync::Arc;

use serde_json::Value;

use crate::descriptor::HookKind;
use crate::editor::Editor;
use crate::error::{EditorError, EditorResult};
use crate::plugin::Plugin;

/// One bound handler: the owning plugin and its instance.
#[derive(Clone)]
pub(crate) struct HookBinding {
    pub plugin: String,
    pub instance: Arc<dyn Plugin>,
}

impl HookBinding {
    /// Invoke the instance method matching the kind, wrapping any error
    /// with the owning plugin and kind.
    pub async fn invoke(&self, kind: HookKind, payload: &Value) -> EditorResult<()> {
        let result = match kind {
            HookKind::BeforeImport => self.instance.before_import(payload).await,
            HookKind::AfterImport => self.instance.after_import(payload).await,
            HookKind::BeforeSave => self.instance.before_save(payload).await,
            HookKind::AfterSave => self.instance.after_save(payload).await,
            HookKind::Transform => self.instance.transform(payload).await,
        };

        result.map_err(|source| EditorError::HandlerFailure {
            plugin: self.plugin.clone(),
            kind,
            source: Box::new(source),
        })
    }
}

/// Per-kind ordered handler lists. The kind set is fixed when the
/// skeleton is created; only the lists grow.
pub(crate) struct HookPipeline {
    handlers: HashMap<HookKind, Vec<HookBinding>>,
}

impl HookPipeline {
    /// Empty handler list for every recognized kind.
    pub fn skeleton() -> Self {
        let mut handlers = HashMap::new();
        for kind in HookKind::ALL {
            handlers.insert(kind, Vec::new());
        }
        Self { handlers }
    }

    /// Append a handler for a kind, tagged with the owning plugin.
    pub fn bind(&mut self, kind: HookKind, plugin: &str, instance: Arc<dyn Plugin>) {
        if let Some(list) = self.handlers.get_mut(&kind) {
            list.push(HookBinding { plugin: plugin.to_string(), instance });
        }
    }

    /// Clone a kind's handler list for iteration outside the engine lock.
    pub fn snapshot(&self, kind: HookKind) -> Vec<HookBinding> {
        self.handlers.get(&kind).cloned().unwrap_or_default()
    }

    /// Number of handlers bound to a kind.
    pub fn handler_count(&self, kind: HookKind) -> usize {
        self.handlers.get(&kind).map_or(0, Vec::len)
    }
}

/// Per-kind driving handle so any collaborator, not just the engine, can
/// run a kind's pipeline.
///
/// Obtained from [`Editor::hook`]; `fire` behaves exactly like
/// [`Editor::fire`] with the handle's kind.
#[derive(Clone)]
pub struct HookHandle {
    kind: HookKind,
    editor: Editor,
}

impl HookHandle {
    pub(crate) fn new(kind: HookKind, editor: Editor) -> Self {
        Self { kind, editor }
    }

    /// The kind this handle drives.
    pub fn kind(&self) -> HookKind {
        self.kind
    }

    /// Run the pipeline for this handle's kind.
    pub async fn fire(&self, payload: Value) -> EditorResult<Value> {
        self.editor.fire(self.kind, payload).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::any::Any;

    struct Rejecting;

    #[async_trait]
    impl Plugin for Rejecting {
        async fn before_save(&self, _payload: &Value) -> EditorResult<()> {
            Err(EditorError::PluginFault("disk full".into()))
        }

        fn as_any(&self) -> &dyn Any {
            self
        }
    }

    #[test]
    fn test_skeleton_covers_all_kinds() {
        let pipeline = HookPipeline::skeleton();
        for kind in HookKind::ALL {
            assert_eq!(pipeline.handler_count(kind), 0);
            assert!(pipeline.snapshot(kind).is_empty());
        }
    }

    #[test]
    fn test_bind_appends_in_order() {
        let mut pipeline = HookPipeline::skeleton();
        pipeline.bind(HookKind::Transform, "p1", Arc::new(Rejecting));
        pipeline.bind(HookKind::Transform, "p2", Arc::new(Rejecting));

        let snapshot = pipeline.snapshot(HookKind::Transform);
        assert_eq!(snapshot.len(), 2);
        assert_eq!(snapshot[0].plugin, "p1");
        assert_eq!(snapshot[1].plugin, "p2");
        assert_eq!(pipeline.handler_count(HookKind::BeforeSave), 0);
    }

    #[tokio::test]
    async fn test_invoke_wraps_failure_with_plugin_and_kind() {
        let binding = HookBinding { plugin: "backup".into(), instance: Arc::new(Rejecting) };

        let err = binding.invoke(HookKind::BeforeSave, &Value::Null).await.unwrap_err();
        match err {
            EditorError::HandlerFailure { plugin, kind, source } => {
                assert_eq!(plugin, "backup");
                assert_eq!(kind, HookKind::BeforeSave);
                assert!(matches!(*source, EditorError::PluginFault(_)));
            }
            other => panic!("expected HandlerFailure, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_invoke_dispatches_by_kind() {
        // Rejecting only fails before_save; every other kind hits the
        // no-op default.
        let binding = HookBinding { plugin: "backup".into(), instance: Arc::new(Rejecting) };

        assert!(binding.invoke(HookKind::BeforeImport, &Value::Null).await.is_ok());
        assert!(binding.invoke(HookKind::BeforeSave, &Value::Null).await.is_err());
    }
}
