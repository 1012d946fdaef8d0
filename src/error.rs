//! Engine error types.

use thiserror::Error;

use crate::descriptor::HookKind;

/// Result type for engine operations.
pub type EditorResult<T> = Result<T, EditorError>;

/// Errors that can occur during engine operations.
#[derive(Debug, Error)]
pub enum EditorError {
    /// A plugin with this name is already registered.
    #[error("plugin '{name}' is already registered")]
    DuplicatePlugin { name: String },

    /// A declared capability name is already reserved by another plugin.
    #[error("plugin '{plugin}' declares api '{api}', already provided by '{held_by}'")]
    ApiCollision { plugin: String, api: String, held_by: String },

    /// A declared event name is already reserved by another plugin.
    #[error("plugin '{plugin}' declares event '{event}', already emitted by '{held_by}'")]
    EventCollision { plugin: String, event: String, held_by: String },

    /// The descriptor carries an empty plugin name.
    #[error("plugin name must not be empty")]
    EmptyPluginName,

    /// The descriptor declares the same api or event name twice.
    #[error("plugin '{plugin}' declares '{name}' more than once")]
    DuplicateInDescriptor { plugin: String, name: String },

    /// An operation requiring the shared surface ran before `init()`.
    #[error("no drawing surface attached; call Editor::init first")]
    ResourceNotAttached,

    /// `init()` was called on an engine that already holds a surface.
    #[error("engine is already initialized; call Editor::destroy first")]
    AlreadyInitialized,

    /// A lifecycle hook handler failed; remaining handlers of that
    /// invocation were skipped.
    #[error("hook {kind} handler of plugin '{plugin}' failed: {source}")]
    HandlerFailure {
        plugin: String,
        kind: HookKind,
        #[source]
        source: Box<EditorError>,
    },

    /// No registered plugin provides the requested capability.
    #[error("no plugin provides api '{api}'")]
    UnknownApi { api: String },

    /// A failure reported by plugin code itself.
    #[error("{0}")]
    PluginFault(String),
}

impl EditorError {
    /// Whether this error is a registration-time namespace conflict.
    pub fn is_registration_conflict(&self) -> bool {
        matches!(
            self,
            Self::DuplicatePlugin { .. }
                | Self::ApiCollision { .. }
                | Self::EventCollision { .. }
                | Self::EmptyPluginName
                | Self::DuplicateInDescriptor { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conflict_classification() {
        let err = EditorError::DuplicatePlugin { name: "history".into() };
        assert!(err.is_registration_conflict());

        let err = EditorError::ResourceNotAttached;
        assert!(!err.is_registration_conflict());
    }

    #[test]
    fn test_handler_failure_display() {
        let err = EditorError::HandlerFailure {
            plugin: "fonts".into(),
            kind: HookKind::BeforeImport,
            source: Box::new(EditorError::PluginFault("font fetch failed".into())),
        };

        let text = err.to_string();
        assert!(text.contains("fonts"));
        assert!(text.contains("before_import"));
    }
}
