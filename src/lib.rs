//! # Easel
//!
//! Plugin engine for a shared drawing surface.
//!
//! Easel lets independently authored feature modules ("plugins") attach
//! behavior to one shared mutable surface without knowing about each
//! other, with non-colliding naming, ordered asynchronous lifecycle
//! hooks, and a unified capability facade.
//!
//! ## Features
//!
//! - **Namespaced capabilities and events**: api and event names are
//!   globally unique, each in its own namespace, enforced at registration
//! - **Sequential async hook pipeline**: five fixed lifecycle kinds,
//!   handlers always run in registration order, failures propagate
//! - **Hotkey routing**: key combinations are deliberately shared; every
//!   bound plugin fires
//! - **Context-menu aggregation**: plugin contributions merged into one
//!   ordered menu model, rendering left to the embedder
//!
//! ## Quick Start
//!
//! ```ignore
//! let editor = Editor::new();
//! editor.init(Arc::new(MySurface::default()))?;
//!
//! let descriptor = PluginDescriptor::new("history")
//!     .with_api("undo")
//!     .with_hotkey("ctrl+z")
//!     .with_hook(HookKind::AfterImport);
//! editor.use_plugin(descriptor, Value::Null, |ctx| Arc::new(HistoryPlugin::new(ctx)))?;
//!
//! editor.fire(HookKind::AfterImport, document_json).await?;
//! editor.call("undo", vec![])?;
//! ```

#![forbid(unsafe_code)]
#![warn(clippy::all, clippy::pedantic)]
// Allow common patterns that are intentional in this codebase
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::return_self_not_must_use)]
#![allow(clippy::uninlined_format_args)]

pub mod descriptor;
pub mod editor;
pub mod error;
pub mod events;
pub mod hooks;
pub mod hotkeys;
pub mod menu;
mod namespace;
pub mod plugin;
mod registry;
pub mod surface;

pub use descriptor::{HookKind, PluginDescriptor};
pub use editor::Editor;
pub use error::{EditorError, EditorResult};
pub use events::{EventBus, Subscription};
pub use hooks::HookHandle;
pub use hotkeys::{KeyEvent, KeyTransition};
pub use menu::{MenuAction, MenuEntry, MenuItem, MenuPresenter, Point};
pub use plugin::{Plugin, PluginContext};
pub use surface::Surface;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
