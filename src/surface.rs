//! The shared drawing surface handle.

use std::any::Any;

/// The single shared mutable resource all plugins attach behavior to.
///
/// The engine treats the surface as opaque: geometry, drawing, zoom, and
/// serialization belong to the embedding application. Plugins that need
/// the concrete type downcast through [`Surface::as_any`].
pub trait Surface: Send + Sync {
    /// Downcasting access to the concrete surface type.
    fn as_any(&self) -> &dyn Any;
}
