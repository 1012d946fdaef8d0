//! Context-menu model and aggregation.
//!
//! On a secondary-button trigger the engine polls every plugin for menu
//! contributions and merges them, in registration order, into one flat
//! entry list. Rendering belongs to an external [`MenuPresenter`]; the
//! engine performs pure composition and knows nothing about entry
//! semantics beyond their shape.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::plugin::Plugin;

/// Trigger coordinates within the surface's interactive area.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Callback invoked when a leaf menu item is selected.
pub type MenuAction = Arc<dyn Fn() + Send + Sync>;

/// A leaf context-menu item.
#[derive(Clone)]
pub struct MenuItem {
    /// Displayed label.
    pub label: String,
    /// Optional hotkey hint text shown next to the label.
    pub hotkey_hint: Option<String>,
    /// Whether the item is shown but not selectable.
    pub disabled: bool,
    /// Selection callback.
    pub on_select: MenuAction,
}

impl MenuItem {
    /// Create an enabled item with the given label and callback.
    pub fn new(label: impl Into<String>, on_select: impl Fn() + Send + Sync + 'static) -> Self {
        Self {
            label: label.into(),
            hotkey_hint: None,
            disabled: false,
            on_select: Arc::new(on_select),
        }
    }

    /// Attach a hotkey hint.
    pub fn with_hotkey_hint(mut self, hint: impl Into<String>) -> Self {
        self.hotkey_hint = Some(hint.into());
        self
    }

    /// Mark the item disabled.
    pub fn disabled(mut self) -> Self {
        self.disabled = true;
        self
    }
}

impl fmt::Debug for MenuItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MenuItem")
            .field("label", &self.label)
            .field("hotkey_hint", &self.hotkey_hint)
            .field("disabled", &self.disabled)
            .finish()
    }
}

/// One entry in a plugin's context-menu contribution.
#[derive(Clone)]
pub enum MenuEntry {
    /// A section divider.
    Separator,
    /// A selectable leaf item.
    Item(MenuItem),
    /// A nested submenu.
    Submenu {
        label: String,
        entries: Vec<MenuEntry>,
    },
}

impl MenuEntry {
    /// Convenience constructor for a leaf item.
    pub fn item(label: impl Into<String>, on_select: impl Fn() + Send + Sync + 'static) -> Self {
        Self::Item(MenuItem::new(label, on_select))
    }

    /// The label of this entry, if it has one.
    pub fn label(&self) -> Option<&str> {
        match self {
            Self::Separator => None,
            Self::Item(item) => Some(&item.label),
            Self::Submenu { label, .. } => Some(label),
        }
    }
}

impl fmt::Debug for MenuEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Separator => f.write_str("Separator"),
            Self::Item(item) => f.debug_tuple("Item").field(item).finish(),
            Self::Submenu { label, entries } => f
                .debug_struct("Submenu")
                .field("label", label)
                .field("entries", entries)
                .finish(),
        }
    }
}

/// External collaborator that renders the merged menu.
pub trait MenuPresenter: Send + Sync {
    /// Display the merged entries at the trigger coordinates.
    fn present(&self, entries: Vec<MenuEntry>, at: Point);
}

/// Poll contributors in order and concatenate their non-empty
/// contributions into one flat list.
pub(crate) fn aggregate(contributors: &[(String, Arc<dyn Plugin>)]) -> Vec<MenuEntry> {
    let mut merged = Vec::new();
    for (name, instance) in contributors {
        match instance.context_menu() {
            Some(entries) if !entries.is_empty() => {
                debug!(plugin = %name, entries = entries.len(), "menu contribution");
                merged.extend(entries);
            }
            _ => {}
        }
    }
    merged
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::any::Any;

    struct Contributes(Vec<&'static str>);

    #[async_trait]
    impl Plugin for Contributes {
        fn context_menu(&self) -> Option<Vec<MenuEntry>> {
            if self.0.is_empty() {
                return Some(Vec::new());
            }
            Some(self.0.iter().map(|label| MenuEntry::item(*label, || {})).collect())
        }

        fn as_any(&self) -> &dyn Any {
            self
        }
    }

    struct Abstains;

    #[async_trait]
    impl Plugin for Abstains {
        fn as_any(&self) -> &dyn Any {
            self
        }
    }

    #[test]
    fn test_aggregation_skips_empty_and_none() {
        let contributors: Vec<(String, Arc<dyn Plugin>)> = vec![
            ("silent".into(), Arc::new(Abstains)),
            ("copy".into(), Arc::new(Contributes(vec!["Copy"]))),
            ("empty".into(), Arc::new(Contributes(vec![]))),
        ];

        let merged = aggregate(&contributors);
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].label(), Some("Copy"));
    }

    #[test]
    fn test_aggregation_preserves_registration_order() {
        let contributors: Vec<(String, Arc<dyn Plugin>)> = vec![
            ("a".into(), Arc::new(Contributes(vec!["A1", "A2"]))),
            ("b".into(), Arc::new(Contributes(vec!["B1"]))),
        ];

        let labels: Vec<_> =
            aggregate(&contributors).iter().filter_map(MenuEntry::label).map(String::from).collect();
        assert_eq!(labels, vec!["A1", "A2", "B1"]);
    }

    #[test]
    fn test_item_builder() {
        let item = MenuItem::new("Flip X", || {}).with_hotkey_hint("|").disabled();
        assert_eq!(item.label, "Flip X");
        assert_eq!(item.hotkey_hint.as_deref(), Some("|"));
        assert!(item.disabled);
    }

    #[test]
    fn test_submenu_shape() {
        let entry = MenuEntry::Submenu {
            label: "Flip".into(),
            entries: vec![
                MenuEntry::Separator,
                MenuEntry::item("Flip X", || {}),
                MenuEntry::item("Flip Y", || {}),
            ],
        };

        match entry {
            MenuEntry::Submenu { label, entries } => {
                assert_eq!(label, "Flip");
                assert_eq!(entries.len(), 3);
            }
            other => panic!("expected submenu, got {other:?}"),
        }
    }
}
