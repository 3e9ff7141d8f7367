//! Capability registry mapping element type paths to what they can do.
//!
//! The registry is how the generator decides, by contract rather than by type
//! hierarchy inspection, whether a declared field type is bindable at all and
//! whether it may carry an item-selection binding.

use std::collections::HashMap;

/// What a registered element type supports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Capability {
    /// The type is an element and may appear inside `Option<Shared<T>>`.
    pub element: bool,
    /// The type reports item selection, so `item_click` bindings are honored.
    pub adapter: bool,
}

impl Capability {
    pub const ELEMENT: Capability = Capability {
        element: true,
        adapter: false,
    };

    pub const ADAPTER: Capability = Capability {
        element: true,
        adapter: true,
    };
}

/// A registry of fully qualified element type path -> [`Capability`]
/// associations.
///
/// Ships with built-in entries for the runtime's own handle forms (via
/// [`CapabilityRegistry::with_builtins`]):
///
/// | Type path | element | adapter |
/// |-----------|---------|---------|
/// | `viewbind::ElementHandle` | yes | yes |
/// | `viewbind::Element` | yes | no |
///
/// The type-erased handle keeps the adapter capability because its
/// item-selection attachment dispatches dynamically; the interface form does
/// not, so `item_click` on it downgrades at generation time.
#[derive(Debug, Clone)]
pub struct CapabilityRegistry {
    mappings: HashMap<String, Capability>,
}

impl CapabilityRegistry {
    /// Create an empty registry with no mappings.
    pub fn new() -> Self {
        Self {
            mappings: HashMap::new(),
        }
    }

    /// Create a registry pre-populated with the runtime's handle forms.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        registry.register("viewbind::ElementHandle", Capability::ADAPTER);
        registry.register("viewbind::Element", Capability::ELEMENT);
        registry
    }

    /// Register a capability for a fully qualified type path, replacing any
    /// existing entry.
    pub fn register(&mut self, path: impl Into<String>, capability: Capability) {
        self.mappings.insert(path.into(), capability);
    }

    /// Look up the capability for a fully qualified type path.
    pub fn get(&self, path: &str) -> Option<Capability> {
        self.mappings.get(path).copied()
    }

    /// Check if a type path is registered at all.
    pub fn contains(&self, path: &str) -> bool {
        self.mappings.contains_key(path)
    }

    /// Whether the path names an element type.
    pub fn is_element(&self, path: &str) -> bool {
        self.get(path).is_some_and(|c| c.element)
    }

    /// Whether the path names an adapter-capable element type.
    pub fn is_adapter(&self, path: &str) -> bool {
        self.get(path).is_some_and(|c| c.adapter)
    }

    /// Remove a mapping.
    pub fn unregister(&mut self, path: &str) -> Option<Capability> {
        self.mappings.remove(path)
    }
}

impl Default for CapabilityRegistry {
    fn default() -> Self {
        Self::with_builtins()
    }
}
