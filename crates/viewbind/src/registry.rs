//! Static dispatch table wiring generated binders to the resolver.
//!
//! Generated units register themselves at link time through a `linkme`
//! distributed slice, so resolution never loads types by name at run time.
//! Tests and embedders can also populate a [`BinderRegistry`] manually.

use std::collections::{HashMap, HashSet};

use crate::binder::Binder;

/// Constructor for a registered binder. Binders are stateless unit structs,
/// so construction cannot fail.
pub type BinderCtor = fn() -> Box<dyn Binder>;

/// One generated binder's entry in the dispatch table.
pub struct BinderRegistration {
    /// Fully qualified path of the target type the binder was generated for.
    pub type_path: &'static str,
    /// Constructs a fresh binder instance.
    pub construct: BinderCtor,
}

/// Distributed slice collecting every generated binder in the final binary.
#[linkme::distributed_slice]
pub static BINDERS: [BinderRegistration];

/// Register a binder for a target type path.
///
/// Emitted at the end of every generated unit:
///
/// ```rust,ignore
/// viewbind::register_binder!("myapp::screens::MainScreen", screens_MainScreenBinder);
/// ```
#[macro_export]
macro_rules! register_binder {
    ($type_path:expr, $binder:ty) => {
        const _: () = {
            #[$crate::linkme::distributed_slice($crate::registry::BINDERS)]
            #[linkme(crate = $crate::linkme)]
            static REGISTRATION: $crate::registry::BinderRegistration =
                $crate::registry::BinderRegistration {
                    type_path: $type_path,
                    construct: || Box::new(<$binder>::default()),
                };
        };
    };
}

/// Lookup table from target type path to binder constructor.
#[derive(Default)]
pub struct BinderRegistry {
    entries: HashMap<&'static str, BinderCtor>,
    duplicates: HashSet<&'static str>,
}

impl BinderRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the registry from the distributed slice.
    pub fn from_inventory() -> Self {
        let mut registry = Self::new();
        for registration in BINDERS {
            registry.register(registration.type_path, registration.construct);
        }
        registry
    }

    /// Register a constructor for a type path. A second registration for the
    /// same path marks the path ambiguous; lookups for it then fail at
    /// resolution time rather than picking an arbitrary winner.
    pub fn register(&mut self, type_path: &'static str, construct: BinderCtor) {
        if self.entries.insert(type_path, construct).is_some() {
            self.duplicates.insert(type_path);
        }
    }

    /// The constructor registered for a type path, if unambiguous.
    pub fn constructor(&self, type_path: &str) -> Option<BinderCtor> {
        self.entries.get(type_path).copied()
    }

    /// Whether conflicting registrations exist for this path.
    pub fn is_ambiguous(&self, type_path: &str) -> bool {
        self.duplicates.contains(type_path)
    }

    /// Number of registered type paths.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
