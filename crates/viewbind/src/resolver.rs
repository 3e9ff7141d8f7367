//! Runtime binder resolution: type path to binder instance, with ancestry
//! fallback, framework-boundary cutoff, and a process-wide cache.

use std::collections::HashMap;
use std::sync::{Arc, OnceLock};

use parking_lot::RwLock;
use tracing::debug;

use crate::binder::{Binder, NopBinder};
use crate::error::BindError;
use crate::registry::BinderRegistry;

/// Namespace prefixes the search never crosses. No generated binder can
/// exist for types under these, so reaching one ends the walk with the no-op
/// sentinel.
pub const RESERVED_PREFIXES: [&str; 2] = ["viewbind::", "std::"];

/// Whether a qualified type path lies inside the framework boundary.
pub fn is_framework_type(type_path: &str) -> bool {
    RESERVED_PREFIXES
        .iter()
        .any(|prefix| type_path.starts_with(prefix))
}

/// Maps concrete target types to binder instances.
///
/// Entries are cached under the *requested* type path for the process
/// lifetime, including ancestor matches and the no-op sentinel; there is no
/// eviction. Concurrent first-resolutions of one type may race to construct
/// the same binder twice; the first cache write wins and every caller
/// observes that single entry. Binders are stateless, so the losing instance
/// is discarded harmlessly.
pub struct Resolver {
    registry: BinderRegistry,
    cache: RwLock<HashMap<String, Arc<dyn Binder>>>,
    nop: Arc<dyn Binder>,
}

impl Resolver {
    /// Create a resolver over an explicit registry.
    pub fn new(registry: BinderRegistry) -> Self {
        Self {
            registry,
            cache: RwLock::new(HashMap::new()),
            nop: Arc::new(NopBinder),
        }
    }

    /// Create a resolver over the link-time binder inventory.
    pub fn from_inventory() -> Self {
        Self::new(BinderRegistry::from_inventory())
    }

    /// The shared no-op sentinel this resolver hands out.
    pub fn noop(&self) -> Arc<dyn Binder> {
        self.nop.clone()
    }

    /// Resolve a binder for `type_path`, falling back along `ancestry`
    /// (nearest first).
    ///
    /// The walk ends without error at the first framework-prefixed step, or
    /// when the chain is exhausted; both cases yield the no-op sentinel.
    pub fn resolve(
        &self,
        type_path: &str,
        ancestry: &[&str],
    ) -> Result<Arc<dyn Binder>, BindError> {
        if let Some(hit) = self.cache.read().get(type_path) {
            if crate::debug_enabled() {
                debug!(type_path, "binder cache hit");
            }
            return Ok(hit.clone());
        }

        let resolved = self.search(type_path, ancestry)?;

        let mut cache = self.cache.write();
        let entry = cache
            .entry(type_path.to_string())
            .or_insert_with(|| resolved);
        Ok(entry.clone())
    }

    fn search(
        &self,
        requested: &str,
        ancestry: &[&str],
    ) -> Result<Arc<dyn Binder>, BindError> {
        for step in std::iter::once(requested).chain(ancestry.iter().copied()) {
            if is_framework_type(step) {
                if crate::debug_enabled() {
                    debug!(requested, step, "reached framework type, using no-op binder");
                }
                return Ok(self.nop.clone());
            }
            if self.registry.is_ambiguous(step) {
                return Err(BindError::Resolution {
                    type_path: requested.to_string(),
                    reason: format!("conflicting binder registrations for {step}"),
                });
            }
            if let Some(construct) = self.registry.constructor(step) {
                if crate::debug_enabled() {
                    debug!(requested, step, "constructed binder");
                }
                return Ok(Arc::from(construct()));
            }
            if crate::debug_enabled() {
                debug!(requested, step, "no binder registered, trying ancestor");
            }
        }
        if crate::debug_enabled() {
            debug!(requested, "ancestry exhausted, using no-op binder");
        }
        Ok(self.nop.clone())
    }
}

static GLOBAL: OnceLock<Resolver> = OnceLock::new();

/// The process-wide resolver over the link-time inventory, built on first
/// use.
pub fn global() -> &'static Resolver {
    GLOBAL.get_or_init(Resolver::from_inventory)
}
