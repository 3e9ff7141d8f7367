//! The binder contract implemented by generated units, and the target trait
//! binders operate on.

use std::any::Any;
use std::sync::Arc;

use crate::element::{ClickHandler, ItemClickHandler};
use crate::error::BindError;
use crate::finder::{Finder, Source};

/// A generated unit that populates and later clears one struct's annotated
/// fields.
///
/// Binders are stateless; one instance may serve concurrent bind calls.
pub trait Binder: Send + Sync {
    /// Populate the target's bound fields from the source, attaching click
    /// and item-click handlers where the bindings declare them.
    fn bind(
        &self,
        finder: &Finder,
        target: &mut dyn BindTarget,
        source: &Source,
    ) -> Result<(), BindError>;

    /// Clear every bound field back to `None`.
    fn unbind(&self, target: &mut dyn BindTarget) -> Result<(), BindError>;
}

/// A struct whose fields are populated by a generated binder.
///
/// `ancestry` and `ancestor_target_mut` describe composition-based subtyping:
/// a type embedding `myapp::BaseScreen` reports that path in its ancestry and
/// hands out the embedded value, so the resolver can fall back to the
/// ancestor's binder and that binder can still reach its fields.
pub trait BindTarget: Any {
    /// Fully qualified path of this type, matching what the generator
    /// registered.
    fn type_path(&self) -> &'static str;

    /// Qualified ancestor type paths, nearest first.
    fn ancestry(&self) -> &'static [&'static str] {
        &[]
    }

    fn as_any(&self) -> &dyn Any;

    fn as_any_mut(&mut self) -> &mut dyn Any;

    /// The embedded ancestor value, when this type composes one.
    fn ancestor_target_mut(&mut self) -> Option<&mut dyn BindTarget> {
        None
    }

    /// Handler attached by `click` bindings. The default ignores clicks.
    fn click_handler(&self) -> ClickHandler {
        Arc::new(|_| {})
    }

    /// Handler attached by `item_click` bindings. The default ignores
    /// selections.
    fn item_click_handler(&self) -> ItemClickHandler {
        Arc::new(|_, _| {})
    }
}

/// Recover the concrete target a binder was generated for, walking the
/// ancestor chain so an ancestor's binder accepts composed subtypes.
pub fn downcast_target<T: BindTarget>(target: &mut dyn BindTarget) -> Result<&mut T, BindError> {
    let actual = target.type_path();
    try_downcast::<T>(target).ok_or_else(|| BindError::TargetMismatch {
        expected: std::any::type_name::<T>(),
        actual: actual.to_string(),
    })
}

fn try_downcast<T: BindTarget>(target: &mut dyn BindTarget) -> Option<&mut T> {
    if target.as_any().is::<T>() {
        return target.as_any_mut().downcast_mut::<T>();
    }
    target.ancestor_target_mut().and_then(try_downcast::<T>)
}

/// Shared sentinel returned when no generated binder exists anywhere in a
/// target's chain. Both operations succeed without touching the target.
pub struct NopBinder;

impl Binder for NopBinder {
    fn bind(
        &self,
        _finder: &Finder,
        _target: &mut dyn BindTarget,
        _source: &Source,
    ) -> Result<(), BindError> {
        Ok(())
    }

    fn unbind(&self, _target: &mut dyn BindTarget) -> Result<(), BindError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct Base {
        value: u32,
    }

    impl BindTarget for Base {
        fn type_path(&self) -> &'static str {
            "demo::Base"
        }

        fn as_any(&self) -> &dyn Any {
            self
        }

        fn as_any_mut(&mut self) -> &mut dyn Any {
            self
        }
    }

    #[derive(Debug)]
    struct Derived {
        base: Base,
    }

    impl BindTarget for Derived {
        fn type_path(&self) -> &'static str {
            "demo::Derived"
        }

        fn ancestry(&self) -> &'static [&'static str] {
            &["demo::Base"]
        }

        fn as_any(&self) -> &dyn Any {
            self
        }

        fn as_any_mut(&mut self) -> &mut dyn Any {
            self
        }

        fn ancestor_target_mut(&mut self) -> Option<&mut dyn BindTarget> {
            Some(&mut self.base)
        }
    }

    #[test]
    fn downcast_exact_type() {
        let mut base = Base { value: 1 };
        let target: &mut dyn BindTarget = &mut base;
        let got = downcast_target::<Base>(target).expect("exact type");
        got.value = 2;
        assert_eq!(base.value, 2);
    }

    #[test]
    fn downcast_walks_ancestor_chain() {
        let mut derived = Derived {
            base: Base { value: 1 },
        };
        let target: &mut dyn BindTarget = &mut derived;
        let got = downcast_target::<Base>(target).expect("embedded ancestor");
        got.value = 5;
        assert_eq!(derived.base.value, 5);
    }

    #[test]
    fn downcast_mismatch_names_both_types() {
        let mut base = Base { value: 1 };
        let target: &mut dyn BindTarget = &mut base;
        let err = downcast_target::<Derived>(target).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("Derived"));
        assert!(msg.contains("demo::Base"));
    }
}
