//! # viewbind
//!
//! Runtime half of the viewbind field-binding system. Generated binders
//! locate interface elements by identifier, assign them to the fields of a
//! target struct, and attach interaction handlers; this crate resolves and
//! invokes those binders for concrete target types.
//!
//! ## Features
//!
//! - One-call binding of annotated targets via [`bind_element`],
//!   [`bind_window`], and [`bind_dialog`]
//! - Binder lookup walks the target's declared ancestry, so a type without
//!   its own bindings reuses the nearest bound ancestor
//! - Resolution results are cached process-wide; types with no binder
//!   anywhere in their ancestry bind as a cheap no-op
//! - Link-time binder registration through [`register_binder!`], no
//!   reflection and no global setup call
//!
//! ## Quick Start
//!
//! Annotate fields and let the generator produce a binder:
//!
//! ```rust,ignore
//! use viewbind::ElementHandle;
//! use viewbind_codegen::Bind;
//!
//! #[derive(Bind)]
//! pub struct MainScreen {
//!     #[bind(id = 1001)]
//!     pub title: Option<ElementHandle>,
//!     #[bind(id = 1002, click)]
//!     pub submit: Option<ElementHandle>,
//! }
//! ```
//!
//! Then bind and release at runtime:
//!
//! ```rust,ignore
//! let mut screen = MainScreen::attach(window);
//! viewbind::bind_window(&mut screen)?;
//! // ... screen.title and screen.submit are populated ...
//! viewbind::unbind(&mut screen)?;
//! ```
//!
//! When the target does not supply its own element tree, name the host
//! explicitly:
//!
//! ```rust,ignore
//! viewbind::bind_element_in(&mut row, &list_item)?;
//! ```
//!
//! ## Sources
//!
//! | Entry point | Host trait | Lookup root |
//! |-------------|------------|-------------|
//! | [`bind_element`] | [`ElementHost`] | the host's own root element |
//! | [`bind_window`] | [`WindowHost`] | the window's content root |
//! | [`bind_dialog`] | [`DialogHost`] | the dialog's content root |

mod binder;
mod element;
mod error;
mod finder;
pub mod registry;
mod resolver;

use std::sync::atomic::{AtomicBool, Ordering};

#[doc(hidden)]
pub use linkme;

pub use binder::{BindTarget, Binder, NopBinder, downcast_target};
pub use element::{
    AdapterElement, ClickHandler, Element, ElementHandle, ElementId, ItemClickHandler, Shared,
};
pub use error::BindError;
pub use finder::{DialogHost, ElementHost, Finder, Source, SymbolTable, WindowHost};
pub use resolver::{Resolver, is_framework_type};

static DEBUG: AtomicBool = AtomicBool::new(false);

/// Toggle debug logging of binder lookups and cache activity.
///
/// Events are emitted through `tracing` at debug level. Off by default.
pub fn set_debug(enabled: bool) {
    DEBUG.store(enabled, Ordering::Relaxed);
}

pub(crate) fn debug_enabled() -> bool {
    DEBUG.load(Ordering::Relaxed)
}

/// Bind a target that hosts its own element tree.
pub fn bind_element<T>(target: &mut T) -> Result<(), BindError>
where
    T: BindTarget + ElementHost,
{
    let source = Source::of_element_host(target);
    bind_with(&Finder::Element, target, &source)
}

/// Bind a target against a separate element host.
pub fn bind_element_in(
    target: &mut dyn BindTarget,
    host: &dyn ElementHost,
) -> Result<(), BindError> {
    let source = Source::of_element_host(host);
    bind_with(&Finder::Element, target, &source)
}

/// Bind a target that is itself a window.
pub fn bind_window<T>(target: &mut T) -> Result<(), BindError>
where
    T: BindTarget + WindowHost,
{
    let source = Source::of_window(target);
    bind_with(&Finder::Window, target, &source)
}

/// Bind a target against a separate window.
pub fn bind_window_in(
    target: &mut dyn BindTarget,
    window: &dyn WindowHost,
) -> Result<(), BindError> {
    let source = Source::of_window(window);
    bind_with(&Finder::Window, target, &source)
}

/// Bind a target that is itself a dialog.
pub fn bind_dialog<T>(target: &mut T) -> Result<(), BindError>
where
    T: BindTarget + DialogHost,
{
    let source = Source::of_dialog(target);
    bind_with(&Finder::Dialog, target, &source)
}

/// Bind a target against a separate dialog.
pub fn bind_dialog_in(
    target: &mut dyn BindTarget,
    dialog: &dyn DialogHost,
) -> Result<(), BindError> {
    let source = Source::of_dialog(dialog);
    bind_with(&Finder::Dialog, target, &source)
}

/// Release every bound field of the target back to `None`.
///
/// Safe to call on a target that was never bound; the no-op binder applies.
pub fn unbind(target: &mut dyn BindTarget) -> Result<(), BindError> {
    let type_path = target.type_path();
    let binder = resolver::global()
        .resolve(type_path, target.ancestry())
        .map_err(|err| BindError::Unbind {
            type_path: type_path.to_string(),
            source: Box::new(err),
        })?;
    binder
        .unbind(target)
        .map_err(|err| BindError::Unbind {
            type_path: type_path.to_string(),
            source: Box::new(err),
        })
}

fn bind_with(
    finder: &Finder,
    target: &mut dyn BindTarget,
    source: &Source,
) -> Result<(), BindError> {
    let type_path = target.type_path();
    let binder = resolver::global()
        .resolve(type_path, target.ancestry())
        .map_err(|err| BindError::Bind {
            type_path: type_path.to_string(),
            source: Box::new(err),
        })?;
    binder
        .bind(finder, target, source)
        .map_err(|err| BindError::Bind {
            type_path: type_path.to_string(),
            source: Box::new(err),
        })
}
