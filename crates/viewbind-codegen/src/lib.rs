//! # viewbind-codegen
//!
//! Rust code generator for viewbind field bindings. This crate scans source
//! for `#[bind]`-annotated struct fields and emits one binder unit per
//! annotated struct, implementing the runtime's two-method `Binder` contract.
//!
//! ## Features
//!
//! - Collects `#[bind(id = N)]`, `#[bind(id = N, click)]`,
//!   `#[bind(id = N, item_click)]` and the co-located `#[nullable]` marker
//! - Source file parsing with full `use` import resolution, so declared field
//!   types are validated against fully qualified paths
//! - Capability registry for element types: what is bindable and what may
//!   carry item-selection bindings is declared by contract
//! - Fail-closed validation with a configurable lenient mode
//! - Deterministic output for build reproducibility
//!
//! ## Quick Start
//!
//! Annotate struct fields:
//!
//! ```rust,ignore
//! use viewbind::{ElementHandle, Shared};
//! use viewbind_codegen::Bind;
//! use crate::widgets::ListPane;
//!
//! #[derive(Bind)]
//! pub struct MainScreen {
//!     #[bind(id = 1001)]
//!     pub title: Option<ElementHandle>,
//!     #[bind(id = 1002, click)]
//!     pub submit: Option<ElementHandle>,
//!     #[bind(id = 1003, item_click)]
//!     #[nullable]
//!     pub items: Option<Shared<ListPane>>,
//! }
//! ```
//!
//! Then in `build.rs`:
//!
//! ```no_run
//! # fn main() -> Result<(), viewbind_codegen::GenerateError> {
//! use viewbind_codegen::BindingGenerator;
//!
//! let mut generator = BindingGenerator::new("myapp");
//! generator
//!     .register_adapter("myapp::widgets::ListPane")
//!     .add_source_dir("src/screens")?
//!     .write_to_dir("src/generated")?;
//!
//! println!("cargo:rerun-if-changed=src/screens");
//! # Ok(())
//! # }
//! ```
//!
//! Each generated unit defines a binder struct, its `Binder` impl, and a
//! `viewbind::register_binder!` invocation that wires the binder into the
//! runtime's dispatch table at link time.
//!
//! ## Accepted field types
//!
//! | Declared type | Assignment |
//! |---------------|------------|
//! | `Option<ElementHandle>` | the type-erased handle |
//! | `Option<Shared<T>>`, `T` registered | capability cast to `Shared<T>` |
//! | `Option<Shared<dyn Element>>` | the interface view |

mod extractor;
mod generator;
pub mod registry;
mod types;

pub use generator::BindingGenerator;
pub use types::{
    BindingDescriptor, Diagnostic, FieldBinding, FieldForm, GenerateError, GeneratedUnit,
    binder_name,
};

#[cfg(feature = "derive")]
pub use viewbind_derive::Bind;
