//! Proc-macro providing the `#[derive(Bind)]` attribute.
//!
//! This macro is a **no-op annotation** - it doesn't generate any code.
//! It exists so that `#[bind(...)]` and `#[nullable]` field attributes are
//! accepted by the compiler, and as documentation that a struct's fields are
//! populated by a generated binder from `viewbind-codegen`.
//!
//! # Usage
//!
//! 1. Annotate your struct with `#[derive(Bind)]` and its fields with
//!    `#[bind(id = ...)]`
//! 2. Use `BindingGenerator` in your build.rs to generate the actual binder
//!
//! # Example
//!
//! ```rust,ignore
//! use viewbind::{ElementHandle, Shared};
//! use viewbind_codegen::Bind;
//!
//! #[derive(Bind)]
//! pub struct MainScreen {
//!     #[bind(id = 1001, click)]
//!     pub title: Option<ElementHandle>,
//!     #[bind(id = 1002)]
//!     #[nullable]
//!     pub subtitle: Option<ElementHandle>,
//! }
//! ```
//!
//! Then in your build.rs:
//!
//! ```rust,ignore
//! use viewbind_codegen::BindingGenerator;
//!
//! fn main() {
//!     BindingGenerator::new("myapp")
//!         .add_source_file("src/lib.rs").unwrap()
//!         .write_to_dir("generated/").unwrap();
//! }
//! ```

use proc_macro::TokenStream;

/// Marker derive macro for viewbind binder generation.
///
/// This macro is a no-op - it doesn't generate any code at compile time. It
/// registers the `bind` and `nullable` helper attributes so annotated structs
/// compile, and signals that the struct's binder is produced by
/// `BindingGenerator` in build.rs.
#[proc_macro_derive(Bind, attributes(bind, nullable))]
pub fn derive_bind(_input: TokenStream) -> TokenStream {
    // No-op: actual code generation happens in build.rs
    TokenStream::new()
}
