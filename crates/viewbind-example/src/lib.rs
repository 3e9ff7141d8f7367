//! Example crate demonstrating viewbind end to end.
//!
//! The screen below declares its bound fields with `#[bind(...)]`. The
//! `#[derive(Bind)]` macro is a no-op annotation that serves as
//! documentation; the actual binder is produced by the `generate-binders`
//! bin using `BindingGenerator` and checked in under `src/generated/`.
//!
//! Run `cargo run --bin bind-demo` to bind the screen against a hand-built
//! widget tree and exercise the attached handlers.

pub mod widgets;

mod generated;

use std::any::Any;
use std::sync::Arc;

use viewbind::{BindTarget, ClickHandler, ElementHandle, ItemClickHandler, Shared};
use viewbind_codegen::Bind;

use crate::widgets::Label;

/// The demo screen. `title` wants its concrete widget type, `submit` keeps
/// the erased handle and gets a click handler, `items` tolerates absence.
#[derive(Default, Bind)]
pub struct MainScreen {
    #[bind(id = 1001)]
    pub title: Option<Shared<Label>>,

    #[bind(id = 1002, click)]
    pub submit: Option<ElementHandle>,

    #[bind(id = 1003, item_click)]
    #[nullable]
    pub items: Option<ElementHandle>,
}

impl BindTarget for MainScreen {
    fn type_path(&self) -> &'static str {
        "viewbind_example::MainScreen"
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn click_handler(&self) -> ClickHandler {
        Arc::new(|id| println!("element #{id} clicked"))
    }

    fn item_click_handler(&self) -> ItemClickHandler {
        Arc::new(|id, position| println!("element #{id} selected item {position}"))
    }
}
