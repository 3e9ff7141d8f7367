//! Binder units produced by `cargo run --bin generate-binders`.

pub use viewbind::BindTarget;

mod main_screen_binder;
