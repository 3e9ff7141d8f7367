//! Regenerates the binder units under `src/generated/`.
//!
//! The annotated sources live in `src/lib.rs`; element types the screens
//! refer to must be registered here before scanning.

use std::env;
use std::path::PathBuf;

use viewbind_codegen::BindingGenerator;

fn main() {
    let out_dir = env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("src/generated"));

    let mut generator = BindingGenerator::new("viewbind_example");
    generator
        .set_header(
            "Binder units for the viewbind example crate.\n\
             Regenerate with `cargo run --bin generate-binders`.",
        )
        .register_element("viewbind_example::widgets::Label")
        .register_element("viewbind_example::widgets::Button")
        .register_adapter("viewbind_example::widgets::ListPane");
    generator
        .add_source_file("src/lib.rs")
        .expect("failed to scan src/lib.rs");

    let units = generator.generate().expect("binding validation failed");
    generator
        .write_to_dir(&out_dir)
        .expect("failed to write binder units");

    for unit in &units {
        println!("{} -> {}", unit.target_path, unit.file_name());
    }
    println!("Wrote {} binder unit(s) to {}", units.len(), out_dir.display());
}
