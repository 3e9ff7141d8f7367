//! Rust source emitter for collected binding descriptors.

use std::fs;
use std::path::Path;

use indexmap::IndexMap;

use crate::registry::{Capability, CapabilityRegistry};
use crate::types::{
    BindingDescriptor, Diagnostic, FieldBinding, FieldForm, GenerateError, GeneratedUnit,
};

/// Code generator that collects binding descriptors and outputs one generated
/// Rust unit per annotated struct.
///
/// Descriptors are usually collected from source via
/// [`add_source_file`](BindingGenerator::add_source_file) and friends, but can
/// also be assembled by hand with [`add_binding`](BindingGenerator::add_binding).
///
/// # Capability registry
///
/// The generator includes a [`CapabilityRegistry`] seeded with the runtime's
/// own handle forms. Element types must be registered before sources are
/// added, since field validation and the item-click downgrade consult the
/// registry at collection time.
///
/// # Example
///
/// ```
/// use viewbind_codegen::BindingGenerator;
///
/// let mut generator = BindingGenerator::new("myapp");
/// generator
///     .register_element("myapp::widgets::Label")
///     .register_adapter("myapp::widgets::ListPane")
///     .add_source_str(
///         r#"
///         use viewbind::{ElementHandle, Shared};
///
///         pub struct MainScreen {
///             #[bind(id = 1001)]
///             pub title: Option<Shared<myapp::widgets::Label>>,
///         }
///         "#,
///     );
/// let units = generator.generate().unwrap();
/// assert_eq!(units.len(), 1);
/// ```
#[derive(Debug)]
pub struct BindingGenerator {
    /// The crate the annotated sources belong to. Paths under it are emitted
    /// as `crate::…`.
    package: String,

    /// Descriptors keyed by target path, in collection order.
    pub(crate) descriptors: IndexMap<String, BindingDescriptor>,

    /// Validation failures recorded during collection.
    pub(crate) diagnostics: Vec<Diagnostic>,

    /// Custom header comment for the generated units.
    header: Option<String>,

    /// When `true` (default), `generate()` fails if any diagnostic was
    /// recorded. When `false`, offending bindings are skipped and generation
    /// proceeds.
    abort_on_error: bool,

    /// Capability registry consulted for field validation.
    pub(crate) registry: CapabilityRegistry,
}

impl BindingGenerator {
    /// Create a generator for sources belonging to `package`.
    pub fn new(package: impl Into<String>) -> Self {
        Self {
            package: package.into(),
            descriptors: IndexMap::new(),
            diagnostics: Vec::new(),
            header: None,
            abort_on_error: true,
            registry: CapabilityRegistry::with_builtins(),
        }
    }

    /// Set a custom header comment for the generated units.
    pub fn set_header(&mut self, header: impl Into<String>) -> &mut Self {
        self.header = Some(header.into());
        self
    }

    /// Control whether validation failures abort generation.
    ///
    /// Defaults to `true`. With `false`, diagnostics remain inspectable via
    /// [`diagnostics`](BindingGenerator::diagnostics) but `generate()` emits
    /// units for everything that did validate.
    pub fn abort_on_error(&mut self, enabled: bool) -> &mut Self {
        self.abort_on_error = enabled;
        self
    }

    /// Register an element type, making `Option<Shared<T>>` fields of that
    /// type valid.
    pub fn register_element(&mut self, path: impl Into<String>) -> &mut Self {
        self.registry.register(path, Capability::ELEMENT);
        self
    }

    /// Register an adapter-capable element type. Implies element capability.
    pub fn register_adapter(&mut self, path: impl Into<String>) -> &mut Self {
        self.registry.register(path, Capability::ADAPTER);
        self
    }

    /// Get a reference to the capability registry.
    pub fn registry(&self) -> &CapabilityRegistry {
        &self.registry
    }

    /// The validation failures recorded so far.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// The package the generator emits for.
    pub fn package(&self) -> &str {
        &self.package
    }

    /// Record a binding for `target_path` directly, bypassing source parsing.
    ///
    /// Applies the same item-click downgrade as collection: the flag is
    /// cleared when the declared form is not adapter-capable.
    pub fn add_binding(&mut self, target_path: impl AsRef<str>, mut binding: FieldBinding) -> &mut Self {
        if binding.item_click && !self.adapter_capable(&binding.form) {
            binding.item_click = false;
        }
        let target_path = target_path.as_ref();
        self.descriptors
            .entry(target_path.to_string())
            .or_insert_with(|| BindingDescriptor::new(self.package.clone(), target_path))
            .put_binding(binding);
        self
    }

    pub(crate) fn adapter_capable(&self, form: &FieldForm) -> bool {
        match form {
            FieldForm::Handle => self.registry.is_adapter("viewbind::ElementHandle"),
            FieldForm::Interface => self.registry.is_adapter("viewbind::Element"),
            FieldForm::Concrete(path) => self.registry.is_adapter(path),
        }
    }

    /// Generate one Rust unit per collected descriptor, in collection order.
    ///
    /// Fails with [`GenerateError::Validation`] when diagnostics were
    /// recorded and abort-on-error is active. Output is byte-identical across
    /// repeated calls on the same generator.
    pub fn generate(&self) -> Result<Vec<GeneratedUnit>, GenerateError> {
        if self.abort_on_error && !self.diagnostics.is_empty() {
            return Err(GenerateError::Validation(self.diagnostics.clone()));
        }
        Ok(self
            .descriptors
            .values()
            .filter(|descriptor| !descriptor.is_empty())
            .map(|descriptor| self.generate_unit(descriptor))
            .collect())
    }

    /// Generate all units and write each to `dir` under its suggested file
    /// name, creating the directory if needed.
    pub fn write_to_dir(&self, dir: impl AsRef<Path>) -> Result<(), GenerateError> {
        let dir = dir.as_ref();
        fs::create_dir_all(dir)?;
        for unit in self.generate()? {
            fs::write(dir.join(unit.file_name()), &unit.code)?;
        }
        Ok(())
    }

    fn generate_unit(&self, descriptor: &BindingDescriptor) -> GeneratedUnit {
        let binder = &descriptor.binder_name;
        let target_type = self.crate_relative(&descriptor.target_path);
        let mut output = String::new();

        if let Some(header) = &self.header {
            for line in header.lines() {
                output.push_str("// ");
                output.push_str(line);
                output.push('\n');
            }
        } else {
            output.push_str("// Generated by viewbind-codegen. Do not edit manually.\n");
        }
        output.push('\n');
        output.push_str("use super::*;\n\n");

        output.push_str("#[derive(Default)]\n");
        output.push_str("#[allow(non_camel_case_types)]\n");
        output.push_str(&format!("pub struct {binder};\n\n"));

        output.push_str(&format!("impl viewbind::Binder for {binder} {{\n"));
        output.push_str(
            "    fn bind(\n        &self,\n        finder: &viewbind::Finder,\n        \
             target: &mut dyn viewbind::BindTarget,\n        source: &viewbind::Source,\n    \
             ) -> Result<(), viewbind::BindError> {\n",
        );
        output.push_str(&format!(
            "        let target = viewbind::downcast_target::<{target_type}>(target)?;\n"
        ));
        for binding in descriptor.bindings() {
            output.push_str(&self.generate_binding(binding));
        }
        output.push_str("        Ok(())\n    }\n\n");

        output.push_str(
            "    fn unbind(&self, target: &mut dyn viewbind::BindTarget) \
             -> Result<(), viewbind::BindError> {\n",
        );
        output.push_str(&format!(
            "        let target = viewbind::downcast_target::<{target_type}>(target)?;\n"
        ));
        for binding in descriptor.bindings() {
            output.push_str(&format!("        target.{} = None;\n", binding.name));
        }
        output.push_str("        Ok(())\n    }\n}\n\n");

        output.push_str(&format!(
            "viewbind::register_binder!(\"{}\", {binder});\n",
            descriptor.target_path
        ));

        GeneratedUnit {
            target_path: descriptor.target_path.clone(),
            binder_name: binder.clone(),
            code: output,
        }
    }

    /// Emit the statements for one binding: lookup, assignment, then handler
    /// attachments strictly after the assignment.
    fn generate_binding(&self, binding: &FieldBinding) -> String {
        let FieldBinding {
            id,
            name,
            required,
            click,
            item_click,
            ..
        } = binding;
        let assign = self.assignment_expr(binding);
        let mut out = String::new();

        if *required {
            out.push_str(&format!(
                "        let element = finder.find_required(source, {id}, \"{name}\")?;\n"
            ));
            out.push_str(&format!("        target.{name} = Some({assign});\n"));
            if *click {
                out.push_str("        element.attach_click(target.click_handler());\n");
            }
            if *item_click {
                out.push_str("        element.attach_item_click(target.item_click_handler());\n");
            }
        } else if !*click && !*item_click && binding.form == FieldForm::Handle {
            out.push_str(&format!(
                "        target.{name} = finder.find_optional(source, {id});\n"
            ));
        } else {
            out.push_str(&format!(
                "        match finder.find_optional(source, {id}) {{\n"
            ));
            out.push_str("            Some(element) => {\n");
            out.push_str(&format!("                target.{name} = Some({assign});\n"));
            if *click {
                out.push_str(
                    "                element.attach_click(target.click_handler());\n",
                );
            }
            if *item_click {
                out.push_str(
                    "                element.attach_item_click(target.item_click_handler());\n",
                );
            }
            out.push_str("            }\n");
            out.push_str(&format!("            None => target.{name} = None,\n"));
            out.push_str("        }\n");
        }
        out
    }

    fn assignment_expr(&self, binding: &FieldBinding) -> String {
        match &binding.form {
            FieldForm::Handle => "element.clone()".to_string(),
            FieldForm::Interface => "element.as_element()".to_string(),
            FieldForm::Concrete(path) => format!(
                "element.cast_required::<{}>(\"{}\", source)?",
                self.crate_relative(path),
                binding.name
            ),
        }
    }

    /// Rewrite a path under the generator's package to `crate::…`; external
    /// paths pass through verbatim.
    pub(crate) fn crate_relative(&self, path: &str) -> String {
        if path == self.package {
            return "crate".to_string();
        }
        match path.strip_prefix(&self.package) {
            Some(rest) if rest.starts_with("::") => format!("crate{rest}"),
            _ => path.to_string(),
        }
    }
}
