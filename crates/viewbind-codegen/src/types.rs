//! Binding metadata collected per struct, plus the diagnostics the collector
//! reports.

use indexmap::IndexMap;

/// How a bound field stores its element, derived from the declared type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldForm {
    /// `Option<ElementHandle>`; assignment keeps the type-erased handle.
    Handle,
    /// `Option<Shared<T>>` for a registered element type `T`. The path is the
    /// fully qualified path of `T`; assignment goes through a capability cast.
    Concrete(String),
    /// `Option<Shared<dyn Element>>`; assignment keeps the interface view.
    Interface,
}

/// One annotated field: which element it binds and how.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldBinding {
    /// Element id used for the lookup.
    pub id: u32,
    /// Field name on the declaring struct.
    pub name: String,
    /// Storage form derived from the declared field type.
    pub form: FieldForm,
    /// Whether the lookup must succeed. `#[nullable]` clears this.
    pub required: bool,
    /// Attach the target's click handler after assignment.
    pub click: bool,
    /// Attach the target's item-selection handler after assignment. Forced
    /// off when the declared type is not adapter-capable.
    pub item_click: bool,
}

/// All bindings declared by one struct, in declaration order.
#[derive(Debug, Clone)]
pub struct BindingDescriptor {
    /// The crate the struct lives in.
    pub package: String,
    /// Fully qualified path of the declaring struct.
    pub target_path: String,
    /// Name of the generated binder type, from [`binder_name`].
    pub binder_name: String,
    bindings: IndexMap<u32, FieldBinding>,
}

impl BindingDescriptor {
    pub fn new(package: impl Into<String>, target_path: impl Into<String>) -> Self {
        let package = package.into();
        let target_path = target_path.into();
        let binder_name = binder_name(&package, &target_path);
        Self {
            package,
            target_path,
            binder_name,
            bindings: IndexMap::new(),
        }
    }

    /// Record a binding. A second binding with an already-seen id silently
    /// replaces the earlier entry while keeping its original position.
    pub fn put_binding(&mut self, binding: FieldBinding) {
        self.bindings.insert(binding.id, binding);
    }

    /// The bindings in insertion order.
    pub fn bindings(&self) -> impl Iterator<Item = &FieldBinding> {
        self.bindings.values()
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

/// Derive the generated binder's type name from the target's qualified path.
///
/// The package prefix is stripped, remaining `::` separators become `_`, and
/// `Binder` is appended: `myapp::screens::MainScreen` with package `myapp`
/// yields `screens_MainScreenBinder`.
pub fn binder_name(package: &str, target_path: &str) -> String {
    let local = target_path
        .strip_prefix(package)
        .and_then(|rest| rest.strip_prefix("::"))
        .unwrap_or(target_path);
    format!("{}Binder", local.replace("::", "_"))
}

/// One generated source unit.
#[derive(Debug, Clone)]
pub struct GeneratedUnit {
    /// Fully qualified path of the target the unit binds.
    pub target_path: String,
    /// Name of the binder type the unit defines.
    pub binder_name: String,
    /// The unit's Rust source text.
    pub code: String,
}

impl GeneratedUnit {
    /// Suggested file name for the unit, the binder name in snake case.
    pub fn file_name(&self) -> String {
        let mut out = String::new();
        let mut prev_lower = false;
        for ch in self.binder_name.chars() {
            if ch.is_uppercase() {
                if prev_lower {
                    out.push('_');
                }
                out.extend(ch.to_lowercase());
                prev_lower = false;
            } else {
                out.push(ch);
                prev_lower = ch.is_lowercase() || ch.is_numeric();
            }
        }
        format!("{out}.rs")
    }
}

/// A validation failure recorded against a specific struct or field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// The struct (and field, when applicable) the failure concerns,
    /// e.g. `myapp::MainScreen.title`.
    pub target: String,
    pub message: String,
}

impl Diagnostic {
    pub fn new(target: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            target: target.into(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.target, self.message)
    }
}

/// Failure produced by a generation round.
#[derive(Debug, thiserror::Error)]
pub enum GenerateError {
    /// One or more bindings failed validation.
    #[error("{} binding validation failure(s):\n{}", .0.len(), format_diagnostics(.0))]
    Validation(Vec<Diagnostic>),

    /// A source input could not be parsed as Rust.
    #[error("failed to parse {path}: {message}")]
    Parse { path: String, message: String },

    #[error("io error")]
    Io(#[from] std::io::Error),
}

fn format_diagnostics(diagnostics: &[Diagnostic]) -> String {
    diagnostics
        .iter()
        .map(|d| format!("  - {d}"))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn binder_name_strips_package_and_flattens_modules() {
        assert_eq!(
            binder_name("myapp", "myapp::screens::MainScreen"),
            "screens_MainScreenBinder"
        );
        assert_eq!(binder_name("myapp", "myapp::MainScreen"), "MainScreenBinder");
        assert_eq!(
            binder_name("myapp", "other::Widget"),
            "other_WidgetBinder"
        );
    }

    #[test]
    fn duplicate_id_replaces_in_place() {
        let mut descriptor = BindingDescriptor::new("myapp", "myapp::Screen");
        for (id, name) in [(1, "first"), (2, "second"), (1, "replacement")] {
            descriptor.put_binding(FieldBinding {
                id,
                name: name.to_string(),
                form: FieldForm::Handle,
                required: true,
                click: false,
                item_click: false,
            });
        }
        let names: Vec<_> = descriptor.bindings().map(|b| b.name.as_str()).collect();
        assert_eq!(names, ["replacement", "second"]);
    }

    #[test]
    fn generated_file_name_is_snake_case() {
        let unit = GeneratedUnit {
            target_path: "myapp::screens::MainScreen".to_string(),
            binder_name: "screens_MainScreenBinder".to_string(),
            code: String::new(),
        };
        assert_eq!(unit.file_name(), "screens_main_screen_binder.rs");
    }

    #[test]
    fn validation_error_lists_each_diagnostic() {
        let err = GenerateError::Validation(vec![
            Diagnostic::new("myapp::A.x", "field must be public"),
            Diagnostic::new("myapp::B.y", "missing id"),
        ]);
        let msg = err.to_string();
        assert!(msg.contains("2 binding validation failure(s)"));
        assert!(msg.contains("myapp::A.x: field must be public"));
        assert!(msg.contains("myapp::B.y: missing id"));
    }
}
