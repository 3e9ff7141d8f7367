//! Source file parser that collects `#[bind]` annotations into binding
//! descriptors.
//!
//! This module scans Rust source for struct fields carrying `#[bind(...)]`
//! attributes, validates their placement and declared types, and feeds the
//! results into the [`BindingGenerator`]. Element capability questions are
//! answered by the [`CapabilityRegistry`](crate::registry::CapabilityRegistry)
//! on the generator, so supporting a new element type requires no changes
//! here.
//!
//! ## Use-item analysis
//!
//! The collector processes `use` statements in each source file to build a
//! mapping from local names to fully qualified module paths:
//!
//! - `use viewbind::Shared` maps `"Shared"` to `"viewbind::Shared"`
//! - `use viewbind::ElementHandle as Handle` maps `"Handle"` to
//!   `"viewbind::ElementHandle"`, which is then recognized as the handle form.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use syn::{Attribute, Fields, GenericArgument, PathArguments, Type, TypePath, UseTree, Visibility};
use walkdir::WalkDir;

use crate::BindingGenerator;
use crate::registry::CapabilityRegistry;
use crate::types::{Diagnostic, FieldBinding, FieldForm, GenerateError};

/// Per-file context built from `use` items.
struct SourceContext {
    /// Maps local name -> fully qualified path.
    ///
    /// Populated for both plain imports (`use foo::Bar` -> `"Bar" => "foo::Bar"`)
    /// and renames (`use foo::Bar as Baz` -> `"Baz" => "foo::Bar"`).
    /// Glob imports are not tracked since they can't be resolved statically.
    imports: HashMap<String, String>,
}

/// Recursively flatten a `UseTree` into import entries.
fn collect_imports(tree: &UseTree, prefix: &[String], imports: &mut HashMap<String, String>) {
    match tree {
        UseTree::Path(p) => {
            let mut new_prefix = prefix.to_vec();
            new_prefix.push(p.ident.to_string());
            collect_imports(&p.tree, &new_prefix, imports);
        }
        UseTree::Name(n) => {
            let name = n.ident.to_string();
            let full_path = make_full_path(prefix, &name);
            imports.insert(name, full_path);
        }
        UseTree::Rename(r) => {
            let canonical = r.ident.to_string();
            let alias = r.rename.to_string();
            let full_path = make_full_path(prefix, &canonical);
            imports.insert(alias, full_path);
        }
        UseTree::Glob(_) => {
            // Glob imports can't be resolved statically
        }
        UseTree::Group(g) => {
            for item in &g.items {
                collect_imports(item, prefix, imports);
            }
        }
    }
}

/// Join prefix segments with the final name using `::`.
fn make_full_path(prefix: &[String], name: &str) -> String {
    if prefix.is_empty() {
        name.to_string()
    } else {
        format!("{}::{}", prefix.join("::"), name)
    }
}

/// Build a `SourceContext` from all `use` items in a parsed file, including
/// those inside inline modules.
fn build_source_context(file: &syn::File) -> SourceContext {
    let mut imports = HashMap::new();
    collect_use_items(&file.items, &mut imports);
    SourceContext { imports }
}

fn collect_use_items(items: &[syn::Item], imports: &mut HashMap<String, String>) {
    for item in items {
        match item {
            syn::Item::Use(item_use) => {
                collect_imports(&item_use.tree, &[], imports);
            }
            syn::Item::Mod(item_mod) => {
                if let Some((_, nested)) = &item_mod.content {
                    collect_use_items(nested, imports);
                }
            }
            _ => {}
        }
    }
}

/// Resolve a local type name to its fully qualified path using the import map.
///
/// Names not found in the imports (local types, primitives) come back as-is.
fn resolve_type_path(raw_ident: &str, ctx: &SourceContext) -> String {
    ctx.imports
        .get(raw_ident)
        .cloned()
        .unwrap_or_else(|| raw_ident.to_string())
}

/// Join a multi-segment path's idents, rewriting a leading `crate` to the
/// package name.
fn join_path(path: &syn::Path, package: &str) -> String {
    let joined = path
        .segments
        .iter()
        .map(|s| s.ident.to_string())
        .collect::<Vec<_>>()
        .join("::");
    normalize_crate_prefix(&joined, package)
}

/// Rewrite a leading `crate` segment to the package name.
fn normalize_crate_prefix(path: &str, package: &str) -> String {
    if path == "crate" {
        package.to_string()
    } else if let Some(rest) = path.strip_prefix("crate::") {
        format!("{package}::{rest}")
    } else {
        path.to_string()
    }
}

/// Resolve the path of an element type named inside `Shared<...>`.
///
/// Multi-segment paths are taken at face value. A bare name is resolved via
/// the import map first; if that still yields a bare name, registered
/// qualifications under the current module and the package root are tried
/// before giving up on the raw name.
fn resolve_element_path(
    path: &syn::Path,
    ctx: &SourceContext,
    registry: &CapabilityRegistry,
    package: &str,
    module_path: &[String],
) -> String {
    if path.segments.len() > 1 {
        return join_path(path, package);
    }
    let raw = path.segments[0].ident.to_string();
    let resolved = normalize_crate_prefix(&resolve_type_path(&raw, ctx), package);
    if resolved.contains("::") {
        return resolved;
    }
    let mut candidates = Vec::new();
    if !module_path.is_empty() {
        candidates.push(format!("{package}::{}::{raw}", module_path.join("::")));
    }
    candidates.push(format!("{package}::{raw}"));
    candidates.push(format!("viewbind::{raw}"));
    for candidate in candidates {
        if registry.contains(&candidate) {
            return candidate;
        }
    }
    raw
}

fn get_single_generic_arg(segment: &syn::PathSegment) -> Option<&Type> {
    match &segment.arguments {
        PathArguments::AngleBracketed(args) => match args.args.first()? {
            GenericArgument::Type(ty) => Some(ty),
            _ => None,
        },
        _ => None,
    }
}

const FORM_HINT: &str =
    "declared type must be Option<ElementHandle>, Option<Shared<T>> for a registered element \
     type T, or Option<Shared<dyn Element>>";

/// Classify a bound field's declared type into its storage form.
fn classify_field_type(
    ty: &Type,
    ctx: &SourceContext,
    registry: &CapabilityRegistry,
    package: &str,
    module_path: &[String],
) -> Result<FieldForm, String> {
    let Type::Path(TypePath { path, .. }) = ty else {
        return Err(FORM_HINT.to_string());
    };
    let segment = path.segments.last().ok_or_else(|| FORM_HINT.to_string())?;
    let outer = if path.segments.len() > 1 {
        join_path(path, package)
    } else {
        resolve_type_path(&segment.ident.to_string(), ctx)
    };
    if !matches!(
        outer.as_str(),
        "Option" | "std::option::Option" | "core::option::Option"
    ) {
        return Err(FORM_HINT.to_string());
    }

    let inner = get_single_generic_arg(segment).ok_or_else(|| FORM_HINT.to_string())?;
    let Type::Path(TypePath { path: inner_path, .. }) = inner else {
        return Err(FORM_HINT.to_string());
    };
    let inner_segment = inner_path.segments.last().ok_or_else(|| FORM_HINT.to_string())?;
    let inner_name = if inner_path.segments.len() > 1 {
        join_path(inner_path, package)
    } else {
        resolve_type_path(&inner_segment.ident.to_string(), ctx)
    };

    match inner_name.as_str() {
        "ElementHandle" | "viewbind::ElementHandle" => Ok(FieldForm::Handle),
        "Shared" | "viewbind::Shared" => {
            let arg = get_single_generic_arg(inner_segment).ok_or_else(|| FORM_HINT.to_string())?;
            classify_shared_arg(arg, ctx, registry, package, module_path)
        }
        _ => Err(FORM_HINT.to_string()),
    }
}

/// Classify the `T` in `Shared<T>`: either the `dyn Element` interface form
/// or a concrete registered element type.
fn classify_shared_arg(
    arg: &Type,
    ctx: &SourceContext,
    registry: &CapabilityRegistry,
    package: &str,
    module_path: &[String],
) -> Result<FieldForm, String> {
    match arg {
        Type::TraitObject(obj) => {
            for bound in &obj.bounds {
                if let syn::TypeParamBound::Trait(trait_bound) = bound {
                    let name = if trait_bound.path.segments.len() > 1 {
                        join_path(&trait_bound.path, package)
                    } else {
                        resolve_type_path(
                            &trait_bound.path.segments[0].ident.to_string(),
                            ctx,
                        )
                    };
                    if matches!(name.as_str(), "Element" | "viewbind::Element") {
                        return Ok(FieldForm::Interface);
                    }
                }
            }
            Err(FORM_HINT.to_string())
        }
        Type::Path(TypePath { path, .. }) => {
            let full = resolve_element_path(path, ctx, registry, package, module_path);
            if registry.is_element(&full) {
                Ok(FieldForm::Concrete(full))
            } else {
                Err(format!(
                    "element type `{full}` is not registered in the capability registry; \
                     use `register_element(\"{full}\")` or `register_adapter(\"{full}\")`"
                ))
            }
        }
        _ => Err(FORM_HINT.to_string()),
    }
}

/// The parsed content of one `#[bind(...)]` attribute.
struct BindAttr {
    id: Option<u32>,
    click: bool,
    item_click: bool,
}

/// Parse `#[bind(id = N, click, item_click)]`. Unknown or malformed arguments
/// are errors.
fn parse_bind_attr(attr: &Attribute) -> Result<BindAttr, String> {
    let mut parsed = BindAttr {
        id: None,
        click: false,
        item_click: false,
    };
    let nested = attr
        .parse_args_with(
            syn::punctuated::Punctuated::<syn::Meta, syn::Token![,]>::parse_terminated,
        )
        .map_err(|e| format!("malformed #[bind] attribute: {e}"))?;
    for meta in &nested {
        match meta {
            syn::Meta::NameValue(nv) if nv.path.is_ident("id") => {
                if let syn::Expr::Lit(syn::ExprLit {
                    lit: syn::Lit::Int(lit_int),
                    ..
                }) = &nv.value
                {
                    let id = lit_int
                        .base10_parse::<u32>()
                        .map_err(|e| format!("invalid element id: {e}"))?;
                    parsed.id = Some(id);
                } else {
                    return Err("element id must be an integer literal".to_string());
                }
            }
            syn::Meta::Path(p) if p.is_ident("click") => parsed.click = true,
            syn::Meta::Path(p) if p.is_ident("item_click") => parsed.item_click = true,
            other => {
                let name = other
                    .path()
                    .segments
                    .last()
                    .map(|s| s.ident.to_string())
                    .unwrap_or_default();
                return Err(format!("unsupported #[bind] argument `{name}`"));
            }
        }
    }
    if parsed.id.is_none() {
        return Err("#[bind] requires an `id`".to_string());
    }
    Ok(parsed)
}

fn has_bind_attr(attrs: &[Attribute]) -> bool {
    attrs.iter().any(|a| a.path().is_ident("bind"))
}

fn has_nullable_attr(attrs: &[Attribute]) -> bool {
    attrs.iter().any(|a| a.path().is_ident("nullable"))
}

fn is_private(vis: &Visibility) -> bool {
    matches!(vis, Visibility::Inherited)
}

/// Collect the bindings declared by one struct.
fn process_struct(
    generator: &mut BindingGenerator,
    item: &syn::ItemStruct,
    module_path: &[String],
    ctx: &SourceContext,
) {
    let Fields::Named(named) = &item.fields else {
        return;
    };
    if !named.named.iter().any(|f| has_bind_attr(&f.attrs)) {
        return;
    }

    let package = generator.package().to_string();
    let qualified = make_full_path(
        &std::iter::once(package.clone())
            .chain(module_path.iter().cloned())
            .collect::<Vec<_>>(),
        &item.ident.to_string(),
    );

    if qualified.starts_with("viewbind::") || qualified.starts_with("std::") {
        generator.diagnostics.push(Diagnostic::new(
            &qualified,
            "bindings may not target the reserved `viewbind` or `std` namespaces",
        ));
        return;
    }
    if is_private(&item.vis) {
        generator.diagnostics.push(Diagnostic::new(
            &qualified,
            "struct with bound fields must not be private",
        ));
        return;
    }

    for field in &named.named {
        let Some(bind_attr) = field.attrs.iter().find(|a| a.path().is_ident("bind")) else {
            continue;
        };
        let field_name = match &field.ident {
            Some(ident) => ident.to_string(),
            None => continue,
        };
        let target = format!("{qualified}.{field_name}");

        if is_private(&field.vis) {
            generator
                .diagnostics
                .push(Diagnostic::new(&target, "bound field must not be private"));
            continue;
        }

        let parsed = match parse_bind_attr(bind_attr) {
            Ok(parsed) => parsed,
            Err(message) => {
                generator.diagnostics.push(Diagnostic::new(&target, message));
                continue;
            }
        };

        let form = match classify_field_type(
            &field.ty,
            ctx,
            &generator.registry,
            &package,
            module_path,
        ) {
            Ok(form) => form,
            Err(message) => {
                generator.diagnostics.push(Diagnostic::new(&target, message));
                continue;
            }
        };

        // `add_binding` applies the item-click downgrade for non-adapter
        // forms, independent of any validation outcome.
        generator.add_binding(
            &qualified,
            FieldBinding {
                id: parsed.id.unwrap_or_default(),
                name: field_name,
                form,
                required: !has_nullable_attr(&field.attrs),
                click: parsed.click,
                item_click: parsed.item_click,
            },
        );
    }
}

/// Reject `#[bind]` on enum variant fields.
fn process_enum(
    generator: &mut BindingGenerator,
    item: &syn::ItemEnum,
    module_path: &[String],
) {
    let annotated = item.variants.iter().any(|v| {
        v.fields.iter().any(|f| has_bind_attr(&f.attrs))
    });
    if annotated {
        let package = generator.package().to_string();
        let qualified = make_full_path(
            &std::iter::once(package)
                .chain(module_path.iter().cloned())
                .collect::<Vec<_>>(),
            &item.ident.to_string(),
        );
        generator.diagnostics.push(Diagnostic::new(
            qualified,
            "bindings are only supported on struct fields, not enum variants",
        ));
    }
}

fn process_items(
    generator: &mut BindingGenerator,
    items: &[syn::Item],
    module_path: &mut Vec<String>,
    ctx: &SourceContext,
) {
    for item in items {
        match item {
            syn::Item::Struct(s) => process_struct(generator, s, module_path, ctx),
            syn::Item::Enum(e) => process_enum(generator, e, module_path),
            syn::Item::Mod(m) => {
                if let Some((_, nested)) = &m.content {
                    module_path.push(m.ident.to_string());
                    process_items(generator, nested, module_path, ctx);
                    module_path.pop();
                }
            }
            _ => {}
        }
    }
}

fn parse_source(source: &str, origin: &str) -> Result<syn::File, GenerateError> {
    syn::parse_file(source).map_err(|e| GenerateError::Parse {
        path: origin.to_string(),
        message: e.to_string(),
    })
}

fn collect_from_file(generator: &mut BindingGenerator, file: &syn::File) {
    let ctx = build_source_context(file);
    let mut module_path = Vec::new();
    process_items(generator, &file.items, &mut module_path, &ctx);
}

impl BindingGenerator {
    /// Parse a single Rust source file and collect its `#[bind]` annotations.
    ///
    /// # Example
    ///
    /// ```no_run
    /// # fn main() -> Result<(), viewbind_codegen::GenerateError> {
    /// use viewbind_codegen::BindingGenerator;
    ///
    /// let mut generator = BindingGenerator::new("myapp");
    /// generator.add_source_file("src/screens.rs")?;
    /// generator.write_to_dir("src/generated")?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn add_source_file(
        &mut self,
        path: impl AsRef<Path>,
    ) -> Result<&mut Self, GenerateError> {
        let path = path.as_ref();
        let source = fs::read_to_string(path)?;
        let file = parse_source(&source, &path.display().to_string())?;
        collect_from_file(self, &file);
        Ok(self)
    }

    /// Parse Rust source from a string and collect its `#[bind]` annotations.
    ///
    /// An unparsable string is recorded as a diagnostic rather than an
    /// immediate error, so fluent chains stay usable.
    pub fn add_source_str(&mut self, source: &str) -> &mut Self {
        match syn::parse_file(source) {
            Ok(file) => collect_from_file(self, &file),
            Err(e) => self.diagnostics.push(Diagnostic::new(
                "<source string>",
                format!("failed to parse: {e}"),
            )),
        }
        self
    }

    /// Recursively scan a directory for `.rs` files and collect their
    /// annotations.
    pub fn add_source_dir(
        &mut self,
        path: impl AsRef<Path>,
    ) -> Result<&mut Self, GenerateError> {
        for entry in WalkDir::new(path).into_iter().filter_map(|e| e.ok()) {
            let path = entry.path();
            if path.extension().map(|e| e == "rs").unwrap_or(false) {
                let source = fs::read_to_string(path)?;
                let file = parse_source(&source, &path.display().to_string())?;
                collect_from_file(self, &file);
            }
        }
        Ok(self)
    }
}
