//! Finders: how generated binders locate elements inside a host.
//!
//! Three host kinds exist - an element container, a window, and a dialog.
//! Each host trait answers the same three questions: where does the lookup
//! start, how should failures describe this host, and which symbolic names do
//! the numeric ids carry. A [`Source`] snapshots those answers so the facade
//! can hand a binder both the mutable target and the lookup root without
//! aliasing the host.

use std::collections::HashMap;

use crate::element::{ElementHandle, ElementId};
use crate::error::BindError;

/// Table of symbolic resource names per element id used in diagnostics.
pub type SymbolTable = HashMap<ElementId, String>;

/// A host that is itself an element containing its children.
pub trait ElementHost {
    /// The element the lookup starts from.
    fn root(&self) -> ElementHandle;

    /// Human-readable description used in failure messages.
    fn describe(&self) -> String;

    /// Symbolic names for this host's element ids.
    fn symbols(&self) -> SymbolTable {
        SymbolTable::new()
    }
}

/// A window-like host whose content tree supplies the lookup root.
pub trait WindowHost {
    /// The content root, or `None` before content has been installed.
    fn content_root(&self) -> Option<ElementHandle>;

    fn describe(&self) -> String;

    fn symbols(&self) -> SymbolTable {
        SymbolTable::new()
    }
}

/// A dialog-like host whose content tree supplies the lookup root.
pub trait DialogHost {
    /// The content root, or `None` before content has been installed.
    fn content_root(&self) -> Option<ElementHandle>;

    fn describe(&self) -> String;

    fn symbols(&self) -> SymbolTable {
        SymbolTable::new()
    }
}

/// An owned lookup snapshot taken from a host.
///
/// Binders receive the source by reference; the facade builds it before
/// mutably borrowing the target, which is what lets the `bind(target)` entry
/// points treat one value as both target and host.
#[derive(Debug, Clone)]
pub struct Source {
    root: Option<ElementHandle>,
    context: String,
    symbols: SymbolTable,
}

impl Source {
    /// Snapshot an element-container host.
    pub fn of_element_host(host: &dyn ElementHost) -> Self {
        Self {
            root: Some(host.root()),
            context: host.describe(),
            symbols: host.symbols(),
        }
    }

    /// Snapshot a window host.
    pub fn of_window(host: &dyn WindowHost) -> Self {
        Self {
            root: host.content_root(),
            context: host.describe(),
            symbols: host.symbols(),
        }
    }

    /// Snapshot a dialog host.
    pub fn of_dialog(host: &dyn DialogHost) -> Self {
        Self {
            root: host.content_root(),
            context: host.describe(),
            symbols: host.symbols(),
        }
    }

    /// The diagnostic context for this lookup root.
    pub fn context(&self) -> &str {
        &self.context
    }

    /// The symbolic name for `id`, if the host resolved one.
    pub fn symbol_for(&self, id: ElementId) -> Option<&str> {
        self.symbols.get(&id).map(String::as_str)
    }
}

/// The host kind a bind call runs against.
///
/// The kind is fixed by the facade entry point and passed through to the
/// generated binder, which performs all lookups with it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Finder {
    /// Lookup within an element container; the root itself may match.
    Element,
    /// Lookup within a window's content tree.
    Window,
    /// Lookup within a dialog's content tree.
    Dialog,
}

impl Finder {
    /// Locate an element by id, `None` when absent. Absence is not an error.
    pub fn find_optional(&self, source: &Source, id: ElementId) -> Option<ElementHandle> {
        source.root.as_ref().and_then(|root| root.find(id))
    }

    /// Locate an element by id, failing loudly when absent. The failure names
    /// the symbolic resource name when the host resolved one, the numeric id,
    /// the field being bound, and the host context.
    pub fn find_required(
        &self,
        source: &Source,
        id: ElementId,
        field: &str,
    ) -> Result<ElementHandle, BindError> {
        self.find_optional(source, id)
            .ok_or_else(|| BindError::RequiredLookup {
                id,
                symbol: source
                    .symbol_for(id)
                    .map(str::to_string)
                    .unwrap_or_else(|| format!("#{id}")),
                field: field.to_string(),
                context: source.context.clone(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::{ClickHandler, Element};

    struct Leaf(ElementId);

    impl Element for Leaf {
        fn id(&self) -> ElementId {
            self.0
        }

        fn attach_click(&mut self, _handler: ClickHandler) {}
    }

    struct Panel {
        id: ElementId,
        children: Vec<ElementHandle>,
    }

    impl Element for Panel {
        fn id(&self) -> ElementId {
            self.id
        }

        fn find_child(&self, id: ElementId) -> Option<ElementHandle> {
            self.children.iter().find_map(|c| c.find(id))
        }

        fn attach_click(&mut self, _handler: ClickHandler) {}
    }

    struct Window {
        content: Option<ElementHandle>,
    }

    impl WindowHost for Window {
        fn content_root(&self) -> Option<ElementHandle> {
            self.content.clone()
        }

        fn describe(&self) -> String {
            "TestWindow".to_string()
        }

        fn symbols(&self) -> SymbolTable {
            SymbolTable::from([(1001, "txt_title".to_string())])
        }
    }

    fn window_with_leaf(id: ElementId) -> Window {
        let panel = Panel {
            id: 1,
            children: vec![ElementHandle::new(Leaf(id))],
        };
        Window {
            content: Some(ElementHandle::new(panel)),
        }
    }

    #[test]
    fn optional_lookup_absent_is_silent() {
        let source = Source::of_window(&window_with_leaf(1001));
        assert!(Finder::Window.find_optional(&source, 9999).is_none());
        assert!(Finder::Window.find_optional(&source, 1001).is_some());
    }

    #[test]
    fn required_lookup_failure_names_symbol_and_id() {
        let source = Source::of_window(&window_with_leaf(42));
        let err = Finder::Window
            .find_required(&source, 1001, "title")
            .unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("txt_title"));
        assert!(msg.contains("1001"));
        assert!(msg.contains("TestWindow"));
    }

    #[test]
    fn required_lookup_without_symbol_falls_back_to_id() {
        let source = Source::of_window(&window_with_leaf(42));
        let err = Finder::Window
            .find_required(&source, 7777, "body")
            .unwrap_err();
        assert!(err.to_string().contains("#7777"));
    }

    #[test]
    fn empty_window_locates_nothing() {
        let source = Source::of_window(&Window { content: None });
        assert!(Finder::Window.find_optional(&source, 1).is_none());
    }
}
