//! Element model: the capability traits a host's child elements implement,
//! and the shared handles generated binders assign into target fields.
//!
//! Concrete UI widgets live outside this crate. viewbind only fixes the
//! contract: an element knows its id, can enumerate descendants, and accepts
//! click handlers. Item-selection handling is a separate capability
//! ([`AdapterElement`]) that adapter-backed widgets opt into by contract,
//! exposed through [`Element::as_adapter`].

use std::any::Any;
use std::sync::Arc;

use parking_lot::Mutex;

use crate::error::BindError;
use crate::finder::Source;

/// Numeric identifier used to look an element up within its host.
pub type ElementId = u32;

/// Handler invoked when an element is clicked.
pub type ClickHandler = Arc<dyn Fn(ElementId) + Send + Sync>;

/// Handler invoked when an item inside an adapter-backed element is selected.
/// The second argument is the selected position.
pub type ItemClickHandler = Arc<dyn Fn(ElementId, usize) + Send + Sync>;

/// Shared ownership of an element behind a lock.
///
/// Generated binders declare concrete fields as `Option<Shared<T>>`; the
/// interface form is `Shared<dyn Element>`.
pub type Shared<T> = Arc<Mutex<T>>;

/// The element capability. Implemented by every bindable widget type.
pub trait Element: Any + Send {
    /// The element's id within its host.
    fn id(&self) -> ElementId;

    /// Search this element's descendants for `id`. Leaf elements keep the
    /// default.
    fn find_child(&self, _id: ElementId) -> Option<ElementHandle> {
        None
    }

    /// Attach a click handler, replacing any previous one.
    fn attach_click(&mut self, handler: ClickHandler);

    /// The adapter capability of this element, if it has one.
    ///
    /// Item-click bindings are only honored for elements that return `Some`
    /// here and at generation time only for registered adapter-capable types.
    fn as_adapter(&mut self) -> Option<&mut dyn AdapterElement> {
        None
    }
}

/// Capability for elements backed by an adapter (lists, grids) that report
/// item selection.
pub trait AdapterElement: Element {
    /// Attach an item-selection handler, replacing any previous one.
    fn attach_item_click(&mut self, handler: ItemClickHandler);
}

/// A cheap-to-clone, type-erased handle to a live element.
///
/// The handle carries two views of the same allocation: a `dyn Element` view
/// for the operations every element supports, and an erased `Any` view so
/// [`cast_required`](ElementHandle::cast_required) can recover the concrete
/// `Shared<T>` a generated field declares.
#[derive(Clone)]
pub struct ElementHandle {
    id: ElementId,
    erased: Arc<dyn Any + Send + Sync>,
    element: Shared<dyn Element>,
}

impl ElementHandle {
    /// Wrap a concrete element.
    pub fn new<E: Element>(element: E) -> Self {
        let id = element.id();
        let cell = Arc::new(Mutex::new(element));
        Self {
            id,
            erased: cell.clone(),
            element: cell,
        }
    }

    /// The wrapped element's id.
    pub fn id(&self) -> ElementId {
        self.id
    }

    /// The interface view of the element.
    pub fn as_element(&self) -> Shared<dyn Element> {
        self.element.clone()
    }

    /// Try to recover the concrete element type.
    pub fn cast<E: Element>(&self) -> Option<Shared<E>> {
        self.erased.clone().downcast::<Mutex<E>>().ok()
    }

    /// Recover the concrete element type, failing with a wrong-kind error
    /// that names the id, the field, and the host context.
    pub fn cast_required<E: Element>(
        &self,
        field: &str,
        source: &Source,
    ) -> Result<Shared<E>, BindError> {
        self.cast::<E>().ok_or_else(|| BindError::WrongKind {
            id: self.id,
            field: field.to_string(),
            context: source.context().to_string(),
        })
    }

    /// Search this element's subtree (including the element itself) for `id`.
    pub fn find(&self, id: ElementId) -> Option<ElementHandle> {
        if self.id == id {
            return Some(self.clone());
        }
        self.element.lock().find_child(id)
    }

    /// Attach a click handler to the element.
    pub fn attach_click(&self, handler: ClickHandler) {
        self.element.lock().attach_click(handler);
    }

    /// Attach an item-selection handler if the element is adapter-capable.
    /// Returns whether the handler was attached.
    pub fn attach_item_click(&self, handler: ItemClickHandler) -> bool {
        let mut element = self.element.lock();
        match element.as_adapter() {
            Some(adapter) => {
                adapter.attach_item_click(handler);
                true
            }
            None => false,
        }
    }
}

impl std::fmt::Debug for ElementHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ElementHandle").field("id", &self.id).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Plain {
        id: ElementId,
        clicks: usize,
    }

    impl Element for Plain {
        fn id(&self) -> ElementId {
            self.id
        }

        fn attach_click(&mut self, _handler: ClickHandler) {
            self.clicks += 1;
        }
    }

    struct List {
        id: ElementId,
        item_handlers: usize,
    }

    impl Element for List {
        fn id(&self) -> ElementId {
            self.id
        }

        fn attach_click(&mut self, _handler: ClickHandler) {}

        fn as_adapter(&mut self) -> Option<&mut dyn AdapterElement> {
            Some(self)
        }
    }

    impl AdapterElement for List {
        fn attach_item_click(&mut self, _handler: ItemClickHandler) {
            self.item_handlers += 1;
        }
    }

    #[test]
    fn cast_recovers_concrete_type() {
        let handle = ElementHandle::new(Plain { id: 7, clicks: 0 });
        assert_eq!(handle.id(), 7);
        let plain = handle.cast::<Plain>().expect("same type");
        assert_eq!(plain.lock().id, 7);
        assert!(handle.cast::<List>().is_none());
    }

    #[test]
    fn find_matches_self() {
        let handle = ElementHandle::new(Plain { id: 7, clicks: 0 });
        assert!(handle.find(7).is_some());
        assert!(handle.find(8).is_none());
    }

    #[test]
    fn item_click_requires_adapter_capability() {
        let handler: ItemClickHandler = Arc::new(|_, _| {});
        let plain = ElementHandle::new(Plain { id: 1, clicks: 0 });
        assert!(!plain.attach_item_click(handler.clone()));

        let list = ElementHandle::new(List {
            id: 2,
            item_handlers: 0,
        });
        assert!(list.attach_item_click(handler));
        assert_eq!(list.cast::<List>().unwrap().lock().item_handlers, 1);
    }
}
