//! Hand-rolled widgets implementing the viewbind element contracts.

use viewbind::{
    AdapterElement, ClickHandler, Element, ElementHandle, ElementId, ItemClickHandler,
};

/// Static text display.
pub struct Label {
    id: ElementId,
    pub text: String,
}

impl Label {
    pub fn new(id: ElementId, text: impl Into<String>) -> Self {
        Self {
            id,
            text: text.into(),
        }
    }
}

impl Element for Label {
    fn id(&self) -> ElementId {
        self.id
    }

    fn attach_click(&mut self, _handler: ClickHandler) {}
}

/// Push button that remembers its click handler.
pub struct Button {
    id: ElementId,
    handler: Option<ClickHandler>,
}

impl Button {
    pub fn new(id: ElementId) -> Self {
        Self { id, handler: None }
    }

    /// Simulate a user click.
    pub fn press(&self) {
        if let Some(handler) = &self.handler {
            handler(self.id);
        }
    }
}

impl Element for Button {
    fn id(&self) -> ElementId {
        self.id
    }

    fn attach_click(&mut self, handler: ClickHandler) {
        self.handler = Some(handler);
    }
}

/// Scrolling list backed by a string adapter.
pub struct ListPane {
    id: ElementId,
    pub items: Vec<String>,
    handler: Option<ItemClickHandler>,
}

impl ListPane {
    pub fn new(id: ElementId, items: Vec<String>) -> Self {
        Self {
            id,
            items,
            handler: None,
        }
    }

    /// Simulate the user selecting the item at `position`.
    pub fn select(&self, position: usize) {
        if let Some(handler) = &self.handler {
            handler(self.id, position);
        }
    }
}

impl Element for ListPane {
    fn id(&self) -> ElementId {
        self.id
    }

    fn attach_click(&mut self, _handler: ClickHandler) {}

    fn as_adapter(&mut self) -> Option<&mut dyn AdapterElement> {
        Some(self)
    }
}

impl AdapterElement for ListPane {
    fn attach_item_click(&mut self, handler: ItemClickHandler) {
        self.handler = Some(handler);
    }
}

/// Container that owns child elements and answers subtree lookups.
pub struct Panel {
    id: ElementId,
    children: Vec<ElementHandle>,
}

impl Panel {
    pub fn new(id: ElementId) -> Self {
        Self {
            id,
            children: Vec::new(),
        }
    }

    pub fn push(&mut self, child: ElementHandle) {
        self.children.push(child);
    }
}

impl Element for Panel {
    fn id(&self) -> ElementId {
        self.id
    }

    fn find_child(&self, id: ElementId) -> Option<ElementHandle> {
        self.children.iter().find_map(|child| child.find(id))
    }

    fn attach_click(&mut self, _handler: ClickHandler) {}
}
