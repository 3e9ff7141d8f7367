//! End-to-end dispatch tests: hand-written binders shaped like generated
//! units, registered through `register_binder!` and invoked through the
//! public facade.

use std::any::Any;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use viewbind::{
    AdapterElement, BindError, BindTarget, Binder, ClickHandler, Element, ElementHandle, ElementId,
    Finder, ItemClickHandler, Shared, Source, SymbolTable, WindowHost, downcast_target,
};

// ---- mock element tree ----

struct Label {
    id: ElementId,
    text: String,
}

impl Element for Label {
    fn id(&self) -> ElementId {
        self.id
    }

    fn attach_click(&mut self, _handler: ClickHandler) {}
}

struct Button {
    id: ElementId,
    handler: Option<ClickHandler>,
}

impl Button {
    fn press(&self) {
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

struct ListPane {
    id: ElementId,
    handler: Option<ItemClickHandler>,
}

impl ListPane {
    fn select(&self, position: usize) {
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

struct Panel {
    id: ElementId,
    children: Vec<ElementHandle>,
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

fn full_content() -> ElementHandle {
    ElementHandle::new(Panel {
        id: 1,
        children: vec![
            ElementHandle::new(Label {
                id: 1001,
                text: "hello".to_string(),
            }),
            ElementHandle::new(Button {
                id: 1002,
                handler: None,
            }),
            ElementHandle::new(ListPane {
                id: 1003,
                handler: None,
            }),
        ],
    })
}

struct TestWindow {
    content: Option<ElementHandle>,
}

impl WindowHost for TestWindow {
    fn content_root(&self) -> Option<ElementHandle> {
        self.content.clone()
    }

    fn describe(&self) -> String {
        "TestWindow".to_string()
    }

    fn symbols(&self) -> SymbolTable {
        SymbolTable::from([(1001, "txt_title".to_string()), (9999, "btn_confirm".to_string())])
    }
}

// ---- targets and their binders, shaped like generator output ----

#[derive(Default)]
struct MainScreen {
    title: Option<Shared<Label>>,
    submit: Option<ElementHandle>,
    items: Option<ElementHandle>,
    clicks: Arc<AtomicUsize>,
    last_selected: Arc<AtomicUsize>,
}

impl BindTarget for MainScreen {
    fn type_path(&self) -> &'static str {
        "itest::MainScreen"
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn click_handler(&self) -> ClickHandler {
        let clicks = self.clicks.clone();
        Arc::new(move |_id| {
            clicks.fetch_add(1, Ordering::SeqCst);
        })
    }

    fn item_click_handler(&self) -> ItemClickHandler {
        let last = self.last_selected.clone();
        Arc::new(move |_id, position| {
            last.store(position, Ordering::SeqCst);
        })
    }
}

#[derive(Default)]
struct MainScreenBinder;

impl Binder for MainScreenBinder {
    fn bind(
        &self,
        finder: &Finder,
        target: &mut dyn BindTarget,
        source: &Source,
    ) -> Result<(), BindError> {
        let target = downcast_target::<MainScreen>(target)?;
        let element = finder.find_required(source, 1001, "title")?;
        target.title = Some(element.cast_required::<Label>("title", source)?);
        let element = finder.find_required(source, 1002, "submit")?;
        target.submit = Some(element.clone());
        element.attach_click(target.click_handler());
        match finder.find_optional(source, 1003) {
            Some(element) => {
                target.items = Some(element.clone());
                element.attach_item_click(target.item_click_handler());
            }
            None => target.items = None,
        }
        Ok(())
    }

    fn unbind(&self, target: &mut dyn BindTarget) -> Result<(), BindError> {
        let target = downcast_target::<MainScreen>(target)?;
        target.title = None;
        target.submit = None;
        target.items = None;
        Ok(())
    }
}

viewbind::register_binder!("itest::MainScreen", MainScreenBinder);

#[derive(Default)]
struct DetailScreen {
    base: MainScreen,
}

impl BindTarget for DetailScreen {
    fn type_path(&self) -> &'static str {
        "itest::DetailScreen"
    }

    fn ancestry(&self) -> &'static [&'static str] {
        &["itest::MainScreen"]
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn ancestor_target_mut(&mut self) -> Option<&mut dyn BindTarget> {
        Some(&mut self.base)
    }
}

#[derive(Default)]
struct StrictForm {
    confirm: Option<ElementHandle>,
}

impl BindTarget for StrictForm {
    fn type_path(&self) -> &'static str {
        "itest::StrictForm"
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

#[derive(Default)]
struct StrictFormBinder;

impl Binder for StrictFormBinder {
    fn bind(
        &self,
        finder: &Finder,
        target: &mut dyn BindTarget,
        source: &Source,
    ) -> Result<(), BindError> {
        let target = downcast_target::<StrictForm>(target)?;
        let element = finder.find_required(source, 9999, "confirm")?;
        target.confirm = Some(element.clone());
        Ok(())
    }

    fn unbind(&self, target: &mut dyn BindTarget) -> Result<(), BindError> {
        let target = downcast_target::<StrictForm>(target)?;
        target.confirm = None;
        Ok(())
    }
}

viewbind::register_binder!("itest::StrictForm", StrictFormBinder);

#[derive(Default)]
struct UnboundWidget;

impl BindTarget for UnboundWidget {
    fn type_path(&self) -> &'static str {
        "itest::UnboundWidget"
    }

    fn ancestry(&self) -> &'static [&'static str] {
        &["std::any::Any"]
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

// ---- tests ----

#[test]
fn bind_window_populates_fields_and_attaches_handlers() {
    let window = TestWindow {
        content: Some(full_content()),
    };
    let mut screen = MainScreen::default();
    viewbind::bind_window_in(&mut screen, &window).expect("bind succeeds");

    let title = screen.title.as_ref().expect("title bound");
    assert_eq!(title.lock().text, "hello");
    let submit = screen.submit.as_ref().expect("submit bound");
    assert_eq!(submit.id(), 1002);

    submit.cast::<Button>().expect("button").lock().press();
    assert_eq!(screen.clicks.load(Ordering::SeqCst), 1);

    let items = screen.items.as_ref().expect("items bound");
    items.cast::<ListPane>().expect("list").lock().select(4);
    assert_eq!(screen.last_selected.load(Ordering::SeqCst), 4);
}

#[test]
fn unbind_clears_every_bound_field() {
    let window = TestWindow {
        content: Some(full_content()),
    };
    let mut screen = MainScreen::default();
    viewbind::bind_window_in(&mut screen, &window).expect("bind succeeds");
    viewbind::unbind(&mut screen).expect("unbind succeeds");
    assert!(screen.title.is_none());
    assert!(screen.submit.is_none());
    assert!(screen.items.is_none());
}

#[test]
fn derived_target_binds_through_ancestor_binder() {
    let window = TestWindow {
        content: Some(full_content()),
    };
    let mut detail = DetailScreen::default();
    viewbind::bind_window_in(&mut detail, &window).expect("ancestor binder applies");
    assert!(detail.base.title.is_some());
    assert!(detail.base.submit.is_some());

    viewbind::unbind(&mut detail).expect("ancestor unbind applies");
    assert!(detail.base.title.is_none());
}

#[test]
fn missing_required_element_reports_symbol_field_and_context() {
    let window = TestWindow {
        content: Some(full_content()),
    };
    let mut form = StrictForm::default();
    let err = viewbind::bind_window_in(&mut form, &window).unwrap_err();
    assert!(err.to_string().contains("itest::StrictForm"));

    let cause = std::error::Error::source(&err).expect("wrapped cause");
    let msg = cause.to_string();
    assert!(msg.contains("btn_confirm"));
    assert!(msg.contains("9999"));
    assert!(msg.contains("confirm"));
    assert!(msg.contains("TestWindow"));
    assert!(msg.contains("#[nullable]"));
}

#[test]
fn optional_binding_tolerates_absent_element() {
    let content = ElementHandle::new(Panel {
        id: 1,
        children: vec![
            ElementHandle::new(Label {
                id: 1001,
                text: "hello".to_string(),
            }),
            ElementHandle::new(Button {
                id: 1002,
                handler: None,
            }),
        ],
    });
    let window = TestWindow {
        content: Some(content),
    };
    let mut screen = MainScreen::default();
    viewbind::bind_window_in(&mut screen, &window).expect("optional id 1003 may be absent");
    assert!(screen.title.is_some());
    assert!(screen.items.is_none());
}

#[test]
fn target_without_binder_binds_as_noop() {
    let window = TestWindow {
        content: Some(full_content()),
    };
    let mut widget = UnboundWidget;
    viewbind::bind_window_in(&mut widget, &window).expect("no-op bind");
    viewbind::unbind(&mut widget).expect("no-op unbind");
}

#[test]
fn self_hosting_window_binds_in_one_call() {
    struct OwnedScreen {
        inner: MainScreen,
        content: ElementHandle,
    }

    impl BindTarget for OwnedScreen {
        fn type_path(&self) -> &'static str {
            "itest::OwnedScreen"
        }

        fn ancestry(&self) -> &'static [&'static str] {
            &["itest::MainScreen"]
        }

        fn as_any(&self) -> &dyn Any {
            self
        }

        fn as_any_mut(&mut self) -> &mut dyn Any {
            self
        }

        fn ancestor_target_mut(&mut self) -> Option<&mut dyn BindTarget> {
            Some(&mut self.inner)
        }
    }

    impl WindowHost for OwnedScreen {
        fn content_root(&self) -> Option<ElementHandle> {
            Some(self.content.clone())
        }

        fn describe(&self) -> String {
            "OwnedScreen".to_string()
        }
    }

    let mut screen = OwnedScreen {
        inner: MainScreen::default(),
        content: full_content(),
    };
    viewbind::bind_window(&mut screen).expect("self-hosted bind");
    assert!(screen.inner.title.is_some());
}
