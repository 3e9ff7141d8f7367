//! Binds the demo screen against a hand-built widget tree and exercises the
//! attached handlers.

use viewbind::{ElementHandle, SymbolTable, WindowHost};
use viewbind_example::MainScreen;
use viewbind_example::widgets::{Button, Label, ListPane, Panel};

struct DemoWindow {
    content: ElementHandle,
}

impl DemoWindow {
    fn new() -> Self {
        let mut root = Panel::new(1);
        root.push(ElementHandle::new(Label::new(1001, "viewbind demo")));
        root.push(ElementHandle::new(Button::new(1002)));
        root.push(ElementHandle::new(ListPane::new(
            1003,
            vec!["alpha".into(), "beta".into(), "gamma".into()],
        )));
        Self {
            content: ElementHandle::new(root),
        }
    }
}

impl WindowHost for DemoWindow {
    fn content_root(&self) -> Option<ElementHandle> {
        Some(self.content.clone())
    }

    fn describe(&self) -> String {
        "DemoWindow".to_string()
    }

    fn symbols(&self) -> SymbolTable {
        SymbolTable::from([
            (1001, "lbl_title".to_string()),
            (1002, "btn_submit".to_string()),
            (1003, "lst_items".to_string()),
        ])
    }
}

fn main() {
    let window = DemoWindow::new();
    let mut screen = MainScreen::default();

    viewbind::bind_window_in(&mut screen, &window).expect("binding failed");

    let title = screen.title.as_ref().expect("title bound");
    println!("title: {}", title.lock().text);

    let submit = screen.submit.as_ref().expect("submit bound");
    submit
        .cast::<Button>()
        .expect("submit is a Button")
        .lock()
        .press();

    let items = screen.items.as_ref().expect("items bound");
    items
        .cast::<ListPane>()
        .expect("items is a ListPane")
        .lock()
        .select(1);

    viewbind::unbind(&mut screen).expect("unbinding failed");
    println!("unbound; title cleared: {}", screen.title.is_none());
}
