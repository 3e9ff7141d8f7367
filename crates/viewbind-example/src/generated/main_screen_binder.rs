// Binder units for the viewbind example crate.
// Regenerate with `cargo run --bin generate-binders`.

use super::*;

#[derive(Default)]
#[allow(non_camel_case_types)]
pub struct MainScreenBinder;

impl viewbind::Binder for MainScreenBinder {
    fn bind(
        &self,
        finder: &viewbind::Finder,
        target: &mut dyn viewbind::BindTarget,
        source: &viewbind::Source,
    ) -> Result<(), viewbind::BindError> {
        let target = viewbind::downcast_target::<crate::MainScreen>(target)?;
        let element = finder.find_required(source, 1001, "title")?;
        target.title = Some(element.cast_required::<crate::widgets::Label>("title", source)?);
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

    fn unbind(&self, target: &mut dyn viewbind::BindTarget) -> Result<(), viewbind::BindError> {
        let target = viewbind::downcast_target::<crate::MainScreen>(target)?;
        target.title = None;
        target.submit = None;
        target.items = None;
        Ok(())
    }
}

viewbind::register_binder!("viewbind_example::MainScreen", MainScreenBinder);
