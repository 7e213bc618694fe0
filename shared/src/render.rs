use crate::types::{PickerId, Theme};

/// The collaborator that owns a picker's markup.
///
/// The picker decides what the surface shows; a renderer only knows how to
/// show it. Implementations live next to the platform (the browser one is in
/// the frontend crate).
pub trait ViewRenderer {
    /// Builds the toggle and popup next to the bound element.
    fn render(&mut self, id: &PickerId, theme: Theme);

    /// Current text of the bound element, if any.
    fn input_value(&self) -> Option<String>;

    /// Class attribute of the bound element, used to pick a theme.
    fn input_classes(&self) -> String;

    fn set_input_value(&mut self, value: &str);

    fn set_labels(&mut self, hour: &str, minute: &str);

    /// Whether the popup is currently shown. This is the source of `buttonActive`.
    fn popup_open(&self) -> bool;

    fn set_popup_open(&mut self, open: bool);

    fn set_invalid(&mut self, invalid: bool);

    /// Enables or disables the caller's confirm control, looked up by element id.
    fn set_confirm_disabled(&mut self, target: &str, disabled: bool);

    /// Starts listening for page-wide pointer activations.
    fn arm_dismiss(&mut self);

    /// Stops listening for page-wide pointer activations.
    fn disarm_dismiss(&mut self);

    /// Removes everything `render` created.
    fn teardown(&mut self) {}
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    /// What a `RecordingRenderer` has been told so far.
    #[derive(Debug, Default)]
    pub struct SurfaceLog {
        pub rendered: Option<(PickerId, Theme)>,
        pub input: Option<String>,
        pub classes: String,
        pub labels: (String, String),
        pub popup_open: bool,
        pub invalid: bool,
        pub confirm: Option<(String, bool)>,
        pub armed: bool,
        pub arm_calls: usize,
        pub disarm_calls: usize,
        pub torn_down: bool,
    }

    /// In-memory renderer. The log is shared so tests can inspect it while the
    /// picker owns the renderer.
    #[derive(Debug, Clone, Default)]
    pub struct RecordingRenderer {
        pub log: Rc<RefCell<SurfaceLog>>,
    }

    impl RecordingRenderer {
        pub fn with_input(value: &str) -> Self {
            let renderer = Self::default();
            renderer.log.borrow_mut().input = Some(value.to_string());
            renderer
        }

        pub fn with_classes(classes: &str) -> Self {
            let renderer = Self::default();
            renderer.log.borrow_mut().classes = classes.to_string();
            renderer
        }
    }

    impl ViewRenderer for RecordingRenderer {
        fn render(&mut self, id: &PickerId, theme: Theme) {
            self.log.borrow_mut().rendered = Some((id.clone(), theme));
        }

        fn input_value(&self) -> Option<String> {
            self.log.borrow().input.clone()
        }

        fn input_classes(&self) -> String {
            self.log.borrow().classes.clone()
        }

        fn set_input_value(&mut self, value: &str) {
            self.log.borrow_mut().input = Some(value.to_string());
        }

        fn set_labels(&mut self, hour: &str, minute: &str) {
            self.log.borrow_mut().labels = (hour.to_string(), minute.to_string());
        }

        fn popup_open(&self) -> bool {
            self.log.borrow().popup_open
        }

        fn set_popup_open(&mut self, open: bool) {
            self.log.borrow_mut().popup_open = open;
        }

        fn set_invalid(&mut self, invalid: bool) {
            self.log.borrow_mut().invalid = invalid;
        }

        fn set_confirm_disabled(&mut self, target: &str, disabled: bool) {
            self.log.borrow_mut().confirm = Some((target.to_string(), disabled));
        }

        fn arm_dismiss(&mut self) {
            let mut log = self.log.borrow_mut();
            log.armed = true;
            log.arm_calls += 1;
        }

        fn disarm_dismiss(&mut self) {
            let mut log = self.log.borrow_mut();
            log.armed = false;
            log.disarm_calls += 1;
        }

        fn teardown(&mut self) {
            self.log.borrow_mut().torn_down = true;
        }
    }
}
