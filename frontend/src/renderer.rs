use std::cell::RefCell;
use std::rc::Weak;

use leptos::*;
use shared::{ActivationTarget, Picker, PickerId, StepAction, Theme, ViewRenderer};
use wasm_bindgen::JsCast;
use web_sys::{Element, HtmlElement, HtmlInputElement};

use crate::components::{SurfaceState, TimePickerSurface};
use crate::utils::document;

pub type SharedPicker = RefCell<Picker<DomSurface>>;

/// Renders a picker's surface with Leptos, right after the bound input.
///
/// The surface's signals and view live under one reactive owner; teardown
/// disposes it.
pub struct DomSurface {
    input: HtmlInputElement,
    container: Option<Element>,
    state: SurfaceState,
    owner: Option<Owner>,
    disposer: Option<Disposer>,
    picker: Weak<SharedPicker>,
}

impl DomSurface {
    /// `picker` points back at the picker that will own this surface; DOM
    /// callbacks go through it.
    pub fn new(input: HtmlInputElement, picker: Weak<SharedPicker>) -> Self {
        let ((state, owner), disposer) =
            as_child_of_current_owner(|_: ()| (SurfaceState::new(), Owner::current()))(());
        Self {
            input,
            container: None,
            state,
            owner,
            disposer: Some(disposer),
            picker,
        }
    }

    pub fn input(&self) -> &HtmlInputElement {
        &self.input
    }

    /// False once torn down; the signals are disposed by then.
    fn is_live(&self) -> bool {
        self.disposer.is_some()
    }
}

/// Runs `f` on the picker unless it is gone or already borrowed.
pub(crate) fn with_picker(picker: &Weak<SharedPicker>, f: impl FnOnce(&mut Picker<DomSurface>)) {
    let Some(picker) = picker.upgrade() else {
        return;
    };
    match picker.try_borrow_mut() {
        Ok(mut picker) => f(&mut picker),
        Err(_) => log::warn!("Ignoring DOM event while the picker is notifying listeners"),
    };
}

impl ViewRenderer for DomSurface {
    fn render(&mut self, id: &PickerId, theme: Theme) {
        if !self.is_live() {
            return;
        }
        self.state.theme.set(theme);

        let Some(document) = document() else {
            log::error!("No document to render picker {} into", id);
            return;
        };
        let container = match document.create_element("div") {
            Ok(container) => container,
            Err(_) => {
                log::error!("Could not create a container for picker {}", id);
                return;
            }
        };
        container.set_class_name("timepicker-host");
        if self.input.after_with_node_1(&container).is_err() {
            log::error!("Could not insert picker {} next to its input", id);
            return;
        }
        let _ = self.input.set_attribute("data-timepicker", id.as_str());

        let state = self.state;
        let picker = self.picker.clone();
        let surface_id = id.to_string();

        let host: HtmlElement = container.clone().unchecked_into();
        let mount = move || {
            leptos::mount_to(host, move || {
                let toggle_picker = picker.clone();
                let on_toggle =
                    Callback::new(move |_: ()| with_picker(&toggle_picker, |p| p.toggle()));
                let step_picker = picker.clone();
                let on_step = Callback::new(move |action: StepAction| {
                    with_picker(&step_picker, |p| p.step(action))
                });
                let on_activation = Callback::new(move |target: ActivationTarget| {
                    with_picker(&picker, |p| p.pointer_activated(target))
                });

                view! {
                    <TimePickerSurface
                        id=surface_id
                        state=state
                        on_toggle=on_toggle
                        on_step=on_step
                        on_activation=on_activation
                    />
                }
            })
        };
        match self.owner {
            Some(owner) => with_owner(owner, mount),
            None => mount(),
        }

        self.container = Some(container);
    }

    fn input_value(&self) -> Option<String> {
        Some(self.input.value())
    }

    fn input_classes(&self) -> String {
        self.input.class_name()
    }

    fn set_input_value(&mut self, value: &str) {
        self.input.set_value(value);
    }

    fn set_labels(&mut self, hour: &str, minute: &str) {
        if self.is_live() {
            self.state.hour_label.set(hour.to_string());
            self.state.minute_label.set(minute.to_string());
        }
    }

    fn popup_open(&self) -> bool {
        self.is_live() && self.state.open.get_untracked()
    }

    fn set_popup_open(&mut self, open: bool) {
        if self.is_live() {
            self.state.open.set(open);
        }
    }

    fn set_invalid(&mut self, invalid: bool) {
        let _ = self.input.class_list().toggle_with_force("invalid", invalid);
        if self.is_live() {
            self.state.invalid.set(invalid);
        }
    }

    fn set_confirm_disabled(&mut self, target: &str, disabled: bool) {
        let element = document().and_then(|document| document.get_element_by_id(target));
        let Some(element) = element else {
            log::warn!("Confirm control '{}' not found", target);
            return;
        };
        let _ = if disabled {
            element.set_attribute("disabled", "")
        } else {
            element.remove_attribute("disabled")
        };
    }

    fn arm_dismiss(&mut self) {
        if self.is_live() {
            self.state.dismiss_armed.set(true);
        }
    }

    fn disarm_dismiss(&mut self) {
        if self.is_live() {
            self.state.dismiss_armed.set(false);
        }
    }

    fn teardown(&mut self) {
        if let Some(container) = self.container.take() {
            container.remove();
        }
        // Runs the effects' cleanups, which drops the document click listener.
        self.owner = None;
        drop(self.disposer.take());
        let _ = self.input.remove_attribute("data-timepicker");
    }
}
