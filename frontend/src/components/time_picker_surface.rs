use leptos::*;
use shared::{ActivationTarget, Field, StepAction, Theme};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;

use super::StepField;

/// Reactive view of one picker's surface. The renderer writes these signals;
/// the view only reads them.
#[derive(Clone, Copy)]
pub struct SurfaceState {
    pub open: RwSignal<bool>,
    pub hour_label: RwSignal<String>,
    pub minute_label: RwSignal<String>,
    pub invalid: RwSignal<bool>,
    pub theme: RwSignal<Theme>,
    pub dismiss_armed: RwSignal<bool>,
}

impl SurfaceState {
    pub fn new() -> Self {
        Self {
            open: create_rw_signal(false),
            hour_label: create_rw_signal("00".to_string()),
            minute_label: create_rw_signal("00".to_string()),
            invalid: create_rw_signal(false),
            theme: create_rw_signal(Theme::System),
            dismiss_armed: create_rw_signal(false),
        }
    }
}

impl Default for SurfaceState {
    fn default() -> Self {
        Self::new()
    }
}

pub fn surface_class(theme: Theme, invalid: bool) -> String {
    let mut classes = vec!["timepicker"];
    match theme {
        Theme::Dark => classes.push("timepicker-dark"),
        Theme::Light => classes.push("timepicker-light"),
        Theme::System => {}
    }
    if invalid {
        classes.push("timepicker-invalid");
    }
    classes.join(" ")
}

pub fn popup_class(open: bool) -> &'static str {
    if open {
        "timepicker-popup open"
    } else {
        "timepicker-popup"
    }
}

/// Toggle button plus popup with the hour and minute columns.
#[component]
pub fn TimePickerSurface(
    #[prop(into)] id: String,
    state: SurfaceState,
    #[prop(into)] on_toggle: Callback<()>,
    #[prop(into)] on_step: Callback<StepAction>,
    #[prop(into)] on_activation: Callback<ActivationTarget>,
) -> impl IntoView {
    let toggle_ref = create_node_ref::<html::Button>();
    let popup_ref = create_node_ref::<html::Div>();

    // One document listener while armed; released when disarmed or unmounted.
    create_effect(move |_| {
        if state.dismiss_armed.get() {
            let on_click = move |event: web_sys::MouseEvent| {
                let Some(target) = event.target() else {
                    return;
                };
                let target_node: web_sys::Node = target.unchecked_into();
                let in_popup = popup_ref
                    .get()
                    .map(|popup| popup.contains(Some(&target_node)))
                    .unwrap_or(false);
                let on_toggle_button = toggle_ref
                    .get()
                    .map(|toggle| toggle.contains(Some(&target_node)))
                    .unwrap_or(false);

                let activation = if in_popup {
                    ActivationTarget::Popup
                } else if on_toggle_button {
                    ActivationTarget::Toggle
                } else {
                    ActivationTarget::Outside
                };
                on_activation.call(activation);
            };
            let handler = Closure::wrap(Box::new(on_click) as Box<dyn FnMut(_)>);

            if let Some(window) = web_sys::window() {
                if let Some(document) = window.document() {
                    let _ = document.add_event_listener_with_callback(
                        "click",
                        handler.as_ref().unchecked_ref(),
                    );

                    on_cleanup(move || {
                        if let Some(window) = web_sys::window() {
                            if let Some(document) = window.document() {
                                let _ = document.remove_event_listener_with_callback(
                                    "click",
                                    handler.as_ref().unchecked_ref(),
                                );
                            }
                        }
                        drop(handler);
                    });
                }
            }
        }
    });

    let hour_label_id = format!("{}-hour", id);
    let minute_label_id = format!("{}-minute", id);

    view! {
        <div
            class=move || surface_class(state.theme.get(), state.invalid.get())
            id=format!("{}-surface", id)
        >
            <button
                type="button"
                class="timepicker-toggle"
                aria-expanded=move || state.open.get().to_string()
                node_ref=toggle_ref
                on:click=move |_| on_toggle.call(())
            >
                "🕒"
            </button>
            <div class=move || popup_class(state.open.get()) node_ref=popup_ref>
                <StepField
                    field=Field::Hour
                    id=hour_label_id
                    label=state.hour_label
                    on_step=on_step
                />
                <span class="timepicker-separator">":"</span>
                <StepField
                    field=Field::Minute
                    id=minute_label_id
                    label=state.minute_label
                    on_step=on_step
                />
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_surface_class_theme_and_validity() {
        assert_eq!(surface_class(Theme::System, false), "timepicker");
        assert_eq!(surface_class(Theme::Dark, false), "timepicker timepicker-dark");
        assert_eq!(
            surface_class(Theme::Light, true),
            "timepicker timepicker-light timepicker-invalid"
        );
    }

    #[wasm_bindgen_test]
    fn test_popup_class() {
        assert_eq!(popup_class(true), "timepicker-popup open");
        assert_eq!(popup_class(false), "timepicker-popup");
    }
}
