use leptos::*;
use shared::{Direction, Field, StepAction};

/// One column of the popup: increment button, zero-padded label, decrement button.
#[component]
pub fn StepField(
    field: Field,
    #[prop(into)] id: String,
    #[prop(into)] label: Signal<String>,
    #[prop(into)] on_step: Callback<StepAction>,
) -> impl IntoView {
    let step = move |direction: Direction| {
        move |_: ev::MouseEvent| on_step.call(StepAction::new(field, direction))
    };

    view! {
        <div class=format!("timepicker-field timepicker-field-{}", field.as_str())>
            <button
                type="button"
                class="timepicker-step timepicker-step-up"
                data-type=field.as_str()
                data-action=Direction::Up.as_str()
                on:click=step(Direction::Up)
            >
                "▲"
            </button>
            <span class="timepicker-label" id=id>
                {move || label.get()}
            </span>
            <button
                type="button"
                class="timepicker-step timepicker-step-down"
                data-type=field.as_str()
                data-action=Direction::Down.as_str()
                on:click=step(Direction::Down)
            >
                "▼"
            </button>
        </div>
    }
}
