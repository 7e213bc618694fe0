//! Browser binding for the time picker: attaches pickers to `<input>` elements
//! and renders their toggle and popup with Leptos.

pub mod components;
pub mod renderer;
pub mod time_picker;
pub mod utils;

pub use shared::{
    EventKind, PickerConfig, PickerError, PickerValue, StepAction, Theme, TimeControl, TimeOfDay,
};
pub use time_picker::{TimePicker, TimePickerGroup};
