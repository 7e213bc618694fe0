pub mod step_field;
pub mod time_picker_surface;

pub use step_field::StepField;
pub use time_picker_surface::{SurfaceState, TimePickerSurface};
