//! Core of the time-of-day picker: value types, configuration, and the
//! per-instance state machine. Nothing here touches a browser; rendering goes
//! through [`ViewRenderer`].

pub mod config;
pub mod control;
pub mod error;
pub mod group;
pub mod picker;
pub mod render;
pub mod types;

pub use config::PickerConfig;
pub use control::{Listener, TimeControl};
pub use error::{ConfigWarning, PickerError};
pub use group::PickerGroup;
pub use picker::Picker;
pub use render::ViewRenderer;
pub use types::*;
