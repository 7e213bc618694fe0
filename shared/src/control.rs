use crate::error::PickerError;
use crate::types::{EventKind, PickerId, PickerValue};

/// A listener for one kind of picker event.
pub type Listener = Box<dyn FnMut(&PickerValue)>;

/// Operations shared by every picker handle, whatever owns the state.
pub trait TimeControl {
    fn id(&self) -> PickerId;

    fn value(&self) -> PickerValue;

    /// Sets the time from minutes since midnight and notifies `change` listeners.
    fn set_value(&mut self, total_minutes: i64) -> Result<(), PickerError>;

    fn set_valid(&mut self, valid: bool) -> Result<(), PickerError>;

    fn on(&mut self, kind: EventKind, listener: Listener) -> Result<(), PickerError>;

    fn on_change(&mut self, listener: Listener) -> Result<(), PickerError> {
        self.on(EventKind::Change, listener)
    }
}
