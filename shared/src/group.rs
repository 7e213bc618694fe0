use std::rc::Rc;

use crate::control::TimeControl;
use crate::error::PickerError;
use crate::types::{PickerId, PickerValue};

/// Independent pickers keyed by element identifier, in match order.
///
/// The group holds no time of its own; it only routes calls.
pub struct PickerGroup<P: TimeControl> {
    members: Vec<(String, P)>,
}

impl<P: TimeControl> Default for PickerGroup<P> {
    fn default() -> Self {
        Self {
            members: Vec::new(),
        }
    }
}

impl<P: TimeControl> PickerGroup<P> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a member at the end. A key that is already present is refused and
    /// the existing member is left untouched.
    pub fn insert(&mut self, key: impl Into<String>, picker: P) -> Result<(), PickerError> {
        let key = key.into();
        if self.contains_key(&key) {
            return Err(PickerError::DuplicateKey(key));
        }
        self.members.push((key, picker));
        Ok(())
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.members.iter().any(|(existing, _)| existing == key)
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Element identifiers in match order.
    pub fn ids(&self) -> Vec<String> {
        self.members.iter().map(|(key, _)| key.clone()).collect()
    }

    pub fn all(&self) -> impl Iterator<Item = (&str, &P)> {
        self.members.iter().map(|(key, picker)| (key.as_str(), picker))
    }

    pub fn get(&self, key: &str) -> Option<&P> {
        self.members
            .iter()
            .find(|(existing, _)| existing == key)
            .map(|(_, picker)| picker)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut P> {
        self.members
            .iter_mut()
            .find(|(existing, _)| existing == key)
            .map(|(_, picker)| picker)
    }

    /// Generated picker ids of every member, in match order.
    pub fn picker_ids(&self) -> Vec<PickerId> {
        self.members.iter().map(|(_, picker)| picker.id()).collect()
    }

    /// Registers the same listener on every member.
    pub fn on_change<F>(&mut self, listener: F) -> Result<(), PickerError>
    where
        F: Fn(&PickerValue) + 'static,
    {
        let listener = Rc::new(listener);
        for (_, picker) in self.members.iter_mut() {
            let listener = listener.clone();
            picker.on_change(Box::new(move |value: &PickerValue| listener(value)))?;
        }
        Ok(())
    }

    pub fn value(&self, key: &str) -> Option<PickerValue> {
        self.get(key).map(TimeControl::value)
    }

    pub fn set_value(&mut self, key: &str, total_minutes: i64) -> Option<Result<(), PickerError>> {
        self.get_mut(key).map(|picker| picker.set_value(total_minutes))
    }

    pub fn set_valid(&mut self, key: &str, valid: bool) -> Option<Result<(), PickerError>> {
        self.get_mut(key).map(|picker| picker.set_valid(valid))
    }

    pub fn into_members(self) -> Vec<(String, P)> {
        self.members
    }
}
