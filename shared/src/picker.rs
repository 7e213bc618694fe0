use std::collections::HashMap;

use crate::config::PickerConfig;
use crate::control::{Listener, TimeControl};
use crate::error::{ConfigWarning, PickerError};
use crate::render::ViewRenderer;
use crate::types::{
    ActivationTarget, EventKind, PickerId, PickerValue, StepAction, Theme, TimeOfDay,
    MINUTES_PER_HOUR,
};

/// A single time picker bound to one input element.
///
/// The picker owns the time state and its listeners, and drives a
/// [`ViewRenderer`] for everything visible. All transitions run to completion
/// on the caller's thread.
pub struct Picker<R: ViewRenderer> {
    id: PickerId,
    time: TimeOfDay,
    total_minutes: u32,
    button_active: bool,
    step: u32,
    valid: bool,
    dismiss_armed: bool,
    config: PickerConfig,
    warnings: Vec<ConfigWarning>,
    listeners: HashMap<EventKind, Vec<Listener>>,
    renderer: R,
    destroyed: bool,
}

impl<R: ViewRenderer> Picker<R> {
    /// Renders the surface and picks up an existing `HH:MM` value without
    /// notifying anyone.
    pub fn new(renderer: R, config: PickerConfig) -> Self {
        Self::with_id(PickerId::generate(), renderer, config)
    }

    pub fn with_id(id: PickerId, renderer: R, mut config: PickerConfig) -> Self {
        let warnings = config.validate();
        for warning in &warnings {
            log::warn!("{}: {}", id, warning);
        }

        let mut picker = Self {
            id,
            time: TimeOfDay::default(),
            total_minutes: 0,
            button_active: false,
            step: config.step_minutes(),
            valid: true,
            dismiss_armed: false,
            config,
            warnings,
            listeners: HashMap::new(),
            renderer,
            destroyed: false,
        };

        let theme = Theme::from_classes(&picker.renderer.input_classes());
        picker.renderer.render(&picker.id, theme);

        let existing = picker
            .renderer
            .input_value()
            .and_then(|value| value.parse::<TimeOfDay>().ok());
        match existing {
            Some(time) => picker.time = time,
            None => {
                let placeholder = picker.config.placeholder.clone();
                picker.renderer.set_input_value(&placeholder);
            }
        }
        picker.sync_state();
        picker
            .renderer
            .set_labels(&picker.time.hour_label(), &picker.time.minute_label());

        log::debug!(
            "Created picker {} at {} (step {}, theme {})",
            picker.id,
            picker.time,
            picker.step,
            theme.as_str()
        );
        picker
    }

    pub fn id(&self) -> &PickerId {
        &self.id
    }

    pub fn time(&self) -> TimeOfDay {
        self.time
    }

    pub fn step_minutes(&self) -> u32 {
        self.step
    }

    pub fn is_valid(&self) -> bool {
        self.valid
    }

    pub fn is_open(&self) -> bool {
        self.renderer.popup_open()
    }

    pub fn config(&self) -> &PickerConfig {
        &self.config
    }

    /// Configuration problems replaced with defaults at construction.
    pub fn warnings(&self) -> &[ConfigWarning] {
        &self.warnings
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn value(&self) -> PickerValue {
        PickerValue {
            hour: self.time.hour(),
            minute: self.time.minute(),
            total_minutes: self.total_minutes,
            button_active: self.button_active,
            id: self.id.clone(),
            value: self.time.to_string(),
        }
    }

    /// Opens or closes the popup. Always notifies `change`, and `show` when opening.
    pub fn toggle(&mut self) {
        let open = !self.renderer.popup_open();
        self.renderer.set_popup_open(open);
        if open && self.config.autohide {
            self.arm_dismiss();
        } else if !open {
            self.disarm_dismiss();
        }
        self.refresh();
        if open {
            self.notify(EventKind::Show);
        }
    }

    pub fn step(&mut self, action: StepAction) {
        self.time = self.time.stepped(action, self.step);
        self.refresh();
    }

    /// Steps from stringly input such as `("minute", "up")`. Anything else is
    /// ignored. Returns whether a step happened.
    pub fn step_named(&mut self, field: &str, action: &str) -> bool {
        match StepAction::parse(field, action) {
            Some(action) => {
                self.step(action);
                true
            }
            None => false,
        }
    }

    pub fn set_value(&mut self, total_minutes: i64) -> Result<(), PickerError> {
        self.time = TimeOfDay::from_total_minutes(total_minutes)?;
        self.refresh();
        Ok(())
    }

    /// Moves to an already checked time; see [`TimeOfDay::new`].
    pub fn set_time(&mut self, time: TimeOfDay) {
        self.time = time;
        self.refresh();
    }

    pub fn set_valid(&mut self, valid: bool) {
        self.valid = valid;
        self.renderer.set_invalid(!valid);
        if let Some(target) = self.config.confirm.as_deref() {
            self.renderer.set_confirm_disabled(target, !valid);
        }
    }

    pub fn on(&mut self, kind: EventKind, listener: Listener) {
        self.listeners.entry(kind).or_default().push(listener);
    }

    pub fn on_change(&mut self, listener: Listener) {
        self.on(EventKind::Change, listener);
    }

    /// Feeds a page-wide pointer activation. Closes the popup and notifies
    /// `dismiss` when it landed outside both the popup and the toggle.
    pub fn pointer_activated(&mut self, target: ActivationTarget) {
        if !self.dismiss_armed || !self.renderer.popup_open() {
            return;
        }
        if target != ActivationTarget::Outside {
            return;
        }
        self.renderer.set_popup_open(false);
        self.disarm_dismiss();
        self.sync_state();
        self.notify(EventKind::Dismiss);
    }

    /// Releases the dismiss listener and removes the rendered surface.
    pub fn destroy(&mut self) {
        if self.destroyed {
            return;
        }
        self.disarm_dismiss();
        self.renderer.teardown();
        self.destroyed = true;
        log::debug!("Destroyed picker {}", self.id);
    }

    fn arm_dismiss(&mut self) {
        if !self.dismiss_armed {
            self.renderer.arm_dismiss();
            self.dismiss_armed = true;
        }
    }

    fn disarm_dismiss(&mut self) {
        if self.dismiss_armed {
            self.renderer.disarm_dismiss();
            self.dismiss_armed = false;
        }
    }

    fn sync_state(&mut self) {
        self.total_minutes = self.time.total_minutes();
        self.button_active = self.renderer.popup_open();
        debug_assert_eq!(
            self.total_minutes,
            self.time.hour() * MINUTES_PER_HOUR + self.time.minute()
        );
    }

    /// Recompute, redraw the text, and notify `change`.
    fn refresh(&mut self) {
        self.sync_state();
        let text = self.time.to_string();
        self.renderer.set_input_value(&text);
        self.renderer
            .set_labels(&self.time.hour_label(), &self.time.minute_label());
        self.notify(EventKind::Change);
    }

    fn notify(&mut self, kind: EventKind) {
        let snapshot = self.value();
        if let Some(listeners) = self.listeners.get_mut(&kind) {
            for listener in listeners.iter_mut() {
                listener(&snapshot);
            }
        }
    }
}

impl<R: ViewRenderer> Drop for Picker<R> {
    fn drop(&mut self) {
        self.destroy();
    }
}

impl<R: ViewRenderer> TimeControl for Picker<R> {
    fn id(&self) -> PickerId {
        self.id.clone()
    }

    fn value(&self) -> PickerValue {
        Picker::value(self)
    }

    fn set_value(&mut self, total_minutes: i64) -> Result<(), PickerError> {
        Picker::set_value(self, total_minutes)
    }

    fn set_valid(&mut self, valid: bool) -> Result<(), PickerError> {
        Picker::set_valid(self, valid);
        Ok(())
    }

    fn on(&mut self, kind: EventKind, listener: Listener) -> Result<(), PickerError> {
        Picker::on(self, kind, listener);
        Ok(())
    }
}
