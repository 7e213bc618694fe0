use std::cell::RefCell;
use std::ops::{Deref, DerefMut};
use std::rc::Rc;

use shared::{
    EventKind, Listener, Picker, PickerConfig, PickerError, PickerGroup, PickerId, PickerValue,
    Selector, StepAction, TimeControl,
};
use web_sys::HtmlInputElement;

use crate::renderer::{DomSurface, SharedPicker};
use crate::utils::{find_first_input, find_inputs};

/// A picker bound to one `<input>` on the page.
///
/// Dropping the last handle tears the surface down. Use [`TimePicker::forget`]
/// to keep the picker for the rest of the page's life.
#[derive(Clone)]
pub struct TimePicker {
    inner: Rc<SharedPicker>,
    snapshot: Rc<RefCell<PickerValue>>,
}

impl TimePicker {
    /// Binds to the first input matched by `#id` or `.class`.
    pub fn attach(selector: &str, config: PickerConfig) -> Result<Self, PickerError> {
        let selector: Selector = selector.parse()?;
        let input = find_first_input(&selector)?;
        Ok(Self::bind(input, config))
    }

    pub fn bind(input: HtmlInputElement, config: PickerConfig) -> Self {
        console_error_panic_hook::set_once();

        let inner = Rc::new_cyclic(|weak| {
            RefCell::new(Picker::new(DomSurface::new(input, weak.clone()), config))
        });

        let snapshot = {
            let mut picker = inner.borrow_mut();
            let snapshot = Rc::new(RefCell::new(picker.value()));
            for kind in EventKind::ALL {
                let snapshot = snapshot.clone();
                picker.on(
                    kind,
                    Box::new(move |value: &PickerValue| *snapshot.borrow_mut() = value.clone()),
                );
            }
            log::debug!("Bound picker {}", picker.id());
            snapshot
        };

        Self { inner, snapshot }
    }

    pub fn id(&self) -> PickerId {
        self.snapshot.borrow().id.clone()
    }

    /// The latest snapshot. Safe to call from inside a listener.
    pub fn value(&self) -> PickerValue {
        self.snapshot.borrow().clone()
    }

    pub fn element(&self) -> Result<HtmlInputElement, PickerError> {
        Ok(self.picker()?.renderer().input().clone())
    }

    pub fn is_open(&self) -> Result<bool, PickerError> {
        Ok(self.picker()?.is_open())
    }

    pub fn toggle(&self) -> Result<(), PickerError> {
        self.picker_mut()?.toggle();
        Ok(())
    }

    pub fn step(&self, action: StepAction) -> Result<(), PickerError> {
        self.picker_mut()?.step(action);
        Ok(())
    }

    pub fn set_value(&self, total_minutes: i64) -> Result<(), PickerError> {
        self.picker_mut()?.set_value(total_minutes)
    }

    pub fn set_valid(&self, valid: bool) -> Result<(), PickerError> {
        self.picker_mut()?.set_valid(valid);
        Ok(())
    }

    pub fn on(
        &self,
        kind: EventKind,
        listener: impl FnMut(&PickerValue) + 'static,
    ) -> Result<(), PickerError> {
        self.picker_mut()?.on(kind, Box::new(listener));
        Ok(())
    }

    /// Registers a listener by event name: `change`, `show` or `dismiss`.
    pub fn on_named(
        &self,
        event: &str,
        listener: impl FnMut(&PickerValue) + 'static,
    ) -> Result<(), PickerError> {
        self.on(event.parse()?, listener)
    }

    pub fn on_change(
        &self,
        listener: impl FnMut(&PickerValue) + 'static,
    ) -> Result<(), PickerError> {
        self.on(EventKind::Change, listener)
    }

    /// Removes the surface and releases the dismiss listener now, even if
    /// other handles are still alive.
    pub fn destroy(self) -> Result<(), PickerError> {
        self.picker_mut()?.destroy();
        Ok(())
    }

    /// Keeps the picker alive for the rest of the page's life.
    pub fn forget(self) {
        std::mem::forget(self);
    }

    fn picker(&self) -> Result<std::cell::Ref<'_, Picker<DomSurface>>, PickerError> {
        self.inner.try_borrow().map_err(|_| busy(&self.id()))
    }

    fn picker_mut(&self) -> Result<std::cell::RefMut<'_, Picker<DomSurface>>, PickerError> {
        self.inner.try_borrow_mut().map_err(|_| busy(&self.id()))
    }
}

fn busy(id: &PickerId) -> PickerError {
    log::warn!("Picker {} was called from one of its own listeners", id);
    PickerError::Busy
}

impl TimeControl for TimePicker {
    fn id(&self) -> PickerId {
        TimePicker::id(self)
    }

    fn value(&self) -> PickerValue {
        TimePicker::value(self)
    }

    fn set_value(&mut self, total_minutes: i64) -> Result<(), PickerError> {
        TimePicker::set_value(self, total_minutes)
    }

    fn set_valid(&mut self, valid: bool) -> Result<(), PickerError> {
        TimePicker::set_valid(self, valid)
    }

    fn on(&mut self, kind: EventKind, listener: Listener) -> Result<(), PickerError> {
        TimePicker::on(self, kind, listener)
    }
}

/// One picker per input matched by a selector, keyed by element id.
pub struct TimePickerGroup {
    group: PickerGroup<TimePicker>,
}

impl TimePickerGroup {
    /// Binds every input matched by `selector`, usually `.class`. Inputs
    /// without an id, or whose id is already taken by an earlier match, are
    /// given a generated one.
    pub fn attach(selector: &str, config: PickerConfig) -> Result<Self, PickerError> {
        let selector: Selector = selector.parse()?;
        let mut group = PickerGroup::new();
        for input in find_inputs(&selector)? {
            let mut key = input.id();
            if key.is_empty() || group.contains_key(&key) {
                if !key.is_empty() {
                    log::warn!("Duplicate element id '{}' under {}", key, selector);
                }
                key = PickerId::generate().to_string();
                input.set_id(&key);
            }
            group.insert(key, TimePicker::bind(input, config.clone()))?;
        }
        log::debug!("Bound {} pickers for {}", group.len(), selector);
        Ok(Self { group })
    }

    pub fn forget(self) {
        for (_, picker) in self.group.into_members() {
            picker.forget();
        }
    }
}

impl Deref for TimePickerGroup {
    type Target = PickerGroup<TimePicker>;

    fn deref(&self) -> &Self::Target {
        &self.group
    }
}

impl DerefMut for TimePickerGroup {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.group
    }
}
