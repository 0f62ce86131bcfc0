// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use crate::{EventPropagation, KeyPress};

/// Enable or disable debug logging for switch toggles.
pub const DEBUG_SWITCH_MOD: bool = false;

pub type OnToggleFn = Box<dyn FnMut(bool)>;

/// An on / off switch. Like the other widgets, the value is owned by the caller: a toggle
/// asks for `!value` via the `on_change` callback, and the caller applies it with
/// [`Switch::set_value`].
pub struct Switch {
    value: bool,
    disabled: bool,
    is_focused: bool,
    maybe_on_change: Option<OnToggleFn>,
}

impl std::fmt::Debug for Switch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Switch")
            .field("value", &self.value)
            .field("disabled", &self.disabled)
            .field("is_focused", &self.is_focused)
            .field("on_change", &self.maybe_on_change.is_some())
            .finish()
    }
}

impl Switch {
    pub fn new(value: bool) -> Self {
        Self {
            value,
            disabled: false,
            is_focused: false,
            maybe_on_change: None,
        }
    }

    #[must_use]
    pub fn with_on_change(mut self, f: impl FnMut(bool) + 'static) -> Self {
        self.maybe_on_change = Some(Box::new(f));
        self
    }

    #[must_use]
    pub fn with_disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    pub fn value(&self) -> bool { self.value }

    pub fn is_disabled(&self) -> bool { self.disabled }

    pub fn is_focused(&self) -> bool { self.is_focused }

    pub fn set_value(&mut self, value: bool) { self.value = value; }

    pub fn set_disabled(&mut self, disabled: bool) { self.disabled = disabled; }

    /// Requests `!value`. Returns `false` (and doesn't call `on_change`) when disabled.
    pub fn toggle(&mut self) -> bool {
        if self.disabled {
            return false;
        }

        DEBUG_SWITCH_MOD.then(|| {
            // % is Display, ? is Debug.
            tracing::debug!(message = "switch toggle", requested = %!self.value);
        });

        if let Some(f) = self.maybe_on_change.as_mut() {
            f(!self.value);
        }
        true
    }

    pub fn handle_key(&mut self, key_press: KeyPress) -> EventPropagation {
        if key_press.is_submit_form() {
            return EventPropagation::SubmitForm;
        }
        if key_press.is_plain_space() {
            return if self.toggle() {
                EventPropagation::ConsumedRender
            } else {
                EventPropagation::Consumed
            };
        }
        EventPropagation::Propagate
    }

    pub fn on_focus(&mut self) { self.is_focused = true; }

    pub fn on_blur(&mut self) { self.is_focused = false; }
}

#[cfg(test)]
mod tests {
    use std::{cell::RefCell, rc::Rc};

    use super::*;
    use crate::{ModifierKeysMask, SpecialKey, assert_eq2, keypress};

    fn switch_with_log(value: bool) -> (Switch, Rc<RefCell<Vec<bool>>>) {
        let log = Rc::new(RefCell::new(vec![]));
        let log_clone = log.clone();
        let it = Switch::new(value).with_on_change(move |it| log_clone.borrow_mut().push(it));
        (it, log)
    }

    #[test]
    fn test_toggle_requests_opposite_value() {
        let (mut switch, log) = switch_with_log(false);
        assert!(switch.toggle());
        // Not applied until the caller says so.
        assert!(!switch.value());
        switch.set_value(true);
        switch.toggle();
        assert_eq2!(*log.borrow(), vec![true, false]);
    }

    #[test]
    fn test_disabled_switch_does_not_toggle() {
        let (switch, log) = switch_with_log(true);
        let mut switch = switch.with_disabled(true);
        assert!(!switch.toggle());
        assert_eq2!(
            switch.handle_key(keypress!(@char ' ')),
            EventPropagation::Consumed
        );
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn test_keys() {
        let (mut switch, log) = switch_with_log(false);
        assert_eq2!(
            switch.handle_key(keypress!(@char ' ')),
            EventPropagation::ConsumedRender
        );
        assert_eq2!(
            switch.handle_key(keypress!(@special ModifierKeysMask::new().with_ctrl(),
                                        SpecialKey::Enter)),
            EventPropagation::SubmitForm
        );
        assert_eq2!(
            switch.handle_key(keypress!(@special SpecialKey::Enter)),
            EventPropagation::Propagate
        );
        assert_eq2!(*log.borrow(), vec![true]);
    }

    #[test]
    fn test_focus_tracking() {
        let mut switch = Switch::new(false);
        switch.on_focus();
        assert!(switch.is_focused());
        switch.on_blur();
        assert!(!switch.is_focused());
    }
}
