// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::{cell::RefCell, fmt::Debug, rc::Rc};

/// Hooks the rendering layer implements to react to the controller. The controller never
/// touches the caller's selection; it asks for a change via
/// [`on_selection_change`](FocusSelectionListener::on_selection_change) and the caller
/// decides whether to apply it (and then calls
/// [`set_selected_value`](crate::FocusSelectionController::set_selected_value)).
///
/// Both methods default to doing nothing.
pub trait FocusSelectionListener<V> {
    /// Keyboard focus moved. The renderer should move real focus (DOM node, terminal
    /// cursor) to the item at this index. [`None`] means no item is focused.
    fn on_focus_change(&mut self, _maybe_index: Option<usize>) {}

    /// The user chose `value`.
    fn on_selection_change(&mut self, _value: &V) {}
}

/// Listener that ignores everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopListener;

impl<V> FocusSelectionListener<V> for NoopListener {}

pub type OnFocusChangeFn = Box<dyn FnMut(Option<usize>)>;
pub type OnSelectionChangeFn<V> = Box<dyn FnMut(&V)>;

/// Listener built out of optional closures.
///
/// ```
/// use form_widgets::{CallbackListener, FocusSelectionListener};
///
/// let mut listener = CallbackListener::<u8>::default()
///     .with_on_selection_change(|value| println!("chose {value}"));
/// listener.on_selection_change(&7);
/// ```
pub struct CallbackListener<V> {
    pub maybe_on_focus_change: Option<OnFocusChangeFn>,
    pub maybe_on_selection_change: Option<OnSelectionChangeFn<V>>,
}

impl<V> Default for CallbackListener<V> {
    fn default() -> Self {
        Self {
            maybe_on_focus_change: None,
            maybe_on_selection_change: None,
        }
    }
}

impl<V> Debug for CallbackListener<V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CallbackListener")
            .field("on_focus_change", &self.maybe_on_focus_change.is_some())
            .field("on_selection_change", &self.maybe_on_selection_change.is_some())
            .finish()
    }
}

impl<V> CallbackListener<V> {
    #[must_use]
    pub fn with_on_focus_change(mut self, f: impl FnMut(Option<usize>) + 'static) -> Self {
        self.maybe_on_focus_change = Some(Box::new(f));
        self
    }

    #[must_use]
    pub fn with_on_selection_change(mut self, f: impl FnMut(&V) + 'static) -> Self {
        self.maybe_on_selection_change = Some(Box::new(f));
        self
    }
}

impl<V> FocusSelectionListener<V> for CallbackListener<V> {
    fn on_focus_change(&mut self, maybe_index: Option<usize>) {
        if let Some(f) = self.maybe_on_focus_change.as_mut() {
            f(maybe_index);
        }
    }

    fn on_selection_change(&mut self, value: &V) {
        if let Some(f) = self.maybe_on_selection_change.as_mut() {
            f(value);
        }
    }
}

/// What a [`RecordingListener`] saw, in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListenerEvent<V> {
    FocusChange(Option<usize>),
    SelectionChange(V),
}

/// Records every callback into a shared log. Handy for tests and for tracing what a
/// widget did in response to a sequence of key presses.
#[derive(Debug)]
pub struct RecordingListener<V> {
    pub events: Rc<RefCell<Vec<ListenerEvent<V>>>>,
}

impl<V> Default for RecordingListener<V> {
    fn default() -> Self {
        Self {
            events: Rc::new(RefCell::new(Vec::new())),
        }
    }
}

impl<V> RecordingListener<V> {
    /// Returns the listener, and a handle to the shared log it writes into.
    #[must_use]
    pub fn new_with_log() -> (Self, Rc<RefCell<Vec<ListenerEvent<V>>>>) {
        let it = Self::default();
        let log = it.events.clone();
        (it, log)
    }
}

impl<V: Clone> FocusSelectionListener<V> for RecordingListener<V> {
    fn on_focus_change(&mut self, maybe_index: Option<usize>) {
        self.events
            .borrow_mut()
            .push(ListenerEvent::FocusChange(maybe_index));
    }

    fn on_selection_change(&mut self, value: &V) {
        self.events
            .borrow_mut()
            .push(ListenerEvent::SelectionChange(value.clone()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assert_eq2;

    #[test]
    fn test_callback_listener_calls_closures() {
        let seen = Rc::new(RefCell::new(vec![]));
        let seen_focus = seen.clone();
        let seen_selection = seen.clone();

        let mut listener = CallbackListener::<&str>::default()
            .with_on_focus_change(move |it| seen_focus.borrow_mut().push(format!("{it:?}")))
            .with_on_selection_change(move |it| {
                seen_selection.borrow_mut().push((*it).to_string());
            });

        listener.on_focus_change(Some(1));
        listener.on_selection_change(&"b");
        listener.on_focus_change(None);

        assert_eq2!(*seen.borrow(), vec!["Some(1)", "b", "None"]);
    }

    #[test]
    fn test_empty_callback_listener_is_noop() {
        let mut listener = CallbackListener::<u8>::default();
        listener.on_focus_change(Some(0));
        listener.on_selection_change(&0);
    }

    #[test]
    fn test_recording_listener_shares_log() {
        let (mut listener, log) = RecordingListener::<u8>::new_with_log();
        listener.on_selection_change(&3);
        listener.on_focus_change(None);
        assert_eq2!(
            *log.borrow(),
            vec![ListenerEvent::SelectionChange(3), ListenerEvent::FocusChange(None)]
        );
    }
}
