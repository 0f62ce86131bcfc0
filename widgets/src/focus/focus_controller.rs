// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! The focus / selection state machine shared by [`crate::ListWidget`] and
//! [`crate::SegmentedControl`].
//!
//! The free functions at the top of this module are pure: they take an [`OptionList`] and
//! some index or value, and return a new index. [`FocusSelectionController`] wraps them
//! with the state a widget needs to hold between events, and calls the
//! [`FocusSelectionListener`] hooks whenever something changes.
//!
//! Navigation never wraps around:
//!
//! ```text
//! options:   [ A ][ B (disabled) ][ C ]
//! index:       0          1         2
//!
//! next:      unset -> 0 -> 2 -> none
//! previous:  unset -> 2 -> 0 -> none
//! ```

use std::fmt::Debug;

use serde::{Deserialize, Serialize};

use super::{DEBUG_FOCUS_MOD, FocusSelectionListener, NoopListener, OptionList};

// ┌─────────────────────────────────────────────────────────────────────────┐
// │ Pure functions                                                          │
// └─────────────────────────────────────────────────────────────────────────┘

/// Focus starts on the selected option, if the selected value matches exactly one
/// enabled option. Otherwise focus is left unset.
pub fn initial_focused_index<V: PartialEq>(
    options: &OptionList<V>,
    maybe_selected_value: Option<&V>,
) -> Option<usize> {
    let selected_value = maybe_selected_value?;
    options
        .index_of_unique(selected_value)
        .filter(|&index| options.is_focusable_index(index))
}

/// Scans forward from `focused_index + 1` (or from `0` when unset) and returns the first
/// enabled option. Returns [`None`] once the end of the list is reached.
pub fn next_focusable_index<V>(
    options: &OptionList<V>,
    maybe_focused_index: Option<usize>,
) -> Option<usize> {
    let start = match options.normalize_index(maybe_focused_index) {
        Some(index) => index + 1,
        None => 0,
    };
    (start..options.len()).find(|&index| options.is_focusable_index(index))
}

/// Scans backward from `focused_index - 1` (or from the last option when unset) and
/// returns the first enabled option. Returns [`None`] once the start of the list is
/// reached.
pub fn previous_focusable_index<V>(
    options: &OptionList<V>,
    maybe_focused_index: Option<usize>,
) -> Option<usize> {
    let end = options
        .normalize_index(maybe_focused_index)
        .unwrap_or(options.len());
    (0..end)
        .rev()
        .find(|&index| options.is_focusable_index(index))
}

pub fn first_focusable_index<V>(options: &OptionList<V>) -> Option<usize> {
    next_focusable_index(options, None)
}

pub fn last_focusable_index<V>(options: &OptionList<V>) -> Option<usize> {
    previous_focusable_index(options, None)
}

/// Result of [`on_options_changed`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionsChangeOutcome {
    /// The value sequence is the same, so focus should be left alone.
    SameValues,
    /// The value sequence changed and focus must be set to this.
    Changed { maybe_focused_index: Option<usize> },
}

/// When the option list is replaced, try to keep focus on the same *value*. If the value
/// is gone from `new_options` (or is now disabled), focus is cleared.
pub fn on_options_changed<V: PartialEq>(
    old_options: &OptionList<V>,
    new_options: &OptionList<V>,
    maybe_focused_value: Option<&V>,
) -> OptionsChangeOutcome {
    if old_options.has_same_values(new_options) {
        return OptionsChangeOutcome::SameValues;
    }

    let maybe_focused_index = maybe_focused_value
        .and_then(|value| new_options.index_of(value))
        .filter(|&index| new_options.is_focusable_index(index));

    OptionsChangeOutcome::Changed {
        maybe_focused_index,
    }
}

/// Returns the index of `value` if it may be selected: it exists and its option is
/// enabled. [`None`] means selecting it is a no-op.
pub fn validate_selection<V: PartialEq>(options: &OptionList<V>, value: &V) -> Option<usize> {
    options
        .index_of(value)
        .filter(|&index| options.is_focusable_index(index))
}

// ┌─────────────────────────────────────────────────────────────────────────┐
// │ Stateful controller                                                     │
// └─────────────────────────────────────────────────────────────────────────┘

/// What happens to focus when the option list is replaced by one with a different value
/// sequence.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OptionsChangedPolicy {
    /// Keep focus on the same value if it is still there, else clear focus.
    #[default]
    ClearFocus,
    /// Always move focus to the first enabled option (useful for autocomplete style
    /// lists, where the top suggestion should be ready to pick).
    FocusFirst,
}

/// Holds the option list, the focused index, and a read-only copy of the caller's
/// selected value.
///
/// Invariants:
/// - `focused_index`, when set, is in range and refers to an enabled option.
/// - `focused_value` is the value at `focused_index` (used to re-locate focus when the
///   options change).
pub struct FocusSelectionController<V> {
    options: OptionList<V>,
    maybe_focused_index: Option<usize>,
    maybe_focused_value: Option<V>,
    maybe_selected_value: Option<V>,
    policy: OptionsChangedPolicy,
    listener: Box<dyn FocusSelectionListener<V>>,
}

impl<V: Debug> Debug for FocusSelectionController<V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FocusSelectionController")
            .field("options", &self.options)
            .field("maybe_focused_index", &self.maybe_focused_index)
            .field("maybe_selected_value", &self.maybe_selected_value)
            .field("policy", &self.policy)
            .field("listener", &"<listener>")
            .finish()
    }
}

impl<V> FocusSelectionController<V>
where
    V: Clone + PartialEq + Debug + 'static,
{
    /// Focus starts on `maybe_selected_value` if it is present, see
    /// [`initial_focused_index`].
    pub fn new(options: OptionList<V>, maybe_selected_value: Option<V>) -> Self {
        let maybe_focused_index =
            initial_focused_index(&options, maybe_selected_value.as_ref());
        let maybe_focused_value =
            maybe_focused_index.and_then(|index| options.get(index).map(|it| it.value.clone()));

        Self {
            options,
            maybe_focused_index,
            maybe_focused_value,
            maybe_selected_value,
            policy: OptionsChangedPolicy::default(),
            listener: Box::new(NoopListener),
        }
    }

    #[must_use]
    pub fn with_policy(mut self, policy: OptionsChangedPolicy) -> Self {
        self.policy = policy;
        self
    }

    #[must_use]
    pub fn with_listener(mut self, listener: impl FocusSelectionListener<V> + 'static) -> Self {
        self.listener = Box::new(listener);
        self
    }

    pub fn set_listener(&mut self, listener: impl FocusSelectionListener<V> + 'static) {
        self.listener = Box::new(listener);
    }

    pub fn set_policy(&mut self, policy: OptionsChangedPolicy) { self.policy = policy; }

    pub fn options(&self) -> &OptionList<V> { &self.options }

    pub fn policy(&self) -> OptionsChangedPolicy { self.policy }

    pub fn focused_index(&self) -> Option<usize> { self.maybe_focused_index }

    pub fn focused_value(&self) -> Option<&V> { self.maybe_focused_value.as_ref() }

    pub fn selected_value(&self) -> Option<&V> { self.maybe_selected_value.as_ref() }

    /// Index of the selected value. [`None`] if nothing is selected, or the selected value
    /// doesn't match exactly one option.
    pub fn selected_index(&self) -> Option<usize> {
        self.maybe_selected_value
            .as_ref()
            .and_then(|value| self.options.index_of_unique(value))
    }

    /// `true` if `value` is the caller's selection and it resolves to a single option.
    pub fn is_selected(&self, value: &V) -> bool {
        self.selected_index().is_some() && self.maybe_selected_value.as_ref() == Some(value)
    }

    // ┌─────────────────────────────────────────────────────────────────────┐
    // │ Focus                                                               │
    // └─────────────────────────────────────────────────────────────────────┘

    /// Focus the item at `index`. Does nothing (and returns `false`) if the index is out of
    /// range or the option is disabled. The listener is told about the (possibly unchanged)
    /// focus, so the renderer can re-apply real focus.
    pub fn focus_index(&mut self, index: usize) -> bool {
        if !self.options.is_focusable_index(index) {
            DEBUG_FOCUS_MOD.then(|| {
                // % is Display, ? is Debug.
                tracing::debug!(message = "focus_index ignored", index = %index);
            });
            return false;
        }
        self.apply_focus(Some(index));
        true
    }

    /// Clears focus. The listener is only called if something was focused.
    pub fn clear_focus(&mut self) {
        if self.maybe_focused_index.is_some() {
            self.apply_focus(None);
        }
    }

    /// Moves focus to the next enabled option. Returns the new index, or [`None`] (focus is
    /// unchanged) when there is nothing further down.
    pub fn focus_next(&mut self) -> Option<usize> {
        let next = next_focusable_index(&self.options, self.maybe_focused_index)?;
        self.apply_focus(Some(next));
        Some(next)
    }

    /// Moves focus to the previous enabled option. Returns the new index, or [`None`]
    /// (focus is unchanged) when there is nothing further up.
    pub fn focus_previous(&mut self) -> Option<usize> {
        let previous = previous_focusable_index(&self.options, self.maybe_focused_index)?;
        self.apply_focus(Some(previous));
        Some(previous)
    }

    pub fn focus_first(&mut self) -> Option<usize> {
        let first = first_focusable_index(&self.options)?;
        self.apply_focus(Some(first));
        Some(first)
    }

    pub fn focus_last(&mut self) -> Option<usize> {
        let last = last_focusable_index(&self.options)?;
        self.apply_focus(Some(last));
        Some(last)
    }

    fn apply_focus(&mut self, maybe_index: Option<usize>) {
        let maybe_index = maybe_index.filter(|&index| self.options.is_focusable_index(index));
        self.maybe_focused_index = maybe_index;
        self.maybe_focused_value =
            maybe_index.and_then(|index| self.options.get(index).map(|it| it.value.clone()));

        DEBUG_FOCUS_MOD.then(|| {
            // % is Display, ? is Debug.
            tracing::debug!(
                message = "focus changed",
                focused_index = ?self.maybe_focused_index,
                focused_value = ?self.maybe_focused_value
            );
        });

        self.listener.on_focus_change(maybe_index);
    }

    // ┌─────────────────────────────────────────────────────────────────────┐
    // │ Selection                                                           │
    // └─────────────────────────────────────────────────────────────────────┘

    /// Ask the caller to select `value`. This is a no-op (returns `false`, and the listener
    /// is not called) if `value` is not in the list or its option is disabled.
    pub fn select(&mut self, value: &V) -> bool {
        let Some(index) = validate_selection(&self.options, value) else {
            DEBUG_FOCUS_MOD.then(|| {
                // % is Display, ? is Debug.
                tracing::debug!(message = "select ignored", value = ?value);
            });
            return false;
        };

        DEBUG_FOCUS_MOD.then(|| {
            // % is Display, ? is Debug.
            tracing::debug!(message = "selection requested", value = ?value, index = %index);
        });

        self.listener.on_selection_change(value);
        true
    }

    /// Same as [`select`](Self::select) for the option at `index`.
    pub fn select_index(&mut self, index: usize) -> bool {
        let Some(value) = self.options.get(index).map(|it| it.value.clone()) else {
            return false;
        };
        self.select(&value)
    }

    /// Selects the focused option (eg: on Enter). Returns `false` if nothing is focused.
    pub fn select_focused(&mut self) -> bool {
        match self.maybe_focused_index {
            Some(index) => self.select_index(index),
            None => false,
        }
    }

    /// The caller's selection changed. Focus follows the new value, and is cleared when
    /// the new value is [`None`] or can't be found.
    pub fn set_selected_value(&mut self, maybe_value: Option<V>) {
        if self.maybe_selected_value == maybe_value {
            return;
        }
        let maybe_focused_index = initial_focused_index(&self.options, maybe_value.as_ref());
        self.maybe_selected_value = maybe_value;
        if maybe_focused_index != self.maybe_focused_index {
            self.apply_focus(maybe_focused_index);
        }
    }

    // ┌─────────────────────────────────────────────────────────────────────┐
    // │ Options                                                             │
    // └─────────────────────────────────────────────────────────────────────┘

    /// Replace the option list. If the value sequence is different, focus is re-located
    /// according to the [`OptionsChangedPolicy`]. Returns what happened.
    pub fn set_options(&mut self, new_options: OptionList<V>) -> OptionsChangeOutcome {
        let outcome = on_options_changed(
            &self.options,
            &new_options,
            self.maybe_focused_value.as_ref(),
        );
        self.options = new_options;

        let maybe_new_index = match outcome {
            OptionsChangeOutcome::SameValues => self
                .maybe_focused_index
                .filter(|&index| self.options.is_focusable_index(index)),
            OptionsChangeOutcome::Changed {
                maybe_focused_index,
            } => match self.policy {
                OptionsChangedPolicy::ClearFocus => maybe_focused_index,
                OptionsChangedPolicy::FocusFirst => first_focusable_index(&self.options),
            },
        };

        DEBUG_FOCUS_MOD.then(|| {
            // % is Display, ? is Debug.
            tracing::debug!(
                message = "options changed",
                outcome = ?outcome,
                policy = ?self.policy,
                new_focused_index = ?maybe_new_index
            );
        });

        if maybe_new_index == self.maybe_focused_index {
            // The value at that index may still have changed (eg: same index, new value).
            self.maybe_focused_value = maybe_new_index
                .and_then(|index| self.options.get(index).map(|it| it.value.clone()));
        } else {
            self.apply_focus(maybe_new_index);
        }

        outcome
    }
}

#[cfg(test)]
mod tests {
    use test_case::test_case;

    use super::*;
    use crate::{ListenerEvent, RecordingListener, SelectOption, assert_eq2};

    /// `[A, B (disabled), C]`
    fn a_b_disabled_c() -> OptionList<&'static str> {
        OptionList::from(vec![
            SelectOption::new("A", "A"),
            SelectOption::new("B", "B").with_disabled(true),
            SelectOption::new("C", "C"),
        ])
    }

    fn plain(values: &[&'static str]) -> OptionList<&'static str> {
        values.iter().map(|it| SelectOption::new(*it, *it)).collect()
    }

    #[test]
    fn test_next_skips_disabled_and_does_not_wrap() {
        let options = a_b_disabled_c();
        let first = next_focusable_index(&options, None);
        assert_eq2!(first, Some(0));
        let second = next_focusable_index(&options, first);
        assert_eq2!(second, Some(2));
        let third = next_focusable_index(&options, second);
        assert_eq2!(third, None);
    }

    #[test]
    fn test_previous_skips_disabled_and_does_not_wrap() {
        let options = a_b_disabled_c();
        let first = previous_focusable_index(&options, None);
        assert_eq2!(first, Some(2));
        let second = previous_focusable_index(&options, first);
        assert_eq2!(second, Some(0));
        assert_eq2!(previous_focusable_index(&options, second), None);
    }

    #[test_case(Some(3) ; "one past the end")]
    #[test_case(Some(usize::MAX) ; "far out of range")]
    fn test_out_of_range_index_is_treated_as_unset(maybe_index: Option<usize>) {
        let options = a_b_disabled_c();
        assert_eq2!(next_focusable_index(&options, maybe_index), Some(0));
        assert_eq2!(previous_focusable_index(&options, maybe_index), Some(2));
    }

    #[test]
    fn test_scans_on_empty_and_all_disabled_lists() {
        let empty = OptionList::<u8>::default();
        assert_eq2!(next_focusable_index(&empty, None), None);
        assert_eq2!(previous_focusable_index(&empty, None), None);

        let all_disabled = OptionList::from(vec![
            SelectOption::new(1, "1").with_disabled(true),
            SelectOption::new(2, "2").with_disabled(true),
        ]);
        assert_eq2!(first_focusable_index(&all_disabled), None);
        assert_eq2!(last_focusable_index(&all_disabled), None);
    }

    /// From unset, `next` and `previous` reach an enabled option, for every list with
    /// at least one enabled option. And `next` followed by `previous` lands back where it
    /// started.
    #[test]
    fn test_navigation_properties_over_all_disabled_masks() {
        for len in 1..=6_usize {
            for mask in 0..(1_u32 << len) {
                let options: OptionList<usize> = (0..len)
                    .map(|index| {
                        SelectOption::new(index, index.to_string())
                            .with_disabled(mask & (1 << index) != 0)
                    })
                    .collect();

                if !options.has_focusable() {
                    assert_eq2!(next_focusable_index(&options, None), None);
                    continue;
                }

                let next = next_focusable_index(&options, None).unwrap();
                let previous = previous_focusable_index(&options, None).unwrap();
                assert!(options.is_focusable_index(next));
                assert!(options.is_focusable_index(previous));

                for start in (0..len).filter(|&it| options.is_focusable_index(it)) {
                    if let Some(next) = next_focusable_index(&options, Some(start)) {
                        assert_eq2!(previous_focusable_index(&options, Some(next)), Some(start));
                    }
                    if let Some(previous) = previous_focusable_index(&options, Some(start)) {
                        assert_eq2!(next_focusable_index(&options, Some(previous)), Some(start));
                    }
                }
            }
        }
    }

    #[test]
    fn test_initial_focus() {
        let options = a_b_disabled_c();
        assert_eq2!(initial_focused_index(&options, Some(&"C")), Some(2));
        assert_eq2!(initial_focused_index(&options, None), None);
        assert_eq2!(initial_focused_index(&options, Some(&"Z")), None);
        // Disabled options can't hold focus.
        assert_eq2!(initial_focused_index(&options, Some(&"B")), None);
        // A value that matches more than one option is not a valid selection.
        let dupes = plain(&["X", "Y", "X"]);
        assert_eq2!(initial_focused_index(&dupes, Some(&"X")), None);
    }

    #[test]
    fn test_on_options_changed_clears_focus_when_value_is_gone() {
        let old = plain(&["A", "B", "C"]);
        let new = plain(&["B", "C"]);
        assert_eq2!(
            on_options_changed(&old, &new, Some(&"A")),
            OptionsChangeOutcome::Changed {
                maybe_focused_index: None
            }
        );
    }

    #[test]
    fn test_on_options_changed_relocates_value() {
        let old = plain(&["A", "B", "C"]);
        let new = plain(&["C", "A"]);
        assert_eq2!(
            on_options_changed(&old, &new, Some(&"A")),
            OptionsChangeOutcome::Changed {
                maybe_focused_index: Some(1)
            }
        );
    }

    #[test]
    fn test_on_options_changed_same_values() {
        let old = plain(&["A", "B"]);
        let relabeled = OptionList::from(vec![
            SelectOption::new("A", "Apple"),
            SelectOption::new("B", "Banana"),
        ]);
        assert_eq2!(
            on_options_changed(&old, &relabeled, Some(&"A")),
            OptionsChangeOutcome::SameValues
        );
    }

    #[test_case("A", Some(0) ; "enabled value")]
    #[test_case("B", None ; "disabled value")]
    #[test_case("Z", None ; "absent value")]
    fn test_validate_selection(value: &'static str, expected: Option<usize>) {
        assert_eq2!(validate_selection(&a_b_disabled_c(), &value), expected);
    }

    #[test]
    fn test_controller_navigation_notifies_listener() {
        let (listener, log) = RecordingListener::new_with_log();
        let mut controller =
            FocusSelectionController::new(a_b_disabled_c(), None).with_listener(listener);

        assert_eq2!(controller.focus_next(), Some(0));
        assert_eq2!(controller.focus_next(), Some(2));
        assert_eq2!(controller.focus_next(), None);
        assert_eq2!(controller.focused_index(), Some(2));
        assert_eq2!(controller.focused_value(), Some(&"C"));

        assert_eq2!(
            *log.borrow(),
            vec![
                ListenerEvent::FocusChange(Some(0)),
                ListenerEvent::FocusChange(Some(2)),
            ]
        );
    }

    #[test]
    fn test_controller_select_is_noop_for_disabled_or_absent() {
        let (listener, log) = RecordingListener::new_with_log();
        let mut controller =
            FocusSelectionController::new(a_b_disabled_c(), Some("A")).with_listener(listener);

        assert!(!controller.select(&"B"));
        assert!(!controller.select(&"Z"));
        assert!(log.borrow().is_empty());
        assert_eq2!(controller.selected_value(), Some(&"A"));

        assert!(controller.select(&"C"));
        assert_eq2!(*log.borrow(), vec![ListenerEvent::SelectionChange("C")]);

        // The controller never changes the caller's selection by itself.
        assert_eq2!(controller.selected_value(), Some(&"A"));
    }

    #[test]
    fn test_controller_focus_follows_selected_value() {
        let (listener, log) = RecordingListener::new_with_log();
        let mut controller =
            FocusSelectionController::new(plain(&["A", "B", "C"]), Some("A"))
                .with_listener(listener);
        assert_eq2!(controller.focused_index(), Some(0));

        controller.set_selected_value(Some("C"));
        assert_eq2!(controller.focused_index(), Some(2));
        assert_eq2!(controller.selected_index(), Some(2));

        controller.set_selected_value(None);
        assert_eq2!(controller.focused_index(), None);

        assert_eq2!(
            *log.borrow(),
            vec![
                ListenerEvent::FocusChange(Some(2)),
                ListenerEvent::FocusChange(None),
            ]
        );
    }

    #[test]
    fn test_controller_set_options_clear_focus_policy() {
        let mut controller = FocusSelectionController::new(plain(&["A", "B", "C"]), None);
        controller.focus_index(0);

        let outcome = controller.set_options(plain(&["B", "C"]));
        assert!(matches!(outcome, OptionsChangeOutcome::Changed { .. }));
        assert_eq2!(controller.focused_index(), None);
        assert_eq2!(controller.focused_value(), None);
    }

    #[test]
    fn test_controller_set_options_keeps_focused_value() {
        let mut controller = FocusSelectionController::new(plain(&["A", "B", "C"]), None);
        controller.focus_index(2);

        controller.set_options(plain(&["C", "D"]));
        assert_eq2!(controller.focused_index(), Some(0));
        assert_eq2!(controller.focused_value(), Some(&"C"));
    }

    #[test]
    fn test_controller_set_options_focus_first_policy() {
        let mut controller = FocusSelectionController::new(plain(&["A", "B"]), None)
            .with_policy(OptionsChangedPolicy::FocusFirst);

        controller.set_options(OptionList::from(vec![
            SelectOption::new("X", "X").with_disabled(true),
            SelectOption::new("Y", "Y"),
        ]));
        assert_eq2!(controller.focused_index(), Some(1));

        // Same values: the policy doesn't kick in.
        controller.focus_index(1);
        let outcome = controller.set_options(plain(&["X", "Y"]));
        assert_eq2!(outcome, OptionsChangeOutcome::SameValues);
        assert_eq2!(controller.focused_index(), Some(1));
    }

    #[test]
    fn test_controller_same_values_drops_focus_on_newly_disabled() {
        let mut controller = FocusSelectionController::new(plain(&["A", "B"]), None);
        controller.focus_index(1);
        controller.set_options(OptionList::from(vec![
            SelectOption::new("A", "A"),
            SelectOption::new("B", "B").with_disabled(true),
        ]));
        assert_eq2!(controller.focused_index(), None);
    }

    #[test]
    fn test_controller_focus_index_rejects_disabled_and_out_of_range() {
        let mut controller = FocusSelectionController::new(a_b_disabled_c(), None);
        assert!(!controller.focus_index(1));
        assert!(!controller.focus_index(9));
        assert_eq2!(controller.focused_index(), None);
        assert!(controller.focus_index(2));
        controller.clear_focus();
        assert_eq2!(controller.focused_index(), None);
    }

    #[test]
    fn test_controller_select_focused() {
        let (listener, log) = RecordingListener::new_with_log();
        let mut controller =
            FocusSelectionController::new(a_b_disabled_c(), None).with_listener(listener);
        assert!(!controller.select_focused());
        controller.focus_last();
        assert!(controller.select_focused());
        assert_eq2!(
            log.borrow().last().cloned(),
            Some(ListenerEvent::SelectionChange("C"))
        );
    }
}
