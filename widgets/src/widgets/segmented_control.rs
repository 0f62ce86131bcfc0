// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! A row of mutually exclusive buttons. Unlike [`crate::ListWidget`], arrow keys change
//! the *selection* right away (relative to the selected value, not the focused one).
//!
//! ```text
//! ╭───────┬────────┬───────╮
//! │ First │ Middle │ Last  │   <- Left / Right move the selection
//! ╰───────┴────────┴───────╯
//! ```

use std::fmt::Debug;

use smallvec::SmallVec;

use super::{FieldError, TAB_INDEX_NOT_TABBABLE, TAB_INDEX_TABBABLE};
use crate::{EventPropagation, FocusSelectionController, FocusSelectionListener, KeyPress,
            OptionList, OptionsChangeOutcome, OptionsChangedPolicy, SpecialKey,
            first_focusable_index, next_focusable_index, previous_focusable_index};

/// Enable or disable debug logging for segmented control key handling.
pub const DEBUG_SEGMENTED_MOD: bool = true;

pub const DEFAULT_SEGMENT_VIEW_SIZE: usize = 8;

pub type SegmentViews = SmallVec<[SegmentView; DEFAULT_SEGMENT_VIEW_SIZE]>;

/// Where a segment sits in the row. Renderers use it for rounded corners and separators.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SegmentPosition {
    First,
    Middle,
    Last,
    Only,
}

impl SegmentPosition {
    pub fn of(index: usize, len: usize) -> Self {
        match (index, len) {
            (_, 0 | 1) => SegmentPosition::Only,
            (0, _) => SegmentPosition::First,
            (index, len) if index + 1 == len => SegmentPosition::Last,
            _ => SegmentPosition::Middle,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SegmentView {
    pub index: usize,
    pub label: String,
    pub selected: bool,
    pub focused: bool,
    pub disabled: bool,
    pub position: SegmentPosition,
    pub tab_index: i32,
}

#[derive(Debug)]
pub struct SegmentedControl<V> {
    controller: FocusSelectionController<V>,
    disabled: bool,
    is_focused: bool,
    field_error: FieldError,
}

impl<V> SegmentedControl<V>
where
    V: Clone + PartialEq + Debug + 'static,
{
    pub fn new(options: OptionList<V>, maybe_value: Option<V>) -> Self {
        Self {
            controller: FocusSelectionController::new(options, maybe_value),
            disabled: false,
            is_focused: false,
            field_error: FieldError::default(),
        }
    }

    #[must_use]
    pub fn with_listener(mut self, listener: impl FocusSelectionListener<V> + 'static) -> Self {
        self.controller.set_listener(listener);
        self
    }

    #[must_use]
    pub fn with_policy(mut self, policy: OptionsChangedPolicy) -> Self {
        self.controller.set_policy(policy);
        self
    }

    #[must_use]
    pub fn with_disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    #[must_use]
    pub fn with_field_error(mut self, field_error: FieldError) -> Self {
        self.field_error = field_error;
        self
    }

    pub fn set_disabled(&mut self, disabled: bool) { self.disabled = disabled; }

    pub fn set_error(&mut self, maybe_error: Option<String>) {
        self.field_error.set_error(maybe_error);
    }

    pub fn controller(&self) -> &FocusSelectionController<V> { &self.controller }

    pub fn options(&self) -> &OptionList<V> { self.controller.options() }

    pub fn selected_value(&self) -> Option<&V> { self.controller.selected_value() }

    pub fn focused_index(&self) -> Option<usize> { self.controller.focused_index() }

    pub fn is_disabled(&self) -> bool { self.disabled }

    pub fn is_focused(&self) -> bool { self.is_focused }

    /// The error message to render below the control, if any.
    pub fn visible_error(&self) -> Option<&str> { self.field_error.visible_error() }

    pub fn handle_key(&mut self, key_press: KeyPress) -> EventPropagation {
        if key_press.is_submit_form() {
            return EventPropagation::SubmitForm;
        }
        if self.disabled {
            return EventPropagation::Propagate;
        }

        let is_left = match key_press.as_plain_special_key() {
            Some(SpecialKey::Left) => true,
            Some(SpecialKey::Right) => false,
            _ => return EventPropagation::Propagate,
        };

        // Arrows move relative to the selected value, so with nothing selected (or a
        // value that isn't in the options) they do nothing.
        let Some(selected_index) = self.controller.selected_index() else {
            return EventPropagation::Consumed;
        };

        let options = self.controller.options();
        let maybe_target = if is_left {
            previous_focusable_index(options, Some(selected_index))
        } else {
            next_focusable_index(options, Some(selected_index))
        };

        DEBUG_SEGMENTED_MOD.then(|| {
            // % is Display, ? is Debug.
            tracing::debug!(
                message = "segmented control handle_key",
                key_press = ?key_press,
                selected_index = %selected_index,
                target = ?maybe_target
            );
        });

        match maybe_target {
            Some(index) => {
                self.controller.focus_index(index);
                self.controller.select_index(index);
                EventPropagation::ConsumedRender
            }
            None => EventPropagation::Consumed,
        }
    }

    pub fn on_option_click(&mut self, index: usize) -> bool {
        if self.disabled || !self.controller.focus_index(index) {
            return false;
        }
        self.controller.select_index(index)
    }

    pub fn on_focus(&mut self) { self.is_focused = true; }

    pub fn on_blur(&mut self) { self.is_focused = false; }

    pub fn set_options(&mut self, options: OptionList<V>) -> OptionsChangeOutcome {
        self.controller.set_options(options)
    }

    pub fn set_value(&mut self, maybe_value: Option<V>) {
        self.controller.set_selected_value(maybe_value);
    }

    /// The selected option is the tab stop. With nothing selected it's the first enabled
    /// option.
    pub fn tab_stop_index(&self) -> Option<usize> {
        self.controller
            .selected_index()
            .filter(|&index| self.controller.options().is_focusable_index(index))
            .or_else(|| first_focusable_index(self.controller.options()))
    }

    pub fn segment_views(&self) -> SegmentViews {
        let options = self.controller.options();
        let len = options.len();
        let maybe_tab_stop = self.tab_stop_index();
        let maybe_focused_index = self.controller.focused_index();

        options
            .iter()
            .enumerate()
            .map(|(index, option)| SegmentView {
                index,
                label: option.label.clone(),
                selected: self.controller.is_selected(&option.value),
                focused: self.is_focused && maybe_focused_index == Some(index),
                disabled: self.disabled || option.disabled,
                position: SegmentPosition::of(index, len),
                tab_index: if !self.disabled && maybe_tab_stop == Some(index) {
                    TAB_INDEX_TABBABLE
                } else {
                    TAB_INDEX_NOT_TABBABLE
                },
            })
            .collect()
    }
}
