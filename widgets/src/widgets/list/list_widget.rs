// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::fmt::Debug;

use super::{AriaRole, ListConfig, ListItemView, ListItemViews, TAB_INDEX_NOT_TABBABLE,
            TAB_INDEX_TABBABLE};
use crate::{EventPropagation, FocusSelectionController, FocusSelectionListener, KeyPress,
            OptionList, OptionsChangeOutcome, SpecialKey, first_focusable_index};

/// Enable or disable debug logging for list key and focus handling.
pub const DEBUG_LIST_MOD: bool = true;

/// A single choice list. Up / Down move keyboard focus between enabled items, Enter or
/// Space selects the focused item.
///
/// The list has two kinds of focus:
/// 1. Whether the list as a whole holds keyboard focus (`is_focused`).
/// 2. Which item inside it is focused (owned by the [`FocusSelectionController`]).
///
/// Item focus is only shown when the list holds keyboard focus, unless the list is
/// [`expandable`](ListConfig::expandable).
#[derive(Debug)]
pub struct ListWidget<V> {
    controller: FocusSelectionController<V>,
    config: ListConfig,
    is_focused: bool,
    has_on_change: bool,
    disabled: bool,
}

impl<V> ListWidget<V>
where
    V: Clone + PartialEq + Debug + 'static,
{
    pub fn new(options: OptionList<V>, maybe_value: Option<V>, config: ListConfig) -> Self {
        let controller = FocusSelectionController::new(options, maybe_value)
            .with_policy(config.options_changed_policy());
        Self {
            controller,
            config,
            is_focused: false,
            has_on_change: false,
            disabled: false,
        }
    }

    /// Attaches the listener that receives focus and selection change requests. A list
    /// with a listener is a selectable list: it gets the [`AriaRole::Listbox`] role and
    /// shows which item is selected.
    #[must_use]
    pub fn with_listener(mut self, listener: impl FocusSelectionListener<V> + 'static) -> Self {
        self.controller.set_listener(listener);
        self.has_on_change = true;
        self
    }

    #[must_use]
    pub fn with_disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    pub fn set_disabled(&mut self, disabled: bool) { self.disabled = disabled; }

    /// Overrides whether the list counts as selectable. A wrapping dropdown installs its
    /// own listener, and uses this to report whether the caller had one.
    pub fn set_has_on_change(&mut self, has_on_change: bool) {
        self.has_on_change = has_on_change;
    }

    pub fn controller(&self) -> &FocusSelectionController<V> { &self.controller }

    pub fn config(&self) -> &ListConfig { &self.config }

    pub fn options(&self) -> &OptionList<V> { self.controller.options() }

    pub fn is_focused(&self) -> bool { self.is_focused }

    pub fn is_disabled(&self) -> bool { self.disabled }

    pub fn focused_index(&self) -> Option<usize> { self.controller.focused_index() }

    pub fn selected_value(&self) -> Option<&V> { self.controller.selected_value() }

    /// Explicit role from the config, else [`AriaRole::Listbox`] for a selectable list.
    pub fn role(&self) -> Option<AriaRole> {
        self.config
            .role
            .or_else(|| self.has_on_change.then_some(AriaRole::Listbox))
    }

    /// The item the renderer should move real focus to, if any.
    pub fn real_focus_target(&self) -> Option<usize> {
        if self.config.should_focus {
            self.controller.focused_index()
        } else {
            None
        }
    }

    // ┌─────────────────────────────────────────────────────────────────────┐
    // │ Keyboard                                                            │
    // └─────────────────────────────────────────────────────────────────────┘

    pub fn handle_key(&mut self, key_press: KeyPress) -> EventPropagation {
        if key_press.is_submit_form() {
            return EventPropagation::SubmitForm;
        }

        if self.disabled || key_press.has_modifiers() || self.controller.options().is_empty()
        {
            return EventPropagation::Propagate;
        }

        let result = if key_press.is_plain_space() {
            self.select_focused()
        } else {
            match key_press.as_plain_special_key() {
                Some(SpecialKey::Up) => moved(self.controller.focus_previous()),
                Some(SpecialKey::Down) => moved(self.controller.focus_next()),
                Some(SpecialKey::Home) => moved(self.controller.focus_first()),
                Some(SpecialKey::End) => moved(self.controller.focus_last()),
                Some(SpecialKey::Enter) => self.select_focused(),
                _ => EventPropagation::Propagate,
            }
        };

        DEBUG_LIST_MOD.then(|| {
            // % is Display, ? is Debug.
            tracing::debug!(
                message = "list handle_key",
                key_press = ?key_press,
                result = ?result,
                focused_index = ?self.controller.focused_index()
            );
        });

        result
    }

    fn select_focused(&mut self) -> EventPropagation {
        if self.controller.select_focused() {
            EventPropagation::ConsumedRender
        } else {
            EventPropagation::Consumed
        }
    }

    // ┌─────────────────────────────────────────────────────────────────────┐
    // │ Pointer and focus                                                   │
    // └─────────────────────────────────────────────────────────────────────┘

    /// Pressing the pointer on an item focuses it, before the click lands.
    pub fn on_item_pointer_down(&mut self, index: usize) -> bool {
        self.focus_item(index)
    }

    /// An item received real focus (eg: via Tab).
    pub fn on_item_focus(&mut self, index: usize) -> bool { self.focus_item(index) }

    fn focus_item(&mut self, index: usize) -> bool {
        if self.disabled || !self.controller.focus_index(index) {
            return false;
        }
        self.on_focus_in();
        true
    }

    /// Clicking an item selects it. Disabled or out of range items are ignored.
    pub fn on_item_click(&mut self, index: usize) -> bool {
        if self.disabled {
            return false;
        }
        self.controller.select_index(index)
    }

    pub fn on_focus_in(&mut self) {
        if self.config.expandable {
            return;
        }
        self.is_focused = true;
    }

    /// Keyboard focus left the list. Without a selected value there is nothing to come
    /// back to, so item focus is cleared too.
    pub fn on_focus_out(&mut self) {
        if self.config.expandable {
            return;
        }
        if self.controller.selected_value().is_none() {
            self.controller.clear_focus();
        }
        self.is_focused = false;

        DEBUG_LIST_MOD.then(|| {
            // % is Display, ? is Debug.
            tracing::debug!(
                message = "list focus out",
                focused_index = ?self.controller.focused_index()
            );
        });
    }

    /// Focuses the list: the previously focused item, else the first enabled one.
    pub fn focus(&mut self) -> Option<usize> {
        let index = self
            .controller
            .focused_index()
            .or_else(|| first_focusable_index(self.controller.options()))?;
        self.focus_item(index).then_some(index)
    }

    pub fn clear_focus(&mut self) { self.controller.clear_focus(); }

    // ┌─────────────────────────────────────────────────────────────────────┐
    // │ Caller driven changes                                               │
    // └─────────────────────────────────────────────────────────────────────┘

    pub fn set_options(&mut self, options: OptionList<V>) -> OptionsChangeOutcome {
        self.controller.set_options(options)
    }

    pub fn set_value(&mut self, maybe_value: Option<V>) {
        self.controller.set_selected_value(maybe_value);
    }

    // ┌─────────────────────────────────────────────────────────────────────┐
    // │ View model                                                          │
    // └─────────────────────────────────────────────────────────────────────┘

    pub fn item_views(&self) -> ListItemViews {
        let maybe_focused_index = self.controller.focused_index();
        let show_focus = self.config.expandable || self.is_focused;
        let item_role = (self.role() == Some(AriaRole::Listbox)).then_some(AriaRole::Option);

        self.controller
            .options()
            .iter()
            .enumerate()
            .map(|(index, option)| {
                let focused = show_focus && maybe_focused_index == Some(index);
                let selected = self.has_on_change && self.controller.is_selected(&option.value);
                let is_tab_stop = match maybe_focused_index {
                    None => index == 0,
                    Some(focused_index) => index == focused_index,
                };
                ListItemView {
                    index,
                    label: option.label.clone(),
                    focused,
                    selected,
                    highlighted: selected && self.config.highlight_selected_item,
                    disabled: self.disabled || option.disabled,
                    tab_index: if self.config.tabbable && is_tab_stop {
                        TAB_INDEX_TABBABLE
                    } else {
                        TAB_INDEX_NOT_TABBABLE
                    },
                    role: item_role,
                    aria_selected: if self.config.aria_selected_on_focused_item {
                        focused
                    } else {
                        selected
                    },
                }
            })
            .collect()
    }
}

/// Arrow keys are always consumed. A render is only needed if focus actually moved.
fn moved(maybe_index: Option<usize>) -> EventPropagation {
    match maybe_index {
        Some(_) => EventPropagation::ConsumedRender,
        None => EventPropagation::Consumed,
    }
}
