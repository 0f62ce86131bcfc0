// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

use crate::OptionsChangedPolicy;

/// Accessibility role of a list or list item, rendered as the ARIA `role` attribute.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, Display, EnumString,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum AriaRole {
    Listbox,
    Option,
    Menu,
    #[strum(serialize = "menuitem")]
    #[serde(rename = "menuitem")]
    MenuItem,
    List,
    #[strum(serialize = "listitem")]
    #[serde(rename = "listitem")]
    ListItem,
}

/// Behavior switches for [`crate::ListWidget`].
///
/// Missing fields in a config file fall back to [`ListConfig::default`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ListConfig {
    /// One item is reachable with Tab. When `false` every item gets `tab_index == -1`.
    pub tabbable: bool,
    /// Move real (renderer) focus to the focused item.
    pub should_focus: bool,
    /// When the option values change, focus the first enabled option.
    pub focus_first_item_when_items_change: bool,
    /// Render the selected item as highlighted.
    pub highlight_selected_item: bool,
    /// Report `aria_selected` for the focused item instead of the selected one. Combobox
    /// style lists need this.
    pub aria_selected_on_focused_item: bool,
    /// The list lives inside an expandable (dropdown) container. Such a list shows item
    /// focus even when it doesn't hold keyboard focus, and ignores its own focus in / out.
    pub expandable: bool,
    /// Explicit role. When [`None`], the role is [`AriaRole::Listbox`] if the list has a
    /// selection listener.
    pub role: Option<AriaRole>,
}

impl Default for ListConfig {
    fn default() -> Self {
        Self {
            tabbable: true,
            should_focus: true,
            focus_first_item_when_items_change: false,
            highlight_selected_item: true,
            aria_selected_on_focused_item: false,
            expandable: false,
            role: None,
        }
    }
}

impl ListConfig {
    pub fn options_changed_policy(&self) -> OptionsChangedPolicy {
        if self.focus_first_item_when_items_change {
            OptionsChangedPolicy::FocusFirst
        } else {
            OptionsChangedPolicy::ClearFocus
        }
    }
}
