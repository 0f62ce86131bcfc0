// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use smallvec::SmallVec;

use super::AriaRole;

/// Tab index of the item reachable with Tab.
pub const TAB_INDEX_TABBABLE: i32 = 0;
/// Tab index of items only reachable with the arrow keys.
pub const TAB_INDEX_NOT_TABBABLE: i32 = -1;

pub const DEFAULT_LIST_VIEW_SIZE: usize = 16;

pub type ListItemViews = SmallVec<[ListItemView; DEFAULT_LIST_VIEW_SIZE]>;

/// Everything a renderer needs to draw one list item.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ListItemView {
    pub index: usize,
    pub label: String,
    pub focused: bool,
    pub selected: bool,
    pub highlighted: bool,
    pub disabled: bool,
    pub tab_index: i32,
    pub role: Option<AriaRole>,
    pub aria_selected: bool,
}

impl ListItemView {
    #[must_use]
    pub fn is_tabbable(&self) -> bool { self.tab_index == TAB_INDEX_TABBABLE }
}
