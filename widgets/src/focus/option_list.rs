// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::{fmt::Debug, slice::Iter};

use crate::{CommonResult, WidgetsError};

/// One selectable entry in a list or segmented control.
///
/// The `value` is opaque to this crate and is only ever compared with [`PartialEq`]. The
/// `label` is what the renderer displays. A `disabled` option can't receive keyboard
/// focus and can't be selected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectOption<V> {
    pub value: V,
    pub label: String,
    pub disabled: bool,
}

impl<V> SelectOption<V> {
    pub fn new(value: V, label: impl Into<String>) -> Self {
        Self {
            value,
            label: label.into(),
            disabled: false,
        }
    }

    #[must_use]
    pub fn with_disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    /// Only enabled options can hold keyboard focus.
    pub fn is_focusable(&self) -> bool { !self.disabled }
}

/// Ordered sequence of [`SelectOption`]s. Insertion order is navigation order.
///
/// Uniqueness of values is assumed but not enforced by [`OptionList::new`]. Use
/// [`OptionList::try_new_unique`] when duplicates should be rejected up front.
///
/// Two lists describe "the same options" when their value sequences are equal, see
/// [`OptionList::has_same_values`]. Labels and disabled flags are not part of that
/// identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionList<V> {
    items: Vec<SelectOption<V>>,
}

impl<V> Default for OptionList<V> {
    fn default() -> Self { Self { items: Vec::new() } }
}

impl<V> From<Vec<SelectOption<V>>> for OptionList<V> {
    fn from(items: Vec<SelectOption<V>>) -> Self { Self::new(items) }
}

impl<V> FromIterator<SelectOption<V>> for OptionList<V> {
    fn from_iter<T: IntoIterator<Item = SelectOption<V>>>(iter: T) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a, V> IntoIterator for &'a OptionList<V> {
    type Item = &'a SelectOption<V>;
    type IntoIter = Iter<'a, SelectOption<V>>;

    fn into_iter(self) -> Self::IntoIter { self.items.iter() }
}

impl<V> OptionList<V> {
    #[must_use]
    pub fn new(items: Vec<SelectOption<V>>) -> Self { Self { items } }

    #[must_use]
    pub fn len(&self) -> usize { self.items.len() }

    #[must_use]
    pub fn is_empty(&self) -> bool { self.items.is_empty() }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&SelectOption<V>> { self.items.get(index) }

    pub fn iter(&self) -> Iter<'_, SelectOption<V>> { self.items.iter() }

    /// Returns `true` if `index` is in range and that option is enabled.
    #[must_use]
    pub fn is_focusable_index(&self, index: usize) -> bool {
        self.get(index).is_some_and(SelectOption::is_focusable)
    }

    /// Out of range indices are normalized to [`None`] ("no focus").
    #[must_use]
    pub fn normalize_index(&self, maybe_index: Option<usize>) -> Option<usize> {
        maybe_index.filter(|&index| index < self.len())
    }

    /// `true` if at least one option can receive focus.
    #[must_use]
    pub fn has_focusable(&self) -> bool { self.items.iter().any(SelectOption::is_focusable) }
}

impl<V: PartialEq> OptionList<V> {
    /// Index of the first option whose value equals `value`.
    #[must_use]
    pub fn index_of(&self, value: &V) -> Option<usize> {
        self.items.iter().position(|it| &it.value == value)
    }

    /// Index of the option whose value equals `value`, but only if exactly one option
    /// matches. A selected value that matches zero or several options is treated as "no
    /// selection".
    #[must_use]
    pub fn index_of_unique(&self, value: &V) -> Option<usize> {
        let mut matches = self
            .items
            .iter()
            .enumerate()
            .filter(|(_, it)| &it.value == value)
            .map(|(index, _)| index);
        match (matches.next(), matches.next()) {
            (Some(index), None) => Some(index),
            _ => None,
        }
    }

    /// Compares the value sequences of both lists, in order.
    #[must_use]
    pub fn has_same_values(&self, other: &OptionList<V>) -> bool {
        self.len() == other.len()
            && self
                .items
                .iter()
                .zip(other.items.iter())
                .all(|(lhs, rhs)| lhs.value == rhs.value)
    }
}

impl<V: PartialEq + Debug> OptionList<V> {
    /// Same as [`OptionList::new`] but rejects lists that contain the same value twice.
    ///
    /// # Errors
    ///
    /// Returns [`WidgetsError::DuplicateOptionValue`] naming the first duplicate found.
    pub fn try_new_unique(items: Vec<SelectOption<V>>) -> CommonResult<Self> {
        for (duplicate_index, item) in items.iter().enumerate() {
            if let Some(first_index) =
                items[..duplicate_index].iter().position(|it| it.value == item.value)
            {
                return Err(WidgetsError::DuplicateOptionValue {
                    value: format!("{:?}", item.value),
                    first_index,
                    duplicate_index,
                }
                .into());
            }
        }
        Ok(Self::new(items))
    }
}
