// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use crossterm::event::KeyModifiers;
use serde::{Deserialize, Serialize};

/// Which modifier keys were held down with a key press. `meta` covers both the "super"
/// (Windows / Command) and "meta" keys.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ModifierKeysMask {
    pub shift_key_state: KeyState,
    pub ctrl_key_state: KeyState,
    pub alt_key_state: KeyState,
    pub meta_key_state: KeyState,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum KeyState {
    Pressed,
    #[default]
    NotPressed,
}

impl ModifierKeysMask {
    #[must_use]
    pub fn new() -> Self { Self::default() }

    #[must_use]
    pub fn with_shift(mut self) -> Self {
        self.shift_key_state = KeyState::Pressed;
        self
    }

    #[must_use]
    pub fn with_ctrl(mut self) -> Self {
        self.ctrl_key_state = KeyState::Pressed;
        self
    }

    #[must_use]
    pub fn with_alt(mut self) -> Self {
        self.alt_key_state = KeyState::Pressed;
        self
    }

    #[must_use]
    pub fn with_meta(mut self) -> Self {
        self.meta_key_state = KeyState::Pressed;
        self
    }

    /// `true` if no modifier is pressed.
    #[must_use]
    pub fn is_empty(&self) -> bool { *self == Self::default() }

    /// `true` if only the ctrl key is pressed.
    #[must_use]
    pub fn is_ctrl_only(&self) -> bool { *self == Self::new().with_ctrl() }
}

/// Returns [`None`] if no modifier bits are set.
pub fn convert_key_modifiers(modifiers: &KeyModifiers) -> Option<ModifierKeysMask> {
    if modifiers.is_empty() {
        None
    } else {
        Some(ModifierKeysMask::from(*modifiers))
    }
}

impl From<KeyModifiers> for ModifierKeysMask {
    /// Difference in meaning between `intersects` and `contains`:
    /// - `intersects` -> means that the given bit shows up in your variable, but it might
    ///   contain other bits.
    /// - `contains` -> means that your variable ONLY contains these bits.
    fn from(other: KeyModifiers) -> ModifierKeysMask {
        let mut it = ModifierKeysMask::new();

        if other.intersects(KeyModifiers::SHIFT) {
            it.shift_key_state = KeyState::Pressed;
        }
        if other.intersects(KeyModifiers::CONTROL) {
            it.ctrl_key_state = KeyState::Pressed;
        }
        if other.intersects(KeyModifiers::ALT) {
            it.alt_key_state = KeyState::Pressed;
        }
        if other.intersects(KeyModifiers::SUPER | KeyModifiers::META) {
            it.meta_key_state = KeyState::Pressed;
        }

        it
    }
}
