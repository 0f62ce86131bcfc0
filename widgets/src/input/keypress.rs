// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::str::FromStr;

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

use super::{ModifierKeysMask, convert_key_modifiers};
use crate::WidgetsError;

/// Examples.
///
/// ```
/// use form_widgets::*;
///
/// let a = keypress!(@char 'a');
/// assert_eq!(a, KeyPress::Plain { key: Key::Character('a') });
///
/// let ctrl_enter = keypress!(@special ModifierKeysMask::new().with_ctrl(), SpecialKey::Enter);
/// assert_eq!(
///     ctrl_enter,
///     KeyPress::WithModifiers {
///         key: Key::SpecialKey(SpecialKey::Enter),
///         mask: ModifierKeysMask::new().with_ctrl(),
///     }
/// );
/// ```
#[macro_export]
macro_rules! keypress {
    // @char
    (@char $arg_char : expr) => {
        $crate::KeyPress::Plain {
            key: $crate::Key::Character($arg_char),
        }
    };

    (@char $arg_modifiers : expr, $arg_char : expr) => {
        $crate::KeyPress::WithModifiers {
            mask: $arg_modifiers,
            key: $crate::Key::Character($arg_char),
        }
    };

    // @special
    (@special $arg_special : expr) => {
        $crate::KeyPress::Plain {
            key: $crate::Key::SpecialKey($arg_special),
        }
    };

    (@special $arg_modifiers : expr, $arg_special : expr) => {
        $crate::KeyPress::WithModifiers {
            mask: $arg_modifiers,
            key: $crate::Key::SpecialKey($arg_special),
        }
    };
}

/// Keyboard input that widgets react to. This is a cleaned up version of
/// [`crossterm::event::KeyEvent`] with impossible states removed, so a DOM or GUI backend
/// can produce it just as easily as a terminal backend.
///
/// Please use the [`keypress!`] macro instead of directly constructing this.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize, Copy)]
pub enum KeyPress {
    Plain { key: Key },
    WithModifiers { key: Key, mask: ModifierKeysMask },
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize, Copy)]
pub enum Key {
    /// Printable character. The space bar is `Character(' ')`.
    Character(char),
    SpecialKey(SpecialKey),
}

#[derive(
    Clone, Debug, Eq, PartialEq, Serialize, Deserialize, Copy, Display, EnumString,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum SpecialKey {
    Backspace,
    Enter,
    Left,
    Right,
    Up,
    Down,
    Home,
    End,
    #[strum(serialize = "pageup")]
    PageUp,
    #[strum(serialize = "pagedown")]
    PageDown,
    Tab,
    #[strum(serialize = "backtab")]
    BackTab, /* Shift + Tab */
    Delete,
    Insert,
    Esc,
}

pub const SPACE: char = ' ';

impl KeyPress {
    #[must_use]
    pub fn key(&self) -> Key {
        match self {
            KeyPress::Plain { key } | KeyPress::WithModifiers { key, .. } => *key,
        }
    }

    /// [`None`] for a plain key press. An empty mask is also treated as "no modifiers".
    #[must_use]
    pub fn modifiers(&self) -> Option<ModifierKeysMask> {
        match self {
            KeyPress::Plain { .. } => None,
            KeyPress::WithModifiers { mask, .. } if mask.is_empty() => None,
            KeyPress::WithModifiers { mask, .. } => Some(*mask),
        }
    }

    #[must_use]
    pub fn has_modifiers(&self) -> bool { self.modifiers().is_some() }

    /// Ctrl + Enter submits the enclosing form, from any widget.
    #[must_use]
    pub fn is_submit_form(&self) -> bool {
        self.key() == Key::SpecialKey(SpecialKey::Enter)
            && self.modifiers().is_some_and(|it| it.is_ctrl_only())
    }

    /// Plain special key (no modifiers), eg: `Up`, `Enter`.
    #[must_use]
    pub fn as_plain_special_key(&self) -> Option<SpecialKey> {
        match (self.key(), self.has_modifiers()) {
            (Key::SpecialKey(special_key), false) => Some(special_key),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_plain_space(&self) -> bool {
        self.key() == Key::Character(SPACE) && !self.has_modifiers()
    }
}

/// Parse key names like `down`, `Enter`, `space`, `x`, `ctrl+enter`, `shift+tab`.
impl FromStr for KeyPress {
    type Err = WidgetsError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let unknown = || WidgetsError::UnknownKey {
            name: input.to_string(),
        };

        let mut parts: Vec<&str> = input.trim().split('+').map(str::trim).collect();
        let Some(key_name) = parts.pop() else {
            return Err(unknown());
        };

        let mut mask = ModifierKeysMask::new();
        for modifier in parts {
            mask = match modifier.to_ascii_lowercase().as_str() {
                "ctrl" | "control" => mask.with_ctrl(),
                "alt" | "option" => mask.with_alt(),
                "shift" => mask.with_shift(),
                "meta" | "super" | "cmd" => mask.with_meta(),
                _ => return Err(unknown()),
            };
        }

        let key = if key_name.eq_ignore_ascii_case("space") {
            Key::Character(SPACE)
        } else if let Ok(special_key) = SpecialKey::from_str(key_name) {
            Key::SpecialKey(special_key)
        } else {
            let mut chars = key_name.chars();
            match (chars.next(), chars.next()) {
                (Some(character), None) => Key::Character(character),
                _ => return Err(unknown()),
            }
        };

        Ok(if mask.is_empty() {
            KeyPress::Plain { key }
        } else {
            KeyPress::WithModifiers { key, mask }
        })
    }
}

/// Typecast / convert [`KeyEvent`] to [`KeyPress`].
///
/// Only [`KeyEventKind::Press`] events are converted. For printable characters the
/// `SHIFT` modifier is dropped, since it is already reflected in the character itself:
///
/// ```text
/// ╔════════════════════╦══════════════════════════════════════╗
/// ║ User action        ║ Result                               ║
/// ╠════════════════════╬══════════════════════════════════════╣
/// ║ Type "x"           ║ keypress!(@char 'x')                 ║
/// ╠════════════════════╬══════════════════════════════════════╣
/// ║ Type "Shift + x"   ║ keypress!(@char 'X'), SHIFT ignored  ║
/// ╚════════════════════╩══════════════════════════════════════╝
/// ```
impl TryFrom<KeyEvent> for KeyPress {
    type Error = ();

    fn try_from(key_event: KeyEvent) -> Result<Self, Self::Error> {
        if key_event.kind != KeyEventKind::Press {
            return Err(());
        }

        match key_event {
            // If character keys, then ignore SHIFT or NONE modifiers.
            KeyEvent {
                code: KeyCode::Char(character),
                modifiers: KeyModifiers::NONE | KeyModifiers::SHIFT,
                ..
            } => Ok(keypress!(@char character)),
            // Non character keys, or characters with other modifiers.
            _ => {
                let key = copy_code_from_key_event(&key_event).ok_or(())?;
                Ok(match convert_key_modifiers(&key_event.modifiers) {
                    Some(mask) => KeyPress::WithModifiers { key, mask },
                    None => KeyPress::Plain { key },
                })
            }
        }
    }
}

pub fn copy_code_from_key_event(key_event: &KeyEvent) -> Option<Key> {
    // Make the code easier to read below using this alias.
    type KC = KeyCode;
    Some(match key_event.code {
        KC::Backspace => Key::SpecialKey(SpecialKey::Backspace),
        KC::Enter => Key::SpecialKey(SpecialKey::Enter),
        KC::Left => Key::SpecialKey(SpecialKey::Left),
        KC::Right => Key::SpecialKey(SpecialKey::Right),
        KC::Up => Key::SpecialKey(SpecialKey::Up),
        KC::Down => Key::SpecialKey(SpecialKey::Down),
        KC::Home => Key::SpecialKey(SpecialKey::Home),
        KC::End => Key::SpecialKey(SpecialKey::End),
        KC::PageUp => Key::SpecialKey(SpecialKey::PageUp),
        KC::PageDown => Key::SpecialKey(SpecialKey::PageDown),
        KC::Tab => Key::SpecialKey(SpecialKey::Tab),
        KC::BackTab => Key::SpecialKey(SpecialKey::BackTab),
        KC::Delete => Key::SpecialKey(SpecialKey::Delete),
        KC::Insert => Key::SpecialKey(SpecialKey::Insert),
        KC::Esc => Key::SpecialKey(SpecialKey::Esc),
        KC::Char(character) => Key::Character(character),
        // Function, media, and lock keys don't drive any widget.
        _ => return None,
    })
}
