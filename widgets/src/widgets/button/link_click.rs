// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use crate::ModifierKeysMask;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerButton {
    Primary,
    Middle,
    Secondary,
}

/// A pointer click on a button rendered as a link.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PointerClick {
    pub button: PointerButton,
    pub mask: ModifierKeysMask,
}

impl PointerClick {
    pub fn primary() -> Self {
        Self {
            button: PointerButton::Primary,
            mask: ModifierKeysMask::new(),
        }
    }

    #[must_use]
    pub fn with_mask(mut self, mask: ModifierKeysMask) -> Self {
        self.mask = mask;
        self
    }

    /// Only a primary button click with no modifier keys activates a link button. The
    /// rest (eg: ctrl + click to open in a new tab) is left to the renderer's default
    /// handling.
    pub fn activates_link(&self) -> bool {
        self.button == PointerButton::Primary && self.mask.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use test_case::test_case;

    use super::*;
    use crate::assert_eq2;

    #[test_case(PointerButton::Primary, ModifierKeysMask::new(), true ; "plain primary")]
    #[test_case(PointerButton::Middle, ModifierKeysMask::new(), false ; "middle")]
    #[test_case(PointerButton::Secondary, ModifierKeysMask::new(), false ; "secondary")]
    #[test_case(PointerButton::Primary, ModifierKeysMask::new().with_ctrl(), false ; "ctrl")]
    #[test_case(PointerButton::Primary, ModifierKeysMask::new().with_meta(), false ; "meta")]
    #[test_case(PointerButton::Primary, ModifierKeysMask::new().with_shift(), false ; "shift")]
    fn test_activates_link(button: PointerButton, mask: ModifierKeysMask, expected: bool) {
        assert_eq2!(PointerClick { button, mask }.activates_link(), expected);
    }
}
