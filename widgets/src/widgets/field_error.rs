// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use serde::{Deserialize, Serialize};

/// Validation error attached to a form field. The message is only shown when the field
/// is allowed to indicate that it is invalid.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldError {
    pub maybe_error: Option<String>,
    pub indicate_invalid: bool,
}

impl Default for FieldError {
    fn default() -> Self {
        Self {
            maybe_error: None,
            indicate_invalid: true,
        }
    }
}

impl FieldError {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            maybe_error: Some(error.into()),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_indicate_invalid(mut self, indicate_invalid: bool) -> Self {
        self.indicate_invalid = indicate_invalid;
        self
    }

    pub fn set_error(&mut self, maybe_error: Option<String>) { self.maybe_error = maybe_error; }

    /// The message to render below the field, if any. An empty message counts as no
    /// error.
    pub fn visible_error(&self) -> Option<&str> {
        if !self.indicate_invalid {
            return None;
        }
        self.maybe_error.as_deref().filter(|it| !it.is_empty())
    }

    pub fn is_invalid(&self) -> bool { self.visible_error().is_some() }
}
