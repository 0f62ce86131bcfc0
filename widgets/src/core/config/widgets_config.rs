// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::{fs, path::Path};

use serde::{Deserialize, Serialize};

use crate::{ButtonConfig, CommonResult, ListConfig, OptionsChangedPolicy, WidgetsError};

/// Defaults for every widget, loaded from a JSON file. Every field is optional:
///
/// ```json
/// {
///   "list": { "tabbable": true, "focus_first_item_when_items_change": false },
///   "button": { "wait_start_delay_ms": 10, "wait_end_delay_ms": 300 },
///   "options_changed_policy": "clear_focus"
/// }
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WidgetsConfig {
    pub list: ListConfig,
    pub button: ButtonConfig,
    /// Used by widgets other than the list, which takes its policy from
    /// [`ListConfig::focus_first_item_when_items_change`].
    pub options_changed_policy: OptionsChangedPolicy,
}

impl WidgetsConfig {
    /// # Errors
    ///
    /// Returns [`WidgetsError::ConfigRead`] if the file can't be read, and
    /// [`WidgetsError::ConfigParse`] if it isn't valid.
    pub fn try_load_from_path(path: impl AsRef<Path>) -> CommonResult<Self> {
        let path = path.as_ref();
        let path_string = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|source| WidgetsError::ConfigRead {
            path: path_string.clone(),
            source,
        })?;

        let it = Self::try_parse(&content).map_err(|source| WidgetsError::ConfigParse {
            path: path_string.clone(),
            source,
        })?;

        tracing::debug!(message = "loaded widgets config", path = %path_string, config = ?it);

        Ok(it)
    }

    /// # Errors
    ///
    /// Returns the [`serde_json`] error if `content` isn't a valid config.
    pub fn try_parse(content: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(content)
    }
}
