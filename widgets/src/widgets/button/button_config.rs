// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::time::Duration;

use serde::{Deserialize, Serialize};

pub const DEFAULT_WAIT_START_DELAY_MS: u64 = 10;
pub const DEFAULT_WAIT_END_DELAY_MS: u64 = 300;

/// Timing of the button wait indicator.
///
/// - `wait_start_delay_ms`: gap between showing the indicator and starting its "shown"
///   transition. It must be non zero for the transition to be visible.
/// - `wait_end_delay_ms`: how long the indicator lingers while fading out.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ButtonConfig {
    pub wait_start_delay_ms: u64,
    pub wait_end_delay_ms: u64,
}

impl Default for ButtonConfig {
    fn default() -> Self {
        Self {
            wait_start_delay_ms: DEFAULT_WAIT_START_DELAY_MS,
            wait_end_delay_ms: DEFAULT_WAIT_END_DELAY_MS,
        }
    }
}

impl ButtonConfig {
    pub fn wait_start_delay(&self) -> Duration {
        Duration::from_millis(self.wait_start_delay_ms)
    }

    pub fn wait_end_delay(&self) -> Duration { Duration::from_millis(self.wait_end_delay_ms) }
}
