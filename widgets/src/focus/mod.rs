// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

/// Enable or disable debug logging for focus and selection transitions.
pub const DEBUG_FOCUS_MOD: bool = true;

// Attach sources.
pub mod focus_controller;
pub mod focus_listener;
pub mod option_list;

// Re-export.
pub use focus_controller::*;
pub use focus_listener::*;
pub use option_list::*;
