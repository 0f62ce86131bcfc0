// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

// Attach sources.
pub mod event_propagation;
pub mod keypress;
pub mod modifier_keys_mask;

// Re-export.
pub use event_propagation::*;
pub use keypress::*;
pub use modifier_keys_mask::*;
