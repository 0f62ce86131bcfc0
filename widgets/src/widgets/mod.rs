// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

// Attach sources.
pub mod button;
pub mod field_error;
pub mod list;
pub mod segmented_control;
pub mod switch;

// Re-export.
pub use button::*;
pub use field_error::*;
pub use list::*;
pub use segmented_control::*;
pub use switch::*;
