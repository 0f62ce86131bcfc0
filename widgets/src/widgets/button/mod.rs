// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

// Attach sources.
pub mod button_config;
pub mod button_widget;
pub mod link_click;

// Re-export.
pub use button_config::*;
pub use button_widget::*;
pub use link_click::*;
