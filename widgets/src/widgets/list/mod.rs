// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

// Attach sources.
pub mod list_config;
pub mod list_item_view;
pub mod list_widget;

// Re-export.
pub use list_config::*;
pub use list_item_view::*;
pub use list_widget::*;
