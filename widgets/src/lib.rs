// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! # `form_widgets`
//!
//! Headless state for interactive form widgets: lists, segmented controls, switches,
//! buttons with a wait indicator, and field error display. This crate owns widget state
//! and state transitions. It consumes keyboard, pointer, and focus events, and emits
//! change requests through listener callbacks. Drawing is up to you: read the view models
//! (eg: [`ListItemView`], [`SegmentView`]) and render them with whatever backend you like
//! (DOM, terminal, GPU).
//!
//! ## The focus / selection controller
//!
//! The shared core is the [`FocusSelectionController`]. It decides which option in an
//! ordered [`OptionList`] has keyboard focus, and asks the caller to change the selected
//! value. Focus and selection are different things:
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ OptionList<V>      [ A ][ B (disabled) ][ C ]│
//! │ focused_index      owned by the controller   │
//! │ selected_value     owned by the caller       │
//! └─────────────────────────────────────────────┘
//!        │ on_focus_change(Some(2))
//!        │ on_selection_change(&"C")
//!        ▼
//!   FocusSelectionListener<V> (your app)
//! ```
//!
//! The stateless scans ([`next_focusable_index`], [`previous_focusable_index`], etc.) are
//! total functions. Malformed input (an out of range index) is treated as "no focus" and
//! never panics.
//!
//! ## Example
//!
//! ```
//! use form_widgets::{OptionList, SelectOption, ListWidget, ListConfig,
//!                    EventPropagation, keypress, SpecialKey};
//!
//! let options = OptionList::from(vec![
//!     SelectOption::new("a", "Apple"),
//!     SelectOption::new("b", "Banana").with_disabled(true),
//!     SelectOption::new("c", "Cherry"),
//! ]);
//!
//! let mut list = ListWidget::new(options, None, ListConfig::default());
//! list.on_focus_in();
//!
//! let result = list.handle_key(keypress!(@special SpecialKey::Down));
//! assert_eq!(result, EventPropagation::ConsumedRender);
//! assert_eq!(list.focused_index(), Some(0));
//!
//! // Disabled "b" is skipped.
//! list.handle_key(keypress!(@special SpecialKey::Down));
//! assert_eq!(list.focused_index(), Some(2));
//! ```
//!
//! ## Logging
//!
//! State transitions are logged with [`tracing`] at the `debug` level. Call
//! [`try_initialize_logging_global`] to see them.

// Enforce strict error handling in production library code only. Tests are allowed to use
// .unwrap() (workspace `Cargo.toml` config allows it).
#![cfg_attr(not(test), deny(clippy::unwrap_in_result))]

// Attach modules (re-exported below to provide clean public API).
pub mod core;
pub mod focus;
pub mod input;
pub mod widgets;

// Re-export.
#[allow(ambiguous_glob_reexports)]
pub use core::*;
pub use focus::*;
pub use input::*;
pub use widgets::*;
