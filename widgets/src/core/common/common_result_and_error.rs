// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Widget operations (focus, select, toggle) are total and never fail. Errors only show
//! up at the edges of the crate: loading configuration, initializing logging, building a
//! strict [`crate::OptionList`], and parsing key names in the demo binary.
//!
//! For more information on error types, see:
//!
//! 1. [Article](https://developerlife.com/2024/06/10/rust-miette-error-handling/)
//! 2. [Video](https://youtu.be/TmLF7vI8lKk)

use miette::Diagnostic;

/// Type alias to make it easy to work with:
/// 1. [`core::result::Result`]
/// 2. [`miette::Result`] and [`miette::Report`], which are [`std::error::Error`] wrappers.
///
/// Works hand in hand w/ [`WidgetsError`] and any other type of error.
pub type CommonResult<T> = miette::Result<T>;

#[non_exhaustive]
#[derive(Debug, thiserror::Error, Diagnostic)]
pub enum WidgetsError {
    #[error("Can't read config file {path}")]
    #[diagnostic(
        code(form_widgets::config::read),
        help("Make sure the file exists and you have permission to read it.")
    )]
    ConfigRead {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Can't parse config file {path}")]
    #[diagnostic(
        code(form_widgets::config::parse),
        help("The config file must be JSON. Unknown fields are rejected.")
    )]
    ConfigParse {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Option value {value} appears at index {first_index} and {duplicate_index}")]
    #[diagnostic(
        code(form_widgets::options::duplicate_value),
        help("Each option in a list must have a unique value.")
    )]
    DuplicateOptionValue {
        value: String,
        first_index: usize,
        duplicate_index: usize,
    },

    #[error("Unknown key name: {name}")]
    #[diagnostic(
        code(form_widgets::input::unknown_key),
        help(
            "Use a single character, or one of: up, down, left, right, home, end, \
             enter, space, tab, esc. Prefix with ctrl+, alt+, or shift+ for modifiers."
        )
    )]
    UnknownKey { name: String },

    #[error("Can't initialize logging: {message}")]
    #[diagnostic(code(form_widgets::log::init))]
    LoggingInit { message: String },
}
