// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::ops::Add;

use tracing_core::LevelFilter;

pub const DEFAULT_LOG_FILE_NAME: &str = "form_widgets_log.txt";

/// Configure the tracing logging to suit your needs. You can display the logs to a:
/// 1. file,
/// 2. stdout or stderr,
/// 3. both.
///
/// This configuration also allows you to set the log level. Many types convert into a
/// [`TracingConfig`], and two of them can be merged with `+`:
///
/// ```
/// use form_widgets::{TracingConfig, DisplayPreference, WriterConfig};
///
/// let config_1: TracingConfig = tracing::Level::INFO.into();
/// let config_2: TracingConfig = DisplayPreference::Stderr.into();
/// let merged = config_1 + config_2;
///
/// assert!(matches!(
///     merged.get_writer_config(),
///     WriterConfig::DisplayAndFile(DisplayPreference::Stderr, _)
/// ));
/// ```
#[derive(Debug, Clone)]
pub struct TracingConfig {
    pub writer_config: WriterConfig,
    pub level_filter: LevelFilter,
}

/// - `String` is the file path and prefix to use for the log file. Eg:
///   `/tmp/form_widgets` or `form_widgets`.
/// - [`DisplayPreference`] is the preferred display to use for logging.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriterConfig {
    None,
    Display(DisplayPreference),
    File(String /* tracing_log_file_path_and_prefix */),
    DisplayAndFile(DisplayPreference, String /* tracing_log_file_path_and_prefix */),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayPreference {
    Stdout,
    Stderr,
}

impl TracingConfig {
    /// Log to both the given [`DisplayPreference`] and a file.
    #[must_use]
    pub fn new_file_and_display(
        filename: Option<String>,
        preferred_display: DisplayPreference,
    ) -> Self {
        Self {
            writer_config: WriterConfig::DisplayAndFile(
                preferred_display,
                filename.unwrap_or_else(|| DEFAULT_LOG_FILE_NAME.to_string()),
            ),
            level_filter: LevelFilter::DEBUG,
        }
    }

    #[must_use]
    pub fn new_display(preferred_display: DisplayPreference) -> Self {
        Self {
            writer_config: WriterConfig::Display(preferred_display),
            level_filter: LevelFilter::DEBUG,
        }
    }

    #[must_use]
    pub fn new_file(filename: Option<String>) -> Self {
        Self {
            writer_config: WriterConfig::File(
                filename.unwrap_or_else(|| DEFAULT_LOG_FILE_NAME.to_string()),
            ),
            level_filter: LevelFilter::DEBUG,
        }
    }

    #[must_use]
    pub fn get_writer_config(&self) -> WriterConfig { self.writer_config.clone() }

    #[must_use]
    pub fn get_level_filter(&self) -> LevelFilter { self.level_filter }
}

mod convert_to_tracing_config {
    use super::{DEFAULT_LOG_FILE_NAME, DisplayPreference, LevelFilter, TracingConfig,
                WriterConfig};

    impl From<tracing::Level> for TracingConfig {
        fn from(level: tracing::Level) -> Self {
            Self {
                level_filter: level.into(),
                writer_config: WriterConfig::File(DEFAULT_LOG_FILE_NAME.to_string()),
            }
        }
    }

    impl From<LevelFilter> for TracingConfig {
        fn from(level_filter: LevelFilter) -> Self {
            Self {
                level_filter,
                writer_config: WriterConfig::File(DEFAULT_LOG_FILE_NAME.to_string()),
            }
        }
    }

    impl From<DisplayPreference> for TracingConfig {
        fn from(preferred_display: DisplayPreference) -> Self {
            Self::new_display(preferred_display)
        }
    }

    impl From<WriterConfig> for TracingConfig {
        fn from(writer_config: WriterConfig) -> Self {
            Self {
                level_filter: LevelFilter::DEBUG,
                writer_config,
            }
        }
    }
}

/// Merge two [`TracingConfig`] instances. The more verbose level filter wins.
impl Add<TracingConfig> for TracingConfig {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self {
            level_filter: self.level_filter.max(rhs.level_filter),
            writer_config: self.writer_config + rhs.writer_config,
        }
    }
}

/// Merge two [`WriterConfig`] instances. The `rhs` clobbers `self` when both set the same
/// thing, ie: the value in `rhs` has higher specificity.
///
/// - `{a: "foo"} + {a: "bar"} = {a: "bar"}`.
/// - `{a: None } + {a: "bar"} = {a: "bar"}`.
/// - `{a: "foo"} + {a: None } = {a: "foo"}`.
impl Add<WriterConfig> for WriterConfig {
    type Output = Self;

    fn add(self, rhs: WriterConfig) -> Self::Output {
        use WriterConfig::{Display, DisplayAndFile, File, None};

        match (self, rhs) {
            // No collision merge.
            (None, rhs) => rhs,
            (lhs, None) => lhs,
            (Display(dp), File(f)) | (File(f), Display(dp)) => DisplayAndFile(dp, f),

            // Collision (rhs has higher specificity).
            (Display(_) | File(_) | DisplayAndFile(..), DisplayAndFile(dp, f))
            | (DisplayAndFile(_, f), Display(dp))
            | (DisplayAndFile(dp, _), File(f)) => DisplayAndFile(dp, f),
            (Display(_), Display(dp)) => Display(dp),
            (File(_), File(f)) => File(f),
        }
    }
}
