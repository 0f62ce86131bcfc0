// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::path::PathBuf;

use crate::WidgetsError;

/// Create a file appender that never rotates. Note that if you wrap this up in a non
/// blocking writer, then the returned guard must be held for the logs to be flushed.
///
/// # Errors
///
/// Returns an error if the path has no parent directory or no file name.
pub fn try_create(
    path_str: &str,
) -> miette::Result<tracing_appender::rolling::RollingFileAppender> {
    let path = PathBuf::from(&path_str);

    let parent = match path.parent() {
        Some(parent) if parent.as_os_str().is_empty() => PathBuf::from("."),
        Some(parent) => parent.to_path_buf(),
        None => {
            return Err(WidgetsError::LoggingInit {
                message: format!("Can't access parent folder of {}", path.display()),
            }
            .into());
        }
    };

    let file_name = path.file_name().ok_or_else(|| WidgetsError::LoggingInit {
        message: format!("Can't access file name {}", path.display()),
    })?;

    Ok(tracing_appender::rolling::never(parent, file_name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_try_create_rejects_root() {
        assert!(try_create("/").is_err());
    }

    #[test]
    fn test_try_create_in_temp_dir() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("widgets.log");
        let result = try_create(path.to_str().unwrap());
        assert!(result.is_ok());
    }
}
