// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

/// Wrap the given expression in `Ok(..)`. With no arguments it returns `Ok(())`.
///
/// ```
/// use form_widgets::{ok, CommonResult};
///
/// fn unit() -> CommonResult<()> { ok!() }
/// fn value() -> CommonResult<u8> { ok!(42) }
///
/// assert!(unit().is_ok());
/// assert_eq!(value().unwrap(), 42);
/// ```
#[macro_export]
macro_rules! ok {
    () => {
        Ok(())
    };
    ($value:expr) => {
        Ok($value)
    };
}

/// Same as [`pretty_assertions::assert_eq`], which prints a colored diff when the
/// assertion fails.
#[macro_export]
macro_rules! assert_eq2 {
    ($($params:tt)*) => {
        pretty_assertions::assert_eq!($($params)*)
    };
}
