//! Parsing of raw environment values already looked up by the caller.
//!
//! Two flavours: tuning knobs fall back to their default with a warning,
//! while values whose invalidity is a deployment mistake fail startup.

use std::fmt::Display;
use std::str::FromStr;

use crate::error::CoreError;

/// Lenient parse of an already-looked-up raw value.
pub(crate) fn parse_or_default<T: FromStr + Display>(
    var: &str,
    raw: Option<&str>,
    default: T,
) -> T {
    match raw {
        Some(v) => match v.trim().parse() {
            Ok(n) => n,
            Err(_) => {
                tracing::warn!(
                    var,
                    value = %v,
                    default = %default,
                    "invalid env var value, using default"
                );
                default
            },
        },
        None => default,
    }
}

/// Strict parse of an already-looked-up raw value.
pub(crate) fn parse_strict<T>(
    var: &'static str,
    raw: Option<&str>,
    default: T,
) -> Result<T, CoreError>
where
    T: FromStr,
    T::Err: Display,
{
    match raw.map(str::trim) {
        None | Some("") => Ok(default),
        Some(v) => v
            .parse()
            .map_err(|e: T::Err| CoreError::Config { var, reason: format!("{v:?}: {e}") }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_value() {
        let result: u32 = parse_or_default("TEST_VAR", Some("42"), 10);
        assert_eq!(result, 42);
    }

    #[test]
    fn test_parse_invalid_value_falls_back() {
        let result: u32 = parse_or_default("TEST_VAR", Some("banana"), 10);
        assert_eq!(result, 10);
    }

    #[test]
    fn test_parse_missing_var() {
        let result: u32 = parse_or_default("TEST_VAR", None, 10);
        assert_eq!(result, 10);
    }

    #[test]
    fn test_parse_empty_value_falls_back() {
        let result: u32 = parse_or_default("TEST_VAR", Some(""), 10);
        assert_eq!(result, 10);
    }

    #[test]
    fn test_strict_rejects_garbage() {
        let result: Result<u32, CoreError> = parse_strict("TEST_VAR", Some("ten"), 10);
        assert!(matches!(result, Err(CoreError::Config { var: "TEST_VAR", .. })));
    }

    #[test]
    fn test_strict_blank_uses_default() {
        let result: u32 = parse_strict("TEST_VAR", Some("   "), 7).unwrap();
        assert_eq!(result, 7);
    }

    #[test]
    fn test_strict_trims_whitespace() {
        let result: i64 = parse_strict("TEST_VAR", Some(" 5 "), 7).unwrap();
        assert_eq!(result, 5);
    }
}
