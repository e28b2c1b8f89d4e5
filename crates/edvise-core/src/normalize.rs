//! Field normalization rules applied at the store-client boundary.
//!
//! The store never sees an empty string: optional text fields are trimmed and
//! submitted as null when nothing remains. Numeric-looking text is coerced to
//! a number; anything else in a numeric field is stored as null rather than
//! rejected.

use crate::error::{Error, Result};

/// Trim `value` and return it, or `None` if nothing remains.
pub fn non_empty(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Trim `value` and require that something remains.
pub fn require(field: &str, value: &str) -> Result<String> {
    non_empty(value).ok_or_else(|| Error::validation_field(field, "must not be empty"))
}

/// Coerce text to a number, or `None` when it does not parse.
///
/// Integral and fractional input both coerce; "45000.50" is as valid a
/// tuition as "45000". Mixed alphanumeric input stores null.
pub fn coerce_float(value: &str) -> Option<f64> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse().ok()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_non_empty_trims() {
        assert_eq!(non_empty("  Testville  "), Some("Testville".to_string()));
    }

    #[test]
    fn test_non_empty_whitespace_is_none() {
        assert_eq!(non_empty("   "), None);
        assert_eq!(non_empty(""), None);
    }

    #[test]
    fn test_require_present() {
        let value = require("name", " Test U ");
        assert_eq!(value.ok(), Some("Test U".to_string()));
    }

    #[test]
    fn test_require_empty_names_field() {
        let err = require("location", " ").unwrap_err();
        let Error::Validation { field, .. } = err else {
            unreachable!("expected Validation variant");
        };
        assert_eq!(field, Some("location".to_string()));
    }

    #[test]
    fn test_coerce_float() {
        assert_eq!(coerce_float("0.62"), Some(0.62));
        assert_eq!(coerce_float("62"), Some(62.0));
        assert_eq!(coerce_float(" 42 "), Some(42.0));
        assert_eq!(coerce_float("62%"), None);
        assert_eq!(coerce_float("top 10"), None);
        assert_eq!(coerce_float("  "), None);
    }

    #[test]
    fn test_coerce_float_keeps_fractional_input() {
        assert_eq!(coerce_float("4.5"), Some(4.5));
        assert_eq!(coerce_float("45000.50"), Some(45000.5));
    }
}
