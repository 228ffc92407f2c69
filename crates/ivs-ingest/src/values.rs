//! Polars `AnyValue` conversion helpers.
//!
//! The trend extracts mix integer codes, floats, and strings across columns,
//! so per-row inspection goes through these conversions rather than assuming
//! a dtype.

use polars::prelude::*;

/// Converts an AnyValue to a String representation.
/// Returns an empty string for Null; formats numeric types without noise.
pub fn any_to_string(value: AnyValue<'_>) -> String {
    match value {
        AnyValue::Null => String::new(),
        AnyValue::Int8(v) => v.to_string(),
        AnyValue::Int16(v) => v.to_string(),
        AnyValue::Int32(v) => v.to_string(),
        AnyValue::Int64(v) => v.to_string(),
        AnyValue::UInt8(v) => v.to_string(),
        AnyValue::UInt16(v) => v.to_string(),
        AnyValue::UInt32(v) => v.to_string(),
        AnyValue::UInt64(v) => v.to_string(),
        AnyValue::Float32(v) => format_numeric(f64::from(v)),
        AnyValue::Float64(v) => format_numeric(v),
        AnyValue::String(s) => s.to_string(),
        AnyValue::StringOwned(s) => s.to_string(),
        other => other.to_string(),
    }
}

/// Formats a floating-point number without trailing zeros.
pub fn format_numeric(v: f64) -> String {
    let s = format!("{v}");
    s.trim_end_matches('0').trim_end_matches('.').to_string()
}

/// Converts an AnyValue to i64, returning None for non-integer or null values.
pub fn any_to_i64(value: AnyValue<'_>) -> Option<i64> {
    match value {
        AnyValue::Null => None,
        AnyValue::Int8(v) => Some(i64::from(v)),
        AnyValue::Int16(v) => Some(i64::from(v)),
        AnyValue::Int32(v) => Some(i64::from(v)),
        AnyValue::Int64(v) => Some(v),
        AnyValue::UInt8(v) => Some(i64::from(v)),
        AnyValue::UInt16(v) => Some(i64::from(v)),
        AnyValue::UInt32(v) => Some(i64::from(v)),
        AnyValue::UInt64(v) => i64::try_from(v).ok(),
        // fract() of NaN and infinities is NaN, which never equals zero
        AnyValue::Float32(v) => (v.fract() == 0.0).then_some(v as i64),
        AnyValue::Float64(v) => (v.fract() == 0.0).then_some(v as i64),
        AnyValue::String(s) => parse_i64(s),
        AnyValue::StringOwned(s) => parse_i64(&s),
        _ => None,
    }
}

/// Parses a string as i64, returning None for invalid or empty strings.
pub fn parse_i64(value: &str) -> Option<i64> {
    if value.trim().is_empty() {
        return None;
    }
    value.trim().parse::<i64>().ok()
}

/// True when a value should count as missing in the audit: null or a
/// whitespace-only string.
pub fn is_missing(value: &AnyValue) -> bool {
    match value {
        AnyValue::Null => true,
        AnyValue::String(s) => s.trim().is_empty(),
        AnyValue::StringOwned(s) => s.trim().is_empty(),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_any_to_string() {
        assert_eq!(any_to_string(AnyValue::Null), "");
        assert_eq!(any_to_string(AnyValue::Int64(42)), "42");
        assert_eq!(any_to_string(AnyValue::Float64(2.0)), "2");
        assert_eq!(any_to_string(AnyValue::Float64(0.871)), "0.871");
        assert_eq!(any_to_string(AnyValue::String("abc")), "abc");
    }

    #[test]
    fn test_any_to_i64() {
        assert_eq!(any_to_i64(AnyValue::Null), None);
        assert_eq!(any_to_i64(AnyValue::Int32(7)), Some(7));
        assert_eq!(any_to_i64(AnyValue::Float64(5.0)), Some(5));
        assert_eq!(any_to_i64(AnyValue::String("6")), Some(6));
        assert_eq!(any_to_i64(AnyValue::String("x")), None);
    }

    #[test]
    fn test_any_to_i64_rejects_fractional_floats() {
        assert_eq!(any_to_i64(AnyValue::Float64(5.7)), None);
        assert_eq!(any_to_i64(AnyValue::Float32(1.9)), None);
        assert_eq!(any_to_i64(AnyValue::Float64(-4.0)), Some(-4));
        assert_eq!(any_to_i64(AnyValue::Float64(f64::NAN)), None);
        assert_eq!(any_to_i64(AnyValue::Float64(f64::INFINITY)), None);
    }

    #[test]
    fn test_parse_i64() {
        assert_eq!(parse_i64(" 12 "), Some(12));
        assert_eq!(parse_i64(""), None);
        assert_eq!(parse_i64("n/a"), None);
    }

    #[test]
    fn test_is_missing() {
        assert!(is_missing(&AnyValue::Null));
        assert!(is_missing(&AnyValue::String("  ")));
        assert!(!is_missing(&AnyValue::Int64(-4)));
        assert!(!is_missing(&AnyValue::String("0")));
    }
}
