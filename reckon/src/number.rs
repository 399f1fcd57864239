//! Canonical conversion between numbers and text.
//!
//! Every number the calculator writes back into text (results, memory recall, sign toggles
//! and the persisted memory register) goes through [format_number], so the same value always
//! renders the same way.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// The longest numeric prefix of a string, including exponent and infinity forms
    static ref LEADING_NUMBER: Regex =
        Regex::new(r"^[+-]?(?:Infinity|(?:\d+\.?\d*|\.\d+)(?:[eE][+-]?\d+)?)")
            .expect("LEADING_NUMBER is a valid pattern");
}

/// Magnitude from which numbers are rendered in exponent form
const EXPONENT_UPPER: f64 = 1e21;

/// Magnitude below which non-zero numbers are rendered in exponent form
const EXPONENT_LOWER: f64 = 1e-6;

/// Render a number as text
///
/// Uses the shortest representation that parses back to the same value. Very large and very
/// small magnitudes use exponent notation with an explicit exponent sign, negative zero renders
/// as `0`.
///
/// ```rust
/// use reckon::format_number;
///
/// assert_eq!(format_number(42.0), "42");
/// assert_eq!(format_number(0.1 + 0.2), "0.30000000000000004");
/// assert_eq!(format_number(1e21), "1e+21");
/// assert_eq!(format_number(-0.0), "0");
/// ```
pub fn format_number(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }

    if value.is_infinite() {
        return if value.is_sign_positive() {
            "Infinity".to_string()
        } else {
            "-Infinity".to_string()
        };
    }

    if value == 0.0 {
        return "0".to_string();
    }

    let magnitude = value.abs();
    if (EXPONENT_LOWER..EXPONENT_UPPER).contains(&magnitude) {
        return value.to_string();
    }

    // `{:e}` yields e.g. "1.5e-7" or "1e21"; positive exponents get an explicit sign
    let formatted = format!("{value:e}");
    match formatted.split_once('e') {
        Some((mantissa, exponent)) if !exponent.starts_with('-') => {
            format!("{mantissa}e+{exponent}")
        }
        _ => formatted,
    }
}

/// Parse the longest numeric prefix of a string
///
/// Leading whitespace is skipped. Returns `None` if the string does not start with a number.
///
/// ```rust
/// use reckon::number::parse_leading_number;
///
/// assert_eq!(parse_leading_number("  12.5abc"), Some(12.5));
/// assert_eq!(parse_leading_number("abc"), None);
/// ```
pub fn parse_leading_number(text: &str) -> Option<f64> {
    let prefix = LEADING_NUMBER.find(text.trim_start())?;
    prefix.as_str().parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_integers_and_fractions() {
        assert_eq!(format_number(42.0), "42");
        assert_eq!(format_number(-7.0), "-7");
        assert_eq!(format_number(1.5), "1.5");
        assert_eq!(format_number(0.5), "0.5");
        assert_eq!(format_number(123456789.0), "123456789");
        assert_eq!(format_number(0.000001), "0.000001");
    }

    #[test]
    fn test_format_exponent_forms() {
        assert_eq!(format_number(1e21), "1e+21");
        assert_eq!(format_number(-2.5e22), "-2.5e+22");
        assert_eq!(format_number(1.5e-7), "1.5e-7");
        assert_eq!(format_number(1e20), "100000000000000000000");
    }

    #[test]
    fn test_format_special_values() {
        assert_eq!(format_number(-0.0), "0");
        assert_eq!(format_number(f64::INFINITY), "Infinity");
        assert_eq!(format_number(f64::NEG_INFINITY), "-Infinity");
        assert_eq!(format_number(f64::NAN), "NaN");
    }

    #[test]
    fn test_parse_leading_number() {
        assert_eq!(parse_leading_number("4"), Some(4.0));
        assert_eq!(parse_leading_number("-3.25"), Some(-3.25));
        assert_eq!(parse_leading_number("1e+21"), Some(1e21));
        assert_eq!(parse_leading_number(".5"), Some(0.5));
        assert_eq!(parse_leading_number("7px"), Some(7.0));
        assert_eq!(parse_leading_number("-Infinity"), Some(f64::NEG_INFINITY));
        assert_eq!(parse_leading_number(""), None);
        assert_eq!(parse_leading_number("NaN"), None);
    }
}
