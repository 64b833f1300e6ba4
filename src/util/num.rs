/// Smallest magnitude rendered in plain decimal notation.
const PLAIN_LOWER: f64 = 1e-3;
/// Magnitude from which scientific notation is used.
const PLAIN_UPPER: f64 = 1e7;

/// A number read from text.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ParsedNumber {
    /// Text without `.` or `E`.
    Integer(i64),
    /// Text containing `.` or `E`.
    Double(f64),
}

/// Renders a double in its canonical text form.
///
/// The output always identifies the number as a double: integral values keep
/// a `.0` suffix. Magnitudes in `[1e-3, 1e7)` use plain notation, everything
/// else uses `d.dddE±n`.
///
/// ## Example
/// ```
/// use smartscript::util::num::format_double;
///
/// assert_eq!(format_double(7.0), "7.0");
/// assert_eq!(format_double(0.25), "0.25");
/// assert_eq!(format_double(12_345_678.0), "1.2345678E7");
/// assert_eq!(format_double(0.0001), "1.0E-4");
/// assert_eq!(format_double(f64::NAN), "NaN");
/// ```
#[must_use]
pub fn format_double(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        let text = if value > 0.0 { "Infinity" } else { "-Infinity" };
        return text.to_string();
    }
    if value == 0.0 {
        let text = if value.is_sign_negative() { "-0.0" } else { "0.0" };
        return text.to_string();
    }

    let magnitude = value.abs();
    if (PLAIN_LOWER..PLAIN_UPPER).contains(&magnitude) {
        let mut text = value.to_string();
        if !text.contains('.') {
            text.push_str(".0");
        }
        return text;
    }

    let text = format!("{value:e}");
    let (mantissa, exponent) = text.split_once('e').unwrap_or((&text, "0"));
    if mantissa.contains('.') {
        format!("{mantissa}E{exponent}")
    } else {
        format!("{mantissa}.0E{exponent}")
    }
}

/// Reads numeric text.
///
/// Text containing `.` or `E` is read as a double, anything else as an
/// integer. Returns `None` if the text does not parse under the chosen rule.
///
/// ## Example
/// ```
/// use smartscript::util::num::{ParsedNumber, parse_number};
///
/// assert_eq!(parse_number("42"), Some(ParsedNumber::Integer(42)));
/// assert_eq!(parse_number("2.5"), Some(ParsedNumber::Double(2.5)));
/// assert_eq!(parse_number("1E3"), Some(ParsedNumber::Double(1000.0)));
/// assert_eq!(parse_number("1e3"), None);
/// assert_eq!(parse_number("abc"), None);
/// ```
#[must_use]
pub fn parse_number(text: &str) -> Option<ParsedNumber> {
    if text.contains('.') || text.contains('E') {
        parse_double(text).map(ParsedNumber::Double)
    } else {
        text.parse().ok().map(ParsedNumber::Integer)
    }
}

/// Reads text as a double, ignoring surrounding whitespace.
#[must_use]
pub fn parse_double(text: &str) -> Option<f64> {
    text.trim().parse().ok()
}

/// Converts an integer to a double.
///
/// Magnitudes beyond `2^53` round to the nearest representable double.
#[allow(clippy::cast_precision_loss)]
#[must_use]
pub const fn i64_to_f64(value: i64) -> f64 {
    value as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn doubles_render_with_fraction() {
        assert_eq!(format_double(4.0), "4.0");
        assert_eq!(format_double(-3.5), "-3.5");
        assert_eq!(format_double(0.001), "0.001");
        assert_eq!(format_double(9_999_999.0), "9999999.0");
        assert_eq!(format_double(-0.0), "-0.0");
    }

    #[test]
    fn large_and_small_doubles_use_exponent() {
        assert_eq!(format_double(1e7), "1.0E7");
        assert_eq!(format_double(-2.5e-5), "-2.5E-5");
        assert_eq!(format_double(1e300), "1.0E300");
        assert_eq!(format_double(f64::INFINITY), "Infinity");
        assert_eq!(format_double(f64::NEG_INFINITY), "-Infinity");
    }

    #[test]
    fn numeric_text_rule() {
        assert_eq!(parse_number("-7"), Some(ParsedNumber::Integer(-7)));
        assert_eq!(parse_number(".5"), Some(ParsedNumber::Double(0.5)));
        assert_eq!(parse_number("1.2.3"), None);
        assert_eq!(parse_number(""), None);
        assert_eq!(parse_double(" 2.5 "), Some(2.5));
    }
}
