use rust_decimal::{Decimal, RoundingStrategy};

use crate::{
    error::RuntimeError,
    interpreter::{
        evaluator::{
            core::EvalResult,
            function::core::{expect_text, missing_arguments},
        },
        value::core::Value,
    },
    sink::Sink,
    util::num::parse_double,
};

/// Largest scale a [`Decimal`] can carry.
const MAX_SCALE: usize = 28;

/// A parsed decimal pattern such as `#,##0.00`.
///
/// Patterns are made of `#` (optional digit), `0` (required digit), `,`
/// (grouping, ignored) and at most one `.`. In the fraction, required digits
/// come before optional ones. The decimal separator is always `.`.
///
/// # Example
/// ```
/// use smartscript::interpreter::evaluator::function::decfmt::DecimalPattern;
///
/// let pattern = DecimalPattern::parse("000.0#").unwrap();
///
/// assert_eq!(pattern.format(3.14159).unwrap(), "003.14");
/// assert_eq!(pattern.format(2.5).unwrap(), "002.5");
/// assert!(DecimalPattern::parse("0.0x").is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecimalPattern {
    min_integer_digits:  usize,
    min_fraction_digits: usize,
    max_fraction_digits: usize,
}

impl DecimalPattern {
    /// Parses a pattern.
    ///
    /// # Errors
    /// `InvalidPattern` for unknown characters, more than one `.`, a `0`
    /// after a `#` in the fraction, a pattern without any digit or a fraction
    /// longer than 28 digits.
    pub fn parse(pattern: &str) -> EvalResult<Self> {
        let invalid = || RuntimeError::InvalidPattern { pattern: pattern.to_string() };

        let (integer, fraction) = pattern.split_once('.').unwrap_or((pattern, ""));
        if fraction.contains('.') || !integer.chars().all(|c| matches!(c, '#' | '0' | ',')) {
            return Err(invalid());
        }

        let required = fraction.chars().take_while(|&c| c == '0').count();
        let optional = fraction[required..].chars().take_while(|&c| c == '#').count();
        if required + optional != fraction.len() || required + optional > MAX_SCALE {
            return Err(invalid());
        }
        if !integer.contains(['#', '0']) && fraction.is_empty() {
            return Err(invalid());
        }

        Ok(Self { min_integer_digits:  integer.chars().filter(|&c| c == '0').count(),
                  min_fraction_digits: required,
                  max_fraction_digits: required + optional, })
    }

    /// Formats `value`, rounding half to even at the last fraction digit.
    ///
    /// # Errors
    /// `TypeError` if the value is not finite or too large to be represented
    /// as a decimal.
    pub fn format(&self, value: f64) -> EvalResult<String> {
        let decimal = Decimal::from_f64_retain(value).ok_or_else(|| RuntimeError::TypeError {
                          details: format!("{value} can not be formatted as a decimal number"),
                      })?;
        #[allow(clippy::cast_possible_truncation)]
        let scale = self.max_fraction_digits as u32;
        let rounded = decimal.round_dp_with_strategy(scale, RoundingStrategy::MidpointNearestEven)
                             .normalize();

        let text = rounded.abs().to_string();
        let (integer, fraction) = text.split_once('.').unwrap_or((&text, ""));

        let mut out = String::new();
        if rounded.is_sign_negative() && !rounded.is_zero() {
            out.push('-');
        }

        let mut fraction = fraction.to_string();
        while fraction.len() < self.min_fraction_digits {
            fraction.push('0');
        }

        // `#.##` renders 0.5 as `.5`
        let bare_fraction = integer == "0" && self.min_integer_digits == 0 && !fraction.is_empty();
        if !bare_fraction {
            for _ in integer.len()..self.min_integer_digits {
                out.push('0');
            }
            out.push_str(integer);
        }

        if !fraction.is_empty() {
            out.push('.');
            out.push_str(&fraction);
        }
        Ok(out)
    }
}

/// Rounds a number through a decimal pattern.
///
/// Pops the pattern (top), which must be text, and then the number. The
/// number is formatted with the pattern and the result read back as a double,
/// which is pushed.
///
/// # Example
/// ```
/// use smartscript::{
///     interpreter::{evaluator::function::decfmt::decfmt, value::core::Value},
///     sink::MemorySink,
/// };
///
/// let r = decfmt(&[Value::Double(2.675), Value::from("0.0")], &mut MemorySink::default()).unwrap();
/// assert_eq!(r, vec![Value::Double(2.7)]);
/// ```
pub fn decfmt(args: &[Value], _sink: &mut dyn Sink) -> EvalResult<Vec<Value>> {
    let [value, pattern] = args else { return Err(missing_arguments("decfmt")) };
    let pattern = DecimalPattern::parse(expect_text(pattern, "decimal pattern")?)?;
    let value = value.as_double()?;

    let text = pattern.format(value)?;
    let reparsed = parse_double(&text).ok_or(RuntimeError::NotNumeric { text })?;
    Ok(vec![Value::Double(reparsed)])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sink::MemorySink;

    #[test]
    fn rounds_half_to_even() {
        let pattern = DecimalPattern::parse("0.00").unwrap();
        assert_eq!(pattern.format(0.125).unwrap(), "0.12");
        assert_eq!(pattern.format(0.375).unwrap(), "0.38");
        assert_eq!(pattern.format(-1.0).unwrap(), "-1.00");
    }

    #[test]
    fn optional_digits_are_dropped() {
        let pattern = DecimalPattern::parse("#,##0.##").unwrap();
        assert_eq!(pattern.format(1234.5).unwrap(), "1234.5");
        assert_eq!(pattern.format(7.0).unwrap(), "7");

        let pattern = DecimalPattern::parse("#.##").unwrap();
        assert_eq!(pattern.format(0.5).unwrap(), ".5");
        assert_eq!(pattern.format(0.0).unwrap(), "0");
    }

    #[test]
    fn rejects_unknown_patterns() {
        for pattern in ["", "0.0.0", "0.#0", "$0.00", "0,00E0"] {
            assert!(matches!(DecimalPattern::parse(pattern),
                             Err(RuntimeError::InvalidPattern { .. })),
                    "{pattern}");
        }
    }

    #[test]
    fn decfmt_pushes_reparsed_double() {
        let mut sink = MemorySink::default();
        let r = decfmt(&[Value::from("3.14159"), Value::from("0.000")], &mut sink).unwrap();
        assert_eq!(r, vec![Value::Double(3.142)]);

        let r = decfmt(&[Value::Integer(12), Value::from("#")], &mut sink).unwrap();
        assert_eq!(r, vec![Value::Double(12.0)]);
    }

    #[test]
    fn decfmt_requires_text_pattern() {
        let mut sink = MemorySink::default();
        assert!(decfmt(&[Value::Double(1.0), Value::Integer(0)], &mut sink).is_err());
        assert!(decfmt(&[Value::Double(f64::NAN), Value::from("0.0")], &mut sink).is_err());
    }

    #[test]
    fn decfmt_needs_two_values() {
        let mut sink = MemorySink::default();
        assert!(matches!(decfmt(&[Value::from("0.0")], &mut sink),
                         Err(RuntimeError::EmptyStack { .. })));
    }
}
