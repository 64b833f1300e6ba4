use std::{cmp::Ordering, fmt};

use ordered_float::OrderedFloat;

use crate::{
    ast::Element,
    error::RuntimeError,
    interpreter::evaluator::core::EvalResult,
    util::num::{ParsedNumber, format_double, i64_to_f64, parse_double, parse_number},
};

/// Represents a runtime value in the interpreter.
///
/// Values live on the named variable stacks and on the temporary stack of an
/// echo tag. Text values are carried as-is and only read as numbers when an
/// arithmetic operation needs them.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Value {
    /// No value. Behaves as zero in arithmetic.
    #[default]
    Absent,
    /// A 64 bit integer.
    Integer(i64),
    /// A double precision number.
    Double(f64),
    /// Text, read as a number on demand.
    Text(String),
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Self::Integer(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Double(v)
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::Text(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::Text(v.to_string())
    }
}

impl From<ParsedNumber> for Value {
    fn from(n: ParsedNumber) -> Self {
        match n {
            ParsedNumber::Integer(i) => Self::Integer(i),
            ParsedNumber::Double(d) => Self::Double(d),
        }
    }
}

impl TryFrom<&Element> for Value {
    type Error = RuntimeError;

    /// Builds the value a constant element denotes.
    ///
    /// Only integer, double and string constants denote values; every other
    /// element kind is rejected.
    fn try_from(element: &Element) -> EvalResult<Self> {
        match element {
            Element::Integer(i) => Ok(Self::Integer(*i)),
            Element::Double(d) => Ok(Self::Double(*d)),
            Element::String(s) => Ok(Self::Text(s.clone())),
            other => Err(RuntimeError::UnsupportedValueKind { kind: other.kind() }),
        }
    }
}

impl Value {
    /// Resolves the value to its numeric form.
    ///
    /// Integers, doubles and `Absent` are returned unchanged. Text containing
    /// `.` or `E` becomes a double, other text an integer.
    ///
    /// # Returns
    /// - `Ok(Value)`: `Absent`, `Integer` or `Double`.
    /// - `Err(RuntimeError::NotNumeric)`: If the text does not parse.
    pub fn numeric(&self) -> EvalResult<Self> {
        match self {
            Self::Text(text) => parse_number(text).map(Self::from)
                                                  .ok_or_else(|| RuntimeError::NotNumeric { text: text.clone() }),
            other => Ok(other.clone()),
        }
    }

    /// Reads the value as a double.
    ///
    /// `Absent` reads as `0.0` and text is parsed as a double regardless of
    /// its shape.
    ///
    /// # Example
    /// ```
    /// use smartscript::interpreter::value::core::Value;
    ///
    /// assert_eq!(Value::Integer(3).as_double().unwrap(), 3.0);
    /// assert_eq!(Value::from("1.5").as_double().unwrap(), 1.5);
    /// assert_eq!(Value::Absent.as_double().unwrap(), 0.0);
    /// assert!(Value::from("three").as_double().is_err());
    /// ```
    pub fn as_double(&self) -> EvalResult<f64> {
        match self {
            Self::Absent => Ok(0.0),
            Self::Integer(i) => Ok(i64_to_f64(*i)),
            Self::Double(d) => Ok(*d),
            Self::Text(text) => {
                parse_double(text).ok_or_else(|| RuntimeError::NotNumeric { text: text.clone() })
            },
        }
    }

    /// Returns `true` if the value is [`Value::Absent`].
    #[must_use]
    pub const fn is_absent(&self) -> bool {
        matches!(self, Self::Absent)
    }

    /// Adds `other` to this value in place.
    ///
    /// - Adding `Absent` changes nothing.
    /// - An `Absent` value takes over the numeric form of `other`.
    /// - Two integers stay an integer.
    /// - Any other combination is widened to a double.
    ///
    /// # Example
    /// ```
    /// use smartscript::interpreter::value::core::Value;
    ///
    /// let mut v = Value::Integer(2);
    /// v.increment(&Value::from("3")).unwrap();
    /// assert_eq!(v, Value::Integer(5));
    ///
    /// v.increment(&Value::Double(0.5)).unwrap();
    /// assert_eq!(v, Value::Double(5.5));
    /// ```
    pub fn increment(&mut self, other: &Self) -> EvalResult<()> {
        if other.is_absent() {
            return Ok(());
        }
        let argument = other.numeric()?;

        let result = match (&*self, &argument) {
            (Self::Absent, _) => argument.clone(),
            (Self::Integer(a), Self::Integer(b)) => {
                Self::Integer(a.checked_add(*b).ok_or(RuntimeError::Overflow)?)
            },
            _ => Self::Double(self.numeric()?.as_double()? + argument.as_double()?),
        };
        *self = result;
        Ok(())
    }

    /// Subtracts `other` from this value in place.
    ///
    /// Equivalent to incrementing by the negated argument.
    pub fn decrement(&mut self, other: &Self) -> EvalResult<()> {
        let negated = match other.numeric()? {
            Self::Integer(i) => Self::Integer(i.checked_neg().ok_or(RuntimeError::Overflow)?),
            Self::Double(d) => Self::Double(-d),
            absent => absent,
        };
        self.increment(&negated)
    }

    /// Multiplies this value by `other` in place.
    ///
    /// `Absent` on either side annihilates: the result is `Integer(0)`.
    /// Otherwise the same widening rule as [`Value::increment`] applies.
    pub fn multiply(&mut self, other: &Self) -> EvalResult<()> {
        if other.is_absent() || self.is_absent() {
            *self = Self::Integer(0);
            return Ok(());
        }
        let argument = other.numeric()?;

        let result = match (&*self, &argument) {
            (Self::Integer(a), Self::Integer(b)) => {
                Self::Integer(a.checked_mul(*b).ok_or(RuntimeError::Overflow)?)
            },
            _ => Self::Double(self.numeric()?.as_double()? * argument.as_double()?),
        };
        *self = result;
        Ok(())
    }

    /// Divides this value by `other` in place.
    ///
    /// The result is always a double. An `Absent` value divided by anything
    /// non-absent yields `Integer(0)` before the divisor is inspected.
    ///
    /// # Errors
    /// - `DivisionByZero` if `other` is `Absent` or numerically zero.
    /// - `NotNumeric` if either side is text that does not parse.
    ///
    /// # Example
    /// ```
    /// use smartscript::interpreter::value::core::Value;
    ///
    /// let mut v = Value::Integer(7);
    /// v.divide(&Value::Integer(2)).unwrap();
    /// assert_eq!(v, Value::Double(3.5));
    ///
    /// let mut zero = Value::Absent;
    /// zero.divide(&Value::Integer(4)).unwrap();
    /// assert_eq!(zero, Value::Integer(0));
    ///
    /// assert!(Value::Integer(1).divide(&Value::from("0")).is_err());
    /// ```
    pub fn divide(&mut self, other: &Self) -> EvalResult<()> {
        if other.is_absent() {
            return Err(RuntimeError::DivisionByZero);
        }
        let argument = other.numeric()?;

        if self.is_absent() {
            *self = Self::Integer(0);
            return Ok(());
        }

        let divisor = argument.as_double()?;
        if divisor == 0.0 {
            return Err(RuntimeError::DivisionByZero);
        }
        *self = Self::Double(self.numeric()?.as_double()? / divisor);
        Ok(())
    }

    /// Compares this value with `other` numerically.
    ///
    /// Both sides are read as doubles, `Absent` being `0.0`. The ordering is
    /// total: `NaN` sorts above every other number.
    ///
    /// # Example
    /// ```
    /// use std::cmp::Ordering;
    ///
    /// use smartscript::interpreter::value::core::Value;
    ///
    /// assert_eq!(Value::Integer(3).compare(&Value::Double(2.5)).unwrap(), Ordering::Greater);
    /// assert_eq!(Value::Absent.compare(&Value::from("0")).unwrap(), Ordering::Equal);
    /// ```
    pub fn compare(&self, other: &Self) -> EvalResult<Ordering> {
        let left = OrderedFloat(self.as_double()?);
        let right = OrderedFloat(other.as_double()?);
        Ok(left.cmp(&right))
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Absent => Ok(()),
            Self::Integer(i) => write!(f, "{i}"),
            Self::Double(d) => write!(f, "{}", format_double(*d)),
            Self::Text(text) => write!(f, "{text}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::Operator;

    #[test]
    fn increment_follows_widening_rules() {
        let mut v = Value::Absent;
        v.increment(&Value::Absent).unwrap();
        assert_eq!(v, Value::Absent);

        v.increment(&Value::from("4")).unwrap();
        assert_eq!(v, Value::Integer(4));

        v.increment(&Value::from("1.5")).unwrap();
        assert_eq!(v, Value::Double(5.5));

        let mut d = Value::Absent;
        d.increment(&Value::Double(2.0)).unwrap();
        assert_eq!(d, Value::Double(2.0));
    }

    #[test]
    fn text_receiver_widens_to_double() {
        let mut v = Value::from("5");
        v.increment(&Value::Integer(2)).unwrap();
        assert_eq!(v, Value::Double(7.0));
    }

    #[test]
    fn decrement_negates_argument() {
        let mut v = Value::Integer(10);
        v.decrement(&Value::Integer(3)).unwrap();
        assert_eq!(v, Value::Integer(7));

        v.decrement(&Value::Double(0.5)).unwrap();
        assert_eq!(v, Value::Double(6.5));

        v.decrement(&Value::Absent).unwrap();
        assert_eq!(v, Value::Double(6.5));
    }

    #[test]
    fn multiply_absent_annihilates() {
        let mut v = Value::Integer(9);
        v.multiply(&Value::Absent).unwrap();
        assert_eq!(v, Value::Integer(0));

        let mut a = Value::Absent;
        a.multiply(&Value::Double(3.0)).unwrap();
        assert_eq!(a, Value::Integer(0));

        let mut i = Value::Integer(6);
        i.multiply(&Value::Integer(7)).unwrap();
        assert_eq!(i, Value::Integer(42));

        i.multiply(&Value::Double(0.5)).unwrap();
        assert_eq!(i, Value::Double(21.0));
    }

    #[test]
    fn divide_is_always_double() {
        let mut v = Value::Integer(8);
        v.divide(&Value::Integer(4)).unwrap();
        assert_eq!(v, Value::Double(2.0));
    }

    #[test]
    fn divide_by_zero_fails_regardless_of_receiver() {
        assert!(matches!(Value::Integer(3).divide(&Value::Integer(0)),
                         Err(RuntimeError::DivisionByZero)));
        assert!(matches!(Value::Double(3.0).divide(&Value::from("0")),
                         Err(RuntimeError::DivisionByZero)));
        assert!(matches!(Value::Absent.divide(&Value::Absent),
                         Err(RuntimeError::DivisionByZero)));
        assert!(matches!(Value::Integer(1).divide(&Value::Double(0.0)),
                         Err(RuntimeError::DivisionByZero)));
    }

    #[test]
    fn divide_absent_by_non_zero_is_integer_zero() {
        let mut v = Value::Absent;
        v.divide(&Value::Double(2.5)).unwrap();
        assert_eq!(v, Value::Integer(0));
    }

    #[test]
    fn unparseable_text_is_rejected() {
        let mut v = Value::Integer(1);
        assert!(matches!(v.increment(&Value::from("x1")), Err(RuntimeError::NotNumeric { .. })));
        assert!(matches!(v.increment(&Value::from("1e3")), Err(RuntimeError::NotNumeric { .. })));
        assert_eq!(v, Value::Integer(1));
    }

    #[test]
    fn compare_reads_doubles() {
        assert_eq!(Value::Integer(2).compare(&Value::Integer(5)).unwrap(), Ordering::Less);
        assert_eq!(Value::from("2.0").compare(&Value::Integer(2)).unwrap(), Ordering::Equal);
        assert_eq!(Value::Double(-1.0).compare(&Value::Absent).unwrap(), Ordering::Less);
    }

    #[test]
    fn integer_overflow_is_reported() {
        let mut v = Value::Integer(i64::MAX);
        assert!(matches!(v.increment(&Value::Integer(1)), Err(RuntimeError::Overflow)));
    }

    #[test]
    fn only_constants_become_values() {
        assert_eq!(Value::try_from(&Element::Integer(3)).unwrap(), Value::Integer(3));
        assert_eq!(Value::try_from(&Element::String("a b".into())).unwrap(),
                   Value::from("a b"));
        assert!(matches!(Value::try_from(&Element::Operator(Operator::Add)),
                         Err(RuntimeError::UnsupportedValueKind { kind: "operator" })));
    }

    #[test]
    fn display_uses_canonical_forms() {
        assert_eq!(Value::Integer(7).to_string(), "7");
        assert_eq!(Value::Double(7.0).to_string(), "7.0");
        assert_eq!(Value::from("x").to_string(), "x");
        assert_eq!(Value::Absent.to_string(), "");
    }
}
