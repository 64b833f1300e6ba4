use crate::{
    interpreter::{
        evaluator::{
            core::EvalResult,
            function::core::{expect_text, missing_arguments},
        },
        value::core::Value,
    },
    sink::Sink,
};

/// Computes the sine of an angle given in degrees.
///
/// Pops one value, which may be any number or numeric text. Pushes a double.
///
/// # Example
/// ```
/// use smartscript::{
///     interpreter::{evaluator::function::builtin::sin, value::core::Value},
///     sink::MemorySink,
/// };
///
/// let r = sin(&[Value::Integer(90)], &mut MemorySink::default()).unwrap();
/// assert_eq!(r, vec![Value::Double(1.0)]);
/// ```
pub fn sin(args: &[Value], _sink: &mut dyn Sink) -> EvalResult<Vec<Value>> {
    let [angle] = args else { return Err(missing_arguments("sin")) };
    let degrees = angle.as_double()?;
    Ok(vec![Value::Double(degrees.to_radians().sin())])
}

/// Duplicates the top of the stack.
///
/// # Example
/// ```
/// use smartscript::{
///     interpreter::{evaluator::function::builtin::dup, value::core::Value},
///     sink::MemorySink,
/// };
///
/// let r = dup(&[Value::from("x")], &mut MemorySink::default()).unwrap();
/// assert_eq!(r, vec![Value::from("x"), Value::from("x")]);
/// ```
pub fn dup(args: &[Value], _sink: &mut dyn Sink) -> EvalResult<Vec<Value>> {
    let [top] = args else { return Err(missing_arguments("dup")) };
    Ok(vec![top.clone(), top.clone()])
}

/// Swaps the two topmost values.
pub fn swap(args: &[Value], _sink: &mut dyn Sink) -> EvalResult<Vec<Value>> {
    let [below, top] = args else { return Err(missing_arguments("swap")) };
    Ok(vec![top.clone(), below.clone()])
}

/// Sets the MIME type of the output.
///
/// Pops one text value and pushes nothing.
///
/// # Errors
/// - `TypeError` if the value is not text.
/// - Whatever the sink reports, e.g. `HeaderAlreadyGenerated` once output
///   has been written.
pub fn set_mime_type(args: &[Value], sink: &mut dyn Sink) -> EvalResult<Vec<Value>> {
    let [mime_type] = args else { return Err(missing_arguments("setMimeType")) };
    let mime_type = expect_text(mime_type, "MIME type")?;
    sink.set_mime_type(mime_type)?;
    Ok(Vec::new())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{error::RuntimeError, sink::MemorySink};

    #[test]
    fn sin_takes_degrees() {
        let mut sink = MemorySink::default();
        let r = sin(&[Value::from("30.0")], &mut sink).unwrap();
        let Value::Double(d) = r[0] else { panic!("expected a double") };
        assert!((d - 0.5).abs() < 1e-12);

        assert_eq!(sin(&[Value::Absent], &mut sink).unwrap(), vec![Value::Double(0.0)]);
        assert!(sin(&[Value::from("abc")], &mut sink).is_err());
    }

    #[test]
    fn swap_reverses_top_two() {
        let mut sink = MemorySink::default();
        let r = swap(&[Value::Integer(1), Value::Integer(2)], &mut sink).unwrap();
        assert_eq!(r, vec![Value::Integer(2), Value::Integer(1)]);
    }

    #[test]
    fn short_argument_lists_are_errors() {
        let mut sink = MemorySink::default();
        assert!(matches!(sin(&[], &mut sink), Err(RuntimeError::EmptyStack { .. })));
        assert!(matches!(dup(&[], &mut sink), Err(RuntimeError::EmptyStack { .. })));
        assert!(matches!(swap(&[Value::Integer(1)], &mut sink), Err(RuntimeError::EmptyStack { .. })));
        assert!(matches!(set_mime_type(&[], &mut sink), Err(RuntimeError::EmptyStack { .. })));
    }

    #[test]
    fn mime_type_must_be_text() {
        let mut sink = MemorySink::default();
        assert!(set_mime_type(&[Value::Integer(1)], &mut sink).is_err());

        set_mime_type(&[Value::from("text/plain")], &mut sink).unwrap();
        assert_eq!(sink.mime_type(), Some("text/plain"));
    }
}
