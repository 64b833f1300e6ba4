use tracing::trace;

use crate::{
    ast::Element,
    error::RuntimeError,
    interpreter::{
        evaluator::core::{Engine, EvalResult},
        value::core::Value,
    },
};

/// The temporary stack of a single echo tag.
///
/// Unlike the named variable stacks, popping from an empty evaluation stack
/// is an error.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EvalStack {
    values: Vec<Value>,
}

impl EvalStack {
    /// Creates an empty stack.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Pushes a value.
    pub fn push(&mut self, value: Value) {
        self.values.push(value);
    }

    /// Pops the top value.
    ///
    /// # Parameters
    /// - `context`: What needs the value, used in the error message.
    ///
    /// # Errors
    /// `EmptyStack` if there is nothing to pop.
    pub fn pop(&mut self, context: &str) -> EvalResult<Value> {
        self.values
            .pop()
            .ok_or_else(|| RuntimeError::EmptyStack { context: context.to_string() })
    }

    /// Number of values on the stack.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns `true` if the stack holds no values.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Removes the top `count` values, bottom first. Takes every value when
    /// fewer than `count` are present.
    pub(crate) fn take_top(&mut self, count: usize) -> Vec<Value> {
        let at = self.values.len().saturating_sub(count);
        self.values.split_off(at)
    }

    /// Pushes values in order, so the last one ends on top.
    pub(crate) fn push_all(&mut self, values: Vec<Value>) {
        self.values.extend(values);
    }

    /// Consumes the stack, returning its values bottom first.
    #[must_use]
    pub fn into_values(self) -> Vec<Value> {
        self.values
    }
}

impl Engine<'_> {
    /// Evaluates the elements of an echo tag and writes the result.
    ///
    /// The elements are evaluated left to right on a fresh [`EvalStack`].
    /// Whatever remains on the stack afterwards is written to the sink from
    /// bottom to top, which is the order in which the values were produced.
    ///
    /// # Parameters
    /// - `elements`: The elements of the tag, in source order.
    ///
    /// # Returns
    /// `Ok(())` once all remaining values are written.
    ///
    /// # Errors
    /// - `UnknownVariable` for a variable no enclosing loop binds.
    /// - `EmptyStack` or `NotNumeric` for an operator without usable operands.
    /// - `UnknownFunction` for an `@name` that is not a built-in operation.
    pub(crate) fn visit_echo(&mut self, elements: &[Element]) -> EvalResult<()> {
        let mut stack = EvalStack::new();
        for element in elements {
            self.eval_element(element, &mut stack)?;
        }

        for value in stack.into_values() {
            self.sink.write_str(&value.to_string())?;
        }
        Ok(())
    }

    /// Applies a single element to the temporary stack.
    fn eval_element(&mut self, element: &Element, stack: &mut EvalStack) -> EvalResult<()> {
        trace!(element = %element, depth = stack.len(), "evaluating element");

        match element {
            Element::Integer(_) | Element::Double(_) | Element::String(_) => {
                stack.push(Value::try_from(element)?);
            },
            Element::Variable(name) => {
                let value = self.multistack
                                .peek(name)
                                .cloned()
                                .ok_or_else(|| RuntimeError::UnknownVariable { name: name.clone() })?;
                stack.push(value);
            },
            Element::Operator(op) => {
                let context = format!("operator '{}'", op.symbol());
                let right = stack.pop(&context)?;
                let left = stack.pop(&context)?;
                stack.push(Value::Double(op.apply(left.as_double()?, right.as_double()?)));
            },
            Element::Function(name) => self.call_builtin(name, stack)?,
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        ast::{Document, Node, Operator},
        sink::MemorySink,
    };

    fn echo(elements: Vec<Element>) -> EvalResult<String> {
        let document = Document { children: vec![Node::Echo(elements)] };
        let mut sink = MemorySink::default();
        Engine::new(&document, &mut sink).execute()?;
        Ok(sink.into_output())
    }

    #[test]
    fn values_are_written_in_source_order() {
        let out = echo(vec![Element::Integer(1),
                            Element::String("a".into()),
                            Element::Double(2.5)]).unwrap();
        assert_eq!(out, "1a2.5");
    }

    #[test]
    fn operators_take_most_recent_value_as_right_operand() {
        let out = echo(vec![Element::Integer(3),
                            Element::Integer(4),
                            Element::Operator(Operator::Sub)]).unwrap();
        assert_eq!(out, "-1.0");

        let out = echo(vec![Element::Integer(1),
                            Element::Integer(4),
                            Element::Operator(Operator::Div)]).unwrap();
        assert_eq!(out, "0.25");
    }

    #[test]
    fn operators_read_text_as_double() {
        let out = echo(vec![Element::String("1.5".into()),
                            Element::Integer(2),
                            Element::Operator(Operator::Mul)]).unwrap();
        assert_eq!(out, "3.0");
    }

    #[test]
    fn operator_without_operands_fails() {
        let err = echo(vec![Element::Integer(1), Element::Operator(Operator::Add)]).unwrap_err();
        assert!(matches!(err, RuntimeError::EmptyStack { .. }));
    }

    #[test]
    fn operator_on_non_numeric_text_fails() {
        let err = echo(vec![Element::String("a".into()),
                            Element::Integer(1),
                            Element::Operator(Operator::Add)]).unwrap_err();
        assert!(matches!(err, RuntimeError::NotNumeric { .. }));
    }

    #[test]
    fn unbound_variable_fails() {
        let err = echo(vec![Element::Variable("i".into())]).unwrap_err();
        assert!(matches!(err, RuntimeError::UnknownVariable { name } if name == "i"));
    }

    #[test]
    fn eval_stack_reports_underflow() {
        let mut stack = EvalStack::new();
        stack.push(Value::Integer(1));
        assert_eq!(stack.pop("test").unwrap(), Value::Integer(1));
        assert!(stack.pop("test").is_err());
        assert!(stack.is_empty());
    }

    #[test]
    fn take_top_stops_at_the_bottom() {
        let mut stack = EvalStack::new();
        stack.push_all(vec![Value::Integer(1), Value::Integer(2), Value::Integer(3)]);
        assert_eq!(stack.take_top(2), vec![Value::Integer(2), Value::Integer(3)]);
        assert_eq!(stack.take_top(2), vec![Value::Integer(1)]);
        assert!(stack.is_empty());
    }
}
