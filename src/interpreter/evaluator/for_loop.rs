use std::cmp::Ordering;

use crate::{
    ast::ForLoopNode,
    error::RuntimeError,
    interpreter::{
        evaluator::core::{Engine, EvalResult},
        value::core::Value,
    },
};

impl Engine<'_> {
    /// Executes a `FOR` loop.
    ///
    /// The start value is pushed on the stack named after the loop variable.
    /// Before every iteration the current value is compared with the inclusive
    /// upper bound; after the body ran it is popped, advanced by the step and
    /// pushed back. Every push is matched by a pop, so a nested loop reusing
    /// the variable name shadows the outer binding only while it runs.
    ///
    /// A loop without a step advances by `1`. A loop whose start already
    /// exceeds the end runs zero times. An advance that overflows counts as
    /// passing the end.
    ///
    /// # Parameters
    /// - `node`: The loop header and body.
    ///
    /// # Returns
    /// `Ok(())` once the loop variable exceeds the upper bound.
    ///
    /// # Errors
    /// - `InvalidLoopBounds` if the step is not positive while the loop would
    ///   run, since the bound could never be exceeded.
    /// - Any error raised by the body.
    pub(crate) fn visit_for_loop(&mut self, node: &ForLoopNode) -> EvalResult<()> {
        let step = node.step.unwrap_or(1);
        if step <= 0 && node.start <= node.end {
            return Err(RuntimeError::InvalidLoopBounds { details: format!("step {step} never moves '{}' from {} past {}",
                                                                          node.variable,
                                                                          node.start,
                                                                          node.end) });
        }

        let end = Value::Integer(node.end);
        let step = Value::Integer(step);

        self.multistack.push(&node.variable, Value::Integer(node.start));
        loop {
            let current = self.pop_loop_variable(&node.variable)?;
            if current.compare(&end)? == Ordering::Greater {
                break;
            }
            self.multistack.push(&node.variable, current);

            self.visit_nodes(&node.children)?;

            let mut current = self.pop_loop_variable(&node.variable)?;
            match current.increment(&step) {
                Ok(()) => self.multistack.push(&node.variable, current),
                // nothing representable lies beyond the end
                Err(RuntimeError::Overflow) => break,
                Err(error) => return Err(error),
            }
        }
        Ok(())
    }

    fn pop_loop_variable(&mut self, name: &str) -> EvalResult<Value> {
        self.multistack
            .pop(name)
            .ok_or_else(|| RuntimeError::EmptyStack { context: format!("loop variable '{name}'") })
    }
}
