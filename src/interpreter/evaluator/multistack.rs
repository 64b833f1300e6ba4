use std::collections::HashMap;

use crate::interpreter::value::core::Value;

/// A map from names to independent stacks of values.
///
/// Popping from an empty or unknown stack is not an error; it yields `None`.
/// A name whose stack becomes empty is removed entirely.
///
/// # Example
/// ```
/// use smartscript::interpreter::{evaluator::multistack::Multistack, value::core::Value};
///
/// let mut stacks = Multistack::new();
/// stacks.push("i", Value::Integer(1));
/// stacks.push("i", Value::Integer(2));
///
/// assert_eq!(stacks.peek("i"), Some(&Value::Integer(2)));
/// assert_eq!(stacks.pop("i"), Some(Value::Integer(2)));
/// assert_eq!(stacks.pop("i"), Some(Value::Integer(1)));
/// assert_eq!(stacks.pop("i"), None);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Multistack {
    stacks: HashMap<String, Vec<Value>>,
}

impl Multistack {
    /// Creates an empty multistack.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Pushes `value` on the stack called `name`, creating it if needed.
    pub fn push(&mut self, name: &str, value: Value) {
        self.stacks.entry(name.to_string()).or_default().push(value);
    }

    /// Removes and returns the top of the stack called `name`.
    pub fn pop(&mut self, name: &str) -> Option<Value> {
        let stack = self.stacks.get_mut(name)?;
        let value = stack.pop();
        if stack.is_empty() {
            self.stacks.remove(name);
        }
        value
    }

    /// Returns the top of the stack called `name` without removing it.
    #[must_use]
    pub fn peek(&self, name: &str) -> Option<&Value> {
        self.stacks.get(name).and_then(|stack| stack.last())
    }

    /// Returns `true` if the stack called `name` holds no values.
    #[must_use]
    pub fn is_empty(&self, name: &str) -> bool {
        self.peek(name).is_none()
    }
}
