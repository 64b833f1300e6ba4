use crate::{
    interpreter::{
        evaluator::{
            core::EvalResult,
            function::core::{expect_text, missing_arguments},
        },
        value::core::Value,
    },
    sink::{Scope, Sink},
};

/// Looks up a parameter, falling back to a default.
///
/// Pops the default (top) and then the parameter name, which must be text.
/// Pushes the parameter value as text, or the default rendered as text when
/// the scope has no such parameter.
///
/// # Example
/// ```
/// use smartscript::{
///     interpreter::{evaluator::function::param::get, value::core::Value},
///     sink::{MemorySink, Scope},
/// };
///
/// let mut sink = MemorySink::default();
/// let r = get(Scope::Request, &[Value::from("a"), Value::Integer(0)], &mut sink).unwrap();
///
/// assert_eq!(r, vec![Value::from("0")]);
/// ```
pub fn get(scope: Scope, args: &[Value], sink: &mut dyn Sink) -> EvalResult<Vec<Value>> {
    let [name, default] = args else { return Err(missing_arguments(&operation(scope, "Get"))) };
    let name = expect_text(name, "parameter name")?;

    let value = sink.parameters()
                    .get(scope, name)
                    .map_or_else(|| default.to_string(), str::to_string);
    Ok(vec![Value::Text(value)])
}

/// Stores a parameter.
///
/// Pops the value (top) and then the parameter name, which must be text.
/// Numbers are stored in their canonical text form. Pushes nothing.
///
/// # Errors
/// - `TypeError` if the name is not text.
/// - `TypeError` for the read-only request scope.
pub fn set(scope: Scope, args: &[Value], sink: &mut dyn Sink) -> EvalResult<Vec<Value>> {
    let [name, value] = args else { return Err(missing_arguments(&operation(scope, "Set"))) };
    let name = expect_text(name, "parameter name")?;
    let value = value.to_string();

    sink.parameters_mut().set(scope, name, value)?;
    Ok(Vec::new())
}

/// Removes a parameter.
///
/// Pops the parameter name, which must be text. Pushes nothing.
pub fn remove(scope: Scope, args: &[Value], sink: &mut dyn Sink) -> EvalResult<Vec<Value>> {
    let [name] = args else { return Err(missing_arguments(&operation(scope, "Del"))) };
    let name = expect_text(name, "parameter name")?;

    sink.parameters_mut().remove(scope, name)?;
    Ok(Vec::new())
}

/// The name of the parameter operation `action` acting on `scope`.
fn operation(scope: Scope, action: &str) -> String {
    let prefix = match scope {
        Scope::Request => "param",
        Scope::Persistent => "pparam",
        Scope::Temporary => "tparam",
    };
    format!("{prefix}{action}")
}
