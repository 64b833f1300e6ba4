use tracing::{trace, warn};

use crate::{
    error::RuntimeError,
    interpreter::{
        evaluator::{
            core::{Engine, EvalResult},
            echo::EvalStack,
            function::{builtin, decfmt, param},
        },
        value::core::Value,
    },
    sink::{Scope, Sink},
};

/// Type alias for builtin operation handlers.
///
/// A builtin receives the values it pops, bottom first (so the value that was
/// on top of the stack is last), and the sink. It returns the values to push,
/// again bottom first.
type BuiltinFn = fn(&[Value], &mut dyn Sink) -> EvalResult<Vec<Value>>;

/// Defines builtin operations by generating a lookup table and a name list.
///
/// Each entry provides:
/// - a string name,
/// - the number of values the operation pops,
/// - a function pointer implementing the operation.
///
/// The macro produces:
/// - `BuiltinDef` (internal metadata),
/// - `BUILTIN_TABLE` (static table for lookup),
/// - `BUILTIN_FUNCTIONS` (public list of builtin names).
macro_rules! builtin_functions {
    (
        $(
            $name:literal => {
                arity: $arity:expr,
                func: $func:expr $(,)?
            }
        ),* $(,)?
    ) => {
        struct BuiltinDef {
            name:  &'static str,
            arity: usize,
            func:  BuiltinFn,
        }
        static BUILTIN_TABLE: &[BuiltinDef] = &[
            $(
                BuiltinDef { name: $name, arity: $arity, func: $func },
            )*
        ];
        /// Names of all built-in operations, without the `@` prefix.
        pub const BUILTIN_FUNCTIONS: &[&str] = &[
            $($name,)*
        ];
    };
}

builtin_functions! {
    "sin"         => { arity: 1, func: builtin::sin },
    "decfmt"      => { arity: 2, func: decfmt::decfmt },
    "dup"         => { arity: 1, func: builtin::dup },
    "swap"        => { arity: 2, func: builtin::swap },
    "setMimeType" => { arity: 1, func: builtin::set_mime_type },
    "paramGet"    => { arity: 2, func: |args, sink| param::get(Scope::Request, args, sink) },
    "pparamGet"   => { arity: 2, func: |args, sink| param::get(Scope::Persistent, args, sink) },
    "tparamGet"   => { arity: 2, func: |args, sink| param::get(Scope::Temporary, args, sink) },
    "pparamSet"   => { arity: 2, func: |args, sink| param::set(Scope::Persistent, args, sink) },
    "tparamSet"   => { arity: 2, func: |args, sink| param::set(Scope::Temporary, args, sink) },
    "pparamDel"   => { arity: 1, func: |args, sink| param::remove(Scope::Persistent, args, sink) },
    "tparamDel"   => { arity: 1, func: |args, sink| param::remove(Scope::Temporary, args, sink) },
}

impl Engine<'_> {
    /// Invokes a built-in operation on the temporary stack.
    ///
    /// The operation pops its arguments and pushes its results. A failing
    /// operation does not abort the render: the failure is logged and
    /// evaluation continues with the next element. The popped arguments stay
    /// consumed. An operation that finds too few values on the stack consumes
    /// the ones present and fails the same way.
    ///
    /// # Parameters
    /// - `name`: Operation name, without `@`.
    /// - `stack`: The temporary stack of the current echo tag.
    ///
    /// # Errors
    /// `UnknownFunction` if no operation has this name.
    pub(crate) fn call_builtin(&mut self, name: &str, stack: &mut EvalStack) -> EvalResult<()> {
        let builtin = BUILTIN_TABLE.iter()
                                   .find(|b| b.name == name)
                                   .ok_or_else(|| RuntimeError::UnknownFunction { name: name.to_string() })?;

        trace!(operation = name, depth = stack.len(), "invoking built-in operation");

        let args = stack.take_top(builtin.arity);
        match (builtin.func)(&args, &mut *self.sink) {
            Ok(results) => stack.push_all(results),
            Err(error) => warn!(operation = name, consumed = args.len(), %error, "built-in operation failed"),
        }
        Ok(())
    }
}

/// The error an operation reports when the stack held fewer values than it
/// pops.
pub(crate) fn missing_arguments(name: &str) -> RuntimeError {
    RuntimeError::EmptyStack { context: format!("operation '@{name}'") }
}

/// Reads a value that an operation requires to be text.
///
/// # Errors
/// `TypeError` naming `what` if the value is not text.
pub(crate) fn expect_text<'v>(value: &'v Value, what: &str) -> EvalResult<&'v str> {
    match value {
        Value::Text(text) => Ok(text),
        other => Err(RuntimeError::TypeError { details: format!("{what} must be text, found '{other}'") }),
    }
}
