/// Core evaluation logic.
///
/// Contains the execution engine, which owns the variable stacks of one render
/// and dispatches on node kinds.
pub mod core;

/// Evaluation of echo tags.
///
/// Evaluates elements on a temporary stack and writes the resulting values to
/// the sink.
pub mod echo;

/// Evaluation of `FOR` loops.
///
/// Binds the loop variable on its named stack and executes the body until
/// the upper bound is exceeded.
pub mod for_loop;

/// Built-in operations.
///
/// The fixed table of named stack operations callable with `@name`.
pub mod function;

/// Named variable stacks.
///
/// Maps every loop variable name to its own stack, so that nested loops reusing
/// a name shadow the outer binding.
pub mod multistack;
