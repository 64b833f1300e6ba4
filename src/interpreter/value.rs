/// The runtime value and its arithmetic.
///
/// Defines [`core::Value`], the tagged union that lives on the evaluation
/// stacks, together with the in-place arithmetic used by loops and the
/// numeric coercion rules shared with operators and built-in operations.
pub mod core;
