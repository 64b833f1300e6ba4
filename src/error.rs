/// Parsing errors.
///
/// Defines every error that can occur while turning template source into a
/// node tree: lexical faults such as illegal escapes or unterminated tags, and
/// syntactic faults such as unknown tags, malformed elements or unbalanced
/// `FOR`/`END` pairs. A parse error always aborts the whole parse.
pub mod parse_error;
/// Runtime errors.
///
/// Contains all errors that can be raised while executing a parsed document:
/// unbound variables, empty evaluation stacks, failed numeric coercions,
/// division by zero and failures reported by the output sink.
pub mod runtime_error;

pub use parse_error::ParseError;
pub use runtime_error::RuntimeError;
