/// The evaluator module executes a parsed document against a sink.
///
/// The evaluator walks the node tree, keeps the named variable stacks used by
/// `FOR` loops, evaluates the elements of echo tags on a temporary stack and
/// writes the results to the output sink.
///
/// # Responsibilities
/// - Visits document, text, echo and loop nodes in order.
/// - Runs the fixed table of built-in operations.
/// - Reports runtime errors such as unbound variables or division by zero.
pub mod evaluator;
/// The lexer module splits template source into tokens.
///
/// The lexer switches between a text mode, which collects literal text and
/// resolves escapes, and a tag mode, which captures a complete `{$ ... $}`
/// tag. It also provides the tokenizer that splits a tag body into words and
/// quoted strings.
///
/// # Responsibilities
/// - Produces `TEXT`, `TAG` and `EOF` tokens in a single forward pass.
/// - Reports illegal escapes and unterminated tags.
pub mod lexer;
/// The parser module builds the node tree from tokens.
///
/// The parser drives the lexer, recognises the shape of every tag, classifies
/// tag contents into elements and nests loop bodies using a stack of open
/// nodes.
///
/// # Responsibilities
/// - Converts tokens into [`crate::ast::Node`]s under a single
///   [`crate::ast::Document`].
/// - Validates tag grammar, element syntax and `FOR`/`END` nesting.
pub mod parser;
/// The value module defines the runtime data type for evaluation.
///
/// # Responsibilities
/// - Defines the `Value` enum: absent, integer, double or text.
/// - Implements in-place arithmetic with integer-to-double widening.
/// - Provides numeric coercion of text values.
pub mod value;
