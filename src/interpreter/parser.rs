/// Core parser logic.
///
/// Contains the entry point that drives the lexer and nests nodes using a
/// stack of open `FOR` blocks.
pub mod core;

/// Element classification.
///
/// Turns the words of an echo or `FOR` tag into typed elements: constants,
/// variables, functions, operators and strings.
pub mod element;

/// Tag recognition.
///
/// Decides whether a tag token is an `END`, an echo or a `FOR` tag and
/// extracts its body.
pub mod tag;
