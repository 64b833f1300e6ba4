//! # smartscript
//!
//! smartscript is a small templating language written in Rust.
//! It parses templates made of literal text, `{$= ... $}` echo tags and
//! `{$FOR ... $}` loops, and renders them into an output sink with support for
//! stack arithmetic, built-in operations and request parameters.

#![warn(
    clippy::redundant_clone,
    clippy::needless_pass_by_value,
    clippy::similar_names,
    clippy::large_enum_variant,
    clippy::string_lit_as_bytes,
    clippy::match_same_arms,
    clippy::cargo,
    clippy::nursery,
    clippy::perf,
    clippy::style,
    clippy::suspicious,
    clippy::correctness,
    clippy::complexity,
    clippy::pedantic,
    //missing_docs,
)]
#![allow(clippy::missing_errors_doc)]

use tracing::debug;

use crate::{
    interpreter::{evaluator::core::Engine, parser::core::parse_document},
    sink::{MemorySink, Sink},
};

/// Defines the structure of parsed templates.
///
/// This module declares the `Node` and `Element` types that represent a
/// template as a tree. The tree is built by the parser and walked by the
/// evaluator, and it can be written back as canonical template source.
///
/// # Responsibilities
/// - Defines the document root, text, echo and loop nodes.
/// - Defines the elements of a tag: constants, variables, functions and
///   operators.
/// - Renders nodes back to source text.
pub mod ast;
/// Provides unified error types for parsing and evaluation.
///
/// This module defines all errors that can be raised during lexing, parsing, or
/// executing a template. Parse errors carry the line on which they were
/// detected.
///
/// # Responsibilities
/// - Defines error enums for all failure modes (lexer, parser, evaluator,
///   sink).
/// - Supports integration with standard error handling traits.
pub mod error;
/// Orchestrates the entire process of template execution.
///
/// This module ties together lexing, parsing, evaluation and value
/// representations.
///
/// # Responsibilities
/// - Coordinates all core components: lexer, parser, evaluator, and value
///   types.
/// - Provides entry points for parsing and executing templates.
pub mod interpreter;
/// Output destinations of a render.
///
/// # Responsibilities
/// - Defines the `Sink` trait the evaluator writes through.
/// - Holds the request, persistent and temporary parameter scopes.
/// - Provides an in-memory sink and an HTTP-style sink with headers.
pub mod sink;
/// General utilities for numbers.
///
/// This module provides the numeric text rules shared by the value library,
/// the element classifier and the built-in operations.
///
/// # Responsibilities
/// - Formats doubles in their canonical text form.
/// - Parses numeric text into integers or doubles.
pub mod util;

/// Parses and executes a template, writing the output into `sink`.
///
/// Parsing completes before anything is written, so a template with a syntax
/// error produces no output at all.
///
/// # Errors
/// Returns an error if parsing fails, or if a runtime error occurs that is not
/// isolated by a built-in operation.
///
/// # Examples
/// ```
/// use smartscript::{render, sink::MemorySink};
///
/// let mut sink = MemorySink::default();
/// render("Total: {$= 3 4 + $}", &mut sink).unwrap();
/// assert_eq!(sink.output(), "Total: 7.0");
///
/// // A loop that is never closed.
/// let res = render("{$FOR i 1 3$}{$= i $}", &mut MemorySink::default());
/// assert!(res.is_err());
/// ```
pub fn render(source: &str, sink: &mut dyn Sink) -> Result<(), Box<dyn std::error::Error>> {
    let document = parse_document(source)?;
    debug!(nodes = document.children.len(), "rendering template");

    Engine::new(&document, sink).execute()?;
    Ok(())
}

/// Renders a template into a string using a [`MemorySink`] without
/// parameters.
///
/// # Errors
/// The same errors as [`render`].
///
/// # Examples
/// ```
/// use smartscript::render_to_string;
///
/// let out = render_to_string(r#"{$FOR i 0 10 2$}{$= i " "$}{$END$}"#).unwrap();
/// assert_eq!(out, "0 2 4 6 8 10 ");
/// ```
pub fn render_to_string(source: &str) -> Result<String, Box<dyn std::error::Error>> {
    let mut sink = MemorySink::default();
    render(source, &mut sink)?;
    Ok(sink.into_output())
}
