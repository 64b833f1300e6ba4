use tracing::debug;

use crate::{
    ast::{Document, Node},
    error::RuntimeError,
    interpreter::evaluator::multistack::Multistack,
    sink::Sink,
};

/// Result type used by the evaluator.
///
/// All evaluation functions return either a value of type `T` or a
/// `RuntimeError` describing the failure.
pub type EvalResult<T> = Result<T, RuntimeError>;

/// Executes one parsed document against a sink.
///
/// An engine is built for a single render: the variable stacks start empty and
/// are dropped together with the engine, so nothing leaks between renders.
///
/// # Example
/// ```
/// use smartscript::{
///     interpreter::{evaluator::core::Engine, parser::core::parse_document},
///     sink::MemorySink,
/// };
///
/// let document = parse_document("{$FOR i 1 3$}{$= i $}{$END$}").unwrap();
/// let mut sink = MemorySink::default();
///
/// Engine::new(&document, &mut sink).execute().unwrap();
///
/// assert_eq!(sink.output(), "123");
/// ```
pub struct Engine<'a> {
    document:              &'a Document,
    pub(crate) sink:       &'a mut dyn Sink,
    pub(crate) multistack: Multistack,
}

impl<'a> Engine<'a> {
    /// Creates an engine for `document` writing into `sink`.
    #[must_use]
    pub fn new(document: &'a Document, sink: &'a mut dyn Sink) -> Self {
        Self { document,
               sink,
               multistack: Multistack::new() }
    }

    /// Runs the document to completion.
    ///
    /// Visits the top level nodes in order. Failures of built-in operations
    /// are logged and skipped; every other runtime error stops the render.
    ///
    /// # Errors
    /// The first runtime error that is not isolated by a built-in operation.
    pub fn execute(mut self) -> EvalResult<()> {
        debug!(nodes = self.document.children.len(), "executing document");

        let document = self.document;
        self.visit_nodes(&document.children)
    }

    /// Visits a list of nodes in order.
    pub(crate) fn visit_nodes(&mut self, nodes: &[Node]) -> EvalResult<()> {
        for node in nodes {
            self.visit_node(node)?;
        }
        Ok(())
    }

    /// Dispatches a single node to its visitor.
    fn visit_node(&mut self, node: &Node) -> EvalResult<()> {
        match node {
            Node::Text(text) => self.sink.write_str(text),
            Node::Echo(elements) => self.visit_echo(elements),
            Node::ForLoop(for_loop) => self.visit_for_loop(for_loop),
        }
    }
}
