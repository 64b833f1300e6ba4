use tracing::debug;

use crate::{
    ast::{Document, ForLoopNode, Node},
    error::ParseError,
    interpreter::{
        lexer::{Lexer, Token},
        parser::{
            element::{classify_echo, classify_for},
            tag::{TagKind, classify_tag},
        },
    },
};

/// Result type used by the lexer and parser.
///
/// Every parsing function returns either a value of type `T` or the
/// `ParseError` that aborted the parse.
pub type ParseResult<T> = Result<T, ParseError>;

/// A `FOR` block that has been opened but not yet closed by `END`.
struct OpenLoop {
    node: ForLoopNode,
    line: usize,
}

/// The stack of currently open nodes.
///
/// The document sits at the bottom and is never popped. Open loops are owned
/// by the stack until their `END` arrives; only then are they attached to
/// their parent, which keeps the finished tree free of back references.
struct OpenStack {
    document: Document,
    loops:    Vec<OpenLoop>,
}

impl OpenStack {
    /// Children of the node on top of the stack.
    fn top_children(&mut self) -> &mut Vec<Node> {
        match self.loops.last_mut() {
            Some(open) => &mut open.node.children,
            None => &mut self.document.children,
        }
    }

    fn append(&mut self, node: Node) {
        self.top_children().push(node);
    }

    fn open(&mut self, node: ForLoopNode, line: usize) {
        self.loops.push(OpenLoop { node, line });
    }

    fn close(&mut self, line: usize) -> ParseResult<()> {
        let open = self.loops.pop().ok_or(ParseError::UnmatchedEnd { line })?;
        self.append(Node::ForLoop(open.node));
        Ok(())
    }

    fn finish(mut self) -> ParseResult<Document> {
        match self.loops.pop() {
            Some(open) => Err(ParseError::UnclosedFor { variable: open.node.variable,
                                                        line:     open.line, }),
            None => Ok(self.document),
        }
    }
}

/// Parses template source into a document.
///
/// This is the entry point for parsing. It drives the [`Lexer`] until end of
/// input and builds the tree:
///
/// - text becomes a [`Node::Text`] child of the innermost open node,
/// - an echo tag becomes a [`Node::Echo`] child of the innermost open node,
/// - a `FOR` tag opens a new node that collects everything up to its `END`.
///
/// Every `FOR` must be closed before the input ends. Nothing is returned on
/// failure; the first error aborts the parse.
///
/// # Parameters
/// - `source`: The template text.
///
/// # Returns
/// The root document of the parsed tree.
///
/// # Errors
/// Any lexical error, plus `UnknownTag`, element classification errors,
/// `UnmatchedEnd` and `UnclosedFor`.
///
/// # Example
/// ```
/// use smartscript::{ast::Node, interpreter::parser::core::parse_document};
///
/// let document = parse_document("Hi {$FOR i 1 2$}{$= i $}{$END$}").unwrap();
///
/// assert_eq!(document.children.len(), 2);
/// assert!(matches!(&document.children[1], Node::ForLoop(l) if l.children.len() == 1));
///
/// assert!(parse_document("{$FOR i 1 2$}").is_err());
/// assert!(parse_document("{$END$}").is_err());
/// ```
pub fn parse_document(source: &str) -> ParseResult<Document> {
    debug!(bytes = source.len(), "parsing template");
    let mut lexer = Lexer::new(source);
    let mut stack = OpenStack { document: Document::default(),
                                loops:    Vec::new(), };

    loop {
        let token = lexer.next_token()?;
        let line = lexer.line();

        match token {
            Token::Eof => break,
            Token::Text(text) => stack.append(Node::Text(text)),
            Token::Tag(tag) => match classify_tag(&tag, line)? {
                TagKind::End => stack.close(line)?,
                TagKind::Echo(body) => stack.append(Node::Echo(classify_echo(body, line)?)),
                TagKind::For(body) => stack.open(classify_for(body, line)?, line),
            },
        }
    }

    let document = stack.finish()?;
    debug!(nodes = document.node_kinds().len(), "parsed document");
    Ok(document)
}
