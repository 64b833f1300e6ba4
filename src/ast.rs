use std::fmt;

use crate::util::num::format_double;

/// An arithmetic operator usable inside an echo tag.
///
/// Operators always work on doubles: both operands are coerced before the
/// operation is applied, so `{$= 3 4 + $}` yields `7.0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    /// `+`
    Add,
    /// `-`
    Sub,
    /// `*`
    Mul,
    /// `/`
    Div,
}

impl Operator {
    /// Returns the operator for a single-character symbol, if any.
    ///
    /// # Example
    /// ```
    /// use smartscript::ast::Operator;
    ///
    /// assert_eq!(Operator::from_symbol('*'), Some(Operator::Mul));
    /// assert_eq!(Operator::from_symbol('^'), None);
    /// ```
    #[must_use]
    pub const fn from_symbol(symbol: char) -> Option<Self> {
        match symbol {
            '+' => Some(Self::Add),
            '-' => Some(Self::Sub),
            '*' => Some(Self::Mul),
            '/' => Some(Self::Div),
            _ => None,
        }
    }

    /// The source symbol of the operator.
    #[must_use]
    pub const fn symbol(self) -> char {
        match self {
            Self::Add => '+',
            Self::Sub => '-',
            Self::Mul => '*',
            Self::Div => '/',
        }
    }

    /// Applies the operator as `left <op> right`.
    #[must_use]
    pub fn apply(self, left: f64, right: f64) -> f64 {
        match self {
            Self::Add => left + right,
            Self::Sub => left - right,
            Self::Mul => left * right,
            Self::Div => left / right,
        }
    }
}

/// One classified token inside an echo or for-loop tag.
///
/// Elements are immutable once the parser has produced them. Each renders to
/// its canonical source text through [`fmt::Display`]: strings are re-quoted
/// and functions get their `@` prefix back.
#[derive(Debug, Clone, PartialEq)]
pub enum Element {
    /// An integer constant such as `42`.
    Integer(i64),
    /// A double constant such as `3.5` or `1e3`.
    Double(f64),
    /// A quoted string constant, stored without its quotes.
    String(String),
    /// A reference to a loop variable.
    Variable(String),
    /// A call to a built-in operation, stored without the `@` prefix.
    Function(String),
    /// One of `+ - * /`.
    Operator(Operator),
}

impl Element {
    /// A short human readable name of the element kind, used in error
    /// messages.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Integer(_) => "integer constant",
            Self::Double(_) => "double constant",
            Self::String(_) => "string constant",
            Self::Variable(_) => "variable",
            Self::Function(_) => "function",
            Self::Operator(_) => "operator",
        }
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer(n) => write!(f, "{n}"),
            Self::Double(d) => write!(f, "{}", format_double(*d)),
            Self::String(s) => write!(f, "\"{s}\""),
            Self::Variable(name) => write!(f, "{name}"),
            Self::Function(name) => write!(f, "@{name}"),
            Self::Operator(op) => write!(f, "{}", op.symbol()),
        }
    }
}

/// A `{$FOR variable start end [step] $}` block together with its body.
///
/// Loop bounds are integer constants by construction; the classifier rejects
/// anything else before a `ForLoopNode` is built.
#[derive(Debug, Clone, PartialEq)]
pub struct ForLoopNode {
    /// Name of the loop variable.
    pub variable: String,
    /// First value bound to the variable.
    pub start:    i64,
    /// Inclusive upper bound.
    pub end:      i64,
    /// Increment applied after every iteration. `None` when the tag has no
    /// step, which the evaluator treats as `1`.
    pub step:     Option<i64>,
    /// Nodes nested between this tag and its matching `{$END$}`.
    pub children: Vec<Node>,
}

impl ForLoopNode {
    /// Creates a loop node without children.
    #[must_use]
    pub fn new(variable: impl Into<String>, start: i64, end: i64, step: Option<i64>) -> Self {
        Self { variable: variable.into(),
               start,
               end,
               step,
               children: Vec::new() }
    }
}

/// A single node of the parsed tree.
///
/// The root of every tree is a [`Document`], which is kept as its own type so
/// that a document can never appear nested inside another node.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    /// Literal text with all escapes already resolved.
    Text(String),
    /// A `{$= ... $}` tag. Always holds at least one element.
    Echo(Vec<Element>),
    /// A for loop and its body.
    ForLoop(ForLoopNode),
}

impl Node {
    /// A short name of the node kind.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Text(_) => "text",
            Self::Echo(_) => "echo",
            Self::ForLoop(_) => "for",
        }
    }

    /// Children owned by this node. Leaves have none.
    #[must_use]
    pub fn children(&self) -> &[Self] {
        match self {
            Self::ForLoop(node) => &node.children,
            Self::Text(_) | Self::Echo(_) => &[],
        }
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(text) => {
                for c in text.chars() {
                    if c == '\\' || c == '{' {
                        write!(f, "\\")?;
                    }
                    write!(f, "{c}")?;
                }
                Ok(())
            },
            Self::Echo(elements) => {
                write!(f, "{{$=")?;
                for element in elements {
                    write!(f, " {element}")?;
                }
                write!(f, " $}}")
            },
            Self::ForLoop(node) => {
                write!(f, "{{$FOR {} {} {}", node.variable, node.start, node.end)?;
                if let Some(step) = node.step {
                    write!(f, " {step}")?;
                }
                write!(f, " $}}")?;
                for child in &node.children {
                    write!(f, "{child}")?;
                }
                write!(f, "{{$END$}}")
            },
        }
    }
}

/// The root of a parsed template.
///
/// Displaying a document reproduces template source that parses back into a
/// tree with the same shape.
///
/// # Example
/// ```
/// use smartscript::interpreter::parser::core::parse_document;
///
/// let document = parse_document(r"a \{ {$FOR i 1 3$}{$= i$}{$END$}").unwrap();
///
/// assert_eq!(document.to_string(), r"a \{ {$FOR i 1 3 $}{$= i $}{$END$}");
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Document {
    /// Top level nodes in source order.
    pub children: Vec<Node>,
}

impl Document {
    /// Returns the node kinds of the whole tree in depth-first pre-order.
    ///
    /// The document itself is the first entry.
    #[must_use]
    pub fn node_kinds(&self) -> Vec<&'static str> {
        fn walk(nodes: &[Node], kinds: &mut Vec<&'static str>) {
            for node in nodes {
                kinds.push(node.kind());
                walk(node.children(), kinds);
            }
        }

        let mut kinds = vec!["document"];
        walk(&self.children, &mut kinds);
        kinds
    }
}

impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for child in &self.children {
            write!(f, "{child}")?;
        }
        Ok(())
    }
}
