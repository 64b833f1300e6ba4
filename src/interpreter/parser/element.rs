use crate::{
    ast::{Element, ForLoopNode, Operator},
    error::ParseError,
    interpreter::{lexer::split_tag_body, parser::core::ParseResult},
};

/// Returns `true` for names made of a letter followed by letters, digits or
/// underscores.
fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    chars.next().is_some_and(char::is_alphabetic)
    && chars.all(|c| c.is_alphanumeric() || c == '_')
}

/// Classifies a single tag word.
///
/// Rules are tried in order:
/// 1. A leading letter makes a variable.
/// 2. A leading `@` makes a function call.
/// 3. A single `+`, `-`, `*` or `/` makes an operator.
/// 4. A `"`-quoted word makes a string.
/// 5. Otherwise the word must parse as an integer or, failing that, a double.
///
/// # Parameters
/// - `token`: One piece of a tag body as produced by
///   [`split_tag_body`].
/// - `line`: Line number for error reporting.
///
/// # Errors
/// `InvalidVariableName`, `InvalidFunctionName` or `UnrecognizedToken`.
///
/// # Example
/// ```
/// use smartscript::{ast::Element, interpreter::parser::element::classify};
///
/// assert_eq!(classify("i_1", 1).unwrap(), Element::Variable("i_1".into()));
/// assert_eq!(classify("@sin", 1).unwrap(), Element::Function("sin".into()));
/// assert_eq!(classify("\"a b\"", 1).unwrap(), Element::String("a b".into()));
/// assert_eq!(classify("-3", 1).unwrap(), Element::Integer(-3));
/// assert_eq!(classify("2.5", 1).unwrap(), Element::Double(2.5));
/// assert!(classify("@", 1).is_err());
/// ```
pub fn classify(token: &str, line: usize) -> ParseResult<Element> {
    let Some(first) = token.chars().next() else {
        return Err(ParseError::UnrecognizedToken { token: token.to_string(),
                                                   line });
    };

    if first.is_alphabetic() {
        if !is_identifier(token) {
            return Err(ParseError::InvalidVariableName { name: token.to_string(),
                                                         line });
        }
        return Ok(Element::Variable(token.to_string()));
    }

    if let Some(name) = token.strip_prefix('@') {
        if !is_identifier(name) {
            return Err(ParseError::InvalidFunctionName { name: token.to_string(),
                                                         line });
        }
        return Ok(Element::Function(name.to_string()));
    }

    if token.len() == 1
       && let Some(op) = Operator::from_symbol(first)
    {
        return Ok(Element::Operator(op));
    }

    if token.len() >= 2
       && let Some(text) = token.strip_prefix('"').and_then(|t| t.strip_suffix('"'))
    {
        return Ok(Element::String(text.to_string()));
    }

    if let Ok(i) = token.parse::<i64>() {
        return Ok(Element::Integer(i));
    }
    if let Ok(d) = token.parse::<f64>() {
        return Ok(Element::Double(d));
    }

    Err(ParseError::UnrecognizedToken { token: token.to_string(),
                                        line })
}

/// Classifies the body of an echo tag.
///
/// # Errors
/// `EmptyEcho` if the body has no elements, otherwise any error from
/// [`classify`] or [`split_tag_body`].
///
/// # Example
/// ```
/// use smartscript::{
///     ast::{Element, Operator},
///     interpreter::parser::element::classify_echo,
/// };
///
/// let elements = classify_echo(" i 2 * ", 1).unwrap();
/// assert_eq!(elements,
///            vec![Element::Variable("i".into()),
///                 Element::Integer(2),
///                 Element::Operator(Operator::Mul)]);
/// ```
pub fn classify_echo(body: &str, line: usize) -> ParseResult<Vec<Element>> {
    let elements = split_tag_body(body, line)?.iter()
                                              .map(|token| classify(token, line))
                                              .collect::<ParseResult<Vec<_>>>()?;
    if elements.is_empty() {
        return Err(ParseError::EmptyEcho { line });
    }
    Ok(elements)
}

/// Classifies the body of a `FOR` tag into a loop node without children.
///
/// The body must hold a variable followed by two or three integer constants:
/// start, end and an optional step.
///
/// # Errors
/// - `ForLoopArity` for fewer than three or more than four pieces.
/// - `InvalidLoopVariable` if the first piece is not a variable.
/// - `NonConstantLoopBound` if a bound is anything but an integer constant.
///
/// # Example
/// ```
/// use smartscript::interpreter::parser::element::classify_for;
///
/// let node = classify_for(" i 0 10 2", 1).unwrap();
/// assert_eq!((node.start, node.end, node.step), (0, 10, Some(2)));
///
/// assert!(classify_for(" i 0 n", 1).is_err());
/// ```
pub fn classify_for(body: &str, line: usize) -> ParseResult<ForLoopNode> {
    let tokens = split_tag_body(body, line)?;
    if !(3..=4).contains(&tokens.len()) {
        return Err(ParseError::ForLoopArity { found: tokens.len(),
                                              line });
    }

    let variable = match classify(&tokens[0], line)? {
        Element::Variable(name) => name,
        _ => {
            return Err(ParseError::InvalidLoopVariable { token: tokens[0].clone(),
                                                         line });
        },
    };

    let bounds = tokens[1..].iter()
                            .map(|token| match classify(token, line)? {
                                Element::Integer(i) => Ok(i),
                                other => {
                                    Err(ParseError::NonConstantLoopBound { token: token.clone(),
                                                                           kind: other.kind(),
                                                                           line })
                                },
                            })
                            .collect::<ParseResult<Vec<_>>>()?;

    Ok(ForLoopNode::new(variable, bounds[0], bounds[1], bounds.get(2).copied()))
}
