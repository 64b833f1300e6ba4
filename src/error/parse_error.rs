#[derive(Debug, Clone, PartialEq, Eq)]
/// Represents all errors that can occur during lexing or parsing.
pub enum ParseError {
    /// A backslash was followed by something other than `\` or `{`.
    IllegalEscape {
        /// The source line where the error occurred.
        line: usize,
    },
    /// A tag was opened with `{` but never closed with `}`.
    UnterminatedTag {
        /// The source line where the error occurred.
        line: usize,
    },
    /// A token was requested after the end of input had been reported.
    TokenAfterEof {
        /// The source line where the error occurred.
        line: usize,
    },
    /// A quoted string inside a tag has no closing quote.
    UnterminatedString {
        /// The offending part of the tag.
        token: String,
        /// The source line where the error occurred.
        line:  usize,
    },
    /// A tag that is neither `=`, `FOR` nor `END`.
    UnknownTag {
        /// The complete tag text.
        tag:  String,
        /// The source line where the error occurred.
        line: usize,
    },
    /// An echo tag without any elements.
    EmptyEcho {
        /// The source line where the error occurred.
        line: usize,
    },
    /// A token starting with a letter that is not a valid identifier.
    InvalidVariableName {
        /// The rejected name.
        name: String,
        /// The source line where the error occurred.
        line: usize,
    },
    /// A token starting with `@` that is not a valid function name.
    InvalidFunctionName {
        /// The rejected name, including the `@`.
        name: String,
        /// The source line where the error occurred.
        line: usize,
    },
    /// A token that is neither a name, an operator, a string nor a number.
    UnrecognizedToken {
        /// The token text.
        token: String,
        /// The source line where the error occurred.
        line:  usize,
    },
    /// A `FOR` tag with fewer than three or more than four elements.
    ForLoopArity {
        /// The number of elements found.
        found: usize,
        /// The source line where the error occurred.
        line:  usize,
    },
    /// The first element of a `FOR` tag is not a variable.
    InvalidLoopVariable {
        /// The offending token.
        token: String,
        /// The source line where the error occurred.
        line:  usize,
    },
    /// A loop bound or step is not an integer constant.
    NonConstantLoopBound {
        /// The offending token.
        token: String,
        /// The kind the token was classified as.
        kind:  &'static str,
        /// The source line where the error occurred.
        line:  usize,
    },
    /// An `END` tag with no open `FOR` to close.
    UnmatchedEnd {
        /// The source line where the error occurred.
        line: usize,
    },
    /// Input ended while a `FOR` block was still open.
    UnclosedFor {
        /// Name of the loop variable of the innermost open block.
        variable: String,
        /// The source line of the unclosed `FOR` tag.
        line:     usize,
    },
}

impl ParseError {
    /// The source line the error was detected on.
    #[must_use]
    pub const fn line(&self) -> usize {
        match self {
            Self::IllegalEscape { line }
            | Self::UnterminatedTag { line }
            | Self::TokenAfterEof { line }
            | Self::UnterminatedString { line, .. }
            | Self::UnknownTag { line, .. }
            | Self::EmptyEcho { line }
            | Self::InvalidVariableName { line, .. }
            | Self::InvalidFunctionName { line, .. }
            | Self::UnrecognizedToken { line, .. }
            | Self::ForLoopArity { line, .. }
            | Self::InvalidLoopVariable { line, .. }
            | Self::NonConstantLoopBound { line, .. }
            | Self::UnmatchedEnd { line }
            | Self::UnclosedFor { line, .. } => *line,
        }
    }
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::IllegalEscape { line } => write!(f,
                                                   "Error on line {line}: Illegal escape, only '\\\\' and '\\{{' are allowed."),
            Self::UnterminatedTag { line } => {
                write!(f, "Error on line {line}: Tag was never closed.")
            },
            Self::TokenAfterEof { line } => {
                write!(f, "Error on line {line}: No tokens after EOF.")
            },
            Self::UnterminatedString { token, line } => {
                write!(f, "Error on line {line}: Unterminated string: {token}.")
            },
            Self::UnknownTag { tag, line } => write!(f, "Error on line {line}: Unknown tag: {tag}."),
            Self::EmptyEcho { line } => {
                write!(f, "Error on line {line}: Echo tag must contain at least one element.")
            },
            Self::InvalidVariableName { name, line } => write!(f,
                                                               "Error on line {line}: Invalid variable name '{name}'. Names are letters, digits or '_' and start with a letter."),
            Self::InvalidFunctionName { name, line } => write!(f,
                                                               "Error on line {line}: Invalid function name '{name}'. Names follow '@' and start with a letter."),
            Self::UnrecognizedToken { token, line } => write!(f,
                                                              "Error on line {line}: Unrecognized token '{token}'."),
            Self::ForLoopArity { found, line } => write!(f,
                                                         "Error on line {line}: For loop has {found} elements, but it should have 3 or 4."),
            Self::InvalidLoopVariable { token, line } => write!(f,
                                                                "Error on line {line}: For loop must start with a variable, found '{token}'."),
            Self::NonConstantLoopBound { token, kind, line } => write!(f,
                                                                       "Error on line {line}: For loop bounds must be integer constants, found {kind} '{token}'."),
            Self::UnmatchedEnd { line } => {
                write!(f, "Error on line {line}: END tag without a matching FOR.")
            },
            Self::UnclosedFor { variable, line } => write!(f,
                                                           "Error on line {line}: FOR loop over '{variable}' is never closed with END."),
        }
    }
}

impl std::error::Error for ParseError {}
