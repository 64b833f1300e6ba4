#[derive(Debug)]
/// Represents all errors that can occur during evaluation and runtime.
pub enum RuntimeError {
    /// A variable was read while no enclosing loop had bound it.
    UnknownVariable {
        /// The name of the variable.
        name: String,
    },
    /// An operator or operation needed more values than the stack holds.
    EmptyStack {
        /// What tried to pop.
        context: String,
    },
    /// An echo tag called an operation that does not exist.
    UnknownFunction {
        /// The name of the function, without `@`.
        name: String,
    },
    /// Attempted division by zero.
    DivisionByZero,
    /// Arithmetic on integers overflowed.
    Overflow,
    /// A text value could not be read as a number.
    NotNumeric {
        /// The offending text.
        text: String,
    },
    /// An element that does not denote a value was used as one.
    UnsupportedValueKind {
        /// The kind of the element.
        kind: &'static str,
    },
    /// A value had an unexpected or incompatible type.
    TypeError {
        /// Details about the type mismatch.
        details: String,
    },
    /// A loop whose step never reaches the upper bound.
    InvalidLoopBounds {
        /// Details describing why the bounds are invalid.
        details: String,
    },
    /// A number pattern handed to `decfmt` is not understood.
    InvalidPattern {
        /// The rejected pattern.
        pattern: String,
    },
    /// A header setting was changed after the header was written.
    HeaderAlreadyGenerated {
        /// The setting that was changed.
        setting: &'static str,
    },
    /// The configured output encoding is not supported.
    UnsupportedEncoding {
        /// The encoding label.
        encoding: String,
    },
    /// Writing to the underlying output failed.
    Io(std::io::Error),
}

impl std::fmt::Display for RuntimeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownVariable { name } => {
                write!(f, "Runtime error: No such stack: variable '{name}' is not bound.")
            },
            Self::EmptyStack { context } => {
                write!(f, "Runtime error: Not enough values on the stack for {context}.")
            },
            Self::UnknownFunction { name } => {
                write!(f, "Runtime error: Unknown function '@{name}'.")
            },
            Self::DivisionByZero => write!(f, "Runtime error: Division by zero."),
            Self::Overflow => write!(f,
                                     "Runtime error: Integer overflow while trying to compute result."),
            Self::NotNumeric { text } => {
                write!(f, "Runtime error: '{text}' can not be read as a number.")
            },
            Self::UnsupportedValueKind { kind } => {
                write!(f, "Runtime error: Unsupported value kind: {kind}.")
            },
            Self::TypeError { details } => write!(f, "Runtime error: Type error: {details}."),
            Self::InvalidLoopBounds { details } => {
                write!(f, "Runtime error: Invalid loop bounds: {details}.")
            },
            Self::InvalidPattern { pattern } => {
                write!(f, "Runtime error: Invalid decimal pattern '{pattern}'.")
            },
            Self::HeaderAlreadyGenerated { setting } => write!(f,
                                                               "Runtime error: Can not change the {setting} after the header was generated."),
            Self::UnsupportedEncoding { encoding } => {
                write!(f, "Runtime error: Unsupported encoding '{encoding}'.")
            },
            Self::Io(e) => write!(f, "Runtime error: Output failed: {e}."),
        }
    }
}

impl std::error::Error for RuntimeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for RuntimeError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}
