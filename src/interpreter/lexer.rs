use logos::Logos;
use tracing::trace;

use crate::{error::ParseError, interpreter::parser::core::ParseResult};

/// A token produced by [`Lexer::next_token`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// Literal text with escapes resolved.
    Text(String),
    /// A complete tag including its braces, e.g. `{$= i $}`.
    Tag(String),
    /// End of input. Produced exactly once.
    Eof,
}

/// The scanning mode of the lexer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LexerMode {
    /// Collecting literal text up to the next unescaped `{`.
    Basic,
    /// Capturing a tag up to its closing `}`.
    Tag,
}

/// A single forward pass over template source.
///
/// The source is trimmed once when the lexer is created. The mode switches
/// automatically: `{` moves the lexer into [`LexerMode::Tag`] and any other
/// character after a tag moves it back into [`LexerMode::Basic`].
///
/// # Example
/// ```
/// use smartscript::interpreter::lexer::{Lexer, Token};
///
/// let mut lexer = Lexer::new("  a\\{b{$= x $}  ");
///
/// assert_eq!(lexer.next_token().unwrap(), Token::Text("a{b".into()));
/// assert_eq!(lexer.next_token().unwrap(), Token::Tag("{$= x $}".into()));
/// assert_eq!(lexer.next_token().unwrap(), Token::Eof);
/// assert!(lexer.next_token().is_err());
/// ```
#[derive(Debug, Clone)]
pub struct Lexer<'a> {
    source:      &'a str,
    cursor:      usize,
    line:        usize,
    token_line:  usize,
    mode:        LexerMode,
    finished:    bool,
}

impl<'a> Lexer<'a> {
    /// Creates a lexer in [`LexerMode::Basic`] over the trimmed source.
    #[must_use]
    pub fn new(source: &'a str) -> Self {
        Self { source:      source.trim(),
               cursor:      0,
               line:        1,
               token_line:  1,
               mode:        LexerMode::Basic,
               finished:    false, }
    }

    /// The current scanning mode.
    #[must_use]
    pub const fn mode(&self) -> LexerMode {
        self.mode
    }

    /// Overrides the scanning mode for the next token.
    pub const fn set_mode(&mut self, mode: LexerMode) {
        self.mode = mode;
    }

    /// The 1-based line on which the most recent token started.
    #[must_use]
    pub const fn line(&self) -> usize {
        self.token_line
    }

    /// Moves the cursor forward by `len` bytes, counting the line breaks
    /// passed over.
    fn advance(&mut self, len: usize) {
        let consumed = &self.source[self.cursor..self.cursor + len];
        self.line += consumed.matches('\n').count();
        self.cursor += len;
    }

    fn remaining(&self) -> &'a str {
        &self.source[self.cursor..]
    }

    /// Produces the next token.
    ///
    /// Space characters in front of a token are skipped; line breaks and tabs
    /// are kept as text.
    ///
    /// # Errors
    /// - `IllegalEscape` if a backslash precedes anything but `\` or `{`.
    /// - `UnterminatedTag` if a `{` has no closing `}`.
    /// - `TokenAfterEof` if called again after [`Token::Eof`].
    pub fn next_token(&mut self) -> ParseResult<Token> {
        let rest = self.remaining();
        let skipped = rest.len() - rest.trim_start_matches(is_space_separator).len();
        self.advance(skipped);
        self.token_line = self.line;

        if self.cursor == self.source.len() {
            if self.finished {
                return Err(ParseError::TokenAfterEof { line: self.line() });
            }
            self.finished = true;
            trace!("lexed EOF");
            return Ok(Token::Eof);
        }

        let starts_tag = self.remaining().starts_with('{');
        match (self.mode, starts_tag) {
            (_, true) => {
                self.mode = LexerMode::Tag;
                self.lex_tag()
            },
            (LexerMode::Tag, false) => {
                self.mode = LexerMode::Basic;
                self.lex_text()
            },
            (LexerMode::Basic, false) => self.lex_text(),
        }
    }

    /// Collects text up to the next unescaped `{` or the end of input.
    fn lex_text(&mut self) -> ParseResult<Token> {
        let mut text = String::new();
        let mut chars = self.remaining().char_indices();
        let mut consumed = self.remaining().len();

        while let Some((offset, c)) = chars.next() {
            match c {
                '{' => {
                    consumed = offset;
                    break;
                },
                '\\' => match chars.next() {
                    Some((_, escaped @ ('\\' | '{'))) => text.push(escaped),
                    _ => {
                        let line = self.line + self.remaining()[..offset].matches('\n').count();
                        return Err(ParseError::IllegalEscape { line });
                    },
                },
                _ => text.push(c),
            }
        }

        self.advance(consumed);
        trace!(len = text.len(), "lexed text");
        Ok(Token::Text(text))
    }

    /// Captures a tag from its `{` up to the first `}` that follows the
    /// character after the brace.
    fn lex_tag(&mut self) -> ParseResult<Token> {
        let rest = self.remaining();
        let body_start = rest.char_indices().nth(2).map_or(rest.len(), |(i, _)| i);
        let close = rest[body_start..].find('}')
                                      .ok_or(ParseError::UnterminatedTag { line: self.line() })?;
        let end = body_start + close + 1;

        let tag = rest[..end].trim().to_string();
        self.advance(end);
        trace!(%tag, "lexed tag");
        Ok(Token::Tag(tag))
    }
}

/// Spaces skipped between tokens. Line breaks and tabs are not among them.
fn is_space_separator(c: char) -> bool {
    c.is_whitespace() && !c.is_control()
}

/// A piece of a tag body.
///
/// Tag bodies are split on whitespace, except that a double-quoted span forms
/// one piece even when it contains spaces.
#[derive(Logos, Debug, PartialEq, Eq, Clone)]
pub enum TagToken {
    /// A quoted string, quotes included.
    #[regex(r#""[^"]*""#, |lex| lex.slice().to_string(), allow_greedy = true)]
    Quoted(String),
    /// Any run of characters without whitespace or quotes.
    #[regex(r#"[^\s"]+"#, |lex| lex.slice().to_string(), allow_greedy = true)]
    Word(String),
    /// Whitespace between pieces.
    #[regex(r"\s+", logos::skip)]
    Ignored,
}

/// Splits a tag body into words and quoted strings.
///
/// # Parameters
/// - `body`: The tag content between the tag head and the closing `$`.
/// - `line`: Line number for error reporting.
///
/// # Returns
/// The pieces in source order, quoted pieces keeping their quotes.
///
/// # Errors
/// `UnterminatedString` if a `"` has no closing partner.
///
/// # Example
/// ```
/// use smartscript::interpreter::lexer::split_tag_body;
///
/// let parts = split_tag_body(r#" i "a b" @dup  "#, 1).unwrap();
/// assert_eq!(parts, vec!["i", "\"a b\"", "@dup"]);
/// ```
pub fn split_tag_body(body: &str, line: usize) -> ParseResult<Vec<String>> {
    let mut lexer = TagToken::lexer(body);
    let mut parts = Vec::new();

    while let Some(token) = lexer.next() {
        match token {
            Ok(TagToken::Quoted(s) | TagToken::Word(s)) => parts.push(s),
            Ok(TagToken::Ignored) => {},
            Err(()) => {
                let token = format!("{}{}", lexer.slice(), lexer.remainder());
                return Err(ParseError::UnterminatedString { token: token.trim().to_string(),
                                                            line });
            },
        }
    }

    Ok(parts)
}
