use crate::{error::ParseError, interpreter::parser::core::ParseResult};

/// The recognised shape of a tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagKind<'a> {
    /// `{$END$}`, closing the innermost `FOR`.
    End,
    /// `{$= ... $}` with the text after `=`.
    Echo(&'a str),
    /// `{$FOR ... $}` with the text after `FOR`.
    For(&'a str),
}

/// Recognises the kind of a tag token.
///
/// Whitespace is allowed around the `$` delimiters and the tag name. `END`
/// and `FOR` are matched case-insensitively; `FOR` has to be followed by
/// whitespace.
///
/// # Parameters
/// - `tag`: The complete tag text, braces included.
/// - `line`: Line number for error reporting.
///
/// # Errors
/// `UnknownTag` if the text is not delimited by `{$ ... $}` or names an
/// unknown tag.
///
/// # Example
/// ```
/// use smartscript::interpreter::parser::tag::{TagKind, classify_tag};
///
/// assert_eq!(classify_tag("{ $ end $ }", 1).unwrap(), TagKind::End);
/// assert_eq!(classify_tag("{$= i 1 +$}", 1).unwrap(), TagKind::Echo(" i 1 +"));
/// assert_eq!(classify_tag("{$For i 1 9$}", 1).unwrap(), TagKind::For(" i 1 9"));
/// assert!(classify_tag("{$IF x$}", 1).is_err());
/// ```
pub fn classify_tag(tag: &str, line: usize) -> ParseResult<TagKind<'_>> {
    let unknown = || ParseError::UnknownTag { tag: tag.to_string(),
                                              line };

    let inner = tag.strip_prefix('{')
                   .and_then(|t| t.strip_suffix('}'))
                   .map(str::trim)
                   .ok_or_else(unknown)?;
    let content = inner.strip_prefix('$')
                       .and_then(|t| t.strip_suffix('$'))
                       .ok_or_else(unknown)?
                       .trim_start();

    if content.trim_end().eq_ignore_ascii_case("END") {
        return Ok(TagKind::End);
    }
    if let Some(body) = content.strip_prefix('=') {
        return Ok(TagKind::Echo(body));
    }
    if let Some(head) = content.get(..3)
       && head.eq_ignore_ascii_case("FOR")
    {
        let body = &content[3..];
        if body.is_empty() || body.starts_with(char::is_whitespace) {
            return Ok(TagKind::For(body));
        }
    }

    Err(unknown())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn end_tag_variants() {
        for tag in ["{$END$}", "{$end$}", "{ $ End $ }", "{$  END  $}"] {
            assert_eq!(classify_tag(tag, 1).unwrap(), TagKind::End, "{tag}");
        }
    }

    #[test]
    fn echo_body_is_everything_after_equals() {
        assert_eq!(classify_tag("{$=$}", 1).unwrap(), TagKind::Echo(""));
        assert_eq!(classify_tag("{ $ = \"a\" $ }", 1).unwrap(), TagKind::Echo(" \"a\" "));
    }

    #[test]
    fn for_needs_separator() {
        assert_eq!(classify_tag("{$FOR$}", 1).unwrap(), TagKind::For(""));
        assert!(matches!(classify_tag("{$FORMAT x$}", 4),
                         Err(ParseError::UnknownTag { line: 4, .. })));
    }

    #[test]
    fn malformed_delimiters() {
        assert!(classify_tag("{$}", 1).is_err());
        assert!(classify_tag("{= x}", 1).is_err());
        assert!(classify_tag("{$= x}", 1).is_err());
        assert!(classify_tag("{$ENDS$}", 1).is_err());
    }
}
