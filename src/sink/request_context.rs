use std::{fmt, io::Write};

use tracing::debug;

use crate::{
    error::RuntimeError,
    interpreter::evaluator::core::EvalResult,
    sink::core::{Parameters, Sink},
};

/// A supported output encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Encoding {
    /// `UTF-8`, the default.
    Utf8,
    /// `ISO-8859-1`. Characters outside Latin-1 are written as `?`.
    Latin1,
}

impl Encoding {
    /// Resolves an encoding label, ignoring case.
    ///
    /// # Errors
    /// `UnsupportedEncoding` for anything but UTF-8 and ISO-8859-1.
    pub fn from_label(label: &str) -> EvalResult<Self> {
        match label.trim().to_ascii_uppercase().as_str() {
            "UTF-8" | "UTF8" => Ok(Self::Utf8),
            "ISO-8859-1" | "ISO8859-1" | "ISO_8859_1" | "LATIN1" => Ok(Self::Latin1),
            _ => Err(RuntimeError::UnsupportedEncoding { encoding: label.to_string() }),
        }
    }

    /// The canonical label, as used in the `Content-Type` header.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Utf8 => "UTF-8",
            Self::Latin1 => "ISO-8859-1",
        }
    }

    /// Encodes text into bytes.
    ///
    /// # Example
    /// ```
    /// use smartscript::sink::request_context::Encoding;
    ///
    /// assert_eq!(Encoding::Latin1.encode("é€"), vec![0xE9, b'?']);
    /// assert_eq!(Encoding::Utf8.encode("é"), "é".as_bytes());
    /// ```
    #[must_use]
    pub fn encode(self, text: &str) -> Vec<u8> {
        match self {
            Self::Utf8 => text.as_bytes().to_vec(),
            Self::Latin1 => text.chars()
                                .map(|c| u8::try_from(u32::from(c)).unwrap_or(b'?'))
                                .collect(),
        }
    }
}

/// A cookie sent with the response header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cookie {
    name:    String,
    value:   String,
    domain:  Option<String>,
    path:    Option<String>,
    max_age: Option<u32>,
}

impl Cookie {
    /// Creates a cookie without domain, path or max age.
    #[must_use]
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self { name:    name.into(),
               value:   value.into(),
               domain:  None,
               path:    None,
               max_age: None, }
    }

    /// Restricts the cookie to a domain.
    #[must_use]
    pub fn with_domain(mut self, domain: impl Into<String>) -> Self {
        self.domain = Some(domain.into());
        self
    }

    /// Restricts the cookie to a path.
    #[must_use]
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Sets the lifetime of the cookie in seconds.
    #[must_use]
    pub const fn with_max_age(mut self, seconds: u32) -> Self {
        self.max_age = Some(seconds);
        self
    }
}

impl fmt::Display for Cookie {
    /// Renders the cookie as a `Set-Cookie` header line, without line end.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Set-Cookie: {}=\"{}\"", self.name, self.value)?;
        if let Some(domain) = &self.domain {
            write!(f, "; Domain={domain}")?;
        }
        if let Some(path) = &self.path {
            write!(f, "; Path={path}")?;
        }
        if let Some(max_age) = self.max_age {
            write!(f, "; Max-Age={max_age}")?;
        }
        write!(f, "; HttpOnly")
    }
}

/// A sink that writes an HTTP-style response to any [`Write`].
///
/// The status line, content type and cookies are written exactly once, just
/// before the first body byte. Afterwards none of them can be changed.
///
/// # Example
/// ```
/// use smartscript::sink::{Cookie, Parameters, RequestContext, Sink};
///
/// let mut context = RequestContext::new(Vec::new(), Parameters::default());
/// context.set_status_code(404).unwrap();
/// context.set_status_text("Not Found").unwrap();
/// context.add_cookie(Cookie::new("sid", "42").with_path("/")).unwrap();
///
/// context.write_str("gone").unwrap();
/// assert!(context.set_status_code(200).is_err());
///
/// let output = String::from_utf8(context.into_inner()).unwrap();
/// assert_eq!(output,
///            "HTTP/1.1 404 Not Found\r\n\
///             Content-Type: text/html; charset=UTF-8\r\n\
///             Set-Cookie: sid=\"42\"; Path=/; HttpOnly\r\n\
///             \r\n\
///             gone");
/// ```
pub struct RequestContext<W: Write> {
    output:           W,
    encoding:         Encoding,
    status_code:      u16,
    status_text:      String,
    mime_type:        String,
    cookies:          Vec<Cookie>,
    parameters:       Parameters,
    header_generated: bool,
}

impl<W: Write> RequestContext<W> {
    /// Creates a context writing to `output`.
    ///
    /// Defaults to `200 OK`, `text/html` and UTF-8.
    pub fn new(output: W, parameters: Parameters) -> Self {
        Self { output,
               encoding: Encoding::Utf8,
               status_code: 200,
               status_text: "OK".to_string(),
               mime_type: "text/html".to_string(),
               cookies: Vec::new(),
               parameters,
               header_generated: false }
    }

    fn ensure_header_pending(&self, setting: &'static str) -> EvalResult<()> {
        if self.header_generated {
            return Err(RuntimeError::HeaderAlreadyGenerated { setting });
        }
        Ok(())
    }

    /// Sets the body encoding.
    ///
    /// # Errors
    /// - `HeaderAlreadyGenerated` after the first write.
    /// - `UnsupportedEncoding` for an unknown label.
    pub fn set_encoding(&mut self, label: &str) -> EvalResult<()> {
        self.ensure_header_pending("encoding")?;
        self.encoding = Encoding::from_label(label)?;
        Ok(())
    }

    /// Sets the status code.
    ///
    /// # Errors
    /// `HeaderAlreadyGenerated` after the first write.
    pub fn set_status_code(&mut self, code: u16) -> EvalResult<()> {
        self.ensure_header_pending("status code")?;
        self.status_code = code;
        Ok(())
    }

    /// Sets the status text.
    ///
    /// # Errors
    /// `HeaderAlreadyGenerated` after the first write.
    pub fn set_status_text(&mut self, text: impl Into<String>) -> EvalResult<()> {
        self.ensure_header_pending("status text")?;
        self.status_text = text.into();
        Ok(())
    }

    /// Adds a cookie to the header.
    ///
    /// # Errors
    /// `HeaderAlreadyGenerated` after the first write.
    pub fn add_cookie(&mut self, cookie: Cookie) -> EvalResult<()> {
        self.ensure_header_pending("cookies")?;
        self.cookies.push(cookie);
        Ok(())
    }

    /// Returns `true` once the header has been written.
    #[must_use]
    pub const fn header_generated(&self) -> bool {
        self.header_generated
    }

    /// Consumes the context, returning the underlying writer.
    pub fn into_inner(self) -> W {
        self.output
    }

    /// Builds the header block.
    fn header(&self) -> String {
        let mut header = format!("HTTP/1.1 {} {}\r\nContent-Type: {}",
                                 self.status_code, self.status_text, self.mime_type);
        if self.mime_type.starts_with("text/") {
            header.push_str("; charset=");
            header.push_str(self.encoding.label());
        }
        header.push_str("\r\n");
        for cookie in &self.cookies {
            header.push_str(&cookie.to_string());
            header.push_str("\r\n");
        }
        header.push_str("\r\n");
        header
    }

    fn write_header_once(&mut self) -> EvalResult<()> {
        if self.header_generated {
            return Ok(());
        }
        debug!(status = self.status_code, mime = %self.mime_type, "writing header");

        let header = Encoding::Latin1.encode(&self.header());
        self.output.write_all(&header)?;
        self.header_generated = true;
        Ok(())
    }
}

impl<W: Write> Sink for RequestContext<W> {
    fn write_str(&mut self, text: &str) -> EvalResult<()> {
        let bytes = self.encoding.encode(text);
        self.write_bytes(&bytes)
    }

    fn write_bytes(&mut self, data: &[u8]) -> EvalResult<()> {
        self.write_header_once()?;
        self.output.write_all(data)?;
        self.output.flush()?;
        Ok(())
    }

    fn set_mime_type(&mut self, mime_type: &str) -> EvalResult<()> {
        self.ensure_header_pending("MIME type")?;
        self.mime_type = mime_type.to_string();
        Ok(())
    }

    fn parameters(&self) -> &Parameters {
        &self.parameters
    }

    fn parameters_mut(&mut self) -> &mut Parameters {
        &mut self.parameters
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sink::Scope;

    fn output(context: RequestContext<Vec<u8>>) -> Vec<u8> {
        context.into_inner()
    }

    #[test]
    fn header_is_written_once_before_body() {
        let mut context = RequestContext::new(Vec::new(), Parameters::default());
        context.write_str("a").unwrap();
        context.write_bytes(b"b").unwrap();

        assert_eq!(output(context),
                   b"HTTP/1.1 200 OK\r\nContent-Type: text/html; charset=UTF-8\r\n\r\nab");
    }

    #[test]
    fn charset_only_for_text_types() {
        let mut context = RequestContext::new(Vec::new(), Parameters::default());
        context.set_mime_type("image/png").unwrap();
        context.write_bytes(&[1, 2]).unwrap();

        let mut expected = b"HTTP/1.1 200 OK\r\nContent-Type: image/png\r\n\r\n".to_vec();
        expected.extend([1, 2]);
        assert_eq!(output(context), expected);
    }

    #[test]
    fn cookie_renders_all_attributes() {
        let cookie = Cookie::new("korisnik", "hello").with_domain("127.0.0.1")
                                                     .with_path("/")
                                                     .with_max_age(3600);
        assert_eq!(cookie.to_string(),
                   "Set-Cookie: korisnik=\"hello\"; Domain=127.0.0.1; Path=/; Max-Age=3600; HttpOnly");
    }

    #[test]
    fn settings_are_frozen_after_first_write() {
        let mut context = RequestContext::new(Vec::new(), Parameters::default());
        context.write_str("").unwrap();
        assert!(context.header_generated());

        assert!(matches!(context.set_mime_type("text/plain"),
                         Err(RuntimeError::HeaderAlreadyGenerated { setting: "MIME type" })));
        assert!(context.set_encoding("UTF-8").is_err());
        assert!(context.set_status_text("x").is_err());
        assert!(context.add_cookie(Cookie::new("a", "b")).is_err());

        context.parameters_mut().set(Scope::Temporary, "still", "ok".into()).unwrap();
    }

    #[test]
    fn latin1_body_replaces_unmappable_characters() {
        let mut context = RequestContext::new(Vec::new(), Parameters::default());
        context.set_encoding("iso-8859-1").unwrap();
        context.set_mime_type("application/octet-stream").unwrap();
        context.write_str("čé").unwrap();

        let bytes = output(context);
        assert!(bytes.ends_with(&[b'?', 0xE9]));
    }

    #[test]
    fn unknown_encoding_is_rejected() {
        let mut context = RequestContext::new(Vec::new(), Parameters::default());
        assert!(matches!(context.set_encoding("KOI8-R"),
                         Err(RuntimeError::UnsupportedEncoding { .. })));
    }
}
