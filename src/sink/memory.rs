use crate::{
    interpreter::evaluator::core::EvalResult,
    sink::core::{Parameters, Sink},
};

/// A sink that collects the body in memory.
///
/// There is no header, so the MIME type can be changed at any time; the last
/// value set is kept for inspection.
///
/// # Example
/// ```
/// use smartscript::sink::{MemorySink, Sink};
///
/// let mut sink = MemorySink::default();
/// sink.write_str("a").unwrap();
/// sink.write_bytes(b"b").unwrap();
///
/// assert_eq!(sink.output(), "ab");
/// ```
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    output:     String,
    mime_type:  Option<String>,
    parameters: Parameters,
}

impl MemorySink {
    /// Creates an empty sink with the given parameters.
    #[must_use]
    pub fn new(parameters: Parameters) -> Self {
        Self { parameters,
               ..Self::default() }
    }

    /// Everything written so far.
    #[must_use]
    pub fn output(&self) -> &str {
        &self.output
    }

    /// Consumes the sink, returning the output.
    #[must_use]
    pub fn into_output(self) -> String {
        self.output
    }

    /// The last MIME type set, if any.
    #[must_use]
    pub fn mime_type(&self) -> Option<&str> {
        self.mime_type.as_deref()
    }
}

impl Sink for MemorySink {
    fn write_str(&mut self, text: &str) -> EvalResult<()> {
        self.output.push_str(text);
        Ok(())
    }

    fn write_bytes(&mut self, data: &[u8]) -> EvalResult<()> {
        self.output.push_str(&String::from_utf8_lossy(data));
        Ok(())
    }

    fn set_mime_type(&mut self, mime_type: &str) -> EvalResult<()> {
        self.mime_type = Some(mime_type.to_string());
        Ok(())
    }

    fn parameters(&self) -> &Parameters {
        &self.parameters
    }

    fn parameters_mut(&mut self) -> &mut Parameters {
        &mut self.parameters
    }
}
