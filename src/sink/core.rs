use std::collections::HashMap;

use crate::{error::RuntimeError, interpreter::evaluator::core::EvalResult};

/// One of the three parameter scopes visible to templates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Scope {
    /// Parameters of the current request. Read-only.
    Request,
    /// Parameters that outlive the request, e.g. session data.
    Persistent,
    /// Parameters that live for the current request only.
    Temporary,
}

impl Scope {
    /// A short name used in messages.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Request => "request",
            Self::Persistent => "persistent",
            Self::Temporary => "temporary",
        }
    }
}

/// The parameter maps of a sink.
///
/// # Example
/// ```
/// use smartscript::sink::{Parameters, Scope};
///
/// let mut params = Parameters::new([("name".to_string(), "Ana".to_string())].into(),
///                                  Default::default());
///
/// assert_eq!(params.get(Scope::Request, "name"), Some("Ana"));
/// assert!(params.set(Scope::Request, "name", "Ivo".into()).is_err());
///
/// params.set(Scope::Temporary, "n", "1".into()).unwrap();
/// assert_eq!(params.get(Scope::Temporary, "n"), Some("1"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Parameters {
    request:    HashMap<String, String>,
    persistent: HashMap<String, String>,
    temporary:  HashMap<String, String>,
}

impl Parameters {
    /// Creates parameter maps with the given request and persistent values
    /// and an empty temporary scope.
    #[must_use]
    pub fn new(request: HashMap<String, String>, persistent: HashMap<String, String>) -> Self {
        Self { request,
               persistent,
               temporary: HashMap::new() }
    }

    const fn scope(&self, scope: Scope) -> &HashMap<String, String> {
        match scope {
            Scope::Request => &self.request,
            Scope::Persistent => &self.persistent,
            Scope::Temporary => &self.temporary,
        }
    }

    fn scope_mut(&mut self, scope: Scope) -> EvalResult<&mut HashMap<String, String>> {
        match scope {
            Scope::Request => {
                Err(RuntimeError::TypeError { details: format!("{} parameters are read-only", scope.name()) })
            },
            Scope::Persistent => Ok(&mut self.persistent),
            Scope::Temporary => Ok(&mut self.temporary),
        }
    }

    /// Looks up a parameter.
    #[must_use]
    pub fn get(&self, scope: Scope, name: &str) -> Option<&str> {
        self.scope(scope).get(name).map(String::as_str)
    }

    /// Stores a parameter, replacing any previous value.
    ///
    /// # Errors
    /// `TypeError` for the read-only request scope.
    pub fn set(&mut self, scope: Scope, name: &str, value: String) -> EvalResult<()> {
        self.scope_mut(scope)?.insert(name.to_string(), value);
        Ok(())
    }

    /// Removes a parameter. Removing a missing name is not an error.
    ///
    /// # Errors
    /// `TypeError` for the read-only request scope.
    pub fn remove(&mut self, scope: Scope, name: &str) -> EvalResult<()> {
        self.scope_mut(scope)?.remove(name);
        Ok(())
    }

    /// Names present in a scope, sorted.
    #[must_use]
    pub fn names(&self, scope: Scope) -> Vec<&str> {
        let mut names: Vec<&str> = self.scope(scope).keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

/// The destination of rendered output.
///
/// The evaluator writes body text through a sink and reads or updates
/// parameters through it. Setting the MIME type is only meaningful before
/// the first write; sinks that emit headers reject it afterwards.
pub trait Sink {
    /// Appends text to the body.
    fn write_str(&mut self, text: &str) -> EvalResult<()>;

    /// Appends raw bytes to the body.
    fn write_bytes(&mut self, data: &[u8]) -> EvalResult<()>;

    /// Sets the MIME type of the output.
    fn set_mime_type(&mut self, mime_type: &str) -> EvalResult<()>;

    /// The parameter scopes.
    fn parameters(&self) -> &Parameters;

    /// The parameter scopes, mutably.
    fn parameters_mut(&mut self) -> &mut Parameters;
}
