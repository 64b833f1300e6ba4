/// The sink trait and parameter scopes.
///
/// Declares [`core::Sink`], the only way the evaluator talks to the outside
/// world, and [`core::Parameters`], the request, persistent and temporary
/// parameter maps every sink carries.
pub mod core;
/// An in-memory sink.
///
/// Collects output into a string. Useful for embedding the engine and for
/// tests.
pub mod memory;
/// An HTTP-style sink.
///
/// Writes a status line, content type and cookies exactly once before the
/// first byte of body, then encodes body text with the configured encoding.
pub mod request_context;

pub use core::{Parameters, Scope, Sink};
pub use memory::MemorySink;
pub use request_context::{Cookie, RequestContext};
