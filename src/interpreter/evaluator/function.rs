/// Stack and sink built-ins.
///
/// `sin`, `dup`, `swap` and `setMimeType`.
pub mod builtin;
/// Lookup table and invocation of built-in operations.
///
/// Pops arguments and isolates failures: a failing operation consumes its
/// arguments without aborting the render.
pub mod core;
/// The `decfmt` operation.
///
/// Rounds a number according to a decimal pattern such as `0.00`.
pub mod decfmt;
/// Parameter operations.
///
/// Reads, writes and removes request, persistent and temporary parameters.
pub mod param;
