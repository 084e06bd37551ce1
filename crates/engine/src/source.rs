//! Record source boundary.
//!
//! Loading is the engine's one external dependency: a collaborator that
//! produces the full record collection in a single batch. The engine does
//! not paginate or stream.

use std::fmt;

use trellis_core::Record;

/// External record provider. Implementations live outside the engine
/// (file readers, HTTP clients, in-memory fixtures).
pub trait RecordSource {
    fn fetch(&self) -> Result<Vec<Record>, LoadError>;
}

/// A failed load. The engine stays in its pre-load state when this is
/// returned; it is surfaced to the presentation layer, never swallowed.
#[derive(Debug)]
pub enum LoadError {
    /// Upstream fetch failed (IO, parse, transport).
    Source(String),
    /// Fetch succeeded but returned no records.
    Empty,
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Source(msg) => write!(f, "record source failed: {msg}"),
            Self::Empty => write!(f, "record source returned no records"),
        }
    }
}

impl std::error::Error for LoadError {}
