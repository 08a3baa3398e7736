//! Error types

mod mapping;
mod option_set;
mod query;

pub use mapping::*;
pub use option_set::*;
pub use query::*;

/// Top-level error for the crate.
///
/// Every failure is local and synchronous; nothing is retried here.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Option set lookup or descriptor document failure.
    #[error(transparent)]
    OptionSet(#[from] OptionSetError),

    /// Attribute mapping failure during hydrate or commit.
    #[error(transparent)]
    Mapping(#[from] MappingError),

    /// Query building or compilation failure.
    #[error(transparent)]
    Query(#[from] QueryError),

    /// Failure reported by a [`RecordSource`](crate::RecordSource).
    #[error("Record source error: {0}")]
    Source(String),

    /// Malformed JSON body.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Creates a record source error.
    pub fn source(message: impl Into<String>) -> Self {
        Self::Source(message.into())
    }
}
