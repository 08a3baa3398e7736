//! Query building and compilation errors

/// Errors raised by the query builder and compiler.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QueryError {
    /// The filter tree contains a node shape the compiler cannot render.
    #[error("Unsupported filter node: {0}")]
    UnsupportedFilterNode(String),

    /// The operator is not valid in this position.
    #[error("Unsupported operator: {0}")]
    UnsupportedOperator(String),

    /// An argument is out of range.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}
