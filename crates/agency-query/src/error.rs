//! Error types for query parsing

/// Query errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QueryError {
    /// Sort key outside the fixed enumeration
    #[error("unknown sort key: {0} (expected newest, oldest or title)")]
    UnknownSortKey(String),

    /// Filter expression not of the form `field=value`
    #[error("invalid filter expression: {0} (expected field=value)")]
    InvalidFilter(String),

    /// Page size of zero
    #[error("page size must be at least 1")]
    ZeroPageSize,
}
